use health_dashboard_data::models::BloodPressureCategory;

/// Categorize blood pressure based on AHA guidelines
pub fn categorize_blood_pressure(systolic: i32, diastolic: i32) -> BloodPressureCategory {
    if systolic >= 180 || diastolic >= 120 {
        BloodPressureCategory::HypertensiveCrisis
    } else if systolic >= 140 || diastolic >= 90 {
        BloodPressureCategory::Hypertension2
    } else if systolic >= 130 || diastolic >= 80 {
        BloodPressureCategory::Hypertension1
    } else if systolic >= 120 && diastolic < 80 {
        BloodPressureCategory::Elevated
    } else {
        BloodPressureCategory::Normal
    }
}

/// Heart rate zone label for a bpm value
pub fn heart_rate_zone(bpm: i32) -> &'static str {
    if bpm < 60 {
        "Below Normal"
    } else if bpm <= 100 {
        "Normal"
    } else if bpm <= 140 {
        "Fat Burn"
    } else if bpm <= 170 {
        "Cardio"
    } else {
        "Peak"
    }
}

/// Severity label for an oxygen saturation percentage
pub fn spo2_severity(percentage: f64) -> &'static str {
    if percentage >= 95.0 {
        "Normal"
    } else if percentage >= 90.0 {
        "Mild Hypoxemia"
    } else if percentage >= 80.0 {
        "Moderate Hypoxemia"
    } else {
        "Severe Hypoxemia"
    }
}

/// Quality label for a 1-10 sleep quality score
pub fn sleep_quality_label(quality: u8) -> &'static str {
    if quality < 5 {
        "Poor"
    } else if quality < 8 {
        "Fair"
    } else {
        "Good"
    }
}

/// Steps as a percentage of the goal, when a positive goal is set
pub fn goal_progress(count: i64, goal: Option<i64>) -> Option<f64> {
    match goal {
        Some(goal) if goal > 0 => Some(count as f64 / goal as f64 * 100.0),
        _ => None,
    }
}
