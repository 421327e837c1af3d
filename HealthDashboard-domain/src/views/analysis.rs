//! Text panels for the server-computed analyses.
//!
//! Each builder only interprets values the server already calculated; the
//! thresholds here decide wording, never the numbers themselves.

use health_dashboard_data::models::{
    AgeComparison, AlertLevel, BaselineComparison, ElevationCheck, HeartRateVariability, RestingHeartRate,
    SleepSufficiency, SleepWeeklyAverage, SpO2AlertCheck, SpO2LowestReading, StepsWeeklyAverage,
};

use super::group_thousands;

/// Severity of a panel line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelLine {
    pub tone: Tone,
    pub text: String,
}

impl PanelLine {
    fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPanel {
    pub title: String,
    /// Main figure, e.g. "42.5 ms"
    pub headline: Option<String>,
    pub lines: Vec<PanelLine>,
}

impl AnalysisPanel {
    fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            headline: None,
            lines: Vec::new(),
        }
    }

    fn headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = Some(headline.into());
        self
    }

    fn line(mut self, tone: Tone, text: impl Into<String>) -> Self {
        self.lines.push(PanelLine::new(tone, text));
        self
    }

    /// Most severe tone among the lines
    pub fn tone(&self) -> Tone {
        let rank = |tone: Tone| match tone {
            Tone::Success => 0,
            Tone::Info => 1,
            Tone::Warning => 2,
            Tone::Critical => 3,
        };
        self.lines
            .iter()
            .map(|l| l.tone)
            .max_by_key(|t| rank(*t))
            .unwrap_or(Tone::Info)
    }
}

pub fn elevation_panel(check: &ElevationCheck, requested_days: u32) -> AnalysisPanel {
    let days = check.days_checked.unwrap_or(requested_days);
    let panel = AnalysisPanel::new("Blood Pressure Elevation Check");

    if check.is_consistently_elevated {
        panel
            .line(
                Tone::Warning,
                format!("Your blood pressure has been consistently elevated over the past {} days.", days),
            )
            .line(Tone::Info, "Consider consulting with a healthcare provider if this trend continues.")
    } else {
        panel.line(
            Tone::Success,
            format!("Your blood pressure has not been consistently elevated over the past {} days.", days),
        )
    }
}

pub fn age_comparison_panel(comparison: &AgeComparison) -> AnalysisPanel {
    let reading = comparison.latest_reading.clone().unwrap_or_default();
    let systolic = reading.systolic.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string());
    let diastolic = reading.diastolic.map(|v| v.to_string()).unwrap_or_else(|| "N/A".to_string());
    let assessment = comparison.age_specific_assessment.clone().unwrap_or_default();

    let mut panel = AnalysisPanel::new("Age-Based Comparison").headline(format!("{}/{} mmHg", systolic, diastolic));

    panel = if assessment.within_recommended_range {
        panel.line(
            Tone::Success,
            format!(
                "Your blood pressure ({}/{} mmHg) is within the recommended range for your age.",
                systolic, diastolic
            ),
        )
    } else {
        panel.line(
            Tone::Warning,
            format!(
                "Your blood pressure ({}/{} mmHg) may need attention based on your age.",
                systolic, diastolic
            ),
        )
    };

    if let Some(recommendation) = comparison.recommendation.as_deref().filter(|r| !r.is_empty()) {
        panel = panel.line(Tone::Info, recommendation);
    }

    let ranges = assessment.recommended_ranges.unwrap_or_default();
    panel
        .line(
            Tone::Info,
            format!("Recommended systolic: {}", ranges.systolic.as_deref().unwrap_or("N/A")),
        )
        .line(
            Tone::Info,
            format!("Recommended diastolic: {}", ranges.diastolic.as_deref().unwrap_or("N/A")),
        )
}

pub fn steps_weekly_panel(average: &StepsWeeklyAverage) -> AnalysisPanel {
    let panel = AnalysisPanel::new("Weekly Step Average");

    let Some(avg) = average.weekly_average else {
        return panel.line(Tone::Info, "Not enough data to calculate the weekly average.");
    };

    let mut panel = panel.headline(format!("{} steps", group_thousands(avg.round() as i64))).line(
        Tone::Info,
        format!("Data completeness: {:.1}% for the last 7 days.", average.data_completeness),
    );

    let goal = average.goal_metrics.clone().unwrap_or_default();
    match goal.current_goal.filter(|g| *g > 0) {
        Some(current_goal) => {
            panel = panel.line(
                Tone::Info,
                format!(
                    "Average vs goal: {:.1}% of {} steps",
                    goal.average_percentage.unwrap_or(0.0),
                    group_thousands(current_goal)
                ),
            );
            if goal.meeting_goal {
                panel.line(
                    Tone::Success,
                    "On average, you're meeting your latest daily goal over the past week!",
                )
            } else {
                panel.line(Tone::Info, "Keep pushing to meet your daily goal average.")
            }
        }
        None => panel.line(Tone::Info, "No goal data found for comparison."),
    }
}

pub fn hrv_panel(hrv: &HeartRateVariability, time_window: u32) -> AnalysisPanel {
    let panel = AnalysisPanel::new("Heart Rate Variability");

    let value = match (hrv.hrv, hrv.message.as_deref()) {
        (Some(value), _) => value,
        (None, Some(message)) => return panel.line(Tone::Info, message),
        (None, None) => return panel.line(Tone::Info, "No heart rate variability data available."),
    };

    let band = if value < 20.0 {
        PanelLine::new(Tone::Warning, "Low HRV may indicate stress or health issues.")
    } else if value < 50.0 {
        PanelLine::new(Tone::Info, "Moderate HRV is common during regular daily activities.")
    } else {
        PanelLine::new(Tone::Success, "High HRV often indicates good cardiovascular health.")
    };

    let mut panel = panel.headline(format!("{:.1} ms", value));
    panel.lines.push(band);
    panel.line(Tone::Info, format!("Based on data from the past {} hour(s).", time_window))
}

pub fn baseline_panel(comparison: &BaselineComparison, baseline_days: u32) -> AnalysisPanel {
    let panel = AnalysisPanel::new("Baseline Comparison");

    if let Some(message) = comparison.message.as_deref() {
        return panel.line(Tone::Info, message);
    }

    let current = comparison.current.unwrap_or(0.0);
    let change = comparison.percent_change.unwrap_or(0.0);
    let panel = panel.headline(format!("{:.1} BPM ({:+.1}%)", current, change));

    if comparison.is_significant && change > 5.0 {
        panel.line(
            Tone::Warning,
            format!(
                "Your heart rate is significantly higher ({:.1}%) than your {}-day baseline.",
                change, baseline_days
            ),
        )
    } else if comparison.is_significant && change < -5.0 {
        panel.line(
            Tone::Success,
            format!(
                "Your heart rate is significantly lower ({:.1}%) than your {}-day baseline.",
                change, baseline_days
            ),
        )
    } else {
        panel.line(
            Tone::Info,
            format!("Your heart rate is within normal variation of your {}-day baseline.", baseline_days),
        )
    }
}

pub fn resting_panel(resting: &RestingHeartRate) -> AnalysisPanel {
    let panel = AnalysisPanel::new("Resting Heart Rate");

    let value = match (resting.average_resting_heart_rate, &resting.error) {
        (Some(value), None) => value,
        _ => return panel.line(Tone::Info, "Not enough resting heart rate data available."),
    };

    let panel = panel.headline(format!("{:.0} BPM", value));
    if value < 60.0 {
        panel.line(
            Tone::Info,
            "Your resting heart rate is below 60 BPM, which may indicate good cardiovascular fitness.",
        )
    } else if value <= 100.0 {
        panel.line(Tone::Success, "Your resting heart rate is within the normal range (60-100 BPM).")
    } else {
        panel.line(
            Tone::Warning,
            "Your resting heart rate is above 100 BPM, which may require attention.",
        )
    }
}

pub fn sleep_sufficiency_panel(check: &SleepSufficiency, age: u32) -> AnalysisPanel {
    let mut panel = AnalysisPanel::new("Sleep Sufficiency");

    if let Some(duration) = check.duration {
        panel = panel.headline(format!("{:.1} hrs", duration));
    }

    panel = match check.is_sufficient {
        Some(true) => panel.line(Tone::Success, format!("Sufficient sleep based on age {}.", age)),
        Some(false) => panel.line(
            Tone::Warning,
            format!("Sleep duration may be insufficient or excessive for age {}.", age),
        ),
        None => panel.line(Tone::Info, "Could not determine sufficiency from the latest data."),
    };

    if let Some(range) = &check.recommended_range {
        if let (Some(min), Some(max)) = (range.min_hours, range.max_hours) {
            panel = panel.line(Tone::Info, format!("Recommended: {}-{} hours per night.", min, max));
        }
    }

    match check.recommendation.as_deref() {
        Some(recommendation) if !recommendation.is_empty() => {
            panel.line(Tone::Info, format!("Recommendation: {}", recommendation))
        }
        _ => panel,
    }
}

pub fn sleep_weekly_panel(average: &SleepWeeklyAverage, days: u32) -> AnalysisPanel {
    let panel = AnalysisPanel::new(format!("{}-Night Average Sleep", days));

    let Some(avg) = average.weekly_average else {
        let message = average
            .message
            .clone()
            .unwrap_or_else(|| format!("Not enough data to calculate the {}-night average.", days));
        return panel.line(Tone::Info, message);
    };

    let panel = panel.headline(format!("{:.1} hrs", avg)).line(
        Tone::Info,
        format!("Data completeness: {:.1}%.", average.data_completeness),
    );

    match average.assessment.as_deref() {
        Some(assessment) => panel.line(Tone::Info, format!("Assessment: {}", assessment)),
        None => panel,
    }
}

pub fn spo2_lowest_panel(lowest: &SpO2LowestReading, days: u32) -> AnalysisPanel {
    let panel = AnalysisPanel::new(format!("Lowest SpO2 (last {} days)", days));

    match (lowest.lowest_value(), lowest.lowest_oxygen_level.as_deref()) {
        (Some(value), _) => {
            let panel = panel.headline(format!("{}%", value));
            if value < 90 {
                panel.line(Tone::Critical, "Lowest reading is below the critical threshold (90%).")
            } else if value < 95 {
                panel.line(Tone::Warning, "Lowest reading is below the normal threshold (95%).")
            } else {
                panel.line(Tone::Success, "Lowest reading remained within the normal range.")
            }
        }
        (None, Some(raw)) if raw.trim() != "N/A" => panel.line(
            Tone::Info,
            format!("Could not determine lowest reading. API response: {}", raw),
        ),
        _ => panel.line(
            Tone::Info,
            format!("No SpO2 data found in the last {} days to determine the lowest reading.", days),
        ),
    }
}

pub fn spo2_alert_panel(alert: &SpO2AlertCheck) -> AnalysisPanel {
    let panel = AnalysisPanel::new("SpO2 Alert Check");

    let Some(message) = alert.message.as_deref() else {
        return panel.line(Tone::Info, "No recent SpO2 data found to perform alert check.");
    };

    match alert.alert_level {
        AlertLevel::Critical => panel.line(Tone::Critical, format!("CRITICAL ALERT: {}", message)),
        AlertLevel::Warning => panel.line(Tone::Warning, format!("ALERT: {}", message)),
        AlertLevel::Info => panel.line(Tone::Success, format!("OK: {}", message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_dashboard_data::models::{AgeAssessment, ComparedReading, GoalMetrics, RecommendedRanges};

    fn texts(panel: &AnalysisPanel) -> Vec<&str> {
        panel.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_hrv_bands() {
        let low = hrv_panel(&HeartRateVariability { hrv: Some(15.0), ..Default::default() }, 24);
        assert_eq!(low.headline.as_deref(), Some("15.0 ms"));
        assert_eq!(low.lines[0].tone, Tone::Warning);

        let moderate = hrv_panel(&HeartRateVariability { hrv: Some(20.0), ..Default::default() }, 24);
        assert_eq!(moderate.lines[0].tone, Tone::Info);

        let high = hrv_panel(&HeartRateVariability { hrv: Some(50.0), ..Default::default() }, 24);
        assert_eq!(high.lines[0].tone, Tone::Success);
        assert_eq!(high.lines[1].text, "Based on data from the past 24 hour(s).");
    }

    #[test]
    fn test_hrv_message_only() {
        let panel = hrv_panel(
            &HeartRateVariability {
                hrv: None,
                message: Some("Not enough data".to_string()),
                ..Default::default()
            },
            24,
        );
        assert!(panel.headline.is_none());
        assert_eq!(texts(&panel), vec!["Not enough data"]);
    }

    #[test]
    fn test_baseline_significance() {
        let higher = BaselineComparison {
            current: Some(82.0),
            baseline: Some(72.0),
            percent_change: Some(13.9),
            is_significant: true,
            ..Default::default()
        };
        let panel = baseline_panel(&higher, 30);
        assert_eq!(panel.headline.as_deref(), Some("82.0 BPM (+13.9%)"));
        assert_eq!(panel.tone(), Tone::Warning);
        assert_eq!(
            texts(&panel),
            vec!["Your heart rate is significantly higher (13.9%) than your 30-day baseline."]
        );

        let lower = BaselineComparison {
            percent_change: Some(-8.0),
            is_significant: true,
            ..Default::default()
        };
        assert_eq!(baseline_panel(&lower, 30).tone(), Tone::Success);

        let small = BaselineComparison {
            percent_change: Some(3.0),
            is_significant: false,
            ..Default::default()
        };
        assert_eq!(
            texts(&baseline_panel(&small, 14)),
            vec!["Your heart rate is within normal variation of your 14-day baseline."]
        );
    }

    #[test]
    fn test_resting_bands() {
        let make = |value: f64| RestingHeartRate {
            average_resting_heart_rate: Some(value),
            ..Default::default()
        };
        assert_eq!(resting_panel(&make(55.0)).tone(), Tone::Info);
        assert_eq!(resting_panel(&make(100.0)).tone(), Tone::Success);
        assert_eq!(resting_panel(&make(101.0)).tone(), Tone::Warning);

        let error = RestingHeartRate {
            error: Some("no data".to_string()),
            ..Default::default()
        };
        assert_eq!(
            texts(&resting_panel(&error)),
            vec!["Not enough resting heart rate data available."]
        );
    }

    #[test]
    fn test_spo2_lowest_thresholds() {
        let make = |raw: &str| SpO2LowestReading {
            lowest_oxygen_level: Some(raw.to_string()),
            ..Default::default()
        };
        assert_eq!(spo2_lowest_panel(&make("88%"), 7).tone(), Tone::Critical);
        assert_eq!(spo2_lowest_panel(&make("93%"), 7).tone(), Tone::Warning);
        assert_eq!(spo2_lowest_panel(&make("97%"), 7).tone(), Tone::Success);
        assert_eq!(spo2_lowest_panel(&make("97%"), 7).headline.as_deref(), Some("97%"));

        assert_eq!(
            texts(&spo2_lowest_panel(&make("N/A"), 7)),
            vec!["No SpO2 data found in the last 7 days to determine the lowest reading."]
        );
        assert_eq!(
            texts(&spo2_lowest_panel(&make("unknown"), 7)),
            vec!["Could not determine lowest reading. API response: unknown"]
        );
    }

    #[test]
    fn test_spo2_alert_levels() {
        let make = |level: AlertLevel| SpO2AlertCheck {
            message: Some("SpO2 at 89%".to_string()),
            alert_level: level,
            ..Default::default()
        };
        assert_eq!(texts(&spo2_alert_panel(&make(AlertLevel::Critical))), vec!["CRITICAL ALERT: SpO2 at 89%"]);
        assert_eq!(texts(&spo2_alert_panel(&make(AlertLevel::Warning))), vec!["ALERT: SpO2 at 89%"]);
        assert_eq!(texts(&spo2_alert_panel(&make(AlertLevel::Info))), vec!["OK: SpO2 at 89%"]);
        assert_eq!(spo2_alert_panel(&SpO2AlertCheck::default()).tone(), Tone::Info);
    }

    #[test]
    fn test_elevation_panel() {
        let elevated = ElevationCheck {
            is_consistently_elevated: true,
            days_checked: Some(3),
            ..Default::default()
        };
        let panel = elevation_panel(&elevated, 7);
        assert_eq!(panel.tone(), Tone::Warning);
        assert!(panel.lines[0].text.contains("past 3 days"));

        let fine = elevation_panel(&ElevationCheck::default(), 7);
        assert_eq!(
            texts(&fine),
            vec!["Your blood pressure has not been consistently elevated over the past 7 days."]
        );
    }

    #[test]
    fn test_age_comparison_panel() {
        let comparison = AgeComparison {
            latest_reading: Some(ComparedReading {
                systolic: Some(128),
                diastolic: Some(82),
                category: Some("Hypertension Stage 1".to_string()),
            }),
            age_specific_assessment: Some(AgeAssessment {
                within_recommended_range: false,
                recommended_ranges: Some(RecommendedRanges {
                    systolic: Some("< 130".to_string()),
                    diastolic: Some("< 80".to_string()),
                }),
            }),
            recommendation: Some("Reduce sodium intake".to_string()),
            ..Default::default()
        };

        let panel = age_comparison_panel(&comparison);
        assert_eq!(panel.headline.as_deref(), Some("128/82 mmHg"));
        assert_eq!(
            texts(&panel),
            vec![
                "Your blood pressure (128/82 mmHg) may need attention based on your age.",
                "Reduce sodium intake",
                "Recommended systolic: < 130",
                "Recommended diastolic: < 80",
            ]
        );
    }

    #[test]
    fn test_steps_weekly_panel() {
        let average = StepsWeeklyAverage {
            weekly_average: Some(8499.6),
            data_completeness: 85.7,
            goal_metrics: Some(GoalMetrics {
                current_goal: Some(10000),
                average_percentage: Some(85.0),
                meeting_goal: false,
            }),
            ..Default::default()
        };

        let panel = steps_weekly_panel(&average);
        assert_eq!(panel.headline.as_deref(), Some("8,500 steps"));
        assert_eq!(
            texts(&panel),
            vec![
                "Data completeness: 85.7% for the last 7 days.",
                "Average vs goal: 85.0% of 10,000 steps",
                "Keep pushing to meet your daily goal average.",
            ]
        );

        let empty = steps_weekly_panel(&StepsWeeklyAverage::default());
        assert_eq!(texts(&empty), vec!["Not enough data to calculate the weekly average."]);
    }

    #[test]
    fn test_sleep_panels() {
        let sufficiency = SleepSufficiency {
            is_sufficient: Some(false),
            duration: Some(5.5),
            recommendation: Some("Aim for at least 7 hours".to_string()),
            ..Default::default()
        };
        let panel = sleep_sufficiency_panel(&sufficiency, 30);
        assert_eq!(panel.headline.as_deref(), Some("5.5 hrs"));
        assert_eq!(panel.tone(), Tone::Warning);
        assert_eq!(panel.lines.last().unwrap().text, "Recommendation: Aim for at least 7 hours");

        let weekly = SleepWeeklyAverage {
            weekly_average: Some(7.5),
            data_completeness: 100.0,
            assessment: Some("Adequate".to_string()),
            ..Default::default()
        };
        let panel = sleep_weekly_panel(&weekly, 7);
        assert_eq!(panel.title, "7-Night Average Sleep");
        assert_eq!(panel.headline.as_deref(), Some("7.5 hrs"));
        assert_eq!(panel.lines.last().unwrap().text, "Assessment: Adequate");

        let missing = sleep_weekly_panel(&SleepWeeklyAverage::default(), 7);
        assert_eq!(texts(&missing), vec!["Not enough data to calculate the 7-night average."]);
    }
}
