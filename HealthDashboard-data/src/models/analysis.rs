//! Payloads returned by the precomputed analysis sub-resources.
//!
//! The server owns every calculation here. Fields the client does not model
//! are kept in each payload's `extra` map so nothing is silently dropped.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Arbitrary extra fields carried alongside a modelled payload
pub type ExtraFields = HashMap<String, serde_json::Value>;

/// Morning or evening blood pressure averages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressureAverages {
    /// Mean systolic value; absent when there were no readings
    #[serde(default)]
    pub avg_systolic: Option<f64>,

    /// Mean diastolic value; absent when there were no readings
    #[serde(default)]
    pub avg_diastolic: Option<f64>,
}

/// Pattern name used when the server omits one
pub const UNKNOWN_PATTERN: &str = "Unknown";

/// Morning-versus-evening pattern classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressurePattern {
    /// Pattern name, e.g. "Morning Hypertension"
    #[serde(rename = "type", default = "unknown_pattern", deserialize_with = "pattern_name")]
    pub pattern_type: String,

    /// Free-text explanation
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Morning minus evening systolic average in mmHg; missing or null reads as 0
    #[serde(default, deserialize_with = "null_as_default")]
    pub systolic_difference: f64,
}

fn unknown_pattern() -> String {
    UNKNOWN_PATTERN.to_string()
}

fn pattern_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(unknown_pattern))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `blood-pressure/time_of_day_analysis/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeOfDayAnalysis {
    #[serde(default)]
    pub morning_averages: Option<PressureAverages>,

    #[serde(default)]
    pub evening_averages: Option<PressureAverages>,

    #[serde(default)]
    pub pattern: Option<PressurePattern>,

    /// Number of readings inside the lookback window
    #[serde(default)]
    pub reading_count: Option<u32>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// `blood-pressure/elevation_check/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElevationCheck {
    #[serde(default)]
    pub is_consistently_elevated: bool,

    #[serde(default)]
    pub days_checked: Option<u32>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Latest reading echoed back by the age comparison endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparedReading {
    #[serde(default)]
    pub systolic: Option<i32>,

    #[serde(default)]
    pub diastolic: Option<i32>,

    #[serde(default)]
    pub category: Option<String>,
}

/// Recommended range strings, e.g. "< 120"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedRanges {
    #[serde(default)]
    pub systolic: Option<String>,

    #[serde(default)]
    pub diastolic: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeAssessment {
    #[serde(default)]
    pub within_recommended_range: bool,

    #[serde(default)]
    pub recommended_ranges: Option<RecommendedRanges>,
}

/// `blood-pressure/age_comparsion/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgeComparison {
    #[serde(default)]
    pub latest_reading: Option<ComparedReading>,

    #[serde(default)]
    pub age_specific_assessment: Option<AgeAssessment>,

    #[serde(default)]
    pub recommendation: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalMetrics {
    #[serde(default)]
    pub current_goal: Option<i64>,

    #[serde(default)]
    pub average_percentage: Option<f64>,

    #[serde(default)]
    pub meeting_goal: bool,
}

/// `daily-steps/weekly_average/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepsWeeklyAverage {
    #[serde(default)]
    pub weekly_average: Option<f64>,

    /// Percentage of days in the window that have data
    #[serde(default)]
    pub data_completeness: f64,

    #[serde(default)]
    pub goal_metrics: Option<GoalMetrics>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// `heart-rate/hrv/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeartRateVariability {
    /// Variability in milliseconds
    #[serde(default)]
    pub hrv: Option<f64>,

    /// Explanation when the server could not compute a value
    #[serde(default)]
    pub message: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// `heart-rate/baseline_comparison/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BaselineComparison {
    #[serde(default)]
    pub current: Option<f64>,

    #[serde(default)]
    pub baseline: Option<f64>,

    /// Signed percentage change from baseline
    #[serde(default)]
    pub percent_change: Option<f64>,

    #[serde(default)]
    pub is_significant: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// `heart-rate/resting_average/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestingHeartRate {
    #[serde(default, rename = "Average_resting_heart_rate")]
    pub average_resting_heart_rate: Option<f64>,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// Recommended nightly sleep, in hours
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepRange {
    #[serde(default)]
    pub min_hours: Option<f64>,

    #[serde(default)]
    pub max_hours: Option<f64>,
}

/// `sleep-duration/sufficiency_check/?age=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepSufficiency {
    #[serde(default)]
    pub is_sufficient: Option<bool>,

    /// Latest session duration in hours
    #[serde(default)]
    pub duration: Option<f64>,

    #[serde(default)]
    pub recommendation: Option<String>,

    #[serde(default)]
    pub recommended_range: Option<SleepRange>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// `sleep-duration/sufficiency_check/?days=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepWeeklyAverage {
    #[serde(default)]
    pub weekly_average: Option<f64>,

    #[serde(default)]
    pub data_completeness: f64,

    #[serde(default)]
    pub assessment: Option<String>,

    #[serde(default)]
    pub recommended_range: Option<SleepRange>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// `spo2/lowest_reading/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpO2LowestReading {
    /// Lowest level as sent by the server, e.g. "92%"
    #[serde(default)]
    pub lowest_oxygen_level: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl SpO2LowestReading {
    /// Numeric value of `lowest_oxygen_level` with any `%` removed
    pub fn lowest_value(&self) -> Option<u8> {
        self.lowest_oxygen_level
            .as_deref()
            .and_then(|raw| raw.trim().trim_end_matches('%').trim().parse::<u8>().ok())
    }
}

/// Severity of an SpO2 alert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Warning,
    Critical,
    #[default]
    #[serde(other)]
    Info,
}

/// `spo2/alert_check/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpO2AlertCheck {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub alert_level: AlertLevel,

    #[serde(flatten)]
    pub extra: ExtraFields,
}
