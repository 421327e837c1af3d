use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The five metric resources exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricKind {
    BloodPressure,
    HeartRate,
    #[serde(rename = "spo2")]
    SpO2,
    DailySteps,
    SleepDuration,
}

impl MetricKind {
    /// Every metric kind, in dashboard order
    pub const ALL: [MetricKind; 5] = [
        MetricKind::BloodPressure,
        MetricKind::HeartRate,
        MetricKind::SpO2,
        MetricKind::DailySteps,
        MetricKind::SleepDuration,
    ];

    /// Resource path segment, without slashes
    pub fn path(&self) -> &'static str {
        match self {
            MetricKind::BloodPressure => "blood-pressure",
            MetricKind::HeartRate => "heart-rate",
            MetricKind::SpO2 => "spo2",
            MetricKind::DailySteps => "daily-steps",
            MetricKind::SleepDuration => "sleep-duration",
        }
    }

    /// Human readable title used on summary cards
    pub fn title(&self) -> &'static str {
        match self {
            MetricKind::BloodPressure => "Blood Pressure",
            MetricKind::HeartRate => "Heart Rate",
            MetricKind::SpO2 => "Blood Oxygen",
            MetricKind::DailySteps => "Daily Steps",
            MetricKind::SleepDuration => "Sleep Duration",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A single recorded observation of one metric type
pub trait MetricReading: DeserializeOwned + Send + Sync + 'static {
    /// Resource this reading type is fetched from
    const KIND: MetricKind;

    /// When the observation was recorded
    fn timestamp(&self) -> DateTime<Utc>;
}

/// Paginated envelope returned by every metric list endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricCollection<R> {
    /// Total number of readings across all pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,

    /// URL of the next page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// URL of the previous page, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,

    /// Readings on this page, in server order
    pub results: Vec<R>,
}

impl<R> Default for MetricCollection<R> {
    fn default() -> Self {
        Self {
            count: None,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

impl<R> MetricCollection<R> {
    /// Wrap a page of readings
    pub fn from_results(results: Vec<R>) -> Self {
        Self {
            results,
            ..Self::default()
        }
    }

    /// The first reading on the page; the most recent one under the
    /// server's default `-timestamp` ordering
    pub fn latest(&self) -> Option<&R> {
        self.results.first()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }
}

/// Blood pressure category reported by the API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BloodPressureCategory {
    /// Normal blood pressure (systolic < 120 and diastolic < 80)
    Normal,

    /// Elevated blood pressure (systolic 120-129 and diastolic < 80)
    Elevated,

    /// Stage 1 Hypertension (systolic 130-139 or diastolic 80-89)
    #[serde(rename = "Hypertension Stage 1")]
    Hypertension1,

    /// Stage 2 Hypertension (systolic ≥ 140 or diastolic ≥ 90)
    #[serde(rename = "Hypertension Stage 2")]
    Hypertension2,

    /// Hypertensive crisis (systolic ≥ 180 or diastolic ≥ 120)
    #[serde(rename = "Hypertensive Crisis")]
    HypertensiveCrisis,

    /// Any label the client does not recognise
    #[serde(other)]
    Unclassified,
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BloodPressureCategory::Normal => "Normal",
            BloodPressureCategory::Elevated => "Elevated",
            BloodPressureCategory::Hypertension1 => "Hypertension Stage 1",
            BloodPressureCategory::Hypertension2 => "Hypertension Stage 2",
            BloodPressureCategory::HypertensiveCrisis => "Hypertensive Crisis",
            BloodPressureCategory::Unclassified => "Unclassified",
        };
        f.write_str(label)
    }
}

/// Blood pressure reading as returned by `blood-pressure/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodPressureReading {
    /// Server identifier
    #[serde(default)]
    pub id: Option<i64>,

    /// When the reading was taken
    pub timestamp: DateTime<Utc>,

    /// Systolic blood pressure (the higher number)
    pub systolic: i32,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: i32,

    /// Optional pulse rate in beats per minute
    #[serde(default)]
    pub pulse: Option<i32>,

    /// Category computed by the server
    #[serde(default)]
    pub bp_category: Option<BloodPressureCategory>,

    /// Systolic minus diastolic
    #[serde(default)]
    pub pulse_pressure: Option<i32>,

    /// Mean arterial pressure, one decimal place
    #[serde(default)]
    pub mean_arterial_pressure: Option<f64>,

    /// Where the reading came from (manual, device, simulated)
    #[serde(default)]
    pub source: Option<String>,
}

impl MetricReading for BloodPressureReading {
    const KIND: MetricKind = MetricKind::BloodPressure;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Heart rate reading as returned by `heart-rate/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateReading {
    #[serde(default)]
    pub id: Option<i64>,

    pub timestamp: DateTime<Utc>,

    /// Beats per minute
    #[serde(alias = "value")]
    pub bpm: i32,

    /// resting, active or sleeping
    #[serde(default)]
    pub activity_level: Option<String>,

    /// Zone label computed by the server
    #[serde(default)]
    pub heart_rate_zone: Option<String>,

    #[serde(default)]
    pub source: Option<String>,
}

impl MetricReading for HeartRateReading {
    const KIND: MetricKind = MetricKind::HeartRate;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Blood oxygen saturation reading as returned by `spo2/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpO2Reading {
    #[serde(default)]
    pub id: Option<i64>,

    pub timestamp: DateTime<Utc>,

    /// Oxygen saturation percentage
    #[serde(alias = "value")]
    pub percentage: f64,

    /// Severity label computed by the server
    #[serde(default)]
    pub severity: Option<String>,

    #[serde(default)]
    pub measurement_method: Option<String>,

    #[serde(default)]
    pub source: Option<String>,
}

impl MetricReading for SpO2Reading {
    const KIND: MetricKind = MetricKind::SpO2;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Daily step count as returned by `daily-steps/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStepsReading {
    #[serde(default)]
    pub id: Option<i64>,

    pub timestamp: DateTime<Utc>,

    /// Steps taken that day
    pub count: i64,

    /// Daily step goal
    #[serde(default)]
    pub goal: Option<i64>,

    /// Percentage of the goal reached
    #[serde(default)]
    pub goal_percentage: Option<f64>,

    /// Activity level label computed by the server
    #[serde(default)]
    pub active_level: Option<String>,

    /// Distance in kilometers
    #[serde(default)]
    pub distance: Option<f64>,

    #[serde(default)]
    pub source: Option<String>,
}

impl MetricReading for DailyStepsReading {
    const KIND: MetricKind = MetricKind::DailySteps;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Sleep session as returned by `sleep-duration/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepDurationReading {
    #[serde(default)]
    pub id: Option<i64>,

    pub timestamp: DateTime<Utc>,

    /// Duration of the session in hours
    #[serde(alias = "duration")]
    pub hours: f64,

    /// Subjective quality on a 1-10 scale
    #[serde(default)]
    pub quality: Option<u8>,

    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub source: Option<String>,
}

impl MetricReading for SleepDurationReading {
    const KIND: MetricKind = MetricKind::SleepDuration;

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
