// Wire models for the metrics API
pub mod analysis;
pub mod metrics;
pub mod session;

pub use analysis::{
    AgeAssessment, AgeComparison, AlertLevel, BaselineComparison, ComparedReading, ElevationCheck, ExtraFields,
    GoalMetrics, HeartRateVariability, PressureAverages, PressurePattern, RecommendedRanges, RestingHeartRate,
    SleepRange, SleepSufficiency, SleepWeeklyAverage, SpO2AlertCheck, SpO2LowestReading, StepsWeeklyAverage,
    TimeOfDayAnalysis, UNKNOWN_PATTERN,
};
pub use metrics::{
    BloodPressureCategory, BloodPressureReading, DailyStepsReading, HeartRateReading, MetricCollection,
    MetricKind, MetricReading, SleepDurationReading, SpO2Reading,
};
pub use session::{RegisterResponse, Session, TokenResponse, UserProfile};
