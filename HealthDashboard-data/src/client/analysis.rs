use super::{ApiClient, ApiError};
use crate::models::{
    AgeComparison, BaselineComparison, ElevationCheck, HeartRateVariability, RestingHeartRate,
    SleepSufficiency, SleepWeeklyAverage, SpO2AlertCheck, SpO2LowestReading, StepsWeeklyAverage,
    TimeOfDayAnalysis,
};

/// Default lookback of the time-of-day analysis, in days
pub const DEFAULT_TIME_OF_DAY_DAYS: u32 = 30;

/// Default window of the elevation check, in days
pub const DEFAULT_ELEVATION_DAYS: u32 = 7;

/// Default HRV window, in hours
pub const DEFAULT_HRV_WINDOW_HOURS: u32 = 24;

/// Default baseline length for the heart-rate comparison, in days
pub const DEFAULT_BASELINE_DAYS: u32 = 30;

/// Default window for the weekly sleep and lowest SpO2 lookups, in days
pub const DEFAULT_WEEKLY_DAYS: u32 = 7;

const NO_PARAMS: &[(&str, &str)] = &[];

// Server-side computed analyses. The client only forwards parameters.
impl ApiClient {
    pub async fn blood_pressure_time_of_day(&self, days: u32) -> Result<TimeOfDayAnalysis, ApiError> {
        self.get_json("blood-pressure/time_of_day_analysis/", &[("days", days)])
            .await
    }

    pub async fn blood_pressure_elevation_check(&self, days: u32) -> Result<ElevationCheck, ApiError> {
        self.get_json("blood-pressure/elevation_check/", &[("days", days)]).await
    }

    /// The server route is spelled `age_comparsion`
    pub async fn blood_pressure_age_comparison(&self, age: u32) -> Result<AgeComparison, ApiError> {
        self.get_json("blood-pressure/age_comparsion/", &[("age", age)]).await
    }

    pub async fn daily_steps_weekly_average(&self) -> Result<StepsWeeklyAverage, ApiError> {
        self.get_json("daily-steps/weekly_average/", NO_PARAMS).await
    }

    pub async fn heart_rate_hrv(&self, time_window: u32) -> Result<HeartRateVariability, ApiError> {
        self.get_json("heart-rate/hrv/", &[("time_window", time_window)]).await
    }

    /// Compare recent heart rate against a baseline, optionally restricted to
    /// one activity level
    pub async fn heart_rate_baseline_comparison(
        &self,
        baseline_days: u32,
        baseline_activity: Option<&str>,
    ) -> Result<BaselineComparison, ApiError> {
        let mut params = vec![("baseline_days", baseline_days.to_string())];
        if let Some(activity) = baseline_activity {
            params.push(("baseline_activity", activity.to_string()));
        }

        self.get_json("heart-rate/baseline_comparison/", &params).await
    }

    pub async fn heart_rate_resting_average(&self) -> Result<RestingHeartRate, ApiError> {
        self.get_json("heart-rate/resting_average/", NO_PARAMS).await
    }

    pub async fn sleep_sufficiency_check(&self, age: u32) -> Result<SleepSufficiency, ApiError> {
        self.get_json("sleep-duration/sufficiency_check/", &[("age", age)]).await
    }

    /// Weekly sleep average; served by the sufficiency check route when
    /// called with `days`
    pub async fn sleep_weekly_average(&self, days: u32) -> Result<SleepWeeklyAverage, ApiError> {
        self.get_json("sleep-duration/sufficiency_check/", &[("days", days)]).await
    }

    pub async fn spo2_lowest_reading(&self, days: u32) -> Result<SpO2LowestReading, ApiError> {
        self.get_json("spo2/lowest_reading/", &[("days", days)]).await
    }

    pub async fn spo2_alert_check(&self) -> Result<SpO2AlertCheck, ApiError> {
        self.get_json("spo2/alert_check/", NO_PARAMS).await
    }
}
