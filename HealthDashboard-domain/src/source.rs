use async_trait::async_trait;

use health_dashboard_data::models::{
    BloodPressureReading, DailyStepsReading, HeartRateReading, MetricCollection, SleepDurationReading,
    SpO2Reading, TimeOfDayAnalysis,
};
use health_dashboard_data::{ApiClient, ApiError, MetricQuery};

/// Where the dashboard and charts get their data from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetricsSource: Send + Sync {
    async fn blood_pressure(&self, query: MetricQuery) -> Result<MetricCollection<BloodPressureReading>, ApiError>;

    async fn heart_rate(&self, query: MetricQuery) -> Result<MetricCollection<HeartRateReading>, ApiError>;

    async fn spo2(&self, query: MetricQuery) -> Result<MetricCollection<SpO2Reading>, ApiError>;

    async fn daily_steps(&self, query: MetricQuery) -> Result<MetricCollection<DailyStepsReading>, ApiError>;

    async fn sleep_duration(&self, query: MetricQuery) -> Result<MetricCollection<SleepDurationReading>, ApiError>;

    /// Morning versus evening blood pressure over the last `days` days
    async fn time_of_day_analysis(&self, days: u32) -> Result<TimeOfDayAnalysis, ApiError>;
}

#[async_trait]
impl MetricsSource for ApiClient {
    async fn blood_pressure(&self, query: MetricQuery) -> Result<MetricCollection<BloodPressureReading>, ApiError> {
        self.fetch_metrics(&query).await
    }

    async fn heart_rate(&self, query: MetricQuery) -> Result<MetricCollection<HeartRateReading>, ApiError> {
        self.fetch_metrics(&query).await
    }

    async fn spo2(&self, query: MetricQuery) -> Result<MetricCollection<SpO2Reading>, ApiError> {
        self.fetch_metrics(&query).await
    }

    async fn daily_steps(&self, query: MetricQuery) -> Result<MetricCollection<DailyStepsReading>, ApiError> {
        self.fetch_metrics(&query).await
    }

    async fn sleep_duration(&self, query: MetricQuery) -> Result<MetricCollection<SleepDurationReading>, ApiError> {
        self.fetch_metrics(&query).await
    }

    async fn time_of_day_analysis(&self, days: u32) -> Result<TimeOfDayAnalysis, ApiError> {
        self.blood_pressure_time_of_day(days).await
    }
}
