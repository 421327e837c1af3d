use super::{ApiClient, ApiError, MetricQuery};
use crate::models::{
    BloodPressureReading, DailyStepsReading, HeartRateReading, MetricCollection, MetricReading,
    SleepDurationReading, SpO2Reading,
};

impl ApiClient {
    /// Fetch one page of readings from the resource `R` belongs to
    pub async fn fetch_metrics<R: MetricReading>(
        &self,
        query: &MetricQuery,
    ) -> Result<MetricCollection<R>, ApiError> {
        let path = format!("{}/", R::KIND.path());
        self.get_json(&path, &query.to_pairs()).await
    }

    pub async fn blood_pressure(
        &self,
        query: &MetricQuery,
    ) -> Result<MetricCollection<BloodPressureReading>, ApiError> {
        self.fetch_metrics(query).await
    }

    pub async fn heart_rate(&self, query: &MetricQuery) -> Result<MetricCollection<HeartRateReading>, ApiError> {
        self.fetch_metrics(query).await
    }

    pub async fn spo2(&self, query: &MetricQuery) -> Result<MetricCollection<SpO2Reading>, ApiError> {
        self.fetch_metrics(query).await
    }

    pub async fn daily_steps(&self, query: &MetricQuery) -> Result<MetricCollection<DailyStepsReading>, ApiError> {
        self.fetch_metrics(query).await
    }

    pub async fn sleep_duration(
        &self,
        query: &MetricQuery,
    ) -> Result<MetricCollection<SleepDurationReading>, ApiError> {
        self.fetch_metrics(query).await
    }
}
