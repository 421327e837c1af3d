use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, error};

use health_dashboard_data::models::{
    BloodPressureReading, DailyStepsReading, HeartRateReading, MetricCollection, MetricKind, SleepDurationReading,
    SpO2Reading,
};
use health_dashboard_data::{ApiError, MetricQuery};

use crate::source::MetricsSource;

/// How the five dashboard fetches are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinPolicy {
    /// One failed fetch blanks the whole dashboard
    AllOrNothing,
    /// Every metric settles on its own
    #[default]
    PerMetric,
}

/// Latest page of every metric; `None` means not loaded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardViewModel {
    pub blood_pressure: Option<MetricCollection<BloodPressureReading>>,
    pub heart_rate: Option<MetricCollection<HeartRateReading>>,
    pub spo2: Option<MetricCollection<SpO2Reading>>,
    pub daily_steps: Option<MetricCollection<DailyStepsReading>>,
    pub sleep_duration: Option<MetricCollection<SleepDurationReading>>,
}

impl DashboardViewModel {
    /// Whether no metric has been loaded at all
    pub fn is_blank(&self) -> bool {
        self.blood_pressure.is_none()
            && self.heart_rate.is_none()
            && self.spo2.is_none()
            && self.daily_steps.is_none()
            && self.sleep_duration.is_none()
    }
}

/// A metric whose fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricFailure {
    pub metric: MetricKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub loading: bool,
    pub metrics: DashboardViewModel,
    pub failures: Vec<MetricFailure>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            loading: true,
            metrics: DashboardViewModel::default(),
            failures: Vec::new(),
        }
    }
}

/// Fans out the five latest-metric fetches and assembles the dashboard.
///
/// A dashboard loads once; activating it again returns the settled state
/// without issuing new requests.
pub struct Dashboard {
    source: Arc<dyn MetricsSource>,
    policy: JoinPolicy,
    activated: AtomicBool,
    state: Mutex<DashboardState>,
}

impl Dashboard {
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self::with_policy(source, JoinPolicy::default())
    }

    pub fn with_policy(source: Arc<dyn MetricsSource>, policy: JoinPolicy) -> Self {
        Self {
            source,
            policy,
            activated: AtomicBool::new(false),
            state: Mutex::new(DashboardState::default()),
        }
    }

    pub fn policy(&self) -> JoinPolicy {
        self.policy
    }

    /// Snapshot of the current state
    pub fn state(&self) -> DashboardState {
        self.lock_state().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().loading
    }

    /// Load every metric and settle the dashboard
    pub async fn activate(&self) -> DashboardState {
        if self.activated.swap(true, Ordering::SeqCst) {
            debug!("Dashboard already activated");
            return self.state();
        }

        let (metrics, failures) = match self.policy {
            JoinPolicy::AllOrNothing => self.load_all_or_nothing().await,
            JoinPolicy::PerMetric => self.load_per_metric().await,
        };

        let mut state = self.lock_state();
        state.metrics = metrics;
        state.failures = failures;
        state.loading = false;
        state.clone()
    }

    async fn load_all_or_nothing(&self) -> (DashboardViewModel, Vec<MetricFailure>) {
        let source = self.source.as_ref();

        let joined = tokio::try_join!(
            tagged(MetricKind::BloodPressure, source.blood_pressure(MetricQuery::latest())),
            tagged(MetricKind::HeartRate, source.heart_rate(MetricQuery::latest())),
            tagged(MetricKind::SpO2, source.spo2(MetricQuery::latest())),
            tagged(MetricKind::DailySteps, source.daily_steps(MetricQuery::latest())),
            tagged(MetricKind::SleepDuration, source.sleep_duration(MetricQuery::latest())),
        );

        match joined {
            Ok((blood_pressure, heart_rate, spo2, daily_steps, sleep_duration)) => (
                DashboardViewModel {
                    blood_pressure: Some(blood_pressure),
                    heart_rate: Some(heart_rate),
                    spo2: Some(spo2),
                    daily_steps: Some(daily_steps),
                    sleep_duration: Some(sleep_duration),
                },
                Vec::new(),
            ),
            Err((metric, e)) => {
                error!("Error fetching dashboard data ({}): {}", metric, e);
                (
                    DashboardViewModel::default(),
                    vec![MetricFailure {
                        metric,
                        message: e.to_string(),
                    }],
                )
            }
        }
    }

    async fn load_per_metric(&self) -> (DashboardViewModel, Vec<MetricFailure>) {
        let source = self.source.as_ref();

        let (blood_pressure, heart_rate, spo2, daily_steps, sleep_duration) = tokio::join!(
            source.blood_pressure(MetricQuery::latest()),
            source.heart_rate(MetricQuery::latest()),
            source.spo2(MetricQuery::latest()),
            source.daily_steps(MetricQuery::latest()),
            source.sleep_duration(MetricQuery::latest()),
        );

        let mut failures = Vec::new();
        let metrics = DashboardViewModel {
            blood_pressure: into_slot(MetricKind::BloodPressure, blood_pressure, &mut failures),
            heart_rate: into_slot(MetricKind::HeartRate, heart_rate, &mut failures),
            spo2: into_slot(MetricKind::SpO2, spo2, &mut failures),
            daily_steps: into_slot(MetricKind::DailySteps, daily_steps, &mut failures),
            sleep_duration: into_slot(MetricKind::SleepDuration, sleep_duration, &mut failures),
        };

        (metrics, failures)
    }

    fn lock_state(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn tagged<T, F>(metric: MetricKind, fetch: F) -> Result<T, (MetricKind, ApiError)>
where
    F: std::future::Future<Output = Result<T, ApiError>>,
{
    fetch.await.map_err(|e| (metric, e))
}

fn into_slot<T>(metric: MetricKind, result: Result<T, ApiError>, failures: &mut Vec<MetricFailure>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!("Error fetching {} for dashboard: {}", metric, e);
            failures.push(MetricFailure {
                metric,
                message: e.to_string(),
            });
            None
        }
    }
}
