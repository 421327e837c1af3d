use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Duration, Local, Months, TimeZone, Utc};
use tracing::error;

use health_dashboard_data::models::{BloodPressureCategory, BloodPressureReading, MetricCollection};
use health_dashboard_data::MetricQuery;

use super::chart::{ChartPanel, ChartState};
use super::LOCAL_TIMESTAMP_FORMAT;
use crate::services::insights::categorize_blood_pressure;
use crate::source::MetricsSource;

/// Shown when a window contains no readings
pub const NO_TREND_DATA: &str = "No blood pressure data available for this time range";

/// Upper bound of normal systolic pressure, in mmHg
pub const SYSTOLIC_REFERENCE: i32 = 120;

/// Upper bound of normal diastolic pressure, in mmHg
pub const DIASTOLIC_REFERENCE: i32 = 80;

pub const TREND_Y_DOMAIN: (i32, i32) = (50, 180);

/// Selectable window of the blood pressure trend chart
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    /// Since local midnight
    Day,
    #[default]
    Week,
    Month,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Day, TimeRange::Week, TimeRange::Month];

    /// Start of the window ending at `now`, evaluated in `now`'s time zone
    pub fn window_start<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DateTime<Tz> {
        match self {
            TimeRange::Day => {
                let midnight = now.date_naive().and_time(chrono::NaiveTime::MIN);
                // A zone can skip midnight on DST days
                now.timezone()
                    .from_local_datetime(&midnight)
                    .earliest()
                    .unwrap_or_else(|| now.clone() - Duration::days(1))
            }
            TimeRange::Week => now.clone() - Duration::days(7),
            TimeRange::Month => now
                .clone()
                .checked_sub_months(Months::new(1))
                .unwrap_or_else(|| now.clone() - Duration::days(30)),
        }
    }

    /// The trend request for the window ending at `now`
    pub fn query<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> MetricQuery {
        let start = self.window_start(now).with_timezone(&Utc);
        MetricQuery::between(start, now.with_timezone(&Utc))
    }

    /// Axis tick format for this range
    fn tick_format(&self) -> &'static str {
        match self {
            TimeRange::Day => "%H:%M",
            TimeRange::Week | TimeRange::Month => "%b %-d",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown time range '{}', expected day, week or month", s))
    }
}

/// One plotted reading
#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    /// Full local timestamp, e.g. "3/1/2024, 8:30:00 AM"
    pub timestamp: String,
    /// Short axis label
    pub tick: String,
    pub systolic: i32,
    pub diastolic: i32,
    pub category: BloodPressureCategory,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub value: i32,
    pub label: &'static str,
}

/// Chart-ready blood pressure series
#[derive(Debug, Clone, PartialEq)]
pub struct TrendView {
    pub range: TimeRange,
    pub points: Vec<TrendPoint>,
    pub reference_lines: Vec<ReferenceLine>,
    pub y_domain: (i32, i32),
}

/// Map a page of readings to the trend chart, one point per reading in
/// server order
pub fn build_trend_view<Tz>(
    range: TimeRange,
    readings: &MetricCollection<BloodPressureReading>,
    tz: &Tz,
) -> ChartState<TrendView>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if readings.is_empty() {
        return ChartState::Empty(NO_TREND_DATA.to_string());
    }

    let points = readings
        .results
        .iter()
        .map(|reading| {
            let local = reading.timestamp.with_timezone(tz);
            TrendPoint {
                timestamp: local.format(LOCAL_TIMESTAMP_FORMAT).to_string(),
                tick: local.format(range.tick_format()).to_string(),
                systolic: reading.systolic,
                diastolic: reading.diastolic,
                category: reading
                    .bp_category
                    .unwrap_or_else(|| categorize_blood_pressure(reading.systolic, reading.diastolic)),
            }
        })
        .collect();

    ChartState::Ready(TrendView {
        range,
        points,
        reference_lines: vec![
            ReferenceLine {
                value: SYSTOLIC_REFERENCE,
                label: "Systolic upper normal",
            },
            ReferenceLine {
                value: DIASTOLIC_REFERENCE,
                label: "Diastolic upper normal",
            },
        ],
        y_domain: TREND_Y_DOMAIN,
    })
}

/// Blood pressure trend chart controller
pub struct BloodPressureChart<Tz: TimeZone = Local> {
    source: Arc<dyn MetricsSource>,
    tz: Tz,
    panel: ChartPanel<TrendView>,
}

impl BloodPressureChart<Local> {
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self::with_timezone(source, Local)
    }
}

impl<Tz> BloodPressureChart<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: fmt::Display + Send + Sync,
{
    pub fn with_timezone(source: Arc<dyn MetricsSource>, tz: Tz) -> Self {
        Self {
            source,
            tz,
            panel: ChartPanel::new(),
        }
    }

    /// Fetch the window ending now and settle the chart
    pub async fn load(&self, range: TimeRange) -> ChartState<TrendView> {
        self.load_at(range, Utc::now()).await
    }

    /// Fetch the window ending at `now`; a result superseded by a newer
    /// load is dropped
    pub async fn load_at(&self, range: TimeRange, now: DateTime<Utc>) -> ChartState<TrendView> {
        let ticket = self.panel.begin();
        let query = range.query(&now.with_timezone(&self.tz));

        let outcome = match self.source.blood_pressure(query).await {
            Ok(readings) => build_trend_view(range, &readings, &self.tz),
            Err(e) => {
                error!("Error fetching blood pressure data: {}", e);
                ChartState::Error(e.to_string())
            }
        };

        self.panel.settle(ticket, outcome);
        self.panel.state()
    }

    pub fn state(&self) -> ChartState<TrendView> {
        self.panel.state()
    }
}
