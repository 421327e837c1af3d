use std::sync::Arc;

use tracing::error;

use health_dashboard_data::models::{PressureAverages, TimeOfDayAnalysis};

use super::chart::{ChartPanel, ChartState};
use crate::source::MetricsSource;

/// Shown when morning or evening averages are missing
pub const NOT_ENOUGH_DATA: &str = "Not enough data available for analysis";

pub const TIME_OF_DAY_Y_DOMAIN: (i64, i64) = (60, 160);

/// Selectable lookback of the time-of-day analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lookback {
    Week,
    #[default]
    Month,
    Quarter,
}

impl Lookback {
    pub const ALL: [Lookback; 3] = [Lookback::Week, Lookback::Month, Lookback::Quarter];

    pub fn days(&self) -> u32 {
        match self {
            Lookback::Week => 7,
            Lookback::Month => 30,
            Lookback::Quarter => 90,
        }
    }

    pub fn from_days(days: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.days() == days)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Lookback::Week => "Last Week",
            Lookback::Month => "Last Month",
            Lookback::Quarter => "Last 3 Months",
        }
    }
}

/// One bar group of the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodBar {
    pub name: &'static str,
    pub systolic: i64,
    pub diastolic: i64,
}

impl PeriodBar {
    fn from_averages(name: &'static str, averages: &PressureAverages) -> Self {
        Self {
            name,
            systolic: round_average(averages.avg_systolic),
            diastolic: round_average(averages.avg_diastolic),
        }
    }

    pub fn systolic_label(&self) -> String {
        format!("{} mmHg", self.systolic)
    }

    pub fn diastolic_label(&self) -> String {
        format!("{} mmHg", self.diastolic)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternNote {
    pub pattern_type: String,
    pub description: String,
    /// Signed, e.g. "+8 mmHg"
    pub systolic_difference: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeOfDayView {
    pub lookback: Lookback,
    /// Morning then evening
    pub bars: Vec<PeriodBar>,
    pub y_domain: (i64, i64),
    pub pattern: Option<PatternNote>,
    pub reading_count: Option<u32>,
}

fn round_average(value: Option<f64>) -> i64 {
    value.map(|v| v.round() as i64).unwrap_or(0)
}

pub fn build_time_of_day_view(lookback: Lookback, analysis: &TimeOfDayAnalysis) -> ChartState<TimeOfDayView> {
    let (Some(morning), Some(evening)) = (&analysis.morning_averages, &analysis.evening_averages) else {
        return ChartState::Empty(NOT_ENOUGH_DATA.to_string());
    };

    let pattern = analysis.pattern.as_ref().map(|p| PatternNote {
        pattern_type: p.pattern_type.clone(),
        description: p.description.clone(),
        systolic_difference: format!("{:+} mmHg", p.systolic_difference.round() as i64),
    });

    ChartState::Ready(TimeOfDayView {
        lookback,
        bars: vec![
            PeriodBar::from_averages("Morning", morning),
            PeriodBar::from_averages("Evening", evening),
        ],
        y_domain: TIME_OF_DAY_Y_DOMAIN,
        pattern,
        reading_count: analysis.reading_count,
    })
}

/// Time-of-day analysis chart controller
pub struct TimeOfDayChart {
    source: Arc<dyn MetricsSource>,
    panel: ChartPanel<TimeOfDayView>,
}

impl TimeOfDayChart {
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self {
            source,
            panel: ChartPanel::new(),
        }
    }

    /// Fetch the analysis for `lookback` and settle the chart
    pub async fn load(&self, lookback: Lookback) -> ChartState<TimeOfDayView> {
        let ticket = self.panel.begin();

        let outcome = match self.source.time_of_day_analysis(lookback.days()).await {
            Ok(analysis) => build_time_of_day_view(lookback, &analysis),
            Err(e) => {
                error!("Error fetching time of day analysis: {}", e);
                ChartState::Error(e.to_string())
            }
        };

        self.panel.settle(ticket, outcome);
        self.panel.state()
    }

    pub fn state(&self) -> ChartState<TimeOfDayView> {
        self.panel.state()
    }
}
