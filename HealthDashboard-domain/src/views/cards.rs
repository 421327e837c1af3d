use std::fmt;

use chrono::TimeZone;

use health_dashboard_data::models::{
    BloodPressureReading, DailyStepsReading, HeartRateReading, MetricCollection, MetricKind, MetricReading,
    SleepDurationReading, SpO2Reading, UserProfile,
};

use super::{group_thousands, LOCAL_TIMESTAMP_FORMAT};
use crate::services::dashboard::DashboardViewModel;
use crate::services::insights::{
    categorize_blood_pressure, goal_progress, heart_rate_zone, sleep_quality_label, spo2_severity,
};

/// Placeholder for a card without a reading
pub const NO_DATA: &str = "No data available";

/// Summary of the most recent reading of one metric
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub metric: MetricKind,
    pub title: &'static str,
    /// `None` renders the [`NO_DATA`] placeholder
    pub body: Option<CardBody>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardBody {
    pub headline: String,
    pub details: Vec<String>,
    pub recorded_at: String,
}

/// Per-metric card text
trait CardContent: MetricReading {
    fn headline(&self) -> String;
    fn details(&self) -> Vec<String>;
}

impl CardContent for BloodPressureReading {
    fn headline(&self) -> String {
        format!("{}/{} mmHg", self.systolic, self.diastolic)
    }

    fn details(&self) -> Vec<String> {
        let category = self
            .bp_category
            .unwrap_or_else(|| categorize_blood_pressure(self.systolic, self.diastolic));

        let mut details = vec![format!("Category: {}", category)];
        if let Some(pulse) = self.pulse {
            details.push(format!("Pulse: {} BPM", pulse));
        }
        details
    }
}

impl CardContent for HeartRateReading {
    fn headline(&self) -> String {
        format!("{} BPM", self.bpm)
    }

    fn details(&self) -> Vec<String> {
        let zone = self
            .heart_rate_zone
            .clone()
            .unwrap_or_else(|| heart_rate_zone(self.bpm).to_string());

        let mut details = vec![format!("Zone: {}", zone)];
        if let Some(activity) = &self.activity_level {
            details.push(format!("Activity: {}", activity));
        }
        details
    }
}

impl CardContent for SpO2Reading {
    fn headline(&self) -> String {
        format!("{:.0}%", self.percentage)
    }

    fn details(&self) -> Vec<String> {
        let severity = self
            .severity
            .clone()
            .unwrap_or_else(|| spo2_severity(self.percentage).to_string());
        vec![format!("Status: {}", severity)]
    }
}

impl CardContent for DailyStepsReading {
    fn headline(&self) -> String {
        format!("{} steps", group_thousands(self.count))
    }

    fn details(&self) -> Vec<String> {
        let mut details = Vec::new();

        if let Some(goal) = self.goal {
            let progress = self.goal_percentage.or_else(|| goal_progress(self.count, Some(goal)));
            match progress {
                Some(pct) => details.push(format!("Goal: {} ({:.0}%)", group_thousands(goal), pct)),
                None => details.push(format!("Goal: {}", group_thousands(goal))),
            }
        }
        if let Some(distance) = self.distance {
            details.push(format!("Distance: {:.1} km", distance));
        }
        details
    }
}

impl CardContent for SleepDurationReading {
    fn headline(&self) -> String {
        format!("{:.1} hours", self.hours)
    }

    fn details(&self) -> Vec<String> {
        match self.quality {
            Some(quality) => vec![format!("Quality: {}/10 ({})", quality, sleep_quality_label(quality))],
            None => Vec::new(),
        }
    }
}

fn card<R, Tz>(collection: Option<&MetricCollection<R>>, tz: &Tz) -> SummaryCard
where
    R: CardContent,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let body = collection.and_then(|c| c.latest()).map(|reading| CardBody {
        headline: reading.headline(),
        details: reading.details(),
        recorded_at: reading
            .timestamp()
            .with_timezone(tz)
            .format(LOCAL_TIMESTAMP_FORMAT)
            .to_string(),
    });

    SummaryCard {
        metric: R::KIND,
        title: R::KIND.title(),
        body,
    }
}

/// One card per metric, in dashboard order
pub fn build_summary_cards<Tz>(metrics: &DashboardViewModel, tz: &Tz) -> Vec<SummaryCard>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    vec![
        card(metrics.blood_pressure.as_ref(), tz),
        card(metrics.heart_rate.as_ref(), tz),
        card(metrics.spo2.as_ref(), tz),
        card(metrics.daily_steps.as_ref(), tz),
        card(metrics.sleep_duration.as_ref(), tz),
    ]
}

/// Dashboard heading for the signed-in user
pub fn greeting(user: Option<&UserProfile>) -> String {
    let name = user
        .map(|u| u.first_name.trim())
        .filter(|n| !n.is_empty())
        .unwrap_or("User");
    format!("Welcome, {}", name)
}
