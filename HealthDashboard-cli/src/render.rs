//! Plain-text rendering of the dashboard view models

use health_dashboard_domain::views::analysis::{AnalysisPanel, Tone};
use health_dashboard_domain::views::cards::{SummaryCard, NO_DATA};
use health_dashboard_domain::views::time_of_day::TimeOfDayView;
use health_dashboard_domain::views::trend::TrendView;
use health_dashboard_domain::{ChartState, DashboardState};

const BAR_WIDTH: usize = 30;

pub fn dashboard(greeting: &str, state: &DashboardState, cards: &[SummaryCard]) -> String {
    let mut lines = vec![greeting.to_string(), "Here's your health summary".to_string()];

    if state.loading {
        lines.push("Loading...".to_string());
        return lines.join("\n");
    }

    for card in cards {
        lines.push(String::new());
        lines.push(card.title.to_string());
        match &card.body {
            Some(body) => {
                lines.push(format!("  {}", body.headline));
                lines.extend(body.details.iter().map(|d| format!("  {}", d)));
                lines.push(format!("  Recorded {}", body.recorded_at));
            }
            None => lines.push(format!("  {}", NO_DATA)),
        }
    }

    if !state.failures.is_empty() {
        lines.push(String::new());
        for failure in &state.failures {
            lines.push(format!("Could not load {}: {}", failure.metric.title(), failure.message));
        }
    }

    lines.join("\n")
}

/// Loading, empty and error states shared by every chart
fn chart_placeholder<T>(state: &ChartState<T>) -> Option<String> {
    match state {
        ChartState::Loading => Some("Loading...".to_string()),
        ChartState::Empty(message) => Some(message.clone()),
        ChartState::Error(message) => Some(format!("Error: {}", message)),
        ChartState::Ready(_) => None,
    }
}

pub fn trend(state: &ChartState<TrendView>) -> String {
    let mut lines = vec!["Blood Pressure Trend".to_string()];

    let view = match state {
        ChartState::Ready(view) => view,
        other => {
            lines.extend(chart_placeholder(other));
            return lines.join("\n");
        }
    };

    lines[0] = format!("Blood Pressure Trend ({})", view.range);
    lines.push(format!(
        "{:<8} {:<26} {:>8} {:>9}  {}",
        "", "Recorded", "Systolic", "Diastolic", "Category"
    ));
    for point in &view.points {
        lines.push(format!(
            "{:<8} {:<26} {:>8} {:>9}  {}",
            point.tick, point.timestamp, point.systolic, point.diastolic, point.category
        ));
    }

    let references: Vec<String> = view
        .reference_lines
        .iter()
        .map(|r| format!("{} {}", r.label, r.value))
        .collect();
    lines.push(format!("Reference: {}", references.join(", ")));

    lines.join("\n")
}

pub fn time_of_day(state: &ChartState<TimeOfDayView>) -> String {
    let mut lines = vec!["Blood Pressure by Time of Day".to_string()];

    let view = match state {
        ChartState::Ready(view) => view,
        other => {
            lines.extend(chart_placeholder(other));
            return lines.join("\n");
        }
    };

    lines[0] = format!("Blood Pressure by Time of Day ({})", view.lookback.label());
    for bar in &view.bars {
        lines.push(format!(
            "{:<8} Systolic  {:>9} {}",
            bar.name,
            bar.systolic_label(),
            scaled_bar(bar.systolic, view.y_domain)
        ));
        lines.push(format!(
            "{:<8} Diastolic {:>9} {}",
            "",
            bar.diastolic_label(),
            scaled_bar(bar.diastolic, view.y_domain)
        ));
    }

    if let Some(pattern) = &view.pattern {
        lines.push(String::new());
        lines.push(format!("Pattern: {} ({})", pattern.pattern_type, pattern.systolic_difference));
        if !pattern.description.is_empty() {
            lines.push(format!("  {}", pattern.description));
        }
    }
    if let Some(count) = view.reading_count {
        lines.push(format!("Based on {} readings", count));
    }

    lines.join("\n")
}

/// `value` drawn against `domain`, clamped to the chart area
fn scaled_bar(value: i64, (low, high): (i64, i64)) -> String {
    if high <= low {
        return String::new();
    }
    let clamped = value.clamp(low, high);
    let filled = ((clamped - low) as usize * BAR_WIDTH) / (high - low) as usize;
    "#".repeat(filled)
}

fn marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "[i]",
        Tone::Success => "[ok]",
        Tone::Warning => "[!]",
        Tone::Critical => "[!!]",
    }
}

pub fn panel(panel: &AnalysisPanel) -> String {
    let mut lines = vec![panel.title.clone()];
    if let Some(headline) = &panel.headline {
        lines.push(format!("  {}", headline));
    }
    lines.extend(panel.lines.iter().map(|l| format!("  {} {}", marker(l.tone), l.text)));
    lines.join("\n")
}
