use chrono::{DateTime, SecondsFormat, Utc};

/// Sort order understood by the metric list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordering {
    /// Oldest first
    Timestamp,
    /// Newest first; the server default
    TimestampDesc,
}

impl Ordering {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ordering::Timestamp => "timestamp",
            Ordering::TimestampDesc => "-timestamp",
        }
    }
}

/// Filter and ordering parameters for a metric list request.
///
/// The default query carries no parameters at all, which asks the server for
/// its default page of the most recent readings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricQuery {
    pub timestamp_after: Option<DateTime<Utc>>,
    pub timestamp_before: Option<DateTime<Utc>>,
    pub ordering: Option<Ordering>,
}

impl MetricQuery {
    /// No window, server ordering
    pub fn latest() -> Self {
        Self::default()
    }

    /// Readings between `start` and `end`, oldest first
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            timestamp_after: Some(start),
            timestamp_before: Some(end),
            ordering: Some(Ordering::Timestamp),
        }
    }

    pub fn with_ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Query-string pairs; timestamps are RFC 3339 UTC with milliseconds
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(after) = self.timestamp_after {
            pairs.push(("timestamp_after", format_timestamp(after)));
        }
        if let Some(before) = self.timestamp_before {
            pairs.push(("timestamp_before", format_timestamp(before)));
        }
        if let Some(ordering) = self.ordering {
            pairs.push(("ordering", ordering.as_str().to_string()));
        }

        pairs
    }
}

fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
