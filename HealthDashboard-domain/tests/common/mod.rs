//! Dashboard fixtures on top of the data crate's fake metrics API

#![allow(dead_code)]

#[path = "../../../HealthDashboard-data/tests/common/mod.rs"]
mod fake;

use serde_json::{json, Value};

pub use fake::{initialize, FakeApi, RecordedRequest};

/// Paginated envelope around a single reading
pub fn page(reading: Value) -> Value {
    json!({ "count": 1, "next": null, "previous": null, "results": [reading] })
}

pub trait DashboardFixtures {
    /// Serve one reading for each of the five metric resources
    fn serve_all_metrics(&self);

    /// Every request received for `path`, oldest first
    fn seen(&self, path: &str) -> Vec<RecordedRequest>;
}

impl DashboardFixtures for FakeApi {
    fn serve_all_metrics(&self) {
        self.ok(
            "/api/blood-pressure/",
            page(json!({ "timestamp": "2024-03-02T08:00:00Z", "systolic": 135, "diastolic": 82, "pulse": 71 })),
        );
        self.ok(
            "/api/heart-rate/",
            page(json!({ "timestamp": "2024-03-02T09:00:00Z", "bpm": 72 })),
        );
        self.ok(
            "/api/spo2/",
            page(json!({ "timestamp": "2024-03-02T09:00:00Z", "percentage": 97.0 })),
        );
        self.ok(
            "/api/daily-steps/",
            page(json!({ "timestamp": "2024-03-02T00:00:00Z", "count": 8432, "goal": 10000 })),
        );
        self.ok(
            "/api/sleep-duration/",
            page(json!({ "timestamp": "2024-03-02T07:00:00Z", "hours": 7.5, "quality": 8 })),
        );
    }

    fn seen(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}
