// Health Dashboard Domain
// This crate contains the dashboard logic built on top of the metrics API client

// Services that aggregate and interpret readings
pub mod services;

// Login, registration and logout flows
pub mod auth;

// Read-side seam over the metrics API
pub mod source;

// Chart, card and analysis view models
pub mod views;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceError, LoginRequest, RegistrationRequest};
pub use services::dashboard::{Dashboard, DashboardState, DashboardViewModel, JoinPolicy, MetricFailure};
pub use source::MetricsSource;
pub use views::chart::{ChartPanel, ChartState, FetchTicket};
