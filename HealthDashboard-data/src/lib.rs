// Health Dashboard Data
// This crate handles data access and external service interactions

// Client configuration
pub mod config;

// Wire models returned by the metrics API
pub mod models;

// Durable and in-memory session storage
pub mod session;

// HTTP client for the metrics API
pub mod client;

// Re-export commonly used types
pub use client::{ApiClient, ApiError, Credentials, MetricQuery, Ordering, Registration};
pub use config::ClientConfig;
pub use session::{FileSessionStore, InMemorySessionStore, SessionError, SessionStore};
