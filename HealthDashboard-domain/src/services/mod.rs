pub mod dashboard;
pub mod insights;
