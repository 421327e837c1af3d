use std::path::PathBuf;

use clap::{Parser, Subcommand};

use health_dashboard_data::client::{
    DEFAULT_BASELINE_DAYS, DEFAULT_ELEVATION_DAYS, DEFAULT_HRV_WINDOW_HOURS, DEFAULT_WEEKLY_DAYS,
};
use health_dashboard_data::ClientConfig;
use health_dashboard_domain::views::time_of_day::Lookback;
use health_dashboard_domain::views::trend::TimeRange;

/// Personal health metrics dashboard
#[derive(Debug, Parser)]
#[command(name = "health-dashboard", version, about)]
pub struct Cli {
    /// Base URL of the metrics API, e.g. http://localhost:8000/api/
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Where the login session is stored
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::from_env();
        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.as_str());
        }
        if let Some(path) = &self.session_file {
            config = config.with_session_path(path);
        }
        config
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "HEALTH_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long, default_value = "")]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long, env = "HEALTH_PASSWORD", hide_env_values = true)]
        password: String,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        gender: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Latest reading of every metric
    Dashboard {
        /// Show nothing if any metric fails to load
        #[arg(long)]
        strict: bool,
    },

    /// Blood pressure readings over a time range
    Trend {
        /// day, week or month
        #[arg(long, default_value = "week")]
        range: TimeRange,
    },

    /// Morning versus evening blood pressure
    TimeOfDay {
        /// Lookback in days: 7, 30 or 90
        #[arg(long, default_value = "30", value_parser = parse_lookback)]
        days: Lookback,
    },

    /// Server-computed analyses
    #[command(subcommand)]
    Analysis(AnalysisCommand),
}

#[derive(Debug, Subcommand)]
pub enum AnalysisCommand {
    /// Whether blood pressure has been consistently elevated
    Elevation {
        #[arg(long, default_value_t = DEFAULT_ELEVATION_DAYS)]
        days: u32,
    },

    /// Latest blood pressure against age-based recommendations
    AgeComparison {
        /// Defaults to the age on the stored profile
        #[arg(long)]
        age: Option<u32>,
    },

    /// Seven-day step average and goal progress
    StepsWeekly,

    /// Heart rate variability
    Hrv {
        #[arg(long, default_value_t = DEFAULT_HRV_WINDOW_HOURS)]
        hours: u32,
    },

    /// Current heart rate against a baseline
    Baseline {
        #[arg(long, default_value_t = DEFAULT_BASELINE_DAYS)]
        days: u32,

        /// Restrict the baseline to one activity level, e.g. resting
        #[arg(long)]
        activity: Option<String>,
    },

    /// Average resting heart rate
    RestingHeartRate,

    /// Whether the latest sleep was sufficient for an age
    SleepSufficiency {
        /// Defaults to the age on the stored profile
        #[arg(long)]
        age: Option<u32>,
    },

    /// Average nightly sleep
    SleepWeekly {
        #[arg(long, default_value_t = DEFAULT_WEEKLY_DAYS)]
        days: u32,
    },

    /// Lowest blood oxygen reading
    Spo2Lowest {
        #[arg(long, default_value_t = DEFAULT_WEEKLY_DAYS)]
        days: u32,
    },

    /// Blood oxygen alert status
    Spo2Alert,
}

fn parse_lookback(raw: &str) -> Result<Lookback, String> {
    let days: u32 = raw.parse().map_err(|_| format!("'{}' is not a number of days", raw))?;
    Lookback::from_days(days).ok_or_else(|| format!("lookback must be 7, 30 or 90 days, got {}", days))
}
