use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Local;
use tracing::{debug, info};

use health_dashboard_data::models::Session;
use health_dashboard_data::ApiClient;
use health_dashboard_domain::views::analysis::{
    age_comparison_panel, baseline_panel, elevation_panel, hrv_panel, resting_panel, sleep_sufficiency_panel,
    sleep_weekly_panel, spo2_alert_panel, spo2_lowest_panel, steps_weekly_panel,
};
use health_dashboard_domain::views::cards::{build_summary_cards, greeting};
use health_dashboard_domain::views::time_of_day::TimeOfDayChart;
use health_dashboard_domain::views::trend::BloodPressureChart;
use health_dashboard_domain::{AuthService, Dashboard, JoinPolicy, LoginRequest, RegistrationRequest};

use crate::cli::{AnalysisCommand, Command};
use crate::render;

/// Run one command and return the text to print
pub async fn run(command: Command, client: ApiClient) -> Result<String> {
    let auth = AuthService::new(client.clone());

    match command {
        Command::Login { email, password } => {
            let session = auth
                .login(&LoginRequest {
                    email: email.clone(),
                    password,
                })
                .await
                .context("Login failed")?;

            let name = session.user.as_ref().map(|u| u.full_name()).unwrap_or(email);
            Ok(format!("Logged in as {}", name.trim()))
        }

        Command::Register {
            first_name,
            last_name,
            email,
            password,
            age,
            gender,
        } => {
            let request = RegistrationRequest {
                first_name,
                last_name,
                age,
                gender,
                email,
                password,
            };
            let user = auth.register(&request).await.context("Registration failed")?;
            Ok(format!(
                "Registered {}. Run `health-dashboard login` to sign in.",
                if user.email.is_empty() { &request.email } else { &user.email }
            ))
        }

        Command::Logout => {
            auth.logout().context("Could not clear the stored session")?;
            Ok("Logged out".to_string())
        }

        Command::Whoami => Ok(match auth.current_session() {
            Some(session) if session.has_access_token() => {
                let user = session.user.as_ref();
                match user.map(|u| u.email.as_str()).filter(|e| !e.is_empty()) {
                    Some(email) => format!("{} ({})", greeting(user), email),
                    None => greeting(user),
                }
            }
            _ => "Not logged in".to_string(),
        }),

        Command::Dashboard { strict } => {
            let session = require_session(&auth)?;
            let policy = if strict {
                JoinPolicy::AllOrNothing
            } else {
                JoinPolicy::PerMetric
            };

            let dashboard = Dashboard::with_policy(Arc::new(client), policy);
            let state = dashboard.activate().await;
            let cards = build_summary_cards(&state.metrics, &Local);

            Ok(render::dashboard(&greeting(session.user.as_ref()), &state, &cards))
        }

        Command::Trend { range } => {
            require_session(&auth)?;
            let chart = BloodPressureChart::new(Arc::new(client));
            Ok(render::trend(&chart.load(range).await))
        }

        Command::TimeOfDay { days } => {
            require_session(&auth)?;
            let chart = TimeOfDayChart::new(Arc::new(client));
            Ok(render::time_of_day(&chart.load(days).await))
        }

        Command::Analysis(analysis) => {
            let session = require_session(&auth)?;
            run_analysis(analysis, &client, &session).await
        }
    }
}

async fn run_analysis(command: AnalysisCommand, client: &ApiClient, session: &Session) -> Result<String> {
    debug!("Running analysis {:?}", command);

    let panel = match command {
        AnalysisCommand::Elevation { days } => {
            let check = client
                .blood_pressure_elevation_check(days)
                .await
                .context("Failed to fetch elevation check")?;
            elevation_panel(&check, days)
        }
        AnalysisCommand::AgeComparison { age } => {
            let age = resolve_age(age, session)?;
            let comparison = client
                .blood_pressure_age_comparison(age)
                .await
                .context("Failed to fetch age comparison")?;
            age_comparison_panel(&comparison)
        }
        AnalysisCommand::StepsWeekly => {
            let average = client
                .daily_steps_weekly_average()
                .await
                .context("Failed to fetch weekly step average")?;
            steps_weekly_panel(&average)
        }
        AnalysisCommand::Hrv { hours } => {
            let hrv = client
                .heart_rate_hrv(hours)
                .await
                .context("Failed to fetch heart rate variability")?;
            hrv_panel(&hrv, hours)
        }
        AnalysisCommand::Baseline { days, activity } => {
            let comparison = client
                .heart_rate_baseline_comparison(days, activity.as_deref())
                .await
                .context("Failed to fetch baseline comparison")?;
            baseline_panel(&comparison, days)
        }
        AnalysisCommand::RestingHeartRate => {
            let resting = client
                .heart_rate_resting_average()
                .await
                .context("Failed to fetch resting heart rate")?;
            resting_panel(&resting)
        }
        AnalysisCommand::SleepSufficiency { age } => {
            let age = resolve_age(age, session)?;
            let check = client
                .sleep_sufficiency_check(age)
                .await
                .context("Failed to fetch sleep sufficiency")?;
            sleep_sufficiency_panel(&check, age)
        }
        AnalysisCommand::SleepWeekly { days } => {
            let average = client
                .sleep_weekly_average(days)
                .await
                .context("Failed to fetch sleep average")?;
            sleep_weekly_panel(&average, days)
        }
        AnalysisCommand::Spo2Lowest { days } => {
            let lowest = client
                .spo2_lowest_reading(days)
                .await
                .context("Failed to fetch lowest SpO2 reading")?;
            spo2_lowest_panel(&lowest, days)
        }
        AnalysisCommand::Spo2Alert => {
            let alert = client.spo2_alert_check().await.context("Failed to fetch SpO2 alert")?;
            spo2_alert_panel(&alert)
        }
    };

    Ok(render::panel(&panel))
}

fn require_session(auth: &AuthService) -> Result<Session> {
    match auth.current_session() {
        Some(session) if session.has_access_token() => Ok(session),
        _ => {
            info!("No stored session");
            bail!("Not logged in. Run `health-dashboard login` first.")
        }
    }
}

/// Explicit age, else the age on the stored profile
fn resolve_age(explicit: Option<u32>, session: &Session) -> Result<u32> {
    match explicit.or_else(|| session.user.as_ref().and_then(|u| u.age)) {
        Some(age) => Ok(age),
        None => bail!("No age on your profile. Pass --age."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_dashboard_data::models::UserProfile;
    use health_dashboard_data::{ClientConfig, InMemorySessionStore, SessionStore};

    fn client_with(store: Arc<InMemorySessionStore>) -> ApiClient {
        ApiClient::new(&ClientConfig::default(), store).unwrap()
    }

    #[test]
    fn test_resolve_age_prefers_flag() {
        let session = Session::new("tok").with_user(UserProfile {
            age: Some(41),
            ..Default::default()
        });
        assert_eq!(resolve_age(Some(30), &session).unwrap(), 30);
        assert_eq!(resolve_age(None, &session).unwrap(), 41);
        assert!(resolve_age(None, &Session::new("tok")).is_err());
    }

    #[tokio::test]
    async fn test_whoami_without_session() {
        let client = client_with(Arc::new(InMemorySessionStore::new()));
        assert_eq!(run(Command::Whoami, client).await.unwrap(), "Not logged in");
    }

    #[tokio::test]
    async fn test_whoami_with_profile() {
        let store = Arc::new(InMemorySessionStore::new());
        store
            .save_session(&Session::new("tok").with_user(UserProfile {
                first_name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                ..Default::default()
            }))
            .unwrap();

        let output = run(Command::Whoami, client_with(store)).await.unwrap();
        assert_eq!(output, "Welcome, Ada (ada@example.com)");
    }

    #[tokio::test]
    async fn test_dashboard_requires_login() {
        let client = client_with(Arc::new(InMemorySessionStore::new()));
        let err = run(Command::Dashboard { strict: false }, client).await.unwrap_err();
        assert!(err.to_string().contains("Not logged in"));
    }

    #[tokio::test]
    async fn test_logout_when_logged_out() {
        let client = client_with(Arc::new(InMemorySessionStore::new()));
        assert_eq!(run(Command::Logout, client).await.unwrap(), "Logged out");
    }
}
