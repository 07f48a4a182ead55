//! Jendo: Vascular health risk assessment
//!
//! Main entry point for the command-line application.

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jendo::adapters::sanitize::SanitizingMakeWriter;
use jendo::adapters::SqliteProfileStore;
use jendo::application::{DashboardSummary, ProfileService};
use jendo::config::{AppConfig, LogMode};
use jendo::domain::{search_catalog, ContentCategory, Registration, UserIdentity};
use jendo::{JendoError, ProfileInput, ProfileRecord};

#[derive(Parser)]
#[command(name = "jendo")]
#[command(about = "Vascular health risk assessment")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a profile read from stdin and store it (default)
    Submit,

    /// Show the dashboard for a stored profile
    Show {
        /// Account email
        email: String,
    },

    /// Delete a stored profile
    Reset {
        /// Account email
        email: String,
    },

    /// Validate a registration form read from stdin
    Register,

    /// Search the educational catalog
    Learn {
        /// Words to match against titles and descriptions
        query: Vec<String>,

        /// Restrict results to one category (basics, exercise, nutrition, management)
        #[arg(long)]
        category: Option<ContentCategory>,
    },
}

/// Assessment form submission read from stdin.
#[derive(Debug, Deserialize)]
struct Submission {
    user: UserIdentity,
    profile: ProfileInput,
}

#[derive(Debug, Serialize)]
struct SubmissionOutput {
    profile: ProfileRecord,
    dashboard: DashboardSummary,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    // Stdout carries command output, so logs go to stderr or a file.
    let (writer, _guard) = match config.log_mode {
        LogMode::File => {
            if let Some(parent) = config.log_file.parent() {
                // Best-effort: a missing directory surfaces when the file is opened.
                let _ = std::fs::create_dir_all(parent);
            }
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&config.log_file)
                .with_context(|| format!("opening log file {}", config.log_file.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(config.log_mode.ansi())
                .with_writer(SanitizingMakeWriter::new(writer, config.sanitize_max_bytes)),
        )
        .init();

    let command = cli.command.unwrap_or(Commands::Submit);
    let name = command.name();

    // Returning (rather than exiting) lets `_guard` flush buffered log lines.
    match run(command, &config) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("{name} failed: {e}");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Show { .. } => "show",
            Self::Reset { .. } => "reset",
            Self::Register => "register",
            Self::Learn { .. } => "learn",
        }
    }
}

fn run(command: Commands, config: &AppConfig) -> Result<(), JendoError> {
    match command {
        Commands::Submit => submit(&open_service(config)?),
        Commands::Show { email } => show(&open_service(config)?, &email),
        Commands::Reset { email } => open_service(config)?.reset(&email),
        Commands::Register => register(),
        Commands::Learn { query, category } => learn(&query.join(" "), category),
    }
}

fn open_service(config: &AppConfig) -> Result<ProfileService<SqliteProfileStore>, JendoError> {
    tracing::debug!(
        db = %config.db_path.display(),
        policy = ?config.scoring_policy,
        "Opening profile store"
    );
    let store = Arc::new(SqliteProfileStore::new(&config.db_path)?);
    Ok(ProfileService::new(store, config.scoring_policy))
}

fn read_stdin() -> Result<String, JendoError> {
    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;
    Ok(raw)
}

fn submit(service: &ProfileService<SqliteProfileStore>) -> Result<(), JendoError> {
    let submission: Submission = serde_json::from_str(&read_stdin()?)?;

    let profile = service.submit(&submission.user, &submission.profile, Utc::now())?;
    let output = SubmissionOutput {
        dashboard: DashboardSummary::from_record(&profile),
        profile,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn show(service: &ProfileService<SqliteProfileStore>, email: &str) -> Result<(), JendoError> {
    match service.dashboard(email)? {
        Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
        None => println!("No assessment on file. Complete your profile to get started."),
    }
    Ok(())
}

fn register() -> Result<(), JendoError> {
    let registration: Registration = serde_json::from_str(&read_stdin()?)?;
    registration.validate().map_err(JendoError::Validation)?;

    tracing::info!("Registration form accepted");
    println!("Account details are valid.");
    Ok(())
}

fn learn(query: &str, category: Option<ContentCategory>) -> Result<(), JendoError> {
    println!("{}", serde_json::to_string_pretty(&search_catalog(query, category))?);
    Ok(())
}
