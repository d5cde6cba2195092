//! Application Runner Module
//!
//! Provides the shared entry point functions called by the binary.

use std::fs::File;
use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::{CredentialStore, AUTH_TOKEN_KEY};
use crate::client::CoverageClient;
use crate::config::{EnvironmentConfig, XdgDirs};
use crate::db::Database;
use crate::portal::Portal;

/// Shared application configuration.
///
/// Runtime options collected from the command line before any subsystem
/// starts.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Enable debug logging
    pub debug: bool,
    /// Enable verbose (trace-level) logging
    pub verbose: bool,
    /// Explicit config file path
    pub config_path: Option<PathBuf>,
    /// Portal to mount the routes under
    pub portal: Option<String>,
    /// Collection ids seeding the current project
    pub project_ids: Vec<String>,
}

impl AppConfig {
    fn default_filter(&self) -> &'static str {
        if self.verbose {
            "trace"
        } else if self.debug {
            "debug"
        } else {
            "info,terrasearch=debug"
        }
    }

    fn portal(&self) -> Portal {
        match &self.portal {
            Some(id) => Portal::new(id.clone()),
            None => Portal::default(),
        }
    }
}

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the terminal, config, or database cannot be set up.
pub fn run_tui(config: AppConfig) -> anyhow::Result<()> {
    // The terminal belongs to ratatui while the TUI runs, so logs go to a
    // file under the XDG state directory
    let xdg = XdgDirs::new();
    xdg.ensure_dirs()?;
    let log_file = File::create(xdg.state.join("terra-tui.log"))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(log_file)),
        )
        .init();

    let env = EnvironmentConfig::load(config.config_path.as_deref())?;
    tracing::info!(cmr_env = %env.cmr_env, "starting terrasearch");

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async { crate::tui::run(env, config.portal(), config.project_ids).await })
}

/// Store a session token obtained out-of-band from the login service.
///
/// The login redirect finishes in the browser; the token it hands back is
/// pasted here so the next TUI session starts authenticated.
pub fn run_save_token(token: &str) -> anyhow::Result<()> {
    let db = Database::open()?;
    db.migrate()?;
    CredentialStore::new(&db).save(AUTH_TOKEN_KEY, token)?;
    println!("session token stored");
    Ok(())
}

/// Probe the coverage service and report reachability.
///
/// # Errors
///
/// Returns an error when the probe cannot be issued or the service does not
/// answer successfully.
pub fn run_check(config: AppConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_filter()));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let env = EnvironmentConfig::load(config.config_path.as_deref())?;
    let client = CoverageClient::new(&env.coverage_host)?;

    let runtime = tokio::runtime::Runtime::new()?;
    let reachable = runtime.block_on(async { client.availability().await })?;

    if reachable {
        println!("coverage service at {} is reachable", env.coverage_host);
        Ok(())
    } else {
        anyhow::bail!("coverage service at {} answered with an error", env.coverage_host)
    }
}
