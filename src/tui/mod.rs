//! TUI (Terminal User Interface) mode for Terrasearch
//!
//! Hosts the search client's pages behind a keyboard-driven toolbar. All
//! state transitions run synchronously inside the event loop.

mod adapter;
mod app;
mod event;
mod theme;
mod ui;

pub mod widgets;

pub use app::TerraApp;
pub use theme::Theme;

use anyhow::Result;

use crate::config::EnvironmentConfig;
use crate::portal::Portal;

/// Run the TUI application
pub async fn run(
    config: EnvironmentConfig,
    portal: Portal,
    project_ids: Vec<String>,
) -> Result<()> {
    let mut app = TerraApp::new(config, portal, project_ids)?;
    app.run().await
}
