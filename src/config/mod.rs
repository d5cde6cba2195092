//! Configuration management.

mod settings;
mod xdg;

pub use settings::{CmrEnv, EnvironmentConfig, SettingsError};
pub use xdg::XdgDirs;
