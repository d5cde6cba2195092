//! Environment configuration.
//!
//! Host URLs and the deployment environment tag, resolved from an optional
//! TOML file with `TERRA_*` environment variable overrides on top.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::XdgDirs;

/// Deployment environment tag, forwarded to the login service as the
/// `cmr_env` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CmrEnv {
    Sit,
    Uat,
    Prod,
}

impl CmrEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            CmrEnv::Sit => "sit",
            CmrEnv::Uat => "uat",
            CmrEnv::Prod => "prod",
        }
    }
}

impl fmt::Display for CmrEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CmrEnv {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sit" => Ok(CmrEnv::Sit),
            "uat" => Ok(CmrEnv::Uat),
            "prod" => Ok(CmrEnv::Prod),
            other => Err(SettingsError::UnknownEnvironment(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown deployment environment: {0}")]
    UnknownEnvironment(String),
}

/// Environment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Base URL of the API host that serves login redirects.
    pub api_host: String,
    /// Origin of this application, used to build return URLs.
    pub app_host: String,
    /// Base URL of the coverage service.
    pub coverage_host: String,
    /// Deployment environment tag.
    pub cmr_env: CmrEnv,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_host: "https://api.terrasearch.dev".into(),
            app_host: "https://search.terrasearch.dev".into(),
            coverage_host: "https://ous.terrasearch.dev".into(),
            cmr_env: CmrEnv::Prod,
        }
    }
}

impl EnvironmentConfig {
    /// Load configuration.
    ///
    /// Reads `path` when given, otherwise `config.toml` under the XDG config
    /// directory. A missing file yields the defaults. `TERRA_*` environment
    /// variables override whatever the file provided.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => XdgDirs::new().config.join("config.toml"),
        };

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
                path: path.clone(),
                source,
            })?;
            toml::from_str(&raw).map_err(|source| SettingsError::Parse { path, source })?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply `TERRA_*` overrides from the given lookup.
    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), SettingsError> {
        if let Some(host) = lookup("TERRA_API_HOST") {
            self.api_host = host;
        }
        if let Some(host) = lookup("TERRA_APP_HOST") {
            self.app_host = host;
        }
        if let Some(host) = lookup("TERRA_COVERAGE_HOST") {
            self.coverage_host = host;
        }
        if let Some(env) = lookup("TERRA_CMR_ENV") {
            self.cmr_env = env.parse()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_file() {
        let config: EnvironmentConfig = toml::from_str(
            r#"
            api_host = "https://api.uat.terrasearch.dev"
            cmr_env = "uat"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_host, "https://api.uat.terrasearch.dev");
        assert_eq!(config.cmr_env, CmrEnv::Uat);
        // Unset keys fall back to defaults
        assert_eq!(config.app_host, "https://search.terrasearch.dev");
    }

    #[test]
    fn env_overrides_beat_file_values() {
        let mut config = EnvironmentConfig::default();
        config
            .apply_overrides(|key| match key {
                "TERRA_API_HOST" => Some("http://localhost:3000".into()),
                "TERRA_CMR_ENV" => Some("sit".into()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.api_host, "http://localhost:3000");
        assert_eq!(config.cmr_env, CmrEnv::Sit);
    }

    #[test]
    fn rejects_unknown_environment_tag() {
        let mut config = EnvironmentConfig::default();
        let err = config
            .apply_overrides(|key| (key == "TERRA_CMR_ENV").then(|| "staging".into()))
            .unwrap_err();
        assert!(matches!(err, SettingsError::UnknownEnvironment(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = EnvironmentConfig::load(Some(&tmp.path().join("absent.toml"))).unwrap();
        assert_eq!(config.cmr_env, CmrEnv::Prod);
    }
}
