//! Login redirect URLs.
//!
//! The login service authenticates the user and bounces the browser back to
//! the URL carried in the `state` query parameter.

use url::form_urlencoded;

use crate::config::EnvironmentConfig;

/// Build the login redirect carrying `return_url` as the `state` parameter,
/// tagged with the deployment environment.
pub fn login_url(config: &EnvironmentConfig, return_url: &str) -> String {
    let state: String = form_urlencoded::byte_serialize(return_url.as_bytes()).collect();
    format!(
        "{}/login?cmr_env={}&state={}",
        config.api_host.trim_end_matches('/'),
        config.cmr_env,
        state
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CmrEnv;

    fn config() -> EnvironmentConfig {
        EnvironmentConfig {
            api_host: "https://api.terrasearch.dev".into(),
            app_host: "https://search.terrasearch.dev".into(),
            coverage_host: "https://ous.terrasearch.dev".into(),
            cmr_env: CmrEnv::Prod,
        }
    }

    #[test]
    fn encodes_return_url_into_state() {
        let url = login_url(&config(), "https://search.terrasearch.dev/projects?p=C1");
        assert_eq!(
            url,
            "https://api.terrasearch.dev/login?cmr_env=prod&state=\
             https%3A%2F%2Fsearch.terrasearch.dev%2Fprojects%3Fp%3DC1"
        );
    }

    #[test]
    fn tags_deployment_environment() {
        let mut cfg = config();
        cfg.cmr_env = CmrEnv::Uat;
        let url = login_url(&cfg, "https://search.terrasearch.dev/");
        assert!(url.contains("?cmr_env=uat&"));
    }

    #[test]
    fn tolerates_trailing_slash_on_api_host() {
        let mut cfg = config();
        cfg.api_host = "https://api.terrasearch.dev/".into();
        let url = login_url(&cfg, "x");
        assert!(url.starts_with("https://api.terrasearch.dev/login?"));
    }
}
