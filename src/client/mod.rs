//! HTTP access to remote services.

mod coverage;

pub use coverage::CoverageClient;

use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, Method, Request, Response};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid request URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid credential header")]
    Credential,
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Thin GET client for a single service host.
///
/// Carries no resilience policy of its own: timeouts, retries, and
/// connection reuse are whatever the shared `reqwest::Client` provides, and
/// transport failures surface unchanged to the caller.
pub struct RestClient {
    base_url: Url,
    http: Client,
}

impl RestClient {
    /// Create a client for the given service host.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(base_url: &str, http: Client) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        // Relative joins need the base path to end in '/'
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }
        Ok(Self { base_url, http })
    }

    /// Issue a GET for `path` under the service host.
    pub async fn get(
        &self,
        path: &str,
        params: &[(String, String)],
        token: Option<&str>,
    ) -> Result<Response, ClientError> {
        let request = self.request(path, params, token)?;
        Ok(self.http.execute(request).await?)
    }

    /// Build the GET request without sending it.
    pub(crate) fn request(
        &self,
        path: &str,
        params: &[(String, String)],
        token: Option<&str>,
    ) -> Result<Request, ClientError> {
        let mut url = self.base_url.join(path)?;
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        let mut request = Request::new(Method::GET, url);
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ClientError::Credential)?;
            request.headers_mut().insert(AUTHORIZATION, value);
        }

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_path_under_mounted_base() {
        let client = RestClient::new("https://host.example/ous").unwrap();
        let request = client.request("health", &[], None).unwrap();
        assert_eq!(request.url().as_str(), "https://host.example/ous/health");
    }

    #[test]
    fn appends_query_parameters() {
        let client = RestClient::new("https://host.example").unwrap();
        let params = vec![("format".to_string(), "nc".to_string())];
        let request = client.request("health", &params, None).unwrap();
        assert_eq!(request.url().query(), Some("format=nc"));
    }

    #[test]
    fn attaches_bearer_header_only_when_token_given() {
        let client = RestClient::new("https://host.example").unwrap();

        let anonymous = client.request("health", &[], None).unwrap();
        assert!(anonymous.headers().get(AUTHORIZATION).is_none());

        let authed = client.request("health", &[], Some("EDL-abc")).unwrap();
        assert_eq!(
            authed.headers().get(AUTHORIZATION).unwrap(),
            "Bearer EDL-abc"
        );
    }
}
