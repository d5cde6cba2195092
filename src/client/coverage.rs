//! Coverage service accessor.
//!
//! Two read operations: a liveness probe and a per-collection coverage
//! fetch. The accessor interprets nothing and retries nothing; resilience
//! policy belongs to the transport it is built on.

use reqwest::{Request, Response};

use super::{ClientError, RestClient};

/// Output format requested when the caller does not override it.
const DEFAULT_FORMAT: &str = "nc";

/// Read-only accessor for the coverage service.
pub struct CoverageClient {
    rest: RestClient,
}

impl CoverageClient {
    pub fn new(coverage_host: &str) -> Result<Self, ClientError> {
        Ok(Self {
            rest: RestClient::new(coverage_host)?,
        })
    }

    /// Liveness probe. `Ok(true)` means the service answered successfully;
    /// transport faults surface as errors.
    pub async fn availability(&self) -> Result<bool, ClientError> {
        let response = self.rest.get("health", &[], None).await?;
        Ok(response.status().is_success())
    }

    /// Fetch coverage for a collection, returning the raw response.
    pub async fn coverage(
        &self,
        collection_id: &str,
        params: &[(String, String)],
        token: &str,
    ) -> Result<Response, ClientError> {
        let request = self.coverage_request(collection_id, params, token)?;
        Ok(self.rest.http.execute(request).await?)
    }

    /// Build the coverage request without sending it.
    ///
    /// Caller params are merged over the default `format=nc`.
    pub fn coverage_request(
        &self,
        collection_id: &str,
        params: &[(String, String)],
        token: &str,
    ) -> Result<Request, ClientError> {
        let merged = merge_params(params);
        self.rest
            .request(&format!("collection/{}", collection_id), &merged, Some(token))
    }
}

fn merge_params(params: &[(String, String)]) -> Vec<(String, String)> {
    let mut merged = vec![("format".to_string(), DEFAULT_FORMAT.to_string())];
    for (key, value) in params {
        match merged.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value.clone(),
            None => merged.push((key.clone(), value.clone())),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    fn client() -> CoverageClient {
        CoverageClient::new("https://ous.terrasearch.dev").unwrap()
    }

    #[test]
    fn requests_collection_resource_with_default_format() {
        let request = client().coverage_request("C1000-PROV", &[], "EDL-abc").unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://ous.terrasearch.dev/collection/C1000-PROV?format=nc"
        );
    }

    #[test]
    fn caller_params_override_the_default_format() {
        let params = vec![("format".to_string(), "csv".to_string())];
        let request = client().coverage_request("C1000-PROV", &params, "EDL-abc").unwrap();
        assert_eq!(request.url().query(), Some("format=csv"));
    }

    #[test]
    fn extra_params_are_appended_after_defaults() {
        let params = vec![(
            "temporal".to_string(),
            "2020-01-01T00:00:00Z".to_string(),
        )];
        let request = client().coverage_request("C1000-PROV", &params, "EDL-abc").unwrap();
        assert_eq!(
            request.url().query(),
            Some("format=nc&temporal=2020-01-01T00%3A00%3A00Z")
        );
    }

    #[test]
    fn credential_travels_as_bearer_header() {
        let request = client().coverage_request("C1000-PROV", &[], "EDL-abc").unwrap();
        assert_eq!(
            request.headers().get(AUTHORIZATION).unwrap(),
            "Bearer EDL-abc"
        );
    }
}
