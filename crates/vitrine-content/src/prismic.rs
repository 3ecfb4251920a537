//! Prismic REST API v2 client.
//!
//! Provides a blocking HTTP client over `ureq`. Callers running inside an
//! async runtime should move calls onto a blocking thread.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use ureq::Agent;

use crate::api::{ApiHandle, ContentApi, Ref, RequestContext};
use crate::document::QueryResult;
use crate::error::ContentError;
use crate::predicate::{Predicate, QueryOptions};

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Repository description returned by the API root.
#[derive(Debug, Deserialize)]
struct ApiRoot {
    refs: Vec<Ref>,
}

/// Prismic content API client.
pub struct PrismicClient {
    agent: Agent,
    endpoint: String,
    access_token: String,
}

impl PrismicClient {
    /// Create a client with the default timeout.
    ///
    /// # Arguments
    /// * `endpoint` - API root URL (e.g., `https://repo.cdn.prismic.io/api/v2`)
    /// * `access_token` - Repository access token
    #[must_use]
    pub fn new(endpoint: &str, access_token: &str) -> Self {
        Self::with_timeout(
            endpoint,
            access_token,
            Duration::from_secs(DEFAULT_TIMEOUT),
        )
    }

    /// Create a client with a custom request timeout.
    #[must_use]
    pub fn with_timeout(endpoint: &str, access_token: &str, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            access_token: access_token.to_owned(),
        }
    }

    /// Get the document search URL.
    fn search_url(&self) -> String {
        format!("{}/documents/search", self.endpoint)
    }
}

impl ContentApi for PrismicClient {
    fn open(&self, ctx: &RequestContext) -> Result<ApiHandle, ContentError> {
        let response = self
            .agent
            .get(&self.endpoint)
            .query("access_token", &self.access_token)
            .header("Accept", "application/json")
            .call()
            .map_err(|e| ContentError::ApiUnavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ContentError::ApiUnavailable(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let body = body_reader
            .read_to_string()
            .map_err(|e| ContentError::ApiUnavailable(e.to_string()))?;
        let root: ApiRoot = serde_json::from_str(&body)?;

        let handle = ApiHandle::from_refs(&root.refs, ctx)?;
        debug!(
            ref_value = %handle.ref_value,
            preview = handle.is_preview,
            "Opened content API handle"
        );
        Ok(handle)
    }

    fn query(
        &self,
        handle: &ApiHandle,
        predicate: &Predicate,
        options: &QueryOptions,
    ) -> Result<QueryResult, ContentError> {
        let q = predicate.to_string();
        debug!(query = %q, fetch_links = ?options.fetch_links, "Querying content API");

        let mut request = self
            .agent
            .get(&self.search_url())
            .query("ref", &handle.ref_value)
            .query("q", &q)
            .query("access_token", &self.access_token);
        if !options.fetch_links.is_empty() {
            request = request.query("fetchLinks", options.fetch_links.join(","));
        }
        if let Some(size) = options.page_size {
            request = request.query("pageSize", size.to_string());
        }

        let response = request.header("Accept", "application/json").call()?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(ContentError::HttpResponse {
                status,
                body: error_body,
            });
        }

        let body = body_reader.read_to_string()?;
        let result: QueryResult = serde_json::from_str(&body)?;
        debug!(
            query = %q,
            results = result.results_size,
            total = result.total_results_size,
            "Content API query complete"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_trimmed() {
        let client = PrismicClient::new("https://shop.cdn.prismic.io/api/v2/", "token");

        assert_eq!(client.endpoint, "https://shop.cdn.prismic.io/api/v2");
        assert_eq!(
            client.search_url(),
            "https://shop.cdn.prismic.io/api/v2/documents/search"
        );
    }

    #[test]
    fn test_deserialize_api_root() {
        let root: ApiRoot = serde_json::from_str(
            r#"{
                "refs": [{"id": "master", "ref": "YC7", "label": "Master", "isMasterRef": true}],
                "bookmarks": {},
                "types": {"product": "Product"},
                "languages": [{"id": "en-us", "name": "English - United States"}],
                "tags": []
            }"#,
        )
        .unwrap();

        assert_eq!(root.refs.len(), 1);
        assert_eq!(root.refs[0].value, "YC7");
    }

    #[test]
    fn test_deserialize_search_response() {
        let result: QueryResult = serde_json::from_str(
            r#"{
                "page": 1,
                "results_per_page": 20,
                "results_size": 1,
                "total_results_size": 1,
                "total_pages": 1,
                "next_page": null,
                "prev_page": null,
                "results": [{
                    "id": "C1",
                    "uid": null,
                    "type": "collection",
                    "tags": [],
                    "slugs": ["summer"],
                    "data": {"products": [{"products_product": {"id": "P1", "type": "product", "uid": "shirt", "data": {"image": {"url": "https://images.prismic.io/shirt.png"}}}}]}
                }],
                "version": "abc",
                "license": "All Rights Reserved"
            }"#,
        )
        .unwrap();

        assert_eq!(result.results.len(), 1);
        assert!(result.results[0].uid.is_none());
        assert_eq!(
            result.results[0].data["products"][0]["products_product"]["data"]["image"]["url"],
            "https://images.prismic.io/shirt.png"
        );
    }

    #[test]
    fn test_open_unreachable_endpoint_is_unavailable() {
        // Port 9 (discard) on localhost is not expected to speak HTTP.
        let client = PrismicClient::with_timeout(
            "http://127.0.0.1:9/api/v2",
            "token",
            Duration::from_millis(500),
        );

        let err = client.open(&RequestContext::default()).unwrap_err();

        assert!(err.is_unavailable(), "expected ApiUnavailable, got {err:?}");
    }
}
