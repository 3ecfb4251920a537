//! Error types for content API operations.

use crate::document::DocumentType;

/// Error from content API operations.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// Endpoint unreachable, credentials rejected, or no usable ref.
    #[error("content API unavailable: {0}")]
    ApiUnavailable(String),

    /// Requested singleton or UID document does not exist.
    #[error("{}", not_found_message(.doc_type, .uid.as_deref()))]
    NotFound {
        /// Requested document type.
        doc_type: DocumentType,
        /// Requested UID (`None` for singletons).
        uid: Option<String>,
    },

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Malformed response body.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ContentError {
    /// Create a not found error for a singleton type.
    #[must_use]
    pub fn single_not_found(doc_type: &DocumentType) -> Self {
        Self::NotFound {
            doc_type: doc_type.clone(),
            uid: None,
        }
    }

    /// Create a not found error for a UID lookup.
    #[must_use]
    pub fn uid_not_found(doc_type: &DocumentType, uid: &str) -> Self {
        Self::NotFound {
            doc_type: doc_type.clone(),
            uid: Some(uid.to_owned()),
        }
    }

    /// Check if this error means the document does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error means the API could not be reached or authenticated.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ApiUnavailable(_))
    }
}

fn not_found_message(doc_type: &DocumentType, uid: Option<&str>) -> String {
    match uid {
        Some(uid) => format!("no {doc_type} document with uid {uid:?}"),
        None => format!("no {doc_type} document"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let single = ContentError::single_not_found(&DocumentType::Meta);
        let by_uid = ContentError::uid_not_found(&DocumentType::Product, "hat");

        assert_eq!(single.to_string(), "no meta document");
        assert_eq!(by_uid.to_string(), "no product document with uid \"hat\"");
        assert!(single.is_not_found());
        assert!(!single.is_unavailable());
    }

    #[test]
    fn test_http_response_display() {
        let err = ContentError::HttpResponse {
            status: 500,
            body: "boom".to_owned(),
        };
        assert_eq!(err.to_string(), "HTTP error: 500 - boom");
    }
}
