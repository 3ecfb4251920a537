//! Mock content API for testing.
//!
//! Provides [`MockContent`] for unit testing without network access.

use std::sync::RwLock;

use crate::api::{ApiHandle, ContentApi, RequestContext};
use crate::document::{Document, QueryResult};
use crate::error::ContentError;
use crate::predicate::{Predicate, QueryOptions};

/// Ref reported by every handle the mock opens.
const MOCK_REF: &str = "mock-master";

/// Mock content repository for testing.
///
/// Stores documents in memory and records every query it receives. Use the
/// builder methods to configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use vitrine_content::{ContentApi, Document, DocumentType, MockContent, RequestContext};
///
/// let api = MockContent::new().with_document(Document::new("1", DocumentType::Home));
/// let handle = api.open(&RequestContext::default()).unwrap();
/// let home = api.get_single(&handle, &DocumentType::Home).unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockContent {
    documents: RwLock<Vec<Document>>,
    unavailable: RwLock<Option<String>>,
    failing_type: RwLock<Option<String>>,
    queries: RwLock<Vec<(Predicate, QueryOptions)>>,
    opened: RwLock<Vec<RequestContext>>,
}

impl MockContent {
    /// Create a new empty mock repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, doc: Document) -> Self {
        self.documents.write().unwrap().push(doc);
        self
    }

    /// Make [`ContentApi::open`] fail with [`ContentError::ApiUnavailable`].
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn unavailable(self, reason: impl Into<String>) -> Self {
        *self.unavailable.write().unwrap() = Some(reason.into());
        self
    }

    /// Make queries for a document type fail with an HTTP 500 response.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing_type(self, doc_type: impl Into<String>) -> Self {
        *self.failing_type.write().unwrap() = Some(doc_type.into());
        self
    }

    /// Queries received so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn queries(&self) -> Vec<(Predicate, QueryOptions)> {
        self.queries.read().unwrap().clone()
    }

    /// Request contexts passed to [`ContentApi::open`] so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn opened(&self) -> Vec<RequestContext> {
        self.opened.read().unwrap().clone()
    }
}

impl ContentApi for MockContent {
    fn open(&self, ctx: &RequestContext) -> Result<ApiHandle, ContentError> {
        self.opened.write().unwrap().push(ctx.clone());
        if let Some(reason) = self.unavailable.read().unwrap().as_ref() {
            return Err(ContentError::ApiUnavailable(reason.clone()));
        }
        Ok(ApiHandle {
            ref_value: ctx
                .preview_ref
                .clone()
                .unwrap_or_else(|| MOCK_REF.to_owned()),
            is_preview: ctx.preview_ref.is_some(),
        })
    }

    fn query(
        &self,
        _handle: &ApiHandle,
        predicate: &Predicate,
        options: &QueryOptions,
    ) -> Result<QueryResult, ContentError> {
        self.queries
            .write()
            .unwrap()
            .push((predicate.clone(), options.clone()));

        let documents = self.documents.read().unwrap();
        if let Some(failing) = self.failing_type.read().unwrap().as_deref()
            && documents
                .iter()
                .any(|doc| doc.doc_type.as_str() == failing && predicate.matches(doc))
        {
            return Err(ContentError::HttpResponse {
                status: 500,
                body: format!("mock failure for {failing}"),
            });
        }

        let limit = options
            .page_size
            .map_or(usize::MAX, |size| size as usize);
        let results = documents
            .iter()
            .filter(|doc| predicate.matches(doc))
            .take(limit)
            .cloned()
            .collect();
        Ok(QueryResult::from_documents(results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentType;

    fn mock() -> MockContent {
        MockContent::new()
            .with_document(Document::new("1", DocumentType::Home))
            .with_document(Document::new("2", DocumentType::Collection))
            .with_document(Document::new("3", DocumentType::Collection))
            .with_document(Document::new("4", DocumentType::Product).with_uid("shirt"))
    }

    #[test]
    fn test_get_single() {
        let api = mock();
        let handle = api.open(&RequestContext::default()).unwrap();

        let home = api.get_single(&handle, &DocumentType::Home).unwrap();

        assert_eq!(home.id, "1");
        assert_eq!(handle.ref_value, MOCK_REF);
    }

    #[test]
    fn test_get_single_missing() {
        let api = mock();
        let handle = api.open(&RequestContext::default()).unwrap();

        let err = api.get_single(&handle, &DocumentType::About).unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_by_uid() {
        let api = mock();
        let handle = api.open(&RequestContext::default()).unwrap();

        let product = api
            .get_by_uid(&handle, &DocumentType::Product, "shirt", &QueryOptions::new())
            .unwrap();
        let missing = api
            .get_by_uid(&handle, &DocumentType::Product, "hat", &QueryOptions::new())
            .unwrap_err();

        assert_eq!(product.id, "4");
        assert!(missing.is_not_found());
    }

    #[test]
    fn test_query_returns_all_matches_in_order() {
        let api = mock();
        let handle = api.open(&RequestContext::default()).unwrap();

        let result = api
            .query(
                &handle,
                &Predicate::document_type(&DocumentType::Collection),
                &QueryOptions::new(),
            )
            .unwrap();

        let ids: Vec<_> = result.results.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3"]);
        assert_eq!(api.queries().len(), 1);
    }

    #[test]
    fn test_query_no_matches_is_empty() {
        let api = MockContent::new();
        let handle = api.open(&RequestContext::default()).unwrap();

        let result = api
            .query(
                &handle,
                &Predicate::document_type(&DocumentType::Collection),
                &QueryOptions::new(),
            )
            .unwrap();

        assert!(result.results.is_empty());
    }

    #[test]
    fn test_unavailable() {
        let api = mock().unavailable("bad token");

        let err = api.open(&RequestContext::default()).unwrap_err();

        assert!(err.is_unavailable());
        assert_eq!(api.opened().len(), 1);
    }

    #[test]
    fn test_failing_type() {
        let api = mock().failing_type("home");
        let handle = api.open(&RequestContext::default()).unwrap();

        let err = api.get_single(&handle, &DocumentType::Home).unwrap_err();

        assert!(matches!(err, ContentError::HttpResponse { status: 500, .. }));
        assert!(api.get_by_uid(&handle, &DocumentType::Product, "shirt", &QueryOptions::new()).is_ok());
    }
}
