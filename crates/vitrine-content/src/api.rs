//! Content API trait and per-request handle.

use percent_encoding::percent_decode_str;
use serde::Deserialize;
use serde_json::Value;

use crate::document::{Document, DocumentType, QueryResult};
use crate::error::ContentError;
use crate::predicate::{Predicate, QueryOptions};

/// Cookie carrying the preview ref set by the content editor.
pub const PREVIEW_COOKIE: &str = "io.prismic.preview";

/// A content version advertised by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ref {
    pub id: String,
    /// Opaque ref value passed to every query.
    #[serde(rename = "ref")]
    pub value: String,
    pub label: String,
    #[serde(default)]
    pub is_master_ref: bool,
}

/// Request information the API handle depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Preview ref requested by the browser, if any.
    pub preview_ref: Option<String>,
}

impl RequestContext {
    /// Build a context from a raw `Cookie` header value.
    ///
    /// The preview cookie is percent-decoded. Newer editors store a JSON
    /// object keyed by repository; the first `preview` value found is used.
    #[must_use]
    pub fn from_cookie_header(header: &str) -> Self {
        let preview_ref = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == PREVIEW_COOKIE)
            .map(|(_, raw)| percent_decode_str(raw).decode_utf8_lossy().into_owned())
            .and_then(|decoded| preview_from_cookie(&decoded));
        Self { preview_ref }
    }
}

fn preview_from_cookie(decoded: &str) -> Option<String> {
    let decoded = decoded.trim();
    if decoded.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(decoded) {
        Ok(Value::Object(repos)) => repos
            .values()
            .find_map(|repo| repo.get("preview").and_then(Value::as_str))
            .map(str::to_owned),
        _ => Some(decoded.to_owned()),
    }
}

/// Per-request API handle.
///
/// Names the content ref every read is pinned to. Not shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHandle {
    /// Ref used for queries issued through this handle.
    pub ref_value: String,
    /// True when `ref_value` came from a preview cookie.
    pub is_preview: bool,
}

impl ApiHandle {
    /// Create a handle pinned to the master ref among `refs`, or to the
    /// context's preview ref when one is present.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::ApiUnavailable`] if no master ref is advertised.
    pub fn from_refs(refs: &[Ref], ctx: &RequestContext) -> Result<Self, ContentError> {
        let master = refs
            .iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.value.clone())
            .ok_or_else(|| ContentError::ApiUnavailable("no master ref advertised".to_owned()))?;

        let handle = match &ctx.preview_ref {
            Some(preview) => Self {
                ref_value: preview.clone(),
                is_preview: true,
            },
            None => Self {
                ref_value: master,
                is_preview: false,
            },
        };
        Ok(handle)
    }
}

/// Read access to a content repository.
///
/// Implementations are shared process-wide; all per-request state lives in
/// the [`ApiHandle`] returned by [`ContentApi::open`].
pub trait ContentApi: Send + Sync {
    /// Open a handle for the current request.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::ApiUnavailable`] if the endpoint or access token
    /// is invalid or unreachable.
    fn open(&self, ctx: &RequestContext) -> Result<ApiHandle, ContentError>;

    /// Query documents matching a predicate.
    ///
    /// An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] on transport or parse failure.
    fn query(
        &self,
        handle: &ApiHandle,
        predicate: &Predicate,
        options: &QueryOptions,
    ) -> Result<QueryResult, ContentError>;

    /// Fetch the singleton document of a type.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::NotFound`] if no document of that type exists.
    fn get_single(
        &self,
        handle: &ApiHandle,
        doc_type: &DocumentType,
    ) -> Result<Document, ContentError> {
        let options = QueryOptions::new().page_size(1);
        self.query(handle, &Predicate::document_type(doc_type), &options)?
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ContentError::single_not_found(doc_type))
    }

    /// Fetch a document by type and UID.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::NotFound`] if no such document exists.
    fn get_by_uid(
        &self,
        handle: &ApiHandle,
        doc_type: &DocumentType,
        uid: &str,
        options: &QueryOptions,
    ) -> Result<Document, ContentError> {
        let options = options.clone().page_size(1);
        self.query(handle, &Predicate::uid(doc_type, uid), &options)?
            .results
            .into_iter()
            .next()
            .ok_or_else(|| ContentError::uid_not_found(doc_type, uid))
    }
}
