//! Content documents and query results.
//!
//! Documents are read-only views of remote state. Every document carries a
//! [`DocumentType`] tag; individually addressable types also carry a `uid`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Known content types of the storefront repository.
///
/// Parsing is total: unknown tags become [`DocumentType::Other`] and keep
/// their original spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    /// Individually addressable product (`/detail/{uid}`).
    Product,
    /// About page singleton.
    About,
    /// Collections page singleton.
    Collections,
    /// A product collection (repeatable).
    Collection,
    /// Home page singleton.
    Home,
    /// Site navigation singleton.
    Navigation,
    /// Site meta (title, description) singleton.
    Meta,
    /// Preloader singleton.
    Preloader,
    /// Any other custom type.
    Other(String),
}

impl DocumentType {
    /// Parse a type tag.
    #[must_use]
    pub fn parse(tag: &str) -> Self {
        match tag {
            "product" => Self::Product,
            "about" => Self::About,
            "collections" => Self::Collections,
            "collection" => Self::Collection,
            "home" => Self::Home,
            "navigation" => Self::Navigation,
            "meta" => Self::Meta,
            "preloader" => Self::Preloader,
            other => Self::Other(other.to_owned()),
        }
    }

    /// Type tag as used by the content API.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Product => "product",
            Self::About => "about",
            Self::Collections => "collections",
            Self::Collection => "collection",
            Self::Home => "home",
            Self::Navigation => "navigation",
            Self::Meta => "meta",
            Self::Preloader => "preloader",
            Self::Other(tag) => tag,
        }
    }
}

impl From<String> for DocumentType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<DocumentType> for String {
    fn from(doc_type: DocumentType) -> Self {
        match doc_type {
            DocumentType::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A content document as returned by the content API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Repository-wide document ID.
    pub id: String,
    /// Stable slug for individually addressable types.
    #[serde(default)]
    pub uid: Option<String>,
    /// Content type tag.
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    /// API URL of the document.
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Historical slugs, most recent first.
    #[serde(default)]
    pub slugs: Vec<String>,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub first_publication_date: Option<String>,
    #[serde(default)]
    pub last_publication_date: Option<String>,
    /// Typed fields (rich text, links, images, groups, slices).
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Document {
    /// Create a document with no fields.
    #[must_use]
    pub fn new(id: impl Into<String>, doc_type: DocumentType) -> Self {
        Self {
            id: id.into(),
            uid: None,
            doc_type,
            href: None,
            tags: Vec::new(),
            slugs: Vec::new(),
            lang: None,
            first_publication_date: None,
            last_publication_date: None,
            data: Map::new(),
        }
    }

    /// Set the document UID.
    #[must_use]
    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    /// Set a data field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.data.insert(name.into(), value);
        self
    }

    /// Most recent slug, if any.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.slugs.first().map(String::as_str)
    }
}

/// One page of documents returned by a predicate query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub page: u32,
    pub results_per_page: u32,
    pub results_size: u32,
    pub total_results_size: u32,
    pub total_pages: u32,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub prev_page: Option<String>,
    /// Matching documents in API order.
    pub results: Vec<Document>,
}

impl QueryResult {
    /// Build a single-page result from a list of documents.
    #[must_use]
    pub fn from_documents(results: Vec<Document>) -> Self {
        let size = u32::try_from(results.len()).unwrap_or(u32::MAX);
        Self {
            page: 1,
            results_per_page: size,
            results_size: size,
            total_results_size: size,
            total_pages: u32::from(size > 0),
            next_page: None,
            prev_page: None,
            results,
        }
    }
}
