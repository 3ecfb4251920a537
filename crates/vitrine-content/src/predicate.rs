//! Query predicates and options.

use std::fmt;

use crate::document::{Document, DocumentType};

/// Filter expression selecting documents by attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exact match of a document path against a value.
    At {
        /// Document path (e.g., `document.type`, `my.product.uid`).
        path: String,
        /// Expected value.
        value: String,
    },
}

impl Predicate {
    /// Documents of the given type.
    #[must_use]
    pub fn document_type(doc_type: &DocumentType) -> Self {
        Self::At {
            path: "document.type".to_owned(),
            value: doc_type.as_str().to_owned(),
        }
    }

    /// Document of the given type with the given UID.
    #[must_use]
    pub fn uid(doc_type: &DocumentType, uid: &str) -> Self {
        Self::At {
            path: format!("my.{doc_type}.uid"),
            value: uid.to_owned(),
        }
    }

    /// Evaluate the predicate against a document.
    ///
    /// Supports `document.type`, `document.id`, `document.tags` and
    /// `my.{type}.uid` paths. Unknown paths never match.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        let Self::At { path, value } = self;
        match path.as_str() {
            "document.type" => doc.doc_type.as_str() == value,
            "document.id" => doc.id == *value,
            "document.tags" => doc.tags.iter().any(|tag| tag == value),
            other => other
                .strip_prefix("my.")
                .and_then(|rest| rest.strip_suffix(".uid"))
                .is_some_and(|tag| {
                    doc.doc_type.as_str() == tag && doc.uid.as_deref() == Some(value.as_str())
                }),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self::At { path, value } = self;
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        write!(f, "[[at({path}, \"{escaped}\")]]")
    }
}

/// Options applied to a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Linked fields to expand inline, as `type.field`.
    pub fetch_links: Vec<String>,
    /// Maximum number of results per page.
    pub page_size: Option<u32>,
}

impl QueryOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Expand a linked field (`type.field`) in the results.
    #[must_use]
    pub fn fetch_links(mut self, field: impl Into<String>) -> Self {
        self.fetch_links.push(field.into());
        self
    }

    /// Limit the page size.
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }
}
