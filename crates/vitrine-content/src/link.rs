//! Link resolution from content documents to site paths.
//!
//! The same table serves full documents and link fields embedded in other
//! documents, so templates can link to any referenced document.

use serde_json::Value;

use crate::document::{Document, DocumentType};

/// Resolve a document type and UID to a site-relative path.
///
/// A product without a usable UID has no detail page and resolves to `/`.
#[must_use]
pub fn resolve_type(doc_type: &DocumentType, uid: Option<&str>) -> String {
    match doc_type {
        DocumentType::Product => match uid.filter(|uid| !uid.is_empty()) {
            Some(uid) => format!("/detail/{uid}"),
            None => "/".to_owned(),
        },
        DocumentType::About => "/about".to_owned(),
        DocumentType::Collections => "/collections".to_owned(),
        DocumentType::Collection
        | DocumentType::Home
        | DocumentType::Navigation
        | DocumentType::Meta
        | DocumentType::Preloader
        | DocumentType::Other(_) => "/".to_owned(),
    }
}

/// Resolve a full document to its site-relative path.
///
/// Falls back to the most recent slug when the document has no UID.
#[must_use]
pub fn resolve(doc: &Document) -> String {
    resolve_type(&doc.doc_type, doc.uid.as_deref().or_else(|| doc.slug()))
}

/// Resolve a document or link field given as JSON.
///
/// Reads `type` and `uid`, falling back to `slug`. Values without a string
/// `type` resolve to `/`.
#[must_use]
pub fn resolve_json(value: &Value) -> String {
    let Some(tag) = value.get("type").and_then(Value::as_str) else {
        return "/".to_owned();
    };
    let uid = value
        .get("uid")
        .and_then(Value::as_str)
        .or_else(|| value.get("slug").and_then(Value::as_str));
    resolve_type(&DocumentType::parse(tag), uid)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_resolve_product() {
        let doc = Document::new("1", DocumentType::Product).with_uid("x");
        assert_eq!(resolve(&doc), "/detail/x");
    }

    #[test]
    fn test_resolve_about_and_collections() {
        assert_eq!(resolve(&Document::new("1", DocumentType::About)), "/about");
        assert_eq!(
            resolve(&Document::new("2", DocumentType::Collections)),
            "/collections"
        );
    }

    #[test]
    fn test_resolve_everything_else_is_root() {
        for tag in [
            "home",
            "collection",
            "navigation",
            "meta",
            "preloader",
            "lookbook",
            "",
        ] {
            let doc = Document::new("1", DocumentType::parse(tag)).with_uid("ignored");
            assert_eq!(resolve(&doc), "/", "type {tag:?} should resolve to root");
        }
    }

    #[test]
    fn test_resolve_product_falls_back_to_slug() {
        let mut doc = Document::new("1", DocumentType::Product);
        doc.slugs = vec!["old-shirt".to_owned()];

        assert_eq!(resolve(&doc), "/detail/old-shirt");
    }

    #[test]
    fn test_resolve_product_without_uid_is_root() {
        assert_eq!(resolve(&Document::new("1", DocumentType::Product)), "/");
        assert_eq!(resolve_type(&DocumentType::Product, Some("")), "/");
    }

    #[test]
    fn test_resolve_json_link_field() {
        let link = json!({
            "id": "X",
            "type": "product",
            "uid": "linen-shirt",
            "slug": "linen-shirt-old",
            "link_type": "Document",
            "isBroken": false
        });

        assert_eq!(resolve_json(&link), "/detail/linen-shirt");
    }

    #[test]
    fn test_resolve_json_uses_slug_without_uid() {
        let link = json!({"type": "product", "slug": "shirt"});
        assert_eq!(resolve_json(&link), "/detail/shirt");
    }

    #[test]
    fn test_resolve_json_without_type() {
        assert_eq!(resolve_json(&json!({"link_type": "Web"})), "/");
        assert_eq!(resolve_json(&json!(null)), "/");
        assert_eq!(resolve_json(&json!({"type": 3})), "/");
    }
}
