//! Typed render contexts for each page template.
//!
//! Every page context flattens [`Defaults`] so `meta`, `navigation` and
//! `preloader` are top-level template variables next to the page's own data.

use serde::Serialize;
use vitrine_content::Document;

/// Context shared by every page.
#[derive(Debug, Serialize)]
pub(crate) struct Defaults {
    pub(crate) meta: Document,
    pub(crate) navigation: Document,
    pub(crate) preloader: Document,
}

/// Context for `pages/home`.
#[derive(Debug, Serialize)]
pub(crate) struct HomePage {
    #[serde(flatten)]
    pub(crate) defaults: Defaults,
    pub(crate) home: Document,
    pub(crate) collections: Vec<Document>,
}

/// Context for `pages/about`.
#[derive(Debug, Serialize)]
pub(crate) struct AboutPage {
    #[serde(flatten)]
    pub(crate) defaults: Defaults,
    pub(crate) about: Document,
}

/// Context for `pages/collections`.
#[derive(Debug, Serialize)]
pub(crate) struct CollectionsPage {
    #[serde(flatten)]
    pub(crate) defaults: Defaults,
    pub(crate) home: Document,
    pub(crate) collections: Vec<Document>,
}

/// Context for `pages/detail`.
#[derive(Debug, Serialize)]
pub(crate) struct DetailPage {
    #[serde(flatten)]
    pub(crate) defaults: Defaults,
    pub(crate) product: Document,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vitrine_content::DocumentType;

    use super::*;

    fn defaults() -> Defaults {
        Defaults {
            meta: Document::new("m", DocumentType::Meta),
            navigation: Document::new("n", DocumentType::Navigation),
            preloader: Document::new("p", DocumentType::Preloader),
        }
    }

    #[test]
    fn test_defaults_flattened_into_page() {
        let page = AboutPage {
            defaults: defaults(),
            about: Document::new("a", DocumentType::About),
        };

        let json = serde_json::to_value(&page).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();

        assert_eq!(keys, vec!["about", "meta", "navigation", "preloader"]);
        assert_eq!(json["meta"]["id"], "m");
        assert_eq!(json["about"]["type"], "about");
    }

    #[test]
    fn test_home_page_keys() {
        let page = HomePage {
            defaults: defaults(),
            home: Document::new("h", DocumentType::Home),
            collections: vec![Document::new("c1", DocumentType::Collection)],
        };

        let json = serde_json::to_value(&page).unwrap();

        assert_eq!(json["home"]["id"], "h");
        assert_eq!(json["collections"][0]["id"], "c1");
        assert_eq!(json["preloader"]["type"], "preloader");
    }
}
