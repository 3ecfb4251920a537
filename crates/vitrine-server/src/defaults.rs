//! Default-context loader.

use rayon::ThreadPool;
use vitrine_content::{ApiHandle, ContentApi, ContentError, DocumentType};

use crate::pages::Defaults;

/// Fetch the `meta`, `navigation` and `preloader` singletons concurrently
/// on `pool`.
///
/// All three fetches run to completion. When more than one fails, the error
/// reported is the first in `meta`, `navigation`, `preloader` order.
pub(crate) fn load_defaults(
    pool: &ThreadPool,
    api: &dyn ContentApi,
    handle: &ApiHandle,
) -> Result<Defaults, ContentError> {
    let (meta, (navigation, preloader)) = pool.install(|| {
        rayon::join(
            || api.get_single(handle, &DocumentType::Meta),
            || {
                rayon::join(
                    || api.get_single(handle, &DocumentType::Navigation),
                    || api.get_single(handle, &DocumentType::Preloader),
                )
            },
        )
    });

    Ok(Defaults {
        meta: meta?,
        navigation: navigation?,
        preloader: preloader?,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vitrine_content::{Document, MockContent, RequestContext};

    use super::*;

    fn pool(threads: usize) -> ThreadPool {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap()
    }

    fn full_mock() -> MockContent {
        MockContent::new()
            .with_document(Document::new("m", DocumentType::Meta))
            .with_document(Document::new("n", DocumentType::Navigation))
            .with_document(Document::new("p", DocumentType::Preloader))
    }

    #[test]
    fn test_load_defaults() {
        let api = full_mock();
        let handle = api.open(&RequestContext::default()).unwrap();

        let defaults = load_defaults(&pool(3), &api, &handle).unwrap();

        assert_eq!(defaults.meta.id, "m");
        assert_eq!(defaults.navigation.id, "n");
        assert_eq!(defaults.preloader.id, "p");
        assert_eq!(api.queries().len(), 3);
    }

    #[test]
    fn test_load_defaults_on_single_thread_pool() {
        let api = full_mock();
        let handle = api.open(&RequestContext::default()).unwrap();

        let defaults = load_defaults(&pool(1), &api, &handle).unwrap();

        assert_eq!(defaults.preloader.id, "p");
        assert_eq!(api.queries().len(), 3);
    }

    #[test]
    fn test_load_defaults_missing_singleton() {
        let api = MockContent::new()
            .with_document(Document::new("m", DocumentType::Meta))
            .with_document(Document::new("p", DocumentType::Preloader));
        let handle = api.open(&RequestContext::default()).unwrap();

        let err = load_defaults(&pool(3), &api, &handle).unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "no navigation document");
    }

    #[test]
    fn test_load_defaults_reports_first_failure_in_order() {
        let api = MockContent::new();
        let handle = api.open(&RequestContext::default()).unwrap();

        let err = load_defaults(&pool(3), &api, &handle).unwrap_err();

        assert_eq!(err.to_string(), "no meta document");
    }
}
