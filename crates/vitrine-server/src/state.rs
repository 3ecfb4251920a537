//! Application state.
//!
//! Shared state for all request handlers.

use std::sync::Arc;

use vitrine_content::ContentApi;
use vitrine_render::Renderer;

/// Threads in the pool that runs default-context fetches.
pub(crate) const FETCH_THREADS: usize = 12;

/// Application state shared across all handlers.
///
/// Built once at startup and read-only afterwards; everything a request
/// needs beyond this lives on the request's own stack.
pub(crate) struct AppState {
    /// Content API client.
    pub(crate) api: Arc<dyn ContentApi>,
    /// Page template renderer with helpers installed.
    pub(crate) renderer: Renderer,
    /// Dedicated pool for the blocking default-context fetches, kept apart
    /// from the global rayon pool.
    pub(crate) fetch_pool: rayon::ThreadPool,
}

impl AppState {
    /// Create the state and its fetch pool.
    pub(crate) fn new(
        api: Arc<dyn ContentApi>,
        renderer: Renderer,
    ) -> Result<Self, rayon::ThreadPoolBuildError> {
        let fetch_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(FETCH_THREADS)
            .thread_name(|i| format!("vitrine-fetch-{i}"))
            .build()?;
        Ok(Self {
            api,
            renderer,
            fetch_pool,
        })
    }
}
