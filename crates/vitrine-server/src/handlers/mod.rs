//! HTTP request handlers.

pub(crate) mod pages;

use std::sync::Arc;

use axum::http::{HeaderMap, header};
use axum::response::Html;
use vitrine_content::{ApiHandle, RequestContext};

use crate::defaults::load_defaults;
use crate::error::ServerError;
use crate::pages::Defaults;
use crate::state::AppState;

/// Build the content request context from the request's `Cookie` headers.
pub(crate) fn request_context(headers: &HeaderMap) -> RequestContext {
    let cookies = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .collect::<Vec<_>>()
        .join("; ");
    RequestContext::from_cookie_header(&cookies)
}

/// Run a page pipeline on the blocking pool.
///
/// Opens a handle for the request, loads the default context, then hands
/// both to `page`, which fetches the page's own content and renders it.
pub(crate) async fn render_page<F>(
    state: Arc<AppState>,
    headers: &HeaderMap,
    page: F,
) -> Result<Html<String>, ServerError>
where
    F: FnOnce(&AppState, &ApiHandle, Defaults) -> Result<String, ServerError> + Send + 'static,
{
    let ctx = request_context(headers);
    let html = tokio::task::spawn_blocking(move || -> Result<String, ServerError> {
        let state = state.as_ref();
        let handle = state.api.open(&ctx)?;
        let defaults = load_defaults(&state.fetch_pool, state.api.as_ref(), &handle)?;
        page(state, &handle, defaults)
    })
    .await??;
    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_request_context_without_cookie() {
        assert_eq!(request_context(&HeaderMap::new()), RequestContext::default());
    }

    #[test]
    fn test_request_context_joins_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("io.prismic.preview=preview-ref"),
        );

        let ctx = request_context(&headers);

        assert_eq!(ctx.preview_ref.as_deref(), Some("preview-ref"));
    }
}
