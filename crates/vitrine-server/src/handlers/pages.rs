//! Storefront page routes.
//!
//! Each handler fetches its page content on top of the default context and
//! renders the matching template under `pages/`.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Html;
use vitrine_content::{
    ApiHandle, ContentApi, ContentError, Document, DocumentType, Predicate, QueryOptions,
};

use crate::error::ServerError;
use crate::handlers::render_page;
use crate::pages::{AboutPage, CollectionsPage, DetailPage, HomePage};
use crate::state::AppState;

/// Linked field expanded on each collection's products.
const COLLECTION_FETCH_LINKS: &str = "product.image";

/// Linked field expanded on a product's collection.
const PRODUCT_FETCH_LINKS: &str = "collection.title";

/// Fetch every collection with product images expanded.
///
/// `/` and `/collections` issue exactly this query.
fn query_collections(
    api: &dyn ContentApi,
    handle: &ApiHandle,
) -> Result<Vec<Document>, ContentError> {
    let options = QueryOptions::new().fetch_links(COLLECTION_FETCH_LINKS);
    let result = api.query(
        handle,
        &Predicate::document_type(&DocumentType::Collection),
        &options,
    )?;
    Ok(result.results)
}

/// Handle GET /.
pub(crate) async fn get_home(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, ServerError> {
    render_page(state, &headers, |state, handle, defaults| {
        let api = state.api.as_ref();
        let page = HomePage {
            defaults,
            home: api.get_single(handle, &DocumentType::Home)?,
            collections: query_collections(api, handle)?,
        };
        Ok(state.renderer.render("pages/home", &page)?)
    })
    .await
}

/// Handle GET /about.
pub(crate) async fn get_about(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, ServerError> {
    render_page(state, &headers, |state, handle, defaults| {
        let page = AboutPage {
            defaults,
            about: state.api.get_single(handle, &DocumentType::About)?,
        };
        Ok(state.renderer.render("pages/about", &page)?)
    })
    .await
}

/// Handle GET /collections.
pub(crate) async fn get_collections(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, ServerError> {
    render_page(state, &headers, |state, handle, defaults| {
        let api = state.api.as_ref();
        let page = CollectionsPage {
            defaults,
            home: api.get_single(handle, &DocumentType::Home)?,
            collections: query_collections(api, handle)?,
        };
        Ok(state.renderer.render("pages/collections", &page)?)
    })
    .await
}

/// Handle GET /detail/{uid}.
///
/// An unknown UID surfaces as a 404 error page.
pub(crate) async fn get_detail(
    Path(uid): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, ServerError> {
    render_page(state, &headers, move |state, handle, defaults| {
        let options = QueryOptions::new().fetch_links(PRODUCT_FETCH_LINKS);
        let page = DetailPage {
            defaults,
            product: state
                .api
                .get_by_uid(handle, &DocumentType::Product, &uid, &options)?,
        };
        Ok(state.renderer.render("pages/detail", &page)?)
    })
    .await
}
