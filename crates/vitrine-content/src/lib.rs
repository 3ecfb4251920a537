//! Headless content API client for the Vitrine storefront.
//!
//! This crate provides a [`ContentApi`] trait for reading documents from a
//! Prismic-style content repository. This enables:
//!
//! - **Unit testing** route handlers without network access
//! - **A single read path** shared by every page (`open`, `get_single`,
//!   `get_by_uid`, `query`)
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Document`] and the closed [`DocumentType`] tag that drives link resolution
//! - [`resolve`] and [`resolve_json`], the link resolver shared with templates
//! - [`PrismicClient`], a blocking HTTP implementation over the REST API v2
//! - [`MockContent`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use vitrine_content::{ContentApi, DocumentType, PrismicClient, RequestContext};
//!
//! let client = PrismicClient::new("https://repo.cdn.prismic.io/api/v2", "token");
//! let handle = client.open(&RequestContext::default())?;
//! let home = client.get_single(&handle, &DocumentType::Home)?;
//! println!("{}", vitrine_content::resolve(&home));
//! ```

mod api;
mod document;
mod error;
mod link;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod predicate;
mod prismic;

pub use api::{ApiHandle, ContentApi, Ref, RequestContext};
pub use document::{Document, DocumentType, QueryResult};
pub use error::ContentError;
pub use link::{resolve, resolve_json, resolve_type};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockContent;
pub use predicate::{Predicate, QueryOptions};
pub use prismic::PrismicClient;
