//! Template rendering for the Vitrine storefront.
//!
//! Page templates are `minijinja` templates stored under a views directory
//! (`pages/home.html`, `pages/detail.html`, ...). Every template can call the
//! storefront helpers registered by [`helpers::install`]: the link resolver,
//! rich text conversion and the ordinal formatter.
//!
//! # Example
//!
//! ```ignore
//! use vitrine_render::Renderer;
//!
//! let renderer = Renderer::from_dir("views");
//! let html = renderer.render("pages/about", &context)?;
//! ```

pub mod helpers;
mod renderer;
pub mod richtext;

pub use helpers::ordinal_word;
pub use renderer::{RenderError, Renderer, TEMPLATE_EXTENSION};
