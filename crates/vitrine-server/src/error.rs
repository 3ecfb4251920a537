//! Error types for the HTTP server.

use std::error::Error as _;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use vitrine_content::ContentError;
use vitrine_render::richtext::escape;
use vitrine_render::{RenderError, TEMPLATE_EXTENSION};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Content API error.
    #[error(transparent)]
    Content(#[from] ContentError),

    /// Template render error.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Blocking page task panicked or was cancelled.
    #[error("page task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl ServerError {
    /// HTTP status for this error.
    pub(crate) fn status(&self) -> StatusCode {
        match self {
            Self::Content(ContentError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Content(ContentError::ApiUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Content(_) => StatusCode::BAD_GATEWAY,
            Self::Render(_) | Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        (status, Html(error_page(status, &self))).into_response()
    }
}

/// Developer-facing error page with the full source chain.
fn error_page(status: StatusCode, error: &ServerError) -> String {
    let mut causes = String::new();
    let mut source = error.source();
    while let Some(cause) = source {
        causes.push_str("<li>");
        causes.push_str(&escape(&cause.to_string()));
        causes.push_str("</li>");
        source = cause.source();
    }

    let hint = match error {
        ServerError::Render(e) if e.is_template_not_found() => format!(
            "<p>Template <code>{}.{TEMPLATE_EXTENSION}</code> was not found in the views directory.</p>",
            escape(&e.template)
        ),
        _ => String::new(),
    };

    let title = escape(&status.to_string());
    let message = escape(&error.to_string());
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title></head>\
         <body><h1>{title}</h1>{hint}<pre>{message}</pre><ul>{causes}</ul></body></html>\n"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vitrine_content::DocumentType;
    use vitrine_render::Renderer;

    use super::*;

    #[test]
    fn test_not_found_status() {
        let err = ServerError::from(ContentError::uid_not_found(&DocumentType::Product, "x"));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unavailable_status() {
        let err = ServerError::from(ContentError::ApiUnavailable("down".to_owned()));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_upstream_error_status() {
        let err = ServerError::from(ContentError::HttpResponse {
            status: 500,
            body: "boom".to_owned(),
        });
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_page_escapes_message() {
        let err = ServerError::from(ContentError::uid_not_found(&DocumentType::Product, "<x>"));

        let html = error_page(err.status(), &err);

        assert!(html.contains("<h1>404 Not Found</h1>"));
        assert!(html.contains("no product document with uid &quot;&lt;x&gt;&quot;"));
        assert!(!html.contains("was not found in the views directory"));
    }

    #[test]
    fn test_error_page_names_missing_template() {
        let renderer = Renderer::from_templates(Vec::<(&str, &str)>::new()).unwrap();
        let err = ServerError::from(
            renderer
                .render("pages/about", &serde_json::json!({}))
                .unwrap_err(),
        );

        let html = error_page(err.status(), &err);

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(html.contains(
            "<p>Template <code>pages/about.html</code> was not found in the views directory.</p>"
        ));
    }

    #[test]
    fn test_error_page_omits_hint_for_broken_template() {
        let renderer = Renderer::from_templates([("pages/about", "{{ missing() }}")]).unwrap();
        let err = ServerError::from(
            renderer
                .render("pages/about", &serde_json::json!({}))
                .unwrap_err(),
        );

        let html = error_page(err.status(), &err);

        assert!(!html.contains("was not found in the views directory"));
    }
}
