//! HTML views

pub mod page;

use axum::response::{Html, IntoResponse, Response};
use motor_core::InferenceError;

use crate::AppError;

/// An [`AppError`] rendered as an HTML page instead of JSON
#[derive(Debug)]
pub struct ErrorPage(pub AppError);

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let (status, message) = self.0.status_and_message();
        (status, Html(page::render_error(status.as_u16(), message))).into_response()
    }
}

impl From<AppError> for ErrorPage {
    fn from(err: AppError) -> Self {
        ErrorPage(err)
    }
}

impl From<InferenceError> for ErrorPage {
    fn from(err: InferenceError) -> Self {
        ErrorPage(err.into())
    }
}

/// Minimal HTML escaping for text and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
        assert_eq!(escape("Torque (Nm)"), "Torque (Nm)");
    }
}
