// error.rs - Pack Error Taxonomy
// Every handler maps its failures into one of these variants; the first error
// aborts the handler and is shown to the caller. Chat commands reply with the
// message, the auth API answers with a status code and a JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// The user asked for something that does not exist or gave bad input.
    /// Surfaced verbatim as a chat reply or a 404.
    #[error("{0}")]
    User(String),

    /// The caller is not allowed to complete the operation.
    #[error("{0}")]
    Forbidden(String),

    /// An external API answered with a non-2xx status or could not be reached.
    #[error("Upstream API error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl PackError {
    pub fn user(msg: impl Into<String>) -> Self {
        PackError::User(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        PackError::Forbidden(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        PackError::Upstream(msg.into())
    }
}

impl From<reqwest::Error> for PackError {
    fn from(e: reqwest::Error) -> Self {
        PackError::Upstream(e.to_string())
    }
}

impl IntoResponse for PackError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            PackError::User(_) => (StatusCode::NOT_FOUND, "not_found"),
            PackError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
            PackError::Upstream(_) => (StatusCode::BAD_GATEWAY, "upstream_error"),
            PackError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        };

        let body = json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_message_is_verbatim() {
        let e = PackError::user("No playlist found with that name.");
        assert_eq!(e.to_string(), "No playlist found with that name.");
    }

    #[test]
    fn test_forbidden_maps_to_403() {
        let response = PackError::forbidden("nope").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_upstream_maps_to_502() {
        let response = PackError::upstream("osu! token endpoint returned 400").into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
