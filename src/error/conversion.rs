/**
 * Error Conversion
 *
 * The single place where `ApiError` becomes HTTP. Every failure renders the
 * standard envelope with `success: false`. Validation errors carry their
 * field list in `data`; everything else carries `data: null`. Unexpected
 * failures are logged with full detail and answered with an opaque
 * "Server error" — the client never sees stack traces or storage errors.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::error::types::ApiError;
use crate::response::ApiResponse;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let (message, data): (String, Option<Value>) = match &self {
            ApiError::Validation(fields) => (
                "Validation error".to_string(),
                serde_json::to_value(fields).ok(),
            ),
            ApiError::Database(err) => {
                tracing::error!(error = %err, "database failure while handling request");
                ("Server error".to_string(), None)
            }
            ApiError::Internal(detail) => {
                tracing::error!(detail, "unexpected failure while handling request");
                ("Server error".to_string(), None)
            }
            other => (other.to_string(), None),
        };

        (status, Json(ApiResponse::new(false, message, data))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::types::FieldError;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_errors_list_fields() {
        let err = ApiError::Validation(vec![
            FieldError::new("email", "Please include a valid email"),
            FieldError::new("password", "Please enter a password with 6 or more characters"),
        ]);
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Validation error");
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"][0]["field"], "email");
    }

    #[tokio::test]
    async fn server_errors_are_opaque() {
        let (status, body) = body_json(ApiError::Database(sqlx::Error::PoolClosed)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Server error");
        assert_eq!(body["data"], Value::Null);
    }

    #[tokio::test]
    async fn unauthorized_is_enveloped() {
        let (status, body) = body_json(ApiError::Unauthorized).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Not authorized");
    }
}
