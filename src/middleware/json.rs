//! JSON body extraction that fails inside the envelope.
//!
//! Axum's stock `Json` rejection answers with a bare-text 400/415/422,
//! which would break the "every response is enveloped" contract. `AppJson`
//! wraps it and routes rejections through `ApiError::Validation` instead.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::{ApiError, FieldError};

pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "rejecting request body");
                Err(ApiError::Validation(vec![FieldError::new(
                    "body",
                    body_message(&rejection),
                )]))
            }
        }
    }
}

fn body_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Request body must be JSON (Content-Type: application/json)"
        }
        _ => "Request body is not valid JSON for this endpoint",
    }
}
