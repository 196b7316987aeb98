//! JSON body extractor that reports failures in the `ApiResponse` envelope

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use shared::error::AppError;

/// Like [`Json`], but a malformed body becomes a validation `AppError`
/// naming the offending field when one can be identified.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_error(rejection)),
        }
    }
}

fn json_error(rejection: JsonRejection) -> AppError {
    let message = rejection.body_text();
    let field = match rejection {
        JsonRejection::JsonDataError(_) => offending_field(&message),
        _ => None,
    };
    tracing::debug!(%message, "Rejected request body");
    match field {
        Some(field) => AppError::validation(message).with_detail("field", field),
        None => AppError::validation(message),
    }
}

/// Field path from a body deserialization message
///
/// Handles `"...target type: date: input contains invalid characters ..."`
/// and `"...target type: missing field `date` at ..."`.
fn offending_field(message: &str) -> Option<String> {
    let detail = message.split_once("target type: ")?.1;
    if let Some(rest) = detail.strip_prefix("missing field `") {
        return rest.split_once('`').map(|(field, _)| field.to_string());
    }
    let (path, _) = detail.split_once(": ")?;
    let is_path = !path.is_empty()
        && path
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| path.to_string())
}
