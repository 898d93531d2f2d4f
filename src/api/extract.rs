//! Request extractors with application-level rejections.

use crate::types::AppError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

/// JSON body extractor whose rejection is [`AppError::InvalidInput`], so a
/// malformed body gets the same generic error shape as every other failure
/// (400, detail only in the log) instead of axum's verbose default.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::InvalidInput(rejection.body_text())),
        }
    }
}
