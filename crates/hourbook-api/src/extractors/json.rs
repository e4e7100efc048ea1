//! JSON body extractor that runs `validator` rules before the handler.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

use hourbook_core::error::AppError;

use crate::error::ApiError;

/// Like [`Json`], but malformed bodies and failed field rules both
/// become `400 VALIDATION_ERROR` in the standard error envelope.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        if let Err(errors) = value.validate() {
            let details = serde_json::to_value(&errors).unwrap_or_default();
            return Err(ApiError::from(AppError::validation(format!(
                "Invalid request: {errors}"
            )))
            .with_details(details));
        }

        Ok(ValidatedJson(value))
    }
}
