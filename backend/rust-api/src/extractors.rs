use axum::{
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

use crate::error::ClubError;

/// JSON body extractor that rejects malformed bodies and failed presence
/// checks with the API's own error shape.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => value,
            Err(rejection) => {
                let message = format!("Failed to parse JSON request body: {}", rejection);
                tracing::warn!("{}", message);
                return Err(ClubError::Validation(message).into_response());
            }
        };

        if let Err(e) = value.validate() {
            tracing::debug!("Request validation failed: {}", e);
            return Err(ClubError::from(e).into_response());
        }

        Ok(AppJson(value))
    }
}
