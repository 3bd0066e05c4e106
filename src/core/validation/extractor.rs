//! Axum extractor for validated request bodies
//!
//! `Validated<T>` deserializes a JSON body into `T` and runs its field and
//! cross-field rules before the handler sees it. Malformed JSON is a 400,
//! rule violations are a 422.

use super::rules::{CrossFieldRules, validate_record};
use crate::core::error::{RequestError, RoutineError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor that deserializes and validates a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_employee(
///     Validated(payload): Validated<EmployeeAddDto>,
/// ) -> Result<Response> {
///     // payload already passed every rule
/// }
/// ```
#[derive(Debug)]
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + CrossFieldRules + Send,
{
    type Rejection = RoutineError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        validate_record(&payload)?;
        Ok(Validated(payload))
    }
}

fn json_rejection(rejection: JsonRejection) -> RoutineError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => RequestError::UnsupportedMediaType {
            content_type: "missing or non-JSON Content-Type".to_string(),
        }
        .into(),
        other => ValidationError::InvalidJson {
            message: other.body_text(),
        }
        .into(),
    }
}

/// Deserialize and validate a raw body
///
/// Used where the handler has to pick the target type itself, e.g. from the
/// request's `Content-Type`.
pub fn parse_validated<T>(body: &[u8]) -> Result<T, RoutineError>
where
    T: DeserializeOwned + Validate + CrossFieldRules,
{
    let payload: T = serde_json::from_slice(body).map_err(|e| ValidationError::InvalidJson {
        message: e.to_string(),
    })?;
    validate_record(&payload)?;
    Ok(payload)
}
