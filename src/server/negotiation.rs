//! Content negotiation on `Accept` and `Content-Type`
//!
//! Output shape and hypermedia are chosen from vendor media types such as
//! `application/vnd.company.full.hateoas+json`. Input shape for company
//! creation is chosen from the request's `Content-Type`.

use crate::core::error::{RequestError, RoutineError};
use axum::extract::FromRequestParts;
use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use mime::Mime;

/// Media type assumed when the client sends no `Accept` header
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Body media type for creating a company
pub const COMPANY_FOR_CREATION: &str = "application/vnd.company.companyforcreation+json";

/// Body media type for creating a company together with its bankrupt time
pub const COMPANY_FOR_CREATION_WITH_BANKRUPT_TIME: &str =
    "application/vnd.company.companyforcreationwithbankrupttime+json";

/// What the client asked to receive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputFormat {
    /// Full output shape instead of the friendly one
    pub full: bool,
    /// Wrap records with hypermedia links
    pub include_links: bool,
}

impl OutputFormat {
    /// Parse the first media range of an `Accept` header value
    ///
    /// `*/*` and `application/json` give the friendly shape without links.
    pub fn parse(accept: &str) -> Result<Self, RequestError> {
        let first = accept.split(',').next().unwrap_or_default().trim();
        let media: Mime = first.parse().map_err(|_| RequestError::InvalidMediaType {
            value: accept.to_string(),
        })?;

        // `subtype()` already excludes the `+json` suffix
        let subtype = media.subtype().as_str().to_ascii_lowercase();
        Ok(Self {
            full: subtype.contains("full"),
            include_links: subtype.ends_with("hateoas"),
        })
    }

    pub fn from_headers(headers: &HeaderMap) -> Result<Self, RequestError> {
        match headers.get(ACCEPT) {
            None => Self::parse(DEFAULT_MEDIA_TYPE),
            Some(value) => Self::parse(header_str(value)?),
        }
    }
}

impl<S> FromRequestParts<S> for OutputFormat
where
    S: Send + Sync,
{
    type Rejection = RoutineError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let format = OutputFormat::from_headers(&parts.headers)?;
        tracing::debug!(full = format.full, links = format.include_links, "negotiated output");
        Ok(format)
    }
}

/// Which input shape a company creation body uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyInputFormat {
    Standard,
    WithBankruptTime,
}

impl CompanyInputFormat {
    /// Pick the input shape from `Content-Type`; anything else is a 415
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, RequestError> {
        let value = headers
            .get(CONTENT_TYPE)
            .ok_or_else(|| RequestError::UnsupportedMediaType {
                content_type: "missing Content-Type".to_string(),
            })?;
        let raw = header_str(value).map_err(|_| unsupported(value))?;
        let media: Mime = raw.parse().map_err(|_| unsupported(value))?;

        let essence = media.essence_str().to_ascii_lowercase();
        match essence.as_str() {
            DEFAULT_MEDIA_TYPE | COMPANY_FOR_CREATION => Ok(Self::Standard),
            COMPANY_FOR_CREATION_WITH_BANKRUPT_TIME => Ok(Self::WithBankruptTime),
            _ => Err(RequestError::UnsupportedMediaType {
                content_type: raw.to_string(),
            }),
        }
    }
}

fn header_str(value: &HeaderValue) -> Result<&str, RequestError> {
    value.to_str().map_err(|_| RequestError::InvalidMediaType {
        value: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    })
}

fn unsupported(value: &HeaderValue) -> RequestError {
    RequestError::UnsupportedMediaType {
        content_type: String::from_utf8_lossy(value.as_bytes()).into_owned(),
    }
}
