//! HTTP handlers, one module per resource

pub mod collections;
pub mod companies;
pub mod employees;
pub mod root;

use crate::core::error::{Result, RoutineError};
use crate::core::paging::PaginationMetadata;
use crate::core::shaping::ShapedRecord;
use crate::models::LinkDto;
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the response header carrying page metadata
pub const PAGINATION_HEADER: &str = "x-pagination";

/// `?fields=` on single resource routes
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FieldsQuery {
    pub fields: Option<String>,
}

/// A shaped record with its `links` appended
pub(crate) fn with_links(record: &ShapedRecord, links: Vec<LinkDto>) -> Result<Value> {
    let mut value = to_json(record)?;
    if let Value::Object(map) = &mut value {
        map.insert("links".to_string(), to_json(&links)?);
    }
    Ok(value)
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| RoutineError::Internal(e.to_string()))
}

pub(crate) fn pagination_header(metadata: &PaginationMetadata) -> Result<HeaderValue> {
    let json = serde_json::to_string(metadata).map_err(|e| RoutineError::Internal(e.to_string()))?;
    HeaderValue::from_str(&json).map_err(|e| RoutineError::Internal(e.to_string()))
}

pub(crate) fn location(uri: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(uri).map_err(|e| RoutineError::Internal(e.to_string()))
}
