//! Typed error handling for the routine API
//!
//! Errors fall into two families that must not be confused:
//!
//! - client input errors (bad `orderBy`, bad `fields`, malformed ids, body
//!   validation failures) which surface as 4xx responses, and
//! - programming errors (an unregistered mapping pair, an unvalidated sort
//!   key or field name reaching the compiler or the shaper) which surface
//!   as 500 responses.
//!
//! # Error Categories
//!
//! - [`MappingError`]: property mapping lookups and sort compilation
//! - [`ShapingError`]: data shaping
//! - [`ValidationError`]: client input and body validation
//! - [`RequestError`]: HTTP level problems (headers, path binders)
//! - [`EntityError`]: missing companies and employees
//! - [`ConfigError`]: configuration and startup registration
//!
//! # Example
//!
//! ```rust,ignore
//! match registry.get_mapping::<EmployeeDto, Employee>() {
//!     Ok(table) => { /* ... */ }
//!     Err(MappingError::NotRegistered { .. }) => { /* wiring bug */ }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use uuid::Uuid;

/// Result alias used across the crate
pub type Result<T, E = RoutineError> = std::result::Result<T, E>;

/// The main error type for the routine API
#[derive(Debug, thiserror::Error)]
pub enum RoutineError {
    /// Property mapping errors
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// Data shaping errors
    #[error(transparent)]
    Shaping(#[from] ShapingError),

    /// Client input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// HTTP/Request errors
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Entity lookup errors
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RoutineError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RoutineError::Mapping(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RoutineError::Shaping(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RoutineError::Validation(e) => e.status_code(),
            RoutineError::Request(e) => e.status_code(),
            RoutineError::Entity(e) => e.status_code(),
            RoutineError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RoutineError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RoutineError::Mapping(e) => e.error_code(),
            RoutineError::Shaping(e) => e.error_code(),
            RoutineError::Validation(e) => e.error_code(),
            RoutineError::Request(e) => e.error_code(),
            RoutineError::Entity(e) => e.error_code(),
            RoutineError::Config(_) => "CONFIG_ERROR",
            RoutineError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error is the caller's fault rather than a defect
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RoutineError::Entity(
                EntityError::NotFound { entity_type, id } | EntityError::Conflict { entity_type, id },
            ) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            RoutineError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            RoutineError::Validation(ValidationError::InvalidSortExpression { field }) => {
                Some(serde_json::json!({ "field": field }))
            }
            RoutineError::Validation(ValidationError::InvalidFields { field, shape }) => {
                Some(serde_json::json!({ "field": field, "shape": shape }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RoutineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Mapping Errors
// =============================================================================

/// Errors raised by the property mapping registry and the sort compiler.
///
/// Both variants indicate a defect in the calling code: lookups must only
/// use registered pairs, and sort expressions must be validated first.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// No table was registered for the (shape, entity) pair
    #[error("No property mapping registered for {source_shape} -> {storage}")]
    NotRegistered {
        source_shape: &'static str,
        storage: &'static str,
    },

    /// A sort clause named a key missing from the table
    #[error("No property mapping found for sort key '{key}'")]
    UnknownSortKey { key: String },
}

impl MappingError {
    pub fn error_code(&self) -> &'static str {
        match self {
            MappingError::NotRegistered { .. } => "MAPPING_NOT_REGISTERED",
            MappingError::UnknownSortKey { .. } => "UNKNOWN_SORT_KEY",
        }
    }
}

// =============================================================================
// Shaping Errors
// =============================================================================

/// Errors raised by the data shaper
#[derive(Debug, thiserror::Error)]
pub enum ShapingError {
    /// Nothing was supplied to shape
    #[error("Cannot shape a missing {shape}")]
    MissingSource { shape: &'static str },

    /// A requested field does not exist on the shape
    #[error("Property '{field}' was not found on {shape}")]
    UnknownField { field: String, shape: &'static str },
}

impl ShapingError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ShapingError::MissingSource { .. } => "SHAPING_MISSING_SOURCE",
            ShapingError::UnknownField { .. } => "UNKNOWN_SHAPE_FIELD",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to client input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The `orderBy` expression names an unknown property
    #[error("Cannot sort by unknown property '{field}'")]
    InvalidSortExpression { field: String },

    /// The `fields` selection names an unknown property
    #[error("Property '{field}' does not exist on {shape}")]
    InvalidFields { field: String, shape: &'static str },

    /// Body validation failed on one or more fields
    #[error("Validation errors: {}", join_violations(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// A JSON Patch document could not be applied
    #[error("Invalid JSON Patch: {message}")]
    InvalidPatch { message: String },

    /// Paging arguments outside their domain
    #[error("Invalid page request: {message}")]
    InvalidPage { message: String },

    /// A list filter has a value outside its domain
    #[error("Invalid value '{value}' for filter '{parameter}'")]
    InvalidFilter { parameter: String, value: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn join_violations(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidSortExpression { .. } => "INVALID_ORDER_BY",
            ValidationError::InvalidFields { .. } => "INVALID_FIELDS",
            ValidationError::FieldErrors(_) => "VALIDATION_FAILED",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            ValidationError::InvalidPatch { .. } => "INVALID_JSON_PATCH",
            ValidationError::InvalidPage { .. } => "INVALID_PAGE",
            ValidationError::InvalidFilter { .. } => "INVALID_FILTER",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// The Accept header could not be parsed as a media type
    #[error("Invalid media type: '{value}'")]
    InvalidMediaType { value: String },

    /// The request body has a Content-Type this route does not consume
    #[error("Unsupported media type: '{content_type}'")]
    UnsupportedMediaType { content_type: String },

    /// A comma separated id list contained something that is not a UUID
    #[error("Invalid id list: '{value}'")]
    InvalidIdList { value: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidMediaType { .. } => StatusCode::BAD_REQUEST,
            RequestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            RequestError::InvalidIdList { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidMediaType { .. } => "INVALID_MEDIA_TYPE",
            RequestError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
            RequestError::InvalidIdList { .. } => "INVALID_ID_LIST",
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: &'static str, id: Uuid },

    /// Some ids of a requested collection do not exist
    #[error("Only {found} of {requested} requested {entity_type} exist")]
    CollectionIncomplete {
        entity_type: &'static str,
        requested: usize,
        found: usize,
    },

    /// The id is already taken by another record
    #[error("{entity_type} with id '{id}' already exists")]
    Conflict { entity_type: &'static str, id: Uuid },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::CollectionIncomplete { .. } => StatusCode::NOT_FOUND,
            EntityError::Conflict { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::CollectionIncomplete { .. } => "COLLECTION_INCOMPLETE",
            EntityError::Conflict { .. } => "ENTITY_CONFLICT",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration and startup registration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to parse configuration file
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },

    /// A mapping table was registered twice for the same pair
    #[error("Property mapping for {source_shape} -> {storage} is already registered")]
    DuplicateMapping {
        source_shape: &'static str,
        storage: &'static str,
    },

    /// A mapping table entry is malformed
    #[error("Invalid property mapping '{source_field}': {message}")]
    InvalidMapping {
        source_field: String,
        message: String,
    },
}
