//! Validation of client input
//!
//! - [`properties`]: `fields` selections against a shape
//! - [`rules`]: field and cross-field rules for write shapes
//! - [`extractor`]: the `Validated<T>` body extractor

pub mod extractor;
pub mod properties;
pub mod rules;

pub use extractor::{Validated, parse_validated};
pub use properties::{check_fields, type_has_properties};
pub use rules::{CrossFieldRules, validate_all, validate_record};
