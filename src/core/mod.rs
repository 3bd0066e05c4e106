//! Core module containing the shaping, sorting and paging machinery

pub mod entity;
pub mod error;
pub mod field;
pub mod mapping;
pub mod paging;
pub mod query;
pub mod shaping;
pub mod sort;
pub mod validation;

pub use entity::{Entity, Shape};
pub use error::{
    ConfigError, EntityError, FieldValidationError, MappingError, RequestError, Result,
    RoutineError, ShapingError, ValidationError,
};
pub use field::FieldValue;
pub use mapping::{FieldMapping, MappingTable, PropertyMappingService};
pub use paging::{PageRequest, PagedList, PaginationMetadata};
pub use query::{Query, QuerySource};
pub use shaping::{ShapedRecord, shape_collection, shape_data, shape_optional};
pub use sort::{SortKey, SortPlan, apply_sort};
pub use validation::{CrossFieldRules, Validated, check_fields, type_has_properties};
