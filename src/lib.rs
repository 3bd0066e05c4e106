//! # Routine API
//!
//! A company/employee REST API built around a reusable query pipeline:
//! client supplied `orderBy`, `fields` and paging parameters are validated
//! against declared capabilities, compiled into a typed sort, applied to a
//! query source, sliced into a page and finally projected down to the
//! requested fields.
//!
//! ## Features
//!
//! - **Property mappings**: public sort keys mapped onto one or more
//!   storage fields, with optional direction reversal
//! - **Dynamic sorting**: multi-key, stable, validated before execution
//! - **Data shaping**: sparse, ordered projections of any [`core::Shape`]
//! - **Paging**: clamped page sizes and `X-Pagination` metadata
//! - **Content negotiation**: friendly/full shapes and HATEOAS links by
//!   `Accept` media type
//! - **JSON Patch**: partial employee updates with validation
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use routine::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_config(ApiConfig::default())
//!     .with_repository(InMemoryCompanyRepository::seeded())
//!     .build()?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod models;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Entity, FieldValue, MappingTable, PageRequest, PagedList, PaginationMetadata,
        PropertyMappingService, Query, QuerySource, RoutineError, Shape, ShapedRecord, SortKey,
        SortPlan, Validated, apply_sort, shape_collection, shape_data, shape_optional,
    };

    // === Macros ===
    pub use crate::{impl_entity, impl_shape};

    // === Models ===
    pub use crate::models::{
        Company, CompanyDto, CompanyFullDto, CompanyParameters, Employee, EmployeeDto,
        EmployeeParameters, Gender, property_mappings,
    };

    // === Storage ===
    pub use crate::storage::{CompanyRepository, InMemoryCompanyRepository};

    // === Config ===
    pub use crate::config::{ApiConfig, CachingConfig, PagingConfig, ServerConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use uuid::Uuid;
}
