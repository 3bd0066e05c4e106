//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Client input errors map to 4xx and defects map to 500
//! - Error responses carry a stable code and useful details
//! - Leaf errors convert into the top-level error

use axum::http::StatusCode;
use axum::response::IntoResponse;
use routine::core::error::{
    ConfigError, EntityError, FieldValidationError, MappingError, RequestError, RoutineError,
    ShapingError, ValidationError,
};
use uuid::Uuid;

// =============================================================================
// HTTP Status Code Tests
// =============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_entity_not_found_returns_404() {
        let err = RoutineError::Entity(EntityError::NotFound {
            entity_type: "Company",
            id: Uuid::new_v4(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_incomplete_collection_returns_404() {
        let err = RoutineError::Entity(EntityError::CollectionIncomplete {
            entity_type: "companies",
            requested: 3,
            found: 2,
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_taken_id_returns_409() {
        let err = RoutineError::Entity(EntityError::Conflict {
            entity_type: "Employee",
            id: Uuid::new_v4(),
        });
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.error_code(), "ENTITY_CONFLICT");
    }

    #[test]
    fn test_bad_query_parameters_return_400() {
        let sort = RoutineError::from(ValidationError::InvalidSortExpression {
            field: "salary".to_string(),
        });
        let fields = RoutineError::from(ValidationError::InvalidFields {
            field: "salary".to_string(),
            shape: "EmployeeDto",
        });
        let filter = RoutineError::from(ValidationError::InvalidFilter {
            parameter: "genderDisplay".to_string(),
            value: "robot".to_string(),
        });
        assert_eq!(sort.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(fields.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(filter.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_body_violations_return_422() {
        let err = RoutineError::from(ValidationError::FieldErrors(vec![FieldValidationError::new(
            "employeeNo",
            "employeeNo must be exactly 4 characters",
        )]));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_request_errors() {
        let media = RoutineError::from(RequestError::InvalidMediaType {
            value: "nonsense".to_string(),
        });
        let unsupported = RoutineError::from(RequestError::UnsupportedMediaType {
            content_type: "text/plain".to_string(),
        });
        let ids = RoutineError::from(RequestError::InvalidIdList {
            value: "(1,2)".to_string(),
        });
        assert_eq!(media.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(unsupported.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(ids.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_programming_errors_return_500() {
        let unregistered = RoutineError::from(MappingError::NotRegistered {
            source_shape: "CompanyDto",
            storage: "Company",
        });
        let unknown_key = RoutineError::from(MappingError::UnknownSortKey {
            key: "salary".to_string(),
        });
        let unknown_field = RoutineError::from(ShapingError::UnknownField {
            field: "salary".to_string(),
            shape: "EmployeeDto",
        });
        let config = RoutineError::from(ConfigError::DuplicateMapping {
            source_shape: "EmployeeDto",
            storage: "Employee",
        });

        for err in [unregistered, unknown_key, unknown_field, config] {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
            assert!(!err.is_client_error());
        }
    }
}

// =============================================================================
// Error Response Format Tests
// =============================================================================

mod response_format_tests {
    use super::*;

    #[test]
    fn test_not_found_details() {
        let id = Uuid::new_v4();
        let response = RoutineError::Entity(EntityError::NotFound {
            entity_type: "Employee",
            id,
        })
        .to_response();

        assert_eq!(response.code, "ENTITY_NOT_FOUND");
        assert!(response.message.contains(&id.to_string()));
        let details = response.details.unwrap();
        assert_eq!(details["entity_type"], "Employee");
    }

    #[test]
    fn test_field_errors_are_listed() {
        let response = RoutineError::from(ValidationError::FieldErrors(vec![
            FieldValidationError::new("firstName", "first name and last name must differ"),
            FieldValidationError::new("lastName", "first name and last name must differ"),
        ]))
        .to_response();

        assert_eq!(response.code, "VALIDATION_FAILED");
        let fields = response.details.unwrap()["fields"].as_array().unwrap().clone();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1]["field"], "lastName");
    }

    #[test]
    fn test_sort_error_names_the_field() {
        let response = RoutineError::from(ValidationError::InvalidSortExpression {
            field: "salary".to_string(),
        })
        .to_response();
        assert_eq!(response.code, "INVALID_ORDER_BY");
        assert_eq!(response.details.unwrap()["field"], "salary");
    }

    #[tokio::test]
    async fn test_into_response_writes_json_body() {
        let response = RoutineError::from(RequestError::InvalidIdList {
            value: "(nope)".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "INVALID_ID_LIST");
        assert!(body.get("details").is_none());
    }
}

// =============================================================================
// Error Matching Tests
// =============================================================================

mod matching_tests {
    use super::*;

    fn lookup(registered: bool) -> Result<(), RoutineError> {
        if registered {
            Ok(())
        } else {
            Err(MappingError::NotRegistered {
                source_shape: "EmployeeDto",
                storage: "Employee",
            }
            .into())
        }
    }

    #[test]
    fn test_match_on_category() {
        match lookup(false) {
            Err(RoutineError::Mapping(MappingError::NotRegistered { storage, .. })) => {
                assert_eq!(storage, "Employee");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(lookup(true).is_ok());
    }

    #[test]
    fn test_internal_error_message() {
        let err = RoutineError::Internal("lock poisoned".to_string());
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.to_string(), "Internal error: lock poisoned");
    }
}
