//! Field and cross-field validation rules for write shapes
//!
//! Single-field rules are declared with `validator` derive attributes on the
//! input shapes. Rules that relate two fields live in [`CrossFieldRules`]
//! implementations and are plain functions returning violations.

use crate::core::error::{FieldValidationError, ValidationError};
use validator::{Validate, ValidationErrorsKind};

/// Rules that look at more than one field of a record
pub trait CrossFieldRules {
    fn cross_field_violations(&self) -> Vec<FieldValidationError> {
        Vec::new()
    }
}

/// Violation(s) when two values are equal
///
/// Both fields are reported, with the same message.
pub fn must_differ(
    left: (&str, &str),
    right: (&str, &str),
    message: &str,
) -> Vec<FieldValidationError> {
    if left.1 == right.1 {
        vec![
            FieldValidationError::new(left.0, message),
            FieldValidationError::new(right.0, message),
        ]
    } else {
        Vec::new()
    }
}

/// Record-level violation when two values are equal
pub fn record_must_differ(
    record: &str,
    left: &str,
    right: &str,
    message: &str,
) -> Option<FieldValidationError> {
    (left == right).then(|| FieldValidationError::new(record, message))
}

/// Every field and cross-field violation of `record`
///
/// Field violations come first, sorted by field name, then cross-field
/// violations in the order the rules produced them.
pub fn collect_violations<T>(record: &T) -> Vec<FieldValidationError>
where
    T: Validate + CrossFieldRules,
{
    let mut violations = Vec::new();

    if let Err(errors) = record.validate() {
        for (field, kind) in errors.errors() {
            if let ValidationErrorsKind::Field(errors) = kind {
                let field = to_camel_case(&field.to_string());
                for error in errors {
                    let message = error
                        .message
                        .as_deref()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{} is invalid ({})", field, error.code));
                    violations.push(FieldValidationError::new(field.clone(), message));
                }
            }
        }
        violations.sort_by(|a, b| a.field.cmp(&b.field));
    }

    violations.extend(record.cross_field_violations());
    violations
}

/// Validate one record
pub fn validate_record<T>(record: &T) -> Result<(), ValidationError>
where
    T: Validate + CrossFieldRules,
{
    let violations = collect_violations(record);
    if violations.is_empty() {
        Ok(())
    } else {
        tracing::debug!(violations = violations.len(), "rejected request body");
        Err(ValidationError::FieldErrors(violations))
    }
}

/// Validate a list of records, prefixing fields with `[index].`
pub fn validate_all<T>(records: &[T]) -> Result<(), ValidationError>
where
    T: Validate + CrossFieldRules,
{
    let violations: Vec<FieldValidationError> = records
        .iter()
        .enumerate()
        .flat_map(|(index, record)| nested_violations(&format!("[{}]", index), record))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        tracing::debug!(violations = violations.len(), "rejected request body");
        Err(ValidationError::FieldErrors(violations))
    }
}

/// Violations of a nested record, with fields prefixed by `prefix.`
pub fn nested_violations<T>(prefix: &str, record: &T) -> Vec<FieldValidationError>
where
    T: Validate + CrossFieldRules,
{
    collect_violations(record)
        .into_iter()
        .map(|v| FieldValidationError::new(format!("{}.{}", prefix, v.field), v.message))
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Validate)]
    struct Signup {
        #[validate(length(equal = 4, message = "code must be exactly 4 characters"))]
        staff_code: String,
        #[validate(length(min = 1, max = 5, message = "nick must be 1 to 5 characters"))]
        nick: String,
    }

    impl CrossFieldRules for Signup {
        fn cross_field_violations(&self) -> Vec<FieldValidationError> {
            record_must_differ("Signup", &self.staff_code, &self.nick, "code must differ from nick")
                .into_iter()
                .collect()
        }
    }

    #[test]
    fn test_camel_case_conversion() {
        assert_eq!(to_camel_case("employee_no"), "employeeNo");
        assert_eq!(to_camel_case("firstName"), "firstName");
        assert_eq!(to_camel_case("date_of_birth"), "dateOfBirth");
    }

    #[test]
    fn test_valid_record() {
        let signup = Signup {
            staff_code: "A001".to_string(),
            nick: "ada".to_string(),
        };
        assert!(validate_record(&signup).is_ok());
    }

    #[test]
    fn test_field_rules_use_wire_names() {
        let signup = Signup {
            staff_code: "A1".to_string(),
            nick: String::new(),
        };
        let violations = collect_violations(&signup);
        assert_eq!(
            violations,
            vec![
                FieldValidationError::new("nick", "nick must be 1 to 5 characters"),
                FieldValidationError::new("staffCode", "code must be exactly 4 characters"),
            ]
        );
    }

    #[test]
    fn test_cross_field_rule_is_reported() {
        let signup = Signup {
            staff_code: "abcd".to_string(),
            nick: "abcd".to_string(),
        };
        match validate_record(&signup) {
            Err(ValidationError::FieldErrors(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "Signup");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_must_differ_reports_both_fields() {
        let violations = must_differ(("firstName", "Li"), ("lastName", "Li"), "same");
        assert_eq!(
            violations.iter().map(|v| v.field.as_str()).collect::<Vec<_>>(),
            vec!["firstName", "lastName"]
        );
        assert!(must_differ(("a", "x"), ("b", "y"), "same").is_empty());
    }

    #[test]
    fn test_validate_all_prefixes_index() {
        let signups = vec![
            Signup {
                staff_code: "A001".to_string(),
                nick: "ok".to_string(),
            },
            Signup {
                staff_code: "A1".to_string(),
                nick: "ok".to_string(),
            },
        ];
        match validate_all(&signups) {
            Err(ValidationError::FieldErrors(violations)) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].field, "[1].staffCode");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
