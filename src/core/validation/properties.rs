//! Checks that a `fields` selection only names existing properties

use crate::core::entity::Shape;
use crate::core::error::ValidationError;
use crate::core::shaping::split_fields;

/// The first name in `fields` that `T` does not have
pub fn first_unknown_field<T: Shape>(fields: Option<&str>) -> Option<String> {
    split_fields(fields)?
        .find(|name| T::resolve_field(name).is_none())
        .map(str::to_string)
}

/// Whether every name in `fields` is a property of `T`
///
/// A missing or blank selection always passes.
pub fn type_has_properties<T: Shape>(fields: Option<&str>) -> bool {
    first_unknown_field::<T>(fields).is_none()
}

/// Same as [`type_has_properties`], naming the offending field
pub fn check_fields<T: Shape>(fields: Option<&str>) -> Result<(), ValidationError> {
    match first_unknown_field::<T>(fields) {
        Some(field) => {
            tracing::debug!(field = %field, shape = T::shape_name(), "rejected field selection");
            Err(ValidationError::InvalidFields {
                field,
                shape: T::shape_name(),
            })
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Badge {
        id: i64,
        holder_name: String,
    }

    crate::impl_shape!(Badge, "Badge", {
        id => "id",
        holder_name => "holderName",
    });

    #[test]
    fn test_blank_selection_passes() {
        assert!(type_has_properties::<Badge>(None));
        assert!(type_has_properties::<Badge>(Some("")));
        assert!(type_has_properties::<Badge>(Some("   ")));
    }

    #[test]
    fn test_names_are_case_insensitive_and_trimmed() {
        assert!(type_has_properties::<Badge>(Some("ID, HolderName")));
        assert!(type_has_properties::<Badge>(Some("holdername")));
    }

    #[test]
    fn test_any_unknown_name_fails() {
        assert!(!type_has_properties::<Badge>(Some("id,colour")));
        assert!(!type_has_properties::<Badge>(Some("id,")));

        let err = check_fields::<Badge>(Some("id,colour,size")).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFields { ref field, shape: "Badge" } if field == "colour"
        ));
    }
}
