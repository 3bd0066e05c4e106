//! Macros for reducing boilerplate when declaring shapes
//!
//! These macros generate the field introspection code that the data shaper,
//! the property checker and the mapping tables rely on.

/// Implement [`Shape`](crate::core::entity::Shape) for a struct
///
/// Each entry maps a Rust field to its declared (wire) name. The order of
/// the entries is the order used when a client asks for "all fields".
/// Every listed field must convert into a
/// [`FieldValue`](crate::core::field::FieldValue) via `From`.
///
/// # Example
///
/// ```rust,ignore
/// use routine::prelude::*;
///
/// #[derive(Clone, Serialize)]
/// pub struct CompanyDto {
///     pub id: Uuid,
///     pub name: String,
/// }
///
/// impl_shape!(CompanyDto, "CompanyDto", {
///     id => "id",
///     name => "name",
/// });
///
/// assert_eq!(CompanyDto::field_names(), &["id", "name"]);
/// ```
#[macro_export]
macro_rules! impl_shape {
    (
        $type:ty,
        $shape_name:expr,
        {
            $( $field:ident => $declared:literal ),* $(,)?
        }
    ) => {
        impl $crate::core::entity::Shape for $type {
            fn shape_name() -> &'static str {
                $shape_name
            }

            fn field_names() -> &'static [&'static str] {
                &[ $( $declared ),* ]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    $( $declared => Some($crate::core::field::FieldValue::from(self.$field.clone())), )*
                    _ => None,
                }
            }
        }
    };
}

/// Implement [`Entity`](crate::core::entity::Entity) on top of an existing
/// [`Shape`](crate::core::entity::Shape) implementation
///
/// # Example
///
/// ```rust,ignore
/// impl_entity!(Company, "companies");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ty, $resource_name:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $resource_name
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }
        }
    };
}
