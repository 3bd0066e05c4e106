//! Traits describing introspectable shapes and storage entities

use crate::core::field::FieldValue;
use uuid::Uuid;

/// A type whose public fields can be enumerated and read by name.
///
/// This is the static replacement for runtime property reflection: the
/// shaper and the property checker only ever see a type through this trait.
/// Implementations are normally generated with [`impl_shape!`](crate::impl_shape).
///
/// Field names are the declared (wire) names; lookups through
/// [`Shape::field_value`] are exact, lookups through
/// [`Shape::resolve_field`] are case-insensitive.
pub trait Shape {
    /// Human readable name of the shape, used in error messages
    fn shape_name() -> &'static str;

    /// All public fields, in declaration order
    fn field_names() -> &'static [&'static str];

    /// Read the current value of a field by its declared name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Resolve a client supplied name to the declared field name
    fn resolve_field(name: &str) -> Option<&'static str> {
        let name = name.trim();
        Self::field_names()
            .iter()
            .copied()
            .find(|declared| declared.eq_ignore_ascii_case(name))
    }
}

/// Base trait for storage entities.
///
/// Entities are shapes too, which is what lets a mapping table bind its
/// target field names to typed accessors at startup.
pub trait Entity: Shape + Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g. "companies")
    fn resource_name() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;
}
