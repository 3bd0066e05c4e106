//! Data shaping: projecting records onto a client chosen set of fields

use crate::core::entity::Shape;
use crate::core::error::ShapingError;
use crate::core::field::FieldValue;
use indexmap::IndexMap;
use serde::Serialize;

/// An ordered record of declared field names to values
///
/// Serializes as a plain JSON object whose keys keep the order in which
/// they were selected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShapedRecord(IndexMap<&'static str, FieldValue>);

impl ShapedRecord {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, field: &'static str, value: FieldValue) {
        self.0.insert(field, value);
    }
}

/// Split a comma separated selection into trimmed names
///
/// Returns `None` for a missing or blank selection, which means "every
/// field".
pub fn split_fields(fields: Option<&str>) -> Option<impl Iterator<Item = &str>> {
    let fields = fields.filter(|f| !f.trim().is_empty())?;
    Some(fields.split(',').map(str::trim))
}

/// Resolve a selection against `T`
///
/// A blank selection yields every field in declaration order; otherwise the
/// requested order is kept and names are matched case-insensitively.
pub fn resolve_fields<T: Shape>(fields: Option<&str>) -> Result<Vec<&'static str>, ShapingError> {
    match split_fields(fields) {
        None => Ok(T::field_names().to_vec()),
        Some(requested) => requested
            .map(|name| {
                T::resolve_field(name).ok_or_else(|| ShapingError::UnknownField {
                    field: name.to_string(),
                    shape: T::shape_name(),
                })
            })
            .collect(),
    }
}

fn project<T: Shape>(source: &T, selected: &[&'static str]) -> ShapedRecord {
    let mut record = ShapedRecord::default();
    for &field in selected {
        record.insert(field, source.field_value(field).unwrap_or(FieldValue::Null));
    }
    record
}

/// Shape a single record
pub fn shape_data<T: Shape>(source: &T, fields: Option<&str>) -> Result<ShapedRecord, ShapingError> {
    let selected = resolve_fields::<T>(fields)?;
    Ok(project(source, &selected))
}

/// Shape a record that may be missing
pub fn shape_optional<T: Shape>(
    source: Option<&T>,
    fields: Option<&str>,
) -> Result<ShapedRecord, ShapingError> {
    let source = source.ok_or(ShapingError::MissingSource {
        shape: T::shape_name(),
    })?;
    shape_data(source, fields)
}

/// Shape every record of a collection
///
/// The selection is resolved once; an empty collection with a bad
/// selection still fails.
pub fn shape_collection<T: Shape>(
    source: &[T],
    fields: Option<&str>,
) -> Result<Vec<ShapedRecord>, ShapingError> {
    let selected = resolve_fields::<T>(fields)?;
    Ok(source.iter().map(|item| project(item, &selected)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[derive(Clone)]
    struct Card {
        id: Uuid,
        name: String,
        age: i32,
    }

    crate::impl_shape!(Card, "Card", {
        id => "id",
        name => "name",
        age => "age",
    });

    fn card() -> Card {
        Card {
            id: Uuid::nil(),
            name: "Ada Lovelace".to_string(),
            age: 36,
        }
    }

    #[test]
    fn test_blank_selection_keeps_every_field_in_order() {
        let record = shape_data(&card(), None).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "name", "age"]);

        let record = shape_data(&card(), Some("  ")).unwrap();
        assert_eq!(record.len(), 3);
    }

    #[test]
    fn test_selection_keeps_requested_order() {
        let record = shape_data(&card(), Some("Name,Id")).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["name", "id"]);

        let record = shape_data(&card(), Some("id, NAME")).unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["id", "name"]);
        assert_eq!(record.get("name"), Some(&FieldValue::from("Ada Lovelace")));
        assert!(record.get("age").is_none());
    }

    #[test]
    fn test_serializes_in_selected_order() {
        let record = shape_data(&card(), Some("age,name")).unwrap();
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"age":36,"name":"Ada Lovelace"}"#
        );
    }

    #[test]
    fn test_unknown_field_fails() {
        let err = shape_data(&card(), Some("name,salary")).unwrap_err();
        assert!(matches!(
            err,
            ShapingError::UnknownField { ref field, shape: "Card" } if field == "salary"
        ));
    }

    #[test]
    fn test_missing_source_fails() {
        let err = shape_optional::<Card>(None, None).unwrap_err();
        assert!(matches!(err, ShapingError::MissingSource { shape: "Card" }));
        assert!(shape_optional(Some(&card()), Some("id")).is_ok());
    }

    #[test]
    fn test_collection_shapes_every_item() {
        let cards = vec![card(), card()];
        let records = shape_collection(&cards, Some("age")).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.keys().eq(["age"])));

        let empty: Vec<Card> = Vec::new();
        assert!(shape_collection(&empty, Some("bogus")).is_err());
        assert!(shape_collection(&empty, None).unwrap().is_empty());
    }
}
