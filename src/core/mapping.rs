//! Property mapping between output shapes and storage entities
//!
//! A client sorts by the names it sees on the wire (`Name`, `Age`), while the
//! query can only order by real entity fields (`firstName`, `dateOfBirth`).
//! A [`MappingTable`] translates one into the other, and the
//! [`PropertyMappingService`] keeps one table per (shape, entity) pair.

use crate::core::entity::Shape;
use crate::core::error::{ConfigError, MappingError, ValidationError};
use crate::core::field::FieldValue;
use crate::core::sort::{SortKey, is_blank};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Reads one entity field as a comparable value
pub type FieldAccessor<E> = Arc<dyn Fn(&E) -> FieldValue + Send + Sync>;

/// One row of a mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    source_field: String,
    target_fields: Vec<&'static str>,
    reverse_direction: bool,
}

impl FieldMapping {
    /// The client facing name, as registered
    pub fn source_field(&self) -> &str {
        &self.source_field
    }

    /// Entity fields to order by, in priority order
    pub fn target_fields(&self) -> &[&'static str] {
        &self.target_fields
    }

    /// Whether the natural order of the source is the reverse of the targets
    pub fn reverse_direction(&self) -> bool {
        self.reverse_direction
    }
}

/// Mapping from source names to entity fields for one entity type
///
/// Source lookups are case-insensitive. Every target field was resolved
/// against `E` when the table was built, so it always has an accessor.
pub struct MappingTable<E> {
    entries: Vec<FieldMapping>,
    accessors: HashMap<&'static str, FieldAccessor<E>>,
}

impl<E> fmt::Debug for MappingTable<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingTable")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

impl<E: Shape + 'static> MappingTable<E> {
    pub fn builder() -> MappingTableBuilder<E> {
        MappingTableBuilder::new()
    }

    /// Look up an entry by source name, ignoring case
    pub fn get(&self, source_field: &str) -> Option<&FieldMapping> {
        let source_field = source_field.trim();
        self.entries
            .iter()
            .find(|entry| entry.source_field.eq_ignore_ascii_case(source_field))
    }

    pub fn contains(&self, source_field: &str) -> bool {
        self.get(source_field).is_some()
    }

    pub fn entries(&self) -> &[FieldMapping] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accessor for a target field resolved at build time
    pub fn accessor(&self, target_field: &str) -> Option<&FieldAccessor<E>> {
        self.accessors.get(target_field)
    }

    /// The first clause of `order_by` whose key is not in the table
    ///
    /// A blank expression has no unknown key.
    pub fn first_unknown_key(&self, order_by: Option<&str>) -> Option<String> {
        if is_blank(order_by) {
            return None;
        }
        let order_by = order_by?;
        order_by
            .split(',')
            .map(SortKey::parse)
            .find(|key| !self.contains(&key.property_name))
            .map(|key| key.property_name)
    }

    pub fn is_valid_sort_expression(&self, order_by: Option<&str>) -> bool {
        self.first_unknown_key(order_by).is_none()
    }
}

/// Builder for [`MappingTable`]
///
/// ```rust,ignore
/// let table = MappingTable::<Employee>::builder()
///     .map("Id", ["id"])
///     .map("Name", ["firstName", "lastName"])
///     .map_reversed("Age", ["dateOfBirth"])
///     .build()?;
/// ```
pub struct MappingTableBuilder<E> {
    entries: Vec<(String, Vec<String>, bool)>,
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E: Shape + 'static> MappingTableBuilder<E> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            _entity: std::marker::PhantomData,
        }
    }

    /// Map a source name onto one or more entity fields
    pub fn map<I, S>(self, source_field: &str, target_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(source_field, target_fields, false)
    }

    /// Same as [`map`](Self::map), with the direction inverted
    pub fn map_reversed<I, S>(self, source_field: &str, target_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.push(source_field, target_fields, true)
    }

    fn push<I, S>(mut self, source_field: &str, target_fields: I, reverse: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries.push((
            source_field.trim().to_string(),
            target_fields.into_iter().map(Into::into).collect(),
            reverse,
        ));
        self
    }

    /// Resolve every target against `E` and bind its accessor
    pub fn build(self) -> Result<MappingTable<E>, ConfigError> {
        let mut entries: Vec<FieldMapping> = Vec::with_capacity(self.entries.len());
        let mut accessors: HashMap<&'static str, FieldAccessor<E>> = HashMap::new();

        for (source_field, targets, reverse_direction) in self.entries {
            if source_field.is_empty() {
                return Err(ConfigError::InvalidMapping {
                    source_field,
                    message: "source name must not be empty".to_string(),
                });
            }
            if entries
                .iter()
                .any(|entry| entry.source_field.eq_ignore_ascii_case(&source_field))
            {
                return Err(ConfigError::InvalidMapping {
                    source_field,
                    message: "source name is mapped twice".to_string(),
                });
            }
            if targets.is_empty() {
                return Err(ConfigError::InvalidMapping {
                    source_field,
                    message: "at least one target field is required".to_string(),
                });
            }

            let mut target_fields = Vec::with_capacity(targets.len());
            for target in &targets {
                let Some(declared) = E::resolve_field(target) else {
                    return Err(ConfigError::InvalidMapping {
                        source_field,
                        message: format!("{} has no field '{}'", E::shape_name(), target),
                    });
                };
                accessors.entry(declared).or_insert_with(|| {
                    Arc::new(move |entity: &E| {
                        entity.field_value(declared).unwrap_or(FieldValue::Null)
                    })
                });
                target_fields.push(declared);
            }

            entries.push(FieldMapping {
                source_field,
                target_fields,
                reverse_direction,
            });
        }

        Ok(MappingTable { entries, accessors })
    }
}

/// Registry of mapping tables keyed by (source shape, storage entity)
#[derive(Default)]
pub struct PropertyMappingService {
    tables: HashMap<(TypeId, TypeId), Box<dyn Any + Send + Sync>>,
}

impl fmt::Debug for PropertyMappingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyMappingService")
            .field("tables", &self.tables.len())
            .finish()
    }
}

impl PropertyMappingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the table used to sort `S` shaped results over `E`
    pub fn register<S, E>(&mut self, table: MappingTable<E>) -> Result<(), ConfigError>
    where
        S: Shape + 'static,
        E: Shape + Send + Sync + 'static,
    {
        let key = (TypeId::of::<S>(), TypeId::of::<E>());
        if self.tables.contains_key(&key) {
            return Err(ConfigError::DuplicateMapping {
                source_shape: S::shape_name(),
                storage: E::shape_name(),
            });
        }

        tracing::debug!(
            source_shape = S::shape_name(),
            storage = E::shape_name(),
            entries = table.len(),
            "registered property mapping"
        );
        self.tables.insert(key, Box::new(table));
        Ok(())
    }

    /// Fetch the table for a registered pair
    pub fn get_mapping<S, E>(&self) -> Result<&MappingTable<E>, MappingError>
    where
        S: Shape + 'static,
        E: Shape + Send + Sync + 'static,
    {
        self.tables
            .get(&(TypeId::of::<S>(), TypeId::of::<E>()))
            .and_then(|table| table.downcast_ref::<MappingTable<E>>())
            .ok_or(MappingError::NotRegistered {
                source_shape: S::shape_name(),
                storage: E::shape_name(),
            })
    }

    /// Whether every clause of `order_by` names a mapped key
    ///
    /// Blank expressions are valid. Asking about an unregistered pair is an
    /// error, not `false`.
    pub fn is_valid_sort_expression<S, E>(&self, order_by: Option<&str>) -> Result<bool, MappingError>
    where
        S: Shape + 'static,
        E: Shape + Send + Sync + 'static,
    {
        Ok(self.get_mapping::<S, E>()?.is_valid_sort_expression(order_by))
    }

    /// Like [`is_valid_sort_expression`](Self::is_valid_sort_expression), but
    /// names the offending key
    pub fn validate_sort_expression<S, E>(
        &self,
        order_by: Option<&str>,
    ) -> crate::core::error::Result<()>
    where
        S: Shape + 'static,
        E: Shape + Send + Sync + 'static,
    {
        match self.get_mapping::<S, E>()?.first_unknown_key(order_by) {
            Some(field) => {
                tracing::debug!(field = %field, "rejected sort expression");
                Err(ValidationError::InvalidSortExpression { field }.into())
            }
            None => Ok(()),
        }
    }
}
