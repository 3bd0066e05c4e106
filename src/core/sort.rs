//! Sort expression parsing and compilation
//!
//! An `orderBy` expression is a comma separated list of clauses, each a
//! property name optionally followed by ` desc`. Clauses are translated
//! through a [`MappingTable`] into ordering terms over entity fields and
//! applied as one stable, multi-key ordering.

use crate::core::error::MappingError;
use crate::core::field::FieldValue;
use crate::core::mapping::{FieldAccessor, MappingTable};
use crate::core::entity::Shape;
use crate::core::query::Query;
use std::cmp::Ordering;
use std::fmt;

const DESC_SUFFIX: &str = " desc";

/// True for a missing, empty or whitespace-only expression
pub fn is_blank(expr: Option<&str>) -> bool {
    expr.is_none_or(|expr| expr.trim().is_empty())
}

/// One parsed clause of an `orderBy` expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub property_name: String,
    pub descending: bool,
}

impl SortKey {
    /// Parse a single clause
    ///
    /// The clause is trimmed; it is descending when it ends with ` desc`
    /// (any case), and its property name is everything before the first
    /// space.
    pub fn parse(clause: &str) -> Self {
        let clause = clause.trim();
        let descending = clause.len() >= DESC_SUFFIX.len()
            && clause
                .get(clause.len() - DESC_SUFFIX.len()..)
                .is_some_and(|tail| tail.eq_ignore_ascii_case(DESC_SUFFIX));
        let property_name = clause.split(' ').next().unwrap_or_default().to_string();

        Self {
            property_name,
            descending,
        }
    }
}

/// Parse a whole expression; a blank expression has no clauses
pub fn parse_order_by(expr: Option<&str>) -> Vec<SortKey> {
    match expr {
        Some(expr) if !is_blank(Some(expr)) => expr.split(',').map(SortKey::parse).collect(),
        _ => Vec::new(),
    }
}

/// A single compiled ordering term over an entity field
pub struct OrderingTerm<E> {
    field: &'static str,
    descending: bool,
    accessor: FieldAccessor<E>,
}

impl<E> OrderingTerm<E> {
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

impl<E> Clone for OrderingTerm<E> {
    fn clone(&self) -> Self {
        Self {
            field: self.field,
            descending: self.descending,
            accessor: self.accessor.clone(),
        }
    }
}

impl<E> fmt::Debug for OrderingTerm<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderingTerm")
            .field("field", &self.field)
            .field("descending", &self.descending)
            .finish()
    }
}

/// An ordered list of terms; earlier terms take priority
pub struct SortPlan<E> {
    terms: Vec<OrderingTerm<E>>,
}

impl<E> Clone for SortPlan<E> {
    fn clone(&self) -> Self {
        Self {
            terms: self.terms.clone(),
        }
    }
}

impl<E> fmt::Debug for SortPlan<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.terms.iter()).finish()
    }
}

impl<E: Shape + 'static> SortPlan<E> {
    /// Compile an expression against a mapping table
    ///
    /// Each clause expands into one term per target field, in the order the
    /// table declares them. A term is descending when exactly one of the
    /// clause's `desc` and the entry's reverse flag is set.
    pub fn compile(order_by: Option<&str>, table: &MappingTable<E>) -> Result<Self, MappingError> {
        let mut terms = Vec::new();

        for key in parse_order_by(order_by) {
            let mapping = table.get(&key.property_name).ok_or_else(|| MappingError::UnknownSortKey {
                key: key.property_name.clone(),
            })?;
            let descending = key.descending != mapping.reverse_direction();

            for &field in mapping.target_fields() {
                let accessor = table
                    .accessor(field)
                    .cloned()
                    .ok_or_else(|| MappingError::UnknownSortKey {
                        key: field.to_string(),
                    })?;
                terms.push(OrderingTerm {
                    field,
                    descending,
                    accessor,
                });
            }
        }

        Ok(Self { terms })
    }
}

impl<E> SortPlan<E> {
    pub fn terms(&self) -> &[OrderingTerm<E>] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// `(field, descending)` pairs, mostly useful for logging and tests
    pub fn describe(&self) -> Vec<(&'static str, bool)> {
        self.terms.iter().map(|t| (t.field, t.descending)).collect()
    }

    fn keys(&self, item: &E) -> Vec<FieldValue> {
        self.terms.iter().map(|term| (term.accessor)(item)).collect()
    }

    fn compare_keys(&self, a: &[FieldValue], b: &[FieldValue]) -> Ordering {
        for ((term, x), y) in self.terms.iter().zip(a).zip(b) {
            let ord = x.compare(y);
            let ord = if term.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }

    /// Stable sort of `items`
    ///
    /// Keys are read once per item, so computed fields are not re-evaluated
    /// on every comparison.
    pub fn sort(&self, items: Vec<E>) -> Vec<E> {
        if self.terms.is_empty() {
            return items;
        }

        let mut keyed: Vec<(Vec<FieldValue>, E)> =
            items.into_iter().map(|item| (self.keys(&item), item)).collect();
        keyed.sort_by(|(a, _), (b, _)| self.compare_keys(a, b));
        keyed.into_iter().map(|(_, item)| item).collect()
    }
}

/// Order a query by a client expression
///
/// A blank expression leaves the query untouched. Otherwise the result
/// replaces any ordering the query already had.
pub fn apply_sort<E>(
    source: Query<E>,
    order_by: Option<&str>,
    table: &MappingTable<E>,
) -> Result<Query<E>, MappingError>
where
    E: Shape + Clone + Send + Sync + 'static,
{
    if is_blank(order_by) {
        return Ok(source);
    }
    let plan = SortPlan::compile(order_by, table)?;
    Ok(source.order_by(plan))
}
