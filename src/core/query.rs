//! Deferred, composable queries over a snapshot of entities

use crate::core::error::Result;
use crate::core::sort::SortPlan;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// A filter predicate over `T`
pub type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// Anything that can be counted and sliced, in a stable order
///
/// This is what [`PagedList::create`](crate::core::paging::PagedList::create)
/// consumes; both methods must observe the same filter and ordering.
#[async_trait]
pub trait QuerySource<T>: Send + Sync {
    /// Number of items after filtering
    async fn count(&self) -> Result<usize>;

    /// At most `take` items, after skipping `skip`, in query order
    async fn slice(&self, skip: usize, take: usize) -> Result<Vec<T>>;
}

/// An immutable query over a shared snapshot
///
/// `filter` and `order_by` return new queries; the snapshot itself is never
/// touched, so cloning a query is cheap and the clone is independent.
pub struct Query<T> {
    source: Arc<Vec<T>>,
    predicates: Vec<Predicate<T>>,
    ordering: Option<Arc<SortPlan<T>>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            predicates: self.predicates.clone(),
            ordering: self.ordering.clone(),
        }
    }
}

impl<T> fmt::Debug for Query<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Query")
            .field("source_len", &self.source.len())
            .field("predicates", &self.predicates.len())
            .field("ordering", &self.ordering)
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Query<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            source: Arc::new(items),
            predicates: Vec::new(),
            ordering: None,
        }
    }

    /// Keep only items matching `predicate`, in addition to earlier filters
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
        self
    }

    /// Order by `plan`, replacing any previous ordering
    pub fn order_by(mut self, plan: SortPlan<T>) -> Self {
        self.ordering = Some(Arc::new(plan));
        self
    }

    pub fn is_ordered(&self) -> bool {
        self.ordering.is_some()
    }

    fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|predicate| predicate(item))
    }

    /// Filtered and ordered items
    pub fn collect(&self) -> Vec<T> {
        let items: Vec<T> = self
            .source
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect();

        match &self.ordering {
            Some(plan) => plan.sort(items),
            None => items,
        }
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> QuerySource<T> for Query<T> {
    async fn count(&self) -> Result<usize> {
        Ok(self.source.iter().filter(|item| self.matches(item)).count())
    }

    async fn slice(&self, skip: usize, take: usize) -> Result<Vec<T>> {
        Ok(self.collect().into_iter().skip(skip).take(take).collect())
    }
}
