//! Paged result containers and pagination metadata

use crate::config::PagingConfig;
use crate::core::error::{Result, ValidationError};
use crate::core::query::QuerySource;
use serde::Serialize;

/// Page number and size as requested by a client, already clamped
///
/// Missing values fall back to page 1 and the configured default size; a
/// size above the configured maximum is reduced to the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: usize,
    page_size: usize,
}

impl PageRequest {
    pub fn new(page_number: Option<usize>, page_size: Option<usize>, config: &PagingConfig) -> Self {
        let page_size = page_size
            .unwrap_or(config.default_page_size)
            .clamp(1, config.max_page_size);

        Self {
            page_number: page_number.unwrap_or(1).max(1),
            page_size,
        }
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// The same page size at another page number
    pub fn with_page_number(self, page_number: usize) -> Self {
        Self {
            page_number: page_number.max(1),
            ..self
        }
    }
}

/// One page of a larger result
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    items: Vec<T>,
    total_count: usize,
    current_page: usize,
    page_size: usize,
    total_pages: usize,
}

impl<T> PagedList<T> {
    /// Wrap an already sliced page
    pub fn new(items: Vec<T>, total_count: usize, current_page: usize, page_size: usize) -> Self {
        let total_pages = if page_size == 0 {
            0
        } else {
            total_count.div_ceil(page_size)
        };

        Self {
            items,
            total_count,
            current_page,
            page_size,
            total_pages,
        }
    }

    /// Count `source`, then take page `page_number` (1-based) of it
    ///
    /// A page past the end is empty but keeps the true totals.
    pub async fn create<Q>(source: &Q, page_number: usize, page_size: usize) -> Result<Self>
    where
        Q: QuerySource<T> + ?Sized,
    {
        if page_number == 0 {
            return Err(ValidationError::InvalidPage {
                message: "page number starts at 1".to_string(),
            }
            .into());
        }
        if page_size == 0 {
            return Err(ValidationError::InvalidPage {
                message: "page size must be positive".to_string(),
            }
            .into());
        }

        let total_count = source.count().await?;
        let skip = (page_number - 1).saturating_mul(page_size);
        let items = source.slice(skip, page_size).await?;

        Ok(Self::new(items, total_count, page_number, page_size))
    }

    /// Same as [`create`](Self::create), from a clamped client request
    pub async fn from_request<Q>(source: &Q, request: PageRequest) -> Result<Self>
    where
        Q: QuerySource<T> + ?Sized,
    {
        Self::create(source, request.page_number(), request.page_size()).await
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Convert every item, keeping the page bookkeeping
    pub fn map<U, F>(self, f: F) -> PagedList<U>
    where
        F: FnMut(T) -> U,
    {
        PagedList {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            current_page: self.current_page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }

    /// Metadata for the `X-Pagination` header, without links
    pub fn metadata(&self) -> PaginationMetadata {
        PaginationMetadata {
            total_count: self.total_count,
            page_size: self.page_size,
            current_page: self.current_page,
            total_pages: self.total_pages,
            previous_page_link: None,
            next_page_link: None,
        }
    }
}

/// Body of the `X-Pagination` response header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_count: usize,
    pub page_size: usize,
    pub current_page: usize,
    pub total_pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_page_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_link: Option<String>,
}

impl PaginationMetadata {
    pub fn with_links(mut self, previous: Option<String>, next: Option<String>) -> Self {
        self.previous_page_link = previous;
        self.next_page_link = next;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::Query;

    fn config() -> PagingConfig {
        PagingConfig {
            default_page_size: 5,
            max_page_size: 20,
        }
    }

    #[test]
    fn test_page_request_defaults_and_clamping() {
        let config = config();

        let request = PageRequest::new(None, None, &config);
        assert_eq!((request.page_number(), request.page_size()), (1, 5));

        let request = PageRequest::new(Some(3), Some(999), &config);
        assert_eq!((request.page_number(), request.page_size()), (3, 20));

        let request = PageRequest::new(Some(0), Some(0), &config);
        assert_eq!((request.page_number(), request.page_size()), (1, 1));
    }

    #[tokio::test]
    async fn test_pages_partition_the_source() {
        let query = Query::new((1..=23).collect::<Vec<i64>>());

        let mut sizes = Vec::new();
        let mut seen = Vec::new();
        for page in 1..=5 {
            let list = PagedList::create(&query, page, 5).await.unwrap();
            assert_eq!(list.total_count(), 23);
            assert_eq!(list.total_pages(), 5);
            sizes.push(list.len());
            seen.extend(list.into_items());
        }

        assert_eq!(sizes, vec![5, 5, 5, 5, 3]);
        assert_eq!(seen, (1..=23).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let query = Query::new((1..=23).collect::<Vec<i64>>());
        let list = PagedList::create(&query, 6, 5).await.unwrap();

        assert!(list.is_empty());
        assert_eq!(list.total_count(), 23);
        assert_eq!(list.total_pages(), 5);
        assert!(list.has_previous());
        assert!(!list.has_next());
    }

    #[tokio::test]
    async fn test_navigation_flags() {
        let query = Query::new((1..=23).collect::<Vec<i64>>());

        let first = PagedList::create(&query, 1, 5).await.unwrap();
        assert!(!first.has_previous());
        assert!(first.has_next());

        let last = PagedList::create(&query, 5, 5).await.unwrap();
        assert!(last.has_previous());
        assert!(!last.has_next());
    }

    #[tokio::test]
    async fn test_empty_source() {
        let query = Query::new(Vec::<i64>::new());
        let list = PagedList::create(&query, 1, 5).await.unwrap();

        assert_eq!(list.total_count(), 0);
        assert_eq!(list.total_pages(), 0);
        assert!(!list.has_previous());
        assert!(!list.has_next());
    }

    #[tokio::test]
    async fn test_zero_arguments_are_rejected() {
        let query = Query::new(vec![1_i64]);
        assert!(PagedList::create(&query, 0, 5).await.is_err());
        assert!(PagedList::create(&query, 1, 0).await.is_err());
    }

    #[tokio::test]
    async fn test_from_request_uses_clamped_size() {
        let query = Query::new((1..=50).collect::<Vec<i64>>());
        let request = PageRequest::new(Some(2), Some(999), &config());
        let list = PagedList::from_request(&query, request).await.unwrap();

        assert_eq!(list.page_size(), 20);
        assert_eq!(list.items().first(), Some(&21));
        assert_eq!(list.total_pages(), 3);
    }

    #[test]
    fn test_metadata_serialization() {
        let list = PagedList::new(vec![1, 2], 12, 2, 5);
        let meta = list
            .metadata()
            .with_links(Some("/prev".to_string()), None);

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["totalCount"], 12);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["previousPageLink"], "/prev");
        assert!(json.get("nextPageLink").is_none());
    }
}
