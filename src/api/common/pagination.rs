//
//  stash-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination for Stash list endpoints
//!
//! Stash uses offset-based pagination. Every list endpoint accepts `start` and
//! `limit` query parameters and answers with a page envelope:
//!
//! ```json
//! {"size": 25, "limit": 25, "isLastPage": false, "start": 0, "nextPageStart": 25, "values": [...]}
//! ```
//!
//! [`collect_pages`] drives a fetch-one-page operation from offset `0` until the
//! server reports the last page, merging each page's `values` into an aggregate.
//!
//! # Termination
//!
//! Pagination ends only when the server says `isLastPage: true`. Offsets are not
//! required to increase, so a misbehaving server can keep the loop going; the
//! server is a trusted collaborator and no page-count bound is applied. A page
//! that claims more data but carries no `nextPageStart` is reported as
//! [`ApiError::Pagination`].
//!
//! # Example
//!
//! ```rust
//! use stash_client::api::common::PagedResponse;
//!
//! let json = r#"{
//!     "values": ["master", "develop"],
//!     "size": 2,
//!     "limit": 25,
//!     "isLastPage": false,
//!     "nextPageStart": 2,
//!     "start": 0
//! }"#;
//!
//! let page: PagedResponse<String> = serde_json::from_str(json).unwrap();
//! assert!(page.has_next());
//! assert_eq!(page.next_start(), Some(2));
//! ```

use std::future::Future;

use serde::{Deserialize, Serialize};

use super::{ApiError, Result};

/// Page size used for every general listing.
pub const PAGE_LIMIT: u32 = 25;

/// Page size of the commit-range query, which Stash serves in a single response.
pub const COMMIT_PAGE_LIMIT: u32 = 1000;

/// One page of results from a Stash list endpoint.
///
/// # Type Parameters
///
/// - `T` - The type of items contained in the `values` array
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Items in the current page |
/// | `size` | `u32` | Number of items in the current page |
/// | `limit` | `u32` | Page size that was requested |
/// | `is_last_page` | `bool` | Whether this is the final page |
/// | `next_page_start` | `Option<u32>` | Start offset of the next page |
/// | `start` | `u32` | Start offset of the current page |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// Items in the current page. Empty when the query matched nothing.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Number of items in the current page.
    #[serde(default)]
    pub size: u32,

    /// Maximum items per page, as requested.
    #[serde(default)]
    pub limit: u32,

    /// Indicates whether this is the last page of results.
    #[serde(default, rename = "isLastPage")]
    pub is_last_page: bool,

    /// Start offset for the next page. Absent on the last page.
    #[serde(default, rename = "nextPageStart")]
    pub next_page_start: Option<u32>,

    /// Start offset of the current page (0-indexed).
    #[serde(default)]
    pub start: u32,
}

impl<T> PagedResponse<T> {
    /// Returns `true` if the server reports more pages after this one.
    pub fn has_next(&self) -> bool {
        !self.is_last_page
    }

    /// Returns the `start` value for the next request, if the server sent one.
    pub fn next_start(&self) -> Option<u32> {
        self.next_page_start
    }
}

/// Drives a paginated fetch until the server reports the last page.
///
/// `fetch` is called with the start offset of each page, beginning at `0`. It
/// is expected to be a complete, retry-wrapped "fetch and decode one page"
/// operation. Each page's items are handed to `merge` in request order, so a
/// `Vec` aggregate preserves server order.
///
/// # Errors
///
/// The first error returned by `fetch` aborts pagination; no partial aggregate
/// is returned. A non-final page without `nextPageStart` yields
/// [`ApiError::Pagination`].
///
/// # Example
///
/// ```rust
/// use stash_client::api::common::{collect_pages, PagedResponse};
///
/// # tokio_test::block_on(async {
/// let pages = vec![
///     PagedResponse { values: vec![1, 2], size: 2, limit: 2, is_last_page: false, next_page_start: Some(2), start: 0 },
///     PagedResponse { values: vec![3], size: 1, limit: 2, is_last_page: true, next_page_start: None, start: 2 },
/// ];
///
/// let all: Vec<i32> = collect_pages(
///     |start| {
///         let page = pages[(start / 2) as usize].clone();
///         async move { Ok(page) }
///     },
///     Vec::new(),
///     |acc: &mut Vec<i32>, items| acc.extend(items),
/// )
/// .await
/// .unwrap();
///
/// assert_eq!(all, vec![1, 2, 3]);
/// # });
/// ```
pub async fn collect_pages<T, C, F, Fut, M>(mut fetch: F, mut aggregate: C, mut merge: M) -> Result<C>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<PagedResponse<T>>>,
    M: FnMut(&mut C, Vec<T>),
{
    let mut start = 0;
    let mut pages = 0usize;

    loop {
        let page = fetch(start).await?;
        pages += 1;
        tracing::debug!(
            "Fetched page {} (start={}, size={}, last={})",
            pages,
            page.start,
            page.values.len(),
            page.is_last_page
        );

        let has_next = page.has_next();
        let next = page.next_start();
        merge(&mut aggregate, page.values);

        if !has_next {
            return Ok(aggregate);
        }

        start = next.ok_or_else(|| {
            ApiError::Pagination(format!(
                "page starting at {} is not the last page but has no nextPageStart",
                start
            ))
        })?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn page(values: Vec<&'static str>, start: u32, next: Option<u32>) -> PagedResponse<&'static str> {
        PagedResponse {
            size: values.len() as u32,
            values,
            limit: PAGE_LIMIT,
            is_last_page: next.is_none(),
            next_page_start: next,
            start,
        }
    }

    #[tokio::test]
    async fn test_collect_pages_concatenates_in_server_order() {
        let requested = Mutex::new(Vec::new());
        let result: Vec<&str> = collect_pages(
            |start| {
                requested.lock().unwrap().push(start);
                let page = match start {
                    0 => page(vec!["a", "b"], 0, Some(2)),
                    2 => page(vec!["c", "d"], 2, Some(4)),
                    _ => page(vec!["e"], 4, None),
                };
                async move { Ok(page) }
            },
            Vec::new(),
            |acc: &mut Vec<&str>, items| acc.extend(items),
        )
        .await
        .unwrap();

        assert_eq!(result, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(*requested.lock().unwrap(), vec![0, 2, 4]);
    }

    #[tokio::test]
    async fn test_collect_pages_merges_into_map() {
        let result: HashMap<&str, usize> = collect_pages(
            |start| {
                let page = if start == 0 {
                    page(vec!["master", "develop"], 0, Some(25))
                } else {
                    page(vec!["develop", "release"], 25, None)
                };
                async move { Ok(page) }
            },
            HashMap::new(),
            |acc: &mut HashMap<&str, usize>, items| {
                for item in items {
                    acc.insert(item, item.len());
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(result.len(), 3);
        assert!(result.contains_key("master"));
        assert!(result.contains_key("release"));
    }

    #[tokio::test]
    async fn test_collect_pages_trusts_server_offsets() {
        // nextPageStart going backwards is still followed until isLastPage.
        let calls = Mutex::new(0);
        let result: Vec<&str> = collect_pages(
            |_start| {
                let mut calls = calls.lock().unwrap();
                *calls += 1;
                let page = if *calls == 1 {
                    page(vec!["x"], 10, Some(0))
                } else {
                    page(vec!["y"], 0, None)
                };
                async move { Ok(page) }
            },
            Vec::new(),
            |acc: &mut Vec<&str>, items| acc.extend(items),
        )
        .await
        .unwrap();

        assert_eq!(result, vec!["x", "y"]);
    }

    #[tokio::test]
    async fn test_collect_pages_stops_on_error_without_partial_result() {
        let result: Result<Vec<&str>> = collect_pages(
            |start| async move {
                if start == 0 {
                    Ok(page(vec!["a"], 0, Some(1)))
                } else {
                    Err(ApiError::InvalidUrl("boom".to_string()))
                }
            },
            Vec::new(),
            |acc: &mut Vec<&str>, items| acc.extend(items),
        )
        .await;

        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_collect_pages_rejects_missing_next_start() {
        let result: Result<Vec<&str>> = collect_pages(
            |_| async move {
                Ok(PagedResponse {
                    values: vec!["a"],
                    size: 1,
                    limit: PAGE_LIMIT,
                    is_last_page: false,
                    next_page_start: None,
                    start: 0,
                })
            },
            Vec::new(),
            |acc: &mut Vec<&str>, items| acc.extend(items),
        )
        .await;

        assert!(matches!(result, Err(ApiError::Pagination(_))));
    }

    #[test]
    fn test_paged_response_defaults() {
        let page: PagedResponse<String> = serde_json::from_str(r#"{"isLastPage": true}"#).unwrap();
        assert!(page.values.is_empty());
        assert!(!page.has_next());
        assert_eq!(page.next_start(), None);
    }
}
