//! Parallel fetching for `--all` list requests.
//!
//! The first page reveals `total_pages`; the remaining pages are fetched
//! with bounded concurrency and reassembled in page order so the combined
//! listing reads like one long page.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

use crate::error::Result;

/// Maximum concurrent page requests for `--all`
pub const PARALLEL_FETCH_LIMIT: usize = 8;

type PageFuture<T> = Pin<Box<dyn Future<Output = (usize, Result<Vec<T>>)> + Send>>;

/// Fetch pages 2..=total in parallel and return their items in page order.
///
/// `fetch_page` receives a 1-indexed page number and returns that page's
/// items. At most `max_concurrent` requests run at once; a new request is
/// started as each one completes. The first error aborts the whole fetch.
pub async fn fetch_remaining_pages<T, F, Fut>(
    pages: Vec<usize>,
    fetch_page: F,
    max_concurrent: usize,
) -> Result<Vec<T>>
where
    T: Send + 'static,
    F: Fn(usize) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Vec<T>>> + Send + 'static,
{
    if pages.is_empty() {
        return Ok(Vec::new());
    }

    debug!(
        "Fetching {} remaining pages, max {} concurrent",
        pages.len(),
        max_concurrent
    );

    let make_future = |page: usize, f: &F| -> PageFuture<T> {
        let fut = f(page);
        Box::pin(async move { (page, fut.await) })
    };

    let mut in_flight: FuturesUnordered<PageFuture<T>> = FuturesUnordered::new();
    let mut pending = pages.into_iter();

    for page in pending.by_ref().take(max_concurrent.max(1)) {
        in_flight.push(make_future(page, &fetch_page));
    }

    // Completion order is arbitrary; keep the page number with each batch
    // and reassemble afterwards.
    let mut batches: Vec<(usize, Vec<T>)> = Vec::new();
    while let Some((page, result)) = in_flight.next().await {
        let items = result?;
        debug!("Page {} returned {} items", page, items.len());
        batches.push((page, items));

        if let Some(next_page) = pending.next() {
            in_flight.push(make_future(next_page, &fetch_page));
        }
    }

    batches.sort_by_key(|(page, _)| *page);
    Ok(batches.into_iter().flat_map(|(_, items)| items).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_empty_page_list() {
        let result: Result<Vec<String>> =
            fetch_remaining_pages(vec![], |_page| async { Ok(vec![]) }, 4).await;

        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_items_returned_in_page_order() {
        // Later pages finish first; output must still be page-ordered
        let result: Result<Vec<String>> = fetch_remaining_pages(
            vec![2, 3, 4],
            |page| async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(
                    (5 - page as u64) * 10,
                ))
                .await;
                Ok(vec![format!("item-{}", page)])
            },
            4,
        )
        .await;

        assert_eq!(
            result.unwrap(),
            vec!["item-2".to_string(), "item-3".to_string(), "item-4".to_string()]
        );
    }

    #[tokio::test]
    async fn test_respects_concurrency_limit() {
        let concurrent = Arc::new(AtomicUsize::new(0));
        let max_observed = Arc::new(AtomicUsize::new(0));

        let cc = concurrent.clone();
        let mo = max_observed.clone();

        let result: Result<Vec<usize>> = fetch_remaining_pages(
            vec![2, 3, 4, 5, 6],
            move |page| {
                let cc = cc.clone();
                let mo = mo.clone();
                async move {
                    let current = cc.fetch_add(1, Ordering::SeqCst) + 1;
                    mo.fetch_max(current, Ordering::SeqCst);

                    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

                    cc.fetch_sub(1, Ordering::SeqCst);
                    Ok(vec![page])
                }
            },
            2,
        )
        .await;

        assert_eq!(result.unwrap().len(), 5);
        assert!(max_observed.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn test_first_error_aborts() {
        let result: Result<Vec<String>> = fetch_remaining_pages(
            vec![2, 3, 4],
            |page| async move {
                if page == 3 {
                    Err(crate::error::ApiError::ServerError("boom".to_string()).into())
                } else {
                    Ok(vec![format!("item-{}", page)])
                }
            },
            4,
        )
        .await;

        assert!(result.is_err());
    }
}
