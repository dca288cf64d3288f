use std::future::Future;

use crate::{
    error::Result,
    types::{Collection, Paging},
};

/// Walks an offset/limit paginated endpoint until the collection is complete.
///
/// `fetch` is called with the offset of each page, starting at `0` and
/// advancing by `limit`. The walk stops when either
///
/// - the offset reaches the total reported by the latest page, or
/// - a page holds fewer than `limit` items (short page), which also ends
///   walks over endpoints reporting no or an inconsistent total.
///
/// The returned `total` is the latest reported total when the walk reached
/// it, otherwise the number of items actually collected.
///
/// # Errors
///
/// Any error from `fetch` aborts the walk; partial results are dropped.
///
/// # Example
///
/// ```
/// let all = paginate(50, |offset| client.get(&token, "/me/playlists", &page_query(50, offset))).await?;
/// ```
pub async fn paginate<T, F, Fut>(limit: u64, mut fetch: F) -> Result<Collection<T>>
where
    F: FnMut(u64) -> Fut,
    Fut: Future<Output = Result<Paging<T>>>,
{
    let limit = limit.max(1);
    let mut offset = 0;
    let mut total = None;
    let mut items = Vec::new();

    loop {
        let page = fetch(offset).await?;
        let received = page.items.len() as u64;
        items.extend(page.items);
        if page.total.is_some() {
            total = page.total;
        }
        offset += limit;

        if let Some(total) = total {
            if offset >= total {
                return Ok(Collection { items, total });
            }
        }
        if received < limit {
            let total = items.len() as u64;
            return Ok(Collection { items, total });
        }
    }
}

/// Query parameters selecting one page.
pub fn page_query(limit: u64, offset: u64) -> Vec<(&'static str, String)> {
    vec![("limit", limit.to_string()), ("offset", offset.to_string())]
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::BlindifyError;

    fn page(count: usize, start: u64, total: Option<u64>) -> Paging<u64> {
        Paging {
            items: (start..start + count as u64).collect(),
            total,
        }
    }

    #[tokio::test]
    async fn test_walks_until_reported_total() {
        let offsets = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&offsets);

        let result = paginate(50, |offset| {
            seen.lock().unwrap().push(offset);
            async move {
                let count = if offset < 100 { 50 } else { 0 };
                Ok(page(count, offset, Some(100)))
            }
        })
        .await
        .unwrap();

        assert_eq!(*offsets.lock().unwrap(), vec![0, 50]);
        assert_eq!(result.items.len(), 100);
        assert_eq!(result.total, 100);
    }

    #[tokio::test]
    async fn test_short_page_wins_over_reported_total() {
        let result = paginate(100, |offset| async move {
            let count = if offset == 0 { 100 } else { 7 };
            Ok(page(count, offset, Some(500)))
        })
        .await
        .unwrap();

        assert_eq!(result.items.len(), 107);
        assert_eq!(result.total, 107);
    }

    #[tokio::test]
    async fn test_missing_total_stops_on_short_page() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);

        let result = paginate(10, |offset| {
            *counter.lock().unwrap() += 1;
            async move {
                let count = if offset < 30 { 10 } else { 3 };
                Ok(page(count, offset, None))
            }
        })
        .await
        .unwrap();

        assert_eq!(*calls.lock().unwrap(), 4);
        assert_eq!(result.total, 33);
        assert_eq!(result.items, (0..33).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn test_empty_collection() {
        let result = paginate(50, |_| async { Ok(page(0, 0, Some(0))) })
            .await
            .unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 0);
    }

    #[tokio::test]
    async fn test_error_aborts_walk() {
        let result: Result<Collection<u64>> = paginate(10, |offset| async move {
            if offset == 0 {
                Ok(page(10, 0, Some(40)))
            } else {
                Err(BlindifyError::Api {
                    message: "Service unavailable".into(),
                    status: 503,
                })
            }
        })
        .await;

        assert!(matches!(result, Err(BlindifyError::Api { status: 503, .. })));
    }
}
