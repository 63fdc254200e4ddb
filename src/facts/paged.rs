//! Bounded pagination over collection endpoints.

use anyhow::Result;
use core::future::Future;

/// Parameters threaded through a paginated fetch. The engine owns the page
/// counter; callers only pick the page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { page: 1, per_page: 100 }
    }
}

/// Fetch pages until the data runs out, `keep_going` declines, or `max_pages`
/// pages have been consumed.
///
/// When the loop stops on a non-empty page, the items of that final page are
/// filtered individually through `keep_going`, so boundary items that are
/// still in range survive a "content became too old" stop. Transport errors
/// propagate unchanged; there is no retry here.
pub async fn fetch_paged<T, F, Fut>(page_fetch: F, params: PageParams, keep_going: impl Fn(&[T]) -> bool, max_pages: u32) -> Result<Vec<T>>
where
    F: Fn(PageParams) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut params = params;
    let mut pages_fetched = 0;
    let mut results = Vec::new();

    loop {
        let page = page_fetch(params).await?;
        if page.is_empty() {
            break;
        }

        params.page += 1;
        pages_fetched += 1;
        if keep_going(&page) && pages_fetched < max_pages {
            results.extend(page);
            continue;
        }

        results.extend(page.into_iter().filter(|item| keep_going(core::slice::from_ref(item))));
        break;
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    /// Items are plain "creation day" numbers, newest first across pages.
    fn paged_data() -> Vec<Vec<i64>> {
        vec![vec![100, 90], vec![80, 70], vec![60, 40, 20], vec![15, 10], vec![5]]
    }

    #[tokio::test]
    async fn stops_when_the_page_content_gets_too_old() {
        let pages = paged_data();
        let calls = AtomicU32::new(0);
        let fetch = |p: PageParams| {
            let _ = calls.fetch_add(1, Ordering::SeqCst);
            let page = pages.get((p.page - 1) as usize).cloned().unwrap_or_default();
            async move { Ok(page) }
        };

        // Cutoff of 50: page 3's last item (20) is below it, so pages 1-2 are
        // kept whole and page 3 contributes only its in-range items.
        let items = fetch_paged(fetch, PageParams::default(), |page| page.last().is_some_and(|&day| day > 50), 10)
            .await
            .unwrap();

        assert_eq!(items, vec![100, 90, 80, 70, 60]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn page_cap_is_exact_even_when_more_is_wanted() {
        let calls = AtomicU32::new(0);
        let fetch = |p: PageParams| {
            let _ = calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(p.per_page, 100);
            async move { Ok(vec![1, 2]) }
        };

        let items = fetch_paged(fetch, PageParams::default(), |_| true, 3).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(items.len(), 6);
    }

    #[tokio::test]
    async fn empty_page_ends_the_walk_without_filtering() {
        let pages = vec![vec![9, 8], Vec::new()];
        let fetch = |p: PageParams| {
            let page = pages.get((p.page - 1) as usize).cloned().unwrap_or_default();
            async move { Ok(page) }
        };

        let items = fetch_paged(fetch, PageParams::default(), |_| true, 10).await.unwrap();

        assert_eq!(items, vec![9, 8]);
    }

    #[tokio::test]
    async fn page_numbers_are_threaded_by_the_engine() {
        let seen = std::sync::Mutex::new(Vec::new());
        let fetch = |p: PageParams| {
            seen.lock().unwrap().push(p.page);
            async move { Ok(if p.page < 3 { vec![1] } else { Vec::new() }) }
        };

        let _ = fetch_paged(fetch, PageParams::default(), |_| true, 10).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn transport_errors_propagate() {
        let fetch = |_: PageParams| async move { Err::<Vec<i64>, _>(anyhow::anyhow!("offline")) };

        let err = fetch_paged(fetch, PageParams::default(), |_| true, 10).await.unwrap_err();

        assert_eq!(err.to_string(), "offline");
    }
}
