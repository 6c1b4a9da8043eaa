//! Tests for pagination module

use super::*;
use async_trait::async_trait;
use futures::StreamExt;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// Test Fetchers
// ============================================================================

/// Parse `(offset, length)` back out of a rendered resource string
fn window_of(resource: &str) -> (usize, usize) {
    let query = resource.split_once('?').map_or("", |(_, q)| q);
    let mut offset = 0;
    let mut length = 0;
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "offset" => offset = value.parse().unwrap(),
            "length" => length = value.parse().unwrap(),
            _ => {}
        }
    }
    (offset, length)
}

/// Serves windows of `0..size`, failing chosen offsets a set number of times
#[derive(Default)]
struct CollectionFetcher {
    size: usize,
    failures: Mutex<HashMap<usize, u32>>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl CollectionFetcher {
    fn new(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    fn failing(self, offset: usize, times: u32) -> Self {
        self.failures.lock().unwrap().insert(offset, times);
        self
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for CollectionFetcher {
    async fn fetch(&self, resource: &str) -> FetchOutcome {
        self.calls.lock().unwrap().push(resource.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        match self.delay {
            Some(delay) => tokio::time::sleep(delay).await,
            None => tokio::task::yield_now().await,
        }

        let (offset, length) = window_of(resource);
        let failed = {
            let mut failures = self.failures.lock().unwrap();
            match failures.get_mut(&offset) {
                Some(left) if *left > 0 => {
                    *left -= 1;
                    true
                }
                _ => false,
            }
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if failed {
            return FetchOutcome::Unavailable;
        }
        let end = (offset + length).min(self.size);
        let page: Vec<usize> = (offset.min(end)..end).collect();
        FetchOutcome::Success(serde_json::to_string(&page).unwrap())
    }
}

/// Replays a fixed list of outcomes, then reports `Unavailable`
struct ScriptedFetcher {
    responses: Mutex<VecDeque<FetchOutcome>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    fn new(responses: impl IntoIterator<Item = FetchOutcome>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, _resource: &str) -> FetchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(FetchOutcome::Unavailable)
    }
}

fn ok(body: &str) -> FetchOutcome {
    FetchOutcome::Success(body.to_string())
}

fn query() -> PageQuery {
    PageQuery::new("servers/index.json")
}

async fn drain<T>(mut enumerator: PageEnumerator<T>) -> (Vec<T>, PageEnumerator<T>)
where
    T: serde::de::DeserializeOwned + Send + 'static,
{
    let mut items = Vec::new();
    while let Some(item) = enumerator.next_item().await {
        items.push(item);
    }
    (items, enumerator)
}

// ============================================================================
// Value Type Tests
// ============================================================================

#[test]
fn test_page_query_render() {
    let query = PageQuery::new("zones/all/index.json")
        .param("sort", "id")
        .param("order", -1);

    assert_eq!(
        query.render(PageWindow::new(100, 50)),
        "zones/all/index.json?length=50&sort=id&order=-1&offset=100"
    );
    assert_eq!(
        PageQuery::new("servers/index.json").render(PageWindow::new(0, 5)),
        "servers/index.json?length=5&offset=0"
    );
}

#[test]
fn test_page_query_render_existing_query() {
    let query = PageQuery::new("titles/index.json?title=TMCanyon");
    assert_eq!(
        query.render(PageWindow::new(0, 10)),
        "titles/index.json?title=TMCanyon&length=10&offset=0"
    );
}

#[test]
fn test_page_window_next() {
    let window = PageWindow::new(0, 25).next().next();
    assert_eq!(window, PageWindow::new(50, 25));
}

#[test]
fn test_retry_budget() {
    let mut budget = RetryBudget::new(2);
    assert_eq!(budget.remaining(), 2);
    assert!(budget.try_consume());
    assert!(budget.try_consume());
    assert!(!budget.try_consume());
    assert_eq!(budget.retries_used, 2);
    assert_eq!(budget.remaining(), 0);

    let mut none = RetryBudget::new(0);
    assert!(!none.try_consume());
    assert_eq!(none.retries_used, 0);
}

#[test]
fn test_fetch_outcome_from_option() {
    assert_eq!(FetchOutcome::from(None), FetchOutcome::Unavailable);
    let outcome = FetchOutcome::from(Some("[]".to_string()));
    assert_eq!(outcome.into_body(), Some("[]".to_string()));
}

// ============================================================================
// Enumeration Tests
// ============================================================================

#[tokio::test]
async fn test_zero_step_size_is_empty_without_fetching() {
    let fetcher = Arc::new(CollectionFetcher::new(10));
    let enumerator = PageEnumerator::<usize>::new(fetcher.clone(), query(), 0, 3);

    let (items, enumerator) = drain(enumerator).await;

    assert!(items.is_empty());
    assert!(fetcher.calls().is_empty());
    assert_eq!(enumerator.fetch_attempts(), 0);
    assert_eq!(enumerator.end_reason(), Some(EndReason::Exhausted));
}

#[tokio::test]
async fn test_yields_everything_with_one_extra_fetch() {
    for (size, step) in [(0, 5), (4, 5), (5, 5), (10, 5), (13, 5), (1, 1), (7, 3), (30, 7)] {
        let fetcher = Arc::new(CollectionFetcher::new(size));
        let enumerator = PageEnumerator::<usize>::new(fetcher.clone(), query(), step, 3);

        let (mut items, enumerator) = drain(enumerator).await;
        items.sort_unstable();

        assert_eq!(items, (0..size).collect::<Vec<_>>(), "size {size} step {step}");

        // ceil((N + 1) / step)
        let expected_fetches = (size + step as usize) / step as usize;
        assert_eq!(fetcher.calls().len(), expected_fetches, "size {size} step {step}");
        assert_eq!(enumerator.end_reason(), Some(EndReason::Exhausted));
    }
}

#[tokio::test]
async fn test_short_page_stops_fetching() {
    let fetcher = Arc::new(ScriptedFetcher::new([
        ok("[1,2,3,4,5]"),
        ok("[6,7,8,9,10]"),
        ok("[11,12,13]"),
        ok("[99,99,99,99,99]"),
    ]));
    let enumerator = PageEnumerator::<u32>::new(fetcher.clone(), query(), 5, 3);

    let (items, enumerator) = drain(enumerator).await;

    assert_eq!(items.len(), 13);
    assert!(!items.contains(&99));
    assert_eq!(fetcher.calls(), 3);
    assert_eq!(enumerator.pages_decoded(), 3);
}

#[tokio::test]
async fn test_retry_exhaustion_ends_cleanly() {
    let fetcher = Arc::new(ScriptedFetcher::new([]));
    let enumerator = PageEnumerator::<u32>::new(fetcher.clone(), query(), 5, 3);

    let (items, enumerator) = drain(enumerator).await;

    assert!(items.is_empty());
    // The initial attempt plus max_retries
    assert_eq!(fetcher.calls(), 4);
    assert_eq!(enumerator.retries_used(), 3);
    assert_eq!(enumerator.end_reason(), Some(EndReason::RetriesExhausted));
}

#[tokio::test]
async fn test_zero_retries_gives_up_after_first_failure() {
    let fetcher = Arc::new(ScriptedFetcher::new([FetchOutcome::Unavailable, ok("[1]")]));
    let enumerator = PageEnumerator::<u32>::new(fetcher.clone(), query(), 5, 0);

    let (items, enumerator) = drain(enumerator).await;

    assert!(items.is_empty());
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(enumerator.end_reason(), Some(EndReason::RetriesExhausted));
}

#[tokio::test]
async fn test_transient_failures_do_not_skip_data() {
    let fetcher = Arc::new(CollectionFetcher::new(8).failing(5, 2));
    let enumerator = PageEnumerator::<usize>::new(fetcher.clone(), query(), 5, 3);

    let (mut items, enumerator) = drain(enumerator).await;
    items.sort_unstable();

    assert_eq!(items, (0..8).collect::<Vec<_>>());
    let offsets: Vec<usize> = fetcher.calls().iter().map(|c| window_of(c).0).collect();
    assert_eq!(offsets, vec![0, 5, 5, 5]);
    assert_eq!(enumerator.retries_used(), 2);
    assert_eq!(enumerator.end_reason(), Some(EndReason::Exhausted));
}

#[tokio::test]
async fn test_failures_spend_one_budget_across_pages() {
    // Two failures on each of two pages exceed a budget of three
    let fetcher = Arc::new(CollectionFetcher::new(20).failing(0, 2).failing(5, 2));
    let enumerator = PageEnumerator::<usize>::new(fetcher.clone(), query(), 5, 3);

    let (items, enumerator) = drain(enumerator).await;

    assert_eq!(items.len(), 5);
    assert_eq!(enumerator.end_reason(), Some(EndReason::RetriesExhausted));
}

#[tokio::test]
async fn test_page_items_come_out_reversed() {
    let fetcher = Arc::new(ScriptedFetcher::new([ok(r#"["a","b","c"]"#)]));
    let enumerator = PageEnumerator::<String>::new(fetcher, query(), 5, 0);

    let (items, _) = drain(enumerator).await;

    assert_eq!(items, vec!["c", "b", "a"]);
}

#[tokio::test]
async fn test_pages_keep_offset_order() {
    let fetcher = Arc::new(CollectionFetcher::new(5));
    let enumerator = PageEnumerator::<usize>::new(fetcher, query(), 2, 0);

    let (items, _) = drain(enumerator).await;

    assert_eq!(items, vec![1, 0, 3, 2, 4]);
}

#[tokio::test]
async fn test_never_two_fetches_in_flight() {
    let fetcher =
        Arc::new(CollectionFetcher::new(40).with_delay(Duration::from_millis(2)).failing(9, 1));
    let enumerator = PageEnumerator::<usize>::new(fetcher.clone(), query(), 3, 2);

    let mut stream = enumerator.into_stream();
    let mut count = 0;
    while stream.next().await.is_some() {
        // Give the prefetch a chance to overlap with consumption
        tokio::time::sleep(Duration::from_millis(1)).await;
        count += 1;
    }

    assert_eq!(count, 40);
    assert_eq!(fetcher.max_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_malformed_page_consumes_a_retry() {
    let fetcher = Arc::new(ScriptedFetcher::new([ok("<html>oops</html>"), ok("[1,2]")]));
    let enumerator = PageEnumerator::<u32>::new(fetcher.clone(), query(), 5, 1);

    let (items, enumerator) = drain(enumerator).await;

    assert_eq!(items, vec![2, 1]);
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(enumerator.retries_used(), 1);
    assert_eq!(enumerator.end_reason(), Some(EndReason::Exhausted));
}

#[tokio::test]
async fn test_non_array_page_is_rejected() {
    let fetcher = Arc::new(ScriptedFetcher::new([ok(r#"{"id": 1}"#)]));
    let enumerator = PageEnumerator::<serde_json::Value>::new(fetcher.clone(), query(), 5, 0);

    let (items, enumerator) = drain(enumerator).await;

    assert!(items.is_empty());
    assert_eq!(enumerator.end_reason(), Some(EndReason::RetriesExhausted));
}

#[tokio::test]
async fn test_null_list_field_keeps_page() {
    let fetcher = Arc::new(ScriptedFetcher::new([ok(
        r#"[{"login": "a", "mapsList": ["m1"]}, {"login": "b", "mapsList": null}]"#,
    )]));
    let enumerator =
        PageEnumerator::<crate::api::ServerInfo>::new(fetcher.clone(), query(), 5, 0);

    let (items, enumerator) = drain(enumerator).await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].login.as_deref(), Some("b"));
    assert!(items[0].maps.is_empty());
    assert_eq!(items[1].maps, vec!["m1".to_string()]);
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(enumerator.retries_used(), 0);
    assert_eq!(enumerator.end_reason(), Some(EndReason::Exhausted));
}

#[tokio::test]
async fn test_abandoned_stream_stops_fetching() {
    let fetcher = Arc::new(CollectionFetcher::new(1000));
    let enumerator = PageEnumerator::<usize>::new(fetcher.clone(), query(), 5, 3);

    let first: Vec<usize> = enumerator.into_stream().take(2).collect().await;
    assert_eq!(first, vec![4, 3]);

    tokio::time::sleep(Duration::from_millis(20)).await;
    // First page plus at most the prefetch of the second
    assert!(fetcher.calls().len() <= 2);
}

#[tokio::test]
async fn test_stream_collects_in_page_order() {
    let fetcher = Arc::new(CollectionFetcher::new(6));
    let enumerator = PageEnumerator::<usize>::new(fetcher, query(), 3, 1);

    let items: Vec<usize> = enumerator.into_stream().collect().await;

    assert_eq!(items, vec![2, 1, 0, 5, 4, 3]);
}

#[tokio::test]
async fn test_renders_query_for_every_page() {
    let fetcher = Arc::new(CollectionFetcher::new(4));
    let query = PageQuery::new("zones/all/index.json")
        .param("sort", "path")
        .param("order", 1);
    let enumerator = PageEnumerator::<usize>::new(fetcher.clone(), query, 2, 0);

    drain(enumerator).await;

    assert_eq!(
        fetcher.calls(),
        vec![
            "zones/all/index.json?length=2&sort=path&order=1&offset=0",
            "zones/all/index.json?length=2&sort=path&order=1&offset=2",
            "zones/all/index.json?length=2&sort=path&order=1&offset=4",
        ]
    );
}

#[test]
fn test_created_outside_runtime_starts_lazily() {
    let fetcher = Arc::new(CollectionFetcher::new(3));
    let enumerator = PageEnumerator::<usize>::new(fetcher.clone(), query(), 2, 0);
    assert!(fetcher.calls().is_empty());

    let runtime = tokio::runtime::Runtime::new().unwrap();
    let items: Vec<usize> = runtime.block_on(enumerator.into_stream().collect());

    assert_eq!(items, vec![1, 0, 2]);
    assert_eq!(fetcher.calls().len(), 2);
}
