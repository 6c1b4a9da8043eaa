//! Paginated, retrying enumerator
//!
//! A pull pipeline with two buffers: the decoded items of the current page
//! sit on a stack while the next page is already being fetched by a single
//! spawned task.

use super::types::{EndReason, FetchOutcome, PageFetcher, PageQuery, PageWindow, RetryBudget};
use crate::decode::decode_page;
use futures::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// The one outstanding page request
///
/// Dropping it aborts the task, so an abandoned enumeration never leaves a
/// request running.
struct InFlight {
    window: PageWindow,
    handle: JoinHandle<FetchOutcome>,
}

impl InFlight {
    async fn join(mut self) -> FetchOutcome {
        match (&mut self.handle).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(offset = self.window.offset, error = %e, "Page fetch task did not complete");
                FetchOutcome::Unavailable
            }
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Lazy, finite, single-pass walk over an offset-windowed collection
///
/// Items are decoded from each page's JSON array and yielded one at a time.
/// Within a page they come out in reverse order, because the page is staged
/// on a stack; pages themselves are consumed in increasing offset order.
///
/// The walk ends when a page holds fewer items than requested, or when a
/// fetch fails with the retry budget already spent. Neither case is an
/// error. Undecodable page bodies count as failed fetches.
///
/// The first fetch starts immediately when the enumerator is created inside
/// a Tokio runtime, otherwise on the first pull. Pulling always requires a
/// runtime.
pub struct PageEnumerator<T> {
    fetcher: Arc<dyn PageFetcher>,
    query: PageQuery,
    window: PageWindow,
    budget: RetryBudget,
    should_query: bool,
    pending: Vec<T>,
    in_flight: Option<InFlight>,
    end_reason: Option<EndReason>,
    fetch_attempts: u64,
    pages_decoded: u64,
}

impl<T> PageEnumerator<T>
where
    T: DeserializeOwned + Send + 'static,
{
    /// Start a walk from offset 0
    ///
    /// A `step_size` of zero produces an empty walk that never fetches.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        query: PageQuery,
        step_size: u32,
        max_retries: u32,
    ) -> Self {
        let mut enumerator = Self {
            fetcher,
            query,
            window: PageWindow::new(0, step_size),
            budget: RetryBudget::new(max_retries),
            should_query: step_size > 0,
            pending: Vec::new(),
            in_flight: None,
            end_reason: None,
            fetch_attempts: 0,
            pages_decoded: 0,
        };

        if !enumerator.should_query {
            debug!(path = enumerator.query.path(), "Zero step size, nothing to fetch");
            enumerator.end_reason = Some(EndReason::Exhausted);
        } else if Handle::try_current().is_ok() {
            enumerator.in_flight = Some(enumerator.spawn_fetch());
        }

        enumerator
    }

    /// Pull the next item, waiting on the in-flight fetch if needed
    pub async fn next_item(&mut self) -> Option<T> {
        while self.should_query || !self.pending.is_empty() {
            if self.should_query && self.pending.is_empty() {
                let in_flight = match self.in_flight.take() {
                    Some(in_flight) => in_flight,
                    None => self.spawn_fetch(),
                };
                let outcome = in_flight.join().await;
                self.absorb(outcome);
            }

            if self.should_query && self.in_flight.is_none() {
                self.in_flight = Some(self.spawn_fetch());
            }

            if let Some(item) = self.pending.pop() {
                return Some(item);
            }
        }

        None
    }

    /// Turn the enumerator into a stream
    ///
    /// The stream form hides [`EndReason`]; see the module docs.
    pub fn into_stream(self) -> BoxStream<'static, T> {
        stream::unfold(self, |mut enumerator| async move {
            enumerator
                .next_item()
                .await
                .map(|item| (item, enumerator))
        })
        .boxed()
    }

    /// Why the walk ended, once it has
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    /// Number of fetches issued so far, retries included
    pub fn fetch_attempts(&self) -> u64 {
        self.fetch_attempts
    }

    /// Number of pages successfully decoded so far
    pub fn pages_decoded(&self) -> u64 {
        self.pages_decoded
    }

    /// Retries spent so far
    pub fn retries_used(&self) -> u32 {
        self.budget.retries_used
    }

    fn spawn_fetch(&mut self) -> InFlight {
        let window = self.window;
        let resource = self.query.render(window);
        let fetcher = Arc::clone(&self.fetcher);
        self.fetch_attempts += 1;

        debug!(resource = %resource, attempt = self.fetch_attempts, "Requesting page");
        let handle = tokio::spawn(async move { fetcher.fetch(&resource).await });

        InFlight { window, handle }
    }

    fn absorb(&mut self, outcome: FetchOutcome) {
        let offset = self.window.offset;

        match self.decode(outcome) {
            Some(items) => {
                self.pages_decoded += 1;
                let count = items.len();
                debug!(offset, count, "Page decoded");

                if count < self.window.length as usize {
                    debug!(offset, count, "Short page, collection exhausted");
                    self.should_query = false;
                    self.end_reason = Some(EndReason::Exhausted);
                }

                self.pending.extend(items);
                self.window = self.window.next();
            }
            None => {
                if self.budget.try_consume() {
                    warn!(
                        offset,
                        retry = self.budget.retries_used,
                        remaining = self.budget.remaining(),
                        "Page unavailable, retrying"
                    );
                } else {
                    warn!(
                        offset,
                        max_retries = self.budget.max_retries,
                        "Page unavailable and retries exhausted, ending enumeration"
                    );
                    self.should_query = false;
                    self.end_reason = Some(EndReason::RetriesExhausted);
                }
            }
        }
    }

    fn decode(&self, outcome: FetchOutcome) -> Option<Vec<T>> {
        let body = outcome.into_body()?;
        match decode_page::<T>(&body) {
            Ok(items) => Some(items),
            Err(e) => {
                warn!(offset = self.window.offset, error = %e, "Discarding undecodable page");
                None
            }
        }
    }
}

impl<T> fmt::Debug for PageEnumerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageEnumerator")
            .field("query", &self.query)
            .field("window", &self.window)
            .field("budget", &self.budget)
            .field("should_query", &self.should_query)
            .field("pending", &self.pending.len())
            .field("in_flight", &self.in_flight.is_some())
            .field("end_reason", &self.end_reason)
            .finish_non_exhaustive()
    }
}
