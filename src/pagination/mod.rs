//! Pagination module
//!
//! Streams offset-windowed collections such as `servers/index.json` and
//! `zones/all/index.json`.
//!
//! # Overview
//!
//! [`PageEnumerator`] walks a collection in fixed-size windows. It keeps one
//! fetch in flight for the next page while the current page is consumed,
//! retries failed fetches up to a budget, and stops at the first short page.
//! The fetch itself is delegated to a [`PageFetcher`], which only reports
//! [`FetchOutcome::Success`] or [`FetchOutcome::Unavailable`].
//!
//! # Known limitation
//!
//! A consumer of the stream cannot tell "collection fully read" from "gave
//! up after repeated failures"; both end the stream normally. Callers that
//! need the difference should pull with [`PageEnumerator::next_item`] and inspect
//! [`PageEnumerator::end_reason`] afterwards.

mod enumerator;
mod types;

pub use enumerator::PageEnumerator;
pub use types::{EndReason, FetchOutcome, PageFetcher, PageQuery, PageWindow, RetryBudget};

#[cfg(test)]
mod tests;
