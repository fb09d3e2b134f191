//! Incremental-loading pipeline for the game grid.
//!
//! Three cooperating pieces: the batch loader slices the filtered list into
//! fixed-size pages, the cancellable delay spaces out non-initial batches,
//! and the viewport trigger converts sentinel visibility into load requests.
//! `GameFeed` composes them and re-runs the evaluator on every filter change.

pub mod batch;
pub mod delay;
pub mod feed;
pub mod trigger;

pub use batch::{BatchLoader, PageCursor};
pub use delay::{start_delayed_task, DelayHandle};
pub use feed::{FeedConfig, FeedEvent, FeedSnapshot, GameFeed, CAROUSEL_PAGE_SIZE, GRID_PAGE_SIZE};
pub use trigger::{TriggerConfig, ViewportTrigger, VisibilityEvent};
