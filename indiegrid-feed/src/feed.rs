//! Feed controller: evaluator → batch loader → event channel.
//!
//! `GameFeed` owns the catalog snapshot and the active filter, re-runs the
//! evaluator whenever either changes, and drives the batch loader with the
//! artificial load delay. Consumers watch a `FeedEvent` channel, the same
//! message-channel shape the rest of the workspace uses for background work.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use indiegrid_catalog::{apply_filters, FilterSpec, Game};
use tokio::sync::mpsc;

use crate::batch::{BatchLoader, PageCursor};
use crate::delay::{start_delayed_task, DelayHandle};

/// Grid page size from the reference layout.
pub const GRID_PAGE_SIZE: usize = 12;
/// Carousel thumbnail strip variant.
pub const CAROUSEL_PAGE_SIZE: usize = 4;
/// Artificial delay before a non-initial batch lands.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(1100);

/// Tuning for a feed instance.
#[derive(Debug, Clone, Copy)]
pub struct FeedConfig {
    pub page_size: usize,
    /// Progress-signalling delay for non-initial batches. Not a correctness
    /// mechanism; tests shrink it or drive a paused clock.
    pub load_delay: Duration,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: GRID_PAGE_SIZE,
            load_delay: DEFAULT_LOAD_DELAY,
        }
    }
}

impl FeedConfig {
    /// Preset for the carousel-thumbnail variant.
    pub fn carousel() -> Self {
        Self {
            page_size: CAROUSEL_PAGE_SIZE,
            ..Self::default()
        }
    }
}

/// Messages emitted as the feed advances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// The filter or catalog changed and batch 0 was delivered.
    Reset { visible: usize, total: usize },
    /// A delayed batch landed.
    BatchLoaded {
        batch: usize,
        appended: usize,
        visible: usize,
    },
    /// The last batch has been delivered; no further loads will fire.
    Exhausted,
}

/// A point-in-time view of feed state for guard decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedSnapshot {
    pub cursor: PageCursor,
    pub initialized: bool,
    pub visible: usize,
    pub total: usize,
}

struct FeedState {
    loader: BatchLoader,
    /// Bumped on every reset. A delayed completion from an older generation
    /// finds the mismatch and appends nothing, even if its cancel raced.
    generation: u64,
}

/// The filtering/pagination pipeline behind the game grid.
pub struct GameFeed {
    catalog: Vec<Game>,
    spec: FilterSpec,
    config: FeedConfig,
    state: Arc<Mutex<FeedState>>,
    pending: Option<DelayHandle>,
    events: mpsc::UnboundedSender<FeedEvent>,
}

impl GameFeed {
    /// Create an empty feed and the receiving end of its event channel.
    pub fn new(config: FeedConfig) -> (Self, mpsc::UnboundedReceiver<FeedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let feed = Self {
            catalog: Vec::new(),
            spec: FilterSpec::default(),
            config,
            state: Arc::new(Mutex::new(FeedState {
                loader: BatchLoader::new(Vec::new(), config.page_size),
                generation: 0,
            })),
            pending: None,
            events: tx,
        };
        (feed, rx)
    }

    /// Replace the catalog snapshot (after an upstream fetch) and reset.
    pub fn set_catalog(&mut self, games: Vec<Game>) {
        self.catalog = games;
        self.reset();
    }

    /// Replace the whole filter spec and reset.
    ///
    /// Partial in-place mutation is deliberately not offered; the filter UI
    /// always hands over a complete new spec.
    pub fn set_filter(&mut self, spec: FilterSpec) {
        self.spec = spec;
        self.reset();
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.spec
    }

    /// Re-filter, reset pagination, and deliver a fresh initial batch.
    ///
    /// Cancels any pending delayed batch first; the generation bump makes the
    /// cancellation airtight even if the timer fires concurrently.
    fn reset(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
        let filtered = apply_filters(&self.catalog, &self.spec);
        let mut state = self.lock_state();
        state.generation += 1;
        state.loader = BatchLoader::new(filtered, self.config.page_size);
        state.loader.load_initial();
        let cursor = state.loader.cursor();
        let visible = state.loader.visible().len();
        let total = state.loader.total();
        drop(state);

        let _ = self.events.send(FeedEvent::Reset { visible, total });
        if !cursor.has_more {
            let _ = self.events.send(FeedEvent::Exhausted);
        }
    }

    /// Request the next batch, subject to the in-flight guard.
    ///
    /// Returns `true` when a delayed load was scheduled. The batch appends
    /// after `load_delay` unless the filter changes first.
    pub fn request_next(&mut self) -> bool {
        let generation = {
            let mut state = self.lock_state();
            if !state.loader.begin_load() {
                return false;
            }
            state.generation
        };

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        self.pending = Some(start_delayed_task(self.config.load_delay, move || {
            let mut state = state.lock().unwrap_or_else(|e| e.into_inner());
            if state.generation != generation {
                // A filter change reset the loader while we slept.
                log::debug!("dropping stale batch (generation {generation})");
                return;
            }
            let appended = state.loader.complete_load();
            let cursor = state.loader.cursor();
            let visible = state.loader.visible().len();
            drop(state);

            let _ = events.send(FeedEvent::BatchLoaded {
                batch: cursor.batch,
                appended,
                visible,
            });
            if !cursor.has_more {
                let _ = events.send(FeedEvent::Exhausted);
            }
        }));
        true
    }

    /// Clone of the currently displayed items, in delivery order.
    pub fn visible(&self) -> Vec<Game> {
        self.lock_state().loader.visible().to_vec()
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        let state = self.lock_state();
        FeedSnapshot {
            cursor: state.loader.cursor(),
            initialized: state.loader.initialized(),
            visible: state.loader.visible().len(),
            total: state.loader.total(),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FeedState> {
        // A poisoned lock only means a panic mid-append; the state itself
        // is still structurally sound.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
#[path = "tests/feed_tests.rs"]
mod tests;
