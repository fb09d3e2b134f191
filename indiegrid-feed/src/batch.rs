//! Batch pagination over a filtered, sorted game list.
//!
//! The loader maintains a monotonically advancing window over an in-memory
//! sequence. It performs no I/O of its own and cannot fail; if the upstream
//! fetch produced nothing, it simply has nothing to paginate.

use indiegrid_catalog::Game;

/// Pagination state for the current filtered sequence.
///
/// Created fresh whenever the filtered list changes identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Zero-based index of the most recently delivered batch.
    pub batch: usize,
    /// Whether undelivered items remain past the current window.
    pub has_more: bool,
    /// Whether a (delayed) load is currently in flight.
    pub loading: bool,
}

/// Slices the filtered sequence into fixed-size batches.
pub struct BatchLoader {
    source: Vec<Game>,
    page_size: usize,
    visible: Vec<Game>,
    cursor: PageCursor,
    initialized: bool,
}

impl BatchLoader {
    /// Page size must be at least 1; zero would never make progress.
    pub fn new(source: Vec<Game>, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let has_more = !source.is_empty();
        Self {
            source,
            page_size,
            visible: Vec::new(),
            cursor: PageCursor {
                batch: 0,
                has_more,
                loading: false,
            },
            initialized: false,
        }
    }

    /// Deliver batch 0 immediately, replacing the displayed set wholesale.
    ///
    /// Also clears any in-flight marker: an initial load supersedes whatever
    /// was pending against the old sequence.
    pub fn load_initial(&mut self) -> &[Game] {
        let end = self.page_size.min(self.source.len());
        self.visible.clear();
        self.visible.extend_from_slice(&self.source[..end]);
        self.cursor = PageCursor {
            batch: 0,
            has_more: self.source.len() > end,
            loading: false,
        };
        self.initialized = true;
        log::debug!(
            "initial batch: {} of {} items, has_more={}",
            end,
            self.source.len(),
            self.cursor.has_more
        );
        &self.visible
    }

    /// Mark a non-initial load as in flight.
    ///
    /// Returns `false` (and changes nothing) when a load is already pending,
    /// nothing remains, or the initial batch has not been delivered yet.
    pub fn begin_load(&mut self) -> bool {
        if self.cursor.loading || !self.cursor.has_more || !self.initialized {
            return false;
        }
        self.cursor.loading = true;
        true
    }

    /// Append the next batch and advance the cursor.
    ///
    /// Call only after [`begin_load`](Self::begin_load) returned `true` and
    /// the artificial delay elapsed. Returns how many items were appended.
    pub fn complete_load(&mut self) -> usize {
        debug_assert!(self.cursor.loading, "complete_load without begin_load");
        let start = (self.cursor.batch + 1) * self.page_size;
        let end = (start + self.page_size).min(self.source.len());
        let appended = end.saturating_sub(start.min(end));
        if appended > 0 {
            self.visible.extend_from_slice(&self.source[start..end]);
            self.cursor.batch += 1;
        }
        self.cursor.loading = false;
        self.cursor.has_more = self.source.len() > self.visible.len();
        log::debug!(
            "batch {}: appended {} items ({}/{} delivered), has_more={}",
            self.cursor.batch,
            appended,
            self.visible.len(),
            self.source.len(),
            self.cursor.has_more
        );
        appended
    }

    /// Drop the in-flight marker without appending (cancelled load).
    pub fn abandon_load(&mut self) {
        self.cursor.loading = false;
    }

    pub fn visible(&self) -> &[Game] {
        &self.visible
    }

    pub fn cursor(&self) -> PageCursor {
        self.cursor
    }

    /// Whether the initial batch has been delivered for this sequence.
    pub fn initialized(&self) -> bool {
        self.initialized
    }

    pub fn total(&self) -> usize {
        self.source.len()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
#[path = "tests/batch_tests.rs"]
mod tests;
