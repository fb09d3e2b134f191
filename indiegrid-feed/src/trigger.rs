//! Viewport-triggered loading.
//!
//! A sentinel element sits below the grid; its visibility events arrive on a
//! channel. The trigger turns those events into `request_next` calls, subject
//! to guards: more pages remain, no load in flight, and the initial batch has
//! already been delivered. It detaches on exhaustion so nothing fires after
//! the last batch.

use tokio::sync::mpsc;

use crate::feed::{FeedSnapshot, GameFeed};

/// A visibility observation for the sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityEvent {
    /// Fraction of the sentinel inside the viewport, 0.0–1.0.
    pub ratio: f64,
    /// Distance in pixels from the sentinel's leading edge to the viewport
    /// edge. Negative once the sentinel has entered.
    pub distance_px: f64,
}

/// Tuning for when an observation counts as "intersecting".
#[derive(Debug, Clone, Copy)]
pub struct TriggerConfig {
    /// Minimum visible fraction that counts as intersecting.
    pub threshold: f64,
    /// Lookahead margin: start loading while the sentinel is still this many
    /// pixels short of the viewport, so the next batch lands early.
    pub margin_px: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            margin_px: 200.0,
        }
    }
}

/// Wires sentinel visibility to the feed's `request_next`.
pub struct ViewportTrigger {
    config: TriggerConfig,
    attached: bool,
}

impl ViewportTrigger {
    pub fn new(config: TriggerConfig) -> Self {
        Self {
            config,
            attached: true,
        }
    }

    /// Whether the trigger is still observing its sentinel.
    pub fn attached(&self) -> bool {
        self.attached
    }

    /// Stop observing. Further events are ignored.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Guard decision for one observation against the current feed state.
    ///
    /// All conditions must hold: attached, sentinel intersecting (by ratio or
    /// within the lookahead margin), initial batch delivered, no load in
    /// flight, and more pages remaining. Rapid repeat events while a load is
    /// pending fall through the `loading` guard, so at most one load is ever
    /// scheduled per batch.
    pub fn should_fire(&self, event: VisibilityEvent, snapshot: &FeedSnapshot) -> bool {
        if !self.attached {
            return false;
        }
        let intersecting =
            event.ratio >= self.config.threshold || event.distance_px <= self.config.margin_px;
        intersecting
            && snapshot.initialized
            && snapshot.cursor.has_more
            && !snapshot.cursor.loading
    }

    /// Apply one observation: fire `request_next` if the guards pass, and
    /// detach once the feed is exhausted.
    ///
    /// Returns `true` when a load was scheduled.
    pub fn observe(&mut self, event: VisibilityEvent, feed: &mut GameFeed) -> bool {
        let snapshot = feed.snapshot();
        if snapshot.initialized && !snapshot.cursor.has_more && !snapshot.cursor.loading {
            // Exhausted: stop observing so nothing fires after the last batch.
            self.detach();
            return false;
        }
        if self.should_fire(event, &snapshot) {
            return feed.request_next();
        }
        false
    }

    /// Drive the trigger from an event channel until the sentinel unmounts
    /// (channel closes) or the feed is exhausted.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<VisibilityEvent>, feed: &mut GameFeed) {
        while let Some(event) = events.recv().await {
            self.observe(event, feed);
            if !self.attached {
                log::debug!("viewport trigger detached (feed exhausted)");
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/trigger_tests.rs"]
mod tests;
