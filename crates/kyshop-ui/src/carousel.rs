//! Hero carousel state.
//!
//! [`SlideState`] is a pure state machine over explicit time: every
//! operation that depends on the clock takes `now`, the time elapsed since
//! the carousel was mounted. Drivers (the tokio [`CarouselHandle`] or the
//! browser storefront) sleep until [`SlideState::next_deadline`] and call
//! [`SlideState::poll`].
//!
//! The machine has two modes and each owns exactly one pending deadline:
//!
//! - [`Mode::Auto`]: the next automatic advance.
//! - [`Mode::Suspended`]: when automatic advancement comes back.
//!
//! A manual navigation always replaces the whole mode, so an earlier
//! reactivation deadline cannot survive it.
//!
//! [`CarouselHandle`]: crate::CarouselHandle

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::UiError;

/// Carousel timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselTiming {
    /// Time between automatic advances.
    pub interval: Duration,
    /// Cooldown after manual navigation.
    pub resume_after: Duration,
}

impl Default for CarouselTiming {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            resume_after: Duration::from_secs(5),
        }
    }
}

/// Auto-play mode, carrying its single pending deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    Auto { next_advance_at: Duration },
    Suspended { resume_at: Duration },
}

impl Mode {
    pub fn deadline(&self) -> Duration {
        match *self {
            Mode::Auto { next_advance_at } => next_advance_at,
            Mode::Suspended { resume_at } => resume_at,
        }
    }
}

/// What a [`SlideState::poll`] fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideEvent {
    /// Automatic advance to this index.
    Advanced(usize),
    /// The cooldown ended and auto-play is back on.
    Resumed,
}

/// Current slide and auto-play state of the hero carousel.
#[derive(Debug, Clone)]
pub struct SlideState<T> {
    items: Vec<T>,
    index: usize,
    mode: Mode,
    timing: CarouselTiming,
}

impl<T> SlideState<T> {
    /// Mount the carousel at `now` with auto-play on.
    pub fn new(items: Vec<T>, timing: CarouselTiming, now: Duration) -> Self {
        Self {
            items,
            index: 0,
            mode: Mode::Auto {
                next_advance_at: now + timing.interval,
            },
            timing,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn timing(&self) -> CarouselTiming {
        self.timing
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True unless a manual navigation happened within the cooldown.
    pub fn is_auto(&self) -> bool {
        matches!(self.mode, Mode::Auto { .. })
    }

    /// Index of the displayed slide, `None` when there are no slides.
    pub fn current(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.index)
    }

    /// The displayed item, `None` when there are no slides.
    pub fn current_item(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    /// The pending deadline. `None` with no slides, since nothing can move.
    pub fn next_deadline(&self) -> Option<Duration> {
        (!self.items.is_empty()).then(|| self.mode.deadline())
    }

    /// Move forward one slide, wrapping.
    pub fn advance(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.index = (self.index + 1) % len;
    }

    /// Move back one slide, wrapping.
    pub fn retreat(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.index = (self.index + len - 1) % len;
    }

    /// Jump to slide `index` (a dot click). Suspends auto-play.
    ///
    /// An out-of-range index is rejected and leaves the state unchanged.
    pub fn go_to(&mut self, index: usize, now: Duration) -> Result<(), UiError> {
        if index >= self.items.len() {
            tracing::warn!(index, len = self.items.len(), "rejected slide jump");
            return Err(UiError::SlideOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.index = index;
        self.suspend(now);
        Ok(())
    }

    /// User clicked the next arrow.
    pub fn next(&mut self, now: Duration) {
        self.advance();
        self.suspend(now);
    }

    /// User clicked the previous arrow.
    pub fn previous(&mut self, now: Duration) {
        self.retreat();
        self.suspend(now);
    }

    /// Fire the pending deadline if it has passed.
    pub fn poll(&mut self, now: Duration) -> Option<SlideEvent> {
        if self.items.is_empty() || now < self.mode.deadline() {
            return None;
        }

        match self.mode {
            Mode::Auto { .. } => {
                self.advance();
                self.mode = Mode::Auto {
                    next_advance_at: now + self.timing.interval,
                };
                tracing::debug!(index = self.index, "carousel advanced");
                Some(SlideEvent::Advanced(self.index))
            }
            Mode::Suspended { .. } => {
                self.mode = Mode::Auto {
                    next_advance_at: now + self.timing.interval,
                };
                tracing::debug!("carousel auto-play resumed");
                Some(SlideEvent::Resumed)
            }
        }
    }

    /// Replace the slides. The index is clamped into range and, when
    /// auto-playing, the advance timer restarts from `now`.
    pub fn set_items(&mut self, items: Vec<T>, now: Duration) {
        self.items = items;
        self.index = self.index.min(self.items.len().saturating_sub(1));
        if self.is_auto() {
            self.mode = Mode::Auto {
                next_advance_at: now + self.timing.interval,
            };
        }
        tracing::debug!(len = self.items.len(), index = self.index, "carousel items replaced");
    }

    fn suspend(&mut self, now: Duration) {
        let resume_at = now + self.timing.resume_after;
        self.mode = Mode::Suspended { resume_at };
        tracing::debug!(index = self.index, ?resume_at, "carousel auto-play suspended");
    }
}
