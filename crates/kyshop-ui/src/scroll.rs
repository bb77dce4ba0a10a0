//! Arrow visibility for the horizontally scrolling category strip.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Scroll tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollSettings {
    /// The right arrow hides once the strip is this close to its end.
    pub tolerance: f64,
    /// Distance moved per arrow click.
    pub step: f64,
    /// Smooth scroll duration.
    pub smooth: Duration,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            tolerance: 10.0,
            step: 300.0,
            smooth: Duration::from_millis(300),
        }
    }
}

/// Horizontal scroll geometry of the strip, as reported by the DOM
/// (`scrollLeft`, `scrollWidth`, `clientWidth`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollGeometry {
    pub offset: f64,
    pub total_width: f64,
    pub visible_width: f64,
}

impl ScrollGeometry {
    pub fn new(offset: f64, total_width: f64, visible_width: f64) -> Self {
        Self {
            offset,
            total_width,
            visible_width,
        }
    }

    /// Largest reachable offset.
    pub fn max_offset(&self) -> f64 {
        (self.total_width - self.visible_width).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

/// Which arrows are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrows {
    pub left: bool,
    pub right: bool,
}

/// Arrow visibility derived from the strip geometry.
#[derive(Debug, Clone)]
pub struct ScrollAffordanceState {
    settings: ScrollSettings,
    geometry: Option<ScrollGeometry>,
    arrows: Arrows,
}

impl Default for ScrollAffordanceState {
    fn default() -> Self {
        Self::new(ScrollSettings::default())
    }
}

impl ScrollAffordanceState {
    /// Before mount the left arrow is hidden and the right one shown.
    pub fn new(settings: ScrollSettings) -> Self {
        Self {
            settings,
            geometry: None,
            arrows: Arrows {
                left: false,
                right: true,
            },
        }
    }

    pub fn settings(&self) -> ScrollSettings {
        self.settings
    }

    pub fn geometry(&self) -> Option<ScrollGeometry> {
        self.geometry
    }

    pub fn arrows(&self) -> Arrows {
        self.arrows
    }

    pub fn left_visible(&self) -> bool {
        self.arrows.left
    }

    pub fn right_visible(&self) -> bool {
        self.arrows.right
    }

    /// Initial recompute, before any user scroll.
    pub fn mount(&mut self, geometry: ScrollGeometry) -> Arrows {
        self.on_scroll(geometry)
    }

    /// Recompute on a scroll-position change.
    pub fn on_scroll(&mut self, geometry: ScrollGeometry) -> Arrows {
        self.geometry = Some(geometry);
        self.arrows = Arrows {
            left: geometry.offset > 0.0,
            right: geometry.offset
                < geometry.total_width - geometry.visible_width - self.settings.tolerance,
        };
        self.arrows
    }

    /// Animation for an arrow click, `None` before mount.
    ///
    /// Visibility is not touched here; the scroll events produced while the
    /// animation runs update it.
    pub fn scroll_by(&self, direction: Direction) -> Option<SmoothScroll> {
        let geometry = self.geometry?;
        let delta = match direction {
            Direction::Left => -self.settings.step,
            Direction::Right => self.settings.step,
        };
        let to = (geometry.offset + delta).clamp(0.0, geometry.max_offset());
        Some(SmoothScroll {
            from: geometry.offset,
            to,
            duration: self.settings.smooth,
        })
    }
}

/// Eased interpolation between two scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothScroll {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl SmoothScroll {
    pub fn target(&self) -> f64 {
        self.to
    }

    /// Offset `elapsed` into the animation.
    pub fn position_at(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_in_out(t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

/// Quadratic ease-in-out on `[0, 1]`.
fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(offset: f64) -> ScrollAffordanceState {
        let mut state = ScrollAffordanceState::default();
        state.mount(ScrollGeometry::new(offset, 1000.0, 400.0));
        state
    }

    #[test]
    fn test_before_mount() {
        let state = ScrollAffordanceState::default();
        assert!(!state.left_visible());
        assert!(state.right_visible());
        assert_eq!(state.scroll_by(Direction::Right), None);
    }

    #[test]
    fn test_at_start() {
        let state = mounted(0.0);
        assert_eq!(
            state.arrows(),
            Arrows {
                left: false,
                right: true
            }
        );
    }

    #[test]
    fn test_at_end() {
        let state = mounted(600.0);
        assert_eq!(
            state.arrows(),
            Arrows {
                left: true,
                right: false
            }
        );
    }

    #[test]
    fn test_tolerance_band() {
        let mut state = mounted(0.0);
        // 1000 - 400 - 10 = 590
        assert!(state.on_scroll(ScrollGeometry::new(589.0, 1000.0, 400.0)).right);
        assert!(!state.on_scroll(ScrollGeometry::new(590.0, 1000.0, 400.0)).right);
        assert!(!state.on_scroll(ScrollGeometry::new(595.0, 1000.0, 400.0)).right);
    }

    #[test]
    fn test_strip_that_fits_shows_no_arrows() {
        let mut state = ScrollAffordanceState::default();
        let arrows = state.mount(ScrollGeometry::new(0.0, 400.0, 400.0));
        assert!(!arrows.left);
        assert!(!arrows.right);
    }

    #[test]
    fn test_scroll_by_clamps() {
        let state = mounted(100.0);
        let left = state.scroll_by(Direction::Left).unwrap();
        assert_eq!((left.from, left.to), (100.0, 0.0));

        let right = state.scroll_by(Direction::Right).unwrap();
        assert_eq!(right.to, 400.0);

        let state = mounted(500.0);
        assert_eq!(state.scroll_by(Direction::Right).unwrap().to, 600.0);
    }

    #[test]
    fn test_scroll_by_does_not_recompute() {
        let state = mounted(0.0);
        state.scroll_by(Direction::Right);
        assert!(!state.left_visible());
    }

    #[test]
    fn test_smooth_scroll_curve() {
        let scroll = SmoothScroll {
            from: 0.0,
            to: 300.0,
            duration: Duration::from_millis(300),
        };
        assert_eq!(scroll.position_at(Duration::ZERO), 0.0);
        assert!((scroll.position_at(Duration::from_millis(150)) - 150.0).abs() < 1e-9);
        assert!(scroll.position_at(Duration::from_millis(75)) < 75.0);
        assert!(scroll.position_at(Duration::from_millis(225)) > 225.0);
        assert_eq!(scroll.position_at(Duration::from_millis(300)), 300.0);
        assert!(scroll.is_finished(Duration::from_millis(301)));
    }
}
