//! Viewport model: scale, scroll offset, and screen/canvas conversion.
//!
//! `scroll` is in screen pixels, `scale` is a factor clamped to
//! [`MIN_SCALE`]..=[`MAX_SCALE`]. The mapping is
//!
//! ```text
//! canvas = (screen + scroll) / scale
//! screen = canvas * scale - scroll
//! ```
//!
//! Everything here is synchronous value math. The two stateful helpers at
//! the bottom, [`HomeCorrection`] and [`OffsetSnapshot`], are plain values
//! as well; time only enters through `now_ms` arguments supplied by the host.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use serde::Serialize;

use crate::consts::{MAX_SCALE, MIN_SCALE};
use crate::geom::{Point, Rect, Size};

/// Clamp a requested scale into the allowed range. Non-finite requests
/// resolve to `fallback`.
#[must_use]
pub fn clamp_scale(requested: f64, fallback: f64) -> f64 {
    if requested.is_finite() {
        requested.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        fallback.clamp(MIN_SCALE, MAX_SCALE)
    }
}

/// Camera state for the infinite canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub scroll: Point,
    /// Size of the visible area in screen pixels.
    pub screen_size: Size,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { scale: 1.0, scroll: Point::ORIGIN, screen_size: Size::default() }
    }
}

/// Read-only snapshot exposed to sibling UI (`getTransform`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale: f64,
    pub scroll_offset: Point,
    pub visible_center: Point,
}

impl Viewport {
    /// Convert a screen-space point to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        (screen + self.scroll) / self.scale
    }

    /// Convert a canvas-space point to screen coordinates.
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        canvas * self.scale - self.scroll
    }

    /// Convert a screen-space displacement to a canvas-space displacement.
    #[must_use]
    pub fn screen_delta_to_canvas(&self, delta: Point) -> Point {
        delta / self.scale
    }

    /// Screen-space center of the visible area.
    #[must_use]
    pub fn screen_center(&self) -> Point {
        Point::new(self.screen_size.width * 0.5, self.screen_size.height * 0.5)
    }

    /// Canvas point currently at the center of the visible area.
    #[must_use]
    pub fn visible_center(&self) -> Point {
        self.screen_to_canvas(self.screen_center())
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        Transform { scale: self.scale, scroll_offset: self.scroll, visible_center: self.visible_center() }
    }

    /// Update the visible area size. Non-finite or negative sizes are ignored.
    pub fn set_screen_size(&mut self, size: Size) {
        if size.width.is_finite() && size.height.is_finite() && size.width >= 0.0 && size.height >= 0.0 {
            self.screen_size = size;
        }
    }

    /// Set the scale, keeping the canvas point under `pivot` (screen space)
    /// fixed. Without a pivot the visible center is kept fixed.
    pub fn set_zoom(&mut self, new_scale: f64, pivot: Option<Point>) {
        let old = self.scale;
        let new = clamp_scale(new_scale, old);
        if (new - old).abs() < f64::EPSILON {
            return;
        }
        let pivot = pivot.filter(|p| p.is_finite()).unwrap_or_else(|| self.screen_center());
        self.scroll = (self.scroll + pivot) * (new / old) - pivot;
        self.scale = new;
    }

    /// Multiply the scale by `factor` about `pivot`. Non-positive or
    /// non-finite factors are ignored.
    pub fn zoom_by(&mut self, factor: f64, pivot: Point) {
        if factor.is_finite() && factor > 0.0 {
            self.set_zoom(self.scale * factor, Some(pivot));
        }
    }

    /// Add a screen-space delta to the scroll offset.
    pub fn pan(&mut self, delta: Point) {
        if delta.is_finite() {
            self.scroll = self.scroll + delta;
        }
    }

    /// Scroll so `canvas` sits at the visible center, optionally changing scale first.
    pub fn center_on_point(&mut self, canvas: Point, scale: Option<f64>) {
        if let Some(scale) = scale {
            self.scale = clamp_scale(scale, self.scale);
        }
        if canvas.is_finite() {
            self.scroll = canvas * self.scale - self.screen_center();
        }
    }

    /// Choose a scale that fits `rect` into `shrink` of the visible area and
    /// center on it. With no known screen size only the centering happens.
    pub fn fit_rect(&mut self, rect: Rect, shrink: f64) {
        let screen = self.screen_size;
        let scale = if screen.is_usable() {
            let w = rect.size.width.max(1.0);
            let h = rect.size.height.max(1.0);
            Some((screen.width / w).min(screen.height / h) * shrink)
        } else {
            None
        };
        self.center_on_point(rect.center(), scale);
    }

    /// Jump to `home_scale` with the canvas origin at the top-left corner.
    pub fn go_home(&mut self, home_scale: f64) {
        self.scale = clamp_scale(home_scale, 1.0);
        self.scroll = Point::ORIGIN;
    }
}

/// Which re-application of the home scroll is still outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionStage {
    AwaitingPaint,
    AwaitingTimer,
    Done,
}

/// Repeated scroll-to-origin after `go_home`.
///
/// Late layout reflows can silently reset the host's scroll position, so
/// the origin scroll is applied immediately, again on the next paint, and
/// once more after a short delay. Any intentional user scroll cancels the
/// remaining passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeCorrection {
    stage: CorrectionStage,
    due_ms: f64,
}

impl HomeCorrection {
    /// Begin tracking; the synchronous pass is the caller's job.
    #[must_use]
    pub fn start(now_ms: f64, delay_ms: f64) -> Self {
        Self { stage: CorrectionStage::AwaitingPaint, due_ms: now_ms + delay_ms }
    }

    #[must_use]
    pub fn stage(&self) -> CorrectionStage {
        self.stage
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stage != CorrectionStage::Done
    }

    /// Paint pass. Returns true when the scroll was forced.
    pub fn on_paint(&mut self, viewport: &mut Viewport) -> bool {
        if self.stage != CorrectionStage::AwaitingPaint {
            return false;
        }
        viewport.scroll = Point::ORIGIN;
        self.stage = CorrectionStage::AwaitingTimer;
        true
    }

    /// Delayed pass. Returns true when the scroll was forced. A timer that
    /// fires before the paint pass completes both.
    pub fn on_timer(&mut self, now_ms: f64, viewport: &mut Viewport) -> bool {
        if !self.is_active() || now_ms < self.due_ms {
            return false;
        }
        viewport.scroll = Point::ORIGIN;
        self.stage = CorrectionStage::Done;
        true
    }

    /// When the delayed pass is due, while one is still outstanding.
    #[must_use]
    pub fn next_due(&self) -> Option<f64> {
        self.is_active().then_some(self.due_ms)
    }

    /// The user scrolled on purpose; stop fighting them.
    pub fn cancel(&mut self) {
        self.stage = CorrectionStage::Done;
    }
}

/// Debounced mirror of the scroll offset for consumers that re-render on change.
///
/// Staleness is bounded: the first unpublished change sets a deadline one
/// window away and later changes do not push it back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSnapshot {
    published: Point,
    pending: Option<Point>,
    due_ms: f64,
    window_ms: f64,
}

impl OffsetSnapshot {
    #[must_use]
    pub fn new(initial: Point, window_ms: f64) -> Self {
        Self { published: initial, pending: None, due_ms: 0.0, window_ms }
    }

    /// Last published value.
    #[must_use]
    pub fn value(&self) -> Point {
        self.published
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value may be published.
    #[must_use]
    pub fn next_due(&self) -> Option<f64> {
        self.pending.map(|_| self.due_ms)
    }

    /// Record the live offset at `now_ms`. Returns true when this opens a new
    /// window, i.e. the caller must arrange a [`Self::poll`] at `now_ms + window`.
    pub fn observe(&mut self, live: Point, now_ms: f64) -> bool {
        match self.pending {
            Some(_) => {
                self.pending = Some(live);
                false
            }
            None if live != self.published => {
                self.pending = Some(live);
                self.due_ms = now_ms + self.window_ms;
                true
            }
            None => false,
        }
    }

    /// Publish the pending value if its window has elapsed.
    pub fn poll(&mut self, now_ms: f64) -> Option<Point> {
        let pending = self.pending?;
        if now_ms < self.due_ms {
            return None;
        }
        self.pending = None;
        if pending == self.published {
            return None;
        }
        self.published = pending;
        Some(pending)
    }
}
