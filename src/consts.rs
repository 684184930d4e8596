//! Shared numeric constants for the spatial engine.

// ── Viewport ────────────────────────────────────────────────────

/// Smallest allowed viewport scale.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed viewport scale.
pub const MAX_SCALE: f64 = 5.0;

/// Home scale on desktop-class devices.
pub const HOME_SCALE_DESKTOP: f64 = 1.0;

/// Home scale on constrained (small-screen / touch) devices.
pub const HOME_SCALE_CONSTRAINED: f64 = 0.6;

/// Fraction of the viewport the fitted bounding box may occupy on desktop.
pub const FIT_SHRINK_DESKTOP: f64 = 0.9;

/// Fraction of the viewport the fitted bounding box may occupy on constrained devices.
pub const FIT_SHRINK_CONSTRAINED: f64 = 0.8;

/// Wheel zoom sensitivity: `factor = exp(-dy * WHEEL_ZOOM_RATE)`.
pub const WHEEL_ZOOM_RATE: f64 = 0.002;

// ── Timing (milliseconds) ───────────────────────────────────────

/// Delay before the last home-scroll correction pass.
pub const HOME_CORRECTION_DELAY_MS: f64 = 100.0;

/// Debounce window for the published scroll offset snapshot.
pub const OFFSET_DEBOUNCE_MS: f64 = 100.0;

/// How long a plain click keeps a notebook-like element raised.
pub const CLICK_PROMOTION_MS: f64 = 2000.0;

// ── Geometry ────────────────────────────────────────────────────

/// Minimum width and height of a resized element, in canvas units.
pub const MIN_ELEMENT_SIZE: f64 = 50.0;

/// Horizontal gap between a container and an element released from it.
pub const RELEASE_GAP: f64 = 20.0;

// ── Stacking layers ─────────────────────────────────────────────

/// Baseline z-index for notebook-like kinds.
pub const Z_BACKGROUND: i64 = -1000;

/// Baseline z-index for every other kind.
pub const Z_NEUTRAL: i64 = 0;

/// Temporary z-index of a click-promoted notebook-like element.
pub const Z_CLICK_PROMOTED: i64 = 5_000;

/// Reserved z-index of the sole selected element.
pub const Z_FRONT: i64 = 10_000;
