//! Input model: pointer targets, modifier keys, buttons, and the gesture state machine.
//!
//! The host does the DOM hit-testing and tells the engine which part of an
//! element the pointer went down on ([`PointerTarget`]). `InputState` is the
//! active gesture tracked between pointer-down and pointer-up; it carries
//! everything needed to recompute the element's geometry from the original
//! values on every move, and to revert on cancel.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::element::ElementId;
use crate::geom::{Point, Rect};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    /// Meta / Command key.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS. Turns wheel into zoom.
    #[must_use]
    pub fn zoom_chord(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive = down.
    pub dy: f64,
}

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    #[must_use]
    pub fn moves_north(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn moves_south(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    #[must_use]
    pub fn moves_east(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    #[must_use]
    pub fn moves_west(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }
}

/// Which part of an element the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dedicated drag handle strip.
    Handle,
    /// The element body (text, controls, media).
    Body,
    /// One of the eight resize handles.
    Resize(ResizeAnchor),
}

/// Persistent UI state: the things that used to be scattered singletons.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// The id of the sole selected element, if any.
    pub selected_id: Option<ElementId>,
    /// Background drags pan the canvas, and element drags do too.
    pub pan_mode: bool,
}

/// Geometry of an element captured at gesture start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureOrigin {
    /// Stored absolute rectangle.
    pub rect: Rect,
    /// Position inside the parent, for anchored elements.
    pub relative: Option<Point>,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is moving an element.
    DraggingElement {
        id: ElementId,
        /// Screen-space pointer position at pointer-down.
        start_screen: Point,
        origin: GestureOrigin,
    },
    /// The user is resizing an element by one of its eight handles.
    ResizingElement {
        id: ElementId,
        anchor: ResizeAnchor,
        /// Screen-space pointer position at pointer-down.
        start_screen: Point,
        origin: GestureOrigin,
    },
}

impl InputState {
    /// Element targeted by the current gesture, if any.
    #[must_use]
    pub fn element_id(&self) -> Option<ElementId> {
        match self {
            Self::DraggingElement { id, .. } | Self::ResizingElement { id, .. } => Some(*id),
            Self::Idle | Self::Panning { .. } => None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Bookkeeping for the global move/up listeners installed during a gesture.
///
/// At most one pair is ever installed, however many gestures start, end or
/// get cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureListeners {
    installed: bool,
}

impl CaptureListeners {
    /// Returns true when the host must install the listeners now.
    pub fn install(&mut self) -> bool {
        !std::mem::replace(&mut self.installed, true)
    }

    /// Returns true when the host must remove the listeners now.
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.installed, false)
    }

    #[must_use]
    pub fn count(&self) -> usize {
        usize::from(self.installed)
    }
}
