//! Element records, the closed kind table, and the patch type sent to the host.
//!
//! Every kind-dependent decision in the engine (default size, whether a kind
//! can hold other elements, where a drag may start, which stacking layer it
//! starts on, which rotation steps it offers) is answered by
//! [`ElementKind::spec`], so the rest of the crate never matches on kinds
//! directly.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geom::{Point, Rect, Size};

/// Unique identifier for an element.
pub type ElementId = Uuid;

/// The kind of a board element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    StickyNote,
    Text,
    Document,
    Image,
    Video,
    Audio,
    Link,
    Embed,
    Timer,
    Stopwatch,
    Grid,
    Checklist,
    Calendar,
    Drawing,
    Shape,
    Table,
    Notebook,
    Journal,
    Planner,
    Folder,
    Frame,
    /// A tag this engine does not know, typically written by a newer host.
    #[serde(other)]
    Unknown,
}

/// Where on an element a pointer-down may start a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragRegion {
    /// Only the dedicated handle strip; the body is left to in-place editing.
    Handle,
    /// Anywhere on the element.
    Anywhere,
}

/// Static capabilities of an element kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindSpec {
    /// Size used for new elements and for records with unusable geometry.
    pub default_size: Size,
    /// The kind is a container: other elements can be anchored inside it.
    pub accepts_containment: bool,
    pub drag_region: DragRegion,
    /// Starts on the background layer and gets temporary click promotion.
    pub notebook_like: bool,
    /// Fixed rotation steps (degrees) exposed by the kind's controls.
    pub rotation_steps: &'static [f64],
    /// The host has a renderer for this kind.
    pub renderable: bool,
}

const NO_STEPS: &[f64] = &[];
const FINE_AND_QUARTER: &[f64] = &[15.0, 90.0];
const QUARTER: &[f64] = &[90.0];

impl KindSpec {
    const fn free(width: f64, height: f64) -> Self {
        Self {
            default_size: Size::new(width, height),
            accepts_containment: false,
            drag_region: DragRegion::Anywhere,
            notebook_like: false,
            rotation_steps: NO_STEPS,
            renderable: true,
        }
    }

    const fn editable(width: f64, height: f64) -> Self {
        Self { drag_region: DragRegion::Handle, ..Self::free(width, height) }
    }

    const fn notebook(width: f64, height: f64) -> Self {
        Self { notebook_like: true, ..Self::editable(width, height) }
    }

    const fn container(width: f64, height: f64) -> Self {
        Self { accepts_containment: true, drag_region: DragRegion::Handle, ..Self::free(width, height) }
    }

    const fn rotatable(self, steps: &'static [f64]) -> Self {
        Self { rotation_steps: steps, ..self }
    }
}

impl ElementKind {
    /// Capability table for this kind.
    #[must_use]
    pub const fn spec(self) -> KindSpec {
        match self {
            Self::StickyNote => KindSpec::editable(200.0, 200.0).rotatable(FINE_AND_QUARTER),
            Self::Text => KindSpec::editable(240.0, 80.0).rotatable(FINE_AND_QUARTER),
            Self::Document => KindSpec::editable(480.0, 640.0),
            Self::Image => KindSpec::free(320.0, 240.0).rotatable(FINE_AND_QUARTER),
            Self::Video => KindSpec::free(480.0, 270.0),
            Self::Audio => KindSpec::free(320.0, 80.0),
            Self::Link => KindSpec::free(320.0, 120.0),
            Self::Embed => KindSpec::free(480.0, 360.0),
            Self::Timer | Self::Stopwatch => KindSpec::free(220.0, 160.0),
            Self::Grid => KindSpec::free(400.0, 400.0).rotatable(QUARTER),
            Self::Checklist => KindSpec::editable(260.0, 320.0),
            Self::Calendar => KindSpec::free(420.0, 360.0),
            Self::Drawing => KindSpec::free(400.0, 300.0).rotatable(FINE_AND_QUARTER),
            Self::Shape => KindSpec::free(160.0, 160.0).rotatable(FINE_AND_QUARTER),
            Self::Table => KindSpec::editable(480.0, 320.0),
            Self::Notebook | Self::Journal | Self::Planner => KindSpec::notebook(600.0, 800.0),
            Self::Folder => KindSpec::container(300.0, 300.0),
            Self::Frame => KindSpec::container(800.0, 600.0),
            Self::Unknown => KindSpec { renderable: false, ..KindSpec::free(200.0, 200.0) },
        }
    }

    #[must_use]
    pub const fn is_container(self) -> bool {
        self.spec().accepts_containment
    }

    #[must_use]
    pub const fn is_notebook_like(self) -> bool {
        self.spec().notebook_like
    }
}

/// A board element in canonical shape.
///
/// `position` is always absolute canvas space. While `parent_id` is set, the
/// rendered position is derived from the parent instead (see
/// [`crate::registry::Registry::render_position`]) and `hidden` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub position: Point,
    pub size: Size,
    /// Degrees, clockwise about the element center, in `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_position: Option<Point>,
    #[serde(default)]
    pub hidden: bool,
    /// Opaque per-kind payload. Containers keep `elementIds` here.
    #[serde(default)]
    pub content: serde_json::Value,
}

impl Element {
    /// A fresh, free-floating element of `kind` at `position` with its default size.
    #[must_use]
    pub fn new(id: ElementId, kind: ElementKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            size: kind.spec().default_size,
            rotation: 0.0,
            z_index: None,
            parent_id: None,
            relative_position: None,
            hidden: false,
            content: serde_json::json!({}),
        }
    }

    /// Stored absolute rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    /// The complete positional sub-object of this record.
    #[must_use]
    pub fn placement(&self) -> Placement {
        Placement {
            position: self.position,
            size: self.size,
            z_index: self.z_index,
            rotation: self.rotation,
        }
    }

    #[must_use]
    pub fn content(&self) -> Content<'_> {
        Content::new(&self.content)
    }
}

/// Normalize an angle in degrees to `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    if !deg.is_finite() {
        return 0.0;
    }
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 { 0.0 } else { r }
}

/// Position, size, stacking and rotation, always sent together.
///
/// The host merges patches shallowly, so sending any of these fields alone
/// would risk overwriting the others with stale values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub position: Point,
    pub size: Size,
    pub z_index: Option<i64>,
    pub rotation: f64,
}

/// Update for an element, as handed to the host's `update_element`.
///
/// `parent_id` and `relative_position` use `Some(None)` to mean "remove the
/// key"; they serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(flatten)]
    pub placement: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<ElementId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_position: Option<Option<Point>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
    /// Content keys to merge; `null` values delete keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

impl ElementPatch {
    /// Patch carrying only the complete placement.
    #[must_use]
    pub fn placement(placement: Placement) -> Self {
        Self { placement: Some(placement), ..Self::default() }
    }

    /// Patch that anchors the element inside `parent` at `relative`.
    #[must_use]
    pub fn anchored(placement: Placement, parent: ElementId, relative: Point) -> Self {
        Self {
            placement: Some(placement),
            parent_id: Some(Some(parent)),
            relative_position: Some(Some(relative)),
            hidden: Some(true),
            content: None,
        }
    }

    /// Patch that frees the element onto the canvas at `placement`.
    #[must_use]
    pub fn detached(placement: Placement) -> Self {
        Self {
            placement: Some(placement),
            parent_id: Some(None),
            relative_position: Some(None),
            hidden: Some(false),
            content: None,
        }
    }

    /// Patch replacing a container's member list.
    #[must_use]
    pub fn element_ids(ids: &[ElementId]) -> Self {
        Self {
            content: Some(serde_json::json!({ "elementIds": ids })),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placement.is_none()
            && self.parent_id.is_none()
            && self.relative_position.is_none()
            && self.hidden.is_none()
            && self.content.is_none()
    }
}

/// Typed access to well-known keys of an element's `content`.
pub struct Content<'a> {
    value: &'a serde_json::Value,
}

impl<'a> Content<'a> {
    #[must_use]
    pub fn new(value: &'a serde_json::Value) -> Self {
        Self { value }
    }

    /// Member ids of a container, in stored order. Entries that are not
    /// valid UUID strings are skipped.
    #[must_use]
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.value
            .get("elementIds")
            .and_then(serde_json::Value::as_array)
            .map(|ids| {
                ids.iter()
                    .filter_map(serde_json::Value::as_str)
                    .filter_map(|s| match Uuid::parse_str(s) {
                        Ok(id) => Some(id),
                        Err(e) => {
                            tracing::warn!(raw = s, error = %e, "skipping malformed container member id");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
