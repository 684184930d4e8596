//! Stacking order: kind baselines, selection promotion, click promotion.
//!
//! DESIGN
//! ======
//! Promotions are overrides held here, never written into element records.
//! The sole selected element renders at [`Z_FRONT`]; its stored `zIndex` is
//! captured once when the selection episode starts, and that captured value
//! is what gets committed while it is promoted and what it returns to when
//! deselected. Notebook-like kinds additionally rise to [`Z_CLICK_PROMOTED`]
//! for a short window after a plain click.

#[cfg(test)]
#[path = "zorder_test.rs"]
mod zorder_test;

use std::collections::HashMap;

use crate::consts::{Z_BACKGROUND, Z_CLICK_PROMOTED, Z_FRONT, Z_NEUTRAL};
use crate::element::{Element, ElementId, ElementKind};
use crate::registry::Registry;

/// Default stacking value for a kind.
#[must_use]
pub fn baseline(kind: ElementKind) -> i64 {
    if kind.is_notebook_like() { Z_BACKGROUND } else { Z_NEUTRAL }
}

/// Stacking value of an element with no promotion applied.
#[must_use]
pub fn base_z(element: &Element) -> i64 {
    element.z_index.unwrap_or_else(|| baseline(element.kind))
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Promotion {
    id: ElementId,
    /// Stored `zIndex` at the start of the episode.
    restore: Option<i64>,
}

/// An element leaving the front layer and the `zIndex` it must carry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Demotion {
    pub id: ElementId,
    pub restore: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ZOrder {
    promoted: Option<Promotion>,
    /// Click-promoted element id -> expiry time in ms.
    click_promoted: HashMap<ElementId, f64>,
}

impl ZOrder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Element currently on the front layer.
    #[must_use]
    pub fn promoted(&self) -> Option<ElementId> {
        self.promoted.map(|p| p.id)
    }

    /// Follow a selection change. Re-selecting the promoted element keeps
    /// the original capture. Returns the element that left the front layer.
    pub fn select(&mut self, selected: Option<&Element>) -> Option<Demotion> {
        if let (Some(current), Some(el)) = (self.promoted, selected) {
            if current.id == el.id {
                return None;
            }
        }
        let demoted = self.promoted.take().map(|p| Demotion { id: p.id, restore: p.restore });
        self.promoted = selected.map(|el| Promotion { id: el.id, restore: el.z_index });
        demoted
    }

    /// `zIndex` to write when committing `element`'s placement.
    #[must_use]
    pub fn committed_z(&self, element: &Element) -> Option<i64> {
        match self.promoted {
            Some(p) if p.id == element.id => p.restore,
            _ => element.z_index,
        }
    }

    /// Raise a notebook-like element for `duration_ms` after a plain click.
    /// Other kinds are ignored. Returns true when a promotion was recorded.
    pub fn click(&mut self, element: &Element, now_ms: f64, duration_ms: f64) -> bool {
        if !element.kind.is_notebook_like() {
            return false;
        }
        self.click_promoted.insert(element.id, now_ms + duration_ms);
        true
    }

    #[must_use]
    pub fn is_click_promoted(&self, id: &ElementId) -> bool {
        self.click_promoted.contains_key(id)
    }

    /// Drop click promotions whose window has elapsed. Returns the ids that reverted.
    pub fn expire(&mut self, now_ms: f64) -> Vec<ElementId> {
        let mut expired: Vec<ElementId> = self
            .click_promoted
            .iter()
            .filter(|(_, due)| now_ms >= **due)
            .map(|(id, _)| *id)
            .collect();
        expired.sort();
        for id in &expired {
            self.click_promoted.remove(id);
        }
        expired
    }

    /// Earliest pending click-promotion expiry.
    #[must_use]
    pub fn next_expiry(&self) -> Option<f64> {
        self.click_promoted.values().copied().reduce(f64::min)
    }

    /// Stop tracking a deleted element.
    pub fn forget(&mut self, id: &ElementId) {
        self.click_promoted.remove(id);
        if self.promoted.is_some_and(|p| p.id == *id) {
            self.promoted = None;
        }
    }

    /// Stacking value the renderer should use right now.
    #[must_use]
    pub fn effective_z(&self, element: &Element) -> i64 {
        if self.promoted.is_some_and(|p| p.id == element.id) {
            Z_FRONT
        } else if self.click_promoted.contains_key(&element.id) {
            Z_CLICK_PROMOTED.max(base_z(element))
        } else {
            base_z(element)
        }
    }

    /// Ids of free-canvas elements in back-to-front draw order. Unknown
    /// kinds have no renderer and are left out.
    #[must_use]
    pub fn render_order(&self, registry: &Registry) -> Vec<ElementId> {
        let mut items: Vec<(i64, usize, ElementId)> = registry
            .iter()
            .enumerate()
            .filter(|(_, el)| !el.hidden && el.kind.spec().renderable)
            .map(|(index, el)| (self.effective_z(el), index, el.id))
            .collect();
        items.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));
        items.into_iter().map(|(_, _, id)| id).collect()
    }
}
