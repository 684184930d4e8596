//! Element registry: the ordered in-memory store of board elements.
//!
//! The registry is pure data. It remembers insertion order (the final
//! stacking tie-break), merges patches the way the host does, and derives
//! rendered positions for anchored elements. Membership rules live in
//! [`crate::containment`]; stacking rules live in [`crate::zorder`].

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::HashMap;

use crate::element::{Element, ElementId, ElementPatch};
use crate::geom::{Point, Rect};

/// In-memory store of board elements.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    elements: HashMap<ElementId, Element>,
    order: Vec<ElementId>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an element. A replaced element keeps its original
    /// insertion slot.
    pub fn insert(&mut self, element: Element) {
        if self.elements.insert(element.id, element.clone()).is_none() {
            self.order.push(element.id);
        }
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<Element> {
        let removed = self.elements.remove(id)?;
        self.order.retain(|other| other != id);
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Position of `id` in insertion order.
    #[must_use]
    pub fn insertion_index(&self, id: &ElementId) -> Option<usize> {
        self.order.iter().position(|other| other == id)
    }

    /// Elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.order.iter().filter_map(|id| self.elements.get(id))
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<ElementId> {
        self.order.clone()
    }

    /// Merge a patch into an existing element. Returns false if the element
    /// doesn't exist or the content patch is not a JSON object.
    pub fn apply_patch(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(el) = self.elements.get_mut(id) else {
            return false;
        };
        if let Some(placement) = patch.placement {
            el.position = placement.position;
            el.size = placement.size;
            el.z_index = placement.z_index;
            el.rotation = placement.rotation;
        }
        if let Some(parent_id) = patch.parent_id {
            el.parent_id = parent_id;
        }
        if let Some(relative) = patch.relative_position {
            el.relative_position = relative;
        }
        if let Some(hidden) = patch.hidden {
            el.hidden = hidden;
        }
        if let Some(ref content) = patch.content {
            let Some(incoming) = content.as_object() else {
                return false;
            };

            if !el.content.is_object() {
                el.content = serde_json::json!({});
            }

            if let Some(existing) = el.content.as_object_mut() {
                for (k, v) in incoming {
                    if v.is_null() {
                        existing.remove(k);
                    } else {
                        existing.insert(k.clone(), v.clone());
                    }
                }
            }
        }
        true
    }

    /// Replace all elements with a snapshot, preserving snapshot order.
    pub fn load_snapshot(&mut self, elements: Vec<Element>) {
        self.elements.clear();
        self.order.clear();
        for el in elements {
            self.insert(el);
        }
    }

    /// Where the element is drawn: `parent.position + relativePosition` while
    /// anchored to a live parent, its stored position otherwise.
    #[must_use]
    pub fn render_position(&self, id: &ElementId) -> Option<Point> {
        let el = self.elements.get(id)?;
        let anchored = el
            .parent_id
            .and_then(|pid| self.elements.get(&pid))
            .map(|parent| parent.position + el.relative_position.unwrap_or(Point::ORIGIN));
        Some(anchored.unwrap_or(el.position))
    }

    /// Rendered rectangle (see [`Self::render_position`]).
    #[must_use]
    pub fn render_rect(&self, id: &ElementId) -> Option<Rect> {
        let el = self.elements.get(id)?;
        let origin = self.render_position(id)?;
        Some(Rect::new(origin, el.size))
    }

    /// Bounding box of every element drawn on the free canvas.
    #[must_use]
    pub fn visible_bounds(&self) -> Option<Rect> {
        Rect::bounding(self.iter().filter(|el| !el.hidden).map(Element::rect))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
