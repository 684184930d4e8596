//! Container anchoring: which element lives inside which.
//!
//! DESIGN
//! ======
//! A container's `content.elementIds` is the membership list of record; a
//! member carries `parentId`, a `relativePosition` inside the container, and
//! `hidden = true` because the container draws it rather than the canvas.
//!
//! Every function here reads the registry and returns the patches that would
//! bring it to the target state without applying them. The engine applies
//! them locally and forwards them to the host. Feeding the same registry in
//! twice produces the same patches, and applying them twice is harmless.
//!
//! Only the dragged element's top-left corner is tested against container
//! rectangles, and the test is not repeated after a resize.

#[cfg(test)]
#[path = "containment_test.rs"]
mod containment_test;

use crate::element::{Element, ElementId, ElementPatch, Placement};
use crate::geom::{Point, Size};
use crate::registry::Registry;
use crate::zorder::ZOrder;

/// A patch for one element.
pub type Update = (ElementId, ElementPatch);

/// Topmost visible container (other than `exclude`) whose rectangle contains `anchor`.
#[must_use]
pub fn container_at<'a>(registry: &'a Registry, zorder: &ZOrder, anchor: Point, exclude: ElementId) -> Option<&'a Element> {
    registry
        .iter()
        .enumerate()
        .filter(|(_, el)| el.id != exclude && el.kind.is_container() && !el.hidden && el.rect().contains(anchor))
        .max_by(|(ia, a), (ib, b)| zorder.effective_z(a).cmp(&zorder.effective_z(b)).then(ia.cmp(ib)))
        .map(|(_, el)| el)
}

/// Decide where a dropped element belongs and produce the patches.
///
/// `candidate` is the element's absolute top-left corner at drop time.
/// A missing element yields no patches.
#[must_use]
pub fn resolve_drop(registry: &Registry, zorder: &ZOrder, id: ElementId, candidate: Point, size: Size) -> Vec<Update> {
    let Some(el) = registry.get(&id) else {
        tracing::debug!(%id, "drop on a missing element; ignoring");
        return Vec::new();
    };

    let target = if el.kind.is_container() { None } else { container_at(registry, zorder, candidate, id) };

    let placement = Placement {
        position: candidate,
        size,
        z_index: zorder.committed_z(el),
        rotation: el.rotation,
    };

    let mut updates = Vec::new();
    match target {
        Some(container) => {
            let relative = candidate - container.position;
            tracing::debug!(%id, container = %container.id, x = relative.x, y = relative.y, "anchoring into container");
            updates.push((id, ElementPatch::anchored(placement, container.id, relative)));
            let mut members = container.content().element_ids();
            if !members.contains(&id) {
                members.push(id);
                updates.push((container.id, ElementPatch::element_ids(&members)));
            }
        }
        None => {
            updates.push((id, ElementPatch::detached(placement)));
        }
    }

    if let Some(previous) = el.parent_id {
        if target.map(|c| c.id) != Some(previous) {
            updates.extend(strip_member(registry, previous, id));
        }
    }
    updates
}

/// Take `child` out of `container` and park it just right of the container
/// at the container's y, clear of its rectangle.
///
/// A missing container or child, or a child that is not a member, yields no patches.
#[must_use]
pub fn release(registry: &Registry, zorder: &ZOrder, container_id: ElementId, child_id: ElementId, gap: f64) -> Vec<Update> {
    let (Some(container), Some(child)) = (registry.get(&container_id), registry.get(&child_id)) else {
        return Vec::new();
    };
    let members = container.content().element_ids();
    let listed = members.contains(&child_id);
    if !listed && child.parent_id != Some(container_id) {
        return Vec::new();
    }

    let position = Point::new(container.rect().right() + gap.max(1.0), container.position.y);
    let placement = Placement {
        position,
        size: child.size,
        z_index: zorder.committed_z(child),
        rotation: child.rotation,
    };
    tracing::debug!(container = %container_id, child = %child_id, "releasing from container");

    let mut updates = vec![(child_id, ElementPatch::detached(placement))];
    if listed {
        let remaining: Vec<ElementId> = members.into_iter().filter(|m| *m != child_id).collect();
        updates.push((container_id, ElementPatch::element_ids(&remaining)));
    }
    updates
}

/// Patches needed before `id` is deleted: a member is stripped from its
/// container, a container releases all of its members.
#[must_use]
pub fn prepare_delete(registry: &Registry, zorder: &ZOrder, id: ElementId, gap: f64) -> Vec<Update> {
    let Some(el) = registry.get(&id) else {
        return Vec::new();
    };
    let mut updates = Vec::new();
    if el.kind.is_container() {
        for member in el.content().element_ids() {
            updates.extend(
                release(registry, zorder, id, member, gap)
                    .into_iter()
                    .filter(|(target, _)| *target != id),
            );
        }
    }
    if let Some(parent) = el.parent_id {
        updates.extend(strip_member(registry, parent, id));
    }
    updates
}

/// Repair membership after loading a snapshot.
///
/// - container lists are deduplicated and pruned of ids that are not live
///   non-container elements pointing back at the container;
/// - elements claiming a parent that does not list them are detached at
///   their rendered position;
/// - listed members missing a relative position get one derived from their
///   stored absolute position.
#[must_use]
pub fn reconcile(registry: &Registry, zorder: &ZOrder) -> Vec<Update> {
    let mut updates = Vec::new();

    for container in registry.iter().filter(|el| el.kind.is_container()) {
        let listed = container.content().element_ids();
        let mut kept: Vec<ElementId> = Vec::with_capacity(listed.len());
        for member in &listed {
            let valid = registry
                .get(member)
                .is_some_and(|m| m.parent_id == Some(container.id) && !m.kind.is_container());
            if valid && !kept.contains(member) {
                kept.push(*member);
            }
        }
        if kept != listed {
            tracing::warn!(container = %container.id, before = listed.len(), after = kept.len(), "repaired container membership");
            updates.push((container.id, ElementPatch::element_ids(&kept)));
        }
    }

    for el in registry.iter() {
        let Some(parent_id) = el.parent_id else {
            continue;
        };
        let parent = registry.get(&parent_id).filter(|p| p.kind.is_container());
        let listed = parent.is_some_and(|p| p.content().element_ids().contains(&el.id));
        let placement = Placement {
            position: registry.render_position(&el.id).unwrap_or(el.position),
            size: el.size,
            z_index: zorder.committed_z(el),
            rotation: el.rotation,
        };
        match parent {
            Some(parent) if listed && !el.kind.is_container() => {
                if el.relative_position.is_none() || !el.hidden {
                    let relative = el.relative_position.unwrap_or(el.position - parent.position);
                    let placement = Placement { position: parent.position + relative, ..placement };
                    updates.push((el.id, ElementPatch::anchored(placement, parent.id, relative)));
                }
            }
            _ => {
                tracing::warn!(id = %el.id, parent = %parent_id, "detaching element from a container that does not list it");
                updates.push((el.id, ElementPatch::detached(placement)));
            }
        }
    }

    updates
}

fn strip_member(registry: &Registry, container_id: ElementId, member: ElementId) -> Option<Update> {
    let container = registry.get(&container_id)?;
    let members = container.content().element_ids();
    if !members.contains(&member) {
        return None;
    }
    let remaining: Vec<ElementId> = members.into_iter().filter(|m| *m != member).collect();
    Some((container_id, ElementPatch::element_ids(&remaining)))
}
