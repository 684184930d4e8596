//! Engine core: the one state object every host event goes through.
//!
//! DESIGN
//! ======
//! `EngineCore` owns the registry mirror, the viewport, the z-order overrides,
//! the UI state (selection, pan mode) and the active gesture. Each host event
//! is a method that mutates that state synchronously and returns the
//! [`Action`]s the host must carry out: persisting patches, installing or
//! removing capture listeners, scheduling the next paint or timer.
//!
//! Gesture moves are applied to the local registry only. The host hears about
//! the new geometry once, on pointer-up, as a complete placement patch.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde_json::Value;

use crate::config::EngineConfig;
use crate::consts::WHEEL_ZOOM_RATE;
use crate::containment::{self, Update};
use crate::element::{DragRegion, Element, ElementId, ElementKind, ElementPatch, normalize_degrees};
use crate::geom::{Point, Rect, Size};
use crate::input::{
    Button, CaptureListeners, GestureOrigin, InputState, Key, Modifiers, PointerTarget, ResizeAnchor, UiState,
    WheelDelta,
};
use crate::migrate;
use crate::registry::Registry;
use crate::transform;
use crate::viewport::{HomeCorrection, OffsetSnapshot, Transform, Viewport};
use crate::zorder::ZOrder;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Persist a patch through the host's `update_element`.
    UpdateElement { id: ElementId, patch: ElementPatch },
    /// Remove an element through the host's `delete_element`.
    DeleteElement { id: ElementId },
    /// Install global pointer-move/up listeners.
    CaptureStarted,
    /// Remove the global pointer-move/up listeners.
    CaptureEnded,
    /// Call [`EngineCore::on_animation_frame`] on the next paint.
    RequestAnimationFrame,
    /// Call [`EngineCore::tick`] after `delay_ms`.
    ScheduleTick { delay_ms: f64 },
    /// New debounced scroll offset for consumers of the snapshot.
    OffsetPublished(Point),
    SetCursor(String),
    RenderNeeded,
}

/// What the host should create for an external drop.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateRequest {
    pub kind: ElementKind,
    /// Canvas-space top-left corner.
    pub position: Point,
    pub size: Size,
    /// Initial props for the host's `add_element`.
    pub props: Value,
}

/// Core engine state. Headless: no DOM, no clock, no threads.
pub struct EngineCore {
    pub config: EngineConfig,
    pub registry: Registry,
    pub viewport: Viewport,
    pub zorder: ZOrder,
    pub ui: UiState,
    pub input: InputState,
    capture: CaptureListeners,
    home: Option<HomeCorrection>,
    offset: OffsetSnapshot,
    clock_ms: f64,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            registry: Registry::new(),
            viewport: Viewport::default(),
            zorder: ZOrder::new(),
            ui: UiState::default(),
            input: InputState::Idle,
            capture: CaptureListeners::default(),
            home: None,
            offset: OffsetSnapshot::new(Point::ORIGIN, config.offset_debounce_ms),
            clock_ms: 0.0,
        }
    }

    // --- Data inputs ---

    /// Hydrate from raw host records and reset the viewport to home.
    ///
    /// Returns the membership repairs to persist plus the home-correction schedule.
    pub fn load_snapshot(&mut self, raws: &[Value], now_ms: f64) -> Vec<Action> {
        let mut actions = self.cancel_gesture();
        self.ui.selected_id = None;
        self.zorder = ZOrder::new();
        self.registry.load_snapshot(migrate::normalize_all(raws));
        tracing::debug!(count = self.registry.len(), "loaded board snapshot");

        let repairs = containment::reconcile(&self.registry, &self.zorder);
        actions.extend(self.commit(repairs));
        actions.extend(self.go_to_home(now_ms));
        actions
    }

    /// Apply a host broadcast: element created.
    pub fn apply_create(&mut self, element: Element) {
        self.registry.insert(element);
    }

    /// Apply a host broadcast: element updated.
    pub fn apply_update(&mut self, id: &ElementId, patch: &ElementPatch) {
        self.registry.apply_patch(id, patch);
    }

    /// Apply a host broadcast: element deleted. A gesture on it ends silently.
    ///
    /// Membership is repaired first: a deleted container releases its members
    /// and a deleted member leaves its container's list. The repairs are
    /// returned for persistence.
    pub fn apply_delete(&mut self, id: &ElementId) -> Vec<Action> {
        let repairs = containment::prepare_delete(&self.registry, &self.zorder, *id, self.config.release_gap);
        let mut actions = self.commit(repairs);
        if self.input.element_id() == Some(*id) {
            self.input = InputState::Idle;
            actions.extend(self.release_capture());
        }
        self.registry.remove(id);
        self.zorder.forget(id);
        if self.ui.selected_id == Some(*id) {
            self.ui.selected_id = None;
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Insert an element the host just created for us and anchor it if it
    /// landed on a container.
    pub fn adopt_created(&mut self, element: Element) -> Vec<Action> {
        let (id, position, size) = (element.id, element.position, element.size);
        let anchors = !element.kind.is_container()
            && containment::container_at(&self.registry, &self.zorder, position, id).is_some();
        self.registry.insert(element);
        let updates = if anchors {
            containment::resolve_drop(&self.registry, &self.zorder, id, position, size)
        } else {
            Vec::new()
        };
        let mut actions = self.commit(updates);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Delete an element on the user's behalf, keeping container lists consistent.
    pub fn delete_element(&mut self, id: ElementId) -> Vec<Action> {
        if !self.registry.contains(&id) {
            return Vec::new();
        }
        let mut actions = self.apply_delete(&id);
        actions.push(Action::DeleteElement { id });
        actions
    }

    /// Explicit release from a container's UI.
    pub fn release_from_container(&mut self, container_id: ElementId, child_id: ElementId) -> Vec<Action> {
        let updates = containment::release(&self.registry, &self.zorder, container_id, child_id, self.config.release_gap);
        if updates.is_empty() {
            return Vec::new();
        }
        let mut actions = self.commit(updates);
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Selection ---

    /// Make `id` the sole selection (or clear it), moving the front layer along.
    pub fn select(&mut self, id: Option<ElementId>) -> Vec<Action> {
        let id = id.filter(|id| self.registry.contains(id));
        self.ui.selected_id = id;
        let demoted = self.zorder.select(id.and_then(|id| self.registry.get(&id)));

        let mut actions = Vec::new();
        if let Some(demoted) = demoted {
            // The stored value may have been overwritten during the episode.
            if let Some(el) = self.registry.get(&demoted.id) {
                if el.z_index != demoted.restore {
                    let mut placement = el.placement();
                    placement.z_index = demoted.restore;
                    actions.extend(self.commit(vec![(demoted.id, ElementPatch::placement(placement))]));
                }
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Pointer input ---

    /// Pointer went down on an element.
    pub fn on_element_pointer_down(
        &mut self,
        id: ElementId,
        screen_pt: Point,
        target: PointerTarget,
        button: Button,
        now_ms: f64,
    ) -> Vec<Action> {
        self.clock_ms = now_ms;
        if !self.registry.contains(&id) {
            return Vec::new();
        }
        // A second pointer-down mid-gesture restores the first element before
        // anything else reads geometry.
        let mut actions = if self.input.is_idle() { Vec::new() } else { self.cancel_gesture() };
        if self.ui.pan_mode || button == Button::Middle {
            return self.begin_pan(screen_pt, actions);
        }

        let Some(el) = self.registry.get(&id) else {
            return actions;
        };
        let kind = el.kind;
        let origin = GestureOrigin { rect: el.rect(), relative: el.relative_position };
        let click_promoted = self.zorder.click(el, now_ms, self.config.click_promotion_ms);
        actions.extend(self.select(Some(id)));
        if click_promoted {
            actions.push(Action::ScheduleTick { delay_ms: self.config.click_promotion_ms });
        }

        if button != Button::Primary {
            return actions;
        }
        let next = match target {
            PointerTarget::Resize(anchor) => Some(InputState::ResizingElement { id, anchor, start_screen: screen_pt, origin }),
            PointerTarget::Handle => Some(InputState::DraggingElement { id, start_screen: screen_pt, origin }),
            PointerTarget::Body if kind.spec().drag_region == DragRegion::Anywhere => {
                Some(InputState::DraggingElement { id, start_screen: screen_pt, origin })
            }
            PointerTarget::Body => None,
        };
        if let Some(next) = next {
            tracing::debug!(%id, ?target, "gesture started");
            self.input = next;
            actions.extend(self.install_capture());
        }
        actions
    }

    /// Pointer went down on empty canvas.
    pub fn on_canvas_pointer_down(&mut self, screen_pt: Point, button: Button, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        let mut actions = Vec::new();
        if !self.input.is_idle() {
            actions.extend(self.cancel_gesture());
        }
        if self.ui.pan_mode || button == Button::Middle {
            return self.begin_pan(screen_pt, actions);
        }
        actions.extend(self.select(None));
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        match self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                self.input = InputState::Panning { last_screen: screen_pt };
                self.viewport.pan(last_screen - screen_pt);
                self.viewport_actions(true)
            }
            InputState::DraggingElement { id, start_screen, origin } => {
                if self.drag_to(id, start_screen, origin, screen_pt) {
                    vec![Action::RenderNeeded]
                } else {
                    self.abandon_gesture()
                }
            }
            InputState::ResizingElement { id, anchor, start_screen, origin } => {
                let delta = self.viewport.screen_delta_to_canvas(screen_pt - start_screen);
                if self.resize_to(id, anchor, origin, delta) {
                    vec![Action::RenderNeeded]
                } else {
                    self.abandon_gesture()
                }
            }
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        let gesture = std::mem::take(&mut self.input);
        let mut actions = self.release_capture();
        match gesture {
            InputState::Idle | InputState::Panning { .. } => {}
            InputState::DraggingElement { id, start_screen, origin } => {
                if self.drag_to(id, start_screen, origin, screen_pt) {
                    actions.extend(self.commit_drag(id));
                }
            }
            InputState::ResizingElement { id, anchor, start_screen, origin } => {
                let delta = self.viewport.screen_delta_to_canvas(screen_pt - start_screen);
                if self.resize_to(id, anchor, origin, delta) {
                    actions.extend(self.commit_resize(id));
                }
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Wheel scrolls the canvas; with the zoom chord it zooms about the pointer.
    /// Never touches the active gesture.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        if modifiers.zoom_chord() {
            self.viewport.zoom_by((-delta.dy * WHEEL_ZOOM_RATE).exp(), screen_pt);
        } else {
            self.viewport.pan(Point::new(delta.dx, delta.dy));
        }
        self.viewport_actions(true)
    }

    pub fn on_key_down(&mut self, key: &Key, _modifiers: Modifiers) -> Vec<Action> {
        match key.0.as_str() {
            "Escape" => {
                let mut actions = self.cancel_gesture();
                actions.extend(self.select(None));
                actions
            }
            "Delete" | "Backspace" if self.input.is_idle() => match self.ui.selected_id {
                Some(id) => self.delete_element(id),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Abort the active gesture, reverting the element to its pre-gesture geometry.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let gesture = std::mem::take(&mut self.input);
        if let InputState::DraggingElement { id, origin, .. } | InputState::ResizingElement { id, origin, .. } = gesture {
            if let Some(el) = self.registry.get_mut(&id) {
                el.position = origin.rect.origin;
                el.size = origin.rect.size;
                el.relative_position = origin.relative;
            }
            tracing::debug!(%id, "gesture cancelled");
        }
        let mut actions = self.release_capture();
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// The host component is going away.
    pub fn teardown(&mut self) -> Vec<Action> {
        self.home = None;
        self.cancel_gesture()
    }

    /// Number of capture listener pairs the host should currently have installed.
    #[must_use]
    pub fn capture_listener_count(&self) -> usize {
        self.capture.count()
    }

    // --- Rotation ---

    /// Set an absolute rotation in degrees.
    pub fn set_rotation(&mut self, id: ElementId, degrees: f64) -> Vec<Action> {
        let Some(el) = self.registry.get(&id) else {
            return Vec::new();
        };
        let mut placement = el.placement();
        placement.rotation = normalize_degrees(degrees);
        placement.z_index = self.zorder.committed_z(el);
        let mut actions = self.commit(vec![(id, ElementPatch::placement(placement))]);
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Rotate by one of the fixed steps the element's kind exposes. The step
    /// may be negative; any other amount is ignored.
    pub fn rotate_step(&mut self, id: ElementId, step: f64) -> Vec<Action> {
        let Some(el) = self.registry.get(&id) else {
            return Vec::new();
        };
        let allowed = el.kind.spec().rotation_steps.iter().any(|s| (s - step.abs()).abs() < f64::EPSILON);
        if !allowed {
            tracing::debug!(%id, step, kind = ?el.kind, "rotation step not offered by this kind");
            return Vec::new();
        }
        let rotation = transform::rotate_by(el.rotation, step);
        self.set_rotation(id, rotation)
    }

    // --- Viewport surface ---

    #[must_use]
    pub fn get_transform(&self) -> Transform {
        self.viewport.transform()
    }

    pub fn set_viewport_size(&mut self, size: Size) -> Vec<Action> {
        self.viewport.set_screen_size(size);
        vec![Action::RenderNeeded]
    }

    pub fn set_zoom(&mut self, scale: f64, pivot: Option<Point>, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        self.viewport.set_zoom(scale, pivot);
        self.viewport_actions(true)
    }

    /// Back to 100% about the visible center.
    pub fn reset_zoom(&mut self, now_ms: f64) -> Vec<Action> {
        self.set_zoom(1.0, None, now_ms)
    }

    pub fn center_on_point(&mut self, canvas_pt: Point, scale: Option<f64>, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        self.viewport.center_on_point(canvas_pt, scale);
        self.viewport_actions(true)
    }

    /// Center on an element's rendered rectangle. Unknown ids are a no-op.
    pub fn center_on_element(&mut self, id: ElementId, now_ms: f64) -> Vec<Action> {
        match self.registry.render_rect(&id) {
            Some(rect) => self.center_on_point(rect.center(), None, now_ms),
            None => Vec::new(),
        }
    }

    /// Fit a set of elements into view. Unknown ids are skipped.
    pub fn center_on_elements(&mut self, ids: &[ElementId], now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        let rects = ids.iter().filter_map(|id| self.rotated_render_rect(id));
        match Rect::bounding(rects) {
            Some(bounds) => {
                self.viewport.fit_rect(bounds, self.config.fit_shrink());
                self.viewport_actions(true)
            }
            None => Vec::new(),
        }
    }

    /// Fit every element on the free canvas; an empty board goes home.
    pub fn fit_all_elements(&mut self, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        let rects: Vec<Rect> = self
            .registry
            .iter()
            .filter(|el| !el.hidden)
            .map(|el| transform::rotated_bounds(el.rect(), el.rotation))
            .collect();
        match Rect::bounding(rects) {
            Some(bounds) => {
                self.viewport.fit_rect(bounds, self.config.fit_shrink());
                self.viewport_actions(true)
            }
            None => self.go_to_home(now_ms),
        }
    }

    /// Device-default scale with scroll at the origin, enforced again on the
    /// next paint and after a short delay unless the user scrolls first.
    pub fn go_to_home(&mut self, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        let mut actions = self.cancel_gesture();
        self.viewport.go_home(self.config.home_scale());
        self.home = Some(HomeCorrection::start(now_ms, self.config.home_correction_delay_ms));
        // The home pass itself may open an offset window; one tick covers both
        // when the delays match.
        let offset_pending = self.viewport_changed(false);
        let mut delay_ms = self.config.home_correction_delay_ms;
        if offset_pending {
            delay_ms = delay_ms.min(self.config.offset_debounce_ms);
        }
        actions.extend([Action::RequestAnimationFrame, Action::ScheduleTick { delay_ms }, Action::RenderNeeded]);
        actions
    }

    /// Toggle pan mode: drags anywhere move the canvas instead of elements.
    pub fn activate_pan_mode(&mut self, active: bool) -> Vec<Action> {
        self.ui.pan_mode = active;
        let cursor = if active { "grab" } else { "default" };
        vec![Action::SetCursor(cursor.to_string())]
    }

    /// Reflect a scroll position observed by the host (e.g. after a layout reflow).
    pub fn sync_scroll(&mut self, observed: Point, user_initiated: bool, now_ms: f64) -> Vec<Action> {
        if !observed.is_finite() {
            return Vec::new();
        }
        self.clock_ms = now_ms;
        self.viewport.scroll = observed;
        self.viewport_actions(user_initiated)
    }

    /// Convert a drop from an external drag source into a create request,
    /// centered under the cursor at the live viewport transform.
    #[must_use]
    pub fn prepare_external_drop(&self, kind: ElementKind, payload: Value, screen_pt: Point) -> CreateRequest {
        let size = kind.spec().default_size;
        let cursor = self.viewport.screen_to_canvas(screen_pt);
        let position = Point::new(cursor.x - size.width * 0.5, cursor.y - size.height * 0.5);
        let props = serde_json::json!({
            "position": position,
            "size": size,
            "rotation": 0.0,
            "content": payload,
        });
        CreateRequest { kind, position, size, props }
    }

    // --- Time ---

    /// Paint callback requested via [`Action::RequestAnimationFrame`].
    pub fn on_animation_frame(&mut self, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        let forced = self.home.as_mut().is_some_and(|hc| hc.on_paint(&mut self.viewport));
        if forced {
            return self.viewport_actions(false);
        }
        Vec::new()
    }

    /// Timer callback: finishes home correction, expires click promotions and
    /// publishes the debounced scroll offset.
    ///
    /// Whatever is still outstanding afterwards (a tick that arrived early, a
    /// later click expiry) is rescheduled with one [`Action::ScheduleTick`].
    pub fn tick(&mut self, now_ms: f64) -> Vec<Action> {
        self.clock_ms = now_ms;
        let mut actions = Vec::new();
        let mut render = false;

        if let Some(hc) = self.home.as_mut() {
            if hc.on_timer(now_ms, &mut self.viewport) {
                render = true;
                self.viewport_changed(false);
            }
        }
        if self.home.is_some_and(|hc| !hc.is_active()) {
            self.home = None;
        }

        if !self.zorder.expire(now_ms).is_empty() {
            render = true;
        }
        if let Some(offset) = self.offset.poll(now_ms) {
            actions.push(Action::OffsetPublished(offset));
        }
        if render {
            actions.push(Action::RenderNeeded);
        }
        if let Some(due) = self.next_due() {
            actions.push(Action::ScheduleTick { delay_ms: (due - now_ms).max(0.0) });
        }
        actions
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ElementId> {
        self.ui.selected_id
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.registry.get(id)
    }

    /// Ids in back-to-front draw order for the free canvas.
    #[must_use]
    pub fn render_order(&self) -> Vec<ElementId> {
        self.zorder.render_order(&self.registry)
    }

    /// Debounced scroll offset for UI that re-renders on change.
    #[must_use]
    pub fn offset_snapshot(&self) -> Point {
        self.offset.value()
    }

    #[must_use]
    pub fn home_correction_active(&self) -> bool {
        self.home.is_some_and(|hc| hc.is_active())
    }

    /// Earliest time at which [`Self::tick`] has work to do.
    #[must_use]
    pub fn next_due(&self) -> Option<f64> {
        [
            self.home.and_then(|hc| hc.next_due()),
            self.zorder.next_expiry(),
            self.offset.next_due(),
        ]
        .into_iter()
        .flatten()
        .reduce(f64::min)
    }

    // --- Internals ---

    fn begin_pan(&mut self, screen_pt: Point, mut actions: Vec<Action>) -> Vec<Action> {
        self.input = InputState::Panning { last_screen: screen_pt };
        actions.extend(self.install_capture());
        actions
    }

    fn install_capture(&mut self) -> Option<Action> {
        self.capture.install().then_some(Action::CaptureStarted)
    }

    fn release_capture(&mut self) -> Vec<Action> {
        if self.capture.release() { vec![Action::CaptureEnded] } else { Vec::new() }
    }

    /// The gesture's element vanished: drop the gesture without error.
    fn abandon_gesture(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        self.release_capture()
    }

    /// Returns true when the change opened a new offset debounce window.
    fn viewport_changed(&mut self, user_initiated: bool) -> bool {
        if user_initiated {
            if let Some(hc) = self.home.as_mut() {
                hc.cancel();
            }
            self.home = None;
        }
        self.offset.observe(self.viewport.scroll, self.clock_ms)
    }

    /// Repaint, plus the publish tick when the change opened a debounce window.
    fn viewport_actions(&mut self, user_initiated: bool) -> Vec<Action> {
        let mut actions = vec![Action::RenderNeeded];
        if self.viewport_changed(user_initiated) {
            actions.push(Action::ScheduleTick { delay_ms: self.config.offset_debounce_ms });
        }
        actions
    }

    fn parent_of(&self, el: &Element) -> Option<(Point, Size)> {
        let parent = self.registry.get(&el.parent_id?)?;
        Some((parent.position, parent.size))
    }

    fn rotated_render_rect(&self, id: &ElementId) -> Option<Rect> {
        let el = self.registry.get(id)?;
        let rect = self.registry.render_rect(id)?;
        Some(transform::rotated_bounds(rect, el.rotation))
    }

    /// Recompute a dragged element from its origin. Returns false when the
    /// element no longer exists.
    fn drag_to(&mut self, id: ElementId, start_screen: Point, origin: GestureOrigin, screen_pt: Point) -> bool {
        let delta = self.viewport.screen_delta_to_canvas(screen_pt - start_screen);
        let Some(el) = self.registry.get(&id) else {
            return false;
        };
        let parent = self.parent_of(el);
        let size = origin.rect.size;
        let Some(el) = self.registry.get_mut(&id) else {
            return false;
        };
        match (parent, origin.relative) {
            (Some((parent_pos, parent_size)), Some(relative)) => {
                let relative = transform::drag_to(relative, size, delta, Some(parent_size));
                el.relative_position = Some(relative);
                el.position = parent_pos + relative;
            }
            _ => el.position = transform::drag_to(origin.rect.origin, size, delta, None),
        }
        true
    }

    /// Recompute a resized element from its origin. Returns false when the
    /// element no longer exists.
    fn resize_to(&mut self, id: ElementId, anchor: ResizeAnchor, origin: GestureOrigin, delta: Point) -> bool {
        let min_size = self.config.min_element_size;
        let Some(el) = self.registry.get(&id) else {
            return false;
        };
        let parent = self.parent_of(el);
        let Some(el) = self.registry.get_mut(&id) else {
            return false;
        };
        match (parent, origin.relative) {
            (Some((parent_pos, parent_size)), Some(relative)) => {
                let local = Rect::new(relative, origin.rect.size);
                let r = transform::resize(local, anchor, delta, min_size, Some(parent_size));
                el.relative_position = Some(r.origin);
                el.position = parent_pos + r.origin;
                el.size = r.size;
            }
            _ => {
                let r = transform::resize(origin.rect, anchor, delta, min_size, None);
                el.position = r.origin;
                el.size = r.size;
            }
        }
        true
    }

    fn commit_drag(&mut self, id: ElementId) -> Vec<Action> {
        let Some(el) = self.registry.get(&id) else {
            return Vec::new();
        };
        let candidate = self.registry.render_position(&id).unwrap_or(el.position);
        let updates = containment::resolve_drop(&self.registry, &self.zorder, id, candidate, el.size);
        self.commit(updates)
    }

    fn commit_resize(&mut self, id: ElementId) -> Vec<Action> {
        let Some(el) = self.registry.get(&id) else {
            return Vec::new();
        };
        let mut placement = el.placement();
        placement.z_index = self.zorder.committed_z(el);
        let patch = match (el.parent_id, el.relative_position) {
            (Some(parent), Some(relative)) => ElementPatch::anchored(placement, parent, relative),
            _ => ElementPatch::placement(placement),
        };
        self.commit(vec![(id, patch)])
    }

    /// Apply patches locally and turn them into host actions.
    fn commit(&mut self, updates: Vec<Update>) -> Vec<Action> {
        let mut actions = Vec::with_capacity(updates.len());
        for (id, patch) in updates {
            if patch.is_empty() || !self.registry.apply_patch(&id, &patch) {
                continue;
            }
            actions.push(Action::UpdateElement { id, patch });
        }
        actions
    }
}
