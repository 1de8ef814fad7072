// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit session — the editable outline state for a single glyph and the
//! pointer state machine that mutates it.
//!
//! A session owns its paths exclusively. Pointer-down events are dispatched
//! to the active tool; once a gesture is live, subsequent moves and the
//! release are resolved by the gesture itself (the tool cannot change
//! mid-gesture because `set_tool` resets the gesture). All mutations happen
//! on the caller's thread; there is no interior locking.

use crate::editing::hit_test::{self, HitTestResult};
use crate::editing::mouse::{Gesture, MouseButton, MouseEvent};
use crate::editing::selection::Selection;
use crate::editing::viewport::ViewPort;
use crate::model::EntityId;
use crate::path::{EditablePath, PathCommand, collect_points};
use crate::tools::{ToolBox, ToolId};
use kurbo::{Point, Rect, Vec2};
use std::collections::{BTreeMap, BTreeSet};

/// Editing state for one glyph outline
#[derive(Debug)]
pub struct EditSession {
    paths: Vec<EditablePath>,
    selection: Selection,
    pub viewport: ViewPort,
    tool: ToolBox,
    gesture: Gesture,
    /// Cursor position in design space, for the host's coordinate display.
    /// Cleared when the pointer leaves the canvas.
    hover: Option<Point>,
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            selection: Selection::new(),
            viewport: ViewPort::new(),
            tool: ToolBox::for_id(ToolId::Select),
            gesture: Gesture::Idle,
            hover: None,
        }
    }

    // ========================================================================
    // MODEL ACCESS
    // ========================================================================

    pub fn paths(&self) -> &[EditablePath] {
        &self.paths
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub(crate) fn set_gesture(&mut self, gesture: Gesture) {
        self.gesture = gesture;
    }

    /// The rubber-band rectangle, present only during a marquee drag
    pub fn rubber_band(&self) -> Option<Rect> {
        self.gesture.rubber_band()
    }

    pub fn hover(&self) -> Option<Point> {
        self.hover
    }

    pub fn tool(&self) -> ToolId {
        self.tool.id()
    }

    /// Switch tools. Any in-progress gesture is abandoned, including a
    /// buffered pen control point.
    pub fn set_tool(&mut self, id: ToolId) {
        if self.tool.id() != id {
            self.tool = ToolBox::for_id(id);
        }
        self.gesture = Gesture::Idle;
    }

    // ========================================================================
    // MODEL MUTATIONS
    // ========================================================================

    /// Replace the whole path collection (loading or resetting a glyph).
    ///
    /// Selection entries whose points no longer exist are pruned, and any
    /// in-progress gesture is abandoned.
    pub fn set_paths(&mut self, paths: Vec<EditablePath>) {
        self.paths = paths;
        let live: BTreeSet<EntityId> = collect_points(&self.paths).map(|p| p.id).collect();
        self.selection.retain_known(&live);
        self.gesture = Gesture::Idle;
    }

    /// Add a path to the outline, returning its id
    pub fn add_path(&mut self, path: EditablePath) -> EntityId {
        let id = path.id;
        self.paths.push(path);
        id
    }

    /// Append a drawing command to the path with `path_id`.
    ///
    /// An unknown id means the caller's state discipline is broken:
    /// fast-fail in debug builds, warn and no-op in release.
    pub fn add_command(&mut self, path_id: EntityId, command: PathCommand) {
        match self.paths.iter_mut().find(|p| p.id == path_id) {
            Some(path) => path.push_command(command),
            None => {
                debug_assert!(false, "add_command: unknown path {path_id:?}");
                tracing::warn!(?path_id, "add_command on unknown path, ignoring");
            }
        }
    }

    /// Apply per-point deltas across every path. Unknown ids are ignored,
    /// tolerating stale ids from concurrent selection changes.
    pub fn move_points(&mut self, deltas: &BTreeMap<EntityId, Vec2>) {
        for path in &mut self.paths {
            for pt in path.points_mut() {
                if let Some(delta) = deltas.get(&pt.id) {
                    pt.point += *delta;
                }
            }
        }
    }

    /// Move every selected point by the same delta
    pub fn move_selected(&mut self, delta: Vec2) {
        let deltas: BTreeMap<EntityId, Vec2> =
            self.selection.iter().map(|id| (*id, delta)).collect();
        self.move_points(&deltas);
    }

    /// Arrow-key nudge: same as `move_selected`, named for the host's
    /// keyboard handler (step sizes live in `settings::nudge`)
    pub fn nudge_selection(&mut self, delta: Vec2) {
        self.move_selected(delta);
    }

    /// Replace the selection membership
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = EntityId>) {
        self.selection.replace(ids);
    }

    /// Flip one id's membership
    pub fn toggle_selected(&mut self, id: EntityId) {
        self.selection.toggle(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Replace the view transform wholesale (zoom already clamped by
    /// `ViewPort` construction)
    pub fn set_viewport(&mut self, viewport: ViewPort) {
        self.viewport = viewport;
    }

    /// Delete every selected point, repairing the command sequences, and
    /// clear the selection. Paths left without commands are removed.
    pub fn delete_selection(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        let doomed: BTreeSet<EntityId> = self.selection.iter().copied().collect();
        for path in &mut self.paths {
            path.delete_points(&doomed);
        }
        self.paths.retain(|p| !p.commands().is_empty());
        self.selection.clear();
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Hit test a screen position against every point in the outline.
    ///
    /// Distances compare in design space; the radius is the viewport's
    /// zoom-compensated pick radius. Stable candidate order (path order,
    /// then command order) makes exact-tie resolution deterministic.
    pub fn hit_test_point(&self, screen_pos: Point) -> Option<HitTestResult> {
        let design_pos = self.viewport.screen_to_design(screen_pos);
        let candidates = collect_points(&self.paths).map(|p| (p.id, p.point));
        hit_test::find_closest(design_pos, candidates, self.viewport.hit_radius())
    }

    /// Bounding box and count of the selected points, for coordinate panels
    pub fn selection_bbox(&self) -> Option<(usize, Rect)> {
        let mut bbox: Option<Rect> = None;
        let mut count = 0;
        for pt in collect_points(&self.paths) {
            if self.selection.contains(&pt.id) {
                count += 1;
                bbox = Some(match bbox {
                    Some(r) => r.union_pt(pt.point),
                    None => Rect::from_points(pt.point, pt.point),
                });
            }
        }
        bbox.map(|r| (count, r))
    }

    // ========================================================================
    // POINTER EVENT HANDLERS
    // ========================================================================

    /// Handle pointer down.
    ///
    /// Middle button (or the hand tool) pans regardless of the active tool;
    /// left clicks go to the tool. Other buttons are ignored.
    pub fn pointer_down(&mut self, event: MouseEvent) {
        if event.button == Some(MouseButton::Middle) || self.tool.id() == ToolId::Hand {
            self.gesture = Gesture::Panning { last: event.pos };
            return;
        }
        if event.button != Some(MouseButton::Left) {
            return;
        }

        // Temporarily take ownership of the tool so it can mutate the session
        let mut tool = std::mem::replace(&mut self.tool, ToolBox::for_id(ToolId::Select));
        tool.pointer_down(event, self);
        self.tool = tool;
    }

    /// Handle pointer move: advance whichever gesture is live
    pub fn pointer_move(&mut self, event: MouseEvent) {
        let design_pos = self.viewport.screen_to_design(event.pos);
        self.hover = Some(design_pos);

        match self.gesture {
            Gesture::Panning { last } => {
                self.viewport.pan(event.pos - last);
                self.gesture = Gesture::Panning { last: event.pos };
            }
            Gesture::DraggingPoint { last_design } => {
                // Per-frame increment, not offset-from-anchor: points that
                // started at different positions move together without
                // snapping to a single offset.
                self.move_selected(design_pos - last_design);
                self.gesture = Gesture::DraggingPoint {
                    last_design: design_pos,
                };
            }
            Gesture::Marquee { origin, .. } => {
                self.gesture = Gesture::Marquee {
                    origin,
                    current: event.pos,
                };
            }
            Gesture::CutLine { origin, .. } => {
                self.gesture = Gesture::CutLine {
                    origin,
                    current: design_pos,
                };
            }
            Gesture::Idle | Gesture::PenPendingControl { .. } => {}
        }
    }

    /// Handle pointer up: commit or abandon the live gesture.
    ///
    /// A release with no gesture in progress is ignored; a buffered pen
    /// control survives the release of the click that placed it.
    pub fn pointer_up(&mut self, event: MouseEvent) {
        match self.gesture {
            Gesture::Marquee { origin, .. } => {
                let band = Rect::from_points(origin, event.pos);
                self.select_in_band(band, event.mods.shift);
                self.gesture = Gesture::Idle;
            }
            Gesture::Panning { .. } | Gesture::DraggingPoint { .. } | Gesture::CutLine { .. } => {
                self.gesture = Gesture::Idle;
            }
            Gesture::PenPendingControl { .. } | Gesture::Idle => {}
        }
    }

    /// Handle wheel zoom: anchor-preserving, clamped. The live gesture is
    /// unchanged.
    pub fn wheel(&mut self, anchor: Point, steps: i32) {
        self.viewport.zoom_about(anchor, steps);
    }

    /// Pointer left the canvas: clear the transient position display
    pub fn pointer_leave(&mut self) {
        self.hover = None;
    }

    /// Select every point whose screen projection falls inside `band`
    /// (inclusive bounds). Union with the existing selection when `union`
    /// is set, else replace it.
    fn select_in_band(&mut self, band: Rect, union: bool) {
        let ids: Vec<EntityId> = collect_points(&self.paths)
            .filter(|p| {
                let s = self.viewport.to_screen(p.point);
                s.x >= band.x0 && s.x <= band.x1 && s.y >= band.y0 && s.y <= band.y1
            })
            .map(|p| p.id)
            .collect();

        if union {
            self.selection.extend(ids);
        } else {
            self.selection.replace(ids);
        }
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
