// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Select tool — point selection, dragging, and marquee selection.
//!
//! A click on a point updates the selection per the modifier state and
//! starts a point drag; a click on empty canvas starts a marquee. The drag
//! and marquee gestures themselves advance in `EditSession::pointer_move`
//! and commit in `pointer_up`.

use crate::editing::{EditSession, Gesture, MouseEvent};

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectTool;

impl SelectTool {
    pub fn pointer_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        match session.hit_test_point(event.pos) {
            Some(hit) => {
                if event.mods.shift {
                    session.toggle_selected(hit.entity);
                } else if !session.selection().contains(&hit.entity) {
                    // Plain click on an unselected point: it becomes the
                    // selection. Clicking an already-selected point keeps
                    // the multi-selection for a group drag.
                    session.set_selection([hit.entity]);
                }

                if session.selection().contains(&hit.entity) {
                    let last_design = session.viewport.screen_to_design(event.pos);
                    session.set_gesture(Gesture::DraggingPoint { last_design });
                } else {
                    // Shift-toggle deselected the clicked point; nothing
                    // sensible to drag
                    session.set_gesture(Gesture::Idle);
                }
            }
            None => {
                if !event.mods.shift {
                    session.clear_selection();
                }
                session.set_gesture(Gesture::Marquee {
                    origin: event.pos,
                    current: event.pos,
                });
            }
        }
    }
}
