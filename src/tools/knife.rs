// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Knife tool — tracks a transient cut line across the canvas.
//!
//! The cut line is overlay state only: the gesture carries both endpoints
//! in design space for the host to draw, and releasing the pointer discards
//! it without mutating the outline. Canvas-level panning and zooming still
//! apply while the knife is active.

use crate::editing::{EditSession, Gesture, MouseEvent};

#[derive(Debug, Clone, Copy, Default)]
pub struct KnifeTool;

impl KnifeTool {
    pub fn pointer_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        let design_pos = session.viewport.screen_to_design(event.pos);
        session.set_gesture(Gesture::CutLine {
            origin: design_pos,
            current: design_pos,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::mouse::MouseButton;
    use crate::tools::ToolId;
    use kurbo::Point;

    #[test]
    fn knife_drag_tracks_cut_line_without_mutation() {
        let mut session = EditSession::new();
        session.set_tool(ToolId::Knife);

        session.pointer_down(MouseEvent::new(Point::ZERO, Some(MouseButton::Left)));
        session.pointer_move(MouseEvent::new(Point::new(40.0, -30.0), None));

        match session.gesture() {
            Gesture::CutLine { origin, current } => {
                assert_eq!(*origin, Point::ZERO);
                assert_eq!(*current, Point::new(40.0, 30.0));
            }
            other => panic!("expected cut line, got {other:?}"),
        }

        session.pointer_up(MouseEvent::new(
            Point::new(40.0, -30.0),
            Some(MouseButton::Left),
        ));
        assert_eq!(*session.gesture(), Gesture::Idle);
        assert!(session.paths().is_empty());
    }
}
