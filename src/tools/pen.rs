// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Pen tool — construct outline commands by sequential clicks.
//!
//! A plain click is an on-curve request: the first one starts a new
//! subpath, later ones extend it with line segments. An Alt-click is an
//! off-curve request: the position is buffered (no mutation yet) and the
//! next on-curve click pairs it into a quadratic segment. The buffer lives
//! in the `PenPendingControl` gesture, so switching tools discards it.

use crate::editing::{EditSession, Gesture, MouseEvent};
use crate::model::EntityId;
use crate::path::{EditablePath, PathCommand, PathPoint};

#[derive(Debug, Clone, Copy, Default)]
pub struct PenTool {
    /// The path this pen stroke is extending. `None` until the first
    /// on-curve click; cleared when the tool is recreated on tool switch.
    active_path: Option<EntityId>,
}

impl PenTool {
    pub fn pointer_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        let design_pos = session.viewport.screen_to_design(event.pos);

        if event.mods.alt {
            // Off-curve request: buffer only. A second off-curve click
            // replaces the buffer (latest wins).
            session.set_gesture(Gesture::PenPendingControl { ctrl: design_pos });
            return;
        }

        // On-curve request
        let pending = session.gesture().pending_control();
        match (pending, self.active_path) {
            (Some(ctrl), Some(path_id)) => {
                session.add_command(
                    path_id,
                    PathCommand::QuadTo {
                        ctrl: PathPoint::off_curve_quad(ctrl),
                        end: PathPoint::on_curve(design_pos),
                    },
                );
                session.set_gesture(Gesture::Idle);
            }
            (Some(_), None) => {
                // A control was buffered before any subpath existed; there
                // is no segment to attach it to
                tracing::warn!("pen control buffered with no open subpath, discarding");
                self.active_path =
                    Some(session.add_path(EditablePath::from_start(design_pos)));
                session.set_gesture(Gesture::Idle);
            }
            (None, Some(path_id)) => {
                session.add_command(
                    path_id,
                    PathCommand::LineTo(PathPoint::on_curve(design_pos)),
                );
            }
            (None, None) => {
                self.active_path =
                    Some(session.add_path(EditablePath::from_start(design_pos)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::mouse::{Modifiers, MouseButton};
    use crate::tools::ToolId;
    use kurbo::Point;

    fn click(session: &mut EditSession, x: f64, y: f64) {
        session.pointer_down(MouseEvent::new(Point::new(x, y), Some(MouseButton::Left)));
        session.pointer_up(MouseEvent::new(Point::new(x, y), Some(MouseButton::Left)));
    }

    fn alt_click(session: &mut EditSession, x: f64, y: f64) {
        let ev =
            MouseEvent::with_modifiers(Point::new(x, y), Some(MouseButton::Left), Modifiers::ALT);
        session.pointer_down(ev);
        session.pointer_up(ev);
    }

    /// Session with a viewport whose screen coordinates equal design
    /// coordinates (zoom 1, origin 0, Y negated)
    fn pen_session() -> EditSession {
        let mut session = EditSession::new();
        session.set_tool(ToolId::Pen);
        session
    }

    /// Screen position that maps to a given design position under the
    /// default viewport (origin 0, zoom 1): screen = (x, -y)
    fn screen(x: f64, y: f64) -> (f64, f64) {
        (x, -y)
    }

    #[test]
    fn first_click_starts_a_subpath() {
        let mut session = pen_session();
        let (sx, sy) = screen(0.0, 0.0);
        click(&mut session, sx, sy);

        assert_eq!(session.paths().len(), 1);
        assert!(matches!(
            session.paths()[0].commands()[0],
            PathCommand::MoveTo(p) if p.point == Point::ZERO
        ));
    }

    #[test]
    fn second_click_appends_line_to() {
        let mut session = pen_session();
        let (sx, sy) = screen(0.0, 0.0);
        click(&mut session, sx, sy);
        let (sx, sy) = screen(30.0, 40.0);
        click(&mut session, sx, sy);

        assert_eq!(session.paths().len(), 1);
        assert!(matches!(
            session.paths()[0].commands()[1],
            PathCommand::LineTo(p) if p.point == Point::new(30.0, 40.0)
        ));
    }

    #[test]
    fn off_curve_click_buffers_without_mutation() {
        let mut session = pen_session();
        let (sx, sy) = screen(0.0, 0.0);
        click(&mut session, sx, sy);
        let commands_before = session.paths()[0].commands().len();

        let (sx, sy) = screen(10.0, 10.0);
        alt_click(&mut session, sx, sy);

        assert_eq!(session.paths()[0].commands().len(), commands_before);
        assert_eq!(
            session.gesture().pending_control(),
            Some(Point::new(10.0, 10.0))
        );
    }

    #[test]
    fn pending_control_pairs_into_quad() {
        let mut session = pen_session();
        let (sx, sy) = screen(0.0, 0.0);
        click(&mut session, sx, sy);
        let (sx, sy) = screen(10.0, 10.0);
        alt_click(&mut session, sx, sy);
        let (sx, sy) = screen(20.0, 20.0);
        click(&mut session, sx, sy);

        let commands = session.paths()[0].commands();
        assert!(matches!(
            &commands[1],
            PathCommand::QuadTo { ctrl, end }
                if ctrl.point == Point::new(10.0, 10.0) && end.point == Point::new(20.0, 20.0)
        ));
        // Buffer is consumed
        assert_eq!(session.gesture().pending_control(), None);
    }

    #[test]
    fn later_off_curve_click_replaces_buffer() {
        let mut session = pen_session();
        let (sx, sy) = screen(0.0, 0.0);
        click(&mut session, sx, sy);
        let (sx, sy) = screen(10.0, 10.0);
        alt_click(&mut session, sx, sy);
        let (sx, sy) = screen(12.0, 12.0);
        alt_click(&mut session, sx, sy);

        assert_eq!(
            session.gesture().pending_control(),
            Some(Point::new(12.0, 12.0))
        );
    }

    #[test]
    fn tool_switch_clears_pending_control() {
        let mut session = pen_session();
        let (sx, sy) = screen(0.0, 0.0);
        click(&mut session, sx, sy);
        let (sx, sy) = screen(10.0, 10.0);
        alt_click(&mut session, sx, sy);

        session.set_tool(ToolId::Select);
        assert_eq!(session.gesture().pending_control(), None);

        // Returning to the pen starts a fresh stroke: the next on-curve
        // click opens a new subpath rather than extending the old one
        session.set_tool(ToolId::Pen);
        let (sx, sy) = screen(100.0, 100.0);
        click(&mut session, sx, sy);
        assert_eq!(session.paths().len(), 2);
    }
}
