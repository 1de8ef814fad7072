// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Pointer input types and the interaction gesture state machine.
//!
//! The editor's transient interaction state is a single `Gesture` value;
//! which variant is live *is* the state, and each variant's payload carries
//! exactly the data that state needs. There are no scattered optional
//! fields — a rubber band exists only while `Marquee` is live, a pending
//! pen control only while `PenPendingControl` is live.

use kurbo::{Point, Rect};

/// Pointer button, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Keyboard modifier state accompanying a pointer event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const ALT: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: true,
        meta: false,
    };
}

/// A pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseEvent {
    /// Position in screen (canvas-local) pixels
    pub pos: Point,
    /// Button for down/up events, `None` for moves
    pub button: Option<MouseButton>,
    pub mods: Modifiers,
}

impl MouseEvent {
    pub fn new(pos: Point, button: Option<MouseButton>) -> Self {
        Self {
            pos,
            button,
            mods: Modifiers::default(),
        }
    }

    pub fn with_modifiers(pos: Point, button: Option<MouseButton>, mods: Modifiers) -> Self {
        Self { pos, button, mods }
    }
}

/// The interaction state machine.
///
/// Exactly one variant is live at a time; transitions are driven by
/// `EditSession`'s pointer handlers according to the active tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// No gesture in progress
    Idle,
    /// Middle-button or hand-tool pan; payload is the last cursor
    /// position in screen space
    Panning { last: Point },
    /// Dragging the selected points; payload is the last cursor position
    /// in design space, so each move applies only its own increment
    DraggingPoint { last_design: Point },
    /// Rubber-band selection; both corners in screen space
    Marquee { origin: Point, current: Point },
    /// Pen tool holding a buffered off-curve control (design space),
    /// awaiting the next on-curve click
    PenPendingControl { ctrl: Point },
    /// Knife tool tracking a transient cut line (design space)
    CutLine { origin: Point, current: Point },
}

impl Gesture {
    /// The rubber-band rectangle, present only during a marquee drag.
    ///
    /// Normalized so the caller never sees an inverted rectangle,
    /// regardless of drag direction.
    pub fn rubber_band(&self) -> Option<Rect> {
        match self {
            Gesture::Marquee { origin, current } => Some(Rect::from_points(*origin, *current)),
            _ => None,
        }
    }

    /// The buffered pen control point, if one is pending
    pub fn pending_control(&self) -> Option<Point> {
        match self {
            Gesture::PenPendingControl { ctrl } => Some(*ctrl),
            _ => None,
        }
    }
}
