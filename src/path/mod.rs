// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Path abstraction for glyph outlines — the editable representation.
//!
//! An `EditablePath` is an ordered command sequence (`MoveTo`, `LineTo`,
//! `QuadTo`, `CubicTo`, `Close`) whose drawing commands carry identified
//! points. A glyph outline is a `Vec<EditablePath>`; insertion order is draw
//! order. Paths convert to `kurbo::BezPath` for rendering hosts. Command
//! sequences are created when a glyph is opened for editing (seeded from the
//! backend outline fetch) and handed back verbatim on save.

use crate::model::EntityId;
use kurbo::{BezPath, Point, Rect};
use std::collections::BTreeSet;

// ============================================================================
// POINTS
// ============================================================================

/// Classification of an outline point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    /// A point lying on the final outline
    OnCurve,
    /// A quadratic Bézier control point
    OffCurveQuad,
    /// A cubic Bézier control point
    OffCurveCubic,
}

/// An identified point in a path, in font design units (Y-up)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathPoint {
    pub id: EntityId,
    pub point: Point,
    pub kind: PointKind,
}

impl PathPoint {
    /// Create an on-curve point at the given design-space position
    pub fn on_curve(point: Point) -> Self {
        Self {
            id: EntityId::next(),
            point,
            kind: PointKind::OnCurve,
        }
    }

    /// Create a quadratic control point
    pub fn off_curve_quad(point: Point) -> Self {
        Self {
            id: EntityId::next(),
            point,
            kind: PointKind::OffCurveQuad,
        }
    }

    /// Create a cubic control point
    pub fn off_curve_cubic(point: Point) -> Self {
        Self {
            id: EntityId::next(),
            point,
            kind: PointKind::OffCurveCubic,
        }
    }

    /// Whether this point lies on the outline (not a control point)
    pub fn is_on_curve(&self) -> bool {
        self.kind == PointKind::OnCurve
    }
}

// ============================================================================
// COMMANDS
// ============================================================================

/// A single outline drawing command
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath
    MoveTo(PathPoint),
    /// Straight segment to an on-curve point
    LineTo(PathPoint),
    /// Quadratic segment: one control point, one end point
    QuadTo { ctrl: PathPoint, end: PathPoint },
    /// Cubic segment: two control points, one end point
    CubicTo {
        ctrl1: PathPoint,
        ctrl2: PathPoint,
        end: PathPoint,
    },
    /// Close the current subpath. Carries no point.
    Close,
}

impl PathCommand {
    /// Iterate the points this command carries, in command order
    pub fn points(&self) -> impl Iterator<Item = &PathPoint> {
        let pts: Vec<&PathPoint> = match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
            PathCommand::QuadTo { ctrl, end } => vec![ctrl, end],
            PathCommand::CubicTo { ctrl1, ctrl2, end } => vec![ctrl1, ctrl2, end],
            PathCommand::Close => Vec::new(),
        };
        pts.into_iter()
    }

    /// Mutable access to the points this command carries
    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut PathPoint> {
        let pts: Vec<&mut PathPoint> = match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
            PathCommand::QuadTo { ctrl, end } => vec![ctrl, end],
            PathCommand::CubicTo { ctrl1, ctrl2, end } => vec![ctrl1, ctrl2, end],
            PathCommand::Close => Vec::new(),
        };
        pts.into_iter()
    }

    /// Whether this command draws (everything except `Close`)
    pub fn is_drawing(&self) -> bool {
        !matches!(self, PathCommand::Close)
    }
}

// ============================================================================
// EDITABLE PATH
// ============================================================================

/// An editable outline path — an identified, ordered command sequence.
///
/// Invariants: the first command is always `MoveTo`, and `Close` is never
/// followed by a drawing command without an intervening `MoveTo`.
#[derive(Debug, Clone, PartialEq)]
pub struct EditablePath {
    pub id: EntityId,
    commands: Vec<PathCommand>,
}

impl EditablePath {
    /// Start a new path with a `MoveTo` at the given design-space position
    pub fn from_start(start: Point) -> Self {
        Self {
            id: EntityId::next(),
            commands: vec![PathCommand::MoveTo(PathPoint::on_curve(start))],
        }
    }

    /// Build a path from an existing command sequence.
    ///
    /// Sequences that violate the command invariants are rejected with a
    /// warning and produce an empty-start path in release builds.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        if !Self::commands_are_valid(&commands) {
            debug_assert!(false, "invalid path command sequence");
            tracing::warn!("rejecting invalid path command sequence ({} commands)", commands.len());
            return Self {
                id: EntityId::next(),
                commands: Vec::new(),
            };
        }
        Self {
            id: EntityId::next(),
            commands,
        }
    }

    fn commands_are_valid(commands: &[PathCommand]) -> bool {
        if let Some(first) = commands.first()
            && !matches!(first, PathCommand::MoveTo(_))
        {
            return false;
        }
        let mut after_close = false;
        for cmd in commands {
            match cmd {
                PathCommand::MoveTo(_) => after_close = false,
                PathCommand::Close => after_close = true,
                _ if after_close => return false,
                _ => {}
            }
        }
        true
    }

    /// The command sequence, in draw order
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Append a command, enforcing the sequence invariants.
    ///
    /// An invalid append (drawing command on an empty or just-closed path)
    /// is a programming error in the caller's state discipline: fast-fail
    /// in debug, warn and no-op in release.
    pub fn push_command(&mut self, command: PathCommand) {
        let needs_move = self.commands.is_empty()
            || matches!(self.commands.last(), Some(PathCommand::Close));
        if needs_move && !matches!(command, PathCommand::MoveTo(_)) {
            debug_assert!(false, "drawing command without an open subpath");
            tracing::warn!("ignoring {:?} on a path with no open subpath", command);
            return;
        }
        self.commands.push(command);
    }

    /// Whether the last subpath is open (can accept drawing commands)
    pub fn is_open(&self) -> bool {
        !self.commands.is_empty() && !matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Close the current subpath. No-op if nothing is open.
    pub fn close(&mut self) {
        if self.is_open() {
            self.commands.push(PathCommand::Close);
        }
    }

    /// Iterate every point in the path, in command order
    pub fn points(&self) -> impl Iterator<Item = &PathPoint> {
        self.commands.iter().flat_map(|c| c.points())
    }

    /// Mutable iteration over every point in the path
    pub fn points_mut(&mut self) -> impl Iterator<Item = &mut PathPoint> {
        self.commands.iter_mut().flat_map(|c| c.points_mut())
    }

    /// The last on-curve position, if any (the pen tool's current anchor)
    pub fn last_on_curve(&self) -> Option<Point> {
        self.points()
            .filter(|p| p.is_on_curve())
            .last()
            .map(|p| p.point)
    }

    /// Remove every point in `doomed`, repairing the command sequence.
    ///
    /// A segment whose end point is deleted is dropped; a segment that only
    /// lost control points degrades to a `LineTo`; a subpath whose start is
    /// deleted restarts at its next surviving on-curve point. Point ids of
    /// survivors are preserved.
    pub fn delete_points(&mut self, doomed: &BTreeSet<EntityId>) {
        let commands = std::mem::take(&mut self.commands);
        let mut kept = Vec::with_capacity(commands.len());
        let mut open = false;
        let mut restart = false;

        for cmd in commands {
            match cmd {
                PathCommand::Close => {
                    if open {
                        kept.push(PathCommand::Close);
                    }
                    open = false;
                    restart = false;
                }
                PathCommand::MoveTo(p) => {
                    if doomed.contains(&p.id) {
                        restart = true;
                        open = false;
                    } else {
                        kept.push(PathCommand::MoveTo(p));
                        open = true;
                        restart = false;
                    }
                }
                PathCommand::LineTo(end) => {
                    if doomed.contains(&end.id) {
                        continue;
                    }
                    Self::push_surviving(&mut kept, &mut open, &mut restart, PathCommand::LineTo(end), end);
                }
                PathCommand::QuadTo { ctrl, end } => {
                    if doomed.contains(&end.id) {
                        continue;
                    }
                    let cmd = if doomed.contains(&ctrl.id) {
                        PathCommand::LineTo(end)
                    } else {
                        PathCommand::QuadTo { ctrl, end }
                    };
                    Self::push_surviving(&mut kept, &mut open, &mut restart, cmd, end);
                }
                PathCommand::CubicTo { ctrl1, ctrl2, end } => {
                    if doomed.contains(&end.id) {
                        continue;
                    }
                    let cmd = if doomed.contains(&ctrl1.id) || doomed.contains(&ctrl2.id) {
                        PathCommand::LineTo(end)
                    } else {
                        PathCommand::CubicTo { ctrl1, ctrl2, end }
                    };
                    Self::push_surviving(&mut kept, &mut open, &mut restart, cmd, end);
                }
            }
        }

        self.commands = kept;
    }

    fn push_surviving(
        kept: &mut Vec<PathCommand>,
        open: &mut bool,
        restart: &mut bool,
        cmd: PathCommand,
        end: PathPoint,
    ) {
        if *restart || !*open {
            kept.push(PathCommand::MoveTo(end));
        } else {
            kept.push(cmd);
        }
        *open = true;
        *restart = false;
    }

    /// Convert this path to a kurbo BezPath for rendering
    pub fn to_bezpath(&self) -> BezPath {
        let mut bez = BezPath::new();
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) => bez.move_to(p.point),
                PathCommand::LineTo(p) => bez.line_to(p.point),
                PathCommand::QuadTo { ctrl, end } => bez.quad_to(ctrl.point, end.point),
                PathCommand::CubicTo { ctrl1, ctrl2, end } => {
                    bez.curve_to(ctrl1.point, ctrl2.point, end.point)
                }
                PathCommand::Close => bez.close_path(),
            }
        }
        bez
    }
}

/// Iterate every point across an outline, path order then command order.
///
/// The ordering is stable so hit-testing tie-breaks and marquee results are
/// deterministic.
pub fn collect_points(paths: &[EditablePath]) -> impl Iterator<Item = &PathPoint> {
    paths.iter().flat_map(|p| p.points())
}

/// Design-space bounding box of every point in an outline.
///
/// Control points count: the box bounds the editable geometry, not the
/// rendered curve.
pub fn outline_bounds(paths: &[EditablePath]) -> Option<Rect> {
    let mut iter = collect_points(paths);
    let first = iter.next()?;
    let mut rect = Rect::from_points(first.point, first.point);
    for pt in iter {
        rect = rect.union_pt(pt.point);
    }
    Some(rect)
}
