// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyphscope: the engine of a font inspection and editing tool.
//!
//! The crate owns the parts of the application with real state-machine and
//! invariant-bearing logic:
//!
//! * [`editing`] — the interactive glyph editor: outline model mutations,
//!   selection, viewport math, and the pointer-driven gesture machine for
//!   panning, dragging, marquee selection, and pen drawing.
//! * [`workspace`] — the tabbed directory of open editor/viewer instances,
//!   keyed by stable identity, with at-most-one instance per key.
//! * [`relay`] — the cross-tab channels connecting glyph-grid cells to the
//!   workspace and editor save events back to grid thumbnails.
//! * [`grid`] — the paged glyph overview model.
//!
//! Font binary parsing, hinting, and rasterization live behind the
//! [`model::FontBackend`] trait; windowing, widgets, and styling belong to
//! the host, which drives this crate from its event loop.

pub mod config;
pub mod editing;
pub mod grid;
pub mod logging;
pub mod model;
pub mod path;
pub mod relay;
pub mod settings;
pub mod tools;
pub mod workspace;

pub use config::EditorConfig;
pub use editing::{EditSession, Gesture, Modifiers, MouseButton, MouseEvent, Selection, ViewPort};
pub use grid::{GlyphGrid, PageRequest};
pub use model::{BackendError, EntityId, FontBackend, GlyphOutline, GlyphPage, GlyphSlot};
pub use path::{EditablePath, PathCommand, PathPoint, PointKind};
pub use relay::{GlyphSaved, OpenRequest, Relay, SaveRelay};
pub use tools::{ToolBox, ToolId};
pub use workspace::{EditorTab, Notification, Tab, TabKey, ViewerTab, Workspace};
