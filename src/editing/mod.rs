// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod mouse;
pub mod selection;
pub mod session;
pub mod viewport;

pub use hit_test::HitTestResult;
pub use mouse::{Gesture, Modifiers, MouseButton, MouseEvent};
pub use selection::Selection;
pub use session::EditSession;
pub use viewport::ViewPort;
