// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Shared data model: entity identity and backend data carriers

pub mod backend;
pub mod entity_id;
pub mod outline;

pub use backend::{BackendError, FontBackend};
pub use entity_id::EntityId;
pub use outline::{GlyphOutline, GlyphPage, GlyphSlot};
