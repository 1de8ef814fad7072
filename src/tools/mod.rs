// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Tool system for glyph editing.
//!
//! Exactly one tool is active per session. Tools receive pointer-down
//! events and start gestures; once a gesture is live, pointer moves and the
//! release are resolved by the gesture machinery in `EditSession`, so tools
//! hold only their own cross-click state (the pen's active path).

use crate::editing::{EditSession, MouseEvent};

pub mod knife;
pub mod pen;
pub mod select;

pub use knife::KnifeTool;
pub use pen::PenTool;
pub use select::SelectTool;

// ===== Tool Identifier =====

/// Tool identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolId {
    /// Select and move points
    Select,
    /// Draw new outline commands by sequential clicks
    Pen,
    /// Cut paths (tracks a cut line)
    Knife,
    /// Pan the canvas
    Hand,
}

// ===== ToolBox Enum =====

/// Enum wrapping all tool types
#[derive(Debug, Clone)]
pub enum ToolBox {
    Select(SelectTool),
    Pen(PenTool),
    Knife(KnifeTool),
    /// The hand tool has no state of its own; panning is handled at the
    /// session level so it also works via middle-drag in any tool
    Hand,
}

impl ToolBox {
    /// Create a tool by ID
    pub fn for_id(id: ToolId) -> Self {
        match id {
            ToolId::Select => ToolBox::Select(SelectTool::default()),
            ToolId::Pen => ToolBox::Pen(PenTool::default()),
            ToolId::Knife => ToolBox::Knife(KnifeTool::default()),
            ToolId::Hand => ToolBox::Hand,
        }
    }

    /// Get the tool ID
    pub fn id(&self) -> ToolId {
        match self {
            ToolBox::Select(_) => ToolId::Select,
            ToolBox::Pen(_) => ToolId::Pen,
            ToolBox::Knife(_) => ToolId::Knife,
            ToolBox::Hand => ToolId::Hand,
        }
    }

    /// Handle a left pointer-down
    pub fn pointer_down(&mut self, event: MouseEvent, session: &mut EditSession) {
        match self {
            ToolBox::Select(tool) => tool.pointer_down(event, session),
            ToolBox::Pen(tool) => tool.pointer_down(event, session),
            ToolBox::Knife(tool) => tool.pointer_down(event, session),
            ToolBox::Hand => {
                // Panning starts in the session before tool dispatch
            }
        }
    }
}
