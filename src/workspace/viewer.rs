// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Viewer tab — a read-only view of one font table.
//!
//! Table contents are decoded by the backend and rendered by the host;
//! the tab itself only carries the identity and measures its container.

use crate::workspace::TabKey;
use kurbo::Size;
use std::path::{Path, PathBuf};

/// An open table viewer instance
#[derive(Debug)]
pub struct ViewerTab {
    file: PathBuf,
    table: String,
    canvas_size: Size,
}

impl ViewerTab {
    pub fn new(file: PathBuf, table: impl Into<String>) -> Self {
        Self {
            file,
            table: table.into(),
            canvas_size: Size::ZERO,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// This tab's identity key
    pub fn key(&self) -> TabKey {
        TabKey::Table {
            file: self.file.clone(),
            table: self.table.clone(),
        }
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas_size
    }

    /// The container was resized
    pub fn resize(&mut self, size: Size) {
        self.canvas_size = size;
    }
}
