// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! The font backend collaborator interface.
//!
//! All font binary parsing, hinting, and rasterization live behind this
//! trait. The host invokes these calls off the event path and feeds results
//! back into the engine through the request tokens on `EditorTab` and
//! `GlyphGrid`, which discard results that arrive after their context has
//! changed.

use super::outline::{GlyphOutline, GlyphPage};
use crate::path::EditablePath;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors a backend call can produce
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The glyph id is out of range for the file
    #[error("glyph {glyph_id} not found in {path}")]
    NotFound { path: PathBuf, glyph_id: u32 },

    /// The file could not be read
    #[error("could not read {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Operations the engine consumes from the native font backend
pub trait FontBackend {
    /// Fetch the decoded outline for one glyph.
    ///
    /// Fails with `NotFound` when `glyph_id` is out of range and `Io` when
    /// the file is unreadable.
    fn fetch_glyph_outline(&self, file: &Path, glyph_id: u32)
    -> Result<GlyphOutline, BackendError>;

    /// Fetch one page of glyphs for grid population.
    ///
    /// `offset` must be `<= total_count` of the file.
    fn fetch_glyph_page(
        &self,
        file: &Path,
        offset: usize,
        limit: usize,
    ) -> Result<GlyphPage, BackendError>;

    /// Fetch rasterized preview outlines, one per requested pixel size,
    /// in the same order as `pixel_sizes`.
    fn fetch_hinted_outlines(
        &self,
        file: &Path,
        glyph_id: u32,
        pixel_sizes: &[u32],
    ) -> Result<Vec<Vec<EditablePath>>, BackendError>;

    /// Persist a glyph's edited outline. Success is what triggers the
    /// save relay event (see `workspace`).
    fn save_glyph(
        &self,
        file: &Path,
        glyph_id: u32,
        paths: &[EditablePath],
    ) -> Result<(), BackendError>;
}
