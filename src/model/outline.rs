// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Data carriers for glyph outlines and grid pages as delivered by the
//! font backend. The backend owns all binary parsing; these structs hold
//! already-decoded data in design units.

use crate::path::EditablePath;
use kurbo::Rect;

/// A glyph's decoded outline, as fetched from the backend
#[derive(Debug, Clone)]
pub struct GlyphOutline {
    /// The outline paths, in draw order
    pub paths: Vec<EditablePath>,
    /// Horizontal advance in design units
    pub advance_width: f64,
    /// Design-space bounding box of the outline
    pub bounds: Rect,
    /// Whether this glyph is assembled from component references
    pub is_composite: bool,
    /// Glyph ids of the referenced components (empty for simple glyphs)
    pub component_glyph_ids: Vec<u32>,
}

impl GlyphOutline {
    /// An empty outline for a freshly created glyph
    pub fn empty(advance_width: f64) -> Self {
        Self {
            paths: Vec::new(),
            advance_width,
            bounds: Rect::ZERO,
            is_composite: false,
            component_glyph_ids: Vec::new(),
        }
    }
}

/// One glyph's entry in a grid page
#[derive(Debug, Clone)]
pub struct GlyphSlot {
    pub glyph_id: u32,
    pub name: String,
    /// Thumbnail outline used by grid cells
    pub preview: Vec<EditablePath>,
    pub advance_width: f64,
}

/// A page of glyphs for incremental grid population
#[derive(Debug, Clone)]
pub struct GlyphPage {
    pub glyphs: Vec<GlyphSlot>,
    /// Total number of glyphs in the file (not in this page)
    pub total_count: usize,
    pub units_per_em: f64,
}
