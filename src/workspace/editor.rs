// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Editor tab — one glyph open for editing.
//!
//! The tab owns the edit session plus the fetch bookkeeping that keeps
//! asynchronous backend results honest: every outline or preview load is
//! issued as a request token carrying the tab's context and a generation
//! number, and a result is applied only when both still match. Navigating
//! away and back, or reloading, bumps the generation, so a late result from
//! the old context is discarded rather than cancelled.

use crate::editing::EditSession;
use crate::model::GlyphOutline;
use crate::path::EditablePath;
use crate::settings;
use crate::workspace::TabKey;
use kurbo::{Rect, Size};
use std::path::{Path, PathBuf};

/// Token for an outstanding outline fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineRequest {
    pub file: PathBuf,
    pub glyph_id: u32,
    generation: u64,
}

/// Token for an outstanding hinted-preview fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub file: PathBuf,
    pub glyph_id: u32,
    pub pixel_sizes: Vec<u32>,
    generation: u64,
}

/// An open glyph editor instance
#[derive(Debug)]
pub struct EditorTab {
    file: PathBuf,
    glyph_id: u32,
    pub session: EditSession,
    /// Advance width from the last applied outline fetch
    advance_width: f64,
    /// Design-space bounds from the last applied outline fetch
    bounds: Rect,
    is_composite: bool,
    component_glyph_ids: Vec<u32>,
    /// Hinted preview outlines, one entry per pixel size
    hinted_previews: Vec<(u32, Vec<EditablePath>)>,
    canvas_size: Size,
    /// Bumped whenever the tab's displayed context changes; in-flight
    /// fetches from before the bump are stale
    fetch_generation: u64,
    /// Whether an outline has been applied (or seeded) yet
    seeded: bool,
}

impl EditorTab {
    pub fn new(file: PathBuf, glyph_id: u32) -> Self {
        Self {
            file,
            glyph_id,
            session: EditSession::new(),
            advance_width: 0.0,
            bounds: Rect::ZERO,
            is_composite: false,
            component_glyph_ids: Vec::new(),
            hinted_previews: Vec::new(),
            canvas_size: Size::ZERO,
            fetch_generation: 0,
            seeded: false,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn glyph_id(&self) -> u32 {
        self.glyph_id
    }

    /// This tab's identity key
    pub fn key(&self) -> TabKey {
        TabKey::Glyph {
            file: self.file.clone(),
            glyph_id: self.glyph_id,
        }
    }

    pub fn advance_width(&self) -> f64 {
        self.advance_width
    }

    pub fn is_composite(&self) -> bool {
        self.is_composite
    }

    pub fn component_glyph_ids(&self) -> &[u32] {
        &self.component_glyph_ids
    }

    pub fn hinted_previews(&self) -> &[(u32, Vec<EditablePath>)] {
        &self.hinted_previews
    }

    /// Whether outline data has been applied or seeded yet
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    // ========================================================================
    // FETCH TOKENS
    // ========================================================================

    /// Issue a token for an outline fetch of this tab's glyph
    pub fn begin_outline_load(&self) -> OutlineRequest {
        OutlineRequest {
            file: self.file.clone(),
            glyph_id: self.glyph_id,
            generation: self.fetch_generation,
        }
    }

    /// Issue a token for a hinted-preview fetch at the given pixel sizes
    pub fn begin_preview_load(&self, pixel_sizes: Vec<u32>) -> PreviewRequest {
        PreviewRequest {
            file: self.file.clone(),
            glyph_id: self.glyph_id,
            pixel_sizes,
            generation: self.fetch_generation,
        }
    }

    /// Invalidate every outstanding fetch token (the displayed context is
    /// about to change, e.g. a reload from disk)
    pub fn invalidate_fetches(&mut self) {
        self.fetch_generation += 1;
    }

    fn request_matches(&self, file: &Path, glyph_id: u32, generation: u64) -> bool {
        generation == self.fetch_generation && glyph_id == self.glyph_id && file == self.file
    }

    /// Apply a completed outline fetch. Returns `false` when the result is
    /// stale (superseded context) and was discarded.
    pub fn apply_outline(&mut self, request: &OutlineRequest, outline: GlyphOutline) -> bool {
        if !self.request_matches(&request.file, request.glyph_id, request.generation) {
            tracing::debug!(
                glyph_id = request.glyph_id,
                "discarding stale outline result"
            );
            return false;
        }

        self.advance_width = outline.advance_width;
        self.bounds = outline.bounds;
        self.is_composite = outline.is_composite;
        self.component_glyph_ids = outline.component_glyph_ids;
        self.session.set_paths(outline.paths);
        self.seeded = true;
        self.fit_viewport();
        true
    }

    /// Seed a brand-new glyph with an empty outline (no backend fetch)
    pub fn seed_empty(&mut self, advance_width: f64) {
        self.advance_width = advance_width;
        self.bounds = Rect::ZERO;
        self.is_composite = false;
        self.component_glyph_ids.clear();
        self.session.set_paths(Vec::new());
        self.seeded = true;
    }

    /// Apply a completed hinted-preview fetch. Returns `false` for stale
    /// results. The backend guarantees one outline per requested size, in
    /// request order.
    pub fn apply_preview(
        &mut self,
        request: &PreviewRequest,
        outlines: Vec<Vec<EditablePath>>,
    ) -> bool {
        if !self.request_matches(&request.file, request.glyph_id, request.generation) {
            tracing::debug!(
                glyph_id = request.glyph_id,
                "discarding stale preview result"
            );
            return false;
        }
        if outlines.len() != request.pixel_sizes.len() {
            tracing::warn!(
                want = request.pixel_sizes.len(),
                got = outlines.len(),
                "preview result count mismatch, ignoring"
            );
            return false;
        }

        self.hinted_previews = request
            .pixel_sizes
            .iter()
            .copied()
            .zip(outlines)
            .collect();
        true
    }

    // ========================================================================
    // LAYOUT
    // ========================================================================

    /// The container was resized; re-measure and re-frame
    pub fn resize(&mut self, size: Size) {
        self.canvas_size = size;
        self.fit_viewport();
    }

    /// Frame the glyph in the canvas, once both are known
    fn fit_viewport(&mut self) {
        if self.canvas_size == Size::ZERO || !self.seeded {
            return;
        }
        let frame = if self.bounds.area() > 0.0 {
            self.bounds
        } else {
            // Empty or degenerate outline: frame the advance width box
            Rect::new(0.0, 0.0, self.advance_width.max(1.0), self.advance_width.max(1.0))
        };
        self.session
            .viewport
            .fit_to_rect(frame, self.canvas_size, settings::editor::FIT_MARGIN_PX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::collect_points;
    use kurbo::Point;

    fn outline(x: f64) -> GlyphOutline {
        GlyphOutline {
            paths: vec![EditablePath::from_start(Point::new(x, 0.0))],
            advance_width: 600.0,
            bounds: Rect::new(0.0, 0.0, 500.0, 700.0),
            is_composite: false,
            component_glyph_ids: Vec::new(),
        }
    }

    #[test]
    fn outline_applies_when_context_matches() {
        let mut tab = EditorTab::new(PathBuf::from("a.ttf"), 5);
        let req = tab.begin_outline_load();

        assert!(tab.apply_outline(&req, outline(10.0)));
        assert!(tab.is_seeded());
        assert_eq!(tab.advance_width(), 600.0);
        assert_eq!(tab.session.paths().len(), 1);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut tab = EditorTab::new(PathBuf::from("a.ttf"), 5);
        let req = tab.begin_outline_load();
        tab.invalidate_fetches();

        assert!(!tab.apply_outline(&req, outline(10.0)));
        assert!(!tab.is_seeded());
        assert!(tab.session.paths().is_empty());
    }

    #[test]
    fn result_for_other_glyph_is_discarded() {
        // A request issued for glyph 5 must never land in a tab showing
        // glyph 6, even at the same generation
        let tab5 = EditorTab::new(PathBuf::from("a.ttf"), 5);
        let req5 = tab5.begin_outline_load();

        let mut tab6 = EditorTab::new(PathBuf::from("a.ttf"), 6);
        assert!(!tab6.apply_outline(&req5, outline(10.0)));
        assert!(tab6.session.paths().is_empty());
    }

    #[test]
    fn seed_empty_marks_seeded_without_paths() {
        let mut tab = EditorTab::new(PathBuf::from("a.ttf"), 9);
        tab.seed_empty(512.0);

        assert!(tab.is_seeded());
        assert_eq!(tab.advance_width(), 512.0);
        assert!(tab.session.paths().is_empty());
    }

    #[test]
    fn preview_zips_sizes_with_outlines() {
        let mut tab = EditorTab::new(PathBuf::from("a.ttf"), 5);
        let req = tab.begin_preview_load(vec![12, 24]);

        let ok = tab.apply_preview(
            &req,
            vec![
                vec![EditablePath::from_start(Point::ZERO)],
                vec![EditablePath::from_start(Point::new(1.0, 1.0))],
            ],
        );
        assert!(ok);
        assert_eq!(tab.hinted_previews().len(), 2);
        assert_eq!(tab.hinted_previews()[0].0, 12);
        assert_eq!(tab.hinted_previews()[1].0, 24);
    }

    #[test]
    fn preview_count_mismatch_is_rejected() {
        let mut tab = EditorTab::new(PathBuf::from("a.ttf"), 5);
        let req = tab.begin_preview_load(vec![12, 24]);
        assert!(!tab.apply_preview(&req, vec![Vec::new()]));
        assert!(tab.hinted_previews().is_empty());
    }

    #[test]
    fn resize_after_load_frames_the_glyph() {
        let mut tab = EditorTab::new(PathBuf::from("a.ttf"), 5);
        let req = tab.begin_outline_load();
        tab.apply_outline(&req, outline(0.0));

        tab.resize(Size::new(800.0, 800.0));
        // The outline's bounds center maps to the canvas center
        let center = tab
            .session
            .viewport
            .to_screen(Point::new(250.0, 350.0));
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 400.0).abs() < 1e-9);
    }

    #[test]
    fn edits_survive_a_failed_fetch_cycle() {
        // Applying nothing (a failed fetch is simply never applied) leaves
        // the last valid state intact
        let mut tab = EditorTab::new(PathBuf::from("a.ttf"), 5);
        let req = tab.begin_outline_load();
        tab.apply_outline(&req, outline(10.0));

        let points_before: Vec<Point> =
            collect_points(tab.session.paths()).map(|p| p.point).collect();
        let _unused = tab.begin_outline_load();
        let points_after: Vec<Point> =
            collect_points(tab.session.paths()).map(|p| p.point).collect();
        assert_eq!(points_before, points_after);
    }
}
