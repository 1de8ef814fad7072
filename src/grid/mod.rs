// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph grid model — the font overview, populated one page at a time.
//!
//! The grid never talks to the backend directly. When the host's scroll
//! trigger fires it asks for a [`PageRequest`]; while one is outstanding no
//! second request is issued, so near-simultaneous triggers cannot overlap.
//! Completion (success or failure) clears the in-flight flag before
//! anything else, so the next trigger check sees a settled grid.
//!
//! Cell activation (double-click in the host) emits an [`OpenRequest`]
//! through the relay; saved-glyph events come back through
//! [`apply_saved`](GlyphGrid::apply_saved) and refresh the matching cell's
//! thumbnail without a reload.

use crate::model::{GlyphPage, GlyphSlot};
use crate::relay::{GlyphSaved, OpenRequest, Relay};
use crate::settings;
use std::path::PathBuf;

/// An outstanding page fetch, to be passed to the backend by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub file: PathBuf,
    pub offset: usize,
    pub limit: usize,
    generation: u64,
}

/// Paged model of every glyph in one font file
pub struct GlyphGrid {
    file: PathBuf,
    cells: Vec<GlyphSlot>,
    /// Unknown until the first page arrives
    total_count: Option<usize>,
    units_per_em: Option<f64>,
    /// Guard against overlapping page requests
    loading: bool,
    /// Bumped on reset so a stale in-flight page cannot land in fresh state
    generation: u64,
    open_relay: Relay<OpenRequest>,
}

impl GlyphGrid {
    pub fn new(file: PathBuf, open_relay: Relay<OpenRequest>) -> Self {
        Self {
            file,
            cells: Vec::new(),
            total_count: None,
            units_per_em: None,
            loading: false,
            generation: 0,
            open_relay,
        }
    }

    pub fn file(&self) -> &PathBuf {
        &self.file
    }

    pub fn cells(&self) -> &[GlyphSlot] {
        &self.cells
    }

    pub fn units_per_em(&self) -> Option<f64> {
        self.units_per_em
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether every glyph in the file has been loaded
    pub fn is_fully_loaded(&self) -> bool {
        self.total_count
            .is_some_and(|total| self.cells.len() >= total)
    }

    /// Ask for the next page, arming the in-flight guard.
    ///
    /// Returns `None` while a request is outstanding or once the grid is
    /// fully loaded. The request's `offset` never exceeds the file's total
    /// count.
    pub fn next_page_request(&mut self) -> Option<PageRequest> {
        if self.loading || self.is_fully_loaded() {
            return None;
        }

        let offset = self.cells.len();
        let limit = match self.total_count {
            Some(total) => settings::grid::PAGE_SIZE.min(total - offset),
            None => settings::grid::PAGE_SIZE,
        };

        self.loading = true;
        Some(PageRequest {
            file: self.file.clone(),
            offset,
            limit,
            generation: self.generation,
        })
    }

    /// Apply a completed page fetch.
    ///
    /// The in-flight flag clears before anything else, so a trigger check
    /// fired from within the same turn can issue the next request. Results
    /// from a superseded generation (the grid was reset while the fetch was
    /// pending) are discarded.
    pub fn apply_page(&mut self, request: &PageRequest, page: GlyphPage) {
        if request.generation != self.generation {
            tracing::debug!(offset = request.offset, "discarding stale grid page");
            return;
        }
        self.loading = false;

        if request.offset != self.cells.len() {
            tracing::warn!(
                offset = request.offset,
                have = self.cells.len(),
                "page offset does not match grid population, ignoring"
            );
            return;
        }

        self.total_count = Some(page.total_count);
        self.units_per_em = Some(page.units_per_em);
        self.cells.extend(page.glyphs);
    }

    /// Record a failed page fetch: clear the guard so the host can retry
    /// from its next trigger
    pub fn fail_page(&mut self, request: &PageRequest) {
        if request.generation != self.generation {
            return;
        }
        self.loading = false;
        tracing::error!(offset = request.offset, "glyph page fetch failed");
    }

    /// Drop all loaded cells and start over (e.g. the file changed on disk).
    /// Any in-flight page becomes stale.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.total_count = None;
        self.units_per_em = None;
        self.loading = false;
        self.generation += 1;
    }

    /// Cell activation: request that the workspace open (or focus) an
    /// editor for this glyph. Dropped silently if no workspace is mounted.
    pub fn activate(&self, glyph_id: u32) {
        self.open_relay.emit(OpenRequest {
            file: self.file.clone(),
            glyph_id,
        });
    }

    /// Refresh the matching cell's thumbnail after a save event.
    ///
    /// Events for other files, or for glyphs not currently populated, are
    /// ignored.
    pub fn apply_saved(&mut self, event: &GlyphSaved) {
        if event.file != self.file {
            return;
        }
        if let Some(cell) = self.cells.iter_mut().find(|c| c.glyph_id == event.glyph_id) {
            cell.preview = event.outline.clone();
            tracing::debug!(glyph_id = event.glyph_id, "grid thumbnail refreshed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::EditablePath;
    use kurbo::Point;
    use std::sync::{Arc, Mutex};

    fn slot(glyph_id: u32) -> GlyphSlot {
        GlyphSlot {
            glyph_id,
            name: format!("glyph{glyph_id:05}"),
            preview: Vec::new(),
            advance_width: 600.0,
        }
    }

    fn page(range: std::ops::Range<u32>, total: usize) -> GlyphPage {
        GlyphPage {
            glyphs: range.map(slot).collect(),
            total_count: total,
            units_per_em: 1000.0,
        }
    }

    fn grid() -> GlyphGrid {
        GlyphGrid::new(PathBuf::from("font.ttf"), Relay::new())
    }

    #[test]
    fn only_one_request_in_flight() {
        let mut grid = grid();
        let first = grid.next_page_request();
        assert!(first.is_some());
        // A near-simultaneous second trigger must not issue a request
        assert!(grid.next_page_request().is_none());
    }

    #[test]
    fn completion_rearms_the_guard() {
        let mut grid = grid();
        let req = grid.next_page_request().unwrap();
        grid.apply_page(&req, page(0..128, 300));

        assert!(!grid.is_loading());
        let next = grid.next_page_request().unwrap();
        assert_eq!(next.offset, 128);
    }

    #[test]
    fn failure_rearms_the_guard() {
        let mut grid = grid();
        let req = grid.next_page_request().unwrap();
        grid.fail_page(&req);

        assert!(!grid.is_loading());
        assert!(grid.next_page_request().is_some());
        // Nothing was populated by the failure
        assert!(grid.cells().is_empty());
    }

    #[test]
    fn offset_never_exceeds_total_count() {
        let mut grid = grid();
        let req = grid.next_page_request().unwrap();
        grid.apply_page(&req, page(0..128, 150));

        let tail = grid.next_page_request().unwrap();
        assert_eq!(tail.offset, 128);
        assert_eq!(tail.limit, 22);
        grid.apply_page(&tail, page(128..150, 150));

        assert!(grid.is_fully_loaded());
        assert!(grid.next_page_request().is_none());
    }

    #[test]
    fn stale_page_after_reset_is_discarded() {
        let mut grid = grid();
        let req = grid.next_page_request().unwrap();
        grid.reset();

        grid.apply_page(&req, page(0..128, 300));
        assert!(grid.cells().is_empty());
        // The reset grid can still load fresh pages
        assert!(grid.next_page_request().is_some());
    }

    #[test]
    fn activate_emits_open_request() {
        let relay = Relay::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        relay.set_handler(move |req: OpenRequest| {
            sink.lock().unwrap().push(req);
        });

        let grid = GlyphGrid::new(PathBuf::from("font.ttf"), relay);
        grid.activate(42);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![OpenRequest {
                file: PathBuf::from("font.ttf"),
                glyph_id: 42,
            }]
        );
    }

    #[test]
    fn saved_event_refreshes_matching_cell_only() {
        let mut grid = grid();
        let req = grid.next_page_request().unwrap();
        grid.apply_page(&req, page(0..3, 3));

        let outline = vec![EditablePath::from_start(Point::new(1.0, 2.0))];
        grid.apply_saved(&GlyphSaved {
            file: PathBuf::from("font.ttf"),
            glyph_id: 1,
            outline: outline.clone(),
        });

        assert!(grid.cells()[0].preview.is_empty());
        assert_eq!(grid.cells()[1].preview, outline);
        assert!(grid.cells()[2].preview.is_empty());
    }

    #[test]
    fn saved_event_for_other_file_is_ignored() {
        let mut grid = grid();
        let req = grid.next_page_request().unwrap();
        grid.apply_page(&req, page(0..2, 2));

        grid.apply_saved(&GlyphSaved {
            file: PathBuf::from("other.ttf"),
            glyph_id: 0,
            outline: vec![EditablePath::from_start(Point::ZERO)],
        });
        assert!(grid.cells()[0].preview.is_empty());
    }
}
