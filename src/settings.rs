// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Engine settings and tuning constants.
//!
//! This module holds non-visual constants that stay stable across hosts.
//! Anything a user may want to override at runtime lives in `config.rs`
//! instead.

// ============================================================================
// EDITOR SETTINGS
// ============================================================================
/// Minimum zoom level (5% of original size)
const MIN_ZOOM: f64 = 0.05;

/// Maximum zoom level (50x original size)
const MAX_ZOOM: f64 = 50.0;

/// Zoom multiplier applied per wheel step
const ZOOM_STEP: f64 = 1.1;

/// Margin kept around a glyph when framing it in a fresh canvas, in pixels
const FIT_MARGIN_PX: f64 = 40.0;

// ============================================================================
// HIT TESTING SETTINGS
// ============================================================================
/// Screen-space pick radius around a point, in pixels.
///
/// Divided by the current zoom before use so pick precision stays visually
/// constant at every magnification.
const HIT_RADIUS_PX: f64 = 8.0;

// ============================================================================
// NUDGE SETTINGS
// ============================================================================
/// Base nudge amount in design units (arrow key)
const NUDGE_BASE: f64 = 2.0;

/// Shift-arrow nudge amount in design units
const NUDGE_SHIFT: f64 = 8.0;

/// Ctrl/Cmd-arrow nudge amount in design units
const NUDGE_CMD: f64 = 32.0;

// ============================================================================
// GLYPH GRID SETTINGS
// ============================================================================
/// Number of glyph slots requested per grid page
const GRID_PAGE_SIZE: usize = 128;

// ============================================================================
// PUBLIC API - Don't edit below this line unless you know what you're doing
// ============================================================================

/// Editor settings (zoom, viewport, etc.)
pub mod editor {
    /// Minimum zoom level (5% of original size)
    pub const MIN_ZOOM: f64 = super::MIN_ZOOM;

    /// Maximum zoom level (50x original size)
    pub const MAX_ZOOM: f64 = super::MAX_ZOOM;

    /// Zoom multiplier applied per wheel step
    pub const ZOOM_STEP: f64 = super::ZOOM_STEP;

    /// Margin kept around a glyph when framing it in a fresh canvas
    pub const FIT_MARGIN_PX: f64 = super::FIT_MARGIN_PX;
}

/// Hit testing settings
pub mod hit_testing {
    /// Screen-space pick radius in pixels
    pub const RADIUS_PX: f64 = super::HIT_RADIUS_PX;
}

/// Nudge amounts for arrow key point movement
pub mod nudge {
    /// Base nudge (arrow key alone)
    pub const BASE: f64 = super::NUDGE_BASE;

    /// Shift-arrow nudge
    pub const SHIFT: f64 = super::NUDGE_SHIFT;

    /// Cmd-arrow nudge
    pub const CMD: f64 = super::NUDGE_CMD;
}

/// Glyph grid pagination settings
pub mod grid {
    /// Glyph slots per page request
    pub const PAGE_SIZE: usize = super::GRID_PAGE_SIZE;
}
