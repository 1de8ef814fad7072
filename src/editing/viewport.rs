// Copyright 2025 the Glyphscope Authors
// SPDX-License-Identifier: Apache-2.0

//! Viewport transformation between screen space and design space.
//!
//! Design space is Y-up in font units; screen space is Y-down in pixels.
//! The mapping is `screen = (origin.x + x*zoom, origin.y - y*zoom)`. Zoom is
//! clamped to the `settings::editor` range at every mutation, so no valid
//! `ViewPort` can hold an out-of-range zoom.

use crate::settings;
use kurbo::{Point, Rect, Size, Vec2};

/// Screen/design-space transform: uniform zoom plus a screen-space origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewPort {
    zoom: f64,
    /// Screen position of the design-space origin
    pub origin: Point,
}

impl ViewPort {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            origin: Point::ZERO,
        }
    }

    /// Current zoom factor (always within the configured range)
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Set the zoom factor, clamping to the configured range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(settings::editor::MIN_ZOOM, settings::editor::MAX_ZOOM);
    }

    /// Map a design-space point to screen space
    pub fn to_screen(&self, design: Point) -> Point {
        Point::new(
            self.origin.x + design.x * self.zoom,
            self.origin.y - design.y * self.zoom,
        )
    }

    /// Map a screen-space point to design space
    pub fn screen_to_design(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.origin.x) / self.zoom,
            (self.origin.y - screen.y) / self.zoom,
        )
    }

    /// Pick radius in design units.
    ///
    /// A fixed screen radius divided by zoom, so pick precision stays
    /// visually constant at every magnification.
    pub fn hit_radius(&self) -> f64 {
        settings::hit_testing::RADIUS_PX / self.zoom
    }

    /// Translate the view by a screen-space delta (1:1 with the cursor)
    pub fn pan(&mut self, delta: Vec2) {
        self.origin += delta;
    }

    /// Zoom by `steps` wheel increments, keeping the design point under
    /// `anchor` (a screen position) fixed.
    pub fn zoom_about(&mut self, anchor: Point, steps: i32) {
        let anchor_design = self.screen_to_design(anchor);
        self.set_zoom(self.zoom * settings::editor::ZOOM_STEP.powi(steps));
        self.origin = Point::new(
            anchor.x - anchor_design.x * self.zoom,
            anchor.y + anchor_design.y * self.zoom,
        );
    }

    /// Frame a design-space rectangle within a canvas, with a uniform
    /// pixel margin. Used to initialize the view when a glyph loads.
    pub fn fit_to_rect(&mut self, design: Rect, canvas: Size, margin: f64) {
        let avail_w = (canvas.width - 2.0 * margin).max(1.0);
        let avail_h = (canvas.height - 2.0 * margin).max(1.0);

        if design.width() > 0.0 || design.height() > 0.0 {
            let zx = if design.width() > 0.0 {
                avail_w / design.width()
            } else {
                f64::INFINITY
            };
            let zy = if design.height() > 0.0 {
                avail_h / design.height()
            } else {
                f64::INFINITY
            };
            self.set_zoom(zx.min(zy));
        }

        let center = design.center();
        self.origin = Point::new(
            canvas.width / 2.0 - center.x * self.zoom,
            canvas.height / 2.0 + center.y * self.zoom,
        );
    }
}

impl Default for ViewPort {
    fn default() -> Self {
        Self::new()
    }
}
