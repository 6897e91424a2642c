#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{ZOOM_MAX, ZOOM_MIN};
use crate::geometry::Point;

/// Camera state for pan/zoom over the canvas.
///
/// `pan_x` / `pan_y` are in CSS pixels.
/// `zoom` is a scale factor (1.0 = no zoom), kept within `[zoom_min, zoom_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    zoom: f64,
    zoom_min: f64,
    zoom_max: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(ZOOM_MIN, ZOOM_MAX)
    }
}

impl Camera {
    /// An unpanned camera at zoom 1 (clamped into the limits).
    #[must_use]
    pub fn new(zoom_min: f64, zoom_max: f64) -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0_f64.max(zoom_min).min(zoom_max), zoom_min, zoom_max }
    }

    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.zoom_min, self.zoom_max)
    }

    /// Convert a screen-space point (CSS pixels) to canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.pan_x) / self.zoom,
            y: (screen.y - self.pan_y) / self.zoom,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.zoom + self.pan_x,
            y: canvas.y * self.zoom + self.pan_y,
        }
    }

    /// Convert a screen-space distance (pixels) to canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// Shift the pan offset by a screen-space delta.
    pub fn pan_by(&mut self, delta: Point) {
        self.pan_x += delta.x;
        self.pan_y += delta.y;
    }

    /// Set the zoom (clamped) keeping the canvas point under `screen` fixed.
    pub fn zoom_at(&mut self, screen: Point, zoom: f64) {
        let anchor = self.screen_to_canvas(screen);
        self.zoom = zoom.max(self.zoom_min).min(self.zoom_max);
        self.pan_x = screen.x - anchor.x * self.zoom;
        self.pan_y = screen.y - anchor.y * self.zoom;
    }

    /// Multiply the zoom by `factor` about `screen`.
    pub fn zoom_by(&mut self, screen: Point, factor: f64) {
        self.zoom_at(screen, self.zoom * factor);
    }
}
