//! Points, bounds, and the handle/zone layout shared by hit-testing and
//! rendering.
//!
//! Everything here is a pure function of its inputs except
//! [`apply_rotation`], which pushes a rotation onto a drawing surface.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use serde::{Deserialize, Serialize};

use crate::consts::ROTATION_ZONE_GAP;
use crate::surface::Surface;

/// A point in screen, canvas, or object-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }
}

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Zero-size bounds sitting at `origin`.
    #[must_use]
    pub fn empty_at(origin: Point) -> Self {
        Self::new(origin.x, origin.y, 0.0, 0.0)
    }

    /// Build the smallest bounds covering two opposite corners.
    #[must_use]
    pub fn from_extent(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Corners in the order top-left, top-right, bottom-left, bottom-right.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let right = self.x + self.width;
        let bottom = self.y + self.height;
        [
            Point::new(self.x, self.y),
            Point::new(right, self.y),
            Point::new(self.x, bottom),
            Point::new(right, bottom),
        ]
    }

    /// These bounds shifted by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// These bounds grown by `amount` on every side.
    #[must_use]
    pub fn inflate(&self, amount: f64) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Inclusive containment test.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point_in_bounds(point, *self)
    }
}

/// Running min/max accumulator used to union points and boxes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Extent {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extent {
    pub(crate) fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub(crate) fn add_point(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub(crate) fn add_bounds(&mut self, bounds: Bounds) {
        self.add_point(bounds.x, bounds.y);
        self.add_point(bounds.x + bounds.width, bounds.y + bounds.height);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// The accumulated box, or `None` when nothing was added.
    pub(crate) fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        Some(Bounds::from_extent(self.min_x, self.min_y, self.max_x, self.max_y))
    }
}

/// Test if `point` lies inside `bounds`, edges included.
#[must_use]
pub fn point_in_bounds(point: Point, bounds: Bounds) -> bool {
    point.x >= bounds.x
        && point.x <= bounds.x + bounds.width
        && point.y >= bounds.y
        && point.y <= bounds.y + bounds.height
}

/// Rotate `point` around `origin` by `angle` radians.
#[must_use]
pub fn rotate_point(point: Point, origin: Point, angle: f64) -> Point {
    let (sin, cos) = angle.sin_cos();
    let dx = point.x - origin.x;
    let dy = point.y - origin.y;
    Point {
        x: origin.x + dx * cos - dy * sin,
        y: origin.y + dx * sin + dy * cos,
    }
}

/// Corner handle boxes of side `handle_size`, each centered on a corner of
/// `bounds`. Order: top-left, top-right, bottom-left, bottom-right.
#[must_use]
pub fn corner_handles(bounds: Bounds, handle_size: f64) -> [Bounds; 4] {
    let half = handle_size / 2.0;
    bounds
        .corners()
        .map(|corner| Bounds::new(corner.x - half, corner.y - half, handle_size, handle_size))
}

/// Rotation zones: boxes of side `zone_size` sitting diagonally outside each
/// corner, separated from the corner by half a handle plus a small gap.
#[must_use]
pub fn rotation_zones(bounds: Bounds, handle_size: f64, zone_size: f64) -> [Bounds; 4] {
    let offset = handle_size / 2.0 + ROTATION_ZONE_GAP;
    let left = bounds.x - offset - zone_size;
    let right = bounds.x + bounds.width + offset;
    let top = bounds.y - offset - zone_size;
    let bottom = bounds.y + bounds.height + offset;
    [
        Bounds::new(left, top, zone_size, zone_size),
        Bounds::new(right, top, zone_size, zone_size),
        Bounds::new(left, bottom, zone_size, zone_size),
        Bounds::new(right, bottom, zone_size, zone_size),
    ]
}

/// Whether `point` falls in any rotation zone around `bounds`.
#[must_use]
pub fn hit_rotation_zone(point: Point, bounds: Bounds, handle_size: f64, zone_size: f64) -> bool {
    rotation_zones(bounds, handle_size, zone_size)
        .iter()
        .any(|zone| point_in_bounds(point, *zone))
}

/// Axis-aligned box covering `bounds` after rotating it about its own center.
#[must_use]
pub fn rotated_extent(bounds: Bounds, rotation: f64) -> Bounds {
    if rotation == 0.0 {
        return bounds;
    }
    let center = bounds.center();
    let mut extent = Extent::new();
    for corner in bounds.corners() {
        let p = rotate_point(corner, center, rotation);
        extent.add_point(p.x, p.y);
    }
    extent.bounds().unwrap_or(bounds)
}

/// Rotate the surface by `rotation` about the center of `bounds`.
///
/// Callers bracket this with `save`/`restore`.
///
/// # Errors
///
/// Propagates any error from the surface transform calls.
pub fn apply_rotation<S: Surface + ?Sized>(surface: &mut S, bounds: Bounds, rotation: f64) -> Result<(), S::Error> {
    if rotation == 0.0 {
        return Ok(());
    }
    let center = bounds.center();
    surface.translate(center.x, center.y)?;
    surface.rotate(rotation)?;
    surface.translate(-center.x, -center.y)
}
