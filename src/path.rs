//! Vector paths built from move/line/curve segments.
//!
//! Segment coordinates are relative to the owning object's origin.

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use serde::{Deserialize, Serialize};

use crate::consts::PATH_MIN_EXTENT;
use crate::geometry::{Bounds, Extent, Point, point_in_bounds};
use crate::style::{Fill, Stroke};
use crate::surface::{LineCap, LineJoin, Surface};

/// One drawing instruction of a path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PathSegment {
    Move { x: f64, y: f64 },
    Line { x: f64, y: f64 },
    Cubic { cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64 },
    Quadratic { cpx: f64, cpy: f64, x: f64, y: f64 },
    Close,
}

impl PathSegment {
    /// The on-curve end point; `None` for `Close`.
    #[must_use]
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::Move { x, y } | Self::Line { x, y } | Self::Cubic { x, y, .. } | Self::Quadratic { x, y, .. } => {
                Some(Point::new(x, y))
            }
            Self::Close => None,
        }
    }

    /// This segment with its end point (and only its end point) moved to `to`.
    #[must_use]
    pub fn with_end_point(self, to: Point) -> Self {
        match self {
            Self::Move { .. } => Self::Move { x: to.x, y: to.y },
            Self::Line { .. } => Self::Line { x: to.x, y: to.y },
            Self::Cubic { cp1x, cp1y, cp2x, cp2y, .. } => Self::Cubic { cp1x, cp1y, cp2x, cp2y, x: to.x, y: to.y },
            Self::Quadratic { cpx, cpy, .. } => Self::Quadratic { cpx, cpy, x: to.x, y: to.y },
            Self::Close => Self::Close,
        }
    }

    // Control points count toward bounds, so curves may report a loose box.
    fn extend(&self, extent: &mut Extent) {
        match *self {
            Self::Move { x, y } | Self::Line { x, y } => extent.add_point(x, y),
            Self::Cubic { cp1x, cp1y, cp2x, cp2y, x, y } => {
                extent.add_point(x, y);
                extent.add_point(cp1x, cp1y);
                extent.add_point(cp2x, cp2y);
            }
            Self::Quadratic { cpx, cpy, x, y } => {
                extent.add_point(x, y);
                extent.add_point(cpx, cpy);
            }
            Self::Close => {}
        }
    }

    fn trace<S: Surface + ?Sized>(&self, surface: &mut S, origin: Point) {
        let (ox, oy) = (origin.x, origin.y);
        match *self {
            Self::Move { x, y } => surface.move_to(ox + x, oy + y),
            Self::Line { x, y } => surface.line_to(ox + x, oy + y),
            Self::Cubic { cp1x, cp1y, cp2x, cp2y, x, y } => {
                surface.bezier_curve_to(ox + cp1x, oy + cp1y, ox + cp2x, oy + cp2y, ox + x, oy + y);
            }
            Self::Quadratic { cpx, cpy, x, y } => surface.quadratic_curve_to(ox + cpx, oy + cpy, ox + x, oy + y),
            Self::Close => surface.close_path(),
        }
    }
}

/// Ordered segments plus a flag that closes the outline after the last one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathShape {
    pub segments: Vec<PathSegment>,
    #[serde(default)]
    pub closed: bool,
}

impl PathShape {
    #[must_use]
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments, closed: false }
    }

    #[must_use]
    pub fn closed(segments: Vec<PathSegment>) -> Self {
        Self { segments, closed: true }
    }

    /// Bounds in local space over end and control points, at least
    /// 1×1 when there is any geometry; zero-size at the origin otherwise.
    #[must_use]
    pub fn local_bounds(&self) -> Bounds {
        let mut extent = Extent::new();
        for segment in &self.segments {
            segment.extend(&mut extent);
        }
        match extent.bounds() {
            Some(b) => Bounds::new(b.x, b.y, b.width.max(PATH_MIN_EXTENT), b.height.max(PATH_MIN_EXTENT)),
            None => Bounds::default(),
        }
    }

    /// Handle boxes centered on each non-close end point, paired with the
    /// segment index. `origin` is the owning object's position.
    #[must_use]
    pub fn point_handles(&self, origin: Point, handle_size: f64) -> Vec<(usize, Bounds)> {
        let half = handle_size / 2.0;
        self.segments
            .iter()
            .enumerate()
            .filter_map(|(index, segment)| {
                let p = segment.end_point()?;
                Some((index, Bounds::new(origin.x + p.x - half, origin.y + p.y - half, handle_size, handle_size)))
            })
            .collect()
    }

    /// Index of the first segment whose point handle contains `point`.
    #[must_use]
    pub fn hit_test_points(&self, origin: Point, point: Point, handle_size: f64) -> Option<usize> {
        self.point_handles(origin, handle_size)
            .into_iter()
            .find(|(_, handle)| point_in_bounds(point, *handle))
            .map(|(index, _)| index)
    }

    /// Trace the segments with every coordinate offset by `origin`. Does not
    /// begin a path or paint.
    pub fn trace<S: Surface + ?Sized>(&self, surface: &mut S, origin: Point) {
        for segment in &self.segments {
            segment.trace(surface, origin);
        }
        if self.closed {
            surface.close_path();
        }
    }

    /// Draw in local space. Strokes use round caps and joins.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches the other shape renderers.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
    ) -> Result<(), S::Error> {
        if self.segments.is_empty() {
            return Ok(());
        }
        surface.begin_path();
        self.trace(surface, Point::default());
        if let Some(fill) = fill {
            surface.fill(fill.color());
        }
        if let Some(stroke) = stroke {
            surface.set_line_cap(LineCap::Round);
            surface.set_line_join(LineJoin::Round);
            surface.stroke(stroke.color, stroke.width);
        }
        Ok(())
    }
}
