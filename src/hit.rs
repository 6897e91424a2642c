//! Hit-testing: what is under a canvas-space point.
//!
//! Selection UI wins over objects. The tiers are checked strictly in order,
//! each across the whole selection before moving on:
//!
//! 1. rotation zones of selected objects
//! 2. point handles of the path being edited
//! 3. corner handles of selected objects
//! 4. the topmost visible, unlocked object containing the point
//! 5. the empty canvas
//!
//! Tiers 1-3 are tested in each object's unrotated frame, which is how the
//! selection UI is drawn.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::Document;
use crate::geometry::{Point, hit_rotation_zone, point_in_bounds};
use crate::selection::Selection;
use crate::shape::{CanvasObject, ObjectId};

/// Which corner handle was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Same order as [`crate::geometry::corner_handles`].
    pub const ALL: [Self; 4] = [Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight];

    /// Position in [`Corner::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::TopLeft => 0,
            Self::TopRight => 1,
            Self::BottomLeft => 2,
            Self::BottomRight => 3,
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Object(ObjectId),
    Handle { id: ObjectId, corner: Corner },
    Rotation(ObjectId),
    PathPoint { id: ObjectId, segment: usize },
    Canvas,
}

/// Everything a hit test reads. Sizes are in canvas units.
#[derive(Debug, Clone, Copy)]
pub struct HitContext<'a> {
    pub doc: &'a Document,
    pub selection: &'a Selection,
    pub editing_path: Option<ObjectId>,
    pub handle_size: f64,
    pub zone_size: f64,
}

impl HitContext<'_> {
    fn selected(&self) -> impl Iterator<Item = &CanvasObject> {
        self.selection
            .iter()
            .filter_map(|id| self.doc.get(id))
            .filter(|obj| obj.visible)
    }
}

/// Classify the canvas-space point `point`.
#[must_use]
pub fn hit_test(ctx: &HitContext<'_>, point: Point) -> HitTarget {
    for obj in ctx.selected() {
        let local = obj.unrotate(point);
        if hit_rotation_zone(local, obj.bounds(), ctx.handle_size, ctx.zone_size) {
            return HitTarget::Rotation(obj.id);
        }
    }

    if let Some(id) = ctx.editing_path {
        let editing = ctx.selected().find(|obj| obj.id == id);
        if let Some((obj, path)) = editing.and_then(|obj| obj.as_path().map(|p| (obj, p))) {
            let local = obj.unrotate(point);
            if let Some(segment) = path.hit_test_points(obj.position(), local, ctx.handle_size) {
                return HitTarget::PathPoint { id, segment };
            }
        }
    }

    for obj in ctx.selected() {
        let local = obj.unrotate(point);
        let handles = obj.handle_positions(ctx.handle_size);
        if let Some(corner) = Corner::ALL.into_iter().find(|c| point_in_bounds(local, handles[c.index()])) {
            return HitTarget::Handle { id: obj.id, corner };
        }
    }

    ctx.doc
        .ordered()
        .into_iter()
        .rev()
        .find(|obj| obj.visible && !obj.locked && obj.contains_point(point))
        .map_or(HitTarget::Canvas, |obj| HitTarget::Object(obj.id))
}
