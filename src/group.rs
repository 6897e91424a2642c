//! Groups: objects that own other objects.
//!
//! Children are stored in group-local space. A child belongs to exactly one
//! group (or to the document) because groups own their children by value.

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, Extent, Point};
use crate::shape::{CanvasObject, ObjectId};
use crate::surface::Surface;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GroupShape {
    pub children: Vec<CanvasObject>,
}

impl GroupShape {
    #[must_use]
    pub fn new(children: Vec<CanvasObject>) -> Self {
        Self { children }
    }

    /// Union of the children's rotated extents, in group-local space.
    #[must_use]
    pub fn local_bounds(&self) -> Bounds {
        union_extent(&self.children).unwrap_or_default()
    }

    /// Hit-test a group-local point against the visible children.
    #[must_use]
    pub fn contains_local(&self, point: Point) -> bool {
        self.children.iter().any(|child| child.contains_point(point))
    }

    /// Draw each visible child, placed in group-local space, first to last.
    ///
    /// # Errors
    ///
    /// Propagates surface errors.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), S::Error> {
        for child in self.children.iter().filter(|c| c.visible) {
            child.render_placed(surface)?;
        }
        Ok(())
    }

    /// Depth-first search of the subtree for `id`.
    #[must_use]
    pub fn find(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.children.iter().find_map(|child| {
            if child.id == id {
                return Some(child);
            }
            child.as_group().and_then(|g| g.find(id))
        })
    }

    pub fn find_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject> {
        for child in &mut self.children {
            if child.id == id {
                return Some(child);
            }
            if let Some(found) = child.as_group_mut().and_then(|g| g.find_mut(id)) {
                return Some(found);
            }
        }
        None
    }
}

fn union_extent(objects: &[CanvasObject]) -> Option<Bounds> {
    let mut extent = Extent::new();
    for object in objects {
        extent.add_bounds(object.extent());
    }
    extent.bounds()
}

impl CanvasObject {
    /// Build a group around `objects` (given in the parent space).
    ///
    /// The group sits at the top-left of the union of the objects' rotated
    /// extents, and each child is a copy (same id and order) re-expressed
    /// relative to that anchor.
    #[must_use]
    pub fn from_objects(objects: &[CanvasObject], name: impl Into<String>) -> Self {
        let Some(union) = union_extent(objects) else {
            return Self::group(0.0, 0.0, Vec::new()).with_name(name);
        };
        let children = objects
            .iter()
            .map(|object| {
                let mut child = object.clone();
                child.translate(-union.x, -union.y);
                child
            })
            .collect();
        Self::group(union.x, union.y, children).with_name(name)
    }

    /// The children of this group re-expressed in the group's parent space:
    /// positions offset by the group position, rotation added, opacity
    /// multiplied. Empty when this is not a group.
    #[must_use]
    pub fn baked_children(&self) -> Vec<CanvasObject> {
        let Some(group) = self.as_group() else {
            return Vec::new();
        };
        group
            .children
            .iter()
            .map(|child| {
                let mut baked = child.clone();
                baked.translate(self.x, self.y);
                baked.rotation += self.rotation;
                baked.opacity *= self.opacity;
                baked
            })
            .collect()
    }
}
