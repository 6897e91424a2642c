//! Reversible document mutations.
//!
//! A command captures whatever it needs on `apply` so that `undo` restores
//! the document exactly, and a second `apply` after `undo` reproduces the
//! first. Commands that name a missing object do nothing.

#[cfg(test)]
#[path = "command_test.rs"]
mod command_test;

use std::fmt;

use crate::doc::Document;
use crate::geometry::{Bounds, Point};
use crate::order::{OrderKey, OrderKeyError};
use crate::path::PathSegment;
use crate::shape::{CanvasObject, ObjectId};

/// A reversible mutation of a [`Document`].
pub trait Command: fmt::Debug {
    fn apply(&mut self, doc: &mut Document);
    fn undo(&mut self, doc: &mut Document);
    /// Short name used in logs and history listings.
    fn label(&self) -> &'static str;
}

// =============================================================
// Add / Remove
// =============================================================

/// Insert an object.
///
/// A command built with [`AddCommand::new`] puts the object above everything
/// else on its first apply; [`AddCommand::with_order`] keeps the object's own
/// key when it is free. Either way the key the document actually assigned is
/// remembered so redo lands in the same slot.
#[derive(Debug, Clone)]
pub struct AddCommand {
    object: CanvasObject,
    on_top: bool,
}

impl AddCommand {
    #[must_use]
    pub fn new(object: CanvasObject) -> Self {
        Self { object, on_top: true }
    }

    /// Insert at the object's existing order key.
    #[must_use]
    pub fn with_order(object: CanvasObject) -> Self {
        Self { object, on_top: false }
    }

    #[must_use]
    pub fn id(&self) -> ObjectId {
        self.object.id
    }
}

impl Command for AddCommand {
    fn apply(&mut self, doc: &mut Document) {
        if self.on_top {
            self.object.order = doc.key_at_top();
            self.on_top = false;
        }
        self.object.order = doc.insert(self.object.clone());
        tracing::debug!(
            id = %self.object.id,
            kind = self.object.shape.kind(),
            order = %self.object.order,
            "object added"
        );
    }

    fn undo(&mut self, doc: &mut Document) {
        doc.remove(self.object.id);
    }

    fn label(&self) -> &'static str {
        "add"
    }
}

/// Remove an object, keeping a snapshot for undo.
#[derive(Debug, Clone)]
pub struct RemoveCommand {
    id: ObjectId,
    removed: Option<CanvasObject>,
}

impl RemoveCommand {
    #[must_use]
    pub fn new(id: ObjectId) -> Self {
        Self { id, removed: None }
    }
}

impl Command for RemoveCommand {
    fn apply(&mut self, doc: &mut Document) {
        self.removed = doc.remove(self.id);
    }

    fn undo(&mut self, doc: &mut Document) {
        if let Some(obj) = &self.removed {
            doc.insert(obj.clone());
        }
    }

    fn label(&self) -> &'static str {
        "remove"
    }
}

// =============================================================
// Transforms
// =============================================================

/// Translate a set of objects by the same delta.
#[derive(Debug, Clone)]
pub struct MoveCommand {
    ids: Vec<ObjectId>,
    delta: Point,
}

impl MoveCommand {
    #[must_use]
    pub fn new(ids: Vec<ObjectId>, delta: Point) -> Self {
        Self { ids, delta }
    }

    fn shift(&self, doc: &mut Document, dx: f64, dy: f64) {
        for id in &self.ids {
            if let Some(obj) = doc.get_mut(*id) {
                obj.translate(dx, dy);
            }
        }
    }
}

impl Command for MoveCommand {
    fn apply(&mut self, doc: &mut Document) {
        self.shift(doc, self.delta.x, self.delta.y);
    }

    fn undo(&mut self, doc: &mut Document) {
        self.shift(doc, -self.delta.x, -self.delta.y);
    }

    fn label(&self) -> &'static str {
        "move"
    }
}

/// Set an object's bounds. See [`CanvasObject::resize_to`] for how each
/// variant takes the new size.
#[derive(Debug, Clone)]
pub struct ResizeCommand {
    id: ObjectId,
    old: Bounds,
    new: Bounds,
}

impl ResizeCommand {
    #[must_use]
    pub fn new(id: ObjectId, old: Bounds, new: Bounds) -> Self {
        Self { id, old, new }
    }

    fn set(&self, doc: &mut Document, bounds: Bounds) {
        if let Some(obj) = doc.get_mut(self.id) {
            obj.resize_to(bounds);
        }
    }
}

impl Command for ResizeCommand {
    fn apply(&mut self, doc: &mut Document) {
        self.set(doc, self.new);
    }

    fn undo(&mut self, doc: &mut Document) {
        self.set(doc, self.old);
    }

    fn label(&self) -> &'static str {
        "resize"
    }
}

/// Set an object's rotation, optionally moving it at the same time.
#[derive(Debug, Clone)]
pub struct RotateCommand {
    id: ObjectId,
    old_rotation: f64,
    new_rotation: f64,
    old_position: Option<Point>,
    new_position: Option<Point>,
}

impl RotateCommand {
    #[must_use]
    pub fn new(id: ObjectId, old_rotation: f64, new_rotation: f64) -> Self {
        Self { id, old_rotation, new_rotation, old_position: None, new_position: None }
    }

    /// Also move the object origin from `old` to `new`.
    #[must_use]
    pub fn with_position(mut self, old: Point, new: Point) -> Self {
        self.old_position = Some(old);
        self.new_position = Some(new);
        self
    }

    fn set(&self, doc: &mut Document, rotation: f64, position: Option<Point>) {
        let Some(obj) = doc.get_mut(self.id) else {
            return;
        };
        obj.rotation = rotation;
        if let Some(p) = position {
            obj.x = p.x;
            obj.y = p.y;
        }
    }
}

impl Command for RotateCommand {
    fn apply(&mut self, doc: &mut Document) {
        self.set(doc, self.new_rotation, self.new_position);
    }

    fn undo(&mut self, doc: &mut Document) {
        self.set(doc, self.old_rotation, self.old_position);
    }

    fn label(&self) -> &'static str {
        "rotate"
    }
}

// =============================================================
// Grouping
// =============================================================

/// Replace a set of top-level objects with a prebuilt group.
///
/// The group takes the order key of the topmost child it replaces, so it
/// paints where that child did and undo restores every child's key.
#[derive(Debug, Clone)]
pub struct GroupCommand {
    group: CanvasObject,
    child_ids: Vec<ObjectId>,
    removed: Vec<CanvasObject>,
}

impl GroupCommand {
    #[must_use]
    pub fn new(group: CanvasObject, child_ids: Vec<ObjectId>) -> Self {
        Self { group, child_ids, removed: Vec::new() }
    }

    /// Group the named top-level objects (missing ids skipped), children in
    /// paint order.
    #[must_use]
    pub fn from_document(doc: &Document, ids: &[ObjectId], name: impl Into<String>) -> Self {
        let mut objects: Vec<CanvasObject> = ids.iter().filter_map(|id| doc.get(*id)).cloned().collect();
        objects.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        let child_ids = objects.iter().map(|o| o.id).collect();
        Self::new(CanvasObject::from_objects(&objects, name), child_ids)
    }

    #[must_use]
    pub fn group_id(&self) -> ObjectId {
        self.group.id
    }
}

impl Command for GroupCommand {
    fn apply(&mut self, doc: &mut Document) {
        self.removed = self.child_ids.iter().filter_map(|id| doc.remove(*id)).collect();
        if let Some(top) = self.removed.iter().map(|o| &o.order).max() {
            self.group.order = top.clone();
        }
        self.group.order = doc.insert(self.group.clone());
    }

    fn undo(&mut self, doc: &mut Document) {
        doc.remove(self.group.id);
        for obj in &self.removed {
            doc.insert(obj.clone());
        }
    }

    fn label(&self) -> &'static str {
        "group"
    }
}

/// Dissolve a top-level group, baking its transform into the children.
///
/// The first child (in paint order) takes the group's key and the rest are
/// slotted between it and the next object above, so the children paint
/// where the group did.
#[derive(Debug, Clone)]
pub struct UngroupCommand {
    group_id: ObjectId,
    group: Option<CanvasObject>,
    baked: Vec<CanvasObject>,
}

impl UngroupCommand {
    #[must_use]
    pub fn new(group_id: ObjectId) -> Self {
        Self { group_id, group: None, baked: Vec::new() }
    }

    /// Ids of the children released by the last `apply`.
    #[must_use]
    pub fn child_ids(&self) -> Vec<ObjectId> {
        self.baked.iter().map(|o| o.id).collect()
    }
}

impl Command for UngroupCommand {
    fn apply(&mut self, doc: &mut Document) {
        if !doc.get(self.group_id).is_some_and(CanvasObject::is_group) {
            return;
        }
        let Some(group) = doc.remove(self.group_id) else {
            return;
        };

        let mut baked = group.baked_children();
        baked.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));

        let successor = doc.iter().map(|o| &o.order).filter(|k| **k > group.order).min().cloned();
        let mut previous: Option<OrderKey> = None;
        for child in &mut baked {
            child.order = match &previous {
                None => group.order.clone(),
                Some(prev) => match OrderKey::between(Some(prev), successor.as_ref()) {
                    Ok(key) => key,
                    Err(e) => {
                        tracing::warn!(error = %e, "ungroup fell back to top key");
                        doc.key_at_top()
                    }
                },
            };
            child.order = doc.insert(child.clone());
            previous = Some(child.order.clone());
        }

        self.baked = baked;
        self.group = Some(group);
    }

    fn undo(&mut self, doc: &mut Document) {
        let Some(group) = &self.group else {
            return;
        };
        for child in &self.baked {
            doc.remove(child.id);
        }
        doc.insert(group.clone());
    }

    fn label(&self) -> &'static str {
        "ungroup"
    }
}

// =============================================================
// Path editing
// =============================================================

/// Replace one segment of a top-level path.
#[derive(Debug, Clone)]
pub struct MovePathPointCommand {
    id: ObjectId,
    index: usize,
    old: PathSegment,
    new: PathSegment,
}

impl MovePathPointCommand {
    #[must_use]
    pub fn new(id: ObjectId, index: usize, old: PathSegment, new: PathSegment) -> Self {
        Self { id, index, old, new }
    }

    fn set(&self, doc: &mut Document, segment: PathSegment) {
        let slot = doc
            .get_mut(self.id)
            .and_then(CanvasObject::as_path_mut)
            .and_then(|p| p.segments.get_mut(self.index));
        if let Some(slot) = slot {
            *slot = segment;
        }
    }
}

impl Command for MovePathPointCommand {
    fn apply(&mut self, doc: &mut Document) {
        self.set(doc, self.new);
    }

    fn undo(&mut self, doc: &mut Document) {
        self.set(doc, self.old);
    }

    fn label(&self) -> &'static str {
        "move-path-point"
    }
}

// =============================================================
// Paint order
// =============================================================

/// Give a top-level object a new paint-order key.
#[derive(Debug, Clone)]
pub struct ReorderCommand {
    id: ObjectId,
    key: OrderKey,
    previous: Option<OrderKey>,
}

impl ReorderCommand {
    #[must_use]
    pub fn new(id: ObjectId, key: OrderKey) -> Self {
        Self { id, key, previous: None }
    }

    /// Move `id` above every other object.
    #[must_use]
    pub fn to_front(doc: &Document, id: ObjectId) -> Self {
        Self::new(id, doc.key_at_top())
    }

    /// Move `id` below every other object.
    ///
    /// # Errors
    ///
    /// Propagates [`OrderKeyError`] when no key fits below the bottom.
    pub fn to_back(doc: &Document, id: ObjectId) -> Result<Self, OrderKeyError> {
        Ok(Self::new(id, doc.key_at_bottom()?))
    }
}

impl Command for ReorderCommand {
    fn apply(&mut self, doc: &mut Document) {
        let Some(current) = doc.get(self.id).map(|o| o.order.clone()) else {
            return;
        };
        self.previous = doc.set_order(self.id, self.key.clone()).then_some(current);
    }

    fn undo(&mut self, doc: &mut Document) {
        if let Some(previous) = self.previous.take() {
            doc.set_order(self.id, previous);
        }
    }

    fn label(&self) -> &'static str {
        "reorder"
    }
}

// =============================================================
// Composite
// =============================================================

/// Several commands applied in order and undone in reverse.
#[derive(Debug, Default)]
pub struct CompositeCommand {
    commands: Vec<Box<dyn Command>>,
}

impl CompositeCommand {
    #[must_use]
    pub fn new(commands: Vec<Box<dyn Command>>) -> Self {
        Self { commands }
    }

    #[must_use]
    pub fn with(mut self, command: impl Command + 'static) -> Self {
        self.commands.push(Box::new(command));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for CompositeCommand {
    fn apply(&mut self, doc: &mut Document) {
        for command in &mut self.commands {
            command.apply(doc);
        }
    }

    fn undo(&mut self, doc: &mut Document) {
        for command in self.commands.iter_mut().rev() {
            command.undo(doc);
        }
    }

    fn label(&self) -> &'static str {
        "composite"
    }
}
