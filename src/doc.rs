//! The document: top-level objects keyed by id, painted in order-key order.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::order::{OrderKey, OrderKeyError};
use crate::shape::{CanvasObject, ObjectId};

/// In-memory store of the top-level objects of one drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    objects: HashMap<ObjectId, CanvasObject>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), name: name.into(), objects: HashMap::new() }
    }

    /// Insert or replace an object and return the order key it ended up with.
    ///
    /// The incoming key is kept unless another object already uses it, in
    /// which case the object is placed above the current top.
    pub fn insert(&mut self, mut obj: CanvasObject) -> OrderKey {
        if self.key_in_use(&obj.order, obj.id) {
            let key = self.key_at_top();
            tracing::debug!(id = %obj.id, taken = %obj.order, assigned = %key, "order key reassigned");
            obj.order = key;
        }
        let key = obj.order.clone();
        self.objects.insert(obj.id, obj);
        key
    }

    /// Remove an object by id, returning it if it was present.
    pub fn remove(&mut self, id: ObjectId) -> Option<CanvasObject> {
        self.objects.remove(&id)
    }

    /// Top-level object by id.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject> {
        self.objects.get_mut(&id)
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Top-level objects in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CanvasObject> {
        self.objects.values()
    }

    /// Top-level objects sorted by `(order, id)`: first is painted first.
    #[must_use]
    pub fn ordered(&self) -> Vec<&CanvasObject> {
        let mut objs: Vec<&CanvasObject> = self.objects.values().collect();
        objs.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.id.cmp(&b.id)));
        objs
    }

    /// Replace all objects. Keys are deduplicated as by [`Document::insert`].
    pub fn load(&mut self, objects: Vec<CanvasObject>) {
        self.objects.clear();
        for obj in objects {
            self.insert(obj);
        }
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    // --- Nested lookup ---

    /// Find an object anywhere in the tree, including inside groups.
    #[must_use]
    pub fn find(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.get(id).or_else(|| {
            self.objects
                .values()
                .find_map(|obj| obj.as_group().and_then(|g| g.find(id)))
        })
    }

    pub fn find_mut(&mut self, id: ObjectId) -> Option<&mut CanvasObject> {
        if self.objects.contains_key(&id) {
            return self.objects.get_mut(&id);
        }
        self.objects
            .values_mut()
            .find_map(|obj| obj.as_group_mut().and_then(|g| g.find_mut(id)))
    }

    /// The chain from a top-level object down to `id`, inclusive at both
    /// ends. Empty when `id` is not in the tree.
    #[must_use]
    pub fn ancestry(&self, id: ObjectId) -> Vec<&CanvasObject> {
        let mut chain = Vec::new();
        for obj in self.objects.values() {
            if collect_chain(obj, id, &mut chain) {
                break;
            }
        }
        chain
    }

    // --- Order keys ---

    /// A key above every current object.
    #[must_use]
    pub fn key_at_top(&self) -> OrderKey {
        self.objects
            .values()
            .map(|o| &o.order)
            .max()
            .map_or_else(OrderKey::first, OrderKey::after)
    }

    /// A key below every current object.
    ///
    /// # Errors
    ///
    /// Returns [`OrderKeyError::Exhausted`] if the bottom key has no room below.
    pub fn key_at_bottom(&self) -> Result<OrderKey, OrderKeyError> {
        match self.objects.values().map(|o| &o.order).min() {
            Some(bottom) => bottom.before(),
            None => Ok(OrderKey::first()),
        }
    }

    /// A key strictly between `key` and the next key above it in the
    /// document (or simply above `key` when it is the top).
    ///
    /// # Errors
    ///
    /// Propagates [`OrderKeyError`] from key generation.
    pub fn key_above(&self, key: &OrderKey) -> Result<OrderKey, OrderKeyError> {
        let successor = self.objects.values().map(|o| &o.order).filter(|k| *k > key).min();
        OrderKey::between(Some(key), successor)
    }

    /// A key strictly between `key` and the next key below it.
    ///
    /// # Errors
    ///
    /// Propagates [`OrderKeyError`] from key generation.
    pub fn key_below(&self, key: &OrderKey) -> Result<OrderKey, OrderKeyError> {
        let predecessor = self.objects.values().map(|o| &o.order).filter(|k| *k < key).max();
        OrderKey::between(predecessor, Some(key))
    }

    /// Give a top-level object a new key. Returns false (and changes nothing)
    /// if the object is missing or another object already uses `key`.
    pub fn set_order(&mut self, id: ObjectId, key: OrderKey) -> bool {
        if self.key_in_use(&key, id) {
            tracing::warn!(%id, %key, "order key already in use");
            return false;
        }
        match self.objects.get_mut(&id) {
            Some(obj) => {
                obj.order = key;
                true
            }
            None => false,
        }
    }

    fn key_in_use(&self, key: &OrderKey, except: ObjectId) -> bool {
        self.objects.values().any(|o| o.id != except && &o.order == key)
    }
}

fn collect_chain<'a>(obj: &'a CanvasObject, id: ObjectId, chain: &mut Vec<&'a CanvasObject>) -> bool {
    chain.push(obj);
    if obj.id == id {
        return true;
    }
    if let Some(group) = obj.as_group() {
        for child in &group.children {
            if collect_chain(child, id, chain) {
                return true;
            }
        }
    }
    chain.pop();
    false
}
