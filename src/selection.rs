//! The set of selected object ids, kept in selection order.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::shape::ObjectId;

/// Insertion-ordered set of ids. Selections are small, so a `Vec` with
/// linear lookup is enough.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: Vec<ObjectId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id`. Returns false if it was already selected.
    pub fn insert(&mut self, id: ObjectId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Remove `id`. Returns false if it was not selected.
    pub fn remove(&mut self, id: ObjectId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&x| x != id);
        self.ids.len() != before
    }

    /// Flip membership of `id`. Returns whether it is now selected.
    pub fn toggle(&mut self, id: ObjectId) -> bool {
        if self.remove(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Replace the whole set. Duplicates keep their first position.
    pub fn set(&mut self, ids: impl IntoIterator<Item = ObjectId>) {
        self.ids.clear();
        for id in ids {
            self.insert(id);
        }
    }

    /// Empty the set. Returns false if it was already empty.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.ids.is_empty();
        self.ids.clear();
        had_any
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.contains(&id)
    }

    #[must_use]
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ids.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
