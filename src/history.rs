//! Bounded undo/redo stacks.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::command::Command;
use crate::doc::Document;

/// Applied commands (most recent last) and undone commands awaiting redo.
#[derive(Debug)]
pub struct History {
    undo: Vec<Box<dyn Command>>,
    redo: Vec<Box<dyn Command>>,
    capacity: usize,
}

impl History {
    /// A history that keeps at most `capacity` undoable commands.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { undo: Vec::new(), redo: Vec::new(), capacity }
    }

    /// Apply `command`, push it, and forget anything that could be redone.
    /// Returns the number of old commands dropped to stay within capacity.
    pub fn execute(&mut self, mut command: Box<dyn Command>, doc: &mut Document) -> usize {
        command.apply(doc);
        self.undo.push(command);
        self.redo.clear();
        let overflow = self.undo.len().saturating_sub(self.capacity);
        if overflow > 0 {
            self.undo.drain(..overflow);
        }
        overflow
    }

    /// Undo the most recent command. Returns its label, or `None` when there
    /// was nothing to undo.
    pub fn undo(&mut self, doc: &mut Document) -> Option<&'static str> {
        let mut command = self.undo.pop()?;
        command.undo(doc);
        let label = command.label();
        self.redo.push(command);
        Some(label)
    }

    /// Re-apply the most recently undone command.
    pub fn redo(&mut self, doc: &mut Document) -> Option<&'static str> {
        let mut command = self.redo.pop()?;
        command.apply(doc);
        let label = command.label();
        self.undo.push(command);
        Some(label)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    /// Labels of the undoable commands, oldest first.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.undo.iter().map(|c| c.label()).collect()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
