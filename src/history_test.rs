use super::*;
use crate::command::{AddCommand, MoveCommand, RemoveCommand};
use crate::geometry::Point;
use crate::shape::CanvasObject;

fn add(doc: &mut Document, history: &mut History) -> uuid::Uuid {
    let obj = CanvasObject::rect(0.0, 0.0, 1.0, 1.0);
    let id = obj.id;
    history.execute(Box::new(AddCommand::new(obj)), doc);
    id
}

#[test]
fn new_history_is_empty() {
    let h = History::new(10);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert!(h.labels().is_empty());
}

#[test]
fn undo_on_empty_returns_none() {
    let mut doc = Document::default();
    let mut h = History::new(10);
    assert_eq!(h.undo(&mut doc), None);
    assert_eq!(h.redo(&mut doc), None);
}

#[test]
fn execute_undo_redo_cycle() {
    let mut doc = Document::default();
    let mut h = History::new(10);
    let id = add(&mut doc, &mut h);
    assert!(doc.contains(id));
    assert!(h.can_undo());

    assert_eq!(h.undo(&mut doc), Some("add"));
    assert!(!doc.contains(id));
    assert!(h.can_redo());

    assert_eq!(h.redo(&mut doc), Some("add"));
    assert!(doc.contains(id));
    assert!(!h.can_redo());
}

#[test]
fn execute_clears_redo() {
    let mut doc = Document::default();
    let mut h = History::new(10);
    let id = add(&mut doc, &mut h);
    h.undo(&mut doc);
    assert_eq!(h.redo_len(), 1);

    add(&mut doc, &mut h);
    assert_eq!(h.redo_len(), 0);
    assert!(!doc.contains(id));
}

#[test]
fn capacity_drops_oldest() {
    let mut doc = Document::default();
    let mut h = History::new(2);
    let first = add(&mut doc, &mut h);
    add(&mut doc, &mut h);
    let dropped = h.execute(Box::new(RemoveCommand::new(first)), &mut doc);
    assert_eq!(dropped, 1);
    assert_eq!(h.undo_len(), 2);
    assert_eq!(h.labels(), vec!["add", "remove"]);

    h.undo(&mut doc);
    h.undo(&mut doc);
    assert_eq!(h.undo(&mut doc), None);
    // The first add fell off the stack, so its object stays.
    assert!(doc.contains(first));
    assert_eq!(doc.len(), 1);
}

#[test]
fn labels_are_oldest_first() {
    let mut doc = Document::default();
    let mut h = History::new(10);
    let id = add(&mut doc, &mut h);
    h.execute(Box::new(MoveCommand::new(vec![id], Point::new(1.0, 1.0))), &mut doc);
    assert_eq!(h.labels(), vec!["add", "move"]);
}

#[test]
fn clear_empties_both_stacks() {
    let mut doc = Document::default();
    let mut h = History::new(10);
    add(&mut doc, &mut h);
    add(&mut doc, &mut h);
    h.undo(&mut doc);
    h.clear();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}
