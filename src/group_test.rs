#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::order::OrderKey;
use crate::style::Color;
use crate::surface::{DrawOp, RecordingSurface};

fn pair() -> (CanvasObject, CanvasObject) {
    (CanvasObject::rect(10.0, 20.0, 30.0, 40.0), CanvasObject::rect(100.0, 50.0, 10.0, 10.0))
}

// --- from_objects ---

#[test]
fn from_objects_anchors_at_union_origin() {
    let (a, b) = pair();
    let group = CanvasObject::from_objects(&[a.clone(), b.clone()], "Group");
    assert_eq!((group.x, group.y), (10.0, 20.0));
    assert_eq!(group.name, "Group");

    let children = &group.as_group().unwrap().children;
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].id, a.id);
    assert_eq!((children[0].x, children[0].y), (0.0, 0.0));
    assert_eq!((children[1].x, children[1].y), (90.0, 30.0));
}

#[test]
fn from_objects_keeps_child_orders() {
    let (a, b) = pair();
    let a = a.with_order(OrderKey::parse("a3").unwrap());
    let group = CanvasObject::from_objects(&[a, b], "Group");
    assert_eq!(group.as_group().unwrap().children[0].order.as_str(), "a3");
}

#[test]
fn from_objects_empty_sits_at_origin() {
    let group = CanvasObject::from_objects(&[], "Empty");
    assert_eq!((group.x, group.y), (0.0, 0.0));
    assert!(group.as_group().unwrap().children.is_empty());
    assert_eq!(group.local_bounds(), Bounds::default());
}

#[test]
fn group_bounds_cover_children() {
    let (a, b) = pair();
    let group = CanvasObject::from_objects(&[a, b], "Group");
    assert_eq!(group.bounds(), Bounds::new(10.0, 20.0, 100.0, 40.0));
}

// --- baked_children ---

#[test]
fn baked_children_restore_parent_space() {
    let (a, b) = pair();
    let group = CanvasObject::from_objects(&[a.clone(), b.clone()], "Group");
    let baked = group.baked_children();
    assert_eq!(baked, vec![a, b]);
}

#[test]
fn baked_children_fold_rotation_and_opacity() {
    let child = CanvasObject::rect(5.0, 5.0, 10.0, 10.0).with_rotation(0.25).with_opacity(0.5);
    let group = CanvasObject::group(100.0, 200.0, vec![child])
        .with_rotation(0.5)
        .with_opacity(0.5);
    let baked = group.baked_children();
    assert_eq!((baked[0].x, baked[0].y), (105.0, 205.0));
    assert_eq!(baked[0].rotation, 0.75);
    assert_eq!(baked[0].opacity, 0.25);
}

#[test]
fn baked_children_of_non_group_is_empty() {
    assert!(CanvasObject::rect(0.0, 0.0, 1.0, 1.0).baked_children().is_empty());
}

// --- containment ---

#[test]
fn group_contains_point_over_child() {
    let (a, b) = pair();
    let group = CanvasObject::from_objects(&[a, b], "Group");
    assert!(group.contains_point(Point::new(15.0, 25.0)));
    assert!(group.contains_point(Point::new(105.0, 55.0)));
}

#[test]
fn group_misses_gap_between_children() {
    let (a, b) = pair();
    let group = CanvasObject::from_objects(&[a, b], "Group");
    // Inside the union box, outside both children.
    assert!(group.bounds().contains(Point::new(70.0, 30.0)));
    assert!(!group.contains_point(Point::new(70.0, 30.0)));
}

#[test]
fn hidden_child_is_not_hit() {
    let child = CanvasObject::rect(0.0, 0.0, 10.0, 10.0).with_visible(false);
    let group = CanvasObject::group(50.0, 50.0, vec![child]);
    assert!(!group.contains_point(Point::new(55.0, 55.0)));
}

// --- find ---

#[test]
fn find_searches_nested_groups() {
    let leaf = CanvasObject::ellipse(0.0, 0.0, 2.0, 2.0);
    let leaf_id = leaf.id;
    let inner = CanvasObject::group(0.0, 0.0, vec![leaf]);
    let mut outer = CanvasObject::group(0.0, 0.0, vec![CanvasObject::rect(0.0, 0.0, 1.0, 1.0), inner]);

    let g = outer.as_group().unwrap();
    assert_eq!(g.find(leaf_id).map(|o| o.id), Some(leaf_id));
    assert!(g.find(Uuid::new_v4()).is_none());

    outer.as_group_mut().unwrap().find_mut(leaf_id).unwrap().name = String::from("Leaf");
    assert_eq!(outer.as_group().unwrap().find(leaf_id).unwrap().name, "Leaf");
}

// --- rendering ---

#[test]
fn render_draws_visible_children_in_order() {
    let first = CanvasObject::rect(0.0, 0.0, 1.0, 1.0).with_fill(Color::BLACK);
    let hidden = CanvasObject::rect(0.0, 0.0, 1.0, 1.0).with_fill(Color::WHITE).with_visible(false);
    let last = CanvasObject::rect(5.0, 5.0, 1.0, 1.0).with_fill(Color::rgb(1, 2, 3));
    let group = GroupShape::new(vec![first, hidden, last]);

    let mut s = RecordingSurface::new(10.0, 10.0);
    group.render(&mut s).unwrap();
    let fills: Vec<Color> = s
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Fill { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    assert_eq!(fills, vec![Color::BLACK, Color::rgb(1, 2, 3)]);
    assert!(s.ops().contains(&DrawOp::Translate(5.0, 5.0)));
    assert_eq!(s.save_depth(), 0);
}
