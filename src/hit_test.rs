use std::f64::consts::FRAC_PI_2;

use super::*;
use crate::path::PathSegment;

struct Fixture {
    doc: Document,
    selection: Selection,
    editing_path: Option<ObjectId>,
}

impl Fixture {
    fn new(objects: Vec<CanvasObject>) -> Self {
        let mut doc = Document::default();
        for obj in objects {
            let key = doc.key_at_top();
            doc.insert(obj.with_order(key));
        }
        Self { doc, selection: Selection::new(), editing_path: None }
    }

    fn hit(&self, x: f64, y: f64) -> HitTarget {
        let ctx = HitContext {
            doc: &self.doc,
            selection: &self.selection,
            editing_path: self.editing_path,
            handle_size: 8.0,
            zone_size: 12.0,
        };
        hit_test(&ctx, Point::new(x, y))
    }
}

fn square() -> CanvasObject {
    CanvasObject::rect(0.0, 0.0, 100.0, 100.0)
}

// =============================================================================
// Objects and canvas
// =============================================================================

#[test]
fn empty_document_hits_canvas() {
    assert_eq!(Fixture::new(Vec::new()).hit(10.0, 10.0), HitTarget::Canvas);
}

#[test]
fn point_inside_object() {
    let obj = square();
    let id = obj.id;
    let f = Fixture::new(vec![obj]);
    assert_eq!(f.hit(50.0, 50.0), HitTarget::Object(id));
    assert_eq!(f.hit(150.0, 50.0), HitTarget::Canvas);
}

#[test]
fn topmost_object_wins() {
    let bottom = square();
    let top = CanvasObject::rect(50.0, 50.0, 100.0, 100.0);
    let (bottom_id, top_id) = (bottom.id, top.id);
    let f = Fixture::new(vec![bottom, top]);
    assert_eq!(f.hit(75.0, 75.0), HitTarget::Object(top_id));
    assert_eq!(f.hit(25.0, 25.0), HitTarget::Object(bottom_id));
}

#[test]
fn hidden_and_locked_objects_are_skipped() {
    let bottom = square();
    let bottom_id = bottom.id;
    let locked = square().with_locked(true);
    let hidden = square().with_visible(false);
    let f = Fixture::new(vec![bottom, locked, hidden]);
    assert_eq!(f.hit(50.0, 50.0), HitTarget::Object(bottom_id));
}

#[test]
fn group_children_resolve_to_the_group() {
    let group = CanvasObject::from_objects(&[square(), CanvasObject::rect(200.0, 0.0, 10.0, 10.0)], "Group");
    let gid = group.id;
    let f = Fixture::new(vec![group]);
    assert_eq!(f.hit(205.0, 5.0), HitTarget::Object(gid));
    assert_eq!(f.hit(150.0, 5.0), HitTarget::Canvas);
}

// =============================================================================
// Selection UI
// =============================================================================

#[test]
fn corner_handles_of_selected_object() {
    let obj = square();
    let id = obj.id;
    let mut f = Fixture::new(vec![obj]);
    assert_eq!(f.hit(1.0, 1.0), HitTarget::Object(id));

    f.selection.insert(id);
    assert_eq!(f.hit(1.0, 1.0), HitTarget::Handle { id, corner: Corner::TopLeft });
    assert_eq!(f.hit(100.0, 0.0), HitTarget::Handle { id, corner: Corner::TopRight });
    assert_eq!(f.hit(-2.0, 103.0), HitTarget::Handle { id, corner: Corner::BottomLeft });
    assert_eq!(f.hit(99.0, 99.0), HitTarget::Handle { id, corner: Corner::BottomRight });
    assert_eq!(f.hit(50.0, 50.0), HitTarget::Object(id));
}

#[test]
fn rotation_zone_outside_corner() {
    let obj = square();
    let id = obj.id;
    let mut f = Fixture::new(vec![obj]);
    f.selection.insert(id);
    // Zones start half a handle plus the gap away from each corner.
    assert_eq!(f.hit(-10.0, -10.0), HitTarget::Rotation(id));
    assert_eq!(f.hit(110.0, 110.0), HitTarget::Rotation(id));
    assert_eq!(f.hit(-10.0, 50.0), HitTarget::Canvas);
}

#[test]
fn unselected_object_has_no_ui() {
    let obj = square();
    let f = Fixture::new(vec![obj]);
    assert_eq!(f.hit(-10.0, -10.0), HitTarget::Canvas);
}

#[test]
fn rotation_beats_handles_across_selection() {
    // The second object's handle overlaps the first object's rotation zone.
    let a = square();
    let b = CanvasObject::rect(-110.0, -110.0, 100.0, 100.0);
    let (a_id, b_id) = (a.id, b.id);
    let mut f = Fixture::new(vec![a, b]);
    f.selection.set([b_id, a_id]);
    assert_eq!(f.hit(-10.0, -10.0), HitTarget::Rotation(a_id));
}

#[test]
fn handles_follow_rotation() {
    let obj = CanvasObject::rect(0.0, 0.0, 100.0, 20.0).with_rotation(FRAC_PI_2);
    let id = obj.id;
    let mut f = Fixture::new(vec![obj]);
    f.selection.insert(id);
    // Rotated a quarter turn about (50, 10): the local top-left lands at (60, -40).
    assert_eq!(f.hit(60.0, -40.0), HitTarget::Handle { id, corner: Corner::TopLeft });
    assert_eq!(f.hit(1.0, 1.0), HitTarget::Canvas);
}

#[test]
fn hidden_selected_object_has_no_ui() {
    let obj = square().with_visible(false);
    let id = obj.id;
    let mut f = Fixture::new(vec![obj]);
    f.selection.insert(id);
    assert_eq!(f.hit(1.0, 1.0), HitTarget::Canvas);
}

// =============================================================================
// Path editing
// =============================================================================

fn zigzag() -> CanvasObject {
    CanvasObject::path(
        10.0,
        10.0,
        vec![
            PathSegment::Move { x: 0.0, y: 0.0 },
            PathSegment::Line { x: 50.0, y: 40.0 },
            PathSegment::Line { x: 100.0, y: 0.0 },
        ],
    )
}

#[test]
fn path_points_hit_while_editing() {
    let obj = zigzag();
    let id = obj.id;
    let mut f = Fixture::new(vec![obj]);
    f.selection.insert(id);
    assert_eq!(f.hit(60.0, 50.0), HitTarget::Object(id));

    f.editing_path = Some(id);
    assert_eq!(f.hit(60.0, 50.0), HitTarget::PathPoint { id, segment: 1 });
    assert_eq!(f.hit(110.0, 10.0), HitTarget::PathPoint { id, segment: 2 });
}

#[test]
fn path_points_beat_corner_handles() {
    let obj = zigzag();
    let id = obj.id;
    let mut f = Fixture::new(vec![obj]);
    f.selection.insert(id);
    assert_eq!(f.hit(10.0, 10.0), HitTarget::Handle { id, corner: Corner::TopLeft });
    f.editing_path = Some(id);
    assert_eq!(f.hit(10.0, 10.0), HitTarget::PathPoint { id, segment: 0 });
}

#[test]
fn corner_index_matches_all() {
    for (i, corner) in Corner::ALL.into_iter().enumerate() {
        assert_eq!(corner.index(), i);
    }
}
