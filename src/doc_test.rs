use super::*;

fn key(s: &str) -> OrderKey {
    OrderKey::parse(s).unwrap()
}

fn rect_at(order: &str) -> CanvasObject {
    CanvasObject::rect(0.0, 0.0, 10.0, 10.0).with_order(key(order))
}

// =============================================================================
// Basic storage
// =============================================================================

#[test]
fn new_document_is_empty() {
    let doc = Document::new("Drawing");
    assert_eq!(doc.name, "Drawing");
    assert!(doc.is_empty());
    assert_eq!(doc.len(), 0);
    assert!(doc.ordered().is_empty());
}

#[test]
fn default_document_is_untitled() {
    assert_eq!(Document::default().name, "Untitled");
}

#[test]
fn insert_get_remove() {
    let mut doc = Document::default();
    let obj = rect_at("a0");
    let id = obj.id;
    doc.insert(obj);
    assert!(doc.contains(id));
    assert_eq!(doc.get(id).map(|o| o.id), Some(id));

    let removed = doc.remove(id).unwrap();
    assert_eq!(removed.id, id);
    assert!(!doc.contains(id));
    assert!(doc.remove(id).is_none());
}

#[test]
fn get_mut_edits_in_place() {
    let mut doc = Document::default();
    let obj = rect_at("a0");
    let id = obj.id;
    doc.insert(obj);
    doc.get_mut(id).unwrap().name = String::from("Renamed");
    assert_eq!(doc.get(id).unwrap().name, "Renamed");
}

// =============================================================================
// Ordering
// =============================================================================

#[test]
fn ordered_sorts_by_key() {
    let mut doc = Document::default();
    let top = rect_at("a2");
    let bottom = rect_at("a0");
    let middle = rect_at("a1");
    let ids = [bottom.id, middle.id, top.id];
    doc.insert(top);
    doc.insert(bottom);
    doc.insert(middle);

    let ordered: Vec<ObjectId> = doc.ordered().iter().map(|o| o.id).collect();
    assert_eq!(ordered, ids);
}

#[test]
fn insert_keeps_free_key() {
    let mut doc = Document::default();
    assert_eq!(doc.insert(rect_at("a5")), key("a5"));
    assert_eq!(doc.insert(rect_at("a1")), key("a1"));
}

#[test]
fn insert_reassigns_taken_key_above_top() {
    let mut doc = Document::default();
    doc.insert(rect_at("a0"));
    doc.insert(rect_at("a3"));
    let clash = rect_at("a0");
    let id = clash.id;
    let assigned = doc.insert(clash);
    assert!(assigned > key("a3"));
    assert_eq!(doc.get(id).unwrap().order, assigned);
    assert_eq!(doc.ordered().last().map(|o| o.id), Some(id));
}

#[test]
fn reinserting_same_object_keeps_its_key() {
    let mut doc = Document::default();
    let obj = rect_at("a0");
    doc.insert(obj.clone());
    assert_eq!(doc.insert(obj), key("a0"));
    assert_eq!(doc.len(), 1);
}

#[test]
fn load_replaces_and_dedupes() {
    let mut doc = Document::default();
    doc.insert(rect_at("a9"));
    doc.load(vec![rect_at("a0"), rect_at("a0"), rect_at("a0")]);
    assert_eq!(doc.len(), 3);
    let mut keys: Vec<OrderKey> = doc.iter().map(|o| o.order.clone()).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), 3);
}

#[test]
fn clear_empties() {
    let mut doc = Document::default();
    doc.insert(rect_at("a0"));
    doc.clear();
    assert!(doc.is_empty());
}

// =============================================================================
// Key helpers
// =============================================================================

#[test]
fn key_at_top_of_empty_is_first() {
    assert_eq!(Document::default().key_at_top(), OrderKey::first());
    assert_eq!(Document::default().key_at_bottom().unwrap(), OrderKey::first());
}

#[test]
fn key_at_top_and_bottom_bracket_everything() {
    let mut doc = Document::default();
    doc.insert(rect_at("a1"));
    doc.insert(rect_at("a4"));
    assert!(doc.key_at_top() > key("a4"));
    assert!(doc.key_at_bottom().unwrap() < key("a1"));
}

#[test]
fn key_above_stays_below_successor() {
    let mut doc = Document::default();
    doc.insert(rect_at("a1"));
    doc.insert(rect_at("a2"));
    let k = doc.key_above(&key("a1")).unwrap();
    assert!(k > key("a1") && k < key("a2"));

    let top = doc.key_above(&key("a2")).unwrap();
    assert!(top > key("a2"));
}

#[test]
fn key_below_stays_above_predecessor() {
    let mut doc = Document::default();
    doc.insert(rect_at("a1"));
    doc.insert(rect_at("a2"));
    let k = doc.key_below(&key("a2")).unwrap();
    assert!(k > key("a1") && k < key("a2"));
}

#[test]
fn set_order_refuses_taken_key() {
    let mut doc = Document::default();
    let a = rect_at("a0");
    let b = rect_at("a1");
    let (a_id, b_id) = (a.id, b.id);
    doc.insert(a);
    doc.insert(b);

    assert!(!doc.set_order(b_id, key("a0")));
    assert_eq!(doc.get(b_id).unwrap().order, key("a1"));

    assert!(doc.set_order(a_id, key("a2")));
    assert_eq!(doc.ordered().last().map(|o| o.id), Some(a_id));
    assert!(!doc.set_order(Uuid::new_v4(), key("a5")));
}

// =============================================================================
// Nested lookup
// =============================================================================

#[test]
fn find_reaches_into_groups() {
    let leaf = CanvasObject::rect(0.0, 0.0, 1.0, 1.0);
    let leaf_id = leaf.id;
    let inner = CanvasObject::group(0.0, 0.0, vec![leaf]);
    let inner_id = inner.id;
    let outer = CanvasObject::group(0.0, 0.0, vec![inner]);
    let outer_id = outer.id;

    let mut doc = Document::default();
    doc.insert(outer);

    assert!(doc.get(leaf_id).is_none());
    assert_eq!(doc.find(leaf_id).map(|o| o.id), Some(leaf_id));
    assert_eq!(doc.find(outer_id).map(|o| o.id), Some(outer_id));

    doc.find_mut(leaf_id).unwrap().locked = true;
    assert!(doc.find(leaf_id).unwrap().locked);

    let chain: Vec<ObjectId> = doc.ancestry(leaf_id).iter().map(|o| o.id).collect();
    assert_eq!(chain, vec![outer_id, inner_id, leaf_id]);
}

#[test]
fn ancestry_of_missing_is_empty() {
    let mut doc = Document::default();
    doc.insert(CanvasObject::group(0.0, 0.0, vec![CanvasObject::rect(0.0, 0.0, 1.0, 1.0)]));
    assert!(doc.ancestry(Uuid::new_v4()).is_empty());
}

#[test]
fn ancestry_of_top_level_is_itself() {
    let mut doc = Document::default();
    let obj = rect_at("a0");
    let id = obj.id;
    doc.insert(obj);
    let chain: Vec<ObjectId> = doc.ancestry(id).iter().map(|o| o.id).collect();
    assert_eq!(chain, vec![id]);
}

#[test]
fn document_serializes_objects_by_id() {
    let mut doc = Document::new("Board");
    let obj = rect_at("a0");
    let id = obj.id;
    doc.insert(obj);
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["name"], "Board");
    assert_eq!(json["objects"][id.to_string()]["shape"]["type"], "rect");
}
