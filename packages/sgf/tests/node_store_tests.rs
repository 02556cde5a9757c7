//! Integration tests for the node arena and node properties

use anyhow::Result;
use kifu_board::{Color, Point, PointList};
use kifu_sgf::{
    normalize_text, Emphasis, Label, LabelList, MoveColor, NodeStore, PropertyType, PropertyValue, SgfError,
};

fn attach(store: &mut NodeStore, parent: kifu_sgf::NodeId) -> kifu_sgf::NodeId {
    let child = store.create(Some(parent));
    store.link(child);
    child
}

#[test]
fn test_unlink_and_relink_restores_order() {
    let mut store = NodeStore::new();
    let root = store.create(None);
    let a = attach(&mut store, root);
    let b = attach(&mut store, root);
    let c = attach(&mut store, root);

    store.unlink(b);
    assert_eq!(store.children(root).collect::<Vec<_>>(), vec![a, c]);

    store.link(b);
    assert_eq!(store.children(root).collect::<Vec<_>>(), vec![a, b, c]);

    // Nested detach and reattach in reverse order
    store.unlink(a);
    store.unlink(c);
    store.link(c);
    store.link(a);
    assert_eq!(store.children(root).collect::<Vec<_>>(), vec![a, b, c]);
}

#[test]
fn test_freed_slots_are_recycled() {
    let mut store = NodeStore::new();
    let root = store.create(None);
    let child = attach(&mut store, root);
    let grandchild = attach(&mut store, child);
    assert_eq!(store.len(), 3);

    store.unlink(child);
    store.free_subtree(child);
    assert_eq!(store.len(), 1);
    assert!(!store.contains(grandchild));
    assert!(store[root].first_child().is_none());

    let reused = store.create(Some(root));
    assert!(reused == child || reused == grandchild);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_depth_and_path() {
    let mut store = NodeStore::new();
    let root = store.create(None);
    let first = attach(&mut store, root);
    let second = attach(&mut store, first);
    let side = attach(&mut store, root);

    assert_eq!(store.depth_delta(root, second), Some(2));
    assert_eq!(store.depth_delta(side, second), None);
    assert_eq!(store.path_to_root(second), vec![second, first, root]);
    assert_eq!(store.previous_sibling(side), Some(first));
    assert_eq!(store.previous_sibling(first), None);
}

#[test]
fn test_properties_stay_sorted() -> Result<()> {
    let mut store = NodeStore::new();
    let root = store.create(None);
    let node = &mut store[root];

    node.set_property(PropertyType::Comment, Some(PropertyValue::Text("note".into())))?;
    node.set_property(
        PropertyType::AddBlack,
        Some(PropertyValue::PointList(PointList::new(vec![Point::new(3, 3)]))),
    )?;
    node.set_property(PropertyType::PlayerBlack, Some(PropertyValue::SimpleText("Shusaku".into())))?;

    let order: Vec<_> = node.properties().iter().map(|property| property.ty()).collect();
    assert_eq!(
        order,
        vec![PropertyType::AddBlack, PropertyType::Comment, PropertyType::PlayerBlack]
    );
    assert!(node.is_game_info_node());
    assert_eq!(node.text(PropertyType::Comment), Some("note"));
    assert_eq!(node.setup_changes().black.len(), 1);

    // Setting the same value again changes nothing
    assert!(!node.set_property(PropertyType::Comment, Some(PropertyValue::Text("note".into())))?);
    assert!(node.set_property(PropertyType::Comment, None)?);
    assert!(!node.has_property(PropertyType::Comment));
    Ok(())
}

#[test]
fn test_value_type_is_checked() {
    let mut store = NodeStore::new();
    let root = store.create(None);

    let result = store[root].set_property(PropertyType::Komi, Some(PropertyValue::Number(6)));
    assert!(matches!(
        result,
        Err(SgfError::ValueMismatch {
            property: PropertyType::Komi,
            ..
        })
    ));
    assert!(store[root].properties().is_empty());

    assert!(store[root]
        .set_property(PropertyType::Figure, Some(PropertyValue::None))
        .is_ok());
}

#[test]
fn test_annotation_getters() -> Result<()> {
    let mut store = NodeStore::new();
    let root = store.create(None);
    let node = &mut store[root];

    node.set_property(PropertyType::GoodForBlack, Some(PropertyValue::Double(Emphasis::Emphasized)))?;
    node.set_property(PropertyType::Komi, Some(PropertyValue::Real(6.5)))?;
    node.set_property(PropertyType::Doubtful, Some(PropertyValue::None))?;

    assert_eq!(node.double(PropertyType::GoodForBlack), Some(Emphasis::Emphasized));
    assert_eq!(node.real(PropertyType::Komi), Some(6.5));
    assert_eq!(node.number(PropertyType::Komi), None);
    assert!(node.has_property(PropertyType::Doubtful));
    Ok(())
}

#[test]
fn test_move_colors() {
    assert_eq!(MoveColor::from(Color::White).color(), Some(Color::White));
    assert!(MoveColor::Black.is_move());
    assert!(!MoveColor::Setup.is_move());
    assert_eq!(MoveColor::default(), MoveColor::None);
}

#[test]
fn test_label_list_keeps_one_label_per_point() {
    let labels = LabelList::new(vec![
        Label {
            point: Point::new(2, 0),
            text: "B".into(),
        },
        Label {
            point: Point::new(1, 0),
            text: "A".into(),
        },
        Label {
            point: Point::new(2, 0),
            text: "C".into(),
        },
    ]);

    assert_eq!(labels.len(), 2);
    assert_eq!(labels.get(Point::new(1, 0)), Some("A"));
    assert!(labels.get(Point::new(2, 0)).is_some());
    assert_eq!(labels.get(Point::new(3, 0)), None);
}

#[test]
fn test_normalized_text_for_both_kinds() {
    assert_eq!(normalize_text("\t", true), None);
    assert_eq!(normalize_text("a\x0bb", true), Some("a b".to_string()));
    assert_eq!(normalize_text("line\r\n", false), Some("line".to_string()));
}

#[test]
fn test_property_values_serialize() -> Result<()> {
    let value = PropertyValue::PointList(PointList::new(vec![Point::new(0, 1)]));
    let json = serde_json::to_string(&value)?;
    let restored: PropertyValue = serde_json::from_str(&json)?;
    assert_eq!(restored, value);
    Ok(())
}

#[test]
fn test_unknown_properties_are_kept_apart() -> Result<()> {
    let mut store = NodeStore::new();
    let root = store.create(None);
    let node = &mut store[root];
    let raw = |values: &[&str]| PropertyValue::Unknown(values.iter().map(|value| value.to_string()).collect());

    assert!(node.set_property(PropertyType::Unknown, Some(raw(&["YY", "2"])))?);
    assert!(node.set_property(PropertyType::Unknown, Some(raw(&["XX", "1"])))?);
    node.set_property(PropertyType::Comment, Some(PropertyValue::Text("note".into())))?;
    assert_eq!(node.properties().len(), 3);
    assert_eq!(node.properties()[0].ty(), PropertyType::Comment);
    assert_eq!(node.properties()[1].value(), &raw(&["XX", "1"]));

    // Same identifier replaces in place
    assert!(node.set_property(PropertyType::Unknown, Some(raw(&["YY", "3"])))?);
    assert_eq!(node.properties().len(), 3);
    assert_eq!(node.unknown_property("YY"), Some(&["YY".to_string(), "3".to_string()][..]));
    assert_eq!(node.unknown_property("XX").map(<[String]>::len), Some(2));
    assert_eq!(node.unknown_property("ZZ"), None);
    Ok(())
}
