#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn id() -> String {
    Uuid::new_v4().to_string()
}

#[test]
fn canonical_record_passes_through() {
    let parent = id();
    let raw = json!({
        "id": id(),
        "type": "image",
        "position": { "x": 150.0, "y": 160.0 },
        "size": { "width": 100.0, "height": 80.0 },
        "rotation": 30.0,
        "zIndex": 4,
        "parentId": parent,
        "relativePosition": { "x": 50.0, "y": 60.0 },
        "hidden": true,
        "content": { "src": "a.png" },
    });
    let el = normalize(&raw).unwrap();
    assert_eq!(el.kind, ElementKind::Image);
    assert_eq!(el.position, Point::new(150.0, 160.0));
    assert_eq!(el.size, Size::new(100.0, 80.0));
    assert_eq!(el.rotation, 30.0);
    assert_eq!(el.z_index, Some(4));
    assert_eq!(el.parent_id.unwrap().to_string(), parent);
    assert_eq!(el.relative_position, Some(Point::new(50.0, 60.0)));
    assert!(el.hidden);
    assert_eq!(el.content, json!({ "src": "a.png" }));
}

#[test]
fn legacy_flat_record_is_migrated() {
    let raw = json!({ "id": id(), "type": "sticky_note", "x": 10.0, "y": 20.0, "width": 120.0, "height": 90.0 });
    let el = normalize(&raw).unwrap();
    assert_eq!(el.position, Point::new(10.0, 20.0));
    assert_eq!(el.size, Size::new(120.0, 90.0));
    assert!(el.parent_id.is_none());
    assert!(!el.hidden);
}

#[test]
fn normalization_does_not_touch_input() {
    let raw = json!({ "id": id(), "type": "text", "x": 1.0, "y": 2.0 });
    let before = raw.clone();
    let _el = normalize(&raw).unwrap();
    assert_eq!(raw, before);
}

#[test]
fn normalization_is_repeatable() {
    let raw = json!({ "id": id(), "type": "grid", "x": 5.0, "y": 6.0, "width": -3.0, "rotation": 725.0 });
    let once = normalize(&raw).unwrap();
    let twice = normalize(&serde_json::to_value(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once, normalize(&raw).unwrap());
}

#[test]
fn missing_geometry_gets_defaults() {
    let raw = json!({ "id": id(), "type": "folder" });
    let el = normalize(&raw).unwrap();
    assert_eq!(el.position, Point::ORIGIN);
    assert_eq!(el.size, ElementKind::Folder.spec().default_size);
}

#[test]
fn non_positive_size_uses_kind_default_per_dimension() {
    let raw = json!({ "id": id(), "type": "folder", "size": { "width": 0.0, "height": 120.0 } });
    let el = normalize(&raw).unwrap();
    assert_eq!(el.size, Size::new(300.0, 120.0));
}

#[test]
fn non_numeric_position_falls_back_to_origin() {
    let raw = json!({ "id": id(), "type": "image", "position": { "x": "left", "y": null } });
    let el = normalize(&raw).unwrap();
    assert_eq!(el.position, Point::ORIGIN);
}

#[test]
fn rotation_is_normalized() {
    let raw = json!({ "id": id(), "type": "image", "rotation": -45.0 });
    assert_eq!(normalize(&raw).unwrap().rotation, 315.0);
}

#[test]
fn float_z_index_is_rounded() {
    let raw = json!({ "id": id(), "type": "image", "zIndex": 2.6 });
    assert_eq!(normalize(&raw).unwrap().z_index, Some(3));
}

#[test]
fn unknown_type_is_kept_as_unknown() {
    let raw = json!({ "id": id(), "type": "hologram", "x": 1.0, "y": 1.0 });
    assert_eq!(normalize(&raw).unwrap().kind, ElementKind::Unknown);
}

#[test]
fn missing_type_is_unknown() {
    let raw = json!({ "id": id() });
    assert_eq!(normalize(&raw).unwrap().kind, ElementKind::Unknown);
}

#[test]
fn relative_position_without_parent_is_dropped() {
    let raw = json!({ "id": id(), "type": "image", "relativePosition": { "x": 5.0, "y": 5.0 }, "hidden": true });
    let el = normalize(&raw).unwrap();
    assert!(el.relative_position.is_none());
    assert!(el.hidden);
}

#[test]
fn parent_forces_hidden() {
    let raw = json!({ "id": id(), "type": "image", "parentId": id(), "hidden": false });
    assert!(normalize(&raw).unwrap().hidden);
}

#[test]
fn self_parent_is_ignored() {
    let own = id();
    let raw = json!({ "id": own, "type": "image", "parentId": own });
    let el = normalize(&raw).unwrap();
    assert!(el.parent_id.is_none());
    assert!(!el.hidden);
}

#[test]
fn non_object_content_is_replaced() {
    let raw = json!({ "id": id(), "type": "image", "content": "oops" });
    assert_eq!(normalize(&raw).unwrap().content, json!({}));
}

#[test]
fn rejects_non_object() {
    assert!(matches!(normalize(&json!([1, 2])), Err(MigrateError::NotAnObject)));
}

#[test]
fn rejects_missing_id() {
    assert!(matches!(normalize(&json!({ "type": "image" })), Err(MigrateError::MissingId)));
}

#[test]
fn rejects_invalid_id() {
    let err = normalize(&json!({ "id": "abc", "type": "image" })).unwrap_err();
    assert!(matches!(err, MigrateError::InvalidId(ref raw) if raw == "abc"));
}

#[test]
fn normalize_all_skips_bad_and_duplicate_records() {
    let dup = id();
    let raws = vec![
        json!({ "id": dup, "type": "image", "x": 1.0 }),
        json!({ "type": "image" }),
        json!({ "id": dup, "type": "text", "x": 2.0 }),
        json!({ "id": id(), "type": "text" }),
    ];
    let els = normalize_all(&raws);
    assert_eq!(els.len(), 2);
    assert_eq!(els[0].kind, ElementKind::Image);
    assert_eq!(els[1].kind, ElementKind::Text);
}
