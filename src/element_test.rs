#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

#[test]
fn containers_are_folder_and_frame() {
    assert!(ElementKind::Folder.is_container());
    assert!(ElementKind::Frame.is_container());
    assert!(!ElementKind::StickyNote.is_container());
    assert!(!ElementKind::Notebook.is_container());
}

#[test]
fn notebook_like_kinds() {
    for kind in [ElementKind::Notebook, ElementKind::Journal, ElementKind::Planner] {
        assert!(kind.is_notebook_like(), "{kind:?}");
    }
    assert!(!ElementKind::Document.is_notebook_like());
}

#[test]
fn editable_kinds_require_handle() {
    assert_eq!(ElementKind::Document.spec().drag_region, DragRegion::Handle);
    assert_eq!(ElementKind::StickyNote.spec().drag_region, DragRegion::Handle);
    assert_eq!(ElementKind::Image.spec().drag_region, DragRegion::Anywhere);
}

#[test]
fn unknown_kind_is_not_renderable() {
    assert!(!ElementKind::Unknown.spec().renderable);
    assert!(ElementKind::Timer.spec().renderable);
}

#[test]
fn every_default_size_is_usable() {
    let kinds = [
        ElementKind::StickyNote,
        ElementKind::Text,
        ElementKind::Document,
        ElementKind::Image,
        ElementKind::Video,
        ElementKind::Audio,
        ElementKind::Link,
        ElementKind::Embed,
        ElementKind::Timer,
        ElementKind::Stopwatch,
        ElementKind::Grid,
        ElementKind::Checklist,
        ElementKind::Calendar,
        ElementKind::Drawing,
        ElementKind::Shape,
        ElementKind::Table,
        ElementKind::Notebook,
        ElementKind::Journal,
        ElementKind::Planner,
        ElementKind::Folder,
        ElementKind::Frame,
        ElementKind::Unknown,
    ];
    for kind in kinds {
        assert!(kind.spec().default_size.is_usable(), "{kind:?}");
    }
}

#[test]
fn kind_tags_are_snake_case() {
    let kind: ElementKind = serde_json::from_value(json!("sticky_note")).unwrap();
    assert_eq!(kind, ElementKind::StickyNote);
    assert_eq!(serde_json::to_value(ElementKind::Folder).unwrap(), json!("folder"));
}

#[test]
fn unrecognized_tag_becomes_unknown() {
    let kind: ElementKind = serde_json::from_value(json!("hologram")).unwrap();
    assert_eq!(kind, ElementKind::Unknown);
}

#[test]
fn new_element_uses_default_size() {
    let el = Element::new(Uuid::new_v4(), ElementKind::Folder, Point::new(5.0, 6.0));
    assert_eq!(el.size, Size::new(300.0, 300.0));
    assert!(!el.hidden);
    assert!(el.parent_id.is_none());
}

#[test]
fn normalize_degrees_wraps() {
    assert_eq!(normalize_degrees(0.0), 0.0);
    assert_eq!(normalize_degrees(360.0), 0.0);
    assert_eq!(normalize_degrees(375.0), 15.0);
    assert_eq!(normalize_degrees(-90.0), 270.0);
    assert_eq!(normalize_degrees(f64::NAN), 0.0);
}

#[test]
fn placement_patch_serializes_complete_sub_object() {
    let el = Element::new(Uuid::new_v4(), ElementKind::Image, Point::new(1.0, 2.0));
    let value = serde_json::to_value(ElementPatch::placement(el.placement())).unwrap();
    assert_eq!(value["position"], json!({ "x": 1.0, "y": 2.0 }));
    assert_eq!(value["size"], json!({ "width": 320.0, "height": 240.0 }));
    assert_eq!(value["rotation"], json!(0.0));
    assert!(value.as_object().unwrap().contains_key("zIndex"));
    assert!(!value.as_object().unwrap().contains_key("parentId"));
}

#[test]
fn detached_patch_nulls_parent_and_relative() {
    let el = Element::new(Uuid::new_v4(), ElementKind::Image, Point::ORIGIN);
    let value = serde_json::to_value(ElementPatch::detached(el.placement())).unwrap();
    assert!(value["parentId"].is_null());
    assert!(value["relativePosition"].is_null());
    assert_eq!(value["hidden"], json!(false));
}

#[test]
fn content_element_ids_skips_malformed_entries() {
    let a = Uuid::new_v4();
    let value = json!({ "elementIds": [a.to_string(), "not-a-uuid", 7] });
    assert_eq!(Content::new(&value).element_ids(), vec![a]);
}

#[test]
fn content_element_ids_missing_is_empty() {
    assert!(Content::new(&json!({})).element_ids().is_empty());
    assert!(Content::new(&json!(null)).element_ids().is_empty());
}

#[test]
fn empty_patch_is_empty() {
    assert!(ElementPatch::default().is_empty());
    assert!(!ElementPatch::element_ids(&[]).is_empty());
}
