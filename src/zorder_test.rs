use uuid::Uuid;

use super::*;
use crate::geom::Point;

fn make(kind: ElementKind, z: Option<i64>) -> Element {
    let mut el = Element::new(Uuid::new_v4(), kind, Point::ORIGIN);
    el.z_index = z;
    el
}

#[test]
fn notebook_kinds_sit_below_others() {
    assert!(baseline(ElementKind::Notebook) < baseline(ElementKind::Image));
    assert_eq!(baseline(ElementKind::Journal), Z_BACKGROUND);
    assert_eq!(baseline(ElementKind::Timer), Z_NEUTRAL);
}

#[test]
fn base_z_prefers_explicit_value() {
    assert_eq!(base_z(&make(ElementKind::Notebook, Some(7))), 7);
    assert_eq!(base_z(&make(ElementKind::Notebook, None)), Z_BACKGROUND);
}

#[test]
fn selected_element_goes_to_front() {
    let mut z = ZOrder::new();
    let a = make(ElementKind::Image, Some(3));
    assert!(z.select(Some(&a)).is_none());
    assert_eq!(z.effective_z(&a), Z_FRONT);
    assert_eq!(z.promoted(), Some(a.id));
}

#[test]
fn selecting_another_restores_previous() {
    let mut z = ZOrder::new();
    let a = make(ElementKind::Image, Some(3));
    let b = make(ElementKind::Image, None);
    z.select(Some(&a));
    let demoted = z.select(Some(&b)).unwrap();
    assert_eq!(demoted, Demotion { id: a.id, restore: Some(3) });
    assert_eq!(z.effective_z(&a), 3);
    assert_eq!(z.effective_z(&b), Z_FRONT);
}

#[test]
fn never_two_promoted() {
    let mut z = ZOrder::new();
    let els: Vec<Element> = (0..5).map(|i| make(ElementKind::Shape, Some(i))).collect();
    for el in &els {
        z.select(Some(el));
        let at_front = els.iter().filter(|e| z.effective_z(e) == Z_FRONT).count();
        assert_eq!(at_front, 1);
    }
}

#[test]
fn reselecting_does_not_recapture() {
    let mut z = ZOrder::new();
    let mut a = make(ElementKind::Image, Some(3));
    z.select(Some(&a));
    a.z_index = Some(Z_FRONT);
    assert!(z.select(Some(&a)).is_none());
    assert_eq!(z.committed_z(&a), Some(3));
    let demoted = z.select(None).unwrap();
    assert_eq!(demoted.restore, Some(3));
}

#[test]
fn committed_z_for_unpromoted_is_stored() {
    let z = ZOrder::new();
    let a = make(ElementKind::Image, Some(9));
    assert_eq!(z.committed_z(&a), Some(9));
}

#[test]
fn deselect_clears_front() {
    let mut z = ZOrder::new();
    let a = make(ElementKind::Image, None);
    z.select(Some(&a));
    z.select(None);
    assert!(z.promoted().is_none());
    assert_eq!(z.effective_z(&a), Z_NEUTRAL);
}

#[test]
fn click_promotion_only_for_notebook_like() {
    let mut z = ZOrder::new();
    let note = make(ElementKind::Notebook, None);
    let img = make(ElementKind::Image, None);
    assert!(z.click(&note, 0.0, 2000.0));
    assert!(!z.click(&img, 0.0, 2000.0));
    assert_eq!(z.effective_z(&note), Z_CLICK_PROMOTED);
    assert_eq!(z.effective_z(&img), Z_NEUTRAL);
}

#[test]
fn click_promotion_expires() {
    let mut z = ZOrder::new();
    let note = make(ElementKind::Journal, None);
    z.click(&note, 1000.0, 2000.0);
    assert_eq!(z.next_expiry(), Some(3000.0));
    assert!(z.expire(2999.0).is_empty());
    assert_eq!(z.expire(3000.0), vec![note.id]);
    assert_eq!(z.next_expiry(), None);
    assert_eq!(z.effective_z(&note), Z_BACKGROUND);
}

#[test]
fn click_again_extends_window() {
    let mut z = ZOrder::new();
    let note = make(ElementKind::Planner, None);
    z.click(&note, 0.0, 2000.0);
    z.click(&note, 1500.0, 2000.0);
    assert!(z.expire(2500.0).is_empty());
    assert!(z.is_click_promoted(&note.id));
}

#[test]
fn selection_beats_click_promotion() {
    let mut z = ZOrder::new();
    let note = make(ElementKind::Notebook, None);
    z.click(&note, 0.0, 2000.0);
    z.select(Some(&note));
    assert_eq!(z.effective_z(&note), Z_FRONT);
}

#[test]
fn forget_drops_all_state() {
    let mut z = ZOrder::new();
    let note = make(ElementKind::Notebook, None);
    z.click(&note, 0.0, 2000.0);
    z.select(Some(&note));
    z.forget(&note.id);
    assert!(z.promoted().is_none());
    assert!(!z.is_click_promoted(&note.id));
}

#[test]
fn render_order_sorts_by_z_then_insertion() {
    let mut reg = Registry::new();
    let notebook = make(ElementKind::Notebook, None);
    let first = make(ElementKind::Image, None);
    let second = make(ElementKind::Image, None);
    let low = make(ElementKind::Image, Some(-5));
    let mut hidden = make(ElementKind::Image, Some(100));
    hidden.hidden = true;
    let unknown = make(ElementKind::Unknown, Some(50));
    for el in [&first, &notebook, &second, &low, &hidden, &unknown] {
        reg.insert(el.clone());
    }
    let z = ZOrder::new();
    assert_eq!(z.render_order(&reg), vec![notebook.id, low.id, first.id, second.id]);
}

#[test]
fn render_order_puts_selected_last() {
    let mut reg = Registry::new();
    let a = make(ElementKind::Image, None);
    let b = make(ElementKind::Image, None);
    reg.insert(a.clone());
    reg.insert(b.clone());
    let mut z = ZOrder::new();
    z.select(Some(&a));
    assert_eq!(z.render_order(&reg), vec![b.id, a.id]);
}
