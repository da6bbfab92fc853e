use super::*;
use kurbo::{PathEl, Shape};

#[test]
fn outline_is_four_edges_and_four_arcs() {
    let path = rounded_rect_path(Rect::new(10.0, 20.0, 90.0, 100.0), 10.0);
    let els = path.elements();
    assert!(matches!(els.first(), Some(PathEl::MoveTo(_))));
    assert!(matches!(els.last(), Some(PathEl::ClosePath)));
    let lines = els.iter().filter(|e| matches!(e, PathEl::LineTo(_))).count();
    let arcs = els.iter().filter(|e| matches!(e, PathEl::CurveTo(..))).count();
    assert_eq!(lines, 4);
    assert_eq!(arcs, 4);
}

#[test]
fn path_stays_inside_the_rect() {
    let rect = Rect::new(10.0, 20.0, 90.0, 100.0);
    let bbox = rounded_rect_path(rect, 10.0).bounding_box();
    assert!((bbox.x0 - rect.x0).abs() < 1e-9);
    assert!((bbox.y0 - rect.y0).abs() < 1e-9);
    assert!((bbox.x1 - rect.x1).abs() < 1e-9);
    assert!((bbox.y1 - rect.y1).abs() < 1e-9);
}

#[test]
fn corners_are_cut_and_center_is_filled() {
    let path = rounded_rect_path(Rect::new(0.0, 0.0, 80.0, 80.0), 10.0);
    assert_eq!(path.winding(Point::new(40.0, 40.0)).abs(), 1);
    assert_eq!(path.winding(Point::new(40.0, 1.0)).abs(), 1);
    assert_eq!(path.winding(Point::new(0.5, 0.5)), 0);
    assert_eq!(path.winding(Point::new(79.5, 79.5)), 0);
}

#[test]
fn area_is_rect_minus_corner_cutouts() {
    let r = 10.0;
    let path = rounded_rect_path(Rect::new(0.0, 0.0, 80.0, 80.0), r);
    let expected = 80.0 * 80.0 - (4.0 - std::f64::consts::PI) * r * r;
    assert!((path.area().abs() - expected).abs() < 1.0);
}

#[test]
fn cpu_conversion_preserves_elements() {
    let path = rounded_rect_path(Rect::new(0.0, 0.0, 40.0, 30.0), 5.0);
    let cpu = bezpath_to_cpu(&path);
    assert_eq!(cpu.elements().len(), path.elements().len());
}
