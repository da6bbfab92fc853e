use crate::foundation::core::{BezPath, Point, Rect};

/// Cubic control-point distance approximating a quarter circle of radius 1.
const QUARTER_ARC_KAPPA: f64 = 0.552_284_749_830_793_4;

/// Closed rounded-rectangle outline: four straight edges joined by quarter-circle corners.
///
/// The radius is used as given; callers keep it within half the shorter side.
pub fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    let (x0, y0, x1, y1) = (rect.x0, rect.y0, rect.x1, rect.y1);
    let r = radius;
    let k = r * QUARTER_ARC_KAPPA;

    let mut p = BezPath::new();
    p.move_to(Point::new(x0 + r, y0));
    p.line_to(Point::new(x1 - r, y0));
    p.curve_to(
        Point::new(x1 - r + k, y0),
        Point::new(x1, y0 + r - k),
        Point::new(x1, y0 + r),
    );
    p.line_to(Point::new(x1, y1 - r));
    p.curve_to(
        Point::new(x1, y1 - r + k),
        Point::new(x1 - r + k, y1),
        Point::new(x1 - r, y1),
    );
    p.line_to(Point::new(x0 + r, y1));
    p.curve_to(
        Point::new(x0 + r - k, y1),
        Point::new(x0, y1 - r + k),
        Point::new(x0, y1 - r),
    );
    p.line_to(Point::new(x0, y0 + r));
    p.curve_to(
        Point::new(x0, y0 + r - k),
        Point::new(x0 + r - k, y0),
        Point::new(x0 + r, y0),
    );
    p.close_path();
    p
}

/// Re-express a path in the rasterizer's own `kurbo` types.
pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

pub(crate) fn rect_to_cpu(rect: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
