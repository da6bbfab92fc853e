use crate::foundation::core::{Canvas, Point, Rect};
use crate::style::policy::CellLayout;

/// Placement of one digit cell and its two text anchors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSlot {
    /// Cell bounds.
    pub rect: Rect,
    /// Center point of the value text.
    pub value_anchor: Point,
    /// Center point of the label text.
    pub label_anchor: Point,
}

/// Lay out four equal cells in a row, centered as a group on the canvas.
pub fn cell_slots(canvas: Canvas, cells: &CellLayout) -> [CellSlot; 4] {
    let total_width = 4.0 * cells.width + 3.0 * cells.gap;
    let start_x = (f64::from(canvas.width) - total_width) / 2.0;
    let start_y = (f64::from(canvas.height) - cells.height) / 2.0;

    std::array::from_fn(|i| {
        let x = start_x + (i as f64) * (cells.width + cells.gap);
        let rect = Rect::new(x, start_y, x + cells.width, start_y + cells.height);
        let center = rect.center();
        CellSlot {
            rect,
            value_anchor: Point::new(center.x, center.y + cells.value_dy),
            label_anchor: Point::new(center.x, center.y + cells.label_dy),
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
