use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::ui::{
    canvas::PixelCanvas,
    theme::{ColorCapability, rgb_color},
};

const HALF_BLOCK: &str = "▀";

/// Paints a [`PixelCanvas`] with upper half blocks: the foreground carries
/// the upper pixel of a cell and the background the lower one.
pub struct BackdropView<'a> {
    pub canvas: &'a PixelCanvas,
    pub capability: ColorCapability,
}

impl Widget for BackdropView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (columns, rows) = self.canvas.cells();
        let width = area.width.min(columns);
        let height = area.height.min(rows);
        for row in 0..height {
            for col in 0..width {
                let x = usize::from(col);
                let y = usize::from(row) * 2;
                let (Some(upper), Some(lower)) =
                    (self.canvas.pixel(x, y), self.canvas.pixel(x, y + 1))
                else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(rgb_color(upper, self.capability))
                        .set_bg(rgb_color(lower, self.capability));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::style::Color;

    use super::*;
    use crate::ui::canvas::DrawContext;

    #[test]
    fn cells_carry_upper_and_lower_pixels() {
        let mut canvas = PixelCanvas::new(3, 2, 1.0);
        canvas.fill_vertical_gradient((0, 0, 0), (255, 255, 255));
        let area = Rect::new(0, 0, 3, 2);
        let mut buf = Buffer::empty(area);
        BackdropView {
            canvas: &canvas,
            capability: ColorCapability::TrueColor,
        }
        .render(area, &mut buf);

        let cell = &buf[(1_u16, 0_u16)];
        assert_eq!(cell.symbol(), HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(32, 32, 32));
        assert_eq!(cell.bg, Color::Rgb(96, 96, 96));
    }

    #[test]
    fn area_larger_than_canvas_leaves_extra_cells_untouched() {
        let canvas = PixelCanvas::new(2, 1, 1.0);
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        BackdropView {
            canvas: &canvas,
            capability: ColorCapability::TrueColor,
        }
        .render(area, &mut buf);
        assert_eq!(buf[(0_u16, 0_u16)].symbol(), HALF_BLOCK);
        assert_eq!(buf[(3_u16, 1_u16)].symbol(), " ");
    }
}
