//! Turning rendered ratatui cells into a `CaptureRegion`.

use dreammate::{CaptureRegion, GridCell, Rgb, SummaryCard};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier},
    widgets::Widget,
};

use crate::backend::Theme;
use crate::view::SummaryCardWidget;

/// Render the card offscreen and capture its cells.
pub fn card_region(card: &SummaryCard, theme: &Theme, width: u16) -> CaptureRegion {
    let widget = SummaryCardWidget::new(card, theme);
    let width = width.max(24);
    let area = Rect::new(0, 0, width, widget.height(width));
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buffer_to_region(&buf, to_rgb(theme.text).unwrap_or(Rgb::BLACK))
}

/// Copy every cell of `buf`. Cells without a concrete foreground use `default_fg`.
pub fn buffer_to_region(buf: &Buffer, default_fg: Rgb) -> CaptureRegion {
    let area = buf.area;
    let mut region = CaptureRegion::new(area.width, area.height);
    for y in 0..area.height {
        for x in 0..area.width {
            let Some(cell) = buf.cell((area.x + x, area.y + y)) else {
                continue;
            };
            region.set(
                x,
                y,
                GridCell {
                    symbol: cell.symbol().to_string(),
                    fg: to_rgb(cell.fg).unwrap_or(default_fg),
                    bg: to_rgb(cell.bg),
                    bold: cell.modifier.contains(Modifier::BOLD),
                },
            );
        }
    }
    region
}

/// xterm values for the named and indexed colors; `Reset` has none.
pub(crate) fn to_rgb(color: Color) -> Option<Rgb> {
    let rgb = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => Rgb(r, g, b),
        Color::Black => Rgb(0, 0, 0),
        Color::Red => Rgb(205, 0, 0),
        Color::Green => Rgb(0, 205, 0),
        Color::Yellow => Rgb(205, 205, 0),
        Color::Blue => Rgb(0, 0, 238),
        Color::Magenta => Rgb(205, 0, 205),
        Color::Cyan => Rgb(0, 205, 205),
        Color::Gray => Rgb(229, 229, 229),
        Color::DarkGray => Rgb(127, 127, 127),
        Color::LightRed => Rgb(255, 0, 0),
        Color::LightGreen => Rgb(0, 255, 0),
        Color::LightYellow => Rgb(255, 255, 0),
        Color::LightBlue => Rgb(92, 92, 255),
        Color::LightMagenta => Rgb(255, 0, 255),
        Color::LightCyan => Rgb(0, 255, 255),
        Color::White => Rgb(255, 255, 255),
        Color::Indexed(index) => indexed(index),
    };
    Some(rgb)
}

fn indexed(index: u8) -> Rgb {
    const BASIC: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];
    match index {
        0..=15 => to_rgb(BASIC[index as usize]).unwrap_or(Rgb::BLACK),
        16..=231 => {
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            let i = index - 16;
            Rgb(level(i / 36), level((i / 6) % 6), level(i % 6))
        }
        _ => {
            let v = 8 + (index - 232) * 10;
            Rgb(v, v, v)
        }
    }
}
