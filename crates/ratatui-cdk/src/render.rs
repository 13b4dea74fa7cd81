use ratatui::buffer::Buffer;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Style;
use unicode_width::UnicodeWidthChar;

use crate::viewport::ViewportState;

/// Draws a one-column vertical scrollbar for `state` into `area`.
pub fn render_scrollbar(area: Rect, buf: &mut Buffer, state: &ViewportState, style: Style) {
    buf.set_style(area, style);
    if area.height == 0 {
        return;
    }
    if state.content_h <= state.viewport_h as u32 || state.content_h == 0 {
        for dy in 0..area.height {
            buf.set_stringn(area.x, area.y + dy, " ", 1, style);
        }
        return;
    }

    let track_h = area.height as f64;
    let thumb_h = ((state.viewport_h as f64 / state.content_h as f64) * track_h)
        .round()
        .clamp(1.0, track_h) as u16;

    let max_y = state
        .content_h
        .saturating_sub(state.viewport_h as u32)
        .max(1) as f64;
    let thumb_top = ((state.y as f64 / max_y) * (track_h - thumb_h as f64))
        .round()
        .clamp(0.0, (track_h - thumb_h as f64).max(0.0)) as u16;

    for dy in 0..area.height {
        let ch = if dy >= thumb_top && dy < thumb_top + thumb_h {
            "█"
        } else {
            " "
        };
        buf.set_stringn(area.x, area.y + dy, ch, 1, style);
    }
}

/// Draws `input` starting at `(x, y)`, skipping its first `start_col` display columns and writing
/// at most `max_cols`. Wide characters cut by either edge are dropped.
pub fn render_str_clipped(
    x: u16,
    y: u16,
    start_col: u32,
    max_cols: u16,
    buf: &mut Buffer,
    input: &str,
    style: Style,
) {
    if max_cols == 0 {
        return;
    }

    let start_col = start_col as usize;
    let max_cols = max_cols as usize;
    let mut col = 0usize;
    let mut out_cols = 0usize;
    let mut dx = 0u16;

    let mut tmp = [0u8; 4];

    for ch in input.chars() {
        if ch == '\t' {
            for _ in 0..4 {
                if col + 1 <= start_col {
                    col += 1;
                    continue;
                }
                if out_cols + 1 > max_cols {
                    return;
                }
                if let Some(cell) = buf.cell_mut((x + dx, y)) {
                    cell.set_style(style);
                    cell.set_symbol(" ");
                }
                dx += 1;
                out_cols += 1;
                col += 1;
            }
            continue;
        }

        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if w == 0 {
            continue;
        }
        if col + w <= start_col {
            col += w;
            continue;
        }
        if col < start_col && col + w > start_col {
            col += w;
            continue;
        }
        if out_cols + w > max_cols {
            return;
        }

        let s = ch.encode_utf8(&mut tmp);
        if let Some(cell) = buf.cell_mut((x + dx, y)) {
            cell.set_style(style);
            cell.set_symbol(s);
        }
        dx += 1;
        out_cols += 1;
        col += w;

        if w == 2 {
            if out_cols >= max_cols {
                return;
            }
            if let Some(cell) = buf.cell_mut((x + dx, y)) {
                cell.set_style(style);
                cell.set_symbol("");
            }
            dx += 1;
            out_cols += 1;
        }
    }
}

/// Display width of `input` in terminal columns. Tabs count as four columns.
pub fn display_width(input: &str) -> usize {
    input
        .chars()
        .map(|ch| {
            if ch == '\t' {
                4
            } else {
                UnicodeWidthChar::width(ch).unwrap_or(0)
            }
        })
        .sum()
}

/// Renders `input` on the first line of `area`, aligned horizontally within it.
///
/// Text wider than the area is truncated on the right regardless of alignment.
pub fn render_str_aligned(
    area: Rect,
    buf: &mut Buffer,
    input: &str,
    style: Style,
    alignment: Alignment,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let free = (area.width as usize).saturating_sub(display_width(input)) as u16;
    let offset = match alignment {
        Alignment::Left => 0,
        Alignment::Center => free / 2,
        Alignment::Right => free,
    };
    render_str_clipped(
        area.x + offset,
        area.y,
        0,
        area.width - offset,
        buf,
        input,
        style,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()).unwrap_or_default())
            .collect()
    }

    #[test]
    fn display_width_counts_wide_chars_and_tabs() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width("\ta"), 5);
    }

    #[test]
    fn render_str_aligned_right_pads_on_the_left() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 1));
        render_str_aligned(
            Rect::new(0, 0, 6, 1),
            &mut buf,
            "42",
            Style::default(),
            Alignment::Right,
        );
        assert_eq!(row_text(&buf, 0), "    42");
    }

    #[test]
    fn render_str_aligned_truncates_overflow() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 3, 1));
        render_str_aligned(
            Rect::new(0, 0, 3, 1),
            &mut buf,
            "abcdef",
            Style::default(),
            Alignment::Right,
        );
        assert_eq!(row_text(&buf, 0), "abc");
    }

    #[test]
    fn render_scrollbar_thumb_starts_at_top() {
        let mut state = ViewportState::default();
        state.set_viewport(5);
        state.set_content(50);
        let mut buf = Buffer::empty(Rect::new(0, 0, 1, 5));
        render_scrollbar(Rect::new(0, 0, 1, 5), &mut buf, &state, Style::default());
        assert_eq!(buf.cell((0, 0)).map(|c| c.symbol()), Some("█"));
        assert_eq!(buf.cell((0, 4)).map(|c| c.symbol()), Some(" "));
    }
}
