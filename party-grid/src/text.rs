//! Cell text measured and padded in terminal columns.

use unicode_width::UnicodeWidthChar;

use crate::column::Alignment;

/// Columns a cell character takes. Control characters are drawn as a
/// single blank.
fn cell_width(c: char) -> usize {
    if c.is_control() {
        1
    } else {
        c.width().unwrap_or(0)
    }
}

/// Columns `s` takes once drawn in a cell.
pub fn display_width(s: &str) -> usize {
    s.chars().map(cell_width).sum()
}

/// Fit text into exactly `width` columns.
///
/// Control characters become blanks, overflowing text is cut and ends in
/// `…`, and the remainder is padded according to `align`.
pub fn fit(s: &str, width: usize, align: Alignment) -> String {
    let overflows = display_width(s) > width;
    // one column is kept for the ellipsis when cutting
    let budget = if overflows { width.saturating_sub(1) } else { width };

    let mut text = String::with_capacity(s.len());
    let mut used = 0;
    for c in s.chars() {
        let w = cell_width(c);
        if used + w > budget {
            break;
        }
        text.push(if c.is_control() { ' ' } else { c });
        used += w;
    }
    if overflows && width > 0 {
        text.push('…');
        used += 1;
    }

    let gap = width - used;
    let (left, right) = match align {
        Alignment::Left => (0, gap),
        Alignment::Right => (gap, 0),
        Alignment::Center => (gap / 2, gap - gap / 2),
    };

    let mut out = String::with_capacity(text.len() + gap);
    out.extend(std::iter::repeat_n(' ', left));
    out.push_str(&text);
    out.extend(std::iter::repeat_n(' ', right));
    out
}
