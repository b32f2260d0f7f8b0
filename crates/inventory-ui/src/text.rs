//! Display-width helpers for labels with accented or wide characters.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns `s` occupies in the terminal.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Shorten `s` to at most `max_width` columns, ending with `…` when cut.
pub fn truncate(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Pad `s` with spaces on the right to exactly `width` columns, truncating
/// first if needed.
pub fn pad_right(s: &str, width: usize) -> String {
    let cut = truncate(s, width);
    let fill = width.saturating_sub(display_width(&cut));
    format!("{cut}{}", " ".repeat(fill))
}
