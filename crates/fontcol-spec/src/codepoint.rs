//! The printable-ASCII codepoint window addressed by generated tables.

use std::ops::RangeInclusive;

/// First addressable codepoint (`'!'`).
pub const FIRST_CODEPOINT: u32 = 0x21;

/// Last addressable codepoint (`'~'`).
pub const LAST_CODEPOINT: u32 = 0x7E;

/// Number of codepoints in the window.
pub const WINDOW_LEN: usize = (LAST_CODEPOINT - FIRST_CODEPOINT + 1) as usize;

/// Returns the codepoint window in increasing order.
pub fn window() -> RangeInclusive<u32> {
    FIRST_CODEPOINT..=LAST_CODEPOINT
}

/// Returns true if `codepoint` is addressable by a generated table.
pub fn in_window(codepoint: u32) -> bool {
    window().contains(&codepoint)
}

/// Zero-based table slot for a codepoint, or `None` outside the window.
pub fn slot(codepoint: u32) -> Option<usize> {
    in_window(codepoint).then(|| (codepoint - FIRST_CODEPOINT) as usize)
}

/// Formats a codepoint as a C character literal.
///
/// Only `'` and `\` are escaped; the window contains no other character
/// that needs it.
pub fn char_literal(codepoint: u32) -> String {
    let c = char::from_u32(codepoint).unwrap_or('?');
    match c {
        '\'' | '\\' => format!("'\\{}'", c),
        _ => format!("'{}'", c),
    }
}

/// Codepoints that descriptor readers drop because they render nothing.
pub fn is_blank_control(codepoint: u32) -> bool {
    matches!(codepoint, 0x00 | 0x09 | 0x0A | 0x0B | 0x0C | 0x0D | 0x20)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_bounds() {
        assert_eq!(WINDOW_LEN, 94);
        assert_eq!(window().count(), WINDOW_LEN);
        assert!(!in_window(0x20));
        assert!(in_window(0x21));
        assert!(in_window(0x7E));
        assert!(!in_window(0x7F));
    }

    #[test]
    fn test_slot() {
        assert_eq!(slot(0x21), Some(0));
        assert_eq!(slot(0x7E), Some(WINDOW_LEN - 1));
        assert_eq!(slot(0x20), None);
    }

    #[test]
    fn test_char_literal_escapes_quote_and_backslash_only() {
        assert_eq!(char_literal('A' as u32), "'A'");
        assert_eq!(char_literal('\'' as u32), "'\\''");
        assert_eq!(char_literal('\\' as u32), "'\\\\'");
        assert_eq!(char_literal('"' as u32), "'\"'");
    }

    #[test]
    fn test_blank_controls() {
        assert!(is_blank_control(0x20));
        assert!(is_blank_control(0x0A));
        assert!(!is_blank_control(0x21));
    }
}
