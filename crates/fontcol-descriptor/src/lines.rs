//! Line cursor with 1-based line numbers.

use fontcol_spec::{ValidationWarning, WarningCode};

pub(crate) struct LineCursor<'a> {
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    /// Next line with its 1-based number.
    pub(crate) fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let text = self.lines.next()?;
        self.line += 1;
        Some((self.line, text))
    }

    /// Number of the last line returned, 0 before the first.
    pub(crate) fn line(&self) -> usize {
        self.line
    }
}

/// W003 for a line the reader does not understand.
pub(crate) fn unexpected_line(line: usize, text: &str) -> ValidationWarning {
    ValidationWarning::with_path(
        WarningCode::UnexpectedLine,
        format!("unexpected line skipped: '{}'", text.trim()),
        format!("line {}", line),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_lines_from_one() {
        let mut cursor = LineCursor::new("a\r\nb\n\nc");
        assert_eq!(cursor.line(), 0);
        assert_eq!(cursor.next_line(), Some((1, "a")));
        assert_eq!(cursor.next_line(), Some((2, "b")));
        assert_eq!(cursor.next_line(), Some((3, "")));
        assert_eq!(cursor.next_line(), Some((4, "c")));
        assert_eq!(cursor.next_line(), None);
        assert_eq!(cursor.line(), 4);
    }
}
