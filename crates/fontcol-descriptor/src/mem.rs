//! Format C reader: MEM files of binary row strings.
//!
//! The first line is a file comment and is skipped. Each glyph opens with a
//! `// 0x<hex>` marker followed by sixteen lines of up to eight binary
//! digits, top row first:
//!
//! ```text
//! // 0x41
//! 00000000
//! 00011000
//! ...
//! ```

use fontcol_spec::codepoint::is_blank_control;
use fontcol_spec::glyph::ROW_MAJOR_ROWS;
use fontcol_spec::{Encoded, GlyphCollection, GlyphFormat, RowMajorGlyph, ValidationWarning};

use crate::error::DescriptorError;
use crate::lines::{unexpected_line, LineCursor};

const MARKER: &str = "// 0x";

/// Parses MEM text into row-major glyphs.
///
/// Blocks for space and the whitespace control characters are read but
/// discarded.
pub fn parse_mem(text: &str) -> Result<Encoded<GlyphCollection>, DescriptorError> {
    let mut cursor = LineCursor::new(text);
    let mut collection = GlyphCollection::new(GlyphFormat::RowMajor);
    let mut warnings: Vec<ValidationWarning> = Vec::new();

    cursor.next_line();

    while let Some((line, raw)) = cursor.next_line() {
        if !raw.starts_with(MARKER) {
            if !raw.trim().is_empty() {
                warnings.push(unexpected_line(line, raw));
            }
            continue;
        }

        let codepoint = raw
            .split_whitespace()
            .nth(1)
            .and_then(|hex| hex.strip_prefix("0x").or(hex.strip_prefix("0X")))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .ok_or_else(|| DescriptorError::invalid(line, "codepoint marker", raw))?;

        let bitmap = read_rows(&mut cursor, line, codepoint)?;
        if is_blank_control(codepoint) {
            continue;
        }
        if let Some(warning) = collection.insert(codepoint, RowMajorGlyph::new(bitmap).into()) {
            warnings.push(warning.at(format!("line {}", line)));
        }
    }

    Ok(Encoded::with_warnings(collection, warnings))
}

fn read_rows(
    cursor: &mut LineCursor<'_>,
    marker_line: usize,
    codepoint: u32,
) -> Result<[u8; ROW_MAJOR_ROWS], DescriptorError> {
    let mut bitmap = [0u8; ROW_MAJOR_ROWS];
    for (rows, slot) in bitmap.iter_mut().enumerate() {
        let Some((line, raw)) = cursor.next_line() else {
            return Err(DescriptorError::ShortBlock {
                line: marker_line,
                codepoint,
                rows,
                expected: ROW_MAJOR_ROWS,
            });
        };
        let digits = raw.trim();
        if digits.starts_with("//") {
            return Err(DescriptorError::ShortBlock {
                line: marker_line,
                codepoint,
                rows,
                expected: ROW_MAJOR_ROWS,
            });
        }
        if !digits.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(DescriptorError::invalid(line, "bitmap row", raw));
        }
        *slot = u8::from_str_radix(digits, 2)
            .map_err(|_| DescriptorError::invalid(line, "bitmap row", raw))?;
    }
    Ok(bitmap)
}
