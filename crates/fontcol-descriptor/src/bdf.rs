//! Format A reader: the subset of BDF used by small monospace fonts.
//!
//! Only the glyph blocks are read:
//!
//! ```text
//! STARTCHAR A
//! ENCODING 65
//! SWIDTH 500 0
//! DWIDTH 4 0
//! BBX 3 5 0 0
//! BITMAP
//! 40
//! A0
//! E0
//! A0
//! A0
//! ENDCHAR
//! ```
//!
//! Global properties before the first `STARTCHAR` are ignored, as are
//! unknown keywords inside a block. Glyphs with a negative encoding
//! (unencoded glyphs) are skipped.

use fontcol_spec::{
    BoundingBox, Encoded, FixedNibbleGlyph, GlyphCollection, GlyphFormat, ValidationWarning,
};

use crate::error::DescriptorError;
use crate::lines::LineCursor;

#[derive(Default)]
struct Block {
    start_line: usize,
    encoding: Option<i64>,
    swidth: Option<(i32, i32)>,
    dwidth: Option<(i32, i32)>,
    bbx: Option<BoundingBox>,
    bitmap: Option<Vec<u8>>,
}

/// Parses BDF text into fixed-nibble glyphs.
pub fn parse_bdf(text: &str) -> Result<Encoded<GlyphCollection>, DescriptorError> {
    let mut cursor = LineCursor::new(text);
    let mut collection = GlyphCollection::new(GlyphFormat::FixedNibble);
    let mut warnings: Vec<ValidationWarning> = Vec::new();

    while let Some((line, raw)) = cursor.next_line() {
        if !raw.starts_with("STARTCHAR") {
            continue;
        }
        let block = read_block(&mut cursor, line)?;
        let Some(encoding) = block.encoding else {
            return Err(missing(&block, "ENCODING"));
        };
        let swidth = block.swidth.ok_or_else(|| missing(&block, "SWIDTH"))?;
        let dwidth = block.dwidth.ok_or_else(|| missing(&block, "DWIDTH"))?;
        let bbx = block.bbx.ok_or_else(|| missing(&block, "BBX"))?;
        let Some(bitmap) = block.bitmap else {
            return Err(missing(&block, "BITMAP"));
        };

        let Ok(codepoint) = u32::try_from(encoding) else {
            continue;
        };
        let glyph = FixedNibbleGlyph::new(swidth, dwidth, bbx, bitmap).map_err(|source| {
            DescriptorError::Glyph {
                line: block.start_line,
                codepoint,
                source,
            }
        })?;
        if let Some(warning) = collection.insert(codepoint, glyph.into()) {
            warnings.push(warning.at(format!("line {}", block.start_line)));
        }
    }

    Ok(Encoded::with_warnings(collection, warnings))
}

fn missing(block: &Block, keyword: &'static str) -> DescriptorError {
    DescriptorError::MissingKeyword {
        line: block.start_line,
        keyword,
    }
}

fn read_block(cursor: &mut LineCursor<'_>, start_line: usize) -> Result<Block, DescriptorError> {
    let mut block = Block {
        start_line,
        ..Block::default()
    };
    let mut rows: Option<Vec<u8>> = None;

    loop {
        let Some((line, raw)) = cursor.next_line() else {
            return Err(DescriptorError::UnexpectedEof {
                line: cursor.line(),
                expected: "ENDCHAR".to_string(),
            });
        };
        let trimmed = raw.trim();

        if trimmed.starts_with("ENDCHAR") {
            block.bitmap = rows;
            return Ok(block);
        }

        if let Some(rows) = rows.as_mut() {
            if !trimmed.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(DescriptorError::invalid(line, "bitmap row", raw));
            }
            let byte = u8::from_str_radix(trimmed, 16)
                .map_err(|_| DescriptorError::invalid(line, "bitmap row", raw))?;
            rows.push(byte);
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        match fields.next() {
            Some("ENCODING") => {
                let value = fields
                    .next()
                    .and_then(|v| v.parse::<i64>().ok())
                    .ok_or_else(|| DescriptorError::invalid(line, "ENCODING", raw))?;
                block.encoding = Some(value);
            }
            Some("SWIDTH") => block.swidth = Some(pair(fields, line, "SWIDTH", raw)?),
            Some("DWIDTH") => block.dwidth = Some(pair(fields, line, "DWIDTH", raw)?),
            Some("BBX") => {
                let values = ints::<4>(fields, line, "BBX", raw)?;
                block.bbx = Some(BoundingBox::new(values[0], values[1], values[2], values[3]));
            }
            Some("BITMAP") => rows = Some(Vec::new()),
            _ => {}
        }
    }
}

fn pair<'a>(
    fields: impl Iterator<Item = &'a str>,
    line: usize,
    what: &'static str,
    raw: &str,
) -> Result<(i32, i32), DescriptorError> {
    let [a, b] = ints::<2>(fields, line, what, raw)?;
    Ok((a, b))
}

fn ints<'a, const N: usize>(
    mut fields: impl Iterator<Item = &'a str>,
    line: usize,
    what: &'static str,
    raw: &str,
) -> Result<[i32; N], DescriptorError> {
    let mut values = [0i32; N];
    for value in values.iter_mut() {
        *value = fields
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| DescriptorError::invalid(line, what, raw))?;
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcol_spec::{Glyph, GlyphError, WarningCode};
    use pretty_assertions::assert_eq;

    const TWO_GLYPHS: &str = "STARTFONT 2.1
FONT -Raccoon-Fixed4x6-Medium-R-Normal--6-60-75-75-P-40-ISO10646-1
CHARS 2
STARTCHAR exclam
ENCODING 33
SWIDTH 666 0
DWIDTH 4 0
BBX 1 5 1 0
BITMAP
80
80
80
00
80
ENDCHAR
STARTCHAR A
ENCODING 65
SWIDTH 666 0
DWIDTH 4 0
BBX 3 5 0 0
BITMAP
40
A0
E0
A0
A0
ENDCHAR
ENDFONT
";

    #[test]
    fn test_parses_blocks() {
        let parsed = parse_bdf(TWO_GLYPHS).unwrap();
        assert!(parsed.is_clean());
        let collection = parsed.value;
        assert_eq!(collection.len(), 2);

        let Some(Glyph::FixedNibble(a)) = collection.get(0x41) else {
            panic!("expected fixed nibble glyph for 'A'");
        };
        assert_eq!(a.swidth(), (666, 0));
        assert_eq!(a.dwidth(), (4, 0));
        assert_eq!(a.bbx(), BoundingBox::new(3, 5, 0, 0));
        assert_eq!(a.bitmap(), &[0x40, 0xA0, 0xE0, 0xA0, 0xA0]);
        assert_eq!(a.columns(), vec![0x3C, 0x0A, 0x3C, 0x00]);
    }

    #[test]
    fn test_negative_encoding_skipped() {
        let text = "STARTCHAR blank\nENCODING -1\nSWIDTH 0 0\nDWIDTH 4 0\nBBX 1 1 0 0\nBITMAP\n00\nENDCHAR\n";
        let parsed = parse_bdf(text).unwrap();
        assert!(parsed.value.is_empty());
    }

    #[test]
    fn test_missing_keyword_is_fatal() {
        let text = "STARTCHAR A\nENCODING 65\nSWIDTH 0 0\nBBX 1 1 0 0\nBITMAP\n00\nENDCHAR\n";
        assert_eq!(
            parse_bdf(text).unwrap_err(),
            DescriptorError::MissingKeyword {
                line: 1,
                keyword: "DWIDTH"
            }
        );
    }

    #[test]
    fn test_unterminated_block() {
        let text = "STARTCHAR A\nENCODING 65\nBITMAP\n40\n";
        assert_eq!(
            parse_bdf(text).unwrap_err(),
            DescriptorError::UnexpectedEof {
                line: 4,
                expected: "ENDCHAR".to_string()
            }
        );
    }

    #[test]
    fn test_bad_hex_row() {
        let text = "STARTCHAR A\nENCODING 65\nSWIDTH 0 0\nDWIDTH 4 0\nBBX 1 1 0 0\nBITMAP\nzz\nENDCHAR\n";
        let err = parse_bdf(text).unwrap_err();
        assert_eq!(err.line(), Some(7));
        assert!(matches!(err, DescriptorError::InvalidValue { what: "bitmap row", .. }));
    }

    #[test]
    fn test_signed_hex_row_rejected() {
        let text = "STARTCHAR A\nENCODING 65\nSWIDTH 0 0\nDWIDTH 4 0\nBBX 1 1 0 0\nBITMAP\n+8\nENDCHAR\n";
        let err = parse_bdf(text).unwrap_err();
        assert_eq!(err.line(), Some(7));
        assert!(matches!(err, DescriptorError::InvalidValue { what: "bitmap row", .. }));
    }

    #[test]
    fn test_too_many_rows() {
        let text = "STARTCHAR A\nENCODING 65\nSWIDTH 0 0\nDWIDTH 4 0\nBBX 4 7 0 0\nBITMAP\n00\n00\n00\n00\n00\n00\n00\nENDCHAR\n";
        assert_eq!(
            parse_bdf(text).unwrap_err(),
            DescriptorError::Glyph {
                line: 1,
                codepoint: 0x41,
                source: GlyphError::TooManyRows { rows: 7, max: 6 },
            }
        );
    }

    #[test]
    fn test_duplicate_keeps_last() {
        let text = format!(
            "{}STARTCHAR A2\nENCODING 65\nSWIDTH 0 0\nDWIDTH 4 0\nBBX 1 1 0 0\nBITMAP\n80\nENDCHAR\n",
            TWO_GLYPHS
        );
        let parsed = parse_bdf(&text).unwrap();
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].code, WarningCode::DuplicateCodepoint);
        assert_eq!(parsed.warnings[0].path.as_deref(), Some("line 29"));

        let Some(Glyph::FixedNibble(a)) = parsed.value.get(0x41) else {
            panic!("expected fixed nibble glyph for 'A'");
        };
        assert_eq!(a.bitmap(), &[0x80]);
    }
}
