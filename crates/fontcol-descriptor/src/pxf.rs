//! Format B reader: PXF sparse pixel lists.
//!
//! A header of `key value` lines carries `num_glyphs N` and ends at the
//! line starting with `glyphs`. Then `N` blocks follow:
//!
//! ```text
//! 	65:
//! 		advance 5
//! 		auto_update_advance true
//! 		auto_advance_amount 0
//! 		A: 0 1, 0 2, 1 0, 2 0, 3 1, 3 2
//! ```
//!
//! Blank lines between blocks are skipped. Any other line that does not
//! open a block (tab-indented codepoint) raises a warning and is skipped.

use fontcol_spec::{Encoded, GlyphCollection, GlyphFormat, SparsePixelGlyph, ValidationWarning};

use crate::error::DescriptorError;
use crate::lines::{unexpected_line, LineCursor};

/// Parses PXF text into sparse-pixel glyphs.
pub fn parse_pxf(text: &str) -> Result<Encoded<GlyphCollection>, DescriptorError> {
    let mut cursor = LineCursor::new(text);
    let mut collection = GlyphCollection::new(GlyphFormat::SparsePixel);
    let mut warnings: Vec<ValidationWarning> = Vec::new();

    let (num_glyphs, found_glyphs) = read_header(&mut cursor)?;
    if num_glyphs == 0 {
        return Err(DescriptorError::NoGlyphs { found: num_glyphs });
    }
    if !found_glyphs {
        return Err(DescriptorError::UnexpectedEof {
            line: cursor.line(),
            expected: "'glyphs' section".to_string(),
        });
    }

    let mut read = 0;
    while read < num_glyphs {
        let Some((line, raw)) = cursor.next_line() else {
            return Err(DescriptorError::UnexpectedEof {
                line: cursor.line(),
                expected: format!("{} more glyph block(s)", num_glyphs - read),
            });
        };
        if raw.trim().is_empty() {
            continue;
        }
        if !raw.starts_with('\t') {
            warnings.push(unexpected_line(line, raw));
            continue;
        }

        let codepoint = raw
            .trim()
            .trim_end_matches(':')
            .trim()
            .parse::<u32>()
            .map_err(|_| DescriptorError::invalid(line, "codepoint", raw))?;

        let (advance_line, advance) = keyword_value(&mut cursor, "advance")?;
        let advance = advance
            .parse::<u32>()
            .map_err(|_| DescriptorError::invalid(advance_line, "advance", advance))?;

        let (_, auto_update) = keyword_value(&mut cursor, "auto_update_advance")?;
        let auto_update_advance = parse_bool(auto_update);

        let (amount_line, amount) = keyword_value(&mut cursor, "auto_advance_amount")?;
        let auto_advance_amount = amount
            .parse::<i32>()
            .map_err(|_| DescriptorError::invalid(amount_line, "auto_advance_amount", amount))?;

        let pixels = read_pixels(&mut cursor)?;

        let glyph = SparsePixelGlyph::new(advance, auto_update_advance, auto_advance_amount, pixels)
            .map_err(|source| DescriptorError::Glyph {
                line,
                codepoint,
                source,
            })?;
        if let Some(warning) = collection.insert(codepoint, glyph.into()) {
            warnings.push(warning.at(format!("line {}", line)));
        }
        read += 1;
    }

    Ok(Encoded::with_warnings(collection, warnings))
}

/// Reads header lines up to `glyphs`. Returns the declared glyph count
/// (0 when absent) and whether the `glyphs` line was found.
fn read_header(cursor: &mut LineCursor<'_>) -> Result<(u32, bool), DescriptorError> {
    let mut num_glyphs = 0;
    while let Some((line, raw)) = cursor.next_line() {
        if raw.starts_with("num_glyphs") {
            let value = raw.split_whitespace().nth(1).unwrap_or_default();
            num_glyphs = value
                .parse::<u32>()
                .map_err(|_| DescriptorError::invalid(line, "num_glyphs", raw))?;
        }
        if raw.starts_with("glyphs") {
            return Ok((num_glyphs, true));
        }
    }
    Ok((num_glyphs, false))
}

fn keyword_value<'a>(
    cursor: &mut LineCursor<'a>,
    keyword: &'static str,
) -> Result<(usize, &'a str), DescriptorError> {
    let Some((line, raw)) = cursor.next_line() else {
        return Err(DescriptorError::UnexpectedEof {
            line: cursor.line(),
            expected: keyword.to_string(),
        });
    };
    let mut fields = raw.split_whitespace();
    if fields.next() != Some(keyword) {
        return Err(DescriptorError::MissingKeyword { line, keyword });
    }
    let value = fields
        .next()
        .ok_or_else(|| DescriptorError::invalid(line, keyword, raw))?;
    Ok((line, value))
}

fn read_pixels(cursor: &mut LineCursor<'_>) -> Result<Vec<(u32, u32)>, DescriptorError> {
    let Some((line, raw)) = cursor.next_line() else {
        return Err(DescriptorError::UnexpectedEof {
            line: cursor.line(),
            expected: "pixel list".to_string(),
        });
    };
    // The label is the glyph's own character, which may itself be ':'.
    let Some((_, list)) = raw.trim().rsplit_once(':') else {
        return Err(DescriptorError::invalid(line, "pixel list", raw));
    };

    let mut pixels = Vec::new();
    for pair in list.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let mut coords = pair.split_whitespace().map(str::parse::<u32>);
        match (coords.next(), coords.next(), coords.next()) {
            (Some(Ok(x)), Some(Ok(y)), None) => pixels.push((x, y)),
            _ => return Err(DescriptorError::invalid(line, "pixel pair", pair)),
        }
    }
    Ok(pixels)
}

/// PXF booleans: `true`, `1`, and `yes` (any case) are true.
pub fn parse_bool(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcol_spec::{Glyph, GlyphError, WarningCode};
    use pretty_assertions::assert_eq;

    fn block(codepoint: u32, advance: u32, pixels: &str) -> String {
        format!(
            "\t{}:\n\t\tadvance {}\n\t\tauto_update_advance true\n\t\tauto_advance_amount 0\n\t\tX: {}\n",
            codepoint, advance, pixels
        )
    }

    fn font(num_glyphs: u32, blocks: &[String]) -> String {
        let mut text = format!(
            "name Pixelated Elegance\nnum_glyphs {}\nglyphs\n",
            num_glyphs
        );
        for b in blocks {
            text.push_str(b);
        }
        text
    }

    fn sparse(collection: &GlyphCollection, codepoint: u32) -> &SparsePixelGlyph {
        match collection.get(codepoint) {
            Some(Glyph::SparsePixel(g)) => g,
            other => panic!("expected sparse glyph, got {:?}", other),
        }
    }

    #[test]
    fn test_parses_blocks() {
        let text = font(2, &[block(33, 2, "0 0, 1 6"), block(65, 1, "")]);
        let parsed = parse_pxf(&text).unwrap();
        assert!(parsed.is_clean());

        let bang = sparse(&parsed.value, 33);
        assert_eq!(bang.advance(), 2);
        assert!(bang.auto_update_advance());
        assert_eq!(bang.pixels(), &[(0, 0), (1, 6)]);
        assert_eq!(bang.columns().value, vec![0x40, 0x01]);

        assert!(sparse(&parsed.value, 65).pixels().is_empty());
    }

    #[test]
    fn test_blank_lines_between_blocks_skipped() {
        let text = font(2, &[block(33, 1, "0 0"), "\n\n".to_string(), block(34, 1, "0 1")]);
        let parsed = parse_pxf(&text).unwrap();
        assert_eq!(parsed.value.len(), 2);
        assert!(parsed.is_clean());
    }

    #[test]
    fn test_stray_line_warns() {
        let text = font(1, &["comment\n".to_string(), block(33, 1, "0 0")]);
        let parsed = parse_pxf(&text).unwrap();
        assert_eq!(parsed.value.len(), 1);
        assert_eq!(parsed.warnings[0].code, WarningCode::UnexpectedLine);
        assert_eq!(parsed.warnings[0].path.as_deref(), Some("line 4"));
    }

    #[test]
    fn test_num_glyphs_missing_or_zero() {
        assert_eq!(
            parse_pxf("name x\nglyphs\n").unwrap_err(),
            DescriptorError::NoGlyphs { found: 0 }
        );
        assert_eq!(
            parse_pxf(&font(0, &[])).unwrap_err(),
            DescriptorError::NoGlyphs { found: 0 }
        );
    }

    #[test]
    fn test_eof_before_all_blocks() {
        let text = font(3, &[block(33, 1, "0 0")]);
        let err = parse_pxf(&text).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::UnexpectedEof {
                line: 8,
                expected: "2 more glyph block(s)".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_keyword_order() {
        let text = font(
            1,
            &["\t33:\n\t\tauto_update_advance true\n\t\tadvance 1\n".to_string()],
        );
        assert_eq!(
            parse_pxf(&text).unwrap_err(),
            DescriptorError::MissingKeyword {
                line: 5,
                keyword: "advance"
            }
        );
    }

    #[test]
    fn test_row_out_of_range_is_fatal() {
        let text = font(1, &[block(33, 1, "0 7")]);
        assert_eq!(
            parse_pxf(&text).unwrap_err(),
            DescriptorError::Glyph {
                line: 4,
                codepoint: 33,
                source: GlyphError::RowOutOfRange { x: 0, y: 7, max: 6 },
            }
        );
    }

    #[test]
    fn test_bad_pixel_pair() {
        let text = font(1, &[block(33, 1, "0 0, 1")]);
        let err = parse_pxf(&text).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidValue { line: 8, what: "pixel pair", .. }));
    }

    #[test]
    fn test_punctuation_labels() {
        let colon = "\t58:\n\t\tadvance 1\n\t\tauto_update_advance true\n\t\tauto_advance_amount 0\n\t\t:: 0 1, 0 5\n";
        let comma = "\t44:\n\t\tadvance 1\n\t\tauto_update_advance true\n\t\tauto_advance_amount 0\n\t\t,: 0 6\n";
        let text = font(2, &[colon.to_string(), comma.to_string()]);
        let parsed = parse_pxf(&text).unwrap();
        assert!(parsed.is_clean());
        assert_eq!(sparse(&parsed.value, 58).pixels(), &[(0, 1), (0, 5)]);
        assert_eq!(sparse(&parsed.value, 44).pixels(), &[(0, 6)]);
    }

    #[test]
    fn test_duplicate_keeps_last() {
        let text = font(2, &[block(33, 1, "0 0"), block(33, 3, "2 2")]);
        let parsed = parse_pxf(&text).unwrap();
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].code, WarningCode::DuplicateCodepoint);
        assert_eq!(sparse(&parsed.value, 33).advance(), 3);
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("true"));
        assert!(parse_bool("True"));
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("0"));
    }
}
