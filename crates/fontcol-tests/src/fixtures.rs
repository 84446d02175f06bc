//! Descriptor and manifest text builders.
//!
//! Each builder produces a complete descriptor covering the printable
//! window (`!` through `~`) except for the codepoints a test asks to leave
//! out.

use fontcol_spec::codepoint;
use fontcol_spec::GlyphFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// Window codepoints minus `skip`.
pub fn window_except(skip: &[u32]) -> impl Iterator<Item = u32> + '_ {
    codepoint::window().filter(move |cp| !skip.contains(cp))
}

/// One PXF glyph block.
pub fn pxf_block(codepoint: u32, advance: u32, pixels: &[(u32, u32)]) -> String {
    let list: Vec<String> = pixels.iter().map(|(x, y)| format!("{} {}", x, y)).collect();
    format!(
        "\t{}:\n\t\tadvance {}\n\t\tauto_update_advance true\n\t\tauto_advance_amount 0\n\t\tX: {}\n",
        codepoint,
        advance,
        list.join(", ")
    )
}

/// PXF font whose glyph at `cp` has advance `cp % 5 + 1` and a diagonal of
/// pixels across that advance.
pub fn pxf_font(skip: &[u32]) -> String {
    let codepoints: Vec<u32> = window_except(skip).collect();
    let mut text = format!(
        "name Pixelated Elegance\nnum_glyphs {}\nglyphs\n",
        codepoints.len()
    );
    for cp in codepoints {
        let advance = cp % 5 + 1;
        let pixels: Vec<(u32, u32)> = (0..advance).map(|x| (x, (x + cp) % 7)).collect();
        text.push_str(&pxf_block(cp, advance, &pixels));
    }
    text
}

/// One MEM glyph block.
pub fn mem_block(codepoint: u32, rows: &[u8; 16]) -> String {
    let mut block = format!("// 0x{:02x}\n", codepoint);
    for row in rows {
        block.push_str(&format!("{:08b}\n", row));
    }
    block
}

/// MEM font whose glyph at `cp` has row `r` equal to `cp ^ r`.
pub fn mem_font(skip: &[u32]) -> String {
    let mut text = String::from("// bizcat 8x16\n");
    for cp in window_except(skip) {
        let mut rows = [0u8; 16];
        for (r, row) in rows.iter_mut().enumerate() {
            *row = (cp as u8) ^ (r as u8);
        }
        text.push_str(&mem_block(cp, &rows));
    }
    text
}

/// One BDF glyph block with a 3x5 box.
pub fn bdf_char(codepoint: u32, rows: &[u8]) -> String {
    let mut block = format!(
        "STARTCHAR U+{:04X}\nENCODING {}\nSWIDTH 666 0\nDWIDTH 4 0\nBBX 3 {} 0 0\nBITMAP\n",
        codepoint,
        codepoint,
        rows.len()
    );
    for row in rows {
        block.push_str(&format!("{:02X}\n", row));
    }
    block.push_str("ENDCHAR\n");
    block
}

/// BDF font of 3x5 glyphs drawn from the codepoint's low bits.
pub fn bdf_font(skip: &[u32]) -> String {
    let codepoints: Vec<u32> = window_except(skip).collect();
    let mut text = format!(
        "STARTFONT 2.1\nFONT -Raccoon-Fixed4x6-Medium-R-Normal--6-60-75-75-P-40-ISO10646-1\nCHARS {}\n",
        codepoints.len()
    );
    for cp in codepoints {
        let rows: Vec<u8> = (0..5).map(|r| ((cp + r) as u8 & 0x07) << 5).collect();
        text.push_str(&bdf_char(cp, &rows));
    }
    text.push_str("ENDFONT\n");
    text
}

/// Complete descriptor for `format`.
pub fn descriptor(format: GlyphFormat, skip: &[u32]) -> String {
    match format {
        GlyphFormat::FixedNibble => bdf_font(skip),
        GlyphFormat::SparsePixel => pxf_font(skip),
        GlyphFormat::RowMajor => mem_font(skip),
    }
}

/// Manifest JSON for a font whose descriptor sits next to it.
pub fn manifest_json(font_id: &str, format: GlyphFormat, source: &str) -> String {
    format!(
        r#"{{
  "manifest_version": 1,
  "font_id": "{id}",
  "format": "{format}",
  "source": "{source}",
  "output": "fonts/{id}.c",
  "title": "{id}",
  "author": "fontcol tests",
  "license": "CC0-1.0"
}}"#,
        id = font_id,
        format = format.as_str(),
        source = source
    )
}

/// Writes `<font_id>.font.json` and its descriptor into `dir` and returns
/// the manifest path.
pub fn write_font(dir: &Path, font_id: &str, format: GlyphFormat, descriptor_text: &str) -> PathBuf {
    let source = format!("{}.{}", font_id, format.descriptor_extension());
    fs::write(dir.join(&source), descriptor_text).expect("write descriptor");
    let manifest = dir.join(format!("{}.font.json", font_id));
    fs::write(&manifest, manifest_json(font_id, format, &source)).expect("write manifest");
    manifest
}
