//! Codepoint-keyed glyph collections.

use std::collections::BTreeMap;

use crate::codepoint;
use crate::error::{ValidationWarning, WarningCode};
use crate::glyph::{Glyph, GlyphFormat};

/// Glyphs of a single font, keyed by codepoint and iterated in increasing
/// codepoint order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphCollection {
    format: GlyphFormat,
    glyphs: BTreeMap<u32, Glyph>,
}

impl GlyphCollection {
    /// Creates an empty collection for `format`.
    pub fn new(format: GlyphFormat) -> Self {
        Self {
            format,
            glyphs: BTreeMap::new(),
        }
    }

    pub fn format(&self) -> GlyphFormat {
        self.format
    }

    /// Inserts a glyph. A redefinition replaces the earlier glyph and
    /// returns a [`WarningCode::DuplicateCodepoint`] warning.
    ///
    /// The glyph's format is not checked here; table builders reject
    /// glyphs whose format differs from the collection's.
    pub fn insert(&mut self, codepoint: u32, glyph: Glyph) -> Option<ValidationWarning> {
        self.glyphs.insert(codepoint, glyph).map(|_| {
            ValidationWarning::new(
                WarningCode::DuplicateCodepoint,
                format!(
                    "codepoint 0x{:02x} defined more than once; keeping the last definition",
                    codepoint
                ),
            )
        })
    }

    pub fn get(&self, codepoint: u32) -> Option<&Glyph> {
        self.glyphs.get(&codepoint)
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// All glyphs in increasing codepoint order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Glyph)> {
        self.glyphs.iter().map(|(cp, g)| (*cp, g))
    }

    /// Glyphs inside the printable window, in increasing codepoint order.
    pub fn printable(&self) -> impl Iterator<Item = (u32, &Glyph)> {
        self.glyphs
            .range(codepoint::FIRST_CODEPOINT..=codepoint::LAST_CODEPOINT)
            .map(|(cp, g)| (*cp, g))
    }

    /// Window codepoints with no glyph, in increasing order.
    pub fn missing_in_window(&self) -> Vec<u32> {
        codepoint::window()
            .filter(|cp| !self.glyphs.contains_key(cp))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::RowMajorGlyph;

    fn blank() -> Glyph {
        RowMajorGlyph::new([0; 16]).into()
    }

    #[test]
    fn test_insert_and_duplicate_warning() {
        let mut c = GlyphCollection::new(GlyphFormat::RowMajor);
        assert!(c.insert(0x41, blank()).is_none());

        let warning = c.insert(0x41, RowMajorGlyph::new([1; 16]).into()).unwrap();
        assert_eq!(warning.code, WarningCode::DuplicateCodepoint);
        assert_eq!(c.len(), 1);
        assert_eq!(c.get(0x41), Some(&RowMajorGlyph::new([1; 16]).into()));
    }

    #[test]
    fn test_printable_excludes_outside_window() {
        let mut c = GlyphCollection::new(GlyphFormat::RowMajor);
        for cp in [0x01, 0x21, 0x7E, 0x7F, 0xA0] {
            c.insert(cp, blank());
        }
        let printable: Vec<u32> = c.printable().map(|(cp, _)| cp).collect();
        assert_eq!(printable, vec![0x21, 0x7E]);
    }

    #[test]
    fn test_missing_in_window() {
        let mut c = GlyphCollection::new(GlyphFormat::RowMajor);
        for cp in codepoint::window().filter(|&cp| cp != 0x41 && cp != 0x7E) {
            c.insert(cp, blank());
        }
        assert_eq!(c.missing_in_window(), vec![0x41, 0x7E]);
    }
}
