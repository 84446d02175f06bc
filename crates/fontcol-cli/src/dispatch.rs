//! Backend dispatch
//!
//! Routes a manifest's descriptor through the reader for its format and
//! then through the C table backend. Rendering happens entirely in memory;
//! only [`dispatch_generate`] writes, and only after rendering succeeded.

use fontcol_backend_c::{generate_font_source, save_source_result, GenerateError, SourceResult};
use fontcol_descriptor::DescriptorError;
use fontcol_spec::{BackendError, FontManifest, OutputResult, ValidationWarning};
use std::fmt;
use std::path::Path;

/// Errors that can occur during dispatch
#[derive(Debug)]
pub enum DispatchError {
    /// The descriptor could not be parsed
    Descriptor(DescriptorError),
    /// The table could not be built or written
    Generate(GenerateError),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Descriptor(e) => write!(f, "Descriptor error: {}", e),
            DispatchError::Generate(e) => write!(f, "Generation error: {}", e),
        }
    }
}

impl DispatchError {
    /// 1-based descriptor line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            DispatchError::Descriptor(e) => e.line(),
            DispatchError::Generate(_) => None,
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DispatchError::Descriptor(e) => Some(e),
            DispatchError::Generate(e) => Some(e),
        }
    }
}

impl BackendError for DispatchError {
    fn code(&self) -> &'static str {
        match self {
            DispatchError::Descriptor(e) => e.code(),
            DispatchError::Generate(e) => e.code(),
        }
    }

    fn message(&self) -> String {
        match self {
            DispatchError::Descriptor(e) => e.to_string(),
            DispatchError::Generate(e) => e.to_string(),
        }
    }

    fn category(&self) -> &'static str {
        match self {
            DispatchError::Descriptor(e) => e.category(),
            DispatchError::Generate(e) => e.category(),
        }
    }
}

impl From<DescriptorError> for DispatchError {
    fn from(e: DescriptorError) -> Self {
        DispatchError::Descriptor(e)
    }
}

impl From<GenerateError> for DispatchError {
    fn from(e: GenerateError) -> Self {
        DispatchError::Generate(e)
    }
}

/// A font rendered to C source in memory.
#[derive(Debug)]
pub struct RenderedFont {
    /// The rendered source and its table.
    pub source: SourceResult,
    /// Number of glyphs the descriptor defined (inside or outside the window).
    pub glyph_count: usize,
    /// Reader and table warnings, in the order they were raised.
    pub warnings: Vec<ValidationWarning>,
}

impl RenderedFont {
    /// Report entry for the source written at `path`.
    pub fn output_result(&self, path: &str) -> OutputResult {
        OutputResult::new(
            path,
            self.source.hash.clone(),
            self.source.size_bytes(),
            self.source.metrics(),
        )
    }
}

/// Parse `descriptor_text` and render the C source, without writing.
pub fn render_font(
    manifest: &FontManifest,
    descriptor_text: &str,
) -> Result<RenderedFont, DispatchError> {
    let mut warnings = Vec::new();
    let collection =
        fontcol_descriptor::parse(manifest.format, descriptor_text)?.drain_into(&mut warnings);
    let source = generate_font_source(manifest, &collection)?;
    warnings.extend(source.warnings.iter().cloned());

    Ok(RenderedFont {
        source,
        glyph_count: collection.len(),
        warnings,
    })
}

/// Render the font and write it to `out_root/<manifest.output>`.
pub fn dispatch_generate(
    manifest: &FontManifest,
    descriptor_text: &str,
    out_root: &Path,
) -> Result<(RenderedFont, OutputResult), DispatchError> {
    let rendered = render_font(manifest, descriptor_text)?;
    save_source_result(&rendered.source, out_root, &manifest.output)?;
    let output = rendered.output_result(&manifest.output);
    Ok((rendered, output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontcol_spec::{GlyphFormat, WarningCode};

    fn mem_font(skip: Option<u32>) -> String {
        let mut text = String::from("// bizcat\n");
        for cp in 0x21..=0x7Eu32 {
            if Some(cp) == skip {
                continue;
            }
            text.push_str(&format!("// 0x{:02x}\n", cp));
            text.push_str(&"00000001\n".repeat(16));
        }
        text
    }

    fn manifest() -> FontManifest {
        FontManifest::builder("font_16x8", GlyphFormat::RowMajor)
            .source("bizcat.mem")
            .output("gen/font_16x8.c")
            .build()
    }

    #[test]
    fn test_render_in_memory() {
        let rendered = render_font(&manifest(), &mem_font(None)).unwrap();
        assert_eq!(rendered.glyph_count, 94);
        assert!(rendered.warnings.is_empty());
        assert!(rendered.source.source.contains("font_16x8_get_columns"));
    }

    #[test]
    fn test_dispatch_writes_output() {
        let tmp = tempfile::tempdir().unwrap();
        let (rendered, output) = dispatch_generate(&manifest(), &mem_font(None), tmp.path()).unwrap();
        let written = std::fs::read_to_string(tmp.path().join("gen/font_16x8.c")).unwrap();
        assert_eq!(written, rendered.source.source);
        assert_eq!(output.path, "gen/font_16x8.c");
        assert_eq!(output.hash, rendered.source.hash);
    }

    #[test]
    fn test_missing_glyph_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let err = dispatch_generate(&manifest(), &mem_font(Some(0x41)), tmp.path()).unwrap_err();
        assert_eq!(err.code(), "TABLE_001");
        assert!(!tmp.path().join("gen").exists());
    }

    #[test]
    fn test_descriptor_error_code_passes_through() {
        let err = render_font(&manifest(), "// bizcat\n// 0x41\n0\n").unwrap_err();
        assert_eq!(err.code(), "DESC_005");
        assert_eq!(err.category(), "descriptor");
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_reader_warnings_come_first() {
        let text = format!("{}stray\n", mem_font(None));
        let rendered = render_font(&manifest(), &text).unwrap();
        assert_eq!(rendered.warnings.len(), 1);
        assert_eq!(rendered.warnings[0].code, WarningCode::UnexpectedLine);
    }
}
