//! Font manifest: which descriptor to read and what to emit.

use serde::{Deserialize, Serialize};

use crate::glyph::GlyphFormat;

/// Current manifest version.
pub const MANIFEST_VERSION: u32 = 1;

/// File suffix that marks a manifest during directory scans.
pub const MANIFEST_SUFFIX: &str = ".font.json";

/// Describes one font to convert.
///
/// Paths in `source` are relative to the manifest's directory; `output` is
/// relative to the output root chosen at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontManifest {
    /// Schema version; must be 1.
    pub manifest_version: u32,

    /// Font identifier and C symbol prefix.
    /// Format: `[a-z_][a-z0-9_]{0,62}`
    pub font_id: String,

    /// Descriptor format of `source`.
    pub format: GlyphFormat,

    /// Descriptor file to read.
    pub source: String,

    /// Generated C source file.
    pub output: String,

    /// Font name for the header comment.
    pub title: String,

    /// Author credited in the header comment.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,

    /// License text for the header comment.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub license: String,

    /// Where the font comes from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Free-form notes; not emitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FontManifest {
    /// Creates a new manifest builder.
    pub fn builder(font_id: impl Into<String>, format: GlyphFormat) -> FontManifestBuilder {
        FontManifestBuilder::new(font_id, format)
    }

    /// Parses a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the manifest to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the manifest to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serializes the manifest to a JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Report file name for this font.
    pub fn report_file_name(&self) -> String {
        format!("{}.report.json", self.font_id)
    }
}

/// Builder for constructing manifests in code.
#[derive(Debug, Clone)]
pub struct FontManifestBuilder {
    font_id: String,
    format: GlyphFormat,
    source: String,
    output: Option<String>,
    title: Option<String>,
    author: String,
    license: String,
    source_url: Option<String>,
    description: Option<String>,
}

impl FontManifestBuilder {
    /// Creates a new builder.
    pub fn new(font_id: impl Into<String>, format: GlyphFormat) -> Self {
        Self {
            font_id: font_id.into(),
            format,
            source: String::new(),
            output: None,
            title: None,
            author: String::new(),
            license: String::new(),
            source_url: None,
            description: None,
        }
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the output path. Defaults to `<font_id>.c`.
    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Sets the title. Defaults to the font id.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.license = license.into();
        self
    }

    pub fn source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the manifest.
    pub fn build(self) -> FontManifest {
        let output = self
            .output
            .unwrap_or_else(|| format!("{}.c", self.font_id));
        let title = self.title.unwrap_or_else(|| self.font_id.clone());
        FontManifest {
            manifest_version: MANIFEST_VERSION,
            font_id: self.font_id,
            format: self.format,
            source: self.source,
            output,
            title,
            author: self.author,
            license: self.license,
            source_url: self.source_url,
            description: self.description,
        }
    }
}
