//! Loading manifests and the descriptor files they name.
//!
//! Every loaded file is hashed with BLAKE3 so reports can record exactly
//! which inputs produced an output.

use fontcol_spec::FontManifest;
use std::path::{Path, PathBuf};

/// Recognized manifest extensions.
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// Result of loading a manifest.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed manifest.
    pub manifest: FontManifest,
    /// Directory the manifest lives in; `source` is resolved against it.
    pub manifest_dir: PathBuf,
}

/// A descriptor file read into memory.
#[derive(Debug)]
pub struct DescriptorSource {
    /// Resolved path of the descriptor.
    pub path: PathBuf,
    /// File contents.
    pub text: String,
    /// BLAKE3 hash of the contents (hex string).
    pub hash: String,
}

/// Errors that can occur while loading inputs.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Manifest path does not end in `.json`.
    UnknownExtension { extension: Option<String> },

    /// JSON parsing failed.
    JsonParse { message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(f, "unknown file extension '.{}' (expected .json)", ext),
                None => write!(f, "file has no extension (expected .json)"),
            },
            InputError::JsonParse { message } => {
                write!(f, "JSON parse error: {}", message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load a font manifest from a JSON file.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use fontcol_cli::input::load_manifest;
///
/// let result = load_manifest(Path::new("fonts/font_8x9.font.json")).unwrap();
/// println!("Loaded {}", result.manifest.font_id);
/// ```
pub fn load_manifest(path: &Path) -> Result<LoadResult, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());
    match extension.as_deref() {
        Some(ext) if JSON_EXTENSIONS.contains(&ext) => {}
        _ => return Err(InputError::UnknownExtension { extension }),
    }

    let content = read_file(path)?;
    let manifest = FontManifest::from_json(&content).map_err(|e| InputError::JsonParse {
        message: e.to_string(),
    })?;

    let manifest_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(LoadResult {
        manifest,
        manifest_dir,
    })
}

/// Read the descriptor a manifest names, relative to the manifest directory.
pub fn read_descriptor(
    manifest: &FontManifest,
    manifest_dir: &Path,
) -> Result<DescriptorSource, InputError> {
    read_descriptor_path(&manifest_dir.join(&manifest.source))
}

/// Read a descriptor file directly.
pub fn read_descriptor_path(path: &Path) -> Result<DescriptorSource, InputError> {
    let text = read_file(path)?;
    let hash = blake3::hash(text.as_bytes()).to_hex().to_string();
    Ok(DescriptorSource {
        path: path.to_path_buf(),
        text,
        hash,
    })
}

fn read_file(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}
