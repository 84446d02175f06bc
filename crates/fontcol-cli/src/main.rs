//! fontcol CLI - Command-line interface for bitmap font table generation
//!
//! This binary converts bitmap-font descriptors (BDF, PXF, MEM) named by
//! `*.font.json` manifests into column-major C lookup tables.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use fontcol_cli::commands;

/// fontcol - Bitmap font descriptors to column-major C tables
#[derive(Parser)]
#[command(name = "fontcol")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the C source for one font manifest
    Generate {
        /// Path to the font manifest (*.font.json)
        #[arg(short, long)]
        manifest: String,

        /// Output root directory (default: current directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate every font manifest found under a directory
    GenerateAll {
        /// Directory searched recursively for *.font.json manifests
        #[arg(short, long)]
        dir: String,

        /// Output root directory (default: current directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Print one line per font instead of progress dots
        #[arg(short, long)]
        verbose: bool,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a manifest and parse its descriptor without writing anything
    Validate {
        /// Path to the font manifest (*.font.json)
        #[arg(short, long)]
        manifest: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Show how a descriptor was read: coverage, one glyph, or every glyph
    Inspect {
        /// Path to the descriptor file (BDF, PXF, or MEM)
        #[arg(short, long)]
        descriptor: String,

        /// Glyph format of the descriptor
        #[arg(short, long, value_parser = ["fixed_nibble", "sparse_pixel", "row_major"])]
        format: String,

        /// Glyph to show: a character, 0x-prefixed hex, or decimal
        #[arg(short, long)]
        codepoint: Option<String>,

        /// Print a representation line for every printable glyph
        #[arg(long)]
        dump: bool,
    },

    /// Check that a generated C source matches a fresh render
    Verify {
        /// Path to the font manifest (*.font.json)
        #[arg(short, long)]
        manifest: String,

        /// Output root the font was generated into (default: current directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            manifest,
            out_root,
            json,
        } => commands::generate::run(&manifest, out_root.as_deref(), json),
        Commands::GenerateAll {
            dir,
            out_root,
            verbose,
            json,
        } => commands::generate_all::run(&dir, out_root.as_deref(), verbose, json),
        Commands::Validate { manifest, json } => commands::validate::run(&manifest, json),
        Commands::Inspect {
            descriptor,
            format,
            codepoint,
            dump,
        } => commands::inspect::run(&descriptor, &format, codepoint.as_deref(), dump),
        Commands::Verify {
            manifest,
            out_root,
            json,
        } => commands::verify::run(&manifest, out_root.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "fontcol",
            "generate",
            "--manifest",
            "fonts/font_8x9.font.json",
            "--out-root",
            "gen",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                manifest,
                out_root,
                json,
            } => {
                assert_eq!(manifest, "fonts/font_8x9.font.json");
                assert_eq!(out_root.as_deref(), Some("gen"));
                assert!(!json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_generate_all() {
        let cli = Cli::try_parse_from([
            "fontcol",
            "generate-all",
            "--dir",
            "fonts",
            "--verbose",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::GenerateAll {
                dir,
                out_root,
                verbose,
                json,
            } => {
                assert_eq!(dir, "fonts");
                assert!(out_root.is_none());
                assert!(verbose);
                assert!(json);
            }
            _ => panic!("expected generate-all command"),
        }
    }

    #[test]
    fn test_cli_parses_inspect() {
        let cli = Cli::try_parse_from([
            "fontcol",
            "inspect",
            "--descriptor",
            "tom-thumb.bdf",
            "--format",
            "fixed_nibble",
            "--codepoint",
            "0x41",
        ])
        .unwrap();
        match cli.command {
            Commands::Inspect {
                descriptor,
                format,
                codepoint,
                dump,
            } => {
                assert_eq!(descriptor, "tom-thumb.bdf");
                assert_eq!(format, "fixed_nibble");
                assert_eq!(codepoint.as_deref(), Some("0x41"));
                assert!(!dump);
            }
            _ => panic!("expected inspect command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let result = Cli::try_parse_from([
            "fontcol",
            "inspect",
            "--descriptor",
            "font.pxf",
            "--format",
            "wide_pixel",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parses_validate_and_verify() {
        let cli = Cli::try_parse_from(["fontcol", "validate", "-m", "a.font.json", "--json"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Validate { ref manifest, json: true } if manifest == "a.font.json"
        ));

        let cli = Cli::try_parse_from(["fontcol", "verify", "--manifest", "a.font.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Verify { out_root: None, json: false, .. }
        ));
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["fontcol"]).is_err());
    }
}
