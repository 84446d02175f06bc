//! Inspect command implementation
//!
//! Parses a descriptor on its own and prints what the readers made of it:
//! a coverage summary, one glyph's columns with an ASCII-art preview, or a
//! representation line for every printable glyph.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use fontcol_backend_c::describe;
use fontcol_spec::codepoint::{self, char_literal};
use fontcol_spec::{Columns, Glyph, GlyphCollection, GlyphFormat};
use std::path::Path;
use std::process::ExitCode;

use super::reporting;
use crate::input::read_descriptor_path;

/// Run the inspect command
///
/// # Arguments
/// * `descriptor_path` - Path to a BDF, PXF, or MEM file
/// * `format` - Glyph format the descriptor holds
/// * `codepoint` - Optional glyph to show (`A`, `0x41`, or `65`)
/// * `dump` - Whether to print every printable glyph
///
/// # Returns
/// Exit code: 0 success, 1 if the requested glyph is not defined
pub fn run(
    descriptor_path: &str,
    format: &str,
    codepoint: Option<&str>,
    dump: bool,
) -> Result<ExitCode> {
    let format: GlyphFormat = format.parse().map_err(|e: String| anyhow!(e))?;
    let codepoint = codepoint.map(parse_codepoint).transpose()?;

    let descriptor = read_descriptor_path(Path::new(descriptor_path))?;
    let parsed = fontcol_descriptor::parse(format, &descriptor.text)
        .with_context(|| format!("Failed to parse descriptor: {}", descriptor_path))?;

    println!("{} {}", "Inspecting:".cyan().bold(), descriptor_path);
    println!("{} {}", "Format:".dimmed(), format);
    println!("{} {}", "Hash:".dimmed(), &descriptor.hash[..16]);
    if !parsed.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        reporting::print_warnings(&parsed.warnings);
    }

    let collection = parsed.value;

    if dump {
        println!();
        print!("{}", dump_listing(&collection));
        return Ok(ExitCode::SUCCESS);
    }

    match codepoint {
        Some(cp) => match collection.get(cp) {
            Some(glyph) => {
                print_glyph(cp, glyph);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!(
                    "\n{} no glyph for {} (0x{:02x})",
                    "x".red(),
                    char_literal(cp),
                    cp
                );
                Ok(ExitCode::from(1))
            }
        },
        None => {
            print_summary(&collection);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Parses a codepoint given as a single character, `0x`-prefixed hex, or
/// decimal. Bare digits are decimal, so `--codepoint 7` means 7, not `'7'`.
pub fn parse_codepoint(text: &str) -> Result<u32> {
    if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        return u32::from_str_radix(hex, 16)
            .with_context(|| format!("invalid hex codepoint: {}", text));
    }
    if let Ok(value) = text.parse::<u32>() {
        return Ok(value);
    }
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c as u32),
        _ => Err(anyhow!("invalid codepoint: {}", text)),
    }
}

/// One representation line per printable glyph, in codepoint order.
pub fn dump_listing(collection: &GlyphCollection) -> String {
    let mut out = String::new();
    for (cp, glyph) in collection.printable() {
        out.push_str(&describe(cp, glyph));
        out.push('\n');
    }
    out
}

fn print_glyph(cp: u32, glyph: &Glyph) {
    println!();
    println!("{}", describe(cp, glyph).bold());
    println!(
        "{} {}x{}",
        "Size:".dimmed(),
        glyph.width(),
        glyph.height()
    );

    let columns = glyph.columns();
    println!("{} {}", "Columns:".dimmed(), format_columns(&columns.value));
    if !columns.warnings.is_empty() {
        reporting::print_warnings(&columns.warnings);
    }

    println!();
    print!("{}", glyph.preview());
}

fn format_columns(columns: &Columns) -> String {
    let words: Vec<String> = match columns {
        Columns::Bytes(bytes) => bytes.iter().map(|b| format!("0x{:02x}", b)).collect(),
        Columns::Pairs(pairs) => pairs
            .iter()
            .map(|p| format!("0x{:04x}", (u16::from(p[1]) << 8) | u16::from(p[0])))
            .collect(),
    };
    if words.is_empty() {
        "(none)".to_string()
    } else {
        words.join(", ")
    }
}

fn print_summary(collection: &GlyphCollection) {
    let printable = collection.printable().count();
    println!();
    println!("{} {}", "Glyphs:".bold(), collection.len());
    println!(
        "{} {}/{}",
        "Printable:".bold(),
        printable,
        codepoint::WINDOW_LEN
    );

    let missing = collection.missing_in_window();
    if missing.is_empty() {
        println!("{}", "Window complete".green());
    } else {
        let listed: Vec<String> = missing.iter().map(|&cp| char_literal(cp)).collect();
        println!("{} {}", "Missing:".red().bold(), listed.join(" "));
    }
}
