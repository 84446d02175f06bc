//! C source emission.
//!
//! Output is a pure function of the table and header: no timestamps, no
//! host paths, codepoints in increasing order. Every glyph row is wrapped in
//! `BEGIN(label) ... END(label)` where the label is the character literal;
//! the macros expand to nothing for the blob and to braces for the fixed
//! table rows.

use fontcol_spec::codepoint::{self, char_literal, FIRST_CODEPOINT, LAST_CODEPOINT};
use fontcol_spec::FontManifest;

use crate::table::{FixedTable, Table, VariableTable};

const INDENT: &str = "    ";

/// Provenance lines printed at the top of the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHeader {
    pub title: String,
    pub author: String,
    pub license: String,
    pub source_url: Option<String>,
}

impl SourceHeader {
    pub fn from_manifest(manifest: &FontManifest) -> Self {
        Self {
            title: manifest.title.clone(),
            author: manifest.author.clone(),
            license: manifest.license.clone(),
            source_url: manifest.source_url.clone(),
        }
    }
}

/// Renders a complete C source file for `table`, prefixing every symbol
/// with `id`.
pub fn render(id: &str, header: &SourceHeader, table: &Table) -> String {
    match table {
        Table::Variable(t) => render_variable(id, header, t),
        Table::Fixed(t) => render_fixed(id, header, t),
    }
}

fn render_header(code: &mut String, header: &SourceHeader, address_map: bool) {
    code.push_str(&format!("// Font data for {}\n", header.title));
    code.push_str("// Generated by fontcol\n");
    code.push_str(&format!(
        "// Font data: {} printable ASCII characters (0x{:02X}\u{2013}0x{:02X})\n",
        codepoint::WINDOW_LEN,
        FIRST_CODEPOINT,
        LAST_CODEPOINT
    ));
    if address_map {
        code.push_str(&format!(
            "// Address map: 0x{:02X}\u{2013}0x{:02X}\n",
            FIRST_CODEPOINT, LAST_CODEPOINT
        ));
    }
    if !header.author.is_empty() {
        code.push_str(&format!("// Author: {}\n", header.author));
    }
    if !header.license.is_empty() {
        code.push_str(&format!("// License: {}\n", header.license));
    }
    if let Some(url) = &header.source_url {
        code.push_str(&format!("// {}\n", url));
    }
    code.push('\n');
    code.push_str("#include <stdint.h>\n");
    code.push_str("#include <string.h>\n");
    code.push('\n');
}

fn render_variable(id: &str, header: &SourceHeader, table: &VariableTable) -> String {
    let mut code = String::new();
    render_header(&mut code, header, true);

    code.push_str("#define BEGIN(x)\n");
    code.push_str("#define END(x)\n");
    code.push('\n');

    // Blob
    code.push_str(&format!("const uint8_t {}_columns_blob[] = {{\n", id));
    for cp in codepoint::window() {
        let label = char_literal(cp);
        let columns = table.columns(cp).unwrap_or_default();
        if columns.is_empty() {
            // No trailing comma: an empty element is not valid C.
            code.push_str(&format!("{}BEGIN({}) END({})\n", INDENT, label, label));
            continue;
        }
        let bytes: Vec<String> = columns.iter().map(|b| format!("0x{:02x}", b)).collect();
        code.push_str(&format!(
            "{}BEGIN({}) {} END({}),\n",
            INDENT,
            label,
            bytes.join(", "),
            label
        ));
    }
    code.push_str("};\n\n");

    // Index
    let index_type = table.index_type().c_type();
    code.push_str(&format!("const {} {}_index_map[] = {{\n", index_type, id));
    for (cp, offset) in codepoint::window().zip(table.index()) {
        let label = char_literal(cp);
        code.push_str(&format!(
            "{}BEGIN({}) {} END({}),\n",
            INDENT, label, offset, label
        ));
    }
    code.push_str(&format!(
        "{}sizeof({id}_columns_blob) / sizeof({id}_columns_blob[0])\n",
        INDENT,
        id = id
    ));
    code.push_str("};\n\n");

    // Lookup
    code.push_str(&format!(
        "int8_t {}_get_columns(uint8_t c, uint8_t *buf) {{\n",
        id
    ));
    push_window_check(&mut code);
    code.push_str(&format!(
        "    int8_t len = {id}_index_map[c + 1] - {id}_index_map[c];\n",
        id = id
    ));
    code.push_str("    if (len > 0)\n");
    code.push_str(&format!(
        "        memcpy(buf, {id}_columns_blob + {id}_index_map[c], len);\n",
        id = id
    ));
    code.push_str("    else\n");
    code.push_str("        return -1;\n");
    code.push_str("    return len;\n");
    code.push_str("}\n");

    code
}

fn render_fixed(id: &str, header: &SourceHeader, table: &FixedTable) -> String {
    let mut code = String::new();
    render_header(&mut code, header, false);

    code.push_str("#define BEGIN(x) {\n");
    code.push_str("#define END(x) }\n");
    code.push('\n');

    code.push_str(&format!(
        "const uint16_t {}_columns[0x{:02X} - 0x{:02X}][8] = {{\n",
        id,
        LAST_CODEPOINT,
        FIRST_CODEPOINT - 1
    ));
    for (cp, row) in codepoint::window().zip(table.rows()) {
        let label = char_literal(cp);
        let words: Vec<String> = row
            .iter()
            .map(|w| format!("0x{:02x}{:02x}", w >> 8, w & 0xFF))
            .collect();
        code.push_str(&format!(
            "{}BEGIN({}) {} END({}),\n",
            INDENT,
            label,
            words.join(", "),
            label
        ));
    }
    code.push_str("};\n\n");

    code.push_str(&format!(
        "int8_t {}_get_columns(uint8_t c, uint16_t *buf) {{\n",
        id
    ));
    push_window_check(&mut code);
    code.push_str("    int8_t len = 8;\n");
    code.push_str(&format!(
        "    memcpy(buf, {}_columns[c], len * sizeof(uint16_t));\n",
        id
    ));
    code.push_str("    return len;\n");
    code.push_str("}\n");

    code
}

fn push_window_check(code: &mut String) {
    code.push_str(&format!(
        "    if (c < 0x{:02X} || c > 0x{:02X})\n",
        FIRST_CODEPOINT, LAST_CODEPOINT
    ));
    code.push_str("        return -1;\n");
    code.push_str(&format!("    c -= 0x{:02X};\n", FIRST_CODEPOINT));
}
