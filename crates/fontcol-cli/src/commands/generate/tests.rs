use super::*;
use fontcol_spec::{Report, TableMetrics};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn pxf_block(codepoint: u32, advance: u32, pixels: &str) -> String {
    format!(
        "\t{}:\n\t\tadvance {}\n\t\tauto_update_advance true\n\t\tauto_advance_amount 0\n\t\tX: {}\n",
        codepoint, advance, pixels
    )
}

fn pxf_font(advance: u32) -> String {
    let mut text = String::from("name Pixelated Elegance\nnum_glyphs 94\nglyphs\n");
    for cp in 0x21..=0x7Eu32 {
        text.push_str(&pxf_block(cp, advance, "0 0"));
    }
    text
}

fn write_manifest(dir: &Path, source: &str, extra: &str) -> PathBuf {
    let path = dir.join("font_8x9.font.json");
    let json = format!(
        r#"{{
            "manifest_version": 1,
            "font_id": "font_8x9",
            "format": "sparse_pixel",
            "source": "{}",
            "output": "gen/font_8x9.c",
            "title": "Pixelated Elegance"{}
        }}"#,
        source, extra
    );
    fs::write(&path, json).unwrap();
    path
}

fn read_report(outcome: &GenerateOutcome) -> Report {
    let path = outcome.report_path.as_ref().unwrap();
    Report::from_json(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_generate_writes_source_and_report() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("font.pxf"), pxf_font(1)).unwrap();
    let manifest = write_manifest(tmp.path(), "font.pxf", r#", "license": "CC0""#);
    let out = tmp.path().join("out");

    let outcome = execute(&manifest, &out).unwrap();
    assert_eq!(outcome.status, GenerateStatus::Success, "{:?}", outcome.errors);
    assert_eq!(outcome.glyph_count, Some(94));
    assert!(outcome.warnings.is_empty());

    let source = fs::read_to_string(out.join("gen/font_8x9.c")).unwrap();
    assert!(source.contains("font_8x9_columns_blob"));

    let report = read_report(&outcome);
    assert!(report.ok);
    assert_eq!(report.font_id.as_deref(), Some("font_8x9"));
    assert_eq!(report.outputs.len(), 1);
    assert_eq!(report.outputs[0].hash, blake3::hash(source.as_bytes()).to_hex().to_string());
    assert_eq!(
        report.outputs[0].table,
        TableMetrics::Variable {
            glyph_count: 94,
            blob_len: 94,
            index_bits: 8
        }
    );
    assert_eq!(
        outcome.report_path.as_deref(),
        Some(tmp.path().join("font_8x9.report.json").as_path())
    );
}

#[test]
fn test_missing_license_warns_but_succeeds() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("font.pxf"), pxf_font(1)).unwrap();
    let manifest = write_manifest(tmp.path(), "font.pxf", "");

    let outcome = execute(&manifest, tmp.path()).unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.warnings.len(), 1);
    assert_eq!(read_report(&outcome).warnings[0].code, "W004");
}

#[test]
fn test_unreadable_manifest_is_exit_1_without_report() {
    let tmp = TempDir::new().unwrap();
    let outcome = execute(&tmp.path().join("missing.font.json"), tmp.path()).unwrap();
    assert_eq!(outcome.status.exit_code(), 1);
    assert_eq!(outcome.errors[0].code, "CLI_001");
    assert!(outcome.report_path.is_none());
}

#[test]
fn test_invalid_manifest_is_exit_1_with_report() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(tmp.path(), "", r#", "license": "CC0""#);

    let outcome = execute(&manifest, tmp.path()).unwrap();
    assert_eq!(outcome.status, GenerateStatus::ManifestError);
    assert_eq!(outcome.errors[0].code, "E005");
    assert!(!read_report(&outcome).ok);
}

#[test]
fn test_missing_descriptor_is_exit_2() {
    let tmp = TempDir::new().unwrap();
    let manifest = write_manifest(tmp.path(), "absent.pxf", r#", "license": "CC0""#);

    let outcome = execute(&manifest, tmp.path()).unwrap();
    assert_eq!(outcome.status.exit_code(), 2);
    assert_eq!(outcome.errors[0].code, "CLI_004");
    assert_eq!(read_report(&outcome).errors[0].code, "CLI_004");
}

#[test]
fn test_zero_glyphs_writes_no_output() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("font.pxf"), "num_glyphs 0\nglyphs\n").unwrap();
    let manifest = write_manifest(tmp.path(), "font.pxf", r#", "license": "CC0""#);
    let out = tmp.path().join("out");

    let outcome = execute(&manifest, &out).unwrap();
    assert_eq!(outcome.status, GenerateStatus::GenerationError);
    assert_eq!(outcome.errors[0].code, "DESC_003");
    assert!(!out.join("gen/font_8x9.c").exists());
}

#[test]
fn test_pixel_outside_advance_is_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let text = pxf_font(1).replace(&pxf_block(65, 1, "0 0"), &pxf_block(65, 2, "0 0, 2 0"));
    fs::write(tmp.path().join("font.pxf"), text).unwrap();
    let manifest = write_manifest(tmp.path(), "font.pxf", r#", "license": "CC0""#);

    let outcome = execute(&manifest, tmp.path()).unwrap();
    assert!(outcome.is_success());
    assert!(outcome.warnings.iter().any(|w| w.code.code() == "W001"));
}

#[test]
fn test_json_output_shape() {
    let tmp = TempDir::new().unwrap();
    let outcome = execute(&tmp.path().join("missing.font.json"), tmp.path()).unwrap();
    let value = serde_json::to_value(json::to_output(outcome)).unwrap();
    assert_eq!(value["success"], false);
    assert_eq!(value["exit_code"], 1);
    assert_eq!(value["errors"][0]["code"], "CLI_001");
    assert!(value.get("output").is_none());
}
