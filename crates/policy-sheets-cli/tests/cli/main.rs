//! Runs the built binary against files in a temp directory.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Output};

use pretty_assertions::assert_eq;
use tempfile::TempDir;

const UPLOAD: &str = r#"[
    {"id": "/providers/Microsoft.Authorization/policyDefinitions/abc-123",
     "displayName": "Allowed locations",
     "description": "Restrict locations.\nSecond line.",
     "policyRule": {"then": {"effect": "deny"}},
     "versions": ["1.0.0", "1.1.0"]},
    {"name": "def-456",
     "properties": {"displayName": "Audit tags", "mode": "Indexed"}}
]"#;

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_policy-sheets"))
        .current_dir(dir)
        .env("RUST_LOG", "warn")
        .args(args)
        .output()
        .unwrap()
}

fn workspace() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("export.json"), UPLOAD).unwrap();
    dir
}

fn sheet_xml(path: &Path) -> String {
    let file = std::fs::File::open(path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut part = archive.by_name("xl/worksheets/sheet1.xml").unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn convert_writes_named_output() {
    let dir = workspace();
    let output = run(dir.path(), &["convert", "export.json", "-o", "report.xlsx"]);

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Wrote 2 rows to 'report.xlsx'"));

    let xml = sheet_xml(&dir.path().join("report.xlsx"));
    assert!(xml.contains("abc-123"));
    assert!(xml.contains("Audit tags"));
}

#[test]
fn convert_defaults_to_report_file_name() {
    let dir = workspace();
    let output = run(dir.path(), &["convert", "export.json"]);

    assert!(output.status.success());
    assert!(dir.path().join("Azure_Policy_Definitions.xlsx").exists());
}

#[test]
fn convert_reads_config_file() {
    let dir = workspace();
    std::fs::write(
        dir.path().join("report.json"),
        r#"{"report_name": "Custom", "sheet_name": "Defs", "schema": "detailed"}"#,
    )
    .unwrap();

    let output = run(dir.path(), &["--config", "report.json", "convert", "export.json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let xml = sheet_xml(&dir.path().join("Custom.xlsx"));
    assert!(xml.contains("Indexed"));
}

#[test]
fn preview_prints_tab_separated_table() {
    let dir = workspace();
    let output = run(dir.path(), &["preview", "export.json"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Index\tPolicy ID\tDisplay Name\tDescription\tCategory\tPolicy Type\tEffect\tVersions"
    );
    assert_eq!(
        lines[1],
        "1\tabc-123\tAllowed locations\tRestrict locations. Second line.\t\t\tdeny\t1.0.0, 1.1.0"
    );
    assert!(lines[2].starts_with("2\t\tAudit tags\t"));
    assert!(lines[2].contains("\tNone\t"));
}

#[test]
fn object_input_fails_with_message() {
    let dir = workspace();
    std::fs::write(dir.path().join("object.json"), r#"{"value": []}"#).unwrap();

    let output = run(dir.path(), &["convert", "object.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to convert 'object.json'"));
    assert!(stderr.contains("found an object"));
    assert!(!dir.path().join("Azure_Policy_Definitions.xlsx").exists());
}

#[test]
fn skip_invalid_flag_keeps_going() {
    let dir = workspace();
    std::fs::write(dir.path().join("mixed.json"), r#"[7, {"displayName": "Kept"}]"#).unwrap();

    let strict = run(dir.path(), &["convert", "mixed.json"]);
    assert!(!strict.status.success());

    let lenient = run(dir.path(), &["--skip-invalid", "convert", "mixed.json"]);
    assert!(lenient.status.success());
    assert!(String::from_utf8_lossy(&lenient.stderr).contains("skipped 1 records"));
}
