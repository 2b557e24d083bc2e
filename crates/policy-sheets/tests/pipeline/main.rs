//! End-to-end conversions: upload bytes in, preview table and XLSX out.

mod common;

use common::{mixed_upload, read_part, sheet_rows};
use policy_sheets::{
    convert, Column, RecordErrorPolicy, ReportConfig, ReportError, ReportStyle, SchemaPreset,
};
use pretty_assertions::assert_eq;

#[test]
fn mixed_upload_produces_three_rows_and_one_sheet() {
    let report = convert(mixed_upload(), &ReportConfig::default()).unwrap();

    assert_eq!(report.table.len(), 3);
    for row in report.table.rows() {
        assert_eq!(row.len(), 8);
        assert!(!row.get(Column::DisplayName).unwrap().is_empty());
        assert!(!row.get(Column::Effect).unwrap().is_empty());
    }

    let rows = sheet_rows(report.artifact.bytes());
    // Title, header and three data rows; the spacer row holds no cells
    assert_eq!(rows.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 6]);
    assert_eq!(rows[&1], vec!["Azure Policy Definitions"]);
    assert_eq!(
        rows[&3],
        vec![
            "Index",
            "Policy ID",
            "Display Name",
            "Description",
            "Category",
            "Policy Type",
            "Effect",
            "Versions"
        ]
    );
    assert_eq!(
        rows[&5],
        vec![
            "2",
            "0a914e76-4921-4c19-b460-a2d36003525a",
            "Audit resource location matches resource group location",
            "Audit that the resource location matches its resource group location",
            "General",
            "BuiltIn",
            "audit",
            "2.0.0, 2.1.0"
        ]
    );
    // Empty versions are left blank; missing effect reads "None"
    assert_eq!(rows[&6].len(), 7);
    assert_eq!(rows[&6][6], "None");

    let workbook = read_part(report.artifact.bytes(), "xl/workbook.xml");
    assert_eq!(workbook.matches("<sheet ").count(), 1);
    assert!(workbook.contains("name=\"Policy_Definitions\""));
}

#[test]
fn title_is_merged_and_header_is_styled() {
    let report = convert(mixed_upload(), &ReportConfig::default()).unwrap();
    let sheet = read_part(report.artifact.bytes(), "xl/worksheets/sheet1.xml");
    let styles = read_part(report.artifact.bytes(), "xl/styles.xml");

    assert!(sheet.contains("<mergeCell ref=\"A1:H1\"/>"));
    assert!(sheet.contains("<cols>"));
    assert!(styles.contains("<fgColor rgb=\"FFD9E1F2\"/>"));
    assert!(styles.contains("<sz val=\"14\"/>"));
    assert!(styles.contains("<alignment horizontal=\"center\"/>"));
    assert!(styles.contains("style=\"thin\""));
}

#[test]
fn detailed_schema_flattens_wrapped_records() {
    let config = ReportConfig {
        schema: SchemaPreset::Detailed,
        ..ReportConfig::default()
    };
    let report = convert(mixed_upload(), &config).unwrap();
    let wrapped = &report.table.rows()[1];

    assert_eq!(wrapped.get(Column::Name), Some("0a914e76-4921-4c19-b460-a2d36003525a"));
    assert_eq!(wrapped.get(Column::Mode), Some("All"));
    assert_eq!(wrapped.get(Column::Location), Some("Australia East"));
    assert_eq!(
        wrapped.get(Column::Parameters),
        Some("effect: String - Enable or disable the execution of the policy")
    );
    assert_eq!(
        wrapped.get(Column::Action),
        Some("{\n  \"effect\": \"audit\"\n}")
    );

    let flat = &report.table.rows()[2];
    assert_eq!(flat.get(Column::Action), Some("{}"));
    assert_eq!(flat.get(Column::Parameters), Some(""));
    assert_eq!(flat.get(Column::Name), Some(""));
}

#[test]
fn object_upload_is_rejected_without_artifact() {
    let err = convert(br#"{"value": []}"#, &ReportConfig::default()).unwrap_err();

    assert!(matches!(err, ReportError::MalformedInput(_)));
    assert!(!err.is_render_failure());
}

#[test]
fn non_object_element_aborts_by_default() {
    let err = convert(br#"[{"id": "a"}, 7]"#, &ReportConfig::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Record 2 is not a policy definition object (found number)"
    );
}

#[test]
fn non_object_element_skipped_on_request() {
    let config = ReportConfig {
        on_invalid_record: RecordErrorPolicy::Skip,
        ..ReportConfig::default()
    };
    let report = convert(br#"[{"id": "a"}, 7, {"id": "b"}]"#, &config).unwrap();

    assert_eq!(report.table.len(), 2);
    assert_eq!(report.table.skipped(), &[1]);
    assert_eq!(sheet_rows(report.artifact.bytes()).len(), 4);
}

#[test]
fn empty_array_renders_header_only() {
    let report = convert(b"[]", &ReportConfig::default()).unwrap();
    let rows = sheet_rows(report.artifact.bytes());

    assert!(report.table.is_empty());
    assert_eq!(rows.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
}

#[test]
fn blank_records_still_occupy_rows() {
    let config = ReportConfig {
        columns: Some(vec![Column::Description]),
        include_index: false,
        style: ReportStyle {
            title_text: None,
            ..ReportStyle::default()
        },
        ..ReportConfig::default()
    };
    let report = convert(br#"[{"description": "x"}, {}, {}]"#, &config).unwrap();
    let bytes = report.artifact.bytes();

    let rows = sheet_rows(bytes);
    assert_eq!(rows.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(rows[&1], vec!["Description"]);
    assert_eq!(rows[&2], vec!["x"]);
    assert!(rows[&4].is_empty());

    let sheet = read_part(bytes, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("<dimension ref=\"A1:A4\"/>"));
}

#[test]
fn control_characters_in_descriptions_stay_well_formed() {
    let upload = br#"[{"displayName": "Bell\u0007", "description": "one\r\ntwo\u000bthree"}]"#;
    let report = convert(upload, &ReportConfig::default()).unwrap();
    let sheet = read_part(report.artifact.bytes(), "xl/worksheets/sheet1.xml");

    assert!(sheet.contains("Bell_x0007_"));
    assert!(sheet.contains("one_x000D_\ntwo_x000B_three"));
    assert!(!sheet.contains(|c: char| matches!(c, '\u{7}' | '\u{b}' | '\r')));
    // Still parses
    sheet_rows(report.artifact.bytes());
}

#[test]
fn oversized_description_is_truncated() {
    let description = "d".repeat(40_000);
    let upload = serde_json::to_vec(&serde_json::json!([{"description": description}])).unwrap();
    let config = ReportConfig {
        columns: Some(vec![Column::Description]),
        include_index: false,
        ..ReportConfig::default()
    };
    let report = convert(&upload, &config).unwrap();

    let rows = sheet_rows(report.artifact.bytes());
    let text = &rows[&4][0];
    assert_eq!(text.len(), 32_767);
    assert!(text.ends_with(policy_sheets::render::TRUNCATION_MARKER));
    // The preview keeps the full text
    assert_eq!(report.table.rows()[0].get(Column::Description).map(str::len), Some(40_000));
}
