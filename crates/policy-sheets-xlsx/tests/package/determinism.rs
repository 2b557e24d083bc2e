//! Identical workbooks produce identical bytes.

use policy_sheets_core::{BorderStyle, CellRange, Color, Style, Workbook};
use policy_sheets_xlsx::XlsxWriter;

use crate::part_names;

fn sample_workbook() -> Workbook {
    let mut wb = Workbook::with_sheet("Policy_Definitions").unwrap();
    let ws = wb.worksheet_mut(0).unwrap();

    ws.set_cell_value_at(0, 0, "Azure Policy Definitions").unwrap();
    ws.merge_cells(&CellRange::parse("A1:C1").unwrap()).unwrap();
    let header = Style::new()
        .bold(true)
        .fill_color(Color::rgb(0xD9, 0xE1, 0xF2))
        .border(BorderStyle::thin());
    for (col, text) in ["Index", "Policy ID", "Effect"].into_iter().enumerate() {
        ws.set_cell_value_at(2, col as u16, text).unwrap();
        ws.set_cell_style_at(2, col as u16, &header).unwrap();
    }
    for (col, text) in ["1", "abc", "Deny"].into_iter().enumerate() {
        ws.set_cell_value_at(3, col as u16, text).unwrap();
    }
    ws.reserve_row(4).unwrap();
    ws.set_column_width(1, 6.0);
    wb
}

#[test]
fn test_same_workbook_same_bytes() {
    let first = XlsxWriter::write_to_vec(&sample_workbook()).unwrap();
    let second = XlsxWriter::write_to_vec(&sample_workbook()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_part_order_is_fixed() {
    let bytes = XlsxWriter::write_to_vec(&sample_workbook()).unwrap();
    assert_eq!(
        part_names(&bytes),
        vec![
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ]
    );
}

#[test]
fn test_write_file_matches_in_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");

    XlsxWriter::write_file(&sample_workbook(), &path).unwrap();
    let on_disk = std::fs::read(&path).unwrap();

    assert_eq!(on_disk, XlsxWriter::write_to_vec(&sample_workbook()).unwrap());
}
