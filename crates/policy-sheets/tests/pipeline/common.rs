//! Helpers for reading rendered packages back.

use std::collections::BTreeMap;
use std::io::Read;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

/// Read one part of a rendered package.
pub fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).expect("valid zip");
    let mut part = archive.by_name(name).expect("part present");
    let mut xml = String::new();
    part.read_to_string(&mut xml).expect("utf-8 part");
    xml
}

/// Cell texts of the first worksheet, grouped by 1-based row number.
pub fn sheet_rows(bytes: &[u8]) -> BTreeMap<u32, Vec<String>> {
    let xml = read_part(bytes, "xl/worksheets/sheet1.xml");
    let mut reader = Reader::from_str(&xml);
    reader.trim_text(true);

    let mut rows: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    let mut current_row = 0u32;
    let mut current_cell: Option<String> = None;

    loop {
        match reader.read_event().expect("well-formed xml") {
            Event::Start(e) if e.name().as_ref() == b"row" => {
                current_row = row_number(&e);
                rows.entry(current_row).or_default();
            }
            // A row with no cells
            Event::Empty(e) if e.name().as_ref() == b"row" => {
                rows.entry(row_number(&e)).or_default();
            }
            Event::Start(e) if e.name().as_ref() == b"c" => current_cell = Some(String::new()),
            Event::Text(t) => {
                if let Some(text) = current_cell.as_mut() {
                    text.push_str(&t.unescape().expect("text"));
                }
            }
            Event::End(e) if e.name().as_ref() == b"c" => {
                if let Some(text) = current_cell.take() {
                    rows.entry(current_row).or_default().push(text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    rows
}

fn row_number(row: &BytesStart<'_>) -> u32 {
    row.try_get_attribute("r")
        .expect("attribute")
        .expect("row number")
        .unescape_value()
        .expect("value")
        .parse()
        .expect("numeric row")
}

/// A mix of flat and wrapped policy definitions.
pub fn mixed_upload() -> &'static [u8] {
    br#"[
        {
            "id": "/providers/Microsoft.Authorization/policyDefinitions/e56962a6-4747-49cd-b67b-bf8b01975c4c",
            "displayName": "Allowed locations",
            "description": "This policy enables you to restrict the locations your organization can specify when deploying resources.",
            "metadata": {"category": "General", "version": "1.0.0"},
            "policyType": "BuiltIn",
            "policyRule": {
                "if": {"field": "location", "notIn": "[parameters('listOfAllowedLocations')]"},
                "then": {"effect": "deny"}
            },
            "versions": ["1.0.0"]
        },
        {
            "name": "0a914e76-4921-4c19-b460-a2d36003525a",
            "id": "/providers/Microsoft.Authorization/policyDefinitions/0a914e76-4921-4c19-b460-a2d36003525a",
            "type": "Microsoft.Authorization/policyDefinitions",
            "location": "australiaeast",
            "properties": {
                "displayName": "Audit resource location matches resource group location",
                "description": "Audit that the resource location matches its resource group location",
                "policyType": "BuiltIn",
                "mode": "All",
                "metadata": {"category": "General"},
                "parameters": {
                    "effect": {"type": "String", "metadata": {"description": "Enable or disable the execution of the policy"}}
                },
                "policyRule": {
                    "if": {"field": "location", "notEquals": "[resourceGroup().location]"},
                    "then": {"effect": "audit"}
                },
                "versions": ["2.0.0", "2.1.0"]
            }
        },
        {
            "id": "/subscriptions/1111/providers/Microsoft.Authorization/policyDefinitions/custom-tags",
            "displayName": "Require a tag on resources",
            "description": "Enforces existence of a tag.",
            "metadata": {"category": "Tags"},
            "policyType": "Custom",
            "policyRule": {"if": {"field": "tags['env']", "exists": "false"}},
            "versions": []
        }
    ]"#
}
