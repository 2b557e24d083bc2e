//! XLSX styles part (xl/styles.xml)
//!
//! Cell styles from every sheet are merged into one `cellXfs` list. Fonts,
//! fills and borders are numbered in first-use order.

use std::collections::HashMap;
use std::hash::Hash;

use policy_sheets_core::style::{BorderStyle, Color, FontStyle, HorizontalAlignment, Style};
use policy_sheets_core::style::DEFAULT_FONT_NAME;
use policy_sheets_core::Workbook;

/// Fills 0 (`none`) and 1 (`gray125`) are required by Excel
const RESERVED_FILLS: u32 = 2;

/// Values numbered by first appearance
struct Interned<T> {
    items: Vec<T>,
    ids: HashMap<T, u32>,
}

impl<T: Clone + Eq + Hash> Interned<T> {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: HashMap::new(),
        }
    }

    fn starting_with(first: T) -> Self {
        let mut interned = Self::new();
        interned.id(&first);
        interned
    }

    fn id(&mut self, item: &T) -> u32 {
        if let Some(&id) = self.ids.get(item) {
            return id;
        }
        let id = self.items.len() as u32;
        self.items.push(item.clone());
        self.ids.insert(item.clone(), id);
        id
    }
}

#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Position is the `cellXfs` index; 0 is the default style
    xfs: Vec<Style>,
    /// Per sheet: local style index -> `cellXfs` index
    sheet_maps: Vec<HashMap<u32, u32>>,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut xfs = Interned::starting_with(Style::default());

        let sheet_maps = workbook
            .worksheets()
            .map(|sheet| {
                let mut map = HashMap::from([(0, 0)]);
                for (_, _, cell) in sheet.iter_cells() {
                    if map.contains_key(&cell.style_index) {
                        continue;
                    }
                    let style = sheet
                        .style_by_index(cell.style_index)
                        .cloned()
                        .unwrap_or_default();
                    map.insert(cell.style_index, xfs.id(&style));
                }
                map
            })
            .collect();

        Self {
            xfs: xfs.items,
            sheet_maps,
        }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|map| map.get(&local_style_index))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn len(&self) -> usize {
        self.xfs.len()
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut fonts = Interned::starting_with(FontStyle::default());
        let mut fills: Interned<Color> = Interned::new();
        let mut borders = Interned::starting_with(BorderStyle::None);

        let mut cell_xfs = String::new();
        for style in &self.xfs {
            let font_id = fonts.id(&style.font);
            let fill_id = style
                .fill
                .map_or(0, |color| RESERVED_FILLS + fills.id(&color));
            let border_id = borders.id(&style.border);
            cell_xfs.push_str("\n    ");
            cell_xfs.push_str(&xf_xml(style, font_id, fill_id, border_id));
        }

        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.items.len()));
        for font in &fonts.items {
            xml.push_str("\n    ");
            xml.push_str(&font_xml(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!(
            "\n  <fills count=\"{}\">\n    <fill><patternFill patternType=\"none\"/></fill>\n    <fill><patternFill patternType=\"gray125\"/></fill>",
            RESERVED_FILLS as usize + fills.items.len()
        ));
        for color in &fills.items {
            xml.push_str(&format!(
                "\n    <fill><patternFill patternType=\"solid\"><fgColor rgb=\"{}\"/><bgColor indexed=\"64\"/></patternFill></fill>",
                color.to_argb_hex()
            ));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.items.len()));
        for border in &borders.items {
            xml.push_str("\n    ");
            xml.push_str(&border_xml(border));
        }
        xml.push_str("\n  </borders>");

        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );
        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.xfs.len()));
        xml.push_str(&cell_xfs);
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

fn font_xml(font: &FontStyle) -> String {
    format!(
        "<font>{}<sz val=\"{}\"/><name val=\"{}\"/></font>",
        if font.bold { "<b/>" } else { "" },
        font.size,
        DEFAULT_FONT_NAME
    )
}

fn border_xml(border: &BorderStyle) -> String {
    match border {
        BorderStyle::None => "<border><left/><right/><top/><bottom/><diagonal/></border>".to_string(),
        BorderStyle::Thin(color) => {
            let edge = |tag: &str| {
                format!(
                    "<{tag} style=\"thin\"><color rgb=\"{}\"/></{tag}>",
                    color.to_argb_hex()
                )
            };
            format!(
                "<border>{}{}{}{}<diagonal/></border>",
                edge("left"),
                edge("right"),
                edge("top"),
                edge("bottom")
            )
        }
    }
}

fn xf_xml(style: &Style, font_id: u32, fill_id: u32, border_id: u32) -> String {
    let mut xf = format!(
        "<xf numFmtId=\"0\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"",
        font_id, fill_id, border_id
    );
    if style.font != FontStyle::default() {
        xf.push_str(" applyFont=\"1\"");
    }
    if style.fill.is_some() {
        xf.push_str(" applyFill=\"1\"");
    }
    if !style.border.is_none() {
        xf.push_str(" applyBorder=\"1\"");
    }
    match style.horizontal {
        HorizontalAlignment::General => xf.push_str("/>"),
        HorizontalAlignment::Center => {
            xf.push_str(" applyAlignment=\"1\"><alignment horizontal=\"center\"/></xf>")
        }
    }
    xf
}
