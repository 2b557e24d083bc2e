//! Per-worksheet style interning

use ahash::AHashMap;

use super::Style;

/// Styles used by one worksheet
///
/// Cells refer to styles by index. Index 0 is the default style, and new
/// styles are numbered in first-use order so the written styles part does
/// not depend on hash order.
#[derive(Debug)]
pub struct StylePool {
    styles: Vec<Style>,
    lookup: AHashMap<Style, u32>,
}

impl StylePool {
    pub fn new() -> Self {
        let default = Style::default();
        let mut lookup = AHashMap::new();
        lookup.insert(default.clone(), 0);
        Self {
            styles: vec![default],
            lookup,
        }
    }

    /// Index of `style`, adding it on first use
    pub fn get_or_insert(&mut self, style: Style) -> u32 {
        if let Some(&index) = self.lookup.get(&style) {
            return index;
        }
        let index = self.styles.len() as u32;
        self.lookup.insert(style.clone(), index);
        self.styles.push(style);
        index
    }

    pub fn get(&self, index: u32) -> Option<&Style> {
        self.styles.get(index as usize)
    }

    /// Number of styles, the default included
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether only the default style is present
    pub fn is_empty(&self) -> bool {
        self.styles.len() == 1
    }
}

impl Default for StylePool {
    fn default() -> Self {
        Self::new()
    }
}
