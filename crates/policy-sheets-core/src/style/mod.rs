//! Cell formatting
//!
//! Only what a report sheet uses: bold and sized fonts, solid fills,
//! uniform borders and horizontal centering. Styles are plain values
//! compared by equality and pooled per worksheet by [`StylePool`].

mod color;
mod pool;

pub use color::Color;
pub use pool::StylePool;

use std::hash::{Hash, Hasher};

/// Font family written for every font
pub const DEFAULT_FONT_NAME: &str = "Calibri";

/// Font size in points when none is set
pub const DEFAULT_FONT_SIZE: f64 = 11.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontStyle {
    pub bold: bool,
    /// Size in points
    pub size: f64,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            bold: false,
            size: DEFAULT_FONT_SIZE,
        }
    }
}

impl Eq for FontStyle {}

impl Hash for FontStyle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bold.hash(state);
        self.size.to_bits().hash(state);
    }
}

/// Line drawn on all four edges of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    #[default]
    None,
    Thin(Color),
}

impl BorderStyle {
    /// Thin black line
    pub fn thin() -> Self {
        BorderStyle::Thin(Color::BLACK)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, BorderStyle::None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// Text left, numbers right
    #[default]
    General,
    Center,
}

/// Complete cell style
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub font: FontStyle,
    /// Solid background; `None` leaves the cell unfilled
    pub fill: Option<Color>,
    pub border: BorderStyle,
    pub horizontal: HorizontalAlignment,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    /// Font size in points
    pub fn font_size(mut self, size: f64) -> Self {
        self.font.size = size;
        self
    }

    pub fn fill_color(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    pub fn horizontal_alignment(mut self, align: HorizontalAlignment) -> Self {
        self.horizontal = align;
        self
    }

    pub fn is_default(&self) -> bool {
        self == &Style::default()
    }
}
