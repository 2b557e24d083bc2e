//! ARGB colors

/// An opaque or translucent color, stored as ARGB channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Fully opaque color
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color {
            alpha: 0xFF,
            red,
            green,
            blue,
        }
    }

    /// Parse `RRGGBB` or `AARRGGBB`, with or without a leading `#`
    ///
    /// ```
    /// use policy_sheets_core::Color;
    ///
    /// assert_eq!(Color::from_hex("#D9E1F2"), Some(Color::rgb(0xD9, 0xE1, 0xF2)));
    /// assert_eq!(Color::from_hex("blue"), None);
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();

        match digits.len() {
            6 => Some(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color {
                alpha: channel(0)?,
                red: channel(2)?,
                green: channel(4)?,
                blue: channel(6)?,
            }),
            _ => None,
        }
    }

    /// Eight hex digits, alpha first, as the `rgb` attribute of XLSX expects
    pub fn to_argb_hex(&self) -> String {
        format!(
            "{:02X}{:02X}{:02X}{:02X}",
            self.alpha, self.red, self.green, self.blue
        )
    }
}
