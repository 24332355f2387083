use crossterm::style::Color;

/// Color theme for the viewer
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Light (given/solution) cell background
    pub light_cell: Color,
    /// Dark (given/solution) cell background
    pub dark_cell: Color,
    /// Unshaded cell background
    pub unknown_cell: Color,
    /// Hole (non-playable) background
    pub hole: Color,
    /// Clue glyph color on light/unshaded cells
    pub clue: Color,
    /// Clue glyph color on dark cells
    pub clue_on_dark: Color,
    /// Decoration (galaxy/lotus) color
    pub decoration: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Difficulty orb/star color
    pub difficulty: Color,
    /// Peek-active indicator color
    pub peek: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 110, g: 115, b: 135 },
            light_cell: Color::Rgb { r: 225, g: 225, b: 215 },
            dark_cell: Color::Rgb { r: 45, g: 48, b: 60 },
            unknown_cell: Color::Rgb { r: 130, g: 135, b: 150 },
            hole: Color::Rgb { r: 20, g: 22, b: 30 },
            clue: Color::Rgb { r: 25, g: 30, b: 45 },
            clue_on_dark: Color::Rgb { r: 235, g: 235, b: 245 },
            decoration: Color::Rgb { r: 255, g: 160, b: 90 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            difficulty: Color::Rgb { r: 255, g: 180, b: 70 },
            peek: Color::Rgb { r: 90, g: 255, b: 130 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 120, g: 120, b: 140 },
            light_cell: Color::Rgb { r: 255, g: 255, b: 250 },
            dark_cell: Color::Rgb { r: 70, g: 75, b: 90 },
            unknown_cell: Color::Rgb { r: 190, g: 192, b: 205 },
            hole: Color::Rgb { r: 248, g: 248, b: 252 },
            clue: Color::Rgb { r: 20, g: 20, b: 30 },
            clue_on_dark: Color::Rgb { r: 245, g: 245, b: 250 },
            decoration: Color::Rgb { r: 200, g: 90, b: 20 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
            difficulty: Color::Rgb { r: 210, g: 140, b: 30 },
            peek: Color::Rgb { r: 40, g: 160, b: 60 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::White,
            light_cell: Color::White,
            dark_cell: Color::DarkGrey,
            unknown_cell: Color::Grey,
            hole: Color::Black,
            clue: Color::Black,
            clue_on_dark: Color::White,
            decoration: Color::Magenta,
            info: Color::Grey,
            key: Color::Yellow,
            difficulty: Color::Yellow,
            peek: Color::Green,
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            "high-contrast" => Some(Self::high_contrast()),
            _ => None,
        }
    }
}
