use crate::puzzle::CellColor;

/// A small fixed pattern used as a rule glyph. Pure data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRef {
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` entries; `Unknown` renders as empty.
    pub cells: &'static [CellColor],
}

impl PatternRef {
    pub fn cell(&self, row: usize, col: usize) -> CellColor {
        self.cells[row * self.cols + col]
    }
}

const L: CellColor = CellColor::Light;
const D: CellColor = CellColor::Dark;
const E: CellColor = CellColor::Unknown;

/// Glyph for the `connect_all_dark` rule: a winding connected dark path.
#[rustfmt::skip]
pub const CONNECT_ALL_DARK_PATTERN: PatternRef = PatternRef {
    rows: 5,
    cols: 5,
    cells: &[
        D, D, D, D, E,
        E, E, E, D, E,
        E, D, D, D, E,
        E, D, E, E, E,
        E, D, D, D, D,
    ],
};

/// Glyph for the `connect_all_light` rule: the same path in light cells.
#[rustfmt::skip]
pub const CONNECT_ALL_LIGHT_PATTERN: PatternRef = PatternRef {
    rows: 5,
    cols: 5,
    cells: &[
        L, L, L, L, E,
        E, E, E, L, E,
        E, L, L, L, E,
        E, L, E, E, E,
        E, L, L, L, L,
    ],
};
