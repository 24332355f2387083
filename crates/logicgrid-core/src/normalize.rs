use crate::puzzle::{
    CellColor, RawPattern, RawPuzzle, RawSolution, RuleDirective, TopologyDirective,
};
use serde_json::Value;
use std::fmt;

/// Which of a cell's four borders are not drawn because the neighbor belongs
/// to the same visual region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Merges {
    pub above: bool,
    pub left: bool,
    pub right: bool,
    pub below: bool,
}

/// Dart clue: a number plus the direction code it points in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dart {
    pub clue: u32,
    pub direction: u8,
}

/// Myopia clue: bitmask of directions that are "blocked" for the cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Myopia(u8);

impl Myopia {
    pub const UP: u8 = 1;
    pub const DOWN: u8 = 2;
    pub const LEFT: u8 = 4;
    pub const RIGHT: u8 = 8;

    pub fn from_bits(bits: u8) -> Myopia {
        Myopia(bits)
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    pub fn up(&self) -> bool {
        self.0 & Self::UP != 0
    }

    pub fn down(&self) -> bool {
        self.0 & Self::DOWN != 0
    }

    pub fn left(&self) -> bool {
        self.0 & Self::LEFT != 0
    }

    pub fn right(&self) -> bool {
        self.0 & Self::RIGHT != 0
    }
}

/// Galaxy-center marker anchored at one of a cell's four internal corners.
///
/// `sub_row`/`sub_col` are 0 (top/left edge of the cell) or 1 (center).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerAnchor {
    pub sub_row: u8,
    pub sub_col: u8,
}

/// Lotus marker: corner anchor plus an orientation code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LotusAnchor {
    pub sub_row: u8,
    pub sub_col: u8,
    pub direction: u8,
}

/// One fully expanded cell of a normalized grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// False marks a hole in the topology, a position with no playable cell.
    pub exists: bool,
    /// The given shading, not the solution.
    pub color: CellColor,
    /// Solution shading, `Unknown` until a solution is applied.
    pub solution: CellColor,
    pub area: Option<u32>,
    pub viewpoint: Option<u32>,
    pub dart: Option<Dart>,
    pub myopia: Option<Myopia>,
    pub galaxies: Vec<CornerAnchor>,
    pub lotuses: Vec<LotusAnchor>,
    pub letter: Option<char>,
    pub merges: Merges,
}

impl Cell {
    fn blank(row: usize, col: usize) -> Cell {
        Cell {
            row,
            col,
            exists: true,
            color: CellColor::Unknown,
            solution: CellColor::Unknown,
            area: None,
            viewpoint: None,
            dart: None,
            myopia: None,
            galaxies: Vec::new(),
            lotuses: Vec::new(),
            letter: None,
            merges: Merges::default(),
        }
    }
}

/// Rule retained for display after normalization. Cell-index-bearing rules
/// never reach this enum; they are consumed into [`Cell`]s.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayRule {
    /// One forbidden sub-pattern, expanded from a `ban_patterns` directive.
    BanPattern(RawPattern),
    ConnectAllLight,
    ConnectAllDark,
    OneSymbolPerLight,
    OneSymbolPerDark,
    LightShapesDistinct,
    DarkShapesDistinct,
    LightShapesSame,
    DarkShapesSame,
    LightArea(u32),
    DarkArea(u32),
    /// Synthesized marker: the puzzle has multiple valid solutions.
    Underconstrained,
    /// Unrecognized input rule, forwarded verbatim.
    Other { tag: String, payload: Vec<Value> },
}

/// Fully expanded, renderable grid model. Built once per record and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedGrid {
    pub pid: u64,
    pub difficulty: u32,
    pub rows: usize,
    pub cols: usize,
    /// Row-major, `rows * cols` entries; index `row * cols + col`.
    pub cells: Vec<Cell>,
    pub rules: Vec<DisplayRule>,
}

impl NormalizedGrid {
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[row * self.cols + col]
    }
}

/// Contract violation in one record's payload. The record is skipped; sibling
/// records are unaffected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeError {
    /// Identifier of the offending puzzle.
    pub pid: u64,
    pub kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A rule or hole referenced a cell index outside `rows * cols`.
    CellIndex { index: usize, len: usize },
    /// A merge directive carried an edge id that decodes outside the grid.
    EdgeIndex { edge: u64 },
    /// A galaxy/lotus corner location decodes outside the grid.
    CornerIndex { location: u64 },
    /// Solution length does not match `rows * cols`.
    SolutionLength { actual: usize, expected: usize },
    /// A letters clue carried an ordinal past 'Z'.
    LetterValue { value: u8 },
}

impl fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "puzzle #{}: ", self.pid)?;
        match &self.kind {
            ErrorKind::CellIndex { index, len } => {
                write!(f, "cell index {index} out of range for {len} cells")
            }
            ErrorKind::EdgeIndex { edge } => {
                write!(f, "merge edge {edge} decodes outside the grid")
            }
            ErrorKind::CornerIndex { location } => {
                write!(f, "corner location {location} decodes outside the grid")
            }
            ErrorKind::SolutionLength { actual, expected } => {
                write!(f, "solution has {actual} cells, expected {expected}")
            }
            ErrorKind::LetterValue { value } => {
                write!(f, "letter ordinal {value} is past 'Z'")
            }
        }
    }
}

impl std::error::Error for NormalizeError {}

/// A decoded merge edge: the cell it belongs to plus the direction of the
/// neighbor it merges with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeEdge {
    Right { row: usize, col: usize },
    Down { row: usize, col: usize },
}

/// Decode one packed edge id from a `merge` directive.
///
/// Edge ids linearize all interior and boundary edges of the cell grid in
/// row bands of `2 * cols + 1` slots: the first `cols + 1` slots of a band
/// are the vertical separators of that row (merge-right edges), the rest the
/// horizontal separators below it (merge-down edges). The raw id carries an
/// orientation sub-bit in its lowest bit, dropped by halving.
///
/// Returns `None` when the id lands outside the grid (including the
/// slot left of column 0, which no cell owns).
pub fn decode_merge_edge(edge: u64, rows: usize, cols: usize) -> Option<MergeEdge> {
    let edge_id = (edge / 2) as i64;
    let cols = cols as i64;
    let band = 2 * cols + 1;
    let row = (edge_id - cols).div_euclid(band);
    let offset = edge_id - cols - row * band;
    if row < 0 || row >= rows as i64 {
        return None;
    }
    if offset < cols + 1 {
        let col = offset - 1;
        if col < 0 {
            return None;
        }
        Some(MergeEdge::Right {
            row: row as usize,
            col: col as usize,
        })
    } else {
        let col = offset - cols - 1;
        if col >= cols {
            return None;
        }
        Some(MergeEdge::Down {
            row: row as usize,
            col: col as usize,
        })
    }
}

/// A decoded corner-grid location: owning cell plus 2x2 sub-position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Corner {
    pub cell_row: usize,
    pub cell_col: usize,
    pub sub_row: u8,
    pub sub_col: u8,
}

/// Decode a packed location in the `(2*rows+1) x (2*cols+1)` virtual corner
/// grid, row-major. The owning cell is the floor-halved position; the
/// sub-position is the parity. Locations on the bottom/right boundary decode
/// to `cell_row == rows` / `cell_col == cols`; callers bounds-check before
/// applying.
pub fn decode_corner(location: u64, cols: usize) -> Corner {
    let band = 2 * cols as u64 + 1;
    let row = location / band;
    let col = location % band;
    Corner {
        cell_row: (row / 2) as usize,
        cell_col: (col / 2) as usize,
        sub_row: (row % 2) as u8,
        sub_col: (col % 2) as u8,
    }
}

/// Expand one raw record into its renderable grid model.
///
/// Pure and deterministic: topology directives are applied first (holes,
/// merge intents), merges are finalized, then rule directives are consumed
/// in order, and finally the solution is copied in. Out-of-range indices in
/// any payload fail the record with a [`NormalizeError`].
pub fn normalize(raw: &RawPuzzle) -> Result<NormalizedGrid, NormalizeError> {
    let len = raw.rows * raw.cols;
    let fail = |kind| NormalizeError { pid: raw.pid, kind };

    let mut cells: Vec<Cell> = (0..len)
        .map(|i| Cell::blank(i / raw.cols, i % raw.cols))
        .collect();
    let mut merge_right = vec![false; len];
    let mut merge_down = vec![false; len];

    for directive in &raw.topology {
        match directive {
            TopologyDirective::Hole(holes) => {
                for &index in holes {
                    cell_mut(&mut cells, raw.pid, index)?.exists = false;
                }
            }
            TopologyDirective::Merge(edges) => {
                for &edge in edges {
                    match decode_merge_edge(edge, raw.rows, raw.cols) {
                        Some(MergeEdge::Right { row, col }) => {
                            merge_right[row * raw.cols + col] = true;
                        }
                        Some(MergeEdge::Down { row, col }) => {
                            merge_down[row * raw.cols + col] = true;
                        }
                        None => return Err(fail(ErrorKind::EdgeIndex { edge })),
                    }
                }
            }
        }
    }

    // left/above copy the neighbor's intent, guarded by the grid edge and the
    // neighbor's existence; right/below take the cell's own intent unguarded.
    for i in 0..len {
        let left = i % raw.cols > 0 && cells[i - 1].exists && merge_right[i - 1];
        let above = i >= raw.cols && cells[i - raw.cols].exists && merge_down[i - raw.cols];
        cells[i].merges = Merges {
            above,
            left,
            right: merge_right[i],
            below: merge_down[i],
        };
    }

    let mut rules = Vec::new();
    for rule in &raw.rules {
        match rule {
            RuleDirective::Light(indices) => {
                for &index in indices {
                    cell_mut(&mut cells, raw.pid, index)?.color = CellColor::Light;
                }
            }
            RuleDirective::Dark(indices) => {
                for &index in indices {
                    cell_mut(&mut cells, raw.pid, index)?.color = CellColor::Dark;
                }
            }
            RuleDirective::Area(clues) => {
                for &(index, value) in clues {
                    cell_mut(&mut cells, raw.pid, index)?.area = Some(value);
                }
            }
            RuleDirective::Viewpoint(clues) => {
                for &(index, value) in clues {
                    cell_mut(&mut cells, raw.pid, index)?.viewpoint = Some(value);
                }
            }
            RuleDirective::Dart(clues) => {
                for &(index, clue, direction) in clues {
                    cell_mut(&mut cells, raw.pid, index)?.dart = Some(Dart { clue, direction });
                }
            }
            RuleDirective::Myopia(clues) => {
                for &(index, bits) in clues {
                    cell_mut(&mut cells, raw.pid, index)?.myopia = Some(Myopia::from_bits(bits));
                }
            }
            RuleDirective::Galaxy(locations) => {
                for &location in locations {
                    let corner = decode_corner(location, raw.cols);
                    if corner.cell_row >= raw.rows || corner.cell_col >= raw.cols {
                        return Err(fail(ErrorKind::CornerIndex { location }));
                    }
                    cells[corner.cell_row * raw.cols + corner.cell_col]
                        .galaxies
                        .push(CornerAnchor {
                            sub_row: corner.sub_row,
                            sub_col: corner.sub_col,
                        });
                }
            }
            RuleDirective::Lotus(markers) => {
                for &(location, direction) in markers {
                    let corner = decode_corner(location, raw.cols);
                    if corner.cell_row >= raw.rows || corner.cell_col >= raw.cols {
                        return Err(fail(ErrorKind::CornerIndex { location }));
                    }
                    cells[corner.cell_row * raw.cols + corner.cell_col]
                        .lotuses
                        .push(LotusAnchor {
                            sub_row: corner.sub_row,
                            sub_col: corner.sub_col,
                            direction,
                        });
                }
            }
            RuleDirective::Letters(clues) => {
                for &(index, value) in clues {
                    if value > 25 {
                        return Err(fail(ErrorKind::LetterValue { value }));
                    }
                    cell_mut(&mut cells, raw.pid, index)?.letter = Some((b'A' + value) as char);
                }
            }
            RuleDirective::BanPatterns(patterns) => {
                for pattern in patterns {
                    rules.push(DisplayRule::BanPattern(pattern.clone()));
                }
            }
            RuleDirective::ConnectAllLight => rules.push(DisplayRule::ConnectAllLight),
            RuleDirective::ConnectAllDark => rules.push(DisplayRule::ConnectAllDark),
            RuleDirective::OneSymbolPerLight => rules.push(DisplayRule::OneSymbolPerLight),
            RuleDirective::OneSymbolPerDark => rules.push(DisplayRule::OneSymbolPerDark),
            RuleDirective::LightShapesDistinct => rules.push(DisplayRule::LightShapesDistinct),
            RuleDirective::DarkShapesDistinct => rules.push(DisplayRule::DarkShapesDistinct),
            RuleDirective::LightShapesSame => rules.push(DisplayRule::LightShapesSame),
            RuleDirective::DarkShapesSame => rules.push(DisplayRule::DarkShapesSame),
            RuleDirective::LightArea(area) => rules.push(DisplayRule::LightArea(*area)),
            RuleDirective::DarkArea(area) => rules.push(DisplayRule::DarkArea(*area)),
            RuleDirective::Other { tag, payload } => rules.push(DisplayRule::Other {
                tag: tag.clone(),
                payload: payload.clone(),
            }),
        }
    }

    if let Some(solution) = &raw.solution {
        let per_cell = solution.cells();
        if per_cell.len() != len {
            return Err(fail(ErrorKind::SolutionLength {
                actual: per_cell.len(),
                expected: len,
            }));
        }
        if solution.status() == RawSolution::UNDERCONSTRAINED {
            rules.push(DisplayRule::Underconstrained);
        }
        for (cell, &code) in cells.iter_mut().zip(per_cell) {
            cell.solution = CellColor::from_code(code);
        }
    }

    Ok(NormalizedGrid {
        pid: raw.pid,
        difficulty: raw.difficulty,
        rows: raw.rows,
        cols: raw.cols,
        cells,
        rules,
    })
}

fn cell_mut(cells: &mut [Cell], pid: u64, index: usize) -> Result<&mut Cell, NormalizeError> {
    let len = cells.len();
    cells.get_mut(index).ok_or(NormalizeError {
        pid,
        kind: ErrorKind::CellIndex { index, len },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::RawSolution;

    fn raw(rows: usize, cols: usize) -> RawPuzzle {
        RawPuzzle {
            pid: 1,
            difficulty: 1,
            rows,
            cols,
            topology: Vec::new(),
            rules: Vec::new(),
            solution: None,
        }
    }

    /// Re-encode a decoded merge edge the way the producer packs it, so the
    /// decode can be checked by round-trip.
    fn encode_merge_edge(edge: MergeEdge, cols: usize) -> u64 {
        let band = 2 * cols as u64 + 1;
        let edge_id = match edge {
            MergeEdge::Right { row, col } => {
                cols as u64 + row as u64 * band + col as u64 + 1
            }
            MergeEdge::Down { row, col } => {
                cols as u64 + row as u64 * band + cols as u64 + 1 + col as u64
            }
        };
        edge_id * 2
    }

    #[test]
    fn test_cell_count_invariant() {
        let grid = normalize(&raw(3, 4)).unwrap();
        assert_eq!(grid.cells.len(), 12);
        for (i, cell) in grid.cells.iter().enumerate() {
            assert_eq!((cell.row, cell.col), (i / 4, i % 4));
            assert!(cell.exists);
            assert_eq!(cell.color, CellColor::Unknown);
            assert_eq!(cell.solution, CellColor::Unknown);
            assert_eq!(cell.merges, Merges::default());
        }
    }

    #[test]
    fn test_merge_edge_decode_all_quadrants() {
        // 3x4 grid: check decode against re-encode at every corner of the
        // grid, both orientations.
        let (rows, cols) = (3, 4);
        for row in 0..rows {
            for col in 0..cols {
                for edge in [MergeEdge::Right { row, col }, MergeEdge::Down { row, col }] {
                    let packed = encode_merge_edge(edge, cols);
                    assert_eq!(
                        decode_merge_edge(packed, rows, cols),
                        Some(edge),
                        "row {row} col {col}"
                    );
                    // The orientation sub-bit is ignored.
                    assert_eq!(decode_merge_edge(packed + 1, rows, cols), Some(edge));
                }
            }
        }
    }

    #[test]
    fn test_merge_edge_decode_rejects_outside() {
        // Slot left of column 0 in row 1 of a 2x2 grid.
        let band = 2 * 2 + 1;
        assert_eq!(decode_merge_edge((2 + band) * 2, 2, 2), None);
        // Beyond the last row band.
        assert_eq!(decode_merge_edge((2 + 2 * band + 4) * 2, 2, 2), None);
        // Top boundary slots, above row 0.
        assert_eq!(decode_merge_edge(0, 2, 2), None);
    }

    #[test]
    fn test_merge_symmetry_and_unguarded_right() {
        let mut puzzle = raw(2, 3);
        // Merge cell 0 with cell 1, and cell 2 (last column) rightwards.
        puzzle.topology = vec![TopologyDirective::Merge(vec![
            encode_merge_edge(MergeEdge::Right { row: 0, col: 0 }, 3),
            encode_merge_edge(MergeEdge::Right { row: 0, col: 2 }, 3),
            encode_merge_edge(MergeEdge::Down { row: 0, col: 1 }, 3),
        ])];
        let grid = normalize(&puzzle).unwrap();
        assert!(grid.cells[0].merges.right);
        assert!(grid.cells[1].merges.left);
        assert!(grid.cells[1].merges.below);
        assert!(grid.cells[4].merges.above);
        // A merge-right on the last column has no neighbor to mirror it but
        // keeps the cell's own flag.
        assert!(grid.cells[2].merges.right);
        assert!(!grid.cells[0].merges.left);
        assert!(!grid.cells[0].merges.above);
    }

    #[test]
    fn test_hole_blocks_inherited_merges() {
        let mut puzzle = raw(2, 2);
        puzzle.topology = vec![
            TopologyDirective::Merge(vec![
                encode_merge_edge(MergeEdge::Right { row: 0, col: 0 }, 2),
                encode_merge_edge(MergeEdge::Down { row: 0, col: 1 }, 2),
            ]),
            TopologyDirective::Hole(vec![0, 1]),
        ];
        let grid = normalize(&puzzle).unwrap();
        assert!(!grid.cells[0].exists);
        assert!(!grid.cells[1].exists);
        // The hole keeps its own intent flag but neighbors do not inherit it.
        assert!(grid.cells[0].merges.right);
        assert!(!grid.cells[1].merges.left);
        assert!(!grid.cells[3].merges.above);
    }

    #[test]
    fn test_corner_decode_round_trip() {
        let (rows, cols) = (3, 4);
        for row in 0..=(2 * rows as u64) {
            for col in 0..=(2 * cols as u64) {
                let location = row * (2 * cols as u64 + 1) + col;
                let corner = decode_corner(location, cols);
                assert_eq!(corner.cell_row as u64, row / 2);
                assert_eq!(corner.cell_col as u64, col / 2);
                assert_eq!(corner.sub_row as u64, row % 2);
                assert_eq!(corner.sub_col as u64, col % 2);
            }
        }
    }

    #[test]
    fn test_galaxy_and_lotus_anchors() {
        let mut puzzle = raw(2, 2);
        // Corner grid is 5x5. Location 6 = (row 1, col 1): cell (0,0), sub
        // (1,1). Location 12 = (row 2, col 2): cell (1,1), sub (0,0).
        puzzle.rules = vec![
            RuleDirective::Galaxy(vec![6, 12]),
            RuleDirective::Lotus(vec![(6, 3)]),
        ];
        let grid = normalize(&puzzle).unwrap();
        assert_eq!(
            grid.cell(0, 0).galaxies,
            vec![CornerAnchor { sub_row: 1, sub_col: 1 }]
        );
        assert_eq!(
            grid.cell(1, 1).galaxies,
            vec![CornerAnchor { sub_row: 0, sub_col: 0 }]
        );
        assert_eq!(
            grid.cell(0, 0).lotuses,
            vec![LotusAnchor { sub_row: 1, sub_col: 1, direction: 3 }]
        );
    }

    #[test]
    fn test_corner_on_bottom_boundary_fails() {
        let mut puzzle = raw(2, 2);
        // Row 4 of the 5x5 corner grid decodes to cell_row == rows.
        puzzle.rules = vec![RuleDirective::Galaxy(vec![4 * 5])];
        let err = normalize(&puzzle).unwrap_err();
        assert_eq!(err.kind, ErrorKind::CornerIndex { location: 20 });
    }

    #[test]
    fn test_color_and_clue_rules() {
        let mut puzzle = raw(2, 3);
        puzzle.rules = vec![
            RuleDirective::Light(vec![0, 4]),
            RuleDirective::Dark(vec![1]),
            RuleDirective::Area(vec![(2, 7)]),
            RuleDirective::Viewpoint(vec![(3, 4)]),
            RuleDirective::Dart(vec![(5, 2, 6)]),
            RuleDirective::Myopia(vec![(0, 0b1010)]),
        ];
        let grid = normalize(&puzzle).unwrap();
        assert_eq!(grid.cells[0].color, CellColor::Light);
        assert_eq!(grid.cells[4].color, CellColor::Light);
        assert_eq!(grid.cells[1].color, CellColor::Dark);
        assert_eq!(grid.cells[2].area, Some(7));
        assert_eq!(grid.cells[3].viewpoint, Some(4));
        assert_eq!(grid.cells[5].dart, Some(Dart { clue: 2, direction: 6 }));
        let myopia = grid.cells[0].myopia.unwrap();
        assert!(!myopia.up() && myopia.down() && !myopia.left() && myopia.right());
        // All index-bearing rules were consumed into cells.
        assert!(grid.rules.is_empty());
    }

    #[test]
    fn test_letters_decode() {
        let mut puzzle = raw(2, 3);
        puzzle.rules = vec![RuleDirective::Letters(vec![(0, 0), (5, 25)])];
        let grid = normalize(&puzzle).unwrap();
        assert_eq!(grid.cells[0].letter, Some('A'));
        assert_eq!(grid.cells[5].letter, Some('Z'));

        puzzle.rules = vec![RuleDirective::Letters(vec![(0, 26)])];
        let err = normalize(&puzzle).unwrap_err();
        assert_eq!(err.kind, ErrorKind::LetterValue { value: 26 });
    }

    #[test]
    fn test_ban_patterns_expand_in_order() {
        let p1 = RawPattern(1, 2, vec!["LD".into()], vec![0, 1]);
        let p2 = RawPattern(2, 1, vec!["D".into(), "L".into()], vec![1, 0]);
        let mut puzzle = raw(2, 2);
        puzzle.rules = vec![RuleDirective::BanPatterns(vec![p1.clone(), p2.clone()])];
        let grid = normalize(&puzzle).unwrap();
        assert_eq!(
            grid.rules,
            vec![DisplayRule::BanPattern(p1), DisplayRule::BanPattern(p2)]
        );
    }

    #[test]
    fn test_display_rules_pass_through_in_order() {
        let mut puzzle = raw(2, 2);
        puzzle.rules = vec![
            RuleDirective::ConnectAllDark,
            RuleDirective::LightArea(3),
            RuleDirective::Other {
                tag: "unknown_rule_0x7f".into(),
                payload: Vec::new(),
            },
        ];
        let grid = normalize(&puzzle).unwrap();
        assert_eq!(grid.rules.len(), 3);
        assert_eq!(grid.rules[0], DisplayRule::ConnectAllDark);
        assert_eq!(grid.rules[1], DisplayRule::LightArea(3));
        assert_eq!(
            grid.rules[2],
            DisplayRule::Other {
                tag: "unknown_rule_0x7f".into(),
                payload: Vec::new(),
            }
        );
    }

    #[test]
    fn test_solution_application() {
        let mut puzzle = raw(2, 2);
        puzzle.solution = Some(RawSolution(1, Vec::new(), vec![0, 1, 1, 0]));
        let grid = normalize(&puzzle).unwrap();
        assert_eq!(grid.cells[0].solution, CellColor::Light);
        assert_eq!(grid.cells[1].solution, CellColor::Dark);
        // Unique solution: no marker rule.
        assert!(grid.rules.is_empty());
        // Givens are untouched.
        assert_eq!(grid.cells[0].color, CellColor::Unknown);
    }

    #[test]
    fn test_underconstrained_marker() {
        let mut puzzle = raw(2, 2);
        puzzle.solution = Some(RawSolution(2, Vec::new(), vec![0, 1, 2, 0]));
        let grid = normalize(&puzzle).unwrap();
        let markers = grid
            .rules
            .iter()
            .filter(|r| **r == DisplayRule::Underconstrained)
            .count();
        assert_eq!(markers, 1);
        assert_eq!(grid.cells[2].solution, CellColor::Unknown);
    }

    #[test]
    fn test_solution_length_mismatch_fails() {
        let mut puzzle = raw(2, 2);
        puzzle.solution = Some(RawSolution(1, Vec::new(), vec![0, 1]));
        let err = normalize(&puzzle).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::SolutionLength {
                actual: 2,
                expected: 4
            }
        );
    }

    #[test]
    fn test_out_of_range_cell_index_fails() {
        let mut puzzle = raw(2, 2);
        puzzle.rules = vec![RuleDirective::Dark(vec![4])];
        let err = normalize(&puzzle).unwrap_err();
        assert_eq!(err.pid, 1);
        assert_eq!(err.kind, ErrorKind::CellIndex { index: 4, len: 4 });

        puzzle.rules = Vec::new();
        puzzle.topology = vec![TopologyDirective::Hole(vec![9])];
        assert!(normalize(&puzzle).is_err());
    }
}
