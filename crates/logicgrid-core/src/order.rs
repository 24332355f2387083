use crate::normalize::{normalize, NormalizeError, NormalizedGrid};
use crate::puzzle::{RawPuzzle, RuleDirective};

/// Composite ordering key over a record's rule set.
///
/// Packs the light given count, the dark given count, and a presence bitmask
/// of clue-bearing rule kinds into one comparable integer:
/// `lights * 2^20 + darks * 2^10 + mask`. Used only as a sort tiebreaker.
pub fn rule_signature(puzzle: &RawPuzzle) -> u64 {
    let mut lights = 0u64;
    let mut darks = 0u64;
    let mut mask = 0u64;
    for rule in &puzzle.rules {
        match rule {
            RuleDirective::Light(cells) => lights = cells.len() as u64,
            RuleDirective::Dark(cells) => darks = cells.len() as u64,
            RuleDirective::Area(_) => mask |= 1 << 0,
            RuleDirective::BanPatterns(_) => mask |= 1 << 1,
            RuleDirective::Letters(_) => mask |= 1 << 2,
            RuleDirective::Viewpoint(_) => mask |= 1 << 3,
            RuleDirective::Dart(_) => mask |= 1 << 4,
            RuleDirective::Galaxy(_) => mask |= 1 << 5,
            RuleDirective::Lotus(_) => mask |= 1 << 6,
            RuleDirective::Myopia(_) => mask |= 1 << 7,
            _ => {}
        }
    }
    lights * (1 << 20) + darks * (1 << 10) + mask
}

/// Sort the collection for display: ascending by area, then rows, cols,
/// difficulty, and finally the rule signature. Stable, in place.
pub fn sort_puzzles(puzzles: &mut [RawPuzzle]) {
    puzzles.sort_by_key(|p| {
        (
            p.rows * p.cols,
            p.rows,
            p.cols,
            p.difficulty,
            rule_signature(p),
        )
    });
}

/// A run of consecutive puzzles sharing the same dimensions, in sort order.
#[derive(Debug, Clone)]
pub struct SizeGroup {
    pub rows: usize,
    pub cols: usize,
    pub grids: Vec<NormalizedGrid>,
}

/// Sort, group by dimensions, and normalize a whole dataset.
///
/// Records that violate the input contract are skipped; their errors are
/// returned alongside the groups so the caller can report them without
/// losing the rest of the batch.
pub fn build_groups(mut puzzles: Vec<RawPuzzle>) -> (Vec<SizeGroup>, Vec<NormalizeError>) {
    sort_puzzles(&mut puzzles);
    let mut groups: Vec<SizeGroup> = Vec::new();
    let mut errors = Vec::new();
    for puzzle in &puzzles {
        let grid = match normalize(puzzle) {
            Ok(grid) => grid,
            Err(error) => {
                errors.push(error);
                continue;
            }
        };
        match groups.last_mut() {
            Some(group) if group.rows == grid.rows && group.cols == grid.cols => {
                group.grids.push(grid);
            }
            _ => groups.push(SizeGroup {
                rows: grid.rows,
                cols: grid.cols,
                grids: vec![grid],
            }),
        }
    }
    (groups, errors)
}
