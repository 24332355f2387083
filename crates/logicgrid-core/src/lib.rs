//! Core engine for decoded logic-grid puzzle datasets.
//!
//! The dataset is a JSON array of compact puzzle records: topology directives
//! (merged edges, holes), per-rule cell-index lists, packed corner locations
//! for galaxy/lotus decorations, and an optional solver verdict. This crate
//! turns one record into a fully expanded, renderable grid model
//! ([`NormalizedGrid`]) and derives the ordering used to group puzzles by
//! dimensions for display.

mod normalize;
mod order;
mod pattern;
mod puzzle;

pub use normalize::{
    decode_corner, decode_merge_edge, normalize, Cell, Corner, CornerAnchor, Dart, DisplayRule,
    ErrorKind, LotusAnchor, MergeEdge, Merges, Myopia, NormalizeError, NormalizedGrid,
};
pub use order::{build_groups, rule_signature, sort_puzzles, SizeGroup};
pub use pattern::{PatternRef, CONNECT_ALL_DARK_PATTERN, CONNECT_ALL_LIGHT_PATTERN};
pub use puzzle::{CellColor, RawPattern, RawPuzzle, RawSolution, RuleDirective, TopologyDirective};
