use serde::de::{self, IgnoredAny, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// Tri-state cell shading, shared by givens, solutions, and patterns.
///
/// The wire encoding is 0 = light, 1 = dark, 2 = unknown/empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    Light,
    Dark,
    Unknown,
}

impl CellColor {
    /// Decode a wire color code. Codes other than 0 and 1 mean "unknown".
    pub fn from_code(code: u8) -> CellColor {
        match code {
            0 => CellColor::Light,
            1 => CellColor::Dark,
            _ => CellColor::Unknown,
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            CellColor::Light => 0,
            CellColor::Dark => 1,
            CellColor::Unknown => 2,
        }
    }
}

/// One puzzle record as it appears in the decoded dataset.
///
/// Extra fields emitted by the dataset producer (`kind`, `error`,
/// `remainder`) are ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPuzzle {
    pub pid: u64,
    pub difficulty: u32,
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub topology: Vec<TopologyDirective>,
    #[serde(default)]
    pub rules: Vec<RuleDirective>,
    #[serde(default)]
    pub solution: Option<RawSolution>,
}

/// Solver verdict attached to a record: `[status, rowStrings, perCell]`.
///
/// `rowStrings` is a redundant human-readable rendering of `perCell` and is
/// kept only because the producer emits it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSolution(pub u8, pub Vec<String>, pub Vec<u8>);

impl RawSolution {
    /// Status value meaning "multiple valid solutions exist".
    pub const UNDERCONSTRAINED: u8 = 2;

    pub fn status(&self) -> u8 {
        self.0
    }

    /// Flat per-cell solution colors, row-major, `rows * cols` entries.
    pub fn cells(&self) -> &[u8] {
        &self.2
    }
}

/// Grid-shape directive: `["merge", edges]` or `["hole", cells]`.
///
/// The producer emits no other topology tags, so this enum is closed and an
/// unknown tag is a deserialization error.
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyDirective {
    /// Packed edge ids of cell boundaries that are not drawn (see
    /// [`decode_merge_edge`](crate::decode_merge_edge)).
    Merge(Vec<u64>),
    /// Cell indices with no playable cell.
    Hole(Vec<usize>),
}

/// One forbidden sub-pattern: `[rows, cols, rowStrings, cellValues]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPattern(pub usize, pub usize, pub Vec<String>, pub Vec<u8>);

impl RawPattern {
    pub fn rows(&self) -> usize {
        self.0
    }

    pub fn cols(&self) -> usize {
        self.1
    }

    /// Pattern cell color codes, row-major.
    pub fn cells(&self) -> &[u8] {
        &self.3
    }
}

/// One rule directive from a record, `[tag]` or `[tag, payload]`.
///
/// Tags with cell-index payloads are consumed into cells during
/// normalization; the rest survive as display rules. Tags outside the known
/// vocabulary are preserved verbatim in [`RuleDirective::Other`].
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDirective {
    /// Cell indices shaded light as givens.
    Light(Vec<usize>),
    /// Cell indices shaded dark as givens.
    Dark(Vec<usize>),
    /// `(cell, region area)` clues.
    Area(Vec<(usize, u32)>),
    /// `(cell, visible-cell count)` clues.
    Viewpoint(Vec<(usize, u32)>),
    /// `(cell, clue number, direction code)` clues.
    Dart(Vec<(usize, u32, u8)>),
    /// `(cell, blocked-direction bitmask)` clues.
    Myopia(Vec<(usize, u8)>),
    /// Packed corner locations of galaxy centers.
    Galaxy(Vec<u64>),
    /// `(packed corner location, direction code)` lotus markers.
    Lotus(Vec<(u64, u8)>),
    /// `(cell, letter ordinal)` clues, 0 = 'A'.
    Letters(Vec<(usize, u8)>),
    BanPatterns(Vec<RawPattern>),
    ConnectAllLight,
    ConnectAllDark,
    OneSymbolPerLight,
    OneSymbolPerDark,
    LightShapesDistinct,
    DarkShapesDistinct,
    LightShapesSame,
    DarkShapesSame,
    /// All light regions have this area.
    LightArea(u32),
    /// All dark regions have this area.
    DarkArea(u32),
    /// Unrecognized tag, forwarded untouched.
    Other { tag: String, payload: Vec<Value> },
}

impl<'de> Deserialize<'de> for TopologyDirective {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TopologyVisitor;

        impl<'de> Visitor<'de> for TopologyVisitor {
            type Value = TopologyDirective;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a [tag, payload] topology directive array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<TopologyDirective, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let tag: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let directive = match tag.as_str() {
                    "merge" => TopologyDirective::Merge(required_payload(&mut seq, &tag)?),
                    "hole" => TopologyDirective::Hole(required_payload(&mut seq, &tag)?),
                    other => {
                        return Err(de::Error::unknown_variant(other, &["merge", "hole"]));
                    }
                };
                drain(&mut seq)?;
                Ok(directive)
            }
        }

        deserializer.deserialize_seq(TopologyVisitor)
    }
}

impl<'de> Deserialize<'de> for RuleDirective {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RuleVisitor;

        impl<'de> Visitor<'de> for RuleVisitor {
            type Value = RuleDirective;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a [tag, payload...] rule directive array")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<RuleDirective, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let tag: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let rule = match tag.as_str() {
                    "light" => RuleDirective::Light(required_payload(&mut seq, &tag)?),
                    "dark" => RuleDirective::Dark(required_payload(&mut seq, &tag)?),
                    "area" => RuleDirective::Area(required_payload(&mut seq, &tag)?),
                    "viewpoint" => RuleDirective::Viewpoint(required_payload(&mut seq, &tag)?),
                    "dart" => RuleDirective::Dart(required_payload(&mut seq, &tag)?),
                    "myopia" => RuleDirective::Myopia(required_payload(&mut seq, &tag)?),
                    "galaxy" => RuleDirective::Galaxy(required_payload(&mut seq, &tag)?),
                    "lotus" => RuleDirective::Lotus(required_payload(&mut seq, &tag)?),
                    "letters" => RuleDirective::Letters(required_payload(&mut seq, &tag)?),
                    "ban_patterns" => {
                        RuleDirective::BanPatterns(required_payload(&mut seq, &tag)?)
                    }
                    "light_area" => RuleDirective::LightArea(required_payload(&mut seq, &tag)?),
                    "dark_area" => RuleDirective::DarkArea(required_payload(&mut seq, &tag)?),
                    "connect_all_light" => RuleDirective::ConnectAllLight,
                    "connect_all_dark" => RuleDirective::ConnectAllDark,
                    "one_symbol_per_light" => RuleDirective::OneSymbolPerLight,
                    "one_symbol_per_dark" => RuleDirective::OneSymbolPerDark,
                    "light_shapes_distinct" => RuleDirective::LightShapesDistinct,
                    "dark_shapes_distinct" => RuleDirective::DarkShapesDistinct,
                    "light_shapes_same" => RuleDirective::LightShapesSame,
                    "dark_shapes_same" => RuleDirective::DarkShapesSame,
                    _ => {
                        let mut payload = Vec::new();
                        while let Some(value) = seq.next_element::<Value>()? {
                            payload.push(value);
                        }
                        return Ok(RuleDirective::Other {
                            tag: tag.clone(),
                            payload,
                        });
                    }
                };
                drain(&mut seq)?;
                Ok(rule)
            }
        }

        deserializer.deserialize_seq(RuleVisitor)
    }
}

fn required_payload<'de, A, T>(seq: &mut A, tag: &str) -> Result<T, A::Error>
where
    A: SeqAccess<'de>,
    T: Deserialize<'de>,
{
    seq.next_element()?
        .ok_or_else(|| de::Error::custom(format!("rule `{tag}` is missing its payload")))
}

/// Consume trailing elements the producer may append after the payload.
fn drain<'de, A>(seq: &mut A) -> Result<(), A::Error>
where
    A: SeqAccess<'de>,
{
    while seq.next_element::<IgnoredAny>()?.is_some() {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_codes() {
        assert_eq!(CellColor::from_code(0), CellColor::Light);
        assert_eq!(CellColor::from_code(1), CellColor::Dark);
        assert_eq!(CellColor::from_code(2), CellColor::Unknown);
        assert_eq!(CellColor::from_code(7), CellColor::Unknown);
        assert_eq!(CellColor::Dark.code(), 1);
    }

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "pid": 42, "difficulty": 3, "kind": 0, "rows": 2, "cols": 3,
            "topology": [["merge", [8, 10]], ["hole", [5]]],
            "rules": [["light", [0, 1]], ["area", [[2, 4]]], ["connect_all_dark"]],
            "solution": [1, ["LDL", "DLD"], [0, 1, 0, 1, 0, 1]],
            "error": "None", "remainder": ""
        }"#;
        let puzzle: RawPuzzle = serde_json::from_str(json).unwrap();
        assert_eq!(puzzle.pid, 42);
        assert_eq!((puzzle.rows, puzzle.cols), (2, 3));
        assert_eq!(
            puzzle.topology,
            vec![
                TopologyDirective::Merge(vec![8, 10]),
                TopologyDirective::Hole(vec![5]),
            ]
        );
        assert_eq!(puzzle.rules.len(), 3);
        assert_eq!(puzzle.rules[0], RuleDirective::Light(vec![0, 1]));
        assert_eq!(puzzle.rules[1], RuleDirective::Area(vec![(2, 4)]));
        assert_eq!(puzzle.rules[2], RuleDirective::ConnectAllDark);
        let solution = puzzle.solution.unwrap();
        assert_eq!(solution.status(), 1);
        assert_eq!(solution.cells(), &[0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_deserialize_payload_shapes() {
        let json = r#"[
            ["dart", [[3, 2, 5]]],
            ["lotus", [[7, 1]]],
            ["ban_patterns", [[1, 2, ["LD"], [0, 1]]]],
            ["light_area", 4]
        ]"#;
        let rules: Vec<RuleDirective> = serde_json::from_str(json).unwrap();
        assert_eq!(rules[0], RuleDirective::Dart(vec![(3, 2, 5)]));
        assert_eq!(rules[1], RuleDirective::Lotus(vec![(7, 1)]));
        match &rules[2] {
            RuleDirective::BanPatterns(patterns) => {
                assert_eq!(patterns.len(), 1);
                assert_eq!((patterns[0].rows(), patterns[0].cols()), (1, 2));
                assert_eq!(patterns[0].cells(), &[0, 1]);
            }
            other => panic!("expected ban_patterns, got {other:?}"),
        }
        assert_eq!(rules[3], RuleDirective::LightArea(4));
    }

    #[test]
    fn test_unknown_rule_tag_passes_through() {
        let json = r#"["unknown_rule_0x7f", [1, 2, 3]]"#;
        let rule: RuleDirective = serde_json::from_str(json).unwrap();
        match rule {
            RuleDirective::Other { tag, payload } => {
                assert_eq!(tag, "unknown_rule_0x7f");
                assert_eq!(payload.len(), 1);
            }
            other => panic!("expected passthrough, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_topology_tag_is_an_error() {
        let json = r#"["wrap", [1]]"#;
        assert!(serde_json::from_str::<TopologyDirective>(json).is_err());
    }

    #[test]
    fn test_missing_payload_is_an_error() {
        assert!(serde_json::from_str::<RuleDirective>(r#"["light"]"#).is_err());
    }
}
