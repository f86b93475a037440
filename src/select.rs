// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse line selections (single, range, label pair) and decide per-line scope while streaming
// role: core/selection
// inputs: Selection spec strings; (1-based line index, line text) pairs in document order
// outputs: SelectionSpec values; boolean in-scope decisions
// side_effects: none (Selector owns the only mutable state, one flag per file pass)
// invariants:
// - line numbers are 1-based; ranges are inclusive with end >= start
// - label matching is substring containment; the label lines themselves are never in scope
// - an unterminated section extends to end of file without error
// errors: parse rejects non-positive, inverted, or malformed specs before any file I/O
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Which lines of a file an invocation applies to. Numeric and label selection
/// are mutually exclusive; exactly one variant exists per job.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum SelectionSpec {
  Range { start: usize, end: usize },
  Labels { start: String, end: String },
}

impl SelectionSpec {
  /// Parse a numeric line spec: a single positive line number ("5") or an
  /// inclusive range ("3-7").
  pub fn parse(spec: &str) -> Result<SelectionSpec> {
    if spec.contains('-') {
      let parts: Vec<&str> = spec.split('-').collect();
      if parts.len() != 2 {
        bail!("invalid line range '{}': use 'start-end'", spec);
      }
      let start: usize = match parts[0].parse() {
        Ok(n) if n > 0 => n,
        _ => bail!("invalid start line in '{}': expected a positive integer", spec),
      };
      let end: usize = match parts[1].parse() {
        Ok(n) if n >= start => n,
        _ => bail!("invalid end line in '{}': end must be a number >= start", spec),
      };
      Ok(SelectionSpec::Range { start, end })
    } else {
      match spec.parse::<usize>() {
        Ok(n) if n > 0 => Ok(SelectionSpec::Range { start: n, end: n }),
        _ => bail!(
          "invalid line number '{}': expected a positive integer or 'start-end'",
          spec
        ),
      }
    }
  }

  /// The last line a numeric selection needs the file to have; `None` for
  /// label selection, which never bounds-checks.
  pub fn end_bound(&self) -> Option<usize> {
    match self {
      SelectionSpec::Range { end, .. } => Some(*end),
      SelectionSpec::Labels { .. } => None,
    }
  }
}

/// Streaming scope decisions for one pass over one file.
pub struct Selector<'a> {
  spec: &'a SelectionSpec,
  in_section: bool,
}

impl<'a> Selector<'a> {
  pub fn new(spec: &'a SelectionSpec) -> Self {
    Selector { spec, in_section: false }
  }

  /// Whether the line at `index` (1-based) is in scope. For label selection
  /// the end label closes the section before the check and the start label
  /// opens it after, so neither label line is ever in scope itself.
  pub fn in_scope(&mut self, index: usize, text: &str) -> bool {
    match self.spec {
      SelectionSpec::Range { start, end } => *start <= index && index <= *end,
      SelectionSpec::Labels { start, end } => {
        if text.contains(end.as_str()) {
          self.in_section = false;
        }
        let hit = self.in_section;
        if text.contains(start.as_str()) {
          self.in_section = true;
        }
        hit
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_single_line() {
    assert_eq!(SelectionSpec::parse("5").unwrap(), SelectionSpec::Range { start: 5, end: 5 });
  }

  #[test]
  fn parse_range() {
    assert_eq!(SelectionSpec::parse("3-7").unwrap(), SelectionSpec::Range { start: 3, end: 7 });
  }

  #[test]
  fn parse_rejects_inverted_range() {
    let err = SelectionSpec::parse("7-3").unwrap_err();
    assert!(format!("{:#}", err).contains("end must be"));
  }

  #[test]
  fn parse_rejects_zero_and_garbage() {
    assert!(SelectionSpec::parse("0").is_err());
    assert!(SelectionSpec::parse("0-4").is_err());
    assert!(SelectionSpec::parse("abc").is_err());
    assert!(SelectionSpec::parse("1-2-3").is_err());
    assert!(SelectionSpec::parse("-5").is_err());
    assert!(SelectionSpec::parse("").is_err());
  }

  #[test]
  fn range_scope_is_inclusive() {
    let spec = SelectionSpec::Range { start: 2, end: 4 };
    let mut sel = Selector::new(&spec);
    let hits: Vec<bool> = (1..=6).map(|i| sel.in_scope(i, "x")).collect();
    assert_eq!(hits, vec![false, true, true, true, true, false]);
  }

  #[test]
  fn label_lines_are_excluded_from_scope() {
    let spec = SelectionSpec::Labels { start: "START".into(), end: "END".into() };
    let mut sel = Selector::new(&spec);
    let lines = ["A", "START", "B", "C", "END", "D"];
    let hits: Vec<bool> = lines
      .iter()
      .enumerate()
      .map(|(i, l)| sel.in_scope(i + 1, l))
      .collect();
    assert_eq!(hits, vec![false, false, true, true, false, false]);
  }

  #[test]
  fn labels_match_by_substring() {
    let spec = SelectionSpec::Labels { start: "BEGIN".into(), end: "STOP".into() };
    let mut sel = Selector::new(&spec);
    assert!(!sel.in_scope(1, "// BEGIN generated"));
    assert!(sel.in_scope(2, "code"));
    assert!(!sel.in_scope(3, "// STOP generated"));
    assert!(!sel.in_scope(4, "after"));
  }

  #[test]
  fn unterminated_section_extends_to_eof() {
    let spec = SelectionSpec::Labels { start: "START".into(), end: "END".into() };
    let mut sel = Selector::new(&spec);
    assert!(!sel.in_scope(1, "START"));
    assert!(sel.in_scope(2, "a"));
    assert!(sel.in_scope(3, "b"));
  }

  #[test]
  fn section_can_reopen() {
    let spec = SelectionSpec::Labels { start: "S".into(), end: "E".into() };
    let mut sel = Selector::new(&spec);
    let lines = ["S", "a", "E", "b", "S", "c"];
    let hits: Vec<bool> = lines
      .iter()
      .enumerate()
      .map(|(i, l)| sel.in_scope(i + 1, l))
      .collect();
    assert_eq!(hits, vec![false, true, false, false, false, true]);
  }

  #[test]
  fn end_bound_only_for_ranges() {
    assert_eq!(SelectionSpec::Range { start: 1, end: 9 }.end_bound(), Some(9));
    let labels = SelectionSpec::Labels { start: "a".into(), end: "b".into() };
    assert_eq!(labels.end_bound(), None);
  }
}
