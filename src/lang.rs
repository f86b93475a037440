use std::collections::HashMap;
use std::path::Path;

use anyhow::{Result, anyhow, bail};
use once_cell::sync::Lazy;

/// Line-comment prefix per language. The engine never sees language names;
/// it only receives the resolved prefix string.
static COMMENT_PREFIXES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
  HashMap::from([
    ("go", "//"),
    ("golang", "//"),
    ("js", "//"),
    ("ts", "//"),
    ("c", "//"),
    ("c++", "//"),
    ("java", "//"),
    ("swift", "//"),
    ("kotlin", "//"),
    ("scala", "//"),
    ("dart", "//"),
    ("rust", "//"),
    ("php", "//"),
    ("objective-c", "//"),
    ("verilog", "//"),
    ("bash", "#"),
    ("python", "#"),
    ("ruby", "#"),
    ("perl", "#"),
    ("r", "#"),
    ("elixir", "#"),
    ("haskell", "--"),
    ("sql", "--"),
    ("lua", "--"),
    ("vhdl", "--"),
    ("matlab", "%"),
    ("erlang", "%"),
  ])
});

/// File extension (lowercased, no dot) to language key.
static EXTENSIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
  HashMap::from([
    ("go", "go"),
    ("js", "js"),
    ("ts", "ts"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("c", "c"),
    ("h", "c"),
    ("cc", "c++"),
    ("cpp", "c++"),
    ("java", "java"),
    ("py", "python"),
    ("rb", "ruby"),
    ("pl", "perl"),
    ("php", "php"),
    ("swift", "swift"),
    ("kt", "kotlin"),
    ("kts", "kotlin"),
    ("r", "r"),
    ("hs", "haskell"),
    ("sql", "sql"),
    ("rs", "rust"),
    ("scala", "scala"),
    ("dart", "dart"),
    ("mm", "objective-c"),
    ("m", "matlab"),
    ("lua", "lua"),
    ("erl", "erlang"),
    ("ex", "elixir"),
    ("exs", "elixir"),
    ("vhdl", "vhdl"),
    ("vhd", "vhdl"),
    ("v", "verilog"),
    ("sv", "verilog"),
  ])
});

/// Resolve the comment prefix for a file. An explicit language wins; otherwise
/// the file extension decides. Fails before the engine ever opens the file.
pub fn resolve_prefix(filename: &str, lang: Option<&str>) -> Result<&'static str> {
  if let Some(lang) = lang {
    let key = lang.to_lowercase();
    return COMMENT_PREFIXES
      .get(key.as_str())
      .copied()
      .ok_or_else(|| anyhow!("unsupported language: {}", lang));
  }

  let ext = match Path::new(filename).extension().and_then(|e| e.to_str()) {
    Some(e) => e,
    None => bail!("cannot infer a language for {}: no file extension (use --lang)", filename),
  };

  EXTENSIONS
    .get(ext.to_lowercase().as_str())
    .and_then(|l| COMMENT_PREFIXES.get(l))
    .copied()
    .ok_or_else(|| anyhow!("unsupported file extension: .{}", ext))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn explicit_lang_wins_over_extension() {
    assert_eq!(resolve_prefix("script.py", Some("haskell")).unwrap(), "--");
  }

  #[test]
  fn lang_is_case_insensitive() {
    assert_eq!(resolve_prefix("whatever", Some("Python")).unwrap(), "#");
    assert_eq!(resolve_prefix("whatever", Some("SQL")).unwrap(), "--");
  }

  #[test]
  fn extension_resolution() {
    assert_eq!(resolve_prefix("main.go", None).unwrap(), "//");
    assert_eq!(resolve_prefix("lib/util.rb", None).unwrap(), "#");
    assert_eq!(resolve_prefix("schema.sql", None).unwrap(), "--");
    assert_eq!(resolve_prefix("plot.m", None).unwrap(), "%");
    assert_eq!(resolve_prefix("stats.R", None).unwrap(), "#");
  }

  #[test]
  fn unknown_language_is_rejected() {
    let err = resolve_prefix("x.py", Some("klingon")).unwrap_err();
    assert!(format!("{:#}", err).contains("unsupported language"));
  }

  #[test]
  fn unknown_extension_is_rejected() {
    let err = resolve_prefix("notes.txt", None).unwrap_err();
    assert!(format!("{:#}", err).contains("unsupported file extension"));
  }

  #[test]
  fn missing_extension_needs_explicit_lang() {
    let err = resolve_prefix("Makefile", None).unwrap_err();
    assert!(format!("{:#}", err).contains("no file extension"));
  }
}
