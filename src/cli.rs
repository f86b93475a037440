use anyhow::{Result, anyhow, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::select::SelectionSpec;
use crate::transform::Action;

#[derive(Parser, Debug)]
#[command(
    name = "linecomment",
    version,
    about = "Toggle, add, or remove line comments over line ranges or labeled sections",
    long_about = None
)]
pub struct Cli {
  /// File to modify. A comma-separated list processes a batch; each entry is
  /// 'path:lines', or a bare path when labels select the section.
  #[arg(long, short = 'f')]
  pub file: Option<String>,

  /// Line selection: a single line ("5") or an inclusive range ("3-7")
  #[arg(long, short = 'l')]
  pub line: Option<String>,

  /// Modify the lines after a line containing this label...
  #[arg(long, short = 's')]
  pub start_label: Option<String>,

  /// ...up to (excluding) the next line containing this label
  #[arg(long, short = 'e')]
  pub end_label: Option<String>,

  /// What to do with the selected lines
  #[arg(long, short = 'a', value_enum, default_value = "toggle")]
  pub action: Action,

  /// Language the comment prefix is taken from (default: inferred from the file extension)
  #[arg(long, short = 'L')]
  pub lang: Option<String>,

  /// Print the would-be changes instead of rewriting the file
  #[arg(long, short = 'd')]
  pub dry_run: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

/// One file plus the lines to touch in it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileJob {
  pub filename: String,
  pub spec: SelectionSpec,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub jobs: Vec<FileJob>,
  pub action: Action,
  pub lang: Option<String>,
  pub dry_run: bool,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let file = match &cli.file {
    Some(f) if !f.is_empty() => f.clone(),
    _ => bail!("provide a file to modify with --file"),
  };

  // Labels come in pairs and exclude --line.
  let labels = match (&cli.start_label, &cli.end_label) {
    (Some(s), Some(e)) => {
      if s.is_empty() || e.is_empty() {
        bail!("labels must be non-empty strings");
      }
      Some(SelectionSpec::Labels { start: s.clone(), end: e.clone() })
    }
    (None, None) => None,
    _ => bail!("labels come in pairs: provide both --start-label and --end-label"),
  };

  if labels.is_some() && cli.line.is_some() {
    bail!("choose one selection: --line or --start-label/--end-label, not both");
  }

  let mut jobs: Vec<FileJob> = Vec::new();

  if file.contains(',') {
    if cli.line.is_some() {
      bail!("with multiple files, give each entry its lines as 'path:lines' instead of --line");
    }
    for entry in file.split(',') {
      let entry = entry.trim();
      if entry.is_empty() {
        bail!("empty entry in --file list");
      }
      if let Some(spec) = &labels {
        if entry.contains(':') {
          bail!("batch entry '{}' carries ':lines' but labels were given", entry);
        }
        jobs.push(FileJob { filename: entry.to_string(), spec: spec.clone() });
      } else {
        let (path, lines) = entry
          .split_once(':')
          .ok_or_else(|| anyhow!("invalid batch entry '{}': use 'path:lines' or supply labels", entry))?;
        jobs.push(FileJob { filename: path.to_string(), spec: SelectionSpec::parse(lines)? });
      }
    }
  } else {
    let spec = if let Some(spec) = labels {
      spec
    } else if let Some(line) = &cli.line {
      SelectionSpec::parse(line)?
    } else {
      bail!("nothing selected: add --line or --start-label/--end-label");
    };
    jobs.push(FileJob { filename: file, spec });
  }

  Ok(EffectiveConfig {
    jobs,
    action: cli.action,
    lang: cli.lang.clone(),
    dry_run: cli.dry_run,
  })
}
