// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Stream a file through the selector/transformer pair and emit a dry-run preview or an atomic in-place rewrite
// role: core/engine
// inputs: filename, SelectionSpec, Action, comment prefix, dry-run flag
// outputs: Preview lines on stdout (dry-run) or the file replaced in place (write mode)
// side_effects: Write mode creates <file>.bak and <file>.tmp, then renames or rolls back
// invariants:
// - the original file is either fully replaced or byte-identical to its pre-run state
// - .bak is always consumed: deleted on commit, renamed back over the original on failure
// - .tmp never survives a failed run
// - a numeric end line beyond the file length is an error after the full pass; labels never bounds-check
// errors: open/create/write/rename failures carry the path in context; out-of-range reported after rollback
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::select::{SelectionSpec, Selector};
use crate::transform::Action;

/// Apply `action` to the selected lines of `filename`. Dry-run previews to
/// stdout and never touches the file; write mode rewrites it in place behind
/// a backup/temp-file safety net.
pub fn process_file(
  filename: &str,
  spec: &SelectionSpec,
  action: Action,
  prefix: &str,
  dry_run: bool,
) -> Result<()> {
  let file = File::open(filename).with_context(|| format!("failed to open {}", filename))?;
  let reader = BufReader::new(file);

  if dry_run {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    return preview(reader, spec, action, prefix, &mut out);
  }

  rewrite_in_place(filename, reader, spec, action, prefix)
}

/// Print every line of `reader` to `out`; in-scope lines are rendered as
/// "<original> -> <modified>". A blank line follows the file.
pub fn preview<R: BufRead, W: Write>(
  reader: R,
  spec: &SelectionSpec,
  action: Action,
  prefix: &str,
  out: &mut W,
) -> Result<()> {
  let mut selector = Selector::new(spec);
  let mut line_count = 0usize;

  for (idx, line) in reader.lines().enumerate() {
    let line = line.context("reading source file")?;
    let index = idx + 1;
    line_count = index;
    if selector.in_scope(index, &line) {
      writeln!(out, "{} -> {}", line, action.apply(&line, prefix))?;
    } else {
      writeln!(out, "{}", line)?;
    }
  }

  check_bounds(spec, line_count)?;
  writeln!(out)?;
  Ok(())
}

/// Stream transformed output from `reader` into `writer`. Lines come back out
/// with a single trailing newline each, so CRLF input is normalized.
fn write_changes<R: BufRead, W: Write>(
  reader: R,
  writer: &mut W,
  spec: &SelectionSpec,
  action: Action,
  prefix: &str,
) -> Result<()> {
  let mut selector = Selector::new(spec);
  let mut line_count = 0usize;

  for (idx, line) in reader.lines().enumerate() {
    let line = line.context("reading source file")?;
    let index = idx + 1;
    line_count = index;
    let content = if selector.in_scope(index, &line) {
      action.apply(&line, prefix)
    } else {
      line
    };
    writeln!(writer, "{}", content).context("writing temp file")?;
  }

  check_bounds(spec, line_count)
}

fn check_bounds(spec: &SelectionSpec, line_count: usize) -> Result<()> {
  if let Some(end) = spec.end_bound() {
    if end > line_count {
      bail!(
        "line number is out of range: requested line {}, file has {} lines",
        end,
        line_count
      );
    }
  }
  Ok(())
}

fn rewrite_in_place<R: BufRead>(
  filename: &str,
  reader: R,
  spec: &SelectionSpec,
  action: Action,
  prefix: &str,
) -> Result<()> {
  let backup = sibling_path(filename, "bak");
  let tmp = sibling_path(filename, "tmp");

  fs::copy(filename, &backup).with_context(|| format!("creating backup {}", backup.display()))?;

  let tmp_file = match File::create(&tmp) {
    Ok(f) => f,
    Err(e) => {
      restore_backup(filename, &backup);
      return Err(e).with_context(|| format!("creating temp file {}", tmp.display()));
    }
  };
  let mut writer = BufWriter::new(tmp_file);

  let mut written = write_changes(reader, &mut writer, spec, action, prefix);
  if written.is_ok() {
    written = writer.flush().context("flushing temp file");
  }
  drop(writer);

  if let Err(e) = written {
    let _ = fs::remove_file(&tmp);
    restore_backup(filename, &backup);
    return Err(e);
  }

  if let Err(e) = fs::rename(&tmp, filename) {
    let _ = fs::remove_file(&tmp);
    restore_backup(filename, &backup);
    return Err(e).with_context(|| format!("replacing {}", filename));
  }

  let _ = fs::remove_file(&backup);
  Ok(())
}

fn sibling_path(filename: &str, suffix: &str) -> PathBuf {
  PathBuf::from(format!("{}.{}", filename, suffix))
}

/// Put the backup back over the original. Consumes the backup file, so no
/// `.bak` survives a failed run.
fn restore_backup(filename: &str, backup: &Path) {
  let _ = fs::remove_file(filename);
  let _ = fs::rename(backup, filename);
}
