use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// What to do with each selected line.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum Action {
  Comment,
  Uncomment,
  Toggle,
}

impl Action {
  pub fn apply(&self, line: &str, prefix: &str) -> String {
    match self {
      Action::Comment => comment(line, prefix),
      Action::Uncomment => uncomment(line, prefix),
      Action::Toggle => toggle(line, prefix),
    }
  }
}

/// Prepend the comment prefix, unconditionally. Applying this twice stacks two
/// prefixes; `toggle` is the variant that checks before writing.
pub fn comment(line: &str, prefix: &str) -> String {
  format!("{} {}", prefix, line)
}

/// Strip one leading comment prefix, keeping indentation intact. Lines that do
/// not start with the prefix (after trimming) pass through unchanged.
pub fn uncomment(line: &str, prefix: &str) -> String {
  let trimmed = line.trim();
  if !trimmed.starts_with(prefix) {
    return line.to_string();
  }
  let spaced = format!("{} ", prefix);
  if trimmed.starts_with(&spaced) {
    line.replacen(&spaced, "", 1)
  } else {
    line.replacen(prefix, "", 1)
  }
}

pub fn toggle(line: &str, prefix: &str) -> String {
  if line.trim().starts_with(prefix) {
    uncomment(line, prefix)
  } else {
    comment(line, prefix)
  }
}
