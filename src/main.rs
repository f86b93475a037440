use anyhow::Result;
use clap::Parser;

mod cli;
mod lang;
mod rewrite;
mod select;
mod transform;
mod util;

use crate::cli::{Cli, normalize};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI into jobs
  let cfg = normalize(cli)?;

  // Phase 2: resolve each file's prefix and process strictly in order;
  // the first failure halts the run, files committed before it stay committed.
  for job in &cfg.jobs {
    let prefix = lang::resolve_prefix(&job.filename, cfg.lang.as_deref())?;
    rewrite::process_file(&job.filename, &job.spec, cfg.action, prefix, cfg.dry_run)?;
  }

  Ok(())
}
