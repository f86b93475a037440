use std::path::{Path, PathBuf};

#[allow(dead_code)]
pub fn bin_path() -> PathBuf {
  PathBuf::from(env!("CARGO_BIN_EXE_linecomment"))
}

#[allow(dead_code)]
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
  let path = dir.join(name);
  std::fs::write(&path, content).unwrap();
  path
}
