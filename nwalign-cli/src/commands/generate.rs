//! Generate command implementation - expand an input file into its two sequences

use anyhow::Result;
use std::path::{Path, PathBuf};

use super::input::load_spec;
use crate::report::write_output;

pub fn execute(input: PathBuf, out: Option<PathBuf>) -> Result<()> {
    let content = render(&input)?;
    write_output(&content, out.as_deref())
}

fn render(input: &Path) -> Result<String> {
    let spec = load_spec(input)?;
    let (first, second) = spec.generate();
    log::info!("Generated sequences of length {} and {}", first.len(), second.len());
    Ok(format!(
        "{}\n{}\n",
        String::from_utf8_lossy(&first),
        String::from_utf8_lossy(&second)
    ))
}
