//! TOC command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tsk_core::{outline, LocalStorage};

/// Print the outline of `file` as pretty JSON
///
/// URLs are only resolved when a page directory is given.
pub fn print_toc(file: &Path, pages: Option<&Path>) -> Result<()> {
    let tree = match pages {
        Some(page_dir) => outline::generate_file(&LocalStorage, file, page_dir),
        None => {
            let text = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            outline::generate(text.trim_start_matches('\u{feff}'), &|_: &str| false)
        }
    }
    .with_context(|| format!("Failed to build TOC from {:?}", file))?;

    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}
