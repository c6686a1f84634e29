//! Preprocess command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tsk_core::{CommandContext, CommandRegistry, Config, Document, LocalStorage, Preprocessor};

/// Preprocess a single document and print the result
///
/// When the config file exists, bound commands (`include`, `asset`) resolve
/// against its directories; otherwise they fail with a missing context.
pub fn preprocess_file(config_path: &Path, file: &Path, json: bool) -> Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("Failed to read {:?}", file))?;
    let text = String::from_utf8(bytes).with_context(|| format!("{:?} is not valid UTF-8", file))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let registry = CommandRegistry::with_builtins();
    let config = if config_path.is_file() {
        Some(Config::from_file(config_path).context("Failed to load configuration")?)
    } else {
        tracing::debug!("No config at {:?}; bound commands are unavailable", config_path);
        None
    };

    let markdown_dir = config.as_ref().map(Config::markdown_dir);
    let web_pages_dir = config.as_ref().map(Config::web_pages_dir);
    let mut preprocessor = Preprocessor::new(&registry);
    if let (Some(markdown_path), Some(web_pages_path)) = (&markdown_dir, &web_pages_dir) {
        preprocessor = preprocessor.with_context(CommandContext {
            markdown_path,
            web_pages_path,
            storage: &LocalStorage,
        });
    }

    let document = preprocessor
        .process(text)
        .with_context(|| format!("Failed to preprocess {:?}", file))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{}", format_document(&document));
    }
    Ok(())
}

/// Cleaned document with its metadata written back as a front-matter block
fn format_document(document: &Document) -> String {
    let mut out = String::new();
    if !document.metadata.is_empty() {
        out.push_str("---\n");
        for (key, value) in &document.metadata {
            out.push_str(&format!("{}: {}\n", key, value));
        }
        out.push_str("---\n");
    }
    out.push_str(&document.body);
    out
}
