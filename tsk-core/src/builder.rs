//! Site building logic - preprocesses documents, converts them and builds the outline.

use crate::{
    book::Book,
    commands::{CommandContext, CommandError, CommandRegistry},
    config::Config,
    markdown::MarkdownProcessor,
    metadata::{MetaValue, Metadata},
    outline::{self, OutlineError, OutlineTree},
    preprocess::Preprocessor,
    slug::slugify,
    storage::{LocalStorage, Storage},
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extension of source documents
const MARKDOWN_EXTENSION: &str = "md";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0:?} is not valid UTF-8")]
    Encoding(PathBuf),

    #[error("Failed to preprocess {path:?}: {source}")]
    Command {
        path: PathBuf,
        source: CommandError,
    },

    #[error("TOC error: {0}")]
    Outline(#[from] OutlineError),

    #[error("Duplicate output file: {0}")]
    DuplicateOutput(String),
}

/// Everything produced by a build, ready for template rendering
#[derive(Debug, Default)]
pub struct Site {
    pub book: Book,
    /// HTML fragments keyed by output file name
    pub fragments: BTreeMap<String, String>,
    pub outline: Option<OutlineTree>,
}

impl Site {
    pub fn fragment(&self, output_file: &str) -> Option<&str> {
        self.fragments.get(output_file).map(String::as_str)
    }
}

/// Main site builder
pub struct SiteBuilder {
    config: Config,
    storage: Box<dyn Storage>,
    registry: CommandRegistry,
    processor: MarkdownProcessor,
}

impl SiteBuilder {
    /// Builder on the local filesystem with the built-in commands
    pub fn new(config: Config) -> Self {
        Self::with_storage(config, LocalStorage)
    }

    pub fn with_storage(config: Config, storage: impl Storage + 'static) -> Self {
        Self {
            config,
            storage: Box::new(storage),
            registry: CommandRegistry::with_builtins(),
            processor: MarkdownProcessor::new(),
        }
    }

    /// Registry used for inline commands, for adding custom ones
    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process every document, then build the outline against the written pages
    ///
    /// Any failure aborts the whole build.
    pub fn build(&self) -> Result<Site, BuildError> {
        let markdown_files = self.discover_markdown_files()?;
        tracing::info!("Found {} markdown files", markdown_files.len());

        let mut site = Site::default();
        for path in &markdown_files {
            let (output_file, metadata, html) = self.process_file(path, &site.book)?;
            site.fragments.insert(output_file.clone(), html);
            // Uniqueness was checked before anything was written
            let _ = site.book.insert(output_file, metadata);
        }

        // Pages must all exist before URLs are resolved
        if let Some(toc_path) = self.config.toc_path() {
            let page_dir = self.config.markdown_output_dir();
            let tree = outline::generate_file(self.storage(), &toc_path, &page_dir)?;
            tracing::info!("Built TOC with {} entries from {:?}", tree.len(), toc_path);
            site.outline = Some(tree);
        }

        tracing::info!("Processed {} documents", site.book.len());
        Ok(site)
    }

    /// Source documents directly inside the markdown directory
    fn discover_markdown_files(&self) -> Result<Vec<PathBuf>, BuildError> {
        let markdown_dir = self.config.markdown_dir();
        let files = self.storage.list(&markdown_dir).map_err(|source| BuildError::Io {
            path: markdown_dir.clone(),
            source,
        })?;

        Ok(files
            .into_iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION))
            .collect())
    }

    /// Preprocess and convert one document, writing its HTML fragment
    fn process_file(&self, path: &Path, book: &Book) -> Result<(String, Metadata, String), BuildError> {
        tracing::debug!("Processing {:?}", path);

        let bytes = self.storage.read(path).map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| BuildError::Encoding(path.to_path_buf()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

        let markdown_dir = self.config.markdown_dir();
        let web_pages_dir = self.config.web_pages_dir();
        let context = CommandContext {
            markdown_path: &markdown_dir,
            web_pages_path: &web_pages_dir,
            storage: self.storage(),
        };
        let document = Preprocessor::new(&self.registry)
            .with_context(context)
            .process(text)
            .map_err(|source| BuildError::Command {
                path: path.to_path_buf(),
                source,
            })?;

        let html = self.processor.convert(&document.body);

        let mut metadata = document.metadata;
        let output_file = output_file_name(&metadata, path);
        if book.contains(&output_file) {
            return Err(BuildError::DuplicateOutput(output_file));
        }
        let output_path = self.config.markdown_output_dir().join(&output_file);

        metadata.insert("input_file".into(), path.display().to_string().into());
        metadata.insert("output_file".into(), output_file.clone().into());
        metadata.insert("output_path".into(), output_path.display().to_string().into());

        self.storage
            .write(&output_path, html.as_bytes())
            .map_err(|source| BuildError::Io {
                path: output_path.clone(),
                source,
            })?;
        tracing::debug!("Wrote {:?}", output_path);

        Ok((output_file, metadata, html))
    }
}

/// Output file name: explicit `output_file`, else slugged `title`, else the
/// source file name, always with an `.html` extension for the latter two
pub fn output_file_name(metadata: &Metadata, input: &Path) -> String {
    if let Some(explicit) = metadata.get("output_file").map(MetaValue::to_string) {
        if !explicit.trim().is_empty() {
            return explicit.trim().to_string();
        }
    }

    if let Some(title) = metadata.get("title").map(MetaValue::to_string) {
        let slug = slugify(&title);
        if !slug.is_empty() {
            return format!("{}.html", slug);
        }
    }

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    format!("{}.html", stem)
}
