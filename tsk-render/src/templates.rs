//! Page layouts loaded from the template directory.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tsk_core::{Book, Config, Metadata, OutlineTree, Site, Storage};

/// Metadata key naming a document's own layout
pub const TEMPLATE_KEY: &str = "template_layout";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to render template {template}: {source}")]
    Template {
        template: String,
        source: minijinja::Error,
    },

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Values a layout can reference
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    /// Converted HTML fragment
    pub contents: &'a str,
    /// The document's own metadata
    pub data: &'a Metadata,
    pub toc: Option<&'a OutlineTree>,
    pub book: &'a Book,
}

/// Renders pages with layouts read from disk at render time
pub struct PageRenderer {
    env: Environment<'static>,
    default_template: String,
}

impl PageRenderer {
    pub fn new(template_dir: impl AsRef<Path>, default_template: impl Into<String>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(template_dir.as_ref().to_path_buf()));
        // Fragments are already HTML
        env.set_auto_escape_callback(|_| AutoEscape::None);

        Self {
            env,
            default_template: default_template.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.template_dir(), config.default_template.clone())
    }

    /// `template_layout` from the metadata, else the default layout
    pub fn template_for<'m>(&'m self, data: &'m Metadata) -> &'m str {
        data.get(TEMPLATE_KEY)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.default_template)
    }

    pub fn render(&self, template: &str, context: &PageContext<'_>) -> Result<String, RenderError> {
        let wrap = |source: minijinja::Error| RenderError::Template {
            template: template.to_string(),
            source,
        };
        let tmpl = self.env.get_template(template).map_err(wrap)?;
        tmpl.render(context).map_err(wrap)
    }

    /// Render with the layout the page asks for
    pub fn render_page(&self, context: &PageContext<'_>) -> Result<String, RenderError> {
        self.render(self.template_for(context.data), context)
    }
}

/// Render every page of a built site into `web_pages_dir`
///
/// Returns the number of pages written.
pub fn render_site(
    renderer: &PageRenderer,
    site: &Site,
    web_pages_dir: &Path,
    storage: &dyn Storage,
) -> Result<usize, RenderError> {
    let mut written = 0;

    for (output_file, data) in site.book.iter() {
        let context = PageContext {
            contents: site.fragment(output_file).unwrap_or_default(),
            data,
            toc: site.outline.as_ref(),
            book: &site.book,
        };
        let html = renderer.render_page(&context)?;

        let path = web_pages_dir.join(output_file);
        storage
            .write(&path, html.as_bytes())
            .map_err(|source| RenderError::Io {
                path: path.clone(),
                source,
            })?;
        tracing::debug!("Rendered {:?} with {}", path, renderer.template_for(data));
        written += 1;
    }

    tracing::info!("Rendered {} pages to {:?}", written, web_pages_dir);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use tsk_core::{MemoryStorage, MetaValue};

    fn templates() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("main.html"),
            "<title>{{ data.title }}</title><main>{{ contents }}</main>",
        )
        .unwrap();
        fs::write(
            dir.path().join("chapter.html"),
            "{% for entry in toc.children %}[{{ entry.number }} {{ entry.title }}]{% endfor %}{{ book|length }}",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_default_template_used() {
        let dir = templates();
        let renderer = PageRenderer::new(dir.path(), "main.html");
        let mut data = Metadata::new();
        data.insert("title".into(), MetaValue::from("Hello & Goodbye"));
        let book = Book::new();

        let html = renderer
            .render_page(&PageContext {
                contents: "<p>Body</p>",
                data: &data,
                toc: None,
                book: &book,
            })
            .unwrap();
        assert_eq!(html, "<title>Hello & Goodbye</title><main><p>Body</p></main>");
    }

    #[test]
    fn test_template_layout_overrides_default() {
        let dir = templates();
        let renderer = PageRenderer::new(dir.path(), "main.html");
        let mut data = Metadata::new();
        data.insert(TEMPLATE_KEY.into(), MetaValue::from("chapter.html"));
        assert_eq!(renderer.template_for(&data), "chapter.html");

        let toc = tsk_core::outline::generate("# One\n# Two\n", &|_: &str| false).unwrap();
        let mut book = Book::new();
        book.insert("one.html".into(), Metadata::new()).unwrap();

        let html = renderer
            .render_page(&PageContext {
                contents: "",
                data: &data,
                toc: Some(&toc),
                book: &book,
            })
            .unwrap();
        assert_eq!(html, "[1 One][2 Two]1");
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let dir = templates();
        let renderer = PageRenderer::new(dir.path(), "absent.html");
        let data = Metadata::new();
        let book = Book::new();
        let err = renderer
            .render_page(&PageContext {
                contents: "",
                data: &data,
                toc: None,
                book: &book,
            })
            .unwrap_err();
        assert!(matches!(err, RenderError::Template { template, .. } if template == "absent.html"));
    }

    #[test]
    fn test_render_site_writes_every_page() {
        let dir = templates();
        let renderer = PageRenderer::new(dir.path(), "main.html");

        let mut site = Site::default();
        let mut data = Metadata::new();
        data.insert("title".into(), MetaValue::from("Intro"));
        site.book.insert("intro.html".into(), data).unwrap();
        site.fragments.insert("intro.html".into(), "<p>Hi</p>\n".into());

        let storage = MemoryStorage::new();
        let written = render_site(&renderer, &site, Path::new("website"), &storage).unwrap();
        assert_eq!(written, 1);

        let page = storage.read(Path::new("website/intro.html")).unwrap();
        assert_eq!(
            String::from_utf8(page).unwrap(),
            "<title>Intro</title><main><p>Hi</p>\n</main>"
        );
    }
}
