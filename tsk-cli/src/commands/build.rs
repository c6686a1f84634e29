//! Build command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tsk_core::{Config, SiteBuilder};
use tsk_render::{render_site, PageRenderer};

/// Build the static site: page fragments, outline and final pages
pub fn build_site(config_path: &Path) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    build_site_with_config(config)
}

/// Build the site from an already loaded config
pub fn build_site_with_config(config: Config) -> Result<()> {
    let builder = SiteBuilder::new(config);
    let site = builder.build().context("Failed to build site")?;

    let config = builder.config();
    let web_pages_dir = config.web_pages_dir();
    let renderer = PageRenderer::from_config(config);
    let written = render_site(&renderer, &site, &web_pages_dir, builder.storage())
        .context("Failed to render pages")?;

    tracing::info!("Site built: {} pages in {:?}", written, web_pages_dir);
    Ok(())
}
