//! # tsk-core
//!
//! Core library for the tsk static site generator.
//!
//! This crate provides the document preprocessor (front matter, comments and
//! inline `$$` commands), the outline builder, slug normalization and the
//! site builder that ties them together.

pub mod book;
pub mod builder;
pub mod commands;
pub mod config;
pub mod markdown;
pub mod metadata;
pub mod outline;
pub mod preprocess;
pub mod slug;
pub mod storage;

pub use book::Book;
pub use builder::{BuildError, Site, SiteBuilder};
pub use commands::{CommandContext, CommandError, CommandRegistry, Handler};
pub use config::{Config, ConfigError};
pub use markdown::MarkdownProcessor;
pub use metadata::{MetaValue, Metadata};
pub use outline::{OutlineEntry, OutlineError, OutlineTree};
pub use preprocess::{Document, Preprocessor};
pub use slug::slugify;
pub use storage::{LocalStorage, MemoryStorage, Storage};
