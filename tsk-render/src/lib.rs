//! # tsk-render
//!
//! Template rendering library for tsk.
//!
//! This crate wraps converted page fragments in layouts loaded at runtime
//! from the configured template directory, using minijinja.

pub mod templates;

pub use templates::{render_site, PageContext, PageRenderer, RenderError};
