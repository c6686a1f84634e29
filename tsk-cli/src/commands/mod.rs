//! CLI command implementations.

pub mod build;
pub mod preprocess;
pub mod slug;
pub mod toc;

pub use build::build_site;
pub use preprocess::preprocess_file;
pub use slug::print_slug;
pub use toc::print_toc;
