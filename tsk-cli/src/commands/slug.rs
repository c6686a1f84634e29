//! Slug command implementation.

use tsk_core::slugify;

/// Print the slug of the words joined by single spaces
pub fn print_slug(words: &[String]) {
    println!("{}", slugify(&words.join(" ")));
}
