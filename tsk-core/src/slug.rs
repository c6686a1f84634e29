//! Slug generation and normalization.

use deunicode::deunicode;
use regex::Regex;
use std::sync::OnceLock;

static SEPARATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn separator_regex() -> &'static Regex {
    SEPARATOR_REGEX.get_or_init(|| Regex::new(r"[^A-Za-z0-9]+").unwrap())
}

/// Convert a string to a URL-safe slug
///
/// Rules:
/// - Replace `&` with the word `and`
/// - Transliterate non-ASCII characters to ASCII
/// - Replace runs of anything that isn't an ASCII letter or digit with one hyphen
/// - Trim leading/trailing hyphens
/// - Lowercase
///
/// # Examples
///
/// ```
/// use tsk_core::slugify;
///
/// assert_eq!(slugify("Agnes & Tovi"), "agnes-and-tovi");
/// assert_eq!(slugify("sublevel 1.1"), "sublevel-1-1");
/// assert_eq!(slugify("Éléphants sur une Île!"), "elephants-sur-une-ile");
/// ```
pub fn slugify(input: &str) -> String {
    let with_and = input.replace('&', "and");
    let ascii = deunicode(&with_and);
    let hyphenated = separator_regex().replace_all(&ascii, "-");

    hyphenated.trim_matches('-').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Chapter 1"), "chapter-1");
    }

    #[test]
    fn test_ampersand_becomes_and() {
        assert_eq!(slugify("Agnes & Tovi"), "agnes-and-tovi");
        assert_eq!(slugify("R&D"), "randd");
    }

    #[test]
    fn test_transliteration() {
        assert_eq!(
            slugify("Sömétîmès thȩ wôrld wêéps fÔr thÈß"),
            "sometimes-the-world-weeps-for-thess"
        );
        assert_eq!(slugify("Éléphants sur une Île!"), "elephants-sur-une-ile");
    }

    #[test]
    fn test_separators_collapse() {
        assert_eq!(slugify("sublevel 1.2.1"), "sublevel-1-2-1");
        assert_eq!(slugify("What's   new?"), "what-s-new");
        assert_eq!(slugify("snake_case_title"), "snake-case-title");
    }

    #[test]
    fn test_leading_trailing_hyphens() {
        assert_eq!(slugify("  Hello World  "), "hello-world");
        assert_eq!(slugify("-Leading Hyphen"), "leading-hyphen");
        assert_eq!(slugify("Trailing Hyphen-"), "trailing-hyphen");
    }

    #[test]
    fn test_empty_and_special_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "Agnes & Tovi",
            "Sömétîmès thȩ wôrld",
            "--weird--  input__here--",
            "UPPER lower 123",
            "",
        ] {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "slug of {:?} not stable", input);
        }
    }
}
