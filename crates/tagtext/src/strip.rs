//! Raw-text tag removal.
//!
//! These work on the markup string itself rather than on a parsed symbol
//! list, so anything they do not remove is left exactly as written,
//! including unknown tags and stray `<` characters.

use crate::parser::{OPEN_DELIMITER, Tag};
use crate::vocabulary::TagVocabulary;

/// Remove every custom directive (timing and animation tags).
///
/// # Examples
///
/// ```
/// use tagtext::{TagVocabulary, strip_custom_directives};
///
/// let vocab = TagVocabulary::default();
/// assert_eq!(strip_custom_directives("<delay=5>a</delay><b>b</b>", &vocab), "a<b>b</b>");
/// ```
pub fn strip_custom_directives(text: &str, vocabulary: &TagVocabulary) -> String {
    retain_tags(text, |tag| !vocabulary.is_directive(tag.type_name()))
}

/// Remove every tag of one type, opening and closing.
pub fn strip_tags_of_type(text: &str, type_name: &str) -> String {
    retain_tags(text, |tag| !tag.is_type(type_name))
}

/// Remove every tag, leaving only literal text.
pub fn strip_all_tags(text: &str) -> String {
    retain_tags(text, |_| false)
}

fn retain_tags(text: &str, keep: impl Fn(&Tag) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut offset = 0;

    while let Some(c) = text[offset..].chars().next() {
        if c == OPEN_DELIMITER {
            if let Some(tag) = Tag::parse(&text[offset..]) {
                if keep(&tag) {
                    out.push_str(tag.raw_text());
                }
                offset += tag.raw_len();
                continue;
            }
        }
        out.push(c);
        offset += c.len_utf8();
    }

    out
}
