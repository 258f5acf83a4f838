//! Markup stripping for OSIS, ThML and GBF entry text
//!
//! Only enough of the markup is understood to produce plain text, count
//! the elements removed and spot chapter boundaries.

use std::borrow::Cow;
use std::sync::LazyLock;

use quick_xml::escape::{resolve_predefined_entity, unescape_with};
use regex::Regex;

// GBF tokens such as <FR> and <RF> share the bracket syntax
#[allow(clippy::expect_used)]
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)[A-Za-z!?][^>]*>").expect("tag pattern is valid"));

#[allow(clippy::expect_used)]
static CHAPTER_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<chapter\b[^>]*>|<div\b[^>]*\btype\s*=\s*["']chapter["'][^>]*>"#)
        .expect("chapter marker pattern is valid")
});

/// Plain text of an entry and how much markup it carried
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Stripped {
    /// Text with tags removed, entities decoded and whitespace collapsed
    pub text: String,
    /// Opening and self-closing elements removed
    pub annotations: usize,
}

/// Remove markup from entry text
pub fn strip_markup(raw: &str) -> Stripped {
    let mut annotations = 0;
    let without_tags = TAG.replace_all(raw, |caps: &regex::Captures<'_>| {
        if caps[1].is_empty() {
            annotations += 1;
        }
        " "
    });
    let text = collapse_whitespace(&decode_entities(&without_tags));
    Stripped { text, annotations }
}

/// Whether entry text opens a chapter
pub fn has_chapter_marker(raw: &str) -> bool {
    CHAPTER_MARKER.is_match(raw)
}

/// Whether text contains anything [`strip_markup`] would change
pub fn contains_markup(raw: &str) -> bool {
    TAG.is_match(raw) || raw.contains('&')
}

/// Number of whitespace-separated words
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Decode predefined, numeric and `&nbsp;` references; text with a stray
/// `&` is returned unchanged
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let resolve = |entity: &str| resolve_predefined_entity(entity).or_else(|| (entity == "nbsp").then_some("\u{a0}"));
    unescape_with(text, resolve).map_or_else(|_| text.to_string(), Cow::into_owned)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_osis_verse() {
        let raw = r#"<w lemma="strong:H07225">In the beginning</w> <w lemma="strong:H0430">God</w> created<note type="x">n</note>"#;
        let stripped = strip_markup(raw);
        assert_eq!(stripped.text, "In the beginning God created n");
        assert_eq!(stripped.annotations, 3);
    }

    #[test]
    fn test_self_closing_and_entities() {
        let stripped = strip_markup("Faith&amp;hope<br/>love &lt;charity&gt;");
        assert_eq!(stripped.text, "Faith&hope love <charity>");
        assert_eq!(stripped.annotations, 1);
    }

    #[test]
    fn test_numeric_entities() {
        let stripped = strip_markup("the Lord&#8217;s <i>servant</i>&#x2019;s&nbsp;house");
        assert_eq!(stripped.text, "the Lord\u{2019}s servant \u{2019}s house");
        assert_eq!(stripped.annotations, 1);
    }

    #[test]
    fn test_stray_ampersand_left_alone() {
        assert_eq!(strip_markup("Faith & hope").text, "Faith & hope");
        assert!(contains_markup("Faith & hope"));
    }

    #[test]
    fn test_plain_text_untouched() {
        let stripped = strip_markup("  Jesus wept. ");
        assert_eq!(stripped.text, "Jesus wept.");
        assert_eq!(stripped.annotations, 0);
        assert!(!contains_markup("Jesus wept."));
    }

    #[test]
    fn test_comparison_is_not_a_tag() {
        assert_eq!(strip_markup("a < b and c > d").text, "a < b and c > d");
    }

    #[test]
    fn test_chapter_markers() {
        assert!(has_chapter_marker(r#"<chapter osisID="Gen.1" sID="Gen.1"/>In the beginning"#));
        assert!(has_chapter_marker(r#"<div type="chapter" n="1">"#));
        assert!(has_chapter_marker("<DIV class='x' type='chapter'>"));
        assert!(!has_chapter_marker(r#"<div type="book">"#));
        assert!(!has_chapter_marker("chapter one"));
    }

    #[test]
    fn test_count_tokens() {
        assert_eq!(count_tokens("In the  beginning\nGod"), 4);
        assert_eq!(count_tokens(""), 0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn plain_text_only_loses_whitespace(text in "[A-Za-z0-9 .,;:!?'\n\t-]{0,200}") {
                let stripped = strip_markup(&text);
                prop_assert_eq!(stripped.annotations, 0);
                prop_assert_eq!(stripped.text, text.split_whitespace().collect::<Vec<_>>().join(" "));
            }
        }
    }
}
