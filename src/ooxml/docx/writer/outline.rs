/// Heading discovery over a document body.
///
/// A paragraph is a heading when its style id is `Title` (level 0) or begins
/// with `Heading`. A single digit `1`-`9` directly after the prefix gives the
/// level; anything else (no suffix, `7x`, `10`, ` 2`) falls back to 1.
use super::doc::BodyElement;
use super::paragraph::MutableParagraph;

/// Sentinel prefix of every bookmark derived from a heading.
pub const TOC_BOOKMARK_PREFIX: &str = "_TOC_";

/// Maximum number of characters kept from the heading text.
const BOOKMARK_BODY_LEN: usize = 40;

/// A heading found in the body, as listed in a table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub text: String,
    /// 0 for `Title`, 1-9 for `HeadingN`
    pub level: u8,
    pub bookmark_id: String,
    /// Style id of the source paragraph
    pub style: String,
    /// Left indentation of the synthesized entry in twips; 0 until synthesized
    pub indentation: u32,
    /// Position of the source paragraph among the body's children
    pub body_index: usize,
}

/// Outline level of a paragraph style, or `None` if it is not a heading style.
pub fn heading_level(style: &str) -> Option<u8> {
    if style == "Title" {
        return Some(0);
    }
    let rest = style.strip_prefix("Heading")?;
    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c @ '1'..='9'), None) => Some(c as u8 - b'0'),
        _ => Some(1),
    }
}

/// Derive the bookmark name for a heading.
///
/// ASCII letters and digits are kept, spaces become `_`, everything else is
/// dropped; the result is cut to 40 characters and prefixed with `_TOC_`.
pub fn assign_bookmark_id(text: &str) -> String {
    let mut id = String::with_capacity(TOC_BOOKMARK_PREFIX.len() + BOOKMARK_BODY_LEN);
    id.push_str(TOC_BOOKMARK_PREFIX);
    id.extend(
        text.chars()
            .filter_map(|c| match c {
                c if c.is_ascii_alphanumeric() => Some(c),
                ' ' => Some('_'),
                _ => None,
            })
            .take(BOOKMARK_BODY_LEN),
    );
    id
}

/// Build the entry for one paragraph, if it is a non-empty heading.
pub(crate) fn heading_entry(para: &MutableParagraph, body_index: usize) -> Option<TocEntry> {
    let style = para.style()?;
    let level = heading_level(style)?;
    let text = para.text();
    if text.is_empty() {
        return None;
    }
    Some(TocEntry {
        bookmark_id: assign_bookmark_id(&text),
        text,
        level,
        style: style.to_string(),
        indentation: 0,
        body_index,
    })
}

/// All headings among the top-level paragraphs, in document order.
///
/// Paragraphs without a style or with empty text are skipped; tables are
/// not descended into.
pub fn scan_headings(body: &[BodyElement]) -> Vec<TocEntry> {
    body.iter()
        .enumerate()
        .filter_map(|(index, element)| match element {
            BodyElement::Paragraph(para) => heading_entry(para, index),
            BodyElement::Table(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::writer::table::MutableTable;
    use proptest::prelude::*;

    fn styled(style: &str, text: &str) -> BodyElement {
        let mut para = MutableParagraph::with_text(text);
        para.set_style(style);
        BodyElement::Paragraph(para)
    }

    #[test]
    fn test_heading_levels() {
        assert_eq!(heading_level("Heading2"), Some(2));
        assert_eq!(heading_level("Heading"), Some(1));
        assert_eq!(heading_level("Heading7x"), Some(1));
        assert_eq!(heading_level("Heading10"), Some(1));
        assert_eq!(heading_level("Heading 2"), Some(1));
        assert_eq!(heading_level("Heading0"), Some(1));
        assert_eq!(heading_level("Title"), Some(0));
        assert_eq!(heading_level("heading2"), None);
        assert_eq!(heading_level("Normal"), None);
        assert_eq!(heading_level("Subtitle"), None);
    }

    #[test]
    fn test_bookmark_id_normalization() {
        assert_eq!(assign_bookmark_id("Getting Started!"), "_TOC_Getting_Started");
        assert_eq!(assign_bookmark_id("Ünïcode-ok 2"), "_TOC_ncodeok_2");
        assert_eq!(assign_bookmark_id(""), "_TOC_");
        let long = "a".repeat(100);
        assert_eq!(assign_bookmark_id(&long).len(), 45);
    }

    #[test]
    fn test_scan_skips_non_headings() {
        let mut unstyled_heading = MutableParagraph::new();
        unstyled_heading.add_run_with_text("No style");

        let body = vec![
            styled("Title", "Report"),
            styled("Heading1", "Intro"),
            BodyElement::Paragraph(unstyled_heading),
            styled("Normal", "body text"),
            styled("Heading2", ""),
            BodyElement::Table(MutableTable::new(1, 1)),
            styled("Heading2", "Sub"),
        ];

        let entries = scan_headings(&body);
        let summary: Vec<_> = entries
            .iter()
            .map(|e| (e.text.as_str(), e.level, e.body_index))
            .collect();
        assert_eq!(
            summary,
            vec![("Report", 0, 0), ("Intro", 1, 1), ("Sub", 2, 6)]
        );
        assert_eq!(entries[1].bookmark_id, "_TOC_Intro");
        assert_eq!(entries[2].style, "Heading2");
    }

    #[test]
    fn test_scan_empty_body() {
        assert!(scan_headings(&[]).is_empty());
    }

    #[test]
    fn test_heading_text_ignores_fields() {
        let mut para = MutableParagraph::new();
        para.set_style("Heading1");
        para.add_run_with_text("Chapter ");
        para.add_run().add_page_count();
        para.add_run_with_text("One");
        let entry = heading_entry(&para, 0).unwrap();
        assert_eq!(entry.text, "Chapter One");
    }

    proptest! {
        #[test]
        fn prop_bookmark_id_shape(text in ".{0,120}") {
            let id = assign_bookmark_id(&text);
            prop_assert!(id.starts_with(TOC_BOOKMARK_PREFIX));
            prop_assert!(id.len() <= TOC_BOOKMARK_PREFIX.len() + 40);
            prop_assert!(id[TOC_BOOKMARK_PREFIX.len()..]
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_'));
            prop_assert_eq!(id, assign_bookmark_id(&text));
        }

        #[test]
        fn prop_heading_digit_levels(level in 1u8..=9) {
            prop_assert_eq!(heading_level(&format!("Heading{level}")), Some(level));
        }
    }
}
