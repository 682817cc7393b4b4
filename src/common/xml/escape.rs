use crate::ooxml::error::{OoxmlError, Result};
use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use docx_parts::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Whether `c` is allowed by the XML 1.0 `Char` production.
#[inline]
pub fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r')
        || matches!(c, '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// Escape text for element content or attribute values, rejecting characters
/// that cannot appear in an XML document at all.
///
/// # Examples
///
/// ```
/// use docx_parts::common::xml::escape_checked;
/// assert_eq!(escape_checked("R&D").unwrap(), "R&amp;D");
/// assert!(escape_checked("bell\u{7}").is_err());
/// ```
pub fn escape_checked(s: &str) -> Result<String> {
    if let Some(bad) = s.chars().find(|c| !is_xml_char(*c)) {
        return Err(OoxmlError::Xml(format!(
            "character U+{:04X} is not allowed in XML",
            bad as u32
        )));
    }
    Ok(escape_xml(s))
}
