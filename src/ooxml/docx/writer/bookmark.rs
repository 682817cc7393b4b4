/// Bookmark writer support for DOCX documents.
use crate::common::xml::escape_checked;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// A named location in a document, usable as a hyperlink anchor.
///
/// The synthesized TOC block is delimited by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableBookmark {
    /// Bookmark ID, unique within the document
    id: u32,
    /// Bookmark name
    name: String,
}

impl MutableBookmark {
    /// Create a new bookmark.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write the `w:bookmarkStart` element.
    pub(crate) fn write_start(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            r#"<w:bookmarkStart w:id="{}" w:name="{}"/>"#,
            self.id,
            escape_checked(&self.name)?
        )?;
        Ok(())
    }

    /// Write the `w:bookmarkEnd` element for a bookmark id.
    pub(crate) fn write_end(id: u32, xml: &mut String) -> Result<()> {
        write!(xml, r#"<w:bookmarkEnd w:id="{}"/>"#, id)?;
        Ok(())
    }
}
