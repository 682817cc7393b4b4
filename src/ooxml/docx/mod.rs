/// Word (.docx) document support.
///
/// Documents are built in memory with [`writer::MutableDocument`]. Header and
/// footer parts, the table of contents and the package registries all hang
/// off the document; [`writer::MutableDocument::save`] renders every part
/// into the document's part store.
///
/// # Example
///
/// ```rust
/// use docx_parts::ooxml::docx::enums::WdHeaderFooter;
/// use docx_parts::ooxml::docx::writer::MutableDocument;
///
/// let mut doc = MutableDocument::new();
/// doc.add_heading("Intro", 1)?;
/// doc.add_paragraph_with_text("body text");
/// doc.add_header(WdHeaderFooter::Primary)?.add_paragraph("Quarterly report");
///
/// let toc = doc.new_table_of_contents();
/// doc.add_table_of_contents(toc);
/// doc.save()?;
///
/// assert!(doc.parts().contains("word/header1.xml"));
/// # Ok::<(), docx_parts::ooxml::OoxmlError>(())
/// ```
pub mod enums;
pub mod writer;

pub use enums::{HeaderFooterRole, WdHeaderFooter};
pub use writer::{HeaderFooter, MutableDocument, SharedDocument, TableOfContents};
