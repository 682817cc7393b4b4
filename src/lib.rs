//! docx-parts - In-memory WordprocessingML package building
//!
//! This library assembles the parts of a Word (.docx) package in memory:
//! the main document body, header and footer parts, the relationship and
//! content-type registries that tie them together, and a table of contents
//! synthesized from the document's headings.
//!
//! # Features
//!
//! - **Part store**: thread-safe map from part name to serialized bytes
//! - **Registries**: monotonic `rIdN` allocation per relationship container
//!   and an append-only `[Content_Types].xml` override table
//! - **Headers and footers**: `word/header{N}.xml` / `word/footer{N}.xml`
//!   parts for the default, first-page and even-page slots
//! - **Table of contents**: heading scan, bookmark ids, dot leaders and
//!   estimated page numbers
//!
//! # Example
//!
//! ```
//! use docx_parts::ooxml::docx::enums::WdHeaderFooter;
//! use docx_parts::ooxml::docx::writer::{MutableDocument, PageNumberFormat};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = MutableDocument::new();
//! doc.add_heading("Intro", 1)?;
//! doc.add_paragraph_with_text("body text");
//! doc.add_heading("Sub", 2)?;
//!
//! let footer = doc.add_footer(WdHeaderFooter::Primary)?;
//! let para = footer.add_paragraph("Page ");
//! para.add_run().add_page_number(PageNumberFormat::Decimal);
//! footer.save()?;
//!
//! let toc = doc.add_table_of_contents(doc.new_table_of_contents());
//! assert_eq!(toc.entries().len(), 2);
//!
//! doc.save()?;
//! assert!(doc.parts().contains("word/document.xml"));
//! # Ok(())
//! # }
//! ```

/// Identifier allocation and XML text helpers
pub mod common;

/// OOXML (Office Open XML) package building
///
/// This module provides the OPC layer and the Word document writer.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::docx::writer::{MutableDocument, SharedDocument, TableOfContents, WriterConfig};
pub use ooxml::opc::PartStore;
pub use ooxml::{OoxmlError, Result};
