//! Mutable document writer components for DOCX.
//!
//! This module provides the writer API for building Word documents in memory:
//! body content, header/footer parts, a synthesized table of contents, and
//! package assembly into a [`PartStore`](crate::ooxml::opc::PartStore).

pub mod bookmark;
pub mod config;
pub mod doc;
pub mod field;
pub mod header_footer;
pub mod outline;
pub mod package;
pub mod paragraph;
pub mod run;
pub mod section;
pub mod shared;
pub mod table;
pub mod toc;

// Re-export main document types
pub use doc::{BodyElement, DocumentBody, MutableDocument};

pub use config::{PageEstimate, SlotPolicy, TocConfig, WriterConfig};

pub use header_footer::HeaderFooter;

pub use section::{HeaderFooterReference, PageNumberFormat, PageOrientation, SectionProperties};

pub use paragraph::{MutableParagraph, ParagraphAlignment, ParagraphElement};

pub use run::{MutableRun, RunContent};

pub use table::{MutableCell, MutableRow, MutableTable, TableBorder};

pub use bookmark::MutableBookmark;

pub use field::{FieldCharType, MutableField};

pub use outline::{TocEntry, assign_bookmark_id, heading_level, scan_headings};

pub use toc::{TOC_BLOCK_BOOKMARK, TableOfContents};

pub use package::PackageWriter;

pub use shared::SharedDocument;
