/// Document writer implementation for DOCX.
use std::sync::Arc;

use crate::common::id::IdAllocator;
use crate::ooxml::docx::enums::{HeaderFooterRole, WdHeaderFooter};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{XML_DECLARATION, content_type, namespace, relationship_type};
use crate::ooxml::opc::packuri::{DOCUMENT_URI, PACKAGE_URI};
use crate::ooxml::opc::{ContentTypes, PackURI, PartStore, Relationships};

use super::config::{SlotPolicy, WriterConfig};
use super::header_footer::HeaderFooter;
use super::outline::{TocEntry, scan_headings};
use super::paragraph::MutableParagraph;
use super::section::SectionProperties;
use super::table::MutableTable;
use super::toc::{TableOfContents, find_toc_block};

/// A mutable Word document for writing.
///
/// Owns the body, the section properties, the header/footer parts and the
/// package registries (relationships and content types). Serialized parts
/// land in a [`PartStore`] shared with every header and footer.
///
/// Mutation goes through `&mut self`, so a header's relationship, content
/// type override and section reference are always recorded together. Wrap the
/// document in a [`SharedDocument`](super::SharedDocument) to build it from
/// several threads.
#[derive(Debug)]
pub struct MutableDocument {
    body: DocumentBody,
    /// Materialized by the first header, footer or column break
    section: Option<SectionProperties>,
    headers: Vec<HeaderFooter>,
    footers: Vec<HeaderFooter>,
    /// `_rels/.rels`
    package_rels: Relationships,
    /// `word/_rels/document.xml.rels`
    document_rels: Relationships,
    content_types: ContentTypes,
    parts: Arc<PartStore>,
    header_ordinals: IdAllocator,
    footer_ordinals: IdAllocator,
    bookmark_ids: IdAllocator,
    config: WriterConfig,
}

impl MutableDocument {
    /// Create a new empty document with default configuration.
    pub fn new() -> Self {
        Self::with_config(WriterConfig::default())
    }

    pub fn with_config(config: WriterConfig) -> Self {
        Self::with_parts(Arc::new(PartStore::new()), config)
    }

    /// Create a document that stores its parts in an existing store.
    pub fn with_parts(parts: Arc<PartStore>, config: WriterConfig) -> Self {
        let mut package_rels = Relationships::new(PACKAGE_URI);
        package_rels.add_relationship(relationship_type::OFFICE_DOCUMENT, &DOCUMENT_URI[1..]);

        let mut content_types = ContentTypes::new();
        content_types.add_override(DOCUMENT_URI, content_type::WML_DOCUMENT_MAIN);

        Self {
            body: DocumentBody::default(),
            section: None,
            headers: Vec::new(),
            footers: Vec::new(),
            package_rels,
            document_rels: Relationships::new("/word"),
            content_types,
            parts,
            header_ordinals: IdAllocator::new(),
            footer_ordinals: IdAllocator::new(),
            bookmark_ids: IdAllocator::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    /// Store receiving serialized parts.
    #[inline]
    pub fn parts(&self) -> &Arc<PartStore> {
        &self.parts
    }

    /// Relationships of the main document part.
    #[inline]
    pub fn relationships(&self) -> &Relationships {
        &self.document_rels
    }

    /// Package-level relationships.
    #[inline]
    pub fn package_relationships(&self) -> &Relationships {
        &self.package_rels
    }

    #[inline]
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Section properties, if a header, footer or column break created them.
    #[inline]
    pub fn section(&self) -> Option<&SectionProperties> {
        self.section.as_ref()
    }

    /// Section properties, creating them with defaults if absent.
    pub fn section_mut(&mut self) -> &mut SectionProperties {
        self.section.get_or_insert_with(SectionProperties::default)
    }

    /// Add a header part displayed on pages of `kind`.
    pub fn add_header(&mut self, kind: WdHeaderFooter) -> Result<&mut HeaderFooter> {
        self.add_header_footer(HeaderFooterRole::Header, kind)
    }

    /// Add a footer part displayed on pages of `kind`.
    pub fn add_footer(&mut self, kind: WdHeaderFooter) -> Result<&mut HeaderFooter> {
        self.add_header_footer(HeaderFooterRole::Footer, kind)
    }

    fn add_header_footer(
        &mut self,
        role: HeaderFooterRole,
        kind: WdHeaderFooter,
    ) -> Result<&mut HeaderFooter> {
        let occupied = self
            .section
            .as_ref()
            .is_some_and(|s| s.reference(role, kind).is_some());
        if occupied && self.config.slot_policy == SlotPolicy::Reject {
            return Err(OoxmlError::SlotOccupied {
                role: role.stem(),
                kind: kind.to_xml(),
            });
        }

        let (ordinals, reltype, ct) = match role {
            HeaderFooterRole::Header => (
                &self.header_ordinals,
                relationship_type::HEADER,
                content_type::WML_HEADER,
            ),
            HeaderFooterRole::Footer => (
                &self.footer_ordinals,
                relationship_type::FOOTER,
                content_type::WML_FOOTER,
            ),
        };

        let stored = self.parts.count_with_prefix(&format!("word/{}", role.stem()));
        let ordinal = ordinals.next_above(u32::try_from(stored).unwrap_or(u32::MAX - 1));
        let partname = PackURI::indexed("/word", role.stem(), ordinal)?;

        let r_id = self.document_rels.add_relationship(reltype, partname.filename());
        self.content_types.add_override(partname.as_str(), ct);
        let previous = self.section_mut().set_reference(role, kind, r_id.as_str());

        if let Some(previous) = previous {
            tracing::warn!(
                role = role.stem(),
                kind = kind.to_xml(),
                previous = previous.as_str(),
                current = r_id.as_str(),
                "{} slot replaced; the earlier part stays in the package",
                role
            );
        }
        tracing::debug!(
            part = partname.as_str(),
            r_id = r_id.as_str(),
            kind = kind.to_xml(),
            "allocated {} part",
            role
        );

        let part = HeaderFooter::new(role, kind, ordinal, r_id, partname, Arc::clone(&self.parts));
        let list = match role {
            HeaderFooterRole::Header => &mut self.headers,
            HeaderFooterRole::Footer => &mut self.footers,
        };
        list.push(part);
        let last = list.len() - 1;
        Ok(&mut list[last])
    }

    /// All headers in creation order, including replaced ones.
    #[inline]
    pub fn headers(&self) -> &[HeaderFooter] {
        &self.headers
    }

    /// All footers in creation order, including replaced ones.
    #[inline]
    pub fn footers(&self) -> &[HeaderFooter] {
        &self.footers
    }

    /// Header currently referenced by the section for `kind`.
    pub fn header(&self, kind: WdHeaderFooter) -> Option<&HeaderFooter> {
        self.active(HeaderFooterRole::Header, kind)
    }

    /// Footer currently referenced by the section for `kind`.
    pub fn footer(&self, kind: WdHeaderFooter) -> Option<&HeaderFooter> {
        self.active(HeaderFooterRole::Footer, kind)
    }

    fn active(&self, role: HeaderFooterRole, kind: WdHeaderFooter) -> Option<&HeaderFooter> {
        let r_id = self.section.as_ref()?.reference(role, kind)?;
        let list = match role {
            HeaderFooterRole::Header => &self.headers,
            HeaderFooterRole::Footer => &self.footers,
        };
        list.iter().find(|part| part.r_id() == r_id)
    }

    /// Add a new paragraph to the end of the document.
    pub fn add_paragraph(&mut self) -> &mut MutableParagraph {
        self.body.push_paragraph(MutableParagraph::new())
    }

    /// Add a paragraph with text.
    pub fn add_paragraph_with_text(&mut self, text: &str) -> &mut MutableParagraph {
        self.body.push_paragraph(MutableParagraph::with_text(text))
    }

    /// Add a heading paragraph styled `Title` (level 0) or `Heading{level}`.
    pub fn add_heading(&mut self, text: &str, level: u8) -> Result<&mut MutableParagraph> {
        if level > 9 {
            return Err(OoxmlError::InvalidFormat(format!(
                "heading level must be 0-9, got {}",
                level
            )));
        }
        let mut para = MutableParagraph::with_text(text);
        if level == 0 {
            para.set_style("Title");
        } else {
            para.set_style(format!("Heading{}", level));
        }
        Ok(self.body.push_paragraph(para))
    }

    /// Add a table with specified rows and columns.
    pub fn add_table(&mut self, rows: usize, cols: usize) -> &mut MutableTable {
        self.body.push_table(MutableTable::new(rows, cols))
    }

    /// Add a paragraph holding a page break.
    pub fn add_page_break(&mut self) -> &mut MutableParagraph {
        let para = self.add_paragraph();
        para.add_run().add_page_break();
        para
    }

    /// Add a paragraph holding a column break.
    pub fn add_column_break(&mut self) -> &mut MutableParagraph {
        self.section_mut();
        let para = self.add_paragraph();
        para.add_run().add_column_break();
        para
    }

    #[inline]
    pub fn body(&self) -> &DocumentBody {
        &self.body
    }

    pub fn paragraph_count(&self) -> usize {
        self.body.paragraph_count()
    }

    pub fn table_count(&self) -> usize {
        self.body.table_count()
    }

    /// Headings of the body in document order.
    pub fn heading_structure(&self) -> Vec<TocEntry> {
        scan_headings(self.body.elements())
    }

    /// A table of contents builder seeded from this document's configuration.
    pub fn new_table_of_contents(&self) -> TableOfContents {
        TableOfContents::from_config(&self.config.toc)
    }

    /// Build a table of contents and insert it at the start of the body.
    ///
    /// Calling this again inserts another block in front of the first one;
    /// use [`replace_table_of_contents`](Self::replace_table_of_contents) to
    /// refresh an existing table.
    pub fn add_table_of_contents(&mut self, mut toc: TableOfContents) -> TableOfContents {
        let block_id = self.bookmark_ids.next();
        let paragraphs = toc.synthesize(self.body.elements(), block_id);
        self.body.insert_paragraphs(0, paragraphs);
        toc
    }

    /// Rebuild the first table of contents in place.
    ///
    /// The old block is removed before scanning, so its own entries are never
    /// picked up. Without an existing block this behaves like
    /// [`add_table_of_contents`](Self::add_table_of_contents).
    pub fn replace_table_of_contents(&mut self, mut toc: TableOfContents) -> TableOfContents {
        let at = match find_toc_block(self.body.elements()) {
            Some(range) => {
                let start = range.start;
                let removed = self.body.elements.drain(range).count();
                tracing::debug!(removed, at = start, "removed table of contents block");
                start
            },
            None => 0,
        };
        let block_id = self.bookmark_ids.next();
        let paragraphs = toc.synthesize(self.body.elements(), block_id);
        self.body.insert_paragraphs(at, paragraphs);
        toc
    }

    /// Serialize `word/document.xml`.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(XML_DECLARATION);
        xml.push_str("<w:document xmlns:w=\"");
        xml.push_str(namespace::WML_MAIN);
        xml.push_str("\" xmlns:r=\"");
        xml.push_str(namespace::OFC_RELATIONSHIPS);
        xml.push_str("\"><w:body>");

        for element in self.body.elements() {
            element.to_xml(&mut xml)?;
        }
        // The sectPr must be the last element in the body
        if let Some(ref section) = self.section {
            section.to_xml(&mut xml)?;
        }

        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }
}

impl Default for MutableDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// The document body: paragraphs and tables in page order.
#[derive(Debug, Clone, Default)]
pub struct DocumentBody {
    pub(crate) elements: Vec<BodyElement>,
}

impl DocumentBody {
    #[inline]
    pub fn elements(&self) -> &[BodyElement] {
        &self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn push_paragraph(&mut self, para: MutableParagraph) -> &mut MutableParagraph {
        self.elements.push(BodyElement::Paragraph(para));
        match self.elements.last_mut() {
            Some(BodyElement::Paragraph(p)) => p,
            _ => unreachable!(),
        }
    }

    fn push_table(&mut self, table: MutableTable) -> &mut MutableTable {
        self.elements.push(BodyElement::Table(table));
        match self.elements.last_mut() {
            Some(BodyElement::Table(t)) => t,
            _ => unreachable!(),
        }
    }

    /// Insert paragraphs before position `at`, keeping their order.
    fn insert_paragraphs(&mut self, at: usize, paragraphs: Vec<MutableParagraph>) {
        self.elements
            .splice(at..at, paragraphs.into_iter().map(BodyElement::Paragraph));
    }

    fn paragraph_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, BodyElement::Paragraph(_)))
            .count()
    }

    fn table_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|e| matches!(e, BodyElement::Table(_)))
            .count()
    }
}

/// A body element (paragraph or table).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyElement {
    Paragraph(MutableParagraph),
    Table(MutableTable),
}

impl BodyElement {
    /// The paragraph, if this element is one.
    pub fn as_paragraph(&self) -> Option<&MutableParagraph> {
        match self {
            Self::Paragraph(p) => Some(p),
            Self::Table(_) => None,
        }
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        match self {
            Self::Paragraph(p) => p.to_xml(xml),
            Self::Table(t) => t.to_xml(xml),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::writer::config::{SlotPolicy, TocConfig};
    use proptest::prelude::*;

    const KINDS: [WdHeaderFooter; 3] = [
        WdHeaderFooter::Primary,
        WdHeaderFooter::FirstPage,
        WdHeaderFooter::EvenPage,
    ];

    #[test]
    fn test_create_empty_document() {
        let doc = MutableDocument::new();
        assert_eq!(doc.paragraph_count(), 0);
        assert_eq!(doc.table_count(), 0);
        assert!(doc.section().is_none());
        assert!(doc.relationships().is_empty());
        assert_eq!(
            doc.content_types().content_type_for(DOCUMENT_URI),
            Some(content_type::WML_DOCUMENT_MAIN)
        );
    }

    #[test]
    fn test_add_paragraph_and_table() {
        let mut doc = MutableDocument::new();
        doc.add_paragraph_with_text("Hello, World!");
        let table = doc.add_table(2, 3);
        table.cell(0, 0).unwrap().set_text("Cell 1");
        assert_eq!(doc.paragraph_count(), 1);
        assert_eq!(doc.table_count(), 1);
    }

    #[test]
    fn test_add_heading_styles() {
        let mut doc = MutableDocument::new();
        assert_eq!(doc.add_heading("Doc", 0).unwrap().style(), Some("Title"));
        assert_eq!(doc.add_heading("Intro", 1).unwrap().style(), Some("Heading1"));
        assert!(matches!(
            doc.add_heading("Too deep", 10),
            Err(OoxmlError::InvalidFormat(_))
        ));

        let levels: Vec<_> = doc.heading_structure().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![0, 1]);
    }

    #[test]
    fn test_add_header_registers_everything() {
        let mut doc = MutableDocument::new();
        let header = doc.add_header(WdHeaderFooter::Primary).unwrap();
        assert_eq!(header.ordinal(), 1);
        assert_eq!(header.partname().as_str(), "/word/header1.xml");
        let r_id = header.r_id().to_string();

        let rel = doc.relationships().get(&r_id).unwrap();
        assert_eq!(rel.reltype(), relationship_type::HEADER);
        assert_eq!(rel.target_ref(), "header1.xml");
        assert_eq!(
            doc.content_types().content_type_for("/word/header1.xml"),
            Some(content_type::WML_HEADER)
        );
        assert_eq!(
            doc.section()
                .unwrap()
                .reference(HeaderFooterRole::Header, WdHeaderFooter::Primary),
            Some(r_id.as_str())
        );
        assert_eq!(doc.header(WdHeaderFooter::Primary).unwrap().r_id(), r_id);
    }

    #[test]
    fn test_ordinals_per_role() {
        let mut doc = MutableDocument::new();
        let h1 = doc.add_header(WdHeaderFooter::Primary).unwrap().ordinal();
        let f1 = doc.add_footer(WdHeaderFooter::Primary).unwrap().ordinal();
        let h2 = doc.add_header(WdHeaderFooter::FirstPage).unwrap().ordinal();
        assert_eq!((h1, f1, h2), (1, 1, 2));

        let ids: Vec<_> = doc.relationships().iter().map(|r| r.r_id()).collect();
        assert_eq!(ids, vec!["rId1", "rId2", "rId3"]);
    }

    #[test]
    fn test_ordinals_follow_store() {
        let parts = Arc::new(PartStore::new());
        parts.put("word/header1.xml", "x");
        parts.put("word/header2.xml", "x");
        let mut doc = MutableDocument::with_parts(parts, WriterConfig::default());
        assert_eq!(doc.add_header(WdHeaderFooter::Primary).unwrap().ordinal(), 3);
    }

    proptest! {
        #[test]
        fn prop_ordinals_increase_per_role(
            calls in proptest::collection::vec((any::<bool>(), 0usize..3), 1..24),
            save_each in any::<bool>(),
        ) {
            let mut doc = MutableDocument::new();
            let mut last = [0u32; 2];
            for (is_header, kind) in calls {
                let (slot, prefix) = if is_header { (0, "word/header") } else { (1, "word/footer") };
                let stored = doc.parts().count_with_prefix(prefix) as u32;
                let part = if is_header {
                    doc.add_header(KINDS[kind])
                } else {
                    doc.add_footer(KINDS[kind])
                }
                .unwrap();

                prop_assert_eq!(part.ordinal(), last[slot] + 1);
                if save_each {
                    prop_assert_eq!(part.ordinal(), stored + 1);
                    part.save().unwrap();
                }
                last[slot] = part.ordinal();
            }
        }
    }

    #[test]
    fn test_replace_policy_keeps_old_part() {
        let mut doc = MutableDocument::new();
        let first = doc.add_header(WdHeaderFooter::Primary).unwrap().r_id().to_string();
        let second = doc.add_header(WdHeaderFooter::Primary).unwrap().r_id().to_string();

        assert_eq!(doc.headers().len(), 2);
        assert_eq!(doc.relationships().len(), 2);
        assert_eq!(doc.content_types().overrides().len(), 3);
        assert_eq!(doc.header(WdHeaderFooter::Primary).unwrap().r_id(), second);
        assert_ne!(first, second);
    }

    #[test]
    fn test_reject_policy_allocates_nothing() {
        let config = WriterConfig::new().with_slot_policy(SlotPolicy::Reject);
        let mut doc = MutableDocument::with_config(config);
        doc.add_footer(WdHeaderFooter::EvenPage).unwrap();

        let err = doc.add_footer(WdHeaderFooter::EvenPage).unwrap_err();
        assert!(matches!(
            err,
            OoxmlError::SlotOccupied {
                role: "footer",
                kind: "even"
            }
        ));
        assert_eq!(doc.footers().len(), 1);
        assert_eq!(doc.relationships().len(), 1);
        assert_eq!(doc.add_footer(WdHeaderFooter::Primary).unwrap().ordinal(), 2);
    }

    #[test]
    fn test_toc_seeded_from_config() {
        let toc_config = TocConfig {
            title: "Contents".to_string(),
            max_level: 2,
            ..TocConfig::default()
        };
        let mut doc = MutableDocument::with_config(WriterConfig::new().with_toc(toc_config));
        doc.add_heading("Intro", 1).unwrap();
        doc.add_heading("Deep", 3).unwrap();

        let toc = doc.new_table_of_contents();
        let toc = doc.add_table_of_contents(toc);
        assert_eq!(toc.get_title(), "Contents");
        assert_eq!(toc.entries().len(), 1);
    }

    #[test]
    fn test_toc_with_huge_indentation_unit() {
        let mut doc = MutableDocument::new();
        doc.add_heading("Deep", 3).unwrap();
        let toc = doc.new_table_of_contents().indentation(u32::MAX / 2 + 1);
        let toc = doc.add_table_of_contents(toc);

        assert_eq!(toc.entries()[0].indentation, u32::MAX);
        let entry = doc.body().elements()[2].as_paragraph().unwrap();
        assert_eq!(entry.indent_left(), Some(u32::MAX));
    }

    #[test]
    fn test_column_break_materializes_section() {
        let mut doc = MutableDocument::new();
        doc.add_column_break();
        assert!(doc.section().is_some());
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains(r#"<w:br w:type="column"/>"#));
        assert!(xml.contains("<w:sectPr>"));
    }

    #[test]
    fn test_document_xml() {
        let mut doc = MutableDocument::new();
        doc.add_paragraph_with_text("Test paragraph");
        let xml = doc.to_xml().unwrap();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains("<w:body><w:p>"));
        assert!(xml.contains("Test paragraph"));
        assert!(!xml.contains("<w:sectPr>"));

        doc.add_footer(WdHeaderFooter::Primary).unwrap();
        let xml = doc.to_xml().unwrap();
        assert!(xml.contains(r#"<w:footerReference w:type="default" r:id="rId1"/>"#));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_replace_table_of_contents() {
        let mut doc = MutableDocument::new();
        doc.add_paragraph_with_text("Preface");
        doc.add_heading("Intro", 1).unwrap();

        let toc = doc.new_table_of_contents();
        doc.add_table_of_contents(toc);
        assert_eq!(doc.body().len(), 5);

        doc.add_heading("Appendix", 1).unwrap();
        let toc = doc.replace_table_of_contents(doc.new_table_of_contents());
        assert_eq!(toc.entries().len(), 2);
        assert_eq!(doc.body().len(), 7);

        let texts: Vec<_> = doc
            .body()
            .elements()
            .iter()
            .filter_map(BodyElement::as_paragraph)
            .map(MutableParagraph::text)
            .collect();
        assert_eq!(texts[0], "Table of Contents");
        assert_eq!(texts[4], "Preface");
        assert_eq!(texts[6], "Appendix");
    }

    #[test]
    fn test_replace_without_block_prepends() {
        let mut doc = MutableDocument::new();
        doc.add_heading("Only", 2).unwrap();
        let toc = doc.replace_table_of_contents(TableOfContents::new());
        assert_eq!(toc.entries().len(), 1);
        assert_eq!(doc.body().len(), 4);
    }
}
