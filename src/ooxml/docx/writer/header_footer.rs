/// Header and footer parts owned by a [`MutableDocument`](super::MutableDocument).
///
/// Each header or footer is its own package part (`word/header{N}.xml`,
/// `word/footer{N}.xml`) holding paragraphs and tables just like the body.
/// A part keeps a handle to the document's [`PartStore`] so it can be saved
/// independently, including from another thread.
use std::sync::Arc;

use crate::ooxml::docx::enums::{HeaderFooterRole, WdHeaderFooter};
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{XML_DECLARATION, namespace};
use crate::ooxml::opc::{PackURI, PartStore};

use super::doc::BodyElement;
use super::paragraph::MutableParagraph;
use super::table::MutableTable;

/// A header or footer under construction.
#[derive(Debug, Clone)]
pub struct HeaderFooter {
    role: HeaderFooterRole,
    kind: WdHeaderFooter,
    /// N in `header{N}.xml`
    ordinal: u32,
    /// Relationship id in `word/_rels/document.xml.rels`
    r_id: String,
    partname: PackURI,
    children: Vec<BodyElement>,
    store: Arc<PartStore>,
}

impl HeaderFooter {
    pub(crate) fn new(
        role: HeaderFooterRole,
        kind: WdHeaderFooter,
        ordinal: u32,
        r_id: String,
        partname: PackURI,
        store: Arc<PartStore>,
    ) -> Self {
        Self {
            role,
            kind,
            ordinal,
            r_id,
            partname,
            children: Vec::new(),
            store,
        }
    }

    #[inline]
    pub fn role(&self) -> HeaderFooterRole {
        self.role
    }

    /// Page kind this part is displayed on.
    #[inline]
    pub fn kind(&self) -> WdHeaderFooter {
        self.kind
    }

    #[inline]
    pub fn ordinal(&self) -> u32 {
        self.ordinal
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Absolute part name, e.g. `/word/header1.xml`.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Append a paragraph holding `text` as a single run.
    pub fn add_paragraph(&mut self, text: &str) -> &mut MutableParagraph {
        self.push_paragraph(MutableParagraph::with_text(text))
    }

    /// Append a paragraph without runs.
    pub fn add_empty_paragraph(&mut self) -> &mut MutableParagraph {
        self.push_paragraph(MutableParagraph::new())
    }

    fn push_paragraph(&mut self, para: MutableParagraph) -> &mut MutableParagraph {
        self.children.push(BodyElement::Paragraph(para));
        match self.children.last_mut() {
            Some(BodyElement::Paragraph(p)) => p,
            _ => unreachable!(),
        }
    }

    /// Append a table.
    pub fn add_table(&mut self, rows: usize, cols: usize) -> &mut MutableTable {
        self.children
            .push(BodyElement::Table(MutableTable::new(rows, cols)));
        match self.children.last_mut() {
            Some(BodyElement::Table(t)) => t,
            _ => unreachable!(),
        }
    }

    #[inline]
    pub fn children(&self) -> &[BodyElement] {
        &self.children
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Render the part: XML declaration, then the `w:hdr`/`w:ftr` root with
    /// the `w` and `r` namespaces and every child in insertion order.
    pub fn to_xml(&self) -> Result<String> {
        let root = self.role.root_element();
        let mut xml = String::with_capacity(512 + self.children.len() * 128);
        xml.push_str(XML_DECLARATION);
        xml.push('<');
        xml.push_str(root);
        xml.push_str(" xmlns:w=\"");
        xml.push_str(namespace::WML_MAIN);
        xml.push_str("\" xmlns:r=\"");
        xml.push_str(namespace::OFC_RELATIONSHIPS);
        xml.push_str("\">");

        for child in &self.children {
            child.to_xml(&mut xml)?;
        }

        xml.push_str("</");
        xml.push_str(root);
        xml.push('>');
        Ok(xml)
    }

    /// Serialize the part and store it under its member name.
    ///
    /// Nothing is written if rendering fails. Saving again overwrites the
    /// previous bytes with the current content.
    pub fn save(&self) -> Result<()> {
        let xml = self.to_xml()?;
        tracing::debug!(
            part = self.partname.as_str(),
            bytes = xml.len(),
            children = self.children.len(),
            "saving {} part",
            self.role
        );
        self.store.put(self.partname.membername(), xml.into_bytes());
        Ok(())
    }
}
