/// Paragraph types and implementation for DOCX documents.
use crate::common::xml::escape_checked;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

use super::bookmark::MutableBookmark;
use super::run::MutableRun;

/// Paragraph alignment (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphAlignment {
    Left,
    Center,
    Right,
    Justify,
}

impl ParagraphAlignment {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "both",
        }
    }
}

/// Elements that can appear in a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphElement {
    Run(MutableRun),
    BookmarkStart(MutableBookmark),
    BookmarkEnd(u32),
}

/// A mutable paragraph in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutableParagraph {
    pub(crate) elements: Vec<ParagraphElement>,
    /// Paragraph style ID
    pub(crate) style: Option<String>,
    pub(crate) properties: ParagraphProperties,
}

impl MutableParagraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph holding a single text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut para = Self::new();
        para.add_run_with_text(text);
        para
    }

    /// Add a new run to the paragraph.
    pub fn add_run(&mut self) -> &mut MutableRun {
        self.push_run(MutableRun::new())
    }

    /// Add a run with text.
    pub fn add_run_with_text(&mut self, text: impl Into<String>) -> &mut MutableRun {
        self.push_run(MutableRun::with_text(text))
    }

    fn push_run(&mut self, run: MutableRun) -> &mut MutableRun {
        self.elements.push(ParagraphElement::Run(run));
        match self.elements.last_mut() {
            Some(ParagraphElement::Run(r)) => r,
            _ => unreachable!(),
        }
    }

    /// Open a bookmark at the current end of the paragraph.
    pub fn add_bookmark_start(&mut self, bookmark: MutableBookmark) {
        self.elements.push(ParagraphElement::BookmarkStart(bookmark));
    }

    /// Close the bookmark with `id` at the current end of the paragraph.
    pub fn add_bookmark_end(&mut self, id: u32) {
        self.elements.push(ParagraphElement::BookmarkEnd(id));
    }

    /// Bookmark starts opened in this paragraph.
    pub fn bookmarks(&self) -> impl Iterator<Item = &MutableBookmark> {
        self.elements.iter().filter_map(|e| match e {
            ParagraphElement::BookmarkStart(b) => Some(b),
            _ => None,
        })
    }

    /// Whether this paragraph closes the bookmark with `id`.
    pub fn closes_bookmark(&self, id: u32) -> bool {
        self.elements
            .iter()
            .any(|e| matches!(e, ParagraphElement::BookmarkEnd(end) if *end == id))
    }

    /// Runs of the paragraph in order.
    pub fn runs(&self) -> impl Iterator<Item = &MutableRun> {
        self.elements.iter().filter_map(|e| match e {
            ParagraphElement::Run(r) => Some(r),
            _ => None,
        })
    }

    /// Concatenated text of all text runs.
    pub fn text(&self) -> String {
        self.runs().map(MutableRun::text).collect()
    }

    /// Set the paragraph style.
    pub fn set_style(&mut self, style_id: impl Into<String>) {
        self.style = Some(style_id.into());
    }

    #[inline]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    /// Set paragraph alignment.
    pub fn set_alignment(&mut self, alignment: ParagraphAlignment) {
        self.properties.alignment = Some(alignment);
    }

    /// Set left indentation in twips.
    pub fn set_indent_left_twips(&mut self, twips: u32) {
        self.properties.indent_left = Some(twips);
    }

    /// Left indentation in twips, if set.
    #[inline]
    pub fn indent_left(&self) -> Option<u32> {
        self.properties.indent_left
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:p>");

        if self.style.is_some() || self.properties.has_properties() {
            xml.push_str("<w:pPr>");

            if let Some(ref style) = self.style {
                write!(xml, "<w:pStyle w:val=\"{}\"/>", escape_checked(style)?)?;
            }

            if let Some(left) = self.properties.indent_left {
                write!(xml, "<w:ind w:left=\"{}\"/>", left)?;
            }

            if let Some(alignment) = self.properties.alignment {
                write!(xml, "<w:jc w:val=\"{}\"/>", alignment.as_str())?;
            }

            xml.push_str("</w:pPr>");
        }

        for element in &self.elements {
            match element {
                ParagraphElement::Run(run) => run.to_xml(xml)?,
                ParagraphElement::BookmarkStart(bookmark) => bookmark.write_start(xml)?,
                ParagraphElement::BookmarkEnd(id) => MutableBookmark::write_end(*id, xml)?,
            }
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}

/// Paragraph properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ParagraphProperties {
    pub(crate) alignment: Option<ParagraphAlignment>,
    pub(crate) indent_left: Option<u32>,
}

impl ParagraphProperties {
    pub(crate) fn has_properties(&self) -> bool {
        self.alignment.is_some() || self.indent_left.is_some()
    }
}
