/// Run types and implementation for DOCX documents.
use crate::common::xml::escape_checked;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

use super::field::MutableField;
use super::section::PageNumberFormat;

/// Run content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunContent {
    /// Plain text
    Text(String),
    /// Complex field (page number, page count)
    Field(MutableField),
    /// Tab character
    Tab,
    /// Page break
    PageBreak,
    /// Column break
    ColumnBreak,
}

/// A mutable run.
///
/// Runs contain text and character formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableRun {
    pub(crate) content: RunContent,
    pub(crate) properties: RunProperties,
}

impl Default for MutableRun {
    fn default() -> Self {
        Self::new()
    }
}

impl MutableRun {
    /// Create an empty text run.
    pub fn new() -> Self {
        Self {
            content: RunContent::Text(String::new()),
            properties: RunProperties::default(),
        }
    }

    /// Create a run holding `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: RunContent::Text(text.into()),
            properties: RunProperties::default(),
        }
    }

    /// Set the text content.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.content = RunContent::Text(text.into());
        self
    }

    /// Text of the run; empty for fields and breaks.
    pub fn text(&self) -> &str {
        match &self.content {
            RunContent::Text(s) => s,
            _ => "",
        }
    }

    #[inline]
    pub fn content(&self) -> &RunContent {
        &self.content
    }

    /// Make the text bold.
    pub fn bold(&mut self, bold: bool) -> &mut Self {
        self.properties.bold = Some(bold);
        self
    }

    #[inline]
    pub fn is_bold(&self) -> bool {
        self.properties.bold.unwrap_or(false)
    }

    /// Make the text italic.
    pub fn italic(&mut self, italic: bool) -> &mut Self {
        self.properties.italic = Some(italic);
        self
    }

    /// Set font size in half-points (e.g., 24 = 12pt).
    pub fn font_size(&mut self, size: u32) -> &mut Self {
        self.properties.font_size = Some(size);
        self
    }

    #[inline]
    pub fn size(&self) -> Option<u32> {
        self.properties.font_size
    }

    /// Set text color using hex RGB (e.g., "FF0000" for red).
    pub fn color(&mut self, color: &str) -> &mut Self {
        self.properties.color = Some(color.to_string());
        self
    }

    /// Turn the run into a page break.
    pub fn add_page_break(&mut self) -> &mut Self {
        self.content = RunContent::PageBreak;
        self
    }

    /// Turn the run into a column break.
    pub fn add_column_break(&mut self) -> &mut Self {
        self.content = RunContent::ColumnBreak;
        self
    }

    /// Turn the run into a page number field.
    pub fn add_page_number(&mut self, format: PageNumberFormat) -> &mut Self {
        self.content = RunContent::Field(MutableField::page(format));
        self
    }

    /// Turn the run into a page count field (total pages).
    pub fn add_page_count(&mut self) -> &mut Self {
        self.content = RunContent::Field(MutableField::num_pages());
        self
    }

    /// Turn the run into a tab character.
    pub fn add_tab(&mut self) -> &mut Self {
        self.content = RunContent::Tab;
        self
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        let mut rpr = String::new();
        self.properties.to_xml(&mut rpr)?;

        if let RunContent::Field(field) = &self.content {
            return field.write_runs(xml, &rpr);
        }

        xml.push_str("<w:r>");
        xml.push_str(&rpr);

        match &self.content {
            RunContent::Text(text) if !text.is_empty() => {
                write!(
                    xml,
                    "<w:t xml:space=\"preserve\">{}</w:t>",
                    escape_checked(text)?
                )?;
            },
            RunContent::Tab => xml.push_str("<w:tab/>"),
            RunContent::PageBreak => xml.push_str("<w:br w:type=\"page\"/>"),
            RunContent::ColumnBreak => xml.push_str("<w:br w:type=\"column\"/>"),
            _ => {},
        }

        xml.push_str("</w:r>");
        Ok(())
    }
}

/// Run properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RunProperties {
    pub(crate) bold: Option<bool>,
    pub(crate) italic: Option<bool>,
    pub(crate) font_size: Option<u32>,
    pub(crate) color: Option<String>,
}

impl RunProperties {
    /// Write `w:rPr`, or nothing when no property would be emitted.
    fn to_xml(&self, xml: &mut String) -> Result<()> {
        let bold = self.bold == Some(true);
        let italic = self.italic == Some(true);
        if !bold && !italic && self.font_size.is_none() && self.color.is_none() {
            return Ok(());
        }

        xml.push_str("<w:rPr>");
        if bold {
            xml.push_str("<w:b/>");
        }
        if italic {
            xml.push_str("<w:i/>");
        }
        if let Some(ref color) = self.color {
            write!(xml, "<w:color w:val=\"{}\"/>", escape_checked(color)?)?;
        }
        if let Some(size) = self.font_size {
            write!(xml, "<w:sz w:val=\"{}\"/>", size)?;
        }
        xml.push_str("</w:rPr>");
        Ok(())
    }
}
