/// Table types and implementation for DOCX documents.
use crate::common::xml::escape_checked;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

use super::paragraph::MutableParagraph;

/// Border applied to every edge and inner line of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableBorder {
    /// Border width in eighths of a point (e.g., 8 = 1pt)
    pub size: u32,
    /// Border color in hex RGB format
    pub color: String,
}

impl Default for TableBorder {
    fn default() -> Self {
        Self {
            size: 4,
            color: "000000".to_string(),
        }
    }
}

/// A mutable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableTable {
    pub(crate) rows: Vec<MutableRow>,
    /// Width in fiftieths of a percent
    width_pct: u32,
    /// `None` draws no borders
    border: Option<TableBorder>,
}

impl MutableTable {
    pub fn new(rows: usize, cols: usize) -> Self {
        let mut table = Self {
            rows: Vec::with_capacity(rows),
            width_pct: 5000,
            border: Some(TableBorder::default()),
        };
        for _ in 0..rows {
            table.add_row(cols);
        }
        table
    }

    /// Add a new row with specified column count.
    pub fn add_row(&mut self, cols: usize) -> &mut MutableRow {
        self.rows.push(MutableRow::new(cols));
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Set table width as a percentage of the text area (1-100).
    pub fn set_width_percent(&mut self, percent: u32) {
        self.width_pct = percent.clamp(1, 100) * 50;
    }

    /// Set or clear the border drawn around and inside the table.
    pub fn set_border(&mut self, border: Option<TableBorder>) {
        self.border = border;
    }

    /// Get a cell by row and column index.
    pub fn cell(&mut self, row: usize, col: usize) -> Option<&mut MutableCell> {
        self.rows.get_mut(row)?.cell(col)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a row by index.
    pub fn row(&mut self, index: usize) -> Option<&mut MutableRow> {
        self.rows.get_mut(index)
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tbl><w:tblPr>");
        write!(xml, "<w:tblW w:w=\"{}\" w:type=\"pct\"/>", self.width_pct)?;

        if let Some(ref border) = self.border {
            let color = escape_checked(&border.color)?;
            xml.push_str("<w:tblBorders>");
            for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
                write!(
                    xml,
                    "<w:{} w:val=\"single\" w:sz=\"{}\" w:space=\"0\" w:color=\"{}\"/>",
                    edge, border.size, color
                )?;
            }
            xml.push_str("</w:tblBorders>");
        }
        xml.push_str("</w:tblPr>");

        if let Some(first_row) = self.rows.first() {
            xml.push_str("<w:tblGrid>");
            for _ in 0..first_row.cell_count() {
                xml.push_str("<w:gridCol/>");
            }
            xml.push_str("</w:tblGrid>");
        }

        for row in &self.rows {
            row.to_xml(xml)?;
        }

        xml.push_str("</w:tbl>");
        Ok(())
    }
}

/// A mutable table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableRow {
    pub(crate) cells: Vec<MutableCell>,
}

impl MutableRow {
    pub(crate) fn new(cols: usize) -> Self {
        Self {
            cells: (0..cols).map(|_| MutableCell::new()).collect(),
        }
    }

    /// Get a cell by index.
    pub fn cell(&mut self, index: usize) -> Option<&mut MutableCell> {
        self.cells.get_mut(index)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tr>");
        for cell in &self.cells {
            cell.to_xml(xml)?;
        }
        xml.push_str("</w:tr>");
        Ok(())
    }
}

/// A mutable table cell.
///
/// A cell always holds at least one paragraph, as WordprocessingML requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableCell {
    pub(crate) paragraphs: Vec<MutableParagraph>,
    background_color: Option<String>,
}

impl MutableCell {
    pub(crate) fn new() -> Self {
        Self {
            paragraphs: vec![MutableParagraph::new()],
            background_color: None,
        }
    }

    /// Add a new paragraph to the cell.
    pub fn add_paragraph(&mut self) -> &mut MutableParagraph {
        self.paragraphs.push(MutableParagraph::new());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Replace the cell content with a single paragraph of text.
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs.clear();
        self.paragraphs.push(MutableParagraph::with_text(text));
    }

    /// Concatenated text of the cell's paragraphs.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(MutableParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Set cell background color in hex RGB format (e.g., "FFFF00" for yellow).
    pub fn set_background_color(&mut self, color: &str) {
        self.background_color = Some(color.to_string());
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tc>");

        if let Some(ref bg_color) = self.background_color {
            write!(
                xml,
                "<w:tcPr><w:shd w:val=\"clear\" w:color=\"auto\" w:fill=\"{}\"/></w:tcPr>",
                escape_checked(bg_color)?
            )?;
        }

        for para in &self.paragraphs {
            para.to_xml(xml)?;
        }
        // An empty cell still needs a paragraph to be valid.
        if self.paragraphs.is_empty() {
            xml.push_str("<w:p/>");
        }

        xml.push_str("</w:tc>");
        Ok(())
    }
}
