/// Section properties: page geometry and header/footer references.
use crate::common::xml::escape_checked;
use crate::ooxml::docx::enums::{HeaderFooterRole, WdHeaderFooter};
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Page number format for headers/footers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageNumberFormat {
    /// Decimal numbers (1, 2, 3, ...)
    #[default]
    Decimal,
    /// Uppercase Roman numerals (I, II, III, ...)
    UpperRoman,
    /// Lowercase Roman numerals (i, ii, iii, ...)
    LowerRoman,
    /// Uppercase letters (A, B, C, ...)
    UpperLetter,
    /// Lowercase letters (a, b, c, ...)
    LowerLetter,
}

impl PageNumberFormat {
    /// Value of `w:pgNumType/@w:fmt`.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::UpperRoman => "upperRoman",
            Self::LowerRoman => "lowerRoman",
            Self::UpperLetter => "upperLetter",
            Self::LowerLetter => "lowerLetter",
        }
    }

    /// Format switch used in a `PAGE \* <switch>` field instruction.
    pub(crate) fn field_switch(&self) -> &'static str {
        match self {
            Self::Decimal => "Arabic",
            Self::UpperRoman => "ROMAN",
            Self::LowerRoman => "roman",
            Self::UpperLetter => "ALPHABETIC",
            Self::LowerLetter => "alphabetic",
        }
    }
}

/// Page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageOrientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageOrientation {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// A header or footer reference held by a section: `{type, r:id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFooterReference {
    pub kind: WdHeaderFooter,
    pub r_id: String,
}

/// Section properties including page setup, margins and header/footer references.
#[derive(Debug, Clone)]
pub struct SectionProperties {
    /// Page width in twips (twentieth of a point, 1440 = 1 inch)
    pub page_width: u32,
    /// Page height in twips
    pub page_height: u32,
    pub orientation: PageOrientation,
    /// Top margin in twips
    pub margin_top: u32,
    /// Bottom margin in twips
    pub margin_bottom: u32,
    /// Left margin in twips
    pub margin_left: u32,
    /// Right margin in twips
    pub margin_right: u32,
    /// Header distance from top in twips
    pub header_distance: u32,
    /// Footer distance from bottom in twips
    pub footer_distance: u32,
    /// Number of text columns
    pub columns: u32,
    /// Space between columns in twips
    pub column_spacing: u32,
    /// Page number format applied to PAGE fields
    pub page_number_format: Option<PageNumberFormat>,
    headers: [Option<String>; 3],
    footers: [Option<String>; 3],
}

impl Default for SectionProperties {
    fn default() -> Self {
        // US Letter size: 8.5" x 11" = 12240 x 15840 twips
        Self {
            page_width: 12240,
            page_height: 15840,
            orientation: PageOrientation::Portrait,
            margin_top: 1440,
            margin_bottom: 1440,
            margin_left: 1440,
            margin_right: 1440,
            header_distance: 720,
            footer_distance: 720,
            columns: 1,
            column_spacing: 720,
            page_number_format: None,
            headers: [None, None, None],
            footers: [None, None, None],
        }
    }
}

impl SectionProperties {
    /// Create A4 page size (210mm x 297mm).
    pub fn a4() -> Self {
        Self {
            page_width: 11906,
            page_height: 16838,
            ..Default::default()
        }
    }

    /// Set page to landscape orientation.
    pub fn landscape(mut self) -> Self {
        if self.orientation == PageOrientation::Portrait {
            self.orientation = PageOrientation::Landscape;
            std::mem::swap(&mut self.page_width, &mut self.page_height);
        }
        self
    }

    /// Set margins (all in inches).
    pub fn margins(mut self, top: f64, bottom: f64, left: f64, right: f64) -> Self {
        self.margin_top = (top * 1440.0) as u32;
        self.margin_bottom = (bottom * 1440.0) as u32;
        self.margin_left = (left * 1440.0) as u32;
        self.margin_right = (right * 1440.0) as u32;
        self
    }

    /// Set the number of text columns (at least one).
    pub fn set_columns(&mut self, count: u32) {
        self.columns = count.max(1);
    }

    /// Point the `(role, kind)` slot at a relationship id.
    ///
    /// Returns the relationship id previously held by the slot, if any.
    pub fn set_reference(
        &mut self,
        role: HeaderFooterRole,
        kind: WdHeaderFooter,
        r_id: impl Into<String>,
    ) -> Option<String> {
        self.slots_mut(role)[kind.slot()].replace(r_id.into())
    }

    /// Relationship id held by the `(role, kind)` slot.
    pub fn reference(&self, role: HeaderFooterRole, kind: WdHeaderFooter) -> Option<&str> {
        self.slots(role)[kind.slot()].as_deref()
    }

    /// All occupied references for a role, in `default`, `first`, `even` order.
    pub fn references(&self, role: HeaderFooterRole) -> Vec<HeaderFooterReference> {
        WdHeaderFooter::ALL
            .iter()
            .filter_map(|&kind| {
                self.reference(role, kind).map(|r_id| HeaderFooterReference {
                    kind,
                    r_id: r_id.to_string(),
                })
            })
            .collect()
    }

    /// Whether a first-page header or footer is set, which requires `w:titlePg`.
    pub fn has_first_page(&self) -> bool {
        self.reference(HeaderFooterRole::Header, WdHeaderFooter::FirstPage).is_some()
            || self.reference(HeaderFooterRole::Footer, WdHeaderFooter::FirstPage).is_some()
    }

    fn slots(&self, role: HeaderFooterRole) -> &[Option<String>; 3] {
        match role {
            HeaderFooterRole::Header => &self.headers,
            HeaderFooterRole::Footer => &self.footers,
        }
    }

    fn slots_mut(&mut self, role: HeaderFooterRole) -> &mut [Option<String>; 3] {
        match role {
            HeaderFooterRole::Header => &mut self.headers,
            HeaderFooterRole::Footer => &mut self.footers,
        }
    }

    pub(crate) fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:sectPr>");

        for role in [HeaderFooterRole::Header, HeaderFooterRole::Footer] {
            for reference in self.references(role) {
                write!(
                    xml,
                    r#"<{} w:type="{}" r:id="{}"/>"#,
                    role.reference_element(),
                    reference.kind.to_xml(),
                    escape_checked(&reference.r_id)?
                )?;
            }
        }

        write!(
            xml,
            r#"<w:pgSz w:w="{}" w:h="{}""#,
            self.page_width, self.page_height
        )?;
        if self.orientation == PageOrientation::Landscape {
            write!(xml, r#" w:orient="{}""#, self.orientation.as_str())?;
        }
        xml.push_str("/>");

        write!(
            xml,
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="{}" w:footer="{}" w:gutter="0"/>"#,
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
            self.header_distance,
            self.footer_distance
        )?;

        if let Some(format) = self.page_number_format {
            write!(xml, r#"<w:pgNumType w:fmt="{}"/>"#, format.as_str())?;
        }

        if self.columns > 1 {
            write!(
                xml,
                r#"<w:cols w:num="{}" w:space="{}"/>"#,
                self.columns, self.column_spacing
            )?;
        } else {
            write!(xml, r#"<w:cols w:space="{}"/>"#, self.column_spacing)?;
        }

        if self.has_first_page() {
            xml.push_str("<w:titlePg/>");
        }

        xml.push_str("</w:sectPr>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(section: &SectionProperties) -> String {
        let mut xml = String::new();
        section.to_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_default_section_xml() {
        let xml = render(&SectionProperties::default());
        assert!(xml.starts_with("<w:sectPr><w:pgSz w:w=\"12240\" w:h=\"15840\"/>"));
        assert!(!xml.contains("headerReference"));
        assert!(!xml.contains("titlePg"));
        assert!(xml.ends_with("</w:sectPr>"));
    }

    #[test]
    fn test_set_reference_returns_previous() {
        let mut section = SectionProperties::default();
        assert_eq!(
            section.set_reference(HeaderFooterRole::Header, WdHeaderFooter::Primary, "rId1"),
            None
        );
        assert_eq!(
            section.set_reference(HeaderFooterRole::Header, WdHeaderFooter::Primary, "rId4"),
            Some("rId1".to_string())
        );
        assert_eq!(
            section.reference(HeaderFooterRole::Header, WdHeaderFooter::Primary),
            Some("rId4")
        );
        assert_eq!(
            section.reference(HeaderFooterRole::Footer, WdHeaderFooter::Primary),
            None
        );
    }

    #[test]
    fn test_references_in_xml() {
        let mut section = SectionProperties::default();
        section.set_reference(HeaderFooterRole::Footer, WdHeaderFooter::EvenPage, "rId3");
        section.set_reference(HeaderFooterRole::Header, WdHeaderFooter::FirstPage, "rId2");
        section.set_reference(HeaderFooterRole::Header, WdHeaderFooter::Primary, "rId1");

        let xml = render(&section);
        let h1 = xml
            .find(r#"<w:headerReference w:type="default" r:id="rId1"/>"#)
            .unwrap();
        let h2 = xml
            .find(r#"<w:headerReference w:type="first" r:id="rId2"/>"#)
            .unwrap();
        let f3 = xml
            .find(r#"<w:footerReference w:type="even" r:id="rId3"/>"#)
            .unwrap();
        assert!(h1 < h2 && h2 < f3);
        assert!(xml.contains("<w:titlePg/>"));
        assert!(section.has_first_page());
    }

    #[test]
    fn test_columns_and_landscape() {
        let mut section = SectionProperties::a4().landscape();
        section.set_columns(2);
        let xml = render(&section);
        assert!(xml.contains(r#"<w:pgSz w:w="16838" w:h="11906" w:orient="landscape"/>"#));
        assert!(xml.contains(r#"<w:cols w:num="2" w:space="720"/>"#));

        section.set_columns(0);
        assert_eq!(section.columns, 1);
    }
}
