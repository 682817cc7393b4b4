/// Complex field support for header/footer runs.
///
/// A complex field is spread over consecutive runs delimited by field
/// characters: `begin`, the instruction text, `separate`, the cached result,
/// and `end`. Consumers recompute the result (page numbers, page counts) at
/// render time; the cached result is only a placeholder.
use crate::common::xml::escape_checked;
use crate::ooxml::error::Result;

use super::section::PageNumberFormat;

/// The `w:fldCharType` attribute of a `w:fldChar` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCharType {
    /// Field start character
    Begin,
    /// Field separator character
    Separate,
    /// Field end character
    End,
}

impl FieldCharType {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::Separate => "separate",
            Self::End => "end",
        }
    }

    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "begin" => Some(Self::Begin),
            "separate" => Some(Self::Separate),
            "end" => Some(Self::End),
            _ => None,
        }
    }
}

/// A field such as `PAGE` or `NUMPAGES`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableField {
    /// Field instruction (e.g., "PAGE \* roman")
    instruction: String,
    /// Cached result shown until the consumer updates the field
    result: Option<String>,
}

impl MutableField {
    /// Create a field from its instruction text.
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            result: None,
        }
    }

    /// Create a field with a cached result value.
    pub fn with_result(instruction: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            result: Some(result.into()),
        }
    }

    /// Create a PAGE field (current page number).
    pub fn page(format: PageNumberFormat) -> Self {
        match format {
            PageNumberFormat::Decimal => Self::with_result("PAGE", "1"),
            other => Self::with_result(format!("PAGE \\* {}", other.field_switch()), "1"),
        }
    }

    /// Create a NUMPAGES field (total page count).
    pub fn num_pages() -> Self {
        Self::with_result("NUMPAGES", "1")
    }

    #[inline]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    #[inline]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Write the field as a sequence of complete `w:r` elements.
    ///
    /// `run_props` is the already-serialized `w:rPr` (possibly empty) repeated
    /// on every run so the field result picks up the run formatting.
    pub(crate) fn write_runs(&self, xml: &mut String, run_props: &str) -> Result<()> {
        Self::write_char(xml, run_props, FieldCharType::Begin);

        xml.push_str("<w:r>");
        xml.push_str(run_props);
        xml.push_str(r#"<w:instrText xml:space="preserve"> "#);
        xml.push_str(&escape_checked(&self.instruction)?);
        xml.push_str(" </w:instrText></w:r>");

        Self::write_char(xml, run_props, FieldCharType::Separate);

        if let Some(ref result) = self.result {
            xml.push_str("<w:r>");
            xml.push_str(run_props);
            xml.push_str("<w:t>");
            xml.push_str(&escape_checked(result)?);
            xml.push_str("</w:t></w:r>");
        }

        Self::write_char(xml, run_props, FieldCharType::End);
        Ok(())
    }

    fn write_char(xml: &mut String, run_props: &str, kind: FieldCharType) {
        xml.push_str("<w:r>");
        xml.push_str(run_props);
        xml.push_str(r#"<w:fldChar w:fldCharType=""#);
        xml.push_str(kind.as_str());
        xml.push_str(r#""/></w:r>"#);
    }
}
