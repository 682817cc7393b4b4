//! `[Content_Types].xml` registry.
//!
//! Overrides are append-only: each created part appends one entry and nothing
//! is ever removed. Appending the same partname twice is accepted; when the
//! manifest is serialized the latest override for a partname wins.

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{XML_DECLARATION, content_type as ct, namespace};
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// One `<Override>` entry binding an absolute partname to a content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentTypeOverride {
    pub partname: String,
    pub content_type: String,
}

/// Document-wide content type table.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    /// Default content types by extension, in registration order
    defaults: Vec<(String, String)>,

    /// Override entries in append order (duplicates kept)
    overrides: Vec<ContentTypeOverride>,
}

impl ContentTypes {
    /// Create a table holding the standard `rels` and `xml` defaults.
    pub fn new() -> Self {
        Self {
            defaults: vec![
                ("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string()),
                ("xml".to_string(), ct::XML.to_string()),
            ],
            overrides: Vec::new(),
        }
    }

    /// Append an override for an absolute partname (e.g. "/word/header1.xml").
    pub fn add_override(&mut self, partname: &str, content_type: &str) {
        tracing::debug!(partname, content_type, "content type override added");
        self.overrides.push(ContentTypeOverride {
            partname: partname.to_string(),
            content_type: content_type.to_string(),
        });
    }

    /// All override entries in append order, including superseded duplicates.
    #[inline]
    pub fn overrides(&self) -> &[ContentTypeOverride] {
        &self.overrides
    }

    /// Resolve the content type of a partname: latest override first, then the
    /// extension default.
    pub fn content_type_for(&self, partname: &str) -> Option<&str> {
        if let Some(ov) = self.overrides.iter().rev().find(|o| o.partname == partname) {
            return Some(ov.content_type.as_str());
        }
        let ext = partname.rsplit_once('.').map(|(_, ext)| ext)?;
        self.defaults
            .iter()
            .find(|(e, _)| e == ext)
            .map(|(_, ct)| ct.as_str())
    }

    /// Overrides collapsed to one per partname: first-appearance order, latest value.
    fn effective_overrides(&self) -> Vec<(&str, &str)> {
        let mut slots: HashMap<&str, usize> = HashMap::with_capacity(self.overrides.len());
        let mut out: Vec<(&str, &str)> = Vec::with_capacity(self.overrides.len());
        for ov in &self.overrides {
            match slots.get(ov.partname.as_str()) {
                Some(&i) => out[i].1 = ov.content_type.as_str(),
                None => {
                    slots.insert(ov.partname.as_str(), out.len());
                    out.push((ov.partname.as_str(), ov.content_type.as_str()));
                },
            }
        }
        out
    }

    /// Generate the XML for [Content_Types].xml.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + self.overrides.len() * 160);

        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        let _ = write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES);
        xml.push('\n');

        for (ext, content_type) in &self.defaults {
            let _ = write!(
                xml,
                r#"  <Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            );
            xml.push('\n');
        }

        for (partname, content_type) in self.effective_overrides() {
            let _ = write!(
                xml,
                r#"  <Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            );
            xml.push('\n');
        }

        xml.push_str("</Types>");

        xml
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}
