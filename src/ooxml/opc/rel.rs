/// Relationship-related objects for OPC packages.
///
/// Each relationship container (the package itself, or one source part) owns its
/// own id space. Ids are handed out by a monotonic counter and are never reused,
/// even when the relationship they named is later superseded.
use crate::common::id::IdAllocator;
use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{XML_DECLARATION, namespace};
use std::fmt::Write as FmtWrite;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference, relative to the source part's directory
    target_ref: String,
}

impl Relationship {
    /// Create a new relationship.
    pub fn new(r_id: String, reltype: String, target_ref: String) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
        }
    }

    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }
}

/// Collection of relationships from a single source.
///
/// Relationships are kept in allocation order, which is also the order they
/// are serialized in.
#[derive(Debug)]
pub struct Relationships {
    /// Base URI of the source part (e.g. "/word" for document.xml, "/" for the package)
    base_uri: String,

    /// Relationships in allocation order
    rels: Vec<Relationship>,

    /// Source of "rIdN" numbers for this container
    ids: IdAllocator,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Base URI that targets in this container are relative to.
    #[inline]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Record a relationship and return its newly allocated id.
    pub fn add_relationship(&mut self, reltype: &str, target_ref: &str) -> String {
        let r_id = Self::format_r_id(self.ids.next());
        tracing::debug!(r_id = %r_id, reltype, target_ref, base = %self.base_uri, "relationship added");
        self.rels.push(Relationship::new(
            r_id.clone(),
            reltype.to_string(),
            target_ref.to_string(),
        ));
        r_id
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id() == r_id)
    }

    /// Iterate over relationships of one type, in allocation order.
    pub fn with_reltype<'a>(&'a self, reltype: &'a str) -> impl Iterator<Item = &'a Relationship> {
        self.rels.iter().filter(move |rel| rel.reltype() == reltype)
    }

    /// Get an iterator over all relationships.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    fn format_r_id(n: u32) -> String {
        let mut buf = itoa::Buffer::new();
        let mut r_id = String::with_capacity(8);
        r_id.push_str("rId");
        r_id.push_str(buf.format(n));
        r_id
    }

    /// Serialize relationships to XML format.
    ///
    /// Generates the XML for a .rels file in allocation order.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(XML_DECLARATION);
        xml.push('\n');
        let _ = write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS);
        xml.push('\n');

        for rel in &self.rels {
            let _ = write!(
                xml,
                r#"  <Relationship Id="{}" Type="{}" Target="{}"/>"#,
                escape_xml(rel.r_id()),
                escape_xml(rel.reltype()),
                escape_xml(rel.target_ref()),
            );
            xml.push('\n');
        }

        xml.push_str("</Relationships>");

        xml
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type as rt;

    #[test]
    fn test_ids_are_monotonic() {
        let mut rels = Relationships::new("/word");

        assert_eq!(rels.add_relationship(rt::HEADER, "header1.xml"), "rId1");
        assert_eq!(rels.add_relationship(rt::FOOTER, "footer1.xml"), "rId2");
        // Same target again is a new relationship, never a reused id
        assert_eq!(rels.add_relationship(rt::HEADER, "header1.xml"), "rId3");
        assert_eq!(rels.len(), 3);
    }

    #[test]
    fn test_containers_are_independent() {
        let mut pkg = Relationships::default();
        let mut doc = Relationships::new("/word");

        assert_eq!(pkg.add_relationship(rt::OFFICE_DOCUMENT, "word/document.xml"), "rId1");
        assert_eq!(doc.add_relationship(rt::HEADER, "header1.xml"), "rId1");
    }

    #[test]
    fn test_lookup() {
        let mut rels = Relationships::new("/word");
        let id = rels.add_relationship(rt::FOOTER, "footer1.xml");

        let rel = rels.get(&id).unwrap();
        assert_eq!(rel.reltype(), rt::FOOTER);
        assert_eq!(rel.target_ref(), "footer1.xml");
        assert!(rels.get("rId9").is_none());
        assert_eq!(rels.with_reltype(rt::HEADER).count(), 0);
    }

    #[test]
    fn test_to_xml_order_and_escaping() {
        let mut rels = Relationships::new("/word");
        rels.add_relationship(rt::HEADER, "header1.xml");
        rels.add_relationship(rt::FOOTER, "a&b.xml");

        let xml = rels.to_xml();
        assert!(xml.starts_with(XML_DECLARATION));
        let first = xml.find(r#"Id="rId1""#).unwrap();
        let second = xml.find(r#"Id="rId2""#).unwrap();
        assert!(first < second);
        assert!(xml.contains(r#"Target="a&amp;b.xml""#));
    }
}
