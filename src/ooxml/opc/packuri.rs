/// Provides the PackURI value type for naming parts within a package.
///
/// A PackURI represents a part name within an OPC package, following the URI format
/// defined by the Open Packaging Conventions specification.
use crate::ooxml::error::{OoxmlError, Result};

/// Represents a package URI, which is a partname within an OPC package.
///
/// PackURIs always begin with a forward slash and use forward slashes as path separators.
/// The same part shows up in three spellings across a package:
///
/// - `/word/header1.xml` in `[Content_Types].xml` overrides ([`PackURI::as_str`])
/// - `word/header1.xml` as the archive member / part store key ([`PackURI::membername`])
/// - `header1.xml` as a relationship target from `/word/document.xml` ([`PackURI::filename`])
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackURI {
    /// The full pack URI string (e.g., "/word/document.xml")
    uri: String,
}

impl PackURI {
    /// Create a new PackURI from a string that must begin with a forward slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(OoxmlError::InvalidPartName(format!(
                "PackURI must begin with slash, got '{}'",
                uri
            )));
        }
        Ok(PackURI { uri })
    }

    /// Build a numbered XML partname such as `/word/header3.xml`.
    pub fn indexed(base_uri: &str, stem: &str, idx: u32) -> Result<Self> {
        let mut buf = itoa::Buffer::new();
        let base = base_uri.trim_end_matches('/');
        Self::new(format!("{}/{}{}.xml", base, stem, buf.format(idx)))
    }

    /// Get the base URI (directory portion) of this PackURI.
    ///
    /// For example, "/word" for "/word/header1.xml".
    /// For the package pseudo-partname "/", returns "/".
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Get the filename portion of this PackURI.
    ///
    /// For example, "header1.xml" for "/word/header1.xml".
    /// For the package pseudo-partname "/", returns an empty string.
    pub fn filename(&self) -> &str {
        match self.uri.rfind('/') {
            Some(pos) => &self.uri[pos + 1..],
            None => "",
        }
    }

    /// Get the extension portion of this PackURI (no leading period).
    pub fn ext(&self) -> &str {
        let filename = self.filename();
        match filename.rfind('.') {
            Some(pos) => &filename[pos + 1..],
            None => "",
        }
    }

    /// Get the partname index for tuple partnames, or None for singleton partnames.
    ///
    /// For example, returns 21 for "/word/footer21.xml" and None for "/word/document.xml".
    pub fn idx(&self) -> Option<u32> {
        let filename = self.filename();
        let name_part = match filename.rfind('.') {
            Some(pos) => &filename[..pos],
            None => filename,
        };
        let digits = name_part
            .bytes()
            .rev()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if digits == 0 || digits == name_part.len() {
            return None;
        }
        name_part[name_part.len() - digits..].parse::<u32>().ok()
    }

    /// Get the membername (URI with leading slash stripped).
    ///
    /// This is the form used as the archive membername and as the part store key.
    /// Returns an empty string for the package pseudo-partname "/".
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// Get the PackURI of the .rels part corresponding to this PackURI.
    ///
    /// For example, "/word/_rels/document.xml.rels" for "/word/document.xml",
    /// and "/_rels/.rels" for the package pseudo-partname.
    pub fn rels_uri(&self) -> Result<PackURI> {
        let filename = self.filename();
        let base_uri = self.base_uri();
        if base_uri == "/" {
            Self::new(format!("/_rels/{}.rels", filename))
        } else {
            Self::new(format!("{}/_rels/{}.rels", base_uri, filename))
        }
    }

    /// Get the full URI string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

/// The URI of the main document part
pub const DOCUMENT_URI: &str = "/word/document.xml";
