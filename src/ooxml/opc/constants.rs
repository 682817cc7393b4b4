/// Constant values related to the Open Packaging Convention.
///
/// This module contains content type URIs (like MIME-types) that specify a part's format,
/// XML namespaces, and relationship types used by the WordprocessingML writer.

/// Content type URIs (like MIME-types) that specify a part's format
pub mod content_type {
    // OPC
    pub const OPC_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";

    // WordprocessingML
    pub const WML_DOCUMENT_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const WML_FOOTER: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml";
    pub const WML_HEADER: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml";

    // Generic XML
    pub const XML: &str = "application/xml";
}

/// XML namespace URIs used in OPC packages
pub mod namespace {
    /// Office relationships namespace
    pub const OFC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// OPC relationships namespace
    pub const OPC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// OPC content types namespace
    pub const OPC_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";

    /// WordprocessingML main namespace
    pub const WML_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
}

/// Relationship type URIs used in OPC packages
pub mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const FOOTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/footer";
    pub const HEADER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/header";
}

/// The XML declaration prefixed to every generated part.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
