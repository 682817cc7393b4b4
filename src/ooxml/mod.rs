//! Office Open XML (OOXML) package building.
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): part names, relationships, content types and the
//!    part store
//! 2. **Errors** (`error`): the error type shared by every writer
//! 3. **Word documents** (`docx`): the document model and its part writers
pub mod docx;
pub mod error;
pub mod opc;

pub use opc::{PackURI, PartStore};

pub use error::{OoxmlError, Result};
