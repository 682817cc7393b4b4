/// Open Packaging Conventions (OPC) building blocks for the writer.
///
/// This module provides the package-level bookkeeping every generated part
/// goes through:
///
/// - Part naming (`PackURI`)
/// - Relationship containers with monotonic `rIdN` allocation
/// - The `[Content_Types].xml` override table
/// - A thread-safe store for serialized part bytes
pub mod constants;
pub mod content_types;
pub mod packuri;
pub mod part_store;
pub mod rel;

// Re-export commonly used types
pub use content_types::{ContentTypeOverride, ContentTypes};
pub use packuri::PackURI;
pub use part_store::PartStore;
pub use rel::{Relationship, Relationships};
