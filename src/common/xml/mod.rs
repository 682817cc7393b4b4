//! XML text helpers shared by every part writer.

mod escape;

pub use escape::{escape_checked, escape_xml, is_xml_char};
