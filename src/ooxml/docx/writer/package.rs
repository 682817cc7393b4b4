/// Package assembly: every part of a document rendered into its part store.
///
/// Zip packaging is left to the caller; the store holds the members keyed by
/// their archive names (`[Content_Types].xml`, `_rels/.rels`,
/// `word/document.xml`, ...).
use rayon::prelude::*;

use crate::ooxml::error::Result;
use crate::ooxml::opc::PackURI;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, DOCUMENT_URI, PACKAGE_URI};

use super::doc::MutableDocument;
use super::header_footer::HeaderFooter;

/// Renders a document's parts and stores them.
///
/// All parts are rendered before anything is stored, so a failure leaves
/// the store exactly as it was.
pub struct PackageWriter<'a> {
    doc: &'a MutableDocument,
}

impl<'a> PackageWriter<'a> {
    pub fn new(doc: &'a MutableDocument) -> Self {
        Self { doc }
    }

    /// Render every part as `(membername, xml)` without storing anything.
    ///
    /// Package-level parts come first, then headers and footers in creation
    /// order.
    pub fn render(&self) -> Result<Vec<(String, String)>> {
        let doc = self.doc;
        let document = PackURI::new(DOCUMENT_URI)?;
        let package = PackURI::new(PACKAGE_URI)?;

        let mut rendered = vec![
            (
                CONTENT_TYPES_URI[1..].to_string(),
                doc.content_types().to_xml(),
            ),
            (
                package.rels_uri()?.membername().to_string(),
                doc.package_relationships().to_xml(),
            ),
            (document.membername().to_string(), doc.to_xml()?),
            (
                document.rels_uri()?.membername().to_string(),
                doc.relationships().to_xml(),
            ),
        ];

        let parts: Vec<&HeaderFooter> = doc.headers().iter().chain(doc.footers()).collect();
        let render_part = |part: &&HeaderFooter| -> Result<(String, String)> {
            Ok((part.partname().membername().to_string(), part.to_xml()?))
        };
        let header_footer_parts = if doc.config().parallel_save {
            parts.par_iter().map(render_part).collect::<Result<Vec<_>>>()?
        } else {
            parts.iter().map(render_part).collect::<Result<Vec<_>>>()?
        };
        rendered.extend(header_footer_parts);

        Ok(rendered)
    }

    /// Render and store every part.
    pub fn write(&self) -> Result<()> {
        let rendered = self.render()?;
        let count = rendered.len();
        for (name, xml) in rendered {
            self.doc.parts().put(name, xml.into_bytes());
        }
        tracing::debug!(parts = count, "package saved");
        Ok(())
    }
}

impl MutableDocument {
    /// Store every part of the document, headers and footers included.
    ///
    /// Can be called any number of times; each call reflects the current
    /// state and overwrites earlier output.
    pub fn save(&self) -> Result<()> {
        PackageWriter::new(self).write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::enums::WdHeaderFooter;
    use crate::ooxml::docx::writer::config::WriterConfig;
    use crate::ooxml::opc::constants::content_type;

    fn sample(config: WriterConfig) -> MutableDocument {
        let mut doc = MutableDocument::with_config(config);
        doc.add_heading("Intro", 1).unwrap();
        doc.add_header(WdHeaderFooter::Primary)
            .unwrap()
            .add_paragraph("Header");
        doc.add_footer(WdHeaderFooter::Primary)
            .unwrap()
            .add_empty_paragraph()
            .add_run()
            .add_page_number(Default::default());
        doc
    }

    #[test]
    fn test_save_writes_all_parts() {
        let doc = sample(WriterConfig::default());
        doc.save().unwrap();

        assert_eq!(
            doc.parts().paths(),
            vec![
                "[Content_Types].xml",
                "_rels/.rels",
                "word/_rels/document.xml.rels",
                "word/document.xml",
                "word/footer1.xml",
                "word/header1.xml",
            ]
        );

        let types = doc.parts().get("[Content_Types].xml").unwrap();
        let types = std::str::from_utf8(&types).unwrap();
        assert!(types.contains(r#"PartName="/word/header1.xml""#));
        assert!(types.contains(content_type::WML_FOOTER));

        let rels = doc.parts().get("_rels/.rels").unwrap();
        assert!(std::str::from_utf8(&rels).unwrap().contains(r#"Target="word/document.xml""#));
    }

    #[test]
    fn test_parallel_and_sequential_render_match() {
        let parallel = sample(WriterConfig::default());
        let sequential = sample(WriterConfig::new().with_parallel_save(false));
        assert_eq!(
            PackageWriter::new(&parallel).render().unwrap(),
            PackageWriter::new(&sequential).render().unwrap()
        );
    }

    #[test]
    fn test_failed_save_stores_nothing() {
        let mut doc = sample(WriterConfig::default());
        doc.add_footer(WdHeaderFooter::EvenPage)
            .unwrap()
            .add_paragraph("\u{FFFF}");
        assert!(doc.save().is_err());
        assert!(doc.parts().is_empty());
    }
}
