//! End-to-end scenarios over the public API.

use std::sync::Arc;

use docx_parts::ooxml::docx::enums::{HeaderFooterRole, WdHeaderFooter};
use docx_parts::ooxml::docx::writer::{
    BodyElement, MutableDocument, MutableParagraph, SharedDocument, SlotPolicy, TableOfContents,
    WriterConfig,
};
use docx_parts::ooxml::opc::PartStore;
use docx_parts::OoxmlError;

fn paragraphs(doc: &MutableDocument) -> Vec<&MutableParagraph> {
    doc.body()
        .elements()
        .iter()
        .filter_map(BodyElement::as_paragraph)
        .collect()
}

fn run_texts(para: &MutableParagraph) -> Vec<&str> {
    para.runs().map(|r| r.text()).collect()
}

#[test]
fn toc_is_prepended_before_original_content() {
    let mut doc = MutableDocument::new();
    doc.add_heading("Intro", 1).unwrap();
    doc.add_paragraph_with_text("body text");
    doc.add_heading("Sub", 2).unwrap();

    let toc = doc.add_table_of_contents(TableOfContents::new());
    assert_eq!(toc.entries().len(), 2);

    let paras = paragraphs(&doc);
    assert_eq!(paras.len(), 7);

    let title = paras[0].runs().next().unwrap();
    assert_eq!(title.text(), "Table of Contents");
    assert!(title.is_bold());
    assert_eq!(title.size(), Some(36));

    assert_eq!(paras[1].text(), "");

    let intro = paras[2];
    assert_eq!(run_texts(intro), vec!["Intro", " ", "....................", " 1"]);
    assert!(intro.runs().next().unwrap().is_bold());
    assert_eq!(intro.indent_left(), None);

    let sub = paras[3];
    assert_eq!(run_texts(sub), vec!["Sub", " ", "....................", " 1"]);
    assert!(!sub.runs().next().unwrap().is_bold());
    assert_eq!(sub.indent_left(), Some(20));

    assert_eq!(paras[4].text(), "Intro");
    assert_eq!(paras[4].style(), Some("Heading1"));
    assert_eq!(paras[5].text(), "body text");
    assert_eq!(paras[6].text(), "Sub");
    assert_eq!(paras[6].style(), Some("Heading2"));
}

#[test]
fn toc_level_filter_keeps_document_order() {
    let mut doc = MutableDocument::new();
    for (level, text) in [(3, "c"), (0, "title"), (4, "d"), (1, "a"), (2, "b")] {
        doc.add_heading(text, level).unwrap();
    }

    let toc = doc.add_table_of_contents(TableOfContents::new().heading_levels(1, 3));
    let listed: Vec<_> = toc
        .entries()
        .iter()
        .map(|e| (e.text.as_str(), e.level))
        .collect();
    assert_eq!(listed, vec![("c", 3), ("a", 1), ("b", 2)]);
}

#[test]
fn adding_toc_twice_duplicates_the_block() {
    let mut doc = MutableDocument::new();
    doc.add_heading("Intro", 1).unwrap();

    doc.add_table_of_contents(TableOfContents::new());
    doc.add_table_of_contents(TableOfContents::new());

    let titles = paragraphs(&doc)
        .iter()
        .filter(|p| p.text() == "Table of Contents")
        .count();
    assert_eq!(titles, 2);
}

#[test]
fn header_ordinals_track_the_store() {
    let mut doc = MutableDocument::new();
    for expected in 1..=4 {
        let header = doc.add_header(WdHeaderFooter::Primary).unwrap();
        assert_eq!(header.ordinal(), expected);
        assert_eq!(
            doc.parts().count_with_prefix("word/header"),
            (expected - 1) as usize
        );
        doc.headers().last().unwrap().save().unwrap();
    }
    assert_eq!(doc.parts().count_with_prefix("word/header"), 4);
}

#[test]
fn concurrent_header_saves_land_under_distinct_paths() {
    const N: usize = 16;
    let doc = SharedDocument::default();

    std::thread::scope(|s| {
        for i in 0..N {
            let doc = doc.clone();
            s.spawn(move || {
                let header = doc.with(|d| {
                    let header = d.add_header(WdHeaderFooter::Primary).unwrap();
                    header.add_paragraph(&format!("header {i}"));
                    header.clone()
                });
                // Saved outside the lock; the store synchronizes itself.
                header.save().unwrap();
            });
        }
    });

    let parts: &Arc<PartStore> = doc.parts();
    assert_eq!(parts.count_with_prefix("word/header"), N);
    for n in 1..=N {
        let bytes = parts.get(&format!("word/header{n}.xml")).unwrap();
        let xml = std::str::from_utf8(&bytes).unwrap();
        assert!(xml.contains("<w:hdr "));
        assert!(xml.ends_with("</w:hdr>"));
    }

    let doc = doc.into_inner().unwrap();
    assert_eq!(doc.relationships().len(), N);
}

#[test]
fn reject_policy_keeps_the_first_part() {
    let config = WriterConfig::new().with_slot_policy(SlotPolicy::Reject);
    let mut doc = MutableDocument::with_config(config);
    let first = doc
        .add_header(WdHeaderFooter::FirstPage)
        .unwrap()
        .r_id()
        .to_string();

    let err = doc.add_header(WdHeaderFooter::FirstPage).unwrap_err();
    assert!(matches!(err, OoxmlError::SlotOccupied { .. }));
    assert_eq!(err.to_string(), "header slot 'first' is already occupied");
    assert_eq!(
        doc.section()
            .unwrap()
            .reference(HeaderFooterRole::Header, WdHeaderFooter::FirstPage),
        Some(first.as_str())
    );
}

#[test]
fn saved_package_references_every_part() {
    let mut doc = MutableDocument::new();
    doc.add_paragraph_with_text("Hello");
    doc.add_header(WdHeaderFooter::Primary)
        .unwrap()
        .add_paragraph("Top");
    doc.add_footer(WdHeaderFooter::FirstPage)
        .unwrap()
        .add_paragraph("Bottom");
    doc.save().unwrap();

    let document = doc.parts().get("word/document.xml").unwrap();
    let document = std::str::from_utf8(&document).unwrap();
    assert!(document.contains(r#"<w:headerReference w:type="default" r:id="rId1"/>"#));
    assert!(document.contains(r#"<w:footerReference w:type="first" r:id="rId2"/>"#));
    assert!(document.contains("<w:titlePg/>"));

    let rels = doc.parts().get("word/_rels/document.xml.rels").unwrap();
    let rels = std::str::from_utf8(&rels).unwrap();
    assert!(rels.contains(r#"Target="header1.xml""#));
    assert!(rels.contains(r#"Target="footer1.xml""#));

    let types = doc.parts().get("[Content_Types].xml").unwrap();
    let types = std::str::from_utf8(&types).unwrap();
    assert!(types.contains(r#"PartName="/word/footer1.xml""#));
}
