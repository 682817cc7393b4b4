/// Table of contents synthesis.
///
/// Unlike a `TOC` field that a word processor fills in on update, the table
/// built here is made of ordinary paragraphs: a bold title, a blank line and
/// one paragraph per heading, optionally followed by a dot leader and an
/// estimated page number. The whole block is wrapped in a `_TocBlock`
/// bookmark so it can be found and replaced later.
///
/// # Examples
///
/// ```rust
/// use docx_parts::ooxml::docx::writer::MutableDocument;
///
/// let mut doc = MutableDocument::new();
/// doc.add_heading("Intro", 1).unwrap();
/// doc.add_paragraph_with_text("body text");
///
/// let toc = doc.new_table_of_contents().heading_levels(1, 2);
/// let toc = doc.add_table_of_contents(toc);
/// assert_eq!(toc.entries().len(), 1);
/// ```
use std::ops::Range;

use super::bookmark::MutableBookmark;
use super::config::{PageEstimate, TocConfig};
use super::doc::BodyElement;
use super::outline::{TocEntry, scan_headings};
use super::paragraph::MutableParagraph;

/// Name of the bookmark delimiting a synthesized table of contents.
pub const TOC_BLOCK_BOOKMARK: &str = "_TocBlock";

/// Dot leader between an entry and its page number.
const DOT_LEADER: &str = "....................";

/// Title run size in half-points (18pt).
const TITLE_SIZE: u32 = 36;

/// Highest heading level.
const MAX_LEVEL: u8 = 9;

/// A table of contents: options plus the entries of the last synthesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOfContents {
    title: String,
    min_level: u8,
    max_level: u8,
    page_numbers: bool,
    /// Indentation unit in twips
    indentation: u32,
    paragraphs_per_page: usize,
    page_estimate: PageEstimate,
    entries: Vec<TocEntry>,
}

impl Default for TableOfContents {
    fn default() -> Self {
        Self::new()
    }
}

impl TableOfContents {
    /// Create a table of contents with default settings: titled
    /// "Table of Contents", levels 1-3, page numbers on, 20 twips per level.
    pub fn new() -> Self {
        Self::from_config(&TocConfig::default())
    }

    /// Create a table of contents seeded from configuration.
    pub fn from_config(config: &TocConfig) -> Self {
        Self {
            title: config.title.clone(),
            min_level: 1,
            max_level: 3,
            page_numbers: config.page_numbers,
            indentation: config.indentation,
            paragraphs_per_page: config.paragraphs_per_page.max(1),
            page_estimate: config.page_estimate,
            entries: Vec::new(),
        }
        .heading_levels(config.min_level, config.max_level)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the heading levels to include (0-9). `max` is raised to `min` if lower.
    pub fn heading_levels(mut self, min: u8, max: u8) -> Self {
        self.min_level = min.min(MAX_LEVEL);
        self.max_level = max.clamp(self.min_level, MAX_LEVEL);
        self
    }

    /// Set whether to include page numbers (default: true).
    pub fn page_numbers(mut self, enabled: bool) -> Self {
        self.page_numbers = enabled;
        self
    }

    /// Set the indentation per level in twips (default: 20).
    pub fn indentation(mut self, twips: u32) -> Self {
        self.indentation = twips;
        self
    }

    pub fn page_estimate(mut self, estimate: PageEstimate) -> Self {
        self.page_estimate = estimate;
        self
    }

    /// Set how many body children are assumed per page (at least 1).
    pub fn paragraphs_per_page(mut self, count: usize) -> Self {
        self.paragraphs_per_page = count.max(1);
        self
    }

    #[inline]
    pub fn get_title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn min_level(&self) -> u8 {
        self.min_level
    }

    #[inline]
    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    /// Entries listed by the last synthesis, in document order.
    #[inline]
    pub fn entries(&self) -> &[TocEntry] {
        &self.entries
    }

    /// Estimated 1-based page of a heading.
    ///
    /// The position is divided by the paragraphs-per-page constant; a heading
    /// whose position cannot be found is placed on page 1.
    pub fn estimate_page(&self, entry: &TocEntry, body: &[BodyElement]) -> usize {
        let index = match self.page_estimate {
            PageEstimate::FirstTextMatch => body.iter().position(|element| match element {
                BodyElement::Paragraph(para) => para.text() == entry.text,
                BodyElement::Table(_) => false,
            }),
            PageEstimate::BodyPosition => Some(entry.body_index),
        };
        index.map_or(1, |i| (i / self.paragraphs_per_page + 1).max(1))
    }

    /// Scan `body` and build the paragraphs of the table.
    ///
    /// `block_id` is the bookmark id used for the `_TocBlock` marker. The body
    /// itself is not modified.
    pub(crate) fn synthesize(
        &mut self,
        body: &[BodyElement],
        block_id: u32,
    ) -> Vec<MutableParagraph> {
        self.entries = scan_headings(body)
            .into_iter()
            .filter(|entry| (self.min_level..=self.max_level).contains(&entry.level))
            .map(|mut entry| {
                entry.indentation = u32::from(entry.level - self.min_level)
                    .saturating_mul(self.indentation);
                entry
            })
            .collect();

        let mut paragraphs = Vec::with_capacity(self.entries.len() + 2);

        let mut title = MutableParagraph::new();
        title.add_bookmark_start(MutableBookmark::new(block_id, TOC_BLOCK_BOOKMARK));
        title
            .add_run_with_text(self.title.as_str())
            .bold(true)
            .font_size(TITLE_SIZE);
        paragraphs.push(title);

        let mut blank = MutableParagraph::new();
        blank.add_run();
        paragraphs.push(blank);

        for entry in &self.entries {
            let mut para = MutableParagraph::new();
            if entry.indentation > 0 {
                para.set_indent_left_twips(entry.indentation);
            }
            para.add_run_with_text(entry.text.as_str())
                .bold(entry.level == 1);
            if self.page_numbers {
                let page = self.estimate_page(entry, body);
                para.add_run_with_text(" ");
                para.add_run_with_text(DOT_LEADER);
                para.add_run_with_text(format!(" {}", page));
            }
            paragraphs.push(para);
        }

        if let Some(last) = paragraphs.last_mut() {
            last.add_bookmark_end(block_id);
        }

        tracing::debug!(
            entries = self.entries.len(),
            min_level = self.min_level,
            max_level = self.max_level,
            "synthesized table of contents"
        );
        paragraphs
    }
}

/// Body range of the first synthesized table of contents.
pub(crate) fn find_toc_block(body: &[BodyElement]) -> Option<Range<usize>> {
    let (start, id) = body.iter().enumerate().find_map(|(index, element)| match element {
        BodyElement::Paragraph(para) => para
            .bookmarks()
            .find(|b| b.name() == TOC_BLOCK_BOOKMARK)
            .map(|b| (index, b.id())),
        BodyElement::Table(_) => None,
    })?;

    let end = body[start..]
        .iter()
        .position(|element| match element {
            BodyElement::Paragraph(para) => para.closes_bookmark(id),
            BodyElement::Table(_) => false,
        })
        .map_or(start, |offset| start + offset);

    Some(start..end + 1)
}
