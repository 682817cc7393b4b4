/// Configuration for document writing.
///
/// Controls how header/footer slots are reused, whether parts are rendered in
/// parallel on save, and the defaults of newly built tables of contents.
///
/// # Examples
///
/// ```rust
/// use docx_parts::ooxml::docx::writer::{SlotPolicy, WriterConfig};
///
/// let config = WriterConfig::new()
///     .with_slot_policy(SlotPolicy::Reject)
///     .with_parallel_save(false);
/// assert_eq!(config.slot_policy, SlotPolicy::Reject);
/// ```
use serde::{Deserialize, Serialize};

use crate::ooxml::error::{OoxmlError, Result};

/// What to do when a header/footer is added for a page kind that already has one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPolicy {
    /// Point the section at the new part; the old part stays in the package
    #[default]
    Replace,
    /// Fail with [`OoxmlError::SlotOccupied`] without allocating anything
    Reject,
}

/// How a TOC entry's page number is estimated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageEstimate {
    /// Position of the first body paragraph whose text equals the entry text
    #[default]
    FirstTextMatch,
    /// Position of the heading paragraph itself
    BodyPosition,
}

/// Defaults for [`TableOfContents`](super::TableOfContents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    pub title: String,
    /// Lowest heading level listed (0 = Title)
    pub min_level: u8,
    /// Highest heading level listed
    pub max_level: u8,
    /// Append dot leaders and an estimated page number to each entry
    pub page_numbers: bool,
    /// Indentation per level below `min_level`, in twips
    pub indentation: u32,
    /// Body children assumed to fit on one page
    pub paragraphs_per_page: usize,
    pub page_estimate: PageEstimate,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            title: "Table of Contents".to_string(),
            min_level: 1,
            max_level: 3,
            page_numbers: true,
            indentation: 20,
            paragraphs_per_page: 20,
            page_estimate: PageEstimate::FirstTextMatch,
        }
    }
}

/// Options for a [`MutableDocument`](super::MutableDocument).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    pub slot_policy: SlotPolicy,
    /// Render header/footer parts on the rayon pool during a package save
    pub parallel_save: bool,
    pub toc: TocConfig,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            slot_policy: SlotPolicy::Replace,
            parallel_save: true,
            toc: TocConfig::default(),
        }
    }
}

impl WriterConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from YAML. Missing keys keep their defaults.
    ///
    /// ```rust
    /// use docx_parts::ooxml::docx::writer::WriterConfig;
    ///
    /// let config = WriterConfig::from_yaml_str("toc:\n  max_level: 2\n").unwrap();
    /// assert_eq!(config.toc.max_level, 2);
    /// assert_eq!(config.toc.min_level, 1);
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml).map_err(|e| OoxmlError::Config(e.to_string()))
    }

    #[inline]
    pub fn with_slot_policy(mut self, policy: SlotPolicy) -> Self {
        self.slot_policy = policy;
        self
    }

    #[inline]
    pub fn with_parallel_save(mut self, parallel: bool) -> Self {
        self.parallel_save = parallel;
        self
    }

    #[inline]
    pub fn with_toc(mut self, toc: TocConfig) -> Self {
        self.toc = toc;
        self
    }
}
