/// Enumerations shared by the WordprocessingML writer.

/// Header/footer slot kinds.
///
/// Corresponds to the VBA `WdHeaderFooterIndex` enumeration and the
/// `w:type` attribute of `w:headerReference` / `w:footerReference`.
///
/// # Examples
///
/// ```rust
/// use docx_parts::ooxml::docx::enums::WdHeaderFooter;
///
/// let index = WdHeaderFooter::Primary;
/// assert_eq!(index.to_xml(), "default");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WdHeaderFooter {
    /// Header/footer for odd pages or all pages if no even header/footer.
    Primary = 1,
    /// Header/footer for first page of section.
    FirstPage = 2,
    /// Header/footer for even pages of recto/verso section.
    EvenPage = 3,
}

impl WdHeaderFooter {
    /// All kinds in slot order.
    pub const ALL: [WdHeaderFooter; 3] = [Self::Primary, Self::FirstPage, Self::EvenPage];

    /// Convert the header/footer index to its XML attribute value.
    #[inline]
    pub const fn to_xml(self) -> &'static str {
        match self {
            Self::Primary => "default",
            Self::FirstPage => "first",
            Self::EvenPage => "even",
        }
    }

    /// Parse header/footer index from XML attribute value.
    ///
    /// Returns `None` if the value is not recognized.
    #[inline]
    pub fn from_xml(s: &str) -> Option<Self> {
        match s {
            "default" => Some(Self::Primary),
            "first" => Some(Self::FirstPage),
            "even" => Some(Self::EvenPage),
            _ => None,
        }
    }

    /// Zero-based slot index used by section properties.
    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self as usize - 1
    }
}

impl Default for WdHeaderFooter {
    #[inline]
    fn default() -> Self {
        Self::Primary
    }
}

impl std::fmt::Display for WdHeaderFooter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_xml())
    }
}

/// Whether a header/footer part is a header or a footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderFooterRole {
    Header,
    Footer,
}

impl HeaderFooterRole {
    /// Root element name of the part (`w:hdr` / `w:ftr`).
    #[inline]
    pub const fn root_element(self) -> &'static str {
        match self {
            Self::Header => "w:hdr",
            Self::Footer => "w:ftr",
        }
    }

    /// Partname stem (`header` / `footer`).
    #[inline]
    pub const fn stem(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }

    /// Section reference element (`w:headerReference` / `w:footerReference`).
    #[inline]
    pub const fn reference_element(self) -> &'static str {
        match self {
            Self::Header => "w:headerReference",
            Self::Footer => "w:footerReference",
        }
    }
}

impl std::fmt::Display for HeaderFooterRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.stem())
    }
}
