use arachne_compilation::{AttrValue, TagDefinition};

pub mod error;
pub mod insert_style;
pub mod replace_tag;

pub use error::SpliceError;
pub use insert_style::insert_style_tag;
pub use replace_tag::replace_link_tag;

/// Where an inline style block lands within the HTML document
///
/// Top positions insert directly after the opening anchor, bottom positions
/// directly before the closing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorPosition {
    HeadTop,
    HeadBottom,
    BodyTop,
    BodyBottom,
}

impl AnchorPosition {
    /// The literal HTML substring used as the insertion reference point
    pub fn anchor(&self) -> &'static str {
        match self {
            Self::HeadTop => "<head>",
            Self::HeadBottom => "</head>",
            Self::BodyTop => "<body>",
            Self::BodyBottom => "</body>",
        }
    }

    /// Whether the style markup goes after the anchor rather than before it
    pub(crate) fn insert_after_anchor(&self) -> bool {
        matches!(self, Self::HeadTop | Self::BodyTop)
    }

    /// Closing anchors are matched case-insensitively
    pub(crate) fn case_insensitive_anchor(&self) -> bool {
        matches!(self, Self::HeadBottom | Self::BodyBottom)
    }
}

/// The configurable element inlined CSS is wrapped in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleTagSpec {
    /// Output element name
    pub tag_name: String,

    /// Attributes rendered onto the output element, in order
    pub attributes: Vec<(String, AttrValue)>,
}

impl Default for StyleTagSpec {
    fn default() -> Self {
        Self {
            tag_name: "style".to_string(),
            attributes: Vec::new(),
        }
    }
}

impl StyleTagSpec {
    /// Build the replacement tag for tag-list splicing
    pub fn tag_definition(&self, css: impl Into<String>) -> TagDefinition {
        TagDefinition {
            tag_name: self.tag_name.clone(),
            attributes: self.attributes.clone(),
            inner_html: Some(css.into()),
            close_tag: true,
        }
    }

    /// Render the inline markup for string splicing
    pub fn markup(&self, css: impl Into<String>) -> String {
        self.tag_definition(css).render()
    }
}
