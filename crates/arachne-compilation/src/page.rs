use crate::tags::TagDefinition;

/// Per-page hook payload from the host's HTML generation
///
/// A multi-page build hands one of these to every hook invocation; the tag
/// lists are live during tag alteration and `html` is live after template
/// execution.
#[derive(Debug, Clone, Default)]
pub struct HtmlPage {
    /// Page output path relative to the build's output root,
    /// e.g. `index.html` or `pages/about/index.html`
    pub output_name: String,

    /// Chunk names this page includes, when the host scopes pages to chunks
    pub chunks: Option<Vec<String>>,

    /// Head elements in document order
    pub head: Vec<TagDefinition>,

    /// Body elements in document order
    pub body: Vec<TagDefinition>,

    /// Serialized HTML document
    pub html: String,
}

impl HtmlPage {
    /// Create a page with the given output name
    pub fn new(output_name: impl Into<String>) -> Self {
        Self {
            output_name: output_name.into(),
            ..Self::default()
        }
    }

    /// Restrict the page to the given chunks, builder style
    pub fn with_chunks<I, S>(mut self, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chunks = Some(chunks.into_iter().map(Into::into).collect());
        self
    }
}
