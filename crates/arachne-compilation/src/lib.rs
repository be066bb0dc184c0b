use std::collections::HashMap;
use std::path::PathBuf;
use std::str::Utf8Error;

pub mod chunk;
pub mod page;
pub mod prune;
pub mod tags;

pub use chunk::Chunk;
pub use page::HtmlPage;
pub use prune::prune;
pub use tags::{AttrValue, TagDefinition};

/// A named build output artifact held in memory before being written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    content: Vec<u8>,
}

impl Asset {
    /// Create an asset from text content
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: text.into().into_bytes(),
        }
    }

    /// Create an asset from raw bytes
    pub fn from_bytes(content: Vec<u8>) -> Self {
        Self { content }
    }

    /// Raw byte content of the asset
    pub fn source_bytes(&self) -> &[u8] {
        &self.content
    }

    /// Text content of the asset
    pub fn source_text(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(&self.content)
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Insertion-ordered collection of build assets keyed by filename
///
/// The host build system emits assets in a deterministic order and lookups by
/// pattern must observe that same order, so a plain hash map is not enough.
#[derive(Debug, Clone, Default)]
pub struct AssetSet {
    order: Vec<String>,
    entries: HashMap<String, Asset>,
}

impl AssetSet {
    /// Create an empty asset set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an asset, returning the previous content for the same filename
    ///
    /// Re-emitting an existing filename keeps its original position.
    pub fn insert(&mut self, filename: impl Into<String>, asset: Asset) -> Option<Asset> {
        let filename = filename.into();
        let previous = self.entries.insert(filename.clone(), asset);
        if previous.is_none() {
            self.order.push(filename);
        }
        previous
    }

    /// Look up an asset by filename
    pub fn get(&self, filename: &str) -> Option<&Asset> {
        self.entries.get(filename)
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.entries.contains_key(filename)
    }

    /// Remove an asset, preserving the order of the remaining entries
    pub fn remove(&mut self, filename: &str) -> Option<Asset> {
        let removed = self.entries.remove(filename);
        if removed.is_some() {
            self.order.retain(|name| name != filename);
        }
        removed
    }

    /// Filenames in insertion order
    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Build output configuration
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Root output directory of the build
    pub path: PathBuf,

    /// Fixed public-path prefix under which outputs are served
    pub public_path: Option<String>,

    /// Per-build content hash appended to hrefs for cache busting
    pub hash: Option<String>,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dist"),
            public_path: None,
            hash: None,
        }
    }
}

/// In-flight build state owned by the host build system
///
/// The inlining engine reads assets and chunks, appends non-fatal diagnostics
/// to the error/warning sinks, and deletes pruned assets at emit time.
#[derive(Debug, Clone, Default)]
pub struct Compilation {
    /// Output assets keyed by filename
    pub assets: AssetSet,

    /// Named bundle groupings of output files
    pub chunks: Vec<Chunk>,

    /// Build output configuration
    pub output: OutputOptions,

    /// Non-fatal build errors surfaced to the user
    pub errors: Vec<String>,

    /// Non-fatal build warnings surfaced to the user
    pub warnings: Vec<String>,
}

impl Compilation {
    /// Create a compilation with the given output configuration
    pub fn new(output: OutputOptions) -> Self {
        Self {
            output,
            ..Self::default()
        }
    }

    /// Look up a chunk by name
    pub fn chunk(&self, name: &str) -> Option<&Chunk> {
        self.chunks.iter().find(|chunk| chunk.name == name)
    }
}
