use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use arachne_compilation::{Chunk, Compilation};

pub mod error;

pub use error::LocateError;

/// Filenames ending `.css`, the default when no pattern is configured
static DEFAULT_CSS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.css$").expect("default css pattern is valid"));

/// Per-build locator configuration
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Exact filename to match; takes precedence over `pattern`
    pub filename: Option<String>,

    /// Filename pattern for candidate CSS assets
    pub pattern: Regex,

    /// Restrict the search to assets belonging to these chunks
    pub chunks: Option<Vec<String>>,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            filename: None,
            pattern: DEFAULT_CSS_PATTERN.clone(),
            chunks: None,
        }
    }
}

/// Find the generated CSS asset this plugin instance should inline
///
/// Returns `Ok(None)` when the instance does not apply to this build or
/// page: the chunk restriction matched no chunks, the page-level chunk
/// scoping excluded every restricted chunk, or every matching file was
/// already spliced earlier in the build. A non-empty candidate set in which
/// nothing ever matched is an error carrying every candidate considered.
///
/// `processed` holds filenames already spliced this build; a candidate found
/// there is dropped and the search continues, so a page-generation hook that
/// fires more than once per build never double-processes a file.
pub fn locate(
    config: &LocatorConfig,
    compilation: &Compilation,
    page_chunks: Option<&[String]>,
    processed: &HashSet<String>,
) -> Result<Option<String>, LocateError> {
    let allowed_files = match restricted_files(config, compilation, page_chunks) {
        Restriction::None => None,
        Restriction::Files(files) => Some(files),
        Restriction::NoChunks => {
            tracing::debug!("no configured chunk applies to this page; skipping");
            return Ok(None);
        }
    };

    let considered: Vec<&str> = compilation
        .assets
        .filenames()
        .filter(|filename| {
            allowed_files
                .as_ref()
                .map_or(true, |allowed| allowed.contains(filename))
        })
        .collect();

    let mut skipped_processed = false;
    for filename in &considered {
        if !matches(config, filename) {
            continue;
        }
        if processed.contains(*filename) {
            tracing::debug!("'{}' already inlined this build; searching on", filename);
            skipped_processed = true;
            continue;
        }
        tracing::debug!("CSS file in compilation: '{}'", filename);
        return Ok(Some((*filename).to_string()));
    }

    // Every match was consumed by an earlier page (and possibly pruned
    // already); nothing left to do.
    if skipped_processed || processed.iter().any(|filename| matches(config, filename)) {
        return Ok(None);
    }

    Err(LocateError::CssFileNotFound {
        considered: considered.iter().map(|name| (*name).to_string()).collect(),
    })
}

fn matches(config: &LocatorConfig, filename: &str) -> bool {
    match &config.filename {
        Some(exact) => exact == filename,
        None => config.pattern.is_match(filename),
    }
}

enum Restriction<'a> {
    /// No chunk restriction configured
    None,

    /// Search only these files
    Files(HashSet<&'a str>),

    /// Restriction configured but no chunk applies
    NoChunks,
}

fn restricted_files<'a>(
    config: &LocatorConfig,
    compilation: &'a Compilation,
    page_chunks: Option<&[String]>,
) -> Restriction<'a> {
    let Some(chunk_names) = &config.chunks else {
        return Restriction::None;
    };

    let mut matching: Vec<&Chunk> = compilation
        .chunks
        .iter()
        .filter(|chunk| chunk_names.iter().any(|name| *name == chunk.name))
        .collect();
    if let Some(page_chunks) = page_chunks {
        matching.retain(|chunk| page_chunks.iter().any(|name| *name == chunk.name));
    }

    if matching.is_empty() {
        Restriction::NoChunks
    } else {
        Restriction::Files(
            matching
                .iter()
                .flat_map(|chunk| chunk.files.iter().map(String::as_str))
                .collect(),
        )
    }
}
