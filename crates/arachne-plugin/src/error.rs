//! Plugin-level error types
//!
//! Every fatal condition reaches the host through these with the plugin
//! name attached, so a failed build names its culprit.

use thiserror::Error;

use arachne_locator::LocateError;
use arachne_splice::SpliceError;
use arachne_transform::TransformError;

/// Invalid option values, raised at normalization before any hook runs
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("arachne: invalid options - expected bool, string, or an option object")]
    InvalidShape,

    #[error(
        "arachne: invalid position '{0}' - expected plugin, head-top, head-bottom, body-top, or body-bottom"
    )]
    InvalidPosition(String),

    #[error("arachne: invalid css pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("arachne: invalid value for tag attribute '{0}' - expected string or bool")]
    InvalidAttribute(String),
}

/// Failures surfaced through the host's per-hook error channel
#[derive(Error, Debug)]
pub enum InlineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("arachne: {0}")]
    Locate(#[from] LocateError),

    #[error("arachne: {0}")]
    Transform(#[from] TransformError),

    #[error("arachne: {0}")]
    Splice(#[from] SpliceError),
}
