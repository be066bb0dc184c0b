//! Splice-specific error types

use thiserror::Error;

/// Errors raised while splicing style markup into a page
#[derive(Error, Debug)]
pub enum SpliceError {
    /// The HTML document has no occurrence of the required anchor
    #[error("anchor '{anchor}' not found in HTML document")]
    AnchorNotFound { anchor: String },
}
