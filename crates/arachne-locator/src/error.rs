//! Locator-specific error types

use thiserror::Error;

/// Errors raised while locating the generated CSS asset
#[derive(Error, Debug)]
pub enum LocateError {
    /// No candidate matched when the search was expected to succeed
    #[error(
        "could not find the extracted .css file; considered: '{}'",
        .considered.join(", ")
    )]
    CssFileNotFound {
        /// Every filename that passed the chunk filter, for diagnosis
        considered: Vec<String>,
    },
}
