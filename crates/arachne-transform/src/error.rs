//! Transform-specific error types

use thiserror::Error;

/// Errors raised while extracting or transforming CSS text
#[derive(Error, Debug)]
pub enum TransformError {
    /// Named asset missing from the compilation at extraction time
    #[error("asset '{filename}' missing from compilation")]
    AssetRead { filename: String },

    /// Asset content is not text
    #[error("asset '{filename}' is not valid UTF-8 text")]
    AssetNotText { filename: String },

    /// Hard failure inside the minification routine
    #[error(transparent)]
    Minify(#[from] MinifyError),
}

/// Hard minifier failures; recoverable issues are reported as diagnostics
/// instead
#[derive(Error, Debug)]
pub enum MinifyError {
    #[error("block nesting exceeds {max} levels at character {offset}")]
    NestingTooDeep { max: usize, offset: usize },
}
