use arachne_compilation::Compilation;

pub mod error;
pub mod minify;

pub use error::{MinifyError, TransformError};
pub use minify::{MinifyConfig, MinifyOutput};

/// Whether and how extracted CSS is minified
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MinifyOptions {
    /// Pass extracted text through unchanged
    #[default]
    Disabled,

    /// Minify with the given configuration
    Enabled(MinifyConfig),
}

impl MinifyOptions {
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }
}

/// Final CSS text for one page plus non-fatal minifier diagnostics
///
/// The diagnostics belong in the build's error/warning sinks; a warning from
/// the minifier must not abort the build.
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    pub css: String,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Join CSS bodies collected for one page with a single newline,
/// preserving collection order
pub fn combine_css<'a, I>(sources: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    sources.into_iter().collect::<Vec<_>>().join("\n")
}

/// Read the named assets' text, combine, and optionally minify
pub fn extract(
    filenames: &[String],
    compilation: &Compilation,
    minify_options: &MinifyOptions,
) -> Result<Extracted, TransformError> {
    let mut sources = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let asset = compilation
            .assets
            .get(filename)
            .ok_or_else(|| TransformError::AssetRead {
                filename: filename.clone(),
            })?;
        let text = asset
            .source_text()
            .map_err(|_| TransformError::AssetNotText {
                filename: filename.clone(),
            })?;
        tracing::debug!("CSS in compilation: {} bytes from '{}'", text.len(), filename);
        sources.push(text);
    }
    let css = combine_css(sources);

    match minify_options {
        MinifyOptions::Disabled => Ok(Extracted {
            css,
            ..Extracted::default()
        }),
        MinifyOptions::Enabled(config) => {
            let output = minify::minify(&css, config)?;
            tracing::debug!(
                "minified CSS: {} -> {} bytes ({} errors, {} warnings)",
                css.len(),
                output.css.len(),
                output.errors.len(),
                output.warnings.len()
            );
            Ok(Extracted {
                css: output.css,
                errors: output.errors,
                warnings: output.warnings,
            })
        }
    }
}
