use url::Url;

use arachne_compilation::OutputOptions;

/// The outcome of locating and path-resolving a CSS asset
///
/// Created fresh per page; `public_path` is the exact href the host's own
/// link generation would emit for the asset, which link-tag matching
/// depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCssReference {
    /// Asset filename within the compilation
    pub filename: String,

    /// Public-facing path the asset is referenced under in HTML
    pub public_path: String,
}

/// Compute the public href for an asset filename
///
/// With a configured public-path prefix the filename is URL-joined onto it.
/// Without one the href is relative: the path from the HTML page's output
/// directory back up to the build root, joined with the filename. A
/// configured content hash is appended as a query suffix either way.
pub fn resolve_public_path(
    filename: &str,
    output: &OutputOptions,
    page_output_name: &str,
) -> String {
    let prefix = output
        .public_path
        .as_deref()
        .filter(|prefix| !prefix.is_empty());

    let path = match prefix {
        Some(prefix) => join_prefix(prefix, filename),
        None => relative_href(filename, output, page_output_name),
    };

    match &output.hash {
        Some(hash) => append_hash(path, hash),
        None => path,
    }
}

/// Join a public-path prefix and a filename without doubling slashes
///
/// An absolute-URL prefix goes through proper URL joining so host-relative
/// filenames and query suffixes survive; anything else is a plain path
/// prefix.
fn join_prefix(prefix: &str, filename: &str) -> String {
    if let Ok(mut base) = Url::parse(prefix) {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        if let Ok(joined) = base.join(filename.trim_start_matches('/')) {
            return joined.to_string();
        }
    }
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        filename.trim_start_matches('/')
    )
}

/// Relative href from the page's output directory to the asset at the root
fn relative_href(filename: &str, output: &OutputOptions, page_output_name: &str) -> String {
    let page_path = output.path.join(page_output_name);
    let page_dir = page_path.parent().unwrap_or(&output.path);

    let Some(up) = pathdiff::diff_paths(&output.path, page_dir) else {
        tracing::warn!(
            "could not relate '{}' to the output root; falling back to bare filename",
            page_output_name
        );
        return filename.to_string();
    };

    let up = up.to_string_lossy().replace('\\', "/");
    if up.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", up, filename)
    }
}

/// Append a cache-busting hash, respecting an existing query string
fn append_hash(path: String, hash: &str) -> String {
    if path.contains('?') {
        format!("{}&{}", path, hash)
    } else {
        format!("{}?{}", path, hash)
    }
}
