use crate::error::SpliceError;
use crate::AnchorPosition;

/// Insert style markup at a named anchor point of a serialized HTML document
///
/// Only the first occurrence of the anchor is used. A missing anchor is a
/// template/configuration error and is surfaced, not silently dropped.
pub fn insert_style_tag(
    html: &str,
    position: AnchorPosition,
    markup: &str,
) -> Result<String, SpliceError> {
    let anchor = position.anchor();
    let index = if position.case_insensitive_anchor() {
        find_ignore_ascii_case(html, anchor)
    } else {
        html.find(anchor)
    }
    .ok_or_else(|| SpliceError::AnchorNotFound {
        anchor: anchor.to_string(),
    })?;

    let insert_at = if position.insert_after_anchor() {
        index + anchor.len()
    } else {
        index
    };

    let mut spliced = String::with_capacity(html.len() + markup.len());
    spliced.push_str(&html[..insert_at]);
    spliced.push_str(markup);
    spliced.push_str(&html[insert_at..]);

    tracing::debug!("inserted inline style at '{}'", anchor);
    Ok(spliced)
}

/// Byte offset of the first ASCII-case-insensitive occurrence of `needle`
///
/// The needle is pure ASCII, so any matched range is ASCII too and the
/// returned offset is always a char boundary.
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}
