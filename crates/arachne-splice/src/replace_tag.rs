use arachne_compilation::TagDefinition;

/// Replace the external-stylesheet link with an inline style tag
///
/// Scans the ordered tag list for a `link` whose `href` string-equals the
/// resolved public path and swaps it in place, preserving tag order. A
/// template may legitimately omit the link, so a miss appends the style tag
/// at the end instead of failing. No other tag is altered.
pub fn replace_link_tag(
    public_path: &str,
    tags: &mut Vec<TagDefinition>,
    replacement: TagDefinition,
) {
    for tag in tags.iter_mut() {
        if is_css_link_tag(tag, public_path) {
            *tag = replacement;
            tracing::debug!("replaced <link> for '{}' with inline style", public_path);
            return;
        }
    }
    tracing::debug!("no <link> for '{}'; appending inline style", public_path);
    tags.push(replacement);
}

fn is_css_link_tag(tag: &TagDefinition, public_path: &str) -> bool {
    tag.tag_name == "link" && tag.href() == Some(public_path)
}
