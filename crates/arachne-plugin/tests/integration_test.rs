/// Integration tests for the inlining lifecycle

use arachne_compilation::{Asset, AttrValue, Chunk, Compilation, HtmlPage, OutputOptions, TagDefinition};
use arachne_plugin::StyleInliner;
use serde_json::json;
use std::path::PathBuf;

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn stylesheet_link(href: &str) -> TagDefinition {
    TagDefinition::new("link")
        .with_attribute("rel", AttrValue::Text("stylesheet".into()))
        .with_attribute("href", AttrValue::Text(href.into()))
}

#[tokio::test]
async fn test_replace_link_with_inline_style_then_prune() {
    init_tracing();

    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("styles.css", Asset::from_text("body{background:snow}"));
    compilation.chunks = vec![Chunk::with_files("main", ["main.js", "styles.css"])];

    let mut page = HtmlPage::new("index.html");
    page.head = vec![stylesheet_link("styles.css")];

    let inliner = StyleInliner::from_options(json!({ "position": "plugin" })).unwrap();
    inliner.before_page(&compilation, &page).unwrap();
    inliner.alter_tags(&mut compilation, &mut page).await.unwrap();

    assert_eq!(page.head.len(), 1);
    let tag = &page.head[0];
    assert_eq!(tag.tag_name, "style");
    assert!(tag.close_tag);
    assert_eq!(tag.inner_html.as_deref(), Some("body{background:snow}"));

    // the backing asset survives until emit so other instances still see it
    assert!(compilation.assets.contains("styles.css"));

    inliner.finalize(&mut compilation).unwrap();
    assert!(!compilation.assets.contains("styles.css"));
    for chunk in &compilation.chunks {
        assert!(!chunk.contains_file("styles.css"));
    }
}

#[tokio::test]
async fn test_chunk_scoped_instances_do_not_interfere() {
    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("a.css", Asset::from_text("x{color:red}"));
    compilation
        .assets
        .insert("b.css", Asset::from_text("y{color:blue}"));
    compilation.chunks = vec![
        Chunk::with_files("pageA", ["pageA.js", "a.css"]),
        Chunk::with_files("pageB", ["pageB.js", "b.css"]),
    ];

    let instance_a = StyleInliner::from_options(json!({ "chunks": ["pageA"] })).unwrap();
    let instance_b = StyleInliner::from_options(json!({ "chunks": ["pageB"] })).unwrap();

    let mut page_a = HtmlPage::new("pageA.html");
    page_a.head = vec![stylesheet_link("a.css")];
    let mut page_b = HtmlPage::new("pageB.html");
    page_b.head = vec![stylesheet_link("b.css")];

    for page in [&page_a, &page_b] {
        instance_a.before_page(&compilation, page).unwrap();
        instance_b.before_page(&compilation, page).unwrap();
    }
    instance_a.alter_tags(&mut compilation, &mut page_a).await.unwrap();
    instance_b.alter_tags(&mut compilation, &mut page_b).await.unwrap();

    assert_eq!(page_a.head[0].inner_html.as_deref(), Some("x{color:red}"));
    assert_eq!(page_b.head[0].inner_html.as_deref(), Some("y{color:blue}"));

    // each instance prunes only its own file
    instance_a.finalize(&mut compilation).unwrap();
    assert!(!compilation.assets.contains("a.css"));
    assert!(compilation.assets.contains("b.css"));

    instance_b.finalize(&mut compilation).unwrap();
    assert!(!compilation.assets.contains("b.css"));
}

#[tokio::test]
async fn test_head_top_insertion() {
    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("styles.css", Asset::from_text("p{margin:0}"));

    let mut page = HtmlPage::new("index.html");
    page.html = "<html><head></head></html>".to_string();

    let inliner = StyleInliner::from_options(json!({ "position": "head-top" })).unwrap();
    inliner.before_page(&compilation, &page).unwrap();
    inliner.after_page(&mut compilation, &mut page).await.unwrap();

    assert_eq!(
        page.html,
        "<html><head><style>p{margin:0}</style></head></html>"
    );
}

#[tokio::test]
async fn test_every_anchor_position_is_adjacent_and_lossless() -> anyhow::Result<()> {
    let template = "<html><head><title>t</title></head><body><p>hi</p></body></html>";
    let style = "<style>p{margin:0}</style>";
    let cases = [
        ("head-top", "<head><style>"),
        ("head-bottom", "</style></head>"),
        ("body-top", "<body><style>"),
        ("body-bottom", "</style></body>"),
    ];

    for (position, adjacency) in cases {
        let mut compilation = Compilation::default();
        compilation
            .assets
            .insert("styles.css", Asset::from_text("p{margin:0}"));
        let mut page = HtmlPage::new("index.html");
        page.html = template.to_string();

        let inliner = StyleInliner::from_options(json!({ "position": position }))?;
        inliner.before_page(&compilation, &page)?;
        inliner.after_page(&mut compilation, &mut page).await?;

        assert!(page.html.contains(adjacency), "{position}: {}", page.html);
        assert_eq!(page.html.len(), template.len() + style.len());
        assert_eq!(page.html.replacen(style, "", 1), template);
    }
    Ok(())
}

#[tokio::test]
async fn test_minify_defaults_normalize_whitespace() {
    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("styles.css", Asset::from_text("body {  background:   snow; }"));

    let mut page = HtmlPage::new("index.html");
    page.head = vec![stylesheet_link("styles.css")];

    let inliner = StyleInliner::from_options(json!({ "minify": true })).unwrap();
    inliner.before_page(&compilation, &page).unwrap();
    inliner.alter_tags(&mut compilation, &mut page).await.unwrap();

    assert_eq!(
        page.head[0].inner_html.as_deref(),
        Some("body{background:snow}")
    );
    assert!(compilation.errors.is_empty());
    assert!(compilation.warnings.is_empty());
}

#[tokio::test]
async fn test_minifier_diagnostics_reach_build_sinks_without_aborting() {
    init_tracing();

    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("styles.css", Asset::from_text("a { color: red } } /* oops"));

    let mut page = HtmlPage::new("index.html");
    page.head = vec![stylesheet_link("styles.css")];

    let inliner = StyleInliner::from_options(json!({ "minify": {} })).unwrap();
    inliner.before_page(&compilation, &page).unwrap();
    inliner.alter_tags(&mut compilation, &mut page).await.unwrap();

    assert_eq!(page.head[0].tag_name, "style");
    assert_eq!(compilation.errors.len(), 1);
    assert!(compilation.errors[0].starts_with("arachne:"));
    assert_eq!(compilation.warnings.len(), 1);
    assert!(compilation.warnings[0].contains("unterminated comment"));
}

#[tokio::test]
async fn test_repeat_splice_never_duplicates_style_block() {
    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("styles.css", Asset::from_text("p{margin:0}"));

    let mut page = HtmlPage::new("index.html");
    page.html = "<html><head></head></html>".to_string();

    let inliner = StyleInliner::from_options(json!({ "position": "head-bottom" })).unwrap();
    inliner.before_page(&compilation, &page).unwrap();
    inliner.after_page(&mut compilation, &mut page).await.unwrap();
    inliner.finalize(&mut compilation).unwrap();

    let once = page.html.clone();

    // the host re-fires the page hooks on the already-spliced document
    inliner.before_page(&compilation, &page).unwrap();
    inliner.after_page(&mut compilation, &mut page).await.unwrap();

    assert_eq!(page.html, once);
    assert_eq!(page.html.matches("<style>").count(), 1);
}

#[tokio::test]
async fn test_link_matching_honors_public_path_and_hash() {
    let mut compilation = Compilation::new(OutputOptions {
        path: PathBuf::from("dist"),
        public_path: Some("https://cdn.example.com/assets".to_string()),
        hash: Some("1a2b3c".to_string()),
    });
    compilation
        .assets
        .insert("styles.css", Asset::from_text("p{margin:0}"));

    // the href exactly as the host's own link generation renders it
    let expected_href = "https://cdn.example.com/assets/styles.css?1a2b3c";
    let mut page = HtmlPage::new("index.html");
    page.head = vec![stylesheet_link(expected_href)];

    let inliner = StyleInliner::from_options(serde_json::Value::Null).unwrap();
    inliner.before_page(&compilation, &page).unwrap();
    inliner.alter_tags(&mut compilation, &mut page).await.unwrap();

    assert_eq!(page.head.len(), 1);
    assert_eq!(page.head[0].tag_name, "style");
}

#[tokio::test]
async fn test_relative_href_matching_for_nested_page() {
    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("styles.css", Asset::from_text("p{margin:0}"));

    let mut page = HtmlPage::new("pages/about/index.html");
    page.head = vec![stylesheet_link("../../styles.css")];

    let inliner = StyleInliner::from_options(serde_json::Value::Null).unwrap();
    inliner.before_page(&compilation, &page).unwrap();
    inliner.alter_tags(&mut compilation, &mut page).await.unwrap();

    assert_eq!(page.head[0].tag_name, "style");
}

#[tokio::test]
async fn test_multi_page_build_accumulates_and_prunes_at_emit() {
    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("page1.css", Asset::from_text("a{color:red}"));
    compilation
        .assets
        .insert("page2.css", Asset::from_text("b{color:blue}"));

    let mut page1 = HtmlPage::new("page1.html");
    page1.html = "<html><head></head></html>".to_string();
    let mut page2 = HtmlPage::new("page2.html");
    page2.html = "<html><head></head></html>".to_string();

    let inliner = StyleInliner::from_options(json!({ "position": "head-bottom" })).unwrap();

    inliner.before_page(&compilation, &page1).unwrap();
    inliner.after_page(&mut compilation, &mut page1).await.unwrap();
    // page1 consumed page1.css, so the second page picks up the next match
    inliner.before_page(&compilation, &page2).unwrap();
    inliner.after_page(&mut compilation, &mut page2).await.unwrap();

    assert!(page1.html.contains("a{color:red}"));
    assert!(page2.html.contains("b{color:blue}"));

    inliner.finalize(&mut compilation).unwrap();
    assert!(!compilation.assets.contains("page1.css"));
    assert!(!compilation.assets.contains("page2.css"));
}

#[tokio::test]
async fn test_page_chunk_scoping_narrows_one_instance() {
    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("a.css", Asset::from_text("x{color:red}"));
    compilation
        .assets
        .insert("b.css", Asset::from_text("y{color:blue}"));
    compilation.chunks = vec![
        Chunk::with_files("pageA", ["a.css"]),
        Chunk::with_files("pageB", ["b.css"]),
    ];

    // one instance allowed both chunks; each page narrows it to its own
    let inliner =
        StyleInliner::from_options(json!({ "chunks": ["pageA", "pageB"] })).unwrap();

    let mut page_a = HtmlPage::new("pageA.html").with_chunks(["pageA"]);
    page_a.head = vec![stylesheet_link("a.css")];
    let mut page_b = HtmlPage::new("pageB.html").with_chunks(["pageB"]);
    page_b.head = vec![stylesheet_link("b.css")];

    inliner.before_page(&compilation, &page_a).unwrap();
    inliner.alter_tags(&mut compilation, &mut page_a).await.unwrap();
    inliner.before_page(&compilation, &page_b).unwrap();
    inliner.alter_tags(&mut compilation, &mut page_b).await.unwrap();

    assert_eq!(page_a.head[0].inner_html.as_deref(), Some("x{color:red}"));
    assert_eq!(page_b.head[0].inner_html.as_deref(), Some("y{color:blue}"));

    // a page scoped to a chunk this instance does not cover is skipped
    let page_c = HtmlPage::new("admin.html").with_chunks(["admin"]);
    inliner.before_page(&compilation, &page_c).unwrap();
}

#[tokio::test]
async fn test_configured_tag_name_and_attributes_render() {
    let mut compilation = Compilation::default();
    compilation
        .assets
        .insert("styles.css", Asset::from_text("p{margin:0}"));

    let mut page = HtmlPage::new("index.html");
    page.html = "<html><head></head></html>".to_string();

    let inliner = StyleInliner::from_options(json!({
        "position": "head-bottom",
        "tag": {"name": "style", "attributes": {"media": "screen", "scoped": true}}
    }))
    .unwrap();
    inliner.before_page(&compilation, &page).unwrap();
    inliner.after_page(&mut compilation, &mut page).await.unwrap();

    assert!(page
        .html
        .contains(r#"<style media="screen" scoped>p{margin:0}</style>"#));
}
