use parking_lot::Mutex;

use arachne_compilation::{prune, Compilation, HtmlPage};
use arachne_locator::locate;
use arachne_resolver::{resolve_public_path, ResolvedCssReference};
use arachne_splice::{insert_style_tag, replace_link_tag};
use arachne_transform::{extract, Extracted};

pub mod config;
pub mod error;
pub mod session;

pub use config::{PluginConfig, Position, RawOptions};
pub use error::{ConfigError, InlineError};
pub use session::Session;

/// Build-time CSS inliner driven by the host's lifecycle hooks
///
/// One instance per configured plugin. Per page, the host fires
/// [`before_page`](Self::before_page) and then exactly one of
/// [`alter_tags`](Self::alter_tags) (replace-tag mode) or
/// [`after_page`](Self::after_page) (anchor mode); per build it fires
/// [`finalize`](Self::finalize) once, after every page is processed, which
/// is the only point the asset set is mutated. Several instances may run
/// against one build, each scoped to its own chunks; until their splicing
/// is done they all observe the same unmutated asset set.
pub struct StyleInliner {
    config: PluginConfig,
    session: Mutex<Session>,
}

impl StyleInliner {
    /// Create an inliner from a normalized configuration
    pub fn new(config: PluginConfig) -> Self {
        Self {
            config,
            session: Mutex::new(Session::new()),
        }
    }

    /// Create an inliner from a raw host option value
    pub fn from_options(options: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(Self::new(PluginConfig::from_value(options)?))
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// before-HTML-generation hook: locate the CSS asset for this page
    ///
    /// A silent miss (the instance's chunks don't apply, or the file was
    /// already inlined by an earlier page) skips the remaining steps for
    /// this page; that is normal operation, not an error.
    pub fn before_page(
        &self,
        compilation: &Compilation,
        page: &HtmlPage,
    ) -> Result<(), InlineError> {
        if !self.config.enabled {
            return Ok(());
        }
        let mut session = self.session.lock();
        let found = locate(
            &self.config.locator,
            compilation,
            page.chunks.as_deref(),
            session.processed(),
        )?;
        match found {
            Some(filename) => {
                tracing::debug!("located '{}' for page '{}'", filename, page.output_name);
                session.record_located(filename);
            }
            None => {
                tracing::debug!("no CSS applies to page '{}'", page.output_name);
            }
        }
        Ok(())
    }

    /// alter-asset-tags hook: swap the external link for an inline style tag
    ///
    /// Active in replace-tag mode only. Minification may suspend, so the
    /// hook is async; its outcome must reach the host's completion channel
    /// either way.
    pub async fn alter_tags(
        &self,
        compilation: &mut Compilation,
        page: &mut HtmlPage,
    ) -> Result<(), InlineError> {
        if !self.config.enabled || self.config.position != Position::Plugin {
            return Ok(());
        }
        let files = self.session.lock().take_page_files();
        if files.is_empty() {
            return Ok(());
        }

        let extracted = extract(&files, compilation, &self.config.minify)?;
        push_diagnostics(compilation, &extracted);

        let reference = ResolvedCssReference {
            public_path: resolve_public_path(&files[0], &compilation.output, &page.output_name),
            filename: files[0].clone(),
        };
        tracing::debug!(
            "inlining '{}' in place of link '{}'",
            reference.filename,
            reference.public_path
        );
        replace_link_tag(
            &reference.public_path,
            &mut page.head,
            self.config.tag.tag_definition(extracted.css),
        );
        Ok(())
    }

    /// after-HTML-generation hook: insert the style block at the anchor
    ///
    /// Active in the four anchor positions only; see
    /// [`alter_tags`](Self::alter_tags) for the async contract.
    pub async fn after_page(
        &self,
        compilation: &mut Compilation,
        page: &mut HtmlPage,
    ) -> Result<(), InlineError> {
        let Some(anchor) = self.config.position.anchor_position() else {
            return Ok(());
        };
        if !self.config.enabled {
            return Ok(());
        }
        let files = self.session.lock().take_page_files();
        if files.is_empty() {
            return Ok(());
        }

        let extracted = extract(&files, compilation, &self.config.minify)?;
        push_diagnostics(compilation, &extracted);

        let markup = self.config.tag.markup(extracted.css);
        page.html = insert_style_tag(&page.html, anchor, &markup)?;
        Ok(())
    }

    /// emit hook, once per build: delete the inlined assets
    pub fn finalize(&self, compilation: &mut Compilation) -> Result<(), InlineError> {
        if !self.config.enabled {
            return Ok(());
        }
        let pending = self.session.lock().drain_pending();
        if pending.is_empty() {
            return Ok(());
        }
        tracing::info!("removing {} inlined stylesheet(s)", pending.len());
        prune(pending, compilation);
        Ok(())
    }
}

/// Append non-fatal minifier diagnostics to the build's sinks
fn push_diagnostics(compilation: &mut Compilation, extracted: &Extracted) {
    compilation
        .errors
        .extend(extracted.errors.iter().map(|m| format!("arachne: {}", m)));
    compilation
        .warnings
        .extend(extracted.warnings.iter().map(|m| format!("arachne: {}", m)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use arachne_compilation::Asset;
    use serde_json::json;

    fn compilation_with(filename: &str, css: &str) -> Compilation {
        let mut compilation = Compilation::default();
        compilation.assets.insert(filename, Asset::from_text(css));
        compilation
    }

    #[tokio::test]
    async fn test_disabled_instance_is_inert() {
        let inliner = StyleInliner::from_options(json!(false)).unwrap();
        let mut compilation = compilation_with("styles.css", "p{margin:0}");
        let mut page = HtmlPage::new("index.html");
        page.html = "<html><head></head></html>".to_string();

        inliner.before_page(&compilation, &page).unwrap();
        inliner.alter_tags(&mut compilation, &mut page).await.unwrap();
        inliner.finalize(&mut compilation).unwrap();

        assert!(compilation.assets.contains("styles.css"));
        assert!(page.head.is_empty());
    }

    #[tokio::test]
    async fn test_anchor_mode_skips_alter_tags_hook() {
        let inliner = StyleInliner::from_options(json!({ "position": "head-top" })).unwrap();
        let mut compilation = compilation_with("styles.css", "p{margin:0}");
        let mut page = HtmlPage::new("index.html");
        page.html = "<html><head></head></html>".to_string();

        inliner.before_page(&compilation, &page).unwrap();
        inliner.alter_tags(&mut compilation, &mut page).await.unwrap();
        assert!(page.head.is_empty());

        inliner.after_page(&mut compilation, &mut page).await.unwrap();
        assert_eq!(
            page.html,
            "<html><head><style>p{margin:0}</style></head></html>"
        );
    }

    #[tokio::test]
    async fn test_missing_anchor_surfaces_attributed_error() {
        let inliner = StyleInliner::from_options(json!({ "position": "body-bottom" })).unwrap();
        let mut compilation = compilation_with("styles.css", "p{margin:0}");
        let mut page = HtmlPage::new("index.html");
        page.html = "<html><head></head></html>".to_string();

        inliner.before_page(&compilation, &page).unwrap();
        let err = inliner
            .after_page(&mut compilation, &mut page)
            .await
            .unwrap_err();
        assert!(matches!(err, InlineError::Splice(_)));
        assert!(err.to_string().contains("arachne"));
        assert!(err.to_string().contains("</body>"));
    }

    #[test]
    fn test_locate_miss_with_candidates_is_fatal() {
        let inliner = StyleInliner::from_options(serde_json::Value::Null).unwrap();
        let mut compilation = Compilation::default();
        compilation.assets.insert("main.js", Asset::from_text("js"));
        let page = HtmlPage::new("index.html");

        let err = inliner.before_page(&compilation, &page).unwrap_err();
        assert!(err.to_string().contains("main.js"));
    }
}
