// Arachne
//
// Build-time CSS inlining for HTML-emitting build pipelines: locates the
// stylesheet asset an upstream extraction step produced, splices its text
// into the generated page as an inline <style> block, and removes the
// now-redundant external asset at emit time.
//
// See: arachne-plugin for the lifecycle-hook integration surface

// Re-export main components
pub use arachne_compilation as compilation;
pub use arachne_locator as locator;
pub use arachne_plugin as plugin;
pub use arachne_resolver as resolver;
pub use arachne_splice as splice;
pub use arachne_transform as transform;

// Most host integrations only need these
pub use arachne_plugin::{PluginConfig, Position, StyleInliner};
