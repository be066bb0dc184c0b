use std::collections::HashSet;

/// Per-build mutable state for one plugin instance
///
/// Created at build start and carried across every hook invocation for that
/// build. A multi-page build drives the page hooks repeatedly, so located
/// files accumulate here per build, not per page.
#[derive(Debug, Default)]
pub struct Session {
    /// CSS filenames located for the page currently being generated,
    /// in collection order
    page_files: Vec<String>,

    /// Filenames already spliced into some page this build
    processed: HashSet<String>,

    /// Unique filenames awaiting deletion at emit time
    pending_delete: Vec<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a located file for the in-flight page and queue its deletion
    pub fn record_located(&mut self, filename: String) {
        if !self.pending_delete.contains(&filename) {
            self.pending_delete.push(filename.clone());
        }
        if !self.page_files.contains(&filename) {
            self.page_files.push(filename);
        }
    }

    /// Hand over the in-flight page's files, marking them spliced
    pub fn take_page_files(&mut self) -> Vec<String> {
        let files = std::mem::take(&mut self.page_files);
        for filename in &files {
            self.processed.insert(filename.clone());
        }
        files
    }

    /// Filenames already spliced this build
    pub fn processed(&self) -> &HashSet<String> {
        &self.processed
    }

    /// Drain the pending-deletion set; draining twice yields nothing
    pub fn drain_pending(&mut self) -> Vec<String> {
        std::mem::take(&mut self.pending_delete)
    }
}
