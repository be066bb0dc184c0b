use crate::Compilation;

/// Delete assets from the compilation and from every chunk's member list
///
/// A CSS file can be a member of multiple chunks in multi-entry builds, so
/// all chunks are scanned for every filename. Filenames already absent are
/// skipped without error so a retried emit step stays a no-op.
pub fn prune<I>(filenames: I, compilation: &mut Compilation)
where
    I: IntoIterator<Item = String>,
{
    for filename in filenames {
        if compilation.assets.remove(&filename).is_some() {
            tracing::debug!("emit: asset '{}' deleted", filename);
        } else {
            tracing::debug!("emit: asset '{}' already absent", filename);
        }
        for chunk in &mut compilation.chunks {
            if chunk.remove_file(&filename) {
                tracing::debug!("emit: '{}' removed from chunk '{}'", filename, chunk.name);
            }
        }
    }
}
