use std::io::Write;
use std::path::Path;

use revlay_version::RevisionMap;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{CatalogError, build_catalog};
use crate::context::ResolutionContext;
use crate::resolve::resolve;
use crate::transcript::Transcript;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Fs(#[from] revlay_fs::Error),

    #[error("failed to write transcript")]
    Transcript(#[from] std::io::Error),
}

/// Applies resolver decisions to a destination tree: one full file
/// replace-or-delete per cataloged destination path, in deterministic
/// order. Paths the catalog does not mention are never touched.
pub struct Reconciler<'a> {
    map: &'a RevisionMap,
    ctx: ResolutionContext,
}

impl<'a> Reconciler<'a> {
    pub fn new(map: &'a RevisionMap, ctx: ResolutionContext) -> Self {
        Self { map, ctx }
    }

    pub fn context(&self) -> &ResolutionContext {
        &self.ctx
    }

    /// Reconciles everything under `overlay_root` into `dest_root`. Any
    /// filesystem failure aborts the pass; a later run restarts from the
    /// catalog, so nothing is left half-decided silently.
    pub fn reconcile_tree<W: Write>(
        &self,
        overlay_root: &Path,
        dest_root: &Path,
        transcript: &mut Transcript<W>,
    ) -> Result<(), ReconcileError> {
        let catalog = build_catalog(overlay_root)?;
        debug!(
            overlay = %overlay_root.display(),
            paths = catalog.len(),
            "reconciling overlay tree"
        );

        for (dest_path, candidates) in &catalog {
            let dest = dest_root.join(dest_path);
            revlay_fs::remove_existing(&dest)?;

            match resolve(candidates, &self.ctx, self.map) {
                Some(winner) => {
                    if let Some(parent) = dest.parent() {
                        revlay_fs::ensure_dir(parent)?;
                    }
                    revlay_fs::clobber_copy(winner.source_path(overlay_root), &dest)?;
                    let (revision, version) =
                        winner.spec.for_context(self.ctx.revision.is_some());
                    transcript.using(dest_path, version, revision)?;
                }
                None => {
                    transcript.obsolete(dest_path)?;
                }
            }
        }

        Ok(())
    }
}
