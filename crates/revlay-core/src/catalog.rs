use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::constraint::{ConstraintSpec, parse_candidate_name};

/// One constraint-tagged file found under an overlay source tree.
#[derive(Clone, Debug)]
pub struct Candidate {
    /// Literal file name as found on disk.
    pub original_name: String,
    /// Directory containing it, relative to the overlay root.
    pub source_dir:    PathBuf,
    /// Destination-relative path this candidate competes for.
    pub dest_path:     PathBuf,
    pub spec:          ConstraintSpec,
}

impl Candidate {
    /// Absolute location of the candidate's content.
    pub fn source_path(&self, overlay_root: &Path) -> PathBuf {
        overlay_root.join(&self.source_dir).join(&self.original_name)
    }
}

/// Candidates grouped by the destination path they compete for. Keyed
/// with a `BTreeMap` so reconciliation order is deterministic.
pub type Catalog = BTreeMap<PathBuf, Vec<Candidate>>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to walk overlay tree")]
    Walk(#[from] walkdir::Error),
}

/// Walks `overlay_root` depth-first and groups every parseable candidate
/// by destination path. Files whose names carry no recognized constraint
/// prefix are skipped silently; a missing root yields an empty catalog.
pub fn build_catalog(overlay_root: &Path) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::new();
    if !overlay_root.is_dir() {
        return Ok(catalog);
    }

    for entry in WalkDir::new(overlay_root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            debug!(path = %entry.path().display(), "skipping non-unicode file name");
            continue;
        };
        let Some(spec) = parse_candidate_name(name) else {
            debug!(path = %entry.path().display(), "skipping unconstrained file");
            continue;
        };

        let source_dir = entry
            .path()
            .parent()
            .and_then(|p| p.strip_prefix(overlay_root).ok())
            .unwrap_or(Path::new(""))
            .to_path_buf();
        let dest_path = source_dir.join(&spec.rest);

        catalog.entry(dest_path.clone()).or_default().push(Candidate {
            original_name: name.to_string(),
            source_dir,
            dest_path,
            spec,
        });
    }

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::build_catalog;
    use std::path::Path;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, path.to_string_lossy().as_bytes()).unwrap();
    }

    #[test]
    fn test_groups_alternates_by_dest_path() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("app/views/0000-index.erb"));
        touch(&root.join("app/views/4500-index.erb"));
        touch(&root.join("app/views/1.4.0-index.erb"));

        let catalog = build_catalog(root).unwrap();
        assert_eq!(catalog.len(), 1);
        let candidates = &catalog[Path::new("app/views/index.erb")];
        assert_eq!(candidates.len(), 3);
        assert!(candidates.iter().all(|c| c.source_dir == Path::new("app/views")));
    }

    #[test]
    fn test_unconstrained_files_are_excluded() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("0000-kept.erb"));
        touch(&root.join("plain.erb"));

        let catalog = build_catalog(root).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains_key(Path::new("kept.erb")));
    }

    #[test]
    fn test_root_level_file_has_bare_dest_path() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("1200-top.erb"));

        let catalog = build_catalog(dir.path()).unwrap();
        let candidates = &catalog[Path::new("top.erb")];
        assert_eq!(candidates[0].source_dir, Path::new(""));
        assert_eq!(candidates[0].original_name, "1200-top.erb");
    }

    #[test]
    fn test_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let catalog = build_catalog(&dir.path().join("nope")).unwrap();
        assert!(catalog.is_empty());
    }
}
