use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::version::{RevisionId, VersionId};

/// Immutable table mapping released versions to the revision at which
/// they were cut. Loaded once at startup, read-only afterwards.
#[derive(Clone, Debug, Default)]
pub struct RevisionMap {
    entries: BTreeMap<VersionId, RevisionId>,
}

#[derive(Debug, Error)]
pub enum RevisionMapError {
    #[error("failed to read revision map {path}")]
    Read {
        path:   std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("revision map is not a mapping")]
    NotAMapping,

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid version key: {0:?}")]
    InvalidVersionKey(String),

    #[error("non-integer revision for version {0}")]
    InvalidRevision(VersionId),

    #[error("duplicate version key: {0}")]
    DuplicateVersion(VersionId),
}

impl RevisionMap {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RevisionMapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| RevisionMapError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Parses a `"major.minor.tiny": revision` YAML mapping. Any malformed
    /// entry is fatal; no partial map is usable.
    pub fn from_yaml_str(text: &str) -> Result<Self, RevisionMapError> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)?;
        let mapping = match value {
            serde_yaml::Value::Mapping(m) => m,
            serde_yaml::Value::Null => serde_yaml::Mapping::new(),
            _ => return Err(RevisionMapError::NotAMapping),
        };

        let mut entries = BTreeMap::new();
        for (key, value) in mapping {
            let key = match key.as_str() {
                Some(s) => s.to_string(),
                None => return Err(RevisionMapError::InvalidVersionKey(format!("{:?}", key))),
            };
            let version: VersionId = key
                .parse()
                .map_err(|_| RevisionMapError::InvalidVersionKey(key))?;
            let revision = value
                .as_u64()
                .ok_or(RevisionMapError::InvalidRevision(version))?;
            if entries.insert(version, revision).is_some() {
                return Err(RevisionMapError::DuplicateVersion(version));
            }
        }

        Ok(Self { entries })
    }

    /// The earliest released version that already includes revision `r`:
    /// among mapped pairs with revision >= `r`, the one with the smallest
    /// revision. [`VersionId::ZERO`] when `r` postdates every known
    /// release, which the resolver relies on to satisfy no floor.
    pub fn version_for_revision(&self, r: RevisionId) -> VersionId {
        self.entries
            .iter()
            .filter(|(_, rev)| **rev >= r)
            .min_by_key(|(_, rev)| **rev)
            .map(|(version, _)| *version)
            .unwrap_or(VersionId::ZERO)
    }

    /// Exact reverse lookup of the revision a version was cut at.
    pub fn revision_for_version(&self, version: &VersionId) -> Option<RevisionId> {
        self.entries.get(version).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{RevisionMap, RevisionMapError};
    use crate::version::VersionId;
    use proptest::prelude::*;

    const MAP: &str = "\
\"1.3.0\": 8500
\"1.4.0\": 9000
\"2.0.0\": 10000
";

    #[test]
    fn test_load_and_lookup() {
        let map = RevisionMap::from_yaml_str(MAP).unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(
            map.revision_for_version(&VersionId::new(1, 4, 0)),
            Some(9000)
        );
        assert_eq!(map.revision_for_version(&VersionId::new(9, 9, 9)), None);
    }

    #[test]
    fn test_version_for_revision_picks_earliest_qualifying() {
        let map = RevisionMap::from_yaml_str(MAP).unwrap();
        assert_eq!(map.version_for_revision(8600), VersionId::new(1, 4, 0));
        assert_eq!(map.version_for_revision(9000), VersionId::new(1, 4, 0));
        assert_eq!(map.version_for_revision(0), VersionId::new(1, 3, 0));
    }

    #[test]
    fn test_version_for_revision_sentinel_past_all_releases() {
        let map = RevisionMap::from_yaml_str(MAP).unwrap();
        assert_eq!(map.version_for_revision(10001), VersionId::ZERO);
    }

    #[test]
    fn test_empty_document_is_empty_map() {
        let map = RevisionMap::from_yaml_str("").unwrap();
        assert!(map.is_empty());
        assert_eq!(map.version_for_revision(1), VersionId::ZERO);
    }

    #[test]
    fn test_non_integer_revision_is_fatal() {
        let err = RevisionMap::from_yaml_str("\"1.3.0\": soon").unwrap_err();
        assert!(matches!(err, RevisionMapError::InvalidRevision(_)));
    }

    #[test]
    fn test_bad_version_key_is_fatal() {
        let err = RevisionMap::from_yaml_str("\"1.3\": 8500").unwrap_err();
        assert!(matches!(err, RevisionMapError::InvalidVersionKey(_)));
    }

    #[test]
    fn test_sequence_document_is_rejected() {
        let err = RevisionMap::from_yaml_str("- 1\n- 2\n").unwrap_err();
        assert!(matches!(err, RevisionMapError::NotAMapping));
    }

    proptest! {
        // versionForRevision is monotonic in the revision argument, with
        // the ZERO sentinel sorting as the minimum.
        #[test]
        fn prop_version_for_revision_monotonic(r1 in 0u64..12000, r2 in 0u64..12000) {
            let map = RevisionMap::from_yaml_str(MAP).unwrap();
            let (lo, hi) = if r1 <= r2 { (r1, r2) } else { (r2, r1) };
            let (vlo, vhi) = (map.version_for_revision(lo), map.version_for_revision(hi));
            prop_assert!(vhi == VersionId::ZERO || vlo <= vhi);
        }
    }
}
