use revlay_version::{RevisionId, VersionId};

/// The caller's current position in both addressing spaces. The version
/// is always known; the revision may not be, and an unknown revision is
/// a distinct state that changes resolution behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolutionContext {
    pub version:  VersionId,
    pub revision: Option<RevisionId>,
}

impl ResolutionContext {
    pub fn new(version: VersionId, revision: Option<RevisionId>) -> Self {
        Self { version, revision }
    }
}
