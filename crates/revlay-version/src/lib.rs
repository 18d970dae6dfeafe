//! Version and revision identifiers for overlay resolution.
//!
//! Two addressing spaces coexist: a three-component release version
//! (`major.minor.tiny`) and a flat build revision counter. The
//! [`RevisionMap`] translates between them.

pub use self::revmap::{RevisionMap, RevisionMapError};
pub use self::version::{RevisionId, VersionId, VersionIdError};

mod revmap;
mod version;
