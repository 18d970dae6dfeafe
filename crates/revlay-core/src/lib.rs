//! Overlay resolution core.
//!
//! A source tree encodes alternate variants of files through filename
//! prefixes carrying version/revision constraints. The catalog builder
//! groups those candidates by the destination path they compete for, the
//! resolver picks at most one winner per path for the caller's current
//! version/revision, and the reconciler applies the decision to a
//! destination tree (copy the winner, or delete what a vanished winner
//! left behind).

pub use self::catalog::{Candidate, Catalog, CatalogError, build_catalog};
pub use self::constraint::{ConstraintSpec, Strictness, parse_candidate_name};
pub use self::context::ResolutionContext;
pub use self::reconcile::{ReconcileError, Reconciler};
pub use self::resolve::resolve;
pub use self::transcript::Transcript;

mod catalog;
mod constraint;
mod context;
mod reconcile;
mod resolve;
mod transcript;

/// Fixed subfolder of a plugin directory that holds the overlay source
/// tree, mirroring the plugin's own tree one level down.
pub const OVERLAY_DIR: &str = "rev";
