use std::path::Path;

use revlay_core::ResolutionContext;
use revlay_version::{RevisionId, VersionId};
use tracing::debug;

/// Builds the resolution context from host-reported values plus the
/// optional override files in the application root.
///
/// `.version` holds a single `major.minor.tiny` line; `.revision` holds
/// a single revision number, or the literal `.ignore` to force the
/// revision unknown. A malformed line means "no override" and falls back
/// to the host-reported value, never an error.
pub fn resolve_context(
    app_root: &Path,
    reported_version: VersionId,
    reported_revision: Option<RevisionId>,
) -> ResolutionContext {
    let version = match first_line(&app_root.join(".version")) {
        Some(line) => match line.parse::<VersionId>() {
            Ok(v) => {
                debug!(%v, "version override in effect");
                v
            }
            Err(_) => reported_version,
        },
        None => reported_version,
    };

    let revision = match first_line(&app_root.join(".revision")) {
        Some(line) if line == ".ignore" => {
            debug!("revision override forces unknown revision");
            None
        }
        Some(line) => match line.parse::<RevisionId>() {
            Ok(r) => Some(r),
            Err(_) => reported_revision,
        },
        None => reported_revision,
    };

    ResolutionContext::new(version, revision)
}

fn first_line(path: &Path) -> Option<String> {
    let text = std::fs::read_to_string(path).ok()?;
    text.lines().next().map(|l| l.trim_end_matches('\r').to_string())
}
