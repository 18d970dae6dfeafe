use std::cmp::Ordering;

use revlay_version::{RevisionId, RevisionMap, VersionId};

use crate::catalog::Candidate;
use crate::constraint::{ConstraintSpec, Strictness};
use crate::context::ResolutionContext;

/// A constraint after context normalization: the suppressed component is
/// gone, modifiers survive. At least one component is present for every
/// entry built from a real candidate or from the context itself.
#[derive(Clone, Copy, Debug)]
struct Entry {
    revision:        Option<RevisionId>,
    revision_strict: Strictness,
    version:         Option<VersionId>,
    version_strict:  Strictness,
}

impl Entry {
    fn from_spec(spec: &ConstraintSpec, ctx: &ResolutionContext) -> Self {
        let (revision, version) = spec.for_context(ctx.revision.is_some());
        Self {
            revision,
            revision_strict: spec.revision_strict,
            version,
            version_strict: spec.version_strict,
        }
    }

    /// "Exactly where we are now": the anchor every candidate is compared
    /// against.
    fn target(ctx: &ResolutionContext) -> Self {
        Self {
            revision:        ctx.revision,
            revision_strict: Strictness::Exact,
            version:         Some(ctx.version),
            version_strict:  Strictness::Exact,
        }
    }

    /// The version this entry addresses: its own, or the earliest release
    /// containing its revision.
    fn effective_version(&self, map: &RevisionMap) -> VersionId {
        self.version
            .or_else(|| self.revision.map(|r| map.version_for_revision(r)))
            .unwrap_or(VersionId::ZERO)
    }

    /// The revision this entry addresses: its own, or the reverse map
    /// lookup of its effective version. May be absent.
    fn effective_revision(&self, map: &RevisionMap) -> Option<RevisionId> {
        self.revision
            .or_else(|| map.revision_for_version(&self.effective_version(map)))
    }
}

/// Total comparison of two normalized constraints.
///
/// When both carry a revision the comparison happens purely in revision
/// space. Otherwise both sides fall back to version space, with the
/// effective revision as a tie break. An absent effective revision on
/// either side sorts before a present one, checked left side first, so
/// absent-vs-absent resolves to `Less`. That asymmetry is observable
/// behavior callers depend on; see the regression test below.
fn compare_entries(x: &Entry, y: &Entry, map: &RevisionMap) -> Ordering {
    if let (Some(rx), Some(ry)) = (x.revision, y.revision) {
        return rx.cmp(&ry);
    }

    match x.effective_version(map).cmp(&y.effective_version(map)) {
        Ordering::Equal => match (x.effective_revision(map), y.effective_revision(map)) {
            (None, _) => Ordering::Less,
            (_, None) => Ordering::Greater,
            (Some(a), Some(b)) => a.cmp(&b),
        },
        ord => ord,
    }
}

/// Picks the winning candidate for one destination path, or `None` when
/// nothing applies and any previously materialized file is obsolete.
///
/// An exact-constrained candidate that matches the context precisely
/// wins unconditionally. Detection is first-found in catalog order, not
/// best-of: with several exact candidates the first one encountered
/// wins. That mirrors long-standing behavior and is kept deliberately.
/// Otherwise the highest eligible floor wins, subject to its own ceiling
/// modifier.
pub fn resolve<'a>(
    candidates: &'a [Candidate],
    ctx: &ResolutionContext,
    map: &RevisionMap,
) -> Option<&'a Candidate> {
    let target = Entry::target(ctx);
    let entries: Vec<Entry> = candidates
        .iter()
        .map(|c| Entry::from_spec(&c.spec, ctx))
        .collect();

    let mut eligible: Vec<usize> = Vec::new();
    let mut exact: Option<usize> = None;

    for (i, entry) in entries.iter().enumerate() {
        let c = compare_entries(entry, &target, map);
        if c == Ordering::Greater {
            continue;
        }

        let requires_exact = (entry.version_strict == Strictness::Exact
            && (entry.revision.is_none() || ctx.revision.is_none()))
            || entry.revision_strict == Strictness::Exact;

        if requires_exact {
            if c == Ordering::Equal {
                exact = Some(i);
                break;
            }
        } else {
            eligible.push(i);
        }
    }

    // exact match short-circuits everything, including ceiling checks
    if let Some(i) = exact {
        return Some(&candidates[i]);
    }

    let winner = eligible
        .into_iter()
        .max_by(|&a, &b| compare_entries(&entries[a], &entries[b], map))?;
    let w = &entries[winner];

    if w.revision_strict == Strictness::Ceiling {
        match ctx.revision {
            Some(current) => {
                if w.revision.is_some_and(|r| r < current) {
                    return None;
                }
            }
            None => {
                if w.effective_version(map) < ctx.version {
                    return None;
                }
            }
        }
    } else if w.version_strict == Strictness::Ceiling && w.revision.is_none() {
        if w.version.is_some_and(|v| v < ctx.version) {
            return None;
        }
    }

    Some(&candidates[winner])
}
