use once_cell::sync::Lazy;
use regex::Regex;
use revlay_version::{RevisionId, VersionId};

// Filename grammar, applied to the base name only:
//
//   [ REV [=|!] "-" ] [ MAJOR.MINOR.TINY [=|!] "-" ] REST
//
// Both prefix groups are optional and independent; REST is the real file
// name. A modifier character without digits does not match its group.
static CANDIDATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?<rev>[0-9]+)(?<rev_strict>[=!])?-)?(?:(?<ver>[0-9]+\.[0-9]+\.[0-9]+)(?<ver_strict>[=!])?-)?(?<rest>.+)$",
    )
    .unwrap()
});

/// Modifier attached to a constraint component.
///
/// `Floor` is the bare form: the candidate is valid at or above its
/// declared revision/version. `Exact` (`=`) restricts it to that point
/// precisely; `Ceiling` (`!`) invalidates it once the context moves
/// strictly past it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strictness {
    #[default]
    Floor,
    Exact,
    Ceiling,
}

impl Strictness {
    fn from_modifier(m: Option<&str>) -> Self {
        match m {
            Some("=") => Strictness::Exact,
            Some("!") => Strictness::Ceiling,
            _ => Strictness::Floor,
        }
    }
}

/// Typed result of parsing one candidate filename.
///
/// Carries at least one of `revision`/`version`; names where neither
/// group matches are not candidates at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintSpec {
    pub revision:        Option<RevisionId>,
    pub revision_strict: Strictness,
    pub version:         Option<VersionId>,
    pub version_strict:  Strictness,
    /// The real file name, with all constraint prefixes stripped.
    pub rest:            String,
}

impl ConstraintSpec {
    /// Applies the precedence rule for candidates carrying both
    /// components: a known context revision suppresses the version, an
    /// unknown one suppresses the revision. Strictness modifiers are
    /// untouched. Must run before any comparison.
    pub fn for_context(&self, revision_known: bool) -> (Option<RevisionId>, Option<VersionId>) {
        match (self.revision, self.version) {
            (Some(r), Some(_)) if revision_known => (Some(r), None),
            (Some(_), Some(v)) => (None, Some(v)),
            other => other,
        }
    }
}

/// Parses one base name against the grammar. `None` means the file is not
/// a candidate: no constraint group matched, the digits overflow, or the
/// remainder is empty. The documented way to ship an unconstrained
/// default is the `0000-` prefix (revision 0, no modifier).
pub fn parse_candidate_name(name: &str) -> Option<ConstraintSpec> {
    let caps = CANDIDATE_REGEX.captures(name)?;

    let revision = match caps.name("rev") {
        Some(m) => Some(m.as_str().parse::<RevisionId>().ok()?),
        None => None,
    };
    let version = match caps.name("ver") {
        Some(m) => Some(m.as_str().parse::<VersionId>().ok()?),
        None => None,
    };

    if revision.is_none() && version.is_none() {
        return None;
    }

    let rest = caps.name("rest")?.as_str();
    if rest.is_empty() {
        return None;
    }

    Some(ConstraintSpec {
        revision,
        revision_strict: Strictness::from_modifier(
            caps.name("rev_strict").map(|m| m.as_str()),
        ),
        version,
        version_strict: Strictness::from_modifier(caps.name("ver_strict").map(|m| m.as_str())),
        rest: rest.to_string(),
    })
}
