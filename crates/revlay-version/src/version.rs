use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Monotonically increasing build counter. An unknown revision is
/// `Option::None` at the call sites, never zero.
pub type RevisionId = u64;

/// A `major.minor.tiny` release identifier.
///
/// Ordering is lexicographic by component, which the derived `Ord`
/// provides through field order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionId {
    pub major: u64,
    pub minor: u64,
    pub tiny:  u64,
}

#[derive(Debug, Error)]
#[error("invalid version identifier: {0:?}")]
pub struct VersionIdError(pub String);

impl VersionId {
    /// Sentinel returned by the revision map when a revision postdates
    /// every known release. Sorts below every real version.
    pub const ZERO: VersionId = VersionId::new(0, 0, 0);

    pub const fn new(major: u64, minor: u64, tiny: u64) -> Self {
        Self { major, minor, tiny }
    }
}

impl FromStr for VersionId {
    type Err = VersionIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('.');
        let mut component = || {
            parts
                .next()
                .and_then(|p| p.parse::<u64>().ok())
                .ok_or_else(|| VersionIdError(s.to_string()))
        };

        let major = component()?;
        let minor = component()?;
        let tiny = component()?;

        if parts.next().is_some() {
            return Err(VersionIdError(s.to_string()));
        }

        Ok(Self { major, minor, tiny })
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.tiny)
    }
}

impl Serialize for VersionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VersionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::VersionId;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[test]
    fn test_parse_roundtrip() {
        let v: VersionId = "1.2.3".parse().unwrap();
        assert_eq!(v, VersionId::new(1, 2, 3));
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_parse_rejects_short_and_long_forms() {
        assert!("1.2".parse::<VersionId>().is_err());
        assert!("1.2.3.4".parse::<VersionId>().is_err());
        assert!("1.2.x".parse::<VersionId>().is_err());
        assert!("".parse::<VersionId>().is_err());
    }

    #[test]
    fn test_lexicographic_order() {
        let a = VersionId::new(1, 9, 9);
        let b = VersionId::new(2, 0, 0);
        assert!(a < b);
        assert!(VersionId::new(1, 2, 3) < VersionId::new(1, 3, 0));
        assert!(VersionId::new(1, 2, 3) < VersionId::new(1, 2, 4));
    }

    #[test]
    fn test_zero_sorts_first() {
        assert!(VersionId::ZERO < VersionId::new(0, 0, 1));
    }

    fn arb_version() -> impl Strategy<Value = VersionId> {
        (0u64..100, 0u64..100, 0u64..100).prop_map(|(a, b, c)| VersionId::new(a, b, c))
    }

    proptest! {
        #[test]
        fn prop_order_reflexive(a in arb_version()) {
            prop_assert_eq!(a.cmp(&a), Ordering::Equal);
        }

        #[test]
        fn prop_order_antisymmetric(a in arb_version(), b in arb_version()) {
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }

        #[test]
        fn prop_order_transitive(a in arb_version(), b in arb_version(), c in arb_version()) {
            if a <= b && b <= c {
                prop_assert!(a <= c);
            }
        }

        #[test]
        fn prop_display_parse_roundtrip(a in arb_version()) {
            let parsed: VersionId = a.to_string().parse().unwrap();
            prop_assert_eq!(parsed, a);
        }
    }
}
