//! Identifier newtypes with a strict token charset.
//!
//! Every id in the campaign model is a short ASCII token. `InstanceIdBase` is
//! the stable identity of a recurring contest ("mayor of city 42") across
//! election cycles; `ElectionId` identifies one concrete instance in one
//! cycle and embeds the year.

use crate::errors::CoreError;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn is_token(s: &str) -> bool {
    let len = s.len();
    if !(1..=96).contains(&len) {
        return false;
    }
    s.bytes().all(|b| {
        matches!(b,
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' |
            b'_' | b'-' | b':' | b'.'
        )
    })
}

macro_rules! def_token {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name(String);

        impl $name {
            /// Build from parts already known to be token-safe (callers use
            /// numeric suffixes and fixed prefixes).
            pub fn new(s: impl Into<String>) -> Self {
                let s = s.into();
                debug_assert!(is_token(&s), "malformed token: {s:?}");
                Self(s)
            }

            pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_token(s) { Ok(Self(s.to_string())) } else { Err(CoreError::InvalidToken) }
            }
        }
    }
}

def_token!(
    /// Stable identity of a recurring contest across cycles.
    InstanceIdBase
);
def_token!(
    /// One concrete election in one cycle (`<base>_<year>`).
    ElectionId
);
def_token!(CandidateId);
def_token!(PartyId);
def_token!(OfficeId);
def_token!(CountryId);
def_token!(RegionId);
def_token!(CityId);
def_token!(DistrictId);

impl ElectionId {
    /// Canonical per-cycle id: the instance base plus the election year.
    pub fn for_cycle(base: &InstanceIdBase, year: i32) -> Self {
        Self::new(format!("{}_{}", base.as_str(), year))
    }
}
