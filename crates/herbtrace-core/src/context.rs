//! # Caller Roles and Resolved Contexts
//!
//! The ledger platform identifies callers by certificate; what reaches this
//! core is an organization id, a display name, and an attribute map. The
//! resolver in `herbtrace-contract` turns that into a [`CallerContext`] —
//! the typed form every authorization check consumes.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::identity::OrgId;

/// The role a caller acts under within the supply chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Regulatory authority: onboards farmers and manufacturers, may record
    /// quality tests, and may dump the full ledger.
    Regulator,
    /// Laboratory-council overseer: onboards laboratories.
    LabOverseer,
    /// Herb collector: creates collection batches.
    Farmer,
    /// Testing laboratory: records quality tests.
    Laboratory,
    /// Medicine manufacturer: records processing steps and assembles medicines.
    Manufacturer,
    /// Contract processor: records processing steps only.
    Processor,
}

impl Role {
    /// Stable identifier as carried in certificate attributes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regulator => "regulator",
            Self::LabOverseer => "labOverseer",
            Self::Farmer => "farmer",
            Self::Laboratory => "laboratory",
            Self::Manufacturer => "manufacturer",
            Self::Processor => "processor",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "regulator" => Ok(Self::Regulator),
            "labOverseer" => Ok(Self::LabOverseer),
            "farmer" => Ok(Self::Farmer),
            "laboratory" => Ok(Self::Laboratory),
            "manufacturer" => Ok(Self::Manufacturer),
            "processor" => Ok(Self::Processor),
            other => Err(Error::MissingIdentityAttributes(format!(
                "unknown role attribute: {other:?}"
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A resolved caller context: the typed output of the context resolver and
/// the sole input to authorization checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerContext {
    /// The caller's organization as issued by the platform.
    pub organization_id: OrgId,
    /// The role the caller acts under.
    pub role: Role,
    /// The subject identifier from the caller's certificate, or the display
    /// name when the role came from the delegated-admin mapping.
    pub subject_id: String,
    /// True when the role was resolved through the delegated-admin mapping
    /// rather than explicit certificate attributes.
    pub is_delegated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_roundtrip() {
        for role in [
            Role::Regulator,
            Role::LabOverseer,
            Role::Farmer,
            Role::Laboratory,
            Role::Manufacturer,
            Role::Processor,
        ] {
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_missing_attributes() {
        assert!(matches!(
            Role::from_str("janitor"),
            Err(Error::MissingIdentityAttributes(_))
        ));
    }

    #[test]
    fn role_serde_is_camel_case() {
        assert_eq!(
            serde_json::to_string(&Role::LabOverseer).unwrap(),
            "\"labOverseer\""
        );
    }
}
