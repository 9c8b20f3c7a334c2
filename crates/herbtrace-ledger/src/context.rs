//! # Caller Identity and Transaction Context
//!
//! The platform presents each invocation with the caller's certificate-
//! derived identity and the transaction's id and timestamp. Operations read
//! both through [`TransactionContext`] — never the wall clock, never any
//! ambient global — so re-execution on another node reproduces the same
//! documents byte for byte.

use std::collections::BTreeMap;

use herbtrace_core::{OrgId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::store::LedgerState;

/// Certificate attribute carrying the caller's role.
pub const ATTR_ROLE: &str = "role";
/// Certificate attribute carrying the caller's subject identifier.
pub const ATTR_SUBJECT_ID: &str = "subjectId";

/// The platform-issued identity of the invoking principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallerIdentity {
    /// The caller's organization.
    pub organization_id: OrgId,
    /// The display name from the caller's certificate.
    pub display_name: String,
    /// Certificate-carried attributes (role, subjectId, ...).
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

impl CallerIdentity {
    /// An identity with explicit role and subject attributes.
    pub fn with_role(
        organization_id: impl Into<String>,
        display_name: impl Into<String>,
        role: &str,
        subject_id: &str,
    ) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert(ATTR_ROLE.to_string(), role.to_string());
        attributes.insert(ATTR_SUBJECT_ID.to_string(), subject_id.to_string());
        Self {
            organization_id: OrgId::new(organization_id),
            display_name: display_name.into(),
            attributes,
        }
    }

    /// An identity carrying no role attributes (resolved, if at all, through
    /// the delegated-admin mapping).
    pub fn bare(organization_id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            organization_id: OrgId::new(organization_id),
            display_name: display_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Look up a certificate attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Everything one invocation may touch: the ledger state plus the
/// platform-supplied caller identity, transaction id and timestamp.
pub struct TransactionContext<'a, S: LedgerState> {
    /// The keyed document store, scoped to this transaction.
    pub state: &'a mut S,
    /// The invoking principal.
    pub caller: CallerIdentity,
    /// The platform transaction id (deterministic across executors).
    pub tx_id: String,
    /// The platform transaction timestamp (deterministic across executors).
    pub tx_timestamp: Timestamp,
}

impl<'a, S: LedgerState> TransactionContext<'a, S> {
    /// Assemble a context from platform-supplied parts.
    pub fn new(state: &'a mut S, caller: CallerIdentity, tx_id: String, tx_timestamp: Timestamp) -> Self {
        Self {
            state,
            caller,
            tx_id,
            tx_timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_role_sets_both_attributes() {
        let id = CallerIdentity::with_role("herbal-authority", "reg-1", "regulator", "user-7");
        assert_eq!(id.attribute(ATTR_ROLE), Some("regulator"));
        assert_eq!(id.attribute(ATTR_SUBJECT_ID), Some("user-7"));
    }

    #[test]
    fn bare_identity_has_no_attributes() {
        let id = CallerIdentity::bare("lab-council", "admin");
        assert!(id.attribute(ATTR_ROLE).is_none());
        assert!(id.attribute(ATTR_SUBJECT_ID).is_none());
    }
}
