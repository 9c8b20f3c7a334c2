//! # Domain Identifier Newtypes
//!
//! Newtype wrappers for the business identifiers that key documents on the
//! ledger. These prevent accidental identifier confusion — you cannot pass
//! a `MedicineId` where a `BatchId` is expected.
//!
//! Identifiers are caller-supplied business keys (e.g. `BATCH-2024-0001`),
//! not platform-generated values. The inner string doubles as the ledger
//! key, so `as_str()` is the canonical way to reach the raw key.

use serde::{Deserialize, Serialize};

/// Identifier of a herb collection batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(pub String);

/// Identifier of a finished medicine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MedicineId(pub String);

/// Identifier of a supply-chain participant (farmer, laboratory, manufacturer).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

/// Identifier of an organization as issued by the ledger platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(pub String);

macro_rules! string_id {
    ($ty:ident) => {
        impl $ty {
            /// Wrap a business key string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// The raw key string as stored on the ledger.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the key is empty (rejected by every operation).
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $ty {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }
    };
}

string_id!(BatchId);
string_id!(MedicineId);
string_id!(ParticipantId);
string_id!(OrgId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_raw_key() {
        let id = BatchId::new("BATCH-001");
        assert_eq!(id.to_string(), "BATCH-001");
        assert_eq!(id.as_str(), "BATCH-001");
    }

    #[test]
    fn serde_is_transparent() {
        let id = MedicineId::new("MED-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"MED-7\"");
        let back: MedicineId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn empty_key_detected() {
        assert!(ParticipantId::new("").is_empty());
        assert!(!ParticipantId::new("FARM-1").is_empty());
    }
}
