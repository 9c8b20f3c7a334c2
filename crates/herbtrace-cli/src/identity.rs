//! # Caller Identity Flags
//!
//! Flags shared by every subcommand that invokes the contract. They stand in
//! for the certificate a real platform would present.

use clap::Args;
use herbtrace_ledger::CallerIdentity;

/// Who is calling, as the platform would have attested it.
#[derive(Args, Debug)]
pub struct CallerFlags {
    /// Caller organization (e.g. `herbal-authority`, `lab-council`).
    #[arg(long)]
    pub org: String,

    /// Certificate display name.
    #[arg(long, default_value = "admin")]
    pub name: String,

    /// Role attribute (`farmer`, `laboratory`, `manufacturer`, `processor`,
    /// `regulator`, `labOverseer`). Omit to rely on the delegated-admin
    /// mapping.
    #[arg(long)]
    pub role: Option<String>,

    /// Subject-id attribute; defaults to the display name when a role is
    /// given.
    #[arg(long)]
    pub subject: Option<String>,
}

impl CallerFlags {
    /// Build the platform-shaped identity these flags describe.
    pub fn identity(&self) -> CallerIdentity {
        match &self.role {
            Some(role) => CallerIdentity::with_role(
                self.org.clone(),
                self.name.clone(),
                role,
                self.subject.as_deref().unwrap_or(&self.name),
            ),
            None => CallerIdentity::bare(self.org.clone(), self.name.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herbtrace_ledger::{ATTR_ROLE, ATTR_SUBJECT_ID};

    #[test]
    fn role_flags_become_attributes() {
        let flags = CallerFlags {
            org: "lab-council".into(),
            name: "qc".into(),
            role: Some("laboratory".into()),
            subject: Some("LAB-1".into()),
        };
        let id = flags.identity();
        assert_eq!(id.attribute(ATTR_ROLE), Some("laboratory"));
        assert_eq!(id.attribute(ATTR_SUBJECT_ID), Some("LAB-1"));
    }

    #[test]
    fn missing_role_yields_bare_identity() {
        let flags = CallerFlags {
            org: "herbal-authority".into(),
            name: "admin".into(),
            role: None,
            subject: None,
        };
        assert!(flags.identity().attributes.is_empty());
    }
}
