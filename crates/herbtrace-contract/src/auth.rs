//! # Caller Context Resolution and Authorization
//!
//! The platform hands each invocation an organization id, a display name,
//! and a certificate attribute map. [`resolve_context`] turns that into a
//! typed [`CallerContext`]: explicit `role` + `subjectId` attributes win;
//! otherwise the static delegated-admin table maps well-known administrative
//! identities (which carry no attributes) to a role per organization.
//!
//! Resolution is pure over the identity and the table — it never touches
//! storage.

use herbtrace_core::{CallerContext, Error, Result, Role};
use herbtrace_ledger::context::{CallerIdentity, ATTR_ROLE, ATTR_SUBJECT_ID};

/// Organization operating the regulatory authority (onboards farmers and
/// manufacturers; may record quality tests; may dump the ledger).
pub const ORG_REGULATOR: &str = "herbal-authority";

/// Organization operating the laboratory council (onboards laboratories;
/// its laboratories record quality tests).
pub const ORG_LAB_COUNCIL: &str = "lab-council";

struct DelegatedAdmin {
    org: &'static str,
    display_name: &'static str,
    role: Role,
}

/// Administrative identities enrolled before attribute-carrying certificates
/// existed. Matched by (organization, display name).
const DELEGATED_ADMINS: &[DelegatedAdmin] = &[
    DelegatedAdmin {
        org: ORG_REGULATOR,
        display_name: "admin",
        role: Role::Regulator,
    },
    DelegatedAdmin {
        org: ORG_LAB_COUNCIL,
        display_name: "admin",
        role: Role::LabOverseer,
    },
];

/// Resolve a platform identity into a typed caller context.
///
/// # Errors
///
/// [`Error::MissingIdentityAttributes`] when the identity carries no role
/// attributes and no delegated-admin mapping applies.
pub fn resolve_context(identity: &CallerIdentity) -> Result<CallerContext> {
    if let (Some(role), Some(subject_id)) = (
        identity.attribute(ATTR_ROLE),
        identity.attribute(ATTR_SUBJECT_ID),
    ) {
        return Ok(CallerContext {
            organization_id: identity.organization_id.clone(),
            role: role.parse()?,
            subject_id: subject_id.to_string(),
            is_delegated: false,
        });
    }

    DELEGATED_ADMINS
        .iter()
        .find(|m| {
            m.org == identity.organization_id.as_str() && m.display_name == identity.display_name
        })
        .map(|m| CallerContext {
            organization_id: identity.organization_id.clone(),
            role: m.role,
            subject_id: identity.display_name.clone(),
            is_delegated: true,
        })
        .ok_or_else(|| {
            Error::MissingIdentityAttributes(format!(
                "identity {:?} of {} carries no role attributes and matches no delegated admin",
                identity.display_name, identity.organization_id
            ))
        })
}

/// One row of an operation's authorization matrix: a permitted role,
/// optionally pinned to an organization.
pub type Permitted = (Role, Option<&'static str>);

/// Check the resolved context against an operation's permitted (role, org)
/// pairs.
///
/// # Errors
///
/// [`Error::PermissionDenied`] naming the operation and the caller's actual
/// role and organization.
pub fn authorize(context: &CallerContext, operation: &str, permitted: &[Permitted]) -> Result<()> {
    let allowed = permitted.iter().any(|(role, org)| {
        context.role == *role && org.map_or(true, |o| context.organization_id.as_str() == o)
    });
    if allowed {
        Ok(())
    } else {
        Err(Error::PermissionDenied(format!(
            "{operation} is not permitted for {}@{}",
            context.role, context.organization_id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_attributes_resolve_directly() {
        let id = CallerIdentity::with_role("any-org", "farm-cert-12", "farmer", "farmer-12");
        let ctx = resolve_context(&id).unwrap();
        assert_eq!(ctx.role, Role::Farmer);
        assert_eq!(ctx.subject_id, "farmer-12");
        assert!(!ctx.is_delegated);
    }

    #[test]
    fn admin_fallback_maps_per_organization() {
        let reg = resolve_context(&CallerIdentity::bare(ORG_REGULATOR, "admin")).unwrap();
        assert_eq!(reg.role, Role::Regulator);
        assert!(reg.is_delegated);

        let lab = resolve_context(&CallerIdentity::bare(ORG_LAB_COUNCIL, "admin")).unwrap();
        assert_eq!(lab.role, Role::LabOverseer);
        assert!(lab.is_delegated);
    }

    #[test]
    fn unknown_bare_identity_is_rejected() {
        let err = resolve_context(&CallerIdentity::bare("some-org", "alice")).unwrap_err();
        assert!(matches!(err, Error::MissingIdentityAttributes(_)));
    }

    #[test]
    fn admin_of_unknown_org_is_rejected() {
        assert!(resolve_context(&CallerIdentity::bare("some-org", "admin")).is_err());
    }

    #[test]
    fn authorize_checks_role_and_org() {
        let ctx = resolve_context(&CallerIdentity::with_role(
            ORG_LAB_COUNCIL,
            "lab-3",
            "laboratory",
            "lab-3",
        ))
        .unwrap();

        assert!(authorize(&ctx, "addQualityTest", &[(Role::Laboratory, Some(ORG_LAB_COUNCIL))]).is_ok());
        assert!(authorize(&ctx, "createHerbBatch", &[(Role::Farmer, None)]).is_err());
        // Right role, wrong org.
        assert!(authorize(&ctx, "addQualityTest", &[(Role::Laboratory, Some(ORG_REGULATOR))]).is_err());
    }

    #[test]
    fn authorize_accepts_any_listed_pair() {
        let ctx = resolve_context(&CallerIdentity::with_role(
            ORG_REGULATOR,
            "reg-1",
            "regulator",
            "reg-1",
        ))
        .unwrap();
        let matrix = &[
            (Role::Laboratory, Some(ORG_LAB_COUNCIL)),
            (Role::Regulator, Some(ORG_REGULATOR)),
        ];
        assert!(authorize(&ctx, "addQualityTest", matrix).is_ok());
    }
}
