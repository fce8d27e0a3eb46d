//! Route authorization policy.
//!
//! Instead of per-route annotations, authorization is a declarative
//! table: `(method, route template) -> { allowed roles, tenant-check
//! mode }`, consulted by one middleware. The tenant guard runs first
//! and injects [`TenantScope`]; the role guard then compares the
//! caller's role against the allowed set.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::auth::{Role, TenantScope};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantCheck {
    /// Derive and inject a `TenantScope`; reject scoped roles with no
    /// assigned establishment.
    Required,
    /// Cross-tenant surface (user/establishment administration,
    /// session introspection). No scope is derived.
    Skip,
}

#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    /// `None` allows every authenticated role.
    pub roles: Option<&'static [Role]>,
    pub tenant: TenantCheck,
}

const ANY_ROLE: RoutePolicy = RoutePolicy {
    roles: None,
    tenant: TenantCheck::Required,
};

const ADMIN_ONLY: RoutePolicy = RoutePolicy {
    roles: Some(&[Role::Admin]),
    tenant: TenantCheck::Skip,
};

const CAN_DELETE: &[Role] = &[Role::Admin, Role::Veterinario];

const DELETE_POLICY: RoutePolicy = RoutePolicy {
    roles: Some(CAN_DELETE),
    tenant: TenantCheck::Required,
};

/// The policy table. Routes not listed fall back to [`ANY_ROLE`]
/// (every authenticated role, tenant check required).
static POLICIES: &[(&str, &str, RoutePolicy)] = &[
    (
        "GET",
        "/api/auth/whoami",
        RoutePolicy {
            roles: None,
            tenant: TenantCheck::Skip,
        },
    ),
    // User administration: admin-only, inherently cross-tenant
    ("GET", "/api/users", ADMIN_ONLY),
    ("GET", "/api/users/:id", ADMIN_ONLY),
    ("PUT", "/api/users/:id", ADMIN_ONLY),
    ("DELETE", "/api/users/:id", ADMIN_ONLY),
    // Establishment administration
    ("GET", "/api/establishments", ADMIN_ONLY),
    ("GET", "/api/establishments/:id", ADMIN_ONLY),
    ("POST", "/api/establishments", ADMIN_ONLY),
    ("PUT", "/api/establishments/:id", ADMIN_ONLY),
    ("DELETE", "/api/establishments/:id", ADMIN_ONLY),
    // Domain deletes are held back from operators
    ("DELETE", "/api/mothers/:id", DELETE_POLICY),
    ("DELETE", "/api/calves/:id", DELETE_POLICY),
    ("DELETE", "/api/herds/:id", DELETE_POLICY),
    ("DELETE", "/api/events/:id", DELETE_POLICY),
    ("DELETE", "/api/treatments/:id", DELETE_POLICY),
    ("DELETE", "/api/diarrheas/:id", DELETE_POLICY),
];

pub fn policy_for(method: &str, route: &str) -> RoutePolicy {
    POLICIES
        .iter()
        .find(|(m, r, _)| *m == method && *r == route)
        .map(|(_, _, p)| *p)
        .unwrap_or(ANY_ROLE)
}

/// Tenant + role guard. Runs after claims extraction; looks the matched
/// route template up in the policy table, derives the tenant scope, then
/// checks the role. Rejections are 403s; a missing `AuthUser` means the
/// claims middleware did not run and is a 401.
pub async fn guard_middleware(
    matched_path: MatchedPath,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("authentication required"))?;

    let policy = policy_for(request.method().as_str(), matched_path.as_str());

    if policy.tenant == TenantCheck::Required {
        let scope = TenantScope::from_claims(auth_user.role, auth_user.establishment_id)?;
        request.extensions_mut().insert(scope);
    }

    if let Some(allowed) = policy.roles {
        if !allowed.contains(&auth_user.role) {
            let names: Vec<&str> = allowed.iter().map(Role::as_str).collect();
            return Err(ApiError::forbidden(format!(
                "requires one of: {}",
                names.join(", ")
            )));
        }
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlisted_routes_get_the_default_policy() {
        let policy = policy_for("GET", "/api/mothers");
        assert!(policy.roles.is_none());
        assert_eq!(policy.tenant, TenantCheck::Required);
    }

    #[test]
    fn user_administration_is_admin_only_and_unscoped() {
        let policy = policy_for("PUT", "/api/users/:id");
        assert_eq!(policy.roles, Some(&[Role::Admin][..]));
        assert_eq!(policy.tenant, TenantCheck::Skip);
    }

    #[test]
    fn domain_deletes_exclude_operators() {
        let policy = policy_for("DELETE", "/api/calves/:id");
        let allowed = policy.roles.unwrap();
        assert!(allowed.contains(&Role::Admin));
        assert!(allowed.contains(&Role::Veterinario));
        assert!(!allowed.contains(&Role::Operario));
        assert_eq!(policy.tenant, TenantCheck::Required);
    }

    #[test]
    fn lookup_distinguishes_methods_on_the_same_route() {
        assert!(policy_for("GET", "/api/mothers/:id").roles.is_none());
        assert!(policy_for("DELETE", "/api/mothers/:id").roles.is_some());
    }
}
