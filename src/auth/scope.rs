//! Per-request establishment scope derived from verified claims.
//!
//! Every domain query takes a [`TenantScope`] alongside its normal
//! parameters; the scope decides whether an establishment predicate is
//! applied and which establishment new records are stamped with.

use crate::auth::Role;
use crate::error::ApiError;

/// Effective establishment filter for the current request.
///
/// `unrestricted` is true only for administrators with no establishment
/// in their claims; those requests may optionally pin one establishment
/// per request via the `id_establecimiento` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantScope {
    pub establishment: Option<i64>,
    pub unrestricted: bool,
}

impl TenantScope {
    /// Derive the scope from claims. Administrators carry their claims
    /// establishment (possibly none, meaning unrestricted); any other
    /// role without an assigned establishment is rejected.
    pub fn from_claims(role: Role, establishment_id: Option<i64>) -> Result<Self, ApiError> {
        match role {
            Role::Admin => Ok(Self {
                establishment: establishment_id,
                unrestricted: establishment_id.is_none(),
            }),
            _ => match establishment_id {
                Some(id) => Ok(Self {
                    establishment: Some(id),
                    unrestricted: false,
                }),
                None => Err(ApiError::forbidden("user has no establishment assigned")),
            },
        }
    }

    /// Establishment predicate for single-record reads and writes.
    /// `None` means no predicate.
    pub fn restriction(&self) -> Option<i64> {
        if self.unrestricted {
            None
        } else {
            self.establishment
        }
    }

    /// Establishment predicate for list queries. A caller-supplied
    /// establishment is only honored when unrestricted; a scoped
    /// caller's own establishment always wins.
    pub fn list_filter(&self, requested: Option<i64>) -> Option<i64> {
        if self.unrestricted {
            requested
        } else {
            self.establishment
        }
    }

    /// Establishment to stamp onto a new record: the explicit value when
    /// unrestricted, falling back to the effective establishment. A
    /// create with neither is rejected.
    pub fn create_establishment(&self, explicit: Option<i64>) -> Result<i64, ApiError> {
        let chosen = if self.unrestricted {
            explicit.or(self.establishment)
        } else {
            self.establishment
        };

        chosen.ok_or_else(|| ApiError::forbidden("no establishment to assign the record to"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_without_establishment_is_unrestricted() {
        let scope = TenantScope::from_claims(Role::Admin, None).unwrap();
        assert!(scope.unrestricted);
        assert_eq!(scope.establishment, None);
        assert_eq!(scope.list_filter(None), None);
    }

    #[test]
    fn admin_with_establishment_is_pinned_to_it() {
        let scope = TenantScope::from_claims(Role::Admin, Some(4)).unwrap();
        assert!(!scope.unrestricted);
        assert_eq!(scope.list_filter(Some(9)), Some(4));
    }

    #[test]
    fn non_admin_without_establishment_is_rejected() {
        let err = TenantScope::from_claims(Role::Operario, None).unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn unrestricted_admin_may_pin_a_tenant_per_request() {
        let scope = TenantScope::from_claims(Role::Admin, None).unwrap();
        assert_eq!(scope.list_filter(Some(2)), Some(2));
        assert_eq!(scope.list_filter(None), None);
    }

    #[test]
    fn scoped_caller_supplied_tenant_is_ignored() {
        let scope = TenantScope::from_claims(Role::Veterinario, Some(1)).unwrap();
        assert_eq!(scope.list_filter(Some(2)), Some(1));
    }

    #[test]
    fn operario_create_is_stamped_with_own_establishment() {
        let scope = TenantScope::from_claims(Role::Operario, Some(1)).unwrap();
        assert_eq!(scope.create_establishment(None).unwrap(), 1);
        // explicit field from a scoped caller cannot redirect the record
        assert_eq!(scope.create_establishment(Some(2)).unwrap(), 1);
    }

    #[test]
    fn unrestricted_admin_create_uses_explicit_establishment() {
        let scope = TenantScope::from_claims(Role::Admin, None).unwrap();
        assert_eq!(scope.create_establishment(Some(2)).unwrap(), 2);
    }

    #[test]
    fn unrestricted_admin_create_without_any_establishment_is_rejected() {
        let scope = TenantScope::from_claims(Role::Admin, None).unwrap();
        let err = scope.create_establishment(None).unwrap_err();
        assert_eq!(err.status_code(), 403);
    }
}
