//! Permission resolution: typed capability-set lookup with admin bypass.
//!
//! A user's grantable capabilities are the flattened union of slugs attached
//! directly and slugs attached via roles. The set is resolved once per user
//! object and queried with pure predicates; it must be re-resolved whenever
//! the user object changes (login, permission reassignment) and never cached
//! beyond that object's lifetime.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{OrgId, PermissionSlug, UserId};

/// Role name that bypasses every permission check.
const ADMIN_ROLE: &str = "admin";

/// A named bundle of permission slugs assignable to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role name; `admin` grants everything.
    pub name: String,
    /// Slugs this role carries.
    #[serde(default)]
    pub permissions: Vec<PermissionSlug>,
}

/// An authenticated user as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub organization_id: OrgId,
    /// Roles assigned to this user.
    #[serde(default)]
    pub roles: Vec<Role>,
    /// Slugs granted directly, outside any role.
    #[serde(default)]
    pub permissions: Vec<PermissionSlug>,
}

impl User {
    /// Returns true if any assigned role is the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|r| r.name == ADMIN_ROLE)
    }
}

/// A user's resolved capability set.
///
/// Resolved once per user object; queries are pure lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionSet {
    admin: bool,
    slugs: HashSet<PermissionSlug>,
}

impl PermissionSet {
    /// Flattens direct and role-attached slugs into one set.
    #[must_use]
    pub fn resolve(user: &User) -> Self {
        let mut slugs: HashSet<PermissionSlug> = user.permissions.iter().cloned().collect();
        for role in &user.roles {
            slugs.extend(role.permissions.iter().cloned());
        }
        Self {
            admin: user.is_admin(),
            slugs,
        }
    }

    /// Returns true if the capability is granted.
    ///
    /// Admin users trivially satisfy every check, including slugs that
    /// exist nowhere in the system.
    #[must_use]
    pub fn has(&self, slug: &PermissionSlug) -> bool {
        self.admin || self.slugs.contains(slug)
    }

    /// Returns true if any of the capabilities is granted.
    #[must_use]
    pub fn has_any(&self, slugs: &[PermissionSlug]) -> bool {
        self.admin || slugs.iter().any(|s| self.slugs.contains(s))
    }
}

/// Convenience predicate: resolve and query in one step.
#[must_use]
pub fn has_permission(user: &User, slug: &PermissionSlug) -> bool {
    PermissionSet::resolve(user).has(slug)
}

/// Convenience predicate: resolve and query a slug list in one step.
#[must_use]
pub fn has_any_permission(user: &User, slugs: &[PermissionSlug]) -> bool {
    PermissionSet::resolve(user).has_any(slugs)
}
