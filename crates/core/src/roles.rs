//! Role names and the capability model.
//!
//! Role names must match the CHECK constraint in
//! `20260301000001_create_users_table.sql`. Authorization decisions are made
//! against capabilities, never by comparing role strings in handlers, so the
//! role -> permission mapping lives in exactly one place.

/// Platform administrator.
pub const ROLE_ADMIN: &str = "admin";

/// Agricultural Extension Worker.
pub const ROLE_AEW: &str = "aew";

/// Registered farmer.
pub const ROLE_FARMER: &str = "farmer";

/// All valid role names.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_AEW, ROLE_FARMER];

/// A discrete permission a role may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create, update, and deactivate user accounts.
    ManageUsers,
    /// Upload, edit, and delete library content.
    ManageContent,
    /// Create, edit, and delete training activities.
    ManageActivities,
    /// Register for training activities.
    RegisterForActivities,
    /// Like, view, and download library content.
    EngageWithContent,
}

/// The capability set granted to a role.
///
/// Unknown role names get no capabilities rather than an error; an
/// unrecognized role in a token is treated the same as no role.
pub fn capabilities_for_role(role: &str) -> &'static [Capability] {
    match role {
        ROLE_ADMIN => &[
            Capability::ManageUsers,
            Capability::ManageContent,
            Capability::ManageActivities,
            Capability::RegisterForActivities,
            Capability::EngageWithContent,
        ],
        ROLE_AEW => &[
            Capability::ManageContent,
            Capability::ManageActivities,
            Capability::RegisterForActivities,
            Capability::EngageWithContent,
        ],
        ROLE_FARMER => &[
            Capability::RegisterForActivities,
            Capability::EngageWithContent,
        ],
        _ => &[],
    }
}

/// Whether the given role holds a capability.
pub fn has_capability(role: &str, capability: Capability) -> bool {
    capabilities_for_role(role).contains(&capability)
}

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_has_all_capabilities() {
        for cap in [
            Capability::ManageUsers,
            Capability::ManageContent,
            Capability::ManageActivities,
            Capability::RegisterForActivities,
            Capability::EngageWithContent,
        ] {
            assert!(has_capability(ROLE_ADMIN, cap), "admin should hold {cap:?}");
        }
    }

    #[test]
    fn test_aew_manages_content_but_not_users() {
        assert!(has_capability(ROLE_AEW, Capability::ManageContent));
        assert!(has_capability(ROLE_AEW, Capability::ManageActivities));
        assert!(!has_capability(ROLE_AEW, Capability::ManageUsers));
    }

    #[test]
    fn test_farmer_engages_but_does_not_manage() {
        assert!(has_capability(ROLE_FARMER, Capability::EngageWithContent));
        assert!(has_capability(ROLE_FARMER, Capability::RegisterForActivities));
        assert!(!has_capability(ROLE_FARMER, Capability::ManageContent));
        assert!(!has_capability(ROLE_FARMER, Capability::ManageActivities));
        assert!(!has_capability(ROLE_FARMER, Capability::ManageUsers));
    }

    #[test]
    fn test_unknown_role_has_no_capabilities() {
        assert!(capabilities_for_role("superuser").is_empty());
        assert!(!has_capability("", Capability::EngageWithContent));
    }

    #[test]
    fn test_valid_roles_accepted() {
        assert!(validate_role(ROLE_ADMIN).is_ok());
        assert!(validate_role(ROLE_AEW).is_ok());
        assert!(validate_role(ROLE_FARMER).is_ok());
    }

    #[test]
    fn test_invalid_role_rejected() {
        let result = validate_role("moderator");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid role"));
    }
}
