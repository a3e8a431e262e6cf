//! Role-driven navigation configuration.
//!
//! Roles collapse onto a closed set of experiences so a missing mapping is a
//! compile error, not a runtime fallback.

use shared::UserRole;

/// The product experience a role lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleExperience {
    /// Full company management: owners and managers.
    Management,
    /// Platform administration.
    Administration,
    /// Field work: assigned jobs and schedules.
    Field,
    /// Customer-facing portal.
    ClientPortal,
    /// Single-operator companies.
    Solo,
}

impl RoleExperience {
    pub fn for_role(role: UserRole) -> Self {
        match role {
            UserRole::Owner | UserRole::Manager => RoleExperience::Management,
            UserRole::Admin => RoleExperience::Administration,
            UserRole::Employee | UserRole::Technician | UserRole::FieldWorker => {
                RoleExperience::Field
            }
            UserRole::Client => RoleExperience::ClientPortal,
            UserRole::Solo => RoleExperience::Solo,
        }
    }
}

/// Top-level navigation entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSection {
    Dashboard,
    WorkOrders,
    Customers,
    Invoices,
    Team,
    Settings,
}

/// Navigation sections shown for an experience, in display order.
pub fn nav_sections(experience: RoleExperience) -> &'static [NavSection] {
    use NavSection::*;
    match experience {
        RoleExperience::Management | RoleExperience::Administration => {
            &[Dashboard, WorkOrders, Customers, Invoices, Team, Settings]
        }
        RoleExperience::Field => &[Dashboard, WorkOrders, Settings],
        RoleExperience::ClientPortal => &[Dashboard, WorkOrders, Invoices, Settings],
        RoleExperience::Solo => &[Dashboard, WorkOrders, Customers, Invoices, Settings],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managers_share_the_management_experience() {
        assert_eq!(
            RoleExperience::for_role(UserRole::Owner),
            RoleExperience::Management
        );
        assert_eq!(
            RoleExperience::for_role(UserRole::Manager),
            RoleExperience::Management
        );
    }

    #[test]
    fn field_roles_do_not_see_billing() {
        let sections = nav_sections(RoleExperience::for_role(UserRole::Technician));
        assert!(!sections.contains(&NavSection::Invoices));
        assert!(!sections.contains(&NavSection::Team));
        assert!(sections.contains(&NavSection::WorkOrders));
    }

    #[test]
    fn solo_operators_have_no_team_section() {
        let sections = nav_sections(RoleExperience::for_role(UserRole::Solo));
        assert!(!sections.contains(&NavSection::Team));
        assert!(sections.contains(&NavSection::Customers));
    }

    #[test]
    fn every_role_maps_to_an_experience() {
        for role in [
            UserRole::Owner,
            UserRole::Manager,
            UserRole::Employee,
            UserRole::Admin,
            UserRole::Technician,
            UserRole::Client,
            UserRole::Solo,
            UserRole::FieldWorker,
        ] {
            let _ = nav_sections(RoleExperience::for_role(role));
        }
    }
}
