//! Navigation and dashboard layout per role

use crate::access_control::types::{Role, is_executive};
use serde::Serialize;

/// Sidebar navigation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

const BASE_ITEMS: &[NavItem] = &[
    NavItem {
        id: "overview",
        label: "Overview",
        icon: "Home",
    },
    NavItem {
        id: "projects",
        label: "Projects",
        icon: "Folder",
    },
    NavItem {
        id: "career",
        label: "Career Development",
        icon: "TrendingUp",
    },
    NavItem {
        id: "ai-insights",
        label: "AI Insights",
        icon: "Brain",
    },
    NavItem {
        id: "settings",
        label: "Settings",
        icon: "Settings",
    },
];

const EXECUTIVE_ITEMS: &[NavItem] = &[
    NavItem {
        id: "team",
        label: "Team Management",
        icon: "Users",
    },
    NavItem {
        id: "leadership",
        label: "Leadership",
        icon: "Award",
    },
];

/// Navigation items visible to a role, in display order
///
/// Executive items are spliced directly after `projects`.
pub fn resolve_navigation_items(role: Option<Role>) -> Vec<NavItem> {
    let mut items = BASE_ITEMS.to_vec();

    if is_executive(role) {
        let at = items
            .iter()
            .position(|item| item.id == "projects")
            .map_or(items.len(), |idx| idx + 1);
        let tail = items.split_off(at);
        items.extend_from_slice(EXECUTIVE_ITEMS);
        items.extend(tail);
    }

    items
}

/// Home dashboard section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSection {
    PersonalProjects,
    PersonalCareer,
    TeamOverview,
    TeamProjects,
    TeamCareer,
    OrganizationInsights,
}

/// Dashboard sections shown to a role, in display order
pub fn dashboard_sections(role: Option<Role>) -> Vec<DashboardSection> {
    let mut sections = vec![
        DashboardSection::PersonalProjects,
        DashboardSection::PersonalCareer,
    ];

    if is_executive(role) {
        sections.extend([
            DashboardSection::TeamOverview,
            DashboardSection::TeamProjects,
            DashboardSection::TeamCareer,
            DashboardSection::OrganizationInsights,
        ]);
    }

    sections
}

/// Presentation details for a role badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDisplay {
    pub label: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

/// Badge for a role; users without a recognised role are shown as team members
pub fn role_display(role: Option<Role>) -> RoleDisplay {
    match role.unwrap_or(Role::TeamMember) {
        Role::TeamMember => RoleDisplay {
            label: "Team Member",
            color: "#6b7280",
            description: "Access to assigned projects and personal career development",
        },
        Role::ProjectManager => RoleDisplay {
            label: "Project Manager",
            color: "#059669",
            description: "Full management access for owned projects",
        },
        Role::ExecutiveLeader => RoleDisplay {
            label: "Executive Leader",
            color: "#dc2626",
            description: "Team management and organizational oversight",
        },
    }
}
