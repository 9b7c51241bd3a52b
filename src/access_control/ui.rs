//! UI permission table
//!
//! Feature visibility derived from the global role. Project-scoped fields default to
//! `false` and are only set from a project's resolved [`AccessLevel`].

use crate::access_control::resolver::AccessLevel;
use crate::access_control::types::{Role, is_executive};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Named application feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UiFeature {
    // Navigation
    #[serde(rename = "canAccessOverview")]
    AccessOverview,
    #[serde(rename = "canAccessProjects")]
    AccessProjects,
    #[serde(rename = "canAccessCareer")]
    AccessCareer,
    #[serde(rename = "canAccessAI")]
    AccessAi,
    #[serde(rename = "canAccessSettings")]
    AccessSettings,
    #[serde(rename = "canAccessTeam")]
    AccessTeam,
    #[serde(rename = "canAccessLeadership")]
    AccessLeadership,

    // Projects
    #[serde(rename = "canCreateProject")]
    CreateProject,
    #[serde(rename = "canViewAllProjects")]
    ViewAllProjects,
    #[serde(rename = "canEditProject")]
    EditProject,
    #[serde(rename = "canDeleteProject")]
    DeleteProject,
    #[serde(rename = "canManageProjectTeam")]
    ManageProjectTeam,
    #[serde(rename = "canCommentOnProject")]
    CommentOnProject,

    // Team management
    #[serde(rename = "canManageTeam")]
    ManageTeam,
    #[serde(rename = "canViewTeamCareer")]
    ViewTeamCareer,
    #[serde(rename = "canAddTeamMembers")]
    AddTeamMembers,
    #[serde(rename = "canRemoveTeamMembers")]
    RemoveTeamMembers,

    // Career
    #[serde(rename = "canViewOwnCareer")]
    ViewOwnCareer,
    #[serde(rename = "canManageCareerPlans")]
    ManageCareerPlans,
}

impl UiFeature {
    /// Get the feature key as used by UI code
    pub const fn as_str(&self) -> &'static str {
        match self {
            UiFeature::AccessOverview => "canAccessOverview",
            UiFeature::AccessProjects => "canAccessProjects",
            UiFeature::AccessCareer => "canAccessCareer",
            UiFeature::AccessAi => "canAccessAI",
            UiFeature::AccessSettings => "canAccessSettings",
            UiFeature::AccessTeam => "canAccessTeam",
            UiFeature::AccessLeadership => "canAccessLeadership",
            UiFeature::CreateProject => "canCreateProject",
            UiFeature::ViewAllProjects => "canViewAllProjects",
            UiFeature::EditProject => "canEditProject",
            UiFeature::DeleteProject => "canDeleteProject",
            UiFeature::ManageProjectTeam => "canManageProjectTeam",
            UiFeature::CommentOnProject => "canCommentOnProject",
            UiFeature::ManageTeam => "canManageTeam",
            UiFeature::ViewTeamCareer => "canViewTeamCareer",
            UiFeature::AddTeamMembers => "canAddTeamMembers",
            UiFeature::RemoveTeamMembers => "canRemoveTeamMembers",
            UiFeature::ViewOwnCareer => "canViewOwnCareer",
            UiFeature::ManageCareerPlans => "canManageCareerPlans",
        }
    }

    /// Try to parse a feature from its UI key
    pub fn try_parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.as_str() == s)
    }

    /// Get all features
    pub fn all() -> &'static [UiFeature] {
        &[
            UiFeature::AccessOverview,
            UiFeature::AccessProjects,
            UiFeature::AccessCareer,
            UiFeature::AccessAi,
            UiFeature::AccessSettings,
            UiFeature::AccessTeam,
            UiFeature::AccessLeadership,
            UiFeature::CreateProject,
            UiFeature::ViewAllProjects,
            UiFeature::EditProject,
            UiFeature::DeleteProject,
            UiFeature::ManageProjectTeam,
            UiFeature::CommentOnProject,
            UiFeature::ManageTeam,
            UiFeature::ViewTeamCareer,
            UiFeature::AddTeamMembers,
            UiFeature::RemoveTeamMembers,
            UiFeature::ViewOwnCareer,
            UiFeature::ManageCareerPlans,
        ]
    }

    /// Features only an Executive Leader sees
    const fn is_executive_only(&self) -> bool {
        matches!(
            self,
            UiFeature::AccessTeam
                | UiFeature::AccessLeadership
                | UiFeature::ViewAllProjects
                | UiFeature::ManageTeam
                | UiFeature::ViewTeamCareer
                | UiFeature::AddTeamMembers
                | UiFeature::RemoveTeamMembers
                | UiFeature::ManageCareerPlans
        )
    }

    /// Features decided per project rather than by role
    const fn is_project_scoped(&self) -> bool {
        matches!(
            self,
            UiFeature::EditProject | UiFeature::DeleteProject | UiFeature::ManageProjectTeam
        )
    }
}

impl fmt::Display for UiFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Feature visibility table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiPermissionSet(BTreeMap<UiFeature, bool>);

impl UiPermissionSet {
    /// Check a feature; features missing from the table are denied
    pub fn allows(&self, feature: UiFeature) -> bool {
        self.0.get(&feature).copied().unwrap_or(false)
    }

    /// Check a feature by its UI key; unknown keys are denied
    pub fn allows_named(&self, feature: &str) -> bool {
        UiFeature::try_parse(feature).is_some_and(|f| self.allows(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (UiFeature, bool)> + '_ {
        self.0.iter().map(|(feature, allowed)| (*feature, *allowed))
    }
}

/// Resolve the UI permission table for a role
///
/// With a project override, only the three project-scoped features change.
pub fn resolve_ui_permissions(
    role: Option<Role>,
    project: Option<&AccessLevel>,
) -> UiPermissionSet {
    let executive = is_executive(role);

    let mut table: BTreeMap<UiFeature, bool> = UiFeature::all()
        .iter()
        .map(|feature| {
            let allowed = if feature.is_project_scoped() {
                false
            } else if feature.is_executive_only() {
                executive
            } else {
                true
            };
            (*feature, allowed)
        })
        .collect();

    if let Some(access) = project {
        table.insert(UiFeature::EditProject, access.can_edit);
        table.insert(UiFeature::DeleteProject, access.can_delete);
        table.insert(UiFeature::ManageProjectTeam, access.can_manage_team);
    }

    UiPermissionSet(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_roundtrip() {
        for feature in UiFeature::all() {
            assert_eq!(UiFeature::try_parse(feature.as_str()), Some(*feature));
        }
    }

    #[test]
    fn test_team_member_baseline() {
        let perms = resolve_ui_permissions(Some(Role::TeamMember), None);

        assert!(perms.allows(UiFeature::AccessOverview));
        assert!(perms.allows(UiFeature::AccessAi));
        assert!(perms.allows(UiFeature::CreateProject));
        assert!(perms.allows(UiFeature::CommentOnProject));
        assert!(!perms.allows(UiFeature::AccessTeam));
        assert!(!perms.allows(UiFeature::AccessLeadership));
        assert!(!perms.allows(UiFeature::EditProject));
    }

    #[test]
    fn test_executive_unlocks_team_features() {
        let perms = resolve_ui_permissions(Some(Role::ExecutiveLeader), None);

        assert!(perms.allows(UiFeature::AccessTeam));
        assert!(perms.allows(UiFeature::AccessLeadership));
        assert!(perms.allows(UiFeature::ViewAllProjects));
        assert!(perms.allows(UiFeature::ManageCareerPlans));
        assert!(!perms.allows(UiFeature::DeleteProject));
    }

    #[test]
    fn test_unknown_role_gets_baseline() {
        assert_eq!(
            resolve_ui_permissions(None, None),
            resolve_ui_permissions(Some(Role::TeamMember), None)
        );
    }

    #[test]
    fn test_allows_named() {
        let perms = resolve_ui_permissions(Some(Role::ExecutiveLeader), None);
        assert!(perms.allows_named("canAccessLeadership"));
        assert!(!perms.allows_named("canLaunchRockets"));
    }

    #[test]
    fn test_serialises_as_flat_map() {
        let perms = resolve_ui_permissions(Some(Role::TeamMember), None);
        let value = serde_json::to_value(&perms).unwrap();

        assert_eq!(value["canAccessAI"], serde_json::json!(true));
        assert_eq!(value["canAccessTeam"], serde_json::json!(false));
        assert_eq!(value.as_object().unwrap().len(), UiFeature::all().len());
    }
}
