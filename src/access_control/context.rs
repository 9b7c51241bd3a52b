//! Per-user access context
//!
//! Binds the current user to the resolver so UI code asks questions like
//! "can I edit this project?" without passing the user's id and role around.
//! Every check answers `false` (or an empty list) when no user is signed in.

use crate::access_control::navigation::{
    DashboardSection, NavItem, RoleDisplay, dashboard_sections, resolve_navigation_items,
    role_display,
};
use crate::access_control::resolver::{
    AccessLevel, ProjectWithAccess, filter_projects_for_user, resolve_project_access,
};
use crate::access_control::types::{ProjectAction, Role};
use crate::access_control::ui::{UiPermissionSet, resolve_ui_permissions};
use crate::project::{Project, User};

/// Access questions answered on behalf of one user
#[derive(Debug, Clone, Default)]
pub struct RbacContext {
    user: Option<User>,
}

impl RbacContext {
    pub fn new(user: Option<User>) -> Self {
        Self { user }
    }

    pub fn for_user(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(|u| u.role)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    /// Resolve access to a project for the current user
    pub fn project_access(&self, project: Option<&Project>) -> AccessLevel {
        match &self.user {
            Some(user) => resolve_project_access(project, Some(&user.id), user.role),
            None => AccessLevel::none(),
        }
    }

    /// UI permission table, overridden by a project's access when one is given
    pub fn ui_permissions(&self, project: Option<&Project>) -> Option<UiPermissionSet> {
        let user = self.user.as_ref()?;
        let access = project.map(|p| self.project_access(Some(p)));
        Some(resolve_ui_permissions(user.role, access.as_ref()))
    }

    /// Check a UI feature by key, optionally in the context of a project
    pub fn can_access(&self, feature: &str, project: Option<&Project>) -> bool {
        self.ui_permissions(project)
            .is_some_and(|perms| perms.allows_named(feature))
    }

    pub fn can_access_project(&self, project: &Project) -> bool {
        self.project_access(Some(project)).can_view
    }

    /// Role label in a project ("Project Manager", "Team Member", ...)
    pub fn project_role(&self, project: &Project) -> Option<&'static str> {
        self.project_access(Some(project)).role_label()
    }

    pub fn can_perform_project_action(&self, action: ProjectAction, project: &Project) -> bool {
        self.project_access(Some(project)).permits(action)
    }

    pub fn filter_projects<'a>(&'a self, projects: &'a [Project]) -> Vec<ProjectWithAccess<'a>> {
        match &self.user {
            Some(user) => filter_projects_for_user(projects, Some(&user.id), user.role).collect(),
            None => Vec::new(),
        }
    }

    pub fn navigation_items(&self) -> Vec<NavItem> {
        resolve_navigation_items(self.role())
    }

    pub fn dashboard_sections(&self) -> Vec<DashboardSection> {
        dashboard_sections(self.role())
    }

    pub fn role_display(&self) -> RoleDisplay {
        role_display(self.role())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projects() -> Vec<Project> {
        vec![
            Project::new("1").with_creator("u1").with_assigned(["u2"]),
            Project::new("2").with_creator("u2"),
            Project::new("3").with_creator("u4"),
        ]
    }

    #[test]
    fn test_signed_out_context_denies_everything() {
        let ctx = RbacContext::default();
        let projects = projects();

        assert!(!ctx.can_access("canAccessOverview", None));
        assert!(!ctx.can_access_project(&projects[0]));
        assert!(ctx.project_role(&projects[0]).is_none());
        assert!(ctx.filter_projects(&projects).is_empty());
    }

    #[test]
    fn test_role_views_follow_the_signed_in_user() {
        let exec = RbacContext::for_user(User::new("u9", Some(Role::ExecutiveLeader)));
        assert!(exec.has_role(Role::ExecutiveLeader));
        assert!(!exec.has_role(Role::TeamMember));
        assert!(exec.navigation_items().iter().any(|item| item.id == "leadership"));
        assert!(
            exec.dashboard_sections()
                .contains(&DashboardSection::OrganizationInsights)
        );
        assert_eq!(exec.role_display().label, "Executive Leader");

        let signed_out = RbacContext::new(None);
        assert!(!signed_out.has_role(Role::TeamMember));
        assert!(signed_out.ui_permissions(None).is_none());
        assert_eq!(
            signed_out.navigation_items(),
            resolve_navigation_items(Some(Role::TeamMember))
        );
        assert_eq!(
            signed_out.dashboard_sections(),
            vec![
                DashboardSection::PersonalProjects,
                DashboardSection::PersonalCareer
            ]
        );
        assert_eq!(signed_out.role_display().label, "Team Member");
    }

    #[test]
    fn test_project_context_overrides_edit_permission() {
        let ctx = RbacContext::for_user(User::new("u2", Some(Role::TeamMember)));
        let projects = projects();

        assert!(!ctx.can_access("canEditProject", None));
        assert!(ctx.can_access("canEditProject", Some(&projects[0])));
        assert!(!ctx.can_access("canDeleteProject", Some(&projects[0])));
        assert!(ctx.can_access("canDeleteProject", Some(&projects[1])));
    }

    #[test]
    fn test_project_roles() {
        let ctx = RbacContext::for_user(User::new("u2", Some(Role::TeamMember)));
        let projects = projects();

        assert_eq!(ctx.project_role(&projects[0]), Some("Team Member"));
        assert_eq!(ctx.project_role(&projects[1]), Some("Project Manager"));
        assert_eq!(ctx.project_role(&projects[2]), None);
    }

    #[test]
    fn test_executive_filter_sees_all_projects() {
        let ctx = RbacContext::for_user(User::new("u9", Some(Role::ExecutiveLeader)));
        let projects = projects();

        let visible = ctx.filter_projects(&projects);
        assert_eq!(visible.len(), 3);
        assert!(
            visible
                .iter()
                .all(|p| p.user_access.role == Some(Role::ExecutiveLeader))
        );
    }

    #[test]
    fn test_can_perform_project_action() {
        let ctx = RbacContext::for_user(User::new("u1", Some(Role::TeamMember)));
        let projects = projects();

        assert!(ctx.can_perform_project_action(ProjectAction::Delete, &projects[0]));
        assert!(!ctx.can_perform_project_action(ProjectAction::View, &projects[2]));
    }
}
