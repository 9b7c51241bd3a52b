//! Access control resolver
//!
//! Derives what a user may do with a project from the user's relationship to it,
//! with the following precedence (highest to lowest):
//! 1. Creator of the project (`manager`)
//! 2. Assigned to the project team (`member`)
//! 3. Executive Leader global role (`executive`, read and comment only)
//! 4. Anything else (`none`)
//!
//! Resolution never fails. Absent or malformed inputs converge on the `none` result.

use crate::access_control::types::{AccessTier, ProjectAction, Role, is_executive};
use crate::project::{Project, UserId};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, trace};

/// Capabilities of one user on one project
///
/// Recomputed on every check and never stored. The progress and feedback flags are
/// only present for managers and members; `None` reads as `false`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessLevel {
    pub level: AccessTier,
    pub role: Option<Role>,
    pub can_view: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_manage_team: bool,
    pub can_comment: bool,
    pub can_update_progress: Option<bool>,
    pub can_submit_feedback: Option<bool>,
}

impl AccessLevel {
    /// The no-access result
    pub fn none() -> Self {
        Self::default()
    }

    fn manager(contributes: bool) -> Self {
        Self {
            level: AccessTier::Manager,
            role: Some(Role::ProjectManager),
            can_view: true,
            can_edit: true,
            can_delete: true,
            can_manage_team: true,
            can_comment: true,
            can_update_progress: Some(contributes),
            can_submit_feedback: Some(contributes),
        }
    }

    fn member(contributes: bool) -> Self {
        Self {
            level: AccessTier::Member,
            role: Some(Role::TeamMember),
            can_view: true,
            can_edit: true,
            can_delete: false,
            can_manage_team: false,
            can_comment: true,
            can_update_progress: Some(contributes),
            can_submit_feedback: Some(contributes),
        }
    }

    fn executive() -> Self {
        Self {
            level: AccessTier::Executive,
            role: Some(Role::ExecutiveLeader),
            can_view: true,
            can_edit: false,
            can_delete: false,
            can_manage_team: false,
            can_comment: true,
            can_update_progress: None,
            can_submit_feedback: None,
        }
    }

    pub fn can_update_progress(&self) -> bool {
        self.can_update_progress.unwrap_or(false)
    }

    pub fn can_submit_feedback(&self) -> bool {
        self.can_submit_feedback.unwrap_or(false)
    }

    /// Check whether these capabilities cover an action
    pub fn permits(&self, action: ProjectAction) -> bool {
        match action {
            ProjectAction::View => self.can_view,
            ProjectAction::Edit => self.can_edit,
            ProjectAction::Delete => self.can_delete,
            ProjectAction::ManageTeam => self.can_manage_team,
            ProjectAction::Comment => self.can_comment,
            ProjectAction::UpdateProgress => self.can_update_progress(),
            ProjectAction::SubmitFeedback => self.can_submit_feedback(),
        }
    }

    /// Role label for display ("Project Manager", "Team Member", ...)
    pub fn role_label(&self) -> Option<&'static str> {
        self.role.map(|r| r.as_str())
    }
}

// Each tier has a fixed field set on the wire: `none` carries only `level` and
// `canView`, `executive` omits the progress/feedback flags.
impl Serialize for AccessLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("level", &self.level)?;

        if self.level == AccessTier::None {
            map.serialize_entry("canView", &self.can_view)?;
            return map.end();
        }

        if let Some(role) = &self.role {
            map.serialize_entry("role", role)?;
        }
        map.serialize_entry("canEdit", &self.can_edit)?;
        map.serialize_entry("canDelete", &self.can_delete)?;
        map.serialize_entry("canManageTeam", &self.can_manage_team)?;
        map.serialize_entry("canComment", &self.can_comment)?;
        map.serialize_entry("canView", &self.can_view)?;
        if let Some(flag) = self.can_update_progress {
            map.serialize_entry("canUpdateProgress", &flag)?;
        }
        if let Some(flag) = self.can_submit_feedback {
            map.serialize_entry("canSubmitFeedback", &flag)?;
        }
        map.end()
    }
}

/// Resolve a user's access to a project
///
/// A creator is always `manager`, even when also assigned. Progress updates and
/// feedback submission are withheld from Executive Leaders even on projects they
/// created or are assigned to.
pub fn resolve_project_access(
    project: Option<&Project>,
    user_id: Option<&UserId>,
    role: Option<Role>,
) -> AccessLevel {
    let user_id = user_id.filter(|id| !id.is_empty());
    let (Some(project), Some(user_id)) = (project, user_id) else {
        trace!("No project or user, resolving to none");
        return AccessLevel::none();
    };

    let is_creator = project.is_created_by(user_id);
    let is_assigned = project.has_assigned(user_id);
    let contributes = (is_creator || is_assigned) && !is_executive(role);

    let access = if is_creator {
        AccessLevel::manager(contributes)
    } else if is_assigned {
        AccessLevel::member(contributes)
    } else if is_executive(role) {
        AccessLevel::executive()
    } else {
        AccessLevel::none()
    };

    debug!(
        project = %project.id,
        user = %user_id,
        role = ?role,
        is_creator,
        is_assigned,
        level = %access.level,
        "Resolved project access"
    );

    access
}

/// A visible project paired with the caller's access to it
///
/// Serialises as the project record with the access attached under `userAccess`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectWithAccess<'a> {
    #[serde(flatten)]
    pub project: &'a Project,
    #[serde(rename = "userAccess")]
    pub user_access: AccessLevel,
}

/// Lazily filter projects down to those the user can view
///
/// Input order is preserved. The returned iterator is `Clone`, so the sequence can be
/// restarted; each pass recomputes the same result.
pub fn filter_projects_for_user<'a, I>(
    projects: I,
    user_id: Option<&'a UserId>,
    role: Option<Role>,
) -> impl Iterator<Item = ProjectWithAccess<'a>> + Clone + 'a
where
    I: IntoIterator<Item = &'a Project>,
    I::IntoIter: Clone + 'a,
{
    projects.into_iter().filter_map(move |project| {
        let user_access = resolve_project_access(Some(project), user_id, role);
        user_access.can_view.then_some(ProjectWithAccess {
            project,
            user_access,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_project() -> Project {
        Project::new("1").with_creator("u1").with_assigned(["u2"])
    }

    #[test]
    fn test_absent_inputs_resolve_to_none() {
        let project = sample_project();
        let user = UserId::from("u1");

        assert_eq!(
            resolve_project_access(None, Some(&user), Some(Role::ExecutiveLeader)),
            AccessLevel::none()
        );
        assert_eq!(
            resolve_project_access(Some(&project), None, Some(Role::ExecutiveLeader)),
            AccessLevel::none()
        );
        assert_eq!(
            resolve_project_access(Some(&project), Some(&"".into()), Some(Role::ExecutiveLeader)),
            AccessLevel::none()
        );
    }

    #[test]
    fn test_creator_is_manager() {
        let project = sample_project();
        let access = resolve_project_access(Some(&project), Some(&"u1".into()), None);

        assert_eq!(access.level, AccessTier::Manager);
        assert_eq!(access.role_label(), Some("Project Manager"));
        assert!(access.can_delete);
        assert!(access.can_manage_team);
        assert!(access.can_update_progress());
    }

    #[test]
    fn test_creator_wins_over_assignment() {
        let project = Project::new("2").with_creator("u1").with_assigned(["u1", "u2"]);
        let access = resolve_project_access(Some(&project), Some(&"u1".into()), None);
        assert_eq!(access.level, AccessTier::Manager);
    }

    #[test]
    fn test_executive_creator_loses_progress_and_feedback() {
        let project = sample_project();
        let access = resolve_project_access(
            Some(&project),
            Some(&"u1".into()),
            Some(Role::ExecutiveLeader),
        );

        assert_eq!(access.level, AccessTier::Manager);
        assert!(access.can_delete);
        assert_eq!(access.can_update_progress, Some(false));
        assert_eq!(access.can_submit_feedback, Some(false));
    }

    #[test]
    fn test_executive_without_relationship_is_read_only() {
        let project = sample_project();
        let access = resolve_project_access(
            Some(&project),
            Some(&"u3".into()),
            Some(Role::ExecutiveLeader),
        );

        assert_eq!(access.level, AccessTier::Executive);
        assert!(access.can_view);
        assert!(access.can_comment);
        assert!(!access.can_edit);
        assert_eq!(access.can_update_progress, None);
    }

    #[test]
    fn test_permits_matches_fields() {
        let project = sample_project();
        let member = resolve_project_access(Some(&project), Some(&"u2".into()), None);

        assert!(member.permits(ProjectAction::View));
        assert!(member.permits(ProjectAction::Edit));
        assert!(member.permits(ProjectAction::SubmitFeedback));
        assert!(!member.permits(ProjectAction::Delete));
        assert!(!member.permits(ProjectAction::ManageTeam));
    }

    #[test]
    fn test_none_serialises_two_fields() {
        let value = serde_json::to_value(AccessLevel::none()).unwrap();
        assert_eq!(value, json!({ "level": "none", "canView": false }));
    }

    #[test]
    fn test_executive_serialisation_omits_progress_flags() {
        let value = serde_json::to_value(AccessLevel::executive()).unwrap();
        assert_eq!(
            value,
            json!({
                "level": "executive",
                "role": "Executive Leader",
                "canEdit": false,
                "canDelete": false,
                "canManageTeam": false,
                "canComment": true,
                "canView": true
            })
        );
    }

    #[test]
    fn test_serialisation_roundtrip_keeps_absent_flags_absent() {
        let original = AccessLevel::executive();
        let value = serde_json::to_value(&original).unwrap();
        let parsed: AccessLevel = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_filter_attaches_user_access() {
        let projects = vec![
            sample_project(),
            Project::new("2").with_creator("u9"),
            Project::new("3").with_creator("u9").with_assigned(["u2"]),
        ];
        let user = UserId::from("u2");

        let visible: Vec<_> = filter_projects_for_user(&projects, Some(&user), None).collect();
        let ids: Vec<_> = visible.iter().map(|p| p.project.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);

        let value = serde_json::to_value(&visible[0]).unwrap();
        assert_eq!(value["id"], json!("1"));
        assert_eq!(value["userAccess"]["level"], json!("member"));
    }
}
