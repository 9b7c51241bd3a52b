//! Route guards
//!
//! Turns resolver output into accept/reject decisions for request handlers.

use crate::access_control::resolver::{AccessLevel, resolve_project_access};
use crate::access_control::types::{ProjectAction, Role};
use crate::error::{AccessError, AccessResult};
use crate::project::{Project, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Requirement a route places on the caller's project access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredAccess {
    #[default]
    View,
    Edit,
    ManageTeam,
    Comment,
}

impl RequiredAccess {
    pub const fn as_str(&self) -> &'static str {
        match self {
            RequiredAccess::View => "view",
            RequiredAccess::Edit => "edit",
            RequiredAccess::ManageTeam => "manage_team",
            RequiredAccess::Comment => "comment",
        }
    }

    pub const fn action(&self) -> ProjectAction {
        match self {
            RequiredAccess::View => ProjectAction::View,
            RequiredAccess::Edit => ProjectAction::Edit,
            RequiredAccess::ManageTeam => ProjectAction::ManageTeam,
            RequiredAccess::Comment => ProjectAction::Comment,
        }
    }
}

impl fmt::Display for RequiredAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Require a level of access to a project
///
/// Returns the resolved access on success so handlers can use it further.
pub fn require_project_access(
    project: Option<&Project>,
    user_id: Option<&UserId>,
    role: Option<Role>,
    required: RequiredAccess,
) -> AccessResult<AccessLevel> {
    let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
        return Err(AccessError::Unauthenticated);
    };
    let Some(project) = project else {
        return Err(AccessError::ProjectRequired);
    };

    let access = resolve_project_access(Some(project), Some(user_id), role);
    if !access.permits(required.action()) {
        info!(
            user = %user_id,
            project = %project.id,
            required = %required,
            "Project access denied"
        );
        return Err(AccessError::insufficient(required.as_str()));
    }

    debug!(
        user = %user_id,
        project = %project.id,
        required = %required,
        level = %access.level,
        "Project access granted"
    );
    Ok(access)
}

/// Require one of a set of global roles; an empty set admits everyone
pub fn require_role(role: Option<Role>, allowed: &[Role]) -> AccessResult<()> {
    if allowed.is_empty() || role.is_some_and(|r| allowed.contains(&r)) {
        return Ok(());
    }

    let names: Vec<&str> = allowed.iter().map(|r| r.as_str()).collect();
    Err(AccessError::forbidden(
        "role",
        format!("One of the following roles is required: {}", names.join(", ")),
    ))
}

/// Guard for team-management routes
pub fn require_executive_leader(role: Option<Role>) -> AccessResult<()> {
    if role.is_some_and(|r| r.is_executive()) {
        return Ok(());
    }
    info!(role = ?role, "Team management access denied");
    Err(AccessError::forbidden(
        "executive_leader",
        "Executive Leader role required for Team Management access",
    ))
}

/// Whether a role may create projects (and so become a project manager)
pub fn can_create_project(role: Option<Role>) -> bool {
    matches!(role, Some(Role::TeamMember | Role::ExecutiveLeader))
}
