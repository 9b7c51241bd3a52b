//! Access control types
//!
//! Core types used by the access control system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Global user role
///
/// `ProjectManager` is never a stored global role in practice: a user is a project
/// manager only for projects they created. It exists so project-scoped labels and
/// role guards can name it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Team Member")]
    TeamMember,
    #[serde(rename = "Project Manager")]
    ProjectManager,
    #[serde(rename = "Executive Leader")]
    ExecutiveLeader,
}

impl Role {
    /// Get the role name as displayed and stored
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::TeamMember => "Team Member",
            Role::ProjectManager => "Project Manager",
            Role::ExecutiveLeader => "Executive Leader",
        }
    }

    /// Try to parse a role from its stored name
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "Team Member" => Some(Role::TeamMember),
            "Project Manager" => Some(Role::ProjectManager),
            "Executive Leader" => Some(Role::ExecutiveLeader),
            _ => None,
        }
    }

    /// Get all roles
    pub fn all() -> &'static [Role] {
        &[Role::TeamMember, Role::ProjectManager, Role::ExecutiveLeader]
    }

    pub const fn is_executive(&self) -> bool {
        matches!(self, Role::ExecutiveLeader)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts the stored name as well as the kebab/snake spellings used on the CLI
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(role) = Role::try_parse(s) {
            return Ok(role);
        }
        match s.to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "team member" => Ok(Role::TeamMember),
            "project manager" => Ok(Role::ProjectManager),
            "executive leader" => Ok(Role::ExecutiveLeader),
            _ => Err(format!("unknown role: {}", s)),
        }
    }
}

/// Whether the role is Executive Leader; an absent role never is
pub(crate) fn is_executive(role: Option<Role>) -> bool {
    role.is_some_and(|r| r.is_executive())
}

/// Relationship tier of a user to a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessTier {
    /// Creator of the project
    Manager,
    /// Assigned to the project team
    Member,
    /// Executive Leader with no direct relationship
    Executive,
    /// No access
    #[default]
    None,
}

impl AccessTier {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccessTier::Manager => "manager",
            AccessTier::Member => "member",
            AccessTier::Executive => "executive",
            AccessTier::None => "none",
        }
    }
}

impl fmt::Display for AccessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Action a user may attempt on a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectAction {
    View,
    Edit,
    Delete,
    ManageTeam,
    Comment,
    UpdateProgress,
    SubmitFeedback,
}

impl ProjectAction {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProjectAction::View => "view",
            ProjectAction::Edit => "edit",
            ProjectAction::Delete => "delete",
            ProjectAction::ManageTeam => "manage_team",
            ProjectAction::Comment => "comment",
            ProjectAction::UpdateProgress => "update_progress",
            ProjectAction::SubmitFeedback => "submit_feedback",
        }
    }

    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "view" => Some(ProjectAction::View),
            "edit" => Some(ProjectAction::Edit),
            "delete" => Some(ProjectAction::Delete),
            "manage_team" => Some(ProjectAction::ManageTeam),
            "comment" => Some(ProjectAction::Comment),
            "update_progress" => Some(ProjectAction::UpdateProgress),
            "submit_feedback" => Some(ProjectAction::SubmitFeedback),
            _ => None,
        }
    }

    pub fn all() -> &'static [ProjectAction] {
        &[
            ProjectAction::View,
            ProjectAction::Edit,
            ProjectAction::Delete,
            ProjectAction::ManageTeam,
            ProjectAction::Comment,
            ProjectAction::UpdateProgress,
            ProjectAction::SubmitFeedback,
        ]
    }
}

impl fmt::Display for ProjectAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
