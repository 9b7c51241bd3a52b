//! Access control module
//!
//! Decides what a user may do with a project and which application features they see.
//!
//! ## Access Model
//!
//! Project access is derived from the user's relationship to the project, with the
//! following precedence (highest to lowest):
//!
//! 1. **Creator** - `manager`: full control, including delete and team management
//! 2. **Assigned** - `member`: edit and comment, no delete or team management
//! 3. **Executive Leader** - `executive`: read and comment on any project
//! 4. **Anyone else** - `none`: no access
//!
//! Progress updates and feedback submission are open to creators and assigned users,
//! except Executive Leaders, who never get them.
//!
//! Application features (navigation, team management) are decided by the global role
//! alone; only the project edit/delete/team flags take a project into account.
//!
//! ## Example
//!
//! ```
//! use pm_access::access_control::{AccessTier, resolve_project_access};
//! use pm_access::project::{Project, UserId};
//!
//! let project = Project::new("1").with_creator("u1").with_assigned(["u2"]);
//! let access = resolve_project_access(Some(&project), Some(&UserId::from("u2")), None);
//! assert_eq!(access.level, AccessTier::Member);
//! assert!(!access.can_delete);
//! ```

pub mod context;
pub mod guard;
pub mod navigation;
pub mod resolver;
pub mod types;
pub mod ui;

pub use context::RbacContext;
pub use guard::{
    RequiredAccess, can_create_project, require_executive_leader, require_project_access,
    require_role,
};
pub use navigation::{
    DashboardSection, NavItem, RoleDisplay, dashboard_sections, resolve_navigation_items,
    role_display,
};
pub use resolver::{
    AccessLevel, ProjectWithAccess, filter_projects_for_user, resolve_project_access,
};
pub use types::{AccessTier, ProjectAction, Role};
pub use ui::{UiFeature, UiPermissionSet, resolve_ui_permissions};
