//! PM Dashboard access control
//!
//! Shared access-control logic for the project-management dashboard: what a user may do
//! with a project, and which application features they see.
//!
//! ## Features
//!
//! - **Project access resolution** from creator/assignment relationships and global role
//! - **UI permission tables** and role-aware navigation
//! - **Route guards** mapping denials to HTTP status codes
//! - **Injected preference storage** (memory or per-user JSON files)
//! - **Flexible configuration** via TOML files and environment variables
//!
//! ## Access Model
//!
//! ```text
//! creator (manager) → assigned (member) → Executive Leader (executive) → none
//! ```
//!
//! The first relationship that applies wins. Resolution is pure and never fails;
//! missing inputs resolve to `none`.
//!
//! ## Example Configuration
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [preferences]
//! backend = "file"
//! directory = "~/.local/share/pm-access/preferences"
//! ```

pub mod access_control;
pub mod config;
pub mod error;
pub mod preferences;
pub mod project;

// Re-export main types
pub use access_control::{AccessLevel, RbacContext, Role, resolve_project_access};
pub use config::{AppConfig, load_config};
pub use error::{AccessError, AppError, Result};
pub use project::{Project, ProjectId, User, UserId};
