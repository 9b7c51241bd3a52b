//! PM Dashboard access control CLI
//!
//! Resolves project access, UI permissions and navigation for a user, and manages
//! notification preferences through the configured store.

use anyhow::Context;
use clap::{Parser, Subcommand};
use pm_access::{
    access_control::{
        Role, filter_projects_for_user, resolve_navigation_items, resolve_project_access,
        resolve_ui_permissions,
    },
    config::{AppConfig, LogFormat, PreferencesConfig, load_config},
    preferences::{NotificationPreferences, PreferencesUpdate, create_preference_store},
    project::{Project, ProjectId, UserId},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// PM Dashboard access control - resolve what a user may see and do
#[derive(Parser, Debug)]
#[command(name = "pm-access")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "PM_ACCESS_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the configured level
    #[arg(long, env = "PM_ACCESS_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a user's access to one project, or list the projects they can view
    Access {
        /// JSON file containing an array of project records
        #[arg(long)]
        projects: PathBuf,

        /// User id
        #[arg(long)]
        user: String,

        /// Global role ("Team Member", "executive-leader", ...)
        #[arg(long)]
        role: Option<Role>,

        /// Project id; omit to list every visible project with its access
        #[arg(long)]
        project: Option<String>,
    },

    /// Print the UI permission table for a role
    Permissions {
        /// Global role
        #[arg(long)]
        role: Option<Role>,

        /// JSON file of project records, for a project-specific override
        #[arg(long, requires_all = ["user", "project"])]
        projects: Option<PathBuf>,

        /// User id for the project override
        #[arg(long)]
        user: Option<String>,

        /// Project id for the project override
        #[arg(long)]
        project: Option<String>,
    },

    /// Print the navigation items for a role, in display order
    Nav {
        /// Global role
        #[arg(long)]
        role: Option<Role>,
    },

    /// Read or change notification preferences
    Preferences {
        #[command(subcommand)]
        command: PreferencesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum PreferencesCommand {
    /// Show a user's preferences
    Get {
        #[arg(long)]
        user: String,
    },

    /// Update a user's preferences; unspecified fields are left unchanged
    Set {
        #[arg(long)]
        user: String,

        #[arg(long)]
        email: Option<bool>,

        #[arg(long)]
        push: Option<bool>,

        #[arg(long)]
        project_updates: Option<bool>,

        #[arg(long)]
        weekly_digest: Option<bool>,
    },
}

fn init_logging(config: &AppConfig, override_level: Option<&str>) {
    let level = override_level.unwrap_or(config.logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn read_projects(path: &Path) -> anyhow::Result<Vec<Project>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read projects file {}", path.display()))?;
    let projects: Vec<Project> = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid project records in {}", path.display()))?;
    debug!(count = projects.len(), path = %path.display(), "Loaded projects");
    Ok(projects)
}

fn find_project<'a>(projects: &'a [Project], id: &str) -> Option<&'a Project> {
    let id = ProjectId::from(id);
    let found = projects.iter().find(|p| p.id == id);
    if found.is_none() {
        warn!(project = %id, "Project not found, resolving as absent");
    }
    found
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Command::Access {
            projects,
            user,
            role,
            project,
        } => {
            let records = read_projects(&projects)?;
            let user = UserId::from(user);

            match project {
                Some(id) => {
                    let access =
                        resolve_project_access(find_project(&records, &id), Some(&user), role);
                    print_json(&access)
                }
                None => {
                    let visible: Vec<_> =
                        filter_projects_for_user(&records, Some(&user), role).collect();
                    info!(
                        user = %user,
                        total = records.len(),
                        visible = visible.len(),
                        "Filtered projects"
                    );
                    print_json(&visible)
                }
            }
        }

        Command::Permissions {
            role,
            projects,
            user,
            project,
        } => {
            let access = match (projects, user, project) {
                (Some(path), Some(user), Some(id)) => {
                    let records = read_projects(&path)?;
                    let user = UserId::from(user);
                    Some(resolve_project_access(
                        find_project(&records, &id),
                        Some(&user),
                        role,
                    ))
                }
                _ => None,
            };
            print_json(&resolve_ui_permissions(role, access.as_ref()))
        }

        Command::Nav { role } => print_json(&resolve_navigation_items(role)),

        Command::Preferences { command } => {
            print_json(&run_preferences(command, &config.preferences)?)
        }
    }
}

fn run_preferences(
    command: PreferencesCommand,
    config: &PreferencesConfig,
) -> pm_access::Result<NotificationPreferences> {
    let store = create_preference_store(config)
        .inspect_err(|e| error!(error = %e, "Failed to create preference store"))?;

    let prefs = match command {
        PreferencesCommand::Get { user } => store.load(&UserId::from(user))?,
        PreferencesCommand::Set {
            user,
            email,
            push,
            project_updates,
            weekly_digest,
        } => {
            let update = PreferencesUpdate {
                email_notifications: email,
                push_notifications: push,
                project_updates,
                weekly_digest,
            };
            if update.is_empty() {
                warn!("No preference fields given, nothing to change");
            }
            let prefs = store.update(&UserId::from(user), &update)?;
            info!(backend = store.backend(), "Preferences saved");
            prefs
        }
    };
    Ok(prefs)
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Load configuration
    let config = load_config(args.config.as_deref())
        .inspect_err(|e| eprintln!("Failed to load configuration: {}", e))?;

    // Initialize logging
    init_logging(&config, args.log_level.as_deref());

    info!(version = env!("CARGO_PKG_VERSION"), "Starting pm-access");

    run(args.command, &config).inspect_err(|e| error!(error = %e, "Command failed"))
}
