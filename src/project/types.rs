//! Project record types
//!
//! Identifiers arrive either as JSON strings or as integers (SQL serial keys); both
//! forms are normalised to text so equality is independent of the source.

use crate::access_control::Role;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Key under which filtered project records carry the caller's resolved access
const USER_ACCESS_KEY: &str = "userAccess";

/// Largest float that still holds every integer below it exactly
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

/// Raw identifier as it appears on the wire
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            // Integral floats (`1.0`) name the same record as the integer
            RawId::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT => {
                    (f as i64).to_string()
                }
                _ => n.to_string(),
            },
        }
    }
}

/// Opaque user identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty id identifies nobody
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for UserId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque project identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for ProjectId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated user as seen by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    /// Global role; `None` when the stored role string is not recognised
    #[serde(default, deserialize_with = "lenient_role")]
    pub role: Option<Role>,
}

impl User {
    pub fn new(id: impl Into<UserId>, role: Option<Role>) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// Team member entry embedded in a project record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Project record
///
/// Field names follow the backend's snake_case rows; the camelCase spellings used by
/// frontend payloads are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// User who created (and therefore manages) the project
    #[serde(default, alias = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,

    #[serde(
        default,
        alias = "assignedUsers",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub assigned_users: Vec<UserId>,

    /// Precomputed assignment flag attached by per-user project queries
    #[serde(default, alias = "isAssigned", skip_serializing_if = "Option::is_none")]
    pub is_assigned: Option<bool>,

    #[serde(
        default,
        alias = "teamMembers",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub team_members: Vec<TeamMember>,

    /// Remaining record fields, passed through untouched
    ///
    /// A `userAccess` annotation from an earlier filtering pass is never kept: it
    /// describes some other caller's access.
    #[serde(
        flatten,
        deserialize_with = "without_access_annotation",
        serialize_with = "serialize_without_access_annotation"
    )]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn new(id: impl Into<ProjectId>) -> Self {
        Self {
            id: id.into(),
            name: None,
            created_by: None,
            assigned_users: Vec::new(),
            is_assigned: None,
            team_members: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_creator(mut self, user: impl Into<UserId>) -> Self {
        self.created_by = Some(user.into());
        self
    }

    pub fn with_assigned<I, U>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = U>,
        U: Into<UserId>,
    {
        self.assigned_users.extend(users.into_iter().map(Into::into));
        self
    }

    pub fn is_created_by(&self, user: &UserId) -> bool {
        self.created_by.as_ref() == Some(user)
    }

    /// Any membership source naming the user counts as assignment
    pub fn has_assigned(&self, user: &UserId) -> bool {
        self.assigned_users.contains(user)
            || self.is_assigned.unwrap_or(false)
            || self.team_members.iter().any(|member| &member.id == user)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn without_access_annotation<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut extra = Map::deserialize(deserializer)?;
    extra.remove(USER_ACCESS_KEY);
    Ok(extra)
}

fn serialize_without_access_annotation<S>(
    extra: &Map<String, Value>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(extra.iter().filter(|(key, _)| key.as_str() != USER_ACCESS_KEY))
}

fn lenient_role<'de, D>(deserializer: D) -> Result<Option<Role>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Role::try_parse))
}
