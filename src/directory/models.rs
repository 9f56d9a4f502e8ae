use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::DirectoryError;

/// Identifier of a user within a directory. Never reused once handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single directory entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub active: bool,
}

impl User {
    pub fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }
}

/// Editable fields of a user, as held by the editor while it is open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self::new(user.name.clone(), user.email.clone())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub fn matches(self, active: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => active,
            StatusFilter::Inactive => !active,
        }
    }

    /// Next value in the selector cycle: All -> Active -> Inactive -> All
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Inactive,
            StatusFilter::Inactive => StatusFilter::All,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Inactive => "inactive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Active => "Active",
            StatusFilter::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StatusFilter {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "inactive" => Ok(StatusFilter::Inactive),
            _ => Err(DirectoryError::InvalidStatusFilter(s.to_string())),
        }
    }
}

/// Search text and status filter applied to the list view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub text: String,
    pub status: StatusFilter,
}

/// The two demo users the directory starts with
pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: UserId(1),
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            active: true,
        },
        User {
            id: UserId(2),
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
            active: false,
        },
    ]
}
