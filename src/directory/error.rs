use thiserror::Error;

use super::models::UserId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("User {0} does not exist")]
    UserNotFound(UserId),

    #[error("Invalid status filter '{0}' (expected all, active or inactive)")]
    InvalidStatusFilter(String),
}
