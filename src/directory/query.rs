//! Derived list view
//!
//! The visible rows are a pure function of the user set and the query. Nothing
//! is cached; callers recompute on every render.

use super::models::{QueryState, User};

/// Check whether a user passes both the search text and the status filter.
///
/// Search is a case-insensitive substring match over name and email. An empty
/// search text matches everyone.
pub fn matches(user: &User, query: &QueryState) -> bool {
    if !query.status.matches(user.active) {
        return false;
    }

    let needle = query.text.to_lowercase();
    if needle.is_empty() {
        return true;
    }

    user.name.to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
}

/// Users that pass the query, in their original order
pub fn visible_users<'a>(
    users: &'a [User],
    query: &'a QueryState,
) -> impl Iterator<Item = &'a User> + 'a {
    users.iter().filter(move |user| matches(user, query))
}
