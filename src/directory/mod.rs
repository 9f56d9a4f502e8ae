//! In-memory user directory
//!
//! `UserDirectory` owns the user set, the list query and the editor modal.
//! Every operation is synchronous; the next render sees the result. Updates,
//! deletes and toggles on an unknown id are silent no-ops.

mod editor;
mod error;
mod models;
mod query;

pub use editor::{Editor, EditorField, EditorMode, EditorState};
pub use error::DirectoryError;
pub use models::{QueryState, StatusFilter, User, UserDraft, UserId, seed_users};
pub use query::visible_users;

/// What a successful editor save did to the user set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Added(UserId),
    Updated(UserId),
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    query: QueryState,
    editor: Editor,
    next_id: u64,
}

impl UserDirectory {
    /// Build a directory from an initial set. Duplicate ids keep the first entry.
    pub fn new(users: Vec<User>) -> Self {
        let mut unique: Vec<User> = Vec::with_capacity(users.len());
        for user in users {
            if !unique.iter().any(|existing| existing.id == user.id) {
                unique.push(user);
            }
        }

        let next_id = unique.iter().map(|user| user.id.0).max().unwrap_or(0) + 1;

        Self {
            users: unique,
            query: QueryState::default(),
            editor: Editor::Closed,
            next_id,
        }
    }

    /// Directory holding the two demo users
    pub fn seeded() -> Self {
        Self::new(seed_users())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    pub fn find(&self, id: UserId) -> Result<&User, DirectoryError> {
        self.get(id).ok_or(DirectoryError::UserNotFound(id))
    }

    fn get_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.iter_mut().find(|user| user.id == id)
    }

    fn allocate_id(&mut self) -> UserId {
        // Never reused; deleting the highest id does not roll the counter back.
        let id = UserId(self.next_id.max(1));
        self.next_id = id.0 + 1;
        id
    }

    /// Append a new inactive user built from the draft
    pub fn add_user(&mut self, draft: UserDraft) -> UserId {
        let id = self.allocate_id();
        self.users.push(User {
            id,
            name: draft.name,
            email: draft.email,
            active: false,
        });
        id
    }

    /// Replace name and email of `id`. Keeps `active`.
    pub fn update_user(&mut self, id: UserId, draft: UserDraft) {
        if let Some(user) = self.get_mut(id) {
            user.name = draft.name;
            user.email = draft.email;
        }
    }

    pub fn delete_user(&mut self, id: UserId) {
        self.users.retain(|user| user.id != id);
    }

    pub fn toggle_active(&mut self, id: UserId) {
        if let Some(user) = self.get_mut(id) {
            user.active = !user.active;
        }
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.query.status = status;
    }

    /// Users passing the current query, in insertion order
    pub fn visible_users(&self) -> impl Iterator<Item = &User> + '_ {
        visible_users(&self.users, &self.query)
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Mutable access to the open editor, for typing into the draft
    pub fn editor_state_mut(&mut self) -> Option<&mut EditorState> {
        self.editor.state_mut()
    }

    /// Open the editor in create mode with an empty draft
    pub fn open_create(&mut self) {
        self.editor = Editor::Open(EditorState::create());
    }

    /// Open the editor on an existing user, seeding the draft from it
    pub fn open_edit(&mut self, id: UserId) -> Result<(), DirectoryError> {
        let draft = UserDraft::from(self.find(id)?);
        self.editor = Editor::Open(EditorState::edit(id, draft));
        Ok(())
    }

    /// Close the editor, discarding the draft
    pub fn close_editor(&mut self) {
        self.editor = Editor::Closed;
    }

    /// Commit the draft and close. `None` when the editor was not open.
    pub fn save_editor(&mut self) -> Option<SaveOutcome> {
        let state = self.editor.take()?;
        match state.mode {
            EditorMode::Create => Some(SaveOutcome::Added(self.add_user(state.draft))),
            EditorMode::Edit(id) => {
                self.update_user(id, state.draft);
                Some(SaveOutcome::Updated(id))
            }
        }
    }
}
