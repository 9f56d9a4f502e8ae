//! Editor modal state machine
//!
//! `Closed` or `Open` with a mode, a draft and the field that receives input.
//! Committing the draft is the directory's job; see `UserDirectory::save_editor`.

use super::models::{UserDraft, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit(UserId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorField {
    #[default]
    Name,
    Email,
}

impl EditorField {
    pub fn toggle(self) -> Self {
        match self {
            EditorField::Name => EditorField::Email,
            EditorField::Email => EditorField::Name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorState {
    pub mode: EditorMode,
    pub draft: UserDraft,
    pub focus: EditorField,
}

impl EditorState {
    pub fn create() -> Self {
        Self {
            mode: EditorMode::Create,
            draft: UserDraft::default(),
            focus: EditorField::Name,
        }
    }

    pub fn edit(id: UserId, draft: UserDraft) -> Self {
        Self {
            mode: EditorMode::Edit(id),
            draft,
            focus: EditorField::Name,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Add User",
            EditorMode::Edit(_) => "Edit User",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "Add User",
            EditorMode::Edit(_) => "Save Changes",
        }
    }

    pub fn focused_value(&self) -> &str {
        match self.focus {
            EditorField::Name => &self.draft.name,
            EditorField::Email => &self.draft.email,
        }
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focus {
            EditorField::Name => &mut self.draft.name,
            EditorField::Email => &mut self.draft.email,
        }
    }

    pub fn push_char(&mut self, ch: char) {
        self.focused_value_mut().push(ch);
    }

    pub fn pop_char(&mut self) {
        self.focused_value_mut().pop();
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.toggle();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Editor {
    #[default]
    Closed,
    Open(EditorState),
}

impl Editor {
    pub fn is_open(&self) -> bool {
        matches!(self, Editor::Open(_))
    }

    pub fn state(&self) -> Option<&EditorState> {
        match self {
            Editor::Closed => None,
            Editor::Open(state) => Some(state),
        }
    }

    pub fn state_mut(&mut self) -> Option<&mut EditorState> {
        match self {
            Editor::Closed => None,
            Editor::Open(state) => Some(state),
        }
    }

    /// Close the editor and hand back whatever was open
    pub fn take(&mut self) -> Option<EditorState> {
        match std::mem::take(self) {
            Editor::Closed => None,
            Editor::Open(state) => Some(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_labels() {
        let state = EditorState::create();
        assert_eq!(state.title(), "Add User");
        assert_eq!(state.submit_label(), "Add User");
        assert_eq!(state.draft, UserDraft::default());
    }

    #[test]
    fn test_edit_labels() {
        let state = EditorState::edit(UserId(4), UserDraft::new("A", "a@x"));
        assert_eq!(state.title(), "Edit User");
        assert_eq!(state.submit_label(), "Save Changes");
        assert_eq!(state.mode, EditorMode::Edit(UserId(4)));
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut state = EditorState::create();
        for ch in "Ann".chars() {
            state.push_char(ch);
        }
        state.focus_next();
        for ch in "ann@x.com".chars() {
            state.push_char(ch);
        }
        state.pop_char();

        assert_eq!(state.draft.name, "Ann");
        assert_eq!(state.draft.email, "ann@x.co");
        assert_eq!(state.focused_value(), "ann@x.co");

        state.focus_next();
        assert_eq!(state.focus, EditorField::Name);
    }

    #[test]
    fn test_pop_on_empty_field() {
        let mut state = EditorState::create();
        state.pop_char();
        assert_eq!(state.draft.name, "");
    }

    #[test]
    fn test_take_closes() {
        let mut editor = Editor::Open(EditorState::create());
        assert!(editor.is_open());
        assert!(editor.take().is_some());
        assert!(!editor.is_open());
        assert!(editor.take().is_none());
    }
}
