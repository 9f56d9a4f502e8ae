//! Screen state and key handling for the directory TUI.
//!
//! Nothing here touches the terminal, so every interaction can be driven from
//! tests with synthetic key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::directory::{SaveOutcome, UserDirectory, UserId};
use crate::ui::CapturedEvent;
use crate::ui::prelude::*;

/// Which part of the screen receives typed characters when the editor is closed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    List,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub level: Level,
    pub message: String,
}

pub struct App {
    pub directory: UserDirectory,
    pub focus: Focus,
    /// Index into the visible rows, not into the full user set
    pub selected: usize,
    pub show_help: bool,
    pub status: Option<StatusLine>,
}

impl App {
    pub fn new(directory: UserDirectory, show_help: bool) -> Self {
        Self {
            directory,
            focus: Focus::List,
            selected: 0,
            show_help,
            status: None,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.directory.visible_users().count()
    }

    /// Identifier of the row under the cursor
    pub fn selected_user(&self) -> Option<UserId> {
        self.directory
            .visible_users()
            .nth(self.selected)
            .map(|user| user.id)
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_count();
        self.selected = if count == 0 {
            0
        } else {
            self.selected.min(count - 1)
        };
    }

    pub fn set_status(&mut self, level: Level, message: impl Into<String>) {
        self.status = Some(StatusLine {
            level,
            message: message.into(),
        });
    }

    /// Surface an event emitted while the screen was running. Debug traces
    /// never replace the status line.
    pub fn show_captured(&mut self, event: CapturedEvent) {
        if event.level != Level::Debug {
            self.set_status(event.level, event.message);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Control::Quit;
        }

        if self.directory.editor().is_open() {
            self.handle_editor_key(key);
            return Control::Continue;
        }

        match self.focus {
            Focus::Search => {
                self.handle_search_key(key);
                Control::Continue
            }
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Control {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Control::Quit,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('f') => self.cycle_status_filter(),
            KeyCode::Char('a') => self.directory.open_create(),
            KeyCode::Char('e') | KeyCode::Enter => self.edit_selected(),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('?') => self.show_help = !self.show_help,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('g') | KeyCode::Home => self.selected = 0,
            KeyCode::Char('G') | KeyCode::End => {
                self.selected = self.visible_count().saturating_sub(1);
            }
            _ => {}
        }
        Control::Continue
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Tab => self.focus = Focus::List,
            KeyCode::Backspace => {
                let mut text = self.directory.query().text.clone();
                text.pop();
                self.directory.set_query(text);
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.directory.set_query(String::new());
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut text = self.directory.query().text.clone();
                text.push(ch);
                self.directory.set_query(text);
            }
            _ => {}
        }
        self.clamp_selection();
    }

    fn handle_editor_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.directory.close_editor(),
            KeyCode::Enter => self.save_editor(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                if let Some(state) = self.directory.editor_state_mut() {
                    state.focus_next();
                }
            }
            KeyCode::Backspace => {
                if let Some(state) = self.directory.editor_state_mut() {
                    state.pop_char();
                }
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(state) = self.directory.editor_state_mut() {
                    state.push_char(ch);
                }
            }
            _ => {}
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.visible_count();
        if count == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self
            .selected
            .saturating_add_signed(delta)
            .min(count - 1);
    }

    fn cycle_status_filter(&mut self) {
        let next = self.directory.query().status.next();
        self.directory.set_status_filter(next);
        self.clamp_selection();
    }

    fn edit_selected(&mut self) {
        let Some(id) = self.selected_user() else {
            return;
        };
        if let Err(err) = self.directory.open_edit(id) {
            self.set_status(Level::Error, err.to_string());
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_user() else {
            return;
        };
        let name = self.display_name(id);
        self.directory.delete_user(id);
        self.clamp_selection();

        emit(
            Level::Debug,
            "userdir.user.deleted",
            &format!("deleted user {id}"),
            None,
        );
        self.set_status(Level::Info, format!("Deleted {name}"));
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_user() else {
            return;
        };
        self.directory.toggle_active(id);

        let label = self
            .directory
            .get(id)
            .map(|user| user.status_label())
            .unwrap_or_default();
        let name = self.display_name(id);
        emit(
            Level::Debug,
            "userdir.user.toggled",
            &format!("user {id} is now {label}"),
            None,
        );
        self.set_status(Level::Info, format!("{name} is now {label}"));
        // Under an Active/Inactive filter the row may have just disappeared.
        self.clamp_selection();
    }

    fn save_editor(&mut self) {
        match self.directory.save_editor() {
            Some(SaveOutcome::Added(id)) => {
                emit(
                    Level::Debug,
                    "userdir.user.added",
                    &format!("added user {id}"),
                    None,
                );
                let name = self.display_name(id);
                self.set_status(Level::Success, format!("Added {name}"));
                if let Some(index) = self.directory.visible_users().position(|u| u.id == id) {
                    self.selected = index;
                }
            }
            Some(SaveOutcome::Updated(id)) => {
                emit(
                    Level::Debug,
                    "userdir.user.updated",
                    &format!("updated user {id}"),
                    None,
                );
                let name = self.display_name(id);
                self.set_status(Level::Success, format!("Saved {name}"));
            }
            None => {}
        }
        self.clamp_selection();
    }

    /// Name for status messages; empty names fall back to the id
    fn display_name(&self, id: UserId) -> String {
        match self.directory.get(id) {
            Some(user) if !user.name.is_empty() => user.name.clone(),
            _ => format!("user #{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{EditorField, EditorMode, StatusFilter};
    use serial_test::serial;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
    }

    fn app() -> App {
        App::new(UserDirectory::seeded(), true)
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Control::Quit);
        assert_eq!(app.handle_key(key(KeyCode::Esc)), Control::Quit);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Control::Quit
        );
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut app = app();
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected, 1);
        assert_eq!(app.selected_user(), Some(UserId(2)));
        app.handle_key(key(KeyCode::Home));
        assert_eq!(app.selected, 0);
        app.handle_key(key(KeyCode::End));
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_search_typing_filters_live() {
        let mut app = app();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('/')));
        assert_eq!(app.focus, Focus::Search);

        type_text(&mut app, "JOHN");
        assert_eq!(app.directory.query().text, "JOHN");
        assert_eq!(app.visible_count(), 1);
        assert_eq!(app.selected, 0);

        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.directory.query().text, "JOH");

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.focus, Focus::List);
    }

    #[test]
    fn test_search_no_match() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "zz");
        assert_eq!(app.visible_count(), 0);
        assert_eq!(app.selected_user(), None);

        app.handle_key(key(KeyCode::Esc));
        // Row actions on an empty view do nothing
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Char(' ')));
        app.handle_key(key(KeyCode::Char('e')));
        assert_eq!(app.directory.len(), 2);
        assert!(!app.directory.editor().is_open());
    }

    #[test]
    fn test_filter_cycle() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.directory.query().status, StatusFilter::Active);
        assert_eq!(app.selected_user(), Some(UserId(1)));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.directory.query().status, StatusFilter::Inactive);
        assert_eq!(app.selected_user(), Some(UserId(2)));
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.directory.query().status, StatusFilter::All);
    }

    #[test]
    #[serial]
    fn test_add_user_flow() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        assert!(app.directory.editor().is_open());

        type_text(&mut app, "New Guy");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "ng@x.com");
        app.handle_key(key(KeyCode::Enter));

        assert!(!app.directory.editor().is_open());
        assert_eq!(app.directory.len(), 3);
        let user = app.directory.users().last().unwrap();
        assert_eq!(user.name, "New Guy");
        assert_eq!(user.email, "ng@x.com");
        assert!(!user.active);
        assert_eq!(app.selected_user(), Some(user.id));
        assert_eq!(app.status.as_ref().unwrap().message, "Added New Guy");
    }

    #[test]
    #[serial]
    fn test_add_user_with_empty_fields() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.directory.len(), 3);
        let user = app.directory.users().last().unwrap();
        assert_eq!(user.name, "");
        assert_eq!(app.status.as_ref().unwrap().message, "Added user #3");
    }

    #[test]
    fn test_editor_keys_do_not_trigger_list_actions() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Control::Continue);
        type_text(&mut app, "d f");
        let state = app.directory.editor().state().unwrap();
        assert_eq!(state.draft.name, "qd f");
        assert_eq!(app.directory.query().status, StatusFilter::All);
        assert_eq!(app.directory.len(), 2);
    }

    #[test]
    #[serial]
    fn test_edit_selected_user() {
        let mut app = app();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char('e')));

        let state = app.directory.editor().state().unwrap();
        assert_eq!(state.mode, EditorMode::Edit(UserId(2)));
        assert_eq!(state.focus, EditorField::Name);

        app.handle_key(key(KeyCode::Down));
        for _ in 0.."jane@example.com".len() {
            app.handle_key(key(KeyCode::Backspace));
        }
        type_text(&mut app, "jane@corp.io");
        app.handle_key(key(KeyCode::Enter));

        let user = app.directory.get(UserId(2)).unwrap();
        assert_eq!(user.name, "Jane Smith");
        assert_eq!(user.email, "jane@corp.io");
        assert!(!user.active);
    }

    #[test]
    fn test_cancel_edit() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "xyz");
        app.handle_key(key(KeyCode::Esc));

        assert!(!app.directory.editor().is_open());
        assert_eq!(app.directory.get(UserId(1)).unwrap().name, "John Doe");
    }

    #[test]
    #[serial]
    fn test_delete_selected_clamps() {
        let mut app = app();
        app.handle_key(key(KeyCode::End));
        app.handle_key(key(KeyCode::Char('d')));

        assert_eq!(app.directory.len(), 1);
        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_user(), Some(UserId(1)));
        assert_eq!(app.status.as_ref().unwrap().message, "Deleted Jane Smith");
    }

    #[test]
    #[serial]
    fn test_toggle_under_filter() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('f')));
        app.handle_key(key(KeyCode::Char(' ')));

        assert!(!app.directory.get(UserId(1)).unwrap().active);
        assert_eq!(app.visible_count(), 0);
        assert_eq!(app.selected, 0);
        assert_eq!(
            app.status.as_ref().unwrap().message,
            "John Doe is now Inactive"
        );
    }

    #[test]
    #[serial]
    fn test_toggle_twice_restores() {
        let mut app = app();
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(app.directory.get(UserId(2)).unwrap().active);
        app.handle_key(key(KeyCode::Char(' ')));
        assert!(!app.directory.get(UserId(2)).unwrap().active);
    }

    #[test]
    fn test_help_toggle() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('?')));
        assert!(!app.show_help);
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);
    }

    #[test]
    #[serial]
    fn test_debug_trace_keeps_status_line() {
        crate::ui::set_sink(crate::ui::Sink::Capture);
        crate::ui::set_debug_mode(true);
        let _ = crate::ui::take_captured();

        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "Ann");
        app.handle_key(key(KeyCode::Enter));
        if let Some(event) = crate::ui::take_captured() {
            assert_eq!(event.level, Level::Debug);
            app.show_captured(event);
        }
        assert_eq!(app.status.as_ref().unwrap().message, "Added Ann");

        app.show_captured(CapturedEvent {
            level: Level::Warn,
            message: "disk full".to_string(),
        });
        assert_eq!(app.status.as_ref().unwrap().message, "disk full");

        crate::ui::set_debug_mode(false);
        crate::ui::set_sink(crate::ui::Sink::Terminal);
    }
}
