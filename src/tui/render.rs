use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};

use super::app::{App, Focus};
use crate::directory::{EditorField, EditorState};
use crate::ui::Level;
use crate::ui::catppuccin::Theme;

const NOT_FOUND: &str = "NOT FOUND";

/// Draw the whole directory screen
pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        area,
    );

    let [title_area, filter_area, list_area, status_area, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(1),
        Constraint::Length(if app.show_help { 1 } else { 0 }),
    ])
    .areas(area);

    draw_title(frame, app, theme, title_area);
    draw_filter_bar(frame, app, theme, filter_area);
    draw_list(frame, app, theme, list_area);
    draw_status(frame, app, theme, status_area);
    if app.show_help {
        draw_help(frame, app, theme, help_area);
    }

    if let Some(state) = app.directory.editor().state() {
        draw_editor(frame, state, theme, area);
    }
}

fn draw_title(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let counts = if app.directory.is_empty() {
        "  no users yet, press a to add one".to_string()
    } else {
        format!(
            "  {} users · {} shown",
            app.directory.len(),
            app.visible_count()
        )
    };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "userdir",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(counts, Style::default().fg(theme.muted)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn draw_filter_bar(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let [add_area, search_area, status_area] = Layout::horizontal([
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(16),
    ])
    .areas(area);

    let add = Paragraph::new(Line::from(vec![
        Span::styled("a", Style::default().fg(theme.accent)),
        Span::raw(" Add User"),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border)),
    );
    frame.render_widget(add, add_area);

    let searching = app.focus == Focus::Search && !app.directory.editor().is_open();
    let query = &app.directory.query().text;
    let search = Paragraph::new(query.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Search ")
            .border_style(Style::default().fg(if searching {
                theme.focus
            } else {
                theme.border
            })),
    );
    frame.render_widget(search, search_area);
    if searching {
        frame.set_cursor_position(input_cursor(search_area, query));
    }

    let status = Paragraph::new(format!("< {} >", app.directory.query().status.label()))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .border_style(Style::default().fg(theme.border)),
        );
    frame.render_widget(status, status_area);
}

fn draw_list(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Users ")
        .border_style(Style::default().fg(if app.focus == Focus::List {
            theme.focus
        } else {
            theme.border
        }));

    let header = Row::new(vec!["Name", "Email", "Status", "Actions"]).style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );
    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(35),
        Constraint::Length(10),
        Constraint::Min(12),
    ];

    let rows: Vec<Row> = app
        .directory
        .visible_users()
        .map(|user| {
            let status_color = if user.active {
                theme.active
            } else {
                theme.inactive
            };
            let marker = if user.active { "[x]" } else { "[ ]" };
            Row::new(vec![
                Cell::from(user.name.as_str()),
                Cell::from(user.email.as_str()),
                Cell::from(user.status_label()).style(Style::default().fg(status_color)),
                Cell::from(format!("{marker} e d")).style(Style::default().fg(theme.muted)),
            ])
        })
        .collect();

    if rows.is_empty() {
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [header_area, body_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);
        frame.render_widget(
            Table::new(Vec::<Row>::new(), widths).header(header),
            header_area,
        );

        let [message_area] = Layout::vertical([Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(body_area);
        let message = Paragraph::new(NOT_FOUND)
            .style(
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center);
        frame.render_widget(message, message_area);
        return;
    }

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(theme.selection)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");
    let mut state = TableState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_status(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let Some(status) = &app.status else {
        return;
    };
    let color = match status.level {
        Level::Success => theme.active,
        Level::Warn => theme.warn,
        Level::Error => theme.error,
        Level::Info | Level::Debug => theme.muted,
    };
    frame.render_widget(
        Paragraph::new(status.message.as_str()).style(Style::default().fg(color)),
        area,
    );
}

fn help_spans(app: &App, theme: &Theme) -> Vec<Span<'static>> {
    let pairs: &[(&str, &str)] = if app.directory.editor().is_open() {
        &[("Tab", "switch field"), ("Enter", "save"), ("Esc", "cancel")]
    } else if app.focus == Focus::Search {
        &[("Enter/Esc", "done"), ("Ctrl-U", "clear")]
    } else {
        &[
            ("a", "add"),
            ("e", "edit"),
            ("d", "delete"),
            ("Space", "toggle"),
            ("/", "search"),
            ("f", "filter"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };

    let mut spans = Vec::with_capacity(pairs.len() * 3);
    for (index, (key, action)) in pairs.iter().enumerate() {
        let separator = if index == 0 { "" } else { "  •  " };
        spans.push(Span::raw(separator));
        spans.push(Span::styled(*key, Style::default().fg(theme.accent)));
        spans.push(Span::raw(format!(" {action}")));
    }
    spans
}

fn draw_help(frame: &mut Frame, app: &App, theme: &Theme, area: Rect) {
    let help = Paragraph::new(Line::from(help_spans(app, theme)))
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.muted));
    frame.render_widget(help, area);
}

fn draw_editor(frame: &mut Frame, state: &EditorState, theme: &Theme, area: Rect) {
    let [popup] = Layout::vertical([Constraint::Length(10)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(popup);

    frame.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", state.title()))
        .title_style(
            Style::default()
                .fg(theme.focus)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(theme.focus))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [name_area, email_area, submit_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(inner);

    for (field, label, value, field_area) in [
        (EditorField::Name, " Name ", &state.draft.name, name_area),
        (EditorField::Email, " Email ", &state.draft.email, email_area),
    ] {
        let focused = state.focus == field;
        let input = Paragraph::new(value.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .title(label)
                .border_style(Style::default().fg(if focused {
                    theme.focus
                } else {
                    theme.border
                })),
        );
        frame.render_widget(input, field_area);
    }

    let field_area = match state.focus {
        EditorField::Name => name_area,
        EditorField::Email => email_area,
    };
    frame.set_cursor_position(input_cursor(field_area, state.focused_value()));

    let submit = Paragraph::new(Line::from(vec![
        Span::styled("Enter", Style::default().fg(theme.active)),
        Span::raw(format!(" {}  •  ", state.submit_label())),
        Span::styled("Esc", Style::default().fg(theme.error)),
        Span::raw(" Cancel"),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(submit, submit_area);
}

/// Cursor just past `text` inside a bordered input, pinned to the last inner column
fn input_cursor(area: Rect, text: &str) -> (u16, u16) {
    let typed = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(typed);
    (x.min(area.right().saturating_sub(2)), area.y + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{StatusFilter, UserDirectory, UserDraft, UserId};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| draw(frame, app, &Theme::plain()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_rows() {
        let app = App::new(UserDirectory::seeded(), true);
        let screen = render(&app);

        assert!(screen.contains("John Doe"));
        assert!(screen.contains("jane@example.com"));
        assert!(screen.contains("Active"));
        assert!(screen.contains("Inactive"));
        assert!(screen.contains("2 users · 2 shown"));
        assert!(!screen.contains(NOT_FOUND));
    }

    #[test]
    fn test_renders_not_found() {
        let mut directory = UserDirectory::seeded();
        directory.set_query("zz");
        let app = App::new(directory, true);
        let screen = render(&app);

        assert!(screen.contains(NOT_FOUND));
        assert!(screen.contains("Email"));
        assert!(!screen.contains("John Doe"));
    }

    #[test]
    fn test_renders_filter_label() {
        let mut directory = UserDirectory::seeded();
        directory.set_status_filter(StatusFilter::Inactive);
        let app = App::new(directory, true);
        let screen = render(&app);

        assert!(screen.contains("< Inactive >"));
        assert!(screen.contains("Jane Smith"));
        assert!(!screen.contains("John Doe"));
    }

    #[test]
    fn test_renders_editor() {
        let mut directory = UserDirectory::seeded();
        directory.open_edit(UserId(1)).unwrap();
        let app = App::new(directory, true);
        let screen = render(&app);

        assert!(screen.contains("Edit User"));
        assert!(screen.contains("Save Changes"));
        assert!(screen.contains("john@example.com"));
    }

    #[test]
    fn test_renders_create_editor() {
        let mut directory = UserDirectory::seeded();
        directory.open_create();
        let app = App::new(directory, true);
        let screen = render(&app);

        assert!(screen.contains("Enter Add User"));
        assert!(screen.contains("Esc Cancel"));
    }

    #[test]
    fn test_help_footer_hidden() {
        let app = App::new(UserDirectory::seeded(), false);
        assert!(!render(&app).contains("quit"));

        let app = App::new(UserDirectory::seeded(), true);
        assert!(render(&app).contains("quit"));
    }

    #[test]
    fn test_renders_empty_directory_hint() {
        let app = App::new(UserDirectory::default(), true);
        let screen = render(&app);

        assert!(screen.contains("no users yet"));
        assert!(screen.contains(NOT_FOUND));
    }

    #[test]
    fn test_long_search_text_keeps_cursor_in_box() {
        let mut directory = UserDirectory::seeded();
        directory.set_query("x".repeat(65530));
        let mut app = App::new(directory, true);
        app.focus = Focus::Search;

        let screen = render(&app);
        assert!(screen.contains(NOT_FOUND));
    }

    #[test]
    fn test_long_draft_keeps_cursor_in_box() {
        let mut directory = UserDirectory::seeded();
        directory.open_create();
        if let Some(state) = directory.editor_state_mut() {
            state.draft = UserDraft::new("n".repeat(65530), "e".repeat(70000));
        }
        let app = App::new(directory, true);

        let screen = render(&app);
        assert!(screen.contains("Add User"));
    }

    #[test]
    fn test_input_cursor_is_clamped() {
        let area = Rect::new(10, 4, 20, 3);
        assert_eq!(input_cursor(area, ""), (11, 5));
        assert_eq!(input_cursor(area, "abc"), (14, 5));
        assert_eq!(input_cursor(area, &"y".repeat(65535)), (28, 5));
    }
}
