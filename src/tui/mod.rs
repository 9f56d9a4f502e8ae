//! Interactive directory screen
//!
//! Owns the terminal for the lifetime of the session. While it runs, events
//! emitted through `ui::emit` are captured and surfaced on the status line.

mod app;
mod render;

use std::io::stdout;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::directory::UserDirectory;
use crate::ui::catppuccin::Theme;
use crate::ui::{self, Sink};

use app::{App, Control};

const POLL_TIMEOUT: Duration = Duration::from_millis(150);

/// Run the directory screen until the user quits. Returns the final directory.
pub fn run(directory: UserDirectory, show_help: bool, theme: Theme) -> Result<UserDirectory> {
    let mut screen = DirectoryScreen::new(App::new(directory, show_help), theme)?;
    ui::set_sink(Sink::Capture);
    let result = screen.run();
    ui::set_sink(Sink::Terminal);
    screen.cleanup()?;
    result?;
    Ok(screen.into_directory())
}

struct DirectoryScreen {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    app: Option<App>,
    theme: Theme,
    cleaned_up: bool,
}

impl DirectoryScreen {
    fn new(app: App, theme: Theme) -> Result<Self> {
        enable_raw_mode().context("enabling raw mode")?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            app: Some(app),
            theme,
            cleaned_up: false,
        })
    }

    fn run(&mut self) -> Result<()> {
        let Some(app) = self.app.as_mut() else {
            return Ok(());
        };

        loop {
            self.terminal
                .draw(|frame| render::draw(frame, app, &self.theme))?;

            if !event::poll(POLL_TIMEOUT)? {
                continue;
            }

            match event::read()? {
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    if app.handle_key(key_event) == Control::Quit {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => {
                    // Redrawn at the top of the loop
                }
                _ => {}
            }

            if let Some(captured) = ui::take_captured() {
                app.show_captured(captured);
            }
        }
    }

    fn into_directory(mut self) -> UserDirectory {
        self.app
            .take()
            .map(|app| app.directory)
            .unwrap_or_default()
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.cleaned_up {
            return Ok(());
        }

        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        self.cleaned_up = true;
        Ok(())
    }
}

impl Drop for DirectoryScreen {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
