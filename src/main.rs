mod common;
mod config;
mod directory;
mod tui;
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::common::config::DocumentedConfig;
use crate::config::DirectoryConfig;
use crate::directory::{StatusFilter, User};
use crate::ui::catppuccin::Theme;
use crate::ui::prelude::*;

/// userdir main parser
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Activate debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format for non-interactive commands
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    output: OutputFormat,

    /// Disable colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Use this preferences file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive directory (default)
    Tui,

    /// Print the users matching a search and status filter
    List {
        /// Case-insensitive text matched against name and email
        #[arg(short, long)]
        search: Option<String>,
        /// Status filter: all, active or inactive
        #[arg(short = 't', long)]
        status: Option<StatusFilter>,
    },

    /// Inspect the preferences file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the preferences file location
    Path,
    /// Print the effective preferences
    Show,
    /// Write the documented default preferences
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    ui::init(cli.output, !cli.no_color);
    ui::set_debug_mode(cli.debug);

    if let Err(err) = dispatch(cli) {
        emit(Level::Error, "userdir.error", &format!("Error: {err:#}"), None);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let config = DirectoryConfig::load(config_path)?;
            let theme = if cli.no_color {
                Theme::plain()
            } else {
                Theme::mocha()
            };
            let directory = tui::run(config.build_directory(), config.show_help, theme)?;
            emit(
                Level::Debug,
                "userdir.session.ended",
                &format!("Session ended with {} users", directory.len()),
                Some(json!({ "users": directory.users() })),
            );
            Ok(())
        }
        Commands::List { search, status } => {
            let config = DirectoryConfig::load(config_path)?;
            let mut directory = config.build_directory();
            if let Some(text) = search {
                directory.set_query(text);
            }
            if let Some(status) = status {
                directory.set_status_filter(status);
            }

            let users: Vec<&User> = directory.visible_users().collect();
            print_users(&users)
        }
        Commands::Config { command } => handle_config_command(config_path, command),
    }
}

fn print_users(users: &[&User]) -> Result<()> {
    if users.is_empty() {
        emit(
            Level::Warn,
            "userdir.list.not_found",
            "NOT FOUND",
            Some(json!({ "users": [] })),
        );
        return Ok(());
    }

    match get_output_format() {
        OutputFormat::Text => {
            let table = ui::table::users_table(users.iter().copied(), ui::color_enabled());
            emit(Level::Info, "userdir.list", &table.to_string(), None);
        }
        OutputFormat::Json => {
            let data = serde_json::to_value(users).context("serializing users")?;
            emit(
                Level::Info,
                "userdir.list",
                &format!("{} users", users.len()),
                Some(json!({ "users": data })),
            );
        }
    }
    Ok(())
}

fn handle_config_command(config_path: Option<&Path>, command: ConfigCommands) -> Result<()> {
    let path = DirectoryConfig::resolve_path(config_path)?;

    match command {
        ConfigCommands::Path => {
            emit(
                Level::Info,
                "userdir.config.path",
                &path.display().to_string(),
                Some(json!({ "path": path })),
            );
        }
        ConfigCommands::Show => {
            let config = DirectoryConfig::load(Some(&path))?;
            emit(
                Level::Info,
                "userdir.config.show",
                config.render_documented().trim_end(),
                Some(serde_json::to_value(&config).context("serializing preferences")?),
            );
        }
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                emit(
                    Level::Warn,
                    "userdir.config.exists",
                    &format!(
                        "{} already exists; pass --force to overwrite",
                        path.display()
                    ),
                    None,
                );
                return Ok(());
            }
            DirectoryConfig::default().save_with_documentation(&path)?;
            emit(
                Level::Success,
                "userdir.config.written",
                &format!("Wrote default preferences to {}", path.display()),
                None,
            );
        }
    }
    Ok(())
}
