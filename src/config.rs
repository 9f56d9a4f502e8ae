use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::common::config::DocumentedConfig;
use crate::common::paths;
use crate::directory::{StatusFilter, UserDirectory};
use crate::documented_config;
use crate::ui::prelude::*;

/// Preferences for the directory screen. Users themselves are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub seed_demo_users: bool,
    pub default_status_filter: String,
    pub show_help: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            seed_demo_users: true,
            default_status_filter: StatusFilter::All.to_string(),
            show_help: true,
        }
    }
}

documented_config!(DirectoryConfig {
    fields: [
        seed_demo_users, "Start with the two demo users",
        default_status_filter, "Initial status filter (all, active, inactive)",
        show_help, "Show the keybinding footer",
    ],
    config_path: paths::config_file("config.toml"),
});

impl DirectoryConfig {
    /// Load from `path`, or from the default location when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        Self::load_from_path_documented(&path)
            .with_context(|| format!("loading preferences from {}", path.display()))
    }

    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::config_path(),
        }
    }

    /// Parsed status filter; an unknown value warns and falls back to All
    pub fn status_filter(&self) -> StatusFilter {
        match self.default_status_filter.parse() {
            Ok(filter) => filter,
            Err(err) => {
                emit(
                    Level::Warn,
                    "userdir.config.invalid_filter",
                    &format!("{err}; using 'all'"),
                    None,
                );
                StatusFilter::All
            }
        }
    }

    /// Fresh directory honoring these preferences
    pub fn build_directory(&self) -> UserDirectory {
        let mut directory = if self.seed_demo_users {
            UserDirectory::seeded()
        } else {
            UserDirectory::default()
        };
        directory.set_status_filter(self.status_filter());
        directory
    }
}
