//! Documented TOML configuration
//!
//! Config structs declare their defaults through serde and get a
//! `DocumentedConfig` impl from the `documented_config!` macro. The first load
//! writes a file where every field carries its description as a trailing
//! comment, so the file explains itself.
//!
//! # Example
//!
//! ```ignore
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! #[serde(default)]
//! pub struct DirectoryConfig {
//!     pub show_help: bool,
//! }
//!
//! documented_config!(DirectoryConfig {
//!     fields: [
//!         show_help, "Show the keybinding footer",
//!     ],
//!     config_path: paths::config_file("config.toml"),
//! });
//! ```

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata about a configuration field
#[derive(Debug, Clone)]
pub struct ConfigFieldMeta {
    pub name: &'static str,
    /// TOML-serialized default value, or None if serialization failed
    pub default_value: Option<String>,
    pub description: &'static str,
}

/// Trait for configs with documented defaults
///
/// Implemented by the `documented_config!` macro.
pub trait DocumentedConfig: Sized + Default + DeserializeOwned {
    /// Get metadata for all configuration fields
    fn field_metadata() -> Vec<ConfigFieldMeta>;

    /// Get the TOML-serialized value for a specific field
    fn get_field_value(&self, field_name: &str) -> String;

    /// Default location of this config
    fn config_path() -> Result<PathBuf>;

    /// Render the config as TOML with a description comment on every line.
    /// Fields that differ from their default also note the default.
    fn render_documented(&self) -> String {
        let mut output = String::new();
        for field in Self::field_metadata() {
            let value = self.get_field_value(field.name);
            match &field.default_value {
                Some(default) if *default != value => output.push_str(&format!(
                    "{} = {}  # {} (default: {})\n",
                    field.name, value, field.description, default
                )),
                _ => output.push_str(&format!(
                    "{} = {}  # {}\n",
                    field.name, value, field.description
                )),
            }
        }
        output
    }

    fn save_with_documentation(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }

        fs::write(path, self.render_documented())
            .with_context(|| format!("writing config to {}", path.display()))?;
        Ok(())
    }

    /// Load the config at `path`, writing the documented defaults if it is missing
    fn load_from_path_documented(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_with_documentation(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing config at {}", path.display()))
    }
}

/// Generate a `DocumentedConfig` implementation
///
/// ```ignore
/// documented_config!(DirectoryConfig {
///     fields: [
///         seed_demo_users, "Start with the two demo users",
///         show_help, "Show the keybinding footer",
///     ],
///     config_path: paths::config_file("config.toml"),
/// });
/// ```
#[macro_export]
macro_rules! documented_config {
    (
        $config_name:ident {
            fields: [
                $($field:ident, $desc:expr),* $(,)?
            ],
            config_path: $path:expr $(,)?
        }
    ) => {
        impl $crate::common::config::DocumentedConfig for $config_name {
            fn field_metadata() -> Vec<$crate::common::config::ConfigFieldMeta> {
                let default_config = Self::default();
                vec![
                    $(
                        $crate::common::config::ConfigFieldMeta {
                            name: stringify!($field),
                            default_value: toml::Value::try_from(&default_config.$field)
                                .map(|v| v.to_string())
                                .ok(),
                            description: $desc,
                        },
                    )*
                ]
            }

            fn get_field_value(&self, field_name: &str) -> String {
                match field_name {
                    $(
                        stringify!($field) => {
                            toml::Value::try_from(&self.$field)
                                .map(|v| v.to_string())
                                .unwrap_or_else(|_| format!("{:?}", self.$field))
                        }
                    )*
                    _ => String::new(),
                }
            }

            fn config_path() -> anyhow::Result<std::path::PathBuf> {
                $path
            }
        }
    };
}
