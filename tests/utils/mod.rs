use anyhow::Result;
use std::process::Command;

use super::common::TestEnvironment;

pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

/// Run the userdir binary against the environment's preferences file
pub fn run_userdir_command(env: &TestEnvironment, args: &[&str]) -> Result<CommandOutput> {
    let config = env.config_path();
    let output = Command::new(env!("CARGO_BIN_EXE_userdir"))
        .arg("--no-color")
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("NO_COLOR", "1")
        .output()?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// Parse one JSON event per output line
pub fn json_lines(output: &str) -> Result<Vec<serde_json::Value>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).map_err(anyhow::Error::from))
        .collect()
}
