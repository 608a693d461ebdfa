//! CLI command handlers.

use std::time::Duration;

use anyhow::{Context as _, Result};
use console::Style;
use serde::Serialize;

use pan115_client::Pan115Client;
use pan115_config::{ConfigError, Credential};

pub mod config;
pub mod download;
pub mod files;
pub mod offline;
pub mod recycle;
pub mod search;
pub mod share;
pub mod tools;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Config context to use instead of the current one.
    pub context_name: Option<String>,
    /// Cookie given on the command line or via `PAN115_COOKIE`.
    pub cookie: Option<String>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Build an API client from the config file and command-line overrides.
    pub fn client(&self) -> Result<Pan115Client> {
        let config = pan115_config::load_client_config()?;
        let resolved = config.resolve(self.context_name.as_deref())?;

        let credential = match self.cookie.as_deref().filter(|c| !c.trim().is_empty()) {
            Some(raw) => Some(Credential::from_cookie(raw)?),
            None => resolved.credential,
        };
        let credential = credential.ok_or(ConfigError::NoCookie)?;

        tracing::debug!(
            context = resolved.name.as_deref().unwrap_or("-"),
            user = credential.user_id(),
            "building client"
        );
        if self.verbose {
            let dim = Style::new().dim();
            eprintln!(
                "{}",
                dim.apply_to(format!(
                    "context: {} (uid {})",
                    resolved.name.as_deref().unwrap_or("none"),
                    credential.user_id()
                ))
            );
        }

        let mut builder = Pan115Client::builder()
            .cookie(credential.to_cookie())
            .timeout(Duration::from_secs(resolved.timeout));
        if let Some(agent) = resolved.user_agent {
            builder = builder.user_agent(agent);
        }
        if let Some(url) = resolved.web_api {
            builder = builder.web_api(url);
        }
        if let Some(url) = resolved.offline_api {
            builder = builder.offline_api(url);
        }
        builder.build().context("failed to build 115 client")
    }

    /// Print `value` as pretty JSON when `--json` is set; otherwise run `human`.
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce(&T)) -> Result<()> {
        if self.json_output {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human(value);
        }
        Ok(())
    }

    /// Report a completed mutation.
    pub fn done(&self, message: &str) -> Result<()> {
        self.emit(&serde_json::json!({ "message": message }), |_| {
            let green = Style::new().green();
            println!("{} {}", green.apply_to("✓"), message);
        })
    }
}

/// Section header used by the human-readable output.
pub(crate) fn header(title: &str) {
    let dim = Style::new().dim();
    println!("{}", Style::new().bold().apply_to(title));
    println!("{}", dim.apply_to("─".repeat(50)));
}

/// Human-readable byte size.
pub(crate) fn human_size(bytes: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes.max(0) as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes.max(0))
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
