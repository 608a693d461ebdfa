//! Config command - configuration management.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use console::Style;

use pan115_config::{Context as ClientContext, Credential};

use super::Context;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the configuration file and contexts
    Show,

    /// Switch to a different context
    UseContext {
        /// Context name to switch to
        name: String,
    },

    /// Create or update a context
    SetContext {
        /// Context name
        name: String,

        /// Inline cookie string
        #[arg(long)]
        cookie: Option<String>,

        /// Environment variable holding the cookie
        #[arg(long)]
        cookie_env: Option<String>,

        /// File holding the cookie
        #[arg(long)]
        cookie_file: Option<String>,

        /// User agent override
        #[arg(long)]
        user_agent: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Delete a context
    DeleteContext {
        /// Context name to delete
        name: String,
    },
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::UseContext { name } => cmd_use_context(&name),
        ConfigCommand::SetContext {
            name,
            cookie,
            cookie_env,
            cookie_file,
            user_agent,
            timeout,
        } => {
            let update = ClientContext {
                name,
                cookie,
                cookie_env,
                cookie_file: cookie_file.map(Into::into),
                user_agent,
                timeout,
                ..Default::default()
            };
            cmd_set_context(update)
        }
        ConfigCommand::DeleteContext { name } => cmd_delete_context(&name),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let config = pan115_config::load_client_config()?;
    let path = pan115_config::client_config_path();

    if ctx.json_output {
        // Inline cookies stay out of the output.
        let contexts: Vec<_> = config
            .contexts
            .iter()
            .map(|c| {
                serde_json::json!({
                    "name": c.name,
                    "cookie": c.cookie.as_ref().map(|_| "***"),
                    "cookie-env": c.cookie_env,
                    "cookie-file": c.cookie_file,
                    "user-agent": c.user_agent,
                    "timeout": c.timeout,
                    "web-api": c.web_api,
                    "offline-api": c.offline_api,
                })
            })
            .collect();
        let value = serde_json::json!({
            "path": path,
            "current-context": config.current_context,
            "contexts": contexts,
            "defaults": { "timeout": config.defaults.timeout },
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let dim = Style::new().dim();
    match &path {
        Some(p) => println!("{} {}", dim.apply_to("Config file:"), p.display()),
        None => println!("{}", dim.apply_to("Config file: (no config directory)")),
    }
    println!();

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!();
        println!("Create one with:");
        println!("  pan115 config set-context main --cookie-file ~/.config/pan115/main.cookie");
        return Ok(());
    }

    let current = config.current_context.as_deref();
    println!("CURRENT   NAME            COOKIE SOURCE");
    for c in &config.contexts {
        let marker = if current == Some(c.name.as_str()) {
            "*"
        } else {
            " "
        };
        let source = if let Some(file) = &c.cookie_file {
            format!("file {}", file.display())
        } else if let Some(var) = &c.cookie_env {
            format!("env ${var}")
        } else if c.cookie.is_some() {
            "inline".to_string()
        } else {
            "none".to_string()
        };
        println!("{}         {:<15} {}", marker, c.name, source);
    }

    Ok(())
}

fn cmd_use_context(name: &str) -> Result<()> {
    let mut config = pan115_config::load_client_config()?;

    config.use_context(name)?;
    pan115_config::save_client_config(&config)?;

    println!("Switched to context \"{}\".", name);

    Ok(())
}

fn cmd_set_context(update: ClientContext) -> Result<()> {
    if let Some(cookie) = &update.cookie {
        Credential::from_cookie(cookie)?;
    }

    let mut config = pan115_config::load_client_config()?;
    let name = update.name.clone();

    match config.get_context_mut(&name) {
        None => {
            if update.cookie.is_none() && update.cookie_env.is_none() && update.cookie_file.is_none()
            {
                bail!("one of --cookie, --cookie-env or --cookie-file is required for a new context");
            }
            config.set_context(update);
            println!("Context \"{}\" created.", name);
        }
        Some(existing) => {
            if update.cookie.is_some() {
                existing.cookie = update.cookie;
            }
            if update.cookie_env.is_some() {
                existing.cookie_env = update.cookie_env;
            }
            if update.cookie_file.is_some() {
                existing.cookie_file = update.cookie_file;
            }
            if update.user_agent.is_some() {
                existing.user_agent = update.user_agent;
            }
            if update.timeout.is_some() {
                existing.timeout = update.timeout;
            }
            println!("Context \"{}\" modified.", name);
        }
    }

    // The first context becomes current
    if config.current_context.is_none() && config.contexts.len() == 1 {
        config.current_context = Some(name.clone());
        println!("Context \"{}\" set as current context.", name);
    }

    pan115_config::save_client_config(&config)?;
    Ok(())
}

fn cmd_delete_context(name: &str) -> Result<()> {
    let mut config = pan115_config::load_client_config()?;

    match config.remove_context(name) {
        Some(_) => {
            pan115_config::save_client_config(&config)?;
            println!("Context \"{}\" deleted.", name);
            if config.current_context.is_none() {
                println!(
                    "Note: No current context. Use 'pan115 config use-context <name>' to set one."
                );
            }
        }
        None => {
            println!("Context \"{}\" not found.", name);
        }
    }

    Ok(())
}
