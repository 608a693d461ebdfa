//! Tool commands - list tools and call them with JSON arguments.

use anyhow::{Context as _, Result};
use clap::Args;
use console::Style;
use serde_json::Value;

use super::{Context, header};

/// Arguments for the call command.
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name (see `pan115 tools`)
    pub tool: String,

    /// Arguments as a JSON object
    #[arg(default_value = "{}")]
    pub arguments: String,
}

/// List available tools.
pub fn list(ctx: &Context) -> Result<()> {
    let specs = pan115_client::tool_specs();
    ctx.emit(&specs, |specs| {
        let dim = Style::new().dim();
        header("Tools");
        for spec in specs {
            println!("{:<22} {}", spec.name, dim.apply_to(spec.description));
        }
    })
}

/// Call one tool and print its JSON result.
pub async fn call(args: CallArgs, ctx: &Context) -> Result<()> {
    let arguments: Value =
        serde_json::from_str(&args.arguments).context("arguments must be a JSON object")?;
    if !arguments.is_object() {
        anyhow::bail!("arguments must be a JSON object");
    }
    if !pan115_client::tool_specs().iter().any(|s| s.name == args.tool) {
        anyhow::bail!(
            "unknown tool '{}'. Run 'pan115 tools' to list tools",
            args.tool
        );
    }

    let client = ctx.client()?;
    let result = pan115_client::call_tool(&client, &args.tool, arguments).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
