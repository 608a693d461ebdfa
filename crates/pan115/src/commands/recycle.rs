//! Recycle command - recycle bin management.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::Style;

use pan115_client::RecycleQuery;

use super::{Context, header, human_size};

/// Arguments for the recycle command.
#[derive(Args, Debug)]
pub struct RecycleArgs {
    #[command(subcommand)]
    pub command: RecycleCommand,
}

#[derive(Subcommand, Debug)]
pub enum RecycleCommand {
    /// List deleted items
    List {
        /// Items per page (default 40)
        #[arg(short, long, default_value = "0")]
        limit: i64,

        /// Offset for pagination
        #[arg(short, long, default_value = "0")]
        offset: i64,
    },

    /// Restore items
    Revert {
        /// Recycle bin item IDs
        #[arg(required = true)]
        item_ids: Vec<String>,
    },

    /// Permanently delete items
    Clean {
        /// Recycle bin item IDs
        #[arg(required = true)]
        item_ids: Vec<String>,

        /// Safe password, if the account has one
        #[arg(short, long, default_value = "", env = "PAN115_SAFE_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

/// Run the recycle command.
pub async fn run(args: RecycleArgs, ctx: &Context) -> Result<()> {
    let recycle = ctx.client()?.recycle();

    match args.command {
        RecycleCommand::List { limit, offset } => {
            let page = recycle.list(&RecycleQuery { offset, limit }).await?;
            ctx.emit(&page, |page| {
                let dim = Style::new().dim();
                header("Recycle bin");
                if page.items.is_empty() {
                    println!("{}", dim.apply_to("Recycle bin is empty"));
                    return;
                }
                for item in &page.items {
                    println!(
                        "{} {:>10}  {}  {}",
                        dim.apply_to(format!("{:<20}", item.id)),
                        human_size(item.size),
                        item.name,
                        dim.apply_to(format!("(from {})", item.parent_name))
                    );
                }
                println!();
                println!(
                    "{}",
                    dim.apply_to(format!("{} of {} items", page.items.len(), page.count))
                );
            })
        }
        RecycleCommand::Revert { item_ids } => {
            recycle.revert(&item_ids).await?;
            ctx.done(&format!("Restored {} item(s)", item_ids.len()))
        }
        RecycleCommand::Clean { item_ids, password } => {
            recycle.clean(&password, &item_ids).await?;
            ctx.done(&format!("Permanently deleted {} item(s)", item_ids.len()))
        }
    }
}
