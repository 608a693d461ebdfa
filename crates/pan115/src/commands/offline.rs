//! Offline command - offline download tasks.

use anyhow::{Result, bail};
use clap::{Args, Subcommand, ValueEnum};
use console::{Style, style};

use pan115_client::{ClearFlag, OfflineTaskStatus};

use super::{Context, header, human_size};

/// Arguments for the offline command.
#[derive(Args, Debug)]
pub struct OfflineArgs {
    #[command(subcommand)]
    pub command: OfflineCommand,
}

#[derive(Subcommand, Debug)]
pub enum OfflineCommand {
    /// List tasks
    List {
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: i64,
    },

    /// Add http(s), ed2k or magnet URIs
    Add {
        /// URIs to download
        #[arg(required = true)]
        uris: Vec<String>,

        /// Directory to save into
        #[arg(short, long, default_value = "0")]
        dir: String,
    },

    /// Delete tasks by info hash
    Delete {
        /// Task info hashes
        #[arg(required = true)]
        hashes: Vec<String>,

        /// Also delete downloaded files
        #[arg(long)]
        files: bool,
    },

    /// Clear tasks in bulk
    Clear {
        /// Which tasks to clear
        #[arg(value_enum, default_value = "completed")]
        which: ClearWhich,

        /// Also delete downloaded files (completed or all only)
        #[arg(long)]
        files: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ClearWhich {
    Completed,
    All,
    Failed,
    Running,
}

impl ClearWhich {
    fn flag(self, with_files: bool) -> Result<ClearFlag> {
        Ok(match (self, with_files) {
            (ClearWhich::Completed, false) => ClearFlag::Completed,
            (ClearWhich::Completed, true) => ClearFlag::CompletedWithFiles,
            (ClearWhich::All, false) => ClearFlag::All,
            (ClearWhich::All, true) => ClearFlag::AllWithFiles,
            (ClearWhich::Failed, false) => ClearFlag::Failed,
            (ClearWhich::Running, false) => ClearFlag::Running,
            (which, true) => bail!("--files cannot be combined with {which:?}"),
        })
    }
}

/// Run the offline command.
pub async fn run(args: OfflineArgs, ctx: &Context) -> Result<()> {
    let offline = ctx.client()?.offline();

    match args.command {
        OfflineCommand::List { page } => {
            let page = offline.list(page).await?;
            ctx.emit(&page, |page| {
                let dim = Style::new().dim();
                header("Offline tasks");
                if page.tasks.is_empty() {
                    println!("{}", dim.apply_to("No tasks"));
                    return;
                }
                for task in &page.tasks {
                    let status = match task.status {
                        OfflineTaskStatus::Completed => style(task.status.as_str()).green(),
                        OfflineTaskStatus::Failed => style(task.status.as_str()).red(),
                        OfflineTaskStatus::Downloading => style(task.status.as_str()).cyan(),
                        _ => style(task.status.as_str()).dim(),
                    };
                    println!(
                        "{} {:<12} {:>6.1}% {:>10}  {}",
                        dim.apply_to(&task.info_hash),
                        status,
                        task.percent,
                        human_size(task.size),
                        task.name
                    );
                }
                println!();
                println!(
                    "{}",
                    dim.apply_to(format!(
                        "page {}/{} · {} tasks · quota {}",
                        page.page, page.page_count, page.total, page.quota
                    ))
                );
            })
        }
        OfflineCommand::Add { uris, dir } => {
            let added = offline.add_uris(&uris, &dir).await?;
            ctx.emit(&added, |added| {
                for task in &added.tasks {
                    if task.accepted {
                        println!("{} {}", style("✓").green(), task.url);
                    } else {
                        println!(
                            "{} {} {}",
                            style("✗").red(),
                            task.url,
                            Style::new()
                                .dim()
                                .apply_to(task.error.as_deref().unwrap_or("rejected"))
                        );
                    }
                }
            })
        }
        OfflineCommand::Delete { hashes, files } => {
            offline.delete(&hashes, files).await?;
            ctx.done(&format!("Deleted {} task(s)", hashes.len()))
        }
        OfflineCommand::Clear { which, files } => {
            offline.clear(which.flag(files)?).await?;
            ctx.done("Offline tasks cleared")
        }
    }
}
