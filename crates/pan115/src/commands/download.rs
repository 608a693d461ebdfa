//! Download command - resolve a pick code, optionally fetch the file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::Style;

use super::{Context, header, human_size};

/// Arguments for `download`.
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Pick code of the file
    pub pick_code: String,

    /// Write the file here; without it only the download info is shown
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// User agent the download URL is bound to
    #[arg(long)]
    pub user_agent: Option<String>,
}

pub async fn run(args: DownloadArgs, ctx: &Context) -> Result<()> {
    let downloads = ctx.client()?.downloads();
    let agent = args.user_agent.as_deref();

    let Some(output) = args.output else {
        let info = downloads.info(&args.pick_code, agent).await?;
        return ctx.emit(&info, |info| {
            let dim = Style::new().dim();
            header(&info.file_name);
            println!("{:<12} {}", dim.apply_to("Size"), human_size(info.size));
            println!("{:<12} {}", dim.apply_to("Pick code"), info.pick_code);
            println!("{:<12} {}", dim.apply_to("URL"), info.url);
        });
    };

    let file = downloads.download_to(&args.pick_code, &output, agent).await?;
    ctx.done(&format!(
        "Downloaded {} to {} ({})",
        file.file_name,
        file.local_path,
        human_size(file.size)
    ))
}
