//! Share command - browse a share snapshot.

use anyhow::Result;
use clap::Args;
use console::{Style, style};

use pan115_client::ShareSnapQuery;

use super::{Context, header, human_size};

/// Arguments for the share command.
#[derive(Args, Debug)]
pub struct ShareArgs {
    /// Share code (the part after /s/ in a share link)
    pub share_code: String,

    /// Receive code (password)
    #[arg(short, long, default_value = "")]
    pub receive_code: String,

    /// Directory inside the share
    #[arg(short, long, default_value = "")]
    pub dir: String,

    /// Items per page (default 20)
    #[arg(short, long, default_value = "0")]
    pub limit: i64,

    /// Offset for pagination
    #[arg(short, long, default_value = "0")]
    pub offset: i64,
}

/// Run the share command.
pub async fn run(args: ShareArgs, ctx: &Context) -> Result<()> {
    let query = ShareSnapQuery {
        dir_id: args.dir,
        offset: args.offset,
        limit: args.limit,
        ..ShareSnapQuery::new(args.share_code, args.receive_code)
    };
    let snapshot = ctx.client()?.shares().snapshot(&query).await?;

    ctx.emit(&snapshot, |snap| {
        let dim = Style::new().dim();
        header(&snap.share.title);
        println!(
            "{}",
            dim.apply_to(format!(
                "shared by {} · {} · {} receives",
                snap.owner.user_name,
                human_size(snap.share.file_size),
                snap.share.receive_count
            ))
        );
        if let Some(reason) = &snap.share.forbid_reason {
            println!("{} {}", style("Forbidden:").red(), reason);
        }
        println!();
        for file in &snap.files {
            if file.is_directory {
                println!(
                    "{} {:>10}  {}/",
                    dim.apply_to(format!("{:<20}", file.file_id)),
                    "-",
                    style(&file.name).blue().bold()
                );
            } else {
                println!(
                    "{} {:>10}  {}",
                    dim.apply_to(format!("{:<20}", file.file_id)),
                    human_size(file.size),
                    file.name
                );
            }
        }
        println!();
        println!(
            "{}",
            dim.apply_to(format!("{} of {} entries", snap.files.len(), snap.count))
        );
    })
}
