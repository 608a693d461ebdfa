//! Search command.

use anyhow::Result;
use clap::Args;
use console::Style;

use pan115_client::SearchQuery;

use super::files::print_file;
use super::{Context, header};

/// Arguments for the search command.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search keyword
    pub keyword: String,

    /// Maximum results (default 30)
    #[arg(short, long, default_value = "0")]
    pub limit: i64,

    /// Offset for pagination
    #[arg(short, long, default_value = "0")]
    pub offset: i64,

    /// Type filter: 1 folder, 2 document, 3 image, 4 video, 5 audio, 6 archive
    #[arg(short = 't', long = "type", default_value = "0")]
    pub file_type: i64,

    /// Only files with this suffix (e.g. mkv)
    #[arg(long)]
    pub suffix: Option<String>,

    /// Restrict to a directory
    #[arg(long)]
    pub dir: Option<String>,

    /// Sort field: file_name, user_ptime, file_size
    #[arg(long)]
    pub order: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let query = SearchQuery {
        offset: args.offset,
        limit: args.limit,
        file_type: args.file_type,
        suffix: args.suffix.unwrap_or_default(),
        cid: args.dir.unwrap_or_default(),
        order: args.order.unwrap_or_default(),
        asc: args.desc.then_some(false),
        ..SearchQuery::new(&args.keyword)
    };
    let result = ctx.client()?.search().search(&query).await?;

    ctx.emit(&result, |result| {
        let dim = Style::new().dim();
        header(&format!("Search: \"{}\"", args.keyword));
        if result.files.is_empty() {
            println!("{}", dim.apply_to("No matches"));
            return;
        }
        for file in &result.files {
            print_file(file);
        }
        println!();
        println!(
            "{}",
            dim.apply_to(format!(
                "{} shown, {} total ({} files, {} folders)",
                result.files.len(),
                result.count,
                result.file_count,
                result.folder_count
            ))
        );
    })
}
