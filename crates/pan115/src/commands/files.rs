//! File commands - ls, stat, mkdir, rm, mv, cp, rename.

use anyhow::Result;
use clap::Args;
use console::{Style, style};

use pan115_client::{File, ListQuery};

use super::{Context, header, human_size};

/// Arguments for `ls`.
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Directory ID (0 is the root)
    #[arg(default_value = "0")]
    pub dir_id: String,

    /// Page size; without it the whole directory is listed
    #[arg(short, long)]
    pub limit: Option<i64>,

    /// Offset of the first entry (with --limit)
    #[arg(short, long, default_value = "0")]
    pub offset: i64,

    /// Sort field: user_ptime, file_name, file_size
    #[arg(long)]
    pub order: Option<String>,

    /// Sort ascending
    #[arg(long)]
    pub asc: bool,
}

/// Arguments for `stat`.
#[derive(Args, Debug)]
pub struct StatArgs {
    /// File or directory ID
    pub file_id: String,
}

/// Arguments for `mkdir`.
#[derive(Args, Debug)]
pub struct MkdirArgs {
    /// Name of the new directory
    pub name: String,

    /// Parent directory ID
    #[arg(short, long, default_value = "0")]
    pub parent: String,
}

/// Arguments for `rm`.
#[derive(Args, Debug)]
pub struct RmArgs {
    /// File or directory IDs
    #[arg(required = true)]
    pub file_ids: Vec<String>,
}

/// Arguments for `mv` and `cp`.
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Target directory ID
    #[arg(short, long)]
    pub to: String,

    /// File or directory IDs
    #[arg(required = true)]
    pub file_ids: Vec<String>,
}

/// Arguments for `rename`.
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// File or directory ID
    pub file_id: String,

    /// New name
    pub new_name: String,
}

pub async fn ls(args: LsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let listing = match args.limit.filter(|l| *l > 0) {
        Some(limit) => {
            let query = ListQuery {
                dir_id: args.dir_id,
                offset: args.offset,
                limit,
                order: args.order.unwrap_or_default(),
                asc: args.asc.then_some(true),
            };
            client.files().list(&query).await?
        }
        None => client.files().list_all(&args.dir_id).await?,
    };

    ctx.emit(&listing, |listing| {
        let dim = Style::new().dim();
        let path: Vec<&str> = listing.path.iter().map(|p| p.name.as_str()).collect();
        header(&format!("/{}", path.join("/").trim_start_matches('/')));

        if listing.files.is_empty() {
            println!("{}", dim.apply_to("Empty directory"));
            return;
        }
        for file in &listing.files {
            print_file(file);
        }
        println!();
        println!(
            "{}",
            dim.apply_to(format!("{} of {} entries", listing.files.len(), listing.count))
        );
    })
}

pub async fn stat(args: StatArgs, ctx: &Context) -> Result<()> {
    let stat = ctx.client()?.files().stat(&args.file_id).await?;

    ctx.emit(&stat, |stat| {
        let dim = Style::new().dim();
        header(&stat.name);
        let kind = if stat.is_directory { "directory" } else { "file" };
        println!("{:<12} {}", dim.apply_to("Type"), kind);
        println!("{:<12} {}", dim.apply_to("Size"), stat.size);
        println!("{:<12} {}", dim.apply_to("Pick code"), stat.pick_code);
        if !stat.sha1.is_empty() {
            println!("{:<12} {}", dim.apply_to("SHA1"), stat.sha1);
        }
        if stat.is_directory {
            println!(
                "{:<12} {} files, {} folders",
                dim.apply_to("Contains"),
                stat.file_count,
                stat.folder_count
            );
        }
        let path: Vec<&str> = stat.paths.iter().map(|p| p.name.as_str()).collect();
        println!("{:<12} /{}", dim.apply_to("Path"), path.join("/"));
    })
}

pub async fn mkdir(args: MkdirArgs, ctx: &Context) -> Result<()> {
    let dir = ctx.client()?.files().mkdir(&args.parent, &args.name).await?;

    ctx.emit(&dir, |dir| {
        let green = Style::new().green();
        println!(
            "{} Created {} {}",
            green.apply_to("✓"),
            dir.name,
            Style::new().dim().apply_to(format!("({})", dir.dir_id))
        );
    })
}

pub async fn rm(args: RmArgs, ctx: &Context) -> Result<()> {
    ctx.client()?.files().delete(&args.file_ids).await?;
    ctx.done(&format!("Moved {} item(s) to the recycle bin", args.file_ids.len()))
}

pub async fn mv(args: TransferArgs, ctx: &Context) -> Result<()> {
    ctx.client()?.files().move_to(&args.to, &args.file_ids).await?;
    ctx.done(&format!("Moved {} item(s) to {}", args.file_ids.len(), args.to))
}

pub async fn cp(args: TransferArgs, ctx: &Context) -> Result<()> {
    ctx.client()?.files().copy_to(&args.to, &args.file_ids).await?;
    ctx.done(&format!("Copied {} item(s) to {}", args.file_ids.len(), args.to))
}

pub async fn rename(args: RenameArgs, ctx: &Context) -> Result<()> {
    ctx.client()?
        .files()
        .rename(&args.file_id, &args.new_name)
        .await?;
    ctx.done(&format!("Renamed {} to {}", args.file_id, args.new_name))
}

/// One line per entry: id, size, name.
pub(crate) fn print_file(file: &File) {
    let dim = Style::new().dim();
    if file.is_directory {
        println!(
            "{} {:>10}  {}/",
            dim.apply_to(format!("{:<20}", file.file_id)),
            "-",
            style(&file.name).blue().bold()
        );
    } else {
        let star = if file.star { " ★" } else { "" };
        println!(
            "{} {:>10}  {}{}",
            dim.apply_to(format!("{:<20}", file.file_id)),
            human_size(file.size),
            file.name,
            star
        );
    }
}
