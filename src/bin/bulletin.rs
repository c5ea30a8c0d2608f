use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bulletin", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single row's post to a file.
    Post(PostArgs),
    /// Render and write a post for every dataset row.
    Publish(PublishArgs),
}

#[derive(Parser, Debug)]
struct PostArgs {
    /// Board layout JSON.
    #[arg(long)]
    board: PathBuf,

    /// Dataset rows JSON (array of objects).
    #[arg(long)]
    data: PathBuf,

    /// Row index (0-based).
    #[arg(long)]
    row: usize,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct PublishArgs {
    /// Board layout JSON.
    #[arg(long)]
    board: PathBuf,

    /// Dataset rows JSON (array of objects).
    #[arg(long)]
    data: PathBuf,

    /// Destination folder.
    #[arg(long)]
    out: PathBuf,

    /// Remove the folder's previous contents before writing.
    #[arg(long, default_value_t = true)]
    truncate: bool,

    /// Render rows in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Post(args) => cmd_post(args),
        Command::Publish(args) => cmd_publish(args),
    }
}

fn load_board(board_path: &std::path::Path, data_path: &std::path::Path) -> anyhow::Result<bulletin::Board> {
    let board_json = std::fs::read_to_string(board_path)
        .with_context(|| format!("read board '{}'", board_path.display()))?;
    let mut board: bulletin::Board =
        serde_json::from_str(&board_json).context("parse board JSON")?;

    let rows_json = std::fs::read_to_string(data_path)
        .with_context(|| format!("read dataset '{}'", data_path.display()))?;
    board.data = serde_json::from_str(&rows_json).context("parse dataset JSON")?;
    Ok(board)
}

fn assets_root(board_path: &std::path::Path) -> &std::path::Path {
    board_path.parent().unwrap_or_else(|| std::path::Path::new("."))
}

fn cmd_post(args: PostArgs) -> anyhow::Result<()> {
    let board = load_board(&args.board, &args.data)?;
    let frame = bulletin::render_post(&board, assets_root(&args.board), args.row)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let bg = bulletin::default_background(board.mode);
    bulletin::save_frame(
        &frame,
        board.mode,
        board.output_format,
        [bg[0], bg[1], bg[2]],
        &args.out,
    )?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_publish(args: PublishArgs) -> anyhow::Result<()> {
    let board = load_board(&args.board, &args.data)?;
    let opts = bulletin::PublishOpts {
        truncate: args.truncate,
        parallel: args.parallel,
        threads: args.threads,
    };
    let stats = bulletin::publish(&board, assets_root(&args.board), &args.out, &opts)?;

    eprintln!(
        "published {}/{} posts to {}",
        stats.posts_written,
        stats.posts_total,
        args.out.display()
    );
    Ok(())
}
