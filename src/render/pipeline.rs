use std::path::{Path, PathBuf};

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    board::model::{Background, Board},
    foundation::core::{OutputFormat, default_background},
    foundation::error::{BulletinError, BulletinResult},
    render::canvas::Canvas,
    render::frame::{FrameRgba, save_frame},
    render::paint::Renderer,
};

/// Render one post: the image for a single dataset row.
///
/// This is the primary one-shot API. A fresh canvas is allocated from the
/// board configuration, the background is painted, and every registered pin
/// is painted in registration order; a failure in any pin aborts the row.
/// The caller decides persistence ([`save_frame`]) and display.
pub fn render_post(board: &Board, root: &Path, index: usize) -> BulletinResult<FrameRgba> {
    board.validate()?;
    let mut renderer = Renderer::new(root);
    render_post_with(board, &mut renderer, index)
}

pub(crate) fn render_post_with(
    board: &Board,
    renderer: &mut Renderer,
    index: usize,
) -> BulletinResult<FrameRgba> {
    let row = board.data.row(index)?;
    let mut canvas = Canvas::new(board.dimensions)?;

    match &board.background {
        None => canvas.fill(default_background(board.mode)),
        Some(Background::Color(color)) => canvas.fill(*color),
        Some(Background::Image(source)) => {
            let img = renderer.raster(source)?;
            canvas.fill_image(&img)?;
        }
    }

    for pin in &board.pins {
        renderer.paint_pin(&mut canvas, pin, row, index)?;
    }
    canvas.into_frame()
}

/// Output path for one post: `{folder}/board-post{index}.{format}`.
pub fn post_path(folder: &Path, index: usize, format: OutputFormat) -> PathBuf {
    folder.join(format!("board-post{index}.{}", format.ext()))
}

/// Threading and cleanup controls for [`publish`].
#[derive(Clone, Debug)]
pub struct PublishOpts {
    /// Delete the destination folder's previous contents first.
    pub truncate: bool,
    /// Render rows in parallel (rows are independent; pin order within a
    /// row is always preserved).
    pub parallel: bool,
    /// Optional explicit worker thread count for parallel mode.
    pub threads: Option<usize>,
}

impl Default for PublishOpts {
    fn default() -> Self {
        Self {
            truncate: true,
            parallel: false,
            threads: None,
        }
    }
}

/// Aggregated publish counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PublishStats {
    /// Rows in the dataset.
    pub posts_total: u64,
    /// Posts successfully written.
    pub posts_written: u64,
    /// Truncation entries that could not be removed (best-effort cleanup).
    pub truncate_failures: u64,
}

/// Render and persist one post per dataset row.
///
/// Ensures `folder` exists; when truncation is requested, the previous
/// contents are removed (fully, before the first write). Posts are written
/// as `{folder}/board-post{index}.{format}` in dataset order.
#[tracing::instrument(skip(board, opts), fields(folder = %folder.display()))]
pub fn publish(
    board: &Board,
    root: &Path,
    folder: &Path,
    opts: &PublishOpts,
) -> BulletinResult<PublishStats> {
    board.validate()?;
    std::fs::create_dir_all(folder)
        .with_context(|| format!("create publish folder '{}'", folder.display()))?;

    let mut stats = PublishStats {
        posts_total: board.data.len() as u64,
        ..PublishStats::default()
    };
    if opts.truncate {
        stats.truncate_failures = truncate_folder(folder)?;
    }

    let bg = flatten_background(board);
    if !opts.parallel {
        let mut renderer = Renderer::new(root);
        for index in 0..board.data.len() {
            let frame = render_post_with(board, &mut renderer, index)?;
            let path = post_path(folder, index, board.output_format);
            save_frame(&frame, board.mode, board.output_format, bg, &path)?;
            stats.posts_written += 1;
            tracing::debug!(index, path = %path.display(), "post written");
        }
        return Ok(stats);
    }

    let pool = build_thread_pool(opts.threads)?;
    let results = pool.install(|| {
        (0..board.data.len())
            .into_par_iter()
            .map_init(
                || Renderer::new(root),
                |renderer, index| -> BulletinResult<()> {
                    let frame = render_post_with(board, renderer, index)?;
                    let path = post_path(folder, index, board.output_format);
                    save_frame(&frame, board.mode, board.output_format, bg, &path)?;
                    tracing::debug!(index, path = %path.display(), "post written");
                    Ok(())
                },
            )
            .collect::<Vec<_>>()
    });
    for result in results {
        result?;
        stats.posts_written += 1;
    }
    Ok(stats)
}

/// Background color used when flattening alpha for opaque outputs.
fn flatten_background(board: &Board) -> [u8; 3] {
    let c = match &board.background {
        Some(Background::Color(color)) => *color,
        // A background image covers the canvas; the flatten color only shows
        // through fully transparent pixels, so the mode default is fine.
        Some(Background::Image(_)) | None => default_background(board.mode),
    };
    [c[0], c[1], c[2]]
}

/// Best-effort removal of a folder's immediate contents.
///
/// Files and empty child directories are removed; non-empty child
/// directories are left untouched (declared limitation). Individual delete
/// failures are logged and counted, never fatal, and the sweep completes
/// before any post is written.
fn truncate_folder(folder: &Path) -> BulletinResult<u64> {
    let entries = std::fs::read_dir(folder)
        .with_context(|| format!("read publish folder '{}'", folder.display()))?;

    let mut failures = 0u64;
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read entry during truncation");
                failures += 1;
                continue;
            }
        };
        let path = entry.path();
        let result = if path.is_dir() {
            if std::fs::read_dir(&path).map(|mut d| d.next().is_some()).unwrap_or(true) {
                tracing::debug!(path = %path.display(), "leaving non-empty directory untouched");
                continue;
            }
            std::fs::remove_dir(&path)
        } else {
            std::fs::remove_file(&path)
        };
        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove entry during truncation");
            failures += 1;
        }
    }
    Ok(failures)
}

fn build_thread_pool(threads: Option<usize>) -> BulletinResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(BulletinError::validation(
            "publish 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| BulletinError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
