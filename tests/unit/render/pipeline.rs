use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::*;
use crate::{
    Anchor, Background, BulletinError, Dataset, Dimensions, ImageFillMode, ImagePin, OutputFormat,
    Pin, PixelMode, Point, Row,
};

struct TempRoot(PathBuf);

impl TempRoot {
    fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "bulletin_publish_{}_{label}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(path.join("faces")).unwrap();
        Self(path)
    }

    fn out(&self) -> PathBuf {
        self.0.join("posts")
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn write_png(path: &Path, w: u32, h: u32, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, buf).unwrap();
}

fn avatar_row(name: &str) -> Row {
    let mut row = Row::new();
    row.insert("Avatar".to_string(), serde_json::json!(name));
    row
}

/// A 16x16 RGBA board with one stretched avatar pin per row.
fn board_with_avatars(root: &TempRoot, names: &[&str]) -> Board {
    for name in names {
        write_png(
            &root.0.join("faces").join(format!("{name}.png")),
            4,
            4,
            [255, 0, 0, 255],
        );
    }

    let mut board = Board::new(Dataset::from_rows(
        names.iter().map(|n| avatar_row(n)).collect(),
    ));
    board.dimensions = Dimensions {
        width: 16,
        height: 16,
    };
    board.mode = PixelMode::Rgba;
    board.output_format = OutputFormat::Png;
    board.background = Some(Background::Color([10, 20, 30, 255]));
    board
        .pin([Pin::Image(ImagePin {
            title: "Avatar".to_string(),
            column: Some("Avatar".to_string()),
            default: None,
            pos: Point::new(4.0, 4.0),
            anchor: Anchor::TopLeft,
            gallery: "faces".to_string(),
            dimensions: Dimensions {
                width: 8,
                height: 8,
            },
            fill_mode: ImageFillMode::Stretch,
        })])
        .unwrap();
    board
}

fn pixel(frame: &crate::FrameRgba, x: u32, y: u32) -> [u8; 4] {
    let idx = ((y * frame.width + x) * 4) as usize;
    frame.data[idx..idx + 4].try_into().unwrap()
}

fn post_files(folder: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(folder)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn render_post_paints_background_then_pins() {
    let root = TempRoot::new("render");
    let board = board_with_avatars(&root, &["ada"]);

    let frame = render_post(&board, &root.0, 0).unwrap();
    assert_eq!((frame.width, frame.height), (16, 16));
    assert!(frame.premultiplied);
    // Outside the pin: the background color, fully opaque.
    assert_eq!(pixel(&frame, 1, 1), [10, 20, 30, 255]);
    // Inside the stretched 8x8 avatar at (4,4): the source red.
    assert_eq!(pixel(&frame, 8, 8), [255, 0, 0, 255]);
}

#[test]
fn render_post_rejects_out_of_range_rows() {
    let root = TempRoot::new("range");
    let board = board_with_avatars(&root, &["ada"]);
    let err = render_post(&board, &root.0, 5).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

#[test]
fn publish_writes_one_named_post_per_row() {
    let root = TempRoot::new("batch");
    let board = board_with_avatars(&root, &["ada", "grace", "lin"]);

    let stats = publish(&board, &root.0, &root.out(), &PublishOpts::default()).unwrap();
    assert_eq!(stats.posts_total, 3);
    assert_eq!(stats.posts_written, 3);
    assert_eq!(
        post_files(&root.out()),
        vec!["board-post0.png", "board-post1.png", "board-post2.png"]
    );

    // A second run with truncation yields the same file set, not six files.
    let stats = publish(&board, &root.0, &root.out(), &PublishOpts::default()).unwrap();
    assert_eq!(stats.posts_written, 3);
    assert_eq!(
        post_files(&root.out()),
        vec!["board-post0.png", "board-post1.png", "board-post2.png"]
    );
}

#[test]
fn publish_parallel_matches_sequential_output() {
    let root = TempRoot::new("parallel");
    let board = board_with_avatars(&root, &["ada", "grace", "lin"]);

    let opts = PublishOpts {
        parallel: true,
        threads: Some(2),
        ..PublishOpts::default()
    };
    let stats = publish(&board, &root.0, &root.out(), &opts).unwrap();
    assert_eq!(stats.posts_written, 3);
    assert_eq!(
        post_files(&root.out()),
        vec!["board-post0.png", "board-post1.png", "board-post2.png"]
    );
}

#[test]
fn truncation_clears_files_and_empty_dirs_only() {
    let root = TempRoot::new("truncate");
    let board = board_with_avatars(&root, &["ada"]);

    let out = root.out();
    std::fs::create_dir_all(out.join("empty")).unwrap();
    std::fs::create_dir_all(out.join("keep")).unwrap();
    std::fs::write(out.join("stale.txt"), b"old").unwrap();
    std::fs::write(out.join("keep/nested.txt"), b"kept").unwrap();

    publish(&board, &root.0, &out, &PublishOpts::default()).unwrap();

    assert_eq!(post_files(&out), vec!["board-post0.png", "keep"]);
    assert!(out.join("keep/nested.txt").exists());
}

#[test]
fn truncation_can_be_disabled() {
    let root = TempRoot::new("no_truncate");
    let board = board_with_avatars(&root, &["ada"]);

    let out = root.out();
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("stale.txt"), b"old").unwrap();

    let opts = PublishOpts {
        truncate: false,
        ..PublishOpts::default()
    };
    publish(&board, &root.0, &out, &opts).unwrap();
    assert_eq!(post_files(&out), vec!["board-post0.png", "stale.txt"]);
}

#[test]
fn missing_asset_aborts_the_row() {
    let root = TempRoot::new("missing_asset");
    let mut board = board_with_avatars(&root, &["ada"]);
    board.data = Dataset::from_rows(vec![avatar_row("ada"), avatar_row("ghost")]);

    let err = publish(&board, &root.0, &root.out(), &PublishOpts::default()).unwrap_err();
    assert!(matches!(err, BulletinError::AssetNotFound { .. }));
}

#[test]
fn post_path_follows_the_naming_pattern() {
    let path = post_path(Path::new("/tmp/posts"), 7, OutputFormat::Jpg);
    assert_eq!(path, Path::new("/tmp/posts/board-post7.jpg"));
}
