//! Bulletin is a data-driven board rendering engine.
//!
//! A `Board` pairs a tabular dataset with a fixed layout of positioned
//! content elements ("pins" — text or images) and produces one raster image
//! ("post") per row: same layout, varying content, bulk output.
//!
//! # Pipeline overview
//!
//! 1. **Resolve**: `Pin + Row -> content` (column cell or pin default)
//! 2. **Layout**: font-size fitting, character/word wrapping, image
//!    fit-mode scaling
//! 3. **Paint**: all pins composited onto a per-row canvas in registration
//!    order (CPU rasterizer)
//! 4. **Persist**: `publish` writes `board-post{index}.{format}` per row
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: the same board and dataset produce the
//!   same pixels; rows never share mutable state.
//! - **No IO in layout**: measurement and wrapping go through the
//!   [`TextMeasurer`] seam; fonts and gallery assets are read once and
//!   cached per [`Renderer`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(missing_docs_in_private_items)]

mod assets;
mod board;
mod foundation;
mod render;
mod text;

pub use assets::decode::{RasterImage, decode_image, decode_svg};
pub use assets::gallery::{PROBE_EXTENSIONS, normalize_rel_path, probe_gallery, scaled_dimensions};
pub use board::dataset::{Dataset, Row, cell_text};
pub use board::model::{
    Background, Board, ImageFillMode, ImagePin, Pin, TextFillMode, TextPin,
};
pub use foundation::core::{
    Affine, Anchor, Dimensions, HAlign, OutputFormat, PixelMode, Point, Rect, Vec2, align_offset,
    default_background,
};
pub use foundation::error::{BulletinError, BulletinResult};
pub use render::canvas::Canvas;
pub use render::frame::{FrameRgba, save_frame};
pub use render::paint::{Renderer, resolve_text_layout};
pub use render::pipeline::{
    PublishOpts, PublishStats, post_path, publish, render_post,
};
pub use text::fit::{FIT_LOWER_TOLERANCE, FIT_MAX_ITERATIONS, fit_font_size};
pub use text::measure::{HeuristicTextMeasurer, TextExtent, TextMeasurer};
pub use text::shaper::{LoadedFont, TextBrush, TextShaper, layout_extent};
pub use text::wrap::{WrapMode, truncate_to_width, wrap};
