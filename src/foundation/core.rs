use crate::foundation::error::{BulletinError, BulletinResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Pixel dimensions of a canvas or an image target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Rasterizer surfaces are indexed with `u16` coordinates.
    pub const MAX_DIM: u32 = u16::MAX as u32;

    /// Construct validated dimensions.
    pub fn new(width: u32, height: u32) -> BulletinResult<Self> {
        let out = Self { width, height };
        out.validate("dimensions")?;
        Ok(out)
    }

    /// Check that both axes are non-zero and within the surface limit.
    pub fn validate(&self, field: &str) -> BulletinResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(BulletinError::validation(format!(
                "{field} width/height must be > 0"
            )));
        }
        if self.width > Self::MAX_DIM || self.height > Self::MAX_DIM {
            return Err(BulletinError::validation(format!(
                "{field} width/height must be <= {}",
                Self::MAX_DIM
            )));
        }
        Ok(())
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
        }
    }
}

/// Pixel layout of the rendered post.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelMode {
    /// Opaque three-channel output.
    #[default]
    Rgb,
    /// Four-channel output with alpha.
    Rgba,
}

/// Mode-dependent default background color (straight RGBA8).
///
/// Pure function evaluated when a board carries no explicit background.
pub fn default_background(mode: PixelMode) -> [u8; 4] {
    match mode {
        PixelMode::Rgb => [255, 255, 255, 255],
        PixelMode::Rgba => [255, 255, 255, 255],
    }
}

/// Which corner or edge of a pin's content box the pin position refers to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Position is the content's top-left corner.
    #[default]
    TopLeft,
    /// Position is the content's top-right corner.
    TopRight,
    /// Position is the content's bottom-left corner.
    BottomLeft,
    /// Position is the content's bottom-right corner.
    BottomRight,
    /// Position is the content's center.
    Center,
}

impl Anchor {
    /// Map an anchored position to the content box's top-left corner.
    pub fn top_left(self, pos: Point, content_w: f64, content_h: f64) -> Point {
        match self {
            Anchor::TopLeft => pos,
            Anchor::TopRight => Point::new(pos.x - content_w, pos.y),
            Anchor::BottomLeft => Point::new(pos.x, pos.y - content_h),
            Anchor::BottomRight => Point::new(pos.x - content_w, pos.y - content_h),
            Anchor::Center => Point::new(pos.x - content_w * 0.5, pos.y - content_h * 0.5),
        }
    }
}

/// Horizontal alignment of lines inside a multi-line text block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    /// Align lines to the block's left edge.
    #[default]
    Left,
    /// Center lines within the block.
    Center,
    /// Align lines to the block's right edge.
    Right,
}

/// Offset of `content` within `container` under an alignment.
pub fn align_offset(container: f64, content: f64, align: HAlign) -> f64 {
    let rem = (container - content).max(0.0);
    match align {
        HAlign::Left => 0.0,
        HAlign::Center => rem * 0.5,
        HAlign::Right => rem,
    }
}

/// Raster formats a board can publish to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JPEG output (opaque).
    #[default]
    Jpg,
    /// PNG output (carries alpha in RGBA mode).
    Png,
    /// BMP output (opaque).
    Bmp,
}

impl OutputFormat {
    /// File extension used in post names.
    pub fn ext(self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Bmp => "bmp",
        }
    }

    /// Corresponding `image` crate format.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Bmp => image::ImageFormat::Bmp,
        }
    }

    /// Whether the encoded file can carry an alpha channel.
    pub fn supports_alpha(self) -> bool {
        matches!(self, OutputFormat::Png)
    }
}
