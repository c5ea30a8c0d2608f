use crate::{
    board::dataset::{Dataset, Row, cell_text},
    foundation::core::{Anchor, Dimensions, HAlign, OutputFormat, PixelMode, Point},
    foundation::error::{BulletinError, BulletinResult},
};

/// A complete board: dataset + canvas configuration + ordered pin list.
///
/// A board is a pure data model that can be built programmatically or
/// deserialized via Serde (JSON). Rendering is performed by the pipeline:
/// [`crate::render_post`] / [`crate::publish`].
///
/// Pin registration order is paint order: later pins draw over earlier ones.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Board {
    /// Rows this board renders, one post per row.
    #[serde(default)]
    pub data: Dataset,
    /// Canvas dimensions for every post.
    #[serde(default)]
    pub dimensions: Dimensions,
    /// Pixel layout of the output.
    #[serde(default)]
    pub mode: PixelMode,
    /// Background painted before any pin; `None` uses the mode default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    /// Raster format posts are written in.
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Ordered pins; append via [`Board::pin`].
    #[serde(default)]
    pub pins: Vec<Pin>,
}

impl Board {
    /// Construct a board over `data` with default canvas configuration.
    pub fn new(data: Dataset) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    /// Register pins, preserving order.
    ///
    /// All-or-nothing: every candidate is validated first, and the pin list
    /// is unchanged if any of them is invalid.
    pub fn pin(&mut self, pins: impl IntoIterator<Item = Pin>) -> BulletinResult<()> {
        let pins = pins.into_iter().collect::<Vec<_>>();
        for pin in &pins {
            pin.validate()?;
        }
        self.pins.extend(pins);
        Ok(())
    }

    /// Validate board invariants and every registered pin.
    pub fn validate(&self) -> BulletinResult<()> {
        self.dimensions.validate("board dimensions")?;
        if let Some(Background::Image(source)) = &self.background {
            validate_rel_source(source, "board background image")?;
        }
        for pin in &self.pins {
            pin.validate()?;
        }
        Ok(())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Board {}x{} ({} rows, {} pins)",
            self.dimensions.width,
            self.dimensions.height,
            self.data.len(),
            self.pins.len()
        )?;
        for pin in &self.pins {
            writeln!(f, "  {pin}")?;
        }
        Ok(())
    }
}

/// Background painted onto a fresh canvas before any pin.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Background {
    /// Flat straight-alpha RGBA8 color.
    Color([u8; 4]),
    /// Image stretched to the canvas, path relative to the assets root.
    Image(String),
}

/// A placeable element on the board, discriminated by content kind.
///
/// The union is closed: the paint dispatcher matches exhaustively, so a new
/// variant forces the compiler through every render path.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pin {
    /// Text content shaped and painted with a font.
    Text(TextPin),
    /// Raster content resolved from a gallery directory.
    Image(ImagePin),
}

impl Pin {
    /// Human label, used in diagnostics and error messages.
    pub fn title(&self) -> &str {
        match self {
            Pin::Text(p) => &p.title,
            Pin::Image(p) => &p.title,
        }
    }

    /// Anchored canvas position.
    pub fn pos(&self) -> Point {
        match self {
            Pin::Text(p) => p.pos,
            Pin::Image(p) => p.pos,
        }
    }

    /// Which corner/edge of the content box the position refers to.
    pub fn anchor(&self) -> Anchor {
        match self {
            Pin::Text(p) => p.anchor,
            Pin::Image(p) => p.anchor,
        }
    }

    /// Validate variant-specific invariants.
    pub fn validate(&self) -> BulletinResult<()> {
        match self {
            Pin::Text(p) => p.validate(),
            Pin::Image(p) => p.validate(),
        }
    }

    /// Resolve this pin's content for one row.
    ///
    /// Content is the cell under the pin's source column when present and
    /// non-empty, otherwise the pin default. A miss with no default is a
    /// defined error, never a silent blank.
    pub fn resolve_content(&self, row: &Row, row_index: usize) -> BulletinResult<String> {
        let (column, default) = match self {
            Pin::Text(p) => (p.column.as_deref(), p.default.as_deref()),
            Pin::Image(p) => (p.column.as_deref(), p.default.as_deref()),
        };

        if let Some(col) = column
            && let Some(value) = row.get(col)
            && let Some(text) = cell_text(value)?
        {
            return Ok(text);
        }
        if let Some(default) = default {
            return Ok(default.to_string());
        }
        Err(BulletinError::render(format!(
            "pin '{}' has no content for row {row_index} (column {:?} missing or empty, no default)",
            self.title(),
            column
        )))
    }
}

impl std::fmt::Display for Pin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pin::Text(p) => write!(
                f,
                "TextPin '{}' col={:?} pos=({}, {})",
                p.title, p.column, p.pos.x, p.pos.y
            ),
            Pin::Image(p) => write!(
                f,
                "ImagePin '{}' col={:?} pos=({}, {})",
                p.title, p.column, p.pos.x, p.pos.y
            ),
        }
    }
}

fn default_text_color() -> [u8; 4] {
    [255, 255, 255, 255]
}

/// A text element: per-row content shaped with a font and fitted, wrapped,
/// or truncated into its allotted width.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TextPin {
    /// Human label, also the fallback in diagnostics.
    pub title: String,
    /// Dataset column supplying per-row content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Content used when the column is absent or the cell is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Anchored position on the canvas.
    pub pos: Point,
    /// Which corner/edge of the rendered block `pos` refers to.
    #[serde(default)]
    pub anchor: Anchor,
    /// Font reference, a path relative to the assets root.
    pub font: String,
    /// Nominal font size in pixels.
    pub font_size: f32,
    /// Text color as straight-alpha RGBA8.
    #[serde(default = "default_text_color")]
    pub color: [u8; 4],
    /// Maximum rendered width in pixels.
    pub max_width: f32,
    /// Policy for content wider than `max_width`.
    #[serde(default)]
    pub fill_mode: TextFillMode,
    /// Line alignment for multi-line rendering.
    #[serde(default)]
    pub align: HAlign,
}

impl TextPin {
    /// Validate construction invariants.
    pub fn validate(&self) -> BulletinResult<()> {
        validate_common(&self.title, self.column.as_deref(), self.default.as_deref(), self.pos)?;
        validate_rel_source(&self.font, "text pin font")?;
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(BulletinError::validation(format!(
                "pin '{}' font_size must be finite and > 0",
                self.title
            )));
        }
        if !self.max_width.is_finite() || self.max_width <= 0.0 {
            return Err(BulletinError::validation(format!(
                "pin '{}' max_width must be finite and > 0",
                self.title
            )));
        }
        Ok(())
    }
}

/// An image element: per-row content names a gallery asset scaled per fill
/// mode.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ImagePin {
    /// Human label, also the fallback in diagnostics.
    pub title: String,
    /// Dataset column supplying per-row content (a logical image name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Image name used when the column is absent or the cell is empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Anchored position on the canvas.
    pub pos: Point,
    /// Which corner/edge of the scaled image `pos` refers to.
    #[serde(default)]
    pub anchor: Anchor,
    /// Gallery directory, relative to the assets root.
    pub gallery: String,
    /// Target dimensions in pixels.
    pub dimensions: Dimensions,
    /// Policy for mapping the source image into the target box.
    #[serde(default)]
    pub fill_mode: ImageFillMode,
}

impl ImagePin {
    /// Validate construction invariants.
    pub fn validate(&self) -> BulletinResult<()> {
        validate_common(&self.title, self.column.as_deref(), self.default.as_deref(), self.pos)?;
        validate_rel_source(&self.gallery, "image pin gallery")?;
        self.dimensions.validate("image pin dimensions")?;
        Ok(())
    }
}

/// Text fill modes: how content is resized, wrapped, or cropped into
/// `max_width`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextFillMode {
    /// Always fit the font size so the line lands on the target width.
    Fill,
    /// Fit only when the content overflows; otherwise render as-is.
    #[default]
    Shrink,
    /// Truncate at the width boundary, character granularity.
    Cut,
    /// Wrap at character granularity.
    Wrap,
    /// Wrap at word granularity.
    WordWrap,
    /// Render unmodified at the nominal size.
    Fixed,
}

impl TextFillMode {
    /// Canonical mode string.
    pub fn as_str(self) -> &'static str {
        match self {
            TextFillMode::Fill => "fill",
            TextFillMode::Shrink => "shrink",
            TextFillMode::Cut => "cut",
            TextFillMode::Wrap => "wrap",
            TextFillMode::WordWrap => "wordwrap",
            TextFillMode::Fixed => "fixed",
        }
    }
}

impl std::str::FromStr for TextFillMode {
    type Err = BulletinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fill" => Ok(TextFillMode::Fill),
            "shrink" => Ok(TextFillMode::Shrink),
            "cut" => Ok(TextFillMode::Cut),
            "wrap" => Ok(TextFillMode::Wrap),
            "wordwrap" => Ok(TextFillMode::WordWrap),
            "fixed" => Ok(TextFillMode::Fixed),
            other => Err(BulletinError::InvalidFillMode {
                kind: "text",
                mode: other.to_string(),
            }),
        }
    }
}

/// Image fill modes: how the source raster maps into the target box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFillMode {
    /// Largest aspect-preserving size not exceeding the target box.
    #[default]
    Fit,
    /// Exact target dimensions, aspect ratio not preserved.
    Stretch,
    /// Source native size, target dimensions ignored.
    Fixed,
}

impl ImageFillMode {
    /// Canonical mode string.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFillMode::Fit => "fit",
            ImageFillMode::Stretch => "stretch",
            ImageFillMode::Fixed => "fixed",
        }
    }
}

impl std::str::FromStr for ImageFillMode {
    type Err = BulletinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fit" => Ok(ImageFillMode::Fit),
            "stretch" => Ok(ImageFillMode::Stretch),
            "fixed" => Ok(ImageFillMode::Fixed),
            other => Err(BulletinError::InvalidFillMode {
                kind: "image",
                mode: other.to_string(),
            }),
        }
    }
}

impl serde::Serialize for TextFillMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for TextFillMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl serde::Serialize for ImageFillMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for ImageFillMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn validate_common(
    title: &str,
    column: Option<&str>,
    default: Option<&str>,
    pos: Point,
) -> BulletinResult<()> {
    if title.trim().is_empty() {
        return Err(BulletinError::validation("pin title must be non-empty"));
    }
    if column.is_none() && default.is_none() {
        return Err(BulletinError::MissingColumnOrDefault(title.to_string()));
    }
    if let Some(col) = column
        && col.trim().is_empty()
    {
        return Err(BulletinError::validation(format!(
            "pin '{title}' column must be non-empty when set"
        )));
    }
    if !pos.x.is_finite() || !pos.y.is_finite() {
        return Err(BulletinError::validation(format!(
            "pin '{title}' position must be finite"
        )));
    }
    Ok(())
}

fn validate_rel_source(source: &str, field: &str) -> BulletinResult<()> {
    if source.trim().is_empty() {
        return Err(BulletinError::validation(format!(
            "{field} must be non-empty"
        )));
    }
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BulletinError::validation(format!(
            "{field} must be a relative path"
        )));
    }
    for part in s.split('/') {
        if part == ".." {
            return Err(BulletinError::validation(format!(
                "{field} must not contain '..'"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/board/model.rs"]
mod tests;
