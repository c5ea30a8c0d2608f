use std::{
    borrow::Cow,
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::gallery::normalize_rel_path,
    foundation::error::{BulletinError, BulletinResult},
    text::measure::{TextExtent, TextMeasurer},
};

/// RGBA8 brush color carried through Parley layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<[u8; 4]> for TextBrush {
    fn from(c: [u8; 4]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
            a: c[3],
        }
    }
}

/// A font resolved from the assets root: family name for layout, raw data
/// for glyph rasterization.
#[derive(Clone)]
pub struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

impl LoadedFont {
    /// Primary family name registered from the font bytes.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Font data handle used when drawing glyph runs.
    pub fn data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("family", &self.family)
            .finish()
    }
}

/// Stateful helper for loading fonts and building Parley text layouts.
///
/// Fonts are read from the assets root once and cached by normalized
/// relative path. One shaper serves one render worker; it is cheap to
/// construct per worker.
pub struct TextShaper {
    root: PathBuf,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrush>,
    fonts: HashMap<String, LoadedFont>,
}

impl TextShaper {
    /// Construct a shaper resolving font references against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: HashMap::new(),
        }
    }

    /// Resolve and cache a font by its path-like reference.
    pub fn font(&mut self, source: &str) -> BulletinResult<LoadedFont> {
        let norm = normalize_rel_path(source)?;
        if let Some(font) = self.fonts.get(&norm) {
            return Ok(font.clone());
        }

        let path = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read font bytes from '{}'", path.display()))?;

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            BulletinError::validation(format!("no font families registered from '{norm}'"))
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| {
                BulletinError::validation(format!("registered font '{norm}' has no family name"))
            })?
            .to_string();

        let font = LoadedFont {
            family,
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
        };
        self.fonts.insert(norm, font.clone());
        Ok(font)
    }

    /// Shape and lay out a single styled run of text.
    ///
    /// Line breaks follow the newlines already present in `text`; width-based
    /// breaking is the wrapper's job, not the shaper's.
    pub fn layout(
        &mut self,
        font: &LoadedFont,
        size_px: f32,
        brush: TextBrush,
        text: &str,
    ) -> BulletinResult<parley::Layout<TextBrush>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BulletinError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrush> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Extent of a built layout: widest line advance by summed line heights.
pub fn layout_extent(layout: &parley::Layout<TextBrush>) -> TextExtent {
    let mut width = 0.0f32;
    let mut height = 0.0f32;
    for line in layout.lines() {
        let m = line.metrics();
        width = width.max(m.advance);
        height += m.ascent + m.descent + m.leading;
    }
    TextExtent { width, height }
}

impl TextMeasurer for TextShaper {
    fn measure(&mut self, font: &str, size_px: f32, text: &str) -> BulletinResult<TextExtent> {
        if text.is_empty() {
            return Ok(TextExtent::default());
        }
        let font = self.font(font)?;
        let layout = self.layout(&font, size_px, TextBrush::default(), text)?;
        Ok(layout_extent(&layout))
    }
}
