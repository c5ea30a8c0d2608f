use crate::foundation::error::BulletinResult;

/// Rendered bounding box of a string at a font size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

/// The measurement capability behind fitting and wrapping.
///
/// Font references are opaque path-like strings; the real provider
/// ([`crate::TextShaper`]) resolves them against its assets root, while test
/// measurers may ignore them entirely.
pub trait TextMeasurer {
    /// Measure the rendered extent of `text` at `size_px`.
    fn measure(&mut self, font: &str, size_px: f32, text: &str) -> BulletinResult<TextExtent>;
}

/// A deterministic linear measurer for tests and dry-run layout.
///
/// Assumes an average advance of `advance_em` per glyph and a line height of
/// one em. Multi-line input measures as the widest line by the line count.
#[derive(Clone, Copy, Debug)]
pub struct HeuristicTextMeasurer {
    /// Average glyph advance as a fraction of the font size.
    pub advance_em: f32,
}

impl Default for HeuristicTextMeasurer {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&mut self, _font: &str, size_px: f32, text: &str) -> BulletinResult<TextExtent> {
        let mut widest = 0usize;
        let mut lines = 0usize;
        for line in text.split('\n') {
            widest = widest.max(line.chars().count());
            lines += 1;
        }
        Ok(TextExtent {
            width: self.advance_em * size_px * widest as f32,
            height: size_px * lines.max(1) as f32,
        })
    }
}
