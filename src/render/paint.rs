use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::decode::{RasterImage, decode_image, decode_svg},
    assets::gallery::{normalize_rel_path, probe_gallery, scaled_dimensions},
    board::dataset::Row,
    board::model::{ImagePin, Pin, TextFillMode, TextPin},
    foundation::core::{Affine, Dimensions, align_offset},
    foundation::error::BulletinResult,
    render::canvas::{Canvas, affine_to_cpu, image_paint},
    text::fit::fit_font_size,
    text::measure::TextMeasurer,
    text::shaper::{TextBrush, TextShaper, layout_extent},
    text::wrap::{WrapMode, truncate_to_width, wrap},
};

/// Per-worker paint state: the text shaper and a decoded-image cache.
///
/// One renderer serves one worker for the duration of a run; nothing in it
/// is shared across rows, so `publish` can hold one per thread.
pub struct Renderer {
    root: PathBuf,
    shaper: TextShaper,
    images: HashMap<String, RasterImage>,
}

impl Renderer {
    /// Construct a renderer resolving assets against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            shaper: TextShaper::new(&root),
            root,
            images: HashMap::new(),
        }
    }

    /// Paint one pin's resolved content onto the canvas.
    ///
    /// Dispatch is exhaustive over the pin union; a failure leaves the row
    /// render aborted (the canvas is discarded by the caller).
    pub fn paint_pin(
        &mut self,
        canvas: &mut Canvas,
        pin: &Pin,
        row: &Row,
        row_index: usize,
    ) -> BulletinResult<()> {
        let content = pin.resolve_content(row, row_index)?;
        match pin {
            Pin::Text(p) => self.paint_text(canvas, p, &content),
            Pin::Image(p) => self.paint_image(canvas, p, &content),
        }
    }

    /// Load a decoded raster by assets-root-relative path, cached.
    pub fn raster(&mut self, source: &str) -> BulletinResult<RasterImage> {
        let norm = normalize_rel_path(source)?;
        if let Some(img) = self.images.get(&norm) {
            return Ok(img.clone());
        }
        let path = self.root.join(Path::new(&norm));
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))?;
        let img = if norm.rsplit('.').next() == Some("svg") {
            decode_svg(&bytes)?
        } else {
            decode_image(&bytes)?
        };
        self.images.insert(norm, img.clone());
        Ok(img)
    }

    fn paint_text(
        &mut self,
        canvas: &mut Canvas,
        pin: &TextPin,
        content: &str,
    ) -> BulletinResult<()> {
        let (size, text) = resolve_text_layout(&mut self.shaper, pin, content)?;

        if text.is_empty() {
            return Ok(());
        }

        let font = self.shaper.font(&pin.font)?;
        let layout = self
            .shaper
            .layout(&font, size, TextBrush::from(pin.color), &text)?;
        let extent = layout_extent(&layout);
        let origin = pin
            .anchor
            .top_left(pin.pos, f64::from(extent.width), f64::from(extent.height));

        let ctx = canvas.ctx_mut();
        for line in layout.lines() {
            let line_dx = align_offset(
                f64::from(extent.width),
                f64::from(line.metrics().advance),
                pin.align,
            );
            ctx.set_transform(affine_to_cpu(Affine::translate((
                origin.x + line_dx,
                origin.y,
            ))));
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font.data())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn paint_image(
        &mut self,
        canvas: &mut Canvas,
        pin: &ImagePin,
        content: &str,
    ) -> BulletinResult<()> {
        let key = format!("{}/{}", pin.gallery, content);
        let img = if let Some(img) = self.images.get(&key) {
            img.clone()
        } else {
            let img = probe_gallery(&self.root, &pin.gallery, content)?;
            self.images.insert(key, img.clone());
            img
        };

        let source = Dimensions {
            width: img.width,
            height: img.height,
        };
        let dst = scaled_dimensions(source, pin.dimensions, pin.fill_mode);
        let origin = pin
            .anchor
            .top_left(pin.pos, f64::from(dst.width), f64::from(dst.height));

        let sx = f64::from(dst.width) / f64::from(source.width);
        let sy = f64::from(dst.height) / f64::from(source.height);
        let transform = Affine::translate((origin.x, origin.y)) * Affine::scale_non_uniform(sx, sy);

        let ctx = canvas.ctx_mut();
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(image_paint(&img)?);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(source.width),
            f64::from(source.height),
        ));
        Ok(())
    }
}

/// Resolve a text pin's render size and line breaks for one content string.
///
/// Fill-mode policy: `fill` always fits the size against `max_width`;
/// `shrink` fits only when the nominal measurement overflows; `wrap` /
/// `wordwrap` re-break at the nominal size; `cut` truncates at the width
/// boundary; `fixed` (and `shrink` within width) leaves content unmodified.
pub fn resolve_text_layout(
    measurer: &mut dyn TextMeasurer,
    pin: &TextPin,
    content: &str,
) -> BulletinResult<(f32, String)> {
    let nominal_width = measurer.measure(&pin.font, pin.font_size, content)?.width;

    match pin.fill_mode {
        TextFillMode::Fill => {
            let size = fit_font_size(measurer, &pin.font, content, pin.font_size, pin.max_width)?;
            Ok((size, content.to_string()))
        }
        TextFillMode::Shrink if nominal_width > pin.max_width => {
            let size = fit_font_size(measurer, &pin.font, content, pin.font_size, pin.max_width)?;
            Ok((size, content.to_string()))
        }
        TextFillMode::Wrap => {
            let text = wrap(
                measurer,
                &pin.font,
                pin.font_size,
                content,
                pin.max_width,
                WrapMode::Character,
            )?;
            Ok((pin.font_size, text))
        }
        TextFillMode::WordWrap => {
            let text = wrap(
                measurer,
                &pin.font,
                pin.font_size,
                content,
                pin.max_width,
                WrapMode::Word,
            )?;
            Ok((pin.font_size, text))
        }
        TextFillMode::Cut => {
            let text = truncate_to_width(measurer, &pin.font, pin.font_size, content, pin.max_width)?;
            Ok((pin.font_size, text))
        }
        TextFillMode::Shrink | TextFillMode::Fixed => Ok((pin.font_size, content.to_string())),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
