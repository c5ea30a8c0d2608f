use std::sync::Arc;

use crate::{
    assets::decode::RasterImage,
    foundation::core::{Affine, Dimensions},
    foundation::error::{BulletinError, BulletinResult},
    render::frame::FrameRgba,
};

/// A per-row paint surface.
///
/// Created fresh for every post, exclusively owned for the duration of that
/// row's render, and consumed by [`Canvas::into_frame`]. Pins draw through
/// the underlying CPU rasterizer context in registration order.
pub struct Canvas {
    ctx: vello_cpu::RenderContext,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Allocate a transparent canvas of the given dimensions.
    pub fn new(dimensions: Dimensions) -> BulletinResult<Self> {
        dimensions.validate("canvas dimensions")?;
        let w = dimensions.width as u16;
        let h = dimensions.height as u16;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: dimensions.width,
            height: dimensions.height,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Exclusive access to the rasterizer context for painting.
    pub(crate) fn ctx_mut(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Fill the whole canvas with a straight-alpha color.
    pub fn fill(&mut self, color: [u8; 4]) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color[0], color[1], color[2], color[3],
        ));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            self.width as f64,
            self.height as f64,
        ));
    }

    /// Draw a decoded raster stretched over the whole canvas.
    pub fn fill_image(&mut self, image: &RasterImage) -> BulletinResult<()> {
        let sx = self.width as f64 / image.width as f64;
        let sy = self.height as f64 / image.height as f64;
        self.ctx
            .set_transform(affine_to_cpu(Affine::scale_non_uniform(sx, sy)));
        self.ctx.set_paint(image_paint(image)?);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            image.width as f64,
            image.height as f64,
        ));
        Ok(())
    }

    /// Flush pending paints and read the surface back as premultiplied RGBA8.
    pub fn into_frame(mut self) -> BulletinResult<FrameRgba> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width as u16, self.height as u16);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRgba {
            width: self.width,
            height: self.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

/// Convert crate geometry into the rasterizer's affine type.
pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

/// Wrap decoded premultiplied pixels as a rasterizer image paint.
pub(crate) fn image_paint(image: &RasterImage) -> BulletinResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> BulletinResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BulletinError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BulletinError::render("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(BulletinError::render("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; decoded bytes are already premultiplied.
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in bytes.chunks_exact(4) {
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}
