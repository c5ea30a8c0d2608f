use std::io::Cursor;
use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{OutputFormat, PixelMode};
use crate::foundation::error::BulletinResult;

/// One rendered post read back from the canvas.
///
/// Pixels are tightly packed row-major RGBA8; the rasterizer produces
/// premultiplied alpha, recorded in `premultiplied` to make conversions
/// explicit at API boundaries.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` carries premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRgba {
    /// Convert to straight-alpha RGBA8 bytes.
    pub fn to_rgba8_straight(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if self.premultiplied {
            for px in out.chunks_exact_mut(4) {
                let a = px[3] as u16;
                if a == 0 || a == 255 {
                    continue;
                }
                px[0] = ((px[0] as u16 * 255 + a / 2) / a).min(255) as u8;
                px[1] = ((px[1] as u16 * 255 + a / 2) / a).min(255) as u8;
                px[2] = ((px[2] as u16 * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// Flatten alpha over `bg` and drop the channel, yielding RGB8 bytes.
    pub fn to_rgb8(&self, bg: [u8; 3]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / 4 * 3);
        for px in self.data.chunks_exact(4) {
            let a = px[3] as u16;
            if self.premultiplied {
                for c in 0..3 {
                    out.push((px[c] as u16 + (bg[c] as u16 * (255 - a) + 127) / 255).min(255) as u8);
                }
            } else {
                for c in 0..3 {
                    out.push(
                        ((px[c] as u16 * a + bg[c] as u16 * (255 - a) + 127) / 255).min(255) as u8,
                    );
                }
            }
        }
        out
    }
}

/// Encode and persist a frame.
///
/// The file is encoded fully in memory and written in a single call, so a
/// returned `Ok` means a complete file on disk. RGBA mode keeps alpha only
/// when the format supports it; everything else flattens over `bg`.
pub fn save_frame(
    frame: &FrameRgba,
    mode: PixelMode,
    format: OutputFormat,
    bg: [u8; 3],
    path: &Path,
) -> BulletinResult<()> {
    let mut encoded = Vec::<u8>::new();
    if mode == PixelMode::Rgba && format.supports_alpha() {
        let data = frame.to_rgba8_straight();
        image::write_buffer_with_format(
            &mut Cursor::new(&mut encoded),
            &data,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgba8,
            format.image_format(),
        )
        .with_context(|| format!("encode {} frame", format.ext()))?;
    } else {
        let data = frame.to_rgb8(bg);
        image::write_buffer_with_format(
            &mut Cursor::new(&mut encoded),
            &data,
            frame.width,
            frame.height,
            image::ExtendedColorType::Rgb8,
            format.image_format(),
        )
        .with_context(|| format!("encode {} frame", format.ext()))?;
    }

    std::fs::write(path, &encoded)
        .with_context(|| format!("write post to '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
