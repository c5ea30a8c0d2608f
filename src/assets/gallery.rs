use std::path::Path;

use crate::{
    assets::decode::{RasterImage, decode_image, decode_svg},
    board::model::ImageFillMode,
    foundation::core::Dimensions,
    foundation::error::{BulletinError, BulletinResult},
};

/// Fixed ordered list of extensions probed for a gallery asset.
///
/// The first candidate that loads wins. The set is the decodable subset of
/// this crate's stack; vector candidates (`svg`) rasterize at native size.
pub const PROBE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "webp", "svg"];

/// Normalize and validate an assets-root-relative path.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> BulletinResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(BulletinError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(BulletinError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(BulletinError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(BulletinError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Resolve a logical image name inside a gallery directory.
///
/// Probes `{gallery}/{name}.{ext}` across [`PROBE_EXTENSIONS`] in order; a
/// candidate that exists but fails to decode is logged and skipped. Fails
/// with [`BulletinError::AssetNotFound`] when no candidate loads.
pub fn probe_gallery(root: &Path, gallery: &str, name: &str) -> BulletinResult<RasterImage> {
    for ext in PROBE_EXTENSIONS {
        let rel = normalize_rel_path(&format!("{gallery}/{name}.{ext}"))?;
        let path = root.join(Path::new(&rel));
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(_) => continue,
        };
        let decoded = if ext == "svg" {
            decode_svg(&bytes)
        } else {
            decode_image(&bytes)
        };
        match decoded {
            Ok(img) => {
                tracing::debug!(gallery, name, ext, "gallery asset resolved");
                return Ok(img);
            }
            Err(e) => {
                tracing::warn!(gallery, name, ext, error = %e, "gallery candidate failed to decode");
            }
        }
    }
    Err(BulletinError::AssetNotFound {
        gallery: gallery.to_string(),
        name: name.to_string(),
    })
}

/// Destination dimensions for a source image under a fill mode.
///
/// `Stretch` ignores aspect ratio; `Fit` scales by the axis needing more
/// shrinkage so neither target dimension is exceeded; `Fixed` keeps the
/// source size.
pub fn scaled_dimensions(
    source: Dimensions,
    target: Dimensions,
    mode: ImageFillMode,
) -> Dimensions {
    match mode {
        ImageFillMode::Stretch => target,
        ImageFillMode::Fixed => source,
        ImageFillMode::Fit => {
            let ratio_w = source.width as f64 / target.width as f64;
            let ratio_h = source.height as f64 / target.height as f64;
            let driving = ratio_w.max(ratio_h);
            Dimensions {
                width: ((source.width as f64 / driving).round() as u32).max(1),
                height: ((source.height as f64 / driving).round() as u32).max(1),
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/gallery.rs"]
mod tests;
