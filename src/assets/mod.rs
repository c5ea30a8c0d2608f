//! Gallery probing and raster/vector decoding.

/// Image and SVG decoding into premultiplied RGBA8.
pub mod decode;
/// Gallery extension probing and fill-mode dimension math.
pub mod gallery;
