//! The per-row paint pipeline: canvas, pin painting, and batch publishing.

/// Per-row canvas over the CPU rasterizer.
pub mod canvas;
/// Frame readback and output encoding.
pub mod frame;
/// Pin dispatch and the text/image paint pipelines.
pub mod paint;
/// Post/publish orchestration.
pub mod pipeline;
