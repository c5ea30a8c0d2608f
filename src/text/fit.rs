use crate::{
    foundation::error::{BulletinError, BulletinResult},
    text::measure::TextMeasurer,
};

/// Lower edge of the acceptance band, as a fraction of the target width.
///
/// The band is forgiving downward only: a fitted line may undershoot by up
/// to 5% but must never overshoot the target.
pub const FIT_LOWER_TOLERANCE: f32 = 0.95;

/// Iteration cap guarding against non-monotonic font metrics.
///
/// Integer-rounded glyph metrics can oscillate around the band instead of
/// converging; the cap turns that into [`BulletinError::FontFitDivergence`]
/// rather than a hang.
pub const FIT_MAX_ITERATIONS: u32 = 64;

/// Find the font size at which `text` measures within
/// `[0.95 * target_width, target_width]`.
///
/// Starts from `initial_size` and rescales proportionally each round:
/// `size *= 1 + (target - measured) / measured`. Empty (zero-width) text
/// short-circuits to `initial_size`.
pub fn fit_font_size(
    measurer: &mut dyn TextMeasurer,
    font: &str,
    text: &str,
    initial_size: f32,
    target_width: f32,
) -> BulletinResult<f32> {
    if !target_width.is_finite() || target_width <= 0.0 {
        return Err(BulletinError::validation(
            "fit target_width must be finite and > 0",
        ));
    }
    if !initial_size.is_finite() || initial_size <= 0.0 {
        return Err(BulletinError::validation(
            "fit initial_size must be finite and > 0",
        ));
    }

    let lower = target_width * FIT_LOWER_TOLERANCE;
    let mut size = initial_size;

    for iteration in 0..FIT_MAX_ITERATIONS {
        let measured = measurer.measure(font, size, text)?.width;
        if measured == 0.0 {
            return Ok(initial_size);
        }
        if measured >= lower && measured <= target_width {
            tracing::trace!(iteration, size, measured, "font fit converged");
            return Ok(size);
        }
        let proportion = (target_width - measured) / measured;
        size *= 1.0 + proportion;
        if !size.is_finite() || size <= 0.0 {
            break;
        }
    }

    Err(BulletinError::FontFitDivergence {
        target_width,
        iterations: FIT_MAX_ITERATIONS,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/text/fit.rs"]
mod tests;
