use super::*;
use crate::{HeuristicTextMeasurer, TextExtent, TextMeasurer};

// An advance of exactly 0.5 em keeps widths exact in f32: 10-char text
// measures 5 * size.
fn measurer() -> HeuristicTextMeasurer {
    HeuristicTextMeasurer { advance_em: 0.5 }
}

/// Width is independent of size: the proportional update can never land in
/// the band, so the resolver must hit its cap instead of spinning.
struct ConstantMeasurer(f32);

impl TextMeasurer for ConstantMeasurer {
    fn measure(
        &mut self,
        _font: &str,
        size_px: f32,
        _text: &str,
    ) -> crate::BulletinResult<TextExtent> {
        Ok(TextExtent {
            width: self.0,
            height: size_px,
        })
    }
}

#[test]
fn fit_lands_in_the_tolerance_band() {
    let mut m = measurer();
    let font = "fonts/sans.ttf";
    let text = "headline!!"; // 10 chars, width = 5 * size

    for (initial, target) in [(32.0f32, 100.0f32), (8.0, 300.0), (64.0, 450.0), (20.0, 90.0)] {
        let size = fit_font_size(&mut m, font, text, initial, target).unwrap();
        let width = m.measure(font, size, text).unwrap().width;
        assert!(
            width >= target * FIT_LOWER_TOLERANCE && width <= target,
            "width {width} outside [{}, {target}]",
            target * FIT_LOWER_TOLERANCE
        );
    }
}

#[test]
fn fit_keeps_a_size_already_in_band() {
    let mut m = measurer();
    // 10 chars at size 19.4 measure ~97, inside [95, 100].
    let size = fit_font_size(&mut m, "f", "abcdefghij", 19.4, 100.0).unwrap();
    assert_eq!(size, 19.4);
}

#[test]
fn empty_text_short_circuits_to_initial_size() {
    let mut m = measurer();
    let size = fit_font_size(&mut m, "f", "", 24.0, 100.0).unwrap();
    assert_eq!(size, 24.0);
}

#[test]
fn non_monotonic_metrics_fail_within_the_cap() {
    let mut m = ConstantMeasurer(50.0);
    let err = fit_font_size(&mut m, "f", "stuck", 24.0, 100.0).unwrap_err();
    assert!(matches!(
        err,
        crate::BulletinError::FontFitDivergence { iterations, .. } if iterations == FIT_MAX_ITERATIONS
    ));
}

#[test]
fn fit_rejects_degenerate_inputs() {
    let mut m = measurer();
    assert!(fit_font_size(&mut m, "f", "x", 24.0, 0.0).is_err());
    assert!(fit_font_size(&mut m, "f", "x", 0.0, 100.0).is_err());
    assert!(fit_font_size(&mut m, "f", "x", 24.0, f32::NAN).is_err());
}
