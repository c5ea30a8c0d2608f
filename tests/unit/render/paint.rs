use super::*;
use crate::{
    Anchor, FIT_LOWER_TOLERANCE, HAlign, HeuristicTextMeasurer, Point, TextFillMode, TextPin,
};

// An advance of exactly 0.5 em keeps widths exact in f32: at size 10 every
// character is 5px wide.
fn measurer() -> HeuristicTextMeasurer {
    HeuristicTextMeasurer { advance_em: 0.5 }
}

fn pin(fill_mode: TextFillMode, font_size: f32, max_width: f32) -> TextPin {
    TextPin {
        title: "Response".to_string(),
        column: Some("Response".to_string()),
        default: None,
        pos: Point::new(0.0, 0.0),
        anchor: Anchor::TopLeft,
        font: "fonts/sans.ttf".to_string(),
        font_size,
        color: [255, 255, 255, 255],
        max_width,
        fill_mode,
        align: HAlign::Left,
    }
}

#[test]
fn shrink_fits_overflowing_content_into_the_band() {
    let mut m = measurer();
    // 12 chars at size 20 measure 120, over the 100px budget.
    let pin = pin(TextFillMode::Shrink, 20.0, 100.0);
    let (size, text) = resolve_text_layout(&mut m, &pin, "abcdefghijkl").unwrap();
    assert_eq!(text, "abcdefghijkl");
    assert!(size < 20.0);

    let width = m.measure(&pin.font, size, &text).unwrap().width;
    assert!(width >= 100.0 * FIT_LOWER_TOLERANCE && width <= 100.0);
}

#[test]
fn shrink_leaves_fitting_content_at_nominal_size() {
    let mut m = measurer();
    // 5 chars at size 20 measure 50, well inside the budget.
    let pin = pin(TextFillMode::Shrink, 20.0, 100.0);
    let (size, text) = resolve_text_layout(&mut m, &pin, "abcde").unwrap();
    assert_eq!((size, text.as_str()), (20.0, "abcde"));
}

#[test]
fn fill_always_fits_even_when_growing() {
    let mut m = measurer();
    let pin = pin(TextFillMode::Fill, 20.0, 100.0);
    let (size, _) = resolve_text_layout(&mut m, &pin, "abcde").unwrap();
    assert!(size > 20.0);

    let width = m.measure(&pin.font, size, "abcde").unwrap().width;
    assert!(width >= 100.0 * FIT_LOWER_TOLERANCE && width <= 100.0);
}

#[test]
fn wrap_modes_break_at_nominal_size() {
    let mut m = measurer();
    let pin1 = pin(TextFillMode::WordWrap, 10.0, 60.0);
    let (size, text) = resolve_text_layout(&mut m, &pin1, "the quick brown fox").unwrap();
    assert_eq!(size, 10.0);
    assert_eq!(text, "the quick\nbrown fox");

    let pin = pin(TextFillMode::Wrap, 10.0, 30.0);
    let (size, text) = resolve_text_layout(&mut m, &pin, "abcdefghijkl").unwrap();
    assert_eq!(size, 10.0);
    assert_eq!(text, "abcdef\nghijkl");
}

// `cut` semantics are pinned down here pending product clarification:
// unmodified size, truncation at the max_width boundary.
#[test]
fn cut_truncates_at_the_width_boundary() {
    let mut m = measurer();
    let pin = pin(TextFillMode::Cut, 10.0, 30.0);
    let (size, text) = resolve_text_layout(&mut m, &pin, "abcdefghijkl").unwrap();
    assert_eq!((size, text.as_str()), (10.0, "abcdef"));
}

#[test]
fn fixed_renders_unmodified_regardless_of_width() {
    let mut m = measurer();
    let pin = pin(TextFillMode::Fixed, 20.0, 30.0);
    let (size, text) = resolve_text_layout(&mut m, &pin, "far too wide for the box").unwrap();
    assert_eq!((size, text.as_str()), (20.0, "far too wide for the box"));
}
