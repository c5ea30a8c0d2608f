use super::*;
use crate::{HeuristicTextMeasurer, TextMeasurer};

// An advance of exactly 0.5 em keeps widths exact in f32: at size 10 every
// character is 5px wide.
const SIZE: f32 = 10.0;
const FONT: &str = "fonts/sans.ttf";

fn measurer() -> HeuristicTextMeasurer {
    HeuristicTextMeasurer { advance_em: 0.5 }
}

#[test]
fn character_mode_breaks_between_any_characters() {
    let mut m = measurer();
    let out = wrap(&mut m, FONT, SIZE, "abcdefghijkl", 30.0, WrapMode::Character).unwrap();
    assert_eq!(out, "abcdef\nghijkl");
}

#[test]
fn word_mode_breaks_between_words_only() {
    let mut m = measurer();
    let out = wrap(&mut m, FONT, SIZE, "the quick brown fox", 60.0, WrapMode::Word).unwrap();
    assert_eq!(out, "the quick\nbrown fox");
}

#[test]
fn word_mode_preserves_every_word_once_in_order() {
    let mut m = measurer();
    let input = "pack my box with five dozen liquor jugs and a zephyr";
    let out = wrap(&mut m, FONT, SIZE, input, 80.0, WrapMode::Word).unwrap();
    let original: Vec<&str> = input.split_whitespace().collect();
    let wrapped: Vec<&str> = out.split_whitespace().collect();
    assert_eq!(original, wrapped);
}

#[test]
fn no_line_measures_wider_than_max_width() {
    let mut m = measurer();
    for max_width in [40.0f32, 60.0, 100.0, 240.0] {
        for mode in [WrapMode::Character, WrapMode::Word] {
            let out = wrap(
                &mut m,
                FONT,
                SIZE,
                "a few reasonably sized words to break across lines",
                max_width,
                mode,
            )
            .unwrap();
            for line in out.split('\n') {
                let width = m.measure(FONT, SIZE, line).unwrap().width;
                let single_token = !line.trim().contains(' ');
                assert!(
                    width <= max_width || single_token,
                    "line '{line}' measures {width} > {max_width}"
                );
            }
        }
    }
}

#[test]
fn oversized_word_is_emitted_unsplit() {
    let mut m = measurer();
    let out = wrap(
        &mut m,
        FONT,
        SIZE,
        "an extraordinarily big word",
        60.0,
        WrapMode::Word,
    )
    .unwrap();
    // 15 chars measure 75 > 60, but the token is never split.
    assert!(out.split('\n').any(|line| line == "extraordinarily"));
}

#[test]
fn existing_newlines_and_empty_lines_survive() {
    let mut m = measurer();
    let out = wrap(&mut m, FONT, SIZE, "ab\n\ncd", 60.0, WrapMode::Word).unwrap();
    assert_eq!(out, "ab\n\ncd");

    let out = wrap(&mut m, FONT, SIZE, "ab\n\ncd", 60.0, WrapMode::Character).unwrap();
    assert_eq!(out, "ab\n\ncd");
}

#[test]
fn truncate_keeps_the_longest_fitting_prefix() {
    let mut m = measurer();
    let out = truncate_to_width(&mut m, FONT, SIZE, "abcdefgh", 30.0).unwrap();
    assert_eq!(out, "abcdef");

    // Even the first character overflows: truncation clips to nothing.
    let out = truncate_to_width(&mut m, FONT, SIZE, "abc", 3.0).unwrap();
    assert_eq!(out, "");

    // Applied per existing line.
    let out = truncate_to_width(&mut m, FONT, SIZE, "abcdefgh\nxy", 30.0).unwrap();
    assert_eq!(out, "abcdef\nxy");
}

#[test]
fn content_within_width_is_untouched() {
    let mut m = measurer();
    let out = wrap(&mut m, FONT, SIZE, "short", 600.0, WrapMode::Word).unwrap();
    assert_eq!(out, "short");
    let out = truncate_to_width(&mut m, FONT, SIZE, "short", 600.0).unwrap();
    assert_eq!(out, "short");
}
