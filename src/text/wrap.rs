use crate::{foundation::error::BulletinResult, text::measure::TextMeasurer};

/// Granularity of width-driven line breaking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    /// Break between any two characters.
    Character,
    /// Break only between whitespace-delimited words.
    Word,
}

/// Re-break `text` so that no line measures wider than `max_width`.
///
/// Existing newlines are respected and empty lines are preserved verbatim.
/// Tokens are accumulated greedily: a token that no longer fits flushes the
/// current line and opens the next one. A single token wider than
/// `max_width` is emitted on its own line rather than split (word mode);
/// character mode has no such exception since its tokens are single
/// characters.
pub fn wrap(
    measurer: &mut dyn TextMeasurer,
    font: &str,
    size_px: f32,
    text: &str,
    max_width: f32,
    mode: WrapMode,
) -> BulletinResult<String> {
    let mut out = Vec::<String>::new();
    for line in text.split('\n') {
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        match mode {
            WrapMode::Character => wrap_line_chars(measurer, font, size_px, line, max_width, &mut out)?,
            WrapMode::Word => wrap_line_words(measurer, font, size_px, line, max_width, &mut out)?,
        }
    }
    Ok(out.join("\n"))
}

/// Longest prefix of `text` that measures within `max_width`.
///
/// Applied per existing line; this is the engine behind the `cut` text fill
/// mode. The prefix may be empty when even the first character overflows.
pub fn truncate_to_width(
    measurer: &mut dyn TextMeasurer,
    font: &str,
    size_px: f32,
    text: &str,
    max_width: f32,
) -> BulletinResult<String> {
    let mut out = Vec::<String>::new();
    for line in text.split('\n') {
        let mut kept = String::new();
        for ch in line.chars() {
            let mut candidate = kept.clone();
            candidate.push(ch);
            if measurer.measure(font, size_px, &candidate)?.width > max_width {
                break;
            }
            kept = candidate;
        }
        out.push(kept);
    }
    Ok(out.join("\n"))
}

fn wrap_line_chars(
    measurer: &mut dyn TextMeasurer,
    font: &str,
    size_px: f32,
    line: &str,
    max_width: f32,
    out: &mut Vec<String>,
) -> BulletinResult<()> {
    let mut current = String::new();
    for ch in line.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);
        if current.is_empty() || measurer.measure(font, size_px, &candidate)?.width <= max_width {
            current = candidate;
        } else {
            out.push(current);
            current = ch.to_string();
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    Ok(())
}

fn wrap_line_words(
    measurer: &mut dyn TextMeasurer,
    font: &str,
    size_px: f32,
    line: &str,
    max_width: f32,
    out: &mut Vec<String>,
) -> BulletinResult<()> {
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if current.is_empty() || measurer.measure(font, size_px, &candidate)?.width <= max_width {
            current = candidate;
        } else {
            out.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
