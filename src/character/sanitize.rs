//! Reduces free-form creator text to the character set a plain text widget
//! can always render.
//!
//! Rules run per character in this order:
//! 1. control characters (C0 and C1) are dropped, except newline, carriage
//!    return and tab;
//! 2. U+FFFD, U+FFFE, U+FFFF and U+FEFF are dropped;
//! 3. emoji and pictographic symbols are dropped;
//! 4. smart quotes, en/em dashes and the ellipsis become ASCII;
//! 5. anything else outside printable ASCII is dropped.
//!
//! The result is trimmed. Accented letters are removed, not transliterated.

/// Emoji and pictograph blocks removed before the ASCII filter.
const PICTOGRAPH_RANGES: [(u32, u32); 9] = [
    (0x1F600, 0x1F64F), // emoticons
    (0x1F300, 0x1F5FF), // misc symbols and pictographs
    (0x1F680, 0x1F6FF), // transport and map
    (0x1F1E0, 0x1F1FF), // regional indicators
    (0x2600, 0x26FF),   // misc symbols
    (0x2700, 0x27BF),   // dingbats
    (0x1F900, 0x1F9FF), // supplemental symbols and pictographs
    (0x1FA00, 0x1FA6F), // chess symbols
    (0x1FA70, 0x1FAFF), // symbols and pictographs extended-A
];

/// Sanitize an optional field; absent input yields an empty string.
pub fn sanitize_text(text: Option<&str>) -> String {
    text.map(sanitize).unwrap_or_default()
}

pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if is_stripped_control(c) || is_noncharacter(c) || is_pictograph(c) {
            continue;
        }
        match ascii_punctuation(c) {
            Some(replacement) => out.push_str(replacement),
            None if is_renderable(c) => out.push(c),
            None => {}
        }
    }

    let trimmed = out.trim();
    if trimmed.len() == out.len() {
        out
    } else {
        trimmed.to_string()
    }
}

fn is_line_whitespace(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\t')
}

fn is_stripped_control(c: char) -> bool {
    let code = c as u32;
    let control = code <= 0x1F || (0x7F..=0x9F).contains(&code);
    control && !is_line_whitespace(c)
}

fn is_noncharacter(c: char) -> bool {
    matches!(c, '\u{FFFD}' | '\u{FFFE}' | '\u{FFFF}' | '\u{FEFF}')
}

fn is_pictograph(c: char) -> bool {
    let code = c as u32;
    PICTOGRAPH_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&code))
}

fn ascii_punctuation(c: char) -> Option<&'static str> {
    match c {
        '\u{2018}' | '\u{2019}' => Some("'"),
        '\u{201C}' | '\u{201D}' => Some("\""),
        '\u{2013}' | '\u{2014}' => Some("-"),
        '\u{2026}' => Some("..."),
        _ => None,
    }
}

fn is_renderable(c: char) -> bool {
    matches!(c, ' '..='~') || is_line_whitespace(c)
}
