use std::error::Error;
use std::fmt::Write;

use crate::character::locate::CardKeyword;
use crate::character::png_text::text_chunks;

/// List the `tEXt` chunks of a PNG, marking the one an import would use.
pub fn render_chunks(image: &[u8]) -> Result<String, Box<dyn Error>> {
    let mut out = String::new();
    let mut card_marked = false;
    let mut count = 0usize;

    for chunk in text_chunks(image)? {
        let chunk = chunk?;
        count += 1;
        let is_card = !card_marked && CardKeyword::recognize(&chunk.keyword).is_some();
        card_marked |= is_card;
        write!(out, "  • {} ({} bytes)", chunk.keyword, chunk.text.len())?;
        if is_card {
            out.push_str(" [card]");
        }
        out.push('\n');
    }

    if count == 0 {
        out.push_str("  No tEXt chunks found.\n");
    }
    Ok(out)
}
