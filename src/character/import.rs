use base64::Engine;
use serde::Serialize;
use tracing::debug;

use crate::character::card::CharacterCard;
use crate::character::error::CardError;
use crate::character::locate::locate_card;
use crate::character::normalize::normalize_card;
use crate::character::png_text::{text_chunks, PngTextError, TextChunk};

const AVATAR_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// A character imported from a PNG: the canonical card plus the image it
/// came from, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCard {
    pub card: CharacterCard,
    /// `data:image/png;base64,...` of the original file.
    pub avatar: String,
}

impl ParsedCard {
    pub fn name(&self) -> &str {
        &self.card.data.name
    }

    /// The Base64 part of the avatar, without the data URI prefix.
    pub fn avatar_base64(&self) -> &str {
        self.avatar
            .strip_prefix(AVATAR_DATA_URI_PREFIX)
            .unwrap_or(&self.avatar)
    }
}

/// Import a character card from the bytes of a PNG file.
///
/// The whole chunk stream is validated before any card is looked for, so a
/// broken file is reported as such even when its card chunk comes first.
/// Nothing here performs I/O; callers read the file.
pub fn parse_character_card(image: &[u8]) -> Result<ParsedCard, CardError> {
    let chunks = text_chunks(image)?.collect::<Result<Vec<TextChunk>, PngTextError>>()?;
    debug!(
        bytes = image.len(),
        text_chunks = chunks.len(),
        "read PNG text chunks"
    );

    let located = locate_card(&chunks)?;
    let card = normalize_card(&located.payload)?;
    debug!(
        keyword = %located.keyword,
        name = %card.data.name,
        "imported character card"
    );

    Ok(ParsedCard {
        card,
        avatar: avatar_data_uri(image),
    })
}

/// Encode PNG bytes as a displayable data URI.
pub fn avatar_data_uri(image: &[u8]) -> String {
    let mut uri = String::with_capacity(AVATAR_DATA_URI_PREFIX.len() + image.len() * 4 / 3 + 4);
    uri.push_str(AVATAR_DATA_URI_PREFIX);
    base64::prelude::BASE64_STANDARD.encode_string(image, &mut uri);
    uri
}
