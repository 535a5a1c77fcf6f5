use std::fmt;

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde_json::Value;
use tracing::{debug, warn};

use crate::character::error::CardError;
use crate::character::png_text::TextChunk;

/// Forgiving Base64, the way browsers' `atob` reads card payloads: padding
/// is optional and stray trailing bits are ignored.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// `tEXt` keywords that carry a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKeyword {
    Chara,
    Ccv3,
}

impl CardKeyword {
    pub fn as_str(self) -> &'static str {
        match self {
            CardKeyword::Chara => "chara",
            CardKeyword::Ccv3 => "ccv3",
        }
    }

    /// Match a chunk keyword, ignoring ASCII case.
    pub fn recognize(keyword: &str) -> Option<Self> {
        [CardKeyword::Chara, CardKeyword::Ccv3]
            .into_iter()
            .find(|candidate| keyword.eq_ignore_ascii_case(candidate.as_str()))
    }
}

impl fmt::Display for CardKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The decoded JSON of the first card chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedCard {
    pub keyword: CardKeyword,
    pub payload: Value,
}

/// Find the first chunk with a card keyword and decode it.
///
/// Only the first match is ever decoded. If it is corrupt the search stops
/// there rather than falling through to a later chunk.
pub fn locate_card<'a, I>(chunks: I) -> Result<LocatedCard, CardError>
where
    I: IntoIterator<Item = &'a TextChunk>,
{
    for chunk in chunks {
        let Some(keyword) = CardKeyword::recognize(&chunk.keyword) else {
            continue;
        };
        debug!(
            keyword = %keyword,
            chunk_keyword = %chunk.keyword,
            length = chunk.text.len(),
            "found character card chunk"
        );
        let payload = decode_payload(&chunk.text).map_err(|reason| {
            warn!(keyword = %chunk.keyword, %reason, "card chunk could not be decoded");
            CardError::CorruptCardPayload {
                keyword: chunk.keyword.clone(),
                reason,
            }
        })?;
        return Ok(LocatedCard { keyword, payload });
    }

    Err(CardError::NoCardFound)
}

/// Base64 → UTF-8 → JSON object.
pub fn decode_payload(text: &str) -> Result<Value, String> {
    let compact: Vec<u8> = text
        .bytes()
        .filter(|&b| !matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C'))
        .collect();
    let decoded = PAYLOAD_ENGINE
        .decode(&compact)
        .map_err(|e| format!("Base64 decode failed: {}", e))?;
    let json_str =
        String::from_utf8(decoded).map_err(|e| format!("UTF-8 decode failed: {}", e))?;
    let payload: Value =
        serde_json::from_str(&json_str).map_err(|e| format!("invalid JSON: {}", e))?;
    if !payload.is_object() {
        return Err("card JSON is not an object".to_string());
    }
    Ok(payload)
}
