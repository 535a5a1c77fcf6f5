use std::error::Error;

use serde::Serialize;

use crate::character::card::CharacterCard;
use crate::character::import::parse_character_card;

#[derive(Serialize)]
struct InspectOutput<'a> {
    card: &'a CharacterCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<&'a str>,
}

/// Render the imported card as JSON, optionally with its avatar data URI.
pub fn render_inspect(image: &[u8], avatar: bool, pretty: bool) -> Result<String, Box<dyn Error>> {
    let parsed = parse_character_card(image)?;
    let output = InspectOutput {
        card: &parsed.card,
        avatar: avatar.then_some(parsed.avatar.as_str()),
    };

    let json = if pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    Ok(json)
}
