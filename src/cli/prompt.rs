use std::error::Error;

use crate::character::import::parse_character_card;

/// The system prompt for a card, followed by its greetings when asked.
pub fn render_prompt(image: &[u8], with_greetings: bool) -> Result<String, Box<dyn Error>> {
    let card = parse_character_card(image)?.card;
    let mut out = card.build_system_prompt();

    if with_greetings {
        for (index, greeting) in card.greetings().enumerate() {
            out.push_str(&format!("\n\n--- Greeting {} ---\n{}", index + 1, greeting));
        }
    }
    Ok(out)
}
