use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CARD_SPEC: &str = "chara_card_v2";
pub const CARD_SPEC_VERSION: &str = "2.0";

/// Character card following the v2 specification.
///
/// Every imported card, whatever version it was stored as, ends up in this
/// shape with its prose fields already sanitized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterCard {
    pub spec: String,
    pub spec_version: String,
    pub data: CharacterData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CharacterData {
    pub name: String,
    pub description: String,
    pub personality: String,
    pub scenario: String,
    pub first_mes: String,
    pub mes_example: String,

    pub creator_notes: String,
    pub system_prompt: String,
    pub post_history_instructions: String,
    pub alternate_greetings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_book: Option<Value>,
    pub tags: Vec<String>,
    pub creator: String,
    pub character_version: String,
    pub extensions: Map<String, Value>,
}

impl CharacterCard {
    pub fn new(data: CharacterData) -> Self {
        Self {
            spec: CARD_SPEC.to_string(),
            spec_version: CARD_SPEC_VERSION.to_string(),
            data,
        }
    }

    /// Build the system prompt from character data.
    ///
    /// Sections are separated by a blank line; empty sections are left out,
    /// except the `Character:` line which is always present.
    pub fn build_system_prompt(&self) -> String {
        let data = &self.data;
        let mut parts: Vec<String> = Vec::new();

        if !data.system_prompt.is_empty() {
            parts.push(data.system_prompt.clone());
        }

        parts.push(format!("Character: {}", data.name));

        if !data.description.is_empty() {
            parts.push(format!("Description: {}", data.description));
        }
        if !data.personality.is_empty() {
            parts.push(format!("Personality: {}", data.personality));
        }
        if !data.scenario.is_empty() {
            parts.push(format!("Scenario: {}", data.scenario));
        }
        if !data.mes_example.is_empty() {
            parts.push(format!("Example dialogue:\n{}", data.mes_example));
        }
        if !data.post_history_instructions.is_empty() {
            parts.push(data.post_history_instructions.clone());
        }
        if !data.creator_notes.is_empty() {
            parts.push(format!("Creator notes: {}", data.creator_notes));
        }

        parts.join("\n\n")
    }

    /// Get the first greeting message
    pub fn get_greeting(&self) -> &str {
        &self.data.first_mes
    }

    /// The first greeting followed by the alternates, skipping empty ones.
    pub fn greetings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.data.first_mes.as_str())
            .chain(self.data.alternate_greetings.iter().map(String::as_str))
            .filter(|greeting| !greeting.is_empty())
    }

    /// Get post-history instructions if present
    pub fn get_post_history_instructions(&self) -> Option<&str> {
        Some(self.data.post_history_instructions.as_str()).filter(|text| !text.is_empty())
    }
}
