//! Converts the decoded JSON of any supported card generation into the
//! canonical v2 [`CharacterCard`].
//!
//! Recognition and conversion are separate steps: [`SpecShape::recognize`]
//! decides which generation a payload is and lifts its fields into
//! [`RawFields`], then [`RawFields::fill_defaults`] applies every default and
//! sanitizes every prose field in one place.

use serde_json::{Map, Value};
use tracing::debug;

use crate::character::card::{CharacterCard, CharacterData};
use crate::character::error::CardError;
use crate::character::sanitize::sanitize_text;

pub const SPEC_V2: &str = "chara_card_v2";
pub const SPEC_V3: &str = "chara_card_v3";

/// Card fields as found in the payload, before defaults.
///
/// Prose fields are only accepted as text; numbers and booleans are
/// stringified, anything else counts as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub personality: Option<String>,
    pub scenario: Option<String>,
    pub first_mes: Option<String>,
    pub mes_example: Option<String>,
    pub creator_notes: Option<String>,
    pub system_prompt: Option<String>,
    pub post_history_instructions: Option<String>,
    pub creator: Option<String>,
    pub character_version: Option<String>,
    pub alternate_greetings: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub character_book: Option<Value>,
    pub extensions: Option<Map<String, Value>>,
}

/// The card generations this crate accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecShape {
    /// Flat object, no `spec`. `creatorcomment` already folded into
    /// `creator_notes`.
    V1(RawFields),
    /// `spec` absent or `chara_card_v2`, fields under `data`.
    V2(RawFields),
    /// `spec == "chara_card_v3"`, fields under `data`.
    V3(RawFields),
}

impl SpecShape {
    /// Classify a decoded card payload.
    pub fn recognize(payload: &Value) -> Result<Self, CardError> {
        let empty = Map::new();
        let root = payload.as_object().unwrap_or(&empty);

        match root.get("spec") {
            Some(Value::String(spec)) if spec == SPEC_V3 => {
                let data = root.get("data").and_then(Value::as_object).unwrap_or(&empty);
                Ok(SpecShape::V3(RawFields::from_object(data)))
            }
            None | Some(Value::Null) => Ok(Self::v1_or_v2(root)),
            Some(Value::String(spec)) if spec.is_empty() || spec == SPEC_V2 => {
                Ok(Self::v1_or_v2(root))
            }
            Some(Value::String(spec)) => Err(CardError::UnsupportedSpecVersion(spec.clone())),
            Some(other) => Err(CardError::UnsupportedSpecVersion(other.to_string())),
        }
    }

    fn v1_or_v2(root: &Map<String, Value>) -> Self {
        match root.get("data").and_then(Value::as_object) {
            Some(data) => SpecShape::V2(RawFields::from_object(data)),
            None => {
                let mut fields = RawFields::from_object(root);
                let has_notes = fields
                    .creator_notes
                    .as_deref()
                    .is_some_and(|notes| !notes.is_empty());
                if !has_notes {
                    if let Some(comment) = text_field(root, "creatorcomment") {
                        fields.creator_notes = Some(comment);
                    }
                }
                SpecShape::V1(fields)
            }
        }
    }

    pub fn version_label(&self) -> &'static str {
        match self {
            SpecShape::V1(_) => "v1",
            SpecShape::V2(_) => "v2",
            SpecShape::V3(_) => "v3",
        }
    }

    pub fn into_fields(self) -> RawFields {
        match self {
            SpecShape::V1(fields) | SpecShape::V2(fields) | SpecShape::V3(fields) => fields,
        }
    }
}

impl RawFields {
    pub fn from_object(object: &Map<String, Value>) -> Self {
        RawFields {
            name: text_field(object, "name"),
            description: text_field(object, "description"),
            personality: text_field(object, "personality"),
            scenario: text_field(object, "scenario"),
            first_mes: text_field(object, "first_mes"),
            mes_example: text_field(object, "mes_example"),
            creator_notes: text_field(object, "creator_notes"),
            system_prompt: text_field(object, "system_prompt"),
            post_history_instructions: text_field(object, "post_history_instructions"),
            creator: text_field(object, "creator"),
            character_version: text_field(object, "character_version"),
            alternate_greetings: string_list(object, "alternate_greetings"),
            tags: string_list(object, "tags"),
            character_book: object
                .get("character_book")
                .filter(|book| !book.is_null())
                .cloned(),
            extensions: object
                .get("extensions")
                .and_then(Value::as_object)
                .cloned(),
        }
    }

    /// Apply defaults and sanitize prose. Greetings, tags, the lorebook and
    /// extensions are copied as they are.
    pub fn fill_defaults(self) -> CharacterData {
        let prose = |field: Option<String>| sanitize_text(field.as_deref());

        CharacterData {
            name: prose(self.name),
            description: prose(self.description),
            personality: prose(self.personality),
            scenario: prose(self.scenario),
            first_mes: prose(self.first_mes),
            mes_example: prose(self.mes_example),
            creator_notes: prose(self.creator_notes),
            system_prompt: prose(self.system_prompt),
            post_history_instructions: prose(self.post_history_instructions),
            alternate_greetings: self.alternate_greetings.unwrap_or_default(),
            character_book: self.character_book,
            tags: self.tags.unwrap_or_default(),
            creator: prose(self.creator),
            character_version: prose(self.character_version),
            extensions: self.extensions.unwrap_or_default(),
        }
    }
}

/// Normalize and sanitize a decoded card payload.
pub fn normalize_card(payload: &Value) -> Result<CharacterCard, CardError> {
    let shape = SpecShape::recognize(payload)?;
    debug!(version = shape.version_label(), "normalizing character card");
    Ok(CharacterCard::new(shape.into_fields().fill_defaults()))
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn string_list(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = object.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect(),
    )
}
