pub mod card;
pub mod error;
pub mod import;
pub mod locate;
pub mod normalize;
pub mod png_text;
pub mod sanitize;

#[cfg(test)]
pub(crate) mod test_helpers;
#[cfg(test)]
mod tests_integration;

// Re-exports for internal module use
pub use card::{CharacterCard, CharacterData};
pub use error::CardError;
pub use import::{parse_character_card, ParsedCard};
pub use sanitize::sanitize;
