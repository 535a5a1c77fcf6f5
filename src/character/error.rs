use std::error::Error as StdError;
use std::fmt;

use crate::character::png_text::PngTextError;

/// Every way importing a character card from a PNG can fail.
///
/// Each variant aborts the whole import; no partial card is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardError {
    /// The byte stream is not a PNG or its chunk framing is broken.
    MalformedImage(PngTextError),
    /// No `tEXt` chunk carries a recognized card keyword.
    NoCardFound,
    /// The matched chunk is not Base64-encoded JSON.
    CorruptCardPayload {
        /// Keyword of the chunk that matched.
        keyword: String,
        reason: String,
    },
    /// The decoded card declares a `spec` this crate does not understand.
    UnsupportedSpecVersion(String),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardError::MalformedImage(source) => {
                write!(f, "Invalid PNG: {}", source)
            }
            CardError::NoCardFound => {
                write!(f, "No character data found in PNG")
            }
            CardError::CorruptCardPayload { keyword, reason } => {
                write!(f, "Corrupt '{}' card payload: {}", keyword, reason)
            }
            CardError::UnsupportedSpecVersion(spec) => {
                write!(f, "Unsupported character card spec: {}", spec)
            }
        }
    }
}

impl StdError for CardError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CardError::MalformedImage(source) => Some(source),
            _ => None,
        }
    }
}

impl From<PngTextError> for CardError {
    fn from(source: PngTextError) -> Self {
        CardError::MalformedImage(source)
    }
}
