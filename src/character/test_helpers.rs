// Test helpers for character card testing
// Builds PNG files in memory so tests never depend on fixtures on disk

#[cfg(test)]
pub(crate) mod helpers {
    use base64::Engine;
    use crc32fast::Hasher;

    use crate::character::card::{CharacterCard, CharacterData};
    use crate::character::png_text::PNG_SIGNATURE;

    const TEST_IHDR: [u8; 13] = [
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00,
    ];

    const TEST_IDAT: [u8; 12] = [
        0x78, 0xDA, 0x63, 0x60, 0x60, 0x60, 0x00, 0x00, 0x00, 0x04, 0x00, 0x01,
    ];

    /// Assembles a 1x1 RGB PNG with extra chunks placed between IHDR and IDAT.
    pub struct PngBuilder {
        extra: Vec<Vec<u8>>,
        with_end: bool,
    }

    impl PngBuilder {
        pub fn new() -> Self {
            Self {
                extra: Vec::new(),
                with_end: true,
            }
        }

        pub fn text(mut self, keyword: &str, value: &[u8]) -> Self {
            let mut text_data = Vec::with_capacity(keyword.len() + 1 + value.len());
            text_data.extend_from_slice(keyword.as_bytes());
            text_data.push(0);
            text_data.extend_from_slice(value);
            self.extra.push(chunk(*b"tEXt", &text_data, true));
            self
        }

        /// Add a `tEXt` chunk holding Base64(JSON) of `card`.
        pub fn card(self, keyword: &str, card: &serde_json::Value) -> Self {
            let encoded = encode_card(card);
            self.text(keyword, encoded.as_bytes())
        }

        pub fn raw(mut self, framed_chunk: Vec<u8>) -> Self {
            self.extra.push(framed_chunk);
            self
        }

        pub fn without_end(mut self) -> Self {
            self.with_end = false;
            self
        }

        pub fn build(self) -> Vec<u8> {
            let mut png = Vec::new();
            png.extend_from_slice(&PNG_SIGNATURE);
            png.extend_from_slice(&chunk(*b"IHDR", &TEST_IHDR, true));
            for extra in &self.extra {
                png.extend_from_slice(extra);
            }
            png.extend_from_slice(&chunk(*b"IDAT", &TEST_IDAT, true));
            if self.with_end {
                png.extend_from_slice(&chunk(*b"IEND", &[], true));
            }
            png
        }
    }

    /// Frame one chunk, optionally with a deliberately wrong CRC.
    pub fn chunk(chunk_type: [u8; 4], data: &[u8], valid_crc: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + data.len());
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(&chunk_type);
        out.extend_from_slice(data);
        let mut hasher = Hasher::new();
        hasher.update(&chunk_type);
        hasher.update(data);
        let mut crc = hasher.finalize();
        if !valid_crc {
            crc ^= 0xFFFF_FFFF;
        }
        out.extend_from_slice(&crc.to_be_bytes());
        out
    }

    pub fn encode_card(card: &serde_json::Value) -> String {
        base64::prelude::BASE64_STANDARD.encode(card.to_string().as_bytes())
    }

    /// A fully populated canonical card for prompt and serialization tests.
    pub fn create_test_character(name: &str, greeting: &str) -> CharacterCard {
        CharacterCard::new(CharacterData {
            name: name.to_string(),
            description: format!("Test character {}", name),
            personality: "Friendly and helpful".to_string(),
            scenario: "Testing environment".to_string(),
            first_mes: greeting.to_string(),
            mes_example: "{{user}}: Hi\n{{char}}: Hello!".to_string(),
            system_prompt: format!("You are {}.", name),
            post_history_instructions: "Always be polite.".to_string(),
            ..CharacterData::default()
        })
    }
}
