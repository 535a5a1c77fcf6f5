// Integration tests for character card workflows
// These tests drive PNG bytes through the whole import pipeline

#[cfg(test)]
mod integration_tests {

    use crate::character::card::CharacterCard;
    use crate::character::error::CardError;
    use crate::character::import::parse_character_card;
    use crate::character::png_text::PngTextError;
    use crate::character::sanitize::sanitize;
    use crate::character::test_helpers::helpers::{create_test_character, PngBuilder};
    use serde_json::json;

    #[test]
    fn test_chara_before_ccv3_wins() {
        let png = PngBuilder::new()
            .card("chara", &json!({ "name": "Legacy Aria", "first_mes": "Hello" }))
            .card(
                "ccv3",
                &json!({
                    "spec": "chara_card_v3",
                    "spec_version": "3.0",
                    "data": { "name": "Modern Aria", "first_mes": "Greetings" }
                }),
            )
            .build();

        let parsed = parse_character_card(&png).unwrap();
        assert_eq!(parsed.card.data.name, "Legacy Aria");
        assert_eq!(parsed.card.data.first_mes, "Hello");
    }

    #[test]
    fn test_ccv3_before_chara_wins() {
        let png = PngBuilder::new()
            .card(
                "CCV3",
                &json!({ "spec": "chara_card_v3", "data": { "name": "Modern Aria" } }),
            )
            .card("chara", &json!({ "name": "Legacy Aria" }))
            .build();

        let parsed = parse_character_card(&png).unwrap();
        assert_eq!(parsed.card.data.name, "Modern Aria");
    }

    #[test]
    fn test_v3_card_round_trip_through_png() {
        let png = PngBuilder::new()
            .text("Software", b"paint")
            .card(
                "ccv3",
                &json!({
                    "spec": "chara_card_v3",
                    "spec_version": "3.0",
                    "data": {
                        "name": "Nova",
                        "description": "Cafe\u{301} \u{2014} \u{201C}nice\u{201D}\u{2026} \u{1F600}",
                        "personality": "Curious",
                        "first_mes": "\u{2018}Hello\u{2019}",
                        "mes_example": "<START>\n{{user}}: Hi\n{{char}}: Hey",
                        "alternate_greetings": ["Yo \u{1F44B}"],
                        "tags": ["sci-fi", "robot"],
                        "creator": "someone",
                        "extensions": { "talkativeness": "0.5" }
                    }
                }),
            )
            .build();

        let card = parse_character_card(&png).unwrap().card;
        assert_eq!(card.spec, "chara_card_v2");
        assert_eq!(card.spec_version, "2.0");
        assert_eq!(card.data.description, "Cafe - \"nice\"...");
        assert_eq!(card.data.first_mes, "'Hello'");
        assert_eq!(card.data.mes_example, "<START>\n{{user}}: Hi\n{{char}}: Hey");
        assert_eq!(card.data.alternate_greetings, vec!["Yo \u{1F44B}"]);
        assert_eq!(card.data.tags, vec!["sci-fi", "robot"]);
        assert_eq!(card.data.extensions["talkativeness"], json!("0.5"));
        assert_eq!(card.data.scenario, "");
    }

    #[test]
    fn test_stored_canonical_card_reimports_unchanged() {
        let stored = create_test_character("Picard", "Make it so.");
        let payload = serde_json::to_value(&stored).unwrap();
        let png = PngBuilder::new().card("chara", &payload).build();

        let reimported = parse_character_card(&png).unwrap().card;
        assert_eq!(reimported, stored);
    }

    #[test]
    fn test_every_prose_field_is_sanitized() {
        let dirty = "\u{FEFF} \u{1F600}\u{201C}x\u{201D}\u{0}\u{2026} ";
        let png = PngBuilder::new()
            .card(
                "chara",
                &json!({
                    "spec": "chara_card_v2",
                    "data": {
                        "name": dirty,
                        "description": dirty,
                        "personality": dirty,
                        "scenario": dirty,
                        "first_mes": dirty,
                        "mes_example": dirty,
                        "creator_notes": dirty,
                        "system_prompt": dirty,
                        "post_history_instructions": dirty,
                        "creator": dirty,
                        "character_version": dirty
                    }
                }),
            )
            .build();

        let data = parse_character_card(&png).unwrap().card.data;
        let expected = sanitize(dirty);
        assert_eq!(expected, "\"x\"...");
        for field in [
            &data.name,
            &data.description,
            &data.personality,
            &data.scenario,
            &data.first_mes,
            &data.mes_example,
            &data.creator_notes,
            &data.system_prompt,
            &data.post_history_instructions,
            &data.creator,
            &data.character_version,
        ] {
            assert_eq!(field, &expected);
        }
    }

    fn expect_failure(png: &[u8]) -> CardError {
        match parse_character_card(png) {
            Err(error) => error,
            Ok(parsed) => panic!("expected failure, got {:?}", parsed.card),
        }
    }

    #[test]
    fn test_failures_never_yield_partial_cards() {
        assert!(matches!(
            expect_failure(b"GIF89a"),
            CardError::MalformedImage(PngTextError::InvalidSignature)
        ));
        assert!(matches!(
            expect_failure(&PngBuilder::new().build()),
            CardError::NoCardFound
        ));
        assert!(matches!(
            expect_failure(&PngBuilder::new().text("chara", b"%%%").build()),
            CardError::CorruptCardPayload { .. }
        ));
        assert!(matches!(
            expect_failure(
                &PngBuilder::new()
                    .card("chara", &json!({ "spec": "chara_card_v4" }))
                    .build()
            ),
            CardError::UnsupportedSpecVersion(_)
        ));
        assert!(matches!(
            expect_failure(
                &PngBuilder::new()
                    .card("chara", &json!({ "name": "Aria" }))
                    .without_end()
                    .build()
            ),
            CardError::MalformedImage(PngTextError::MissingEnd)
        ));
    }

    #[test]
    fn test_system_prompt_from_imported_card() {
        let png = PngBuilder::new()
            .card(
                "chara",
                &json!({
                    "name": "Aria",
                    "description": "A bard \u{1F3B5}",
                    "creatorcomment": "Made for testing"
                }),
            )
            .build();

        let card: CharacterCard = parse_character_card(&png).unwrap().card;
        assert_eq!(
            card.build_system_prompt(),
            "Character: Aria\n\nDescription: A bard\n\nCreator notes: Made for testing"
        );
    }
}
