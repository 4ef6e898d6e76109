//! Property-based tests for identifier sanitizing and source generation
//!
//! Keys are drawn from adversarial alphabets (punctuation, whitespace,
//! control characters, emoji, non-Latin digits) to check that every key
//! becomes a usable identifier and that generation is deterministic.

use classforge_codegen::csharp::string_literal;
use classforge_codegen::naming::{apply_naming_convention, is_identifier_char, sanitize};
use classforge_codegen::{JsonValue, generate_source, infer_classes};
use classforge_core::{GenerationSettings, is_identifier_start};
use proptest::prelude::*;

// Strategy: arbitrary keys, including the empty string
fn arb_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        ".*",
        "[ \t&;nbsp0-9٣½$@#-]{1,12}",
        "[a-zA-Z_][a-zA-Z0-9_]{0,15}",
        "[😀🚀é\u{7}\u{2028} ]{1,6}",
        "[ΐß½²①·\u{0301}a-z]{1,8}",
    ]
}

// Strategy: flat JSON objects with scalar values
fn arb_object() -> impl Strategy<Value = serde_json::Map<String, serde_json::Value>> {
    prop::collection::vec(
        (
            arb_key(),
            prop_oneof![
                Just(serde_json::Value::Null),
                any::<bool>().prop_map(serde_json::Value::Bool),
                any::<i32>().prop_map(|i| serde_json::Value::Number(i.into())),
                ".{0,10}".prop_map(serde_json::Value::String),
            ],
        ),
        0..8,
    )
    .prop_map(|pairs| pairs.into_iter().collect())
}

proptest! {
    /// Property: sanitized keys are non-empty, identifier-only, and start
    /// with an identifier-start character
    #[test]
    fn proptest_sanitize_yields_valid_identifier(key in arb_key()) {
        let name = sanitize(&key);

        prop_assert!(!name.is_empty());
        prop_assert!(name.chars().all(is_identifier_char), "{:?} -> {:?}", key, name);
        prop_assert!(name.chars().next().is_some_and(is_identifier_start), "{:?} -> {:?}", key, name);
    }

    /// Property: sanitizing is a pure function
    #[test]
    fn proptest_sanitize_is_deterministic(key in arb_key()) {
        prop_assert_eq!(sanitize(&key), sanitize(&key));
    }

    /// Property: the naming convention only touches the first character
    #[test]
    fn proptest_naming_convention_preserves_tail(key in "[a-z_][a-zA-Z0-9_]{0,20}") {
        let converted = apply_naming_convention(&key, true);

        prop_assert_eq!(&converted[1..], &key[1..]);
        prop_assert_eq!(apply_naming_convention(&key, false), key);
    }

    /// Property: emitted names are unique within a class and keys are kept
    #[test]
    fn proptest_inferred_properties_unique_and_faithful(object in arb_object()) {
        let document = JsonValue::from(serde_json::Value::Object(object.clone()));
        let tree = infer_classes(&document, &GenerationSettings::default());

        let mut seen = std::collections::HashSet::new();
        for property in &tree.root.properties {
            prop_assert!(seen.insert(property.emitted_name.clone()));
        }

        let keys: Vec<&String> = object.keys().collect();
        let originals: Vec<&String> = tree.root.properties.iter().map(|p| &p.original_key).collect();
        prop_assert_eq!(keys, originals);
    }

    /// Property: generation is deterministic and annotations carry original keys
    #[test]
    fn proptest_generate_source_idempotent_with_key_fidelity(object in arb_object()) {
        let json = serde_json::Value::Object(object.clone()).to_string();
        let settings = GenerationSettings::default();

        let first = generate_source(&json, &settings).unwrap();
        let second = generate_source(&json, &settings).unwrap();
        prop_assert_eq!(&first, &second);

        for key in object.keys() {
            let annotation = format!("[JsonPropertyName({})]", string_literal(key));
            prop_assert!(first.contains(&annotation), "missing {}", annotation);
        }
    }
}
