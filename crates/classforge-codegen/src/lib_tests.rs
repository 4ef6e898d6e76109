#![allow(non_snake_case)]

use super::*;
use classforge_core::ForgeError;

#[test]
fn generate_source___scenario_a___two_typed_properties() {
    let code = generate_source(
        r#"{"user_name": "Ann", "age": 30}"#,
        &GenerationSettings::default(),
    )
    .unwrap();

    assert!(code.contains("[JsonPropertyName(\"user_name\")]\n        public string User_name { get; set; }"));
    assert!(code.contains("[JsonPropertyName(\"age\")]\n        public int Age { get; set; }"));
    assert_eq!(code.matches("public class ").count(), 1);
}

#[test]
fn generate_source___scenario_b___empty_array_is_object_array() {
    let code = generate_source(r#"{"tags": []}"#, &GenerationSettings::default()).unwrap();

    assert!(code.contains("public object[] Tags { get; set; }"));
    assert_eq!(code.matches("public class ").count(), 1);
}

#[test]
fn generate_source___scenario_c___element_class_after_root() {
    let code = generate_source(r#"{"items": [{"id": 1}]}"#, &GenerationSettings::default()).unwrap();

    let root_at = code.find("public class Root").unwrap();
    let item_at = code.find("public class Item").unwrap();
    assert!(root_at < item_at);
    assert!(code.contains("public Item[] Items { get; set; }"));
    assert!(code.contains("public int Id { get; set; }"));
}

#[test]
fn generate_source___scenario_d___invalid_json_rejected() {
    let result = generate_source("{not json", &GenerationSettings::default());

    assert!(matches!(result, Err(ForgeError::InvalidInput(_))));
}

#[test]
fn generate_source___whitespace_input___rejected() {
    let result = generate_source("  \n ", &GenerationSettings::default());

    assert!(matches!(result, Err(ForgeError::InvalidInput(_))));
}

#[test]
fn generate_source___same_input___identical_output() {
    let json = r#"{"b": {"x": 1}, "a": [{"y": "2024-01-01T00:00:00Z"}], "c": null}"#;
    let settings = GenerationSettings::default();

    let first = generate_source(json, &settings).unwrap();
    let second = generate_source(json, &settings).unwrap();

    assert_eq!(first, second);
}

#[test]
fn generate_source___property_order_mirrors_document() {
    let code = generate_source(r#"{"zeta": 1, "alpha": 2}"#, &GenerationSettings::default()).unwrap();

    assert!(code.find("Zeta").unwrap() < code.find("Alpha").unwrap());
}

#[test]
fn generate_source___sanitized_key___annotation_keeps_original() {
    let code = generate_source(r#"{"2nd place": true}"#, &GenerationSettings::default()).unwrap();

    assert!(code.contains("[JsonPropertyName(\"2nd place\")]\n        public bool Prop_2nd_place { get; set; }"));
}
