#![allow(non_snake_case)]

use super::*;

#[test]
fn GenerationSettings___default___documented_defaults() {
    let settings = GenerationSettings::default();

    assert_eq!(settings.target_runtime, TargetRuntime::NetStandard21);
    assert_eq!(settings.json_library, JsonLibrary::SystemTextJson);
    assert_eq!(settings.namespace, "RpaJsonModels");
    assert_eq!(settings.root_class_name, "Root");
    assert!(settings.use_naming_convention);
    assert!(settings.use_accessor_style);
    assert!(!settings.generate_default_constructor);
    assert!(settings.generate_serialization_annotations);
    assert!(!settings.generate_documentation);
    assert!(settings.optimize_output);
}

#[test]
fn GenerationSettings___from_json___empty_returns_default() {
    let settings = GenerationSettings::from_json(b"").unwrap();

    assert_eq!(settings, GenerationSettings::default());
}

#[test]
fn GenerationSettings___from_json___partial_keeps_defaults() {
    let settings =
        GenerationSettings::from_json(br#"{"namespace": "Acme.Models", "optimize_output": false}"#)
            .unwrap();

    assert_eq!(settings.namespace, "Acme.Models");
    assert!(!settings.optimize_output);
    assert_eq!(settings.root_class_name, "Root");
}

#[test]
fn GenerationSettings___from_json___invalid_returns_invalid_input() {
    let result = GenerationSettings::from_json(b"{ nope }");

    assert!(matches!(result, Err(ForgeError::InvalidInput(_))));
}

#[test]
fn GenerationSettings___from_toml___reads_enums_by_name() {
    let settings = GenerationSettings::from_toml(
        r#"
            target_runtime = "net48"
            json_library = "Newtonsoft.Json"
            root_class_name = "Invoice"
        "#,
    )
    .unwrap();

    assert_eq!(settings.target_runtime, TargetRuntime::NetFramework48);
    assert_eq!(settings.json_library, JsonLibrary::NewtonsoftJson);
    assert_eq!(settings.root_class_name, "Invoice");
}

#[test]
fn GenerationSettings___toml_roundtrip___preserves_data() {
    let settings = GenerationSettings::default()
        .with_target_runtime(TargetRuntime::Net80)
        .with_json_library(JsonLibrary::NewtonsoftJson)
        .with_namespace("Acme")
        .with_root_class_name("Order");

    let toml = settings.to_toml().unwrap();
    let parsed = GenerationSettings::from_toml(&toml).unwrap();

    assert_eq!(parsed, settings);
}

#[test]
fn TargetRuntime___requires_system_install___only_netfx() {
    let requiring: Vec<_> = TargetRuntime::ALL
        .into_iter()
        .filter(TargetRuntime::requires_system_install)
        .collect();

    assert_eq!(requiring, vec![TargetRuntime::NetFramework48]);
}

#[test]
fn JsonLibrary___property_attribute___differs_per_library() {
    assert_eq!(JsonLibrary::NewtonsoftJson.property_attribute(), "JsonProperty");
    assert_eq!(JsonLibrary::SystemTextJson.property_attribute(), "JsonPropertyName");
}
