#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

const SAMPLE: &str = r#"{"user_name": "Ann", "age": 30}"#;

#[test]
fn CodeGenerationService___is_valid_json___delegates() {
    let service = CodeGenerationService::new();

    assert!(service.is_valid_json(SAMPLE));
    assert!(!service.is_valid_json("{not json"));
    assert!(!service.is_valid_json(""));
}

#[test]
fn CodeGenerationService___clone___shares_compiler_cache() {
    let temp_dir = TempDir::new().unwrap();
    let service = CodeGenerationService::new();
    let clone = service.clone();
    let settings = GenerationSettings::default();
    let source = service.generate_source(SAMPLE, &settings).unwrap();

    clone
        .compile(&source, temp_dir.path().join("Models.dll"), &settings)
        .unwrap();

    assert_eq!(service.backend().cache_stats().runtimes, 1);
}

#[tokio::test]
async fn CodeGenerationService___generate_source_async___same_as_sync() {
    let service = CodeGenerationService::new();
    let settings = GenerationSettings::default();

    let sync = service.generate_source(SAMPLE, &settings).unwrap();
    let async_result = service
        .generate_source_async(SAMPLE.to_string(), settings)
        .await
        .unwrap();

    assert_eq!(sync, async_result);
}

#[tokio::test]
async fn CodeGenerationService___generate_source_async___invalid_json_error() {
    let service = CodeGenerationService::new();

    let result = service
        .generate_source_async("{not json".to_string(), GenerationSettings::default())
        .await;

    assert!(matches!(result, Err(ForgeError::InvalidInput(_))));
}

#[tokio::test]
async fn CodeGenerationService___compile_async___writes_module() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("Models.dll");
    let service = CodeGenerationService::new();
    let settings = GenerationSettings::default();
    let source = service.generate_source(SAMPLE, &settings).unwrap();

    let written = service
        .compile_async(source, output.clone(), settings)
        .await
        .unwrap();

    assert_eq!(written, output);
    assert!(output.exists());
}

#[tokio::test]
async fn CodeGenerationService___validate_async___reports_failures() {
    let service = CodeGenerationService::new();
    let source = "namespace M\n{\n    public class Root\n    {\n        public Missing Value;\n    }\n}\n";

    let failures = service
        .validate_async(source.to_string(), GenerationSettings::default())
        .await
        .unwrap();

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].line, 5);
}
