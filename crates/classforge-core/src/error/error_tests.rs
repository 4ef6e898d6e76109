#![allow(non_snake_case)]

use super::*;

#[test]
fn ForgeError___invalid_input___displays_correctly() {
    let err = ForgeError::InvalidInput("JSON cannot be empty".into());

    let display = err.to_string();

    assert_eq!(display, "invalid input: JSON cannot be empty");
}

#[test]
fn ForgeError___compilation___displays_report() {
    let err = ForgeError::Compilation {
        diagnostics: vec![Diagnostic::error("CS1002", "; expected", 3)],
        report: "Compilation errors:\n\nCS1002: ; expected (line 3)".into(),
    };

    assert!(err.to_string().starts_with("Compilation errors:"));
    assert_eq!(err.diagnostics().len(), 1);
}

#[test]
fn ForgeError___non_compilation___has_no_diagnostics() {
    let err = ForgeError::Environment("missing".into());

    assert!(err.diagnostics().is_empty());
}

#[test]
fn ForgeError___all_variants___have_unique_codes() {
    let errors = vec![
        ForgeError::InvalidInput("".into()),
        ForgeError::Environment("".into()),
        ForgeError::Compilation {
            diagnostics: Vec::new(),
            report: String::new(),
        },
        ForgeError::Reference {
            path: "".into(),
            message: "".into(),
        },
        ForgeError::Module("".into()),
        ForgeError::Io(std::io::Error::other("x")),
    ];

    let codes: Vec<u32> = errors.iter().map(|e| e.error_code()).collect();
    let unique: std::collections::HashSet<u32> = codes.iter().copied().collect();

    assert_eq!(
        codes.len(),
        unique.len(),
        "All error codes should be unique"
    );
}

#[test]
fn ForgeError___from_serde_error___converts_to_invalid_input() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();

    let forge_err: ForgeError = json_err.into();

    assert!(matches!(forge_err, ForgeError::InvalidInput(_)));
}

#[test]
fn ForgeError___from_io_error___converts() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");

    let forge_err: ForgeError = io_err.into();

    assert!(matches!(forge_err, ForgeError::Io(_)));
    assert!(forge_err.to_string().contains("I/O error"));
}
