#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("CS0246", true)]
#[test_case("CS0234", true)]
#[test_case("CS0012", true)]
#[test_case("CS1002", false)]
#[test_case("CS0102", false)]
fn Diagnostic___code___classifies_missing_reference(code: &str, expected: bool) {
    let diagnostic = Diagnostic::error(code, "message", 1);

    assert_eq!(diagnostic.is_missing_reference(), expected);
}

#[test]
fn Diagnostic___error___is_failure() {
    assert!(Diagnostic::error("CS1002", "; expected", 1).is_failure());
}

#[test]
fn Diagnostic___warning___is_not_failure() {
    assert!(!Diagnostic::warning("CS0105", "duplicate using", 1).is_failure());
}

#[test]
fn Diagnostic___warning_as_error___is_failure() {
    let mut diagnostic = Diagnostic::warning("CS0105", "duplicate using", 1);
    diagnostic.warning_as_error = true;

    assert!(diagnostic.is_failure());
}

#[test]
fn Diagnostic___display___includes_code_message_and_line() {
    let diagnostic = Diagnostic::error("CS1002", "; expected", 12);

    assert_eq!(diagnostic.to_string(), "[CS1002] ; expected (line 12)");
}

#[test]
fn Diagnostic___json_roundtrip___preserves_fields() {
    let diagnostic = Diagnostic::warning("CS0105", "duplicate using", 4);

    let json = serde_json::to_string(&diagnostic).unwrap();
    let parsed: Diagnostic = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed, diagnostic);
    assert!(json.contains("\"warning\""));
}
