#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("", "EmptyProperty"; "empty")]
#[test_case("name", "name"; "plain")]
#[test_case("user name", "user_name"; "space")]
#[test_case("user \t\n name", "user_name"; "whitespace run")]
#[test_case("a&nbsp;b", "a_b"; "nbsp entity")]
#[test_case("a&nbsp; b", "a__b"; "nbsp then space")]
#[test_case("e-mail", "e_mail"; "hyphen")]
#[test_case("$ref", "_ref"; "dollar")]
#[test_case("@@", "__"; "pure punctuation")]
#[test_case("1st", "Prop_1st"; "leading digit")]
#[test_case("٣x", "Prop_٣x"; "leading arabic digit")]
#[test_case("héllo", "héllo"; "accented letter")]
#[test_case("a😀b", "a_b"; "emoji")]
#[test_case("a\u{0007}b", "a_b"; "control character")]
#[test_case("snake_case", "snake_case"; "underscore kept")]
#[test_case("²nd", "_nd"; "superscript digit")]
#[test_case("a½b", "a_b"; "vulgar fraction")]
#[test_case("①", "_"; "circled digit")]
#[test_case("a·b", "a_b"; "middle dot")]
#[test_case("\u{0301}x", "Prop_\u{0301}x"; "leading combining mark")]
#[test_case("ΐx", "ΐx"; "greek with dialytika")]
fn sanitize___maps_keys(raw: &str, expected: &str) {
    assert_eq!(sanitize(raw), expected);
}

#[test]
fn sanitize___whitespace_only___single_underscore() {
    assert_eq!(sanitize("   "), "_");
}

#[test_case("user", true, "User"; "enabled")]
#[test_case("user", false, "user"; "disabled")]
#[test_case("userName", true, "UserName"; "only first changes")]
#[test_case("USER", true, "USER"; "already upper")]
#[test_case("_id", true, "_id"; "underscore first")]
#[test_case("", true, ""; "empty")]
#[test_case("ßa", true, "ßa"; "sharp s has no single upper case")]
#[test_case("ΐx", true, "ΐx"; "multi character upper case kept")]
#[test_case("élan", true, "Élan"; "accented letter")]
fn apply_naming_convention___upper_cases_first_only(name: &str, enabled: bool, expected: &str) {
    assert_eq!(apply_naming_convention(name, enabled), expected);
}

#[test_case("items", "item"; "plural")]
#[test_case("Items", "Item"; "convention cased")]
#[test_case("data", "dataItem"; "no trailing s")]
#[test_case("Data", "DataItem"; "convention cased no s")]
#[test_case("s", "sItem"; "single s")]
#[test_case("address", "addres"; "naive strip")]
#[test_case("ITEMS", "ITEMSItem"; "upper s untouched")]
fn singularize___derives_element_name(name: &str, expected: &str) {
    assert_eq!(singularize(name), expected);
}

#[test_case("class", "@class"; "class keyword")]
#[test_case("int", "@int"; "int keyword")]
#[test_case("namespace", "@namespace"; "namespace keyword")]
#[test_case("Class", "Class"; "case sensitive")]
#[test_case("value", "value"; "contextual keyword")]
fn escape_keyword___prefixes_reserved_words(name: &str, expected: &str) {
    assert_eq!(escape_keyword(name), expected);
}

#[test]
fn is_identifier_char___accepts_letters_digits_underscore() {
    assert!(is_identifier_char('a'));
    assert!(is_identifier_char('Z'));
    assert!(is_identifier_char('7'));
    assert!(is_identifier_char('_'));
    assert!(!is_identifier_char('-'));
    assert!(!is_identifier_char(' '));
    assert!(!is_identifier_char('²'));
    assert!(!is_identifier_char('½'));
}
