#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn kinds(source: &str) -> Vec<TokenKind> {
    let (tokens, diagnostics) = tokenize(source);
    assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    tokens.into_iter().map(|t| t.kind).collect()
}

fn ident(text: &str) -> TokenKind {
    TokenKind::Identifier {
        text: text.to_string(),
        verbatim: false,
    }
}

fn codes(source: &str) -> Vec<String> {
    tokenize(source).1.into_iter().map(|d| d.code).collect()
}

#[test]
fn tokenize___property_declaration___expected_tokens() {
    let tokens = kinds("public int Age { get; set; }");

    assert_eq!(
        tokens,
        vec![
            ident("public"),
            ident("int"),
            ident("Age"),
            TokenKind::Punct("{"),
            ident("get"),
            TokenKind::Punct(";"),
            ident("set"),
            TokenKind::Punct(";"),
            TokenKind::Punct("}"),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn tokenize___attribute_string___decoded_value() {
    let tokens = kinds(r#"[JsonPropertyName("say \"hi\"\n")]"#);

    assert_eq!(tokens[2], TokenKind::Punct("("));
    assert_eq!(tokens[3], TokenKind::StringLiteral("say \"hi\"\n".into()));
}

#[test]
fn tokenize___verbatim_identifier___flagged() {
    let tokens = kinds("public @class @int;");

    assert_eq!(
        tokens[1],
        TokenKind::Identifier {
            text: "class".into(),
            verbatim: true
        }
    );
}

#[test]
fn tokenize___verbatim_string___spans_lines_and_unescapes_quotes() {
    let (tokens, diagnostics) = tokenize("@\"a\n\"\"b\"\"\" x");

    assert!(diagnostics.is_empty());
    assert_eq!(tokens[0].kind, TokenKind::StringLiteral("a\n\"b\"".into()));
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn tokenize___comments_and_directives___skipped() {
    let tokens = kinds("// line\n#nullable enable\n/* block\n comment */ class /// doc\nX");

    assert_eq!(tokens, vec![ident("class"), ident("X"), TokenKind::Eof]);
}

#[test]
fn tokenize___tracks_lines() {
    let (tokens, _) = tokenize("a\n\nb\r\nc");

    let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 3, 4, 4]);
}

#[test_case("=>", "=>"; "arrow")]
#[test_case("::", "::"; "alias qualifier")]
#[test_case("??", "??"; "coalesce")]
#[test_case(">", ">"; "greater")]
#[test_case("!", "!"; "bang")]
fn tokenize___punctuation___longest_match(source: &str, expected: &'static str) {
    assert_eq!(kinds(source)[0], TokenKind::Punct(expected));
}

#[test]
fn tokenize___nested_generic_close___two_tokens() {
    let tokens = kinds("List<List<int>>");

    assert_eq!(tokens[5], TokenKind::Punct(">"));
    assert_eq!(tokens[6], TokenKind::Punct(">"));
}

#[test_case("1.5e-3", "1.5e-3"; "exponent")]
#[test_case("0x1F", "0x1F"; "hex")]
#[test_case("10m", "10m"; "decimal suffix")]
#[test_case("1_000", "1_000"; "separator")]
fn tokenize___numbers___single_literal(source: &str, expected: &str) {
    assert_eq!(kinds(source)[0], TokenKind::NumericLiteral(expected.into()));
}

#[test]
fn tokenize___unicode_identifier___accepted() {
    assert_eq!(kinds("Имя")[0], ident("Имя"));
}

#[test_case("\"open", "CS1010"; "unterminated string")]
#[test_case("/* open", "CS1035"; "unterminated comment")]
#[test_case("a ` b", "CS1056"; "unexpected character")]
#[test_case(r#""\q""#, "CS1009"; "bad escape")]
#[test_case("''", "CS1011"; "empty char")]
#[test_case("'ab'", "CS1012"; "long char")]
#[test_case("@\"open", "CS1039"; "unterminated verbatim")]
fn tokenize___lexical_errors___reported(source: &str, code: &str) {
    assert_eq!(codes(source), vec![code.to_string()]);
}

#[test]
fn tokenize___error_line___is_one_based() {
    let (_, diagnostics) = tokenize("ok\nok\n  \"broken");

    assert_eq!(diagnostics[0].line, 3);
}

#[test]
fn tokenize___combining_mark_inside_identifier___accepted() {
    assert_eq!(kinds("e\u{0301}tat")[0], ident("e\u{0301}tat"));
}

#[test_case("Prop_²nd", '²'; "superscript digit")]
#[test_case("half½", '½'; "vulgar fraction")]
#[test_case("a·b", '·'; "middle dot")]
fn tokenize___character_outside_identifier_alphabet___unexpected(source: &str, c: char) {
    let (_, diagnostics) = tokenize(source);

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, "CS1056");
    assert_eq!(diagnostics[0].message, format!("Unexpected character '{c}'"));
}

#[test]
fn tokenize___escaped_newline_in_string___later_lines_stay_accurate() {
    let (_, diagnostics) = tokenize("\"a\\\nb\"\n`");
    let lines: Vec<(&str, usize)> = diagnostics.iter().map(|d| (d.code.as_str(), d.line)).collect();

    assert_eq!(lines, vec![("CS1009", 1), ("CS1056", 3)]);
}
