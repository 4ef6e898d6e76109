//! Tokenizer for C# data-class source.
//!
//! Comments, whitespace and preprocessor lines are dropped. Every token
//! records the 1-based line it starts on. Lexical errors are reported as
//! diagnostics and the lexer keeps going, so one pass yields every problem.

use classforge_core::{Diagnostic, is_identifier_part, is_identifier_start};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier or keyword. `verbatim` is set for `@name`.
    Identifier { text: String, verbatim: bool },
    /// Decoded value of a regular, verbatim or interpolated string
    StringLiteral(String),
    CharLiteral,
    NumericLiteral(String),
    /// Operators and punctuation, e.g. `{`, `=>`, `::`
    Punct(&'static str),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    /// Identifier text, whether verbatim or not.
    pub fn identifier(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Identifier { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Whether this is the non-verbatim identifier `word`.
    pub fn is_word(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier { text, verbatim: false } if text == word)
    }

    pub fn is_punct(&self, punct: &str) -> bool {
        matches!(self.kind, TokenKind::Punct(p) if p == punct)
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Identifier { text, verbatim } => {
                if *verbatim {
                    write!(f, "@{text}")
                } else {
                    f.write_str(text)
                }
            }
            TokenKind::StringLiteral(_) => f.write_str("string literal"),
            TokenKind::CharLiteral => f.write_str("character literal"),
            TokenKind::NumericLiteral(text) => f.write_str(text),
            TokenKind::Punct(p) => f.write_str(p),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}

/// Longest operators first so `=>` wins over `=`.
const PUNCTUATION: [&str; 46] = [
    "<<=", ">>=", "??=", "...", "=>", "::", "??", "?.", "==", "!=", "<=", ">=", "&&", "||",
    "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", "{", "}", "(", ")",
    "[", "]", ";", ",", ".", ":", "?", "=", "<", ">", "+", "-", "*", "/", "%", "&", "|",
];

const SINGLE_PUNCTUATION: [&str; 3] = ["!", "~", "^"];

/// Tokenize `source`. The last token is always [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<Diagnostic>) {
    let mut lexer = Lexer {
        chars: source.chars().collect(),
        pos: 0,
        line: 1,
        at_line_start: true,
        tokens: Vec::new(),
        diagnostics: Vec::new(),
    };
    lexer.run();
    (lexer.tokens, lexer.diagnostics)
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    at_line_start: bool,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl Lexer {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.at_line_start = true;
        }
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, line: usize) {
        self.tokens.push(Token { kind, line });
        self.at_line_start = false;
    }

    fn error(&mut self, code: &str, message: impl Into<String>, line: usize) {
        self.diagnostics.push(Diagnostic::error(code, message, line));
    }

    fn run(&mut self) {
        while let Some(c) = self.peek() {
            let line = self.line;

            if c.is_whitespace() {
                self.bump();
                continue;
            }

            if c == '#' && self.at_line_start {
                self.skip_line();
                continue;
            }

            if c == '/' && self.peek_at(1) == Some('/') {
                self.skip_line();
                continue;
            }

            if c == '/' && self.peek_at(1) == Some('*') {
                self.skip_block_comment(line);
                continue;
            }

            match c {
                '"' => {
                    self.bump();
                    let value = self.regular_string(line);
                    self.push(TokenKind::StringLiteral(value), line);
                }
                '\'' => {
                    self.bump();
                    self.char_literal(line);
                    self.push(TokenKind::CharLiteral, line);
                }
                '@' if self.peek_at(1) == Some('"') => {
                    self.pos += 2;
                    let value = self.verbatim_string(line);
                    self.push(TokenKind::StringLiteral(value), line);
                }
                '@' if self.peek_at(1) == Some('$') && self.peek_at(2) == Some('"') => {
                    self.pos += 3;
                    let value = self.verbatim_string(line);
                    self.push(TokenKind::StringLiteral(value), line);
                }
                '$' if self.peek_at(1) == Some('"') => {
                    self.pos += 2;
                    let value = self.regular_string(line);
                    self.push(TokenKind::StringLiteral(value), line);
                }
                '$' if self.peek_at(1) == Some('@') && self.peek_at(2) == Some('"') => {
                    self.pos += 3;
                    let value = self.verbatim_string(line);
                    self.push(TokenKind::StringLiteral(value), line);
                }
                '@' if self.peek_at(1).is_some_and(is_identifier_start) => {
                    self.bump();
                    let text = self.identifier();
                    self.push(TokenKind::Identifier { text, verbatim: true }, line);
                }
                c if is_identifier_start(c) => {
                    let text = self.identifier();
                    self.push(TokenKind::Identifier { text, verbatim: false }, line);
                }
                c if c.is_ascii_digit()
                    || (c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit())) =>
                {
                    let text = self.number();
                    self.push(TokenKind::NumericLiteral(text), line);
                }
                _ => self.punctuation(c, line),
            }
        }

        let line = self.line;
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            line,
        });
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self, line: usize) {
        self.pos += 2;
        loop {
            match self.peek() {
                None => {
                    self.error("CS1035", "End-of-file found, '*/' expected", line);
                    return;
                }
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.pos += 2;
                    return;
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if !is_identifier_part(c) {
                break;
            }
            text.push(c);
            self.pos += 1;
        }
        text
    }

    fn number(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-')
                && text.ends_with(['e', 'E'])
                && !text.starts_with("0x")
                && !text.starts_with("0X");
            let fraction = c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit());
            if !(c.is_ascii_alphanumeric() || c == '_' || fraction || exponent_sign) {
                break;
            }
            text.push(c);
            self.pos += 1;
        }
        text
    }

    fn regular_string(&mut self, line: usize) -> String {
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    self.error("CS1010", "Newline in constant", line);
                    return value;
                }
                Some('"') => {
                    self.pos += 1;
                    return value;
                }
                Some('\\') => {
                    self.pos += 1;
                    self.escape(&mut value, line);
                }
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn verbatim_string(&mut self, line: usize) -> String {
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    self.error("CS1039", "Unterminated string literal", line);
                    return value;
                }
                Some('"') if self.peek_at(1) == Some('"') => {
                    value.push('"');
                    self.pos += 2;
                }
                Some('"') => {
                    self.pos += 1;
                    return value;
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn char_literal(&mut self, line: usize) {
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') | Some('\r') => {
                    self.error("CS1010", "Newline in constant", line);
                    return;
                }
                Some('\'') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') => {
                    self.pos += 1;
                    self.escape(&mut value, line);
                }
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }

        match value.chars().count() {
            0 => self.error("CS1011", "Empty character literal", line),
            1 => {}
            _ => self.error("CS1012", "Too many characters in character literal", line),
        }
    }

    /// Decode one escape sequence; the backslash is already consumed.
    fn escape(&mut self, value: &mut String, line: usize) {
        let Some(c) = self.bump() else {
            return;
        };

        let decoded = match c {
            '\'' => Some('\''),
            '"' => Some('"'),
            '\\' => Some('\\'),
            '0' => Some('\0'),
            'a' => Some('\u{7}'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\u{b}'),
            'u' => self.hex_escape(4, 4),
            'U' => self.hex_escape(8, 8),
            'x' => self.hex_escape(1, 4),
            _ => None,
        };

        match decoded {
            Some(ch) => value.push(ch),
            None => self.error("CS1009", "Unrecognized escape sequence", line),
        }
    }

    fn hex_escape(&mut self, min: usize, max: usize) -> Option<char> {
        let mut digits = String::new();
        while digits.len() < max {
            match self.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    digits.push(c);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        if digits.len() < min {
            return None;
        }
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
    }

    fn punctuation(&mut self, c: char, line: usize) {
        let rest: String = self.chars[self.pos..self.chars.len().min(self.pos + 3)]
            .iter()
            .collect();

        if let Some(p) = PUNCTUATION
            .iter()
            .chain(SINGLE_PUNCTUATION.iter())
            .find(|p| rest.starts_with(**p))
        {
            self.pos += p.chars().count();
            self.push(TokenKind::Punct(*p), line);
            return;
        }

        self.bump();
        self.error("CS1056", format!("Unexpected character '{c}'"), line);
    }
}

#[cfg(test)]
#[path = "lexer/lexer_tests.rs"]
mod lexer_tests;
