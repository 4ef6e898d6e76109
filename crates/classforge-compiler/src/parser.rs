//! Recursive-descent parser for declarations.
//!
//! Produces a [`CompilationUnit`] plus syntax diagnostics. The parser never
//! stops at the first error: after reporting it resynchronizes at the next
//! member or declaration boundary.

use crate::lexer::{Token, TokenKind, tokenize};
use crate::syntax::{
    AttributeSyntax, CompilationUnit, EnumMemberDecl, FieldDecl, MemberDecl, MethodDecl,
    NameSegment, NamespaceDecl, NamespaceMember, Parameter, PropertyDecl, QualifiedName,
    TypeDecl, TypeKind, TypeSyntax, UsingDirective,
};
use classforge_core::{Diagnostic, is_keyword};

/// Keywords that name a built-in type.
pub const PREDEFINED_TYPES: [&str; 16] = [
    "bool", "byte", "char", "decimal", "double", "float", "int", "long", "object", "sbyte",
    "short", "string", "uint", "ulong", "ushort", "void",
];

const MODIFIERS: [&str; 16] = [
    "public", "private", "protected", "internal", "static", "abstract", "sealed", "readonly",
    "virtual", "override", "new", "extern", "unsafe", "volatile", "const", "fixed",
];

/// Modifiers that are only keywords when another identifier follows.
const CONTEXTUAL_MODIFIERS: [&str; 5] = ["partial", "async", "required", "file", "ref"];

const ACCESSORS: [&str; 5] = ["get", "set", "init", "add", "remove"];

/// Deepest nesting of namespaces, types and type arguments the parser
/// descends into. Anything deeper is reported and skipped.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parse `source` into a syntax tree. Lexical diagnostics come first.
pub fn parse(source: &str) -> (CompilationUnit, Vec<Diagnostic>) {
    let (tokens, mut diagnostics) = tokenize(source);
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        diagnostics: Vec::new(),
    };
    let unit = parser.compilation_unit();
    diagnostics.append(&mut parser.diagnostics);
    (unit, diagnostics)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Current namespace, type and type-argument nesting
    depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    // ------------------------------------------------------------------
    // Token access
    // ------------------------------------------------------------------

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + offset).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is_eof() {
            self.pos += 1;
        }
        token
    }

    fn prev_line(&self) -> usize {
        if self.pos == 0 {
            return 1;
        }
        self.tokens[self.pos - 1].line
    }

    fn eat_punct(&mut self, punct: &str) -> bool {
        if self.peek().is_punct(punct) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if self.peek().is_word(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&mut self, code: &str, message: impl Into<String>, line: usize) {
        self.diagnostics.push(Diagnostic::error(code, message, line));
    }

    /// Descend one nesting level. Returns false, after reporting, when the
    /// limit is reached; the caller then skips the construct.
    fn enter(&mut self, line: usize) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            self.too_complex(line);
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn too_complex(&mut self, line: usize) {
        self.error("CS8078", "An expression is too long or complex to compile", line);
    }

    /// Consume `punct` or report `code` on the line of the previous token.
    fn expect_punct(&mut self, punct: &str, code: &str, message: &str) -> bool {
        if self.eat_punct(punct) {
            return true;
        }
        let line = self.prev_line();
        self.error(code, message, line);
        false
    }

    fn expect_semicolon(&mut self) -> bool {
        self.expect_punct(";", "CS1002", "; expected")
    }

    /// Identifier usable as a name: verbatim, or not a reserved keyword.
    fn peek_name(&self) -> Option<String> {
        match &self.peek().kind {
            TokenKind::Identifier { text, verbatim } if *verbatim || !is_keyword(text) => {
                Some(text.clone())
            }
            _ => None,
        }
    }

    fn expect_name(&mut self) -> Option<String> {
        match self.peek_name() {
            Some(name) => {
                self.advance();
                Some(name)
            }
            None => {
                let line = self.peek().line;
                self.error("CS1001", "Identifier expected", line);
                None
            }
        }
    }

    fn is_name_at(&self, offset: usize) -> bool {
        matches!(&self.peek_at(offset).kind,
            TokenKind::Identifier { text, verbatim } if *verbatim || !is_keyword(text))
    }

    // ------------------------------------------------------------------
    // Compilation unit and namespaces
    // ------------------------------------------------------------------

    fn compilation_unit(&mut self) -> CompilationUnit {
        let usings = self.usings();
        let members = self.namespace_members(false);
        CompilationUnit { usings, members }
    }

    fn at_using(&self) -> bool {
        self.peek().is_word("using") || (self.peek().is_word("global") && self.peek_at(1).is_word("using"))
    }

    fn usings(&mut self) -> Vec<UsingDirective> {
        let mut usings = Vec::new();
        while self.at_using() {
            usings.push(self.using_directive());
        }
        usings
    }

    fn using_directive(&mut self) -> UsingDirective {
        let is_global = self.eat_word("global");
        let line = self.advance().line;
        let is_static = self.eat_word("static");

        let alias = if self.is_name_at(0) && self.peek_at(1).is_punct("=") {
            let alias = self.peek_name();
            self.advance();
            self.advance();
            alias
        } else {
            None
        };

        let target = self.qualified_name();
        if self.peek().is_punct("<") {
            self.skip_type_arguments();
        }
        self.expect_semicolon();

        UsingDirective {
            target,
            alias,
            is_static,
            is_global,
            line,
        }
    }

    fn qualified_name(&mut self) -> QualifiedName {
        let line = self.peek().line;
        if self.peek().is_word("global") && self.peek_at(1).is_punct("::") {
            self.advance();
            self.advance();
        }

        let mut parts = Vec::new();
        if let Some(first) = self.expect_name() {
            parts.push(first);
            while (self.peek().is_punct(".") || self.peek().is_punct("::")) && self.is_name_at(1) {
                self.advance();
                if let Some(part) = self.peek_name() {
                    parts.push(part);
                }
                self.advance();
            }
        }

        QualifiedName { parts, line }
    }

    /// Members of the compilation unit or of a namespace body.
    fn namespace_members(&mut self, inside_braces: bool) -> Vec<NamespaceMember> {
        let mut members = Vec::new();

        loop {
            let token = self.peek().clone();

            if token.is_eof() {
                if inside_braces {
                    self.error("CS1513", "} expected", token.line);
                }
                break;
            }

            if token.is_punct("}") {
                if inside_braces {
                    break;
                }
                self.error(
                    "CS1022",
                    "Type or namespace definition, or end-of-file expected",
                    token.line,
                );
                self.advance();
                continue;
            }

            if token.is_word("namespace") {
                members.push(NamespaceMember::Namespace(self.namespace_decl()));
                continue;
            }

            if self.at_using() {
                self.error(
                    "CS1529",
                    "A using clause must precede all other elements defined in the namespace except extern alias declarations",
                    token.line,
                );
                self.using_directive();
                continue;
            }

            if token.is_word("extern") && self.peek_at(1).is_word("alias") {
                self.skip_member();
                continue;
            }

            let start = self.pos;
            let (attributes, modifiers) = self.member_prefix();

            if self.peek().is_word("delegate") {
                self.skip_member();
                continue;
            }

            if self.at_type_keyword() {
                members.push(NamespaceMember::Type(self.type_decl(attributes, modifiers)));
                continue;
            }

            if self.pos > start && self.peek().is_eof() {
                continue;
            }

            self.recover_namespace_level();
        }

        members
    }

    fn namespace_decl(&mut self) -> NamespaceDecl {
        let line = self.advance().line;
        let name = self.qualified_name();

        if !self.enter(line) {
            self.skip_member();
            self.eat_punct(";");
            return NamespaceDecl {
                name,
                usings: Vec::new(),
                members: Vec::new(),
                file_scoped: false,
                line,
            };
        }

        let decl = self.namespace_body(name, line);
        self.leave();
        decl
    }

    fn namespace_body(&mut self, name: QualifiedName, line: usize) -> NamespaceDecl {
        if self.eat_punct(";") {
            let usings = self.usings();
            let members = self.namespace_members(false);
            return NamespaceDecl {
                name,
                usings,
                members,
                file_scoped: true,
                line,
            };
        }

        self.expect_punct("{", "CS1514", "{ expected");
        let usings = self.usings();
        let members = self.namespace_members(true);
        self.expect_punct("}", "CS1513", "} expected");
        self.eat_punct(";");

        NamespaceDecl {
            name,
            usings,
            members,
            file_scoped: false,
            line,
        }
    }

    fn starts_namespace_member(&self) -> bool {
        let token = self.peek();
        token.is_eof()
            || token.is_punct("}")
            || token.is_punct("[")
            || token.is_word("namespace")
            || token.is_word("delegate")
            || self.at_using()
            || self.at_type_keyword()
            || self.at_modifier()
    }

    fn recover_namespace_level(&mut self) {
        let line = self.peek().line;
        self.error(
            "CS1022",
            "Type or namespace definition, or end-of-file expected",
            line,
        );

        if self.peek().is_punct("{") {
            self.skip_block();
        } else {
            self.advance();
        }

        while !self.starts_namespace_member() {
            if self.peek().is_punct("{") {
                self.skip_block();
            } else {
                self.advance();
            }
        }
    }

    // ------------------------------------------------------------------
    // Attributes and modifiers
    // ------------------------------------------------------------------

    fn member_prefix(&mut self) -> (Vec<AttributeSyntax>, Vec<String>) {
        let mut attributes = Vec::new();
        while self.peek().is_punct("[") {
            let (target, section) = self.attribute_section();
            if !matches!(target.as_deref(), Some("assembly" | "module")) {
                attributes.extend(section);
            }
        }

        let mut modifiers = Vec::new();
        while self.at_modifier() {
            if let Some(word) = self.advance().identifier() {
                modifiers.push(word.to_string());
            }
        }

        (attributes, modifiers)
    }

    fn at_modifier(&self) -> bool {
        let token = self.peek();
        let next_is_identifier = matches!(self.peek_at(1).kind, TokenKind::Identifier { .. });
        MODIFIERS.iter().any(|m| token.is_word(m))
            || (next_is_identifier && CONTEXTUAL_MODIFIERS.iter().any(|m| token.is_word(m)))
    }

    fn attribute_section(&mut self) -> (Option<String>, Vec<AttributeSyntax>) {
        self.advance();

        let mut target = None;
        if matches!(self.peek().kind, TokenKind::Identifier { .. }) && self.peek_at(1).is_punct(":")
        {
            target = self.advance().identifier().map(str::to_string);
            self.advance();
        }

        let mut attributes = Vec::new();
        loop {
            let line = self.peek().line;
            let name = self.qualified_name();
            let mut first_string_argument = None;

            if self.eat_punct("(") {
                if let TokenKind::StringLiteral(value) = &self.peek().kind {
                    let next = self.peek_at(1);
                    if next.is_punct(",") || next.is_punct(")") {
                        first_string_argument = Some(value.clone());
                    }
                }
                self.skip_until_close(")", "CS1026", ") expected");
            }

            attributes.push(AttributeSyntax {
                name,
                first_string_argument,
                line,
            });

            if self.eat_punct(",") {
                if self.peek().is_punct("]") {
                    break;
                }
                continue;
            }
            break;
        }

        self.expect_punct("]", "CS1003", "Syntax error, ']' expected");
        (target, attributes)
    }

    // ------------------------------------------------------------------
    // Type declarations
    // ------------------------------------------------------------------

    fn at_type_keyword(&self) -> bool {
        let token = self.peek();
        if ["class", "struct", "interface", "enum"]
            .iter()
            .any(|k| token.is_word(k))
        {
            return true;
        }
        token.is_word("record")
            && (self.is_name_at(1)
                || self.peek_at(1).is_word("class")
                || self.peek_at(1).is_word("struct"))
    }

    fn type_decl(&mut self, attributes: Vec<AttributeSyntax>, modifiers: Vec<String>) -> TypeDecl {
        let line = self.peek().line;
        if !self.enter(line) {
            self.skip_member();
            self.eat_punct(";");
            return TypeDecl {
                kind: TypeKind::Class,
                name: String::new(),
                type_parameters: Vec::new(),
                modifiers,
                attributes,
                base_types: Vec::new(),
                parameters: Vec::new(),
                members: Vec::new(),
                line,
            };
        }

        let decl = self.type_decl_body(attributes, modifiers);
        self.leave();
        decl
    }

    fn type_decl_body(&mut self, attributes: Vec<AttributeSyntax>, modifiers: Vec<String>) -> TypeDecl {
        let keyword = self.advance();
        let line = keyword.line;
        let kind = match keyword.identifier() {
            Some("struct") => TypeKind::Struct,
            Some("interface") => TypeKind::Interface,
            Some("enum") => TypeKind::Enum,
            Some("record") => {
                if !self.eat_word("class") {
                    self.eat_word("struct");
                }
                TypeKind::Record
            }
            _ => TypeKind::Class,
        };

        let name = self.expect_name().unwrap_or_default();
        let type_parameters = if self.peek().is_punct("<") {
            self.type_parameters()
        } else {
            Vec::new()
        };

        let parameters = if self.peek().is_punct("(") {
            self.parameters()
        } else {
            Vec::new()
        };

        let mut base_types = Vec::new();
        if self.eat_punct(":") {
            loop {
                if let Some(ty) = self.type_syntax() {
                    base_types.push(ty);
                }
                if self.peek().is_punct("(") {
                    self.advance();
                    self.skip_until_close(")", "CS1026", ") expected");
                }
                if !self.eat_punct(",") {
                    break;
                }
            }
        }

        self.skip_constraints();

        let mut members = Vec::new();
        if !self.eat_punct(";") {
            if self.expect_punct("{", "CS1514", "{ expected") {
                members = if kind == TypeKind::Enum {
                    self.enum_members()
                } else {
                    self.type_members(&name)
                };
                self.expect_punct("}", "CS1513", "} expected");
            }
            self.eat_punct(";");
        }

        TypeDecl {
            kind,
            name,
            type_parameters,
            modifiers,
            attributes,
            base_types,
            parameters,
            members,
            line,
        }
    }

    fn type_parameters(&mut self) -> Vec<String> {
        self.advance();
        let mut names = Vec::new();
        loop {
            while self.peek().is_punct("[") {
                self.attribute_section();
            }
            if self.peek().is_word("in") || self.peek().is_word("out") {
                self.advance();
            }
            if let Some(name) = self.expect_name() {
                names.push(name);
            }
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(">", "CS1003", "Syntax error, '>' expected");
        names
    }

    fn skip_constraints(&mut self) {
        while self.peek().is_word("where") {
            while !(self.peek().is_eof()
                || self.peek().is_punct("{")
                || self.peek().is_punct(";")
                || self.peek().is_punct("=>"))
            {
                self.advance();
                if self.peek().is_word("where") {
                    break;
                }
            }
        }
    }

    fn enum_members(&mut self) -> Vec<MemberDecl> {
        let mut members = Vec::new();
        loop {
            if self.peek().is_punct("}") || self.peek().is_eof() {
                break;
            }

            let (attributes, _) = self.member_prefix();
            let line = self.peek().line;
            let Some(name) = self.expect_name() else {
                self.advance();
                continue;
            };

            if self.eat_punct("=") {
                self.skip_expression(&[",", "}"]);
            }

            members.push(MemberDecl::EnumMember(EnumMemberDecl {
                attributes,
                name,
                line,
            }));

            if !self.eat_punct(",") {
                break;
            }
        }
        members
    }

    fn type_members(&mut self, type_name: &str) -> Vec<MemberDecl> {
        let mut members = Vec::new();
        loop {
            let token = self.peek();
            if token.is_eof() || token.is_punct("}") {
                break;
            }
            if token.is_punct(";") {
                self.advance();
                continue;
            }

            let start = self.pos;
            if let Some(member) = self.member(type_name) {
                members.push(member);
            }
            if self.pos == start {
                self.advance();
            }
        }
        members
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    fn member(&mut self, type_name: &str) -> Option<MemberDecl> {
        let (attributes, modifiers) = self.member_prefix();

        if self.at_type_keyword() {
            return Some(MemberDecl::NestedType(self.type_decl(attributes, modifiers)));
        }

        let token = self.peek().clone();
        if token.is_word("event")
            || token.is_word("delegate")
            || token.is_word("implicit")
            || token.is_word("explicit")
            || token.is_punct("~")
        {
            self.skip_member();
            return None;
        }

        if token.identifier() == Some(type_name) && self.peek_at(1).is_punct("(") {
            return Some(self.constructor(attributes, modifiers));
        }

        if !self.can_start_type() {
            self.error(
                "CS1519",
                format!(
                    "Invalid token '{token}' in class, record, struct, or interface member declaration"
                ),
                token.line,
            );
            self.advance();
            return None;
        }

        let ty = self.type_syntax()?;
        let line = ty.line();

        if self.peek().is_punct("(") {
            if let TypeSyntax::Named { segments, .. } = &ty {
                if segments.len() == 1 && segments[0].type_arguments.is_empty() {
                    self.error("CS1520", "Method must have a return type", line);
                    let name = segments[0].name.clone();
                    let parameters = self.parameters();
                    self.method_body();
                    return Some(MemberDecl::Method(MethodDecl {
                        attributes,
                        modifiers,
                        return_type: None,
                        name,
                        type_parameters: Vec::new(),
                        parameters,
                        line,
                    }));
                }
            }
        }

        if self.peek().is_word("operator")
            || (self.peek().is_word("this") && self.peek_at(1).is_punct("["))
        {
            self.skip_member();
            return None;
        }

        let Some(mut name) = self.expect_name() else {
            self.skip_member();
            return None;
        };
        while self.peek().is_punct(".") && self.is_name_at(1) {
            self.advance();
            name = self.peek_name().unwrap_or_default();
            self.advance();
        }

        if self.peek().is_punct("(") || self.peek().is_punct("<") {
            let type_parameters = if self.peek().is_punct("<") {
                self.type_parameters()
            } else {
                Vec::new()
            };
            let parameters = if self.peek().is_punct("(") {
                self.parameters()
            } else {
                let line = self.prev_line();
                self.error("CS1003", "Syntax error, '(' expected", line);
                Vec::new()
            };
            self.skip_constraints();
            self.method_body();
            return Some(MemberDecl::Method(MethodDecl {
                attributes,
                modifiers,
                return_type: Some(ty),
                name,
                type_parameters,
                parameters,
                line,
            }));
        }

        if self.peek().is_punct("{") {
            let accessors = self.accessor_list();
            if self.eat_punct("=") {
                self.skip_expression(&[";", "}"]);
                self.expect_semicolon();
            }
            return Some(MemberDecl::Property(PropertyDecl {
                attributes,
                modifiers,
                ty,
                name,
                accessors,
                expression_bodied: false,
                line,
            }));
        }

        if self.eat_punct("=>") {
            self.skip_expression(&[";", "}"]);
            self.expect_semicolon();
            return Some(MemberDecl::Property(PropertyDecl {
                attributes,
                modifiers,
                ty,
                name,
                accessors: vec!["get".to_string()],
                expression_bodied: true,
                line,
            }));
        }

        let names = self.field_declarators(name);
        Some(MemberDecl::Field(FieldDecl {
            attributes,
            modifiers,
            ty,
            names,
            line,
        }))
    }

    fn constructor(&mut self, attributes: Vec<AttributeSyntax>, modifiers: Vec<String>) -> MemberDecl {
        let token = self.advance();
        let name = token.identifier().unwrap_or_default().to_string();
        let parameters = self.parameters();

        if self.eat_punct(":") {
            self.advance();
            if self.eat_punct("(") {
                self.skip_until_close(")", "CS1026", ") expected");
            }
        }
        self.method_body();

        MemberDecl::Constructor(MethodDecl {
            attributes,
            modifiers,
            return_type: None,
            name,
            type_parameters: Vec::new(),
            parameters,
            line: token.line,
        })
    }

    /// Declarator names after the first one, with initializers skipped.
    fn field_declarators(&mut self, first: String) -> Vec<String> {
        let mut names = vec![first];
        loop {
            if self.eat_punct("=") {
                self.skip_initializer();
            }
            if self.eat_punct(",") {
                if let Some(name) = self.expect_name() {
                    names.push(name);
                    continue;
                }
            }
            break;
        }
        self.expect_semicolon();
        names
    }

    fn accessor_list(&mut self) -> Vec<String> {
        self.advance();
        let mut accessors = Vec::new();

        loop {
            if self.eat_punct("}") {
                break;
            }
            if self.peek().is_eof() {
                let line = self.peek().line;
                self.error("CS1513", "} expected", line);
                break;
            }

            self.member_prefix();
            let token = self.peek().clone();
            let Some(accessor) = ACCESSORS.iter().find(|a| token.is_word(a)) else {
                self.error("CS1014", "A get or set accessor expected", token.line);
                self.advance();
                continue;
            };
            accessors.push((*accessor).to_string());
            self.advance();

            if self.eat_punct(";") {
                continue;
            }
            if self.peek().is_punct("{") {
                self.skip_block();
                continue;
            }
            if self.eat_punct("=>") {
                self.skip_expression(&[";", "}"]);
                self.expect_semicolon();
                continue;
            }
            let line = self.prev_line();
            self.error("CS1043", "{ or ; expected", line);
        }

        accessors
    }

    fn parameters(&mut self) -> Vec<Parameter> {
        self.advance();
        let mut parameters = Vec::new();

        loop {
            if self.eat_punct(")") {
                break;
            }
            if self.peek().is_eof() {
                let line = self.peek().line;
                self.error("CS1026", ") expected", line);
                break;
            }

            let (attributes, _) = self.member_prefix();
            while ["ref", "out", "in", "params", "this", "scoped"]
                .iter()
                .any(|m| self.peek().is_word(m))
            {
                self.advance();
            }

            let line = self.peek().line;
            let Some(ty) = self.type_syntax() else {
                self.skip_expression(&[",", ")"]);
                if self.eat_punct(",") {
                    continue;
                }
                self.expect_punct(")", "CS1026", ") expected");
                break;
            };
            let name = self.expect_name().unwrap_or_default();

            if self.eat_punct("=") {
                self.skip_expression(&[",", ")"]);
            }

            parameters.push(Parameter {
                attributes,
                ty,
                name,
                line,
            });

            if self.eat_punct(",") {
                continue;
            }
            self.expect_punct(")", "CS1026", ") expected");
            break;
        }

        parameters
    }

    fn method_body(&mut self) {
        if self.peek().is_punct("{") {
            self.skip_block();
        } else if self.eat_punct("=>") {
            self.skip_expression(&[";", "}"]);
            self.expect_semicolon();
        } else {
            self.expect_semicolon();
        }
    }

    // ------------------------------------------------------------------
    // Types
    // ------------------------------------------------------------------

    fn can_start_type(&self) -> bool {
        let token = self.peek();
        token.is_punct("(")
            || PREDEFINED_TYPES.iter().any(|k| token.is_word(k))
            || self.is_name_at(0)
            || (token.is_word("global") && self.peek_at(1).is_punct("::"))
    }

    fn type_syntax(&mut self) -> Option<TypeSyntax> {
        let line = self.peek().line;
        if !self.enter(line) {
            self.skip_type();
            return None;
        }

        let ty = self.type_syntax_body();
        self.leave();
        ty
    }

    fn type_syntax_body(&mut self) -> Option<TypeSyntax> {
        let token = self.peek().clone();
        let line = token.line;

        let mut ty = if token.is_punct("(") {
            self.advance();
            let mut elements = Vec::new();
            loop {
                if let Some(element) = self.type_syntax() {
                    elements.push(element);
                }
                if self.is_name_at(0) {
                    self.advance();
                }
                if !self.eat_punct(",") {
                    break;
                }
            }
            self.expect_punct(")", "CS1026", ") expected");
            TypeSyntax::Tuple { elements, line }
        } else if let Some(keyword) = PREDEFINED_TYPES.iter().find(|k| token.is_word(k)) {
            self.advance();
            TypeSyntax::Predefined {
                keyword: (*keyword).to_string(),
                line,
            }
        } else if self.is_name_at(0) || (token.is_word("global") && self.peek_at(1).is_punct("::")) {
            let global = token.is_word("global") && self.peek_at(1).is_punct("::");
            if global {
                self.advance();
                self.advance();
            }

            let mut segments = Vec::new();
            loop {
                let name = self.peek_name().unwrap_or_default();
                self.advance();
                let type_arguments = if self.peek().is_punct("<") {
                    self.type_arguments()
                } else {
                    Vec::new()
                };
                segments.push(NameSegment {
                    name,
                    type_arguments,
                });

                let separator = self.peek().is_punct(".") || self.peek().is_punct("::");
                if separator && self.is_name_at(1) && !self.is_member_name_at(1) {
                    self.advance();
                    continue;
                }
                break;
            }

            TypeSyntax::Named {
                segments,
                global,
                line,
            }
        } else {
            self.error("CS1031", "Type expected", line);
            return None;
        };

        // Array and nullable wrappers count towards the nesting limit.
        let mut wrappers = self.depth;
        let mut reported = false;
        loop {
            let nullable = self.peek().is_punct("?");
            let array = self.peek().is_punct("[")
                && (self.peek_at(1).is_punct("]") || self.peek_at(1).is_punct(","));
            let wrap = wrappers < MAX_NESTING_DEPTH;
            if (nullable || array) && !wrap && !reported {
                self.too_complex(line);
                reported = true;
            }

            if nullable {
                self.advance();
                if wrap {
                    ty = TypeSyntax::Nullable(Box::new(ty));
                    wrappers += 1;
                }
            } else if array {
                self.advance();
                let mut rank = 1;
                while self.eat_punct(",") {
                    rank += 1;
                }
                self.expect_punct("]", "CS1003", "Syntax error, ']' expected");
                if wrap {
                    ty = TypeSyntax::Array {
                        element: Box::new(ty),
                        rank,
                    };
                    wrappers += 1;
                }
            } else if self.peek().is_punct("*") {
                self.advance();
            } else {
                break;
            }
        }

        Some(ty)
    }

    /// An explicit interface member (`IFoo.Bar(`) ends the type name early.
    fn is_member_name_at(&self, offset: usize) -> bool {
        let after = self.peek_at(offset + 1);
        after.is_punct("(") || after.is_punct("{") || after.is_punct("=>")
    }

    fn type_arguments(&mut self) -> Vec<TypeSyntax> {
        self.advance();
        let mut arguments = Vec::new();
        loop {
            if let Some(argument) = self.type_syntax() {
                arguments.push(argument);
            }
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(">", "CS1003", "Syntax error, '>' expected");
        arguments
    }

    fn skip_type_arguments(&mut self) {
        self.type_arguments();
    }

    /// Skip the rest of a type, stopping before a depth-0 separator or
    /// the close of an enclosing list.
    fn skip_type(&mut self) {
        let mut depth = 0usize;
        loop {
            let token = self.peek();
            if token.is_eof() {
                return;
            }
            if token.is_punct("<") || token.is_punct("(") || token.is_punct("[") {
                depth += 1;
            } else if token.is_punct(">") || token.is_punct(")") || token.is_punct("]") {
                if depth == 0 {
                    return;
                }
                depth -= 1;
            } else if depth == 0
                && [",", ";", "{", "}", "=", "=>"].iter().any(|p| token.is_punct(p))
            {
                return;
            }
            self.advance();
        }
    }

    // ------------------------------------------------------------------
    // Skipping
    // ------------------------------------------------------------------

    /// Skip a `{ ... }` block including nested blocks.
    fn skip_block(&mut self) {
        let open_line = self.advance().line;
        let mut depth = 1usize;
        while depth > 0 {
            let token = self.advance();
            if token.is_eof() {
                self.error("CS1513", "} expected", token.line.max(open_line));
                return;
            }
            if token.is_punct("{") {
                depth += 1;
            } else if token.is_punct("}") {
                depth -= 1;
            }
        }
    }

    /// Skip to the matching `close`; the opening token is already consumed.
    fn skip_until_close(&mut self, close: &str, code: &str, message: &str) {
        let mut depth = 0usize;
        loop {
            let token = self.peek().clone();
            if token.is_eof() {
                self.error(code, message, token.line);
                return;
            }
            if depth == 0 && token.is_punct(close) {
                self.advance();
                return;
            }
            if token.is_punct("(") || token.is_punct("[") || token.is_punct("{") {
                depth += 1;
            } else if token.is_punct(")") || token.is_punct("]") || token.is_punct("}") {
                if depth == 0 {
                    self.error(code, message, token.line);
                    return;
                }
                depth -= 1;
            }
            self.advance();
        }
    }

    /// Skip an expression up to (not including) a depth-0 stop token.
    fn skip_expression(&mut self, stops: &[&str]) {
        let mut depth = 0usize;
        loop {
            let token = self.peek();
            if token.is_eof() {
                return;
            }
            if depth == 0 && stops.iter().any(|s| token.is_punct(s)) {
                return;
            }
            if token.is_punct("(") || token.is_punct("[") || token.is_punct("{") {
                depth += 1;
            } else if token.is_punct(")") || token.is_punct("]") || token.is_punct("}") {
                if depth == 0 {
                    return;
                }
                depth -= 1;
            }
            self.advance();
        }
    }

    /// Skip a field initializer, stopping at `;` or at a `,` that starts
    /// another declarator (`, name =`, `, name,` or `, name;`).
    fn skip_initializer(&mut self) {
        loop {
            self.skip_expression(&[";", ",", "}"]);
            if !self.peek().is_punct(",") {
                return;
            }
            let starts_declarator = self.is_name_at(1)
                && (self.peek_at(2).is_punct("=")
                    || self.peek_at(2).is_punct(",")
                    || self.peek_at(2).is_punct(";"));
            if starts_declarator {
                return;
            }
            self.advance();
        }
    }

    /// Skip an unsupported member up to its `;` or through its body.
    fn skip_member(&mut self) {
        let mut depth = 0usize;
        loop {
            let token = self.peek().clone();
            if token.is_eof() {
                return;
            }
            if depth == 0 {
                if token.is_punct(";") {
                    self.advance();
                    return;
                }
                if token.is_punct("}") {
                    return;
                }
                if token.is_punct("{") {
                    self.skip_block();
                    if self.peek().is_punct("=") {
                        continue;
                    }
                    return;
                }
            }
            if token.is_punct("(") || token.is_punct("[") {
                depth += 1;
            } else if token.is_punct(")") || token.is_punct("]") {
                depth = depth.saturating_sub(1);
            }
            self.advance();
        }
    }
}
