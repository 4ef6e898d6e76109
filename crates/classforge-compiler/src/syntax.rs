//! Syntax tree for the C# data-class dialect.
//!
//! Only declarations are modeled. Method and accessor bodies, initializers
//! and attribute arguments other than a leading string literal are skipped
//! by the parser.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilationUnit {
    pub usings: Vec<UsingDirective>,
    pub members: Vec<NamespaceMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsingDirective {
    pub target: QualifiedName,
    pub alias: Option<String>,
    pub is_static: bool,
    pub is_global: bool,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NamespaceMember {
    Namespace(NamespaceDecl),
    Type(TypeDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: QualifiedName,
    pub usings: Vec<UsingDirective>,
    pub members: Vec<NamespaceMember>,
    pub file_scoped: bool,
    pub line: usize,
}

/// Dotted name such as `System.Collections.Generic`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub parts: Vec<String>,
    pub line: usize,
}

impl QualifiedName {
    pub fn last(&self) -> &str {
        self.parts.last().map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Record,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => f.write_str("class"),
            TypeKind::Struct => f.write_str("struct"),
            TypeKind::Interface => f.write_str("interface"),
            TypeKind::Enum => f.write_str("enum"),
            TypeKind::Record => f.write_str("record"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSyntax {
    pub name: QualifiedName,
    /// Value of the first positional argument when it is a string literal
    pub first_string_argument: Option<String>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub kind: TypeKind,
    pub name: String,
    pub type_parameters: Vec<String>,
    pub modifiers: Vec<String>,
    pub attributes: Vec<AttributeSyntax>,
    pub base_types: Vec<TypeSyntax>,
    /// Primary constructor parameters of a record
    pub parameters: Vec<Parameter>,
    pub members: Vec<MemberDecl>,
    pub line: usize,
}

impl TypeDecl {
    pub fn is_partial(&self) -> bool {
        self.modifiers.iter().any(|m| m == "partial")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberDecl {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(MethodDecl),
    EnumMember(EnumMemberDecl),
    NestedType(TypeDecl),
}

impl MemberDecl {
    pub fn line(&self) -> usize {
        match self {
            MemberDecl::Field(f) => f.line,
            MemberDecl::Property(p) => p.line,
            MemberDecl::Method(m) | MemberDecl::Constructor(m) => m.line,
            MemberDecl::EnumMember(e) => e.line,
            MemberDecl::NestedType(t) => t.line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub attributes: Vec<AttributeSyntax>,
    pub modifiers: Vec<String>,
    pub ty: TypeSyntax,
    pub names: Vec<String>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub attributes: Vec<AttributeSyntax>,
    pub modifiers: Vec<String>,
    pub ty: TypeSyntax,
    pub name: String,
    /// Accessor keywords in declaration order (`get`, `set`, `init`)
    pub accessors: Vec<String>,
    /// `=> expr;` form, which implies a getter
    pub expression_bodied: bool,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub attributes: Vec<AttributeSyntax>,
    pub modifiers: Vec<String>,
    /// `None` for constructors and for methods missing a return type
    pub return_type: Option<TypeSyntax>,
    pub name: String,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub attributes: Vec<AttributeSyntax>,
    pub ty: TypeSyntax,
    pub name: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumMemberDecl {
    pub attributes: Vec<AttributeSyntax>,
    pub name: String,
    pub line: usize,
}

/// One segment of a type name with its type arguments, e.g. `List<int>`.
#[derive(Debug, Clone, PartialEq)]
pub struct NameSegment {
    pub name: String,
    pub type_arguments: Vec<TypeSyntax>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeSyntax {
    /// `int`, `string`, `object`, `void`, ...
    Predefined { keyword: String, line: usize },
    Named {
        segments: Vec<NameSegment>,
        global: bool,
        line: usize,
    },
    Array { element: Box<TypeSyntax>, rank: usize },
    Nullable(Box<TypeSyntax>),
    Tuple { elements: Vec<TypeSyntax>, line: usize },
}

impl TypeSyntax {
    pub fn line(&self) -> usize {
        match self {
            TypeSyntax::Predefined { line, .. }
            | TypeSyntax::Named { line, .. }
            | TypeSyntax::Tuple { line, .. } => *line,
            TypeSyntax::Array { element, .. } => element.line(),
            TypeSyntax::Nullable(inner) => inner.line(),
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeSyntax::Predefined { keyword, .. } if keyword == "void")
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Predefined { keyword, .. } => f.write_str(keyword),
            TypeSyntax::Named {
                segments, global, ..
            } => {
                if *global {
                    f.write_str("global::")?;
                }
                for (i, segment) in segments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(&segment.name)?;
                    if !segment.type_arguments.is_empty() {
                        f.write_str("<")?;
                        for (j, arg) in segment.type_arguments.iter().enumerate() {
                            if j > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{arg}")?;
                        }
                        f.write_str(">")?;
                    }
                }
                Ok(())
            }
            TypeSyntax::Array { element, rank } => {
                write!(f, "{element}[{}]", ",".repeat(rank.saturating_sub(1)))
            }
            TypeSyntax::Nullable(inner) => write!(f, "{inner}?"),
            TypeSyntax::Tuple { elements, .. } => {
                f.write_str("(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str(")")
            }
        }
    }
}
