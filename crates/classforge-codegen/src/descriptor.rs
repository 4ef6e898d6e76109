//! Class descriptor tree produced by schema inference.
//!
//! The tree is the hand-off between inference and emission:
//!
//! - [`ClassTree`]: the root class plus every nested class in pre-order
//! - [`ClassDescriptor`]: one generated class and its ordered properties
//! - [`PropertyDescriptor`]: the original JSON key, the emitted identifier
//!   and its [`TypeDescriptor`]
//!
//! Descriptors are built once and never mutated afterwards.

/// Primitive target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Integer,
    Float,
    Text,
    Boolean,
    Timestamp,
    /// Placeholder for `null` and for elements of empty arrays
    Object,
}

impl PrimitiveKind {
    /// C# keyword or type name for the primitive.
    #[must_use]
    pub fn csharp_name(&self) -> &'static str {
        match self {
            PrimitiveKind::Integer => "int",
            PrimitiveKind::Float => "double",
            PrimitiveKind::Text => "string",
            PrimitiveKind::Boolean => "bool",
            PrimitiveKind::Timestamp => "DateTime",
            PrimitiveKind::Object => "object",
        }
    }
}

/// Target type of one JSON value occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Primitive(PrimitiveKind),
    ClassRef(String),
    ArrayOf(Box<TypeDescriptor>),
}

impl TypeDescriptor {
    pub fn array_of(element: TypeDescriptor) -> Self {
        TypeDescriptor::ArrayOf(Box::new(element))
    }

    /// Class referenced by this type, looking through any array nesting.
    pub fn referenced_class(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Primitive(_) => None,
            TypeDescriptor::ClassRef(name) => Some(name),
            TypeDescriptor::ArrayOf(element) => element.referenced_class(),
        }
    }
}

/// One member of a generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    /// Key exactly as it appeared in the JSON document
    pub original_key: String,

    /// Sanitized, convention-applied, unique within the class
    pub emitted_name: String,

    pub ty: TypeDescriptor,
}

/// One generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
    pub name: String,
    pub is_root: bool,
    pub properties: Vec<PropertyDescriptor>,
}

impl ClassDescriptor {
    pub fn property(&self, emitted_name: &str) -> Option<&PropertyDescriptor> {
        self.properties
            .iter()
            .find(|p| p.emitted_name == emitted_name)
    }
}

/// Root class plus every other class in first-encountered order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTree {
    pub root: ClassDescriptor,
    pub others: Vec<ClassDescriptor>,
}

impl ClassTree {
    /// Root first, then the others in tree order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDescriptor> {
        std::iter::once(&self.root).chain(self.others.iter())
    }

    /// Find a non-root class by name.
    pub fn find(&self, name: &str) -> Option<&ClassDescriptor> {
        self.others.iter().find(|c| c.name == name)
    }

    /// Number of classes including the root.
    pub fn class_count(&self) -> usize {
        1 + self.others.len()
    }
}
