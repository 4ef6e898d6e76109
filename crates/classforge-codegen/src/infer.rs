//! Schema inference: one JSON document becomes a [`ClassTree`].
//!
//! Every object produces a class. A nested object's class is named after the
//! emitted property name; an array of objects gets a singularized element
//! class. Arrays are typed from their first element only. Class names are
//! not deduplicated by shape: a later class with an existing name replaces
//! the earlier one but keeps its position.

use crate::descriptor::{
    ClassDescriptor, ClassTree, PrimitiveKind, PropertyDescriptor, TypeDescriptor,
};
use crate::json::{JsonValue, is_timestamp};
use crate::naming::{apply_naming_convention, sanitize, singularize};
use classforge_core::GenerationSettings;
use indexmap::IndexMap;
use std::collections::HashSet;
use tracing::debug;

/// Build the class tree for `document`, rooted at `settings.root_class_name`.
///
/// A root array takes its shape from its first element when that is an
/// object. Any other non-object root yields a root class with no properties.
pub fn infer_classes(document: &JsonValue, settings: &GenerationSettings) -> ClassTree {
    let mut inference = Inference {
        use_naming_convention: settings.use_naming_convention,
        classes: IndexMap::new(),
    };

    let root_members = match document {
        JsonValue::Object(members) => Some(members),
        JsonValue::Array(items) => items.first().and_then(JsonValue::as_object),
        _ => None,
    };

    if root_members.is_none() {
        debug!(
            kind = document.kind(),
            "document root is not an object; emitting an empty root class"
        );
    }

    let properties = root_members
        .map(|members| inference.properties(members))
        .unwrap_or_default();

    let root = ClassDescriptor {
        name: settings.root_class_name.clone(),
        is_root: true,
        properties,
    };
    let others: Vec<ClassDescriptor> = inference.classes.into_values().flatten().collect();

    debug!(
        root = %root.name,
        nested = others.len(),
        "inferred class tree"
    );

    ClassTree { root, others }
}

struct Inference {
    use_naming_convention: bool,
    /// Slots are reserved before recursing so classes keep pre-order
    classes: IndexMap<String, Option<ClassDescriptor>>,
}

impl Inference {
    fn properties(&mut self, members: &IndexMap<String, JsonValue>) -> Vec<PropertyDescriptor> {
        let mut used = HashSet::new();
        let mut properties = Vec::with_capacity(members.len());

        for (key, value) in members {
            let base = apply_naming_convention(&sanitize(key), self.use_naming_convention);
            let emitted_name = unique_name(base, &mut used);
            let ty = self.type_of(value, &emitted_name);

            properties.push(PropertyDescriptor {
                original_key: key.clone(),
                emitted_name,
                ty,
            });
        }

        properties
    }

    fn type_of(&mut self, value: &JsonValue, name: &str) -> TypeDescriptor {
        match value {
            JsonValue::Null => TypeDescriptor::Primitive(PrimitiveKind::Object),
            JsonValue::Bool(_) => TypeDescriptor::Primitive(PrimitiveKind::Boolean),
            JsonValue::Integer(_) => TypeDescriptor::Primitive(PrimitiveKind::Integer),
            JsonValue::Float(_) => TypeDescriptor::Primitive(PrimitiveKind::Float),
            JsonValue::String(text) if is_timestamp(text) => {
                TypeDescriptor::Primitive(PrimitiveKind::Timestamp)
            }
            JsonValue::String(_) => TypeDescriptor::Primitive(PrimitiveKind::Text),
            JsonValue::Object(members) => {
                self.define_class(name, members);
                TypeDescriptor::ClassRef(name.to_string())
            }
            JsonValue::Array(items) => self.array_type(items, &singularize(name)),
        }
    }

    /// Nested arrays share the element name of the outermost array.
    fn array_type(&mut self, items: &[JsonValue], element_name: &str) -> TypeDescriptor {
        let element = match items.first() {
            None => TypeDescriptor::Primitive(PrimitiveKind::Object),
            Some(JsonValue::Array(inner)) => self.array_type(inner, element_name),
            Some(first) => self.type_of(first, element_name),
        };
        TypeDescriptor::array_of(element)
    }

    fn define_class(&mut self, name: &str, members: &IndexMap<String, JsonValue>) {
        if !self.classes.contains_key(name) {
            self.classes.insert(name.to_string(), None);
        }

        let properties = self.properties(members);
        let replaced = self
            .classes
            .insert(
                name.to_string(),
                Some(ClassDescriptor {
                    name: name.to_string(),
                    is_root: false,
                    properties,
                }),
            )
            .flatten();

        if replaced.is_some() {
            debug!(class = %name, "class name collision; last definition wins");
        }
    }
}

fn unique_name(base: String, used: &mut HashSet<String>) -> String {
    if used.insert(base.clone()) {
        return base;
    }

    let mut suffix = 2;
    loop {
        let candidate = format!("{base}_{suffix}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        suffix += 1;
    }
}
