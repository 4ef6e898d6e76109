//! C# source emission from a [`ClassTree`].
//!
//! Layout of the generated file:
//!
//! ```text
//! using System;
//! ...
//! using System.Text.Json.Serialization;
//!
//! namespace RpaJsonModels
//! {
//!     public class Root
//!     {
//!         [JsonPropertyName("user_name")]
//!         public string User_name { get; set; }
//!     }
//!
//!     public class Nested
//!     ...
//! }
//! ```
//!
//! The root class is rendered into its own buffer and the other classes into
//! a second one, so the root is always the first declaration.

use crate::descriptor::{ClassDescriptor, ClassTree, PropertyDescriptor, TypeDescriptor};
use crate::naming::escape_keyword;
use classforge_core::GenerationSettings;

/// Usings emitted before the JSON-library ones.
pub const BASE_USINGS: [&str; 5] = [
    "System",
    "System.Collections.Generic",
    "System.Runtime.Serialization",
    "System.ComponentModel",
    "System.Linq",
];

const CLASS_INDENT: &str = "    ";
const MEMBER_INDENT: &str = "        ";

/// Render the full source file for `tree`.
pub fn emit_source(tree: &ClassTree, settings: &GenerationSettings) -> String {
    let mut root_block = String::new();
    let mut other_blocks = String::new();

    render_class(&mut root_block, &tree.root, settings);
    for class in &tree.others {
        render_class(&mut other_blocks, class, settings);
    }

    let mut code = String::new();

    for namespace in BASE_USINGS
        .iter()
        .chain(settings.json_library.namespaces())
    {
        code.push_str(&format!("using {namespace};\n"));
    }
    code.push('\n');

    code.push_str(&format!("namespace {}\n", settings.namespace));
    code.push_str("{\n");
    code.push_str(&root_block);
    code.push_str(&other_blocks);
    code.push_str("}\n");

    code
}

/// Render one class block followed by a blank line.
fn render_class(code: &mut String, class: &ClassDescriptor, settings: &GenerationSettings) {
    let name = escape_keyword(&class.name);

    if settings.generate_documentation {
        code.push_str(&format!("{CLASS_INDENT}/// <summary>\n"));
        code.push_str(&format!("{CLASS_INDENT}/// Represents {}\n", class.name));
        code.push_str(&format!("{CLASS_INDENT}/// </summary>\n"));
    }

    code.push_str(&format!("{CLASS_INDENT}public class {name}\n"));
    code.push_str(&format!("{CLASS_INDENT}{{\n"));

    if settings.generate_default_constructor {
        code.push_str(&format!("{MEMBER_INDENT}public {name}()\n"));
        code.push_str(&format!("{MEMBER_INDENT}{{\n"));
        code.push_str(&format!("{MEMBER_INDENT}}}\n"));
        if !class.properties.is_empty() {
            code.push('\n');
        }
    }

    for (index, property) in class.properties.iter().enumerate() {
        if index > 0 {
            code.push('\n');
        }
        render_property(code, property, settings);
    }

    code.push_str(&format!("{CLASS_INDENT}}}\n"));
    code.push('\n');
}

fn render_property(code: &mut String, property: &PropertyDescriptor, settings: &GenerationSettings) {
    if settings.generate_serialization_annotations {
        code.push_str(&format!(
            "{MEMBER_INDENT}[{}({})]\n",
            settings.json_library.property_attribute(),
            string_literal(&property.original_key)
        ));
    }

    if settings.generate_documentation {
        code.push_str(&format!("{MEMBER_INDENT}/// <summary>\n"));
        code.push_str(&format!(
            "{MEMBER_INDENT}/// Property {}\n",
            property.emitted_name
        ));
        code.push_str(&format!("{MEMBER_INDENT}/// </summary>\n"));
    }

    let ty = render_type(&property.ty);
    let name = escape_keyword(&property.emitted_name);
    if settings.use_accessor_style {
        code.push_str(&format!("{MEMBER_INDENT}public {ty} {name} {{ get; set; }}\n"));
    } else {
        code.push_str(&format!("{MEMBER_INDENT}public {ty} {name};\n"));
    }
}

/// C# spelling of a type descriptor.
pub fn render_type(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Primitive(kind) => kind.csharp_name().to_string(),
        TypeDescriptor::ClassRef(name) => escape_keyword(name).into_owned(),
        TypeDescriptor::ArrayOf(element) => format!("{}[]", render_type(element)),
    }
}

/// Quote `value` as a regular C# string literal.
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            '\0' => literal.push_str("\\0"),
            c if c.is_control() || c == '\u{2028}' || c == '\u{2029}' => {
                literal.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}

#[cfg(test)]
#[path = "csharp/csharp_tests.rs"]
mod csharp_tests;
