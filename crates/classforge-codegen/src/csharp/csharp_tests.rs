#![allow(non_snake_case)]

use super::*;
use crate::descriptor::PrimitiveKind;
use classforge_core::JsonLibrary;
use test_case::test_case;

fn property(key: &str, name: &str, ty: TypeDescriptor) -> PropertyDescriptor {
    PropertyDescriptor {
        original_key: key.to_string(),
        emitted_name: name.to_string(),
        ty,
    }
}

fn class(name: &str, is_root: bool, properties: Vec<PropertyDescriptor>) -> ClassDescriptor {
    ClassDescriptor {
        name: name.to_string(),
        is_root,
        properties,
    }
}

fn scenario_a_tree() -> ClassTree {
    ClassTree {
        root: class(
            "Root",
            true,
            vec![
                property(
                    "user_name",
                    "User_name",
                    TypeDescriptor::Primitive(PrimitiveKind::Text),
                ),
                property("age", "Age", TypeDescriptor::Primitive(PrimitiveKind::Integer)),
            ],
        ),
        others: Vec::new(),
    }
}

#[test]
fn emit_source___default_settings___exact_layout() {
    let code = emit_source(&scenario_a_tree(), &GenerationSettings::default());

    let expected = "\
using System;
using System.Collections.Generic;
using System.Runtime.Serialization;
using System.ComponentModel;
using System.Linq;
using System.Text.Json;
using System.Text.Json.Serialization;

namespace RpaJsonModels
{
    public class Root
    {
        [JsonPropertyName(\"user_name\")]
        public string User_name { get; set; }

        [JsonPropertyName(\"age\")]
        public int Age { get; set; }
    }

}
";
    assert_eq!(code, expected);
}

#[test]
fn emit_source___newtonsoft___uses_json_property() {
    let settings = GenerationSettings::default().with_json_library(JsonLibrary::NewtonsoftJson);

    let code = emit_source(&scenario_a_tree(), &settings);

    assert!(code.contains("using Newtonsoft.Json;\nusing Newtonsoft.Json.Serialization;\n"));
    assert!(code.contains("[JsonProperty(\"user_name\")]"));
    assert!(!code.contains("JsonPropertyName"));
    assert!(!code.contains("System.Text.Json"));
}

#[test]
fn emit_source___field_style___no_accessors() {
    let settings = GenerationSettings {
        use_accessor_style: false,
        ..GenerationSettings::default()
    };

    let code = emit_source(&scenario_a_tree(), &settings);

    assert!(code.contains("        public string User_name;\n"));
    assert!(!code.contains("get; set;"));
}

#[test]
fn emit_source___annotations_disabled___no_attributes() {
    let settings = GenerationSettings {
        generate_serialization_annotations: false,
        ..GenerationSettings::default()
    };

    let code = emit_source(&scenario_a_tree(), &settings);

    assert!(!code.contains('['));
}

#[test]
fn emit_source___documentation___class_and_property_summaries() {
    let settings = GenerationSettings {
        generate_documentation: true,
        ..GenerationSettings::default()
    };

    let code = emit_source(&scenario_a_tree(), &settings);

    assert!(code.contains(
        "    /// <summary>\n    /// Represents Root\n    /// </summary>\n    public class Root\n"
    ));
    assert!(code.contains(
        "        [JsonPropertyName(\"age\")]\n        /// <summary>\n        /// Property Age\n        /// </summary>\n        public int Age"
    ));
}

#[test]
fn emit_source___default_constructor___follows_class_brace() {
    let settings = GenerationSettings {
        generate_default_constructor: true,
        ..GenerationSettings::default()
    };

    let code = emit_source(&scenario_a_tree(), &settings);

    assert!(code.contains(
        "    public class Root\n    {\n        public Root()\n        {\n        }\n\n        [JsonPropertyName(\"user_name\")]"
    ));
}

#[test]
fn emit_source___default_constructor_without_properties___no_trailing_blank() {
    let settings = GenerationSettings {
        generate_default_constructor: true,
        ..GenerationSettings::default()
    };
    let tree = ClassTree {
        root: class("Root", true, Vec::new()),
        others: Vec::new(),
    };

    let code = emit_source(&tree, &settings);

    assert!(code.contains("        public Root()\n        {\n        }\n    }\n"));
}

#[test]
fn emit_source___root_emitted_before_others() {
    let tree = ClassTree {
        root: class(
            "Root",
            true,
            vec![property("child", "Child", TypeDescriptor::ClassRef("Child".into()))],
        ),
        others: vec![class(
            "Child",
            false,
            vec![property("id", "Id", TypeDescriptor::Primitive(PrimitiveKind::Integer))],
        )],
    };

    let code = emit_source(&tree, &GenerationSettings::default());

    let root_at = code.find("public class Root").unwrap();
    let child_at = code.find("public class Child").unwrap();
    assert!(root_at < child_at);
    assert!(code.contains("    }\n\n    public class Child\n"));
}

#[test]
fn emit_source___keyword_names___escaped() {
    let tree = ClassTree {
        root: class(
            "Root",
            true,
            vec![
                property("class", "class", TypeDescriptor::ClassRef("class".into())),
                property("int", "int", TypeDescriptor::Primitive(PrimitiveKind::Integer)),
            ],
        ),
        others: vec![class("class", false, Vec::new())],
    };

    let code = emit_source(&tree, &GenerationSettings::default());

    assert!(code.contains("public @class @class { get; set; }"));
    assert!(code.contains("public int @int { get; set; }"));
    assert!(code.contains("public class @class\n"));
}

#[test]
fn emit_source___custom_namespace___wraps_classes() {
    let settings = GenerationSettings::default().with_namespace("Acme.Billing");

    let code = emit_source(&scenario_a_tree(), &settings);

    assert!(code.contains("\nnamespace Acme.Billing\n{\n"));
    assert!(code.ends_with("}\n"));
}

#[test_case(TypeDescriptor::Primitive(PrimitiveKind::Integer), "int"; "integer")]
#[test_case(TypeDescriptor::Primitive(PrimitiveKind::Float), "double"; "float")]
#[test_case(TypeDescriptor::Primitive(PrimitiveKind::Text), "string"; "text")]
#[test_case(TypeDescriptor::Primitive(PrimitiveKind::Boolean), "bool"; "boolean")]
#[test_case(TypeDescriptor::Primitive(PrimitiveKind::Timestamp), "DateTime"; "timestamp")]
#[test_case(TypeDescriptor::Primitive(PrimitiveKind::Object), "object"; "opaque")]
#[test_case(TypeDescriptor::ClassRef("Item".into()), "Item"; "class")]
#[test_case(TypeDescriptor::array_of(TypeDescriptor::Primitive(PrimitiveKind::Object)), "object[]"; "empty array")]
#[test_case(
    TypeDescriptor::array_of(TypeDescriptor::array_of(TypeDescriptor::ClassRef("Row".into()))),
    "Row[][]";
    "jagged"
)]
fn render_type___maps_descriptor(ty: TypeDescriptor, expected: &str) {
    assert_eq!(render_type(&ty), expected);
}

#[test_case("plain", r#""plain""#; "plain")]
#[test_case("say \"hi\"", r#""say \"hi\"""#; "quotes")]
#[test_case(r"C:\path", r#""C:\\path""#; "backslash")]
#[test_case("line\nbreak", r#""line\nbreak""#; "newline")]
#[test_case("bell\u{7}", r#""bell\u0007""#; "control")]
#[test_case("пример", r#""пример""#; "unicode kept")]
fn string_literal___escapes_for_csharp(value: &str, expected: &str) {
    assert_eq!(string_literal(value), expected);
}
