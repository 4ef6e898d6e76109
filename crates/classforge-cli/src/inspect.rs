//! Inspect command implementation

use anyhow::{Context, Result};
use classforge_compiler::{MemberKind, ModuleReader, TypeTable};
use std::fmt::Write;
use std::path::Path;

/// Run the inspect command
pub fn run(module: &Path, json: bool) -> Result<()> {
    let mut reader = ModuleReader::open(module)
        .with_context(|| format!("Failed to open module: {}", module.display()))?;
    let table = reader.type_table().context("Failed to read type table")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    let manifest = reader.manifest();
    println!("Module: {} {}", manifest.assembly.name, manifest.assembly.version);
    println!("  Target:       {}", manifest.target_framework.display_name());
    println!("  JSON library: {}", manifest.json_library);
    println!("  Build:        {}", manifest.options.optimization);
    println!("  References:");
    for reference in &manifest.references {
        println!("    {} {}", reference.name, reference.version);
    }
    if reader.embedded_source()?.is_some() {
        println!("  Embedded source: yes");
    }
    println!();
    print!("{}", render_types(&table));

    Ok(())
}

/// Type table as indented text.
pub fn render_types(table: &TypeTable) -> String {
    let mut text = String::new();
    for ty in &table.types {
        let _ = writeln!(text, "{} {}", ty.kind, ty.full_name());
        for member in &ty.members {
            let kind = match member.kind {
                MemberKind::Field => "field",
                MemberKind::Property => "property",
                MemberKind::Method => "method",
                MemberKind::Constructor => "constructor",
                MemberKind::EnumValue => "value",
            };
            let _ = write!(text, "  {kind} {}", member.name);
            if let Some(type_name) = &member.type_name {
                let _ = write!(text, ": {type_name}");
            }
            if let Some(serialized) = &member.serialized_name {
                let _ = write!(text, " (\"{serialized}\")");
            }
            text.push('\n');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use classforge_compiler::{MemberEntry, TypeEntry};
    use classforge_compiler::syntax::TypeKind;

    #[test]
    fn render_types___members___one_line_each() {
        let table = TypeTable {
            types: vec![TypeEntry {
                namespace: "M".to_string(),
                name: "Root".to_string(),
                kind: TypeKind::Class,
                type_parameters: Vec::new(),
                base_types: Vec::new(),
                members: vec![
                    MemberEntry {
                        name: "Age".to_string(),
                        kind: MemberKind::Property,
                        type_name: Some("int".to_string()),
                        serialized_name: Some("age".to_string()),
                    },
                    MemberEntry {
                        name: "Root".to_string(),
                        kind: MemberKind::Constructor,
                        type_name: None,
                        serialized_name: None,
                    },
                ],
            }],
        };

        let text = render_types(&table);

        assert_eq!(
            text,
            "class M.Root\n  property Age: int (\"age\")\n  constructor Root\n"
        );
    }
}
