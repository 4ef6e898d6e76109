//! Semantic analysis for declarations.
//!
//! The binder builds a symbol table from the referenced assemblies and the
//! declared types, then resolves every name a declaration mentions: using
//! directives, base types, member types, parameter types and attributes.
//! Name lookup walks type parameters, enclosing types, then each enclosing
//! namespace from the innermost outwards; at every namespace level the
//! namespace's own members win over aliases, which win over types imported
//! with `using`.

use crate::metadata::{MemberEntry, MemberKind, TypeEntry, TypeTable};
use crate::references::ReferenceAssembly;
use crate::syntax::{
    AttributeSyntax, CompilationUnit, MemberDecl, NamespaceMember, TypeDecl, TypeKind, TypeSyntax,
    UsingDirective,
};
use classforge_core::Diagnostic;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Contextual type names that need no reference.
const NATIVE_TYPE_NAMES: [&str; 3] = ["dynamic", "nint", "nuint"];

const GLOBAL_NAMESPACE: &str = "<global namespace>";

/// Annotations whose first string argument is the serialized member name.
const SERIALIZED_NAME_ATTRIBUTES: [&str; 2] = ["JsonProperty", "JsonPropertyName"];

/// Result of binding a compilation unit.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    pub diagnostics: Vec<Diagnostic>,
    pub types: TypeTable,
}

/// Bind `unit` against `references`. Warnings are reported as warnings;
/// promotion is up to the caller.
pub fn bind(unit: &CompilationUnit, references: &[Arc<ReferenceAssembly>]) -> Binding {
    let mut binder = Binder::new(references);
    binder.declare_members(&unit.members, "");

    let root = binder.bind_usings(&unit.usings, &Context::default(), "");
    let context = Context {
        scopes: vec![root],
        ..Context::default()
    };
    binder.bind_members(&unit.members, &context);

    debug!(
        types = binder.table.type_count(),
        diagnostics = binder.diagnostics.len(),
        "binding finished"
    );

    Binding {
        diagnostics: binder.diagnostics,
        types: binder.table,
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

/// `List<T>`, `Dictionary<T1, T2>`
fn generic_display(name: &str, arity: usize) -> String {
    match arity {
        0 => name.to_string(),
        1 => format!("{name}<T>"),
        n => {
            let parameters: Vec<String> = (1..=n).map(|i| format!("T{i}")).collect();
            format!("{name}<{}>", parameters.join(", "))
        }
    }
}

fn not_found(name: &str, line: usize) -> Diagnostic {
    Diagnostic::error(
        "CS0246",
        format!(
            "The type or namespace name '{name}' could not be found (are you missing a using directive or an assembly reference?)"
        ),
        line,
    )
}

fn not_in_namespace(name: &str, namespace: &str, line: usize) -> Diagnostic {
    Diagnostic::error(
        "CS0234",
        format!(
            "The type or namespace name '{name}' does not exist in the namespace '{namespace}' (are you missing an assembly reference?)"
        ),
        line,
    )
}

fn not_in_type(name: &str, ty: &str, line: usize) -> Diagnostic {
    Diagnostic::error(
        "CS0426",
        format!("The type name '{name}' does not exist in the type '{ty}'"),
        line,
    )
}

fn arity_error(full: &str, existing: usize, line: usize) -> Diagnostic {
    let short = full.rsplit('.').next().unwrap_or(full);
    if existing == 0 {
        Diagnostic::error(
            "CS0308",
            format!("The non-generic type '{full}' cannot be used with type arguments"),
            line,
        )
    } else {
        Diagnostic::error(
            "CS0305",
            format!(
                "Using the generic type '{}' requires {existing} type arguments",
                generic_display(short, existing)
            ),
            line,
        )
    }
}

#[derive(Debug, Default)]
struct Symbols {
    namespaces: HashSet<String>,
    /// Full type name to the arities declared under it
    types: HashMap<String, BTreeSet<usize>>,
}

impl Symbols {
    fn add_namespace(&mut self, name: &str) {
        let mut current = String::new();
        for part in name.split('.') {
            current = join(&current, part);
            self.namespaces.insert(current.clone());
        }
    }

    fn add_type(&mut self, full: String, arity: usize) {
        self.types.entry(full).or_default().insert(arity);
    }

    fn is_namespace(&self, full: &str) -> bool {
        self.namespaces.contains(full)
    }

    /// Whether `full` exists with `arity`. The first name found with other
    /// arities is remembered in `mismatch`.
    fn probe(&self, full: &str, arity: usize, mismatch: &mut Option<(String, usize)>) -> bool {
        match self.types.get(full) {
            Some(arities) if arities.contains(&arity) => true,
            Some(arities) => {
                if mismatch.is_none() {
                    if let Some(&existing) = arities.iter().next() {
                        *mismatch = Some((full.to_string(), existing));
                    }
                }
                false
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entity {
    Namespace(String),
    Type(String),
    TypeParameter(String),
    Native(String),
}

/// One namespace level with the usings declared in it.
#[derive(Debug, Clone, Default)]
struct Scope {
    namespace: String,
    usings: Vec<String>,
    aliases: HashMap<String, Entity>,
}

impl Scope {
    fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Context {
    /// Outermost first
    scopes: Vec<Scope>,
    /// Full names of enclosing types, outermost first
    enclosing: Vec<String>,
    type_parameters: Vec<String>,
}

impl Context {
    fn namespace(&self) -> &str {
        self.scopes.last().map(|s| s.namespace.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameUse {
    Method,
    PartialType,
    Other,
}

struct Binder {
    symbols: Symbols,
    /// Declared source types by (full name, arity), with their partial flag
    declared: HashMap<(String, usize), bool>,
    diagnostics: Vec<Diagnostic>,
    table: TypeTable,
}

impl Binder {
    fn new(references: &[Arc<ReferenceAssembly>]) -> Self {
        let mut symbols = Symbols::default();
        for reference in references {
            for namespace in &reference.namespaces {
                symbols.add_namespace(&namespace.name);
            }
            for exported in reference.exported_types() {
                symbols.add_type(join(exported.namespace, exported.name), exported.arity);
            }
        }

        Self {
            symbols,
            declared: HashMap::new(),
            diagnostics: Vec::new(),
            table: TypeTable::default(),
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    fn declare_members(&mut self, members: &[NamespaceMember], namespace: &str) {
        for member in members {
            match member {
                NamespaceMember::Namespace(ns) => {
                    let full = if ns.name.parts.is_empty() {
                        namespace.to_string()
                    } else {
                        join(namespace, &ns.name.to_string())
                    };
                    if !full.is_empty() {
                        self.symbols.add_namespace(&full);
                    }
                    self.declare_members(&ns.members, &full);
                }
                NamespaceMember::Type(ty) => self.declare_type(ty, namespace, true),
            }
        }
    }

    fn declare_type(&mut self, ty: &TypeDecl, container: &str, top_level: bool) {
        if ty.name.is_empty() {
            return;
        }

        let full = join(container, &ty.name);
        let arity = ty.type_parameters.len();
        let key = (full.clone(), arity);

        match self.declared.get(&key) {
            Some(&previous_partial) => {
                // Nested duplicates are reported with the other member clashes.
                if top_level && !(previous_partial && ty.is_partial()) {
                    let namespace = if container.is_empty() {
                        GLOBAL_NAMESPACE
                    } else {
                        container
                    };
                    self.report(Diagnostic::error(
                        "CS0101",
                        format!(
                            "The namespace '{namespace}' already contains a definition for '{}'",
                            ty.name
                        ),
                        ty.line,
                    ));
                }
            }
            None => {
                self.declared.insert(key, ty.is_partial());
            }
        }

        self.symbols.add_type(full.clone(), arity);
        for member in &ty.members {
            if let MemberDecl::NestedType(nested) = member {
                self.declare_type(nested, &full, false);
            }
        }
    }

    // ------------------------------------------------------------------
    // Name lookup
    // ------------------------------------------------------------------

    fn resolve_simple(
        &self,
        ctx: &Context,
        name: &str,
        arity: usize,
        line: usize,
    ) -> Result<Entity, Diagnostic> {
        if arity == 0 && ctx.type_parameters.iter().any(|p| p == name) {
            return Ok(Entity::TypeParameter(name.to_string()));
        }

        let mut mismatch = None;
        for enclosing in ctx.enclosing.iter().rev() {
            let full = join(enclosing, name);
            if self.symbols.probe(&full, arity, &mut mismatch) {
                return Ok(Entity::Type(full));
            }
        }

        for scope in ctx.scopes.iter().rev() {
            let full = join(&scope.namespace, name);
            if self.symbols.probe(&full, arity, &mut mismatch) {
                return Ok(Entity::Type(full));
            }
            if arity == 0 && self.symbols.is_namespace(&full) {
                return Ok(Entity::Namespace(full));
            }
            if arity == 0 {
                if let Some(entity) = scope.aliases.get(name) {
                    return Ok(entity.clone());
                }
            }

            let found: Vec<String> = scope
                .usings
                .iter()
                .map(|using| join(using, name))
                .filter(|full| self.symbols.probe(full, arity, &mut mismatch))
                .collect();
            match found.as_slice() {
                [] => {}
                [only] => return Ok(Entity::Type(only.clone())),
                [first, second, ..] => {
                    return Err(Diagnostic::error(
                        "CS0104",
                        format!("'{name}' is an ambiguous reference between '{first}' and '{second}'"),
                        line,
                    ));
                }
            }
        }

        if arity == 0 && NATIVE_TYPE_NAMES.contains(&name) {
            return Ok(Entity::Native(name.to_string()));
        }

        match mismatch {
            Some((full, existing)) => Err(arity_error(&full, existing, line)),
            None => Err(not_found(name, line)),
        }
    }

    /// Resolve a dotted name; each segment carries its type-argument count.
    fn resolve_qualified(
        &self,
        ctx: &Context,
        segments: &[(&str, usize)],
        global: bool,
        line: usize,
    ) -> Result<Entity, Diagnostic> {
        let Some((&(first, first_arity), rest)) = segments.split_first() else {
            return Err(not_found("", line));
        };

        let mut current = if global {
            let mut mismatch = None;
            if self.symbols.probe(first, first_arity, &mut mismatch) {
                Entity::Type(first.to_string())
            } else if first_arity == 0 && self.symbols.is_namespace(first) {
                Entity::Namespace(first.to_string())
            } else {
                return Err(Diagnostic::error(
                    "CS0400",
                    format!(
                        "The type or namespace name '{first}' could not be found in the global namespace (are you missing an assembly reference?)"
                    ),
                    line,
                ));
            }
        } else {
            self.resolve_simple(ctx, first, first_arity, line)?
        };

        for &(name, arity) in rest {
            let mut mismatch = None;
            current = match current {
                Entity::Namespace(namespace) => {
                    let full = join(&namespace, name);
                    if self.symbols.probe(&full, arity, &mut mismatch) {
                        Entity::Type(full)
                    } else if arity == 0 && self.symbols.is_namespace(&full) {
                        Entity::Namespace(full)
                    } else if let Some((full, existing)) = mismatch {
                        return Err(arity_error(&full, existing, line));
                    } else {
                        return Err(not_in_namespace(name, &namespace, line));
                    }
                }
                Entity::Type(ty) => {
                    let full = join(&ty, name);
                    if self.symbols.probe(&full, arity, &mut mismatch) {
                        Entity::Type(full)
                    } else if let Some((full, existing)) = mismatch {
                        return Err(arity_error(&full, existing, line));
                    } else {
                        return Err(not_in_type(name, &ty, line));
                    }
                }
                Entity::TypeParameter(ty) | Entity::Native(ty) => {
                    return Err(not_in_type(name, &ty, line));
                }
            };
        }

        Ok(current)
    }

    /// Resolve a type, reporting failures. Returns the qualified display.
    fn bind_type_syntax(&mut self, ctx: &Context, ty: &TypeSyntax) -> Option<String> {
        match ty {
            TypeSyntax::Predefined { keyword, .. } => Some(keyword.clone()),
            TypeSyntax::Named {
                segments,
                global,
                line,
            } => {
                let mut arguments = Vec::new();
                for segment in segments {
                    for argument in &segment.type_arguments {
                        arguments.push(self.bind_type_syntax(ctx, argument));
                    }
                }

                let parts: Vec<(&str, usize)> = segments
                    .iter()
                    .map(|s| (s.name.as_str(), s.type_arguments.len()))
                    .collect();
                let resolved = match self.resolve_qualified(ctx, &parts, *global, *line) {
                    Ok(Entity::Type(full)) => full,
                    Ok(Entity::TypeParameter(name) | Entity::Native(name)) => name,
                    Ok(Entity::Namespace(namespace)) => {
                        self.report(Diagnostic::error(
                            "CS0118",
                            format!("'{namespace}' is a namespace but is used like a type"),
                            *line,
                        ));
                        return None;
                    }
                    Err(diagnostic) => {
                        self.report(diagnostic);
                        return None;
                    }
                };

                let arguments: Vec<String> = arguments.into_iter().collect::<Option<_>>()?;
                if arguments.is_empty() {
                    Some(resolved)
                } else {
                    Some(format!("{resolved}<{}>", arguments.join(", ")))
                }
            }
            TypeSyntax::Array { element, rank } => self
                .bind_type_syntax(ctx, element)
                .map(|e| format!("{e}[{}]", ",".repeat(rank.saturating_sub(1)))),
            TypeSyntax::Nullable(inner) => self.bind_type_syntax(ctx, inner).map(|i| format!("{i}?")),
            TypeSyntax::Tuple { elements, .. } => {
                let bound: Vec<Option<String>> = elements
                    .iter()
                    .map(|e| self.bind_type_syntax(ctx, e))
                    .collect();
                let bound: Vec<String> = bound.into_iter().collect::<Option<_>>()?;
                Some(format!("({})", bound.join(", ")))
            }
        }
    }

    // ------------------------------------------------------------------
    // Usings
    // ------------------------------------------------------------------

    /// Resolve the usings of the namespace `namespace` nested in `outer`.
    fn bind_usings(&mut self, usings: &[UsingDirective], outer: &Context, namespace: &str) -> Scope {
        let mut lookup = outer.clone();
        lookup.scopes.push(Scope::new(namespace));

        let mut scope = Scope::new(namespace);
        for using in usings {
            if using.target.parts.is_empty() {
                continue;
            }
            let target = using.target.to_string();
            let parts: Vec<(&str, usize)> = using.target.parts.iter().map(|p| (p.as_str(), 0)).collect();

            let resolved = match self.resolve_qualified(&lookup, &parts, false, using.line) {
                Ok(entity) => entity,
                Err(diagnostic) => {
                    self.report(diagnostic);
                    continue;
                }
            };

            if let Some(alias) = &using.alias {
                scope.aliases.insert(alias.clone(), resolved);
                continue;
            }

            match (using.is_static, resolved) {
                (true, Entity::Namespace(_)) => self.report(Diagnostic::error(
                    "CS7007",
                    format!(
                        "A 'using static' directive can only be applied to types; '{target}' is a namespace not a type"
                    ),
                    using.line,
                )),
                (true, _) => {}
                (false, Entity::Namespace(full)) => {
                    if scope.usings.contains(&full) {
                        self.report(Diagnostic::warning(
                            "CS0105",
                            format!(
                                "The using directive for '{target}' appeared previously in this namespace"
                            ),
                            using.line,
                        ));
                    } else {
                        scope.usings.push(full);
                    }
                }
                (false, _) => self.report(Diagnostic::error(
                    "CS0138",
                    format!(
                        "A 'using namespace' directive can only be applied to namespaces; '{target}' is a type not a namespace. Consider a 'using static' directive instead"
                    ),
                    using.line,
                )),
            }
        }

        scope
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    fn bind_members(&mut self, members: &[NamespaceMember], ctx: &Context) {
        for member in members {
            match member {
                NamespaceMember::Namespace(ns) => {
                    let mut inner = ctx.clone();
                    let mut current = ctx.namespace().to_string();
                    let parts = &ns.name.parts;
                    for (i, part) in parts.iter().enumerate() {
                        current = join(&current, part);
                        if i + 1 < parts.len() {
                            inner.scopes.push(Scope::new(current.clone()));
                        }
                    }
                    let scope = self.bind_usings(&ns.usings, &inner, &current);
                    inner.scopes.push(scope);
                    self.bind_members(&ns.members, &inner);
                }
                NamespaceMember::Type(ty) => {
                    let namespace = ctx.namespace().to_string();
                    self.bind_type_decl(ty, ctx, &namespace, &namespace, "");
                }
            }
        }
    }

    /// Resolve attribute names. Returns the serialized member name carried
    /// by a JSON annotation, if any.
    fn bind_attributes(&mut self, attributes: &[AttributeSyntax], ctx: &Context) -> Option<String> {
        let mut serialized_name = None;

        for attribute in attributes {
            let Some((last, prefix)) = attribute.name.parts.split_last() else {
                continue;
            };

            let candidates = if last.ends_with("Attribute") {
                vec![last.clone()]
            } else {
                vec![format!("{last}Attribute"), last.clone()]
            };

            let mut errors = Vec::new();
            let mut non_attribute = None;
            let mut resolved = false;
            for candidate in &candidates {
                let mut segments: Vec<(&str, usize)> = prefix.iter().map(|p| (p.as_str(), 0)).collect();
                segments.push((candidate.as_str(), 0));

                match self.resolve_qualified(ctx, &segments, false, attribute.line) {
                    Ok(Entity::Type(full)) if full.ends_with("Attribute") => {
                        resolved = true;
                        break;
                    }
                    Ok(Entity::Type(full)) => {
                        non_attribute.get_or_insert(full);
                    }
                    Ok(Entity::Namespace(namespace)) => errors.push(Diagnostic::error(
                        "CS0118",
                        format!("'{namespace}' is a namespace but is used like a type"),
                        attribute.line,
                    )),
                    Ok(_) => {}
                    Err(diagnostic) => errors.push(diagnostic),
                }
            }

            if !resolved {
                match non_attribute {
                    Some(full) => self.report(Diagnostic::error(
                        "CS0616",
                        format!("'{full}' is not an attribute class"),
                        attribute.line,
                    )),
                    None => {
                        for error in errors {
                            self.report(error);
                        }
                    }
                }
            }

            let short = last.strip_suffix("Attribute").unwrap_or(last.as_str());
            if SERIALIZED_NAME_ATTRIBUTES.contains(&short) {
                if let Some(value) = &attribute.first_string_argument {
                    serialized_name = Some(value.clone());
                }
            }
        }

        serialized_name
    }

    fn bind_type_decl(
        &mut self,
        ty: &TypeDecl,
        ctx: &Context,
        namespace: &str,
        container: &str,
        outer_name: &str,
    ) {
        if ty.name.is_empty() {
            return;
        }

        let full = join(container, &ty.name);
        let table_name = join(outer_name, &ty.name);

        let mut inner = ctx.clone();
        inner.enclosing.push(full.clone());
        inner.type_parameters.extend(ty.type_parameters.iter().cloned());

        self.bind_attributes(&ty.attributes, &inner);
        let base_types = ty
            .base_types
            .iter()
            .filter_map(|base| self.bind_type_syntax(&inner, base))
            .collect();

        let mut entry = TypeEntry {
            namespace: namespace.to_string(),
            name: table_name.clone(),
            kind: ty.kind,
            type_parameters: ty.type_parameters.clone(),
            base_types,
            members: Vec::new(),
        };

        // Record primary constructor parameters become properties.
        for parameter in &ty.parameters {
            let serialized_name = self.bind_attributes(&parameter.attributes, &inner);
            let type_name = self.bind_type_syntax(&inner, &parameter.ty);
            entry.members.push(MemberEntry {
                name: parameter.name.clone(),
                kind: MemberKind::Property,
                type_name,
                serialized_name,
            });
        }

        let mut names: HashMap<String, NameUse> = HashMap::new();
        let mut nested = Vec::new();

        for member in &ty.members {
            match member {
                MemberDecl::Field(field) => {
                    let serialized_name = self.bind_attributes(&field.attributes, &inner);
                    let type_name = self.bind_type_syntax(&inner, &field.ty);
                    if field.ty.is_void() {
                        self.report(Diagnostic::error(
                            "CS0670",
                            "Field cannot have void type",
                            field.line,
                        ));
                    }
                    for name in &field.names {
                        self.check_member_name(ty, &full, &mut names, name, NameUse::Other, field.line);
                        entry.members.push(MemberEntry {
                            name: name.clone(),
                            kind: MemberKind::Field,
                            type_name: type_name.clone(),
                            serialized_name: serialized_name.clone(),
                        });
                    }
                }
                MemberDecl::Property(property) => {
                    let serialized_name = self.bind_attributes(&property.attributes, &inner);
                    let type_name = self.bind_type_syntax(&inner, &property.ty);
                    let qualified = format!("{full}.{}", property.name);

                    if property.ty.is_void() {
                        self.report(Diagnostic::error(
                            "CS0547",
                            format!("'{qualified}': property or indexer cannot have void type"),
                            property.line,
                        ));
                    }

                    let mut seen = HashSet::new();
                    for accessor in &property.accessors {
                        if !seen.insert(accessor.as_str()) {
                            self.report(Diagnostic::error(
                                "CS1007",
                                "Property accessor already defined",
                                property.line,
                            ));
                        }
                    }

                    if property.accessors.is_empty() && !property.expression_bodied {
                        self.report(Diagnostic::error(
                            "CS0548",
                            format!("'{qualified}': property or indexer must have at least one accessor"),
                            property.line,
                        ));
                    }

                    self.check_member_name(ty, &full, &mut names, &property.name, NameUse::Other, property.line);
                    entry.members.push(MemberEntry {
                        name: property.name.clone(),
                        kind: MemberKind::Property,
                        type_name,
                        serialized_name,
                    });
                }
                MemberDecl::Method(method) => {
                    let mut method_ctx = inner.clone();
                    method_ctx.type_parameters.extend(method.type_parameters.iter().cloned());

                    self.bind_attributes(&method.attributes, &method_ctx);
                    let type_name = match &method.return_type {
                        Some(ret) if !ret.is_void() => self.bind_type_syntax(&method_ctx, ret),
                        _ => None,
                    };
                    for parameter in &method.parameters {
                        self.bind_attributes(&parameter.attributes, &method_ctx);
                        self.bind_type_syntax(&method_ctx, &parameter.ty);
                    }

                    self.check_member_name(ty, &full, &mut names, &method.name, NameUse::Method, method.line);
                    entry.members.push(MemberEntry {
                        name: method.name.clone(),
                        kind: MemberKind::Method,
                        type_name,
                        serialized_name: None,
                    });
                }
                MemberDecl::Constructor(constructor) => {
                    self.bind_attributes(&constructor.attributes, &inner);
                    for parameter in &constructor.parameters {
                        self.bind_attributes(&parameter.attributes, &inner);
                        self.bind_type_syntax(&inner, &parameter.ty);
                    }
                    entry.members.push(MemberEntry {
                        name: constructor.name.clone(),
                        kind: MemberKind::Constructor,
                        type_name: None,
                        serialized_name: None,
                    });
                }
                MemberDecl::EnumMember(value) => {
                    let serialized_name = self.bind_attributes(&value.attributes, &inner);
                    self.check_member_name(ty, &full, &mut names, &value.name, NameUse::Other, value.line);
                    entry.members.push(MemberEntry {
                        name: value.name.clone(),
                        kind: MemberKind::EnumValue,
                        type_name: Some(full.clone()),
                        serialized_name,
                    });
                }
                MemberDecl::NestedType(nested_type) => {
                    let usage = if nested_type.is_partial() {
                        NameUse::PartialType
                    } else {
                        NameUse::Other
                    };
                    self.check_member_name(ty, &full, &mut names, &nested_type.name, usage, nested_type.line);
                    nested.push(nested_type);
                }
            }
        }

        self.push_entry(entry);
        for nested_type in nested {
            self.bind_type_decl(nested_type, &inner, namespace, &full, &table_name);
        }
    }

    fn check_member_name(
        &mut self,
        ty: &TypeDecl,
        full: &str,
        names: &mut HashMap<String, NameUse>,
        name: &str,
        usage: NameUse,
        line: usize,
    ) {
        if name.is_empty() {
            return;
        }

        if name == ty.name && ty.kind != TypeKind::Enum {
            self.report(Diagnostic::error(
                "CS0542",
                format!("'{name}': member names cannot be the same as their enclosing type"),
                line,
            ));
        }

        match names.get(name) {
            None => {
                names.insert(name.to_string(), usage);
            }
            Some(&previous) => {
                let allowed = matches!(
                    (previous, usage),
                    (NameUse::Method, NameUse::Method) | (NameUse::PartialType, NameUse::PartialType)
                );
                if !allowed {
                    self.report(Diagnostic::error(
                        "CS0102",
                        format!("The type '{full}' already contains a definition for '{name}'"),
                        line,
                    ));
                }
            }
        }
    }

    /// Partial declarations merge into one entry.
    fn push_entry(&mut self, entry: TypeEntry) {
        let existing = self.table.types.iter_mut().find(|t| {
            t.namespace == entry.namespace
                && t.name == entry.name
                && t.type_parameters.len() == entry.type_parameters.len()
        });

        match existing {
            Some(existing) => {
                existing.members.extend(entry.members);
                for base in entry.base_types {
                    if !existing.base_types.contains(&base) {
                        existing.base_types.push(base);
                    }
                }
            }
            None => self.table.types.push(entry),
        }
    }
}
