use std::collections::{BTreeMap, BTreeSet};

use super::SourceEmitter;
use super::spec::{
    AnnotationSpec, AnnotationValue, Arg, CodeBlock, FunSpec, Line, Modifier, ParamSpec,
    PropertySpec, TypeDescription, TypeKind, TypeRef, UseSite,
};

const INDENT: &str = "  ";
const LINE_LIMIT: usize = 100;

/// Packages whose types are visible without an import.
const DEFAULT_IMPORTS: &[&str] = &["kotlin"];

const KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Back-quotes keywords and names that are not plain identifiers.
pub fn escape_identifier(name: &str) -> String {
    if name.len() > 1 && name.starts_with('`') && name.ends_with('`') {
        return name.to_string();
    }
    let plain = name
        .chars()
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && name.chars().all(|ch| ch.is_alphanumeric() || ch == '_');
    if plain && !KEYWORDS.contains(&name) {
        name.to_string()
    } else {
        format!("`{name}`")
    }
}

pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}

/// Kotlin block comments nest, so both delimiters are defused inside KDoc.
pub fn kdoc_text(line: &str) -> String {
    line.replace("*/", "*&#47;").replace("/*", "&#47;*")
}

/// Tracks which simple name refers to which type in the file being rendered.
/// The first type to use a simple name claims it; later types with the same
/// simple name are written fully qualified.
#[derive(Debug)]
struct Imports {
    package: String,
    claimed: BTreeMap<String, String>,
    imports: BTreeSet<String>,
}

impl Imports {
    fn new(package: &str, declared: &str) -> Self {
        let mut claimed = BTreeMap::new();
        claimed.insert(declared.to_string(), package.to_string());
        Self {
            package: package.to_string(),
            claimed,
            imports: BTreeSet::new(),
        }
    }

    fn reference(&mut self, ty: &TypeRef) -> String {
        let names = ty.names.join(".");
        let rendered = match ty.names.first() {
            Some(top) if !ty.package.is_empty() => match self.claimed.get(top) {
                Some(owner) if *owner == ty.package => names,
                Some(_) => ty.canonical_name(),
                None => {
                    self.claimed.insert(top.clone(), ty.package.clone());
                    if ty.package != self.package && !DEFAULT_IMPORTS.contains(&ty.package.as_str()) {
                        self.imports.insert(format!("{}.{top}", ty.package));
                    }
                    names
                }
            },
            _ => names,
        };
        if ty.nullable {
            format!("{rendered}?")
        } else {
            rendered
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct KotlinEmitter;

impl SourceEmitter for KotlinEmitter {
    fn file_extension(&self) -> &'static str {
        "kt"
    }

    fn render(&self, description: &TypeDescription) -> String {
        let mut writer = Writer::new(description);
        writer.type_description(description);

        let mut out = String::new();
        out.push_str("/*\n * This file is generated by schema_codegen.\n */\n");
        if !description.package.is_empty() {
            out.push_str(&format!("package {}\n\n", description.package));
        }
        if !writer.imports.imports.is_empty() {
            for import in &writer.imports.imports {
                out.push_str(&format!("import {import}\n"));
            }
            out.push('\n');
        }
        out.push_str(&writer.out);
        out
    }
}

struct Writer {
    imports: Imports,
    out: String,
    level: usize,
}

impl Writer {
    fn new(description: &TypeDescription) -> Self {
        Self {
            imports: Imports::new(&description.package, &description.name),
            out: String::new(),
            level: 0,
        }
    }

    fn indent(&self, level: usize) -> String {
        INDENT.repeat(level)
    }

    fn emit_line(&mut self, text: &str) {
        if text.is_empty() {
            self.out.push('\n');
            return;
        }
        let indent = self.indent(self.level);
        self.out.push_str(&indent);
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn code(&mut self, block: &CodeBlock) -> String {
        let mut out = String::new();
        let mut args = block.args.iter();
        let mut chars = block.format.chars();
        while let Some(ch) = chars.next() {
            if ch != '%' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('%') => out.push('%'),
                Some(placeholder) => match (placeholder, args.next()) {
                    ('T', Some(Arg::Type(ty))) => out.push_str(&self.imports.reference(ty)),
                    ('N', Some(Arg::Name(name))) => out.push_str(&escape_identifier(name)),
                    ('S', Some(Arg::Str(value))) => out.push_str(&string_literal(value)),
                    (_, Some(Arg::Lit(text))) => out.push_str(text),
                    (_, Some(Arg::Type(ty))) => out.push_str(&self.imports.reference(ty)),
                    (_, Some(Arg::Name(name))) => out.push_str(&escape_identifier(name)),
                    (_, Some(Arg::Str(value))) => out.push_str(&string_literal(value)),
                    (other, None) => {
                        out.push('%');
                        out.push(other);
                    }
                },
                None => out.push('%'),
            }
        }
        out
    }

    fn annotation(&mut self, spec: &AnnotationSpec, nested: bool, level: usize) -> String {
        let mut head = String::new();
        if !nested {
            head.push('@');
            if let Some(UseSite::Get) = spec.use_site {
                head.push_str("get:");
            }
        }
        head.push_str(&self.imports.reference(&spec.ty.clone().non_null()));
        if spec.members.is_empty() {
            return head;
        }

        let inline: Vec<String> = spec
            .members
            .iter()
            .map(|(name, value)| format!("{name} = {}", self.value(value, None)))
            .collect();
        let single = format!("{head}({})", inline.join(", "));
        if single.len() + level * INDENT.len() <= LINE_LIMIT {
            return single;
        }

        let inner = self.indent(level + 1);
        let members: Vec<String> = spec
            .members
            .iter()
            .map(|(name, value)| format!("{inner}{name} = {}", self.value(value, Some(level + 1))))
            .collect();
        format!("{head}(\n{}\n{})", members.join(",\n"), self.indent(level))
    }

    /// `level` is `Some` when the value may be broken over several lines.
    fn value(&mut self, value: &AnnotationValue, level: Option<usize>) -> String {
        match value {
            AnnotationValue::Int(number) => number.to_string(),
            AnnotationValue::Bool(flag) => flag.to_string(),
            AnnotationValue::Str(text) => string_literal(text),
            AnnotationValue::Const(ty) => self.imports.reference(&ty.clone().non_null()),
            AnnotationValue::Nested(spec) => self.annotation(spec, true, level.unwrap_or(0)),
            AnnotationValue::Array(items) => {
                let inline: Vec<String> = items.iter().map(|item| self.value(item, None)).collect();
                let single = format!("[{}]", inline.join(", "));
                match level {
                    Some(level) if single.len() + level * INDENT.len() > LINE_LIMIT => {
                        let inner = self.indent(level + 1);
                        let lines: Vec<String> = items
                            .iter()
                            .map(|item| format!("{inner}{}", self.value(item, Some(level + 1))))
                            .collect();
                        format!("[\n{}\n{}]", lines.join(",\n"), self.indent(level))
                    }
                    _ => single,
                }
            }
        }
    }

    fn annotations(&mut self, annotations: &[AnnotationSpec]) {
        for spec in annotations {
            let text = self.annotation(spec, false, self.level);
            self.emit_line(&text);
        }
    }

    fn kdoc(&mut self, kdoc: Option<&str>) {
        if let Some(kdoc) = kdoc.filter(|kdoc| !kdoc.trim().is_empty()) {
            self.emit_line("/**");
            for line in kdoc.lines() {
                self.emit_line(format!(" * {}", kdoc_text(line)).trim_end());
            }
            self.emit_line(" */");
        }
    }

    fn modifiers(modifiers: &[Modifier]) -> String {
        modifiers
            .iter()
            .map(|modifier| format!("{} ", modifier.keyword()))
            .collect()
    }

    fn param(&mut self, param: &ParamSpec) -> String {
        let mut text = format!(
            "{}: {}",
            escape_identifier(&param.name),
            self.imports.reference(&param.ty)
        );
        if let Some(default) = &param.default {
            text.push_str(" = ");
            text.push_str(&self.code(default));
        }
        text
    }

    /// Properties declared by the primary constructor: those initialized by
    /// the parameter of the same name.
    fn merged<'d>(description: &'d TypeDescription) -> BTreeMap<&'d str, &'d PropertySpec> {
        let Some(primary) = &description.primary_constructor else {
            return BTreeMap::new();
        };
        description
            .properties
            .iter()
            .filter(|property| {
                property
                    .initializer
                    .as_ref()
                    .is_some_and(|init| init.is_name(&property.name))
                    && primary.params.iter().any(|param| param.name == property.name)
            })
            .map(|property| (property.name.as_str(), property))
            .collect()
    }

    fn type_description(&mut self, description: &TypeDescription) {
        let merged = Self::merged(description);

        self.annotations(&description.annotations);
        let keyword = match description.kind {
            TypeKind::DataHolder => "class",
            TypeKind::Contract => "interface",
        };
        let mut header = format!(
            "{}{keyword} {}",
            Self::modifiers(&description.modifiers),
            escape_identifier(&description.name)
        );

        if let Some(primary) = &description.primary_constructor {
            self.primary_constructor(&mut header, primary, &merged);
        }

        let mut supertypes = Vec::new();
        if let Some(super_type) = &description.super_type {
            supertypes.push(format!("{}()", self.imports.reference(&super_type.clone().non_null())));
        }
        for contract in &description.implemented_contracts {
            supertypes.push(self.imports.reference(&contract.clone().non_null()));
        }
        if !supertypes.is_empty() {
            header.push_str(" : ");
            header.push_str(&supertypes.join(", "));
        }

        let members: Vec<&PropertySpec> = description
            .properties
            .iter()
            .filter(|property| !merged.contains_key(property.name.as_str()))
            .collect();
        let empty = members.is_empty()
            && description.constructors.is_empty()
            && description.functions.is_empty();
        if empty {
            self.emit_line(&header);
            return;
        }

        self.emit_line(&format!("{header} {{"));
        self.level += 1;
        let mut first = true;
        for constructor in &description.constructors {
            self.separate(&mut first);
            self.function(constructor, description.kind);
        }
        for property in members {
            self.separate(&mut first);
            self.property(property, description.kind);
        }
        for function in &description.functions {
            self.separate(&mut first);
            self.function(function, description.kind);
        }
        self.level -= 1;
        self.emit_line("}");
    }

    fn separate(&mut self, first: &mut bool) {
        if !*first {
            self.emit_line("");
        }
        *first = false;
    }

    fn primary_constructor(
        &mut self,
        header: &mut String,
        primary: &FunSpec,
        merged: &BTreeMap<&str, &PropertySpec>,
    ) {
        if primary.params.is_empty() {
            header.push_str("()");
            return;
        }

        // Emitted with the header, so it goes straight into the header text.
        let inner = self.indent(self.level + 1);
        let mut params = Vec::new();
        for param in &primary.params {
            let mut text = String::new();
            match merged.get(param.name.as_str()) {
                Some(property) => {
                    if let Some(kdoc) = property.kdoc.as_deref().filter(|kdoc| !kdoc.is_empty()) {
                        text.push_str(&format!("{inner}/**\n"));
                        for line in kdoc.lines() {
                            text.push_str(format!("{inner} * {}", kdoc_text(line)).trim_end());
                            text.push('\n');
                        }
                        text.push_str(&format!("{inner} */\n"));
                    }
                    for spec in &property.annotations {
                        let annotation = self.annotation(spec, false, self.level + 1);
                        text.push_str(&format!("{inner}{annotation}\n"));
                    }
                    let binding = if property.mutable { "var" } else { "val" };
                    text.push_str(&format!(
                        "{inner}{}{binding} {}",
                        Self::modifiers(&property.modifiers),
                        self.param(param)
                    ));
                }
                None => text.push_str(&format!("{inner}{}", self.param(param))),
            }
            params.push(text);
        }
        header.push_str(&format!("(\n{}\n{})", params.join(",\n"), self.indent(self.level)));
    }

    fn property(&mut self, property: &PropertySpec, kind: TypeKind) {
        self.kdoc(property.kdoc.as_deref());
        self.annotations(&property.annotations);
        let binding = if property.mutable { "var" } else { "val" };
        let mut text = format!(
            "{}{binding} {}: {}",
            Self::modifiers(&property.modifiers),
            escape_identifier(&property.name),
            self.imports.reference(&property.ty)
        );
        if let (Some(initializer), TypeKind::DataHolder) = (&property.initializer, kind) {
            text.push_str(" = ");
            text.push_str(&self.code(initializer));
        }
        self.emit_line(&text);
    }

    fn function(&mut self, function: &FunSpec, kind: TypeKind) {
        let mut signature = Self::modifiers(&function.modifiers);
        if function.is_constructor() {
            signature.push_str("constructor");
        } else {
            signature.push_str("fun ");
            if !function.type_variables.is_empty() {
                let variables: Vec<String> = function
                    .type_variables
                    .iter()
                    .map(|(name, bound)| {
                        format!("{name} : {}", self.imports.reference(&bound.clone().non_null()))
                    })
                    .collect();
                signature.push_str(&format!("<{}> ", variables.join(", ")));
            }
            signature.push_str(&escape_identifier(&function.name));
        }

        let params: Vec<String> = function.params.iter().map(|param| self.param(param)).collect();
        let mut tail = String::new();
        if let Some(returns) = &function.returns {
            tail.push_str(&format!(": {}", self.imports.reference(returns)));
        }
        if let Some(delegate) = &function.delegate {
            let args: Vec<String> = delegate.iter().map(|arg| self.code(arg)).collect();
            tail.push_str(&format!(" : this({})", args.join(", ")));
        }

        let single = format!("{signature}({}){tail}", params.join(", "));
        let declaration = if single.len() + self.level * INDENT.len() <= LINE_LIMIT {
            single
        } else {
            let inner = self.indent(self.level + 1);
            let lines: Vec<String> = params.iter().map(|param| format!("{inner}{param}")).collect();
            format!(
                "{signature}(\n{}\n{}){tail}",
                lines.join(",\n"),
                self.indent(self.level)
            )
        };

        let body = match (&function.body, kind) {
            (Some(body), _) if !body.is_empty() => body,
            (None, _) | (Some(_), TypeKind::Contract) => {
                self.emit_line(&declaration);
                return;
            }
            (Some(_), TypeKind::DataHolder) if function.is_constructor() => {
                self.emit_line(&declaration);
                return;
            }
            (Some(body), TypeKind::DataHolder) => body,
        };

        self.emit_line(&format!("{declaration} {{"));
        self.level += 1;
        for line in body {
            match line {
                Line::Statement(code) => {
                    let text = self.code(code);
                    self.emit_line(&text);
                }
                Line::Open(code) => {
                    let text = self.code(code);
                    self.emit_line(&format!("{text} {{"));
                    self.level += 1;
                }
                Line::Close(text) => {
                    self.level = self.level.saturating_sub(1);
                    self.emit_line(text);
                }
            }
        }
        self.level -= 1;
        self.emit_line("}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::spec::{AnnotationValue, FunSpec, ParamSpec};

    fn string_type() -> TypeRef {
        TypeRef::new("kotlin", &["String"]).with_nullable(true)
    }

    fn property(name: &str, initializer: Option<CodeBlock>) -> PropertySpec {
        PropertySpec {
            name: name.to_string(),
            ty: string_type(),
            mutable: true,
            modifiers: Vec::new(),
            initializer,
            kdoc: None,
            annotations: Vec::new(),
        }
    }

    #[test]
    fn keywords_and_dollar_names_are_quoted() {
        assert_eq!(escape_identifier("when"), "`when`");
        assert_eq!(escape_identifier("a$b"), "`a$b`");
        assert_eq!(escape_identifier("name"), "name");
        assert_eq!(escape_identifier("`in`"), "`in`");
    }

    #[test]
    fn string_literals_escape_templates() {
        assert_eq!(string_literal("a$b \"c\""), "\"a\\$b \\\"c\\\"\"");
    }

    #[test]
    fn colliding_simple_names_are_qualified() {
        let mut description = TypeDescription::new(TypeKind::Contract, "com.acme", "IBook");
        let mut first = property("created", None);
        first.ty = TypeRef::new("java.sql", &["Date"]).with_nullable(true);
        let mut second = property("updated", None);
        second.ty = TypeRef::new("java.util", &["Date"]).with_nullable(true);
        description.properties = vec![first, second];

        let text = KotlinEmitter.render(&description);
        assert!(text.contains("import java.sql.Date\n"));
        assert!(!text.contains("import java.util.Date"));
        assert!(text.contains("var created: Date?"));
        assert!(text.contains("var updated: java.util.Date?"));
    }

    #[test]
    fn parameter_initialized_properties_move_into_the_constructor() {
        let mut description = TypeDescription::new(TypeKind::DataHolder, "com.acme", "Book");
        description.modifiers = vec![Modifier::Open];
        description.primary_constructor = Some(
            FunSpec::constructor()
                .param(ParamSpec::new("title", string_type()).with_default(CodeBlock::lit("null"))),
        );
        description.properties = vec![property("title", Some(CodeBlock::name("title")))];

        let text = KotlinEmitter.render(&description);
        assert!(text.contains("open class Book(\n  var title: String? = null\n)\n"), "{text}");
        assert!(!text.contains("import kotlin"));
    }

    #[test]
    fn comment_delimiters_in_kdoc_are_defused() {
        assert_eq!(kdoc_text("ends */ here"), "ends *&#47; here");
        assert_eq!(kdoc_text("a /* b"), "a &#47;* b");

        let mut description = TypeDescription::new(TypeKind::DataHolder, "com.acme", "Book");
        description.primary_constructor = Some(
            FunSpec::constructor()
                .param(ParamSpec::new("id", string_type()).with_default(CodeBlock::lit("null"))),
        );
        let mut merged = property("id", Some(CodeBlock::name("id")));
        merged.kdoc = Some("Field for [book.id]. ends */ here".to_string());
        let mut member = property("note", Some(CodeBlock::lit("null")));
        member.kdoc = Some("opens /* never closes".to_string());
        description.properties = vec![merged, member];

        let text = KotlinEmitter.render(&description);
        assert!(text.contains("   * Field for [book.id]. ends *&#47; here\n   */\n"), "{text}");
        assert!(text.contains("   * opens &#47;* never closes\n"), "{text}");
        assert_eq!(text.matches("*/").count(), text.matches("/*").count());
    }

    #[test]
    fn long_annotations_break_over_lines() {
        let columns = (0..12)
            .map(|i| AnnotationValue::Str(format!("column_number_{i}")))
            .collect();
        let spec = AnnotationSpec::new(TypeRef::new("javax.persistence", &["UniqueConstraint"]))
            .member("columnNames", AnnotationValue::Array(columns));
        let mut description = TypeDescription::new(TypeKind::Contract, "com.acme", "IWide");
        description.annotations = vec![spec];

        let text = KotlinEmitter.render(&description);
        assert!(text.contains("@UniqueConstraint(\n  columnNames = [\n    \"column_number_0\",\n"));
        assert!(text.contains("import javax.persistence.UniqueConstraint\n"));
    }

    #[test]
    fn abstract_functions_have_no_body() {
        let mut description = TypeDescription::new(TypeKind::Contract, "p", "IBook");
        description.functions = vec![
            FunSpec::new("from")
                .param(ParamSpec::new("from", TypeRef::new("p", &["IBook"])))
                .abstract_member(),
        ];

        let text = KotlinEmitter.render(&description);
        assert!(text.contains("interface IBook {\n  fun from(from: IBook)\n}\n"), "{text}");
    }
}
