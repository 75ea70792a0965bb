//! Abstract description of a generated type, independent of formatting.

/// Reference to a target-language type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub package: String,
    /// Simple names, outermost first (`["Map", "Entry"]`).
    pub names: Vec<String>,
    pub nullable: bool,
}

impl TypeRef {
    pub fn new(package: &str, names: &[&str]) -> Self {
        Self {
            package: package.to_string(),
            names: names.iter().map(|name| name.to_string()).collect(),
            nullable: false,
        }
    }

    /// Type variable or other name that is never imported.
    pub fn variable(name: &str) -> Self {
        Self::new("", &[name])
    }

    pub fn simple_name(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    pub fn canonical_name(&self) -> String {
        let names = self.names.join(".");
        if self.package.is_empty() {
            names
        } else {
            format!("{}.{names}", self.package)
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn non_null(self) -> Self {
        self.with_nullable(false)
    }

    pub fn is_primitive_array(&self) -> bool {
        self.package == "kotlin" && self.names.len() == 1 && self.simple_name().ends_with("Array")
    }
}

/// Placeholder argument of a [`CodeBlock`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// `%T`: type reference, imported where possible.
    Type(TypeRef),
    /// `%N`: identifier, escaped when it is a keyword.
    Name(String),
    /// `%S`: string literal.
    Str(String),
    /// `%L`: emitted verbatim.
    Lit(String),
}

/// A fragment of code with `%T`, `%N`, `%S`, `%L` placeholders (`%%` for a
/// literal percent sign).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub format: String,
    pub args: Vec<Arg>,
}

impl CodeBlock {
    pub fn new(format: impl Into<String>, args: Vec<Arg>) -> Self {
        Self {
            format: format.into(),
            args,
        }
    }

    pub fn lit(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }

    pub fn name(name: &str) -> Self {
        Self::new("%N", vec![Arg::Name(name.to_string())])
    }

    /// `<receiver>.<name>` with the member name escaped.
    pub fn member(receiver: &str, name: &str) -> Self {
        Self::new(
            format!("{receiver}.%N"),
            vec![Arg::Name(name.to_string())],
        )
    }

    pub fn is_name(&self, name: &str) -> bool {
        self.format == "%N" && matches!(self.args.as_slice(), [Arg::Name(n)] if n == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Statement(CodeBlock),
    /// Opens a block: the code followed by ` {`.
    Open(CodeBlock),
    /// Closes the innermost block with the given text (usually `}`).
    Close(String),
}

impl Line {
    pub fn statement(format: impl Into<String>, args: Vec<Arg>) -> Self {
        Self::Statement(CodeBlock::new(format, args))
    }

    pub fn open(format: impl Into<String>, args: Vec<Arg>) -> Self {
        Self::Open(CodeBlock::new(format, args))
    }

    pub fn close() -> Self {
        Self::Close("}".to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Open,
    Data,
    Override,
    Operator,
}

impl Modifier {
    pub fn keyword(self) -> &'static str {
        match self {
            Modifier::Open => "open",
            Modifier::Data => "data",
            Modifier::Override => "override",
            Modifier::Operator => "operator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UseSite {
    Get,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationValue {
    Int(i64),
    Bool(bool),
    Str(String),
    /// Enum constant or other type-qualified constant.
    Const(TypeRef),
    Array(Vec<AnnotationValue>),
    Nested(AnnotationSpec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationSpec {
    pub ty: TypeRef,
    pub use_site: Option<UseSite>,
    pub members: Vec<(String, AnnotationValue)>,
}

impl AnnotationSpec {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            use_site: None,
            members: Vec::new(),
        }
    }

    pub fn on_getter(mut self) -> Self {
        self.use_site = Some(UseSite::Get);
        self
    }

    pub fn member(mut self, name: &str, value: AnnotationValue) -> Self {
        self.members.push((name.to_string(), value));
        self
    }

    pub fn value(&self, name: &str) -> Option<&AnnotationValue> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub ty: TypeRef,
    pub default: Option<CodeBlock>,
}

impl ParamSpec {
    pub fn new(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            default: None,
        }
    }

    pub fn with_default(mut self, default: CodeBlock) -> Self {
        self.default = Some(default);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunSpec {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    /// `(name, bound)` pairs.
    pub type_variables: Vec<(String, TypeRef)>,
    pub params: Vec<ParamSpec>,
    pub returns: Option<TypeRef>,
    /// Constructors only: arguments of the `this(...)` delegation.
    pub delegate: Option<Vec<CodeBlock>>,
    /// `None` for abstract members.
    pub body: Option<Vec<Line>>,
}

pub const CONSTRUCTOR: &str = "constructor";

impl FunSpec {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            modifiers: Vec::new(),
            type_variables: Vec::new(),
            params: Vec::new(),
            returns: None,
            delegate: None,
            body: Some(Vec::new()),
        }
    }

    pub fn constructor() -> Self {
        Self::new(CONSTRUCTOR)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: TypeRef) -> Self {
        self.returns = Some(ty);
        self
    }

    pub fn type_variable(mut self, name: &str, bound: TypeRef) -> Self {
        self.type_variables.push((name.to_string(), bound));
        self
    }

    pub fn delegate_to_this(mut self, args: Vec<CodeBlock>) -> Self {
        self.delegate = Some(args);
        self
    }

    pub fn abstract_member(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.body.get_or_insert_with(Vec::new).push(line);
        self
    }

    pub fn statement(self, format: impl Into<String>, args: Vec<Arg>) -> Self {
        self.line(Line::statement(format, args))
    }

    pub fn lines(&self) -> &[Line] {
        self.body.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: String,
    pub ty: TypeRef,
    pub mutable: bool,
    pub modifiers: Vec<Modifier>,
    pub initializer: Option<CodeBlock>,
    pub kdoc: Option<String>,
    pub annotations: Vec<AnnotationSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    DataHolder,
    Contract,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescription {
    pub kind: TypeKind,
    pub package: String,
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub super_type: Option<TypeRef>,
    pub implemented_contracts: Vec<TypeRef>,
    pub primary_constructor: Option<FunSpec>,
    pub constructors: Vec<FunSpec>,
    pub properties: Vec<PropertySpec>,
    pub functions: Vec<FunSpec>,
    pub annotations: Vec<AnnotationSpec>,
}

impl TypeDescription {
    pub fn new(kind: TypeKind, package: &str, name: &str) -> Self {
        Self {
            kind,
            package: package.to_string(),
            name: name.to_string(),
            modifiers: Vec::new(),
            super_type: None,
            implemented_contracts: Vec::new(),
            primary_constructor: None,
            constructors: Vec::new(),
            properties: Vec::new(),
            functions: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn function(&self, name: &str) -> Option<&FunSpec> {
        self.functions.iter().find(|function| function.name == name)
    }
}
