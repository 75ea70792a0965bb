//! Member builders. Each one is a pure function of the table plan and the
//! data-holder shape; the synthesizers only decide which ones to call.

use super::{COPY_CHUNK_SIZE, ColumnPlan, DataHolderShape, MAX_COMPONENTS, Shape, TablePlan};
use crate::emit::{Arg, CodeBlock, FunSpec, Line, Modifier, ParamSpec, PropertySpec, TypeRef};

fn name(value: &str) -> Arg {
    Arg::Name(value.to_string())
}

fn kotlin(simple: &str) -> TypeRef {
    TypeRef::new("kotlin", &[simple])
}

/// `base`, extended with underscores until no column uses it.
pub fn fresh_local(base: &str, plan: &TablePlan) -> String {
    let mut local = base.to_string();
    while plan.column_names().any(|column| column == local) {
        local.push('_');
    }
    local
}

fn initializer(shape: &DataHolderShape, column: &ColumnPlan) -> CodeBlock {
    match (shape.shape, shape.immutable) {
        (Shape::Compact, _) => CodeBlock::name(&column.name),
        (Shape::Oversized, true) => CodeBlock::member("value", &column.name),
        (Shape::Oversized, false) => CodeBlock::lit("null"),
    }
}

/// Data-holder properties, in column order.
pub fn data_holder_properties(plan: &TablePlan, shape: &DataHolderShape) -> Vec<PropertySpec> {
    let modifiers = if plan.contract.is_some() {
        vec![Modifier::Override]
    } else {
        Vec::new()
    };
    plan.columns
        .iter()
        .map(|column| PropertySpec {
            name: column.name.clone(),
            ty: column.ty.clone(),
            mutable: !shape.immutable,
            modifiers: modifiers.clone(),
            initializer: Some(initializer(shape, column)),
            kdoc: Some(column.kdoc.clone()),
            annotations: column.annotations.clone(),
        })
        .collect()
}

/// Contract properties: same names, types and order as the data holder's.
pub fn contract_properties(plan: &TablePlan, mutable: bool) -> Vec<PropertySpec> {
    plan.columns
        .iter()
        .map(|column| PropertySpec {
            name: column.name.clone(),
            ty: column.ty.clone(),
            mutable,
            modifiers: Vec::new(),
            initializer: None,
            kdoc: Some(column.kdoc.clone()),
            annotations: column.annotations.clone(),
        })
        .collect()
}

pub fn primary_constructor(plan: &TablePlan, shape: &DataHolderShape) -> FunSpec {
    let constructor = FunSpec::constructor();
    match (shape.shape, shape.immutable, &plan.contract) {
        (Shape::Compact, _, _) => plan.columns.iter().fold(constructor, |constructor, column| {
            constructor.param(
                ParamSpec::new(&column.name, column.ty.clone()).with_default(CodeBlock::lit("null")),
            )
        }),
        (Shape::Oversized, true, Some(contract)) => {
            constructor.param(ParamSpec::new("value", contract.clone()))
        }
        (Shape::Oversized, _, _) => constructor,
    }
}

/// Constructors that build the data holder from any contract implementation.
pub fn secondary_constructors(plan: &TablePlan, shape: &DataHolderShape) -> Vec<FunSpec> {
    let Some(contract) = &plan.contract else {
        return Vec::new();
    };
    let from_value = FunSpec::constructor().param(ParamSpec::new("value", contract.clone()));

    match (shape.shape, shape.immutable) {
        (Shape::Compact, _) => {
            let args = plan
                .columns
                .iter()
                .map(|column| CodeBlock::member("value", &column.name))
                .collect();
            vec![from_value.delegate_to_this(args)]
        }
        (Shape::Oversized, true) => Vec::new(),
        (Shape::Oversized, false) => {
            let constructor = plan.columns.iter().fold(
                from_value.delegate_to_this(Vec::new()),
                |constructor, column| {
                    constructor.statement(
                        "this.%N = value.%N",
                        vec![name(&column.name), name(&column.name)],
                    )
                },
            );
            vec![constructor]
        }
    }
}

/// `from` and `into`, bridging a mutable contract. `is_abstract` declares
/// them on the contract itself.
pub fn bridging_functions(plan: &TablePlan, contract: &TypeRef, is_abstract: bool) -> Vec<FunSpec> {
    let mut from = FunSpec::new("from").param(ParamSpec::new("from", contract.clone()));
    let mut into = FunSpec::new("into")
        .type_variable("E", contract.clone())
        .param(ParamSpec::new("into", TypeRef::variable("E")))
        .returns(TypeRef::variable("E"));

    if is_abstract {
        return vec![from.abstract_member(), into.abstract_member()];
    }

    from = plan.columns.iter().fold(from.modifier(Modifier::Override), |from, column| {
        from.statement(
            "this.%N = from.%N",
            vec![name(&column.name), name(&column.name)],
        )
    });
    into = into
        .modifier(Modifier::Override)
        .statement("into.from(this)", Vec::new())
        .statement("return into", Vec::new());
    vec![from, into]
}

pub fn hash_code(plan: &TablePlan) -> FunSpec {
    let function = FunSpec::new("hashCode")
        .modifier(Modifier::Override)
        .returns(kotlin("Int"))
        .statement("val prime = 31", Vec::new())
        .statement("var result = 1", Vec::new());
    plan.columns
        .iter()
        .fold(function, |function, column| {
            let format = if column.is_array() {
                "result = prime * result + java.util.Arrays.hashCode(this.%N)"
            } else {
                "result = prime * result + (this.%N?.hashCode() ?: 0)"
            };
            function.statement(format, vec![name(&column.name)])
        })
        .statement("return result", Vec::new())
}

pub fn equals(plan: &TablePlan) -> FunSpec {
    let function = FunSpec::new("equals")
        .modifier(Modifier::Override)
        .param(ParamSpec::new("other", kotlin("Any").with_nullable(true)))
        .returns(kotlin("Boolean"))
        .line(Line::open("return when", Vec::new()))
        .statement("this === other -> true", Vec::new())
        .statement("other == null -> false", Vec::new())
        .line(Line::open(
            "other is %T -> when",
            vec![Arg::Type(plan.data_holder.clone())],
        ));
    plan.columns
        .iter()
        .fold(function, |function, column| {
            let format = if column.is_array() {
                "!java.util.Arrays.equals(this.%N, other.%N) -> false"
            } else {
                "this.%N != other.%N -> false"
            };
            function.statement(format, vec![name(&column.name), name(&column.name)])
        })
        .statement("else -> true", Vec::new())
        .line(Line::close())
        .statement("else -> false", Vec::new())
        .line(Line::close())
}

/// `TypeName(a=…, b=…)`.
pub fn to_string(plan: &TablePlan) -> FunSpec {
    let function = FunSpec::new("toString")
        .modifier(Modifier::Override)
        .returns(kotlin("String"))
        .line(Line::open("return buildString", Vec::new()))
        .statement(
            "append(%S)",
            vec![Arg::Str(format!("{}(", plan.data_holder.simple_name()))],
        );
    let last = plan.columns.len().saturating_sub(1);
    plan.columns
        .iter()
        .enumerate()
        .fold(function, |function, (index, column)| {
            let function = function
                .statement("append(%S)", vec![Arg::Str(format!("{}=", column.name))])
                .statement("append(this.%N)", vec![name(&column.name)]);
            if index < last {
                function.statement("append(%S)", vec![Arg::Str(", ".to_string())])
            } else {
                function
            }
        })
        .statement("append(%S)", vec![Arg::Str(")".to_string())])
        .line(Line::close())
}

fn copy_params(function: FunSpec, columns: &[ColumnPlan]) -> FunSpec {
    columns.iter().fold(function, |function, column| {
        function.param(
            ParamSpec::new(&column.name, column.ty.clone())
                .with_default(CodeBlock::member("this", &column.name)),
        )
    })
}

/// `copy` for compact holders, `copy1`, `copy2`, … over column chunks for
/// oversized ones.
pub fn copy_functions(plan: &TablePlan, shape: &DataHolderShape) -> Vec<FunSpec> {
    let holder = plan.data_holder.clone();
    if shape.shape == Shape::Compact {
        let placeholders = vec!["%N"; plan.columns.len()].join(", ");
        let args = std::iter::once(Arg::Type(holder.clone()))
            .chain(plan.columns.iter().map(|column| name(&column.name)))
            .collect();
        let function = copy_params(FunSpec::new("copy").modifier(Modifier::Open), &plan.columns)
            .returns(holder)
            .statement(format!("return %T({placeholders})"), args);
        return vec![function];
    }

    let local = fresh_local("copy", plan);
    plan.columns
        .chunks(COPY_CHUNK_SIZE)
        .enumerate()
        .map(|(index, chunk)| {
            let function = copy_params(
                FunSpec::new(&format!("copy{}", index + 1)).modifier(Modifier::Open),
                chunk,
            )
            .returns(holder.clone());
            let in_chunk = |column: &ColumnPlan| chunk.iter().any(|c| c.name == column.name);

            match (&plan.contract, shape.immutable) {
                (Some(contract), true) => plan
                    .columns
                    .iter()
                    .fold(
                        function.line(Line::open(
                            "return %T(object : %T",
                            vec![Arg::Type(holder.clone()), Arg::Type(contract.clone())],
                        )),
                        |function, column| {
                            if in_chunk(column) {
                                function.statement(
                                    "override val %N: %T = %N",
                                    vec![
                                        name(&column.name),
                                        Arg::Type(column.ty.clone()),
                                        name(&column.name),
                                    ],
                                )
                            } else {
                                function.statement(
                                    "override val %N: %T = this@%L.%N",
                                    vec![
                                        name(&column.name),
                                        Arg::Type(column.ty.clone()),
                                        Arg::Lit(holder.simple_name().to_string()),
                                        name(&column.name),
                                    ],
                                )
                            }
                        },
                    )
                    .line(Line::Close("})".to_string())),
                _ => plan
                    .columns
                    .iter()
                    .fold(
                        function.statement(
                            "val %L = %T()",
                            vec![Arg::Lit(local.clone()), Arg::Type(holder.clone())],
                        ),
                        |function, column| {
                            let source = if in_chunk(column) { "%N" } else { "this.%N" };
                            function.statement(
                                format!("%L.%N = {source}"),
                                vec![
                                    Arg::Lit(local.clone()),
                                    name(&column.name),
                                    name(&column.name),
                                ],
                            )
                        },
                    )
                    .statement("return %L", vec![Arg::Lit(local.clone())]),
            }
        })
        .collect()
}

/// `component1()` … per column, only for tables of at most
/// [`MAX_COMPONENTS`] columns.
pub fn components(plan: &TablePlan) -> Vec<FunSpec> {
    if plan.columns.len() > MAX_COMPONENTS {
        return Vec::new();
    }
    plan.columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            FunSpec::new(&format!("component{}", index + 1))
                .modifier(Modifier::Open)
                .modifier(Modifier::Operator)
                .returns(column.ty.clone())
                .statement("return this.%N", vec![name(&column.name)])
        })
        .collect()
}
