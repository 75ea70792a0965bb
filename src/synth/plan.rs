use crate::annotations::{column_annotations, table_annotations};
use crate::context::RunContext;
use crate::emit::{AnnotationSpec, TypeRef};
use crate::error::GenResult;
use crate::naming::{Definition, Mode};
use crate::schema::{ColumnFact, SchemaMetadata, TableFact};
use crate::types::{best_guess, resolve_column_type};

/// One property, shared by the contract and the data holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    pub name: String,
    pub ty: TypeRef,
    pub kdoc: String,
    pub annotations: Vec<AnnotationSpec>,
}

impl ColumnPlan {
    pub fn is_array(&self) -> bool {
        self.ty.is_primitive_array()
    }
}

/// Names, types and annotations of one table, resolved once and consumed by
/// both synthesizers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePlan {
    pub table_name: String,
    pub data_holder: TypeRef,
    /// Present when contract types are generated.
    pub contract: Option<TypeRef>,
    pub super_type: Option<TypeRef>,
    pub data_holder_implements: Vec<TypeRef>,
    pub contract_implements: Vec<TypeRef>,
    pub annotations: Vec<AnnotationSpec>,
    pub columns: Vec<ColumnPlan>,
}

fn kdoc_segment(segment: &str) -> String {
    if segment.contains('$') || segment.starts_with(|ch: char| ch.is_ascii_digit()) {
        format!("`{segment}`")
    } else {
        segment.to_string()
    }
}

/// `schema.table.column`, without the schema when the table has none.
pub fn qualified_column_name(
    metadata: &SchemaMetadata,
    table: &TableFact,
    column: &ColumnFact,
) -> String {
    let schema = metadata.schema_of(table).map(|schema| schema.raw_name.as_str());
    schema
        .into_iter()
        .chain([table.raw_name.as_str(), column.raw_name.as_str()])
        .map(kdoc_segment)
        .collect::<Vec<_>>()
        .join(".")
}

fn resolve_supertypes(names: Vec<String>) -> GenResult<Vec<TypeRef>> {
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(best_guess)
        .collect()
}

impl TablePlan {
    pub fn build(ctx: &RunContext, metadata: &SchemaMetadata, table: &TableFact) -> GenResult<Self> {
        let strategy = ctx.strategy();
        let options = &ctx.options;
        let definition = Definition::table(metadata, table);

        let type_ref = |mode: Mode| {
            let name = strategy.class_name(definition, mode);
            TypeRef::new(&strategy.package_name(definition, mode), &[name.as_str()])
        };
        let data_holder = type_ref(Mode::Pojo);
        let contract = options
            .emit_contract_types
            .then(|| type_ref(Mode::Interface));

        let super_type = strategy
            .class_extends(definition, Mode::Pojo)
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(best_guess)
            .transpose()?;

        let columns = table
            .columns
            .iter()
            .map(|column| {
                let column_definition = Definition::column(metadata, table, column);
                let ty = resolve_column_type(column)?;
                let kdoc = format!(
                    "Field for [{}]. {}",
                    qualified_column_name(metadata, table, column),
                    column.comment.as_deref().unwrap_or_default()
                );
                Ok(ColumnPlan {
                    name: strategy.member_name(column_definition, Mode::Default),
                    annotations: column_annotations(options, table, column, &ty),
                    kdoc: kdoc.trim_end().to_string(),
                    ty,
                })
            })
            .collect::<GenResult<Vec<_>>>()?;

        Ok(Self {
            table_name: table.raw_name.clone(),
            data_holder,
            contract,
            super_type,
            data_holder_implements: resolve_supertypes(
                strategy.class_implements(definition, Mode::Pojo),
            )?,
            contract_implements: resolve_supertypes(
                strategy.class_implements(definition, Mode::Interface),
            )?,
            annotations: table_annotations(options, &ctx.provenance, metadata, table),
            columns,
        })
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name.as_str())
    }
}
