//! Decides which annotations a generated type and each of its properties
//! carry. Every family is switched by its own option.

use crate::context::Provenance;
use crate::emit::{AnnotationSpec, AnnotationValue, TypeRef};
use crate::options::GenerationOptions;
use crate::schema::{ColumnFact, IndexFact, SchemaMetadata, TableFact};

const PERSISTENCE: &str = "javax.persistence";
const VALIDATION: &str = "javax.validation.constraints";

fn persistence(name: &str) -> TypeRef {
    TypeRef::new(PERSISTENCE, &[name])
}

fn validation(name: &str) -> TypeRef {
    TypeRef::new(VALIDATION, &[name])
}

fn text(value: &str) -> AnnotationValue {
    AnnotationValue::Str(value.to_string())
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|value| value.trim()).filter(|value| !value.is_empty())
}

/// Annotations placed on the contract type and the data holder of `table`.
pub fn table_annotations(
    options: &GenerationOptions,
    provenance: &Provenance,
    metadata: &SchemaMetadata,
    table: &TableFact,
) -> Vec<AnnotationSpec> {
    let mut annotations = Vec::new();

    if options.emit_provenance_annotation {
        annotations.push(provenance_marker(provenance, metadata, table));
    }

    if options.emit_persistence_annotations {
        annotations.push(AnnotationSpec::new(persistence("Entity")));
        annotations.push(table_mapping(options, metadata, table));
    }

    if options.emit_introspected() {
        annotations.push(AnnotationSpec::new(TypeRef::new(
            "io.micronaut.core.annotation",
            &["Introspected"],
        )));
    }

    annotations
}

fn provenance_marker(
    provenance: &Provenance,
    metadata: &SchemaMetadata,
    table: &TableFact,
) -> AnnotationSpec {
    let mut values = vec![text(&format!(
        "{} version:{}",
        provenance.generator, provenance.version
    ))];
    if let Some(version) = metadata
        .catalog_of(table)
        .and_then(|catalog| non_blank(catalog.version.as_ref()))
    {
        values.push(text(&format!("catalog version:{version}")));
    }
    if let Some(version) = metadata
        .schema_of(table)
        .and_then(|schema| non_blank(schema.version.as_ref()))
    {
        values.push(text(&format!("schema version:{version}")));
    }

    AnnotationSpec::new(TypeRef::new("javax.annotation", &["Generated"]))
        .member("value", AnnotationValue::Array(values))
        .member("date", text(&provenance.timestamp()))
        .member(
            "comments",
            text(&format!("This class is generated by {}", provenance.generator)),
        )
}

fn table_mapping(
    options: &GenerationOptions,
    metadata: &SchemaMetadata,
    table: &TableFact,
) -> AnnotationSpec {
    let mut mapping =
        AnnotationSpec::new(persistence("Table")).member("name", text(&table.raw_name));

    if let Some(schema) = metadata.schema_of(table).filter(|schema| !schema.is_default) {
        mapping = mapping.member("schema", text(&schema.raw_name));
    }

    let unique: Vec<AnnotationValue> = table
        .multi_column_unique_keys()
        .map(|key| {
            let columns = key.columns.iter().map(|column| text(column)).collect();
            AnnotationValue::Nested(
                AnnotationSpec::new(persistence("UniqueConstraint"))
                    .member("columnNames", AnnotationValue::Array(columns)),
            )
        })
        .collect();
    if !unique.is_empty() {
        mapping = mapping.member("uniqueConstraints", AnnotationValue::Array(unique));
    }

    if options.supports_index_annotations() && !table.indexes.is_empty() {
        let indexes = table
            .indexes
            .iter()
            .map(|index| AnnotationValue::Nested(index_declaration(index)))
            .collect();
        mapping = mapping.member("indexes", AnnotationValue::Array(indexes));
    }

    mapping
}

/// Column names in index order, each with its explicit sort direction.
pub fn index_column_list(index: &IndexFact) -> String {
    index
        .columns
        .iter()
        .map(|column| format!("{}{}", column.name, column.order.suffix()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn index_declaration(index: &IndexFact) -> AnnotationSpec {
    let mut declaration = AnnotationSpec::new(persistence("Index"))
        .member("name", text(&index.name))
        .member("unique", AnnotationValue::Bool(index.unique));
    if !index.columns.is_empty() {
        declaration = declaration.member("columnList", text(&index_column_list(index)));
    }
    declaration
}

fn is_textual(ty: &TypeRef) -> bool {
    ty.simple_name() == "String"
}

fn is_decimal(ty: &TypeRef) -> bool {
    ty.package == "java.math" && matches!(ty.simple_name(), "BigDecimal" | "BigInteger")
}

/// Annotations on the getter of the property generated for `column`.
/// `property_type` is the resolved type of that property.
pub fn column_annotations(
    options: &GenerationOptions,
    table: &TableFact,
    column: &ColumnFact,
    property_type: &TypeRef,
) -> Vec<AnnotationSpec> {
    let mut annotations = Vec::new();

    if options.emit_validation_annotations {
        if !column.nullable && !column.has_default && !column.is_identity {
            annotations.push(AnnotationSpec::new(validation("NotNull")).on_getter());
        }
        if is_textual(property_type) && column.length > 0 {
            annotations.push(
                AnnotationSpec::new(validation("Size"))
                    .on_getter()
                    .member("max", AnnotationValue::Int(i64::from(column.length))),
            );
        }
        if is_decimal(property_type) && column.precision > 0 {
            let integer = i64::from(column.precision) - i64::from(column.scale);
            annotations.push(
                AnnotationSpec::new(validation("Digits"))
                    .on_getter()
                    .member("integer", AnnotationValue::Int(integer))
                    .member("fraction", AnnotationValue::Int(i64::from(column.scale))),
            );
        }
    }

    if options.emit_persistence_annotations {
        if table.is_sole_primary_key(column) {
            annotations.push(AnnotationSpec::new(persistence("Id")).on_getter());
            if column.is_identity {
                annotations.push(
                    AnnotationSpec::new(persistence("GeneratedValue"))
                        .on_getter()
                        .member(
                            "strategy",
                            AnnotationValue::Const(TypeRef::new(
                                PERSISTENCE,
                                &["GenerationType", "IDENTITY"],
                            )),
                        ),
                );
            }
        }
        annotations.push(column_mapping(table, column));
    }

    annotations
}

fn column_mapping(table: &TableFact, column: &ColumnFact) -> AnnotationSpec {
    let mut mapping = AnnotationSpec::new(persistence("Column")).on_getter();
    if column.length > 0 {
        mapping = mapping.member("length", AnnotationValue::Int(i64::from(column.length)));
    } else if column.precision > 0 {
        mapping = mapping.member("precision", AnnotationValue::Int(i64::from(column.precision)));
        if column.scale > 0 {
            mapping = mapping.member("scale", AnnotationValue::Int(i64::from(column.scale)));
        }
    }
    mapping = mapping.member("nullable", AnnotationValue::Bool(column.nullable));
    if table.is_sole_unique_member(column) {
        mapping = mapping.member("unique", AnnotationValue::Bool(true));
    }
    mapping.member("name", text(&column.raw_name))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::emit::UseSite;
    use crate::schema::{IndexColumn, KeyFact, SchemaFact, SortOrder, TypeDescriptor};

    fn provenance() -> Provenance {
        Provenance {
            generator: "schema_codegen".to_string(),
            version: "0.1.0".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    fn names(annotations: &[AnnotationSpec]) -> Vec<&str> {
        annotations.iter().map(|spec| spec.ty.simple_name()).collect()
    }

    fn string_type() -> TypeRef {
        TypeRef::new("kotlin", &["String"]).with_nullable(true)
    }

    fn orders() -> (SchemaMetadata, TableFact) {
        let mut id = ColumnFact::new("id", TypeDescriptor::sql("BIGINT"));
        id.nullable = false;
        id.is_identity = true;
        let mut code = ColumnFact::new("code", TypeDescriptor::sql("VARCHAR"));
        code.nullable = false;
        code.length = 32;
        let mut table = TableFact::new("orders", vec![id, code]);
        table.schema_id = Some("sales".to_string());
        table.primary_key = Some(KeyFact {
            name: "pk".to_string(),
            columns: vec!["id".to_string()],
        });
        table.unique_keys = vec![
            KeyFact {
                name: "uk_code".to_string(),
                columns: vec!["code".to_string()],
            },
            KeyFact {
                name: "uk_pair".to_string(),
                columns: vec!["id".to_string(), "code".to_string()],
            },
        ];
        table.indexes = vec![IndexFact {
            name: "idx_orders".to_string(),
            unique: false,
            columns: vec![
                IndexColumn {
                    name: "code".to_string(),
                    order: SortOrder::Asc,
                },
                IndexColumn {
                    name: "id".to_string(),
                    order: SortOrder::Default,
                },
            ],
        }];
        table.link_columns();
        let metadata = SchemaMetadata {
            schemas: vec![SchemaFact {
                id: "sales".to_string(),
                raw_name: "sales".to_string(),
                is_default: false,
                version: Some("42".to_string()),
            }],
            ..SchemaMetadata::default()
        };
        (metadata, table)
    }

    #[test]
    fn nothing_is_planned_when_every_family_is_off() {
        let (metadata, table) = orders();
        let mut options = GenerationOptions::default();
        options.emit_provenance_annotation = false;

        assert!(table_annotations(&options, &provenance(), &metadata, &table).is_empty());
        assert!(column_annotations(&options, &table, &table.columns[1], &string_type()).is_empty());
    }

    #[test]
    fn provenance_lists_known_versions() {
        let (metadata, table) = orders();
        let options = GenerationOptions::default();
        let planned = table_annotations(&options, &provenance(), &metadata, &table);

        let marker = &planned[0];
        assert_eq!(marker.ty.canonical_name(), "javax.annotation.Generated");
        assert_eq!(
            marker.value("value"),
            Some(&AnnotationValue::Array(vec![
                text("schema_codegen version:0.1.0"),
                text("schema version:42"),
            ]))
        );
        assert_eq!(marker.value("date"), Some(&text("2024-01-02T03:04:05.000Z")));
    }

    #[test]
    fn table_mapping_declares_schema_constraints_and_indexes() {
        let (metadata, table) = orders();
        let mut options = GenerationOptions::default();
        options.emit_provenance_annotation = false;
        options.emit_persistence_annotations = true;

        let planned = table_annotations(&options, &provenance(), &metadata, &table);
        assert_eq!(names(&planned), vec!["Entity", "Table"]);

        let mapping = &planned[1];
        assert_eq!(mapping.value("schema"), Some(&text("sales")));
        let Some(AnnotationValue::Array(unique)) = mapping.value("uniqueConstraints") else {
            panic!("missing unique constraints");
        };
        assert_eq!(unique.len(), 1);
        let Some(AnnotationValue::Array(indexes)) = mapping.value("indexes") else {
            panic!("missing indexes");
        };
        let AnnotationValue::Nested(index) = &indexes[0] else {
            panic!("index is not nested");
        };
        assert_eq!(index.value("columnList"), Some(&text("code ASC, id")));
        assert_eq!(index.value("unique"), Some(&AnnotationValue::Bool(false)));
    }

    #[test]
    fn old_persistence_versions_get_no_indexes() {
        let (metadata, table) = orders();
        let mut options = GenerationOptions::default();
        options.emit_persistence_annotations = true;
        options.jpa_version = "2.0".to_string();

        let planned = table_annotations(&options, &provenance(), &metadata, &table);
        let mapping = planned.iter().find(|spec| spec.ty.simple_name() == "Table").unwrap();
        assert!(mapping.value("indexes").is_none());
    }

    #[test]
    fn introspection_needs_both_properties() {
        let (metadata, table) = orders();
        let mut options = GenerationOptions::default();
        options.emit_provenance_annotation = false;
        options.emit_introspection_annotation = true;
        assert!(table_annotations(&options, &provenance(), &metadata, &table).is_empty());

        options.target_micronaut = true;
        let planned = table_annotations(&options, &provenance(), &metadata, &table);
        assert_eq!(
            planned[0].ty.canonical_name(),
            "io.micronaut.core.annotation.Introspected"
        );
    }

    #[test]
    fn identity_primary_key_gets_id_and_generated_value() {
        let (_, table) = orders();
        let mut options = GenerationOptions::default();
        options.emit_persistence_annotations = true;
        options.emit_validation_annotations = true;
        let long = TypeRef::new("kotlin", &["Long"]).with_nullable(true);

        let planned = column_annotations(&options, &table, &table.columns[0], &long);
        assert_eq!(names(&planned), vec!["Id", "GeneratedValue", "Column"]);
        assert!(planned.iter().all(|spec| spec.use_site == Some(UseSite::Get)));
    }

    #[test]
    fn text_column_gets_not_null_size_and_unique_mapping() {
        let (_, table) = orders();
        let mut options = GenerationOptions::default();
        options.emit_persistence_annotations = true;
        options.emit_validation_annotations = true;

        let planned = column_annotations(&options, &table, &table.columns[1], &string_type());
        assert_eq!(names(&planned), vec!["NotNull", "Size", "Column"]);
        assert_eq!(planned[1].value("max"), Some(&AnnotationValue::Int(32)));
        let column = &planned[2];
        assert_eq!(column.value("length"), Some(&AnnotationValue::Int(32)));
        assert_eq!(column.value("unique"), Some(&AnnotationValue::Bool(true)));
        assert_eq!(column.value("name"), Some(&text("code")));
    }

    #[test]
    fn decimals_get_digits_only_with_precision() {
        let mut amount = ColumnFact::new("amount", TypeDescriptor::sql("NUMERIC"));
        let table = TableFact::new("ledger", vec![amount.clone()]);
        let mut options = GenerationOptions::default();
        options.emit_validation_annotations = true;
        let decimal = TypeRef::new("java.math", &["BigDecimal"]).with_nullable(true);

        assert!(column_annotations(&options, &table, &amount, &decimal).is_empty());

        amount.precision = 10;
        amount.scale = 2;
        let planned = column_annotations(&options, &table, &amount, &decimal);
        assert_eq!(planned[0].value("integer"), Some(&AnnotationValue::Int(8)));
        assert_eq!(planned[0].value("fraction"), Some(&AnnotationValue::Int(2)));
    }
}
