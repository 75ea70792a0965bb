use super::{Definition, DefinitionKind, Mode, NamingStrategy};
use crate::options::GenerationOptions;

pub const ESCAPE_CHAR: char = '_';
pub const DEFAULT_CATALOG_NAME: &str = "DefaultCatalog";
pub const DEFAULT_SCHEMA_NAME: &str = "DefaultSchema";

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn decapitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn is_shouting(word: &str) -> bool {
    !word.chars().any(char::is_lowercase)
}

/// Turns a schema-supplied name into a type identifier.
///
/// Words are split on space, `-`, `.` and `_` and capitalized. When no word
/// contains a lower-case letter the name is treated as shouting-case and every
/// word is lower-cased before capitalizing, so `ORDER_ID` becomes `OrderId`.
/// A leading digit is escaped with [`ESCAPE_CHAR`].
pub fn normalize(raw: &str, mode: Mode, plain_suffix: Option<&str>) -> String {
    let words: Vec<String> = raw
        .replace([' ', '-', '.'], "_")
        .split('_')
        .map(capitalize)
        .collect();

    let words = if words.iter().all(|word| is_shouting(word)) {
        words
            .iter()
            .map(|word| capitalize(&word.to_lowercase()))
            .collect()
    } else {
        words
    };

    let mut name = words.concat();
    if name.starts_with(|ch: char| ch.is_ascii_digit()) {
        name.insert(0, ESCAPE_CHAR);
    }

    match mode {
        Mode::Record => name.push_str("Record"),
        Mode::Dao => name.push_str("Dao"),
        Mode::Interface => name.insert(0, 'I'),
        Mode::Pojo => {
            if let Some(suffix) = plain_suffix.filter(|suffix| !suffix.trim().is_empty()) {
                name.push_str(suffix);
            }
        }
        Mode::Default => {}
    }
    name
}

/// Applies [`normalize`] to class, member and accessor names and resolves
/// foreign-key method names; packages and inheritance come from `inner`.
#[derive(Debug, Clone)]
pub struct NormalizingStrategy<S> {
    inner: S,
    plain_suffix: Option<String>,
    bean_accessor_style: bool,
}

impl<S: NamingStrategy> NormalizingStrategy<S> {
    pub fn new(inner: S, options: &GenerationOptions) -> Self {
        Self {
            inner,
            plain_suffix: options.plain_record_suffix.clone(),
            bean_accessor_style: options.bean_accessor_style,
        }
    }

    fn fixed_class_name(definition: &Definition<'_>) -> Option<&'static str> {
        match definition.kind {
            DefinitionKind::Catalog(catalog) if catalog.is_default => Some(DEFAULT_CATALOG_NAME),
            DefinitionKind::Schema(schema) if schema.is_default => Some(DEFAULT_SCHEMA_NAME),
            _ => None,
        }
    }

    fn normalized(&self, definition: &Definition<'_>, mode: Mode) -> String {
        normalize(
            definition.output_name(),
            mode,
            self.plain_suffix.as_deref(),
        )
    }

    fn accessor_suffix(&self, definition: Definition<'_>) -> String {
        if !self.bean_accessor_style {
            return self.normalized(&definition, Mode::Default);
        }

        let name = self.member_name(definition, Mode::Default);
        let mut chars = name.chars();
        let first_upper = chars.next().is_some_and(char::is_uppercase);
        let second_upper = chars.next().is_some_and(char::is_uppercase);
        if first_upper || second_upper {
            name
        } else {
            capitalize(&name)
        }
    }
}

impl<S: NamingStrategy> NamingStrategy for NormalizingStrategy<S> {
    fn class_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        match Self::fixed_class_name(&definition) {
            Some(fixed) => fixed.to_string(),
            None => self.normalized(&definition, mode),
        }
    }

    fn member_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        decapitalize(&self.normalized(&definition, mode))
    }

    fn getter_name(&self, definition: Definition<'_>, _mode: Mode) -> String {
        format!("get{}", self.accessor_suffix(definition))
    }

    fn setter_name(&self, definition: Definition<'_>, _mode: Mode) -> String {
        format!("set{}", self.accessor_suffix(definition))
    }

    fn method_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        if let DefinitionKind::ForeignKey(table, key) = definition.kind {
            // More than one key to the same table keeps the key's own name.
            if table.foreign_keys_to(&key.referenced_table).count() == 1 {
                if let Some(referenced) = definition.metadata.table(&key.referenced_table) {
                    return self.method_name(Definition::table(definition.metadata, referenced), mode);
                }
            }
        }
        decapitalize(&self.normalized(&definition, Mode::Default))
    }

    fn package_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        self.inner.package_name(definition, mode)
    }

    fn class_extends(&self, definition: Definition<'_>, mode: Mode) -> Option<String> {
        self.inner.class_extends(definition, mode)
    }

    fn class_implements(&self, definition: Definition<'_>, mode: Mode) -> Vec<String> {
        self.inner.class_implements(definition, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::BaseStrategy;
    use crate::schema::{
        CatalogFact, ColumnFact, ForeignKeyFact, SchemaFact, SchemaMetadata, TableFact,
        TypeDescriptor,
    };

    fn strategy(options: &GenerationOptions) -> NormalizingStrategy<BaseStrategy> {
        NormalizingStrategy::new(BaseStrategy::new(options), options)
    }

    #[test]
    fn shouting_case_is_recased() {
        assert_eq!(normalize("ORDER_ID", Mode::Default, None), "OrderId");
        assert_eq!(normalize("order_id", Mode::Default, None), "OrderId");
        assert_eq!(normalize("orderId", Mode::Default, None), "OrderId");
        assert_eq!(normalize("HTTP_logEntry", Mode::Default, None), "HTTPLogEntry");
    }

    #[test]
    fn splits_on_space_hyphen_and_dot() {
        assert_eq!(normalize("line item-detail.v2", Mode::Default, None), "LineItemDetailV2");
    }

    #[test]
    fn leading_digit_is_escaped() {
        assert_eq!(normalize("1099_FORM", Mode::Default, None), "_1099Form");
        assert_eq!(normalize("2fa_codes", Mode::Default, None), "_2faCodes");
    }

    #[test]
    fn default_output_is_a_fixed_point() {
        for raw in ["ORDER_ID", "1099_FORM", "customer address", "line-item.v2", "isActive"] {
            let once = normalize(raw, Mode::Default, None);
            assert_eq!(normalize(&once, Mode::Default, None), once, "raw name {raw}");
        }
    }

    #[test]
    fn mode_suffixes_and_prefixes() {
        assert_eq!(normalize("book", Mode::Record, None), "BookRecord");
        assert_eq!(normalize("book", Mode::Dao, None), "BookDao");
        assert_eq!(normalize("book", Mode::Interface, None), "IBook");
        assert_eq!(normalize("book", Mode::Pojo, Some("Pojo")), "BookPojo");
        assert_eq!(normalize("book", Mode::Pojo, Some(" ")), "Book");
        assert_eq!(normalize("book", Mode::Pojo, None), "Book");
    }

    #[test]
    fn default_catalog_and_schema_get_fixed_names() {
        let metadata = SchemaMetadata {
            catalogs: vec![CatalogFact {
                id: "c".to_string(),
                raw_name: "warehouse".to_string(),
                is_default: true,
                version: None,
            }],
            schemas: vec![
                SchemaFact {
                    id: "public".to_string(),
                    raw_name: "public".to_string(),
                    is_default: true,
                    version: None,
                },
                SchemaFact {
                    id: "audit".to_string(),
                    raw_name: "audit".to_string(),
                    is_default: false,
                    version: None,
                },
            ],
            ..SchemaMetadata::default()
        };
        let strategy = strategy(&GenerationOptions::default());

        let catalog = Definition::catalog(&metadata, &metadata.catalogs[0]);
        let public = Definition::schema(&metadata, &metadata.schemas[0]);
        let audit = Definition::schema(&metadata, &metadata.schemas[1]);
        assert_eq!(strategy.class_name(catalog, Mode::Default), "DefaultCatalog");
        assert_eq!(strategy.class_name(public, Mode::Record), "DefaultSchema");
        assert_eq!(strategy.class_name(audit, Mode::Default), "Audit");
    }

    #[test]
    fn bean_style_keeps_names_with_upper_case_second_letter() {
        let table = TableFact::new(
            "points",
            vec![
                ColumnFact::new("x_coord", TypeDescriptor::sql("INT")),
                ColumnFact::new("first_name", TypeDescriptor::sql("VARCHAR")),
            ],
        );
        let metadata = SchemaMetadata {
            tables: vec![table],
            ..SchemaMetadata::default()
        };
        let table = &metadata.tables[0];
        let mut options = GenerationOptions::default();
        options.bean_accessor_style = true;
        let strategy = strategy(&options);

        let x = Definition::column(&metadata, table, &table.columns[0]);
        let first = Definition::column(&metadata, table, &table.columns[1]);
        assert_eq!(strategy.member_name(x, Mode::Default), "xCoord");
        assert_eq!(strategy.getter_name(x, Mode::Default), "getxCoord");
        assert_eq!(strategy.setter_name(first, Mode::Default), "setFirstName");
    }

    fn fk(name: &str, referenced: &str) -> ForeignKeyFact {
        ForeignKeyFact {
            name: name.to_string(),
            columns: Vec::new(),
            referenced_table: referenced.to_string(),
        }
    }

    #[test]
    fn single_foreign_key_adopts_referenced_table_method_name() {
        let customer = TableFact::new("customer", Vec::new());
        let mut orders = TableFact::new("orders", Vec::new());
        orders.foreign_keys = vec![
            fk("fk_orders_customer", "customer"),
            fk("fk_orders_billing", "address"),
            fk("fk_orders_shipping", "address"),
        ];
        let metadata = SchemaMetadata {
            tables: vec![customer, orders, TableFact::new("address", Vec::new())],
            ..SchemaMetadata::default()
        };
        let orders = &metadata.tables[1];
        let strategy = strategy(&GenerationOptions::default());

        let single = Definition::foreign_key(&metadata, orders, &orders.foreign_keys[0]);
        let ambiguous = Definition::foreign_key(&metadata, orders, &orders.foreign_keys[1]);
        assert_eq!(strategy.method_name(single, Mode::Default), "customer");
        assert_eq!(strategy.method_name(ambiguous, Mode::Default), "fkOrdersBilling");
    }
}
