//! Identifier naming.
//!
//! [`NamingStrategy`] is the extension point the generator asks for every
//! class, member, accessor, method and package name. Strategies compose:
//! [`BaseStrategy`] supplies packages and inheritance, [`NormalizingStrategy`]
//! layers the identifier normalization rules on top of any inner strategy, and
//! [`AccessorCollapse`] fixes up boolean accessor names of whatever it wraps.

mod accessor;
mod base;
mod normalizer;

pub use accessor::{AccessorCollapse, collapse_boolean_accessor};
pub use base::BaseStrategy;
pub use normalizer::{
    DEFAULT_CATALOG_NAME, DEFAULT_SCHEMA_NAME, ESCAPE_CHAR, NormalizingStrategy, capitalize,
    decapitalize, normalize,
};

use crate::schema::{CatalogFact, ColumnFact, ForeignKeyFact, SchemaFact, SchemaMetadata, TableFact};

/// What kind of artifact a name is produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Default,
    Record,
    Dao,
    Interface,
    Pojo,
}

#[derive(Debug, Clone, Copy)]
pub enum DefinitionKind<'a> {
    Catalog(&'a CatalogFact),
    Schema(&'a SchemaFact),
    Table(&'a TableFact),
    Column(&'a TableFact, &'a ColumnFact),
    ForeignKey(&'a TableFact, &'a ForeignKeyFact),
}

/// A named schema object together with the metadata it was read from.
#[derive(Debug, Clone, Copy)]
pub struct Definition<'a> {
    pub metadata: &'a SchemaMetadata,
    pub kind: DefinitionKind<'a>,
}

impl<'a> Definition<'a> {
    pub fn catalog(metadata: &'a SchemaMetadata, catalog: &'a CatalogFact) -> Self {
        Self {
            metadata,
            kind: DefinitionKind::Catalog(catalog),
        }
    }

    pub fn schema(metadata: &'a SchemaMetadata, schema: &'a SchemaFact) -> Self {
        Self {
            metadata,
            kind: DefinitionKind::Schema(schema),
        }
    }

    pub fn table(metadata: &'a SchemaMetadata, table: &'a TableFact) -> Self {
        Self {
            metadata,
            kind: DefinitionKind::Table(table),
        }
    }

    pub fn column(
        metadata: &'a SchemaMetadata,
        table: &'a TableFact,
        column: &'a ColumnFact,
    ) -> Self {
        Self {
            metadata,
            kind: DefinitionKind::Column(table, column),
        }
    }

    pub fn foreign_key(
        metadata: &'a SchemaMetadata,
        table: &'a TableFact,
        key: &'a ForeignKeyFact,
    ) -> Self {
        Self {
            metadata,
            kind: DefinitionKind::ForeignKey(table, key),
        }
    }

    /// Name as supplied by the provider.
    pub fn output_name(&self) -> &'a str {
        match self.kind {
            DefinitionKind::Catalog(catalog) => &catalog.raw_name,
            DefinitionKind::Schema(schema) => &schema.raw_name,
            DefinitionKind::Table(table) => &table.raw_name,
            DefinitionKind::Column(_, column) => &column.raw_name,
            DefinitionKind::ForeignKey(_, key) => &key.name,
        }
    }

    /// Table the definition belongs to, if any.
    pub fn owning_table(&self) -> Option<&'a TableFact> {
        match self.kind {
            DefinitionKind::Table(table)
            | DefinitionKind::Column(table, _)
            | DefinitionKind::ForeignKey(table, _) => Some(table),
            DefinitionKind::Catalog(_) | DefinitionKind::Schema(_) => None,
        }
    }
}

pub trait NamingStrategy {
    fn class_name(&self, definition: Definition<'_>, mode: Mode) -> String;

    fn member_name(&self, definition: Definition<'_>, mode: Mode) -> String;

    fn getter_name(&self, definition: Definition<'_>, mode: Mode) -> String;

    fn setter_name(&self, definition: Definition<'_>, mode: Mode) -> String;

    fn method_name(&self, definition: Definition<'_>, mode: Mode) -> String;

    fn package_name(&self, definition: Definition<'_>, mode: Mode) -> String;

    fn class_extends(&self, definition: Definition<'_>, mode: Mode) -> Option<String>;

    fn class_implements(&self, definition: Definition<'_>, mode: Mode) -> Vec<String>;

    fn full_class_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        let package = self.package_name(definition, mode);
        let class = self.class_name(definition, mode);
        if package.is_empty() {
            class
        } else {
            format!("{package}.{class}")
        }
    }
}

impl<S: NamingStrategy + ?Sized> NamingStrategy for Box<S> {
    fn class_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        (**self).class_name(definition, mode)
    }

    fn member_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        (**self).member_name(definition, mode)
    }

    fn getter_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        (**self).getter_name(definition, mode)
    }

    fn setter_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        (**self).setter_name(definition, mode)
    }

    fn method_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        (**self).method_name(definition, mode)
    }

    fn package_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        (**self).package_name(definition, mode)
    }

    fn class_extends(&self, definition: Definition<'_>, mode: Mode) -> Option<String> {
        (**self).class_extends(definition, mode)
    }

    fn class_implements(&self, definition: Definition<'_>, mode: Mode) -> Vec<String> {
        (**self).class_implements(definition, mode)
    }
}
