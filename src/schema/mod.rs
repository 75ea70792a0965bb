//! Schema metadata as handed over by the metadata provider.
//!
//! The provider document is plain JSON. Column facts carry a few denormalized
//! fields (owner table, key and index membership) that are filled by
//! [`SchemaMetadata::link`] right after decoding, so consumers never have to
//! walk the table-level key lists to answer column questions.

mod facts;
mod loader;

pub use facts::{
    CatalogFact, ColumnFact, ForeignKeyFact, IndexColumn, IndexFact, KeyFact, SchemaFact,
    SortOrder, TableFact, TypeDescriptor,
};
pub use loader::SchemaMetadata;
