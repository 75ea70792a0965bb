use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
    #[default]
    Default,
}

impl SortOrder {
    /// Suffix appended to a column in an index column list.
    pub fn suffix(self) -> &'static str {
        match self {
            SortOrder::Asc => " ASC",
            SortOrder::Desc => " DESC",
            SortOrder::Default => "",
        }
    }
}

/// Column type as reported by the provider. `host_type` is a JVM type name and
/// wins over `sql_type` when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub sql_type: String,
    #[serde(default)]
    pub host_type: Option<String>,
}

impl TypeDescriptor {
    pub fn sql(sql_type: impl Into<String>) -> Self {
        Self {
            sql_type: sql_type.into(),
            host_type: None,
        }
    }

    pub fn host(host_type: impl Into<String>) -> Self {
        let host_type = host_type.into();
        Self {
            sql_type: String::new(),
            host_type: Some(host_type),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnFact {
    #[serde(default)]
    pub owner_table_id: String,
    #[serde(rename = "name")]
    pub raw_name: String,
    #[serde(rename = "type")]
    pub type_descriptor: TypeDescriptor,
    #[serde(default = "default_true")]
    pub nullable: bool,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default)]
    pub is_identity: bool,
    #[serde(default)]
    pub length: u32,
    #[serde(default)]
    pub precision: u32,
    #[serde(default)]
    pub scale: u32,
    #[serde(default)]
    pub part_of_primary_key: bool,
    #[serde(default)]
    pub part_of_unique_keys: BTreeSet<String>,
    #[serde(default)]
    pub part_of_indexes: BTreeSet<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl ColumnFact {
    pub fn new(raw_name: impl Into<String>, type_descriptor: TypeDescriptor) -> Self {
        Self {
            owner_table_id: String::new(),
            raw_name: raw_name.into(),
            type_descriptor,
            nullable: true,
            has_default: false,
            is_identity: false,
            length: 0,
            precision: 0,
            scale: 0,
            part_of_primary_key: false,
            part_of_unique_keys: BTreeSet::new(),
            part_of_indexes: BTreeSet::new(),
            comment: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFact {
    #[serde(default)]
    pub name: String,
    pub columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyFact {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    pub referenced_table: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFact {
    pub name: String,
    #[serde(default)]
    pub unique: bool,
    pub columns: Vec<IndexColumn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableFact {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "name")]
    pub raw_name: String,
    #[serde(default)]
    pub schema_id: Option<String>,
    #[serde(default)]
    pub catalog_id: Option<String>,
    pub columns: Vec<ColumnFact>,
    #[serde(default)]
    pub primary_key: Option<KeyFact>,
    #[serde(default)]
    pub unique_keys: Vec<KeyFact>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyFact>,
    #[serde(default)]
    pub indexes: Vec<IndexFact>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TableFact {
    pub fn new(raw_name: impl Into<String>, columns: Vec<ColumnFact>) -> Self {
        let raw_name = raw_name.into();
        Self {
            id: raw_name.clone(),
            raw_name,
            schema_id: None,
            catalog_id: None,
            columns,
            primary_key: None,
            unique_keys: Vec::new(),
            foreign_keys: Vec::new(),
            indexes: Vec::new(),
            comment: None,
        }
    }

    pub fn column(&self, raw_name: &str) -> Option<&ColumnFact> {
        self.columns.iter().find(|column| column.raw_name == raw_name)
    }

    fn owns(&self, column: &ColumnFact) -> bool {
        column.owner_table_id == self.id
    }

    /// True when the column is the only column of the primary key. Reads the
    /// facts filled by [`TableFact::link_columns`].
    pub fn is_sole_primary_key(&self, column: &ColumnFact) -> bool {
        self.owns(column)
            && column.part_of_primary_key
            && self.primary_key.as_ref().is_some_and(|pk| pk.columns.len() == 1)
    }

    /// True when some unique key consists of this column alone.
    pub fn is_sole_unique_member(&self, column: &ColumnFact) -> bool {
        self.owns(column)
            && self
                .unique_keys
                .iter()
                .filter(|key| key.columns.len() == 1)
                .any(|key| column.part_of_unique_keys.contains(&key.name))
    }

    pub fn multi_column_unique_keys(&self) -> impl Iterator<Item = &KeyFact> {
        self.unique_keys.iter().filter(|key| key.columns.len() > 1)
    }

    pub fn foreign_keys_to<'a>(
        &'a self,
        referenced: &'a str,
    ) -> impl Iterator<Item = &'a ForeignKeyFact> + 'a {
        self.foreign_keys
            .iter()
            .filter(move |fk| fk.referenced_table == referenced)
    }

    /// Fills the denormalized column facts from the table-level key and index
    /// lists. Unnamed or repeated unique key names are replaced so each key
    /// is told apart by name. Safe to call more than once.
    pub fn link_columns(&mut self) {
        if self.id.is_empty() {
            self.id = self.raw_name.clone();
        }
        let mut seen = BTreeSet::new();
        for (position, key) in self.unique_keys.iter_mut().enumerate() {
            if key.name.is_empty() || seen.contains(&key.name) {
                key.name = format!("{}_uk{}", self.id, position + 1);
            }
            seen.insert(key.name.clone());
        }
        for column in &mut self.columns {
            column.owner_table_id = self.id.clone();
            column.part_of_primary_key = self
                .primary_key
                .as_ref()
                .is_some_and(|pk| pk.columns.contains(&column.raw_name));
            column.part_of_unique_keys = self
                .unique_keys
                .iter()
                .filter(|key| key.columns.contains(&column.raw_name))
                .map(|key| key.name.clone())
                .collect();
            column.part_of_indexes = self
                .indexes
                .iter()
                .filter(|index| index.columns.iter().any(|c| c.name == column.raw_name))
                .map(|index| index.name.clone())
                .collect();
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaFact {
    pub id: String,
    #[serde(rename = "name")]
    pub raw_name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFact {
    pub id: String,
    #[serde(rename = "name")]
    pub raw_name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub version: Option<String>,
}
