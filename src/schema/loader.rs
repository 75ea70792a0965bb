use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use super::{CatalogFact, SchemaFact, TableFact};
use crate::error::{GenError, GenResult};

/// Everything the metadata provider hands over for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaMetadata {
    #[serde(default)]
    pub catalogs: Vec<CatalogFact>,
    #[serde(default)]
    pub schemas: Vec<SchemaFact>,
    pub tables: Vec<TableFact>,
    /// Provider option bag; values are only interpreted by
    /// [`crate::options::GenerationOptions::resolve`].
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
}

impl SchemaMetadata {
    pub fn from_json(text: &str) -> GenResult<Self> {
        let mut metadata: Self = serde_json::from_str(text)?;
        metadata.link();
        Ok(metadata)
    }

    pub fn from_path(path: &Path) -> GenResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| GenError::io(path, err))?;
        tracing::debug!(path = %path.display(), "loaded schema metadata");
        Self::from_json(&text)
    }

    pub fn link(&mut self) {
        for table in &mut self.tables {
            table.link_columns();
        }
    }

    pub fn table(&self, id: &str) -> Option<&TableFact> {
        self.tables.iter().find(|table| table.id == id)
    }

    pub fn schema_of(&self, table: &TableFact) -> Option<&SchemaFact> {
        let id = table.schema_id.as_deref()?;
        self.schemas.iter().find(|schema| schema.id == id)
    }

    pub fn catalog_of(&self, table: &TableFact) -> Option<&CatalogFact> {
        let id = table.catalog_id.as_deref()?;
        self.catalogs.iter().find(|catalog| catalog.id == id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::schema::SortOrder;

    #[test]
    fn decodes_and_links_provider_document() {
        let doc = json!({
            "schemas": [{ "id": "sales", "name": "sales" }],
            "tables": [{
                "name": "order_line",
                "schema_id": "sales",
                "columns": [
                    { "name": "ID", "type": { "sql_type": "BIGINT" }, "nullable": false, "is_identity": true },
                    { "name": "sku", "type": { "sql_type": "VARCHAR" }, "length": 32 }
                ],
                "primary_key": { "name": "pk", "columns": ["ID"] },
                "indexes": [{ "name": "idx_sku", "columns": [{ "name": "sku", "order": "ASC" }] }]
            }],
            "properties": { "dataclasses": "true" }
        });

        let metadata = SchemaMetadata::from_json(&doc.to_string()).expect("metadata should decode");
        let table = metadata.table("order_line").expect("table id defaults to name");

        assert_eq!(table.columns.len(), 2);
        assert!(table.columns[0].part_of_primary_key);
        assert!(table.columns[1].nullable);
        assert_eq!(table.indexes[0].columns[0].order, SortOrder::Asc);
        assert!(table.is_sole_primary_key(&table.columns[0]));
        assert_eq!(metadata.schema_of(table).map(|schema| schema.is_default), Some(false));
        assert!(metadata.catalog_of(table).is_none());
        assert_eq!(metadata.properties["dataclasses"], "true");
    }

    #[test]
    fn malformed_document_is_a_metadata_error() {
        let err = SchemaMetadata::from_json("{\"tables\": 3}").expect_err("should fail");
        assert!(matches!(err, GenError::Metadata(_)));
    }
}
