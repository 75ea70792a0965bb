//! Generation options, resolved once per run.
//!
//! Two inputs feed them: the typed `[generate]` section of the generator
//! configuration and the provider's string property bag. The property bag is
//! read here and nowhere else; a flag is on only for the literal `"true"`.

use std::collections::BTreeMap;

use crate::config::GenerateConfig;

pub const PROP_DATA_CLASSES: &str = "dataclasses";
pub const PROP_COPY: &str = "copy";
pub const PROP_DESTRUCTURING: &str = "destructuring";
pub const PROP_INTROSPECTED: &str = "introspected";
pub const PROP_MICRONAUT: &str = "micronaut";
pub const PROP_POJO_APPEND: &str = "pojo_append";

/// Index declarations need at least this JPA version.
pub const INDEX_MIN_JPA_VERSION: &str = "2.1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub target_package: String,
    pub emit_data_holders: bool,
    pub emit_contract_types: bool,
    pub emit_data_shape: bool,
    pub emit_immutable_data_holders: bool,
    pub emit_immutable_contracts: bool,
    pub emit_copy_helpers: bool,
    pub emit_destructuring: bool,
    pub emit_equals_and_hash: bool,
    pub emit_to_string: bool,
    pub emit_provenance_annotation: bool,
    pub emit_persistence_annotations: bool,
    pub jpa_version: String,
    pub emit_validation_annotations: bool,
    pub emit_introspection_annotation: bool,
    pub target_micronaut: bool,
    pub plain_record_suffix: Option<String>,
    pub bean_accessor_style: bool,
    pub data_holder_extends: Option<String>,
    pub data_holder_implements: Vec<String>,
    pub contract_implements: Vec<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self::resolve(&GenerateConfig::default(), "", &BTreeMap::new())
    }
}

fn flag(properties: &BTreeMap<String, String>, key: &str) -> bool {
    properties.get(key).is_some_and(|value| value == "true")
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .filter(|value| !value.trim().is_empty())
        .map(|value| value.to_string())
}

impl GenerationOptions {
    pub fn resolve(
        generate: &GenerateConfig,
        target_package: &str,
        properties: &BTreeMap<String, String>,
    ) -> Self {
        for (key, value) in properties {
            if value != "true" && key != PROP_POJO_APPEND {
                tracing::debug!(%key, %value, "property is not \"true\"; feature stays disabled");
            }
        }

        Self {
            target_package: target_package.to_string(),
            emit_data_holders: generate.pojos,
            emit_contract_types: generate.interfaces,
            emit_data_shape: flag(properties, PROP_DATA_CLASSES),
            emit_immutable_data_holders: generate.immutable_pojos,
            emit_immutable_contracts: generate.immutable_interfaces,
            emit_copy_helpers: flag(properties, PROP_COPY),
            emit_destructuring: flag(properties, PROP_DESTRUCTURING),
            emit_equals_and_hash: generate.pojos_equals_and_hash_code,
            emit_to_string: generate.pojos_to_string,
            emit_provenance_annotation: generate.generated_annotation,
            emit_persistence_annotations: generate.jpa_annotations,
            jpa_version: generate.jpa_version.trim().to_string(),
            emit_validation_annotations: generate.validation_annotations,
            emit_introspection_annotation: flag(properties, PROP_INTROSPECTED),
            target_micronaut: flag(properties, PROP_MICRONAUT),
            plain_record_suffix: non_blank(properties.get(PROP_POJO_APPEND)),
            bean_accessor_style: generate.java_beans_getters_and_setters,
            data_holder_extends: generate.pojo_extends.clone(),
            data_holder_implements: generate.pojo_implements.clone(),
            contract_implements: generate.interface_implements.clone(),
        }
    }

    /// Blank means "latest"; otherwise versions compare as plain strings.
    pub fn supports_index_annotations(&self) -> bool {
        self.jpa_version.is_empty()
            || self.jpa_version.as_str() >= INDEX_MIN_JPA_VERSION
    }

    pub fn emit_introspected(&self) -> bool {
        self.target_micronaut && self.emit_introspection_annotation
    }
}
