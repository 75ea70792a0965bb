use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
    pub generate: GenerateConfig,
}

impl AppConfig {
    /// Layered load without validation; see [`AppConfig::validate`].
    pub fn load(file: Option<&Path>) -> Result<Self> {
        <Self as EnvConfig>::load(file)
    }

    pub fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

impl EnvConfig for AppConfig {}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneralConfig {
    pub target_package: String,
    pub output_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            target_package: defaults::DEFAULT_TARGET_PACKAGE.to_string(),
            output_dir: defaults::DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

/// Generator switches, named after the `<generate>` flags they mirror.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    pub pojos: bool,
    pub interfaces: bool,
    pub immutable_pojos: bool,
    pub immutable_interfaces: bool,
    pub pojos_equals_and_hash_code: bool,
    pub pojos_to_string: bool,
    pub generated_annotation: bool,
    pub jpa_annotations: bool,
    pub jpa_version: String,
    pub validation_annotations: bool,
    pub java_beans_getters_and_setters: bool,
    pub pojo_extends: Option<String>,
    pub pojo_implements: Vec<String>,
    pub interface_implements: Vec<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            pojos: defaults::DEFAULT_GENERATE_POJOS,
            interfaces: defaults::DEFAULT_GENERATE_INTERFACES,
            immutable_pojos: false,
            immutable_interfaces: false,
            pojos_equals_and_hash_code: false,
            pojos_to_string: defaults::DEFAULT_POJOS_TO_STRING,
            generated_annotation: defaults::DEFAULT_GENERATED_ANNOTATION,
            jpa_annotations: false,
            jpa_version: String::new(),
            validation_annotations: false,
            java_beans_getters_and_setters: false,
            pojo_extends: None,
            pojo_implements: Vec::new(),
            interface_implements: Vec::new(),
        }
    }
}
