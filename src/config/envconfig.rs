use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Layered loading: optional TOML file first, then `CODEGEN_*` environment
/// variables on top.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "CODEGEN";
    const SEPARATOR: &'static str = "__";

    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }

    fn environment() -> config_rs::Environment {
        config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .list_separator(",")
            .with_list_parse_key("generate.pojo_implements")
            .with_list_parse_key("generate.interface_implements")
            .try_parsing(true)
    }

    /// Nothing is validated here; callers validate once their own overrides
    /// are applied.
    fn load(file: Option<&Path>) -> Result<Self> {
        Self::load_dotenv();
        Self::load_with_env(file, None)
    }

    /// `env` replaces the process environment when given.
    fn load_with_env(file: Option<&Path>, env: Option<config_rs::Map<String, String>>) -> Result<Self> {
        let mut builder = config_rs::Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(
                config_rs::File::from(file)
                    .format(config_rs::FileFormat::Toml)
                    .required(true),
            );
        }

        let settings = builder
            .add_source(Self::environment().source(env))
            .build()
            .context("failed to read generator configuration")?;

        settings
            .try_deserialize::<Self>()
            .context("failed to deserialize generator configuration")
    }
}
