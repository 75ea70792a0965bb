use std::path::PathBuf;

/// Upper bound on constructor/method arity the generated code may rely on.
pub const ARITY_CEILING: usize = 255;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error(
        "immutable data holder for table '{table}' has {columns} columns (more than {max}) and must have a contract type",
        max = ARITY_CEILING
    )]
    OversizedWithoutContract { table: String, columns: usize },
    #[error("couldn't make a guess for {name}")]
    UnresolvedType { name: String },
    #[error("failed to decode schema metadata: {0}")]
    Metadata(#[from] serde_json::Error),
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::OversizedWithoutContract { .. })
    }
}

pub type GenResult<T> = Result<T, GenError>;
