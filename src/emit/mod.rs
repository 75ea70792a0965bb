//! Source emission: the abstract [`TypeDescription`] model, the Kotlin
//! renderer and the file writer.

mod kotlin;
mod spec;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub use kotlin::{KotlinEmitter, escape_identifier, string_literal};
pub use spec::{
    AnnotationSpec, AnnotationValue, Arg, CONSTRUCTOR, CodeBlock, FunSpec, Line, Modifier,
    ParamSpec, PropertySpec, TypeDescription, TypeKind, TypeRef, UseSite,
};

use crate::error::{GenError, GenResult};

/// Turns a type description into the text of one source file.
pub trait SourceEmitter {
    fn file_extension(&self) -> &'static str;

    fn render(&self, description: &TypeDescription) -> String;

    /// Path of the description's file relative to the output root.
    fn relative_path(&self, description: &TypeDescription) -> PathBuf {
        let mut path: PathBuf = description
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}.{}", description.name, self.file_extension()));
        path
    }
}

/// Collapses doubled back-quotes left behind when an already quoted name is
/// quoted again.
pub fn normalize_escapes(text: &str) -> String {
    text.replace("``", "`")
}

/// Writes a fully rendered file, creating parent directories as needed.
pub fn write_source(path: &Path, text: &str) -> GenResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| GenError::io(parent, source))?;
    }

    let file = File::create(path).map_err(|source| GenError::io(path, source))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(normalize_escapes(text).as_bytes())
        .and_then(|()| writer.flush())
        .map_err(|source| GenError::io(path, source))?;
    tracing::debug!(path = %path.display(), "wrote source file");
    Ok(())
}
