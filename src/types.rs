//! Maps column types to target-language type references.

use crate::emit::TypeRef;
use crate::error::{GenError, GenResult};
use crate::schema::{ColumnFact, TypeDescriptor};

const KOTLIN_PACKAGE: &str = "kotlin";

const KOTLIN_BUILTINS: &[(&str, &str)] = &[
    ("java.lang.String", "String"),
    ("java.lang.Integer", "Int"),
    ("java.lang.Long", "Long"),
    ("java.lang.Short", "Short"),
    ("java.lang.Byte", "Byte"),
    ("java.lang.Boolean", "Boolean"),
    ("java.lang.Float", "Float"),
    ("java.lang.Double", "Double"),
    ("java.lang.Character", "Char"),
    ("java.lang.Object", "Any"),
    ("java.lang.Number", "Number"),
    ("java.lang.CharSequence", "CharSequence"),
];

const PRIMITIVE_ARRAYS: &[(&str, &str)] = &[
    ("boolean[]", "BooleanArray"),
    ("byte[]", "ByteArray"),
    ("short[]", "ShortArray"),
    ("int[]", "IntArray"),
    ("long[]", "LongArray"),
    ("float[]", "FloatArray"),
    ("double[]", "DoubleArray"),
];

/// JVM host type for a SQL type name. Length and precision suffixes such as
/// `VARCHAR(32)` are ignored.
pub fn sql_host_type(sql_type: &str) -> &'static str {
    let base = sql_type.split('(').next().unwrap_or_default();
    let base = base.split_whitespace().collect::<Vec<_>>().join(" ");
    match base.to_ascii_uppercase().as_str() {
        "CHAR" | "CHARACTER" | "VARCHAR" | "CHARACTER VARYING" | "NCHAR" | "NVARCHAR"
        | "LONGVARCHAR" | "LONGNVARCHAR" | "TEXT" | "CLOB" | "NCLOB" | "CITEXT" | "JSON"
        | "JSONB" | "XML" => "java.lang.String",
        "BOOLEAN" | "BOOL" | "BIT" => "java.lang.Boolean",
        "TINYINT" => "java.lang.Byte",
        "SMALLINT" | "INT2" | "SMALLSERIAL" => "java.lang.Short",
        "INTEGER" | "INT" | "INT4" | "MEDIUMINT" | "SERIAL" => "java.lang.Integer",
        "BIGINT" | "INT8" | "BIGSERIAL" => "java.lang.Long",
        "REAL" | "FLOAT4" => "java.lang.Float",
        "DOUBLE" | "DOUBLE PRECISION" | "FLOAT" | "FLOAT8" => "java.lang.Double",
        "DECIMAL" | "NUMERIC" | "NUMBER" => "java.math.BigDecimal",
        "DECIMAL_INTEGER" => "java.math.BigInteger",
        "DATE" => "java.time.LocalDate",
        "TIME" | "TIME WITHOUT TIME ZONE" => "java.time.LocalTime",
        "TIMETZ" | "TIME WITH TIME ZONE" => "java.time.OffsetTime",
        "TIMESTAMP" | "DATETIME" | "TIMESTAMP WITHOUT TIME ZONE" => "java.time.LocalDateTime",
        "TIMESTAMPTZ" | "TIMESTAMP WITH TIME ZONE" => "java.time.OffsetDateTime",
        "UUID" => "java.util.UUID",
        "BINARY" | "VARBINARY" | "LONGVARBINARY" | "BLOB" | "BYTEA" => "byte[]",
        _ => "java.lang.Object",
    }
}

/// The explicit host type wins; otherwise the SQL type is mapped.
pub fn host_type_name(descriptor: &TypeDescriptor) -> String {
    match descriptor
        .host_type
        .as_deref()
        .map(str::trim)
        .filter(|host| !host.is_empty())
    {
        Some(host) => host.to_string(),
        None => sql_host_type(&descriptor.sql_type).to_string(),
    }
}

fn lookup(table: &[(&str, &'static str)], name: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(host, _)| *host == name)
        .map(|(_, kotlin)| *kotlin)
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$')
}

/// Splits a qualified name into package and simple names: lower-case segments
/// form the package, the first upper-case segment and everything after it are
/// nested simple names.
pub fn best_guess(name: &str) -> GenResult<TypeRef> {
    let unresolved = || GenError::UnresolvedType {
        name: name.to_string(),
    };
    let segments: Vec<&str> = name.split('.').collect();
    if segments.iter().any(|segment| !is_identifier(segment)) {
        return Err(unresolved());
    }

    let first_type = segments
        .iter()
        .position(|segment| segment.starts_with(char::is_uppercase))
        .ok_or_else(unresolved)?;
    let (package, names) = segments.split_at(first_type);
    if names
        .iter()
        .any(|simple| !simple.starts_with(char::is_uppercase))
    {
        return Err(unresolved());
    }

    Ok(TypeRef::new(&package.join("."), names))
}

/// Resolves a JVM type name to a nullable target-language reference.
pub fn resolve_type_name(name: &str) -> GenResult<TypeRef> {
    let name = name.trim();
    let resolved = match lookup(KOTLIN_BUILTINS, name).or_else(|| lookup(PRIMITIVE_ARRAYS, name)) {
        Some(kotlin) => TypeRef::new(KOTLIN_PACKAGE, &[kotlin]),
        None => best_guess(name)?,
    };
    Ok(resolved.with_nullable(true))
}

pub fn resolve_column_type(column: &ColumnFact) -> GenResult<TypeRef> {
    resolve_type_name(&host_type_name(&column.type_descriptor))
}
