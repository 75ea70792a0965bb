pub const DEFAULT_TARGET_PACKAGE: &str = "org.jooq.generated";
pub const DEFAULT_OUTPUT_DIR: &str = "target/generated-sources/kotlin";
pub const DEFAULT_RUST_LOG: &str = "info";
pub const DEFAULT_GENERATE_POJOS: bool = true;
pub const DEFAULT_GENERATE_INTERFACES: bool = false;
pub const DEFAULT_POJOS_TO_STRING: bool = true;
pub const DEFAULT_GENERATED_ANNOTATION: bool = true;
