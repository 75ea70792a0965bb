use super::{Definition, Mode, NamingStrategy, decapitalize};

/// `getIsActive` becomes `isActive` and `setIsActive` becomes `setActive`;
/// anything else is returned unchanged.
pub fn collapse_boolean_accessor(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let embeds_marker =
        chars.len() > 6 && chars[3] == 'I' && chars[4] == 's' && chars[5].is_uppercase();
    if !embeds_marker {
        return name.to_string();
    }

    if chars[0] == 'g' {
        decapitalize(name.strip_prefix("get").unwrap_or(name))
    } else {
        chars[..3].iter().chain(&chars[5..]).collect()
    }
}

/// Decorates any strategy so its getter and setter names go through
/// [`collapse_boolean_accessor`]. Every other name is delegated untouched.
#[derive(Debug, Clone)]
pub struct AccessorCollapse<S> {
    inner: S,
}

impl<S: NamingStrategy> AccessorCollapse<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: NamingStrategy> NamingStrategy for AccessorCollapse<S> {
    fn class_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        self.inner.class_name(definition, mode)
    }

    fn member_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        self.inner.member_name(definition, mode)
    }

    fn getter_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        collapse_boolean_accessor(&self.inner.getter_name(definition, mode))
    }

    fn setter_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        collapse_boolean_accessor(&self.inner.setter_name(definition, mode))
    }

    fn method_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        self.inner.method_name(definition, mode)
    }

    fn package_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        self.inner.package_name(definition, mode)
    }

    fn class_extends(&self, definition: Definition<'_>, mode: Mode) -> Option<String> {
        self.inner.class_extends(definition, mode)
    }

    fn class_implements(&self, definition: Definition<'_>, mode: Mode) -> Vec<String> {
        self.inner.class_implements(definition, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::{BaseStrategy, NormalizingStrategy};
    use crate::options::GenerationOptions;
    use crate::schema::{ColumnFact, SchemaMetadata, TableFact, TypeDescriptor};

    #[test]
    fn collapses_embedded_boolean_marker() {
        assert_eq!(collapse_boolean_accessor("getIsActive"), "isActive");
        assert_eq!(collapse_boolean_accessor("setIsActive"), "setActive");
    }

    #[test]
    fn leaves_other_names_alone() {
        assert_eq!(collapse_boolean_accessor("getIsland"), "getIsland");
        assert_eq!(collapse_boolean_accessor("getIsX"), "getIsX");
        assert_eq!(collapse_boolean_accessor("getIssuer"), "getIssuer");
        assert_eq!(collapse_boolean_accessor("getName"), "getName");
    }

    #[test]
    fn decorated_strategy_collapses_column_accessors() {
        let metadata = SchemaMetadata {
            tables: vec![TableFact::new(
                "account",
                vec![ColumnFact::new("IS_ACTIVE", TypeDescriptor::sql("BOOLEAN"))],
            )],
            ..SchemaMetadata::default()
        };
        let table = &metadata.tables[0];
        let options = GenerationOptions::default();
        let strategy =
            AccessorCollapse::new(NormalizingStrategy::new(BaseStrategy::new(&options), &options));
        let column = Definition::column(&metadata, table, &table.columns[0]);

        assert_eq!(strategy.member_name(column, Mode::Default), "isActive");
        assert_eq!(strategy.getter_name(column, Mode::Default), "isActive");
        assert_eq!(strategy.setter_name(column, Mode::Default), "setActive");
        assert_eq!(strategy.inner().getter_name(column, Mode::Default), "getIsActive");
    }
}
