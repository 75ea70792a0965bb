use super::{Definition, DefinitionKind, Mode, NamingStrategy};
use crate::options::GenerationOptions;

/// Plain strategy: camel-cases names the simple way (every word lower-cased
/// after its first letter) and owns package layout and inheritance.
#[derive(Debug, Clone)]
pub struct BaseStrategy {
    target_package: String,
    data_holder_extends: Option<String>,
    data_holder_implements: Vec<String>,
    contract_implements: Vec<String>,
}

impl BaseStrategy {
    pub fn new(options: &GenerationOptions) -> Self {
        Self {
            target_package: options.target_package.clone(),
            data_holder_extends: options.data_holder_extends.clone(),
            data_holder_implements: options.data_holder_implements.clone(),
            contract_implements: options.contract_implements.clone(),
        }
    }

    fn camel_case(value: &str) -> String {
        let mut out = String::new();
        for part in value.split('_').filter(|part| !part.is_empty()) {
            let mut chars = part.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                for ch in chars {
                    out.extend(ch.to_lowercase());
                }
            }
        }
        out
    }

    fn package_segment(value: &str) -> String {
        value
            .chars()
            .map(|ch| {
                if ch.is_ascii_alphanumeric() {
                    ch.to_ascii_lowercase()
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl NamingStrategy for BaseStrategy {
    fn class_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        let name = Self::camel_case(definition.output_name());
        match mode {
            Mode::Record => format!("{name}Record"),
            Mode::Dao => format!("{name}Dao"),
            Mode::Interface => format!("I{name}"),
            Mode::Default | Mode::Pojo => name,
        }
    }

    fn member_name(&self, definition: Definition<'_>, _mode: Mode) -> String {
        super::decapitalize(&self.class_name(definition, Mode::Default))
    }

    fn getter_name(&self, definition: Definition<'_>, _mode: Mode) -> String {
        format!("get{}", self.class_name(definition, Mode::Default))
    }

    fn setter_name(&self, definition: Definition<'_>, _mode: Mode) -> String {
        format!("set{}", self.class_name(definition, Mode::Default))
    }

    fn method_name(&self, definition: Definition<'_>, _mode: Mode) -> String {
        super::decapitalize(&self.class_name(definition, Mode::Default))
    }

    fn package_name(&self, definition: Definition<'_>, mode: Mode) -> String {
        let mut package = self.target_package.clone();
        let Some(table) = definition.owning_table() else {
            return package;
        };

        let metadata = definition.metadata;
        if let Some(catalog) = metadata.catalog_of(table).filter(|catalog| !catalog.is_default) {
            package.push('.');
            package.push_str(&Self::package_segment(&catalog.raw_name));
        }
        if let Some(schema) = metadata.schema_of(table).filter(|schema| !schema.is_default) {
            package.push('.');
            package.push_str(&Self::package_segment(&schema.raw_name));
        }

        if matches!(definition.kind, DefinitionKind::Table(_)) {
            package.push_str(match mode {
                Mode::Pojo => ".tables.pojos",
                Mode::Interface => ".tables.interfaces",
                Mode::Record => ".tables.records",
                Mode::Dao => ".tables.daos",
                Mode::Default => ".tables",
            });
        }
        package
    }

    fn class_extends(&self, _definition: Definition<'_>, mode: Mode) -> Option<String> {
        match mode {
            Mode::Pojo => self.data_holder_extends.clone(),
            _ => None,
        }
    }

    fn class_implements(&self, _definition: Definition<'_>, mode: Mode) -> Vec<String> {
        match mode {
            Mode::Pojo => self.data_holder_implements.clone(),
            Mode::Interface => self.contract_implements.clone(),
            _ => Vec::new(),
        }
    }
}
