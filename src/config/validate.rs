use anyhow::{Result, bail};

use super::AppConfig;

fn is_package_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    let package = cfg.general.target_package.trim();
    if package.is_empty() {
        errors.push("general.target_package must not be empty".to_string());
    } else if !package.split('.').all(is_package_segment) {
        errors.push(format!(
            "general.target_package ({package}) must be a dotted package name"
        ));
    }

    if cfg.general.output_dir.trim().is_empty() {
        errors.push("general.output_dir must not be empty".to_string());
    }

    let jpa_version = cfg.generate.jpa_version.trim();
    if !jpa_version.is_empty()
        && !jpa_version
            .split('.')
            .all(|part| !part.is_empty() && part.chars().all(|ch| ch.is_ascii_digit()))
    {
        errors.push(format!(
            "generate.jpa_version ({jpa_version}) must look like 2.1"
        ));
    }

    if cfg
        .generate
        .pojo_extends
        .as_deref()
        .is_some_and(|value| value.trim().is_empty())
    {
        errors.push("generate.pojo_extends must not be blank when set".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid generator config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        validate(&AppConfig::default()).expect("defaults should validate");
    }

    #[test]
    fn collects_every_problem() {
        let mut cfg = AppConfig::default();
        cfg.general.target_package = "com..Example-1".to_string();
        cfg.generate.jpa_version = "two".to_string();

        let err = validate(&cfg).expect_err("config should be rejected");
        let message = err.to_string();
        assert!(message.contains("general.target_package"));
        assert!(message.contains("generate.jpa_version"));
    }
}
