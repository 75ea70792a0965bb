mod cli;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use schema_codegen::{
    config::AppConfig,
    context::RunContext,
    generator::Generator,
    logging::init_tracing,
    options::GenerationOptions,
    schema::SchemaMetadata,
};

fn main() {
    let cli = cli::Cli::parse();
    let cfg = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(err) => {
            // The log level comes from this config, so no subscriber exists yet.
            eprintln!("error: {err:?}");
            std::process::exit(1);
        }
    };

    init_tracing(&cfg.logging.rust_log);
    if let Err(err) = run(&cli, &cfg) {
        tracing::error!("generation failed: {err:?}");
        std::process::exit(1);
    }
}

/// File and environment first, then the command-line overrides, then a single
/// validation pass over the result.
fn load_config(cli: &cli::Cli) -> anyhow::Result<AppConfig> {
    let mut cfg = AppConfig::load(cli.config.as_deref())?;
    if let Some(package) = &cli.package {
        cfg.general.target_package = package.clone();
    }
    if let Some(out) = &cli.out {
        cfg.general.output_dir = out.display().to_string();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn run(cli: &cli::Cli, cfg: &AppConfig) -> anyhow::Result<()> {
    if cfg.generate.immutable_pojos && !cfg.generate.interfaces {
        tracing::warn!("immutable pojos without interfaces: tables over the arity ceiling will fail");
    }
    if cfg.generate.immutable_pojos && cfg.generate.interfaces && !cfg.generate.immutable_interfaces {
        tracing::warn!("immutable pojos with mutable interfaces: generated types will not compile");
    }

    let metadata = SchemaMetadata::from_path(&cli.schema)
        .with_context(|| format!("failed to load schema metadata from {}", cli.schema.display()))?;
    let options = GenerationOptions::resolve(
        &cfg.generate,
        cfg.general.target_package.trim(),
        &metadata.properties,
    );

    let generator = Generator::kotlin(RunContext::new(options));
    let out_dir = PathBuf::from(&cfg.general.output_dir);
    let summary = generator.run(&metadata, &out_dir, cli.dry_run)?;

    if cli.dry_run {
        for path in &summary.files {
            println!("{}", path.display());
        }
    }
    tracing::info!(
        "generated {} files for {} tables into {}",
        summary.files.len(),
        summary.tables,
        out_dir.display()
    );
    Ok(())
}
