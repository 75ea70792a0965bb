use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Schema metadata document (JSON) produced by the metadata provider
    #[arg(long)]
    pub schema: PathBuf,
    /// Generator configuration file (TOML); CODEGEN_* variables override it
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory (overrides general.output_dir)
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Target package (overrides general.target_package)
    #[arg(long)]
    pub package: Option<String>,
    /// Render everything but write no files
    #[arg(long)]
    pub dry_run: bool,
}
