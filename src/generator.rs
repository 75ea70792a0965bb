//! The run loop: one contract and one data holder per table, rendered and
//! written in table order.

use std::path::{Path, PathBuf};

use crate::context::RunContext;
use crate::emit::{KotlinEmitter, SourceEmitter, TypeDescription, write_source};
use crate::error::GenResult;
use crate::schema::{SchemaMetadata, TableFact};
use crate::synth::{DataHolderShape, TablePlan, synthesize_contract, synthesize_data_holder};

/// A rendered source file, not yet written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Relative to the output directory.
    pub path: PathBuf,
    pub text: String,
}

/// Produces the files of one table.
pub trait FileGenerator {
    fn generate_table(
        &self,
        ctx: &RunContext,
        metadata: &SchemaMetadata,
        table: &TableFact,
    ) -> GenResult<Vec<GeneratedFile>>;
}

#[derive(Debug, Clone, Default)]
pub struct KotlinFileGenerator<E = KotlinEmitter> {
    emitter: E,
}

impl<E: SourceEmitter> KotlinFileGenerator<E> {
    pub fn new(emitter: E) -> Self {
        Self { emitter }
    }

    /// Contract first, then the data holder.
    pub fn describe_table(
        &self,
        ctx: &RunContext,
        metadata: &SchemaMetadata,
        table: &TableFact,
    ) -> GenResult<Vec<TypeDescription>> {
        let options = &ctx.options;
        // Decided before anything is resolved so the configuration error wins.
        let shape = options
            .emit_data_holders
            .then(|| DataHolderShape::decide(&table.raw_name, table.columns.len(), options))
            .transpose()?;

        let plan = TablePlan::build(ctx, metadata, table)?;
        tracing::debug!(
            table = %table.raw_name,
            columns = table.columns.len(),
            shape = ?shape,
            "synthesizing table"
        );

        let mut descriptions = Vec::new();
        descriptions.extend(synthesize_contract(&plan, options));
        if let Some(shape) = shape {
            descriptions.push(synthesize_data_holder(&plan, &shape, options));
        }
        Ok(descriptions)
    }
}

impl<E: SourceEmitter> FileGenerator for KotlinFileGenerator<E> {
    fn generate_table(
        &self,
        ctx: &RunContext,
        metadata: &SchemaMetadata,
        table: &TableFact,
    ) -> GenResult<Vec<GeneratedFile>> {
        Ok(self
            .describe_table(ctx, metadata, table)?
            .iter()
            .map(|description| GeneratedFile {
                path: self.emitter.relative_path(description),
                text: self.emitter.render(description),
            })
            .collect())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub tables: usize,
    /// Absolute or output-relative paths, in generation order.
    pub files: Vec<PathBuf>,
}

pub struct Generator<G = KotlinFileGenerator> {
    ctx: RunContext,
    files: G,
}

impl Generator<KotlinFileGenerator> {
    pub fn kotlin(ctx: RunContext) -> Self {
        Self::new(ctx, KotlinFileGenerator::default())
    }
}

impl<G: FileGenerator> Generator<G> {
    pub fn new(ctx: RunContext, files: G) -> Self {
        Self { ctx, files }
    }

    pub fn context(&self) -> &RunContext {
        &self.ctx
    }

    /// Generates every table into `out_dir`. With `dry_run` nothing is
    /// written and the summary lists the files that would have been.
    pub fn run(
        &self,
        metadata: &SchemaMetadata,
        out_dir: &Path,
        dry_run: bool,
    ) -> GenResult<RunSummary> {
        tracing::info!(
            tables = metadata.tables.len(),
            out_dir = %out_dir.display(),
            dry_run,
            "generating sources"
        );

        let mut summary = RunSummary::default();
        for table in &metadata.tables {
            for file in self.files.generate_table(&self.ctx, metadata, table)? {
                let path = out_dir.join(&file.path);
                if !dry_run {
                    write_source(&path, &file.text)?;
                }
                summary.files.push(path);
            }
            summary.tables += 1;
        }

        tracing::info!(
            tables = summary.tables,
            files = summary.files.len(),
            "generation finished"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::GenerationOptions;
    use crate::schema::{ColumnFact, TypeDescriptor};

    struct Fixed;

    impl FileGenerator for Fixed {
        fn generate_table(
            &self,
            _ctx: &RunContext,
            _metadata: &SchemaMetadata,
            table: &TableFact,
        ) -> GenResult<Vec<GeneratedFile>> {
            Ok(vec![GeneratedFile {
                path: PathBuf::from(format!("{}.txt", table.raw_name)),
                text: table.raw_name.clone(),
            }])
        }
    }

    fn metadata() -> SchemaMetadata {
        SchemaMetadata {
            tables: vec![
                TableFact::new("a", vec![ColumnFact::new("id", TypeDescriptor::sql("INT"))]),
                TableFact::new("b", Vec::new()),
            ],
            ..SchemaMetadata::default()
        }
    }

    #[test]
    fn custom_file_generator_is_used_per_table() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::new(RunContext::new(GenerationOptions::default()), Fixed);

        let summary = generator.run(&metadata(), dir.path(), false).unwrap();
        assert_eq!(summary.tables, 2);
        assert_eq!(std::fs::read_to_string(dir.path().join("b.txt")).unwrap(), "b");
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let generator = Generator::kotlin(RunContext::new(GenerationOptions::default()));

        let summary = generator.run(&metadata(), dir.path(), true).unwrap();
        assert_eq!(summary.files.len(), 2);
        assert!(summary.files.iter().all(|path| !path.exists()));
    }

    #[test]
    fn contract_precedes_data_holder() {
        let mut options = GenerationOptions::default();
        options.emit_contract_types = true;
        let ctx = RunContext::new(options);
        let metadata = metadata();

        let descriptions = KotlinFileGenerator::<KotlinEmitter>::default()
            .describe_table(&ctx, &metadata, &metadata.tables[0])
            .unwrap();
        let names: Vec<&str> = descriptions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["IA", "A"]);
    }
}
