use chrono::{DateTime, SecondsFormat, Utc};

use crate::naming::{AccessorCollapse, BaseStrategy, NamingStrategy, NormalizingStrategy};
use crate::options::GenerationOptions;

pub const GENERATOR_NAME: &str = env!("CARGO_PKG_NAME");
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Who generated the sources, and when. Fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub generator: String,
    pub version: String,
    pub generated_at: DateTime<Utc>,
}

impl Provenance {
    pub fn now() -> Self {
        Self {
            generator: GENERATOR_NAME.to_string(),
            version: GENERATOR_VERSION.to_string(),
            generated_at: Utc::now(),
        }
    }

    pub fn timestamp(&self) -> String {
        self.generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// State shared by every table of one run. Built once, read-only afterwards.
pub struct RunContext {
    pub options: GenerationOptions,
    pub provenance: Provenance,
    strategy: Box<dyn NamingStrategy>,
}

impl RunContext {
    /// Uses the normalizing strategy over the base strategy.
    pub fn new(options: GenerationOptions) -> Self {
        let strategy = NormalizingStrategy::new(BaseStrategy::new(&options), &options);
        Self::with_strategy(options, Box::new(strategy))
    }

    /// Wraps a caller-supplied strategy with boolean accessor collapsing.
    pub fn with_strategy(options: GenerationOptions, strategy: Box<dyn NamingStrategy>) -> Self {
        Self {
            options,
            provenance: Provenance::now(),
            strategy: Box::new(AccessorCollapse::new(strategy)),
        }
    }

    pub fn generated_at(mut self, generated_at: DateTime<Utc>) -> Self {
        self.provenance.generated_at = generated_at;
        self
    }

    pub fn strategy(&self) -> &dyn NamingStrategy {
        self.strategy.as_ref()
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("options", &self.options)
            .field("provenance", &self.provenance)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn timestamp_is_utc_with_millis() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let ctx = RunContext::new(GenerationOptions::default()).generated_at(at);
        assert_eq!(ctx.provenance.timestamp(), "2024-03-09T14:05:00.000Z");
        assert_eq!(ctx.provenance.generator, "schema_codegen");
    }
}
