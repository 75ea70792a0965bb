pub mod annotations;
pub mod config;
pub mod context;
pub mod emit;
pub mod error;
pub mod generator;
pub mod logging;
pub mod naming;
pub mod options;
pub mod schema;
pub mod synth;
pub mod types;
