//! CLI command implementations

mod run;
mod validate;

pub use run::run_pipeline;
pub use validate::run_validate;
