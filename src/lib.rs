//! Filter recipe collections down to one ingredient family and grade them by
//! preparation time.
//!
//! Recipes are read from JSON, kept when any ingredient line mentions the
//! target ingredient (chilies by default), classified as Easy, Medium, Hard or
//! Unknown from their `cookTime` and `prepTime`, and written to a single CSV
//! file.
//!
//! ```no_run
//! use recipe_filter::{run, PipelineConfig};
//!
//! # fn main() -> Result<(), recipe_filter::PipelineError> {
//! let summary = run(&PipelineConfig::default())?;
//! println!("kept {} of {} recipes", summary.kept, summary.read);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod difficulty;
pub mod duration;
pub mod error;
pub mod export;
pub mod ingest;
pub mod matcher;
pub mod model;
pub mod pipeline;

pub use crate::config::PipelineConfig;
pub use crate::difficulty::{classify, Difficulty};
pub use crate::duration::parse_minutes;
pub use crate::error::PipelineError;
pub use crate::export::{export_csv, write_csv, Schema};
pub use crate::ingest::{parse_recipes, read_recipes};
pub use crate::matcher::IngredientMatcher;
pub use crate::model::{ClassifiedRecipe, RawRecipe};
pub use crate::pipeline::{Batch, RecipePipeline, RunSummary};

use log::info;

/// Read, filter, classify and export in one go
pub fn run(config: &PipelineConfig) -> Result<RunSummary, PipelineError> {
    let matcher = IngredientMatcher::new(&config.ingredient_pattern)?;
    info!(
        "Filtering {} for ingredients matching '{}'",
        config.input.display(),
        matcher.pattern()
    );

    let recipes = read_recipes(&config.input)?;
    let batch = RecipePipeline::new(matcher)
        .with_workers(config.workers)
        .process(recipes)?;

    export_csv(&config.output, &batch.schema, &batch.recipes)?;
    Ok(batch.summary)
}
