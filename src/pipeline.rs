use crate::difficulty::classify;
use crate::duration::parse_optional_minutes;
use crate::error::PipelineError;
use crate::export::Schema;
use crate::matcher::IngredientMatcher;
use crate::model::{ClassifiedRecipe, RawRecipe, DIFFICULTY, INGREDIENTS};
use log::{debug, info};
use rayon::prelude::*;
use serde_json::Value;

/// Result of running the pipeline over a batch of recipes
#[derive(Debug, Clone)]
pub struct Batch {
    pub schema: Schema,
    pub recipes: Vec<ClassifiedRecipe>,
    pub summary: RunSummary,
}

/// Record counts for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub read: usize,
    pub kept: usize,
    pub dropped: usize,
}

/// Filters recipes by ingredient and classifies the survivors
#[derive(Debug, Clone, Default)]
pub struct RecipePipeline {
    matcher: IngredientMatcher,
    workers: Option<usize>,
}

impl RecipePipeline {
    pub fn new(matcher: IngredientMatcher) -> Self {
        Self {
            matcher,
            workers: None,
        }
    }

    /// Limit the number of worker threads; rayon's default pool is used otherwise
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    /// Transform a single recipe
    ///
    /// Returns `None` when the recipe has no ingredients or none of them
    /// matches. Duration fields never cause a recipe to be dropped.
    pub fn transform(&self, mut recipe: RawRecipe) -> Option<ClassifiedRecipe> {
        let ingredients = match recipe.ingredients.take() {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                debug!("Dropping {:?}: no ingredients", recipe.name());
                return None;
            }
        };

        if !self.matcher.matches(&ingredients) {
            debug!("Dropping {:?}: no matching ingredient", recipe.name());
            return None;
        }

        let cook_minutes = parse_optional_minutes(recipe.cook_time.as_deref());
        let prep_minutes = parse_optional_minutes(recipe.prep_time.as_deref());
        let total_minutes = i64::from(cook_minutes) + i64::from(prep_minutes);
        let difficulty = classify(total_minutes);

        let mut fields = recipe.fields;
        fields.remove(DIFFICULTY);
        fields.insert(INGREDIENTS.to_string(), Value::String(ingredients));

        let classified = ClassifiedRecipe { fields, difficulty };
        debug!(
            "Keeping {:?}: {} minutes, {}",
            classified.name(),
            total_minutes,
            difficulty
        );
        Some(classified)
    }

    /// Run the whole batch
    ///
    /// Recipes are transformed in parallel; output order follows input order.
    pub fn process(&self, recipes: Vec<RawRecipe>) -> Result<Batch, PipelineError> {
        let schema = Schema::infer(&recipes);
        let read = recipes.len();

        let recipes = match self.workers {
            Some(workers) => rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()?
                .install(|| self.transform_all(recipes)),
            None => self.transform_all(recipes),
        };

        let summary = RunSummary {
            read,
            kept: recipes.len(),
            dropped: read - recipes.len(),
        };
        info!(
            "Processed {} recipes: {} kept, {} dropped",
            summary.read, summary.kept, summary.dropped
        );

        Ok(Batch {
            schema,
            recipes,
            summary,
        })
    }

    fn transform_all(&self, recipes: Vec<RawRecipe>) -> Vec<ClassifiedRecipe> {
        recipes
            .into_par_iter()
            .filter_map(|recipe| self.transform(recipe))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use serde_json::json;

    fn recipe(
        name: &str,
        ingredients: Option<&str>,
        cook: Option<&str>,
        prep: Option<&str>,
    ) -> RawRecipe {
        let mut raw = RawRecipe {
            ingredients: ingredients.map(str::to_string),
            cook_time: cook.map(str::to_string),
            prep_time: prep.map(str::to_string),
            ..Default::default()
        };
        raw.fields.insert("name".to_string(), json!(name));
        raw
    }

    #[test]
    fn test_boundary_total_is_medium() {
        let pipeline = RecipePipeline::default();
        let result = pipeline
            .transform(recipe(
                "Salsa",
                Some("1 onion\n2 chilies\n1 tsp salt"),
                Some("PT10M"),
                Some("PT20M"),
            ))
            .unwrap();

        assert_eq!(result.difficulty, Difficulty::Medium);
        assert_eq!(
            result.cell("ingredients").unwrap(),
            "1 onion\n2 chilies\n1 tsp salt"
        );
    }

    #[test]
    fn test_difficulty_buckets() {
        let pipeline = RecipePipeline::default();
        let classify = |cook: Option<&str>, prep: Option<&str>| {
            pipeline
                .transform(recipe("r", Some("chili"), cook, prep))
                .unwrap()
                .difficulty
        };

        assert_eq!(classify(Some("PT1H"), Some("PT5M")), Difficulty::Hard);
        assert_eq!(classify(Some("PT5M"), Some("PT10M")), Difficulty::Easy);
        assert_eq!(classify(Some("PT1H"), None), Difficulty::Medium);
        assert_eq!(classify(None, None), Difficulty::Unknown);
        assert_eq!(classify(Some("soon"), Some("")), Difficulty::Unknown);
    }

    #[test]
    fn test_drops_non_matching_and_missing_ingredients() {
        let pipeline = RecipePipeline::default();
        assert!(pipeline
            .transform(recipe("Toast", Some("bread\nbutter"), Some("PT2H"), None))
            .is_none());
        assert!(pipeline
            .transform(recipe("Nothing", None, None, None))
            .is_none());
        assert!(pipeline
            .transform(recipe("Blank", Some("  \n "), None, None))
            .is_none());
    }

    #[test]
    fn test_incoming_difficulty_is_replaced() {
        let pipeline = RecipePipeline::default();
        let mut raw = recipe("Stew", Some("3 chiles"), Some("PT3H"), None);
        raw.fields.insert("difficulty".to_string(), json!("Trivial"));

        let result = pipeline.transform(raw).unwrap();

        assert!(!result.fields.contains_key("difficulty"));
        assert_eq!(result.cell("difficulty").unwrap(), "Hard");
    }

    #[test]
    fn test_process_keeps_order_and_counts() {
        let recipes: Vec<RawRecipe> = (0..100)
            .map(|i| {
                let ingredients = if i % 2 == 0 { "2 chilies" } else { "1 potato" };
                recipe(
                    &format!("recipe {}", i),
                    Some(ingredients),
                    Some("PT15M"),
                    None,
                )
            })
            .collect();

        let batch = RecipePipeline::default()
            .with_workers(Some(4))
            .process(recipes)
            .unwrap();

        assert_eq!(
            batch.summary,
            RunSummary {
                read: 100,
                kept: 50,
                dropped: 50
            }
        );
        let names: Vec<&str> = batch.recipes.iter().filter_map(|r| r.name()).collect();
        let expected: Vec<String> = (0..100)
            .step_by(2)
            .map(|i| format!("recipe {}", i))
            .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_custom_matcher() {
        let pipeline = RecipePipeline::new(IngredientMatcher::new("garlic").unwrap());
        assert!(pipeline
            .transform(recipe("Aioli", Some("4 cloves GARLIC"), None, None))
            .is_some());
        assert!(pipeline
            .transform(recipe("Salsa", Some("2 chilies"), None, None))
            .is_none());
    }
}
