use crate::matcher::CHILI_PATTERN;
use config::{Config, ConfigError, Environment, File, Source};
use serde::Deserialize;
use std::path::PathBuf;

/// Settings for a recipe filtering run
#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// JSON file with the recipes to filter
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// CSV file to write, replaced if it exists
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Regular expression matched against lowercased ingredient lines
    #[serde(default = "default_ingredient_pattern")]
    pub ingredient_pattern: String,
    /// Number of worker threads (defaults to one per CPU)
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            ingredient_pattern: default_ingredient_pattern(),
            workers: None,
        }
    }
}

// Default value functions
fn default_input() -> PathBuf {
    PathBuf::from("recipes.json")
}

fn default_output() -> PathBuf {
    PathBuf::from("recipes_with_chilies.csv")
}

fn default_ingredient_pattern() -> String {
    CHILI_PATTERN.to_string()
}

impl PipelineConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FILTER__ prefix
    /// 2. recipe-filter.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FILTER__OUTPUT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`PipelineConfig::load`] for the precedence rules.
pub fn load_config() -> Result<PipelineConfig, ConfigError> {
    // Optional config file (can be missing)
    load_from(File::with_name("recipe-filter").required(false), environment())
}

/// Environment source: RECIPE_FILTER__OUTPUT, RECIPE_FILTER__WORKERS, ...
fn environment() -> Environment {
    Environment::with_prefix("RECIPE_FILTER")
        .separator("__")
        .try_parsing(true)
}

/// Layer the environment over a file source, serde defaults underneath
fn load_from<F>(file: F, env: Environment) -> Result<PipelineConfig, ConfigError>
where
    F: Source + Send + Sync + 'static,
{
    let settings = Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    settings.try_deserialize()
}
