use crate::error::PipelineError;
use crate::model::RawRecipe;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct RecipeRecord {
    ingredients: Option<Ingredients>,
    #[serde(rename = "cookTime")]
    cook_time: Option<TextValue>,
    #[serde(rename = "prepTime")]
    prep_time: Option<TextValue>,
    #[serde(flatten)]
    fields: BTreeMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Ingredients {
    Text(String),
    Lines(Vec<String>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Other(Value),
}

impl TextValue {
    fn into_text(self) -> Option<String> {
        match self {
            TextValue::Text(s) => Some(s),
            TextValue::Other(_) => None,
        }
    }
}

impl From<RecipeRecord> for RawRecipe {
    fn from(record: RecipeRecord) -> Self {
        let ingredients = match record.ingredients {
            Some(Ingredients::Text(text)) => Some(text),
            Some(Ingredients::Lines(lines)) => Some(lines.join("\n")),
            Some(Ingredients::Other(_)) | None => None,
        };

        RawRecipe {
            ingredients,
            cook_time: record.cook_time.and_then(TextValue::into_text),
            prep_time: record.prep_time.and_then(TextValue::into_text),
            fields: record.fields,
        }
    }
}

/// Read recipes from a JSON file
///
/// See [`parse_recipes`] for the accepted layouts.
pub fn read_recipes(path: &Path) -> Result<Vec<RawRecipe>, PipelineError> {
    let content = fs::read_to_string(path).map_err(|source| PipelineError::Ingest {
        path: path.to_path_buf(),
        source,
    })?;
    let recipes = parse_recipes(&content)?;
    debug!("Read {} recipes from {}", recipes.len(), path.display());
    Ok(recipes)
}

/// Parse recipes from JSON text
///
/// Accepts either JSON Lines (one object per line, blank lines skipped) or a
/// single JSON array of objects. A leading byte order mark is ignored.
pub fn parse_recipes(content: &str) -> Result<Vec<RawRecipe>, PipelineError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim_start().starts_with('[') {
        parse_array(content)
    } else {
        parse_lines(content)
    }
}

fn parse_lines(content: &str) -> Result<Vec<RawRecipe>, PipelineError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let location = format!("line {}", index + 1);
            let value = serde_json::from_str::<Value>(line).map_err(|e| {
                PipelineError::MalformedRecord {
                    location: location.clone(),
                    reason: e.to_string(),
                }
            })?;
            to_recipe(value, location)
        })
        .collect()
}

fn parse_array(content: &str) -> Result<Vec<RawRecipe>, PipelineError> {
    let values: Vec<Value> =
        serde_json::from_str(content).map_err(|e| PipelineError::MalformedRecord {
            location: format!("line {}", e.line()),
            reason: e.to_string(),
        })?;

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| to_recipe(value, format!("element {}", index)))
        .collect()
}

fn to_recipe(value: Value, location: String) -> Result<RawRecipe, PipelineError> {
    if !value.is_object() {
        return Err(PipelineError::MalformedRecord {
            location,
            reason: "expected a JSON object".to_string(),
        });
    }

    serde_json::from_value::<RecipeRecord>(value)
        .map(RawRecipe::from)
        .map_err(|e| PipelineError::MalformedRecord {
            location,
            reason: e.to_string(),
        })
}
