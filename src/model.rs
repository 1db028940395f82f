use crate::difficulty::Difficulty;
use serde_json::Value;
use std::collections::BTreeMap;

pub const NAME: &str = "name";
pub const INGREDIENTS: &str = "ingredients";
pub const COOK_TIME: &str = "cookTime";
pub const PREP_TIME: &str = "prepTime";
pub const DIFFICULTY: &str = "difficulty";

/// A recipe as it was ingested
///
/// `ingredients` is the newline-delimited ingredient list; array input has
/// already been joined. `fields` holds every other attribute of the record,
/// including `name`, untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecipe {
    pub ingredients: Option<String>,
    pub cook_time: Option<String>,
    pub prep_time: Option<String>,
    pub fields: BTreeMap<String, Value>,
}

impl RawRecipe {
    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME).and_then(Value::as_str)
    }
}

/// A recipe that passed the ingredient filter, ready to be written out
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRecipe {
    /// Passthrough attributes, `ingredients` included
    pub fields: BTreeMap<String, Value>,
    pub difficulty: Difficulty,
}

impl ClassifiedRecipe {
    pub fn name(&self) -> Option<&str> {
        self.fields.get(NAME).and_then(Value::as_str)
    }

    /// Output cell for a column, `None` when the recipe has no such field
    pub fn cell(&self, column: &str) -> Option<String> {
        if column == DIFFICULTY {
            return Some(self.difficulty.to_string());
        }
        self.fields.get(column).and_then(render_value)
    }
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
