use crate::error::PipelineError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default ingredient family: chilies and their usual spellings
///
/// Matches chili, chilis, chilies, chile, chiles, chilli, chillies, chhili...
/// anywhere in a line. There is no word boundary, so "chilean" matches too.
pub const CHILI_PATTERN: &str = r"chh?ill?[ie]e?s?";

static CHILI: Lazy<Regex> = Lazy::new(|| Regex::new(CHILI_PATTERN).unwrap());

/// Decides whether a recipe's ingredient list mentions an ingredient family
#[derive(Debug, Clone)]
pub struct IngredientMatcher {
    pattern: Regex,
}

impl IngredientMatcher {
    /// Build a matcher for a custom pattern
    ///
    /// The pattern is matched against lowercased, trimmed ingredient lines, so
    /// it should be written in lowercase.
    pub fn new(pattern: &str) -> Result<Self, PipelineError> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn chilies() -> Self {
        Self {
            pattern: CHILI.clone(),
        }
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// True if any line of the newline-delimited ingredient text matches
    pub fn matches(&self, ingredients: &str) -> bool {
        normalized_lines(ingredients).any(|line| self.pattern.is_match(&line))
    }
}

impl Default for IngredientMatcher {
    fn default() -> Self {
        Self::chilies()
    }
}

/// Split ingredient text into trimmed, lowercased lines, skipping blank ones
pub fn normalized_lines(ingredients: &str) -> impl Iterator<Item = String> + '_ {
    ingredients
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_lowercase)
}
