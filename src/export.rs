use crate::error::PipelineError;
use crate::model::{
    ClassifiedRecipe, RawRecipe, COOK_TIME, DIFFICULTY, INGREDIENTS, NAME, PREP_TIME,
};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Ordered output columns of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<String>,
}

impl Schema {
    /// Derive the columns from every ingested record, matched or not
    ///
    /// Passthrough fields come first in sorted order, `difficulty` is always
    /// last. The duration fields are consumed by the pipeline and never
    /// exported.
    pub fn infer(records: &[RawRecipe]) -> Self {
        let mut names: BTreeSet<&str> = BTreeSet::from([NAME, INGREDIENTS]);
        for record in records {
            names.extend(record.fields.keys().map(String::as_str));
        }

        let mut columns: Vec<String> = names
            .into_iter()
            .filter(|name| ![COOK_TIME, PREP_TIME, DIFFICULTY].contains(name))
            .map(str::to_string)
            .collect();
        columns.push(DIFFICULTY.to_string());

        Self { columns }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}

/// Write recipes as CSV (header row first) to any writer
pub fn write_csv<W: Write>(
    writer: W,
    schema: &Schema,
    recipes: &[ClassifiedRecipe],
) -> Result<(), PipelineError> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(schema.columns())?;

    for recipe in recipes {
        let row = schema
            .columns()
            .iter()
            .map(|column| recipe.cell(column).unwrap_or_default());
        csv.write_record(row)?;
    }

    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write recipes to a single CSV file, replacing whatever was there
///
/// Rows go to a temporary file next to `path` which is renamed into place
/// only once everything is written. On error the temporary file is removed
/// and an existing file at `path` is left as it was.
pub fn export_csv(
    path: &Path,
    schema: &Schema,
    recipes: &[ClassifiedRecipe],
) -> Result<(), PipelineError> {
    if recipes.is_empty() {
        warn!(
            "No recipes matched, writing header only to {}",
            path.display()
        );
    }

    let egest_error = |source| PipelineError::Egest {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(egest_error)?;
    debug!("Writing CSV to temporary file {}", tmp.path().display());

    write_csv(tmp.as_file_mut(), schema, recipes)?;
    tmp.as_file().sync_all().map_err(egest_error)?;
    tmp.persist(path).map_err(|e| egest_error(e.error))?;

    info!("Wrote {} recipes to {}", recipes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    fn fields(value: Value) -> BTreeMap<String, Value> {
        match value {
            Value::Object(map) => map.into_iter().collect(),
            _ => BTreeMap::new(),
        }
    }

    fn raw(value: Value) -> RawRecipe {
        RawRecipe {
            fields: fields(value),
            ..Default::default()
        }
    }

    fn render(schema: &Schema, recipes: &[ClassifiedRecipe]) -> String {
        let mut buffer = Vec::new();
        write_csv(&mut buffer, schema, recipes).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_schema_columns() {
        let schema = Schema::infer(&[
            raw(json!({"name": "a", "url": "u", "difficulty": "old"})),
            raw(json!({"datePublished": "2013-04-01", "image": "i"})),
        ]);

        assert_eq!(
            schema.columns(),
            &["datePublished", "image", "ingredients", "name", "url", "difficulty"]
        );
    }

    #[test]
    fn test_schema_for_empty_batch() {
        let schema = Schema::infer(&[]);
        assert_eq!(schema.columns(), &["ingredients", "name", "difficulty"]);
    }

    #[test]
    fn test_write_csv_quotes_and_blanks() {
        let schema = Schema::infer(&[raw(json!({"name": "x", "url": "u"}))]);
        let recipes = vec![ClassifiedRecipe {
            fields: fields(json!({
                "name": "Chili, the \"best\"",
                "ingredients": "2 chilies\n1 onion"
            })),
            difficulty: Difficulty::Easy,
        }];

        let output = render(&schema, &recipes);

        assert_eq!(
            output,
            "ingredients,name,url,difficulty\n\"2 chilies\n1 onion\",\"Chili, the \"\"best\"\"\",,Easy\n"
        );
    }

    #[test]
    fn test_export_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale content").unwrap();

        let schema = Schema::infer(&[]);
        export_csv(&path, &schema, &[]).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "ingredients,name,difficulty\n"
        );
        let leftovers: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.csv");

        let result = export_csv(&path, &Schema::infer(&[]), &[]);

        assert!(matches!(result, Err(PipelineError::Egest { .. })));
        assert!(!path.exists());
    }
}
