use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::models::{
    IngredientTokenCoefficient, PlanOutcome, PlanRules, RecipeRecord, UnitConversion,
};
use crate::nutrition::{is_known_unit, normalize_unit, parse_quantity};

/// Everything the planner reads from disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub recipes: Vec<RecipeRecord>,
    #[serde(default)]
    pub conversions: Vec<UnitConversion>,
    #[serde(default)]
    pub coefficients: Vec<IngredientTokenCoefficient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<PlanRules>,
}

/// Load a dataset from a JSON file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let content = fs::read_to_string(path)?;
    let dataset: Dataset = serde_json::from_str(&content)?;
    info!(
        recipes = dataset.recipes.len(),
        conversions = dataset.conversions.len(),
        coefficients = dataset.coefficients.len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Load token quotas from a JSON object such as `{"fish": 2, "legumes": "1.5"}`.
pub fn load_rules<P: AsRef<Path>>(path: P) -> Result<PlanRules> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[derive(Debug, Default, Deserialize)]
struct MeasureRow {
    #[serde(default)]
    ingredient_id: String,
    #[serde(default)]
    u_desc: String,
    #[serde(default)]
    multiplier: String,
}

/// Import unit conversions from a CSV with `ingredient_id,u_desc,multiplier`
/// columns.
///
/// Rows that do not parse, or whose unit is not a known unit, are skipped
/// with a warning.
pub fn load_conversions_csv<P: AsRef<Path>>(path: P) -> Result<Vec<UnitConversion>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut conversions = Vec::new();
    for (line, row) in reader.deserialize::<MeasureRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(line = line + 2, error = %e, "skipping malformed measure row");
                continue;
            }
        };

        let Ok(ingredient_id) = row.ingredient_id.parse::<u64>() else {
            warn!(line = line + 2, value = %row.ingredient_id, "skipping row with invalid ingredient id");
            continue;
        };
        let Some(multiplier) = parse_quantity(&row.multiplier) else {
            warn!(line = line + 2, value = %row.multiplier, "skipping row with invalid multiplier");
            continue;
        };
        let unit = normalize_unit(&row.u_desc);
        if !is_known_unit(&unit) {
            warn!(line = line + 2, ingredient_id, unit = %unit, "skipping invalid unit");
            continue;
        }

        conversions.push(UnitConversion {
            ingredient_id,
            unit,
            multiplier,
        });
    }

    info!(count = conversions.len(), "imported ingredient measures");
    Ok(conversions)
}

/// Write a plan and its final token tally to a JSON file.
///
/// Token amounts are rounded to `precision` decimal places.
pub fn save_plan<P: AsRef<Path>>(path: P, outcome: &PlanOutcome, precision: u32) -> Result<()> {
    let json = serde_json::json!({
        "meals": outcome.plan.meals.iter().map(|r| {
            serde_json::json!({ "id": r.id, "name": r.name })
        }).collect::<Vec<_>>(),
        "progress": outcome.progress.rounded(precision),
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MealPlan, Recipe, TokenProfile};
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_dataset() {
        let json = r#"{
            "recipes": [
                {"id": 1, "name": "Lentil Soup", "ingredients": [
                    {"ingredient_id": 10, "quantity": "1", "unit": "c"}
                ]}
            ],
            "conversions": [{"ingredient_id": 10, "unit": "c", "multiplier": "200"}],
            "coefficients": [{"ingredient_id": 10, "token": "legumes", "coefficient": 0.01}],
            "rules": {"legumes": 2}
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.recipes.len(), 1);
        assert_eq!(dataset.conversions[0].multiplier, dec!(200));
        assert_eq!(dataset.coefficients[0].coefficient, dec!(0.01));
        assert_eq!(dataset.rules.unwrap().get("legumes"), Some(dec!(2)));
    }

    #[test]
    fn test_load_dataset_sections_are_optional() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"recipes": []}"#).unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        assert!(dataset.conversions.is_empty());
        assert!(dataset.rules.is_none());
    }

    #[test]
    fn test_load_conversions_csv_skips_bad_rows() {
        let csv = "ingredient_id,u_desc,multiplier\n\
                   1, TBSP ,15\n\
                   2,cup,240\n\
                   x,g,1\n\
                   3,g,heavy\n\
                   4,ml,1.03\n";

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(csv.as_bytes()).unwrap();

        let conversions = load_conversions_csv(file.path()).unwrap();
        assert_eq!(conversions.len(), 2);
        assert_eq!(conversions[0].unit, "tbsp");
        assert_eq!(conversions[0].multiplier, dec!(15));
        assert_eq!(conversions[1].ingredient_id, 4);
        assert_eq!(conversions[1].multiplier, dec!(1.03));
    }

    #[test]
    fn test_save_plan_rounds_progress() {
        let outcome = PlanOutcome {
            plan: MealPlan::new(vec![Recipe::new(1, "Stew", TokenProfile::new())]),
            progress: [("veg", dec!(1.23456))].into_iter().collect(),
        };

        let file = NamedTempFile::new().unwrap();
        save_plan(file.path(), &outcome, 2).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();
        assert_eq!(written["meals"][0]["name"], "Stew");
        assert_eq!(written["progress"]["veg"], "1.23");
    }
}
