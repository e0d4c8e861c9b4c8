use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TokenProfile;

pub type RecipeId = u64;
pub type IngredientId = u64;

/// A recipe as handed to the planner: identity, name and precomputed profile.
///
/// Built once per planning run from a [`RecipeRecord`]; the planner never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub token_profile: TokenProfile,
}

impl Recipe {
    pub fn new(id: RecipeId, name: impl Into<String>, token_profile: TokenProfile) -> Self {
        Self {
            id,
            name: name.into(),
            token_profile,
        }
    }

    /// Canonical key for name lookups (lowercase, trimmed).
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// One ingredient line of a recipe as recorded in the data store.
///
/// `quantity` stays a string: it is parsed (and possibly rejected) only when
/// a profile is computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeIngredientLink {
    pub ingredient_id: IngredientId,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
}

impl RecipeIngredientLink {
    pub fn new(ingredient_id: IngredientId, quantity: &str, unit: &str) -> Self {
        Self {
            ingredient_id,
            quantity: quantity.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// A stored recipe with its ingredient lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeRecord {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<RecipeIngredientLink>,
}

impl RecipeRecord {
    pub fn uses_ingredient(&self, ingredient_id: IngredientId) -> bool {
        self.ingredients
            .iter()
            .any(|link| link.ingredient_id == ingredient_id)
    }
}

/// Multiplier turning one `unit` of an ingredient into its base unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitConversion {
    pub ingredient_id: IngredientId,
    pub unit: String,
    pub multiplier: Decimal,
}

/// Token amount carried by one base unit of an ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientTokenCoefficient {
    pub ingredient_id: IngredientId,
    pub token: String,
    pub coefficient: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_with_defaults() {
        let json = r#"{"id": 7, "name": "Feijoada", "ingredients": [
            {"ingredient_id": 3, "quantity": "200", "unit": "g"},
            {"ingredient_id": 4}
        ]}"#;
        let record: RecipeRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.description, "");
        assert_eq!(record.ingredients[1].quantity, "");
        assert!(record.uses_ingredient(4));
        assert!(!record.uses_ingredient(5));
    }

    #[test]
    fn test_recipe_key() {
        let recipe = Recipe::new(1, " Bacalhau à Brás ", TokenProfile::new());
        assert_eq!(recipe.key(), "bacalhau à brás");
    }
}
