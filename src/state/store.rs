use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::warn;

use crate::error::{PlateError, Result};
use crate::models::{IngredientId, Recipe, RecipeId, RecipeRecord, TokenProfile, UnitConversion};
use crate::nutrition::TokenCalculator;
use crate::planner::constants::MAX_SAMPLE_AMOUNT;
use crate::state::persistence::Dataset;

/// In-memory recipe catalog plus the tables needed to profile it.
pub struct CatalogStore {
    /// Recipes in catalog order.
    recipes: Vec<RecipeRecord>,
    /// Lowercase name to index in `recipes` (last occurrence wins).
    by_name: HashMap<String, usize>,
    calculator: TokenCalculator,
}

impl CatalogStore {
    /// Build a store from loaded data, warning about duplicate table rows.
    pub fn new(dataset: Dataset) -> Self {
        let mut calculator = TokenCalculator::default();
        for row in &dataset.conversions {
            if calculator
                .conversions
                .insert(row.ingredient_id, &row.unit, row.multiplier)
                .is_some()
            {
                warn!(ingredient = row.ingredient_id, unit = %row.unit, "duplicate conversion row replaced");
            }
        }
        for row in &dataset.coefficients {
            if calculator
                .coefficients
                .insert(row.ingredient_id, &row.token, row.coefficient)
                .is_some()
            {
                warn!(ingredient = row.ingredient_id, token = %row.token, "duplicate coefficient row replaced");
            }
        }

        let by_name = dataset
            .recipes
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.trim().to_lowercase(), i))
            .collect();

        Self {
            recipes: dataset.recipes,
            by_name,
            calculator,
        }
    }

    /// Override conversions with externally imported rows.
    pub fn apply_conversions(&mut self, rows: &[UnitConversion]) {
        for row in rows {
            self.calculator
                .conversions
                .insert(row.ingredient_id, &row.unit, row.multiplier);
        }
    }

    pub fn calculator(&self) -> &TokenCalculator {
        &self.calculator
    }

    pub fn get_recipe(&self, id: RecipeId) -> Option<&RecipeRecord> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// Get a recipe by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&RecipeRecord> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|&i| &self.recipes[i])
    }

    /// Resolve a user-supplied reference: numeric id first, then exact name.
    pub fn resolve(&self, query: &str) -> Option<&RecipeRecord> {
        query
            .trim()
            .parse::<RecipeId>()
            .ok()
            .and_then(|id| self.get_recipe(id))
            .or_else(|| self.find_by_name(query))
    }

    pub fn all_recipes(&self) -> &[RecipeRecord] {
        &self.recipes
    }

    /// Token profile of one stored recipe, computed fresh.
    pub fn recipe_profile(&self, id: RecipeId) -> Result<TokenProfile> {
        let record = self
            .get_recipe(id)
            .ok_or_else(|| PlateError::RecipeNotFound(id.to_string()))?;
        Ok(self.calculator.compute_recipe_profile(&record.ingredients))
    }

    /// Combined token profile of several stored recipes.
    pub fn menu_profile(&self, ids: &[RecipeId]) -> Result<TokenProfile> {
        let menus = ids
            .iter()
            .map(|&id| {
                self.get_recipe(id)
                    .map(|r| r.ingredients.as_slice())
                    .ok_or_else(|| PlateError::RecipeNotFound(id.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.calculator.compute_menu_profile(&menus))
    }

    /// Planner-ready value for one record, with its profile computed.
    pub fn to_recipe(&self, record: &RecipeRecord) -> Recipe {
        Recipe::new(
            record.id,
            record.name.clone(),
            self.calculator.compute_recipe_profile(&record.ingredients),
        )
    }

    /// Snapshot of the whole catalog with every profile computed once.
    pub fn planning_catalog(&self) -> Vec<Recipe> {
        self.recipes.iter().map(|r| self.to_recipe(r)).collect()
    }

    /// Up to `amount` distinct random recipes; `amount` is clamped to
    /// `1..=MAX_SAMPLE_AMOUNT`.
    pub fn sample_recipes<R: Rng + ?Sized>(&self, amount: usize, rng: &mut R) -> Vec<&RecipeRecord> {
        let amount = amount.clamp(1, MAX_SAMPLE_AMOUNT);
        self.recipes.choose_multiple(rng, amount).collect()
    }

    /// Recipes using every one of `ingredient_ids`, shuffled, at most `amount`.
    pub fn recipes_with_all_ingredients<R: Rng + ?Sized>(
        &self,
        ingredient_ids: &[IngredientId],
        amount: usize,
        rng: &mut R,
    ) -> Result<Vec<&RecipeRecord>> {
        if ingredient_ids.is_empty() {
            return Err(PlateError::InvalidInput(
                "no ingredient ids provided".to_string(),
            ));
        }

        let mut matches: Vec<&RecipeRecord> = self
            .recipes
            .iter()
            .filter(|r| ingredient_ids.iter().all(|&id| r.uses_ingredient(id)))
            .collect();

        matches.shuffle(rng);
        matches.truncate(amount);
        Ok(matches)
    }

    /// Count of recipes in the catalog.
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
