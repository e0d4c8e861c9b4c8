use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    IngredientId, IngredientTokenCoefficient, Recipe, RecipeIngredientLink, TokenProfile,
    UnitConversion,
};
use crate::nutrition::units::ConversionTable;

/// Per-ingredient token coefficients, keyed by (ingredient, token).
#[derive(Debug, Clone, Default)]
pub struct CoefficientTable {
    coefficients: HashMap<IngredientId, BTreeMap<String, Decimal>>,
}

impl CoefficientTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a IngredientTokenCoefficient>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.insert(row.ingredient_id, &row.token, row.coefficient);
        }
        table
    }

    /// Store a coefficient, returning the one it replaced (if any).
    pub fn insert(
        &mut self,
        ingredient_id: IngredientId,
        token: &str,
        coefficient: Decimal,
    ) -> Option<Decimal> {
        self.coefficients
            .entry(ingredient_id)
            .or_default()
            .insert(token.to_string(), coefficient)
    }

    /// All coefficients of one ingredient, in token order.
    pub fn for_ingredient(
        &self,
        ingredient_id: IngredientId,
    ) -> impl Iterator<Item = (&str, Decimal)> {
        self.coefficients
            .get(&ingredient_id)
            .into_iter()
            .flat_map(|tokens| tokens.iter().map(|(t, c)| (t.as_str(), *c)))
    }

    pub fn len(&self) -> usize {
        self.coefficients.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns ingredient lines into token profiles.
///
/// Sparse data is expected: a line whose quantity does not parse or whose
/// unit has no conversion contributes nothing, and an ingredient without
/// coefficients contributes zero to every token.
#[derive(Debug, Clone, Default)]
pub struct TokenCalculator {
    pub conversions: ConversionTable,
    pub coefficients: CoefficientTable,
}

impl TokenCalculator {
    pub fn new(conversions: ConversionTable, coefficients: CoefficientTable) -> Self {
        Self {
            conversions,
            coefficients,
        }
    }

    pub fn from_rows(
        conversions: &[UnitConversion],
        coefficients: &[IngredientTokenCoefficient],
    ) -> Self {
        Self::new(
            ConversionTable::from_rows(conversions),
            CoefficientTable::from_rows(coefficients),
        )
    }

    /// Token profile of one recipe's ingredient list.
    pub fn compute_recipe_profile(&self, links: &[RecipeIngredientLink]) -> TokenProfile {
        let mut totals = TokenProfile::new();

        for link in links {
            let Some(base_quantity) =
                self.conversions
                    .to_base_quantity(link.ingredient_id, &link.quantity, &link.unit)
            else {
                debug!(
                    ingredient = link.ingredient_id,
                    quantity = %link.quantity,
                    unit = %link.unit,
                    "skipping ingredient line without usable conversion"
                );
                continue;
            };

            if base_quantity < Decimal::ZERO {
                debug!(ingredient = link.ingredient_id, "skipping negative quantity");
                continue;
            }

            for (token, coefficient) in self.coefficients.for_ingredient(link.ingredient_id) {
                match coefficient.checked_mul(base_quantity) {
                    Some(scaled) => totals.add(token, scaled),
                    None => debug!(
                        ingredient = link.ingredient_id,
                        token, "skipping token contribution that overflowed"
                    ),
                }
            }
        }

        totals
    }

    /// Combined profile of several ingredient lists (a whole menu).
    pub fn compute_menu_profile(&self, menus: &[&[RecipeIngredientLink]]) -> TokenProfile {
        menus.iter().fold(TokenProfile::new(), |acc, links| {
            acc.merged(&self.compute_recipe_profile(links))
        })
    }
}

/// Element-wise sum of the recipes' profiles, folded left to right.
pub fn compute_aggregate_profile(recipes: &[Recipe]) -> TokenProfile {
    recipes.iter().fold(TokenProfile::new(), |mut acc, recipe| {
        acc.merge(&recipe.token_profile);
        acc
    })
}
