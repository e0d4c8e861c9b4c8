use serde::Serialize;

use crate::models::{Recipe, RecipeId, TokenProfile};

/// An ordered sequence of distinct recipes, one per meal slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MealPlan {
    pub meals: Vec<Recipe>,
}

impl MealPlan {
    pub fn new(meals: Vec<Recipe>) -> Self {
        Self { meals }
    }

    pub fn ids(&self) -> Vec<RecipeId> {
        self.meals.iter().map(|r| r.id).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.meals.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }
}

/// Result of one optimizer run: the plan plus the final token tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanOutcome {
    pub plan: MealPlan,
    pub progress: TokenProfile,
}
