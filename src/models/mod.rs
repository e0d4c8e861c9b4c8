mod plan;
mod profile;
mod recipe;

pub use plan::{MealPlan, PlanOutcome};
pub use profile::{PlanRules, TokenProfile};
pub use recipe::{
    IngredientId, IngredientTokenCoefficient, Recipe, RecipeId, RecipeIngredientLink,
    RecipeRecord, UnitConversion,
};
