pub mod constants;
pub mod scoring;
pub mod selection;

pub use constants::*;
pub use scoring::{deficit_penalty, expected_progress, score_candidate};
pub use selection::{choose_next_recipe, optimize_meal_plan, PlannerConfig};
