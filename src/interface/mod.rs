pub mod prompts;
pub mod render;

pub use prompts::{fuzzy_matches, prompt_recipe, prompt_yes_no};
pub use render::{display_meal_plan, display_recipe_list, display_token_profile};
