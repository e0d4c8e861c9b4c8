use dialoguer::{Confirm, Select};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::RecipeRecord;
use crate::planner::constants::{FUZZY_MATCH_THRESHOLD, FUZZY_MAX_CHOICES};
use crate::state::CatalogStore;

/// Catalog recipes whose names resemble `query`, most similar first.
pub fn fuzzy_matches<'a>(store: &'a CatalogStore, query: &str) -> Vec<(&'a RecipeRecord, f64)> {
    let query = query.trim().to_lowercase();
    let mut candidates: Vec<(&RecipeRecord, f64)> = store
        .all_recipes()
        .iter()
        .map(|r| (r, jaro_winkler(&r.name.to_lowercase(), &query)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates
}

/// Resolve a recipe reference typed by the user.
///
/// Tries an id or exact (case-insensitive) name first, then falls back to
/// fuzzy matching with interactive confirmation. `None` if nothing matched
/// or the user declined every suggestion.
pub fn prompt_recipe<'a>(store: &'a CatalogStore, query: &str) -> Result<Option<&'a RecipeRecord>> {
    if let Some(recipe) = store.resolve(query) {
        return Ok(Some(recipe));
    }

    let candidates = fuzzy_matches(store, query);

    if candidates.is_empty() {
        println!("No matching recipe found for '{}'", query.trim());
        return Ok(None);
    }

    if candidates.len() == 1 {
        let recipe = candidates[0].0;
        let confirm = Confirm::new()
            .with_prompt(format!("Did you mean '{}'?", recipe.name))
            .default(true)
            .interact()?;
        return Ok(confirm.then_some(recipe));
    }

    // Multiple matches - let user select
    let options: Vec<&RecipeRecord> = candidates
        .iter()
        .take(FUZZY_MAX_CHOICES)
        .map(|(r, _)| *r)
        .collect();

    let mut selection_options: Vec<String> = options.iter().map(|r| r.name.clone()).collect();
    selection_options.push("None of these".to_string());

    let selection = Select::new()
        .with_prompt("Which did you mean?")
        .items(&selection_options)
        .default(0)
        .interact()?;

    Ok(options.get(selection).copied())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
