use crate::models::{PlanOutcome, PlanRules, RecipeRecord, TokenProfile};

/// Display a meal plan followed by the token tally against the quotas.
pub fn display_meal_plan(outcome: &PlanOutcome, rules: &PlanRules, precision: u32) {
    let plan = &outcome.plan;
    if plan.is_empty() {
        println!("No meal plan generated.");
        return;
    }

    println!();
    println!("=== Meal Plan ===");
    println!();

    for (i, recipe) in plan.meals.iter().enumerate() {
        println!("{:>3}. {} (id: {})", i + 1, recipe.name, recipe.id);
    }

    println!();
    println!("--- Token Tally ---");

    let progress = outcome.progress.rounded(precision);
    let width = rules
        .iter()
        .map(|(t, _)| t.len())
        .chain(progress.iter().map(|(t, _)| t.len()))
        .max()
        .unwrap_or(10);

    for (token, quota) in rules.iter() {
        let actual = progress.get(token);
        let mark = if outcome.progress.get(token) >= quota {
            "ok"
        } else {
            "short"
        };
        println!(
            "  {:<width$}  {:>8} / {:<8} {}",
            token,
            actual.to_string(),
            quota.to_string(),
            mark,
            width = width
        );
    }

    // Untracked categories are informational only.
    for (token, amount) in progress.iter().filter(|(t, _)| rules.get(t).is_none()) {
        println!("  {:<width$}  {:>8}", token, amount.to_string(), width = width);
    }
    println!();
}

/// Display one recipe's token profile.
pub fn display_token_profile(name: &str, profile: &TokenProfile, precision: u32) {
    println!();
    println!("=== Tokens: {} ===", name);
    println!();

    if profile.is_empty() {
        println!("  (no tokens)");
        println!();
        return;
    }

    let rounded = profile.rounded(precision);
    let width = rounded.iter().map(|(t, _)| t.len()).max().unwrap_or(10);
    for (token, amount) in rounded.iter() {
        println!("  {:<width$}  {}", token, amount, width = width);
    }
    println!();
}

/// Display a simple list of recipes.
pub fn display_recipe_list(recipes: &[&RecipeRecord], title: &str) {
    if recipes.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} recipes) ===", title, recipes.len());
    println!();

    for recipe in recipes {
        println!(
            "  {} - {} ({} ingredients)",
            recipe.id,
            recipe.name,
            recipe.ingredients.len()
        );
    }

    println!();
}
