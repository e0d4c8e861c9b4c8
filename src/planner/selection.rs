use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{PlateError, Result};
use crate::models::{MealPlan, PlanOutcome, PlanRules, Recipe, RecipeId, TokenProfile};
use crate::planner::constants::{DEFAULT_HEAT, DEFAULT_TOTAL_MEALS};
use crate::planner::scoring::score_candidate;

/// Shape of a plan: how many meals, and how wide each step samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerConfig {
    pub total_meals: usize,
    /// Size of the lowest-penalty pool sampled at each step.
    pub heat: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            total_meals: DEFAULT_TOTAL_MEALS,
            heat: DEFAULT_HEAT,
        }
    }
}

impl PlannerConfig {
    pub fn new(total_meals: usize, heat: usize) -> Self {
        Self { total_meals, heat }
    }

    pub fn validate(&self) -> Result<()> {
        if self.total_meals == 0 {
            return Err(PlateError::InvalidConfig(
                "total_meals must be at least 1".to_string(),
            ));
        }
        if self.heat == 0 {
            return Err(PlateError::InvalidConfig(
                "heat must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Candidate recipe with its penalty for the step being filled.
#[derive(Debug)]
struct Candidate<'a> {
    recipe: &'a Recipe,
    penalty: Decimal,
}

/// Score every recipe not yet used and sort them, best (lowest) first.
///
/// The sort is stable, so equal penalties keep catalog order.
fn rank_candidates<'a>(
    recipes: &'a [Recipe],
    used: &HashSet<RecipeId>,
    progress: &TokenProfile,
    rules: &PlanRules,
    step: usize,
    horizon: usize,
) -> Vec<Candidate<'a>> {
    let mut candidates: Vec<Candidate> = recipes
        .iter()
        .filter(|r| !used.contains(&r.id))
        .map(|recipe| Candidate {
            recipe,
            penalty: score_candidate(progress, &recipe.token_profile, rules, step, horizon),
        })
        .collect();

    candidates.sort_by(|a, b| a.penalty.cmp(&b.penalty));
    candidates
}

/// Pick the recipe for the next slot, uniformly among the `heat` best.
///
/// Returns `None` when every recipe has been used.
pub fn choose_next_recipe<'a, R: Rng + ?Sized>(
    recipes: &'a [Recipe],
    used: &HashSet<RecipeId>,
    progress: &TokenProfile,
    rules: &PlanRules,
    step: usize,
    config: &PlannerConfig,
    rng: &mut R,
) -> Option<&'a Recipe> {
    let ranked = rank_candidates(recipes, used, progress, rules, step, config.total_meals);
    let pool = &ranked[..config.heat.min(ranked.len())];

    debug!(
        step,
        eligible = ranked.len(),
        pool = pool.len(),
        best_penalty = %pool.first().map(|c| c.penalty).unwrap_or_default(),
        "ranked candidates"
    );

    pool.choose(rng).map(|c| c.recipe)
}

/// Build a meal plan of `config.total_meals` distinct recipes.
///
/// The first meal is `starting_recipe` when given, otherwise a uniform pick
/// among recipes outside `forbidden_ids`. Every later slot is filled greedily
/// by [`choose_next_recipe`], never revisiting earlier choices. Neither the
/// catalog nor `forbidden_ids` is modified.
///
/// Fails with [`PlateError::InvalidConfig`] before doing any work when the
/// config is invalid, [`PlateError::EmptyCatalog`] when no first meal can be
/// chosen, and [`PlateError::HorizonInfeasible`] when the catalog runs out of
/// unused recipes before the plan is full.
pub fn optimize_meal_plan<R: Rng + ?Sized>(
    recipes: &[Recipe],
    rules: &PlanRules,
    config: &PlannerConfig,
    starting_recipe: Option<&Recipe>,
    forbidden_ids: &HashSet<RecipeId>,
    rng: &mut R,
) -> Result<PlanOutcome> {
    config.validate()?;

    info!(
        total_meals = config.total_meals,
        heat = config.heat,
        catalog = recipes.len(),
        "optimizing meal plan"
    );

    let mut used = forbidden_ids.clone();

    let first = match starting_recipe {
        Some(recipe) if used.contains(&recipe.id) => {
            return Err(PlateError::InvalidInput(format!(
                "starting recipe '{}' is forbidden",
                recipe.name
            )));
        }
        Some(recipe) => recipe,
        None => {
            let available: Vec<&Recipe> =
                recipes.iter().filter(|r| !used.contains(&r.id)).collect();
            available
                .choose(rng)
                .copied()
                .ok_or(PlateError::EmptyCatalog)?
        }
    };

    let mut progress = first.token_profile.clone();
    let mut meals = vec![first.clone()];
    used.insert(first.id);
    debug!(step = 1, recipe = %first.name, "seeded plan");

    for step in 2..=config.total_meals {
        let selected = choose_next_recipe(recipes, &used, &progress, rules, step, config, rng)
            .ok_or(PlateError::HorizonInfeasible {
                requested: config.total_meals,
                filled: meals.len(),
            })?;

        debug!(step, recipe = %selected.name, id = selected.id, "selected recipe");

        progress.merge(&selected.token_profile);
        used.insert(selected.id);
        meals.push(selected.clone());
    }

    info!(meals = meals.len(), "meal plan complete");

    Ok(PlanOutcome {
        plan: MealPlan::new(meals),
        progress,
    })
}
