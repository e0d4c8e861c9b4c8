use std::collections::HashSet;
use std::path::{Path, PathBuf};

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use plate_o_rs::cli::{Cli, Command};
use plate_o_rs::error::{PlateError, Result};
use plate_o_rs::interface::{
    display_meal_plan, display_recipe_list, display_token_profile, prompt_recipe, prompt_yes_no,
};
use plate_o_rs::logging::init_logging;
use plate_o_rs::models::{PlanRules, RecipeId};
use plate_o_rs::planner::{optimize_meal_plan, PlannerConfig};
use plate_o_rs::state::{load_conversions_csv, load_dataset, load_rules, save_plan, CatalogStore};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;
    let command = cli.command.unwrap_or_default();
    command.validate()?;

    let (store, dataset_rules) = open_store(&cli.data, cli.conversions.as_deref())?;

    match command {
        Command::Plan {
            meals,
            heat,
            start,
            forbid,
            seed,
            rules,
            output,
            precision,
        } => cmd_plan(
            &store,
            dataset_rules,
            PlannerConfig::new(meals, heat),
            PlanOptions {
                start,
                forbid,
                seed,
                rules,
                output,
                precision,
            },
        ),
        Command::Tokens { recipe, precision } => cmd_tokens(&store, &recipe, precision),
        Command::Random { amount } => cmd_random(&store, amount),
        Command::WithIngredients {
            ingredients,
            amount,
        } => cmd_with_ingredients(&store, &ingredients, amount),
    }
}

/// Load the dataset (plus optional CSV conversions) into a catalog store.
fn open_store(data: &Path, conversions: Option<&Path>) -> Result<(CatalogStore, Option<PlanRules>)> {
    if !data.exists() {
        return Err(PlateError::InvalidInput(format!(
            "dataset file not found: {}",
            data.display()
        )));
    }

    let mut dataset = load_dataset(data)?;
    let rules = dataset.rules.take();
    let mut store = CatalogStore::new(dataset);

    if let Some(path) = conversions {
        let rows = load_conversions_csv(path)?;
        store.apply_conversions(&rows);
    }

    Ok((store, rules))
}

struct PlanOptions {
    start: Option<String>,
    forbid: Vec<RecipeId>,
    seed: Option<u64>,
    rules: Option<PathBuf>,
    output: Option<PathBuf>,
    precision: u32,
}

/// Generate a meal plan and optionally save it.
fn cmd_plan(
    store: &CatalogStore,
    dataset_rules: Option<PlanRules>,
    config: PlannerConfig,
    options: PlanOptions,
) -> Result<()> {
    config.validate()?;

    let rules = match &options.rules {
        Some(path) => load_rules(path)?,
        None => dataset_rules.unwrap_or_else(PlanRules::default_rules),
    };

    let catalog = store.planning_catalog();
    println!("Loaded {} recipes", catalog.len());

    let starting_recipe = match &options.start {
        Some(query) => match prompt_recipe(store, query)? {
            Some(record) => Some(store.to_recipe(record)),
            None => return Err(PlateError::RecipeNotFound(query.clone())),
        },
        None => None,
    };

    let forbidden: HashSet<RecipeId> = options.forbid.iter().copied().collect();

    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let outcome = optimize_meal_plan(
        &catalog,
        &rules,
        &config,
        starting_recipe.as_ref(),
        &forbidden,
        &mut rng,
    )?;

    display_meal_plan(&outcome, &rules, options.precision);

    match &options.output {
        Some(path) => {
            save_plan(path, &outcome, options.precision)?;
            info!(path = %path.display(), "plan saved");
            println!("Plan saved to {}.", path.display());
        }
        None => {
            if prompt_yes_no("Save this plan?", false)? {
                let path = Path::new("meal_plan.json");
                save_plan(path, &outcome, options.precision)?;
                println!("Plan saved to {}.", path.display());
            }
        }
    }

    Ok(())
}

/// Show the token profile of one recipe.
fn cmd_tokens(store: &CatalogStore, query: &str, precision: u32) -> Result<()> {
    let record = prompt_recipe(store, query)?
        .ok_or_else(|| PlateError::RecipeNotFound(query.to_string()))?;
    let profile = store.recipe_profile(record.id)?;
    display_token_profile(&record.name, &profile, precision);
    Ok(())
}

/// List a random sample of recipes.
fn cmd_random(store: &CatalogStore, amount: usize) -> Result<()> {
    let mut rng = StdRng::from_entropy();
    let recipes = store.sample_recipes(amount, &mut rng);
    display_recipe_list(&recipes, "Random recipes");
    Ok(())
}

/// List recipes containing every given ingredient.
fn cmd_with_ingredients(store: &CatalogStore, ingredients: &[u64], amount: usize) -> Result<()> {
    let mut rng = StdRng::from_entropy();
    let recipes = store.recipes_with_all_ingredients(ingredients, amount, &mut rng)?;
    display_recipe_list(&recipes, "Matching recipes");
    Ok(())
}
