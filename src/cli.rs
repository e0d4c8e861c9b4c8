use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;
use crate::planner::constants::{
    DEFAULT_HEAT, DEFAULT_PRECISION, DEFAULT_SAMPLE_AMOUNT, DEFAULT_TOTAL_MEALS,
};
use crate::planner::PlannerConfig;

/// Plate-O plans meals that pace nutrition tokens toward weekly quotas.
#[derive(Parser, Debug)]
#[command(name = "plate_o")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the recipe dataset JSON file.
    #[arg(short, long, global = true, env = "PLATE_O_DATA", default_value = "plate_o.json")]
    pub data: PathBuf,

    /// CSV of unit conversions (ingredient_id,u_desc,multiplier) overriding the dataset's.
    #[arg(long, global = true, env = "PLATE_O_CONVERSIONS")]
    pub conversions: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "plate_o_rs=debug").
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a meal plan that paces token quotas.
    Plan {
        /// Number of meals in the plan.
        #[arg(short, long, default_value_t = DEFAULT_TOTAL_MEALS)]
        meals: usize,

        /// Pick each meal among this many best candidates.
        #[arg(long, default_value_t = DEFAULT_HEAT)]
        heat: usize,

        /// First meal, by id or name.
        #[arg(short, long)]
        start: Option<String>,

        /// Recipe ids to leave out of the plan (comma-separated).
        #[arg(long, value_delimiter = ',')]
        forbid: Vec<u64>,

        /// Random seed for a reproducible plan.
        #[arg(long)]
        seed: Option<u64>,

        /// JSON file of token quotas (overrides the dataset's rules).
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Write the plan to this JSON file instead of asking.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Decimal places shown for token amounts.
        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: u32,
    },

    /// Show the token profile of a recipe.
    Tokens {
        /// Recipe id or name.
        recipe: String,

        /// Decimal places shown for token amounts.
        #[arg(long, default_value_t = DEFAULT_PRECISION)]
        precision: u32,
    },

    /// List random recipes.
    Random {
        /// How many recipes to list (1-50).
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_AMOUNT)]
        amount: usize,
    },

    /// List recipes that use all of the given ingredients.
    WithIngredients {
        /// Ingredient ids (comma-separated).
        #[arg(short, long, value_delimiter = ',', required = true)]
        ingredients: Vec<u64>,

        /// Maximum number of recipes to list.
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_AMOUNT)]
        amount: usize,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Plan {
            meals: DEFAULT_TOTAL_MEALS,
            heat: DEFAULT_HEAT,
            start: None,
            forbid: Vec::new(),
            seed: None,
            rules: None,
            output: None,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Command {
    /// Planner settings carried by `plan`, if this is that command.
    pub fn planner_config(&self) -> Option<PlannerConfig> {
        match self {
            Command::Plan { meals, heat, .. } => Some(PlannerConfig::new(*meals, *heat)),
            _ => None,
        }
    }

    /// Rejects argument combinations that can never succeed, without
    /// touching the dataset.
    pub fn validate(&self) -> Result<()> {
        match self.planner_config() {
            Some(config) => config.validate(),
            None => Ok(()),
        }
    }
}
