use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlateError {
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No eligible recipes to start a plan from")]
    EmptyCatalog,

    #[error("Cannot fill {requested} meals without repeats: ran out of recipes after {filled}")]
    HorizonInfeasible { requested: usize, filled: usize },
}

pub type Result<T> = std::result::Result<T, PlateError>;
