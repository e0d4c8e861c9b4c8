/// Default number of meals in a generated plan.
pub const DEFAULT_TOTAL_MEALS: usize = 10;

/// Default width of the sampling pool at each greedy step.
pub const DEFAULT_HEAT: usize = 3;

/// Household default quotas (token category, cumulative amount per plan).
pub const DEFAULT_RULES: &[(&str, i64)] = &[
    ("red meat", 2),
    ("white meat", 2),
    ("legumes", 2),
    ("fish", 2),
    ("vegetables", 20),
];

// ─────────────────────────────────────────────────────────────────────────────
// Display and catalog queries
// ─────────────────────────────────────────────────────────────────────────────

/// Decimal places used when presenting token amounts.
pub const DEFAULT_PRECISION: u32 = 2;

/// Default number of recipes returned by catalog sampling queries.
pub const DEFAULT_SAMPLE_AMOUNT: usize = 5;

/// Upper bound on recipes returned by a random sample.
pub const MAX_SAMPLE_AMOUNT: usize = 50;

/// Minimum Jaro-Winkler similarity for a fuzzy recipe-name match.
pub const FUZZY_MATCH_THRESHOLD: f64 = 0.7;

/// Maximum fuzzy candidates offered for selection.
pub const FUZZY_MAX_CHOICES: usize = 5;
