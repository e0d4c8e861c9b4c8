pub mod profile;
pub mod units;

pub use profile::{compute_aggregate_profile, CoefficientTable, TokenCalculator};
pub use units::{is_known_unit, normalize_unit, parse_quantity, ConversionTable, KNOWN_UNITS};
