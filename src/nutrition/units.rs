use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{IngredientId, UnitConversion};

/// Units the measure importer accepts.
pub const KNOWN_UNITS: [&str; 7] = ["c", "u", "tbsp", "tsp", "g", "ml", "qb"];

/// Canonical form of a unit string: trimmed and lowercased.
pub fn normalize_unit(unit: &str) -> String {
    unit.trim().to_lowercase()
}

/// Whether a (normalized) unit belongs to [`KNOWN_UNITS`].
pub fn is_known_unit(unit: &str) -> bool {
    KNOWN_UNITS.contains(&unit)
}

/// Parse a recorded quantity such as `"1.5"` or `"2e1"`.
///
/// Returns `None` for anything that is not a finite decimal number.
pub fn parse_quantity(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Per-ingredient unit multipliers, keyed by (ingredient, normalized unit).
#[derive(Debug, Clone, Default)]
pub struct ConversionTable {
    multipliers: HashMap<(IngredientId, String), Decimal>,
}

impl ConversionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from conversion rows; later rows replace earlier ones.
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a UnitConversion>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.insert(row.ingredient_id, &row.unit, row.multiplier);
        }
        table
    }

    /// Store a multiplier, returning the one it replaced (if any).
    pub fn insert(
        &mut self,
        ingredient_id: IngredientId,
        unit: &str,
        multiplier: Decimal,
    ) -> Option<Decimal> {
        self.multipliers
            .insert((ingredient_id, normalize_unit(unit)), multiplier)
    }

    pub fn multiplier(&self, ingredient_id: IngredientId, unit: &str) -> Option<Decimal> {
        self.multipliers
            .get(&(ingredient_id, normalize_unit(unit)))
            .copied()
    }

    /// Convert a recorded quantity into the ingredient's base unit.
    ///
    /// `None` means the contribution must be skipped: the quantity did not
    /// parse, no multiplier exists for the unit, or the product overflowed.
    pub fn to_base_quantity(
        &self,
        ingredient_id: IngredientId,
        raw_quantity: &str,
        unit: &str,
    ) -> Option<Decimal> {
        let quantity = parse_quantity(raw_quantity)?;
        let multiplier = self.multiplier(ingredient_id, unit)?;
        quantity.checked_mul(multiplier)
    }

    pub fn len(&self) -> usize {
        self.multipliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multipliers.is_empty()
    }
}
