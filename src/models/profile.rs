use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Accumulated nutrition-token amounts, keyed by token category.
///
/// Absent categories are implicitly zero. Values are never negative:
/// negative amounts are dropped on insertion and on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Decimal>")]
pub struct TokenProfile(BTreeMap<String, Decimal>);

impl TokenProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount for a token, zero when absent.
    pub fn get(&self, token: &str) -> Decimal {
        self.0.get(token).copied().unwrap_or(Decimal::ZERO)
    }

    /// Add `amount` to a token's running total.
    ///
    /// Negative amounts contribute nothing, and an amount that would
    /// overflow the total is dropped, leaving the previous total in place.
    pub fn add(&mut self, token: &str, amount: Decimal) {
        if amount < Decimal::ZERO {
            return;
        }
        let total = self.0.entry(token.to_string()).or_insert(Decimal::ZERO);
        match total.checked_add(amount) {
            Some(sum) => *total = sum,
            None => debug!(token, %amount, "skipping token contribution that overflowed"),
        }
    }

    /// Fold another profile into this one, element-wise.
    pub fn merge(&mut self, other: &TokenProfile) {
        for (token, amount) in &other.0 {
            self.add(token, *amount);
        }
    }

    /// Element-wise sum as a new profile; neither input is touched.
    pub fn merged(&self, other: &TokenProfile) -> TokenProfile {
        let mut result = self.clone();
        result.merge(other);
        result
    }

    /// Copy with every value rounded to `dp` decimal places.
    pub fn rounded(&self, dp: u32) -> TokenProfile {
        TokenProfile(
            self.0
                .iter()
                .map(|(token, amount)| (token.clone(), amount.round_dp(dp).normalize()))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(token, amount)| (token.as_str(), *amount))
    }

    /// Number of explicitly tracked categories.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every category holds zero (or none are tracked).
    pub fn is_zero(&self) -> bool {
        self.0.values().all(|v| v.is_zero())
    }
}

impl From<BTreeMap<String, Decimal>> for TokenProfile {
    fn from(map: BTreeMap<String, Decimal>) -> Self {
        let mut profile = TokenProfile::new();
        for (token, amount) in map {
            profile.add(&token, amount);
        }
        profile
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for TokenProfile {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        let mut profile = TokenProfile::new();
        for (token, amount) in iter {
            profile.add(&token.into(), amount);
        }
        profile
    }
}

/// Required cumulative amount per token category by the end of a plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanRules(BTreeMap<String, Decimal>);

impl PlanRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Household default quotas for a ten-meal plan.
    pub fn default_rules() -> Self {
        crate::planner::constants::DEFAULT_RULES
            .iter()
            .map(|(token, quota)| (*token, Decimal::from(*quota)))
            .collect()
    }

    pub fn insert(&mut self, token: &str, quota: Decimal) {
        self.0.insert(token.to_string(), quota);
    }

    pub fn get(&self, token: &str) -> Option<Decimal> {
        self.0.get(token).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(token, quota)| (token.as_str(), *quota))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Decimal)> for PlanRules {
    fn from_iter<I: IntoIterator<Item = (S, Decimal)>>(iter: I) -> Self {
        PlanRules(iter.into_iter().map(|(t, q)| (t.into(), q)).collect())
    }
}
