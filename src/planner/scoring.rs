use rust_decimal::Decimal;

use crate::models::{PlanRules, TokenProfile};

/// Quota share a plan should have accumulated by `step` of `horizon`.
///
/// Linear pacing: `quota * step / horizon`. Quotas too large to scale
/// directly are divided first, and saturate at `quota` if that overflows too.
pub fn expected_progress(quota: Decimal, step: usize, horizon: usize) -> Decimal {
    if horizon == 0 {
        return quota;
    }
    let step = Decimal::from(step);
    let horizon = Decimal::from(horizon);
    quota
        .checked_mul(step)
        .map(|scaled| scaled / horizon)
        .or_else(|| (quota / horizon).checked_mul(step))
        .unwrap_or(quota)
}

/// Total shortfall of `progress` against the paced quotas at `step`.
///
/// Only tokens named in `rules` count, and only when under pace: surplus on
/// one token never offsets a deficit on another, and overshoot is free.
/// The total saturates at `Decimal::MAX`.
pub fn deficit_penalty(
    progress: &TokenProfile,
    rules: &PlanRules,
    step: usize,
    horizon: usize,
) -> Decimal {
    rules
        .iter()
        .map(|(token, quota)| {
            let expected = expected_progress(quota, step, horizon);
            // only a negative quota can overflow here, and it is never short
            expected
                .checked_sub(progress.get(token))
                .unwrap_or(Decimal::ZERO)
                .max(Decimal::ZERO)
        })
        .fold(Decimal::ZERO, |total, shortfall| {
            total.checked_add(shortfall).unwrap_or(Decimal::MAX)
        })
}

/// Penalty of appending `candidate` to a plan whose running tally is
/// `progress`, when filling the 1-based slot `step` of `horizon`.
///
/// Lower is better; zero means on pace for every tracked token.
pub fn score_candidate(
    progress: &TokenProfile,
    candidate: &TokenProfile,
    rules: &PlanRules,
    step: usize,
    horizon: usize,
) -> Decimal {
    let simulated = progress.merged(candidate);
    deficit_penalty(&simulated, rules, step, horizon)
}
