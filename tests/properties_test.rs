use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

use plate_o_rs::models::RecipeId;
use plate_o_rs::nutrition::compute_aggregate_profile;
use plate_o_rs::planner::{optimize_meal_plan, score_candidate, PlannerConfig};
use plate_o_rs::{PlanRules, Recipe, TokenProfile};

const TOKENS: [&str; 4] = ["fish", "legumes", "red meat", "vegetables"];

/// Non-negative amounts with two decimal places.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..10_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn profile() -> impl Strategy<Value = TokenProfile> {
    proptest::collection::vec((0usize..TOKENS.len(), amount()), 0..4)
        .prop_map(|entries| {
            entries
                .into_iter()
                .map(|(i, v)| (TOKENS[i], v))
                .collect::<TokenProfile>()
        })
}

fn catalog(max: usize) -> impl Strategy<Value = Vec<Recipe>> {
    proptest::collection::vec(profile(), 1..max).prop_map(|profiles| {
        profiles
            .into_iter()
            .enumerate()
            .map(|(i, p)| Recipe::new(i as RecipeId + 1, format!("recipe {}", i + 1), p))
            .collect::<Vec<_>>()
    })
}

proptest! {
    #[test]
    fn aggregate_profile_is_additive(a in catalog(6), b in catalog(6)) {
        let mut joined = a.clone();
        joined.extend(b.iter().cloned());
        let mut reversed = b.clone();
        reversed.extend(a.iter().cloned());

        let split = compute_aggregate_profile(&a).merged(&compute_aggregate_profile(&b));
        prop_assert_eq!(&compute_aggregate_profile(&joined), &split);
        prop_assert_eq!(&compute_aggregate_profile(&reversed), &split);
    }

    #[test]
    fn plans_never_repeat(
        recipes in catalog(12),
        seed in any::<u64>(),
        heat in 1usize..6,
        meals in 1usize..12,
    ) {
        let rules = PlanRules::default_rules();
        let mut rng = StdRng::seed_from_u64(seed);
        let result = optimize_meal_plan(
            &recipes,
            &rules,
            &PlannerConfig::new(meals, heat),
            None,
            &HashSet::new(),
            &mut rng,
        );

        if meals <= recipes.len() {
            let ids = result.unwrap().plan.ids();
            let distinct: HashSet<RecipeId> = ids.iter().copied().collect();
            prop_assert_eq!(ids.len(), meals);
            prop_assert_eq!(distinct.len(), meals);
        } else {
            prop_assert!(result.is_err());
        }
    }

    #[test]
    fn penalty_is_non_negative_and_monotone(
        progress in profile(),
        base in profile(),
        extra in profile(),
        step in 1usize..10,
    ) {
        let rules: PlanRules = TOKENS.iter().map(|t| (*t, Decimal::from(5))).collect();
        let horizon = 10;
        let stronger = base.merged(&extra);

        let weak = score_candidate(&progress, &base, &rules, step, horizon);
        let strong = score_candidate(&progress, &stronger, &rules, step, horizon);
        prop_assert!(weak >= Decimal::ZERO);
        prop_assert!(strong <= weak);
    }
}
