use std::collections::HashSet;
use std::io::Write;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

use plate_o_rs::planner::{optimize_meal_plan, PlannerConfig};
use plate_o_rs::state::{load_conversions_csv, load_dataset, save_plan, CatalogStore};
use plate_o_rs::PlanRules;

const DATASET: &str = r#"{
    "recipes": [
        {"id": 1, "name": "Bitoque", "ingredients": [
            {"ingredient_id": 100, "quantity": "1", "unit": "u"},
            {"ingredient_id": 200, "quantity": "150", "unit": "g"}
        ]},
        {"id": 2, "name": "Frango Assado", "ingredients": [
            {"ingredient_id": 101, "quantity": "0.5", "unit": "u"},
            {"ingredient_id": 200, "quantity": "2", "unit": "c"}
        ]},
        {"id": 3, "name": "Feijoada", "ingredients": [
            {"ingredient_id": 102, "quantity": "1.5", "unit": "c"},
            {"ingredient_id": 100, "quantity": "0.5", "unit": "u"}
        ]},
        {"id": 4, "name": "Sopa de Legumes", "ingredients": [
            {"ingredient_id": 200, "quantity": "400", "unit": "g"},
            {"ingredient_id": 300, "quantity": "1", "unit": "qb"}
        ]},
        {"id": 5, "name": "Caldeirada", "ingredients": [
            {"ingredient_id": 103, "quantity": "600", "unit": "g"},
            {"ingredient_id": 200, "quantity": "abc", "unit": "g"}
        ]}
    ],
    "conversions": [
        {"ingredient_id": 100, "unit": "u", "multiplier": "200"},
        {"ingredient_id": 101, "unit": "u", "multiplier": "1200"},
        {"ingredient_id": 102, "unit": "c", "multiplier": "180"},
        {"ingredient_id": 103, "unit": "g", "multiplier": "1"},
        {"ingredient_id": 200, "unit": "g", "multiplier": "1"},
        {"ingredient_id": 200, "unit": "c", "multiplier": "130"}
    ],
    "coefficients": [
        {"ingredient_id": 100, "token": "red meat", "coefficient": "0.005"},
        {"ingredient_id": 101, "token": "white meat", "coefficient": "0.001"},
        {"ingredient_id": 102, "token": "legumes", "coefficient": "0.005"},
        {"ingredient_id": 103, "token": "fish", "coefficient": "0.002"},
        {"ingredient_id": 200, "token": "vegetables", "coefficient": "0.01"}
    ],
    "rules": {"red meat": 1, "white meat": 1, "legumes": 1, "fish": 1, "vegetables": 8}
}"#;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_profiles_from_dataset() {
    let file = write_temp(DATASET);
    let store = CatalogStore::new(load_dataset(file.path()).unwrap());

    let bitoque = store.recipe_profile(1).unwrap();
    assert_eq!(bitoque.get("red meat"), dec!(1));
    assert_eq!(bitoque.get("vegetables"), dec!(1.5));

    let frango = store.recipe_profile(2).unwrap();
    assert_eq!(frango.get("white meat"), dec!(0.6));
    assert_eq!(frango.get("vegetables"), dec!(2.6));

    // qb line has no conversion; soup still gets its vegetables
    assert_eq!(store.recipe_profile(4).unwrap().get("vegetables"), dec!(4));

    // unparseable quantity skipped, fish still counted
    let caldeirada = store.recipe_profile(5).unwrap();
    assert_eq!(caldeirada.get("fish"), dec!(1.2));
    assert_eq!(caldeirada.get("vegetables"), dec!(0));
}

#[test]
fn test_csv_conversions_override_dataset() {
    let data = write_temp(DATASET);
    let csv = write_temp("ingredient_id,u_desc,multiplier\n100,u,100\n");

    let mut store = CatalogStore::new(load_dataset(data.path()).unwrap());
    store.apply_conversions(&load_conversions_csv(csv.path()).unwrap());

    assert_eq!(store.recipe_profile(1).unwrap().get("red meat"), dec!(0.5));
}

#[test]
fn test_plan_from_dataset_end_to_end() {
    let file = write_temp(DATASET);
    let mut dataset = load_dataset(file.path()).unwrap();
    let rules = dataset.rules.take().unwrap_or_else(PlanRules::default_rules);
    let store = CatalogStore::new(dataset);

    let catalog = store.planning_catalog();
    let start = store.to_recipe(store.find_by_name("feijoada").unwrap());
    let mut rng = StdRng::seed_from_u64(2024);

    let outcome = optimize_meal_plan(
        &catalog,
        &rules,
        &PlannerConfig::new(4, 2),
        Some(&start),
        &HashSet::new(),
        &mut rng,
    )
    .unwrap();

    assert_eq!(outcome.plan.ids()[0], 3);
    assert_eq!(outcome.plan.len(), 4);
    let distinct: HashSet<u64> = outcome.plan.ids().into_iter().collect();
    assert_eq!(distinct.len(), 4);

    let out = NamedTempFile::new().unwrap();
    save_plan(out.path(), &outcome, 2).unwrap();
    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(out.path()).unwrap()).unwrap();
    assert_eq!(saved["meals"].as_array().unwrap().len(), 4);
    assert_eq!(saved["meals"][0]["name"], "Feijoada");
}

#[test]
fn test_sampling_queries() {
    let file = write_temp(DATASET);
    let store = CatalogStore::new(load_dataset(file.path()).unwrap());
    let mut rng = StdRng::seed_from_u64(1);

    let sample = store.sample_recipes(3, &mut rng);
    let distinct: HashSet<u64> = sample.iter().map(|r| r.id).collect();
    assert_eq!(distinct.len(), 3);

    let with_beef_and_veg = store
        .recipes_with_all_ingredients(&[100, 200], 10, &mut rng)
        .unwrap();
    assert_eq!(with_beef_and_veg.len(), 1);
    assert_eq!(with_beef_and_veg[0].name, "Bitoque");
}
