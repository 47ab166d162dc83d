use knapsack_ga::loader::{list_json_files, ProblemLoader};
use knapsack_ga::prompt::{resolve_capacity, ScriptedPrompt};
use knapsack_ga::{solve, Item, KnapsackConfig, LoadError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_and_solve_file() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("camping.json");
    fs::write(
        &path,
        r#"{
            "capacity": 10,
            "items": [
                {"name": "tent", "weight": 5, "value": 6},
                {"name": "stove", "weight": 3, "value": 4},
                {"weight": 2, "value": 3}
            ]
        }"#,
    )
    .unwrap();

    let mut loader = ProblemLoader::default();
    let file = loader.load(&path).unwrap();
    assert_eq!(file.items[0], Item::named("tent", 5, 6));

    let capacity = resolve_capacity(file.capacity, None, None).unwrap();
    let problem = file.into_problem(capacity);

    let mut rng = StdRng::seed_from_u64(1);
    let outcome = solve(&problem, &KnapsackConfig::default(), &mut rng).unwrap();
    assert_eq!(outcome.total_value(), 13);
    assert_eq!(outcome.total_weight(), 10);
}

#[test]
fn test_repeated_loads_use_the_cache() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("p.json");
    fs::write(&path, r#"{"capacity": 4, "items": [{"weight": 1, "value": 1}]}"#).unwrap();

    let mut loader = ProblemLoader::default();
    let first = loader.load(&path).unwrap();

    // A cached entry survives changes on disk
    fs::write(&path, r#"{"capacity": 9, "items": []}"#).unwrap();
    let second = loader.load(&temp.path().join(".").join("p.json")).unwrap();

    assert_eq!(first, second);
    assert_eq!(loader.cache().len(), 1);

    let cache = loader.into_cache();
    let mut fresh = ProblemLoader::default();
    assert_eq!(fresh.load(&path).unwrap().capacity, Some(9));
    assert_eq!(ProblemLoader::new(cache).load(&path).unwrap(), first);
}

#[test]
fn test_missing_capacity_is_prompted() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("open.json");
    fs::write(&path, r#"{"items": [{"weight": 2, "value": 5}]}"#).unwrap();

    let file = ProblemLoader::default().load(&path).unwrap();
    assert_eq!(file.capacity, None);

    assert!(matches!(
        resolve_capacity(file.capacity, None, None),
        Err(LoadError::MissingCapacity)
    ));

    let mut prompt = ScriptedPrompt::new(["zero", "7"]);
    assert_eq!(
        resolve_capacity(file.capacity, None, Some(&mut prompt)).unwrap(),
        7
    );
}

#[test]
fn test_load_errors() {
    let temp = tempdir().unwrap();
    let mut loader = ProblemLoader::default();

    let missing = loader.load(&temp.path().join("nope.json"));
    assert!(matches!(missing, Err(LoadError::Io { .. })));

    let broken = temp.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(loader.load(&broken), Err(LoadError::Json { .. })));

    let bad_capacity = temp.path().join("bad.json");
    fs::write(&bad_capacity, r#"{"capacity": "lots", "items": []}"#).unwrap();
    assert!(matches!(
        loader.load(&bad_capacity),
        Err(LoadError::InvalidCapacity(_))
    ));
    assert!(loader.cache().is_empty());
}

#[test]
fn test_list_json_files() {
    let temp = tempdir().unwrap();
    for name in ["b.json", "a.json", "c.txt"] {
        fs::write(temp.path().join(name), "{}").unwrap();
    }

    assert_eq!(list_json_files(temp.path()), vec!["a.json", "b.json"]);
    assert!(list_json_files(&temp.path().join("missing")).is_empty());
}
