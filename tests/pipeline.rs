use pxspawn::{convert_all, run, Condition, Config, ConvertError, Tables};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

struct Fixture {
    _root: TempDir,
    config: Config,
}

impl Fixture {
    fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let stats = root.path().join("stats");
        let sets = root.path().join("sets");
        fs::create_dir_all(&stats).unwrap();
        fs::create_dir_all(&sets).unwrap();

        let mut config = Config::default();
        config.convert.stats_dir = stats;
        config.convert.sets_dir = sets;
        config.convert.output = root.path().join("out").join("conversion_result.json");

        Self {
            _root: root,
            config,
        }
    }

    fn stats(&self, file: &str, value: Value) -> &Self {
        write_json(&self.config.convert.stats_dir.join(file), &value);
        self
    }

    fn set(&self, file: &str, value: Value) -> &Self {
        write_json(&self.config.convert.sets_dir.join(file), &value);
        self
    }

    fn output(&self) -> Value {
        let text = fs::read_to_string(&self.config.convert.output).unwrap();
        serde_json::from_str(&text).unwrap()
    }
}

fn write_json(path: &Path, value: &Value) {
    fs::write(path, serde_json::to_string(value).unwrap()).unwrap();
}

fn pokedex() -> Fixture {
    let f = Fixture::new();
    f.stats("25.json", json!({"pokemon": "Pikachu", "malePercent": 50}))
        .set(
            "Pikachu.set.json",
            json!({"spawnInfos": [{"minLevel": 2, "maxLevel": 7, "rarity": 150}]}),
        )
        .stats("0.json", json!({"pokemon": "Egg", "malePercent": 0}))
        .stats("999.json", json!({"pokemon": "Missingno", "malePercent": 0}))
        .stats("122.json", json!({"pokemon": "Mr. Mime", "malePercent": 50, "catchRate": 45}))
        .set(
            "Mr. Mime.set.json",
            json!({"spawnInfos": [
                {
                    "minLevel": 20,
                    "maxLevel": 30,
                    "rarity": 9,
                    "typeID": "pokemon",
                    "heldItems": [
                        {"itemID": "pixelmon:leftovers", "percentChance": 10},
                        {"itemID": "pixelmon:unknown_thing", "percentChance": 40},
                        {"itemID": "pixelmon:leek", "percentChance": 0}
                    ],
                    "condition": {"stringBiomes": ["plains"], "times": ["DAY"]},
                    "tags": ["rare"]
                },
                {"minLevel": 25, "maxLevel": 35, "rarity": 1}
            ]}),
        )
        .stats("7.json", json!({"pokemon": "Squirtle", "malePercent": 87.5}));
    f
}

#[test]
fn pikachu_example() {
    let f = pokedex();
    run(&f.config, &Tables::default()).unwrap();

    let out = f.output();
    let any = serde_json::to_value(Condition::any()).unwrap();
    assert_eq!(
        out["spawns"]["25"],
        json!([{
            "min_level": 2,
            "max_level": 7,
            "held_items": [],
            "male_chance": 0.5,
            "spawn_area": 1337,
            "probability": 0.5,
            "conditions": [any]
        }])
    );
}

#[test]
fn held_items_and_order() {
    let f = pokedex();
    let result = convert_all(&f.config, &Tables::default()).unwrap();

    let mime = &result.spawns[&122];
    assert_eq!(mime.len(), 2);
    assert_eq!(mime[0].min_level, 20);
    assert_eq!(mime[0].probability, 0.03);
    assert_eq!(mime[0].held_items.len(), 1);
    assert_eq!(mime[0].held_items[0].item, 93);
    assert_eq!(mime[0].held_items[0].chance, 0.1);
    assert_eq!(mime[1].min_level, 25);
    assert_eq!(mime[1].probability, 0.00333);
}

#[test]
fn unmatched_species_listed_once_in_file_order() {
    let f = pokedex();
    let result = convert_all(&f.config, &Tables::default()).unwrap();

    // 文件名按字典序: 0, 122, 25, 7, 999
    let ids: Vec<u32> = result.no_spawns.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![7, 999]);
    assert_eq!(result.no_spawns[1].name, "Missingno");
    assert!(!result.spawns.contains_key(&999));
    assert!(!result.spawns.contains_key(&7));
    assert!(!result.spawns.contains_key(&0));
}

#[test]
fn parallel_and_sequential_agree_and_rerun_is_identical() {
    let f = pokedex();
    let tables = Tables::default();

    run(&f.config, &tables).unwrap();
    let first = fs::read(&f.config.convert.output).unwrap();
    run(&f.config, &tables).unwrap();
    let second = fs::read(&f.config.convert.output).unwrap();
    assert_eq!(first, second);

    let mut sequential = f.config.clone();
    sequential.convert.parallel = false;
    run(&sequential, &tables).unwrap();
    assert_eq!(fs::read(&f.config.convert.output).unwrap(), first);
}

#[test]
fn missing_required_field_aborts_without_output() {
    let f = pokedex();
    f.set(
        "Pikachu.set.json",
        json!({"spawnInfos": [{"minLevel": 2, "rarity": 150}]}),
    );

    let err = run(&f.config, &Tables::default()).unwrap_err();
    assert!(matches!(err, ConvertError::Json { .. }));
    assert!(!f.config.convert.output.exists());
}

#[test]
fn malformed_stats_filename_is_fatal() {
    let f = pokedex();
    f.stats("readme.json", json!({}));
    let err = convert_all(&f.config, &Tables::default()).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidStatsFilename(_)));
}

#[test]
fn configured_item_overrides_apply() {
    let f = pokedex();
    let mut config = f.config.clone();
    config
        .tables
        .items
        .insert("pixelmon:unknown_thing".to_string(), 4242);
    config.convert.spawn_area = 7;

    let result = convert_all(&config, &config.tables()).unwrap();
    let items: Vec<u32> = result.spawns[&122][0]
        .held_items
        .iter()
        .map(|h| h.item)
        .collect();
    assert_eq!(items, vec![93, 4242]);
    assert_eq!(result.spawns[&25][0].spawn_area, 7);
}

#[test]
fn non_string_ids_do_not_abort_the_run() {
    let f = pokedex();
    f.set(
        "Pikachu.set.json",
        json!({"spawnInfos": [{
            "minLevel": 2,
            "maxLevel": 7,
            "rarity": 150,
            "typeID": 5,
            "heldItems": [
                {"itemID": 7, "percentChance": 50},
                {"itemID": "pixelmon:leftovers", "percentChance": 10}
            ]
        }]}),
    );

    run(&f.config, &Tables::default()).unwrap();
    let out = f.output();
    assert_eq!(
        out["spawns"]["25"][0]["held_items"],
        json!([{"item": 93, "chance": 0.1}])
    );
    assert_eq!(out["spawns"]["25"][0]["probability"], 0.5);
}

#[test]
fn signed_stats_filename_is_accepted() {
    let f = Fixture::new();
    f.stats("+25.json", json!({"pokemon": "Pikachu", "malePercent": 50}))
        .set(
            "Pikachu.set.json",
            json!({"spawnInfos": [{"minLevel": 2, "maxLevel": 7, "rarity": 150}]}),
        );
    let result = convert_all(&f.config, &Tables::default()).unwrap();
    assert_eq!(result.spawns[&25].len(), 1);

    f.stats("4294967296.json", json!({"pokemon": "Overflow", "malePercent": 0}));
    let err = convert_all(&f.config, &Tables::default()).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidStatsFilename(_)));
}
