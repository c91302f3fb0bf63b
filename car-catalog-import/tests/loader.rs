use std::cell::RefCell;

use car_catalog_core::document::*;
use car_catalog_core::types::*;
use car_catalog_db::*;
use car_catalog_import::*;
use rusqlite::Connection;

fn sample_brand() -> SourceBrand {
    SourceBrand {
        name: Some("Toyota".to_string()),
        country: Some("Japan".to_string()),
        models: vec![SourceModel {
            name: Some("Camry".to_string()),
            class: Some("D".to_string()),
            year_from: Some(SourceValue::Integer(2011)),
            year_to: Some(SourceValue::Integer(2017)),
            generations: vec![SourceGeneration {
                name: Some("XV50".to_string()),
                year_start: Some(SourceValue::Integer(2011)),
                year_stop: Some(SourceValue::Integer(2017)),
                configurations: vec![SourceConfiguration {
                    body_type: Some("Sedan".to_string()),
                    modifications: vec![SourceModification {
                        specifications: SourceSpecifications {
                            engine_type: Some("Petrol".into()),
                            horse_power: Some(SourceValue::Integer(181)),
                            transmission: Some("Automatic".into()),
                            drive: Some("FWD".into()),
                            volume: Some(SourceValue::Real(2.5)),
                            consumption_mixed: Some("7.8".into()),
                            max_speed: Some(SourceValue::Integer(210)),
                        },
                    }],
                }],
            }],
        }],
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

#[test]
fn single_chain_loads_one_row_per_table() {
    let conn = open_memory().unwrap();
    let stats = load_catalog(&conn, &[sample_brand()], &mut RandomPrice, None).unwrap();

    assert_eq!(stats.marks_created, 1);
    assert_eq!(stats.models, 1);
    assert_eq!(stats.generations, 1);
    assert_eq!(stats.specifications, 1);
    for table in ["Marks", "Models", "Generations", "Specifications"] {
        assert_eq!(count(&conn, table), 1, "{table}");
    }

    let price: f64 = conn
        .query_row("SELECT price FROM Specifications", [], |row| row.get(0))
        .unwrap();
    let price = price as i64;
    assert!((2000..=50000).contains(&price), "price {price}");
    assert_eq!(price % 100, 0);
}

#[test]
fn loaded_rows_are_searchable() {
    let conn = open_memory().unwrap();
    load_catalog(&conn, &[sample_brand()], &mut FixedPrice(25_000), None).unwrap();

    let filters = SearchFilters::new()
        .with(FilterKey::Brand, "Toyota")
        .with(FilterKey::YearFrom, "2010");
    let rows = search(&conn, &filters).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].body_type.as_deref(), Some("Sedan"));
    assert_eq!(rows[0].horse_power.as_deref(), Some("181"));
    assert_eq!(rows[0].volume.as_deref(), Some("2.5"));
    assert_eq!(rows[0].consumption_mixed.as_deref(), Some("7.8"));
}

#[test]
fn specification_hangs_off_the_model() {
    let conn = open_memory().unwrap();
    load_catalog(&conn, &[sample_brand()], &mut FixedPrice(4_200), None).unwrap();

    let marks = list_marks(&conn).unwrap();
    let models = models_for_mark(&conn, marks[0].id).unwrap();
    let specs = specifications_for_model(&conn, models[0].id).unwrap();
    assert_eq!(specs.len(), 1);

    let spec = find_specification(&conn, specs[0].id).unwrap().unwrap();
    assert_eq!(spec.model_id, Some(models[0].id));
    assert_eq!(spec.price.as_deref(), Some("4200"));
}

#[test]
fn missing_leaves_are_null() {
    let conn = open_memory().unwrap();
    let brand = SourceBrand {
        name: Some("Lada".to_string()),
        country: None,
        models: vec![SourceModel {
            name: Some("Niva".to_string()),
            generations: vec![SourceGeneration {
                configurations: vec![SourceConfiguration {
                    body_type: None,
                    modifications: vec![SourceModification::default()],
                }],
                ..Default::default()
            }],
            ..Default::default()
        }],
    };
    load_catalog(&conn, &[brand], &mut FixedPrice(2_000), None).unwrap();

    let (class, body): (Option<String>, Option<String>) = conn
        .query_row("SELECT class, body_type FROM Models", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(class, None);
    assert_eq!(body, None);

    let engine: Option<String> = conn
        .query_row("SELECT engine_type FROM Specifications", [], |row| row.get(0))
        .unwrap();
    assert_eq!(engine, None);
}

#[test]
fn shallow_model_gets_no_body_type_and_no_specifications() {
    let conn = open_memory().unwrap();
    let mut brand = sample_brand();
    brand.models[0].generations.clear();
    let stats = load_catalog(&conn, &[brand], &mut FixedPrice(2_000), None).unwrap();

    assert_eq!(stats.models, 1);
    assert_eq!(stats.generations, 0);
    assert_eq!(stats.specifications, 0);
    assert_eq!(body_types_for_model(&conn, Some("Camry")).unwrap().len(), 0);
}

#[test]
fn every_modification_of_every_generation_becomes_a_row() {
    let conn = open_memory().unwrap();
    let mut brand = sample_brand();
    let generation = brand.models[0].generations[0].clone();
    brand.models[0].generations[0].configurations[0]
        .modifications
        .push(SourceModification::default());
    brand.models[0].generations.push(generation);

    let stats = load_catalog(&conn, &[brand], &mut FixedPrice(2_000), None).unwrap();
    assert_eq!(stats.generations, 2);
    assert_eq!(stats.specifications, 3);

    let models = models_for_mark(&conn, list_marks(&conn).unwrap()[0].id).unwrap();
    assert_eq!(specifications_for_model(&conn, models[0].id).unwrap().len(), 3);
}

#[test]
fn reloading_reuses_marks_but_duplicates_the_rest() {
    let conn = open_memory().unwrap();
    load_catalog(&conn, &[sample_brand()], &mut FixedPrice(2_000), None).unwrap();
    let stats = load_catalog(&conn, &[sample_brand()], &mut FixedPrice(2_000), None).unwrap();

    assert_eq!(stats.marks_created, 0);
    assert_eq!(stats.marks_existing, 1);
    assert_eq!(count(&conn, "Marks"), 1);
    assert_eq!(count(&conn, "Models"), 2);
    assert_eq!(count(&conn, "Specifications"), 2);
}

#[test]
fn each_specification_draws_a_price() {
    struct Counting(i64);
    impl PriceGenerator for Counting {
        fn generate(&mut self) -> i64 {
            self.0 += 100;
            self.0
        }
    }

    let conn = open_memory().unwrap();
    let mut brand = sample_brand();
    brand.models[0].generations[0].configurations[0]
        .modifications
        .push(SourceModification::default());
    let mut prices = Counting(2_000);
    load_catalog(&conn, &[brand], &mut prices, None).unwrap();

    let mut stmt = conn
        .prepare("SELECT price FROM Specifications ORDER BY id")
        .unwrap();
    let stored: Vec<f64> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(stored, vec![2_100.0, 2_200.0]);
}

#[test]
fn failed_load_leaves_nothing_behind() {
    let conn = open_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_specs BEFORE INSERT ON Specifications
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();

    let result = load_catalog(&conn, &[sample_brand()], &mut FixedPrice(2_000), None);
    assert!(result.is_err());
    assert_eq!(count(&conn, "Marks"), 0);
    assert_eq!(count(&conn, "Models"), 0);
}

#[test]
fn progress_sees_every_brand_and_completion() {
    #[derive(Default)]
    struct Recorder {
        brands: RefCell<Vec<(usize, usize, String)>>,
        completed: RefCell<Vec<String>>,
    }
    impl LoadProgress for Recorder {
        fn on_brand(&self, current: usize, total: usize, name: &str) {
            self.brands
                .borrow_mut()
                .push((current, total, name.to_string()));
        }
        fn on_phase(&self, _message: &str) {}
        fn on_complete(&self, message: &str) {
            self.completed.borrow_mut().push(message.to_string());
        }
    }

    let conn = open_memory().unwrap();
    let mut second = sample_brand();
    second.name = Some("Honda".to_string());
    let recorder = Recorder::default();
    load_catalog(
        &conn,
        &[sample_brand(), second],
        &mut FixedPrice(2_000),
        Some(&recorder),
    )
    .unwrap();

    assert_eq!(
        recorder.brands.into_inner(),
        vec![(1, 2, "Toyota".to_string()), (2, 2, "Honda".to_string())]
    );

    let completed = recorder.completed.into_inner();
    assert_eq!(completed.len(), 1);
    assert!(completed[0].starts_with("Loaded 2 brand(s)"));
    assert!(completed[0].contains("2 specification(s)"));
}

#[test]
fn random_price_stays_in_range() {
    let mut prices = RandomPrice;
    for _ in 0..1_000 {
        let p = prices.generate();
        assert!((2_000..=50_000).contains(&p));
        assert_eq!(p % 100, 0);
    }
}

#[test]
fn loads_a_json_document_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cars.json");
    std::fs::write(
        &path,
        r#"[{"name": "Kia", "country": "South Korea", "models": [
            {"name": "Rio", "class": "B", "year-from": 2011, "year-to": "2017",
             "generations": [{"name": "III", "year-start": 2011, "year-stop": 2017,
               "configurations": [{"body-type": "Hatchback", "modifications": [
                 {"specifications": {"engine-type": "Petrol", "horse-power": 107,
                  "volume": 1.4, "max-speed": 180}}]}]}]}]}]"#,
    )
    .unwrap();

    let brands = load_document(&path).unwrap();
    let conn = open_memory().unwrap();
    let stats = load_catalog(&conn, &brands, &mut FixedPrice(9_900), Some(&SilentProgress)).unwrap();
    assert_eq!(stats.specifications, 1);

    let rows = search(&conn, &SearchFilters::new().with(FilterKey::Model, "Rio")).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].year_to.as_deref(), Some("2017"));
    assert_eq!(rows[0].transmission, None);
}
