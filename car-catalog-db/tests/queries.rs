use car_catalog_core::types::*;
use car_catalog_db::*;
use rusqlite::Connection;

fn car(brand: &str, country: &str, model: &str, body: &str, start: &str, stop: &str) -> NewCar {
    NewCar {
        mark: NewMark {
            name: brand.to_string(),
            country: Some(country.to_string()),
        },
        model: NewModel {
            name: model.to_string(),
            class: Some("D".to_string()),
            year_from: Some(start.to_string()),
            year_to: Some(stop.to_string()),
            body_type: Some(body.to_string()),
        },
        generation: NewGeneration {
            name: Some(format!("{model} I")),
            year_start: Some(start.to_string()),
            year_stop: Some(stop.to_string()),
        },
        specification: NewSpecification {
            engine_type: Some("Petrol".to_string()),
            horse_power: Some("150".to_string()),
            transmission: Some("Manual".to_string()),
            drive: Some("FWD".to_string()),
            volume: Some("2.0".to_string()),
            consumption_mixed: Some("7.5".to_string()),
            max_speed: Some("210".to_string()),
            price: Some("30000".to_string()),
        },
    }
}

fn seeded() -> Connection {
    let conn = open_memory().unwrap();
    create_car(&conn, &car("Toyota", "Japan", "Camry", "Sedan", "2011", "2017")).unwrap();
    create_car(&conn, &car("Toyota", "Japan", "Corolla", "Hatchback", "2006", "2012")).unwrap();
    create_car(&conn, &car("BMW", "Germany", "X5", "SUV", "2013", "2018")).unwrap();
    conn
}

#[test]
fn search_without_filters_returns_every_combination() {
    let conn = seeded();
    let rows = search(&conn, &SearchFilters::new()).unwrap();
    assert_eq!(rows.len(), 3);
}

#[test]
fn search_by_brand_and_start_year() {
    let conn = seeded();
    let filters = SearchFilters::new()
        .with(FilterKey::Brand, "Toyota")
        .with(FilterKey::YearFrom, "2010");
    let rows = search(&conn, &filters).unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.mark_name.as_deref(), Some("Toyota"));
    assert_eq!(row.model_name.as_deref(), Some("Camry"));
    assert_eq!(row.generation_year_start.as_deref(), Some("2011"));
}

#[test]
fn search_year_to_is_inclusive() {
    let conn = seeded();
    let filters = SearchFilters::new().with(FilterKey::YearTo, "2017");
    let models: Vec<_> = search(&conn, &filters)
        .unwrap()
        .into_iter()
        .filter_map(|r| r.model_name)
        .collect();
    assert_eq!(models, vec!["Camry", "Corolla"]);
}

#[test]
fn blank_filters_are_ignored() {
    let conn = seeded();
    let filters = SearchFilters::new()
        .with(FilterKey::Brand, "")
        .with(FilterKey::Country, "   ");
    assert_eq!(search(&conn, &filters).unwrap().len(), 3);

    let (sql, params) = build_search_query(&filters);
    assert!(params.is_empty());
    assert!(!sql.contains("Marks.name = ?"));
}

#[test]
fn search_row_fields_follow_column_order() {
    let conn = seeded();
    let filters = SearchFilters::new().with(FilterKey::Model, "X5");
    let rows = search(&conn, &filters).unwrap();
    assert_eq!(rows.len(), 1);

    let fields = rows[0].fields();
    assert_eq!(
        fields,
        [
            Some("BMW"),
            Some("Germany"),
            Some("X5"),
            Some("D"),
            Some("2013"),
            Some("2018"),
            Some("SUV"),
            Some("X5 I"),
            Some("2013"),
            Some("2018"),
            Some("Petrol"),
            Some("150"),
            Some("Manual"),
            Some("FWD"),
            Some("2"),
            Some("7.5"),
            Some("210"),
        ]
    );
}

#[test]
fn model_without_generation_is_not_searchable() {
    let conn = seeded();
    let (mark_id, _) = insert_or_get_mark(&conn, Some("Lada"), Some("Russia")).unwrap();
    let model_id = insert_model(&conn, mark_id, Some("Vesta"), None, None, None, None).unwrap();
    insert_specification(&conn, model_id, &NewSpecification::default()).unwrap();

    let filters = SearchFilters::new().with(FilterKey::Brand, "Lada");
    assert!(search(&conn, &filters).unwrap().is_empty());
}

#[test]
fn search_repeats_rows_per_generation_and_specification() {
    let conn = seeded();
    let created = create_car(&conn, &car("Kia", "South Korea", "Rio", "Sedan", "2011", "2017")).unwrap();
    insert_generation(&conn, created.model_id, Some("Rio IV"), Some("2017"), None).unwrap();
    insert_specification(&conn, created.model_id, &NewSpecification::default()).unwrap();

    let filters = SearchFilters::new().with(FilterKey::Brand, "Kia");
    assert_eq!(search(&conn, &filters).unwrap().len(), 4);
}

#[test]
fn distinct_values_with_and_without_nulls() {
    let conn = seeded();
    insert_or_get_mark(&conn, Some("Lada"), None).unwrap();

    let all = distinct_values(&conn, CatalogColumn::MarkCountry, false).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.contains(&None));

    let mut present = distinct_values(&conn, CatalogColumn::MarkCountry, true).unwrap();
    present.sort();
    assert_eq!(
        present,
        vec![Some("Germany".to_string()), Some("Japan".to_string())]
    );
}

#[test]
fn empty_store_yields_empty_lists() {
    let conn = open_memory().unwrap();
    assert!(brand_names(&conn).unwrap().is_empty());
    assert!(list_marks(&conn).unwrap().is_empty());
    assert!(search(&conn, &SearchFilters::new()).unwrap().is_empty());
}

#[test]
fn choice_lists_narrow_by_selection() {
    let conn = seeded();

    let mut brands = brand_names(&conn).unwrap();
    brands.sort();
    assert_eq!(brands, vec!["BMW", "Toyota"]);
    assert_eq!(countries_for_brand(&conn, Some("BMW")).unwrap(), vec!["Germany"]);
    assert_eq!(countries_for_brand(&conn, None).unwrap().len(), 2);
    assert_eq!(
        models_for_brand(&conn, Some("Toyota")).unwrap(),
        vec!["Camry", "Corolla"]
    );
    assert_eq!(models_for_brand(&conn, Some(" ")).unwrap().len(), 3);
    assert_eq!(
        body_types_for_model(&conn, Some("Corolla")).unwrap(),
        vec!["Hatchback"]
    );
    assert_eq!(classes_for_model(&conn, Some("X5")).unwrap(), vec!["D"]);
    assert!(classes_for_model(&conn, Some("Nope")).unwrap().is_empty());
}

#[test]
fn record_browsing_follows_the_hierarchy() {
    let conn = seeded();

    let marks = list_marks(&conn).unwrap();
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].label.as_deref(), Some("Toyota"));

    let models = models_for_mark(&conn, marks[0].id).unwrap();
    let names: Vec<_> = models.iter().filter_map(|m| m.label.as_deref()).collect();
    assert_eq!(names, vec!["Camry", "Corolla"]);

    let generations = generations_for_model(&conn, models[1].id).unwrap();
    assert_eq!(generations.len(), 1);
    assert_eq!(generations[0].label.as_deref(), Some("Corolla I"));

    let specs = specifications_for_model(&conn, models[1].id).unwrap();
    assert_eq!(specs.len(), 1);
    assert_eq!(specs[0].label.as_deref(), Some("Petrol"));

    assert!(models_for_mark(&conn, 999).unwrap().is_empty());
}

#[test]
fn find_specification_reads_every_column() {
    let conn = seeded();
    let created = create_car(&conn, &car("Audi", "Germany", "A4", "Sedan", "2015", "2020")).unwrap();

    let spec = find_specification(&conn, created.specification_id)
        .unwrap()
        .unwrap();
    assert_eq!(spec.id, created.specification_id);
    assert_eq!(spec.model_id, Some(created.model_id));
    assert_eq!(spec.engine_type.as_deref(), Some("Petrol"));
    assert_eq!(spec.consumption_mixed.as_deref(), Some("7.5"));
    assert_eq!(spec.price.as_deref(), Some("30000"));

    assert!(find_specification(&conn, 999).unwrap().is_none());
}

#[test]
fn stats_count_every_table() {
    let conn = seeded();
    add_user(&conn, &Sha256Hasher, "Anna", "anna", "secret").unwrap();

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(
        stats,
        CatalogStats {
            marks: 2,
            models: 3,
            generations: 3,
            specifications: 3,
            employees: 1,
        }
    );
}
