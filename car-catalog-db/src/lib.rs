//! SQLite persistence layer for the automobile catalog.
//!
//! Provides schema creation, the new-car/edit/delete workflows, catalog
//! search and choice-list queries, and the employee credential store,
//! backed by SQLite (via rusqlite with bundled feature).
//!
//! Every operation takes the connection it runs on; open one with
//! [`open_database`] and drop it to close the store.

pub mod columns;
pub mod credentials;
pub mod operations;
pub mod queries;
pub mod schema;

pub use columns::{CatalogColumn, CatalogTable};
pub use credentials::{
    Argon2Hasher, CredentialHasher, Sha256Hasher, add_user, authenticate, find_employee,
    hasher_for,
};
pub use operations::{
    CreatedCar, FieldEdit, OperationError, create_car, delete_specification, find_mark_by_name,
    insert_generation, insert_model, insert_or_get_mark, insert_specification, update_field,
    update_fields,
};
pub use queries::{
    CatalogStats, body_types_for_model, brand_names, build_search_query, catalog_stats,
    classes_for_model, countries_for_brand, distinct_values, find_specification,
    generations_for_model, list_marks, models_for_brand, models_for_mark, search,
    specifications_for_model,
};
pub use schema::{SchemaError, open_database, open_memory};
