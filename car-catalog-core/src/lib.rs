//! Automobile catalog data model types, source documents, and settings.
//!
//! This crate defines the catalog data model without any database
//! dependencies. Consumers pass these types to `car-catalog-db` for
//! persistence and to `car-catalog-import` for bulk loading.

pub mod document;
pub mod settings;
pub mod types;

pub use document::{
    DocumentError, SourceBrand, SourceConfiguration, SourceGeneration, SourceModel,
    SourceModification, SourceSpecifications, SourceValue, load_document, parse_json, parse_yaml,
};
pub use settings::{HasherKind, Settings, SettingsError, load_settings, resolve_db_path};
pub use types::*;
