//! Data model types for the automobile catalog.
//!
//! Rows read back from the store carry their values as display text: the
//! new-car and edit workflows accept free text for every column, so a numeric
//! column may legitimately hold a string.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ── Stored Rows ─────────────────────────────────────────────────────────────

/// A `(id, label)` pair used to populate record pickers (edit cascade).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordChoice {
    pub id: i64,
    pub label: Option<String>,
}

/// A full Specifications row.
#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    pub id: i64,
    pub engine_type: Option<String>,
    pub horse_power: Option<String>,
    pub transmission: Option<String>,
    pub drive: Option<String>,
    pub volume: Option<String>,
    pub consumption_mixed: Option<String>,
    pub max_speed: Option<String>,
    pub price: Option<String>,
    pub model_id: Option<i64>,
}

/// An Employees row. The hash is opaque to everything but the hasher that made it.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub login: String,
    pub password_hash: String,
}

// ── New-Car Input ───────────────────────────────────────────────────────────

/// Everything the new-car workflow inserts in one unit of work.
///
/// Only `mark.name` and `model.name` are required. Every other field is free
/// text and is stored without type checking; blank values become NULL.
#[derive(Debug, Clone, Default)]
pub struct NewCar {
    pub mark: NewMark,
    pub model: NewModel,
    pub generation: NewGeneration,
    pub specification: NewSpecification,
}

#[derive(Debug, Clone, Default)]
pub struct NewMark {
    pub name: String,
    /// Ignored when a mark with the same name already exists.
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewModel {
    pub name: String,
    pub class: Option<String>,
    pub year_from: Option<String>,
    pub year_to: Option<String>,
    pub body_type: Option<String>,
}

/// Styling block of the new-car form. Always inserted, even when empty.
#[derive(Debug, Clone, Default)]
pub struct NewGeneration {
    pub name: Option<String>,
    pub year_start: Option<String>,
    pub year_stop: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewSpecification {
    pub engine_type: Option<String>,
    pub horse_power: Option<String>,
    pub transmission: Option<String>,
    pub drive: Option<String>,
    pub volume: Option<String>,
    pub consumption_mixed: Option<String>,
    pub max_speed: Option<String>,
    pub price: Option<String>,
}

/// Returns the value unless it is missing or whitespace-only.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

// ── Search ──────────────────────────────────────────────────────────────────

/// The recognized search filter keys, in the order their clauses are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Brand,
    Model,
    Country,
    Class,
    BodyType,
    YearFrom,
    YearTo,
}

impl FilterKey {
    pub const ALL: [FilterKey; 7] = [
        Self::Brand,
        Self::Model,
        Self::Country,
        Self::Class,
        Self::BodyType,
        Self::YearFrom,
        Self::YearTo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Model => "model",
            Self::Country => "country",
            Self::Class => "class",
            Self::BodyType => "body_type",
            Self::YearFrom => "year_from",
            Self::YearTo => "year_to",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown search filter: {0}")]
pub struct UnknownFilterKey(pub String);

impl FromStr for FilterKey {
    type Err = UnknownFilterKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "brand" | "mark" => Ok(Self::Brand),
            "model" => Ok(Self::Model),
            "country" => Ok(Self::Country),
            "class" => Ok(Self::Class),
            "body_type" => Ok(Self::BodyType),
            "year_from" => Ok(Self::YearFrom),
            "year_to" => Ok(Self::YearTo),
            _ => Err(UnknownFilterKey(s.to_string())),
        }
    }
}

/// Optional constraints for a catalog search. Absent and blank values are
/// left out of the query entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub country: Option<String>,
    pub class: Option<String>,
    pub body_type: Option<String>,
    /// Lower bound on the generation's start year.
    pub year_from: Option<String>,
    /// Upper bound on the generation's stop year.
    pub year_to: Option<String>,
}

impl SearchFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build filters from `(key, value)` pairs. Later pairs overwrite earlier ones.
    pub fn from_pairs<K, V, I>(pairs: I) -> Result<Self, UnknownFilterKey>
    where
        K: AsRef<str>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            let key: FilterKey = key.as_ref().parse()?;
            filters.set(key, value);
        }
        Ok(filters)
    }

    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        *self.slot_mut(key) = Some(value.into());
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        let slot = match key {
            FilterKey::Brand => &self.brand,
            FilterKey::Model => &self.model,
            FilterKey::Country => &self.country,
            FilterKey::Class => &self.class,
            FilterKey::BodyType => &self.body_type,
            FilterKey::YearFrom => &self.year_from,
            FilterKey::YearTo => &self.year_to,
        };
        non_blank(slot).map(str::trim)
    }

    /// Non-blank filters in clause order.
    pub fn active(&self) -> Vec<(FilterKey, &str)> {
        FilterKey::ALL
            .iter()
            .filter_map(|&key| self.get(key).map(|v| (key, v)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    fn slot_mut(&mut self, key: FilterKey) -> &mut Option<String> {
        match key {
            FilterKey::Brand => &mut self.brand,
            FilterKey::Model => &mut self.model,
            FilterKey::Country => &mut self.country,
            FilterKey::Class => &mut self.class,
            FilterKey::BodyType => &mut self.body_type,
            FilterKey::YearFrom => &mut self.year_from,
            FilterKey::YearTo => &mut self.year_to,
        }
    }
}

/// Number of fields in a [`SearchRow`].
pub const SEARCH_ROW_LEN: usize = 17;

/// One joined Marks ⋈ Models ⋈ Generations ⋈ Specifications result.
///
/// Field order is a contract with every detail view: views index into
/// [`SearchRow::fields`] positionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRow {
    pub mark_name: Option<String>,
    pub country: Option<String>,
    pub model_name: Option<String>,
    pub class: Option<String>,
    pub year_from: Option<String>,
    pub year_to: Option<String>,
    pub body_type: Option<String>,
    pub generation_name: Option<String>,
    pub generation_year_start: Option<String>,
    pub generation_year_stop: Option<String>,
    pub engine_type: Option<String>,
    pub horse_power: Option<String>,
    pub transmission: Option<String>,
    pub drive: Option<String>,
    pub volume: Option<String>,
    pub consumption_mixed: Option<String>,
    pub max_speed: Option<String>,
}

impl SearchRow {
    /// Detail-view labels, index-aligned with [`SearchRow::fields`].
    pub const LABELS: [&'static str; SEARCH_ROW_LEN] = [
        "Brand",
        "Country",
        "Model",
        "Class",
        "Start Year",
        "End Year",
        "Body Type",
        "Generation",
        "Production Start Year",
        "Production End Year",
        "Engine",
        "Horsepower",
        "Transmission",
        "Drive Type",
        "Engine Volume",
        "Fuel Consumption (per 100km)",
        "Max Speed",
    ];

    pub fn from_fields(fields: [Option<String>; SEARCH_ROW_LEN]) -> Self {
        let [
            mark_name,
            country,
            model_name,
            class,
            year_from,
            year_to,
            body_type,
            generation_name,
            generation_year_start,
            generation_year_stop,
            engine_type,
            horse_power,
            transmission,
            drive,
            volume,
            consumption_mixed,
            max_speed,
        ] = fields;
        Self {
            mark_name,
            country,
            model_name,
            class,
            year_from,
            year_to,
            body_type,
            generation_name,
            generation_year_start,
            generation_year_stop,
            engine_type,
            horse_power,
            transmission,
            drive,
            volume,
            consumption_mixed,
            max_speed,
        }
    }

    pub fn fields(&self) -> [Option<&str>; SEARCH_ROW_LEN] {
        [
            self.mark_name.as_deref(),
            self.country.as_deref(),
            self.model_name.as_deref(),
            self.class.as_deref(),
            self.year_from.as_deref(),
            self.year_to.as_deref(),
            self.body_type.as_deref(),
            self.generation_name.as_deref(),
            self.generation_year_start.as_deref(),
            self.generation_year_stop.as_deref(),
            self.engine_type.as_deref(),
            self.horse_power.as_deref(),
            self.transmission.as_deref(),
            self.drive.as_deref(),
            self.volume.as_deref(),
            self.consumption_mixed.as_deref(),
            self.max_speed.as_deref(),
        ]
    }
}

// ── Record IDs ──────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid record id '{0}': expected digits")]
pub struct InvalidRecordId(pub String);

/// Parse a user-entered record id. Surrounding whitespace is ignored; anything
/// other than ASCII digits is rejected.
pub fn parse_record_id(input: &str) -> Result<i64, InvalidRecordId> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidRecordId(input.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| InvalidRecordId(input.to_string()))
}
