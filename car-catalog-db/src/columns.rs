//! Allow-list of catalog tables and columns.
//!
//! Statements that need a table or column identifier (field edits,
//! distinct-value lookups) only ever take one of these variants, so no
//! caller-supplied text is spliced into SQL.

use std::fmt;

use crate::operations::OperationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTable {
    Marks,
    Models,
    Generations,
    Specifications,
}

impl CatalogTable {
    pub const ALL: [CatalogTable; 4] = [
        Self::Marks,
        Self::Models,
        Self::Generations,
        Self::Specifications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marks => "Marks",
            Self::Models => "Models",
            Self::Generations => "Generations",
            Self::Specifications => "Specifications",
        }
    }

    /// Case-insensitive lookup by table name.
    pub fn parse(name: &str) -> Result<Self, OperationError> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| OperationError::Validation(format!("Unknown table: {name}")))
    }

    pub fn columns(&self) -> impl Iterator<Item = CatalogColumn> + '_ {
        CatalogColumn::ALL.into_iter().filter(move |c| c.table() == *self)
    }
}

impl fmt::Display for CatalogTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every user-visible catalog column. Ids and foreign keys are not listed and
/// therefore cannot be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogColumn {
    MarkName,
    MarkCountry,
    ModelName,
    ModelClass,
    ModelYearFrom,
    ModelYearTo,
    ModelBodyType,
    GenerationName,
    GenerationYearStart,
    GenerationYearStop,
    EngineType,
    HorsePower,
    Transmission,
    Drive,
    Volume,
    ConsumptionMixed,
    MaxSpeed,
    Price,
}

impl CatalogColumn {
    pub const ALL: [CatalogColumn; 18] = [
        Self::MarkName,
        Self::MarkCountry,
        Self::ModelName,
        Self::ModelClass,
        Self::ModelYearFrom,
        Self::ModelYearTo,
        Self::ModelBodyType,
        Self::GenerationName,
        Self::GenerationYearStart,
        Self::GenerationYearStop,
        Self::EngineType,
        Self::HorsePower,
        Self::Transmission,
        Self::Drive,
        Self::Volume,
        Self::ConsumptionMixed,
        Self::MaxSpeed,
        Self::Price,
    ];

    pub fn table(&self) -> CatalogTable {
        match self {
            Self::MarkName | Self::MarkCountry => CatalogTable::Marks,
            Self::ModelName
            | Self::ModelClass
            | Self::ModelYearFrom
            | Self::ModelYearTo
            | Self::ModelBodyType => CatalogTable::Models,
            Self::GenerationName | Self::GenerationYearStart | Self::GenerationYearStop => {
                CatalogTable::Generations
            }
            Self::EngineType
            | Self::HorsePower
            | Self::Transmission
            | Self::Drive
            | Self::Volume
            | Self::ConsumptionMixed
            | Self::MaxSpeed
            | Self::Price => CatalogTable::Specifications,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::MarkName | Self::ModelName | Self::GenerationName => "name",
            Self::MarkCountry => "country",
            Self::ModelClass => "class",
            Self::ModelYearFrom => "year_from",
            Self::ModelYearTo => "year_to",
            Self::ModelBodyType => "body_type",
            Self::GenerationYearStart => "year_start",
            Self::GenerationYearStop => "year_stop",
            Self::EngineType => "engine_type",
            Self::HorsePower => "horse_power",
            Self::Transmission => "transmission",
            Self::Drive => "drive",
            Self::Volume => "volume",
            Self::ConsumptionMixed => "consumption_mixed",
            Self::MaxSpeed => "max_speed",
            Self::Price => "price",
        }
    }

    /// Human-readable label used by the edit and choice views.
    pub fn label(&self) -> &'static str {
        match self {
            Self::MarkName | Self::ModelName | Self::GenerationName => "Name",
            Self::MarkCountry => "Country",
            Self::ModelClass => "Car Class",
            Self::ModelYearFrom | Self::GenerationYearStart => "Start Year",
            Self::ModelYearTo | Self::GenerationYearStop => "End Year",
            Self::ModelBodyType => "Body Type",
            Self::EngineType => "Engine Type",
            Self::HorsePower => "Horse Power (hp)",
            Self::Transmission => "Transmission",
            Self::Drive => "Drive",
            Self::Volume => "Engine Volume",
            Self::ConsumptionMixed => "Fuel Consumption (Mixed)",
            Self::MaxSpeed => "Max Speed",
            Self::Price => "Price",
        }
    }

    /// Resolve a `(table, column)` pair against the allow-list.
    pub fn parse(table: &str, column: &str) -> Result<Self, OperationError> {
        let table = CatalogTable::parse(table)?;
        let column = column.trim();
        table
            .columns()
            .find(|c| c.column().eq_ignore_ascii_case(column))
            .ok_or_else(|| {
                OperationError::Validation(format!("Unknown column {table}.{column}"))
            })
    }

    /// Parse `Table.column` notation.
    pub fn parse_qualified(qualified: &str) -> Result<Self, OperationError> {
        let (table, column) = qualified.split_once('.').ok_or_else(|| {
            OperationError::Validation(format!(
                "Expected Table.column, got '{qualified}'"
            ))
        })?;
        Self::parse(table, column)
    }
}

impl fmt::Display for CatalogColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table(), self.column())
    }
}
