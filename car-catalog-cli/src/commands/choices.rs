use std::path::PathBuf;

use car_catalog_core::FilterKey;

use crate::CliError;

/// Print the values offered for one search input, narrowed by the current
/// brand or model selection.
pub(crate) fn run_choices(
    db: Option<PathBuf>,
    field: FilterKey,
    brand: Option<&str>,
    model: Option<&str>,
) -> Result<(), CliError> {
    let (conn, _) = super::open_catalog(db)?;

    let values = match field {
        FilterKey::Brand => car_catalog_db::brand_names(&conn)?,
        FilterKey::Country => car_catalog_db::countries_for_brand(&conn, brand)?,
        FilterKey::Model => car_catalog_db::models_for_brand(&conn, brand)?,
        FilterKey::Class => car_catalog_db::classes_for_model(&conn, model)?,
        FilterKey::BodyType => car_catalog_db::body_types_for_model(&conn, model)?,
        FilterKey::YearFrom | FilterKey::YearTo => {
            return Err(CliError::invalid(format!(
                "{field} is entered freely and has no choice list"
            )));
        }
    };

    if values.is_empty() {
        log::warn!("No values found for {field}");
    }
    for value in values {
        log::info!("{value}");
    }
    Ok(())
}
