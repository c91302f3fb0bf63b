use std::path::PathBuf;

use car_catalog_core::RecordChoice;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::RecordsAction;

/// Browse marks, models, generations and specifications by id.
pub(crate) fn run_records(db: Option<PathBuf>, level: RecordsAction) -> Result<(), CliError> {
    let (conn, _) = super::open_catalog(db)?;

    let (heading, records) = match level {
        RecordsAction::Marks => ("Marks".to_string(), car_catalog_db::list_marks(&conn)?),
        RecordsAction::Models { mark_id } => {
            let id = super::record_id(&mark_id)?;
            (
                format!("Models of mark {id}"),
                car_catalog_db::models_for_mark(&conn, id)?,
            )
        }
        RecordsAction::Generations { model_id } => {
            let id = super::record_id(&model_id)?;
            (
                format!("Generations of model {id}"),
                car_catalog_db::generations_for_model(&conn, id)?,
            )
        }
        RecordsAction::Specifications { model_id } => {
            let id = super::record_id(&model_id)?;
            (
                format!("Specifications of model {id}"),
                car_catalog_db::specifications_for_model(&conn, id)?,
            )
        }
        RecordsAction::Show { id } => return show_specification(&conn, &id),
    };

    print_records(&heading, &records);
    Ok(())
}

fn print_records(heading: &str, records: &[RecordChoice]) {
    log::info!("{}", heading.if_supports_color(Stdout, |t| t.bold()));
    if records.is_empty() {
        log::info!("  (none)");
        return;
    }
    for record in records {
        log::info!("  {:>6}  {}", record.id, super::show(record.label.as_deref()));
    }
}

fn show_specification(conn: &rusqlite::Connection, id: &str) -> Result<(), CliError> {
    let id = super::record_id(id)?;
    let Some(spec) = car_catalog_db::find_specification(conn, id)? else {
        return Err(CliError::other(format!(
            "No record found with ID {id} in Specifications."
        )));
    };

    log::info!(
        "{}",
        format!("Specification {}", spec.id).if_supports_color(Stdout, |t| t.bold()),
    );
    let model = spec.model_id.map(|m| m.to_string());
    let fields = [
        ("Model id", model.as_deref()),
        ("Engine Type", spec.engine_type.as_deref()),
        ("Horse Power (hp)", spec.horse_power.as_deref()),
        ("Transmission", spec.transmission.as_deref()),
        ("Drive", spec.drive.as_deref()),
        ("Engine Volume", spec.volume.as_deref()),
        ("Fuel Consumption (Mixed)", spec.consumption_mixed.as_deref()),
        ("Max Speed", spec.max_speed.as_deref()),
        ("Price", spec.price.as_deref()),
    ];
    for (label, value) in fields {
        log::info!("  {:<26}{}", label, super::show(value));
    }
    Ok(())
}
