use std::path::PathBuf;

use car_catalog_core::{NewCar, NewGeneration, NewMark, NewModel, NewSpecification};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::AddArgs;

impl From<AddArgs> for NewCar {
    fn from(a: AddArgs) -> Self {
        NewCar {
            mark: NewMark {
                name: a.brand,
                country: a.country,
            },
            model: NewModel {
                name: a.model,
                class: a.class,
                year_from: a.year_from,
                year_to: a.year_to,
                body_type: a.body_type,
            },
            generation: NewGeneration {
                name: a.generation,
                year_start: a.year_start,
                year_stop: a.year_stop,
            },
            specification: NewSpecification {
                engine_type: a.engine_type,
                horse_power: a.horse_power,
                transmission: a.transmission,
                drive: a.drive,
                volume: a.volume,
                consumption_mixed: a.consumption_mixed,
                max_speed: a.max_speed,
                price: a.price,
            },
        }
    }
}

/// Add one car through the new-car workflow.
pub(crate) fn run_add(db: Option<PathBuf>, args: AddArgs) -> Result<(), CliError> {
    let car = NewCar::from(args);
    let (conn, _) = super::open_catalog(db)?;
    let created = car_catalog_db::create_car(&conn, &car)?;

    log::info!(
        "{} Car successfully added.",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    let mark_note = if created.mark_created { "new" } else { "existing" };
    log::info!("  Mark:           {:>6} ({})", created.mark_id, mark_note);
    log::info!("  Model:          {:>6}", created.model_id);
    log::info!("  Generation:     {:>6}", created.generation_id);
    log::info!("  Specification:  {:>6}", created.specification_id);
    Ok(())
}
