use std::path::PathBuf;

use car_catalog_db::OperationError;

use crate::CliError;

/// Delete one specification row.
pub(crate) fn run_delete(db: Option<PathBuf>, id: &str) -> Result<(), CliError> {
    let id = super::record_id(id)
        .map_err(|_| CliError::invalid("Please enter a valid Specifications ID."))?;
    let (conn, _) = super::open_catalog(db)?;

    match car_catalog_db::delete_specification(&conn, id) {
        Ok(()) => {
            log::info!("Record with ID {id} was successfully deleted from Specifications.");
            Ok(())
        }
        Err(OperationError::NotFound { .. }) => Err(CliError::other(format!(
            "No record found with ID {id} in Specifications."
        ))),
        Err(e) => Err(e.into()),
    }
}
