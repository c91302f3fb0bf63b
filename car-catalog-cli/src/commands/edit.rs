use std::path::PathBuf;

use car_catalog_db::{CatalogColumn, CatalogTable, FieldEdit};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;
use crate::cli_types::EditArgs;

/// Parse `Table.column=value` edits and apply them together.
pub(crate) fn run_edit(db: Option<PathBuf>, args: EditArgs) -> Result<(), CliError> {
    let edits = parse_edits(&args)?;
    let (conn, _) = super::open_catalog(db)?;

    let applied = car_catalog_db::update_fields(&conn, &edits)?;
    if applied == 0 {
        log::warn!("All values were empty; nothing was changed.");
        return Ok(());
    }

    log::info!(
        "{} Data successfully updated ({} field(s)).",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        applied,
    );
    Ok(())
}

fn parse_edits(args: &EditArgs) -> Result<Vec<FieldEdit>, CliError> {
    args.sets
        .iter()
        .map(|set| -> Result<FieldEdit, CliError> {
            let (target, value) = set.split_once('=').ok_or_else(|| {
                CliError::invalid(format!("Expected Table.column=value, got '{set}'"))
            })?;
            let column = CatalogColumn::parse_qualified(target)?;
            let id = target_id(args, column.table())?;
            Ok(FieldEdit::new(column, value, id))
        })
        .collect()
}

fn target_id(args: &EditArgs, table: CatalogTable) -> Result<i64, CliError> {
    let (raw, flag) = match table {
        CatalogTable::Marks => (&args.mark, "--mark"),
        CatalogTable::Models => (&args.model, "--model"),
        CatalogTable::Generations => (&args.generation, "--generation"),
        CatalogTable::Specifications => (&args.specification, "--specification"),
    };
    let raw = raw
        .as_deref()
        .ok_or_else(|| CliError::invalid(format!("Editing {table} requires {flag} <ID>")))?;
    super::record_id(raw)
}
