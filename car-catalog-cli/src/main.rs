//! car-catalog CLI
//!
//! Command-line front end for searching and maintaining the automobile
//! catalog database.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction, UserAction};
pub(crate) use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let db = cli.db;
    match cli.command {
        Commands::Login { login, password } => commands::login::run_login(db, &login, password),
        Commands::User { action } => match action {
            UserAction::Add {
                name,
                login,
                password,
            } => commands::user::run_user_add(db, &name, &login, password),
        },
        Commands::Load { file, price } => commands::load::run_load(db, &file, price),
        Commands::Search { filters } => commands::search::run_search(db, filters),
        Commands::Choices {
            field,
            brand,
            model,
        } => commands::choices::run_choices(db, field, brand.as_deref(), model.as_deref()),
        Commands::Records { level } => commands::records::run_records(db, level),
        Commands::Add(args) => commands::add::run_add(db, args),
        Commands::Edit(args) => commands::edit::run_edit(db, args),
        Commands::Delete { id } => commands::delete::run_delete(db, &id),
        Commands::Stats => commands::stats::run_stats(db),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(db),
            ConfigAction::Path => commands::config::run_config_path(),
            ConfigAction::SetDb { path } => commands::config::run_config_set_db(path),
        },
    }
}

/// Route `log` output to stdout. Normal runs print bare messages at info
/// level; `--verbose` switches to the timestamped default format at debug.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stdout);
    if !verbose {
        builder.format(|buf, record| match record.level() {
            log::Level::Error | log::Level::Warn => {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
            _ => writeln!(buf, "{}", record.args()),
        });
    }
    builder.init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
