use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use salary_calculator::config::{ConfigLoader, RateTable};
use salary_calculator::form::{AppState, ConsoleForm, FormSession};
use salary_calculator::storage::{DEFAULT_SPREADSHEET_PATH, SpreadsheetSink};
use salary_calculator::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "salary-calculator",
    about = "Calculate monthly salaries and record them in a spreadsheet",
    version
)]
struct Cli {
    /// Spreadsheet that records are appended to
    #[arg(long, default_value = DEFAULT_SPREADSHEET_PATH)]
    output: PathBuf,
    /// YAML rate table to use instead of the built-in rates
    #[arg(long)]
    rates: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(telemetry::DEFAULT_LOG_LEVEL)?;

    let rates = match &cli.rates {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("loading rate table from {}", path.display()))?
            .into_table(),
        None => RateTable::default(),
    };

    let state = AppState::new(rates, SpreadsheetSink::new(cli.output));
    let mut session = FormSession::new(state);
    let mut form = ConsoleForm::new(io::stdin().lock(), io::stdout());

    let saved = session.run(&mut form).context("console form failed")?;
    info!(saved, "Salary calculator closed");
    Ok(())
}
