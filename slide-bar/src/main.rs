use clap::Parser;
use tracing::Level;

use slide_bar::cli::Cli;
use slide_bar::{slide_bar_graph, Table};

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => Level::WARN,
        (false, 0) => Level::INFO,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();
}

fn run(cli: &Cli) -> slide_bar::Result<()> {
    let table = Table::read_csv(&cli.input)?;
    let table = match &cli.columns {
        Some(columns) => table.select(columns.as_slice())?,
        None => table,
    };
    let options = cli.to_options()?;
    slide_bar_graph(&table, &options)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
