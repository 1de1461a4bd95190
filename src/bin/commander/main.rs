mod cli;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use log::info;

use commander::load_config;
use commander::report::Printer;
use commander::runner::Runner;
use commander::selectors::select_projects;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = cli::Cli::parse();

    let log_file = cli
        .log_file
        .as_ref()
        .map(std::fs::File::create)
        .transpose()?;
    commander::logger::init(log_file)?;

    let (projects, config_path) = load_config(cli.config.as_deref())?;
    info!(
        "Loaded {} projects from {}",
        projects.len(),
        config_path.display()
    );

    let selected = select_projects(projects, &cli.filter_spec());
    let printer = Printer::detect();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list {
        printer.listing(&mut out, &selected)?;
        out.flush()?;
        return Ok(ExitCode::SUCCESS);
    }

    let runner = Runner::new(&cli.command, printer);
    let report = runner.run(&selected, &mut out)?;
    runner.print_summary(&report, &mut out)?;

    if let Some(message) = report.failure_message() {
        eprintln!("{message}");
    }
    Ok(ExitCode::from(report.exit_code()))
}
