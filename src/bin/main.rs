use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use poam_jira_import::Converter;

/// Translate an overdue POAMs spreadsheet into a Jira import CSV
#[derive(Debug, Parser)]
#[clap(version)]
struct Args {
    /// Path to the POAM spreadsheet (.xlsx)
    #[clap(long)]
    file: std::path::PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(output) => {
            println!("Jira import file created: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(error) => {
            // one line, no backtrace
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<std::path::PathBuf> {
    let output = Converter::new().convert(&args.file)?;

    Ok(output)
}
