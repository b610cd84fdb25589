use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use sql_graphviz::config::ConfigError;
use sql_graphviz::{DriverError, Header, OutputFormat, RenderConfig};
use tracing::Level;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Driver(#[from] DriverError),
}

#[derive(Parser, Debug)]
#[command(name = "sql-graphviz", about = "Render SQL DDL as a Graphviz entity-relationship diagram")]
struct Cli {
    #[arg(help = "SQL file to read, or - for stdin (default)")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,

    #[arg(short, long, help = "Trace parsing to stderr")]
    verbose: bool,

    #[arg(long, help = "Background color of table title rows")]
    title_bgcolor: Option<String>,

    #[arg(long, help = "Background color of column rows")]
    field_bgcolor: Option<String>,

    #[arg(long, help = "Font color of column types")]
    descriptor_color: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = RenderConfig::from_env()?;
    if let Some(color) = cli.title_bgcolor {
        config.title_bgcolor = color;
    }
    if let Some(color) = cli.field_bgcolor {
        config.field_bgcolor = color;
    }
    if let Some(color) = cli.descriptor_color {
        config.descriptor_color = color;
    }

    let (source, input) = read_input(cli.input.as_deref())?;
    tracing::debug!(%source, bytes = input.len(), "read input");

    let output = sql_graphviz::run(&input, &Header::now(source), &config, cli.format)?;
    io::stdout().lock().write_all(output.as_bytes()).map_err(CliError::Write)
}

/// Reads the whole input, returning a display name for the header with it.
fn read_input(path: Option<&Path>) -> Result<(String, String), CliError> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let source = path.display().to_string();
            let input = fs::read_to_string(path).map_err(|source_err| CliError::Read {
                path: source.clone(),
                source: source_err,
            })?;
            Ok((source, input))
        }
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|source| CliError::Read { path: "<stdin>".to_owned(), source })?;
            Ok(("<stdin>".to_owned(), input))
        }
    }
}
