// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{debug, error, info};

use dataflow_cep::core::config::{EngineConfig, LogLevel, OutputFormat};
use dataflow_cep::core::rules::{check_all, render_report, DEFAULT_BASELINE};
use dataflow_cep::core::stream::{
    mapper_for_format, AlertPublisher, CsvSourceMapper, FileSink, SeriesCsvMapper,
};
use dataflow_cep::core::{CepError, CepResult, Consumer};

#[derive(Parser, Debug)]
#[command(name = "dataflow-cep", version, about = "Detect patterns in sensor event streams")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pattern engine over an event CSV and write the alerts
    Analyze {
        #[arg(short = 'i', long = "input-file", alias = "input_file")]
        input_file: PathBuf,

        #[arg(short = 'o', long = "output-file", alias = "output_file")]
        output_file: PathBuf,

        /// TOML or YAML engine configuration
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Alert encoding: text or json
        #[arg(long)]
        format: Option<String>,
    },
    /// Apply the Nelson rules to a timestamp,value series
    Nelson {
        #[arg(short = 'i', long = "input-file", alias = "input_file")]
        input_file: PathBuf,

        #[arg(short = 'o', long = "output-file", alias = "output_file")]
        output_file: PathBuf,

        /// Number of leading points used for the baseline mean and deviation
        #[arg(long, default_value_t = DEFAULT_BASELINE)]
        baseline: usize,
    },
}

/// `RUST_LOG` overrides the configured level; `-v` overrides both.
fn init_logging(level: LogLevel, verbose: u8) {
    let env = env_logger::Env::default().default_filter_or(level.as_str());
    let mut builder = env_logger::Builder::from_env(env);
    if verbose > 0 {
        builder.filter_level(level.as_level_filter());
    }
    // A second init (e.g. on the error path) is harmless.
    let _ = builder.try_init();
}

fn load_config(path: Option<&Path>) -> CepResult<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

fn analyze(
    config: &EngineConfig,
    input_file: &Path,
    output_file: &Path,
) -> CepResult<()> {
    for (key, source) in config.resolved_sources() {
        debug!("config {} from {}", key, source.description());
    }

    let events = CsvSourceMapper::from_config(&config.input).map_file(input_file)?;
    info!("Read {} events from {}", events.len(), input_file.display());

    let mut consumer = Consumer::from_config(config)?;
    consumer.consume_all(events.iter());

    let publisher = AlertPublisher::new(
        Box::new(FileSink::new(output_file)),
        mapper_for_format(config.output.format),
    );
    publisher.publish_all(consumer.alerts())?;
    info!(
        "Wrote {} alerts to {}",
        consumer.alerts().len(),
        output_file.display()
    );
    Ok(())
}

fn nelson(input_file: &Path, output_file: &Path, baseline: usize) -> CepResult<()> {
    if baseline == 0 {
        return Err(CepError::invalid_parameter(
            "baseline must cover at least one point",
            "baseline",
        ));
    }
    let points = SeriesCsvMapper::new().map_file(input_file)?;
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let timestamps: Vec<f64> = points.iter().map(|p| p.timestamp).collect();

    let report = check_all(&values, baseline);
    if let Some(b) = report.baseline {
        info!("Baseline mean {:.4}, std {:.4}", b.mean, b.std);
    }
    std::fs::write(output_file, render_report(&timestamps, &report))?;
    Ok(())
}

fn run(cli: Cli) -> CepResult<()> {
    match cli.command {
        Command::Analyze {
            input_file,
            output_file,
            config,
            format,
        } => {
            let mut engine_config = load_config(config.as_deref())?;
            if cli.verbose > 0 {
                engine_config.set_log_level(engine_config.log_level.raised_by(cli.verbose));
            }
            if let Some(format) = format {
                engine_config.set_output_format(OutputFormat::parse(&format)?);
            }
            init_logging(engine_config.log_level, cli.verbose);
            analyze(&engine_config, &input_file, &output_file)
        }
        Command::Nelson {
            input_file,
            output_file,
            baseline,
        } => {
            init_logging(LogLevel::default().raised_by(cli.verbose), cli.verbose);
            nelson(&input_file, &output_file, baseline)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // The logger may not be initialised yet if configuration failed.
            init_logging(LogLevel::Error, 0);
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
