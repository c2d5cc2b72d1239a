use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tabplot::constants::{DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use tabplot::data::{LineChart, ParamValue, ParameterSchema, Params};
use tabplot::settings::AppSettings;
use tabplot::workbench::ChartWorkbench;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tabplot")]
#[command(about = "Plot a line chart from a file or database table")]
#[command(version)]
struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Chart history database, overriding the settings file
    #[arg(long, global = true)]
    history: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the parameters a source needs
    Fields {
        /// File path or database dialect (postgresql, mysql, mariadb)
        source: String,
    },
    /// List the database engines that can be used as a source
    Databases,
    /// Read a source and plot two of its columns
    Plot {
        source: String,

        /// Parameter as key=value; repeat for each field
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Write the chart as SVG here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List saved charts
    History,
    /// Regenerate a saved chart
    Replot {
        id: i64,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut settings = match &cli.settings {
        Some(path) => AppSettings::load_from(path)?,
        None => AppSettings::load()?,
    };
    if let Some(history) = cli.history {
        settings.history_path = Some(history);
    }

    let bench = ChartWorkbench::from_settings(&settings).context("opening chart history")?;

    match cli.command {
        Commands::Fields { source } => {
            let session = bench.begin(&source)?;
            println!("{} source", session.display_name());
            for field in session.schema().fields() {
                println!("{:<14} {:<8} {}", field.name, field.kind, field.label);
            }
        }
        Commands::Databases => {
            for entry in bench.manager().reader_registry().database_readers() {
                println!("{:<12} {}", entry.key, entry.display_name);
            }
        }
        Commands::Plot {
            source,
            params,
            output,
        } => {
            let mut session = bench.begin(&source)?;
            let values = parse_params(&params, session.schema())?;
            let (record, chart) = bench.submit(&mut session, values)?;
            println!("Saved chart #{} ({} points)", record.id, chart.points.len());
            emit(&chart, output.as_deref())?;
        }
        Commands::History => {
            for entry in bench.history()? {
                println!("{:>4}  {}", entry.id, entry.label);
            }
        }
        Commands::Replot { id, output } => {
            let chart = bench.regenerate(id)?;
            emit(&chart, output.as_deref())?;
        }
    }

    Ok(())
}

/// Turn `key=value` arguments into typed values using the schema kinds
fn parse_params(raw: &[String], schema: &ParameterSchema) -> Result<Params> {
    let mut params = Params::new();
    for item in raw {
        let Some((key, value)) = item.split_once('=') else {
            bail!("expected key=value, got \"{}\"", item);
        };
        let key = key.trim();
        let value = match schema.field(key) {
            Some(field) => ParamValue::from_input(value, field.kind),
            None => ParamValue::from(value),
        };
        params.insert(key, value);
    }
    Ok(params)
}

fn emit(chart: &LineChart, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, chart.to_svg(DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT))
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        None => {
            for point in &chart.points {
                println!("{}\t{}", point.label, point.value);
            }
        }
    }
    Ok(())
}
