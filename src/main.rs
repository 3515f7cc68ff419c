//! stimgen CLI — generate the exhaustive stimulus table, or sample trials.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stimgen::{CsvSink, GeneratorConfig, StimulusGenerator};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "stimgen")]
#[command(version)]
#[command(about = "Paired-lottery stimulus generation for gauge-style gambling experiments")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// RNG seed for sampling mode
    #[arg(long, global = true, default_value_t = 0)]
    seed: u64,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the exhaustive stimulus table (default)
    All {
        /// Output table path
        #[arg(short, long, default_value = CsvSink::DEFAULT_PATH)]
        output: PathBuf,
    },

    /// Sample stimuli under the default category weights and print them
    Sample {
        /// Number of stimuli to sample
        #[arg(short, long, default_value_t = 1)]
        count: usize,

        /// Use the unconstrained sampler instead of the weighted catalog
        #[arg(long)]
        unconstrained: bool,
    },
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::All {
        output: PathBuf::from(CsvSink::DEFAULT_PATH),
    });

    let mut generator = StimulusGenerator::with_seed(GeneratorConfig::default(), cli.seed)
        .context("invalid generator configuration")?;

    match command {
        Commands::All { output } => {
            let mut sink = CsvSink::create(&output)
                .with_context(|| format!("cannot create output table {}", output.display()))?;
            let rows = generator
                .write_all(&mut sink)
                .context("exhaustive generation failed")?;
            info!(rows, output = %output.display(), "wrote stimulus table");
        }
        Commands::Sample {
            count,
            unconstrained,
        } => {
            for _ in 0..count {
                let s = if unconstrained {
                    generator.sample_unconstrained()?
                } else {
                    generator.sample()?
                };
                println!(
                    "left_p={} left_x0={} left_x1={} left_beginning_angle={} \
                     right_p={} right_x0={} right_x1={} right_beginning_angle={}",
                    s.left.p,
                    s.left.x0,
                    s.left.x1,
                    s.left_angle,
                    s.right.p,
                    s.right.x0,
                    s.right.x1,
                    s.right_angle,
                );
            }
        }
    }
    Ok(())
}
