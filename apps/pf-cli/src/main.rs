use clap::{Parser, Subcommand, ValueEnum};
use pf_analysis::{AnalysisConfig, PhaseEstimator};
use pf_app::{AnalysisReport, AppResult, SignalFile, signal_service};
use pf_signals::SampleConfig;
use pf_signals::synth::demo_set;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pf-cli")]
#[command(about = "PowerFlow CLI - Three-phase, four-node power analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate signal file syntax and waveform shapes
    Validate {
        /// Path to the signal file (.yaml, .yml or .json)
        signal_path: PathBuf,
    },
    /// Analyze a signal file
    Analyze {
        /// Path to the signal file (.yaml, .yml or .json)
        signal_path: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Phase angle estimator
        #[arg(long, value_enum, default_value_t = Estimator::Peak)]
        estimator: Estimator,
    },
    /// Analyze a synthetic balanced network
    Demo {
        /// Number of fundamental cycles to generate
        #[arg(long, default_value_t = 2)]
        cycles: usize,
        /// Current lag behind voltage, in degrees
        #[arg(long, default_value_t = 30.0, allow_negative_numbers = true)]
        load_angle: f64,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Phase angle estimator
        #[arg(long, value_enum, default_value_t = Estimator::Peak)]
        estimator: Estimator,
        /// Also write the generated signals to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum Estimator {
    Peak,
    Fundamental,
}

impl From<Estimator> for PhaseEstimator {
    fn from(e: Estimator) -> Self {
        match e {
            Estimator::Peak => PhaseEstimator::PeakOffset,
            Estimator::Fundamental => PhaseEstimator::Fundamental,
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { signal_path } => cmd_validate(&signal_path),
        Commands::Analyze {
            signal_path,
            format,
            estimator,
        } => cmd_analyze(&signal_path, format, estimator.into()),
        Commands::Demo {
            cycles,
            load_angle,
            format,
            estimator,
            output,
        } => cmd_demo(cycles, load_angle, format, estimator.into(), output.as_deref()),
    }
}

fn cmd_validate(signal_path: &Path) -> AppResult<()> {
    println!("Validating signal file: {}", signal_path.display());
    let set = signal_service::load_signal_set(signal_path)?;
    println!("✓ Signal file is valid");
    println!(
        "  {} samples at {} Hz ({} samples/cycle)",
        set.samples(),
        set.sampling().frequency_hz(),
        set.sampling().samples_per_cycle
    );
    Ok(())
}

fn cmd_analyze(
    signal_path: &Path,
    format: OutputFormat,
    estimator: PhaseEstimator,
) -> AppResult<()> {
    let set = signal_service::load_signal_set(signal_path)?;
    let report = pf_app::build_report(
        &set,
        AnalysisConfig::with_estimator(estimator),
        &signal_path.display().to_string(),
    )?;
    print_report(&report, format)
}

fn cmd_demo(
    cycles: usize,
    load_angle: f64,
    format: OutputFormat,
    estimator: PhaseEstimator,
    output: Option<&Path>,
) -> AppResult<()> {
    let set = demo_set(SampleConfig::default(), cycles.max(1), load_angle)?;

    if let Some(path) = output {
        signal_service::save_signal_file(path, &SignalFile::from_signal_set(&set))?;
        eprintln!("✓ Demo signals written to {}", path.display());
    }

    let report = pf_app::build_report(&set, AnalysisConfig::with_estimator(estimator), "demo")?;
    print_report(&report, format)
}

fn print_report(report: &AnalysisReport, format: OutputFormat) -> AppResult<()> {
    match format {
        OutputFormat::Text => print!("{}", pf_app::render_text(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn demo_accepts_negative_load_angle() {
        let cli = Cli::try_parse_from([
            "pf-cli",
            "demo",
            "--load-angle",
            "-15",
            "--estimator",
            "fundamental",
        ])
        .unwrap();
        let Commands::Demo {
            cycles,
            load_angle,
            estimator,
            output,
            ..
        } = cli.command
        else {
            panic!("expected demo");
        };
        assert_eq!(cycles, 2);
        assert_eq!(load_angle, -15.0);
        assert_eq!(PhaseEstimator::from(estimator), PhaseEstimator::Fundamental);
        assert!(output.is_none());
    }
}
