//! ringmark-bench: CLI tool for scoring experiments and diagnostics.
//!
//! Scores a recorded stroke (or the built-in reference logo) with
//! configurable thresholds, printing the full score breakdown. Useful for:
//!
//! - Checking how a captured drawing is rated and why
//! - Tuning ring and arrow thresholds against real strokes
//! - Measuring evaluation time over repeated runs
//! - Rendering the scored scene to SVG for inspection
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin ringmark-bench -- [OPTIONS] [STROKE_JSON]
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use ringmark_scoring::diagnostics::{Clock, EvaluationDiagnostics};
use ringmark_scoring::{
    ArrowConfig, DisplayExtent, RingConfig, ScoringConfig, Session, Stroke, StrokeRecord,
};

/// Default surface size for `--reference` when no size is given.
const DEFAULT_EXTENT: f64 = 600.0;

/// Scoring experimentation and diagnostics for ringmark.
///
/// Scores a stroke record with configurable parameters and prints the
/// per-component breakdown and timing.
#[derive(Parser)]
#[command(name = "ringmark-bench", version)]
struct Cli {
    /// Path to a stroke record (`{"display": {...}, "points": [...]}`).
    #[arg(required_unless_present = "reference", conflicts_with = "reference")]
    stroke_json: Option<PathBuf>,

    /// Score the built-in reference logo instead of a file.
    #[arg(long)]
    reference: bool,

    /// Surface width, overriding the record.
    #[arg(long)]
    width: Option<f64>,

    /// Surface height, overriding the record.
    #[arg(long)]
    height: Option<f64>,

    /// Minimum stroke length to be scored.
    #[arg(long, default_value_t = ScoringConfig::DEFAULT_MIN_POINTS)]
    min_points: usize,

    /// Ring score needed to count the ring as present.
    #[arg(long, default_value_t = RingConfig::DEFAULT_THRESHOLD)]
    ring_threshold: f64,

    /// Arrow score needed to count the arrow as present.
    #[arg(long, default_value_t = ArrowConfig::DEFAULT_THRESHOLD)]
    arrow_threshold: f64,

    /// Full scoring config as a JSON string.
    ///
    /// When provided, the individual threshold flags are ignored.
    /// Missing fields take their default values.
    #[arg(long)]
    config_json: Option<String>,

    /// Write the scored scene as SVG to this file.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of human-readable report.
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Build and validate a [`ScoringConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual threshold flags are ignored.
fn config_from_cli(cli: &Cli) -> Result<ScoringConfig, String> {
    let config = if let Some(ref json) = cli.config_json {
        serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"))?
    } else {
        let mut config = ScoringConfig {
            min_points: cli.min_points,
            ..ScoringConfig::default()
        };
        config.ring.threshold = cli.ring_threshold;
        config.arrow.threshold = cli.arrow_threshold;
        config
    };
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Load the stroke to score and the surface it was drawn on.
fn input_from_cli(cli: &Cli) -> Result<(Stroke, DisplayExtent), String> {
    if cli.reference {
        let display = DisplayExtent::new(
            cli.width.unwrap_or(DEFAULT_EXTENT),
            cli.height.unwrap_or(DEFAULT_EXTENT),
        )
        .map_err(|e| e.to_string())?;
        return Ok((ringmark_scoring::reference_logo(display), display));
    }

    let Some(ref path) = cli.stroke_json else {
        return Err("a stroke record path or --reference is required".to_string());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading {}: {e}", path.display()))?;
    let record =
        StrokeRecord::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))?;
    let display = DisplayExtent::new(
        cli.width.unwrap_or(record.display.width),
        cli.height.unwrap_or(record.display.height),
    )
    .map_err(|e| e.to_string())?;
    Ok((record.stroke(), display))
}

fn init_tracing(verbose: u8) {
    let max_level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: could not install log subscriber: {e}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let (stroke, display) = match input_from_cli(&cli) {
        Ok(input) => input,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let source = cli
        .stroke_json
        .as_ref()
        .map_or_else(|| "reference logo".to_string(), |p| p.display().to_string());
    eprintln!("Stroke: {source} ({} points)", stroke.len());
    eprintln!("Display: {}x{}", display.width, display.height);
    eprintln!("Runs: {}", cli.runs);
    eprintln!();
    tracing::info!(?config, "scoring configuration");

    let mut all_diagnostics = Vec::with_capacity(cli.runs);
    let mut session = Session::default();

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        let (evaluation, diagnostics) = ringmark_scoring::evaluate_with_diagnostics(
            &stroke, display, &config, &StdClock,
        );
        session.record(evaluation.score);

        if cli.json {
            match serde_json::to_string_pretty(&diagnostics) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error serializing diagnostics: {e}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            println!("{}", diagnostics.report());
        }

        // Write SVG on the first run only.
        if run == 0
            && let Some(ref svg_path) = cli.svg
        {
            write_svg(svg_path, &cli, &config, &stroke, display, &evaluation);
        }

        all_diagnostics.push(diagnostics);

        if cli.runs > 1 {
            eprintln!();
        }
    }

    // Print summary when multiple runs.
    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics, session);
    }

    ExitCode::SUCCESS
}

fn write_svg(
    svg_path: &Path,
    cli: &Cli,
    config: &ScoringConfig,
    stroke: &Stroke,
    display: DisplayExtent,
    evaluation: &ringmark_scoring::Evaluation,
) {
    let title = cli
        .stroke_json
        .as_ref()
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
        .unwrap_or("reference");
    let desc = format!("{}/100: {}", evaluation.score, evaluation.message);
    let config_json = serde_json::to_string(config).ok();
    let metadata = ringmark_export::SvgMetadata {
        title: Some(title),
        description: Some(&desc),
        config_json: config_json.as_deref(),
    };
    let scene = ringmark_export::Scene {
        display,
        stroke: stroke.points(),
        show_grid: true,
        show_guide: false,
        result: Some(evaluation),
        session: Session {
            best_score: evaluation.score,
            attempts: 1,
        },
    };
    let svg = ringmark_export::render_scene(&scene, &metadata);
    match std::fs::write(svg_path, &svg) {
        Ok(()) => {
            eprintln!(
                "SVG written to {} ({} bytes)",
                svg_path.display(),
                svg.len(),
            );
        }
        Err(e) => {
            eprintln!("Error writing SVG to {}: {e}", svg_path.display());
        }
    }
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[EvaluationDiagnostics], session: Session) {
    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");
    println!(
        "Best score: {} | Attempts: {}",
        session.best_score, session.attempts
    );
}
