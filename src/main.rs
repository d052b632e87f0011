use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::process::ExitCode;

use clap::Parser;
use himeno_rust::config::BenchConfig;
use himeno_rust::harness::Harness;
use himeno_rust::init::PoissonFields;
use himeno_rust::preset::GridSize;
use himeno_rust::report::Dimensions;
use himeno_rust::{HimenoError, Strategy};
use tracing::info;

/// Himeno benchmark: MFLOPS of a point-Jacobi Poisson solver on a 3D grid
#[derive(Parser, Debug)]
#[command(name = "himeno")]
#[command(version)]
struct Args {
    /// Grid size: XS, S, M, L or XL (any case). Prompted on stdin when omitted.
    size: Option<String>,

    /// Worker threads (default: one per logical CPU)
    #[arg(short, long)]
    threads: Option<NonZeroUsize>,

    /// Kernel implementation
    #[arg(short, long, value_enum, default_value_t = Strategy::Parallel)]
    strategy: Strategy,

    /// Wall-clock seconds the measured run should take
    #[arg(long, default_value_t = himeno_rust::config::TARGET_SECS)]
    target_secs: f64,

    /// Sweeps in the rehearsal run used for calibration
    #[arg(long, default_value = "3")]
    rehearsal: NonZeroUsize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e, &mut io::stderr());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(args: Args) -> Result<(), HimenoError> {
    let grid = match args.size.as_deref() {
        Some(token) => token.parse()?,
        None => GridSize::prompt_stdin()?,
    };

    let config = BenchConfig {
        grid,
        strategy: args.strategy,
        threads: args.threads,
        target_secs: args.target_secs,
        rehearsal_iterations: args.rehearsal,
    };
    config.validate()?;
    config.install_thread_pool()?;

    println!("{}", Dimensions(grid));

    let mut fields = PoissonFields::standard(grid.dims())?;
    info!(grid = %grid, "fields initialized");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = Harness::new(&config, &mut fields).run(&mut out)?;

    info!(score = report.score(), mflops = report.measured.mflops, "done");
    Ok(())
}

/// Writes the error once to `out`; the exit status comes from
/// [`HimenoError::exit_code`].
fn report_failure<W: Write>(err: &HimenoError, out: &mut W) {
    // stderr に書けなければ何もできない
    let _ = writeln!(out, "{err}");
}
