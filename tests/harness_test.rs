use std::num::NonZeroUsize;

use himeno_rust::config::BenchConfig;
use himeno_rust::harness::{extrapolate, mflops, Harness};
use himeno_rust::implementations::{flop, Strategy};
use himeno_rust::init::PoissonFields;
use himeno_rust::preset::GridSize;

#[test]
fn test_xs_rehearsal_end_to_end() {
    let config = BenchConfig::new(GridSize::XS);
    let mut fields = PoissonFields::standard(GridSize::XS.dims()).unwrap();
    let mut harness = Harness::new(&config, &mut fields);

    let m = harness.rehearse().unwrap();

    assert_eq!(m.iterations, 3);
    assert!(m.residual.is_finite() && m.residual >= 0.0, "residual {}", m.residual);
    assert!(m.seconds > 0.0);

    let expected = flop(32, 32, 64) / m.seconds * 1.0e-6 * 3.0;
    assert!((m.mflops - expected).abs() <= expected * 1e-12);
    assert_eq!(m.mflops, mflops(3, m.seconds, flop(32, 32, 64)));
}

#[test]
fn test_first_sweep_residual_from_row_profile() {
    // P = i^2/(rows-1)^2 with unit coefficients gives ss = 1/(3*(rows-1)^2)
    // in every interior cell.
    let mut fields = PoissonFields::standard(GridSize::XS.dims()).unwrap();
    let gosa = fields.jacobi(Strategy::Single, 1).unwrap();

    let ss = 1.0 / (3.0 * 31.0 * 31.0);
    let expected = 30.0 * 30.0 * 62.0 * ss * ss;
    assert!((gosa - expected).abs() < expected * 1e-2, "gosa {gosa} vs {expected}");
}

#[test]
fn test_calibrated_run_reports_every_phase() {
    let config = BenchConfig {
        target_secs: 0.05,
        strategy: Strategy::ParallelUnsafe,
        ..BenchConfig::new(GridSize::XS)
    };
    let mut fields = PoissonFields::standard(GridSize::XS.dims()).unwrap();

    let mut out = Vec::new();
    let report = Harness::new(&config, &mut fields).run(&mut out).unwrap();

    assert_eq!(report.grid, GridSize::XS);
    assert_eq!(report.rehearsal.iterations, 3);
    assert_eq!(
        report.measured.iterations,
        extrapolate(config.target_secs, &report.rehearsal).unwrap()
    );
    assert!(report.measured.residual.is_finite());

    let text = String::from_utf8(out).unwrap();
    let rehearsal_at = text.find(" MFLOPS: ").unwrap();
    let plan_at = text.find(" The loop will be executed in ").unwrap();
    let final_at = text.find(" Loop executed for ").unwrap();
    let score_at = text.find(" Score based on Pentium III").unwrap();
    assert!(rehearsal_at < plan_at && plan_at < final_at && final_at < score_at);
}

#[test]
fn test_rehearsal_count_is_configurable() {
    let config = BenchConfig {
        rehearsal_iterations: NonZeroUsize::new(2).unwrap(),
        strategy: Strategy::Single,
        ..BenchConfig::new(GridSize::XS)
    };
    let mut fields = PoissonFields::standard(GridSize::XS.dims()).unwrap();
    let m = Harness::new(&config, &mut fields).rehearse().unwrap();
    assert_eq!(m.iterations, 2);
}
