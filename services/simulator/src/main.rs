use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::errors::ServiceError;

use simulator::config::Config;
use simulator::scenarios::{run_scenario, sample_tins, verify_scenario, RunReport};
use simulator::{telemetry, BeanSupply, ReductionEngine};

fn main() -> Result<()> {
    // Load configuration before logging so LOG_FORMAT can come from .env
    let config = Config::load()?;
    telemetry::init_logging(config.output.log_json);

    tracing::info!(
        service = "simulator",
        version = env!("CARGO_PKG_VERSION"),
        log_format = if config.output.log_json { "json" } else { "text" },
        "Starting coffee tin simulator"
    );

    let metrics_handle = if config.output.metrics_summary {
        Some(telemetry::install_metrics_recorder()?)
    } else {
        None
    };

    // Always run from a concrete seed so a surprising run can be replayed
    let seed = config
        .simulation
        .seed
        .unwrap_or_else(|| rand::thread_rng().gen());
    tracing::info!(
        seed,
        supply_capacity = config.simulation.supply_capacity,
        sampling_mode = %config.simulation.sampling_mode,
        verify_trials = config.simulation.verify_trials,
        "Configuration loaded"
    );

    let supply = BeanSupply::with_capacity(config.simulation.supply_capacity)?;
    let mut engine = ReductionEngine::new(supply, StdRng::seed_from_u64(seed))
        .with_sampling_mode(config.simulation.sampling_mode);
    let mut report = RunReport::new(
        seed,
        config.simulation.sampling_mode,
        config.simulation.supply_capacity,
    );

    for tin in sample_tins()? {
        let result = run_scenario(&mut engine, tin);
        println!();
        for line in result.display_lines() {
            println!("{}", line);
        }
        report.scenarios.push(result);
    }
    report.supply_left = engine.supply().bean_count();

    if config.simulation.verify_trials > 0 {
        for tin in sample_tins()? {
            let summary = verify_scenario(
                &tin,
                config.simulation.verify_trials,
                seed,
                config.simulation.supply_capacity,
                config.simulation.sampling_mode,
            )?;
            println!(
                "verified {}: {} trials, {} mismatches, {} failures",
                summary.initial, summary.trials, summary.mismatches, summary.failures
            );
            report.verification.push(summary);
        }
    }

    if config.output.report_json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| ServiceError::serialization_error(e))?;
        println!("{}", json);
    }

    if let Some(handle) = metrics_handle {
        println!("{}", handle.render());
    }

    // Mismatches are reported, not turned into a failing exit code
    tracing::info!(
        run_id = %report.run_id,
        mismatches = report.mismatches(),
        supply_left = report.supply_left,
        "Simulator finished"
    );

    Ok(())
}
