//! Sample tins and the run report
//!
//! The driver reduces a fixed list of sample tins against one shared supply
//! and checks each result against the parity prediction. Optionally every
//! sample is replayed many times, each trial with a fresh supply, to check
//! that the prediction holds whatever the draws.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use shared::{BeanColor, ValidationError, SAMPLE_TINS};
use uuid::Uuid;

use crate::engine::ReductionEngine;
use crate::rules::expected_last_bean;
use crate::slots::SamplingMode;
use crate::supply::BeanSupply;
use crate::tin::Tin;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub initial: String,
    pub greens: usize,
    pub expected: Option<BeanColor>,
    pub actual: Option<BeanColor>,
    pub iterations: Option<usize>,
    pub tin_after: String,
    pub matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ServiceError>,
}

impl ScenarioResult {
    /// Lines printed for this scenario, in order
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("TIN ({} Gs): {}", self.greens, self.initial),
            format!("tin after: {}", self.tin_after),
        ];
        match (&self.error, self.matched) {
            (Some(error), _) => lines.push(format!("Reduction failed: {}", error)),
            (None, true) => lines.push(format!("last bean: {}", bean_label(self.actual))),
            (None, false) => lines.push(format!(
                "Oops, wrong last bean: {} (expected: {})",
                bean_label(self.actual),
                bean_label(self.expected)
            )),
        }
        lines
    }
}

fn bean_label(bean: Option<BeanColor>) -> String {
    bean.map(|b| b.to_string()).unwrap_or_else(|| "none".to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub initial: String,
    pub trials: usize,
    pub mismatches: usize,
    pub failures: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    pub sampling_mode: SamplingMode,
    pub supply_capacity: usize,
    pub supply_left: usize,
    pub scenarios: Vec<ScenarioResult>,
    pub verification: Vec<VerificationSummary>,
}

impl RunReport {
    pub fn new(seed: u64, sampling_mode: SamplingMode, supply_capacity: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            seed,
            sampling_mode,
            supply_capacity,
            supply_left: supply_capacity,
            scenarios: Vec::new(),
            verification: Vec::new(),
        }
    }

    pub fn mismatches(&self) -> usize {
        self.scenarios.iter().filter(|s| !s.matched).count()
    }
}

pub fn sample_tins() -> Result<Vec<Tin>, ValidationError> {
    SAMPLE_TINS.iter().map(|symbols| symbols.parse()).collect()
}

/// Reduce one tin and compare the result with the parity prediction
///
/// A failed reduction is reported in the result rather than returned, so one
/// bad scenario does not stop the rest of the run.
pub fn run_scenario<R: Rng>(engine: &mut ReductionEngine<R>, mut tin: Tin) -> ScenarioResult {
    let initial = tin.to_string();
    let greens = tin.count_of(BeanColor::Green);
    let expected = expected_last_bean(&tin);

    let (actual, iterations, error) = match engine.run(&mut tin) {
        Ok(outcome) => (outcome.last_bean, Some(outcome.iterations), None),
        Err(e) => {
            let error = e.to_service_error();
            if error.category.log_level() == "warn" {
                tracing::warn!(tin = %initial, error = %error, "Reduction failed");
            } else {
                tracing::error!(tin = %initial, error = %error, "Reduction failed");
            }
            (None, None, Some(error))
        }
    };

    let matched = error.is_none() && actual == expected;
    if error.is_none() {
        if matched {
            tracing::info!(tin = %initial, greens, last_bean = ?actual, iterations = ?iterations, "Scenario matched parity");
        } else {
            tracing::warn!(tin = %initial, greens, actual = ?actual, expected = ?expected, "Scenario missed parity");
            metrics::counter!("scenario_mismatch_total").increment(1);
        }
    }

    ScenarioResult {
        initial,
        greens,
        expected,
        actual,
        iterations,
        tin_after: tin.to_string(),
        matched,
        error,
    }
}

/// Replay a tin `trials` times, each with a fresh supply and seed `base_seed + trial`
pub fn verify_scenario(
    tin: &Tin,
    trials: usize,
    base_seed: u64,
    supply_capacity: usize,
    mode: SamplingMode,
) -> Result<VerificationSummary, ValidationError> {
    let expected = expected_last_bean(tin);
    let mut summary = VerificationSummary {
        initial: tin.to_string(),
        trials,
        ..Default::default()
    };

    for trial in 0..trials {
        let supply = BeanSupply::with_capacity(supply_capacity)?;
        let rng = StdRng::seed_from_u64(base_seed.wrapping_add(trial as u64));
        let mut engine = ReductionEngine::new(supply, rng).with_sampling_mode(mode);
        let mut copy = tin.clone();
        match engine.run(&mut copy) {
            Ok(outcome) if outcome.last_bean == expected => {}
            Ok(_) => summary.mismatches += 1,
            Err(e) => {
                tracing::debug!(trial, error = %e, "Verification trial failed");
                summary.failures += 1;
            }
        }
    }

    tracing::info!(
        tin = %summary.initial,
        trials,
        mismatches = summary.mismatches,
        failures = summary.failures,
        "Verification finished"
    );
    Ok(summary)
}
