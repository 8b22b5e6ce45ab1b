//! Reduction engine
//!
//! Drives a tin down to a single bean. Each iteration draws two beans from the
//! tin, asks the supply for the replacement color the rule names, and puts that
//! bean into the tin. The supply is owned by the engine and carries over from
//! one tin to the next, so every reduction in a run spends the same pool.

use rand::Rng;
use serde::{Deserialize, Serialize};
use shared::BeanColor;

use crate::errors::Result;
use crate::rules::replacement_for;
use crate::slots::SamplingMode;
use crate::supply::BeanSupply;
use crate::tin::Tin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    /// The tin still holds two or more beans
    Running,
    /// The tin holds one bean, or none if it started empty
    Done,
}

/// One draw-two, replace-one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionStep {
    pub drawn: (BeanColor, BeanColor),
    pub replacement: BeanColor,
    pub beans_left: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionOutcome {
    pub last_bean: Option<BeanColor>,
    pub iterations: usize,
}

pub struct ReductionEngine<R> {
    supply: BeanSupply,
    rng: R,
    mode: SamplingMode,
}

impl<R: Rng> ReductionEngine<R> {
    pub fn new(supply: BeanSupply, rng: R) -> Self {
        Self {
            supply,
            rng,
            mode: SamplingMode::default(),
        }
    }

    pub fn with_sampling_mode(mut self, mode: SamplingMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn supply(&self) -> &BeanSupply {
        &self.supply
    }

    pub fn state(tin: &Tin) -> EngineState {
        if tin.has_at_least_two() {
            EngineState::Running
        } else {
            EngineState::Done
        }
    }

    /// Perform one iteration, or return `None` once the tin is done
    ///
    /// An error leaves the tin short of the two beans already drawn; nothing
    /// is rolled back.
    pub fn step(&mut self, tin: &mut Tin) -> Result<Option<ReductionStep>> {
        if Self::state(tin) == EngineState::Done {
            return Ok(None);
        }

        let (first, second) = tin.take_two(&mut self.rng, self.mode)?;
        let wanted = replacement_for(first, second);
        let replacement = self.supply.draw_of_color(wanted, &mut self.rng, self.mode)?;
        tin.put_in(replacement)?;

        let step = ReductionStep {
            drawn: (first, second),
            replacement,
            beans_left: tin.bean_count(),
        };
        tracing::debug!(
            first = %first,
            second = %second,
            replacement = %replacement,
            beans_left = step.beans_left,
            supply_left = self.supply.bean_count(),
            "Reduction step"
        );
        metrics::counter!("reduction_iterations_total").increment(1);

        Ok(Some(step))
    }

    /// Reduce the tin until it is done and report the bean left behind
    pub fn run(&mut self, tin: &mut Tin) -> Result<ReductionOutcome> {
        if tin.bean_count() == 0 {
            tracing::warn!(capacity = tin.capacity(), "Tin holds no beans; nothing to reduce");
        }

        let mut iterations = 0;
        while self.step(tin)?.is_some() {
            iterations += 1;
        }

        metrics::histogram!("reduction_iterations").record(iterations as f64);
        Ok(ReductionOutcome {
            last_bean: tin.any_remaining(),
            iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimulationError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn engine(seed: u64) -> ReductionEngine<StdRng> {
        ReductionEngine::new(BeanSupply::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn test_state_transitions() {
        let mut engine = engine(1);
        let mut tin: Tin = "BG".parse().unwrap();
        assert_eq!(ReductionEngine::<StdRng>::state(&tin), EngineState::Running);

        let step = engine.step(&mut tin).unwrap().unwrap();
        assert_eq!(step.replacement, BeanColor::Green);
        assert_eq!(step.beans_left, 1);
        assert_eq!(ReductionEngine::<StdRng>::state(&tin), EngineState::Done);
        assert_eq!(engine.step(&mut tin).unwrap(), None);
    }

    #[test]
    fn test_single_bean_needs_no_iterations() {
        let mut engine = engine(2);
        let mut tin: Tin = "G".parse().unwrap();
        let outcome = engine.run(&mut tin).unwrap();
        assert_eq!(outcome, ReductionOutcome { last_bean: Some(BeanColor::Green), iterations: 0 });
        assert_eq!(engine.supply().bean_count(), 40);
    }

    #[test]
    fn test_empty_tin_is_done_immediately() {
        let mut engine = engine(3);
        let mut tin = Tin::new(&[]);
        let outcome = engine.run(&mut tin).unwrap();
        assert_eq!(outcome.last_bean, None);
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn test_supply_shared_across_tins() {
        let mut engine = engine(4);
        for symbols in ["BBBGG", "BBBGGG"] {
            let mut tin: Tin = symbols.parse().unwrap();
            engine.run(&mut tin).unwrap();
        }
        // 4 + 5 iterations, one bean taken from the supply each
        assert_eq!(engine.supply().bean_count(), 40 - 9);
    }

    #[test]
    fn test_exhausted_supply_fails_fast() {
        let supply = BeanSupply::with_capacity(3).unwrap();
        let mut engine = ReductionEngine::new(supply, StdRng::seed_from_u64(5));
        let mut tin: Tin = "BBBB".parse().unwrap();
        // every pair is same-colored, so the single blue bean runs out on the second step
        assert!(engine.step(&mut tin).unwrap().is_some());
        assert_eq!(
            engine.run(&mut tin),
            Err(SimulationError::SupplyExhausted { color: BeanColor::Blue })
        );
    }
}
