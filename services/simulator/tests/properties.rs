//! Property-based tests for the reduction engine.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::BeanColor;

use simulator::rules::{expected_last_bean, replacement_for};
use simulator::{BeanSupply, ReductionEngine, SamplingMode, Tin};

/// Strategy: a bean of either color.
fn bean_strategy() -> impl Strategy<Value = BeanColor> {
    prop_oneof![Just(BeanColor::Blue), Just(BeanColor::Green)]
}

/// Strategy: a tin small enough that the default supply never runs dry.
fn tin_strategy() -> impl Strategy<Value = Vec<BeanColor>> {
    prop::collection::vec(bean_strategy(), 0..=16)
}

fn mode_strategy() -> impl Strategy<Value = SamplingMode> {
    prop_oneof![Just(SamplingMode::Rejection), Just(SamplingMode::LiveIndex)]
}

proptest! {
    // 1. The last bean is always the parity prediction
    #[test]
    fn last_bean_matches_parity(beans in tin_strategy(), seed in any::<u64>(), mode in mode_strategy()) {
        let mut tin = Tin::new(&beans);
        let expected = expected_last_bean(&tin);
        let mut engine = ReductionEngine::new(BeanSupply::default(), StdRng::seed_from_u64(seed))
            .with_sampling_mode(mode);
        let outcome = engine.run(&mut tin).unwrap();
        prop_assert_eq!(outcome.last_bean, expected);
    }

    // 2. A tin of N >= 1 beans takes exactly N - 1 iterations
    #[test]
    fn iterations_are_n_minus_one(beans in tin_strategy(), seed in any::<u64>()) {
        let mut tin = Tin::new(&beans);
        let mut engine = ReductionEngine::new(BeanSupply::default(), StdRng::seed_from_u64(seed));
        let outcome = engine.run(&mut tin).unwrap();
        prop_assert_eq!(outcome.iterations, beans.len().saturating_sub(1));
        prop_assert_eq!(tin.bean_count(), beans.len().min(1));
        prop_assert_eq!(engine.supply().bean_count(), 40 - outcome.iterations);
    }

    // 3. Green count parity survives every single step
    #[test]
    fn green_parity_is_step_invariant(beans in tin_strategy(), seed in any::<u64>()) {
        let mut tin = Tin::new(&beans);
        let parity = tin.count_of(BeanColor::Green) % 2;
        let mut engine = ReductionEngine::new(BeanSupply::default(), StdRng::seed_from_u64(seed));
        while engine.step(&mut tin).unwrap().is_some() {
            prop_assert_eq!(tin.count_of(BeanColor::Green) % 2, parity);
        }
    }

    // 4. The rule is symmetric in its arguments
    #[test]
    fn rule_is_symmetric(a in bean_strategy(), b in bean_strategy()) {
        prop_assert_eq!(replacement_for(a, b), replacement_for(b, a));
    }
}
