//! Library interface for the simulator - exposes modules for testing

pub mod config;
pub mod engine;
pub mod errors;
pub mod rules;
pub mod scenarios;
pub mod slots;
pub mod supply;
pub mod telemetry;
pub mod tin;

pub use engine::{EngineState, ReductionEngine, ReductionOutcome, ReductionStep};
pub use slots::SamplingMode;
pub use supply::BeanSupply;
pub use tin::Tin;
