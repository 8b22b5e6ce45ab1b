//! Fixed-length slot sequences
//!
//! Both the tin and the bean supply are a row of slots that beans are taken
//! from at random and put back into in index order. This module holds that
//! shared mechanic; `Tin` and `BeanSupply` wrap it with their own operations.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use shared::{BeanColor, Slot, ValidationError};

use crate::errors::{Result, SimulationError};

/// How a random bean is picked out of a slot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    /// Pick a uniform index over every slot and retry until an occupied one is hit
    #[default]
    Rejection,
    /// Pick uniformly among occupied slots only; same distribution, fewer random draws
    LiveIndex,
}

impl FromStr for SamplingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rejection" => Ok(SamplingMode::Rejection),
            "live_index" | "live-index" => Ok(SamplingMode::LiveIndex),
            other => Err(ValidationError::InvalidSamplingMode(other.to_string())),
        }
    }
}

impl fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SamplingMode::Rejection => write!(f, "rejection"),
            SamplingMode::LiveIndex => write!(f, "live_index"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSequence {
    name: &'static str,
    slots: Vec<Slot>,
}

impl SlotSequence {
    pub fn new(name: &'static str, slots: Vec<Slot>) -> Self {
        Self { name, slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn bean_count(&self) -> usize {
        self.slots.iter().filter(|s| !s.is_empty()).count()
    }

    pub fn empty_slots(&self) -> usize {
        self.capacity() - self.bean_count()
    }

    pub fn count_of(&self, color: BeanColor) -> usize {
        self.slots.iter().filter(|s| s.holds(color)).count()
    }

    /// True once `n` occupied slots have been seen; stops scanning early
    pub fn has_at_least(&self, n: usize) -> bool {
        n == 0 || self.slots.iter().filter(|s| !s.is_empty()).nth(n - 1).is_some()
    }

    /// Color of the first occupied slot in index order
    pub fn first_bean(&self) -> Option<BeanColor> {
        self.slots.iter().find_map(Slot::bean)
    }

    /// Remove a uniformly random bean and return its color
    ///
    /// Fails instead of sampling forever when no slot is occupied.
    pub fn take_one<R: Rng + ?Sized>(&mut self, rng: &mut R, mode: SamplingMode) -> Result<BeanColor> {
        let occupied = self.bean_count();
        if occupied == 0 {
            return Err(SimulationError::NoBeanToTake { container: self.name });
        }

        let (index, samples) = match mode {
            SamplingMode::Rejection => {
                let mut samples = 1u64;
                let mut index = rng.gen_range(0..self.slots.len());
                while self.slots[index].is_empty() {
                    index = rng.gen_range(0..self.slots.len());
                    samples += 1;
                }
                (index, samples)
            }
            SamplingMode::LiveIndex => {
                let nth = rng.gen_range(0..occupied);
                let index = self
                    .slots
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| !s.is_empty())
                    .map(|(i, _)| i)
                    .nth(nth)
                    .ok_or(SimulationError::NoBeanToTake { container: self.name })?;
                (index, 1)
            }
        };
        metrics::counter!("slot_samples_total", "container" => self.name).increment(samples);

        let slot = std::mem::take(&mut self.slots[index]);
        slot.bean()
            .ok_or(SimulationError::NoBeanToTake { container: self.name })
    }

    /// Fill the first empty slot in index order and return its position
    pub fn put_in(&mut self, color: BeanColor) -> Result<usize> {
        let index = self
            .slots
            .iter()
            .position(Slot::is_empty)
            .ok_or(SimulationError::NoEmptySlot { container: self.name })?;
        self.slots[index] = Slot::Filled(color);
        Ok(index)
    }
}

impl fmt::Display for SlotSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, slot) in self.slots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot)?;
        }
        write!(f, "]")
    }
}
