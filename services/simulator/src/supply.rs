//! Finite supply of replacement beans
//!
//! The supply starts a third Blue, a third Green and a third empty. Asking it
//! for a color draws beans at random; a bean of the wrong color goes straight
//! back into the first empty slot and the draw repeats. Only the matching bean
//! leaves the supply.

use std::fmt;

use rand::Rng;
use shared::{BeanColor, Slot, ValidationError, SUPPLY_CAPACITY, SUPPLY_PARTITIONS};

use crate::errors::{Result, SimulationError};
use crate::slots::{SamplingMode, SlotSequence};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanSupply {
    slots: SlotSequence,
}

impl BeanSupply {
    /// Create a supply with the given number of slots
    ///
    /// `capacity` must be a positive multiple of three so the Blue, Green and
    /// spare partitions are equal.
    pub fn with_capacity(capacity: usize) -> std::result::Result<Self, ValidationError> {
        if capacity == 0 || capacity % SUPPLY_PARTITIONS != 0 {
            return Err(ValidationError::SupplyCapacityNotDivisible {
                capacity,
                partitions: SUPPLY_PARTITIONS,
            });
        }

        Ok(Self::partitioned(capacity))
    }

    fn partitioned(capacity: usize) -> Self {
        let third = capacity / SUPPLY_PARTITIONS;
        let slots = (0..capacity)
            .map(|i| {
                if i < third {
                    Slot::Filled(BeanColor::Blue)
                } else if i < 2 * third {
                    Slot::Filled(BeanColor::Green)
                } else {
                    Slot::Empty
                }
            })
            .collect();

        Self {
            slots: SlotSequence::new("supply", slots),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn bean_count(&self) -> usize {
        self.slots.bean_count()
    }

    pub fn empty_slots(&self) -> usize {
        self.slots.empty_slots()
    }

    pub fn count_of(&self, color: BeanColor) -> usize {
        self.slots.count_of(color)
    }

    pub fn slots(&self) -> &[Slot] {
        self.slots.slots()
    }

    /// Draw a bean of `color` out of the supply
    ///
    /// Mismatched beans are returned before the next draw, so the call removes
    /// exactly one bean of `color` and leaves every other bean in place. Fails
    /// with `SupplyExhausted` up front when no bean of `color` is left, since
    /// the draw loop could never end otherwise.
    pub fn draw_of_color<R: Rng + ?Sized>(
        &mut self,
        color: BeanColor,
        rng: &mut R,
        mode: SamplingMode,
    ) -> Result<BeanColor> {
        if self.count_of(color) == 0 {
            return Err(SimulationError::SupplyExhausted { color });
        }

        let mut returned = 0u64;
        let mut drawn = self.slots.take_one(rng, mode)?;
        while drawn != color {
            self.slots.put_in(drawn)?;
            returned += 1;
            tracing::trace!(wanted = %color, returned = %drawn, "Mismatched bean returned to supply");
            drawn = self.slots.take_one(rng, mode)?;
        }

        metrics::counter!("supply_draws_total").increment(1);
        metrics::counter!("supply_returns_total").increment(returned);
        Ok(drawn)
    }
}

impl Default for BeanSupply {
    fn default() -> Self {
        Self::partitioned(SUPPLY_CAPACITY)
    }
}

impl fmt::Display for BeanSupply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.slots, f)
    }
}
