//! The tin being reduced
//!
//! A tin is created fully occupied and only shrinks: each reduction takes two
//! beans out at random and puts one back into the first free slot.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use shared::{parse_beans, BeanColor, Slot, ValidationError};

use crate::errors::Result;
use crate::slots::{SamplingMode, SlotSequence};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tin {
    slots: SlotSequence,
}

impl Tin {
    /// Create a tin with one bean per slot
    pub fn new(beans: &[BeanColor]) -> Self {
        let slots = beans.iter().copied().map(Slot::from).collect();
        Self {
            slots: SlotSequence::new("tin", slots),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn bean_count(&self) -> usize {
        self.slots.bean_count()
    }

    pub fn slots(&self) -> &[Slot] {
        self.slots.slots()
    }

    pub fn has_at_least_two(&self) -> bool {
        self.slots.has_at_least(2)
    }

    pub fn take_one<R: Rng + ?Sized>(&mut self, rng: &mut R, mode: SamplingMode) -> Result<BeanColor> {
        self.slots.take_one(rng, mode)
    }

    /// Take two beans, one after the other
    ///
    /// The second draw never sees the slot emptied by the first.
    pub fn take_two<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        mode: SamplingMode,
    ) -> Result<(BeanColor, BeanColor)> {
        let first = self.take_one(rng, mode)?;
        let second = self.take_one(rng, mode)?;
        Ok((first, second))
    }

    pub fn put_in(&mut self, color: BeanColor) -> Result<()> {
        self.slots.put_in(color).map(|_| ())
    }

    pub fn any_remaining(&self) -> Option<BeanColor> {
        self.slots.first_bean()
    }

    pub fn count_of(&self, color: BeanColor) -> usize {
        self.slots.count_of(color)
    }
}

impl FromStr for Tin {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        parse_beans(s).map(|beans| Tin::new(&beans))
    }
}

impl fmt::Display for Tin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.slots, f)
    }
}
