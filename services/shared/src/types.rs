/// Type-safe wrappers for the puzzle's primitives
///
/// Beans and slots are parsed and rendered through a single-character symbol
/// form so that tins can be written down as plain strings like `"BBBGG"`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid bean symbol: {0:?} (expected 'B', 'G' or '-')")]
    InvalidBeanSymbol(char),

    #[error("Empty slot at index {index}: a new tin must start fully occupied")]
    EmptySlotAtConstruction { index: usize },

    #[error("Supply capacity {capacity} is not a positive multiple of {partitions}")]
    SupplyCapacityNotDivisible { capacity: usize, partitions: usize },

    #[error("Invalid sampling mode: {0}")]
    InvalidSamplingMode(String),
}

/// Color of a single bean
///
/// Only two colors exist; the replacement rule is defined over exactly these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BeanColor {
    Blue,
    Green,
}

impl BeanColor {
    /// Both colors, in supply layout order
    pub const ALL: [BeanColor; 2] = [BeanColor::Blue, BeanColor::Green];

    pub fn symbol(&self) -> char {
        match self {
            BeanColor::Blue => BLUE_SYMBOL,
            BeanColor::Green => GREEN_SYMBOL,
        }
    }
}

impl TryFrom<char> for BeanColor {
    type Error = ValidationError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        match symbol {
            BLUE_SYMBOL => Ok(BeanColor::Blue),
            GREEN_SYMBOL => Ok(BeanColor::Green),
            other => Err(ValidationError::InvalidBeanSymbol(other)),
        }
    }
}

impl std::fmt::Display for BeanColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A position in a tin or in the supply
///
/// A slot moves between `Empty` and `Filled` only; the containers never
/// overwrite a filled slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    #[default]
    Empty,
    Filled(BeanColor),
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn bean(&self) -> Option<BeanColor> {
        match self {
            Slot::Empty => None,
            Slot::Filled(color) => Some(*color),
        }
    }

    /// Check whether this slot holds a bean of `color`
    pub fn holds(&self, color: BeanColor) -> bool {
        *self == Slot::Filled(color)
    }

    pub fn symbol(&self) -> char {
        match self {
            Slot::Empty => EMPTY_SYMBOL,
            Slot::Filled(color) => color.symbol(),
        }
    }
}

impl From<BeanColor> for Slot {
    fn from(color: BeanColor) -> Self {
        Slot::Filled(color)
    }
}

impl TryFrom<char> for Slot {
    type Error = ValidationError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        if symbol == EMPTY_SYMBOL {
            return Ok(Slot::Empty);
        }
        BeanColor::try_from(symbol).map(Slot::Filled)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Parse a string of bean symbols into colors
///
/// Whitespace is ignored. An empty-slot symbol is rejected with its index,
/// since a fresh tin never contains gaps.
pub fn parse_beans(symbols: &str) -> Result<Vec<BeanColor>, ValidationError> {
    symbols
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .map(|(index, symbol)| match Slot::try_from(symbol)? {
            Slot::Filled(color) => Ok(color),
            Slot::Empty => Err(ValidationError::EmptySlotAtConstruction { index }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bean_symbols() {
        assert_eq!(BeanColor::try_from('B').unwrap(), BeanColor::Blue);
        assert_eq!(BeanColor::try_from('G').unwrap(), BeanColor::Green);
        assert_eq!(BeanColor::Green.to_string(), "G");
        assert!(matches!(
            BeanColor::try_from('R'),
            Err(ValidationError::InvalidBeanSymbol('R'))
        ));
    }

    #[test]
    fn test_slot_symbols() {
        assert_eq!(Slot::try_from('-').unwrap(), Slot::Empty);
        assert_eq!(Slot::try_from('B').unwrap(), Slot::Filled(BeanColor::Blue));
        assert_eq!(Slot::Empty.to_string(), "-");
        assert!(Slot::default().is_empty());
    }

    #[test]
    fn test_slot_holds() {
        let slot = Slot::from(BeanColor::Green);
        assert!(slot.holds(BeanColor::Green));
        assert!(!slot.holds(BeanColor::Blue));
        assert!(!Slot::Empty.holds(BeanColor::Blue));
        assert_eq!(slot.bean(), Some(BeanColor::Green));
    }

    #[test]
    fn test_parse_beans() {
        let beans = parse_beans("BB G").unwrap();
        assert_eq!(beans, vec![BeanColor::Blue, BeanColor::Blue, BeanColor::Green]);
        assert!(parse_beans("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_beans_rejects_gaps() {
        let result = parse_beans("BG-G");
        assert_eq!(result, Err(ValidationError::EmptySlotAtConstruction { index: 2 }));
    }

    #[test]
    fn test_serde_form() {
        let json = serde_json::to_string(&Slot::Filled(BeanColor::Blue)).unwrap();
        assert_eq!(json, r#"{"filled":"blue"}"#);
        let back: Slot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Slot::Filled(BeanColor::Blue));
    }
}
