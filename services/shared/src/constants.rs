/// Shared constants for the coffee tin simulator
///
/// This module centralizes the fixed numbers of the puzzle so the engine,
/// the driver and the tests agree on them.

/// Number of slots in the replacement bean supply
///
/// One third starts Blue, one third Green, and the last third is left empty
/// to receive beans returned after a mismatched draw.
pub const SUPPLY_CAPACITY: usize = 60;

/// Number of equal partitions in the supply layout (Blue, Green, spare)
pub const SUPPLY_PARTITIONS: usize = 3;

/// Display symbol for a Blue bean
pub const BLUE_SYMBOL: char = 'B';

/// Display symbol for a Green bean
pub const GREEN_SYMBOL: char = 'G';

/// Display symbol for an empty (removed) slot
pub const EMPTY_SYMBOL: char = '-';

/// Sample tins reduced by the driver, in symbol form
pub const SAMPLE_TINS: [&str; 5] = ["BBBGG", "BBBGGG", "G", "B", "BG"];
