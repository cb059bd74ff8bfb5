//! Parity arithmetic.
//!
//! [`compute_parity_bit`] is the only place the parity rule lives. Checking,
//! generation and correction all call it.

use std::fmt;
use std::str::FromStr;

use crate::frame::DATA_BITS;

/// Which total the parity bit is chosen to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParityConvention {
    /// Total number of 1s (data plus parity) is even
    #[default]
    Even,
    /// Total number of 1s (data plus parity) is odd
    Odd,
}

impl ParityConvention {
    /// Capitalised name for human-facing text ("Even", "Odd").
    pub fn title(self) -> &'static str {
        match self {
            ParityConvention::Even => "Even",
            ParityConvention::Odd => "Odd",
        }
    }
}

impl fmt::Display for ParityConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParityConvention::Even => f.write_str("even"),
            ParityConvention::Odd => f.write_str("odd"),
        }
    }
}

impl FromStr for ParityConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "even" => Ok(ParityConvention::Even),
            "odd" => Ok(ParityConvention::Odd),
            other => Err(format!("unknown parity convention \"{other}\" (expected even or odd)")),
        }
    }
}

/// Count of 1-bits in a data block.
pub fn count_ones(data_bits: &[u8; DATA_BITS]) -> u32 {
    data_bits.iter().map(|&b| u32::from(b & 1)).sum()
}

/// Compute the parity bit for eight data bits under `convention`.
///
/// - `Even`: 0 when the data already holds an even number of 1s, else 1
/// - `Odd`: 1 when the data holds an even number of 1s, else 0
pub fn compute_parity_bit(data_bits: &[u8; DATA_BITS], convention: ParityConvention) -> u8 {
    let odd_ones = (count_ones(data_bits) % 2) as u8;
    match convention {
        ParityConvention::Even => odd_ones,
        ParityConvention::Odd => odd_ones ^ 1,
    }
}
