//! vrc-sim-core: Vertical Redundancy Check teaching engine
//!
//! This library implements single-bit parity over nine-bit frames
//! (8 data bits + 1 parity bit):
//! - Parses whitespace-separated bit strings into frames
//! - Computes and verifies parity under an even or odd convention
//! - Explains every verdict step by step
//! - Injects single-bit errors and recomputes parity bits for demonstration
//!
//! # Architecture
//!
//! - `frame`: frame and frame-set types, parsing, canonical text
//! - `parity`: the parity rule
//! - `check`: receiver-side verification with explanations
//! - `encoder`: random frame generation and parity correction
//! - `channel`: injectable randomness and single-bit error injection
//! - `report`: text tables, detection log and export
//!
//! # Design Principles
//!
//! - **Stateless**: every operation is a function of its arguments
//! - **No panics**: malformed input is a structured error
//! - **Deterministic**: randomness only enters through a `BitSource`

pub mod channel;
pub mod check;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod parity;
pub mod report;

// Re-export commonly used types
pub use channel::{simulate_single_bit_error, BitMutation, BitSource, SeededSource};
pub use check::{check, CheckReport, CheckResult};
pub use encoder::{correct, generate, CorrectionSet, DEFAULT_FRAME_COUNT};
pub use error::{Error, Result};
pub use frame::{parse, Frame, FrameSet, DATA_BITS, FRAME_BITS, PARITY_INDEX};
pub use parity::{compute_parity_bit, ParityConvention};
