//! Noisy channel: randomness and single-bit error injection.
//!
//! The engine never touches a global RNG. Anything random goes through a
//! [`BitSource`], so the parity arithmetic stays deterministic and tests can
//! script exact outcomes.
//!
//! # Determinism
//!
//! [`SeededSource`] draws from a seeded ChaCha8 RNG. Given the same seed and
//! the same sequence of calls, outputs are bit-identical.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{Error, Result};
use crate::frame::{FrameSet, FRAME_BITS};

/// Supplier of uniform random choices.
pub trait BitSource {
    /// A uniformly random bit (0 or 1).
    fn next_bit(&mut self) -> u8;

    /// A uniformly random index in `[0, bound)`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn next_bit(&mut self) -> u8 {
        (**self).next_bit()
    }

    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}

/// ChaCha8-backed [`BitSource`] seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededSource {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl BitSource for SeededSource {
    fn next_bit(&mut self) -> u8 {
        u8::from(self.rng.gen::<bool>())
    }

    fn next_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }
}

/// Location of the bit flipped by [`simulate_single_bit_error`].
///
/// Display metadata only; it is not part of any frame's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitMutation {
    /// Zero-based frame index within the set
    pub frame_index: usize,

    /// Zero-based bit position within the frame (8 is the parity bit)
    pub bit_index: usize,
}

/// Flip one uniformly chosen bit of one uniformly chosen frame.
///
/// All nine positions are eligible, the parity bit included.
///
/// # Errors
/// `Error::EmptyFrameSet` if `frames` holds no frames.
pub fn simulate_single_bit_error<S: BitSource>(
    frames: &FrameSet,
    mut source: S,
) -> Result<(FrameSet, BitMutation)> {
    if frames.is_empty() {
        return Err(Error::EmptyFrameSet);
    }

    // Sources are caller-supplied; keep their picks inside the set
    let frame_index = source.next_index(frames.len()) % frames.len();
    let bit_index = source.next_index(FRAME_BITS) % FRAME_BITS;

    let mut mutated = frames.clone().into_frames();
    let flipped = mutated
        .get_mut(frame_index)
        .is_some_and(|frame| frame.flip(bit_index));
    debug_assert!(flipped, "index ({frame_index}, {bit_index}) outside frame set");

    tracing::debug!(frame_index, bit_index, "flipped one bit");

    Ok((
        FrameSet::from(mutated),
        BitMutation {
            frame_index,
            bit_index,
        },
    ))
}
