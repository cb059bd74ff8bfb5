//! Sender-side parity: building valid frames and repairing parity bits.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use crate::channel::BitSource;
use crate::frame::{Frame, FrameSet, DATA_BITS};
use crate::parity::{compute_parity_bit, ParityConvention};

/// Frames generated when the caller does not ask for a specific count
pub const DEFAULT_FRAME_COUNT: usize = 3;

/// Indices of frames whose parity bit was rewritten by [`correct`].
///
/// Display metadata that rides alongside the corrected set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionSet {
    indices: BTreeSet<usize>,
}

impl CorrectionSet {
    pub fn contains(&self, frame_index: usize) -> bool {
        self.indices.contains(&frame_index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }
}

impl FromIterator<usize> for CorrectionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

/// Generate `count` random frames that are parity-valid under `convention`.
pub fn generate<S: BitSource>(
    count: NonZeroUsize,
    convention: ParityConvention,
    mut source: S,
) -> FrameSet {
    let frames: FrameSet = (0..count.get())
        .map(|_| {
            let mut data = [0u8; DATA_BITS];
            for bit in data.iter_mut() {
                *bit = source.next_bit();
            }
            Frame::encode(data, convention)
        })
        .collect();

    tracing::debug!(count = frames.len(), %convention, "generated frames");
    frames
}

/// Recompute every frame's parity bit under `convention`.
///
/// Data bits are left alone. A frame index lands in the returned
/// [`CorrectionSet`] only when its parity bit actually changed.
pub fn correct(frames: &FrameSet, convention: ParityConvention) -> (FrameSet, CorrectionSet) {
    let mut corrections = Vec::new();

    let corrected: FrameSet = frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let parity = compute_parity_bit(frame.data_bits(), convention);
            if parity != frame.parity_bit() {
                corrections.push(i);
            }
            frame.with_parity_bit(parity)
        })
        .collect();

    tracing::debug!(
        frames = corrected.len(),
        corrected = corrections.len(),
        %convention,
        "recomputed parity bits"
    );

    (corrected, corrections.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::SeededSource;
    use crate::check::check;
    use crate::frame::parse;

    fn count(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_correct_single_frame() {
        let (corrected, set) = correct(&parse("101100101").unwrap(), ParityConvention::Even);

        assert_eq!(corrected.to_string(), "101100100");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_correct_leaves_valid_frames_alone() {
        let frames = parse("010010000 011010011 011001010").unwrap();
        let (corrected, set) = correct(&frames, ParityConvention::Even);

        assert_eq!(corrected.to_string(), "010010000 011010010 011001010");
        assert_eq!(set.len(), 1);
        assert!(set.contains(1));
        assert!(!set.contains(0));
    }

    #[test]
    fn test_correct_never_touches_data() {
        let frames = parse("111111111 000000000 101010101").unwrap();
        let (corrected, _) = correct(&frames, ParityConvention::Odd);

        for (before, after) in frames.iter().zip(corrected.iter()) {
            assert_eq!(before.data_bits(), after.data_bits());
        }
        assert!(check(&corrected, ParityConvention::Odd).is_clean());
    }

    #[test]
    fn test_correct_empty_set() {
        let (corrected, set) = correct(&FrameSet::default(), ParityConvention::Even);
        assert!(corrected.is_empty());
        assert!(set.is_empty());
    }

    #[test]
    fn test_generate_default_count() {
        let frames = generate(
            count(DEFAULT_FRAME_COUNT),
            ParityConvention::Even,
            SeededSource::new(42),
        );
        assert_eq!(frames.len(), 3);
        assert!(check(&frames, ParityConvention::Even).is_clean());
    }

    #[test]
    fn test_generate_valid_under_both_conventions() {
        for convention in [ParityConvention::Even, ParityConvention::Odd] {
            let frames = generate(count(64), convention, SeededSource::new(9));
            assert_eq!(frames.len(), 64);
            assert!(check(&frames, convention).is_clean());
        }
    }

    #[test]
    fn test_generate_determinism() {
        let a = generate(count(10), ParityConvention::Odd, SeededSource::new(12345));
        let b = generate(count(10), ParityConvention::Odd, SeededSource::new(12345));
        assert_eq!(a, b);
    }

    #[test]
    fn test_generate_different_seeds() {
        let a = generate(count(10), ParityConvention::Even, SeededSource::new(1));
        let b = generate(count(10), ParityConvention::Even, SeededSource::new(2));
        assert_ne!(a, b);
    }
}
