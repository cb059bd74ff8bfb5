//! Frame parsing and canonical text form.
//!
//! A frame is nine bits written as nine ASCII digits: eight data bits
//! followed by one parity bit. A frame set is any number of frames separated
//! by whitespace.
//!
//! # Text Format
//!
//! ```text
//!   0 1 0 0 1 0 0 0   0
//!  +---------------+ +-+
//!    data (8 bits)   parity
//!
//! "010010000 011010011 011001010"   three frames, single-space separated
//! ```
//!
//! Parsing is all-or-nothing: the first bad token aborts the whole set and is
//! reported verbatim.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::parity::{compute_parity_bit, ParityConvention};

/// Number of data bits in a frame
pub const DATA_BITS: usize = 8;

/// Total number of bits in a frame (data + parity)
pub const FRAME_BITS: usize = DATA_BITS + 1;

/// Position of the parity bit within a frame
pub const PARITY_INDEX: usize = DATA_BITS;

/// One nine-bit frame.
///
/// # Invariants
/// - every stored bit is 0 or 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame {
    data: [u8; DATA_BITS],
    parity: u8,
}

impl Frame {
    /// Build a frame from data bits and a parity bit.
    ///
    /// Only the lowest bit of each value is kept.
    pub fn new(data: [u8; DATA_BITS], parity: u8) -> Self {
        Self {
            data: data.map(|b| b & 1),
            parity: parity & 1,
        }
    }

    /// Build a parity-valid frame for `data` under `convention`.
    pub fn encode(data: [u8; DATA_BITS], convention: ParityConvention) -> Self {
        let data = data.map(|b| b & 1);
        let parity = compute_parity_bit(&data, convention);
        Self { data, parity }
    }

    /// Parse a single token of exactly nine `0`/`1` characters.
    ///
    /// # Errors
    /// `Error::MalformedFrame` carrying the token unchanged.
    pub fn from_token(token: &str) -> Result<Self> {
        let bytes = token.as_bytes();
        if bytes.len() != FRAME_BITS || !bytes.iter().all(|b| matches!(b, b'0' | b'1')) {
            return Err(Error::MalformedFrame(token.to_string()));
        }

        let mut data = [0u8; DATA_BITS];
        for (bit, &byte) in data.iter_mut().zip(bytes) {
            *bit = byte - b'0';
        }
        let parity = bytes[PARITY_INDEX] - b'0';

        Ok(Self { data, parity })
    }

    /// The eight data bits.
    pub fn data_bits(&self) -> &[u8; DATA_BITS] {
        &self.data
    }

    /// The ninth (parity) bit as received.
    pub fn parity_bit(&self) -> u8 {
        self.parity
    }

    /// Bit at `index` (0-8), or `None` past the end.
    pub fn bit(&self, index: usize) -> Option<u8> {
        match index {
            i if i < DATA_BITS => Some(self.data[i]),
            PARITY_INDEX => Some(self.parity),
            _ => None,
        }
    }

    /// All nine bits in transmission order.
    pub fn bits(&self) -> [u8; FRAME_BITS] {
        let mut bits = [0u8; FRAME_BITS];
        bits[..DATA_BITS].copy_from_slice(&self.data);
        bits[PARITY_INDEX] = self.parity;
        bits
    }

    /// Same data bits with the parity bit replaced.
    pub fn with_parity_bit(&self, parity: u8) -> Self {
        Self {
            data: self.data,
            parity: parity & 1,
        }
    }

    /// Invert the bit at `index`. Returns false (and changes nothing) when
    /// `index` is past the end of the frame.
    pub fn flip(&mut self, index: usize) -> bool {
        match index {
            i if i < DATA_BITS => self.data[i] ^= 1,
            PARITY_INDEX => self.parity ^= 1,
            _ => return false,
        }
        true
    }

    /// Total number of 1s across all nine bits.
    pub fn ones(&self) -> u32 {
        self.bits().iter().map(|&b| u32::from(b)).sum()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits() {
            f.write_str(if bit == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for Frame {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Frame::from_token(s)
    }
}

/// An ordered sequence of frames.
///
/// Order matches the left-to-right order of tokens in the parsed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameSet {
    frames: Vec<Frame>,
}

impl FrameSet {
    /// Parse whitespace-separated frames.
    ///
    /// # Errors
    /// - `Error::EmptyInput` if no tokens remain after trimming
    /// - `Error::MalformedFrame` for the first token that is not nine binary digits
    pub fn parse(input: &str) -> Result<Self> {
        let frames = input
            .split_whitespace()
            .map(Frame::from_token)
            .collect::<Result<Vec<_>>>()?;

        if frames.is_empty() {
            return Err(Error::EmptyInput);
        }

        Ok(Self { frames })
    }

    /// Frames in order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
        self.frames.iter()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl From<Vec<Frame>> for FrameSet {
    fn from(frames: Vec<Frame>) -> Self {
        Self { frames }
    }
}

impl FromIterator<Frame> for FrameSet {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FrameSet {
    type Item = &'a Frame;
    type IntoIter = std::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

/// Canonical text: frames joined by a single space.
impl fmt::Display for FrameSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, frame) in self.frames.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{frame}")?;
        }
        Ok(())
    }
}

impl FromStr for FrameSet {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FrameSet::parse(s)
    }
}

/// Parse whitespace-separated frames. See [`FrameSet::parse`].
pub fn parse(input: &str) -> Result<FrameSet> {
    FrameSet::parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample() {
        let set = parse("010010000 011010011 011001010").unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.frames()[0].bits(), [0, 1, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(set.frames()[1].bits(), [0, 1, 1, 0, 1, 0, 0, 1, 1]);
        assert_eq!(set.frames()[2].bits(), [0, 1, 1, 0, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_parse_irregular_whitespace() {
        let set = parse("  101100100\t\n011010011   ").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_string(), "101100100 011010011");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse(""), Err(Error::EmptyInput));
        assert_eq!(parse("   \n\t "), Err(Error::EmptyInput));
    }

    #[test]
    fn test_parse_short_token() {
        assert_eq!(parse("1010"), Err(Error::MalformedFrame("1010".to_string())));
    }

    #[test]
    fn test_parse_long_token() {
        assert_eq!(
            parse("1010101010"),
            Err(Error::MalformedFrame("1010101010".to_string()))
        );
    }

    #[test]
    fn test_parse_non_binary_token() {
        assert_eq!(
            parse("101100100 10110012x"),
            Err(Error::MalformedFrame("10110012x".to_string()))
        );
    }

    #[test]
    fn test_parse_reports_first_bad_token() {
        assert_eq!(
            parse("101100100 abc 12"),
            Err(Error::MalformedFrame("abc".to_string()))
        );
    }

    #[test]
    fn test_parse_multibyte_token() {
        // Nine characters but not nine bytes
        let token = "10110010é";
        assert_eq!(parse(token), Err(Error::MalformedFrame(token.to_string())));
    }

    #[test]
    fn test_frame_accessors() {
        let frame: Frame = "101100101".parse().unwrap();

        assert_eq!(frame.data_bits(), &[1, 0, 1, 1, 0, 0, 1, 0]);
        assert_eq!(frame.parity_bit(), 1);
        assert_eq!(frame.bit(8), Some(1));
        assert_eq!(frame.bit(9), None);
        assert_eq!(frame.ones(), 5);
    }

    #[test]
    fn test_flip() {
        let mut frame: Frame = "000000000".parse().unwrap();

        assert!(frame.flip(3));
        assert!(frame.flip(8));
        assert!(!frame.flip(9));
        assert_eq!(frame.to_string(), "000100001");
    }

    #[test]
    fn test_encode() {
        let frame = Frame::encode([1, 0, 1, 1, 0, 0, 1, 0], ParityConvention::Odd);
        assert_eq!(frame.to_string(), "101100101");
        assert_eq!(frame.with_parity_bit(0).to_string(), "101100100");
    }

    #[test]
    fn test_new_masks_bits() {
        let frame = Frame::new([2, 3, 0, 1, 0, 0, 0, 0], 7);
        assert_eq!(frame.to_string(), "010100001");
    }

    #[test]
    fn test_display_round_trip() {
        let text = "010010000 011010011 011001010";
        assert_eq!(parse(text).unwrap().to_string(), text);
    }
}
