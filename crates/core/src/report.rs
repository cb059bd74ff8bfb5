//! Text rendering of engine results.
//!
//! This module turns frame sets and check reports into what a person reads:
//! - a frame table with per-bit highlights and a status column
//! - the detection procedure log (one derivation per frame)
//! - a `key=value` export for scripting and tests
//! - a walkthrough of how VRC works
//!
//! # Highlights
//!
//! Highlights are display metadata passed in beside the frames; they never
//! live inside a [`Frame`](crate::frame::Frame). A flipped bit is drawn as
//! `(b)` and a corrected parity bit as `[b]`. When both apply to the same
//! cell the flip marker wins.

use crate::channel::BitMutation;
use crate::check::CheckReport;
use crate::encoder::CorrectionSet;
use crate::frame::{FrameSet, DATA_BITS, PARITY_INDEX};

/// Per-bit highlighting for [`render_table`].
#[derive(Debug, Clone, Default)]
pub struct Highlights {
    /// Bit flipped by the last error simulation
    pub flipped: Option<BitMutation>,

    /// Frames whose parity bit was rewritten by the last correction
    pub corrected: CorrectionSet,
}

impl Highlights {
    pub fn for_flip(mutation: BitMutation) -> Self {
        Self {
            flipped: Some(mutation),
            corrected: CorrectionSet::default(),
        }
    }

    pub fn for_correction(corrections: CorrectionSet) -> Self {
        Self {
            flipped: None,
            corrected: corrections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flipped.is_none() && self.corrected.is_empty()
    }

    fn cell(&self, frame_index: usize, bit_index: usize, bit: u8) -> String {
        let is_flipped = self
            .flipped
            .is_some_and(|m| m.frame_index == frame_index && m.bit_index == bit_index);
        let is_corrected = bit_index == PARITY_INDEX && self.corrected.contains(frame_index);

        if is_flipped {
            format!("({bit})")
        } else if is_corrected {
            format!("[{bit}]")
        } else {
            format!(" {bit} ")
        }
    }
}

/// Render `frames` as a table.
///
/// The status column is filled from `report` when one is given and left
/// blank otherwise.
pub fn render_table(
    frames: &FrameSet,
    report: Option<&CheckReport>,
    highlights: &Highlights,
) -> String {
    let data_header: String = (1..=DATA_BITS)
        .map(|i| format!("{:^3}", format!("D{i}")))
        .collect();
    let header = format!("Row |{data_header}| {:^3} | Status", "P");

    let mut lines = vec![header.clone(), "-".repeat(header.len())];

    for (i, frame) in frames.iter().enumerate() {
        let cells: String = frame
            .data_bits()
            .iter()
            .enumerate()
            .map(|(bit_index, &bit)| highlights.cell(i, bit_index, bit))
            .collect();
        let parity = highlights.cell(i, PARITY_INDEX, frame.parity_bit());

        let status = match report.and_then(|r| r.results.get(i)) {
            Some(result) if result.mismatch => "Error!",
            Some(_) => "OK",
            None => "",
        };

        let row = format!("{:>3} |{cells}| {parity} | {status}", i + 1);
        lines.push(row.trim_end().to_string());
    }

    if !highlights.is_empty() {
        lines.push(String::new());
        lines.push("(b) flipped bit   [b] corrected parity bit".to_string());
    }

    lines.join("\n")
}

/// Render the detection procedure log: one block per frame.
pub fn render_log(report: &CheckReport) -> String {
    let mut blocks = Vec::with_capacity(report.results.len());

    for (i, result) in report.results.iter().enumerate() {
        let data: String = result.data_bits.iter().map(|b| b.to_string()).collect();
        let mut block = vec![format!(
            "[Row {}]: Received frame: {data} [parity: {}]",
            i + 1,
            result.received_parity
        )];

        // Derivation steps are numbered; the verdict is not
        let last = result.explanation.len().saturating_sub(1);
        for (n, step) in result.explanation.iter().enumerate() {
            if n == last {
                block.push(format!("  {step}"));
            } else {
                block.push(format!("  {}. {step}", n + 1));
            }
        }

        blocks.push(block.join("\n"));
    }

    blocks.join("\n\n")
}

/// Export a check report as `key=value` lines (for parsing/testing).
///
/// `mismatched_rows` lists 1-based row numbers separated by commas.
pub fn export_text(report: &CheckReport) -> String {
    let rows: Vec<String> = report
        .mismatched_indices()
        .iter()
        .map(|i| (i + 1).to_string())
        .collect();

    format!(
        "convention={}\n\
         frames={}\n\
         mismatches={}\n\
         mismatched_rows={}\n\
         result={}\n",
        report.convention,
        report.results.len(),
        report.mismatch_count(),
        rows.join(","),
        if report.is_clean() { "success" } else { "error" },
    )
}

/// Human description of a flipped bit, using 1-based numbering.
pub fn describe_mutation(mutation: &BitMutation) -> String {
    let position = if mutation.bit_index == PARITY_INDEX {
        "the parity bit".to_string()
    } else {
        format!("data bit D{}", mutation.bit_index + 1)
    };
    format!("Flipped {position} of row {}", mutation.frame_index + 1)
}

/// Human description of a correction pass, using 1-based numbering.
pub fn describe_corrections(corrections: &CorrectionSet) -> String {
    if corrections.is_empty() {
        return "All parity bits were already correct.".to_string();
    }
    let rows: Vec<String> = corrections.iter().map(|i| (i + 1).to_string()).collect();
    format!(
        "Corrected the parity bit of {} row(s): {}",
        corrections.len(),
        rows.join(", ")
    )
}

/// Walkthrough of the receiver's VRC procedure.
pub fn algorithm_text() -> &'static str {
    ALGORITHM
}

const ALGORITHM: &str = "How VRC (Parity Check) Works

1. The receiver gets a frame: 8 data bits followed by 1 parity bit.
2. A parity mode (even or odd) is agreed upon in advance.
3. The receiver counts the 1s in the 8 data bits.
4. If even parity:
   - an even count of 1s (0, 2, 4, 6, 8) expects a parity bit of 0
   - an odd count of 1s (1, 3, 5, 7) expects a parity bit of 1
5. If odd parity:
   - an even count of 1s (0, 2, 4, 6, 8) expects a parity bit of 1
   - an odd count of 1s (1, 3, 5, 7) expects a parity bit of 0
6. The receiver compares its expected parity bit with the received
   parity bit (the 9th bit).
7. If they match the frame is OK; if not, an error is detected.

A single flipped bit changes the count of 1s by one and is always
detected. Two flipped bits in the same frame cancel out and go unseen.
";
