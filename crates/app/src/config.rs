//! Configuration for the vrc-sim application.
//!
//! Parses the command line with clap and resolves it into a [`Config`],
//! filling in defaults (including a time-derived seed) so every run can be
//! reproduced from what it prints.
//!
//! # Philosophy
//!
//! The tool should work with zero frame arguments: commands that take frames
//! fall back to the sample input `010010000 011010011 011001010`.

use std::num::NonZeroUsize;

use clap::{Args, Parser, Subcommand};
use vrc_sim_core::{ParityConvention, DEFAULT_FRAME_COUNT};

/// Frames used when none are given on the command line
pub const SAMPLE_INPUT: &str = "010010000 011010011 011001010";

/// Vertical Redundancy Check (VRC) simulator.
#[derive(Parser, Debug)]
#[command(name = "vrc-sim", version, about = "Vertical Redundancy Check (VRC) simulator")]
pub struct Cli {
    /// Parity convention used for checking, generating and correcting
    #[arg(long, global = true, default_value_t = ParityConvention::Even)]
    pub parity: ParityConvention,

    /// Random seed for determinism (default: derived from the clock)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Print the resolved configuration before running
    #[arg(long, global = true)]
    pub print_config: bool,

    /// Append a key=value export after every check
    #[arg(long, global = true)]
    pub export: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per simulator action.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check frames as the receiver and explain every verdict
    Check(FramesArgs),

    /// Generate random frames with valid parity
    Generate(CountArgs),

    /// Flip one random bit to simulate a transmission error
    Corrupt(FramesArgs),

    /// Recompute every parity bit from its data bits
    Correct(FramesArgs),

    /// Explain how VRC works
    Algorithm,

    /// Walk through generate, corrupt, check and correct in one run
    Demo(CountArgs),
}

/// Frames to operate on.
#[derive(Args, Debug)]
pub struct FramesArgs {
    /// 9-bit frames (8 data + 1 parity), e.g. 101100100 011010011
    pub frames: Vec<String>,
}

impl FramesArgs {
    /// Frame text to parse: the arguments joined by spaces, or the sample.
    pub fn text(&self) -> String {
        if self.frames.is_empty() {
            SAMPLE_INPUT.to_string()
        } else {
            self.frames.join(" ")
        }
    }
}

/// How many frames to generate.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Number of frames
    #[arg(long, short = 'n', default_value_t = default_count())]
    pub count: NonZeroUsize,
}

fn default_count() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_FRAME_COUNT).unwrap_or(NonZeroUsize::MIN)
}

/// Resolved settings shared by every command.
#[derive(Debug, Clone)]
pub struct Config {
    /// Parity convention in effect
    pub convention: ParityConvention,

    /// Seed for every random choice in this run
    pub seed: u64,

    /// Whether to print the resolved configuration
    pub print_config: bool,

    /// Whether to append key=value exports after checks
    pub export: bool,
}

impl Config {
    /// Resolve defaults for anything the command line left out.
    ///
    /// Without `--seed` the seed comes from the clock, so it differs per run
    /// but is still printed and can be replayed.
    pub fn resolve(cli: &Cli) -> Self {
        let seed = cli.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });

        Config {
            convention: cli.parity,
            seed,
            print_config: cli.print_config,
            export: cli.export,
        }
    }

    /// Print the configuration in human-readable form.
    pub fn print(&self) {
        println!("=== Configuration ===");
        println!("Parity mode: {} parity", self.convention.title());
        println!("Seed: {}", self.seed);
        println!("Export: {}", if self.export { "on" } else { "off" });
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["vrc-sim", "check"]);

        assert_eq!(cli.parity, ParityConvention::Even);
        assert!(cli.seed.is_none());
        match cli.command {
            Command::Check(args) => assert_eq!(args.text(), SAMPLE_INPUT),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_frames_joined() {
        let cli = parse(&["vrc-sim", "check", "101100100", "011010011"]);
        match cli.command {
            Command::Check(args) => assert_eq!(args.text(), "101100100 011010011"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["vrc-sim", "correct", "--parity", "odd", "--seed", "42", "101100101"]);

        assert_eq!(cli.parity, ParityConvention::Odd);
        assert_eq!(cli.seed, Some(42));
        assert!(matches!(cli.command, Command::Correct(_)));
    }

    #[test]
    fn test_generate_count() {
        match parse(&["vrc-sim", "generate"]).command {
            Command::Generate(args) => assert_eq!(args.count.get(), DEFAULT_FRAME_COUNT),
            other => panic!("unexpected command {other:?}"),
        }
        match parse(&["vrc-sim", "generate", "-n", "7"]).command {
            Command::Generate(args) => assert_eq!(args.count.get(), 7),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_demo_count_follows_library_default() {
        match parse(&["vrc-sim", "demo"]).command {
            Command::Demo(args) => assert_eq!(args.count, default_count()),
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(default_count().get(), DEFAULT_FRAME_COUNT);
    }

    #[test]
    fn test_rejects_zero_count() {
        assert!(Cli::try_parse_from(["vrc-sim", "generate", "--count", "0"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_parity() {
        assert!(Cli::try_parse_from(["vrc-sim", "check", "--parity", "mark"]).is_err());
    }

    #[test]
    fn test_resolve_keeps_explicit_seed() {
        let cli = parse(&["vrc-sim", "--seed", "12345", "--export", "demo"]);
        let config = Config::resolve(&cli);

        assert_eq!(config.seed, 12345);
        assert!(config.export);
        assert_eq!(config.convention, ParityConvention::Even);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
