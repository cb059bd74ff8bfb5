//! Command handlers.
//!
//! Each handler parses the frame text it is given, calls the engine, and
//! prints what came back. Handlers hold no state; the only thing carried
//! between steps of the demo is the canonical frame text itself.

use std::num::NonZeroUsize;
use std::process::ExitCode;

use anyhow::{Context, Result};
use vrc_sim_core::{
    check, correct, generate, parse,
    report::{
        algorithm_text, describe_corrections, describe_mutation, export_text, render_log,
        render_table, Highlights,
    },
    simulate_single_bit_error, CheckReport, FrameSet, SeededSource,
};

use crate::config::{Cli, Command, Config};

/// How a command ended, for the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command finished and every check (if any) was clean
    Clean,
    /// The last check found at least one mismatch
    Mismatch,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Clean => ExitCode::SUCCESS,
            Outcome::Mismatch => ExitCode::from(1),
        }
    }
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> Result<Outcome> {
    let config = Config::resolve(&cli);
    tracing::info!(seed = config.seed, convention = %config.convention, "resolved configuration");

    if config.print_config {
        config.print();
    }

    match cli.command {
        Command::Check(args) => run_check(&config, &args.text()),
        Command::Generate(args) => run_generate(&config, args.count),
        Command::Corrupt(args) => run_corrupt(&config, &args.text()),
        Command::Correct(args) => run_correct(&config, &args.text()),
        Command::Algorithm => {
            print!("{}", algorithm_text());
            Ok(Outcome::Clean)
        }
        Command::Demo(args) => run_demo(&config, args.count),
    }
}

fn run_check(config: &Config, text: &str) -> Result<Outcome> {
    let frames = parse(text).context("cannot check invalid data")?;
    let report = check(&frames, config.convention);

    print_check(config, &frames, &report, &Highlights::default());

    Ok(outcome(&report))
}

fn run_generate(config: &Config, count: NonZeroUsize) -> Result<Outcome> {
    let frames = generate(count, config.convention, SeededSource::new(config.seed));

    println!("{frames}");
    println!();
    println!("Seed: {}", config.seed);
    Ok(Outcome::Clean)
}

fn run_corrupt(config: &Config, text: &str) -> Result<Outcome> {
    let frames = parse(text).context("cannot simulate error on invalid data")?;
    let (corrupted, mutation) = simulate_single_bit_error(&frames, SeededSource::new(config.seed))?;

    println!("{corrupted}");
    println!();
    println!("{}", describe_mutation(&mutation));
    println!("Seed: {}", config.seed);
    println!();
    println!("{}", render_table(&corrupted, None, &Highlights::for_flip(mutation)));
    Ok(Outcome::Clean)
}

fn run_correct(config: &Config, text: &str) -> Result<Outcome> {
    let frames = parse(text).context("cannot correct invalid data")?;
    let (corrected, corrections) = correct(&frames, config.convention);

    println!("{corrected}");
    println!();
    println!("{}", describe_corrections(&corrections));
    println!();
    println!("{}", render_table(&corrected, None, &Highlights::for_correction(corrections)));
    Ok(Outcome::Clean)
}

/// Generate -> check -> corrupt -> check -> correct -> check.
///
/// Each step re-parses the text the previous step produced, the same way the
/// interactive simulator feeds its input box back into the engine.
fn run_demo(config: &Config, count: NonZeroUsize) -> Result<Outcome> {
    let mut source = SeededSource::new(config.seed);
    let convention = config.convention;

    println!("=== VRC Demo ({} parity, seed {}) ===", convention.title(), source.seed());
    println!();

    println!("--- Step 1: Sender generates {count} frame(s) ---");
    let text = generate(count, convention, &mut source).to_string();
    println!("{text}");
    println!();

    println!("--- Step 2: Receiver checks the frames ---");
    let frames = parse(&text)?;
    let report = check(&frames, convention);
    print_check(config, &frames, &report, &Highlights::default());
    println!();

    println!("--- Step 3: Channel flips one bit ---");
    let (corrupted, mutation) = simulate_single_bit_error(&frames, &mut source)?;
    let text = corrupted.to_string();
    println!("{text}");
    println!("{}", describe_mutation(&mutation));
    println!();

    println!("--- Step 4: Receiver checks again ---");
    let frames = parse(&text)?;
    let report = check(&frames, convention);
    print_check(config, &frames, &report, &Highlights::for_flip(mutation));
    println!();

    println!("--- Step 5: Parity bits are recomputed ---");
    let (corrected, corrections) = correct(&frames, convention);
    let text = corrected.to_string();
    println!("{text}");
    println!("{}", describe_corrections(&corrections));
    println!();

    println!("--- Step 6: Final check ---");
    let frames = parse(&text)?;
    let report = check(&frames, convention);
    print_check(config, &frames, &report, &Highlights::for_correction(corrections));

    Ok(outcome(&report))
}

fn print_check(config: &Config, frames: &FrameSet, report: &CheckReport, highlights: &Highlights) {
    println!("{}", render_table(frames, Some(report), highlights));
    println!();
    println!("=== Detection Procedure Log ===");
    println!("{}", render_log(report));
    println!();
    println!("{}", report.summary());

    if config.export {
        println!();
        print!("{}", export_text(report));
    }
}

fn outcome(report: &CheckReport) -> Outcome {
    if report.is_clean() {
        Outcome::Clean
    } else {
        Outcome::Mismatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn run_args(args: &[&str]) -> Result<Outcome> {
        run(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_check_clean_frames() {
        let code = run_args(&["vrc-sim", "check", "101100100"]).unwrap();
        assert_eq!(code, Outcome::Clean);
    }

    #[test]
    fn test_check_mismatch_exit_code() {
        let code = run_args(&["vrc-sim", "check", "--parity", "odd", "101100100"]).unwrap();
        assert_eq!(code, Outcome::Mismatch);
    }

    #[test]
    fn test_check_invalid_input() {
        let err = run_args(&["vrc-sim", "check", "1010"]).unwrap_err();

        assert!(err.to_string().contains("cannot check invalid data"));
        let source = err.downcast_ref::<vrc_sim_core::Error>();
        assert_eq!(source, Some(&vrc_sim_core::Error::MalformedFrame("1010".to_string())));
    }

    #[test]
    fn test_corrupt_and_correct_succeed() {
        assert!(run_args(&["vrc-sim", "--seed", "1", "corrupt"]).is_ok());
        assert!(run_args(&["vrc-sim", "correct", "101100101"]).is_ok());
    }

    #[test]
    fn test_demo_ends_clean() {
        for parity in ["even", "odd"] {
            let code = run_args(&["vrc-sim", "--seed", "99", "--parity", parity, "demo"]).unwrap();
            assert_eq!(code, Outcome::Clean);
        }
    }
}
