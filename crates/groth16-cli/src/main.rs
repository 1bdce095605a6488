//! `groth16` command-line entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use groth16_cli::commands::{self, GenerateArgs, ProveArgs, RunArgs, VerifyArgs};
use groth16_cli::common::ConfigUtils;
use rand::rngs::OsRng;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "groth16")]
#[command(about = "Groth16 zk-SNARK generator, prover and verifier for R1CS circuits")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON configuration file (codec settings)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a proving key and a verification key for a circuit
    Generate(GenerateArgs),
    /// Prove that a witness satisfies a circuit
    Prove(ProveArgs),
    /// Verify a proof against a primary input
    Verify(VerifyArgs),
    /// Generate, prove and verify in one go
    Run(RunArgs),
}

enum Outcome {
    Done,
    Verdict(bool),
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn execute(cli: Cli) -> anyhow::Result<Outcome> {
    let config = ConfigUtils::load_or_default(cli.config.as_deref()).context("failed to load configuration")?;

    match cli.command {
        Commands::Generate(args) => {
            commands::generate_keys(&args, &config, &mut OsRng)
                .with_context(|| format!("key generation for {} failed", args.circuit.display()))?;
            Ok(Outcome::Done)
        }
        Commands::Prove(args) => {
            commands::prove(&args, &config, &mut OsRng)
                .with_context(|| format!("proving with {} failed", args.proving_key.display()))?;
            Ok(Outcome::Done)
        }
        Commands::Verify(args) => {
            let accepted = commands::verify(&args, &config)
                .with_context(|| format!("could not verify {}", args.proof.display()))?;
            Ok(Outcome::Verdict(accepted))
        }
        Commands::Run(args) => {
            let accepted = commands::run(&args, &config, &mut OsRng)
                .with_context(|| format!("run over {} failed", args.circuit.display()))?;
            Ok(Outcome::Verdict(accepted))
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(cli) {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::Verdict(true)) => {
            println!("ACCEPTED");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Verdict(false)) => {
            println!("REJECTED");
            ExitCode::from(1)
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from([
            "groth16",
            "-vv",
            "prove",
            "--circuit",
            "cs.json",
            "--witness",
            "w.json",
            "--primary-input-out",
            "primary.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Prove(args) => {
                assert_eq!(args.proving_key, PathBuf::from("pk.bin"));
                assert_eq!(args.proof, PathBuf::from("proof.bin"));
                assert_eq!(args.primary_input_out, Some(PathBuf::from("primary.json")));
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cli = Cli::try_parse_from(["groth16", "run", "-c", "cs.json", "-w", "w.json", "--test-serialization"]).unwrap();
        assert!(matches!(cli.command, Commands::Run(RunArgs { test_serialization: true, .. })));
    }

    #[test]
    fn test_verify_requires_primary_input() {
        assert!(Cli::try_parse_from(["groth16", "verify", "--proof", "p.bin"]).is_err());
    }
}
