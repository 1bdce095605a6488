//! Arithmetic circuit examples.
//!
//! Set `RUST_LOG=debug` to see the generator, prover and verifier spans.

use anyhow::Result;
use groth16_examples::run_all_examples;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("Groth16 Arithmetic Circuit Examples");
    println!("===================================\n");

    run_all_examples()
}
