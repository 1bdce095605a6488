//! Range check example: `range_check [VALUE] [BITS]`

use anyhow::{Context, Result};
use groth16_examples::range_check_example;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let value = match args.next() {
        Some(v) => v.parse().context("VALUE must be an unsigned integer")?,
        None => 200,
    };
    let bits = match args.next() {
        Some(b) => b.parse().context("BITS must be an unsigned integer")?,
        None => 8,
    };

    range_check_example(value, bits)
}
