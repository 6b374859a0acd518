//! Random source inspection command.
//!
//! The `rng` command prints a short sample from the seeded ChaCha20 source
//! that drives every shuffle and roll, so two machines can confirm they
//! replay the same stream for a given seed.

use crate::error::CliError;
use chromatic_engine::dice::DEFAULT_SIDES;
use chromatic_engine::rng::{ChaChaSource, RandomSource};
use std::io::Write;

const SAMPLE_LEN: usize = 10;

/// Handle the rng command.
///
/// Draws ten d6 faces from a [`ChaChaSource`] seeded with `seed`, or with a
/// random seed when none is given. The seed is printed first so an unseeded
/// run can be reproduced.
pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = ChaChaSource::from_seed(s);
    let vals: Vec<u32> = (0..SAMPLE_LEN)
        .map(|_| rng.next_in_range(1, u32::from(DEFAULT_SIDES)))
        .collect();
    writeln!(out, "RNG seed: {}", s)?;
    writeln!(out, "RNG sample: {:?}", vals)?;
    Ok(())
}
