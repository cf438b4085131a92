//! Subcommand modules for the `enzdist` binary.

pub mod calc_distances;
pub mod finalize_distances;
