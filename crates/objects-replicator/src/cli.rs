//! Command-line surface (spec.md §6 "Replicator CLI"): three positional
//! arguments, plus `--dry-run`/`-v` supplementing (not replacing) them.

use clap::Parser;

/// Walk a bucket behind a locator and bring every object up to a
/// target replica count.
#[derive(Parser, Debug)]
#[command(name = "object-replicate", version, about)]
pub struct Cli {
    /// Base URL of the locator, e.g. `http://localhost:46580/`.
    pub locator: String,
    /// Bucket to replicate.
    pub bucket: String,
    /// Desired number of replicas per object.
    pub replicas: usize,

    /// Compute and log the planned copies without performing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose logging (debug-level spans for each object considered).
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Maximum number of objects replicated concurrently.
    #[arg(long, default_value_t = 8)]
    pub concurrency: usize,
}
