//! # Generate and Random Subcommands
//!
//! `kt generate` builds the identifier for one date. `kt random` draws dates
//! from a range. Both print one identifier per line, dashed unless
//! `--digits-only` is given.

use std::io::Write;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;

use kennitala_core::generate::{default_start, today};
use kennitala_core::{generate_with, generate_with_rng, random_with, CenturyPolicy, Kennitala};

use crate::EXIT_OK;

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Birth or registration date (YYYY-MM-DD).
    #[arg(long)]
    pub date: NaiveDate,

    /// Generate an organization identifier instead of a person's.
    #[arg(long)]
    pub organization: bool,

    /// Draw the serial at random instead of taking the lowest usable one.
    #[arg(long)]
    pub random_serial: bool,

    /// Seed for `--random-serial`, for reproducible output.
    #[arg(long, requires = "random_serial")]
    pub seed: Option<u64>,

    /// Print the ten digits without separator.
    #[arg(long)]
    pub digits_only: bool,
}

/// Arguments for the `random` subcommand.
#[derive(Args, Debug)]
pub struct RandomArgs {
    /// First date of the range (YYYY-MM-DD). Defaults to 1900-01-01.
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date of the range (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Generate organization identifiers instead of persons'.
    #[arg(long)]
    pub organization: bool,

    /// How many identifiers to print.
    #[arg(long, short = 'n', default_value_t = 1)]
    pub count: usize,

    /// Seed the random number generator for reproducible output.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the ten digits without separator.
    #[arg(long)]
    pub digits_only: bool,
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn render(kt: &Kennitala, digits_only: bool) -> Result<String> {
    let rendered = if digits_only {
        kt.digits_only()
    } else {
        kt.with_separator()
    };
    rendered.with_context(|| format!("generated identifier {} did not validate", kt.as_raw()))
}

/// Execute the generate subcommand.
pub fn run_generate<W: Write>(
    args: &GenerateArgs,
    policy: CenturyPolicy,
    out: &mut W,
) -> Result<u8> {
    let is_person = !args.organization;
    if !policy.representable_years().contains(&args.date.year()) {
        tracing::warn!(
            date = %args.date,
            %policy,
            "year is outside the policy's century range; the identifier will decode to another century"
        );
    }

    let kt = if args.random_serial {
        generate_with_rng(&mut rng_from(args.seed), policy, args.date, is_person)
    } else {
        generate_with(policy, args.date, is_person)
    };
    tracing::debug!(date = %args.date, is_person, kennitala = kt.as_raw(), "generated kennitala");

    writeln!(out, "{}", render(&kt, args.digits_only)?)?;
    Ok(EXIT_OK)
}

/// Reject ranges that reach years the policy cannot encode. Dates drawn from
/// them would decode to another century, or not at all.
fn check_encodable(policy: CenturyPolicy, start: NaiveDate, end: NaiveDate) -> Result<()> {
    let years = policy.representable_years();
    if start <= end && !(years.contains(&start.year()) && years.contains(&end.year())) {
        bail!(
            "range {start}..={end} is outside the years the {policy} century policy can encode ({}-{})",
            years.start(),
            years.end()
        );
    }
    Ok(())
}

/// Execute the random subcommand.
pub fn run_random<W: Write>(args: &RandomArgs, policy: CenturyPolicy, out: &mut W) -> Result<u8> {
    let is_person = !args.organization;
    let start = args.start.unwrap_or_else(default_start);
    let end = args.end.unwrap_or_else(today);
    check_encodable(policy, start, end)?;
    let mut rng = rng_from(args.seed);

    for _ in 0..args.count {
        let kt = random_with(&mut rng, policy, Some(start), Some(end), is_person)
            .context("cannot draw a date from the requested range")?;
        tracing::debug!(kennitala = kt.as_raw(), "generated kennitala");
        writeln!(out, "{}", render(&kt, args.digits_only)?)?;
    }

    tracing::info!(count = args.count, is_person, "random generation finished");
    Ok(EXIT_OK)
}
