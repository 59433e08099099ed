//! Generates a CNF formula which is unsatisfiable iff the two given formulas are equivalent.

mod common;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{WrapErr, bail};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use cnfmiter::{
    Formula,
    emit::{Emitter, OutputFormat},
    miter::Miter,
};

use common::{OutputArgs, file_name};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// First CNF formula (DIMACS, optionally gzip-compressed).
    #[arg(value_name = "FIRST")]
    first: PathBuf,

    /// Second CNF formula (DIMACS, optionally gzip-compressed).
    #[arg(value_name = "SECOND")]
    second: PathBuf,

    /// Number of primary input variables shared by both formulas.
    /// Variables above are Tseitin variables to align (0 disables the alignment).
    #[arg(short, long, value_name = "INT", default_value_t = 0, allow_negative_numbers = true)]
    tseitin: i64,

    /// Number of clauses randomly dropped from the first formula.
    #[arg(short, long, value_name = "INT", default_value_t = 0, allow_negative_numbers = true)]
    random_drop: i64,

    /// Seed of the random clause dropping.
    #[arg(long, value_name = "INT", default_value_t = 0)]
    seed: u64,

    #[command(flatten)]
    output: OutputArgs,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(if e.use_stderr() { 1 } else { 0 })
    });

    args.output.init_logger()?;

    info!("CNFmiter generates a CNF formula which is unsatisfiable iff the 2 given formulas are equivalent");

    if args.tseitin < 0 {
        bail!("tseitin variable {} is negative", args.tseitin);
    }
    if args.random_drop < 0 {
        bail!("random drop value {} is negative", args.random_drop);
    }
    let tseitin = u32::try_from(args.tseitin).wrap_err("tseitin variable is too large")?;
    let random_drop = usize::try_from(args.random_drop).wrap_err("random drop value is too large")?;

    let mut first = Formula::from_file(&args.first)
        .wrap_err_with(|| format!("failed to read first formula {}", args.first.display()))?;
    let second = Formula::from_file(&args.second)
        .wrap_err_with(|| format!("failed to read second formula {}", args.second.display()))?;
    info!(
        "parsed first formula with {} variables and {} clauses, second formula with {} variables and {} clauses",
        first.num_vars(),
        first.num_clauses(),
        second.num_vars(),
        second.num_clauses()
    );

    if random_drop > 0 {
        info!("randomly drop {} clauses from first formula", random_drop);
        let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
        first.drop_random_clauses(random_drop, &mut rng);
    }

    let miter = Miter::new(first, second).with_shared_boundary(tseitin).build();

    let mut description = format!("{} and {}", file_name(&args.first), file_name(&args.second));
    if tseitin != 0 {
        description += &format!(" with tseitin base variable {}", tseitin);
    }
    if random_drop != 0 {
        description += &format!(" with randomly dropping {} (seed {})", random_drop, args.seed);
    }
    let emitter = Emitter::new(OutputFormat::Plain)
        .comment(format!("CNFmiter {}", env!("CARGO_PKG_VERSION")))
        .comment(description)
        .comment("");

    let mut out = args.output.writer()?;
    emitter
        .write_formula(&mut out, &miter.formula)
        .wrap_err("failed to write the miter")?;

    Ok(())
}
