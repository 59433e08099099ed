//! Generates a CNF (or MaxSAT) formula which is satisfiable iff the given formula has at least 2 models.

mod common;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{WrapErr, bail};
use log::info;

use cnfmiter::{
    Formula,
    emit::{Emitter, OutputFormat},
    models::MultiModel,
};

use common::{OutputArgs, file_name};

/// How the variable differences are rewarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MaxSatMode {
    /// Plain CNF: at least one variable differs.
    None,
    /// Pre-2021 WCNF with a `top` weight: maximize the number of differing variables.
    Legacy,
    /// Current WCNF with `h` hard clauses: maximize the number of differing variables.
    Modern,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// CNF formula (DIMACS, optionally gzip-compressed).
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Only compare the first INT variables of the two models (0 compares all variables).
    #[arg(short, long, value_name = "INT", default_value_t = 0, allow_negative_numbers = true)]
    tseitin: i64,

    /// Emit a MaxSAT formula maximizing the distance between the two models.
    #[arg(short, long, value_enum, default_value_t = MaxSatMode::None)]
    maxsat: MaxSatMode,

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

    info!("AtLeastTwoSolutions generates a formula which is satisfiable iff the given formula has at least 2 models");

    if args.tseitin < 0 {
        bail!("tseitin variable {} is negative", args.tseitin);
    }
    let prefix = u32::try_from(args.tseitin).wrap_err("tseitin variable is too large")?;

    let input = Formula::from_file(&args.input)
        .wrap_err_with(|| format!("failed to read formula {}", args.input.display()))?;
    info!(
        "parsed formula with {} variables and {} clauses",
        input.num_vars(),
        input.num_clauses()
    );

    let encoder = MultiModel::new().with_compare_prefix(prefix);

    let mut description = format!(
        "encode formula to check whether there are more than 1 solution for {}",
        file_name(&args.input)
    );
    if prefix != 0 {
        description += &format!(" with tseitin base variable {}", prefix);
    }
    let format = match args.maxsat {
        MaxSatMode::None => OutputFormat::Plain,
        MaxSatMode::Legacy => OutputFormat::LegacyWeighted,
        MaxSatMode::Modern => OutputFormat::ModernWeighted,
    };
    if format != OutputFormat::Plain {
        description += " maximizing the number of different variables";
    }
    let emitter = Emitter::new(format)
        .comment(format!("AtLeastTwoSolutions {}", env!("CARGO_PKG_VERSION")))
        .comment(description)
        .comment("");

    let mut out = args.output.writer()?;
    let written = match format {
        OutputFormat::Plain => emitter.write_formula(&mut out, &encoder.encode(&input).formula),
        _ => emitter.write_weighted(&mut out, &encoder.encode_maxsat(&input)),
    };
    written.wrap_err("failed to write the formula")?;

    Ok(())
}
