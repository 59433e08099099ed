//! Rendering formulas to the DIMACS CNF and WCNF wire formats.
//!
//! The encoders only produce hard clauses and weight-1 soft literals ([`WeightedFormula`]);
//! the concrete wire format is chosen once, here, with [`OutputFormat`]:
//! - [`OutputFormat::Plain`]: `p cnf <vars> <clauses>`, then one clause per line,
//! - [`OutputFormat::LegacyWeighted`]: `p wcnf <vars> <clauses> <top>`, hard clauses
//!   weighted `top`, soft clauses weighted `1`,
//! - [`OutputFormat::ModernWeighted`]: no header, hard clauses tagged `h`, soft clauses weighted `1`.
//!
//! Every output starts with the `c ` comment lines registered on the [`Emitter`].
//!
//! ```rust
//! use cnfmiter::{Formula, emit::{Emitter, OutputFormat}};
//!
//! let f: Formula = "p cnf 2 1\n1 -2 0\n".parse().unwrap();
//! let mut out = Vec::new();
//! Emitter::new(OutputFormat::Plain)
//!     .comment("example")
//!     .write_formula(&mut out, &f)
//!     .unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "c example\np cnf 2 1\n1 -2 0\n");
//! ```

use std::io::{self, Write};

use crate::{Formula, Lit, models::WeightedFormula};

/// Wire format of the emitted formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// DIMACS CNF. Soft clauses cannot be represented.
    Plain,
    /// Pre-2021 WCNF, with a `top` weight marking hard clauses.
    /// The `top` weight is computed from the number of soft clauses when emitting.
    LegacyWeighted,
    /// 2022+ WCNF: hard clauses are tagged with `h`.
    ModernWeighted,
}

/// Writes formulas with a provenance preamble of comment lines.
#[derive(Debug, Clone)]
pub struct Emitter {
    format: OutputFormat,
    comments: Vec<String>,
}

fn write_lits<W: Write>(out: &mut W, lits: &[Lit]) -> io::Result<()> {
    for lit in lits {
        write!(out, "{} ", lit)?;
    }
    writeln!(out, "0")
}

/// The `top` weight of a legacy WCNF with `num_soft` unit soft clauses of weight 1:
/// strictly greater than the sum of all soft weights.
pub fn legacy_top(num_soft: usize) -> u64 {
    num_soft as u64 + 1
}

impl Emitter {
    /// A new emitter, without any comment.
    pub fn new(format: OutputFormat) -> Self {
        Emitter {
            format,
            comments: Vec::new(),
        }
    }

    /// Registers a comment line, emitted as `c <line>` before the formula.
    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    fn write_comments<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for c in &self.comments {
            if c.is_empty() {
                writeln!(out, "c ")?;
            } else {
                writeln!(out, "c {}", c)?;
            }
        }
        Ok(())
    }

    /// Writes a formula without soft clauses. In weighted formats all clauses are hard.
    pub fn write_formula<W: Write>(&self, out: &mut W, formula: &Formula) -> io::Result<()> {
        self.write(out, formula, &[])
    }

    /// Writes a MaxSAT instance.
    ///
    /// Soft clauses are dropped by [`OutputFormat::Plain`], which only keeps hard clauses.
    pub fn write_weighted<W: Write>(&self, out: &mut W, weighted: &WeightedFormula) -> io::Result<()> {
        self.write(out, &weighted.hard, &weighted.soft)
    }

    fn write<W: Write>(&self, out: &mut W, hard: &Formula, soft: &[Lit]) -> io::Result<()> {
        self.write_comments(out)?;
        match self.format {
            OutputFormat::Plain => {
                writeln!(out, "p cnf {} {}", hard.num_vars(), hard.num_clauses())?;
                for clause in hard.clauses() {
                    write_lits(out, clause)?;
                }
            }
            OutputFormat::LegacyWeighted => {
                let top = legacy_top(soft.len());
                writeln!(
                    out,
                    "p wcnf {} {} {}",
                    hard.num_vars(),
                    hard.num_clauses() + soft.len(),
                    top
                )?;
                for clause in hard.clauses() {
                    write!(out, "{} ", top)?;
                    write_lits(out, clause)?;
                }
                for &lit in soft {
                    writeln!(out, "1 {} 0", lit)?;
                }
            }
            OutputFormat::ModernWeighted => {
                for clause in hard.clauses() {
                    write!(out, "h ")?;
                    write_lits(out, clause)?;
                }
                for &lit in soft {
                    writeln!(out, "1 {} 0", lit)?;
                }
            }
        }
        out.flush()
    }
}

impl Formula {
    /// The formula in plain DIMACS CNF, without any comment.
    pub fn to_dimacs(&self) -> String {
        let mut out = Vec::new();
        Emitter::new(OutputFormat::Plain)
            .write_formula(&mut out, self)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(out).expect("DIMACS output is ASCII")
    }
}
