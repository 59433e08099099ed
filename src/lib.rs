//! Compile CNF formulas into new CNF/WCNF formulas answering questions about them:
//! - are two formulas equivalent? see [`miter::Miter`],
//! - does a formula have two distinct models, and how far apart can they be? see [`models::MultiModel`].
//!
//! No SAT solving happens here: the produced formulas are meant for an external solver.

pub mod align;
pub mod emit;
pub mod formula;
pub mod gadget;
pub mod miter;
pub mod models;

// Re-exporting symbols and modules.
pub use formula::{Clause, Formula, FormulaError, Lit, ParserError, Result, Var};
