//! Miters between two CNF formulas.
//!
//! To prove that two formulas `a` and `b` over the same variables are equivalent:
//! - build the miter with [`Miter::new`] (and [`Miter::with_shared_boundary`] if both are
//!   Tseitin encodings sharing their primary inputs),
//! - extract the resulting formula with [`Miter::build`],
//! - check that it is **UNSAT** with a SAT solver.
//!
//! If the resulting formula is SAT, any model restricted to the original variables
//! satisfies exactly one of `a` and `b`: the formulas are **not equivalent**.

use log::info;

use crate::{Formula, Lit, align::align_auxiliary_variables};

/// The struct used to compose the miter of two formulas.
///
/// Each formula is turned into a single satisfaction indicator (see
/// [`Formula::add_satisfaction_indicator`]), and both indicators are forced to differ.
#[derive(Debug, Clone)]
pub struct Miter {
    first: Formula,
    second: Formula,
    /// Number of primary input variables shared by both formulas, if aligned.
    shared_boundary: Option<u32>,
}

/// A composed miter formula, with the satisfaction indicators of both inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiterFormula {
    pub formula: Formula,
    pub first_indicator: Lit,
    pub second_indicator: Lit,
}

impl Miter {
    /// Create a miter between two formulas over the same original variables.
    pub fn new(first: Formula, second: Formula) -> Self {
        Miter {
            first,
            second,
            shared_boundary: None,
        }
    }

    /// Declares that variables `0..boundary` are primary inputs shared by both formulas,
    /// and that variables above are Tseitin auxiliaries to align before composing
    /// (see [`crate::align`]). A zero boundary disables the alignment.
    pub fn with_shared_boundary(mut self, boundary: u32) -> Self {
        self.shared_boundary = (boundary > 0).then_some(boundary);
        self
    }

    /// The first formula, as it will be composed.
    pub fn first(&self) -> &Formula {
        &self.first
    }

    /// The second formula, as it will be composed.
    pub fn second(&self) -> &Formula {
        &self.second
    }

    /// Aligns the inputs if a shared boundary was given, then composes the miter.
    pub fn build(mut self) -> MiterFormula {
        if let Some(boundary) = self.shared_boundary {
            align_auxiliary_variables(&mut self.first, &mut self.second, boundary);
        }
        Miter::compose(&self.first, &self.second)
    }

    /// Composes a new formula which is satisfiable iff some assignment satisfies
    /// exactly one of `first` and `second`.
    ///
    /// The variables of both inputs are reserved first, so the inputs share them;
    /// the indicators of `first` are allocated before those of `second`.
    pub fn compose(first: &Formula, second: &Formula) -> MiterFormula {
        let mut formula = Formula::with_vars(first.num_vars().max(second.num_vars()));
        info!("miter base formula reserved {} variables", formula.num_vars());

        let first_indicator = formula.add_satisfaction_indicator(first);
        info!(
            "after first satisfaction indicator, miter has {} variables",
            formula.num_vars()
        );
        let second_indicator = formula.add_satisfaction_indicator(second);
        info!(
            "after second satisfaction indicator, miter has {} variables",
            formula.num_vars()
        );

        formula.add_xor_whose_output_is_true(first_indicator, second_indicator);
        info!(
            "miter has {} variables and {} clauses",
            formula.num_vars(),
            formula.num_clauses()
        );

        MiterFormula {
            formula,
            first_indicator,
            second_indicator,
        }
    }
}
