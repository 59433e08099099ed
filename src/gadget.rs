//! Tseitin-style gadgets appended to a [`Formula`].
//!
//! These are the building blocks of the miter (see [`crate::miter`]) and of the
//! duplicate-and-compare encoding (see [`crate::models`]):
//! - [`Formula::add_equivalence`] encodes `c <-> (a <-> b)` in 4 clauses,
//! - [`Formula::add_clause_indicator`] encodes `e <-> (l1 or ... or ln)` in `n + 1` clauses,
//! - [`Formula::add_satisfaction_indicator`] names the satisfaction of a whole formula,
//! - [`Formula::add_xor_whose_output_is_true`] forces two literals to differ.
//!
//! No gadget simplifies its output: tautological or duplicated clauses are emitted as built.

use log::debug;

use crate::{Formula, Lit};

impl Formula {
    /// Add clauses that encode `c <-> (a <-> b)`.
    ///
    /// Equivalently, the clauses are satisfied iff an odd number of `a`, `b`, `c` is true.
    /// This is the minimal CNF of the 3-input parity function:
    /// `(a, b, c)`, `(!a, !b, c)`, `(a, !b, !c)`, `(!a, b, !c)`.
    pub fn add_equivalence(&mut self, a: Lit, b: Lit, c: Lit) {
        self.add_clause([a, b, c]);
        self.add_clause([!a, !b, c]);
        self.add_clause([a, !b, !c]);
        self.add_clause([!a, b, !c]);
    }

    /// Add clauses that encode `indicator <-> (l1 or ... or ln)` for `clause = (l1, ..., ln)`.
    ///
    /// - `(l1, ..., ln, !indicator)`: if the indicator is false, the clause must hold,
    /// - `(indicator, !li)` for each `i`: any true literal forces the indicator.
    ///
    /// An empty clause yields the single clause `(!indicator)`.
    pub fn add_clause_indicator(&mut self, clause: &[Lit], indicator: Lit) {
        let mut lits = Vec::with_capacity(clause.len() + 1);
        lits.extend_from_slice(clause);
        lits.push(!indicator);
        self.add_clause(lits);

        for &l in clause {
            self.add_clause([indicator, !l]);
        }
    }

    /// Encodes the satisfaction of `input` into this formula and returns a literal
    /// which is true exactly when the current assignment satisfies every clause of `input`.
    ///
    /// One indicator `ei` is allocated per clause `Ci` of `input` (see [`add_clause_indicator`]),
    /// then a last indicator `e` is allocated and tied with `!e <-> (!e1 or ... or !em)`,
    /// that is `e <-> (e1 and ... and em)`.
    ///
    /// Variables of `input` are used as is, so they must already be allocated in `self`.
    /// With `m` clauses in `input`, this allocates `m + 1` variables and
    /// appends `sum(|Ci| + 1) + m + 1` clauses.
    ///
    /// [`add_clause_indicator`]: Formula::add_clause_indicator
    pub fn add_satisfaction_indicator(&mut self, input: &Formula) -> Lit {
        debug_assert!(
            input.num_vars() <= self.num_vars(),
            "input variables must be allocated in the destination formula"
        );

        let mut negated_indicators = Vec::with_capacity(input.num_clauses());
        for clause in input.clauses() {
            let e = self.new_lit();
            self.add_clause_indicator(clause, e);
            negated_indicators.push(!e);
        }

        let e = self.new_lit();
        self.add_clause_indicator(&negated_indicators, !e);
        debug!(
            "satisfaction indicator {} over {} clauses",
            e,
            input.num_clauses()
        );
        e
    }

    /// Add clauses that encode `XOR(a, b) = true`: `(a, b)` and `(!a, !b)`.
    ///
    /// Applied to the satisfaction indicators of two formulas over the same variables,
    /// the result is satisfiable iff some assignment satisfies exactly one of them.
    pub fn add_xor_whose_output_is_true(&mut self, a: Lit, b: Lit) {
        self.add_clause([a, b]);
        self.add_clause([!a, !b]);
    }
}
