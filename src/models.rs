//! Queries about several models of one formula.
//!
//! [`MultiModel`] duplicates a formula `F` over `n` variables: the copy uses variables
//! `n..2n`, so a model of the result holds two models of `F`. For each compared variable
//! `i`, a fresh indicator `equal_i <-> (x_i <-> x_{i+n})` is added, then
//! - [`MultiModel::encode`] adds the clause `(!equal_1, ..., !equal_k)`: the result is
//!   satisfiable iff `F` has two models differing on one of the first `k` variables,
//! - [`MultiModel::encode_maxsat`] also exposes every `!equal_i` as a soft unit clause of
//!   weight 1, so a MaxSAT solver finds two models at the largest Hamming distance.
//!
//! Each compared variable costs one variable and 4 clauses, and the final clause has `k`
//! literals: bound `k` with [`MultiModel::with_compare_prefix`] on large formulas.

use log::{info, warn};

use crate::{Clause, Formula, Lit, Var};

/// Builder for the duplicate-and-compare encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiModel {
    /// Number of leading variables to compare, all of them if `None`.
    compare_prefix: Option<u32>,
}

/// A formula holding two copies of an input formula, and the "equal" indicators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatedFormula {
    pub formula: Formula,
    /// Variable `v` of the input is variable `v + offset` in the second copy.
    pub offset: u32,
    /// `equal_lits[i]` is true iff both copies agree on variable `i`.
    pub equal_lits: Vec<Lit>,
}

/// A MaxSAT instance: hard clauses, and soft unit clauses of weight 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedFormula {
    pub hard: Formula,
    pub soft: Vec<Lit>,
}

impl MultiModel {
    /// Compares all variables of the input.
    pub fn new() -> Self {
        MultiModel::default()
    }

    /// Only compares the first `k` variables of the input. Zero compares all of them.
    ///
    /// With `k` smaller than the variable count, a model of the result only proves two
    /// models that differ on one of the first `k` variables.
    pub fn with_compare_prefix(mut self, k: u32) -> Self {
        self.compare_prefix = (k > 0).then_some(k);
        self
    }

    /// Number of variables compared for an input of `num_vars` variables.
    pub fn compared_vars(&self, num_vars: u32) -> u32 {
        match self.compare_prefix {
            Some(k) if k > num_vars => {
                warn!(
                    "comparison prefix {} exceeds the {} input variables, clamping",
                    k, num_vars
                );
                num_vars
            }
            Some(k) => k,
            None => num_vars,
        }
    }

    /// Duplicates `input` and adds the "equal" indicators, without any final constraint.
    ///
    /// Panics if the two copies do not fit [`Formula::MAX_VARS`].
    pub fn duplicate(&self, input: &Formula) -> DuplicatedFormula {
        let offset = input.num_vars();
        assert!(
            offset <= Formula::MAX_VARS / 2,
            "{} variables cannot be duplicated within Formula::MAX_VARS",
            offset
        );
        let mut formula = Formula::with_vars(2 * offset);

        // Clauses are interleaved: each clause followed by its copy.
        for clause in input.clauses() {
            formula.add_clause(clause.clone());
            formula.add_clause(clause.iter().map(|l| l.shifted(offset)).collect::<Clause>());
        }

        let k = self.compared_vars(offset);
        info!("encode variable equivalences for first {} variables", k);
        let equal_lits = (0..k)
            .map(|i| {
                let v = Var::new(i);
                let equal = formula.new_lit();
                formula.add_equivalence(v.pos(), v.shifted(offset).pos(), equal);
                equal
            })
            .collect();

        DuplicatedFormula {
            formula,
            offset,
            equal_lits,
        }
    }

    /// Encodes "`input` has two models that differ on a compared variable".
    pub fn encode(&self, input: &Formula) -> DuplicatedFormula {
        let mut dup = self.duplicate(input);
        let one_differs: Clause = dup.equal_lits.iter().map(|&e| !e).collect();
        dup.formula.add_clause(one_differs);
        info!(
            "duplicated formula has {} variables and {} clauses",
            dup.formula.num_vars(),
            dup.formula.num_clauses()
        );
        dup
    }

    /// Same hard clauses as [`encode`], plus one soft unit clause `!equal_i`
    /// per compared variable, rewarding models that differ on as many variables as possible.
    ///
    /// [`encode`]: MultiModel::encode
    pub fn encode_maxsat(&self, input: &Formula) -> WeightedFormula {
        let dup = self.encode(input);
        let soft = dup.equal_lits.iter().map(|&e| !e).collect();
        WeightedFormula {
            hard: dup.formula,
            soft,
        }
    }
}

impl DuplicatedFormula {
    /// Splits an assignment of the duplicated formula into the assignments of both copies.
    pub fn split_assignment(&self, assignment: &[bool]) -> (Vec<bool>, Vec<bool>) {
        let n = self.offset as usize;
        (assignment[..n].to_vec(), assignment[n..2 * n].to_vec())
    }
}
