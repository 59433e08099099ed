//! Module defining the [`Formula`] container, as well as [`Clause`], [`Lit`] and [`Var`].
//!
//! A formula owns a monotonic variable counter and an ordered list of clauses.
//! Encoders in [`crate::gadget`], [`crate::miter`] and [`crate::models`] only ever append to it.

pub mod error;
pub mod lit;
mod parser;

use std::ops::Deref;

use log::debug;
use rand::Rng;

pub use error::{FormulaError, ParserError, Result};
pub use lit::{Lit, Var};

/// A SAT clause (disjunction of literals).
///
/// Literal order is kept as given for deterministic output. Clauses are never
/// simplified: duplicate literals and tautologies are emitted as constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Clause(Vec<Lit>);

impl Clause {
    /// A new empty clause.
    pub fn new() -> Self {
        Clause(Vec::new())
    }

    /// Appends a literal.
    pub fn push(&mut self, lit: Lit) {
        self.0.push(lit);
    }

    /// Iterates over the variables of the clause (with repetitions).
    pub fn vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.0.iter().map(|lit| lit.var())
    }

    /// True iff some literal is true under the assignment.
    pub fn eval(&self, assignment: &[bool]) -> bool {
        self.0.iter().any(|lit| lit.eval(assignment))
    }

    /// Signed DIMACS literals of the clause, in order.
    pub fn to_dimacs(&self) -> Vec<i64> {
        self.0.iter().map(|lit| lit.to_dimacs()).collect()
    }

    pub(crate) fn lits_mut(&mut self) -> &mut [Lit] {
        &mut self.0
    }
}

impl Deref for Clause {
    type Target = [Lit];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Lit>> for Clause {
    fn from(value: Vec<Lit>) -> Self {
        Clause(value)
    }
}

impl<const N: usize> From<[Lit; N]> for Clause {
    fn from(value: [Lit; N]) -> Self {
        Clause(value.to_vec())
    }
}

impl From<&[Lit]> for Clause {
    fn from(value: &[Lit]) -> Self {
        Clause(value.to_vec())
    }
}

impl FromIterator<Lit> for Clause {
    fn from_iter<T: IntoIterator<Item = Lit>>(iter: T) -> Self {
        Clause(iter.into_iter().collect())
    }
}

/// A CNF formula: a variable counter and an ordered sequence of clauses.
///
/// Variables are allocated with [`new_var`] and never freed, so the counter only grows.
/// Clauses must only mention allocated variables; this is checked in debug builds only,
/// a violation is a bug of the caller.
///
/// [`new_var`]: Formula::new_var
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Formula {
    num_vars: u32,
    clauses: Vec<Clause>,
}

impl Formula {
    /// Largest variable count: every variable index stays within [`Var::MAX_INDEX`].
    pub const MAX_VARS: u32 = Var::MAX_INDEX + 1;

    /// A new empty formula, without any variable.
    pub fn new() -> Self {
        Formula::default()
    }

    /// A new formula with `num_vars` variables already allocated and no clause.
    ///
    /// Panics if `num_vars` exceeds [`Formula::MAX_VARS`].
    pub fn with_vars(num_vars: u32) -> Self {
        assert!(
            num_vars <= Formula::MAX_VARS,
            "{} variables exceed Formula::MAX_VARS",
            num_vars
        );
        Formula {
            num_vars,
            clauses: Vec::new(),
        }
    }

    /// Number of allocated variables.
    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    /// Number of clauses.
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// The clauses, in insertion order.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Allocates a fresh variable.
    ///
    /// Panics if all [`Formula::MAX_VARS`] variables are already allocated.
    pub fn new_var(&mut self) -> Var {
        let v = Var::new(self.num_vars);
        self.num_vars += 1;
        v
    }

    /// Allocates a fresh variable and returns its positive literal.
    pub fn new_lit(&mut self) -> Lit {
        self.new_var().pos()
    }

    /// Allocates variables until at least `num_vars` exist. Never shrinks.
    ///
    /// Panics if `num_vars` exceeds [`Formula::MAX_VARS`].
    pub fn reserve_vars(&mut self, num_vars: u32) {
        assert!(
            num_vars <= Formula::MAX_VARS,
            "{} variables exceed Formula::MAX_VARS",
            num_vars
        );
        self.num_vars = self.num_vars.max(num_vars);
    }

    /// Add the given clause to the formula.
    pub fn add_clause(&mut self, clause: impl Into<Clause>) {
        let clause = clause.into();
        debug_assert!(
            clause.vars().all(|v| v.index() < self.num_vars),
            "clause {:?} mentions a variable beyond {}",
            clause.to_dimacs(),
            self.num_vars
        );
        self.clauses.push(clause);
    }

    /// True iff every clause is satisfied by the assignment.
    ///
    /// Panics if the assignment is shorter than the variables used by the clauses.
    pub fn eval(&self, assignment: &[bool]) -> bool {
        self.clauses.iter().all(|c| c.eval(assignment))
    }

    /// Removes `count` clauses picked uniformly at random.
    ///
    /// Removing more clauses than the formula holds leaves it without clauses.
    /// The variable counter is left untouched.
    pub fn drop_random_clauses<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) {
        for _ in 0..count.min(self.clauses.len()) {
            let i = rng.random_range(0..self.clauses.len());
            let dropped = self.clauses.remove(i);
            debug!("dropped clause {:?}", dropped.to_dimacs());
        }
    }

    pub(crate) fn clauses_mut(&mut self) -> &mut Vec<Clause> {
        &mut self.clauses
    }
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn lit(x: i64) -> Lit {
        Lit::try_from(x).unwrap()
    }

    #[test]
    fn new_var_test() {
        let mut f = Formula::new();
        assert_eq!(f.num_vars(), 0);
        let a = f.new_var();
        let b = f.new_var();
        let c = f.new_lit();
        assert_eq!(a, Var::new(0));
        assert_eq!(b, Var::new(1));
        assert_eq!(c, Var::new(2).pos());
        assert_eq!(f.num_vars(), 3);
    }

    #[test]
    fn new_var_never_reuses_test() {
        let mut f = Formula::with_vars(4);
        let mut seen = Vec::new();
        for _ in 0..50 {
            let v = f.new_var();
            assert!(!seen.contains(&v));
            assert!(v.index() >= 4);
            seen.push(v);
        }
        assert_eq!(f.num_vars(), 54);
    }

    #[test]
    #[should_panic]
    fn reserve_vars_beyond_max_test() {
        Formula::new().reserve_vars(Formula::MAX_VARS + 1);
    }

    #[test]
    #[should_panic]
    fn new_var_beyond_max_test() {
        let mut f = Formula::with_vars(Formula::MAX_VARS);
        f.new_var();
    }

    #[test]
    fn reserve_vars_test() {
        let mut f = Formula::with_vars(3);
        f.reserve_vars(2);
        assert_eq!(f.num_vars(), 3);
        f.reserve_vars(7);
        assert_eq!(f.num_vars(), 7);
    }

    #[test]
    fn add_clause_test() {
        let mut f = Formula::with_vars(2);
        let c = Clause::from(vec![lit(1), lit(-2)]);
        f.add_clause(c.clone());
        f.add_clause([lit(2), lit(2)]);
        f.add_clause(Clause::new());
        assert_eq!(f.num_clauses(), 3);
        assert_eq!(f.clauses()[0], c);
        // no simplification of duplicated literals
        assert_eq!(f.clauses()[1].len(), 2);
        assert!(f.clauses()[2].is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn add_clause_unallocated_var_test() {
        let mut f = Formula::with_vars(1);
        f.add_clause([lit(2)]);
    }

    #[test]
    fn eval_test() {
        let mut f = Formula::with_vars(2);
        f.add_clause([lit(1), lit(2)]);
        f.add_clause([lit(-1)]);
        assert!(f.eval(&[false, true]));
        assert!(!f.eval(&[true, true]));
        assert!(!f.eval(&[false, false]));
    }

    #[test]
    fn drop_random_clauses_test() {
        let mut f = Formula::with_vars(5);
        for i in 1..=5 {
            f.add_clause([lit(i)]);
        }
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        f.drop_random_clauses(2, &mut rng);
        assert_eq!(f.num_clauses(), 3);
        assert_eq!(f.num_vars(), 5);

        // remaining clauses keep their relative order
        let remaining: Vec<i64> = f.clauses().iter().map(|c| c.to_dimacs()[0]).collect();
        assert!(remaining.windows(2).all(|w| w[0] < w[1]));

        f.drop_random_clauses(10, &mut rng);
        assert_eq!(f.num_clauses(), 0);
    }
}
