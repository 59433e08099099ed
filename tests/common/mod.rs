//! Brute-force helpers: small formulas are solved by enumerating every assignment.

#![allow(dead_code)]

use cnfmiter::{Clause, Formula, Lit, Var};
use rand::Rng;

/// All assignments over `n` variables.
pub fn assignments(n: u32) -> impl Iterator<Item = Vec<bool>> {
    assert!(n <= 24, "too many variables to enumerate: {}", n);
    (0..1u64 << n).map(move |bits| (0..n).map(|i| bits >> i & 1 == 1).collect())
}

/// All models of the formula.
pub fn models(f: &Formula) -> Vec<Vec<bool>> {
    assignments(f.num_vars()).filter(|x| f.eval(x)).collect()
}

/// True iff the formula has a model.
pub fn is_sat(f: &Formula) -> bool {
    assignments(f.num_vars()).any(|x| f.eval(&x))
}

/// True iff both formulas have the same models over their first `n` variables.
pub fn equivalent(a: &Formula, b: &Formula, n: u32) -> bool {
    assignments(n).all(|x| a.eval(&x) == b.eval(&x))
}

/// A random formula over `num_vars` variables.
pub fn random_formula<R: Rng>(rng: &mut R, num_vars: u32, num_clauses: usize) -> Formula {
    let mut f = Formula::with_vars(num_vars);
    for _ in 0..num_clauses {
        let len = rng.random_range(1..=3);
        let clause: Clause = (0..len)
            .map(|_| Lit::new(Var::new(rng.random_range(0..num_vars)), rng.random_bool(0.5)))
            .collect();
        f.add_clause(clause);
    }
    f
}

pub fn formula(s: &str) -> Formula {
    s.parse().unwrap()
}
