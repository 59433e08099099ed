//! Best-effort alignment of auxiliary (Tseitin) variables between two formulas.
//!
//! Both formulas are assumed to be Tseitin encodings of circuits sharing the primary
//! inputs `0..boundary`, each with its own auxiliary variables from `boundary` upward.
//! Nothing guarantees that auxiliary variable `boundary + k` names the same sub-expression
//! on both sides. The alignment moves the auxiliary range of the second formula above the
//! first one, then copies each side's definition clauses into the other, so that both
//! formulas constrain the same auxiliary facts before they are compared in a miter.
//!
//! This is a heuristic: it is only meaningful when both encodings numbered shared
//! sub-expressions compatibly, and it offers no correctness guarantee otherwise.
//!
//! Unlike every other encoder of the crate, these functions mutate their inputs in place.

use log::{debug, info};

use crate::{Clause, Formula};

impl Formula {
    /// Adds `offset` to every variable strictly greater than `boundary`, then grows
    /// the variable counter by `offset` to cover the moved variables.
    ///
    /// This is a no-op if `offset` is zero or if no allocated variable exceeds `boundary`.
    /// Note that variable `boundary` itself is never moved.
    ///
    /// Panics if the moved variables do not fit [`Formula::MAX_VARS`].
    pub fn rewrite_variable_range(&mut self, boundary: u32, offset: u32) {
        if offset == 0 || self.num_vars() <= boundary.saturating_add(1) {
            return;
        }

        for clause in self.clauses_mut() {
            for lit in clause.lits_mut() {
                if lit.var().index() > boundary {
                    *lit = lit.shifted(offset);
                }
            }
        }

        self.reserve_vars(self.num_vars().saturating_add(offset));
        debug!(
            "moved variables above {} by {}, now {} variables",
            boundary,
            offset,
            self.num_vars()
        );
    }

    /// Returns, in order, the clauses mentioning at least one variable `>= boundary`,
    /// ie the clauses taking part in the definition of an auxiliary variable.
    pub fn definition_clauses(&self, boundary: u32) -> Vec<Clause> {
        self.clauses()
            .iter()
            .filter(|c| c.vars().any(|v| v.index() >= boundary))
            .cloned()
            .collect()
    }
}

/// Copies the definition clauses (see [`Formula::definition_clauses`]) of each formula
/// into the other one. Both sets are extracted before anything is appended.
pub fn exchange_definition_clauses(first: &mut Formula, second: &mut Formula, boundary: u32) {
    let first_to_second = first.definition_clauses(boundary);
    info!("extracted {} clauses from first formula", first_to_second.len());
    let second_to_first = second.definition_clauses(boundary);
    info!("extracted {} clauses from second formula", second_to_first.len());

    // Each side must allocate the variables the other side uses.
    let num_vars = first.num_vars().max(second.num_vars());
    first.reserve_vars(num_vars);
    second.reserve_vars(num_vars);

    for clause in first_to_second {
        second.add_clause(clause);
    }
    for clause in second_to_first {
        first.add_clause(clause);
    }
}

/// Offset applied to the auxiliary variables of the second formula:
/// the distance from `boundary` to the largest variable count, or zero if `boundary` covers both.
pub fn alignment_offset(first: &Formula, second: &Formula, boundary: u32) -> u32 {
    first.num_vars().max(second.num_vars()).saturating_sub(boundary)
}

/// Aligns the auxiliary variables of `first` and `second` above `boundary`:
/// - moves the variables of `second` above `boundary` by [`alignment_offset`],
/// - grows both formulas to the same variable count,
/// - exchanges their definition clauses with [`exchange_definition_clauses`].
///
/// Returns the offset applied to `second`.
///
/// The variable numbered `boundary` is extracted as auxiliary but never moved, so it
/// stays shared by both formulas; the offset is also zero whenever `boundary` covers
/// the largest variable count, even if the definition ranges overlap.
pub fn align_auxiliary_variables(first: &mut Formula, second: &mut Formula, boundary: u32) -> u32 {
    let offset = alignment_offset(first, second, boundary);
    info!(
        "offset {} for shared boundary {} (largest variable count {})",
        offset,
        boundary,
        first.num_vars().max(second.num_vars())
    );
    debug_assert!(
        offset == 0
            || second.num_vars() <= boundary
            || second.num_vars() + offset > first.num_vars()
    );

    second.rewrite_variable_range(boundary, offset);

    let num_vars = first.num_vars().max(second.num_vars());
    first.reserve_vars(num_vars);
    second.reserve_vars(num_vars);

    exchange_definition_clauses(first, second, boundary);
    offset
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    fn formula(s: &str) -> Formula {
        s.parse().unwrap()
    }

    fn dimacs(f: &Formula) -> Vec<Vec<i64>> {
        f.clauses().iter().map(Clause::to_dimacs).collect()
    }

    #[test]
    fn rewrite_zero_offset_test() {
        let mut f = formula("p cnf 6 3\n1 -5 0\n6 2 0\n-3 0\n");
        let before = f.clone();
        f.rewrite_variable_range(2, 0);
        assert_eq!(f, before);
    }

    #[test]
    fn rewrite_boundary_covers_all_test() {
        let mut f = formula("p cnf 3 2\n1 -2 0\n3 0\n");
        let before = f.clone();
        // variable 2 (DIMACS 3) is the largest, it does not exceed the boundary
        f.rewrite_variable_range(2, 4);
        assert_eq!(f, before);
        f.rewrite_variable_range(10, 4);
        assert_eq!(f, before);
    }

    #[test]
    fn rewrite_test() {
        // boundary = variable 2 (DIMACS 3), variables 3 and 4 (DIMACS 4 and 5) move by 3
        let mut f = formula("p cnf 5 3\n1 -4 0\n3 5 -2 0\n-5 0\n");
        f.rewrite_variable_range(2, 3);
        assert_eq!(f.num_vars(), 8);
        assert_eq!(dimacs(&f), vec![vec![1, -7], vec![3, 8, -2], vec![-8]]);
    }

    #[test]
    #[should_panic]
    fn rewrite_beyond_max_vars_test() {
        let mut f = formula("p cnf 3 1\n3 0\n");
        f.rewrite_variable_range(0, Formula::MAX_VARS);
    }

    #[test]
    fn definition_clauses_test() {
        let f = formula("p cnf 5 4\n1 2 0\n-3 1 0\n4 0\n2 -5 1 0\n");
        // variable 2 (DIMACS 3) counts as a definition variable
        let defs = f.definition_clauses(2);
        assert_eq!(
            defs.iter().map(Clause::to_dimacs).collect::<Vec<_>>(),
            vec![vec![-3, 1], vec![4], vec![2, -5, 1]]
        );
        assert!(f.definition_clauses(5).is_empty());
        assert_eq!(f.definition_clauses(0).len(), 4);
    }

    #[test]
    fn exchange_definition_clauses_test() {
        let mut a = formula("p cnf 3 2\n1 2 0\n-3 1 0\n");
        let mut b = formula("p cnf 4 2\n-1 0\n4 2 0\n");
        exchange_definition_clauses(&mut a, &mut b, 2);
        assert_eq!(a.num_vars(), 4);
        assert_eq!(b.num_vars(), 4);
        assert_eq!(dimacs(&a), vec![vec![1, 2], vec![-3, 1], vec![4, 2]]);
        assert_eq!(dimacs(&b), vec![vec![-1], vec![4, 2], vec![-3, 1]]);
    }

    #[test]
    fn align_test() {
        // primary inputs: variables 0 and 1, auxiliary from variable 2
        let mut a = formula("p cnf 4 2\n1 -4 0\n2 4 0\n");
        let mut b = formula("p cnf 4 2\n-1 4 0\n-2 3 0\n");
        let offset = align_auxiliary_variables(&mut a, &mut b, 2);
        assert_eq!(offset, 2);
        // variable 3 of b (DIMACS 4) moved to variable 5, variable 2 (DIMACS 3) stayed
        assert_eq!(b.num_vars(), 6);
        assert_eq!(a.num_vars(), 6);
        assert_eq!(
            dimacs(&b),
            vec![vec![-1, 6], vec![-2, 3], vec![1, -4], vec![2, 4]]
        );
        assert_eq!(
            dimacs(&a),
            vec![vec![1, -4], vec![2, 4], vec![-1, 6], vec![-2, 3]]
        );
    }

    #[test]
    fn align_boundary_variable_overlap_test() {
        // Both formulas only have the boundary variable itself as auxiliary: the offset
        // is non-zero, yet nothing moves and both sides keep sharing variable 3 (DIMACS 4).
        let mut a = formula("p cnf 4 1\n1 4 0\n");
        let mut b = formula("p cnf 4 1\n-4 2 0\n");
        let offset = align_auxiliary_variables(&mut a, &mut b, 3);
        assert_eq!(offset, 1);
        assert_eq!(a.num_vars(), 4);
        assert_eq!(b.num_vars(), 4);
        assert_eq!(dimacs(&a), vec![vec![1, 4], vec![-4, 2]]);
        assert_eq!(dimacs(&b), vec![vec![-4, 2], vec![1, 4]]);
    }

    #[test]
    fn align_zero_offset_test() {
        // boundary covers every variable: no offset, no definition clause
        let mut a = formula("p cnf 2 1\n1 2 0\n");
        let mut b = formula("p cnf 3 1\n-3 0\n");
        let offset = align_auxiliary_variables(&mut a, &mut b, 3);
        assert_eq!(offset, 0);
        assert_eq!(a.num_vars(), 3);
        assert_eq!(dimacs(&a), vec![vec![1, 2]]);
        assert_eq!(dimacs(&b), vec![vec![-3]]);
    }
}
