//! Variables and literals.
//!
//! A [`Lit`] packs a [`Var`] and its polarity into a single integer `2 * var + sign`,
//! so that a literal and its negation are adjacent under ordering and negation is a
//! single bit flip.

use std::{fmt::Display, ops::Not};

use super::error::FormulaError;

/// A boolean variable, allocated by a [`Formula`].
///
/// Variables are dense: variable `v` is valid in a formula iff `v < formula.num_vars()`.
///
/// [`Formula`]: crate::Formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Var(u32);

impl Var {
    /// Largest variable index whose literals fit the `2 * var + sign` packing.
    pub const MAX_INDEX: u32 = u32::MAX >> 1;

    /// Creates a variable from its (0-based) index.
    ///
    /// Panics if `index` exceeds [`Var::MAX_INDEX`].
    pub const fn new(index: u32) -> Self {
        assert!(index <= Var::MAX_INDEX, "variable index exceeds Var::MAX_INDEX");
        Var(index)
    }

    /// The (0-based) index of the variable.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// The positive literal of this variable.
    pub const fn pos(self) -> Lit {
        Lit::new(self, false)
    }

    /// The negative literal of this variable.
    pub const fn neg(self) -> Lit {
        Lit::new(self, true)
    }

    /// Returns the variable `offset` positions further.
    ///
    /// Panics if the result exceeds [`Var::MAX_INDEX`].
    pub const fn shifted(self, offset: u32) -> Self {
        match self.0.checked_add(offset) {
            Some(index) => Var::new(index),
            None => panic!("shifted variable index overflows"),
        }
    }
}

/// A SAT literal, encoded as `2 * var + sign` where `sign` is set for negated literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Lit(u32);

impl Lit {
    /// Creates the literal of `var`, negated iff `negated` is set.
    pub const fn new(var: Var, negated: bool) -> Self {
        Lit(var.0 + var.0 + negated as u32)
    }

    /// The variable of the literal.
    pub const fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    /// True iff the literal is the negation of its variable.
    pub const fn is_negated(self) -> bool {
        self.0 & 1 == 1
    }

    /// The raw packed encoding.
    pub const fn code(self) -> u32 {
        self.0
    }

    /// Same polarity, variable moved `offset` positions further.
    pub const fn shifted(self, offset: u32) -> Self {
        Lit::new(self.var().shifted(offset), self.is_negated())
    }

    /// The signed 1-based DIMACS representation (`x0` is `1`, `!x0` is `-1`).
    pub fn to_dimacs(self) -> i64 {
        let v = i64::from(self.var().index()) + 1;
        if self.is_negated() { -v } else { v }
    }

    /// Evaluates the literal under an assignment indexed by variable.
    ///
    /// Panics if the variable is out of the assignment's range.
    pub fn eval(self, assignment: &[bool]) -> bool {
        assignment[self.var().index() as usize] != self.is_negated()
    }
}

impl Not for Lit {
    type Output = Self;

    fn not(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

impl TryFrom<i64> for Lit {
    type Error = FormulaError;

    /// Converts a signed DIMACS literal. `0` is the clause terminator, not a literal.
    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        if value == 0 {
            return Err(FormulaError::ZeroLiteral);
        }
        let index = u32::try_from(value.unsigned_abs() - 1)
            .ok()
            .filter(|&index| index <= Var::MAX_INDEX)
            .ok_or(FormulaError::VariableOutOfRange(value))?;
        Ok(Lit::new(Var(index), value < 0))
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dimacs())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn packing_test() {
        let x = Var::new(5);
        assert_eq!(x.pos().code(), 10);
        assert_eq!(x.neg().code(), 11);
        assert_eq!(x.neg().var(), x);
        assert!(x.neg().is_negated());
        assert!(!x.pos().is_negated());
    }

    #[test]
    fn not_lit_test() {
        let l = Var::new(3).pos();
        assert_eq!(!l, Var::new(3).neg());
        assert_eq!(!!l, l);
        assert_eq!((!l).code(), l.code() ^ 1);
    }

    #[test]
    fn ordering_keeps_negation_adjacent_test() {
        let mut lits = vec![Var::new(1).neg(), Var::new(0).neg(), Var::new(1).pos(), Var::new(0).pos()];
        lits.sort();
        assert_eq!(
            lits,
            vec![Var::new(0).pos(), Var::new(0).neg(), Var::new(1).pos(), Var::new(1).neg()]
        );
    }

    #[test]
    fn dimacs_test() {
        assert_eq!(Var::new(0).pos().to_dimacs(), 1);
        assert_eq!(Var::new(0).neg().to_dimacs(), -1);
        assert_eq!(Var::new(41).neg().to_dimacs(), -42);
        assert_eq!(Lit::try_from(-42).unwrap(), Var::new(41).neg());
        assert_eq!(Lit::try_from(7).unwrap(), Var::new(6).pos());
        assert_eq!(Var::new(2).neg().to_string(), "-3");
    }

    #[test]
    fn invalid_lit_tryfrom_test() {
        assert!(matches!(Lit::try_from(0), Err(FormulaError::ZeroLiteral)));
        assert!(Lit::try_from(i64::MAX).is_err());
        assert!(Lit::try_from(i64::MIN).is_err());
    }

    #[test]
    fn lit_tryfrom_packing_bound_test() {
        // largest variable whose negation still fits the packing
        let last = Lit::try_from(-(1i64 << 31)).unwrap();
        assert_eq!(last.var().index(), Var::MAX_INDEX);
        assert_eq!(last.to_dimacs(), -(1i64 << 31));
        assert_eq!((!last).to_dimacs(), 1i64 << 31);

        for x in [(1i64 << 31) + 1, 3_000_000_000, -3_000_000_000, 4_294_967_296] {
            assert!(
                matches!(Lit::try_from(x), Err(FormulaError::VariableOutOfRange(y)) if y == x),
                "{} accepted",
                x
            );
        }
    }

    #[test]
    #[should_panic]
    fn var_beyond_max_index_test() {
        _ = Var::new(Var::MAX_INDEX + 1);
    }

    #[test]
    #[should_panic]
    fn shifted_beyond_max_index_test() {
        _ = Var::new(Var::MAX_INDEX).shifted(1);
    }

    #[test]
    fn shifted_test() {
        let l = Var::new(2).neg();
        assert_eq!(l.shifted(3), Var::new(5).neg());
        assert_eq!(l.shifted(0), l);
    }

    #[test]
    fn eval_test() {
        let assignment = [true, false];
        assert!(Var::new(0).pos().eval(&assignment));
        assert!(!Var::new(0).neg().eval(&assignment));
        assert!(Var::new(1).neg().eval(&assignment));
    }
}
