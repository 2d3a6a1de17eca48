use super::Val;
use crate::error;
use crate::lang::Error;
use std::cmp::Ordering;

type Result<T> = std::result::Result<T, Error>;

/// ## Binary and unary operations on values
///
/// `lhs` is the operand pushed first.

pub struct Operation {}

impl Operation {
    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Number(lhs.to_number()? + rhs.to_number()?))
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Number(lhs.to_number()? - rhs.to_number()?))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::Number(lhs.to_number()? * rhs.to_number()?))
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = (lhs.to_number()?, rhs.to_number()?);
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Val::Number(l / r))
    }

    pub fn remainder(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = (lhs.to_number()?, rhs.to_number()?);
        if r == 0.0 {
            return Err(error!(DivisionByZero));
        }
        Ok(Val::Number(l % r))
    }

    pub fn equal(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from(Operation::compare(&lhs, &rhs)? == Some(Ordering::Equal)))
    }

    pub fn greater(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from(Operation::compare(&lhs, &rhs)? == Some(Ordering::Greater)))
    }

    pub fn less(lhs: Val, rhs: Val) -> Result<Val> {
        Ok(Val::from(Operation::compare(&lhs, &rhs)? == Some(Ordering::Less)))
    }

    /// Non-positive becomes true, positive becomes false.
    pub fn not(val: Val) -> Result<Val> {
        Ok(Val::Number(if val.to_number()? > 0.0 { 0.0 } else { 1.0 }))
    }

    /// Numbers when both sides look numeric, otherwise text.
    /// `None` when a NaN is involved.
    fn compare(lhs: &Val, rhs: &Val) -> Result<Option<Ordering>> {
        if lhs.looks_numeric() && rhs.looks_numeric() {
            Ok(lhs.to_number()?.partial_cmp(&rhs.to_number()?))
        } else {
            Ok(Some(lhs.to_string().cmp(&rhs.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn n(v: f64) -> Val {
        Val::Number(v)
    }

    fn s(v: &str) -> Val {
        Val::from(v)
    }

    #[test]
    fn test_arithmetic_order() {
        assert_eq!(Operation::subtract(n(10.0), n(4.0)), Ok(n(6.0)));
        assert_eq!(Operation::divide(n(9.0), n(2.0)), Ok(n(4.5)));
        assert_eq!(Operation::remainder(n(7.0), n(3.0)), Ok(n(1.0)));
        assert_eq!(Operation::remainder(n(-7.0), n(3.0)), Ok(n(-1.0)));
    }

    #[test]
    fn test_numeric_text_coerces() {
        assert_eq!(Operation::sum(s("2"), n(3.0)), Ok(n(5.0)));
        assert_eq!(
            Operation::multiply(s("two"), n(3.0)).map_err(|e| e.code()),
            Err(ErrorCode::TypeMismatch)
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            Operation::divide(n(10.0), n(0.0)).map_err(|e| e.code()),
            Err(ErrorCode::DivisionByZero)
        );
        assert_eq!(
            Operation::remainder(n(10.0), n(0.0)).map_err(|e| e.code()),
            Err(ErrorCode::DivisionByZero)
        );
    }

    #[test]
    fn test_compare_numbers() {
        assert_eq!(Operation::equal(n(5.0), s("5")), Ok(n(1.0)));
        assert_eq!(Operation::less(n(2.0), n(10.0)), Ok(n(1.0)));
        assert_eq!(Operation::greater(n(2.0), n(10.0)), Ok(n(0.0)));
    }

    #[test]
    fn test_compare_text() {
        assert_eq!(Operation::less(s("10"), s("9x")), Ok(n(1.0)));
        assert_eq!(Operation::greater(s("b"), s("a")), Ok(n(1.0)));
        assert_eq!(Operation::equal(s("abc"), s("abc")), Ok(n(1.0)));
        assert_eq!(Operation::equal(s("abc"), n(1.0)), Ok(n(0.0)));
        assert_eq!(Operation::equal(s("5.0x"), n(5.0)), Ok(n(0.0)));
    }

    #[test]
    fn test_nan_compares_false() {
        let nan = n(f64::NAN);
        assert_eq!(Operation::equal(nan.clone(), nan.clone()), Ok(n(0.0)));
        assert_eq!(Operation::less(nan, n(1.0)), Ok(n(0.0)));
    }

    #[test]
    fn test_not() {
        assert_eq!(Operation::not(n(3.0)), Ok(n(0.0)));
        assert_eq!(Operation::not(n(0.0)), Ok(n(1.0)));
        assert_eq!(Operation::not(n(-2.0)), Ok(n(1.0)));
        assert_eq!(Operation::not(n(f64::NAN)), Ok(n(1.0)));
    }
}
