use std::fmt::{Debug, Display};

use crate::{
    ast::{Domain, Value},
    error::EvalFault,
    util::num::f64_to_i64_truncated,
};

mod sealed {
    pub trait Sealed {}

    impl Sealed for i64 {}
    impl Sealed for f64 {}
}

/// A numeric type an expression can be evaluated in.
///
/// Implemented for `i64` (the integer domain) and `f64` (the real domain).
/// Every operation returns a `Result` so the integer domain can report the
/// faults a C `long` would hit as undefined behavior; the `f64`
/// implementation never fails.
pub trait Scalar: sealed::Sealed + Copy + PartialOrd + Debug + Display + Send + Sync + 'static {
    /// The domain this type evaluates.
    const DOMAIN: Domain;
    /// Value of false.
    const ZERO: Self;
    /// Value of true.
    const ONE: Self;

    /// Extracts a literal of this domain; `None` for the other domain.
    fn from_value(value: Value) -> Option<Self>;

    /// Truth value: anything other than zero, including NaN.
    fn is_truthy(self) -> bool {
        self != Self::ZERO
    }

    /// `1` for true, `0` for false.
    fn from_bool(flag: bool) -> Self {
        if flag { Self::ONE } else { Self::ZERO }
    }

    fn negated(self) -> Result<Self, EvalFault>;
    fn sum(self, rhs: Self) -> Result<Self, EvalFault>;
    fn difference(self, rhs: Self) -> Result<Self, EvalFault>;
    fn product(self, rhs: Self) -> Result<Self, EvalFault>;
    fn quotient(self, rhs: Self) -> Result<Self, EvalFault>;
    fn power(self, exponent: Self) -> Result<Self, EvalFault>;
    fn square_root(self) -> Result<Self, EvalFault>;
    fn natural_log(self) -> Result<Self, EvalFault>;
    fn common_log(self) -> Result<Self, EvalFault>;
}

impl Scalar for f64 {
    const DOMAIN: Domain = Domain::Real;
    const ZERO: Self = 0.0;
    const ONE: Self = 1.0;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Real(r) => Some(r),
            Value::Integer(_) => None,
        }
    }

    fn negated(self) -> Result<Self, EvalFault> {
        Ok(-self)
    }

    fn sum(self, rhs: Self) -> Result<Self, EvalFault> {
        Ok(self + rhs)
    }

    fn difference(self, rhs: Self) -> Result<Self, EvalFault> {
        Ok(self - rhs)
    }

    fn product(self, rhs: Self) -> Result<Self, EvalFault> {
        Ok(self * rhs)
    }

    fn quotient(self, rhs: Self) -> Result<Self, EvalFault> {
        Ok(self / rhs)
    }

    fn power(self, exponent: Self) -> Result<Self, EvalFault> {
        Ok(self.powf(exponent))
    }

    fn square_root(self) -> Result<Self, EvalFault> {
        Ok(self.sqrt())
    }

    fn natural_log(self) -> Result<Self, EvalFault> {
        Ok(self.ln())
    }

    fn common_log(self) -> Result<Self, EvalFault> {
        Ok(self.log10())
    }
}

impl Scalar for i64 {
    const DOMAIN: Domain = Domain::Integer;
    const ZERO: Self = 0;
    const ONE: Self = 1;

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(n),
            Value::Real(_) => None,
        }
    }

    fn negated(self) -> Result<Self, EvalFault> {
        self.checked_neg().ok_or(EvalFault::Overflow)
    }

    fn sum(self, rhs: Self) -> Result<Self, EvalFault> {
        self.checked_add(rhs).ok_or(EvalFault::Overflow)
    }

    fn difference(self, rhs: Self) -> Result<Self, EvalFault> {
        self.checked_sub(rhs).ok_or(EvalFault::Overflow)
    }

    fn product(self, rhs: Self) -> Result<Self, EvalFault> {
        self.checked_mul(rhs).ok_or(EvalFault::Overflow)
    }

    /// Truncates toward zero. `i64::MIN / -1` overflows.
    fn quotient(self, rhs: Self) -> Result<Self, EvalFault> {
        if rhs == 0 {
            return Err(EvalFault::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(EvalFault::Overflow)
    }

    /// Exact for non-negative exponents. A negative exponent gives the real
    /// result truncated toward zero, which is `0` unless the base is `1` or
    /// `-1`.
    fn power(self, exponent: Self) -> Result<Self, EvalFault> {
        match (self, exponent) {
            (_, 0) | (1, _) => Ok(1),
            (-1, e) => Ok(if e % 2 == 0 { 1 } else { -1 }),
            (0, e) if e < 0 => Err(EvalFault::DivisionByZero),
            (0, _) => Ok(0),
            (_, e) if e < 0 => Ok(0),
            (base, e) => {
                let e = u32::try_from(e).map_err(|_| EvalFault::Overflow)?;
                base.checked_pow(e).ok_or(EvalFault::Overflow)
            },
        }
    }

    fn square_root(self) -> Result<Self, EvalFault> {
        f64_to_i64_truncated(to_f64(self).sqrt())
    }

    fn natural_log(self) -> Result<Self, EvalFault> {
        f64_to_i64_truncated(to_f64(self).ln())
    }

    fn common_log(self) -> Result<Self, EvalFault> {
        f64_to_i64_truncated(to_f64(self).log10())
    }
}

/// Widens to `f64` the way a C `long` is promoted for `<math.h>` calls.
#[allow(clippy::cast_precision_loss)]
const fn to_f64(n: i64) -> f64 {
    n as f64
}
