//! ScalarValue - 数值或符号
//!
//! 每个运算先尝试折叠成数值，再套用恒等式（加 0、乘 1、乘 0），
//! 都不行时才合成一个可以被解析器重新读入的符号串。

use crate::error::{CalcError, CalcResult};
use crate::format;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;
use symcalc_syntax::lexer::numeric_literal;

/// `isclose` 的绝对容差
pub const ISCLOSE_TOLERANCE: f64 = 1e-6;

/// `delta`/`theta` 判断零点的容差
const ATOL: f64 = f64::EPSILON;

/// 标量值
///
/// 相等比较按变体区分：数值按数值比较，符号按字符串比较，
/// `Number(1.0)` 与 `Symbolic("1")` 永远不相等（用 [`ScalarValue::isclose`]）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Number(f64),
    Symbolic(String),
}

use ScalarValue::{Number, Symbolic};

impl ScalarValue {
    pub const ZERO: ScalarValue = Number(0.0);
    pub const ONE: ScalarValue = Number(1.0);
    pub const PI: ScalarValue = Number(std::f64::consts::PI);
    pub const E: ScalarValue = Number(std::f64::consts::E);
    pub const FRAC_PI_2: ScalarValue = Number(std::f64::consts::FRAC_PI_2);
    pub const FRAC_PI_4: ScalarValue = Number(std::f64::consts::FRAC_PI_4);
    pub const SQRT_2: ScalarValue = Number(std::f64::consts::SQRT_2);
    pub const FRAC_1_SQRT_2: ScalarValue = Number(std::f64::consts::FRAC_1_SQRT_2);

    pub fn is_number(&self) -> bool {
        matches!(self, Number(_))
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Symbolic(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Number(n) => Some(*n),
            Symbolic(_) => None,
        }
    }

    pub fn as_symbolic(&self) -> Option<&str> {
        match self {
            Number(_) => None,
            Symbolic(s) => Some(s),
        }
    }

    /// 转换为 f64，符号值返回 [`CalcError::NotAFloat`]
    pub fn float(&self) -> CalcResult<f64> {
        match self {
            Number(n) => Ok(*n),
            Symbolic(s) => Err(CalcError::NotAFloat { value: s.clone() }),
        }
    }

    /// 除法；除数为字面量 0 时失败，无论被除数是什么
    pub fn checked_div(&self, rhs: impl Into<ScalarValue>) -> CalcResult<ScalarValue> {
        divide(self.clone(), rhs.into())
    }

    pub fn checked_div_assign(&mut self, rhs: impl Into<ScalarValue>) -> CalcResult<()> {
        *self = divide(self.clone(), rhs.into())?;
        Ok(())
    }

    /// `1 / self`
    pub fn recip(&self) -> CalcResult<ScalarValue> {
        divide(ScalarValue::ONE, self.clone())
    }

    /// 乘方，符号结果写作 `(l ^ r)`
    pub fn powf(&self, exponent: impl Into<ScalarValue>) -> ScalarValue {
        let exponent = exponent.into();
        match (self, &exponent) {
            (Number(x), Number(y)) => Number(x.powf(*y)),
            _ => format::power(self, &exponent),
        }
    }

    /// 四象限反正切，`self` 为 y
    pub fn atan2(&self, x: impl Into<ScalarValue>) -> ScalarValue {
        self.map_binary("atan2", x.into(), f64::atan2)
    }

    pub fn hypot(&self, other: impl Into<ScalarValue>) -> ScalarValue {
        self.map_binary("hypot", other.into(), f64::hypot)
    }

    pub fn max(&self, other: impl Into<ScalarValue>) -> ScalarValue {
        self.map_binary("max", other.into(), f64::max)
    }

    pub fn min(&self, other: impl Into<ScalarValue>) -> ScalarValue {
        self.map_binary("min", other.into(), f64::min)
    }

    /// 近似相等
    ///
    /// 两边都能化成 f64（数值，或纯数字字面量的符号）时按绝对容差比较，
    /// 否则比较规范字符串。
    pub fn isclose(&self, other: impl Into<ScalarValue>) -> bool {
        let other = other.into();
        match (self.coerce(), other.coerce()) {
            (Some(a), Some(b)) => (a - b).abs() <= ISCLOSE_TOLERANCE,
            _ => self.to_string() == other.to_string(),
        }
    }

    fn coerce(&self) -> Option<f64> {
        match self {
            Number(n) => Some(*n),
            Symbolic(s) => numeric_literal(s),
        }
    }

    pub(crate) fn map_unary(&self, name: &str, f: fn(f64) -> f64) -> ScalarValue {
        match self {
            Number(x) => Number(f(*x)),
            Symbolic(_) => format::call(name, &[self]),
        }
    }

    pub(crate) fn map_binary(&self, name: &str, other: ScalarValue, f: fn(f64, f64) -> f64) -> ScalarValue {
        match (self, &other) {
            (Number(x), Number(y)) => Number(f(*x, *y)),
            _ => format::call(name, &[self, &other]),
        }
    }
}

macro_rules! unary_functions {
    ($($(#[$doc:meta])* $name:ident => $f:path;)*) => {
        impl ScalarValue {
            $(
                $(#[$doc])*
                pub fn $name(&self) -> ScalarValue {
                    self.map_unary(stringify!($name), $f)
                }
            )*
        }
    };
}

unary_functions! {
    sin => f64::sin;
    cos => f64::cos;
    tan => f64::tan;
    asin => f64::asin;
    acos => f64::acos;
    atan => f64::atan;
    sinh => f64::sinh;
    cosh => f64::cosh;
    tanh => f64::tanh;
    asinh => f64::asinh;
    acosh => f64::acosh;
    atanh => f64::atanh;
    exp => f64::exp;
    exp2 => f64::exp2;
    /// `e^x - 1`
    expm1 => f64::exp_m1;
    /// 自然对数
    ln => f64::ln;
    log10 => f64::log10;
    sqrt => f64::sqrt;
    cbrt => f64::cbrt;
    abs => f64::abs;
    /// 符号函数，`sign(0) == 1`
    sign => f64::signum;
    ceil => f64::ceil;
    floor => f64::floor;
    fract => f64::fract;
    round => f64::round;
    /// 离散 delta：`|x| < ε` 时为 1，否则为 0
    delta => kronecker_delta;
    /// 阶跃函数：负数为 0，零点为 0.5，正数为 1
    theta => heaviside;
}

fn kronecker_delta(x: f64) -> f64 {
    if x.abs() < ATOL {
        1.0
    } else {
        0.0
    }
}

fn heaviside(x: f64) -> f64 {
    if x.abs() < ATOL {
        0.5
    } else if x < 0.0 {
        0.0
    } else {
        1.0
    }
}

/// `x * (x - step) * ...`，只对非负整数有定义
fn step_product(x: f64, step: f64) -> f64 {
    if x < 0.0 || x.fract() != 0.0 {
        return f64::NAN;
    }
    let mut product: f64 = 1.0;
    let mut n = x;
    while n > 1.0 && product.is_finite() {
        product *= n;
        n -= step;
    }
    product
}

impl ScalarValue {
    /// 阶乘 `x!`；负数或非整数得到 NaN
    pub fn factorial(&self) -> ScalarValue {
        match self {
            Number(x) => Number(step_product(*x, 1.0)),
            Symbolic(_) => format::postfix(self, "!"),
        }
    }

    /// 双阶乘 `x!!`
    pub fn double_factorial(&self) -> ScalarValue {
        match self {
            Number(x) => Number(step_product(*x, 2.0)),
            Symbolic(_) => format::postfix(self, "!!"),
        }
    }
}

// ============ 四则运算 ============

fn add(lhs: ScalarValue, rhs: ScalarValue) -> ScalarValue {
    match (lhs, rhs) {
        (Number(x), Number(y)) => Number(x + y),
        (Number(x), rhs) if x == 0.0 => rhs,
        (lhs, Number(y)) if y == 0.0 => lhs,
        (lhs, rhs) => format::binary(&lhs, "+", &rhs),
    }
}

fn subtract(lhs: ScalarValue, rhs: ScalarValue) -> ScalarValue {
    match (lhs, rhs) {
        (Number(x), Number(y)) => Number(x - y),
        (lhs, Number(y)) if y == 0.0 => lhs,
        (Number(x), rhs) if x == 0.0 => format::negation(&rhs),
        (lhs, rhs) => format::binary(&lhs, "-", &rhs),
    }
}

fn multiply(lhs: ScalarValue, rhs: ScalarValue) -> ScalarValue {
    match (lhs, rhs) {
        (Number(x), Number(y)) => Number(x * y),
        (Number(x), _) if x == 0.0 => ScalarValue::ZERO,
        (_, Number(y)) if y == 0.0 => ScalarValue::ZERO,
        (Number(x), rhs) if x == 1.0 => rhs,
        (lhs, Number(y)) if y == 1.0 => lhs,
        (lhs, rhs) => format::binary(&lhs, "*", &rhs),
    }
}

fn divide(lhs: ScalarValue, rhs: ScalarValue) -> CalcResult<ScalarValue> {
    match (lhs, rhs) {
        (_, Number(y)) if y == 0.0 => Err(CalcError::DivisionByZero),
        (Number(x), Number(y)) => Ok(Number(x / y)),
        (Number(x), _) if x == 0.0 => Ok(ScalarValue::ZERO),
        (lhs, Number(y)) if y == 1.0 => Ok(lhs),
        (lhs, rhs) => Ok(format::binary(&lhs, "/", &rhs)),
    }
}

macro_rules! impl_binary_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $apply:ident) => {
        impl<T: Into<ScalarValue>> $Op<T> for ScalarValue {
            type Output = ScalarValue;

            fn $op(self, rhs: T) -> ScalarValue {
                $apply(self, rhs.into())
            }
        }

        impl<T: Into<ScalarValue>> $Op<T> for &ScalarValue {
            type Output = ScalarValue;

            fn $op(self, rhs: T) -> ScalarValue {
                $apply(self.clone(), rhs.into())
            }
        }

        impl $Op<ScalarValue> for f64 {
            type Output = ScalarValue;

            fn $op(self, rhs: ScalarValue) -> ScalarValue {
                $apply(Number(self), rhs)
            }
        }

        impl<T: Into<ScalarValue>> $OpAssign<T> for ScalarValue {
            fn $op_assign(&mut self, rhs: T) {
                *self = $apply(std::mem::take(self), rhs.into());
            }
        }
    };
}

impl_binary_op!(Add, add, AddAssign, add_assign, add);
impl_binary_op!(Sub, sub, SubAssign, sub_assign, subtract);
impl_binary_op!(Mul, mul, MulAssign, mul_assign, multiply);

impl Neg for ScalarValue {
    type Output = ScalarValue;

    fn neg(self) -> ScalarValue {
        match self {
            Number(x) => Number(-x),
            Symbolic(_) => format::negation(&self),
        }
    }
}

impl Neg for &ScalarValue {
    type Output = ScalarValue;

    fn neg(self) -> ScalarValue {
        -self.clone()
    }
}

impl Sum for ScalarValue {
    fn sum<I: Iterator<Item = ScalarValue>>(iter: I) -> ScalarValue {
        iter.fold(ScalarValue::ZERO, add)
    }
}

impl<'a> Sum<&'a ScalarValue> for ScalarValue {
    fn sum<I: Iterator<Item = &'a ScalarValue>>(iter: I) -> ScalarValue {
        iter.fold(ScalarValue::ZERO, |acc, value| add(acc, value.clone()))
    }
}

// ============ 构造与转换 ============

impl Default for ScalarValue {
    fn default() -> Self {
        ScalarValue::ZERO
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ScalarValue {
                fn from(value: $ty) -> Self {
                    Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, i64, u32, u64);

impl From<&f64> for ScalarValue {
    fn from(value: &f64) -> Self {
        Number(*value)
    }
}

/// 字符串原样成为符号值，不做解析（需要校验用 `str::parse`）
impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Symbolic(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Symbolic(value)
    }
}

impl From<&String> for ScalarValue {
    fn from(value: &String) -> Self {
        Symbolic(value.clone())
    }
}

impl From<&ScalarValue> for ScalarValue {
    fn from(value: &ScalarValue) -> Self {
        value.clone()
    }
}

impl TryFrom<ScalarValue> for f64 {
    type Error = CalcError;

    fn try_from(value: ScalarValue) -> CalcResult<f64> {
        value.float()
    }
}

impl TryFrom<&ScalarValue> for f64 {
    type Error = CalcError;

    fn try_from(value: &ScalarValue) -> CalcResult<f64> {
        value.float()
    }
}

impl FromStr for ScalarValue {
    type Err = CalcError;

    /// 纯数字字面量得到 `Number`，其余文本必须是合法表达式
    fn from_str(s: &str) -> CalcResult<ScalarValue> {
        if let Some(n) = numeric_literal(s) {
            return Ok(Number(n));
        }
        symcalc_syntax::parse(s)?;
        Ok(Symbolic(s.trim().to_string()))
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number(n) => format::write_number(f, *n),
            Symbolic(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::ScalarValue::Number;

    fn sym(s: &str) -> ScalarValue {
        ScalarValue::from(s)
    }

    #[test]
    fn test_add_identities() {
        assert_eq!(sym("x") + 0.0, sym("x"));
        assert_eq!(ScalarValue::ZERO + sym("x"), sym("x"));
        assert_eq!(sym("x") + 2.0, sym("(x + 2e0)"));
        assert_eq!(ScalarValue::from(1.5) + 2.5, Number(4.0));
    }

    #[test]
    fn test_sub_identities() {
        assert_eq!(sym("x") - 0.0, sym("x"));
        assert_eq!(ScalarValue::ZERO - sym("x"), sym("(-x)"));
        assert_eq!(sym("x") - sym("y"), sym("(x - y)"));
        assert_eq!(ScalarValue::from(3) - 5, Number(-2.0));
    }

    #[test]
    fn test_mul_identities() {
        assert_eq!(sym("x") * 1.0, sym("x"));
        assert_eq!(ScalarValue::ONE * sym("x"), sym("x"));
        assert_eq!(sym("x") * 0.0, ScalarValue::ZERO);
        assert_eq!(ScalarValue::ZERO * sym("x"), ScalarValue::ZERO);
        assert_eq!(sym("x") * sym("y"), sym("(x * y)"));
        assert_eq!(2.0 * sym("x"), sym("(2e0 * x)"));
    }

    #[test]
    fn test_div() {
        assert_eq!(
            sym("x").checked_div(0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            ScalarValue::ONE.checked_div(0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(ScalarValue::ZERO.checked_div(sym("x")), Ok(ScalarValue::ZERO));
        assert_eq!(sym("x").checked_div(1.0), Ok(sym("x")));
        assert_eq!(sym("x").checked_div(sym("y")), Ok(sym("(x / y)")));
        assert_eq!(ScalarValue::from(1.0).checked_div(4.0), Ok(Number(0.25)));
    }

    #[test]
    fn test_div_by_symbolic_zero_text_is_symbolic() {
        // 只有字面量 Number(0) 是除零
        assert_eq!(sym("x").checked_div(sym("0")), Ok(sym("(x / 0)")));
    }

    #[test]
    fn test_div_assign() {
        let mut value = ScalarValue::from(6.0);
        value.checked_div_assign(3.0).unwrap();
        assert_eq!(value, Number(2.0));

        let mut value = sym("x");
        assert!(value.checked_div_assign(0.0).is_err());
        assert_eq!(value, sym("x"));
    }

    #[test]
    fn test_compound_assign() {
        let mut value = sym("x");
        value += 1.0;
        value *= sym("y");
        value -= 0.0;
        assert_eq!(value, sym("((x + 1e0) * y)"));
    }

    #[test]
    fn test_neg() {
        assert_eq!(-ScalarValue::from(2.0), Number(-2.0));
        assert_eq!(-sym("x"), sym("(-x)"));
        assert_eq!(-&sym("x"), sym("(-x)"));
    }

    #[test]
    fn test_unary_functions() {
        assert_eq!(ScalarValue::ZERO.sin(), Number(0.0));
        assert_eq!(ScalarValue::from(4.0).sqrt(), Number(2.0));
        assert_eq!(sym("x").sin(), sym("sin(x)"));
        assert_eq!(sym("(x + y)").ln(), sym("ln((x + y))"));
        assert_eq!(ScalarValue::from(-3.0).abs(), Number(3.0));
    }

    #[test]
    fn test_sign_of_zero_is_one() {
        assert_eq!(ScalarValue::ZERO.sign(), Number(1.0));
        assert_eq!(ScalarValue::from(-0.5).sign(), Number(-1.0));
    }

    #[test]
    fn test_delta_and_theta() {
        assert_eq!(ScalarValue::ZERO.delta(), ScalarValue::ONE);
        assert_eq!(ScalarValue::from(1e-3).delta(), ScalarValue::ZERO);
        assert_eq!(ScalarValue::ZERO.theta(), Number(0.5));
        assert_eq!(ScalarValue::from(-2.0).theta(), ScalarValue::ZERO);
        assert_eq!(ScalarValue::from(2.0).theta(), ScalarValue::ONE);
        assert_eq!(sym("x").theta(), sym("theta(x)"));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(ScalarValue::from(5.0).factorial(), Number(120.0));
        assert_eq!(ScalarValue::ZERO.factorial(), ScalarValue::ONE);
        assert_eq!(ScalarValue::from(7.0).double_factorial(), Number(105.0));
        assert_eq!(ScalarValue::from(6.0).double_factorial(), Number(48.0));
        assert!(ScalarValue::from(2.5).factorial().as_number().unwrap().is_nan());
        assert!(ScalarValue::from(-1.0).factorial().as_number().unwrap().is_nan());
        assert_eq!(
            ScalarValue::from(200.0).factorial(),
            Number(f64::INFINITY)
        );
        assert_eq!(sym("n").factorial(), sym("(n!)"));
        assert_eq!(sym("n").double_factorial(), sym("(n!!)"));
    }

    #[test]
    fn test_binary_functions() {
        assert_eq!(ScalarValue::ONE.atan2(1.0), Number(1f64.atan2(1.0)));
        assert_eq!(sym("b").atan2(sym("a")), sym("atan2(b, a)"));
        assert_eq!(sym("a").max(2.0), sym("max(a, 2e0)"));
        assert_eq!(ScalarValue::from(3.0).hypot(4.0), Number(5.0));
    }

    #[test]
    fn test_powf() {
        assert_eq!(ScalarValue::from(2.0).powf(10.0), Number(1024.0));
        assert_eq!(sym("x").powf(2.0), sym("(x ^ 2e0)"));
    }

    #[test]
    fn test_recip() {
        assert_eq!(ScalarValue::from(4.0).recip(), Ok(Number(0.25)));
        assert_eq!(sym("x").recip(), Ok(sym("(1e0 / x)")));
        assert_eq!(ScalarValue::ZERO.recip(), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn test_isclose() {
        let one = ScalarValue::ONE;
        assert!(one.isclose(sym("1")));
        assert!(!one.isclose(sym("2")));
        assert!(one.isclose(1.0 + 1e-9));
        assert!(!one.isclose(1.0 + 1e-4));
        assert!(one.isclose(sym("1e0")));
        assert!(ScalarValue::from(-2.0).isclose(sym("-2")));
        assert!(sym("x").isclose(sym("x")));
        assert!(!sym("x").isclose(sym("y")));
        assert!(!one.isclose(sym("x")));
    }

    #[test]
    fn test_float_cast() {
        assert_eq!(ScalarValue::from(2.5).float(), Ok(2.5));
        assert_eq!(
            f64::try_from(sym("x")),
            Err(CalcError::NotAFloat {
                value: "x".to_string()
            })
        );
        // 即便文本是数字，符号值也不是 float
        assert!(sym("1").float().is_err());
    }

    #[test]
    fn test_equality_is_per_variant() {
        assert_ne!(ScalarValue::ONE, sym("1"));
        assert_ne!(ScalarValue::ONE, sym("1e0"));
        assert_eq!(ScalarValue::from(1), ScalarValue::from(1.0));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1.5".parse::<ScalarValue>(), Ok(Number(1.5)));
        assert_eq!("-2e0".parse::<ScalarValue>(), Ok(Number(-2.0)));
        assert_eq!("a + b".parse::<ScalarValue>(), Ok(sym("a + b")));
        assert!("a +".parse::<ScalarValue>().is_err());
        assert!("1 $ 2".parse::<ScalarValue>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarValue::from(1).to_string(), "1e0");
        assert_eq!(sym("x + 1").to_string(), "x + 1");
    }

    #[test]
    fn test_sum() {
        let values = vec![sym("a"), ScalarValue::ZERO, sym("b"), ScalarValue::ONE];
        assert_eq!(values.iter().sum::<ScalarValue>(), sym("((a + b) + 1e0)"));
        let numbers: ScalarValue = [1.0, 2.0, 3.0].into_iter().map(ScalarValue::from).sum();
        assert_eq!(numbers, Number(6.0));
    }
}
