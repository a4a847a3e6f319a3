//! ComplexValue - 由两个 ScalarValue 组成的复数
//!
//! 所有运算都落到标量代数上，所以符号分量会一路保留下来，
//! 只有被恒等式强制时分量才会变成 `Number(0)`。

use crate::error::{CalcError, CalcResult};
use crate::scalar::ScalarValue;
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 复数值
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ComplexValue {
    real: ScalarValue,
    imag: ScalarValue,
}

impl ComplexValue {
    pub const ZERO: ComplexValue = ComplexValue {
        real: ScalarValue::ZERO,
        imag: ScalarValue::ZERO,
    };
    pub const ONE: ComplexValue = ComplexValue {
        real: ScalarValue::ONE,
        imag: ScalarValue::ZERO,
    };
    /// 虚数单位
    pub const I: ComplexValue = ComplexValue {
        real: ScalarValue::ZERO,
        imag: ScalarValue::ONE,
    };

    /// 由实部与虚部构造
    pub fn from_pair(real: impl Into<ScalarValue>, imag: impl Into<ScalarValue>) -> Self {
        Self {
            real: real.into(),
            imag: imag.into(),
        }
    }

    pub fn real(&self) -> &ScalarValue {
        &self.real
    }

    pub fn imag(&self) -> &ScalarValue {
        &self.imag
    }

    pub fn into_parts(self) -> (ScalarValue, ScalarValue) {
        (self.real, self.imag)
    }

    /// 两个分量都是数值
    pub fn is_number(&self) -> bool {
        self.real.is_number() && self.imag.is_number()
    }

    /// 共轭：`0 - imag`
    pub fn conj(&self) -> ComplexValue {
        Self {
            real: self.real.clone(),
            imag: ScalarValue::ZERO - &self.imag,
        }
    }

    /// 辐角：`atan2(imag, real)`
    pub fn arg(&self) -> ScalarValue {
        self.imag.atan2(&self.real)
    }

    /// `re * re + im * im`
    pub fn norm_sqr(&self) -> ScalarValue {
        &self.real * &self.real + &self.imag * &self.imag
    }

    /// 模长
    pub fn norm(&self) -> ScalarValue {
        self.norm_sqr().sqrt()
    }

    /// 同 [`ComplexValue::norm`]
    pub fn abs(&self) -> ScalarValue {
        self.norm()
    }

    /// 除法；除数恰为 `(Number(0), Number(0))` 时失败
    pub fn checked_div(&self, rhs: impl Into<ComplexValue>) -> CalcResult<ComplexValue> {
        let rhs = rhs.into();
        if rhs.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        let (a, b) = (&self.real, &self.imag);
        let (c, d) = (&rhs.real, &rhs.imag);
        let norm = rhs.norm_sqr();
        let real = (a * c + b * d).checked_div(&norm)?;
        let imag = (b * c - a * d).checked_div(&norm)?;
        Ok(Self { real, imag })
    }

    pub fn checked_div_assign(&mut self, rhs: impl Into<ComplexValue>) -> CalcResult<()> {
        *self = self.checked_div(rhs)?;
        Ok(())
    }

    /// `1 / self`
    pub fn recip(&self) -> CalcResult<ComplexValue> {
        ComplexValue::ONE.checked_div(self)
    }

    /// 两个分量分别近似相等
    pub fn isclose(&self, other: impl Into<ComplexValue>) -> bool {
        let other = other.into();
        self.real.isclose(&other.real) && self.imag.isclose(&other.imag)
    }

    fn is_zero(&self) -> bool {
        matches!(
            (&self.real, &self.imag),
            (ScalarValue::Number(re), ScalarValue::Number(im)) if *re == 0.0 && *im == 0.0
        )
    }
}

fn multiply(lhs: &ComplexValue, rhs: &ComplexValue) -> ComplexValue {
    let (a, b) = (&lhs.real, &lhs.imag);
    let (c, d) = (&rhs.real, &rhs.imag);
    ComplexValue {
        real: a * c - b * d,
        imag: a * d + b * c,
    }
}

impl<T: Into<ComplexValue>> Add<T> for ComplexValue {
    type Output = ComplexValue;

    fn add(self, rhs: T) -> ComplexValue {
        let rhs = rhs.into();
        ComplexValue {
            real: self.real + rhs.real,
            imag: self.imag + rhs.imag,
        }
    }
}

impl<T: Into<ComplexValue>> Sub<T> for ComplexValue {
    type Output = ComplexValue;

    fn sub(self, rhs: T) -> ComplexValue {
        let rhs = rhs.into();
        ComplexValue {
            real: self.real - rhs.real,
            imag: self.imag - rhs.imag,
        }
    }
}

impl<T: Into<ComplexValue>> Mul<T> for ComplexValue {
    type Output = ComplexValue;

    fn mul(self, rhs: T) -> ComplexValue {
        multiply(&self, &rhs.into())
    }
}

impl<T: Into<ComplexValue>> Add<T> for &ComplexValue {
    type Output = ComplexValue;

    fn add(self, rhs: T) -> ComplexValue {
        self.clone() + rhs
    }
}

impl<T: Into<ComplexValue>> Sub<T> for &ComplexValue {
    type Output = ComplexValue;

    fn sub(self, rhs: T) -> ComplexValue {
        self.clone() - rhs
    }
}

impl<T: Into<ComplexValue>> Mul<T> for &ComplexValue {
    type Output = ComplexValue;

    fn mul(self, rhs: T) -> ComplexValue {
        multiply(self, &rhs.into())
    }
}

impl<T: Into<ComplexValue>> AddAssign<T> for ComplexValue {
    fn add_assign(&mut self, rhs: T) {
        let rhs = rhs.into();
        self.real += rhs.real;
        self.imag += rhs.imag;
    }
}

impl<T: Into<ComplexValue>> SubAssign<T> for ComplexValue {
    fn sub_assign(&mut self, rhs: T) {
        let rhs = rhs.into();
        self.real -= rhs.real;
        self.imag -= rhs.imag;
    }
}

impl<T: Into<ComplexValue>> MulAssign<T> for ComplexValue {
    fn mul_assign(&mut self, rhs: T) {
        *self = multiply(self, &rhs.into());
    }
}

impl Neg for ComplexValue {
    type Output = ComplexValue;

    fn neg(self) -> ComplexValue {
        ComplexValue {
            real: -self.real,
            imag: -self.imag,
        }
    }
}

impl Sum for ComplexValue {
    fn sum<I: Iterator<Item = ComplexValue>>(iter: I) -> ComplexValue {
        iter.fold(ComplexValue::ZERO, |acc, value| acc + value)
    }
}

impl<'a> Sum<&'a ComplexValue> for ComplexValue {
    fn sum<I: Iterator<Item = &'a ComplexValue>>(iter: I) -> ComplexValue {
        iter.fold(ComplexValue::ZERO, |acc, value| acc + value)
    }
}

// ============ 构造与转换 ============

macro_rules! impl_from_real {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ComplexValue {
                fn from(value: $ty) -> Self {
                    Self {
                        real: value.into(),
                        imag: ScalarValue::ZERO,
                    }
                }
            }
        )*
    };
}

impl_from_real!(f64, f32, i32, i64, u32, u64, &str, String, &String, ScalarValue, &ScalarValue);

impl From<&ComplexValue> for ComplexValue {
    fn from(value: &ComplexValue) -> Self {
        value.clone()
    }
}

impl From<Complex<f64>> for ComplexValue {
    fn from(value: Complex<f64>) -> Self {
        Self::from_pair(value.re, value.im)
    }
}

impl<R: Into<ScalarValue>, I: Into<ScalarValue>> From<(R, I)> for ComplexValue {
    fn from((real, imag): (R, I)) -> Self {
        Self::from_pair(real, imag)
    }
}

impl TryFrom<ComplexValue> for Complex<f64> {
    type Error = CalcError;

    fn try_from(value: ComplexValue) -> CalcResult<Complex<f64>> {
        Complex::<f64>::try_from(&value)
    }
}

impl TryFrom<&ComplexValue> for Complex<f64> {
    type Error = CalcError;

    fn try_from(value: &ComplexValue) -> CalcResult<Complex<f64>> {
        match (&value.real, &value.imag) {
            (ScalarValue::Number(re), ScalarValue::Number(im)) => Ok(Complex::new(*re, *im)),
            _ => Err(CalcError::NotAComplex {
                value: value.to_string(),
            }),
        }
    }
}

/// 只有虚部为数值 0 时才能转换
impl TryFrom<ComplexValue> for f64 {
    type Error = CalcError;

    fn try_from(value: ComplexValue) -> CalcResult<f64> {
        let Complex { re, im } = Complex::<f64>::try_from(&value)?;
        if im != 0.0 {
            return Err(CalcError::ComplexNotReal {
                value: value.to_string(),
            });
        }
        Ok(re)
    }
}

impl fmt::Display for ComplexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} + i * {})", self.real, self.imag)
    }
}
