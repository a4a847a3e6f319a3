//! Builtin function evaluation
//!
//! 函数表到 [`ScalarValue`] 方法的分派。别名（`log`、`arcosh` 等）
//! 落到同一个方法上，符号结果里写作方法自己的名字。

use crate::scalar::ScalarValue;
use symcalc_syntax::Builtin;

/// 调用内建函数
///
/// 参数个数与 [`Builtin::arity`] 不符时返回 `None`。
pub fn call(builtin: Builtin, args: &[ScalarValue]) -> Option<ScalarValue> {
    let value = match (builtin, args) {
        (Builtin::Sin, [x]) => x.sin(),
        (Builtin::Cos, [x]) => x.cos(),
        (Builtin::Tan, [x]) => x.tan(),
        (Builtin::Asin, [x]) => x.asin(),
        (Builtin::Acos, [x]) => x.acos(),
        (Builtin::Atan, [x]) => x.atan(),
        (Builtin::Sinh, [x]) => x.sinh(),
        (Builtin::Cosh, [x]) => x.cosh(),
        (Builtin::Tanh, [x]) => x.tanh(),
        (Builtin::Asinh | Builtin::Arsinh, [x]) => x.asinh(),
        (Builtin::Acosh | Builtin::Arcosh, [x]) => x.acosh(),
        (Builtin::Atanh | Builtin::Artanh, [x]) => x.atanh(),
        (Builtin::Exp, [x]) => x.exp(),
        (Builtin::Exp2, [x]) => x.exp2(),
        (Builtin::Expm1, [x]) => x.expm1(),
        (Builtin::Ln | Builtin::Log, [x]) => x.ln(),
        (Builtin::Log10, [x]) => x.log10(),
        (Builtin::Sqrt, [x]) => x.sqrt(),
        (Builtin::Cbrt, [x]) => x.cbrt(),
        (Builtin::Abs, [x]) => x.abs(),
        (Builtin::Sign, [x]) => x.sign(),
        (Builtin::Ceil, [x]) => x.ceil(),
        (Builtin::Floor, [x]) => x.floor(),
        (Builtin::Fract, [x]) => x.fract(),
        (Builtin::Round, [x]) => x.round(),
        (Builtin::Delta, [x]) => x.delta(),
        (Builtin::Theta, [x]) => x.theta(),
        (Builtin::Atan2, [y, x]) => y.atan2(x.clone()),
        (Builtin::Pow, [base, exponent]) => base.powf(exponent.clone()),
        (Builtin::Hypot, [a, b]) => a.hypot(b.clone()),
        (Builtin::Max, [a, b]) => a.max(b.clone()),
        (Builtin::Min, [a, b]) => a.min(b.clone()),
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_has_an_implementation() {
        for builtin in Builtin::ALL {
            let args = vec![ScalarValue::from(0.5); builtin.arity()];
            assert!(call(builtin, &args).is_some(), "{}", builtin);
        }
    }

    #[test]
    fn test_wrong_arity_is_none() {
        assert_eq!(call(Builtin::Sin, &[]), None);
        assert_eq!(call(Builtin::Sin, &[ScalarValue::ONE, ScalarValue::ONE]), None);
        assert_eq!(call(Builtin::Atan2, &[ScalarValue::ONE]), None);
    }

    #[test]
    fn test_numeric() {
        assert_eq!(
            call(Builtin::Sqrt, &[ScalarValue::from(9.0)]),
            Some(ScalarValue::Number(3.0))
        );
        assert_eq!(
            call(Builtin::Pow, &[ScalarValue::from(2.0), ScalarValue::from(3.0)]),
            Some(ScalarValue::Number(8.0))
        );
        let log_e = call(Builtin::Log, &[ScalarValue::E]).unwrap();
        assert!(log_e.isclose(1.0));
        assert_eq!(
            call(Builtin::Theta, &[ScalarValue::ZERO]),
            Some(ScalarValue::Number(0.5))
        );
    }

    #[test]
    fn test_dispatch_matches_methods() {
        let x = ScalarValue::from(0.75);
        assert_eq!(call(Builtin::Expm1, &[x.clone()]), Some(x.expm1()));
        assert_eq!(call(Builtin::Arsinh, &[x.clone()]), Some(x.asinh()));
        assert_eq!(call(Builtin::Artanh, &[x.clone()]), Some(x.atanh()));
        let y = ScalarValue::from(1.5);
        assert_eq!(call(Builtin::Arcosh, &[y.clone()]), Some(y.acosh()));
        assert_eq!(call(Builtin::Hypot, &[x.clone(), y.clone()]), Some(x.hypot(y)));
    }

    #[test]
    fn test_symbolic_aliases_use_canonical_name() {
        let x = ScalarValue::from("x");
        assert_eq!(call(Builtin::Log, &[x.clone()]), Some(ScalarValue::from("ln(x)")));
        assert_eq!(call(Builtin::Arcosh, &[x.clone()]), Some(ScalarValue::from("acosh(x)")));
        assert_eq!(
            call(Builtin::Pow, &[x, ScalarValue::from(2.0)]),
            Some(ScalarValue::from("(x ^ 2e0)"))
        );
    }
}
