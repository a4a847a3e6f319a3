//! Canonical formatting
//!
//! 所有符号串都经由这里生成。数值一律写成 `{:e}` 的科学计数法（`1` → `1e0`），
//! 这是 Rust 的最短可往返表示，重新词法分析后得到同一个 f64。

use crate::scalar::ScalarValue;
use std::fmt;
use symcalc_syntax::lexer::{tokenize, Token};

/// 数值的规范写法
///
/// 无穷大写作溢出的字面量 `1e999`，重新读入时仍是无穷大。
/// NaN 没有字面量，写作 `NaN`，重新解析时是一个未绑定的变量。
pub fn number(value: f64) -> String {
    if value.is_infinite() {
        let text = if value > 0.0 { "1e999" } else { "-1e999" };
        return text.to_string();
    }
    format!("{:e}", value)
}

/// 标量的规范写法：数值用 [`number`]，符号原样输出
pub fn canonical(value: &ScalarValue) -> String {
    value.to_string()
}

pub(crate) fn write_number(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    f.write_str(&number(value))
}

/// `(lhs op rhs)`
pub(crate) fn binary(lhs: &ScalarValue, op: &str, rhs: &ScalarValue) -> ScalarValue {
    ScalarValue::Symbolic(format!("({} {} {})", lhs, op, rhs))
}

/// `(lhs ^ rhs)`
///
/// 乘方比一元负号结合更紧，负数底必须再包一层括号：`((-2e0) ^ x)`。
pub(crate) fn power(lhs: &ScalarValue, rhs: &ScalarValue) -> ScalarValue {
    match lhs {
        ScalarValue::Number(n) if n.is_sign_negative() => {
            ScalarValue::Symbolic(format!("(({}) ^ {})", number(*n), rhs))
        }
        _ => binary(lhs, "^", rhs),
    }
}

/// `(-value)`
pub(crate) fn negation(value: &ScalarValue) -> ScalarValue {
    ScalarValue::Symbolic(format!("(-{})", value))
}

/// `(value!)`
pub(crate) fn postfix(value: &ScalarValue, op: &str) -> ScalarValue {
    ScalarValue::Symbolic(format!("({}{})", value, op))
}

/// `name(arg, ...)`
pub(crate) fn call(name: &str, args: &[&ScalarValue]) -> ScalarValue {
    let args = args
        .iter()
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    ScalarValue::Symbolic(format!("{}({})", name, args))
}

/// 把非原子的符号值包进括号
///
/// 变量绑定的符号文本来自调用方，例如 `"b + 2"`，直接拼进 `(a * ...)` 会改变优先级。
/// 标识符、数字、整体被一对括号包住的文本和函数调用视为原子，保持原样。
pub(crate) fn grouped(value: ScalarValue) -> ScalarValue {
    match &value {
        ScalarValue::Symbolic(text) if !is_atomic(text) => {
            ScalarValue::Symbolic(format!("({})", text.trim()))
        }
        _ => value,
    }
}

fn is_atomic(text: &str) -> bool {
    let Ok(tokens) = tokenize(text) else {
        return false;
    };
    let tokens: Vec<Token> = tokens.into_iter().map(|(token, _)| token).collect();
    match tokens.as_slice() {
        [Token::Ident(_)] | [Token::Number(_)] => true,
        [Token::LParen, ..] => closes_at_end(&tokens),
        [Token::Ident(_), Token::LParen, ..] => closes_at_end(&tokens[1..]),
        _ => false,
    }
}

/// `tokens[0]` 是 `(`，与之匹配的 `)` 是否恰好是最后一个 token
fn closes_at_end(tokens: &[Token]) -> bool {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == tokens.len() - 1;
                }
            }
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_is_scientific() {
        assert_eq!(number(1.0), "1e0");
        assert_eq!(number(0.1), "1e-1");
        assert_eq!(number(-2.5), "-2.5e0");
        assert_eq!(number(1234.5), "1.2345e3");
        assert_eq!(number(0.0), "0e0");
    }

    #[test]
    fn test_canonical() {
        assert_eq!(canonical(&ScalarValue::Number(2.0)), "2e0");
        assert_eq!(canonical(&ScalarValue::from("a + b")), "a + b");
    }

    #[test]
    fn test_non_finite_numbers() {
        assert_eq!(number(f64::INFINITY), "1e999");
        assert_eq!(number(f64::NEG_INFINITY), "-1e999");
        assert_eq!(number(f64::NAN), "NaN");
        assert_eq!(
            power(&ScalarValue::Number(f64::NEG_INFINITY), &ScalarValue::from("x")),
            ScalarValue::from("((-1e999) ^ x)")
        );
    }

    #[test]
    fn test_number_round_trips_through_lexer() {
        for value in [
            1.0,
            0.1,
            1.0 / 3.0,
            6.02214076e23,
            1e-300,
            123456789.0,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ] {
            let text = number(value);
            assert_eq!(
                symcalc_syntax::lexer::numeric_literal(&text),
                Some(value),
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_power_wraps_negative_base() {
        let base = ScalarValue::Number(-2.0);
        assert_eq!(
            power(&base, &ScalarValue::from("x")),
            ScalarValue::from("((-2e0) ^ x)")
        );
        assert_eq!(
            power(&ScalarValue::from("x"), &base),
            ScalarValue::from("(x ^ -2e0)")
        );
    }

    #[test]
    fn test_grouped() {
        let wrap = |s: &str| grouped(ScalarValue::from(s));
        assert_eq!(wrap("x"), ScalarValue::from("x"));
        assert_eq!(wrap("(a + b)"), ScalarValue::from("(a + b)"));
        assert_eq!(wrap("sin(a + b)"), ScalarValue::from("sin(a + b)"));
        assert_eq!(wrap("a + b"), ScalarValue::from("(a + b)"));
        assert_eq!(wrap("(a) + (b)"), ScalarValue::from("((a) + (b))"));
        assert_eq!(wrap("-x"), ScalarValue::from("(-x)"));
        assert_eq!(grouped(ScalarValue::ONE), ScalarValue::ONE);
    }

    #[test]
    fn test_call_formats_numbers_canonically() {
        let value = call(
            "atan2",
            &[&ScalarValue::from("b"), &ScalarValue::Number(2.0)],
        );
        assert_eq!(value, ScalarValue::from("atan2(b, 2e0)"));
    }
}
