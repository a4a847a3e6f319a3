//! Calculator
//!
//! 持有变量绑定表，串起 词法 → 语法 → 求值 的整条流水线。
//! 输入是 `;` 分隔的语句序列，结果取最后一条语句的值。

use crate::complex::ComplexValue;
use crate::environment::Environment;
use crate::error::{CalcError, CalcResult};
use crate::eval::Evaluator;
use crate::scalar::ScalarValue;
use num_complex::Complex;
use symcalc_syntax::{Stmt, StmtKind};
use tracing::debug;

/// 表达式计算器
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    env: Environment,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用一组初始绑定创建计算器
    pub fn with_variables<I, K, V>(variables: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<ScalarValue>,
    {
        Self {
            env: variables.into_iter().collect(),
        }
    }

    /// 设置变量，已存在时覆盖
    pub fn set(&mut self, name: &str, value: impl Into<ScalarValue>) {
        let value = value.into();
        debug!(name, value = %value, "variable set");
        self.env.define(name, value);
    }

    pub fn get(&self, name: &str) -> Option<&ScalarValue> {
        self.env.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<ScalarValue> {
        self.env.remove(name)
    }

    pub fn clear(&mut self) {
        self.env.clear();
    }

    pub fn variables(&self) -> impl Iterator<Item = (&str, &ScalarValue)> {
        self.env.iter()
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// 求值表达式，未绑定的变量留在符号结果中
    ///
    /// 多条语句依次求值，返回最后一条的值；出现赋值时返回
    /// [`CalcError::ForbiddenAssign`]，绑定表不会被修改。
    pub fn parse(&self, expression: &str) -> CalcResult<ScalarValue> {
        let result = symcalc_syntax::parse_program(expression)
            .map_err(CalcError::from)
            .and_then(|program| self.run_read_only(&program));
        match &result {
            Ok(value) => debug!(expression, result = %value, "expression evaluated"),
            Err(err) => debug!(expression, error = %err, "evaluation failed"),
        }
        result
    }

    /// 依次执行语句，`name = expr` 立即写入绑定表，返回最后一条语句的数值
    ///
    /// 出错时已经执行的赋值保留。
    pub fn parse_assign(&mut self, statements: &str) -> CalcResult<f64> {
        let program = symcalc_syntax::parse_program(statements)?;
        let mut last = ScalarValue::ZERO;
        for stmt in &program {
            let value = Evaluator::new(&self.env).evaluate(stmt.value())?;
            if let StmtKind::Assign { name, .. } = &stmt.kind {
                debug!(name = name.as_str(), value = %value, "variable assigned");
                self.env.define(name.as_str(), value.clone());
            }
            last = value;
        }
        debug!(statements, result = %last, "statements evaluated");
        match last {
            ScalarValue::Number(value) => Ok(value),
            ScalarValue::Symbolic(residual) => Err(CalcError::UnresolvedExpression { residual }),
        }
    }

    fn run_read_only(&self, program: &[Stmt]) -> CalcResult<ScalarValue> {
        let evaluator = Evaluator::new(&self.env);
        let mut last = ScalarValue::ZERO;
        for stmt in program {
            if let StmtKind::Assign { name, .. } = &stmt.kind {
                return Err(CalcError::ForbiddenAssign { name: name.clone() });
            }
            last = evaluator.evaluate(stmt.value())?;
        }
        Ok(last)
    }

    /// 求值表达式，结果必须是数值
    pub fn parse_get(&self, expression: &str) -> CalcResult<f64> {
        match self.parse(expression)? {
            ScalarValue::Number(value) => Ok(value),
            ScalarValue::Symbolic(residual) => Err(CalcError::UnresolvedExpression { residual }),
        }
    }

    /// 在当前绑定下把标量化成 f64（符号值会被重新解析）
    pub fn resolve(&self, value: &ScalarValue) -> CalcResult<f64> {
        match value {
            ScalarValue::Number(value) => Ok(*value),
            ScalarValue::Symbolic(expression) => self.parse_get(expression),
        }
    }

    /// 在当前绑定下把复数化成原生复数
    pub fn resolve_complex(&self, value: &ComplexValue) -> CalcResult<Complex<f64>> {
        Ok(Complex::new(
            self.resolve(value.real())?,
            self.resolve(value.imag())?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_parse_get() {
        let mut calc = Calculator::new();
        calc.set("a", 2.0);
        calc.set("b", 3.0);
        assert_eq!(calc.parse_get("a * b + 1"), Ok(7.0));

        calc.set("a", 10.0);
        assert_eq!(calc.parse_get("a * b + 1"), Ok(31.0));
    }

    #[test]
    fn test_parse_get_unresolved() {
        let calc = Calculator::new();
        assert_eq!(
            calc.parse_get("x + 1"),
            Err(CalcError::UnresolvedExpression {
                residual: "(x + 1e0)".to_string()
            })
        );
    }

    #[test]
    fn test_parse_is_non_failing_on_symbols() {
        let calc = Calculator::with_variables([("a", 1.0)]);
        assert_eq!(calc.parse("a + x"), Ok(ScalarValue::from("(1e0 + x)")));
    }

    #[test]
    fn test_syntax_errors_propagate() {
        let calc = Calculator::new();
        assert!(matches!(calc.parse("1 +"), Err(CalcError::Syntax(_))));
        assert!(matches!(calc.parse_get("2 $ 3"), Err(CalcError::Syntax(_))));
    }

    #[test]
    fn test_symbolic_binding() {
        let mut calc = Calculator::new();
        calc.set("a", "b * 2");
        calc.set("b", 4.0);
        // 绑定的符号值按原文参与运算，不会再展开
        assert_eq!(calc.parse("a + 1"), Ok(ScalarValue::from("((b * 2) + 1e0)")));
        assert_eq!(calc.resolve(&ScalarValue::from("b * 2")), Ok(8.0));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut calc = Calculator::with_variables([("a", 1.0), ("b", 2.0)]);
        assert_eq!(calc.remove("a"), Some(ScalarValue::ONE));
        assert_eq!(calc.get("a"), None);
        assert_eq!(calc.variables().count(), 1);
        calc.clear();
        assert_eq!(calc.variables().count(), 0);
    }

    #[test]
    fn test_parse_assign_binds_in_order() {
        let mut calc = Calculator::new();
        assert_eq!(calc.parse_assign("a = 2; b = a * 3; b"), Ok(6.0));
        assert_eq!(calc.get("a"), Some(&ScalarValue::Number(2.0)));
        assert_eq!(calc.get("b"), Some(&ScalarValue::Number(6.0)));

        assert_eq!(calc.parse_assign("a=3; 2*(a+1);"), Ok(8.0));
        assert_eq!(calc.get("a"), Some(&ScalarValue::Number(3.0)));
    }

    #[test]
    fn test_parse_assign_last_statement_value() {
        let mut calc = Calculator::new();
        assert_eq!(calc.parse_assign("c = 4"), Ok(4.0));
        assert_eq!(
            calc.parse_assign("d = c + x"),
            Err(CalcError::UnresolvedExpression {
                residual: "(4e0 + x)".to_string()
            })
        );
        // 符号结果同样被绑定
        assert_eq!(calc.get("d"), Some(&ScalarValue::from("(4e0 + x)")));
    }

    #[test]
    fn test_parse_assign_keeps_earlier_bindings_on_error() {
        let mut calc = Calculator::new();
        assert_eq!(
            calc.parse_assign("a = 1; b = a / 0; c = 2"),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(calc.get("a"), Some(&ScalarValue::ONE));
        assert_eq!(calc.get("b"), None);
        assert_eq!(calc.get("c"), None);

        assert!(matches!(calc.parse_assign(""), Err(CalcError::Syntax(_))));
        assert!(matches!(calc.parse_assign("; a = 1"), Err(CalcError::Syntax(_))));
    }

    #[test]
    fn test_parse_rejects_assignment() {
        let calc = Calculator::new();
        assert_eq!(
            calc.parse("a = 1"),
            Err(CalcError::ForbiddenAssign {
                name: "a".to_string()
            })
        );
        assert_eq!(calc.get("a"), None);
        assert_eq!(calc.parse("1; 2 * 3"), Ok(ScalarValue::Number(6.0)));
        assert_eq!(calc.parse_get("x + 1; 2"), Ok(2.0));
    }

    #[test]
    fn test_resolve_complex() {
        let calc = Calculator::with_variables([("x", 2.0)]);
        let value = ComplexValue::from_pair("x * 3", "-x");
        assert_eq!(calc.resolve_complex(&value), Ok(Complex::new(6.0, -2.0)));
    }
}
