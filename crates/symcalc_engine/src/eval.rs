//! Evaluator
//!
//! 后序遍历 AST，在每个节点上应用标量代数。

use crate::environment::Environment;
use crate::error::{CalcError, CalcResult};
use crate::format;
use crate::functions;
use crate::scalar::ScalarValue;
use symcalc_syntax::{BinaryOp, Builtin, Expr, ExprKind, ParseError, SyntaxError, UnaryOp};
use tracing::trace;

/// 表达式求值器
pub struct Evaluator<'env> {
    env: &'env Environment,
}

impl<'env> Evaluator<'env> {
    pub fn new(env: &'env Environment) -> Self {
        Self { env }
    }

    /// 求值表达式
    pub fn evaluate(&self, expr: &Expr) -> CalcResult<ScalarValue> {
        match &expr.kind {
            ExprKind::Literal(value) => Ok(ScalarValue::Number(*value)),
            ExprKind::Variable(name) => Ok(format::grouped(self.env.lookup(name))),
            ExprKind::Unary(op, operand) => {
                let value = self.evaluate(operand)?;
                Ok(match op {
                    UnaryOp::Neg => -value,
                    UnaryOp::Pos => value,
                    UnaryOp::Factorial => value.factorial(),
                    UnaryOp::DoubleFactorial => value.double_factorial(),
                })
            }
            ExprKind::Binary(lhs, op, rhs) => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                self.binary(lhs, *op, rhs)
            }
            ExprKind::Call { .. } => self.call(expr),
        }
    }

    fn binary(&self, lhs: ScalarValue, op: BinaryOp, rhs: ScalarValue) -> CalcResult<ScalarValue> {
        match op {
            BinaryOp::Add => Ok(lhs + rhs),
            BinaryOp::Sub => Ok(lhs - rhs),
            BinaryOp::Mul => Ok(lhs * rhs),
            BinaryOp::Div => lhs.checked_div(rhs),
            BinaryOp::Pow => Ok(lhs.powf(rhs)),
        }
    }

    fn call(&self, expr: &Expr) -> CalcResult<ScalarValue> {
        let ExprKind::Call { name, args } = &expr.kind else {
            return self.evaluate(expr);
        };
        // 解析器已检查过函数名与参数个数，这里只处理手工构造的 AST
        let builtin = Builtin::from_name(name).ok_or_else(|| CalcError::UnknownFunction {
            name: name.to_string(),
        })?;
        let values = args
            .iter()
            .map(|arg| self.evaluate(arg))
            .collect::<CalcResult<Vec<_>>>()?;

        trace!(function = name.as_str(), arity = values.len(), "calling builtin");
        functions::call(builtin, &values).ok_or_else(|| {
            CalcError::Syntax(SyntaxError::Parse(ParseError::ArityMismatch {
                name: name.to_string(),
                expected: builtin.arity(),
                found: values.len(),
                span: expr.span.clone(),
            }))
        })
    }
}
