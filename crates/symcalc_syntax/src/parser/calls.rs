use crate::ast::{Expr, ExprKind};
use crate::builtin::Builtin;
use crate::error::ParseError;

/// 检查所有函数调用：函数名在函数表中，且参数个数正确
///
/// 先检查参数再检查调用本身，报告最内层的错误。
pub fn check(expr: &Expr) -> Result<(), ParseError> {
    match &expr.kind {
        ExprKind::Literal(_) | ExprKind::Variable(_) => Ok(()),
        ExprKind::Unary(_, child) => check(child),
        ExprKind::Binary(lhs, _, rhs) => {
            check(lhs)?;
            check(rhs)
        }
        ExprKind::Call { name, args } => {
            for arg in args {
                check(arg)?;
            }
            let builtin = Builtin::from_name(name).ok_or_else(|| ParseError::UnknownFunction {
                name: name.clone(),
                span: expr.span.start..expr.span.start + name.len(),
            })?;
            if builtin.arity() != args.len() {
                return Err(ParseError::ArityMismatch {
                    name: name.clone(),
                    expected: builtin.arity(),
                    found: args.len(),
                    span: expr.span.clone(),
                });
            }
            Ok(())
        }
    }
}
