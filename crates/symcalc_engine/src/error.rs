//! Engine Errors
//!
//! 求值与类型转换的错误，集成统一诊断系统

use symcalc_diagnostics::Diagnostic;
use symcalc_syntax::SyntaxError;
use thiserror::Error;

/// 计算错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// 词法或语法错误
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// 除数为字面量 0
    #[error("division by zero")]
    DivisionByZero,

    /// 符号值无法转换为 f64
    #[error("symbolic value '{value}' can not be converted to float")]
    NotAFloat { value: String },

    /// 含符号分量的复数无法转换为原生复数
    #[error("symbolic value '{value}' can not be converted to complex")]
    NotAComplex { value: String },

    /// 虚部非零的复数无法转换为 f64
    #[error("imaginary part of '{value}' is not zero")]
    ComplexNotReal { value: String },

    /// 严格求值后仍然是符号表达式
    #[error("expression could not be fully resolved: '{residual}'")]
    UnresolvedExpression { residual: String },

    /// 函数表中没有这个函数
    #[error("function '{name}' not found")]
    UnknownFunction { name: String },

    /// 只读求值中出现了赋值语句
    #[error("assignment to '{name}' is not allowed in a read-only evaluation")]
    ForbiddenAssign { name: String },
}

impl CalcError {
    /// 转换为诊断
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CalcError::Syntax(err) => err.to_diagnostic(),
            CalcError::DivisionByZero => Diagnostic::error(self.to_string())
                .with_note("the divisor evaluated to the literal number 0"),
            CalcError::UnresolvedExpression { .. } => Diagnostic::error(self.to_string())
                .with_help("bind the remaining variables with `Calculator::set`, or call `Calculator::parse` for the symbolic result"),
            CalcError::ForbiddenAssign { .. } => Diagnostic::error(self.to_string())
                .with_help("use `Calculator::parse_assign` to evaluate statements that bind variables"),
            _ => Diagnostic::error(self.to_string()),
        }
    }
}

/// 计算结果类型
pub type CalcResult<T> = Result<T, CalcError>;
