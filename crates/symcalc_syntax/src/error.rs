//! Syntax Errors
//!
//! 词法与语法错误，均携带源码位置

use crate::ast::Span;
use crate::lexer::Token;
use chumsky::error::{Simple, SimpleReason};
use symcalc_diagnostics::{Diagnostic, SpanExt};
use thiserror::Error;

/// 词法错误：表达式中出现了语法之外的字符
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected character '{ch}' at offset {offset}")]
pub struct LexError {
    pub ch: char,
    pub offset: usize,
}

impl LexError {
    pub fn span(&self) -> Span {
        self.offset..self.offset + self.ch.len_utf8()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.to_string())
            .span(self.span())
            .label("not part of the expression grammar")
            .with_note("expressions may contain numbers, identifiers, + - * / ^ !, parentheses, commas, '=' and ';'")
    }
}

/// 语法错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 出现了不该出现的 token
    #[error("unexpected token '{found}' at offset {}", span.start)]
    UnexpectedToken {
        found: String,
        expected: Vec<String>,
        span: Span,
    },

    /// 表达式提前结束
    #[error("unexpected end of input at offset {}", span.start)]
    UnexpectedEnd { expected: Vec<String>, span: Span },

    /// 括号不匹配
    #[error("unmatched parenthesis at offset {}", span.start)]
    UnmatchedParen { span: Span },

    /// 调用了函数表之外的函数
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String, span: Span },

    /// 参数数量不匹配
    #[error("function '{name}' expects {expected} argument(s), but got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    /// 数字字面量无法转换为 f64
    #[error("invalid number literal '{lexeme}'")]
    InvalidNumber { lexeme: String, span: Span },

    /// `=` 左侧不是变量名
    #[error("invalid assignment target at offset {}", span.start)]
    InvalidAssignTarget { span: Span },
}

impl ParseError {
    /// 获取错误发生的位置
    pub fn span(&self) -> &Span {
        match self {
            Self::UnexpectedToken { span, .. } => span,
            Self::UnexpectedEnd { span, .. } => span,
            Self::UnmatchedParen { span } => span,
            Self::UnknownFunction { span, .. } => span,
            Self::ArityMismatch { span, .. } => span,
            Self::InvalidNumber { span, .. } => span,
            Self::InvalidAssignTarget { span } => span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.to_string()).span(self.span().clone());
        match self {
            Self::UnexpectedToken { expected, .. } | Self::UnexpectedEnd { expected, .. }
                if !expected.is_empty() =>
            {
                diag.with_note(format!("expected one of: {}", expected.join(", ")))
            }
            Self::UnmatchedParen { .. } => diag.label("no matching parenthesis"),
            Self::InvalidAssignTarget { .. } => diag
                .label("not a variable name")
                .with_help("the left side of '=' must be a single identifier"),
            Self::UnknownFunction { .. } => diag.with_help(format!(
                "available functions: {}",
                crate::builtin::Builtin::ALL
                    .iter()
                    .map(|b| b.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
            _ => diag,
        }
    }

    /// 将 chumsky 的错误转换为 ParseError
    ///
    /// 只有整串 token 的括号确实不配对时（`balanced == false`），
    /// 撞上 `)` 或缺少 `)` 才算作 [`ParseError::UnmatchedParen`]。
    pub(crate) fn from_simple(err: Simple<Token>, balanced: bool) -> Self {
        let span = err.span();
        let expected: Vec<String> = {
            let mut names: Vec<String> = err
                .expected()
                .map(|tok| match tok {
                    Some(tok) => format!("'{}'", tok),
                    None => "end of input".to_string(),
                })
                .collect();
            names.sort();
            names
        };
        let expects_rparen = err.expected().any(|tok| tok == &Some(Token::RParen));

        match err.reason() {
            SimpleReason::Unclosed { span, .. } => Self::UnmatchedParen { span: span.clone() },
            // 解析器只为非法数字字面量产生自定义错误，消息即词素
            SimpleReason::Custom(lexeme) => Self::InvalidNumber {
                lexeme: lexeme.clone(),
                span,
            },
            SimpleReason::Unexpected => match err.found() {
                Some(Token::RParen) if !balanced => Self::UnmatchedParen { span },
                None if expects_rparen && !balanced => Self::UnmatchedParen {
                    span: Span::point(span.start),
                },
                None => Self::UnexpectedEnd { expected, span },
                Some(tok) => Self::UnexpectedToken {
                    found: tok.to_string(),
                    expected,
                    span,
                },
            },
        }
    }
}

/// 解析阶段的错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            Self::Lex(err) => err.span(),
            Self::Parse(err) => err.span().clone(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Lex(err) => err.to_diagnostic(),
            Self::Parse(err) => err.to_diagnostic(),
        }
    }
}
