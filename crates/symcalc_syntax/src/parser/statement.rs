use crate::ast::*;
use crate::error::ParseError;
use crate::lexer::Token;
use chumsky::prelude::*;

use super::ParserError;

/// 解析阶段的语句：左侧表达式，以及可选的 `= 右侧`
pub type RawStmt = ((Expr, Option<Expr>), Span);

/// 语句序列：`stmt (; stmt)* ;?`，连续的 `;` 视为一个分隔符
pub fn parser<'a>(
    expr: impl Parser<Token, Expr, Error = ParserError> + Clone + 'a,
) -> impl Parser<Token, Vec<RawStmt>, Error = ParserError> + Clone + 'a {
    expr.clone()
        .then(just(Token::Assign).ignore_then(expr).or_not())
        .map_with_span(|stmt, span| (stmt, span))
        .separated_by(just(Token::Semicolon).repeated().at_least(1))
        .allow_trailing()
        .at_least(1)
}

/// 赋值语句的左侧必须是单个变量名
pub fn lower(raw: Vec<RawStmt>) -> Result<Vec<Stmt>, ParseError> {
    raw.into_iter()
        .map(|((lhs, rhs), span)| {
            let kind = match (lhs, rhs) {
                (lhs, None) => StmtKind::Expr(lhs),
                (
                    Expr {
                        kind: ExprKind::Variable(name),
                        ..
                    },
                    Some(value),
                ) => StmtKind::Assign { name, value },
                (lhs, Some(_)) => return Err(ParseError::InvalidAssignTarget { span: lhs.span }),
            };
            Ok(Stmt::new(kind, span))
        })
        .collect()
}
