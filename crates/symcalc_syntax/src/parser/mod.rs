//! Parser Module
//!
//! chumsky 组合子实现的表达式解析，优先级从低到高：
//! `+ -` → `* /` → 前缀 `- +` → `^`（右结合）→ 后缀 `! !!` → 原子
//!
//! 语句序列由 `;` 分隔，每条语句是一个表达式或 `name = 表达式`。

mod atom;
mod binary;
mod calls;
mod statement;
mod unary;

use crate::ast::{Expr, Span, Stmt};
use crate::error::{ParseError, SyntaxError};
use crate::lexer::{self, Token};
use chumsky::prelude::*;
use chumsky::Stream;

pub type ParserError = Simple<Token>;

/// 解析表达式 (组合子)
pub fn expr_parser() -> impl Parser<Token, Expr, Error = ParserError> + Clone {
    recursive(|expr| {
        let atom = atom::parser(expr).boxed();
        let unary = unary::parser(atom).boxed();
        binary::parser(unary).boxed()
    })
}

/// 主入口：词法 + 语法分析 + 函数调用检查
pub fn parse(source: &str) -> Result<Expr, SyntaxError> {
    let expr = run(expr_parser(), source)?;
    calls::check(&expr)?;
    Ok(expr)
}

/// 解析以 `;` 分隔的语句序列，至少包含一条语句
pub fn parse_program(source: &str) -> Result<Vec<Stmt>, SyntaxError> {
    let raw = run(statement::parser(expr_parser()), source)?;
    let program = statement::lower(raw)?;
    for stmt in &program {
        calls::check(stmt.value())?;
    }
    Ok(program)
}

fn run<T>(
    parser: impl Parser<Token, T, Error = ParserError>,
    source: &str,
) -> Result<T, SyntaxError> {
    let tokens = lexer::tokenize(source)?;
    let balanced = parens_balanced(&tokens);
    let len = source.len();
    let eoi = len..len + 1;

    let output = parser
        .then_ignore(end())
        .parse(Stream::from_iter(eoi.clone(), tokens.into_iter()))
        .map_err(|errors| {
            errors
                .into_iter()
                .next()
                .map(|err| ParseError::from_simple(err, balanced))
                .unwrap_or(ParseError::UnexpectedEnd {
                    expected: Vec::new(),
                    span: eoi,
                })
        })?;
    Ok(output)
}

/// 括号是否配对：任何前缀中 `)` 都不多于 `(`，且总数相等
fn parens_balanced(tokens: &[(Token, Span)]) -> bool {
    let mut depth = 0usize;
    for (token, _) in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => match depth.checked_sub(1) {
                Some(rest) => depth = rest,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
