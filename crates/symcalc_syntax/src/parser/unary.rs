use crate::ast::*;
use crate::lexer::Token;
use chumsky::prelude::*;

use super::ParserError;

/// 前缀、后缀运算与幂运算
///
/// 幂比前缀负号结合得更紧：`-2^2` 是 `-(2^2)`；指数本身可以带负号：`2^-1`。
/// 后缀阶乘最紧：`2^3!` 是 `2^(3!)`，`-3!` 是 `-(3!)`。
pub fn parser<'a>(
    atom: impl Parser<Token, Expr, Error = ParserError> + Clone + 'a,
) -> impl Parser<Token, Expr, Error = ParserError> + Clone + 'a {
    recursive(|unary| {
        // Postfix: x!, x!!
        let postfix = atom
            .then(
                just(Token::Bang)
                    .to(UnaryOp::Factorial)
                    .or(just(Token::DoubleBang).to(UnaryOp::DoubleFactorial))
                    .map_with_span(|op, span| (op, span))
                    .repeated(),
            )
            .foldl(|operand: Expr, (op, span): (UnaryOp, Span)| {
                let new_span = operand.span.start..span.end;
                Expr::new(ExprKind::Unary(op, Box::new(operand)), new_span)
            });

        // Power: postfix (^ unary)?  右结合
        let power = postfix
            .then(just(Token::Caret).ignore_then(unary).or_not())
            .map(|(base, exponent): (Expr, Option<Expr>)| match exponent {
                Some(exponent) => {
                    let span = base.span.start..exponent.span.end;
                    Expr::new(
                        ExprKind::Binary(Box::new(base), BinaryOp::Pow, Box::new(exponent)),
                        span,
                    )
                }
                None => base,
            });

        // Unary: -x, +x
        just(Token::Minus)
            .to(UnaryOp::Neg)
            .or(just(Token::Plus).to(UnaryOp::Pos))
            .map_with_span(|op, span| (op, span))
            .repeated()
            .then(power)
            .foldr(|(op, span): (UnaryOp, Span), rhs| {
                let new_span = span.start..rhs.span.end;
                Expr::new(ExprKind::Unary(op, Box::new(rhs)), new_span)
            })
    })
}
