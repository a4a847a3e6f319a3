use crate::ast::*;
use crate::lexer::Token;
use chumsky::prelude::*;

use super::ParserError;

fn fold_binary(lhs: Expr, (op, rhs): (BinaryOp, Expr)) -> Expr {
    let span = lhs.span.start..rhs.span.end;
    Expr::new(ExprKind::Binary(Box::new(lhs), op, Box::new(rhs)), span)
}

pub fn parser<'a>(
    unary: impl Parser<Token, Expr, Error = ParserError> + Clone + 'a,
) -> impl Parser<Token, Expr, Error = ParserError> + Clone + 'a {
    // Product: *, /
    let product = unary
        .clone()
        .then(
            just(Token::Star)
                .to(BinaryOp::Mul)
                .or(just(Token::Slash).to(BinaryOp::Div))
                .then(unary)
                .repeated(),
        )
        .foldl(fold_binary)
        .boxed();

    // Sum: +, -
    product
        .clone()
        .then(
            just(Token::Plus)
                .to(BinaryOp::Add)
                .or(just(Token::Minus).to(BinaryOp::Sub))
                .then(product)
                .repeated(),
        )
        .foldl(fold_binary)
        .boxed()
}
