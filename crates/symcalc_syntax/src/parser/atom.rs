use crate::ast::*;
use crate::lexer::Token;
use chumsky::prelude::*;

use super::ParserError;

/// 原子：数字、函数调用、变量、括号
pub fn parser<'a>(
    expr: impl Parser<Token, Expr, Error = ParserError> + Clone + 'a,
) -> impl Parser<Token, Expr, Error = ParserError> + Clone + 'a {
    let number = select! { Token::Number(lexeme) => lexeme }.try_map(
        |lexeme: String, span: Span| match lexeme.parse::<f64>() {
            Ok(value) => Ok(Expr::new(ExprKind::Literal(value), span)),
            Err(_) => Err(Simple::custom(span, lexeme)),
        },
    );

    let ident = select! { Token::Ident(name) => name };

    // 标识符后紧跟括号即为调用；参数列表内的错误不会回退成变量。
    // 函数名与参数个数在解析后统一检查
    let args = expr
        .clone()
        .separated_by(just(Token::Comma))
        .delimited_by(just(Token::LParen), just(Token::RParen));

    let call_or_variable = ident.then(args.or_not()).map_with_span(
        |(name, args): (String, Option<Vec<Expr>>), span| match args {
            Some(args) => Expr::new(ExprKind::Call { name, args }, span),
            None => Expr::new(ExprKind::Variable(name), span),
        },
    );

    let paren = expr
        .delimited_by(just(Token::LParen), just(Token::RParen))
        .map_with_span(|inner: Expr, span| Expr::new(inner.kind, span));

    number.or(call_or_variable).or(paren)
}
