//! Lexer
//!
//! 基于 logos 的词法分析：数字、标识符、运算符、括号、逗号，
//! 以及语句用到的 `=` 和 `;`

use crate::error::LexError;
use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Logos, Debug, PartialEq, Eq, Hash, Clone)] // chumsky 的 Simple<Token> 需要 Eq + Hash
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // --- 运算符 ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    #[token("**")]
    Caret,
    #[token("!")]
    Bang,
    #[token("!!")]
    DoubleBang,
    #[token("=")]
    Assign,

    // --- 分隔符 ---
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),

    // 为了 Hash 实现，数字保留原始词素，AST 阶段再转 f64
    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::Bang => write!(f, "!"),
            Token::DoubleBang => write!(f, "!!"),
            Token::Assign => write!(f, "="),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Number(lexeme) => write!(f, "{}", lexeme),
            Token::Comment => write!(f, "#"),
        }
    }
}

/// 惰性的 token 序列
///
/// 克隆得到的迭代器从当前位置独立继续，[`tokens`] 重新调用即可从头开始。
#[derive(Clone)]
pub struct TokenIter<'src> {
    source: &'src str,
    inner: logos::Lexer<'src, Token>,
}

/// 对 `source` 开始一次词法分析
pub fn tokens(source: &str) -> TokenIter<'_> {
    TokenIter {
        source,
        inner: Token::lexer(source),
    }
}

impl Iterator for TokenIter<'_> {
    type Item = Result<(Token, Range<usize>), LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let span = self.inner.span();
        Some(match result {
            Ok(token) => Ok((token, span)),
            Err(()) => {
                let ch = self.source[span.start..].chars().next().unwrap_or('\u{FFFD}');
                Err(LexError {
                    ch,
                    offset: span.start,
                })
            }
        })
    }
}

/// 一次性收集全部 token，遇到第一个非法字符即失败
pub fn tokenize(source: &str) -> Result<Vec<(Token, Range<usize>)>, LexError> {
    tokens(source).collect()
}

/// 若 `text` 恰好是一个（可带负号的）数字字面量，返回其值
///
/// `"1e0"`、`" -2.5 "` 可以；`"x"`、`"1 + 1"`、`"inf"` 不行。
pub fn numeric_literal(text: &str) -> Option<f64> {
    let mut lexer = tokens(text);
    let (negative, lexeme) = match lexer.next()? {
        Ok((Token::Minus, _)) => match lexer.next()? {
            Ok((Token::Number(lexeme), _)) => (true, lexeme),
            _ => return None,
        },
        Ok((Token::Number(lexeme), _)) => (false, lexeme),
        _ => return None,
    };
    if lexer.next().is_some() {
        return None;
    }
    let value: f64 = lexeme.parse().ok()?;
    Some(if negative { -value } else { value })
}
