//! Symcalc Syntax
//!
//! 表达式前端：词法分析、语法树、解析器与函数表。
//! [`parse`] 读单个表达式，[`parse_program`] 读 `;` 分隔的语句序列。

pub mod ast;
pub mod builtin;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{BinaryOp, Expr, ExprKind, Span, Stmt, StmtKind, UnaryOp};
pub use builtin::Builtin;
pub use error::{LexError, ParseError, SyntaxError};
pub use parser::{parse, parse_program};
