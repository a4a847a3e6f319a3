//! Symcalc Engine
//!
//! 数值-符号混合计算：
//! - [`ScalarValue`]：数值或者无法继续化简的符号表达式
//! - [`ComplexValue`]：由两个 `ScalarValue` 组成的复数
//! - [`Calculator`]：持有变量绑定，解析并求值表达式
//!
//! ```
//! use symcalc_engine::{Calculator, ScalarValue};
//!
//! let mut calc = Calculator::new();
//! calc.set("a", 0.5);
//! assert_eq!(calc.parse_get("2 * a + 1").unwrap(), 2.0);
//! assert_eq!(calc.parse("a + b").unwrap(), ScalarValue::from("(5e-1 + b)"));
//! ```
//!
//! 库本身不安装任何 `tracing` subscriber。

pub mod calculator;
pub mod complex;
pub mod environment;
pub mod error;
pub mod eval;
pub mod format;
pub mod functions;
pub mod scalar;

pub use calculator::Calculator;
pub use complex::ComplexValue;
pub use environment::Environment;
pub use error::{CalcError, CalcResult};
pub use eval::Evaluator;
pub use format::canonical;
pub use scalar::{ScalarValue, ISCLOSE_TOLERANCE};
pub use symcalc_syntax::{Builtin, SyntaxError};
