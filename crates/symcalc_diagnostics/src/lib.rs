//! Symcalc Diagnostics
//!
//! 统一的诊断系统，为表达式解析与求值提供清晰的错误报告。
//! 求值在第一个错误处停止，所以每条诊断都是 error。
//!
//! # 核心类型
//!
//! - [`Diagnostic`] - 诊断信息主体
//! - [`Emitter`] - 诊断渲染器
//! - [`Span`] - 源码位置信息
//!
//! # 示例
//!
//! ```rust
//! use symcalc_diagnostics::{Diagnostic, Emitter};
//!
//! let diag = Diagnostic::error("unexpected character '$'")
//!     .span(4..5)
//!     .label("not part of the expression grammar")
//!     .with_help("remove the character");
//!
//! let text = Emitter::without_colors().render(&diag);
//! assert!(text.starts_with("error: unexpected character '$'"));
//! ```

pub mod diagnostic;
pub mod emitter;
pub mod span;

// 重新导出核心类型
pub use diagnostic::Diagnostic;
pub use emitter::Emitter;
pub use span::{Span, SpanExt};
