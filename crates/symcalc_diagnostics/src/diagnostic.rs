//! Diagnostic - 诊断信息
//!
//! 表示一次解析或求值失败的报告

use crate::span::Span;

/// 诊断信息
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 主要消息
    pub message: String,
    /// 源码位置（可选）
    pub span: Option<Span>,
    /// 指向 span 的标签文字
    pub label: Option<String>,
    /// 补充注释
    pub notes: Vec<String>,
    /// 修复建议
    pub help: Vec<String>,
}

impl Diagnostic {
    /// 创建错误诊断
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            label: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// 设置位置信息
    pub fn span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// 设置 span 标签
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// 添加注释
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// 添加建议
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_creation() {
        let diag = Diagnostic::error("division by zero")
            .span(4..7)
            .label("divisor is zero")
            .with_note("the divisor is the literal 0")
            .with_help("guard the divisor");

        assert_eq!(diag.message, "division by zero");
        assert_eq!(diag.span, Some(4..7));
        assert_eq!(diag.label.as_deref(), Some("divisor is zero"));
        assert_eq!(diag.notes, vec!["the divisor is the literal 0".to_string()]);
        assert_eq!(diag.help.len(), 1);
    }

    #[test]
    fn test_without_span() {
        let diag = Diagnostic::error("division by zero");
        assert!(diag.span.is_none());
        assert!(diag.label.is_none());
    }
}
