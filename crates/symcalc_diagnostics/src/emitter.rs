//! Emitter - 诊断渲染器
//!
//! 负责将诊断信息格式化为文本。调用方决定输出到哪里。

use crate::diagnostic::Diagnostic;
use crate::span::SpanExt;
use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use colored::*;
use std::fmt::Write as _;

/// 诊断渲染器
#[derive(Debug, Clone)]
pub struct Emitter {
    /// 是否使用颜色
    use_colors: bool,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter {
    /// 创建新的渲染器
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// 创建无颜色的渲染器
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// 渲染单个诊断（不含源码片段）
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        if self.use_colors {
            self.render_colored(diagnostic)
        } else {
            self.render_plain(diagnostic)
        }
    }

    /// 渲染诊断，并在源码上标出 span
    ///
    /// 没有 span 的诊断退化为 [`Emitter::render`]。
    pub fn render_with_source(&self, diagnostic: &Diagnostic, source: &str) -> String {
        let Some(span) = &diagnostic.span else {
            return self.render(diagnostic);
        };
        if source.is_empty() {
            return self.render(diagnostic);
        }
        // ariadne 按字符计数，Span 是字节偏移
        let byte_span = span.clamp_to(source.len());
        let start = char_index(source, byte_span.start);
        let end = char_index(source, byte_span.end);
        // 空 span 扩展为一个字符，保证 ariadne 有东西可标
        let span = if start == end {
            let start = start.min(source.chars().count() - 1);
            start..start + 1
        } else {
            start..end
        };

        let mut label = Label::new(span.clone()).with_color(Color::Red);
        if let Some(text) = &diagnostic.label {
            label = label.with_message(text);
        }

        let mut builder = Report::build(ReportKind::Error, (), span.start)
            .with_config(Config::default().with_color(self.use_colors))
            .with_message(&diagnostic.message)
            .with_label(label);
        for note in &diagnostic.notes {
            builder = builder.with_note(note);
        }
        if let Some(help) = diagnostic.help.first() {
            builder = builder.with_help(help);
        }

        let mut buf = Vec::new();
        match builder.finish().write(Source::from(source), &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.render(diagnostic),
        }
    }

    fn render_colored(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}: {}",
            "error".red().bold(),
            diagnostic.message.bold()
        );
        if let Some(span) = &diagnostic.span {
            let _ = writeln!(out, "  {} {:?}", "-->".blue().bold(), span);
        }
        for note in &diagnostic.notes {
            let _ = writeln!(
                out,
                "  {} {}",
                "=".blue().bold(),
                format!("note: {}", note).bright_black()
            );
        }
        for help in &diagnostic.help {
            let _ = writeln!(
                out,
                "  {} {}",
                "=".green().bold(),
                format!("help: {}", help).green()
            );
        }
        out
    }

    fn render_plain(&self, diagnostic: &Diagnostic) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "error: {}", diagnostic.message);
        if let Some(span) = &diagnostic.span {
            let _ = writeln!(out, "  --> {:?}", span);
        }
        for note in &diagnostic.notes {
            let _ = writeln!(out, "  = note: {}", note);
        }
        for help in &diagnostic.help {
            let _ = writeln!(out, "  = help: {}", help);
        }
        out
    }
}

/// 字节偏移对应的字符序号
fn char_index(source: &str, byte_offset: usize) -> usize {
    source
        .char_indices()
        .take_while(|(i, _)| *i < byte_offset)
        .count()
}
