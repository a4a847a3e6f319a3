//! Span - 源码位置信息
//!
//! 表达式中的字节偏移范围

/// 源码位置范围 (字节偏移)
pub type Span = std::ops::Range<usize>;

/// Span 辅助函数
pub trait SpanExt {
    /// 单个字节位置
    fn point(offset: usize) -> Self;

    /// 把 Span 限制在长度为 `len` 的源码之内（end-of-input span 会越界一个字节）
    fn clamp_to(&self, len: usize) -> Self;
}

impl SpanExt for Span {
    fn point(offset: usize) -> Self {
        offset..offset + 1
    }

    fn clamp_to(&self, len: usize) -> Self {
        let start = self.start.min(len);
        start..self.end.clamp(start, len)
    }
}
