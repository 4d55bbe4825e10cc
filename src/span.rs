use std::fmt;

/// 源码中的一个“区间位置”。
///
/// - `start/end`：byte offset（按 UTF-8 字节计数，左闭右开）。
/// - `*_line/*_col`：行列号（从 1 开始，列按字符计数），用于报错定位。
///
/// Span 只服务于诊断信息，不参与任何语义。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    /// 起始 byte offset（包含）
    pub start: usize,
    /// 结束 byte offset（不包含）
    pub end: usize,
    /// 起始行号（从 1 开始）
    pub start_line: usize,
    /// 起始列号（从 1 开始）
    pub start_col: usize,
    /// 结束行号（从 1 开始）
    pub end_line: usize,
    /// 结束列号（从 1 开始）
    pub end_col: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self {
            start: 0,
            end: 0,
            start_line: 1,
            start_col: 1,
            end_line: 1,
            end_col: 1,
        }
    }
}

impl Span {
    /// 同时设置 byte offset 与行列信息。
    pub fn new_with_line_col(
        start: usize,
        end: usize,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Self {
        Self {
            start,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}
