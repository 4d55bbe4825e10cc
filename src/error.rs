use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;
use std::fmt;
use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// 字符源（RunePeeker）的读取失败。
///
/// `EndOfInput` 是正常的结束信号；`Io` 才是真正的读取错误。
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("end of input")]
    EndOfInput,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Lexer 唯一的硬错误：底层读取失败。
///
/// 非法字符不会走到这里，它们会变成 `Illegal` token，由 Parser 统一报告。
#[derive(Debug, Error)]
#[error("failed to read source at {span}: {source}")]
pub struct LexError {
    /// 出错时正在扫描的 token 起点
    pub span: Span,
    #[source]
    pub source: io::Error,
}

/// Parser 能识别的错误种类。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected token type {expected} but got {found}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },

    #[error("no prefix parse rule for token {0}")]
    NoPrefixRule(TokenKind),

    #[error("token {0} is not an infix operator")]
    NotAnOperator(TokenKind),

    #[error("invalid integer literal {literal:?}: {source}")]
    InvalidInteger {
        literal: String,
        #[source]
        source: ParseIntError,
    },

    /// Lexer 的 I/O 失败。`io::Error` 不能 clone，这里只保留 kind 和消息。
    #[error("failed to read source: {message}")]
    Io { kind: io::ErrorKind, message: String },
}

impl From<LexError> for ParseErrorKind {
    fn from(err: LexError) -> Self {
        ParseErrorKind::Io {
            kind: err.source.kind(),
            message: err.source.to_string(),
        }
    }
}

/// 一条带位置的解析错误：错误种类 + 发现错误时所在的 token。
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid program at {token}: {kind}")]
pub struct ParseError {
    #[source]
    pub kind: ParseErrorKind,
    pub token: Token,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, token: Token) -> Self {
        Self { kind, token }
    }
}

/// 把错误“挂”到某个 token 上。
///
/// 对已经带位置的 `ParseError` 再挂一次不会嵌套，原样返回。
pub trait AtToken {
    fn at(self, token: &Token) -> ParseError;
}

impl AtToken for ParseErrorKind {
    fn at(self, token: &Token) -> ParseError {
        ParseError::new(self, token.clone())
    }
}

impl AtToken for ParseError {
    fn at(self, _token: &Token) -> ParseError {
        self
    }
}

/// 一次 `parse()` 累积下来的全部错误，按发现顺序排列。
///
/// Display 时每条错误占一行。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseErrors(Vec<ParseError>);

impl ParseErrors {
    pub fn new(errors: Vec<ParseError>) -> Self {
        Self(errors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParseError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ParseError] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.0
    }

    /// 没有错误时返回 `Ok(())`，方便调用方用 `?` 把错误集当成致命错误。
    pub fn into_result(self) -> Result<(), ParseErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

impl IntoIterator for ParseErrors {
    type Item = ParseError;
    type IntoIter = std::vec::IntoIter<ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
