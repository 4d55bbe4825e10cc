use crate::error::{LexError, SourceError};
use crate::lexer::peeker::RunePeeker;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;
use std::io::{self, BufRead};
use tracing::trace;

/// 词法分析便捷入口：把一段源码切成 Token 列表，最后一个一定是 `EndOfInput`。
pub fn lex(src: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(src.as_bytes()).collect()
}

/// 按需产出 Token 的词法分析器（pull 模式）。
///
/// 每调用一次 `next_token()` 产出一个 token，不会预先缓冲整个输入，
/// 只有 RunePeeker 里的一个字符前瞻。
///
/// Lexer 不知道任何语句/表达式结构，它是纯正则的：
/// 非法字符产出 `Illegal` token，留给 Parser 统一报错；
/// 只有底层读取失败才返回 `Err`。
pub struct Lexer<R> {
    source: RunePeeker<R>,
    byte_pos: usize,
    line: usize,
    col: usize,
    /// 迭代器模式下是否已经产出过 EndOfInput（或错误）
    done: bool,
}

impl<R: BufRead> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            source: RunePeeker::new(reader),
            byte_pos: 0,
            line: 1,
            col: 1,
            done: false,
        }
    }

    /// 产出下一个 token。
    ///
    /// 输入耗尽时返回 literal 为空的 `EndOfInput`，这是正常值而不是错误，
    /// 之后再调用也会一直返回它。
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace()?;

        let start = self.mark();
        let ch = match self.bump() {
            Ok(ch) => ch,
            Err(SourceError::EndOfInput) => return Ok(Token::end_of_input(self.span_from(start))),
            Err(SourceError::Io(e)) => return Err(self.io_error(start, e)),
        };

        let mut literal = String::from(ch);
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::LessThan,
            '>' => TokenKind::GreaterThan,
            '=' => {
                // 匹配 `==` 或 `=`
                if self.bump_if('=', start)? {
                    literal.push('=');
                    TokenKind::Equal
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                // 匹配 `!=` 或 `!`
                if self.bump_if('=', start)? {
                    literal.push('=');
                    TokenKind::NotEqual
                } else {
                    TokenKind::Bang
                }
            }
            c if is_letter(c) => {
                self.bump_while(&mut literal, is_letter, start)?;
                TokenKind::keyword(&literal).unwrap_or(TokenKind::Identifier)
            }
            c if is_digit(c) => {
                // 只收集数字串，数值转换（含溢出）交给 Parser
                self.bump_while(&mut literal, is_digit, start)?;
                TokenKind::IntegerLiteral
            }
            _ => TokenKind::Illegal,
        };

        let token = Token::new(kind, literal, self.span_from(start));
        trace!(kind = %token.kind, literal = %token.literal, at = %token.span, "token");
        Ok(token)
    }

    /// 跳过空白：` ` `\t` `\n` `\r`。
    fn skip_whitespace(&mut self) -> Result<(), LexError> {
        loop {
            let start = self.mark();
            match self.source.peek() {
                Ok(ch) if is_whitespace(ch) => {
                    self.bump().map_err(|e| self.source_error(start, e))?;
                }
                Ok(_) | Err(SourceError::EndOfInput) => return Ok(()),
                Err(SourceError::Io(e)) => return Err(self.io_error(start, e)),
            }
        }
    }

    /// 下一个字符等于 expected 就消费它并返回 true；否则不动（也不消费）并返回 false。
    fn bump_if(&mut self, expected: char, start: Mark) -> Result<bool, LexError> {
        match self.source.peek() {
            Ok(ch) if ch == expected => {
                self.bump().map_err(|e| self.source_error(start, e))?;
                Ok(true)
            }
            Ok(_) | Err(SourceError::EndOfInput) => Ok(false),
            Err(SourceError::Io(e)) => Err(self.io_error(start, e)),
        }
    }

    /// 最长匹配：只要下一个字符满足 `accept` 就追加到 `out`。
    fn bump_while(
        &mut self,
        out: &mut String,
        accept: fn(char) -> bool,
        start: Mark,
    ) -> Result<(), LexError> {
        loop {
            match self.source.peek() {
                Ok(ch) if accept(ch) => {
                    self.bump().map_err(|e| self.source_error(start, e))?;
                    out.push(ch);
                }
                Ok(_) | Err(SourceError::EndOfInput) => return Ok(()),
                Err(SourceError::Io(e)) => return Err(self.io_error(start, e)),
            }
        }
    }

    /// 消费一个字符，并同步更新 byte offset 与 line/col。
    fn bump(&mut self) -> Result<char, SourceError> {
        let ch = self.source.consume()?;
        self.byte_pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Ok(ch)
    }

    fn mark(&self) -> Mark {
        Mark {
            offset: self.byte_pos,
            line: self.line,
            col: self.col,
        }
    }

    fn span_from(&self, start: Mark) -> Span {
        Span::new_with_line_col(
            start.offset,
            self.byte_pos,
            start.line,
            start.col,
            self.line,
            self.col,
        )
    }

    fn io_error(&self, start: Mark, source: io::Error) -> LexError {
        LexError {
            span: self.span_from(start),
            source,
        }
    }

    /// peek 成功之后的 consume 只会命中缓冲槽，这里只是把类型对齐。
    fn source_error(&self, start: Mark, err: SourceError) -> LexError {
        match err {
            SourceError::Io(e) => self.io_error(start, e),
            SourceError::EndOfInput => self.io_error(
                start,
                io::Error::new(io::ErrorKind::UnexpectedEof, "source ended after peek"),
            ),
        }
    }
}

/// 逐个产出 token，包括第一个 `EndOfInput`；之后返回 `None`。
/// 读取失败时产出一次 `Err`，随后同样结束。
impl<R: BufRead> Iterator for Lexer<R> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_token();
        self.done = match &item {
            Ok(token) => token.is(TokenKind::EndOfInput),
            Err(_) => true,
        };
        Some(item)
    }
}

/// 记录 Lexer 扫描指针的位置（内部使用）。
#[derive(Clone, Copy)]
struct Mark {
    offset: usize,
    line: usize,
    col: usize,
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// 单词只由字母组成（这个文法里没有数字和下划线）。
fn is_letter(ch: char) -> bool {
    ch.is_alphabetic()
}

fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}
