use crate::error::SourceError;
use std::io::{self, BufRead};

/// 在只能向前读的字节流上提供“一个字符”的前瞻。
///
/// - `peek()`：查看下一个字符但不消费，可以重复调用。
/// - `consume()`：取出下一个字符并前进；如果之前 peek 过，就返回 peek 到的那个。
///
/// 内部只有一个槽位 `pending`，consume 时清空。
/// 字节按 UTF-8 解码，非法或截断的序列解码成 U+FFFD，交给 Lexer 当成非法字符处理。
pub struct RunePeeker<R> {
    reader: R,
    pending: Option<char>,
}

impl<R: BufRead> RunePeeker<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: None,
        }
    }

    pub fn peek(&mut self) -> Result<char, SourceError> {
        if let Some(ch) = self.pending {
            return Ok(ch);
        }
        let ch = self.read_char()?;
        self.pending = Some(ch);
        Ok(ch)
    }

    pub fn consume(&mut self) -> Result<char, SourceError> {
        match self.pending.take() {
            Some(ch) => Ok(ch),
            None => self.read_char(),
        }
    }

    /// 从底层读一个完整字符。
    fn read_char(&mut self) -> Result<char, SourceError> {
        let lead = self.read_byte()?.ok_or(SourceError::EndOfInput)?;
        let width = utf8_width(lead);
        if width == 1 {
            return Ok(char::from(lead));
        }
        if width == 0 {
            return Ok(char::REPLACEMENT_CHARACTER);
        }

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.peek_byte()? {
                // 续字节必须是 10xxxxxx，否则把它留给下一次读取
                Some(b) if b & 0xC0 == 0x80 => {
                    *slot = b;
                    self.reader.consume(1);
                }
                _ => return Ok(char::REPLACEMENT_CHARACTER),
            }
        }

        Ok(std::str::from_utf8(&buf[..width])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let b = self.peek_byte()?;
        if b.is_some() {
            self.reader.consume(1);
        }
        Ok(b)
    }

    fn peek_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// 根据 UTF-8 首字节判断字符占几个字节；0 表示首字节非法。
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}
