use crate::span::Span;
use std::fmt;

/// 一个 Token = 词法分析后的最小“语法积木”。
///
/// 例子：`let x = 5;`
/// 会被切成：Let("let"), Identifier("x"), Assign("="), IntegerLiteral("5"), Semicolon(";")
///
/// Token 创建后不再修改，Parser 只会 clone 它。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Token 的类别
    pub kind: TokenKind,
    /// 原始文本（EndOfInput 为空串）
    pub literal: String,
    /// Token 在源代码中的位置（仅用于报错）
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// 输入结束标记：literal 为空。
    pub fn end_of_input(span: Span) -> Self {
        Self::new(TokenKind::EndOfInput, String::new(), span)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?} at {}", self.kind, self.literal, self.span)
    }
}

/// Token 的种类枚举（封闭集合）。
///
/// 判别值从 0 连续递增，`index()` 直接把它当作数组下标使用，
/// Parser 的规则表就是按这个下标建的定长数组。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    Illegal,
    EndOfInput,

    // ---------- 语义性 Token ----------
    Identifier,
    IntegerLiteral,

    // ---------- 运算符 ----------
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Equal,
    NotEqual,
    LessThan,
    GreaterThan,

    // ---------- 分隔符 ----------
    Comma,
    Semicolon,

    LParen,
    RParen,
    LBrace,
    RBrace,

    // ---------- 关键字 ----------
    Function,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// 种类总数，也就是规则表的长度。
    pub const COUNT: usize = Self::ALL.len();

    /// 按判别值顺序列出全部种类。
    pub const ALL: [TokenKind; 27] = [
        TokenKind::Illegal,
        TokenKind::EndOfInput,
        TokenKind::Identifier,
        TokenKind::IntegerLiteral,
        TokenKind::Assign,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Bang,
        TokenKind::Asterisk,
        TokenKind::Slash,
        TokenKind::Equal,
        TokenKind::NotEqual,
        TokenKind::LessThan,
        TokenKind::GreaterThan,
        TokenKind::Comma,
        TokenKind::Semicolon,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::LBrace,
        TokenKind::RBrace,
        TokenKind::Function,
        TokenKind::Let,
        TokenKind::True,
        TokenKind::False,
        TokenKind::If,
        TokenKind::Else,
        TokenKind::Return,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// 关键字表：只有在扫描出的单词不是保留符号时才会查询。
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "let" => Some(TokenKind::Let),
            "fn" => Some(TokenKind::Function),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// 规范显示串：符号类直接用符号本身，其余用大写标签。
    pub const fn as_str(self) -> &'static str {
        match self {
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::EndOfInput => "EOF",
            TokenKind::Identifier => "IDENT",
            TokenKind::IntegerLiteral => "INT",
            TokenKind::Assign => "ASSIGN",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Function => "FUNCTION",
            TokenKind::Let => "LET",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::Return => "RETURN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
