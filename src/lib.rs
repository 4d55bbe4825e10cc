pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

// 对外公开的核心类型/函数（给下游求值器、REPL、测试使用）。
pub use ast::{
    Expression, ExpressionStatement, Identifier, InfixExpression, InfixOperator, IntegerLiteral,
    LetStatement, PrefixExpression, PrefixOperator, Program, ReturnStatement, Statement,
};
pub use error::{AtToken, LexError, ParseError, ParseErrorKind, ParseErrors, SourceError};
pub use lexer::{lex, Lexer, RunePeeker, Token, TokenKind};
pub use parser::{parse_source, Parser, Precedence};
pub use span::Span;

/// 解析一段源码字符串。
///
/// 只要有任何错误就返回 `Err`；需要部分 AST 的调用方请用 [`parse_source`]。
pub fn parse_program(src: &str) -> Result<Program, ParseErrors> {
    let (program, errors) = parse_source(src.as_bytes());
    errors.into_result()?;
    Ok(program)
}
