pub mod lexer;
pub mod peeker;
pub mod token;

pub use lexer::{lex, Lexer};
pub use peeker::RunePeeker;
pub use token::{Token, TokenKind};
