pub mod parser;
pub mod precedence;

pub use parser::{parse_source, Parser};
pub use precedence::Precedence;
