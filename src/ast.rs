use crate::lexer::token::{Token, TokenKind};
use std::fmt;

/// 整个程序（Program）的 AST 根节点：按解析顺序排列的语句。
///
/// 语句顺序就是下游求值器的执行顺序。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    /// 所有语句起始 token 的 literal，用空格连接。
    pub fn token_literal(&self) -> String {
        self.statements
            .iter()
            .map(Statement::token_literal)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

/// 语句（Statement）枚举。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// 变量绑定：`let x = 5;`
    Let(LetStatement),
    /// 返回：`return x;`
    Return(ReturnStatement),
    /// 表达式语句：`a + b;`
    Expression(ExpressionStatement),
}

impl Statement {
    /// 引入该语句的 token（仅用于报错定位）。
    pub fn token(&self) -> &Token {
        match self {
            Statement::Let(s) => &s.token,
            Statement::Return(s) => &s.token,
            Statement::Expression(s) => &s.token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }
}

/// `let <name> = <value>;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LetStatement {
    /// `let` 关键字
    pub token: Token,
    pub name: Identifier,
    pub value: Expression,
}

/// `return <value>;`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReturnStatement {
    /// `return` 关键字
    pub token: Token,
    pub value: Expression,
}

/// 把一个裸表达式当作语句使用。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionStatement {
    /// 表达式的第一个 token
    pub token: Token,
    pub expression: Expression,
}

/// 表达式（Expression）枚举。
///
/// 每个节点独占自己的子节点（Box），没有共享也没有环。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
}

impl Expression {
    pub fn token(&self) -> &Token {
        match self {
            Expression::Identifier(e) => &e.token,
            Expression::Integer(e) => &e.token,
            Expression::Prefix(e) => &e.token,
            Expression::Infix(e) => &e.token,
        }
    }

    pub fn token_literal(&self) -> &str {
        &self.token().literal
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
    pub name: String,
}

impl Identifier {
    /// 直接用 token 的 literal 作为名字。
    pub fn from_token(token: Token) -> Self {
        let name = token.literal.clone();
        Self { token, name }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub token: Token,
    pub value: i64,
}

/// 前缀表达式：`!x`、`-x`。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrefixExpression {
    /// 运算符 token
    pub token: Token,
    pub operator: PrefixOperator,
    pub right: Box<Expression>,
}

/// 二元表达式：`left op right`。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfixExpression {
    /// 运算符 token
    pub token: Token,
    pub operator: InfixOperator,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
}

/// 前缀运算符。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    /// `!` 逻辑非
    Not,
    /// `-` 取负
    Negate,
}

impl PrefixOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(PrefixOperator::Not),
            TokenKind::Minus => Some(PrefixOperator::Negate),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PrefixOperator::Not => "!",
            PrefixOperator::Negate => "-",
        }
    }
}

/// 二元运算符。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfixOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    GreaterThan,
    LessThan,
    Equal,
    NotEqual,
}

impl InfixOperator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(InfixOperator::Add),
            TokenKind::Minus => Some(InfixOperator::Subtract),
            TokenKind::Asterisk => Some(InfixOperator::Multiply),
            TokenKind::Slash => Some(InfixOperator::Divide),
            TokenKind::GreaterThan => Some(InfixOperator::GreaterThan),
            TokenKind::LessThan => Some(InfixOperator::LessThan),
            TokenKind::Equal => Some(InfixOperator::Equal),
            TokenKind::NotEqual => Some(InfixOperator::NotEqual),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            InfixOperator::Add => "+",
            InfixOperator::Subtract => "-",
            InfixOperator::Multiply => "*",
            InfixOperator::Divide => "/",
            InfixOperator::GreaterThan => ">",
            InfixOperator::LessThan => "<",
            InfixOperator::Equal => "==",
            InfixOperator::NotEqual => "!=",
        }
    }
}

// ---------- Display：把 AST 还原成带完整括号的源码形式 ----------

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            write!(f, "{stmt}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let(s) => write!(f, "{} {} = {};", s.token.literal, s.name, s.value),
            Statement::Return(s) => write!(f, "{} {};", s.token.literal, s.value),
            Statement::Expression(s) => write!(f, "{}", s.expression),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(e) => write!(f, "{e}"),
            Expression::Integer(e) => write!(f, "{}", e.value),
            Expression::Prefix(e) => write!(f, "({}{})", e.operator, e.right),
            Expression::Infix(e) => write!(f, "({} {} {})", e.left, e.operator, e.right),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for PrefixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for InfixOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
