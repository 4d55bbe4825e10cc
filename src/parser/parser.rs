use crate::ast::{
    Expression, ExpressionStatement, Identifier, InfixExpression, InfixOperator, IntegerLiteral,
    LetStatement, PrefixExpression, PrefixOperator, Program, ReturnStatement, Statement,
};
use crate::error::{AtToken, ParseError, ParseErrorKind, ParseErrors};
use crate::lexer::token::{Token, TokenKind};
use crate::lexer::Lexer;
use crate::parser::precedence::{Precedence, RuleTable};
use crate::span::Span;
use std::io::BufRead;
use tracing::{debug, trace};

/// 解析器入口：从任意 `BufRead` 读取源码，返回 AST 和累积的错误。
///
/// 即使错误集非空，Program 也可能包含成功解析的那部分语句。
pub fn parse_source<R: BufRead>(reader: R) -> (Program, ParseErrors) {
    Parser::new(Lexer::new(reader)).parse()
}

/// 前缀规则：当前 token 开启一个表达式（没有左操作数）。
type PrefixRule<R> = fn(&mut Parser<R>) -> Result<Expression, ParseError>;
/// 中缀规则：当前 token 是运算符，拿已经解析好的左操作数拼出更大的表达式。
type InfixRule<R> = fn(&mut Parser<R>, Expression) -> Result<Expression, ParseError>;

/// Pratt 解析器。
///
/// 小白理解版：
/// - `current` / `peek` 是一个两格的窗口，`advance()` 让窗口整体右移一格。
/// - 语句用递归下降（看 `current` 是 let / return / 其它）。
/// - 表达式用优先级爬升：每层递归带一个“最低优先级”门槛，
///   只有比门槛高的运算符才会被吸收到左操作数里。
/// - 出错不会中断整个解析：错误记下来，跳过当前语句继续。
pub struct Parser<R> {
    lexer: Lexer<R>,
    current: Token,
    peek: Token,
    /// Lexer 已经给出 EndOfInput（或读取失败），之后不再向它要 token
    exhausted: bool,
    errors: Vec<ParseError>,
    prefix_rules: RuleTable<PrefixRule<R>>,
    infix_rules: RuleTable<InfixRule<R>>,
    precedences: RuleTable<Precedence>,
}

impl<R: BufRead> Parser<R> {
    pub fn new(lexer: Lexer<R>) -> Self {
        let mut parser = Self {
            lexer,
            current: Token::end_of_input(Span::default()),
            peek: Token::end_of_input(Span::default()),
            exhausted: false,
            errors: Vec::new(),
            prefix_rules: RuleTable::new(),
            infix_rules: RuleTable::new(),
            precedences: RuleTable::new(),
        };

        parser
            .prefix_rules
            .register(TokenKind::Identifier, Self::parse_identifier);
        parser
            .prefix_rules
            .register(TokenKind::IntegerLiteral, Self::parse_integer_literal);
        parser.prefix_rules.register(TokenKind::Bang, Self::parse_prefix);
        parser.prefix_rules.register(TokenKind::Minus, Self::parse_prefix);

        for (kind, precedence) in [
            (TokenKind::Equal, Precedence::Equals),
            (TokenKind::NotEqual, Precedence::Equals),
            (TokenKind::LessThan, Precedence::LessGreater),
            (TokenKind::GreaterThan, Precedence::LessGreater),
            (TokenKind::Plus, Precedence::Sum),
            (TokenKind::Minus, Precedence::Sum),
            (TokenKind::Asterisk, Precedence::Product),
            (TokenKind::Slash, Precedence::Product),
        ] {
            // 所有二元运算符共用同一个中缀规则，区别只在优先级
            parser.infix_rules.register(kind, Self::parse_infix);
            parser.precedences.register(kind, precedence);
        }

        parser
    }

    /// 解析整个程序。
    ///
    /// 每轮循环无论成功与否都会 `advance()` 一次，所以任何输入都能走到 EndOfInput。
    pub fn parse(mut self) -> (Program, ParseErrors) {
        // 读两次：填满 current 和 peek
        self.advance();
        self.advance();

        let mut program = Program::default();
        while !self.current.is(TokenKind::EndOfInput) {
            match self.parse_statement() {
                Ok(stmt) => program.statements.push(stmt),
                Err(err) => {
                    let err = err.at(&self.current);
                    self.record(err);
                }
            }
            self.advance();
        }

        debug!(
            statements = program.statements.len(),
            errors = self.errors.len(),
            "parse finished"
        );
        (program, ParseErrors::new(self.errors))
    }

    /// 按 `current` 分发语句：
    /// - `let` -> parse_let_statement
    /// - `return` -> parse_return_statement
    /// - 其它 -> 表达式语句
    fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current.kind {
            TokenKind::Let => self.parse_let_statement().map(Statement::Let),
            TokenKind::Return => self.parse_return_statement().map(Statement::Return),
            _ => self
                .parse_expression_statement()
                .map(Statement::Expression),
        }
    }

    /// `let <ident> = <expr> [;]`
    fn parse_let_statement(&mut self) -> Result<LetStatement, ParseError> {
        let token = self.current.clone();

        self.expect_peek(TokenKind::Identifier)?;
        let name = Identifier::from_token(self.current.clone());

        self.expect_peek(TokenKind::Assign)?;
        // 现在 current 是 `=`，再走一步到表达式开头
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(LetStatement { token, name, value })
    }

    /// `return <expr> [;]`
    fn parse_return_statement(&mut self) -> Result<ReturnStatement, ParseError> {
        let token = self.current.clone();
        self.advance();

        let value = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(ReturnStatement { token, value })
    }

    fn parse_expression_statement(&mut self) -> Result<ExpressionStatement, ParseError> {
        let token = self.current.clone();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.skip_semicolon();

        Ok(ExpressionStatement { token, expression })
    }

    /// 解析表达式（Pratt Parser / 优先级爬升）。
    ///
    /// `min` 是当前层的门槛：只有 `peek` 的优先级严格大于 `min` 才会继续吸收。
    /// - `a + b * c`：解析 `+` 的右操作数时门槛是 Sum，`*` 是 Product，比门槛高，
    ///   所以 `b * c` 先结合。
    /// - `a + b + c`：解析第一个 `+` 的右操作数时门槛是 Sum，第二个 `+` 不比它高，
    ///   递归返回，由外层把 `(a + b)` 作为左操作数继续，得到左结合。
    ///
    /// `peek` 没有中缀规则时直接返回 `left`，表达式到此结束，不算错误。
    fn parse_expression(&mut self, min: Precedence) -> Result<Expression, ParseError> {
        let kind = self.current.kind;
        let prefix = self
            .prefix_rules
            .get(kind)
            .ok_or_else(|| ParseErrorKind::NoPrefixRule(kind).at(&self.current))?;

        let mut left = prefix(self)?;

        while !self.peek.is(TokenKind::Semicolon) && min < self.peek_precedence() {
            let Some(infix) = self.infix_rules.get(self.peek.kind) else {
                return Ok(left);
            };
            self.advance();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    /// 前缀规则：标识符。不前进。
    fn parse_identifier(&mut self) -> Result<Expression, ParseError> {
        Ok(Expression::Identifier(Identifier::from_token(
            self.current.clone(),
        )))
    }

    /// 前缀规则：整数字面量，按十进制解析为 i64。不前进。
    fn parse_integer_literal(&mut self) -> Result<Expression, ParseError> {
        let value = self.current.literal.parse::<i64>().map_err(|source| {
            ParseErrorKind::InvalidInteger {
                literal: self.current.literal.clone(),
                source,
            }
            .at(&self.current)
        })?;

        Ok(Expression::Integer(IntegerLiteral {
            token: self.current.clone(),
            value,
        }))
    }

    /// 前缀规则：`!expr` / `-expr`，操作数按 Prefix 优先级解析。
    fn parse_prefix(&mut self) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let operator = PrefixOperator::from_token_kind(token.kind)
            .ok_or_else(|| ParseErrorKind::NotAnOperator(token.kind).at(&token))?;

        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix(PrefixExpression {
            token,
            operator,
            right: Box::new(right),
        }))
    }

    /// 中缀规则：进入时 `current` 是运算符，右操作数用运算符自己的优先级做门槛。
    fn parse_infix(&mut self, left: Expression) -> Result<Expression, ParseError> {
        let token = self.current.clone();
        let operator = InfixOperator::from_token_kind(token.kind)
            .ok_or_else(|| ParseErrorKind::NotAnOperator(token.kind).at(&token))?;
        let precedence = self.current_precedence();

        self.advance();
        let right = self.parse_expression(precedence)?;

        Ok(Expression::Infix(InfixExpression {
            token,
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }))
    }

    /// 期望 `peek` 是某个种类：是就前进一格，否则报错（错误挂在 `peek` 上）。
    fn expect_peek(&mut self, expected: TokenKind) -> Result<(), ParseError> {
        if !self.peek.is(expected) {
            return Err(ParseErrorKind::UnexpectedToken {
                expected,
                found: self.peek.kind,
            }
            .at(&self.peek));
        }
        self.advance();
        Ok(())
    }

    /// 分号是可选的语句结束符。
    fn skip_semicolon(&mut self) {
        if self.peek.is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    fn current_precedence(&self) -> Precedence {
        self.precedences.get(self.current.kind).unwrap_or_default()
    }

    fn peek_precedence(&self) -> Precedence {
        self.precedences.get(self.peek.kind).unwrap_or_default()
    }

    /// 窗口右移一格：`current <- peek`，`peek <- 下一个 token`。
    fn advance(&mut self) {
        let next = self.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
        trace!(current = %self.current, peek = %self.peek, "advance");
    }

    /// 向 Lexer 要下一个 token。
    ///
    /// 读取失败时把错误记到旧的 `peek` 上，并把它当作输入结束，
    /// 之后不再访问 Lexer。
    fn next_token(&mut self) -> Token {
        if self.exhausted {
            return self.peek.clone();
        }

        match self.lexer.next_token() {
            Ok(token) => {
                self.exhausted = token.is(TokenKind::EndOfInput);
                token
            }
            Err(err) => {
                let span = err.span;
                let err = ParseErrorKind::from(err).at(&self.peek);
                self.record(err);
                self.exhausted = true;
                Token::end_of_input(span)
            }
        }
    }

    fn record(&mut self, err: ParseError) {
        debug!(error = %err, "parse error");
        self.errors.push(err);
    }
}
