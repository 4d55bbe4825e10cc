use monkey_syntax::{
    parse_program, parse_source, Expression, Parser, Lexer, Program, Statement, TokenKind,
};

fn program(src: &str) -> Program {
    parse_program(src).unwrap_or_else(|errs| panic!("unexpected parse errors:\n{errs}"))
}

fn int(expr: &Expression) -> i64 {
    match expr {
        Expression::Integer(lit) => lit.value,
        other => panic!("expected integer literal, got {other:?}"),
    }
}

fn ident(expr: &Expression) -> &str {
    match expr {
        Expression::Identifier(id) => &id.name,
        other => panic!("expected identifier, got {other:?}"),
    }
}

#[test]
fn parse_single_let() {
    let p = program("let x = 5;");
    assert_eq!(p.statements.len(), 1);

    let Statement::Let(stmt) = &p.statements[0] else {
        panic!("expected let statement, got {:?}", p.statements[0]);
    };
    assert_eq!(stmt.token.kind, TokenKind::Let);
    assert_eq!(stmt.name.name, "x");
    assert_eq!(stmt.name.token.kind, TokenKind::Identifier);
    assert_eq!(int(&stmt.value), 5);
}

#[test]
fn parse_let_statements() {
    let p = program(
        "let x = 5;
let y = 10;
let foobar = 838383;",
    );
    let bound: Vec<(&str, i64)> = p
        .statements
        .iter()
        .map(|s| match s {
            Statement::Let(l) => (l.name.name.as_str(), int(&l.value)),
            other => panic!("expected let statement, got {other:?}"),
        })
        .collect();
    assert_eq!(bound, vec![("x", 5), ("y", 10), ("foobar", 838383)]);
}

#[test]
fn parse_return_statements() {
    let p = program(
        "return 5;
return 10;
return 838383;",
    );
    let values: Vec<i64> = p
        .statements
        .iter()
        .map(|s| match s {
            Statement::Return(r) => {
                assert_eq!(r.token.literal, "return");
                int(&r.value)
            }
            other => panic!("expected return statement, got {other:?}"),
        })
        .collect();
    assert_eq!(values, vec![5, 10, 838383]);
}

#[test]
fn parse_expression_statement() {
    let p = program("foobar;");
    assert_eq!(p.statements.len(), 1);

    let Statement::Expression(stmt) = &p.statements[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(stmt.token.literal, "foobar");
    assert_eq!(ident(&stmt.expression), "foobar");
}

#[test]
fn semicolons_are_optional() {
    let p = program("let a = 1 return a a");
    assert_eq!(p.to_string(), "let a = 1;return a;a");
    assert_eq!(p.statements.len(), 3);
}

#[test]
fn let_initializer_can_be_an_expression() {
    let p = program("let total = -price * count + 1;");
    assert_eq!(p.to_string(), "let total = (((-price) * count) + 1);");
}

#[test]
fn statement_order_is_parse_order() {
    let p = program("a; let b = 2; return c; 4");
    let kinds: Vec<&str> = p.statements.iter().map(|s| s.token_literal()).collect();
    assert_eq!(kinds, vec!["a", "let", "return", "4"]);
    assert_eq!(p.token_literal(), "a let return 4");
}

#[test]
fn empty_input_is_empty_program() {
    let (p, errors) = parse_source("  \n\t ".as_bytes());
    assert!(p.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn nodes_keep_their_tokens() {
    let p = program("let x =\n  -7;");
    let Statement::Let(stmt) = &p.statements[0] else {
        panic!("expected let statement");
    };
    let Expression::Prefix(prefix) = &stmt.value else {
        panic!("expected prefix expression");
    };
    assert_eq!(prefix.token.kind, TokenKind::Minus);
    assert_eq!((prefix.token.span.start_line, prefix.token.span.start_col), (2, 3));
    assert_eq!(prefix.right.token().literal, "7");
}

#[test]
fn integer_literal_is_i64() {
    let p = program("9223372036854775807;");
    let Statement::Expression(stmt) = &p.statements[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(int(&stmt.expression), i64::MAX);
}

#[test]
fn parser_over_explicit_lexer() {
    let (p, errors) = Parser::new(Lexer::new("let y = x != 3;".as_bytes())).parse();
    assert!(errors.is_empty());
    assert_eq!(p.to_string(), "let y = (x != 3);");
}
