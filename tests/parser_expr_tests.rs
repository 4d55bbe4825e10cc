use monkey_syntax::{parse_program, Expression, InfixOperator, PrefixOperator, Statement};
use rstest::rstest;

/// 解析只有一条表达式语句的源码，返回该表达式。
fn expr(src: &str) -> Expression {
    let p = parse_program(src).unwrap_or_else(|errs| panic!("unexpected parse errors:\n{errs}"));
    assert_eq!(p.statements.len(), 1);
    match p.statements.into_iter().next().unwrap() {
        Statement::Expression(stmt) => stmt.expression,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn assert_ident(e: &Expression, name: &str) {
    match e {
        Expression::Identifier(id) => assert_eq!(id.name, name),
        other => panic!("expected identifier {name}, got {other:?}"),
    }
}

fn as_infix(e: &Expression) -> (&Expression, InfixOperator, &Expression) {
    match e {
        Expression::Infix(infix) => (&infix.left, infix.operator, &infix.right),
        other => panic!("expected infix expression, got {other:?}"),
    }
}

#[test]
fn prefix_binds_tighter_than_multiply() {
    let e = expr("-a * b;");
    let (left, op, right) = as_infix(&e);
    assert_eq!(op, InfixOperator::Multiply);
    assert_ident(right, "b");

    let Expression::Prefix(prefix) = left else {
        panic!("expected prefix expression, got {left:?}");
    };
    assert_eq!(prefix.operator, PrefixOperator::Negate);
    assert_ident(&prefix.right, "a");
}

#[test]
fn equal_precedence_is_left_associative() {
    let e = expr("a + b + c");
    let (left, op, right) = as_infix(&e);
    assert_eq!(op, InfixOperator::Add);
    assert_ident(right, "c");

    let (ll, lop, lr) = as_infix(left);
    assert_eq!(lop, InfixOperator::Add);
    assert_ident(ll, "a");
    assert_ident(lr, "b");
}

#[test]
fn product_binds_inside_sum() {
    let e = expr("a + b * c");
    let (left, op, right) = as_infix(&e);
    assert_eq!(op, InfixOperator::Add);
    assert_ident(left, "a");

    let (rl, rop, rr) = as_infix(right);
    assert_eq!(rop, InfixOperator::Multiply);
    assert_ident(rl, "b");
    assert_ident(rr, "c");
}

#[test]
fn infix_node_keeps_operator_token() {
    let e = expr("1 != 2");
    let Expression::Infix(infix) = &e else {
        panic!("expected infix expression");
    };
    assert_eq!(infix.token.literal, "!=");
    assert_eq!(infix.operator, InfixOperator::NotEqual);
}

#[rstest]
#[case("!5;", "(!5)")]
#[case("-15;", "(-15)")]
#[case("!-a", "(!(-a))")]
#[case("--a", "(-(-a))")]
#[case("a * b * c", "((a * b) * c)")]
#[case("a * b / c", "((a * b) / c)")]
#[case("a - b - c", "((a - b) - c)")]
#[case("a + b / c", "(a + (b / c))")]
#[case("-a * b", "((-a) * b)")]
#[case("!a == b", "((!a) == b)")]
#[case("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)")]
#[case("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))")]
#[case("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))")]
#[case("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))")]
#[case("a == b == c", "((a == b) == c)")]
#[case("1 - -2", "(1 - (-2))")]
fn operator_precedence(#[case] src: &str, #[case] want: &str) {
    assert_eq!(expr(src).to_string(), want);
}

#[rstest]
#[case("5 + 5;", 5, InfixOperator::Add, 5)]
#[case("5 - 5;", 5, InfixOperator::Subtract, 5)]
#[case("5 * 5;", 5, InfixOperator::Multiply, 5)]
#[case("5 / 5;", 5, InfixOperator::Divide, 5)]
#[case("5 > 5;", 5, InfixOperator::GreaterThan, 5)]
#[case("5 < 5;", 5, InfixOperator::LessThan, 5)]
#[case("5 == 5;", 5, InfixOperator::Equal, 5)]
#[case("5 != 5;", 5, InfixOperator::NotEqual, 5)]
fn infix_operators(
    #[case] src: &str,
    #[case] left: i64,
    #[case] op: InfixOperator,
    #[case] right: i64,
) {
    let e = expr(src);
    let (l, got_op, r) = as_infix(&e);
    assert_eq!(got_op, op);
    assert!(matches!(l, Expression::Integer(lit) if lit.value == left));
    assert!(matches!(r, Expression::Integer(lit) if lit.value == right));
}

#[test]
fn semicolon_ends_expression() {
    let p = parse_program("a + b; * c").unwrap_err();
    // `;` 截断了第一个表达式，第二条语句以 `*` 开头
    assert_eq!(p.len(), 1);
}

#[test]
fn unranked_token_ends_expression() {
    // `(` 不在优先级表里，`a` 单独成为一条语句
    let (program, _errors) = monkey_syntax::parse_source("a (".as_bytes());
    assert_eq!(program.statements[0].to_string(), "a");
}

#[test]
fn rendered_program_snapshot() {
    let p = parse_program("let x = 1 + 2 * 3; return -x / 4 != 0; x < y == !z").unwrap();
    insta::assert_snapshot!(
        p.to_string(),
        @"let x = (1 + (2 * 3));return (((-x) / 4) != 0);((x < y) == (!z))"
    );
}
