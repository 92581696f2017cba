use arith_compiler::{Fault, evaluate, parse};

fn eval(expression: &str) -> f64 {
    evaluate(expression).unwrap_or_else(|e| panic!("`{expression}` failed: {e}"))
}

fn fault(expression: &str) -> Fault {
    match evaluate(expression) {
        Ok(value) => panic!("`{expression}` evaluated to {value}, expected an error"),
        Err(e) => e.into_fault(),
    }
}

#[test]
fn precedence() {
    assert_eq!(eval("2 + 3 * 4"), 14.0);
    assert_eq!(eval("2 * 3 + 4"), 10.0);
    assert_eq!(eval("20 - 6 / 3"), 18.0);
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(eval("(2 + 3) * 4"), 20.0);
    assert_eq!(eval("2 * (3 + 4) * (5 - 1)"), 56.0);
    assert_eq!(eval("((((1))))"), 1.0);
}

#[test]
fn left_associativity() {
    assert_eq!(eval("10 - 5 - 2"), 3.0);
    assert_eq!(eval("100 / 10 / 5"), 2.0);
    assert_eq!(eval("2 - 3 + 4"), 3.0);
}

#[test]
fn unary_operators() {
    assert_eq!(eval("--3"), 3.0);
    assert_eq!(eval("-3 + 4"), 1.0);
    assert_eq!(eval("+5"), 5.0);
    assert_eq!(eval("- - - 2"), -2.0);
    assert_eq!(eval("-(2 + 3)"), -5.0);
    assert_eq!(eval("4 * -2"), -8.0);
}

#[test]
fn decimal_literals() {
    assert_eq!(eval("(10 - 5) / 2.5"), 2.0);
    assert_eq!(eval(".5 + .25"), 0.75);
    assert_eq!(eval("1 / 4"), 0.25);
}

#[test]
fn floating_point_rounding_is_not_an_error() {
    assert_eq!(eval("0.1 + 0.2"), 0.1 + 0.2);
    assert_eq!(eval("1 / 3"), 1.0 / 3.0);
}

#[test]
fn whitespace_insensitive() {
    assert_eq!(eval("2+3"), eval(" 2 + 3 "));
    assert_eq!(eval("\t(1+2)\n*3 "), 9.0);
}

#[test]
fn integer_expressions_match_reference() {
    let cases: &[(&str, f64)] = &[
        ("1 + 2 * 3 - 4 / 2", 5.0),
        ("(1 + 2) * (3 - 4) / 2", -1.5),
        ("7 - (3 - (2 - 1))", 5.0),
        ("6 / 2 * 3", 9.0),
        ("2 * 2 * 2 * 2 - 1", 15.0),
        ("-(4 - 6) * -(1 + 1)", -4.0),
    ];
    for &(expression, expected) in cases {
        assert_eq!(eval(expression), expected, "{expression}");
    }
}

#[test]
fn division_by_zero() {
    let err = evaluate("5 / 0").unwrap_err();
    assert_eq!(err.to_string(), "Compilation error: Division by zero");
    assert!(matches!(err.fault(), Fault::DivisionByZero(_)));
    assert!(matches!(fault("1 / (2 - 2)"), Fault::DivisionByZero(_)));
    assert!(matches!(fault("1 / -0"), Fault::DivisionByZero(_)));
}

#[test]
fn missing_operand() {
    assert!(matches!(
        fault("2 + "),
        Fault::InvalidSyntax(_) | Fault::UnexpectedToken(_)
    ));
    assert!(matches!(fault(""), Fault::InvalidSyntax(_)));
}

#[test]
fn trailing_unmatched_token() {
    assert!(matches!(fault("2 + 3)"), Fault::UnexpectedToken(_)));
    assert!(matches!(fault("(2 + 3"), Fault::UnexpectedToken(_)));
}

#[test]
fn invalid_character() {
    match fault("2 $ 3") {
        Fault::InvalidCharacter(e) => assert_eq!(e.token, '$'),
        other => panic!("expected an invalid character, got {other:?}"),
    }
    let err = evaluate("2 $ 3").unwrap_err();
    assert_eq!(err.to_string(), "Compilation error: Invalid character: $");
}

#[test]
fn malformed_numeric_literal() {
    match fault("1.2.3 + 1") {
        Fault::NumericConversionFailure(e) => assert_eq!(e.literal, "1.2.3"),
        other => panic!("expected a conversion failure, got {other:?}"),
    }
}

#[test]
fn errors_wrap_inner_message() {
    let err = evaluate("(1").unwrap_err();
    let inner = err.fault().to_string();
    assert_eq!(err.to_string(), format!("Compilation error: {inner}"));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn parse_then_evaluate_matches_evaluate() {
    let ast = parse("3 * (2 + 1)").unwrap();
    assert_eq!(ast.to_string(), "(* 3 (+ 2 1))");
    assert_eq!(ast.evaluate().unwrap(), eval("3 * (2 + 1)"));
}
