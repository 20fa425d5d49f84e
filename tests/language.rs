use std::fs::{self};

use varexpr::{
    Domain, EqualityMode, Expression, Options, Scalar,
    error::{BuildError, EvalError, EvalFault, SyntaxError},
    evaluate,
    input::Script,
};
use walkdir::WalkDir;

#[test]
fn script_fixtures_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "txt"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = extract_expected(&content).unwrap_or_else(|| {
                                                     panic!("No RESULT line in {path:?}")
                                                 });
        let script =
            Script::parse(&content).unwrap_or_else(|e| panic!("Script {path:?} failed: {e}"));

        count += 1;
        let actual = match script.domain {
            Domain::Integer => run_script::<i64>(&script),
            Domain::Real => run_script::<f64>(&script),
        };
        assert_eq!(actual, expected, "Script {path:?} evaluated to the wrong result");
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

/// The text after `RESULT` on the first line that starts with it.
fn extract_expected(content: &str) -> Option<String> {
    content.lines()
           .find_map(|line| line.trim_start().strip_prefix("RESULT"))
           .map(|rest| rest.trim().to_string())
}

fn run_script<T: Scalar>(script: &Script) -> String {
    let values = script.values::<T>().expect("script values match the domain");
    let mut expression = Expression::new();
    match expression.build(&script.expression, script.domain) {
        Ok(()) => match expression.eval(&values) {
            Ok(result) => result.to_string(),
            Err(e) => format!("error {}", e.code()),
        },
        Err(e) => format!("error {}", e.code()),
    }
}

fn assert_int(src: &str, vars: &[i64], expected: i64) {
    match evaluate(src, vars) {
        Ok(result) => assert_eq!(result, expected, "{src}"),
        Err(e) => panic!("Expression {src:?} failed: {e}"),
    }
}

fn assert_real(src: &str, vars: &[f64], expected: f64) {
    match evaluate(src, vars) {
        Ok(result) => assert!((result - expected).abs() <= 1e-12 * expected.abs().max(1.0),
                              "{src}: expected {expected}, got {result}"),
        Err(e) => panic!("Expression {src:?} failed: {e}"),
    }
}

#[allow(clippy::cast_precision_loss)]
fn assert_both(src: &str, expected: i64) {
    assert_int(src, &[], expected);
    assert_real(src, &[], expected as f64);
}

fn build_error(src: &str, domain: Domain) -> BuildError {
    let mut expression = Expression::new();
    match expression.build(src, domain) {
        Ok(()) => panic!("Expression {src:?} built but was expected to fail"),
        Err(e) => e,
    }
}

fn syntax_error(src: &str) -> SyntaxError {
    match build_error(src, Domain::Real) {
        BuildError::Syntax { kind, .. } => kind,
        other => panic!("Expected a syntax error for {src:?}, got {other:?}"),
    }
}

#[test]
fn precedence() {
    assert_both("1+2*3", 7);
    assert_both("(1+2)*3", 9);
    assert_both("2*3^2", 18);
    assert_both("2^3^2", 64);
    assert_both("10-4-3", 3);
    assert_both("1 + 2 > 2", 1);
    assert_both("1 < 2 == 1", 1);
    assert_both("0 || 1 && 0", 0);
    assert_both("1 || 0 && 0", 1);
}

#[test]
fn unary_minus_and_not() {
    assert_both("-3+2", -1);
    assert_both("3-2", 1);
    assert_both("3--2", 5);
    assert_both("-(2+3)", -5);
    assert_both("--4", 4);
    assert_both("!0", 1);
    assert_both("!5", 0);
    assert_both("!0 + 1", 2);
    assert_both("-2^2", 4);
    assert_both("2*-3", -6);
}

#[test]
fn functions() {
    assert_both("sqrt(16)", 4);
    assert_both("log(100)", 2);
    assert_both("ln(1)", 0);
    assert_both("sqrt(3*3+16)", 5);
    assert_both("sqrt(sqrt(16))*2", 4);
    assert_real("ln(2)", &[], std::f64::consts::LN_2);
    assert_int("sqrt(17)", &[], 4);
}

#[test]
fn comparisons_and_logic() {
    assert_both("(1<2)&&(3>2)", 1);
    assert_both("2 >= 2", 1);
    assert_both("2 <= 1", 0);
    assert_both("3 != 3", 0);
    assert_both("3 == 3", 1);
    assert_both("0 == 1", 0);
    assert_real("0.1 + 0.2 == 0.3", &[], 0.0);
}

#[test]
fn legacy_equality_reads_as_or() {
    let options = Options { equality: EqualityMode::LegacyOr,
                            ..Options::default() };
    let mut expression = Expression::with_options(options);
    expression.build("0 == 1", Domain::Real).unwrap();
    assert_eq!(expression.eval::<f64>(&[]), Ok(1.0));
}

#[test]
fn division_by_domain() {
    assert_int("7/2", &[], 3);
    assert_int("-7/2", &[], -3);
    assert_real("7/2", &[], 3.5);
    assert_eq!(evaluate::<f64>("1/0", &[]).unwrap(), f64::INFINITY);
    assert!(evaluate::<f64>("0/0", &[]).unwrap().is_nan());
}

#[test]
fn variables() {
    let mut expression = Expression::new();
    expression.build("${1}+${2}", Domain::Integer).unwrap();
    assert_eq!(expression.eval(&[10i64, 20]), Ok(30));
    assert_eq!(expression.variables(), &[0, 1]);

    let mut short = Expression::new();
    short.build("$1+$2", Domain::Integer).unwrap();
    assert_eq!(short.root(), expression.root());

    assert_real("${10} * $9", &[0., 0., 0., 0., 0., 0., 0., 0., 2., 4.5], 9.0);
    assert_int("$1 * $1", &[-6], 36);
}

#[test]
fn variable_array_must_reach_largest_index() {
    let mut expression = Expression::new();
    expression.build("$1 + ${4}", Domain::Real).unwrap();
    assert_eq!(expression.max_variable(), Some(3));
    assert_eq!(expression.eval(&[1.0, 2.0, 3.0]),
               Err(EvalError::ArrayTooSmall { required: 4,
                                              found:    3, }));
    assert_eq!(expression.eval(&[1.0, 2.0, 3.0, 4.0]), Ok(5.0));
}

#[test]
fn logical_operators_do_not_short_circuit() {
    let mut expression = Expression::new();
    expression.build("0&&${1}", Domain::Integer).unwrap();
    assert!(matches!(expression.eval::<i64>(&[]), Err(EvalError::ArrayTooSmall { .. })));

    let mut expression = Expression::new();
    expression.build("1 || 1/$1", Domain::Integer).unwrap();
    assert_eq!(expression.eval(&[0i64]),
               Err(EvalError::Evaluation(EvalFault::DivisionByZero)));
}

#[test]
fn real_literals() {
    assert_real("1.5e2 + .5", &[], 150.5);
    assert_real("2.", &[], 2.0);
    assert_real("1e-3*1000", &[], 1.0);
    assert_eq!(evaluate::<f64>("-inf", &[]).unwrap(), f64::NEG_INFINITY);
    assert!(evaluate::<f64>("nan + 1", &[]).unwrap().is_nan());
    assert!(evaluate::<i64>("1.5", &[]).is_err());
    assert!(evaluate::<i64>("inf", &[]).is_err());
}

#[test]
fn integer_faults() {
    let fault = |src: &str| match evaluate::<i64>(src, &[]) {
        Ok(result) => panic!("Expression {src:?} evaluated to {result}"),
        Err(e) => e.downcast::<EvalError>()
                   .unwrap_or_else(|e| panic!("Expression {src:?} failed to build: {e}")),
    };
    assert_eq!(*fault("1/0"), EvalError::Evaluation(EvalFault::DivisionByZero));
    assert_eq!(*fault("9223372036854775807+1"), EvalError::Evaluation(EvalFault::Overflow));
    assert_eq!(*fault("2^63"), EvalError::Evaluation(EvalFault::Overflow));
    assert_eq!(*fault("sqrt(-1)"), EvalError::Evaluation(EvalFault::NotRepresentable));
    assert_eq!(*fault("ln(0)"), EvalError::Evaluation(EvalFault::NotRepresentable));
    assert_int("2^-1", &[], 0);
    assert_int("(-1)^-3", &[], -1);
}

#[test]
fn build_errors() {
    assert_eq!(build_error("", Domain::Real), BuildError::InvalidExpression);
    assert_eq!(build_error("   ", Domain::Integer), BuildError::InvalidExpression);
    assert_eq!(syntax_error("(1+2"), SyntaxError::UnclosedParenthesis);
    assert_eq!(syntax_error("sqrt(2"), SyntaxError::UnclosedParenthesis);
    assert_eq!(syntax_error("1+"), SyntaxError::IncompleteExpression);
    assert_eq!(syntax_error("()"), SyntaxError::EmptyParenthesis);
    assert_eq!(syntax_error("1+2)"), SyntaxError::UnbalancedParenthesis);
    assert_eq!(syntax_error("${0}"), SyntaxError::UnrecognisedToken);
    assert_eq!(syntax_error("$0"), SyntaxError::UnrecognisedToken);
    assert_eq!(syntax_error("${99999999999999999999}"), SyntaxError::IndexTooLarge);
    assert_eq!(syntax_error("2 3"), SyntaxError::MissingOperator);
    assert_eq!(syntax_error("2 (3)"), SyntaxError::MissingOperator);
    assert_eq!(syntax_error("* 3"), SyntaxError::MissingValue);
    assert_eq!(syntax_error("1 & 2"), SyntaxError::UnrecognisedToken);
    assert_eq!(syntax_error("1 = 2"), SyntaxError::UnrecognisedToken);
    assert_eq!(syntax_error("sin(1)"), SyntaxError::UnrecognisedToken);
    assert_eq!(syntax_error("sqrt (4)"), SyntaxError::UnrecognisedToken);
    assert_eq!(syntax_error("."), SyntaxError::InvalidNumber);
}

#[test]
fn diagnostics() {
    let mut expression = Expression::new();
    assert!(expression.build("1 + (2 * x)", Domain::Real).is_err());

    let mut out = Vec::new();
    expression.write_error(&mut out, "Error:").unwrap();
    assert_eq!(String::from_utf8(out).unwrap(),
               "Error: unrecognised token.\n1 + (2 * x)\n         ^\n");
    assert_eq!(expression.error().map(BuildError::code), Some(-4));
}

#[test]
fn shared_between_threads() {
    let mut expression = Expression::new();
    expression.build("$1 * $1", Domain::Integer).unwrap();

    std::thread::scope(|scope| {
        for n in 0..4i64 {
            let expression = &expression;
            scope.spawn(move || assert_eq!(expression.eval(&[n]), Ok(n * n)));
        }
    });
}
