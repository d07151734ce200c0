//! Interpreter behavior tests over the public API.
//!
//! Tests the full pipeline: tokenize → run. Output lines are asserted where
//! the wording is pinned (`stik`, ternary results); state is inspected for
//! variables and shapes.

use std::collections::HashMap;

use scrawl_lang::{
    eval_line, interpret, tokenize, Error, Interpreter, ShapeKind, TokenKind, Value,
};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn run(src: &str) -> scrawl_lang::Outcome {
    interpret(src).unwrap_or_else(|e| panic!("run failed: {e}"))
}

/// Run expecting an error, returning it together with the interpreter so
/// tests can inspect the state left behind by the aborted run.
fn run_err(src: &str) -> (Error, Interpreter) {
    let tokens = tokenize(src).unwrap_or_else(|e| panic!("lex failed: {e}"));
    let mut interp = Interpreter::new();
    match interp.run(&tokens) {
        Ok(out) => panic!("expected error, got output {out:?}"),
        Err(e) => (e, interp),
    }
}

fn var(src: &str, name: &str) -> Value {
    let tokens = tokenize(src).unwrap_or_else(|e| panic!("lex failed: {e}"));
    let mut interp = Interpreter::new();
    interp.run(&tokens).unwrap_or_else(|e| panic!("run failed: {e}"));
    match interp.state().variables.get(name) {
        Some(v) => v.clone(),
        None => panic!("variable `{name}` not bound"),
    }
}

fn num(src: &str) -> f64 {
    match eval_line(src) {
        Ok(Value::Number(n)) => n,
        other => panic!("expected number for `{src}`, got {other:?}"),
    }
}

// ─── Calculator mode ─────────────────────────────────────────────────────────

#[test]
fn precedence() {
    assert_eq!(num("3 + 5 * 2"), 13.0);
}

#[test]
fn grouping() {
    assert_eq!(num("3 + 5 * (2 - 8)"), -27.0);
}

#[test]
fn division_by_zero_by_kind() {
    assert_eq!(eval_line("1 / 0"), Err(Error::DivisionByZero));
    assert_eq!(eval_line("10 / (2 - 2)"), Err(Error::DivisionByZero));
}

// ─── Assignment ──────────────────────────────────────────────────────────────

#[test]
fn assignment_binds_evaluated_expression() {
    assert_eq!(var("a = 5 + 10 * 2", "a"), Value::Number(25.0));
}

#[test]
fn assignment_sees_earlier_bindings() {
    assert_eq!(var("a = 4 b = a * a", "b"), Value::Number(16.0));
}

#[test]
fn reassignment_keeps_latest_value() {
    assert_eq!(var("a = 1 a = 2", "a"), Value::Number(2.0));
}

#[test]
fn assignment_echoes_one_line() {
    let outcome = run("a = 25");
    assert_eq!(outcome.output, vec!["a = 25"]);
}

#[test]
fn assignment_of_undefined_variable_fails() {
    let (err, _) = run_err("a = x + 1");
    assert_eq!(err, Error::UndefinedVariable { name: "x".into() });
}

// ─── Draw commands ───────────────────────────────────────────────────────────

#[test]
fn circle_appends_shape_with_current_color() {
    let outcome = run("circle 40 12 10");
    assert_eq!(outcome.shapes.len(), 1);
    assert_eq!(
        outcome.shapes[0].kind,
        ShapeKind::Circle { center: (40.0, 12.0), radius: 10.0 }
    );
    assert_eq!(outcome.shapes[0].color, "white");
}

#[test]
fn rectangle_and_line_take_four_arguments() {
    let outcome = run("rectangle 5 5 10 6 line 0 0 20 10");
    assert_eq!(
        outcome.shapes[0].kind,
        ShapeKind::Rect { origin: (5.0, 5.0), size: (10.0, 6.0) }
    );
    assert_eq!(
        outcome.shapes[1].kind,
        ShapeKind::Line { from: (0.0, 0.0), to: (20.0, 10.0) }
    );
}

#[test]
fn draw_arguments_resolve_variables() {
    let outcome = run("r = 5 + 5 circle 40 12 r");
    assert_eq!(
        outcome.shapes[0].kind,
        ShapeKind::Circle { center: (40.0, 12.0), radius: 10.0 }
    );
}

#[test]
fn draw_with_too_few_arguments_is_syntax_error() {
    let (err, _) = run_err("circle 40 12");
    assert!(matches!(err, Error::Syntax { .. }));
}

#[test]
fn draw_argument_of_wrong_type_fails() {
    let (err, interp) = run_err(r#"s = 3 > 1 circle 1 2 s"#);
    assert!(matches!(err, Error::Syntax { .. }));
    assert!(interp.state().shapes.is_empty());
}

#[test]
fn shapes_keep_insertion_order() {
    let outcome = run("circle 1 1 1 line 0 0 1 1 rectangle 0 0 2 2");
    let kinds: Vec<_> = outcome
        .shapes
        .iter()
        .map(|s| match s.kind {
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Rect { .. } => "rect",
            ShapeKind::Line { .. } => "line",
        })
        .collect();
    assert_eq!(kinds, vec!["circle", "line", "rect"]);
}

// ─── color / clear ───────────────────────────────────────────────────────────

#[test]
fn color_tags_subsequent_shapes() {
    let outcome = run(r#"circle 1 1 1 color "red" circle 2 2 2"#);
    assert_eq!(outcome.shapes[0].color, "white");
    assert_eq!(outcome.shapes[1].color, "red");
}

#[test]
fn color_with_non_string_argument_is_syntax_error() {
    let (err, interp) = run_err("color 5");
    assert!(matches!(err, Error::Syntax { .. }));
    // The failed statement must not have touched the shape list.
    assert!(interp.state().shapes.is_empty());
}

#[test]
fn color_error_after_shapes_keeps_prior_shapes() {
    let (err, interp) = run_err("circle 1 1 1 color 5");
    assert!(matches!(err, Error::Syntax { .. }));
    assert_eq!(interp.state().shapes.len(), 1);
}

#[test]
fn clear_empties_shapes_but_keeps_variables() {
    let tokens = tokenize("a = 7 circle 1 1 1 line 0 0 5 5 clear").unwrap();
    let mut interp = Interpreter::new();
    interp.run(&tokens).unwrap();
    assert!(interp.state().shapes.is_empty());
    assert_eq!(interp.state().variables.get("a"), Some(&Value::Number(7.0)));
}

#[test]
fn drawing_continues_after_clear() {
    let outcome = run("circle 1 1 1 clear circle 2 2 2");
    assert_eq!(outcome.shapes.len(), 1);
    assert_eq!(
        outcome.shapes[0].kind,
        ShapeKind::Circle { center: (2.0, 2.0), radius: 2.0 }
    );
}

// ─── stik ────────────────────────────────────────────────────────────────────

#[test]
fn stik_repeats_message_exactly() {
    let outcome = run(r#"stik 3 "X""#);
    assert_eq!(outcome.output, vec!["X", "X", "X"]);
}

#[test]
fn stik_zero_appends_nothing() {
    let outcome = run(r#"stik 0 "X""#);
    assert!(outcome.output.is_empty());
}

#[test]
fn stik_fractional_count_is_syntax_error() {
    let (err, _) = run_err(r#"stik 2.5 "X""#);
    assert!(matches!(err, Error::Syntax { .. }));
}

#[test]
fn stik_non_string_message_is_syntax_error() {
    let (err, _) = run_err("stik 2 5");
    assert!(matches!(err, Error::Syntax { .. }));
}

// ─── Ternary ─────────────────────────────────────────────────────────────────

#[test]
fn ternary_picks_true_branch() {
    let outcome = run(r#"a = 5 a == 5 ? "yes" : "no""#);
    assert_eq!(outcome.output, vec!["a = 5", "yes"]);
}

#[test]
fn ternary_picks_false_branch() {
    let outcome = run(r#"a = 5 a > 9 ? "yes" : "no""#);
    assert_eq!(outcome.output, vec!["a = 5", "no"]);
}

#[test]
fn ternary_condition_may_use_arithmetic() {
    let outcome = run(r#"2 + 3 > 4 ? "big" : "small""#);
    assert_eq!(outcome.output, vec!["big"]);
}

#[test]
fn ternary_branches_may_be_numbers_or_variables() {
    let outcome = run("a = 9 a > 1 ? a : 0");
    assert_eq!(outcome.output, vec!["a = 9", "9"]);
}

#[test]
fn non_boolean_condition_coerces_to_false() {
    // Lenient policy: a number condition selects the false branch instead
    // of failing.
    let outcome = run(r#"1 + 1 ? "t" : "f""#);
    assert_eq!(outcome.output, vec!["f"]);
}

#[test]
fn ternary_without_colon_is_syntax_error() {
    let (err, _) = run_err(r#"3 > 1 ? "t" "f""#);
    assert!(matches!(err, Error::Syntax { .. }));
}

// ─── Dispatcher policies ─────────────────────────────────────────────────────

#[test]
fn unrecognized_tokens_are_silently_skipped() {
    // A stray literal between statements does not abort the run.
    let outcome = run(r#"7 circle 1 1 1"#);
    assert_eq!(outcome.shapes.len(), 1);
    assert_eq!(outcome.output.len(), 1);
}

#[test]
fn error_aborts_remaining_statements() {
    let (_, interp) = run_err("circle 1 1 1 color 5 circle 2 2 2");
    // The statement after the failure never ran.
    assert_eq!(interp.state().shapes.len(), 1);
}

// ─── Token stability ─────────────────────────────────────────────────────────

#[test]
fn token_kinds_are_stable_not_source_text() {
    // Whitespace is discarded, so only the kind/value sequence is asserted.
    let a = tokenize("a=5+1").unwrap();
    let b = tokenize("  a  =  5  +  1  ").unwrap();
    let kinds = |tokens: &[scrawl_lang::Token]| -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind.clone()).collect()
    };
    assert_eq!(kinds(&a), kinds(&b));
}

// ─── Lex errors through the public entry ─────────────────────────────────────

#[test]
fn lex_error_surfaces_position() {
    match interpret("a = 5 ; circle 1 1 1") {
        Err(Error::Lex { pos, .. }) => assert_eq!(pos, 6),
        other => panic!("expected lex error, got {other:?}"),
    }
}

#[test]
fn eval_line_rejects_trailing_tokens() {
    assert!(matches!(eval_line("1 + 2 3"), Err(Error::Syntax { .. })));
}

#[test]
fn eval_line_has_no_variables_in_scope() {
    assert_eq!(
        eval_line("a + 1"),
        Err(Error::UndefinedVariable { name: "a".into() })
    );
}

// ─── Interpreter reuse of eval ───────────────────────────────────────────────

#[test]
fn eval_matches_hand_computed_values() {
    let cases: HashMap<&str, f64> = HashMap::from([
        ("1 + 2 * 3 - 4", 3.0),
        ("(1 + 2) * (3 + 4)", 21.0),
        ("100 / 5 / 2", 10.0),
        ("2 * (3 + (4 - 1))", 12.0),
    ]);
    for (src, expected) in cases {
        assert_eq!(num(src), expected, "for `{src}`");
    }
}
