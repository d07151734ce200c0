pub mod error;
pub mod runtime;
pub mod syntax;
pub mod types;

pub use error::Error;
pub use runtime::interpreter::{DEFAULT_COLOR, Interpreter, ProgramState};
pub use runtime::value::Value;
pub use syntax::token::{ArithOp, CmpOp, Keyword, Token, TokenKind};
pub use types::shape::{Shape, ShapeKind};

use std::collections::HashMap;

// ─── Public API types ─────────────────────────────────────────────────────────

/// Result of a full script run: one output line per executed statement plus
/// the accumulated shape list, ready for rendering.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub output: Vec<String>,
    pub shapes: Vec<Shape>,
}

// ─── Public API ───────────────────────────────────────────────────────────────

/// Tokenize source text into the full token sequence.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    syntax::lexer::Lexer::new(source).tokenize()
}

/// Calculator entry point: evaluate a single-line expression with no
/// variables in scope. Trailing tokens after the expression are an error.
pub fn eval_line(source: &str) -> Result<Value, Error> {
    let tokens = tokenize(source)?;
    runtime::eval::eval_all(&tokens, &HashMap::new())
}

/// Graphics entry point: run a script to completion. Rendering the shape
/// list to a grid is a separate call in `scrawl-render`.
pub fn interpret(source: &str) -> Result<Outcome, Error> {
    let tokens = tokenize(source)?;
    let mut interpreter = Interpreter::new();
    let output = interpreter.run(&tokens)?;
    Ok(Outcome { output, shapes: interpreter.into_state().shapes })
}
