use thiserror::Error;

/// Every failure a script run can produce. All variants are terminal to the
/// run: the first error aborts remaining statements, already-executed
/// statements keep their side effects.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// No rule in the lexer table matched at `pos`.
    #[error("lex error at byte {pos}: no token matches `{snippet}`")]
    Lex { pos: usize, snippet: String },

    /// Malformed statement or expression shape — wrong arity, wrong literal
    /// kind, unmatched parenthesis, operand underflow.
    #[error("syntax error: {message}")]
    Syntax { message: String },

    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },

    /// Division by a numeric zero. Never surfaces as inf/NaN.
    #[error("division by zero")]
    DivisionByZero,

    /// Operand type mismatch in an operator application.
    #[error("type mismatch: `{op}` not supported for {left} and {right}")]
    Type {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
}

impl Error {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax { message: message.into() }
    }
}
