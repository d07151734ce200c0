//! Flat statement dispatcher. One cursor walks the token sequence; each
//! statement form consumes a positive number of tokens and mutates the
//! single `ProgramState`. Sub-expressions are delegated to `eval`.

use std::collections::HashMap;

use crate::error::Error;
use crate::runtime::eval;
use crate::runtime::value::Value;
use crate::syntax::token::{Keyword, Token, TokenKind};
use crate::types::shape::{Shape, ShapeKind};

pub const DEFAULT_COLOR: &str = "white";

/// The one mutable aggregate of a run: variables, accumulated shapes, and
/// the current drawing color. `clear` empties `shapes` only — variables
/// survive it.
#[derive(Debug, Clone)]
pub struct ProgramState {
    pub variables: HashMap<String, Value>,
    pub shapes: Vec<Shape>,
    pub current_color: String,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            variables: HashMap::new(),
            shapes: Vec::new(),
            current_color: DEFAULT_COLOR.to_string(),
        }
    }
}

// ─── Interpreter ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct Interpreter {
    state: ProgramState,
    output: Vec<String>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ProgramState {
        &self.state
    }

    pub fn into_state(self) -> ProgramState {
        self.state
    }

    /// Execute the whole token sequence, returning one output line per
    /// executed statement. The first error aborts the remainder; side
    /// effects of already-executed statements are kept.
    pub fn run(&mut self, tokens: &[Token]) -> Result<Vec<String>, Error> {
        let mut cursor = 0;
        while cursor < tokens.len() {
            let next = self.exec_statement(tokens, cursor)?;
            debug_assert!(next > cursor, "statement must advance the cursor");
            cursor = next;
        }
        Ok(std::mem::take(&mut self.output))
    }

    fn emit(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    /// Dispatch on the token at `cursor`; return the cursor position after
    /// the statement. Every arm advances by at least one token.
    fn exec_statement(&mut self, tokens: &[Token], cursor: usize) -> Result<usize, Error> {
        match &tokens[cursor].kind {
            TokenKind::Keyword(kw) => match kw {
                Keyword::Circle | Keyword::Rectangle | Keyword::Line => {
                    self.exec_draw(tokens, cursor, *kw)
                }
                Keyword::Color => self.exec_color(tokens, cursor),
                Keyword::Clear => {
                    self.state.shapes.clear();
                    self.emit("canvas cleared");
                    Ok(cursor + 1)
                }
                Keyword::Stik => self.exec_stik(tokens, cursor),
            },

            TokenKind::Ident(name)
                if matches!(tokens.get(cursor + 1).map(|t| &t.kind), Some(TokenKind::Assign)) =>
            {
                let name = name.clone();
                let (value, used) = eval::eval(&tokens[cursor + 2..], &self.state.variables)?;
                self.emit(format!("{name} = {value}"));
                self.state.variables.insert(name, value);
                Ok(cursor + 2 + used)
            }

            _ => {
                // An expression followed by `?` is a ternary statement.
                let extent = eval::expr_extent(&tokens[cursor..]);
                let after = tokens.get(cursor + extent).map(|t| &t.kind);
                if extent > 0 && matches!(after, Some(TokenKind::Question)) {
                    self.exec_ternary(tokens, cursor, extent)
                } else {
                    // Silent-skip policy for unrecognized tokens, kept for
                    // behavioral compatibility.
                    Ok(cursor + 1)
                }
            }
        }
    }

    // ─── Statement forms ──────────────────────────────────────────────────────

    /// `circle cx cy r` / `rectangle x y w h` / `line x1 y1 x2 y2`.
    /// Fixed arity of single tokens, each evaluated independently as a
    /// scalar.
    fn exec_draw(&mut self, tokens: &[Token], cursor: usize, kw: Keyword) -> Result<usize, Error> {
        let arity = kw.draw_arity().unwrap_or(0);
        let args = &tokens[cursor + 1..];
        if args.len() < arity {
            return Err(Error::syntax(format!(
                "`{}` expects {arity} arguments, found {}",
                kw.as_str(),
                args.len()
            )));
        }

        let mut scalars = [0.0f64; 4];
        for (slot, token) in scalars.iter_mut().zip(&args[..arity]) {
            *slot = self.scalar_arg(kw, token)?;
        }

        let [a, b, c, d] = scalars;
        let (kind, line) = match kw {
            Keyword::Circle => (
                ShapeKind::Circle { center: (a, b), radius: c },
                format!("circle at ({a}, {b}) radius {c}"),
            ),
            Keyword::Rectangle => (
                ShapeKind::Rect { origin: (a, b), size: (c, d) },
                format!("rectangle at ({a}, {b}) size {c}x{d}"),
            ),
            Keyword::Line => (
                ShapeKind::Line { from: (a, b), to: (c, d) },
                format!("line from ({a}, {b}) to ({c}, {d})"),
            ),
            _ => unreachable!("only draw keywords reach exec_draw"),
        };

        self.state.shapes.push(Shape::new(kind, self.state.current_color.clone()));
        self.emit(line);
        Ok(cursor + 1 + arity)
    }

    /// A single argument token: number literal or numeric variable.
    fn scalar_arg(&self, kw: Keyword, token: &Token) -> Result<f64, Error> {
        let value = eval::eval_slice(std::slice::from_ref(token), &self.state.variables)?;
        value.as_number().ok_or_else(|| {
            Error::syntax(format!(
                "`{}` expects a number, found {}",
                kw.as_str(),
                value.type_name()
            ))
        })
    }

    /// `color "<name>"` — argument must be a string literal.
    fn exec_color(&mut self, tokens: &[Token], cursor: usize) -> Result<usize, Error> {
        match tokens.get(cursor + 1).map(|t| &t.kind) {
            Some(TokenKind::StringLit(name)) => {
                let name = name.clone();
                self.emit(format!("color set to {name}"));
                self.state.current_color = name;
                Ok(cursor + 2)
            }
            _ => Err(Error::syntax("`color` expects a string literal")),
        }
    }

    /// `stik <count> <message>` — appends the message exactly `count` times.
    /// The count must be a non-negative integer literal, the message a
    /// string literal. Zero is valid and appends nothing.
    fn exec_stik(&mut self, tokens: &[Token], cursor: usize) -> Result<usize, Error> {
        let count = match tokens.get(cursor + 1).map(|t| &t.kind) {
            Some(TokenKind::Number(n)) if *n >= 0.0 && n.fract() == 0.0 => *n as usize,
            _ => {
                return Err(Error::syntax(
                    "`stik` expects a non-negative integer count",
                ));
            }
        };
        let message = match tokens.get(cursor + 2).map(|t| &t.kind) {
            Some(TokenKind::StringLit(s)) => s.clone(),
            _ => return Err(Error::syntax("`stik` expects a string literal message")),
        };
        for _ in 0..count {
            self.emit(message.clone());
        }
        Ok(cursor + 3)
    }

    /// `<condition> ? <true-token> : <false-token>` — the condition is every
    /// token strictly before the `?`. The chosen branch token is evaluated
    /// and its stringified value appended to the output.
    ///
    /// The condition is coerced leniently: any non-boolean value selects the
    /// false branch rather than failing.
    fn exec_ternary(&mut self, tokens: &[Token], cursor: usize, extent: usize) -> Result<usize, Error> {
        let question = cursor + extent;
        if !matches!(tokens.get(question + 2).map(|t| &t.kind), Some(TokenKind::Colon)) {
            return Err(Error::syntax("ternary expects `:` after the true branch"));
        }

        let condition = eval::eval_slice(&tokens[cursor..question], &self.state.variables)?;
        let branch = if condition.truthy() { question + 1 } else { question + 3 };
        let token = tokens
            .get(branch)
            .ok_or_else(|| Error::syntax("ternary is missing a branch"))?;
        let value = self.branch_value(token)?;
        self.emit(value.to_string());
        Ok(question + 4)
    }

    /// Branch tokens are single literals or variable references.
    fn branch_value(&self, token: &Token) -> Result<Value, Error> {
        match &token.kind {
            TokenKind::Number(n) => Ok(Value::Number(*n)),
            TokenKind::StringLit(s) => Ok(Value::Text(s.clone())),
            TokenKind::Ident(name) => self
                .state
                .variables
                .get(name)
                .cloned()
                .ok_or_else(|| Error::UndefinedVariable { name: name.clone() }),
            _ => Err(Error::syntax(format!(
                "ternary branch must be a literal or variable, found `{}`",
                token.text
            ))),
        }
    }
}
