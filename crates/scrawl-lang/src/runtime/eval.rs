//! Expression evaluation: infix → postfix via an explicit operator stack,
//! then postfix evaluation over a `Value` stack.
//!
//! One algorithm serves both callers: pure arithmetic with grouping (the
//! calculator, assignments) and comparisons yielding booleans (ternary
//! conditions). Comparators sit below `+`/`-` in the precedence table, so
//! `a + 1 > b` groups as `(a + 1) > b` without a separate code path.

use std::collections::HashMap;

use crate::error::Error;
use crate::runtime::value::Value;
use crate::syntax::token::{ArithOp, CmpOp, Token, TokenKind};

/// Length of the longest expression prefix of `tokens`.
///
/// Pure scan, no evaluation: operands and operators must alternate, `(` only
/// where an operand may start, `)` only against an open depth. The scan
/// stops before the first token that cannot continue the expression — a
/// keyword, `?`, `:`, a string literal, a second operand in a row, or a `)`
/// belonging to an enclosing context.
pub fn expr_extent(tokens: &[Token]) -> usize {
    let mut depth = 0usize;
    let mut expect_operand = true;
    let mut i = 0;

    while i < tokens.len() {
        match &tokens[i].kind {
            TokenKind::Number(_) | TokenKind::Ident(_) if expect_operand => {
                expect_operand = false;
            }
            TokenKind::LParen if expect_operand => depth += 1,
            TokenKind::RParen if !expect_operand && depth > 0 => depth -= 1,
            kind if kind.is_operator() && !expect_operand => {
                expect_operand = true;
            }
            _ => break,
        }
        i += 1;
    }
    i
}

/// Evaluate the longest expression prefix of `tokens`. Returns the value and
/// the number of tokens consumed.
pub fn eval(tokens: &[Token], vars: &HashMap<String, Value>) -> Result<(Value, usize), Error> {
    let extent = expr_extent(tokens);
    let value = eval_slice(&tokens[..extent], vars)?;
    Ok((value, extent))
}

/// Evaluate `tokens`, requiring the whole sequence to form one expression.
/// Calculator entry path.
pub fn eval_all(tokens: &[Token], vars: &HashMap<String, Value>) -> Result<Value, Error> {
    let extent = expr_extent(tokens);
    if extent < tokens.len() {
        return Err(Error::syntax(format!(
            "unexpected token `{}` after expression",
            tokens[extent].text
        )));
    }
    eval_slice(tokens, vars)
}

// ─── Infix → postfix ─────────────────────────────────────────────────────────

/// Postfix output queue entry. Operands are resolved to values during the
/// shunting pass, so variable lookups happen exactly once per occurrence.
enum Postfix {
    Operand(Value),
    Arith(ArithOp),
    Cmp(CmpOp),
}

enum StackOp {
    Arith(ArithOp),
    Cmp(CmpOp),
    LParen,
}

impl StackOp {
    /// Comparators bind weakest so arithmetic on either side groups first.
    fn precedence(&self) -> u8 {
        match self {
            Self::Arith(op) => op.precedence(),
            Self::Cmp(_) => 0,
            Self::LParen => unreachable!("LParen never compared by precedence"),
        }
    }
}

/// Evaluate an exact token slice as one expression.
pub fn eval_slice(tokens: &[Token], vars: &HashMap<String, Value>) -> Result<Value, Error> {
    let queue = to_postfix(tokens, vars)?;
    eval_postfix(queue)
}

fn to_postfix(tokens: &[Token], vars: &HashMap<String, Value>) -> Result<Vec<Postfix>, Error> {
    let mut queue: Vec<Postfix> = Vec::new();
    let mut stack: Vec<StackOp> = Vec::new();

    for token in tokens {
        match &token.kind {
            TokenKind::Number(n) => queue.push(Postfix::Operand(Value::Number(*n))),

            TokenKind::Ident(name) => {
                let value = vars
                    .get(name)
                    .cloned()
                    .ok_or_else(|| Error::UndefinedVariable { name: name.clone() })?;
                queue.push(Postfix::Operand(value));
            }

            TokenKind::Op(op) => {
                flush_ge(&mut queue, &mut stack, op.precedence());
                stack.push(StackOp::Arith(*op));
            }

            TokenKind::Cmp(op) => {
                flush_ge(&mut queue, &mut stack, 0);
                stack.push(StackOp::Cmp(*op));
            }

            TokenKind::LParen => stack.push(StackOp::LParen),

            TokenKind::RParen => loop {
                match stack.pop() {
                    Some(StackOp::LParen) => break,
                    Some(StackOp::Arith(op)) => queue.push(Postfix::Arith(op)),
                    Some(StackOp::Cmp(op)) => queue.push(Postfix::Cmp(op)),
                    None => return Err(Error::syntax("unmatched parenthesis")),
                }
            },

            _ => {
                return Err(Error::syntax(format!(
                    "unexpected token `{}` in expression",
                    token.text
                )));
            }
        }
    }

    while let Some(op) = stack.pop() {
        match op {
            StackOp::LParen => return Err(Error::syntax("unmatched parenthesis")),
            StackOp::Arith(op) => queue.push(Postfix::Arith(op)),
            StackOp::Cmp(op) => queue.push(Postfix::Cmp(op)),
        }
    }
    Ok(queue)
}

/// Pop every stacked operator with precedence >= `min` to the output queue.
/// Left associativity: equal precedence flushes too.
fn flush_ge(queue: &mut Vec<Postfix>, stack: &mut Vec<StackOp>, min: u8) {
    while let Some(top) = stack.last() {
        if matches!(top, StackOp::LParen) || top.precedence() < min {
            break;
        }
        match stack.pop() {
            Some(StackOp::Arith(op)) => queue.push(Postfix::Arith(op)),
            Some(StackOp::Cmp(op)) => queue.push(Postfix::Cmp(op)),
            _ => break,
        }
    }
}

// ─── Postfix evaluation ──────────────────────────────────────────────────────

fn eval_postfix(queue: Vec<Postfix>) -> Result<Value, Error> {
    let mut stack: Vec<Value> = Vec::new();

    for item in queue {
        match item {
            Postfix::Operand(v) => stack.push(v),
            Postfix::Arith(op) => {
                let (l, r) = pop_pair(&mut stack, op.symbol())?;
                stack.push(apply_arith(op, l, r)?);
            }
            Postfix::Cmp(op) => {
                let (l, r) = pop_pair(&mut stack, op.symbol())?;
                stack.push(apply_cmp(op, l, r)?);
            }
        }
    }

    match (stack.pop(), stack.is_empty()) {
        (Some(value), true) => Ok(value),
        (None, _) => Err(Error::syntax("empty expression")),
        (Some(_), false) => Err(Error::syntax("malformed expression: leftover operands")),
    }
}

/// Operand-count check before every binary pop.
fn pop_pair(stack: &mut Vec<Value>, op: &'static str) -> Result<(Value, Value), Error> {
    let Some(right) = stack.pop() else {
        return Err(Error::syntax(format!("operator `{op}` is missing an operand")));
    };
    let Some(left) = stack.pop() else {
        return Err(Error::syntax(format!("operator `{op}` is missing an operand")));
    };
    Ok((left, right))
}

fn apply_arith(op: ArithOp, left: Value, right: Value) -> Result<Value, Error> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => match op {
            ArithOp::Add => Ok(Value::Number(l + r)),
            ArithOp::Sub => Ok(Value::Number(l - r)),
            ArithOp::Mul => Ok(Value::Number(l * r)),
            ArithOp::Div => {
                if r == 0.0 {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(Value::Number(l / r))
                }
            }
        },
        (l, r) => Err(Error::Type {
            op: op.symbol(),
            left: l.type_name(),
            right: r.type_name(),
        }),
    }
}

fn apply_cmp(op: CmpOp, left: Value, right: Value) -> Result<Value, Error> {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => Ok(Value::Boolean(match op {
            CmpOp::Eq    => l == r,
            CmpOp::NotEq => l != r,
            CmpOp::Lt    => l < r,
            CmpOp::Gt    => l > r,
            CmpOp::LtEq  => l <= r,
            CmpOp::GtEq  => l >= r,
        })),
        // Booleans compare for equality only.
        (Value::Boolean(l), Value::Boolean(r)) => match op {
            CmpOp::Eq    => Ok(Value::Boolean(l == r)),
            CmpOp::NotEq => Ok(Value::Boolean(l != r)),
            _ => Err(Error::Type { op: op.symbol(), left: "boolean", right: "boolean" }),
        },
        (l, r) => Err(Error::Type {
            op: op.symbol(),
            left: l.type_name(),
            right: r.type_name(),
        }),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
