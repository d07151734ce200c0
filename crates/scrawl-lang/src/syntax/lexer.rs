use crate::error::Error;
use crate::syntax::token::{ArithOp, CmpOp, Keyword, Token, TokenKind};

/// One tokenization rule: match a prefix of the remaining source, returning
/// the token kind and how many bytes it consumed.
type Rule = fn(&str) -> Option<(TokenKind, usize)>;

/// The rule table, tried in declared order on every iteration.
///
/// Order matters: keywords must come before the identifier rule, and the
/// two-character comparators before `Assign`/`Lt`/`Gt`, otherwise the
/// earlier, shorter rule wins and produces the wrong token. Each rule is
/// greedy within itself only — there is no longest-match across rules.
const RULES: &[Rule] = &[
    match_keyword,
    match_number,
    match_string,
    match_compare,
    match_arith,
    match_punct,
    match_ident,
];

pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Materialize the full token sequence up front. The first position with
    /// no matching rule aborts with `Error::Lex`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            if self.pos >= self.source.len() {
                break;
            }

            let rest = &self.source[self.pos..];
            let Some((kind, len)) = RULES.iter().find_map(|rule| rule(rest)) else {
                return Err(Error::Lex { pos: self.pos, snippet: snippet(rest) });
            };
            tokens.push(Token::new(kind, &rest[..len], self.pos));
            self.pos += len;
        }

        Ok(tokens)
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.source[self.pos..];
        let trimmed = rest.trim_start();
        self.pos += rest.len() - trimmed.len();
    }
}

fn snippet(rest: &str) -> String {
    rest.chars().take(12).collect()
}

// ─── Rules ───────────────────────────────────────────────────────────────────

const KEYWORDS: &[Keyword] = &[
    Keyword::Circle,
    Keyword::Rectangle,
    Keyword::Line,
    Keyword::Color,
    Keyword::Clear,
    Keyword::Stik,
];

fn match_keyword(rest: &str) -> Option<(TokenKind, usize)> {
    KEYWORDS.iter().find_map(|&kw| {
        let word = kw.as_str();
        rest.starts_with(word).then(|| (TokenKind::Keyword(kw), word.len()))
    })
}

/// Digits with an optional fraction. The dot is consumed only when at least
/// one digit follows it.
fn match_number(rest: &str) -> Option<(TokenKind, usize)> {
    let bytes = rest.as_bytes();
    let mut len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    if bytes.get(len) == Some(&b'.') && bytes.get(len + 1).is_some_and(u8::is_ascii_digit) {
        len += 1;
        len += bytes[len..].iter().take_while(|b| b.is_ascii_digit()).count();
    }
    let value: f64 = rest[..len].parse().ok()?;
    Some((TokenKind::Number(value), len))
}

/// Double-quote delimited, no escape sequences. An unterminated quote matches
/// nothing, so the lexer reports it as an unmatched position.
fn match_string(rest: &str) -> Option<(TokenKind, usize)> {
    let body = rest.strip_prefix('"')?;
    let close = body.find('"')?;
    Some((TokenKind::StringLit(body[..close].to_string()), close + 2))
}

fn match_compare(rest: &str) -> Option<(TokenKind, usize)> {
    // Two-character comparators first — `<=` must not lex as `<`, `=`.
    const TABLE: &[(&str, CmpOp)] = &[
        ("==", CmpOp::Eq),
        ("!=", CmpOp::NotEq),
        ("<=", CmpOp::LtEq),
        (">=", CmpOp::GtEq),
        ("<", CmpOp::Lt),
        (">", CmpOp::Gt),
    ];
    TABLE.iter().find_map(|&(sym, op)| {
        rest.starts_with(sym).then(|| (TokenKind::Cmp(op), sym.len()))
    })
}

fn match_arith(rest: &str) -> Option<(TokenKind, usize)> {
    let op = match rest.as_bytes().first()? {
        b'+' => ArithOp::Add,
        b'-' => ArithOp::Sub,
        b'*' => ArithOp::Mul,
        b'/' => ArithOp::Div,
        _ => return None,
    };
    Some((TokenKind::Op(op), 1))
}

fn match_punct(rest: &str) -> Option<(TokenKind, usize)> {
    let kind = match rest.as_bytes().first()? {
        b'?' => TokenKind::Question,
        b':' => TokenKind::Colon,
        b'=' => TokenKind::Assign,
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b',' => TokenKind::Comma,
        _ => return None,
    };
    Some((kind, 1))
}

fn match_ident(rest: &str) -> Option<(TokenKind, usize)> {
    let first = *rest.as_bytes().first()?;
    if !first.is_ascii_alphabetic() && first != b'_' {
        return None;
    }
    let len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    Some((TokenKind::Ident(rest[..len].to_string()), len))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
