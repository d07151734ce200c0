/// Statement-initial keywords. `Stik` is the fixed-count repetition form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Circle,
    Rectangle,
    Line,
    Color,
    Clear,
    Stik,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Circle    => "circle",
            Self::Rectangle => "rectangle",
            Self::Line      => "line",
            Self::Color     => "color",
            Self::Clear     => "clear",
            Self::Stik      => "stik",
        }
    }

    /// Number of scalar argument tokens a draw keyword consumes.
    pub fn draw_arity(self) -> Option<usize> {
        match self {
            Self::Circle => Some(3),
            Self::Rectangle | Self::Line => Some(4),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
}

impl ArithOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Binding strength on the operator stack. `*`/`/` bind over `+`/`-`.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Mul | Self::Div => 2,
            Self::Add | Self::Sub => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,    // ==
    NotEq, // !=
    Lt,    // <
    Gt,    // >
    LtEq,  // <=
    GtEq,  // >=
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq    => "==",
            Self::NotEq => "!=",
            Self::Lt    => "<",
            Self::Gt    => ">",
            Self::LtEq  => "<=",
            Self::GtEq  => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    StringLit(String),
    Ident(String),

    Keyword(Keyword),
    Op(ArithOp),
    Cmp(CmpOp),

    // Punctuation
    Question, // ?
    Colon,    // :
    Assign,   // =
    LParen,   // (
    RParen,   // )
    Comma,    // ,
}

impl TokenKind {
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Op(_) | Self::Cmp(_))
    }
}

// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source slice the rule matched (quotes included for strings).
    pub text: String,
    /// Byte offset into the source.
    pub pos: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: usize) -> Self {
        Self { kind, text: text.into(), pos }
    }
}
