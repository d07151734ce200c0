/// Semantic shape geometry — immutable once constructed. The renderer
/// decides how each variant lands on the character grid.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Circle { center: (f64, f64), radius: f64 },
    Rect   { origin: (f64, f64), size: (f64, f64) },
    Line   { from: (f64, f64), to: (f64, f64) },
}

/// A shape plus the color that was current when it was appended. Color is
/// state metadata only — the character renderer does not use it.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: String,
}

impl Shape {
    pub fn new(kind: ShapeKind, color: impl Into<String>) -> Self {
        Self { kind, color: color.into() }
    }
}
