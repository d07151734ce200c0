use std::fmt;

/// Dynamically-typed result of expression evaluation. Closed sum — every
/// consumption site matches exhaustively so type mismatches fail fast.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Boolean(bool),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_)  => "number",
            Self::Text(_)    => "text",
            Self::Boolean(_) => "boolean",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Lenient boolean coercion used only by the ternary condition: a real
    /// boolean keeps its value, every other type reads as false.
    pub fn truthy(&self) -> bool {
        matches!(self, Self::Boolean(true))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display already prints integral values without `.0`.
            Self::Number(n)  => write!(f, "{n}"),
            Self::Text(s)    => write!(f, "{s}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_print_in_natural_form() {
        assert_eq!(Value::Number(25.0).to_string(), "25");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(-6.0).to_string(), "-6");
    }

    #[test]
    fn truthy_only_for_boolean_true() {
        assert!(Value::Boolean(true).truthy());
        assert!(!Value::Boolean(false).truthy());
        assert!(!Value::Number(1.0).truthy());
        assert!(!Value::Text("true".into()).truthy());
    }
}
