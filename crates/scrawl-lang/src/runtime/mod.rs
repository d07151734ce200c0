pub mod eval;
pub mod interpreter;
pub mod value;
