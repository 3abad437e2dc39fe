//! Elementwise operators the linearizer can request.

/// Closed set of elementwise operators.
///
/// Every emitter maps each of these to a rendering rule at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::AsRefStr)]
pub enum ElementwiseOp {
    /// Base-2 exponential: 2^x
    Exp2,
    /// Base-2 logarithm: log₂(x)
    Log2,
    /// Sine: sin(x)
    Sin,
    /// Square root: √x
    Sqrt,
    /// Addition: a + b
    Add,
    /// Subtraction: a - b
    Sub,
    /// Multiplication: a * b
    Mul,
    /// Division: a / b
    Div,
    /// Maximum: max(a, b)
    Max,
    /// Equality compare: a == b
    CmpEq,
    /// Fused multiply-add: a * b + c
    MulAcc,
}

impl ElementwiseOp {
    /// Number of operands.
    pub const fn arity(&self) -> usize {
        match self {
            Self::Exp2 | Self::Log2 | Self::Sin | Self::Sqrt => 1,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Max | Self::CmpEq => 2,
            Self::MulAcc => 3,
        }
    }
}

/// Rendering rule for one operator: rendered operands in, expression out.
#[derive(Debug, Clone, Copy)]
pub enum OpRender {
    Unary(fn(&str) -> String),
    Binary(fn(&str, &str) -> String),
    Ternary(fn(&str, &str, &str) -> String),
}

impl OpRender {
    pub const fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
            Self::Ternary(_) => 3,
        }
    }

    /// Apply to operands. Callers check the operand count first.
    pub(crate) fn apply(&self, operands: &[&str]) -> String {
        match (self, operands) {
            (Self::Unary(f), [x]) => f(x),
            (Self::Binary(f), [x, y]) => f(x, y),
            (Self::Ternary(f), [x, y, z]) => f(x, y, z),
            _ => unreachable!("operand count checked by OpTable::render"),
        }
    }
}
