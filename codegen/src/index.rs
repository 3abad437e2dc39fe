//! Symbolic index expressions.
//!
//! The linearizer hands loads and stores an index built from loop variables,
//! thread indices and integer constants. Emitters only render it; no
//! simplification happens here.

/// Integer index expression over named variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexExpr {
    /// Integer literal.
    Num(i64),
    /// Named variable (loop counter, thread index, size).
    Var(String),
    /// Sum of terms.
    Sum(Vec<IndexExpr>),
    /// Product with a constant factor.
    Mul(Box<IndexExpr>, i64),
    /// Truncating division by a constant.
    Div(Box<IndexExpr>, i64),
    /// Remainder by a constant.
    Mod(Box<IndexExpr>, i64),
}

impl IndexExpr {
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(name.into())
    }

    pub fn sum(terms: impl IntoIterator<Item = IndexExpr>) -> Self {
        Self::Sum(terms.into_iter().collect())
    }

    pub fn mul(self, factor: i64) -> Self {
        Self::Mul(Box::new(self), factor)
    }

    pub fn div(self, divisor: i64) -> Self {
        Self::Div(Box::new(self), divisor)
    }

    pub fn rem(self, divisor: i64) -> Self {
        Self::Mod(Box::new(self), divisor)
    }

    /// Render in C syntax. Compound nodes are parenthesized.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }

    /// Render without the outermost parentheses, for use where the
    /// expression already sits inside an operand position.
    pub fn render_stripped(&self) -> String {
        let rendered = self.render();
        match self {
            Self::Sum(terms) if terms.is_empty() => rendered,
            Self::Sum(_) | Self::Mul(..) | Self::Div(..) | Self::Mod(..) => {
                rendered[1..rendered.len() - 1].to_string()
            }
            Self::Num(_) | Self::Var(_) => rendered,
        }
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Num(n) if *n < 0 => out.push_str(&format!("({n})")),
            Self::Num(n) => out.push_str(&n.to_string()),
            Self::Var(name) => out.push_str(name),
            Self::Sum(terms) if terms.is_empty() => out.push('0'),
            Self::Sum(terms) => {
                out.push('(');
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        out.push('+');
                    }
                    term.write_to(out);
                }
                out.push(')');
            }
            Self::Mul(a, b) => Self::write_binary(out, a, '*', *b),
            Self::Div(a, b) => Self::write_binary(out, a, '/', *b),
            Self::Mod(a, b) => Self::write_binary(out, a, '%', *b),
        }
    }

    fn write_binary(out: &mut String, lhs: &IndexExpr, op: char, rhs: i64) {
        out.push('(');
        lhs.write_to(out);
        out.push(op);
        Self::Num(rhs).write_to(out);
        out.push(')');
    }
}

impl From<i64> for IndexExpr {
    fn from(value: i64) -> Self {
        Self::Num(value)
    }
}

impl From<&str> for IndexExpr {
    fn from(name: &str) -> Self {
        Self::Var(name.to_string())
    }
}
