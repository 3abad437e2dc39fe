//! C type names, operator spellings and literals for the base emitter.

use shade_dtype::{DType, ScalarDType};

use crate::common::{float_literal, int_literal};
use crate::{ConstValue, ElementwiseOp, OpRender, Result};

/// Default C-family type names.
pub fn c_types() -> [(ScalarDType, &'static str); 5] {
    [
        (ScalarDType::Bool, "bool"),
        (ScalarDType::Int32, "int"),
        (ScalarDType::UInt32, "unsigned int"),
        (ScalarDType::Float16, "half"),
        (ScalarDType::Float32, "float"),
    ]
}

/// Default C-family operator spellings.
pub fn c_ops() -> Vec<(ElementwiseOp, OpRender)> {
    use ElementwiseOp::*;
    vec![
        (Exp2, OpRender::Unary(|x| format!("exp2({x})"))),
        (Log2, OpRender::Unary(|x| format!("log2({x})"))),
        (Sin, OpRender::Unary(|x| format!("sin({x})"))),
        (Sqrt, OpRender::Unary(|x| format!("sqrt({x})"))),
        (Add, OpRender::Binary(|x, y| format!("({x}+{y})"))),
        (Sub, OpRender::Binary(|x, y| format!("({x}-{y})"))),
        (Mul, OpRender::Binary(|x, y| format!("({x}*{y})"))),
        (Div, OpRender::Binary(|x, y| format!("({x}/{y})"))),
        (Max, OpRender::Binary(|x, y| format!("max({x},{y})"))),
        (CmpEq, OpRender::Binary(|x, y| format!("({x}=={y})"))),
        (MulAcc, OpRender::Ternary(|x, y, z| format!("(({x}*{y})+{z})"))),
    ]
}

/// Render a scalar constant as a C literal.
pub fn c_const(value: ConstValue, dtype: &DType) -> Result<String> {
    let scalar = dtype.base();
    if scalar.is_bool() {
        return Ok(if value.is_truthy() { "1" } else { "0" }.to_string());
    }
    if scalar.is_int() {
        return int_literal(value, dtype);
    }

    let f = value.as_f64();
    if f.is_nan() {
        return Ok("NAN".to_string());
    }
    if (f as f32).is_infinite() {
        let sign = if f.is_sign_negative() { "-" } else { "" };
        return Ok(format!("{sign}INFINITY"));
    }
    Ok(format!("{}f", float_literal(f)))
}
