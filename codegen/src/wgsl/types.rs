//! WGSL type names, operator spellings and literals.

use shade_dtype::ScalarDType;

use crate::common::float_literal;
use crate::{ElementwiseOp, OpRender};

/// Bit pattern of the canonical quiet NaN in binary32.
const F32_QUIET_NAN_BITS: u32 = 0x7fc0_0000;

/// Smallest magnitude that rounds to infinity in binary16.
const F16_OVERFLOW: f64 = 65520.0;

pub fn wgsl_types() -> [(ScalarDType, &'static str); 5] {
    [
        (ScalarDType::Float32, "f32"),
        (ScalarDType::Float16, "f16"),
        (ScalarDType::Int32, "i32"),
        (ScalarDType::UInt32, "u32"),
        (ScalarDType::Bool, "bool"),
    ]
}

/// WGSL operator spellings.
///
/// WGSL never widens `bool` to a number implicitly, so equality yields an
/// `f32` 0.0/1.0 that can feed arithmetic and `fma` directly.
pub fn wgsl_ops() -> Vec<(ElementwiseOp, OpRender)> {
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
        (CmpEq, OpRender::Binary(|x, y| format!("f32({x}=={y})"))),
        (MulAcc, OpRender::Ternary(|x, y, z| format!("fma({x},{y},{z})"))),
    ]
}

/// Literal suffix selecting the float width.
pub fn float_suffix(scalar: ScalarDType) -> &'static str {
    match scalar {
        ScalarDType::Float16 => "h",
        _ => "f",
    }
}

/// Largest finite magnitude of a float type as a hexadecimal literal.
pub fn max_finite_literal(scalar: ScalarDType) -> &'static str {
    match scalar {
        ScalarDType::Float16 => "0x1.ffcp+15h",
        _ => "0x1.fffffep+127f",
    }
}

/// Render a float scalar as a WGSL literal.
///
/// WGSL has no spelling for infinity or NaN. Infinity becomes the largest
/// finite value of the type (so `inf` reads back as `f32::MAX`, not as
/// infinity), and so does any finite value that rounds to infinity at the
/// target width; NaN becomes a bitcast of the quiet-NaN pattern.
pub fn wgsl_float(value: f64, scalar: ScalarDType) -> String {
    if value.is_nan() {
        let nan = format!("bitcast<f32>({F32_QUIET_NAN_BITS:#x}u)");
        return match scalar {
            ScalarDType::Float16 => format!("f16({nan})"),
            _ => nan,
        };
    }
    let overflows = match scalar {
        ScalarDType::Float16 => value.abs() >= F16_OVERFLOW,
        _ => (value as f32).is_infinite(),
    };
    if overflows {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{}", max_finite_literal(scalar));
    }
    format!("{}{}", float_literal(value), float_suffix(scalar))
}
