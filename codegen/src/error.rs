//! Error types for kernel emission.

use shade_dtype::{DType, ScalarDType};
use snafu::Snafu;

use crate::ElementwiseOp;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while building an emitter or rendering a kernel.
///
/// Every variant is a deterministic function of malformed input or an
/// incomplete target description; none of them are retried.
#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Operator table has no entry for an operator the linearizer can request.
    #[snafu(display("no rendering rule for operator {op:?}"))]
    UnmappedOp { op: ElementwiseOp },

    /// Type table has no name for a scalar type.
    #[snafu(display("no type name for {scalar:?}"))]
    UnmappedType { scalar: ScalarDType },

    /// Operator rendered with the wrong number of operands.
    #[snafu(display("operator {op:?} takes {expected} operands, got {actual}"))]
    OperandCount { op: ElementwiseOp, expected: usize, actual: usize },

    /// Buffer list and buffer name list disagree in length.
    #[snafu(display("{buffers} buffers but {names} buffer names"))]
    BufferNameMismatch { buffers: usize, names: usize },

    /// Launch size with more axes than the built-in index vectors have.
    #[snafu(display("{what} has {axes} axes, at most 3 are supported"))]
    TooManyAxes { what: &'static str, axes: usize },

    /// Thread-index axis outside `0..3`.
    #[snafu(display("axis {axis} out of range, expected 0..3"))]
    AxisOutOfRange { axis: usize },

    /// Vector width or vector access the target cannot express.
    #[snafu(display("unsupported vector type {dtype:?}: {reason}"))]
    UnsupportedVector { dtype: DType, reason: String },

    /// Integer constant does not fit its declared type.
    #[snafu(display("constant {value} does not fit {dtype:?}"))]
    ConstOutOfRange { value: String, dtype: DType },

    /// Threads per workgroup above the configured device limit.
    #[snafu(display("workgroup of {invocations} invocations exceeds limit of {limit}"))]
    WorkgroupTooLarge { invocations: usize, limit: usize },
}
