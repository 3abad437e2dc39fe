//! Core traits for kernel emission.

use shade_dtype::DType;

use crate::{Buffer, ConstValue, ElementwiseOp, IndexExpr, KernelArtifact, Result};

/// Rendering hooks of one kernel language.
///
/// The linearizer calls the per-statement hooks (`render_load`,
/// `render_store`, `render_const`, ...) while it walks the kernel, collects
/// the returned text, and finally calls [`Emitter::render_kernel`] once to
/// assemble the source. Implementations hold only immutable state, so one
/// emitter can serve concurrent render calls.
pub trait Emitter: Send + Sync {
    /// Backend name (e.g. "wgsl", "cstyle").
    fn backend_name(&self) -> &str;

    /// Target spelling of `dtype`.
    fn type_name(&self, dtype: &DType) -> Result<String>;

    /// Expression for `op` applied to rendered operands.
    fn code_for_op(&self, op: ElementwiseOp, operands: &[&str]) -> Result<String>;

    /// Literal for `value` typed as `dtype`.
    fn render_const(&self, value: ConstValue, dtype: &DType) -> Result<String>;

    /// Construct a value of `dtype` from one expression per lane.
    fn render_cast(&self, parts: &[String], dtype: &DType) -> Result<String>;

    /// Expression reading `buf_name[idx]` as `output_dtype`.
    fn render_load(
        &self,
        output_dtype: &DType,
        buf_name: &str,
        buf_dtype: &DType,
        idx: &IndexExpr,
        local: bool,
    ) -> Result<String>;

    /// Statement writing `var_name` (of `var_dtype`) to `buf_name[idx]`.
    fn render_store(
        &self,
        buf_name: &str,
        buf_dtype: &DType,
        var_name: &str,
        var_dtype: &DType,
        idx: &IndexExpr,
        local: bool,
    ) -> Result<String>;

    /// Counted loop header over the inclusive range `min..=max`. The caller
    /// appends the body and a closing brace.
    fn render_for(&self, var: &str, min: i64, max: i64) -> String;

    /// Branchless select: `x` when `cond` holds, `y` otherwise.
    fn render_conditional(&self, cond: &str, x: &str, y: &str) -> String;

    /// Workgroup-shared float32 array declaration.
    fn render_local(&self, name: &str, size: usize) -> String;

    /// Whether local buffers are declared outside the kernel function, in
    /// the preamble.
    fn external_local_bufs(&self) -> bool;

    /// Mutable variable declaration.
    fn render_define(&self, name: &str, dtype: &DType, value: &str) -> Result<String>;

    /// Immutable integer declaration for a size or index.
    fn render_size(&self, name: &str, expr: &str) -> String;

    /// Workgroup barrier statement, if the target has one.
    fn barrier(&self) -> Option<&str>;

    /// Workgroup index along `axis`, as a signed integer expression.
    fn global_index(&self, axis: usize) -> Result<&str>;

    /// Local invocation index along `axis`, as a signed integer expression.
    fn local_index(&self, axis: usize) -> Result<&str>;

    /// Assemble the final kernel source and launch geometry.
    fn render_kernel(
        &self,
        kernel: &[String],
        bufs: &[Buffer],
        bufnames: &[String],
        global_size: &[usize],
        local_size: &[usize],
        prekernel: &[String],
    ) -> Result<KernelArtifact>;
}
