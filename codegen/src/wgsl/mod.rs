//! WGSL compute-shader emitter.
//!
//! Composes a [`CStyleEmitter`] configured with WGSL tables and overrides
//! the hooks where WGSL departs from C: binding declarations, the entry
//! point, vector constructors, special float values and coercions.
//!
//! # Kernel Layout
//!
//! ```wgsl
//! enable f16;                                                          // only with f16 buffers
//! var<workgroup> temp: array<f32,16>;                                  // preamble
//! @group(0) @binding(0) var<storage,read_write> data0: array<f32>;    // bound buffers
//! @compute @workgroup_size(4,8) fn KERNEL_NAME_PLACEHOLDER(@builtin(workgroup_id) gindex: vec3<u32>, @builtin(local_invocation_id) lindex: vec3<u32>) {
//! ...                                                                  // body
//! }
//! ```
//!
//! Launch sizes come back axis-reversed: the linearizer lists its fastest
//! axis first, WGSL expects it last.

pub mod types;

use shade_dtype::{DType, ScalarDType};
use snafu::ensure;

use crate::common::{bound_buffers, check_axes, int_literal, reverse_axes};
use crate::cstyle::{CStyleEmitter, CStyleLanguage};
use crate::error::{UnsupportedVectorSnafu, WorkgroupTooLargeSnafu};
use crate::{Buffer, ConstValue, ElementwiseOp, Emitter, IndexExpr, KernelArtifact, Result, WgslConfig};

use self::types::{wgsl_float, wgsl_ops, wgsl_types};

/// Working type of every loaded value and every select.
const WORKING_TYPE: &str = "f32";

/// WGSL emitter.
#[derive(Debug, Clone)]
pub struct WgslEmitter {
    base: CStyleEmitter,
    config: WgslConfig,
}

impl WgslEmitter {
    /// Build an emitter. Fails if the WGSL tables do not cover every type
    /// and operator.
    pub fn new(config: WgslConfig) -> Result<Self> {
        let lang = CStyleLanguage::builder()
            .size_prefix("let")
            .generic_var_prefix("var ")
            .barrier("workgroupBarrier();")
            .gid([0, 1, 2].map(|axis| format!("i32(gindex.{})", AXIS_NAMES[axis])))
            .lid([0, 1, 2].map(|axis| format!("i32(lindex.{})", AXIS_NAMES[axis])))
            .entry_point(config.entry_point.clone())
            .build();
        let base = CStyleEmitter::with_tables(lang, wgsl_types(), wgsl_ops())?;
        Ok(Self { base, config })
    }

    /// Build an emitter configured from the environment.
    pub fn from_env() -> Result<Self> {
        Self::new(WgslConfig::from_env())
    }

    pub fn config(&self) -> &WgslConfig {
        &self.config
    }

    fn ensure_scalar(dtype: &DType, access: &str) -> Result<()> {
        ensure!(
            !dtype.is_vector(),
            UnsupportedVectorSnafu { dtype: *dtype, reason: format!("{access} of storage arrays is scalar") }
        );
        Ok(())
    }
}

const AXIS_NAMES: [char; 3] = ['x', 'y', 'z'];

/// Required ahead of any declaration once `f16` appears in the module.
const F16_DIRECTIVE: &str = "enable f16;";

impl Emitter for WgslEmitter {
    fn backend_name(&self) -> &str {
        "wgsl"
    }

    fn type_name(&self, dtype: &DType) -> Result<String> {
        let base = self.base.types().base(dtype)?;
        match dtype {
            DType::Scalar(_) => Ok(base.to_string()),
            DType::Vector { count, .. } => {
                ensure!(
                    (2..=4).contains(count),
                    UnsupportedVectorSnafu { dtype: *dtype, reason: "WGSL vectors have 2 to 4 components" }
                );
                Ok(format!("vec{count}<{base}>"))
            }
        }
    }

    fn code_for_op(&self, op: ElementwiseOp, operands: &[&str]) -> Result<String> {
        self.base.code_for_op(op, operands)
    }

    fn render_const(&self, value: ConstValue, dtype: &DType) -> Result<String> {
        let scalar = dtype.base();
        let lit = if scalar.is_float() {
            wgsl_float(value.as_f64(), scalar)
        } else if scalar.is_bool() {
            value.is_truthy().to_string()
        } else {
            int_literal(value, dtype)?
        };

        if dtype.count() > 1 { self.render_cast(&vec![lit; dtype.count()], dtype) } else { Ok(lit) }
    }

    fn render_cast(&self, parts: &[String], dtype: &DType) -> Result<String> {
        ensure!(
            parts.len() == 1 || parts.len() == dtype.count(),
            UnsupportedVectorSnafu { dtype: *dtype, reason: format!("cannot build from {} parts", parts.len()) }
        );
        Ok(format!("{}({})", self.type_name(dtype)?, parts.join(",")))
    }

    fn render_load(
        &self,
        output_dtype: &DType,
        buf_name: &str,
        buf_dtype: &DType,
        idx: &IndexExpr,
        local: bool,
    ) -> Result<String> {
        Self::ensure_scalar(output_dtype, "load")?;
        Self::ensure_scalar(buf_dtype, "load")?;
        let raw = self.base.render_load(buf_dtype, buf_name, buf_dtype, idx, local)?;
        Ok(format!("{WORKING_TYPE}({raw})"))
    }

    fn render_store(
        &self,
        buf_name: &str,
        buf_dtype: &DType,
        var_name: &str,
        var_dtype: &DType,
        idx: &IndexExpr,
        local: bool,
    ) -> Result<String> {
        Self::ensure_scalar(var_dtype, "store")?;
        Self::ensure_scalar(buf_dtype, "store")?;
        let value =
            if buf_dtype != var_dtype { self.render_cast(&[var_name.to_string()], buf_dtype)? } else { var_name.to_string() };
        self.base.render_store(buf_name, buf_dtype, &value, buf_dtype, idx, local)
    }

    fn render_for(&self, var: &str, min: i64, max: i64) -> String {
        format!("for(var {var} = {min}; {var} <= {max}; {var}++) {{")
    }

    fn render_conditional(&self, cond: &str, x: &str, y: &str) -> String {
        format!("select({WORKING_TYPE}({y}), {x}, bool({cond}))")
    }

    fn render_local(&self, name: &str, size: usize) -> String {
        format!("var<workgroup> {name}: array<{WORKING_TYPE},{size}>;")
    }

    fn external_local_bufs(&self) -> bool {
        true
    }

    fn render_define(&self, name: &str, dtype: &DType, value: &str) -> Result<String> {
        self.base.render_define(name, dtype, value)
    }

    fn render_size(&self, name: &str, expr: &str) -> String {
        self.base.render_size(name, expr)
    }

    fn barrier(&self) -> Option<&str> {
        self.base.barrier()
    }

    fn global_index(&self, axis: usize) -> Result<&str> {
        self.base.global_index(axis)
    }

    fn local_index(&self, axis: usize) -> Result<&str> {
        self.base.local_index(axis)
    }

    fn render_kernel(
        &self,
        kernel: &[String],
        bufs: &[Buffer],
        bufnames: &[String],
        global_size: &[usize],
        local_size: &[usize],
        prekernel: &[String],
    ) -> Result<KernelArtifact> {
        check_axes("global_size", global_size)?;
        check_axes("local_size", local_size)?;

        let local_size = reverse_axes(local_size);
        let global_size = reverse_axes(global_size);

        let invocations = local_size.iter().try_fold(1usize, |acc, &x| acc.checked_mul(x)).unwrap_or(usize::MAX);
        let limit = self.config.max_workgroup_invocations;
        ensure!(invocations <= limit, WorkgroupTooLargeSnafu { invocations, limit });

        let bound = bound_buffers(bufs, bufnames)?;

        let mut code_lines: Vec<String> = Vec::with_capacity(prekernel.len() + bound.len() + kernel.len() + 3);
        if bound.iter().any(|buf| buf.dtype.base() == ScalarDType::Float16) {
            code_lines.push(F16_DIRECTIVE.to_string());
        }
        code_lines.extend(prekernel.iter().cloned());
        for buf in &bound {
            let elem_type = self.type_name(&buf.dtype)?;
            code_lines.push(format!(
                "@group({}) @binding({}) var<storage,read_write> {}: array<{elem_type}>;",
                self.config.bind_group,
                buf.slot,
                buf.name
            ));
        }

        let workgroup_size = local_size.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(",");
        code_lines.push(format!(
            "@compute @workgroup_size({workgroup_size}) fn {}(@builtin(workgroup_id) gindex: vec3<u32>, @builtin(local_invocation_id) lindex: vec3<u32>) {{",
            self.config.entry_point
        ));
        code_lines.extend(kernel.iter().cloned());
        code_lines.push("}".to_string());

        tracing::debug!(
            buffers = bufs.len(),
            bound = bound.len(),
            global_size = ?global_size,
            local_size = ?local_size,
            "wgsl kernel assembled"
        );

        Ok(KernelArtifact { source: code_lines.join("\n"), global_size, local_size })
    }
}
