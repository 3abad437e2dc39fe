//! Generic C-family emitter.
//!
//! Holds the rendering rules shared by C-like kernel languages: statement
//! assembly, default load/store text, constant formatting and index
//! rendering. Surface syntax (prefixes, barrier, thread-index builtins) comes
//! from a [`CStyleLanguage`]; the type and operator tables are supplied at
//! construction. Target emitters compose a `CStyleEmitter` and delegate the
//! hooks they do not change.
//!
//! # Kernel Signature
//!
//! ```c
//! void KERNEL_NAME_PLACEHOLDER(float* data0, const float* data1) {
//! ```
//! - one pointer parameter per bound buffer, in binding order
//! - every parameter after the first is `const`

pub mod types;

use bon::bon;
use shade_dtype::{DType, ScalarDType};
use snafu::{OptionExt, ensure};

use crate::common::{bound_buffers, check_axes};
use crate::error::{AxisOutOfRangeSnafu, UnsupportedVectorSnafu};
use crate::{
    Buffer, ConstValue, ElementwiseOp, Emitter, IndexExpr, KERNEL_NAME_PLACEHOLDER, KernelArtifact, OpRender,
    OpTable, Result, TypeTable,
};

use self::types::{c_const, c_ops, c_types};

/// Surface syntax of a C-family kernel language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CStyleLanguage {
    /// Qualifier before the kernel's return type (e.g. `__kernel`).
    pub kernel_prefix: String,
    /// Address-space qualifier on global buffer pointers.
    pub buffer_prefix: String,
    /// Address-space qualifier on shared-memory arrays.
    pub smem_prefix: String,
    /// Type or keyword introducing size/index declarations.
    pub size_prefix: String,
    /// Keyword replacing the type name in variable declarations.
    pub generic_var_prefix: Option<String>,
    /// Workgroup barrier statement.
    pub barrier: Option<String>,
    /// Workgroup index expression per axis.
    pub gid: [String; 3],
    /// Local invocation index expression per axis.
    pub lid: [String; 3],
    /// Kernel function name.
    pub entry_point: String,
}

impl Default for CStyleLanguage {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[bon]
impl CStyleLanguage {
    /// Create a language description with builder pattern.
    #[builder]
    pub fn builder(
        #[builder(into, default = String::new())] kernel_prefix: String,
        #[builder(into, default = String::new())] buffer_prefix: String,
        #[builder(into, default = String::new())] smem_prefix: String,
        #[builder(into, default = String::from("int"))] size_prefix: String,
        #[builder(into)] generic_var_prefix: Option<String>,
        #[builder(into)] barrier: Option<String>,
        #[builder(default = axis_exprs("(int)get_group_id"))] gid: [String; 3],
        #[builder(default = axis_exprs("(int)get_local_id"))] lid: [String; 3],
        #[builder(into, default = String::from(KERNEL_NAME_PLACEHOLDER))] entry_point: String,
    ) -> Self {
        Self { kernel_prefix, buffer_prefix, smem_prefix, size_prefix, generic_var_prefix, barrier, gid, lid, entry_point }
    }
}

/// `f(0)`, `f(1)`, `f(2)`.
fn axis_exprs(func: &str) -> [String; 3] {
    [0, 1, 2].map(|axis| format!("{func}({axis})"))
}

/// Base emitter for C-family kernel languages.
#[derive(Debug, Clone)]
pub struct CStyleEmitter {
    lang: CStyleLanguage,
    types: TypeTable,
    ops: OpTable,
}

impl CStyleEmitter {
    /// Emitter with the default C type names and operator spellings.
    pub fn new(lang: CStyleLanguage) -> Result<Self> {
        Self::with_tables(lang, c_types(), c_ops())
    }

    /// Emitter with target-supplied tables. Fails if either table is
    /// incomplete.
    pub fn with_tables(
        lang: CStyleLanguage,
        types: impl IntoIterator<Item = (ScalarDType, &'static str)>,
        ops: impl IntoIterator<Item = (ElementwiseOp, OpRender)>,
    ) -> Result<Self> {
        let types = TypeTable::try_from_entries(types)?;
        let ops = OpTable::try_from_entries(ops)?;
        Ok(Self { lang, types, ops })
    }

    pub fn language(&self) -> &CStyleLanguage {
        &self.lang
    }

    pub fn types(&self) -> &TypeTable {
        &self.types
    }

    /// `(T*)(buf+idx)` pointer expression for a vector access.
    fn vector_pointer(&self, buf_name: &str, vec_dtype: &DType, idx: &IndexExpr, local: bool) -> Result<String> {
        let prefix = if local { &self.lang.smem_prefix } else { &self.lang.buffer_prefix };
        let vec_type = self.type_name(vec_dtype)?;
        Ok(format!("(({prefix}{vec_type}*)({buf_name}+{}))", idx.render_stripped()))
    }
}

impl Emitter for CStyleEmitter {
    fn backend_name(&self) -> &str {
        "cstyle"
    }

    fn type_name(&self, dtype: &DType) -> Result<String> {
        let base = self.types.base(dtype)?;
        Ok(match dtype {
            DType::Scalar(_) => base.to_string(),
            DType::Vector { count, .. } => format!("{base}{count}"),
        })
    }

    fn code_for_op(&self, op: ElementwiseOp, operands: &[&str]) -> Result<String> {
        self.ops.render(op, operands)
    }

    fn render_const(&self, value: ConstValue, dtype: &DType) -> Result<String> {
        let lit = c_const(value, &dtype.scalar_dtype())?;
        if dtype.count() > 1 { self.render_cast(&vec![lit; dtype.count()], dtype) } else { Ok(lit) }
    }

    fn render_cast(&self, parts: &[String], dtype: &DType) -> Result<String> {
        ensure!(
            parts.len() == 1 || parts.len() == dtype.count(),
            UnsupportedVectorSnafu { dtype: *dtype, reason: format!("cannot build from {} parts", parts.len()) }
        );
        Ok(format!("({})({})", self.type_name(dtype)?, parts.join(",")))
    }

    fn render_load(
        &self,
        output_dtype: &DType,
        buf_name: &str,
        buf_dtype: &DType,
        idx: &IndexExpr,
        local: bool,
    ) -> Result<String> {
        let out = if output_dtype.count() > 1 {
            let vec_dtype = buf_dtype.scalar_dtype().vec(output_dtype.count());
            format!("*{}", self.vector_pointer(buf_name, &vec_dtype, idx, local)?)
        } else {
            format!("{buf_name}[{}]", idx.render())
        };

        if output_dtype.base() != buf_dtype.base() { self.render_cast(&[out], output_dtype) } else { Ok(out) }
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
        if var_dtype.count() > 1 {
            let vec_dtype = buf_dtype.scalar_dtype().vec(var_dtype.count());
            let value = if var_dtype.base() != buf_dtype.base() {
                self.render_cast(&[var_name.to_string()], &vec_dtype)?
            } else {
                var_name.to_string()
            };
            return Ok(format!("*{} = {value};", self.vector_pointer(buf_name, &vec_dtype, idx, local)?));
        }

        let value =
            if var_dtype != buf_dtype { self.render_cast(&[var_name.to_string()], buf_dtype)? } else { var_name.to_string() };
        Ok(format!("{buf_name}[{}] = {value};", idx.render()))
    }

    fn render_for(&self, var: &str, min: i64, max: i64) -> String {
        format!("for (int {var} = {min}; {var} <= {max}; ++{var}) {{")
    }

    fn render_conditional(&self, cond: &str, x: &str, y: &str) -> String {
        format!("({cond})?({x}):{y}")
    }

    fn render_local(&self, name: &str, size: usize) -> String {
        format!("{}float {name}[{size}];", self.lang.smem_prefix)
    }

    fn external_local_bufs(&self) -> bool {
        false
    }

    fn render_define(&self, name: &str, dtype: &DType, value: &str) -> Result<String> {
        Ok(match &self.lang.generic_var_prefix {
            Some(prefix) => format!("{prefix}{name} = {value};"),
            None => format!("{} {name} = {value};", self.type_name(dtype)?),
        })
    }

    fn render_size(&self, name: &str, expr: &str) -> String {
        format!("{} {name} = {expr};", self.lang.size_prefix)
    }

    fn barrier(&self) -> Option<&str> {
        self.lang.barrier.as_deref()
    }

    fn global_index(&self, axis: usize) -> Result<&str> {
        self.lang.gid.get(axis).map(String::as_str).context(AxisOutOfRangeSnafu { axis })
    }

    fn local_index(&self, axis: usize) -> Result<&str> {
        self.lang.lid.get(axis).map(String::as_str).context(AxisOutOfRangeSnafu { axis })
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
        let bound = bound_buffers(bufs, bufnames)?;

        let mut params = Vec::with_capacity(bound.len());
        for buf in &bound {
            let constness = if buf.slot > 0 { "const " } else { "" };
            let elem_type = self.type_name(&buf.dtype)?;
            params.push(format!("{constness}{}{elem_type}* {}", self.lang.buffer_prefix, buf.name));
        }

        let kernel_prefix = if self.lang.kernel_prefix.is_empty() {
            String::new()
        } else {
            format!("{} ", self.lang.kernel_prefix)
        };

        let mut code_lines: Vec<String> = prekernel.to_vec();
        code_lines.push(format!("{kernel_prefix}void {}({}) {{", self.lang.entry_point, params.join(", ")));
        code_lines.extend(kernel.iter().cloned());
        code_lines.push("}".to_string());

        tracing::debug!(buffers = bufs.len(), bound = bound.len(), "cstyle kernel assembled");

        Ok(KernelArtifact {
            source: code_lines.join("\n"),
            global_size: global_size.iter().copied().collect(),
            local_size: local_size.iter().copied().collect(),
        })
    }
}
