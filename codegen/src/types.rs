//! Types exchanged with the linearizer and the runtime.

use shade_dtype::DType;
use smallvec::SmallVec;

/// Launch size along up to three axes. Axis 0 is the fastest-varying axis
/// in the linearizer's convention.
pub type LaunchSize = SmallVec<[usize; 3]>;

/// A buffer referenced by a kernel.
///
/// Order in the buffer list is significant: it is the binding order the
/// linearizer assumed when it named buffers.
#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    /// Device storage backing a tensor.
    Global(GlobalBuffer),
    /// Workgroup-shared scratch memory.
    Local(LocalBuffer),
}

/// Storage backing a tensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalBuffer {
    pub dtype: DType,
    /// Value is statically known, so the buffer gets no binding and no
    /// declaration.
    pub const_folded: bool,
}

/// Workgroup-shared scratch memory, always addressed as float32.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalBuffer {
    pub name: String,
    pub size: usize,
}

impl Buffer {
    /// Realized global buffer.
    pub fn global(dtype: DType) -> Self {
        Self::Global(GlobalBuffer { dtype, const_folded: false })
    }

    /// Constant-folded global buffer.
    pub fn folded(dtype: DType) -> Self {
        Self::Global(GlobalBuffer { dtype, const_folded: true })
    }

    pub fn local(name: impl Into<String>, size: usize) -> Self {
        Self::Local(LocalBuffer { name: name.into(), size })
    }

    /// Element type. Local buffers are float32.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Global(g) => g.dtype,
            Self::Local(_) => DType::Float32,
        }
    }

    /// Whether the buffer needs a runtime storage binding.
    pub fn needs_binding(&self) -> bool {
        matches!(self, Self::Global(GlobalBuffer { const_folded: false, .. }))
    }
}

/// Numeric value handed to the constant renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl ConstValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Int(i) => *i as f64,
            Self::Float(f) => *f,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
        }
    }
}

impl From<bool> for ConstValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for ConstValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for ConstValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ConstValue {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f32> for ConstValue {
    fn from(value: f32) -> Self {
        Self::Float(value.into())
    }
}

impl From<f64> for ConstValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A rendered kernel ready for compilation and dispatch.
///
/// Built once per render call and handed to the runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelArtifact {
    /// Kernel source text.
    pub source: String,

    /// Workgroup count per axis, in the target's axis order.
    pub global_size: LaunchSize,

    /// Threads per workgroup per axis, in the target's axis order.
    pub local_size: LaunchSize,
}
