//! Element types understood by shade kernel emitters.
//!
//! A [`DType`] is either a scalar or a short SIMD-style vector of one
//! [`ScalarDType`]. Every buffer and every rendered value carries exactly one.

#[cfg(any(test, feature = "proptest"))]
pub mod test;

/// Scalar element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::EnumCount, strum::EnumIter, strum::VariantArray, strum::AsRefStr)]
#[cfg_attr(any(test, feature = "proptest"), derive(proptest_derive::Arbitrary))]
pub enum ScalarDType {
    Bool,
    Int32,
    UInt32,
    Float16,
    Float32,
}

/// Element type: a scalar or a vector of `count` scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// Single value.
    Scalar(ScalarDType),

    /// Vector type (SIMD). `count` is always at least 2.
    Vector { scalar: ScalarDType, count: usize },
}

impl ScalarDType {
    pub const fn bytes(&self) -> usize {
        match self {
            Self::Bool => 1,
            Self::Int32 | Self::UInt32 => 4,
            Self::Float16 => 2,
            Self::Float32 => 4,
        }
    }

    pub const fn is_bool(&self) -> bool {
        matches!(self, Self::Bool)
    }

    pub const fn is_signed(&self) -> bool {
        matches!(self, Self::Int32)
    }

    pub const fn is_unsigned(&self) -> bool {
        matches!(self, Self::UInt32)
    }

    pub const fn is_int(&self) -> bool {
        self.is_signed() || self.is_unsigned()
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float16 | Self::Float32)
    }

    /// Inclusive integer range representable by this scalar, `None` for
    /// non-integer types.
    pub const fn int_range(&self) -> Option<(i64, i64)> {
        match self {
            Self::Int32 => Some((i32::MIN as i64, i32::MAX as i64)),
            Self::UInt32 => Some((0, u32::MAX as i64)),
            _ => None,
        }
    }
}

impl From<ScalarDType> for DType {
    fn from(scalar: ScalarDType) -> Self {
        Self::Scalar(scalar)
    }
}

impl DType {
    /// Create a vector type from this dtype.
    ///
    /// `vec(1)` returns the scalar unchanged.
    pub fn vec(&self, count: usize) -> Self {
        if count == 1 {
            return *self;
        }

        match self {
            Self::Scalar(s) => Self::Vector { scalar: *s, count },
            Self::Vector { .. } => panic!("Cannot vectorize an already vectorized type"),
        }
    }

    /// Get the base scalar type (works for both scalars and vectors).
    pub fn base(&self) -> ScalarDType {
        match self {
            Self::Scalar(s) => *s,
            Self::Vector { scalar, .. } => *scalar,
        }
    }

    /// Scalar type of a single lane.
    pub fn scalar_dtype(&self) -> Self {
        Self::Scalar(self.base())
    }

    /// Get the vector count (1 for scalars).
    pub fn count(&self) -> usize {
        match self {
            Self::Vector { count, .. } => *count,
            Self::Scalar(_) => 1,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector { .. })
    }

    pub fn bytes(&self) -> usize {
        self.base().bytes() * self.count()
    }

    pub fn is_bool(&self) -> bool {
        self.base().is_bool()
    }

    pub fn is_int(&self) -> bool {
        self.base().is_int()
    }

    pub fn is_float(&self) -> bool {
        self.base().is_float()
    }
}

// Legacy-style aliases for the common scalar types.
#[allow(non_upper_case_globals)]
impl DType {
    pub const Bool: Self = Self::Scalar(ScalarDType::Bool);
    pub const Int32: Self = Self::Scalar(ScalarDType::Int32);
    pub const UInt32: Self = Self::Scalar(ScalarDType::UInt32);
    pub const Float16: Self = Self::Scalar(ScalarDType::Float16);
    pub const Float32: Self = Self::Scalar(ScalarDType::Float32);
}
