//! Common utilities shared between emitters.

use shade_dtype::DType;
use snafu::{OptionExt, ensure};

use crate::error::{BufferNameMismatchSnafu, ConstOutOfRangeSnafu, TooManyAxesSnafu};
use crate::{Buffer, ConstValue, LaunchSize, Result};

/// Maximum launch axes; the built-in index vectors have three components.
pub const MAX_AXES: usize = 3;

/// A buffer that received a storage binding.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundBuffer<'a> {
    /// Binding slot, counted over bound buffers only.
    pub slot: usize,
    /// Position in the original buffer list.
    pub position: usize,
    pub name: &'a str,
    pub dtype: DType,
}

/// Assign binding slots.
///
/// Local buffers and constant-folded globals are skipped and consume no
/// slot, so the returned slots are exactly `0..k` in buffer-list order.
pub fn bound_buffers<'a>(bufs: &[Buffer], bufnames: &'a [String]) -> Result<Vec<BoundBuffer<'a>>> {
    ensure!(bufs.len() == bufnames.len(), BufferNameMismatchSnafu { buffers: bufs.len(), names: bufnames.len() });

    let mut bound = Vec::with_capacity(bufs.len());
    for (position, (buf, name)) in bufs.iter().zip(bufnames).enumerate() {
        if !buf.needs_binding() {
            tracing::trace!(position, name = name.as_str(), ?buf, "buffer needs no binding");
            continue;
        }
        let slot = bound.len();
        tracing::trace!(position, slot, name = name.as_str(), "bound buffer");
        bound.push(BoundBuffer { slot, position, name, dtype: buf.dtype() });
    }
    Ok(bound)
}

/// Fail if a launch size has more axes than the index vectors.
pub fn check_axes(what: &'static str, sizes: &[usize]) -> Result<()> {
    ensure!(sizes.len() <= MAX_AXES, TooManyAxesSnafu { what, axes: sizes.len() });
    Ok(())
}

/// Reverse axis order; an empty size becomes a single axis of 1.
pub fn reverse_axes(sizes: &[usize]) -> LaunchSize {
    if sizes.is_empty() {
        return smallvec::smallvec![1];
    }
    sizes.iter().rev().copied().collect()
}

/// Shortest decimal text that reads back as the same value in binary32,
/// which also covers every binary16 value. Always contains a `.` or an
/// exponent, never a suffix.
pub fn float_literal(value: f64) -> String {
    format!("{:?}", value as f32)
}

/// Bare decimal integer literal, range-checked against `dtype`.
///
/// Float inputs truncate toward zero; non-finite floats never fit.
pub fn int_literal(value: ConstValue, dtype: &DType) -> Result<String> {
    let out_of_range = || ConstOutOfRangeSnafu { value: format!("{value:?}"), dtype: *dtype };

    let int = match value {
        ConstValue::Bool(b) => Some(i64::from(b)),
        ConstValue::Int(i) => Some(i),
        ConstValue::Float(f) if f.is_finite() => Some(f.trunc() as i64),
        ConstValue::Float(_) => None,
    }
    .with_context(out_of_range)?;

    if let Some((min, max)) = dtype.base().int_range() {
        ensure!((min..=max).contains(&int), out_of_range());
    }
    Ok(int.to_string())
}
