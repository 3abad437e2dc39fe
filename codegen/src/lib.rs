//! Source emitters for linearized compute kernels.
//!
//! This crate renders a kernel that an upstream linearizer has already
//! scheduled (ordered statements over typed buffers) into source text for a
//! concrete kernel language, together with the launch geometry to dispatch it.
//!
//! # Architecture
//!
//! - **Traits**: the [`Emitter`] capability interface
//! - **C-style**: [`cstyle::CStyleEmitter`], the generic C-family skeleton
//! - **WGSL**: [`wgsl::WgslEmitter`], WebGPU compute shaders
//!
//! # Usage
//!
//! ```ignore
//! use shade_codegen::{Buffer, Emitter, WgslConfig, wgsl::WgslEmitter};
//!
//! let emitter = WgslEmitter::new(WgslConfig::default())?;
//! let artifact = emitter.render_kernel(&body, &bufs, &names, &[64], &[8], &[])?;
//! ```

pub mod common;
pub mod config;
pub mod cstyle;
pub mod error;
pub mod index;
pub mod ops;
pub mod tables;
pub mod traits;
pub mod types;
pub mod wgsl;


pub use config::WgslConfig;
pub use error::*;
pub use index::IndexExpr;
pub use ops::{ElementwiseOp, OpRender};
pub use tables::{OpTable, TypeTable};
pub use traits::*;
pub use types::*;

pub use shade_dtype::{DType, ScalarDType};

/// Entry-point name the runtime replaces with the real kernel name.
pub const KERNEL_NAME_PLACEHOLDER: &str = "KERNEL_NAME_PLACEHOLDER";
