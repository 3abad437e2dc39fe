//! Emitter configuration.
//!
//! Provides typed configuration for the WGSL emitter with bon builders.
//! Supports both explicit configuration and environment variable fallbacks.

use bon::bon;

use crate::KERNEL_NAME_PLACEHOLDER;

/// Default `maxComputeInvocationsPerWorkgroup` of a WebGPU device.
pub const DEFAULT_MAX_WORKGROUP_INVOCATIONS: usize = 256;

/// Configuration for the WGSL emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WgslConfig {
    /// Entry-point function name. The runtime substitutes the placeholder.
    pub entry_point: String,
    /// Bind group holding every storage buffer.
    pub bind_group: u32,
    /// Upper bound on threads per workgroup.
    pub max_workgroup_invocations: usize,
}

impl Default for WgslConfig {
    fn default() -> Self {
        Self {
            entry_point: KERNEL_NAME_PLACEHOLDER.to_string(),
            bind_group: 0,
            max_workgroup_invocations: DEFAULT_MAX_WORKGROUP_INVOCATIONS,
        }
    }
}

#[bon]
impl WgslConfig {
    /// Create a WGSL configuration with builder pattern.
    #[builder]
    pub fn builder(
        #[builder(into, default = String::from(KERNEL_NAME_PLACEHOLDER))] entry_point: String,
        #[builder(default = 0)] bind_group: u32,
        #[builder(default = DEFAULT_MAX_WORKGROUP_INVOCATIONS)] max_workgroup_invocations: usize,
    ) -> Self {
        Self { entry_point, bind_group, max_workgroup_invocations }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// * `SHADE_WGSL_ENTRY_POINT` - Entry-point name (default: `KERNEL_NAME_PLACEHOLDER`)
    /// * `SHADE_WGSL_BIND_GROUP` - Bind group index (default: 0)
    /// * `SHADE_WGSL_MAX_INVOCATIONS` - Threads per workgroup limit (default: 256)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`WgslConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let entry_point = lookup("SHADE_WGSL_ENTRY_POINT").filter(|s| !s.is_empty()).unwrap_or(defaults.entry_point);
        let bind_group =
            lookup("SHADE_WGSL_BIND_GROUP").and_then(|s| s.parse().ok()).unwrap_or(defaults.bind_group);
        let max_workgroup_invocations = lookup("SHADE_WGSL_MAX_INVOCATIONS")
            .and_then(|s| s.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.max_workgroup_invocations);

        Self { entry_point, bind_group, max_workgroup_invocations }
    }
}
