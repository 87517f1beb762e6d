//! Programmatic container settings, shared by a root scope and all its branches.

/// Maximum resolution depth (prevents pathological cases)
pub const MAX_RESOLUTION_DEPTH: usize = 100;

/// How [Scope::put](crate::Scope::put) detects duplicate registrations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Only the scope's own bindings are checked: a branch may shadow its ancestors.
    #[default]
    Local,
    /// Reject an identifier already bound anywhere on the lookup chain.
    Lineage,
}

#[derive(Clone, Debug)]
pub struct ContainerConfig {
    pub duplicate_policy: DuplicatePolicy,
    /// Fail with a cyclic dependency error instead of recursing forever
    pub detect_cycles: bool,
    pub max_resolution_depth: usize,
}

impl ContainerConfig {
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    pub fn with_cycle_detection(mut self, enabled: bool) -> Self {
        self.detect_cycles = enabled;
        self
    }

    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = depth;
        self
    }
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Local,
            detect_cycles: true,
            max_resolution_depth: MAX_RESOLUTION_DEPTH,
        }
    }
}
