use serde::{Deserialize, Serialize};

/// Number of compiled nodes kept when no capacity is configured.
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Settings for a [`Calculator`](crate::calculator::Calculator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of nodes in the script cache; `0` means the default.
    pub cache_capacity: usize,
    /// Maximum number of idle VMs kept in the pool.
    pub vm_pool_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            vm_pool_size: num_cpus::get(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
