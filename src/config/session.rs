//! Session bootstrap configuration

use serde::Deserialize;

/// Controls how a new session is populated.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Start from the pre-seeded campus board instead of an empty one
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: default_seed_demo_data(),
        }
    }
}

fn default_seed_demo_data() -> bool {
    true
}
