//! Pairing engine settings.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DrawConfig {
    /// Fixed RNG seed for reproducible draws. Unset means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}
