use serde::{Deserialize, Serialize};

/// A single timed caption. Field order is the key order of the JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    pub(crate) start_time: f64,
    pub(crate) subtitle: String,
    pub(crate) end_time: f64,
}
