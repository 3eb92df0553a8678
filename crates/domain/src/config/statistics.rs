use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatisticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Events buffered before emitters wait on the consumer
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_queue_capacity() -> usize {
    1024
}
