use crate::config::Config;
use crate::schedule::ConflictDetector;

/// State shared by every request handler. Never mutated after startup.
pub struct AppState {
    pub detector: ConflictDetector,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            detector: config.detector(),
        }
    }
}
