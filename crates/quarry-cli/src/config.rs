use quarry::SyncConfig;

/// Configuration for Quarry CLI operations
#[derive(Debug, Default, Clone)]
pub struct Config {
    /// Schema synchronization configuration
    pub sync: SyncConfig,
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the schema synchronization configuration
    pub fn sync(mut self, sync: SyncConfig) -> Self {
        self.sync = sync;
        self
    }
}
