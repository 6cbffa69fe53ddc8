use thiserror::Error;

/// Errors while opening or reading the event feed
///
/// An unreadable source is the one unrecoverable input error: the process
/// exits non-zero. Individual malformed lines are not represented here -
/// they are counted and skipped at the feed boundary.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Input source unreadable: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors while loading the runner configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}
