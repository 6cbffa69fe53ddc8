use thiserror::Error;

/// Errors surfaced by the snapshot publisher port
///
/// A failed publish is recoverable: the pipeline logs it and keeps
/// processing, since losing one published record is acceptable but
/// losing stream position is not.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("Publish sink unavailable: {0}")]
    SinkUnavailable(String),

    #[error("Publish sink closed")]
    Closed,
}

pub type PublishResult<T> = std::result::Result<T, PublishError>;
