use argus_core::TimestampMs;

/// Port for time abstraction
///
/// This allows the pipeline to use different time sources:
/// - Real system time for live replay pacing statistics
/// - Manual time for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock, in epoch milliseconds
    fn now(&self) -> TimestampMs;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
