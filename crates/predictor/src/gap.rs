use argus_core::TimestampMs;
use serde::{Deserialize, Serialize};

/// A fixed non-trading interval `[start, end)` within the session,
/// e.g. a midday exchange break. Epoch milliseconds, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGap {
    pub start: TimestampMs,
    pub end: TimestampMs,
}

impl SessionGap {
    pub fn new(start: TimestampMs, end: TimestampMs) -> Self {
        debug_assert!(start < end, "gap start must precede gap end");
        Self { start, end }
    }

    pub fn len_ms(&self) -> TimestampMs {
        self.end - self.start
    }
}

/// Maps data timestamps onto an "effective" timeline with the configured
/// non-trading interval removed.
///
/// Without this, the first rate computed after the break would divide by an
/// elapsed time that includes the whole break and crater toward zero.
/// Stateless and referentially transparent; safe to call from any reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct GapCompensator {
    gap: Option<SessionGap>,
}

impl GapCompensator {
    pub fn new(gap: Option<SessionGap>) -> Self {
        Self { gap }
    }

    /// Effective timestamp for `ts`:
    /// before the gap it is unchanged, inside the gap it clamps to the gap
    /// start, and after the gap the gap length is subtracted.
    pub fn effective(&self, ts: TimestampMs) -> TimestampMs {
        match self.gap {
            None => ts,
            Some(gap) => {
                if ts < gap.start {
                    ts
                } else if ts >= gap.end {
                    ts - gap.len_ms()
                } else {
                    gap.start
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 11:30 - 13:00 as millisecond offsets into some session day
    const GAP_START: TimestampMs = 41_400_000;
    const GAP_END: TimestampMs = 46_800_000;

    fn compensator() -> GapCompensator {
        GapCompensator::new(Some(SessionGap::new(GAP_START, GAP_END)))
    }

    #[test]
    fn test_before_gap_unchanged() {
        let gap = compensator();
        assert_eq!(gap.effective(0), 0);
        assert_eq!(gap.effective(GAP_START - 1), GAP_START - 1);
    }

    #[test]
    fn test_inside_gap_clamps_to_start() {
        let gap = compensator();
        assert_eq!(gap.effective(GAP_START), GAP_START);
        assert_eq!(gap.effective(GAP_START + 60_000), GAP_START);
        assert_eq!(gap.effective(GAP_END - 1), GAP_START);
    }

    #[test]
    fn test_after_gap_shifted_by_gap_length() {
        let gap = compensator();
        assert_eq!(gap.effective(GAP_END), GAP_START);
        assert_eq!(gap.effective(GAP_END + 30_000), GAP_START + 30_000);
    }

    #[test]
    fn test_straddling_pair_excludes_gap_from_elapsed() {
        let gap = compensator();
        let before = GAP_START - 120_000;
        let after = GAP_END + 180_000;

        let real_elapsed = after - before;
        let effective_elapsed = gap.effective(after) - gap.effective(before);
        assert_eq!(
            effective_elapsed,
            real_elapsed - SessionGap::new(GAP_START, GAP_END).len_ms()
        );
        assert!(effective_elapsed >= 0);
    }

    #[test]
    fn test_no_gap_is_identity() {
        let gap = GapCompensator::new(None);
        assert_eq!(gap.effective(123_456), 123_456);
    }
}
