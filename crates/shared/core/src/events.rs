use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Symbol, TimestampMs};

/// Aggressor side of a matched trade
///
/// `AggressorBuy` means the buyer initiated (lifted an offer),
/// `AggressorSell` means the seller initiated (hit a bid).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "buy")]
    AggressorBuy,
    #[serde(rename = "sell")]
    AggressorSell,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(&self) -> Self {
        match self {
            Side::AggressorBuy => Side::AggressorSell,
            Side::AggressorSell => Side::AggressorBuy,
        }
    }
}

/// One matched trade, already normalized by the upstream feed
///
/// Immutable once constructed; owned by the pipeline stage currently
/// processing it. Timestamps are non-decreasing within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub symbol: Symbol,
    pub volume: u64,
    pub price: Decimal,
    pub side: Side,
    pub timestamp: TimestampMs,
}

impl TradeEvent {
    pub fn new(
        symbol: impl Into<Symbol>,
        volume: u64,
        price: Decimal,
        side: Side,
        timestamp: TimestampMs,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            volume,
            price,
            side,
            timestamp,
        }
    }

    /// The (symbol, volume) identity used to group repeated same-size trades
    pub fn pattern_key(&self) -> PatternKey {
        PatternKey::new(self.symbol.clone(), self.volume)
    }
}

/// Identity of a sliding window: repeated trades of the same size in the
/// same symbol share a key. Keys are created lazily on first sight.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatternKey {
    pub symbol: Symbol,
    pub volume: u64,
}

impl PatternKey {
    pub fn new(symbol: impl Into<Symbol>, volume: u64) -> Self {
        Self {
            symbol: symbol.into(),
            volume,
        }
    }
}

impl std::fmt::Display for PatternKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.symbol, self.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::AggressorBuy.opposite(), Side::AggressorSell);
        assert_eq!(Side::AggressorSell.opposite(), Side::AggressorBuy);
    }

    #[test]
    fn test_side_serde_rename() {
        let json = serde_json::to_string(&Side::AggressorBuy).unwrap();
        assert_eq!(json, "\"buy\"");
        let side: Side = serde_json::from_str("\"sell\"").unwrap();
        assert_eq!(side, Side::AggressorSell);
    }

    #[test]
    fn test_pattern_key_groups_same_size_trades() {
        let a = TradeEvent::new("HPG", 1000, dec!(24150), Side::AggressorBuy, 1);
        let b = TradeEvent::new("HPG", 1000, dec!(24200), Side::AggressorSell, 2);
        let c = TradeEvent::new("HPG", 1500, dec!(24150), Side::AggressorBuy, 3);

        assert_eq!(a.pattern_key(), b.pattern_key());
        assert_ne!(a.pattern_key(), c.pattern_key());
    }

    #[test]
    fn test_trade_event_json_roundtrip() {
        let event = TradeEvent::new("VNM", 200, dec!(65.4), Side::AggressorSell, 1_697_681_700_817);
        let json = serde_json::to_string(&event).unwrap();
        let back: TradeEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
