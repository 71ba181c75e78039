//! Position sizing rules of the long/short tool.

/// Reward multiple applied to the entry/stop distance
pub const RISK_REWARD_MULTIPLE: f64 = 3.0;

/// Take profit sits three risk units past the entry, on the far side from the stop.
pub fn take_profit_price(entry: f64, stop_loss: f64) -> f64 {
    entry + RISK_REWARD_MULTIPLE * (entry - stop_loss)
}

/// A position is long while its stop sits below the entry.
pub fn is_long(entry: f64, stop_loss: f64) -> bool {
    stop_loss < entry
}

/// Creation progress and direction of a long/short tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LongShortState {
    /// Clicks taken while placing entry and stop (0, 1, 2)
    pub click_count: u8,
    pub is_long: bool,
}

impl LongShortState {
    /// Re-derives the direction; returns `true` when it flipped.
    pub fn update_direction(&mut self, entry: f64, stop_loss: f64) -> bool {
        let long = is_long(entry, stop_loss);
        let flipped = long != self.is_long;
        self.is_long = long;
        flipped
    }
}
