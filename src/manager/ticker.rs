use std::time::Duration;

use crate::state::GameState;

/// Local countdown between server `Phase` updates. Display only; the next
/// `Phase` message overwrites whatever this computed.
#[derive(Debug, Clone, Copy)]
pub struct Ticker {
    period: Duration,
}

impl Ticker {
    pub fn new(tick_interval_ms: u64) -> Self {
        Self {
            period: Duration::from_millis(tick_interval_ms.max(1)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Fixed-period driver. The immediate first tick is consumed so the first
    /// `tick().await` resolves one period from now.
    pub async fn interval(&self) -> tokio::time::Interval {
        let mut interval = tokio::time::interval(self.period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        interval.tick().await;
        interval
    }
}

/// `seconds_left = max(0, round(seconds_left - elapsed_ms / 1000))`.
/// Frozen once the game is over.
pub fn advance(state: &mut GameState, elapsed_ms: u64) {
    if state.game_over.is_some() {
        return;
    }
    let remaining = state.seconds_left as f64 - elapsed_ms as f64 / 1000.0;
    state.seconds_left = remaining.round().max(0.0) as u64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameOverReason;

    fn state_with(seconds_left: u64) -> GameState {
        let mut state = GameState::default();
        state.seconds_left = seconds_left;
        state
    }

    #[test]
    fn test_whole_second_ticks_decrement_by_one() {
        let mut state = state_with(30);
        for expected in (25..30).rev() {
            advance(&mut state, 1000);
            assert_eq!(state.seconds_left, expected);
        }
    }

    #[test]
    fn test_clamps_at_zero() {
        let mut state = state_with(1);
        advance(&mut state, 1000);
        assert_eq!(state.seconds_left, 0);
        advance(&mut state, 1000);
        assert_eq!(state.seconds_left, 0);
        advance(&mut state, 60_000);
        assert_eq!(state.seconds_left, 0);
    }

    #[test]
    fn test_fractional_elapsed_rounds() {
        let mut state = state_with(10);
        advance(&mut state, 400);
        assert_eq!(state.seconds_left, 10);
        advance(&mut state, 600);
        assert_eq!(state.seconds_left, 9);
        advance(&mut state, 2500);
        // 6.5 rounds away from zero
        assert_eq!(state.seconds_left, 7);
    }

    #[test]
    fn test_zero_elapsed_is_noop() {
        let mut state = state_with(12);
        advance(&mut state, 0);
        assert_eq!(state.seconds_left, 12);
    }

    #[test]
    fn test_frozen_after_game_over() {
        let mut state = state_with(20);
        state.game_over = Some(GameOverReason::ReachedMaxDay);
        advance(&mut state, 5000);
        assert_eq!(state.seconds_left, 20);
    }

    #[test]
    fn test_ticker_period_from_config() {
        assert_eq!(Ticker::new(1000).period(), Duration::from_secs(1));
        assert_eq!(Ticker::new(0).period(), Duration::from_millis(1));
    }

    #[tokio::test]
    async fn test_interval_skips_immediate_tick() {
        let ticker = Ticker::new(20);
        let mut interval = ticker.interval().await;
        let start = tokio::time::Instant::now();
        interval.tick().await;
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
